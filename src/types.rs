use serde::{Deserialize, Serialize};

/// One parsed input record prior to resolution.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Row {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub results: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cpr: Option<f64>,
    #[serde(default)]
    pub link: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Stats {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub results: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cpr: Option<f64>,
}

/// One normalized, resolved output record ready for display.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MediaItem {
    pub id: String,
    pub permalink: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub video_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thumbnail_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preview: Option<String>,
    pub stats: Stats,
}

impl MediaItem {
    pub fn is_video(&self) -> bool { self.video_url.is_some() }

    /// Poster image for the card, falling back to the preview copy.
    pub fn poster(&self) -> Option<&str> {
        self.thumbnail_url.as_deref().or(self.preview.as_deref())
    }
}

/// Metadata endpoint payload. Every field is optional on the wire.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GraphMedia {
    #[serde(default)]
    pub media_type: Option<String>,
    #[serde(default)]
    pub media_url: Option<String>,
    #[serde(default)]
    pub thumbnail_url: Option<String>,
    #[serde(default)]
    pub permalink: Option<String>,
    #[serde(default)]
    pub caption: Option<String>,
    #[serde(default)]
    pub timestamp: Option<String>,
}

impl GraphMedia {
    pub fn is_video(&self) -> bool { self.media_type.as_deref() == Some("VIDEO") }
}

/// Identifier lookup payload; only `media_id` is read.
#[derive(Debug, Clone, Default, Deserialize)]
pub(crate) struct OEmbed {
    #[serde(default)]
    pub media_id: Option<String>,
}

/// What a media source hands back for one permalink.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResolvedMedia {
    pub id: Option<String>,
    pub media: GraphMedia,
}
