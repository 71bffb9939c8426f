use async_trait::async_trait;

use crate::error::Result;
use crate::source::MediaSource;
use crate::types::{GraphMedia, ResolvedMedia};

pub const SAMPLE_POSTER: &str = "https://images.unsplash.com/photo-1549880338-65ddcdfd017b?q=80&w=1080&auto=format&fit=crop";
pub const SAMPLE_VIDEO: &str = "https://samplelib.com/lib/preview/mp4/sample-5s.mp4";

/// Demo table used when no input is supplied.
pub const DEFAULT_TABLE: &str = "Name\tResults\tCPR\tVideo Link
American Psycho\t2\t0.2\thttps://www.instagram.com/p/DMBhlKcJHK4/#advertiser
Jake WOrk\t30\t0.12\thttps://www.instagram.com/p/DMBhlgJMmCN/#advertiser";

/// Offline source: every permalink resolves to the same sample clip and
/// poster, with no platform identifier.
#[derive(Debug, Clone, Default)]
pub struct SampleSource;

#[async_trait]
impl MediaSource for SampleSource {
    fn name(&self) -> &str { "sample" }

    async fn resolve(&self, permalink: &str) -> Result<ResolvedMedia> {
        Ok(ResolvedMedia {
            id: None,
            media: GraphMedia {
                media_type: Some("VIDEO".into()),
                media_url: Some(SAMPLE_VIDEO.into()),
                thumbnail_url: Some(SAMPLE_POSTER.into()),
                permalink: Some(permalink.to_string()),
                ..GraphMedia::default()
            },
        })
    }
}
