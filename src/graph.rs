use async_trait::async_trait;
use tracing::debug;
use url::Url;

use crate::config::{Config, Credentials};
use crate::error::{ResolveError, Result};
use crate::source::MediaSource;
use crate::types::{GraphMedia, OEmbed, ResolvedMedia};

pub const MEDIA_FIELDS: &str = "media_type,media_url,thumbnail_url,permalink,caption,timestamp";

const OEMBED: &str = "oEmbed";
const MEDIA: &str = "Media fetch";

/// Graph API backed source: an oEmbed lookup for the media id, then a media
/// fetch by id. Two requests per permalink, no caching, no retry.
pub struct GraphSource {
    client: reqwest::Client,
    base: Url,
    creds: Credentials,
}

impl GraphSource {
    /// Fails with a configuration error before any request if a credential is missing.
    pub fn new(config: &Config) -> Result<Self> {
        let creds = config.credentials()?;
        let client = reqwest::Client::builder()
            .user_agent(config.user_agent.as_str())
            .timeout(config.timeout())
            .build()
            .map_err(|source| ResolveError::Transport { endpoint: "client", source })?;
        Self::build(config, creds, client)
    }

    /// Same as [`GraphSource::new`] but reuses a caller-built client.
    pub fn with_client(config: &Config, client: reqwest::Client) -> Result<Self> {
        let creds = config.credentials()?;
        Self::build(config, creds, client)
    }

    fn build(config: &Config, creds: Credentials, client: reqwest::Client) -> Result<Self> {
        let raw = format!("{}/{}/", config.graph_base_url.trim_end_matches('/'), config.graph_version);
        let base = Url::parse(&raw)
            .ok()
            .filter(|u| !u.cannot_be_a_base())
            .ok_or_else(|| ResolveError::Configuration(format!("a usable graph base url (got {raw})")))?;
        Ok(Self { client, base, creds })
    }

    fn endpoint(&self, segment: &str) -> Url {
        let mut url = self.base.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().push(segment);
        }
        url
    }

    pub fn oembed_url(&self, permalink: &str) -> Url {
        let mut url = self.endpoint("instagram_oembed");
        url.query_pairs_mut()
            .append_pair("url", permalink)
            .append_pair("access_token", &self.creds.app_token());
        url
    }

    pub fn media_url(&self, media_id: &str) -> Url {
        let mut url = self.endpoint(media_id);
        url.query_pairs_mut()
            .append_pair("fields", MEDIA_FIELDS)
            .append_pair("access_token", &self.creds.access_token);
        url
    }

    /// Identifier resolution.
    pub async fn lookup_media_id(&self, permalink: &str) -> Result<String> {
        debug!(permalink, "oembed lookup");
        let body: OEmbed = self.get_json(OEMBED, self.oembed_url(permalink)).await?;
        body.media_id
            .filter(|id| !id.is_empty())
            .ok_or_else(|| ResolveError::Resolution(permalink.to_string()))
    }

    /// Metadata fetch.
    pub async fn fetch_media(&self, media_id: &str) -> Result<GraphMedia> {
        debug!(media_id, "media fetch");
        self.get_json(MEDIA, self.media_url(media_id)).await
    }

    async fn get_json<T: serde::de::DeserializeOwned>(&self, endpoint: &'static str, url: Url) -> Result<T> {
        let resp = self.client.get(url).send().await
            .map_err(|source| ResolveError::Transport { endpoint, source })?;
        let status = resp.status();
        if !status.is_success() {
            return Err(ResolveError::Upstream { endpoint, status: status.as_u16() });
        }
        resp.json::<T>().await.map_err(|source| ResolveError::Transport { endpoint, source })
    }
}

#[async_trait]
impl MediaSource for GraphSource {
    fn name(&self) -> &str { "graph" }

    async fn resolve(&self, permalink: &str) -> Result<ResolvedMedia> {
        let id = self.lookup_media_id(permalink).await?;
        let media = self.fetch_media(&id).await?;
        Ok(ResolvedMedia { id: Some(id), media })
    }
}
