use async_trait::async_trait;

use crate::error::Result;
use crate::types::ResolvedMedia;

/// Given a permalink, produce the platform identifier and display metadata.
///
/// Implementations: [`crate::graph::GraphSource`] talks to the Graph API,
/// [`crate::sample::SampleSource`] returns fixed sample media.
#[async_trait]
pub trait MediaSource: Send + Sync {
    fn name(&self) -> &str;
    async fn resolve(&self, permalink: &str) -> Result<ResolvedMedia>;
}
