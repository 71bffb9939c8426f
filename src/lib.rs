pub mod config;
pub mod error;
pub mod graph;
pub mod mapping;
pub mod resolver;
pub mod sample;
pub mod service;
pub mod source;
pub mod table;
pub mod types;
pub mod view;

// --- Library API for embedding ---

/// Convenience re-exports for embedders.
pub mod prelude {
    pub use crate::config::{Config, Credentials};
    pub use crate::error::ResolveError;
    pub use crate::resolver::{RowOutcome, RowResolver};
    pub use crate::service::{ResolveService, ServiceResponse};
    pub use crate::source::MediaSource;
    pub use crate::types::{GraphMedia, MediaItem, ResolvedMedia, Row, Stats};
    pub use crate::Gallery;
}

use std::sync::Arc;

use crate::config::Config;
use crate::error::Result;
use crate::graph::GraphSource;
use crate::resolver::{RowOutcome, RowResolver};
use crate::sample::SampleSource;
use crate::service::ResolveService;
use crate::source::MediaSource;
use crate::types::{MediaItem, Row};

/// Library entry point: table text in, media items out.
#[derive(Clone)]
pub struct Gallery {
    resolver: RowResolver,
}

impl Gallery {
    /// Graph API backed gallery. Credentials are checked here, once.
    pub fn connect(config: &Config) -> Result<Self> {
        let source = GraphSource::new(config)?;
        Ok(Self::with_source(Arc::new(source), config))
    }

    /// Offline gallery resolving every row to sample media.
    pub fn sample(config: &Config) -> Self { Self::with_source(Arc::new(SampleSource), config) }

    pub fn with_source(source: Arc<dyn MediaSource>, config: &Config) -> Self {
        Self { resolver: RowResolver::new(source).with_concurrency(config.concurrency()) }
    }

    pub fn resolver(&self) -> &RowResolver { &self.resolver }

    pub fn parse_table(&self, text: &str) -> Vec<Row> { table::parse(text) }

    /// Parse then resolve; the first failing row fails the whole load.
    pub async fn load_table(&self, text: &str) -> Result<Vec<MediaItem>> {
        let rows = table::parse(text);
        self.resolver.resolve(&rows).await
    }

    /// Parse then resolve every row independently.
    pub async fn load_table_each(&self, text: &str) -> Vec<RowOutcome> {
        let rows = table::parse(text);
        self.resolver.resolve_each(&rows).await
    }

    pub fn service(&self) -> ResolveService { ResolveService::new(self.resolver.clone()) }
}
