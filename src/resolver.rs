use futures::stream::{self, StreamExt, TryStreamExt};
use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::error::Result;
use crate::mapping::{media_item_from, strip_fragment};
use crate::source::MediaSource;
use crate::types::{MediaItem, Row};

/// Outcome of one row under per-row resolution.
pub type RowOutcome = Result<MediaItem>;

/// Resolves parsed rows into media items through a [`MediaSource`].
///
/// Rows are resolved in input order, `concurrency` at a time (default 1, so
/// each row's lookups finish before the next row starts). Output order always
/// matches input order.
#[derive(Clone)]
pub struct RowResolver {
    source: Arc<dyn MediaSource>,
    concurrency: usize,
}

impl RowResolver {
    pub fn new(source: Arc<dyn MediaSource>) -> Self { Self { source, concurrency: 1 } }

    pub fn with_concurrency(mut self, concurrency: usize) -> Self {
        self.concurrency = concurrency.max(1);
        self
    }

    pub fn source_name(&self) -> &str { self.source.name() }

    pub async fn resolve_row(&self, index: usize, row: &Row) -> Result<MediaItem> {
        let permalink = strip_fragment(&row.link);
        debug!(index, permalink, "resolving row");
        let resolved = self.source.resolve(permalink).await?;
        Ok(media_item_from(index, row, permalink, resolved))
    }

    /// Fail-fast: the first failing row aborts the batch and nothing after it
    /// is started.
    pub async fn resolve(&self, rows: &[Row]) -> Result<Vec<MediaItem>> {
        info!(rows = rows.len(), source = self.source_name(), "resolving batch");
        stream::iter(rows.iter().enumerate())
            .map(|(i, row)| async move {
                self.resolve_row(i, row).await.map_err(|e| {
                    warn!(index = i, link = %row.link, error = %e, "row failed; aborting batch");
                    e
                })
            })
            .buffered(self.concurrency)
            .try_collect()
            .await
    }

    /// Every row is attempted; each gets its own outcome.
    pub async fn resolve_each(&self, rows: &[Row]) -> Vec<RowOutcome> {
        info!(rows = rows.len(), source = self.source_name(), "resolving rows independently");
        let outcomes: Vec<RowOutcome> = stream::iter(rows.iter().enumerate())
            .map(|(i, row)| self.resolve_row(i, row))
            .buffered(self.concurrency)
            .collect()
            .await;
        for (i, e) in outcomes.iter().enumerate().filter_map(|(i, o)| o.as_ref().err().map(|e| (i, e))) {
            warn!(index = i, error = %e, "row failed");
        }
        outcomes
    }
}
