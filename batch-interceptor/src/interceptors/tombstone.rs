//! Drops tombstone records

use crate::{interceptor::BatchInterceptor, RecordBatch, Result};
use tracing::debug;

/// Removes records that carry no value
#[derive(Debug, Clone)]
pub struct TombstoneFilter {
    priority: i32,
}

impl TombstoneFilter {
    /// Create new tombstone filter
    pub fn new(priority: i32) -> Self {
        Self { priority }
    }
}

impl BatchInterceptor<RecordBatch> for TombstoneFilter {
    fn on_consume(&self, mut batch: RecordBatch) -> Result<RecordBatch> {
        let before = batch.len();
        batch.records.retain(|record| !record.is_tombstone());

        let dropped = before - batch.len();
        if dropped > 0 {
            debug!("Dropped {} tombstone records", dropped);
        }

        Ok(batch)
    }

    fn priority(&self) -> i32 {
        self.priority
    }

    fn name(&self) -> &str {
        "tombstones"
    }
}
