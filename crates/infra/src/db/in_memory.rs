//! In-memory inventory source for tests/dev.

use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;

use stockrelay_core::{Batch, RelayError, RelayResult};

use super::InventorySource;

/// Returns a preset batch (or preset database error) and counts calls.
#[derive(Debug)]
pub struct InMemoryInventorySource {
    outcome: RelayResult<Batch>,
    calls: AtomicUsize,
}

impl InMemoryInventorySource {
    pub fn with_batch(batch: Batch) -> Self {
        Self {
            outcome: Ok(batch),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn failing(message: impl Into<String>) -> Self {
        Self {
            outcome: Err(RelayError::database(message)),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl InventorySource for InMemoryInventorySource {
    async fn fetch_batch(&self) -> RelayResult<Batch> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.outcome.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use stockrelay_core::InventoryRecord;

    #[tokio::test]
    async fn returns_preset_batch_each_call() {
        let source = InMemoryInventorySource::with_batch(Batch::new(vec![InventoryRecord::new("SB-9")]));
        assert_eq!(source.fetch_batch().await.unwrap().len(), 1);
        assert_eq!(source.fetch_batch().await.unwrap().len(), 1);
        assert_eq!(source.calls(), 2);
    }

    #[tokio::test]
    async fn failing_source_reports_database_error() {
        let source = InMemoryInventorySource::failing("ECONNREFUSED");
        assert_eq!(source.fetch_batch().await, Err(RelayError::database("ECONNREFUSED")));
    }
}
