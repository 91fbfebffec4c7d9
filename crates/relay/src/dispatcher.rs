//! Record dispatcher: one queue message per record, all in flight at once.

use futures::stream::{FuturesUnordered, StreamExt};
use tracing::{error, info};

use stockrelay_core::{Batch, InventoryRecord, RelayError, RelayResult};
use stockrelay_infra::{MessageQueue, SendReceipt};

/// A send that settled with an error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DispatchFailure {
    /// Position of the record in the batch.
    pub index: usize,
    pub stock_item_number: String,
    pub error: RelayError,
}

/// Settlement tally for one batch.
///
/// Built only by [`RecordDispatcher::dispatch`], which returns it once every
/// send has settled, so holding a report means the batch is fully settled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DispatchReport {
    total: usize,
    succeeded: usize,
    failures: Vec<DispatchFailure>,
}

impl DispatchReport {
    fn new(total: usize) -> Self {
        Self {
            total,
            succeeded: 0,
            failures: Vec::new(),
        }
    }

    /// Batch size N.
    pub fn total(&self) -> usize {
        self.total
    }

    pub fn succeeded(&self) -> usize {
        self.succeeded
    }

    pub fn failed(&self) -> usize {
        self.failures.len()
    }

    /// Sends settled so far, successful or not.
    pub fn settled(&self) -> usize {
        self.succeeded + self.failures.len()
    }

    pub fn failures(&self) -> &[DispatchFailure] {
        &self.failures
    }

    pub fn all_succeeded(&self) -> bool {
        self.failures.is_empty() && self.succeeded == self.total
    }
}

/// Sends every record of a batch to the queue.
#[derive(Debug, Clone)]
pub struct RecordDispatcher<Q> {
    queue: Q,
}

impl<Q: MessageQueue> RecordDispatcher<Q> {
    pub fn new(queue: Q) -> Self {
        Self { queue }
    }

    pub fn queue(&self) -> &Q {
        &self.queue
    }

    /// Submit one send per record and wait for all of them to settle.
    ///
    /// Every record is attempted exactly once; a failed send is logged and
    /// counted, never retried, and never stops the others.
    pub async fn dispatch(&self, batch: &Batch) -> DispatchReport {
        let total = batch.len();
        let mut report = DispatchReport::new(total);

        let mut in_flight: FuturesUnordered<_> = batch
            .iter()
            .enumerate()
            .map(|(index, record)| self.send_record(index, record))
            .collect();

        while let Some((index, record, outcome)) = in_flight.next().await {
            match outcome {
                Ok(receipt) => {
                    report.succeeded += 1;
                    info!(
                        settled = report.settled(),
                        total,
                        message_id = ?receipt.message_id,
                        "sent message {} of {}",
                        report.settled(),
                        total
                    );
                }
                Err(err) => {
                    error!(
                        settled = report.settled() + 1,
                        total,
                        stock_item_number = %record.stock_item_number,
                        error = %err,
                        "failed to send message"
                    );
                    report.failures.push(DispatchFailure {
                        index,
                        stock_item_number: record.stock_item_number.clone(),
                        error: err,
                    });
                }
            }
        }

        report
    }

    async fn send_record<'a>(
        &self,
        index: usize,
        record: &'a InventoryRecord,
    ) -> (usize, &'a InventoryRecord, RelayResult<SendReceipt>) {
        let outcome = match record.to_message_body() {
            Ok(body) => self.queue.send(body).await,
            Err(err) => Err(err),
        };
        (index, record, outcome)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use stockrelay_infra::InMemoryMessageQueue;

    fn batch(numbers: &[&str]) -> Batch {
        numbers.iter().copied().map(InventoryRecord::new).collect()
    }

    #[tokio::test]
    async fn empty_batch_settles_immediately() {
        let queue = Arc::new(InMemoryMessageQueue::new());
        let dispatcher = RecordDispatcher::new(queue.clone());

        let report = dispatcher.dispatch(&Batch::empty()).await;

        assert_eq!(report.total(), 0);
        assert_eq!(report.settled(), 0);
        assert!(report.all_succeeded());
        assert_eq!(queue.attempts(), 0);
    }

    #[tokio::test]
    async fn every_record_becomes_its_json_body() {
        let queue = Arc::new(InMemoryMessageQueue::new());
        let dispatcher = RecordDispatcher::new(queue.clone());
        let records = batch(&["SB-1", "SB-2", "SB-3"]);

        let report = dispatcher.dispatch(&records).await;

        assert_eq!(report.succeeded(), 3);
        let mut delivered = queue.delivered();
        delivered.sort();
        let expected: Vec<String> = records.iter().map(|r| r.to_message_body().unwrap()).collect();
        assert_eq!(delivered, expected);
    }

    #[tokio::test]
    async fn failures_are_counted_not_escalated() {
        let queue = Arc::new(InMemoryMessageQueue::new().rejecting("BAD"));
        let dispatcher = RecordDispatcher::new(queue.clone());

        let report = dispatcher.dispatch(&batch(&["OK-1", "BAD-2", "OK-3", "BAD-4"])).await;

        assert_eq!(queue.attempts(), 4);
        assert_eq!(report.total(), 4);
        assert_eq!(report.settled(), 4);
        assert_eq!(report.succeeded(), 2);
        assert!(!report.all_succeeded());

        let mut failed: Vec<(usize, &str)> = report
            .failures()
            .iter()
            .map(|f| (f.index, f.stock_item_number.as_str()))
            .collect();
        failed.sort();
        assert_eq!(failed, vec![(1, "BAD-2"), (3, "BAD-4")]);
        assert!(report.failures().iter().all(|f| matches!(f.error, RelayError::Dispatch(_))));
    }

    #[tokio::test]
    async fn sends_overlap_and_settle_out_of_order() {
        // Earlier records take longer, so a pipelined dispatcher would deliver
        // in batch order and an overlapping one delivers the last record first.
        let queue = Arc::new(InMemoryMessageQueue::new().with_yields(|body| {
            if body.contains("SB-1") {
                8
            } else if body.contains("SB-2") {
                4
            } else {
                0
            }
        }));
        let dispatcher = RecordDispatcher::new(queue.clone());

        let report = dispatcher.dispatch(&batch(&["SB-1", "SB-2", "SB-3"])).await;

        assert_eq!(report.settled(), 3);
        let delivered = queue.delivered();
        assert_eq!(delivered.len(), 3);
        assert!(delivered[0].contains("SB-3"), "{:?}", delivered);
    }
}
