//! Completion notifier: one summary publish per settled batch.

use chrono::{Local, NaiveDateTime};
use tracing::{error, info};

use stockrelay_core::{BatchSummary, RelayResult};
use stockrelay_infra::{PublishReceipt, TopicPublisher};

use crate::dispatcher::DispatchReport;

/// Source of the local timestamp stamped on the summary.
pub type Clock = fn() -> NaiveDateTime;

fn local_now() -> NaiveDateTime {
    Local::now().naive_local()
}

/// Publishes the batch summary to the topic.
#[derive(Debug, Clone)]
pub struct CompletionNotifier<P> {
    publisher: P,
    clock: Clock,
}

impl<P: TopicPublisher> CompletionNotifier<P> {
    pub fn new(publisher: P) -> Self {
        Self {
            publisher,
            clock: local_now,
        }
    }

    /// Replace the wall clock (tests pin the timestamp).
    pub fn with_clock(mut self, clock: Clock) -> Self {
        self.clock = clock;
        self
    }

    pub fn publisher(&self) -> &P {
        &self.publisher
    }

    /// Publish the summary for a fully settled batch.
    ///
    /// Takes the dispatch report by value: it exists only after every send has
    /// settled, and consuming it keeps the summary to one publish per batch.
    pub async fn notify(&self, report: DispatchReport) -> RelayResult<PublishReceipt> {
        let summary = BatchSummary::new(report.total());
        let message = summary.message_at((self.clock)());

        match self.publisher.publish(message).await {
            Ok(receipt) => {
                info!(
                    topic_arn = %self.publisher.topic_arn(),
                    batch_size = summary.batch_size(),
                    succeeded = report.succeeded(),
                    failed = report.failed(),
                    message_id = ?receipt.message_id,
                    "sent completion notification"
                );
                Ok(receipt)
            }
            Err(err) => {
                error!(
                    topic_arn = %self.publisher.topic_arn(),
                    error = %err,
                    "failed to send completion notification"
                );
                Err(err)
            }
        }
    }
}
