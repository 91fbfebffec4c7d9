//! Queue endpoint: one message per inventory record.

pub mod in_memory;
pub mod sqs;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use stockrelay_core::RelayResult;

pub use in_memory::InMemoryMessageQueue;
pub use sqs::SqsMessageQueue;

/// Acknowledgement returned by the queue for one accepted message.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SendReceipt {
    pub message_id: Option<String>,
}

/// Outbound message queue.
///
/// Implementations must allow many `send` calls to be in flight at once.
#[async_trait]
pub trait MessageQueue: Send + Sync {
    /// Send one message body with no delivery delay.
    ///
    /// Failures are `RelayError::Dispatch`.
    async fn send(&self, body: String) -> RelayResult<SendReceipt>;

    /// URL of the target queue.
    fn queue_url(&self) -> &str;
}

#[async_trait]
impl<T> MessageQueue for std::sync::Arc<T>
where
    T: MessageQueue + ?Sized,
{
    async fn send(&self, body: String) -> RelayResult<SendReceipt> {
        (**self).send(body).await
    }

    fn queue_url(&self) -> &str {
        (**self).queue_url()
    }
}
