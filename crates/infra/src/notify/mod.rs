//! Publish/subscribe topic for the completion notification.

pub mod in_memory;
pub mod sns;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use stockrelay_core::RelayResult;

pub use in_memory::InMemoryTopicPublisher;
pub use sns::SnsTopicPublisher;

/// Acknowledgement for a published notification.
///
/// This is the value a successful invocation reports to its host.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct PublishReceipt {
    pub message_id: Option<String>,
}

/// Topic that receives one summary per invocation.
#[async_trait]
pub trait TopicPublisher: Send + Sync {
    /// Publish one message. Failures are `RelayError::Notify`.
    async fn publish(&self, message: String) -> RelayResult<PublishReceipt>;

    /// ARN (or other identifier) of the target topic.
    fn topic_arn(&self) -> &str;
}

#[async_trait]
impl<T> TopicPublisher for std::sync::Arc<T>
where
    T: TopicPublisher + ?Sized,
{
    async fn publish(&self, message: String) -> RelayResult<PublishReceipt> {
        (**self).publish(message).await
    }

    fn topic_arn(&self) -> &str {
        (**self).topic_arn()
    }
}
