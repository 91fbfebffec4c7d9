//! In-memory topic publisher for tests/dev.

use std::sync::Mutex;

use async_trait::async_trait;

use stockrelay_core::{RelayError, RelayResult};

use super::{PublishReceipt, TopicPublisher};

/// Records published messages; optionally fails every publish.
#[derive(Debug)]
pub struct InMemoryTopicPublisher {
    topic_arn: String,
    published: Mutex<Vec<String>>,
    failure: Option<String>,
}

impl Default for InMemoryTopicPublisher {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryTopicPublisher {
    pub fn new() -> Self {
        Self {
            topic_arn: "memory://inventory-topic".to_string(),
            published: Mutex::new(Vec::new()),
            failure: None,
        }
    }

    /// Every publish fails with `RelayError::Notify(message)`.
    pub fn failing(message: impl Into<String>) -> Self {
        Self {
            failure: Some(message.into()),
            ..Self::new()
        }
    }

    pub fn published(&self) -> Vec<String> {
        self.published.lock().unwrap().clone()
    }
}

#[async_trait]
impl TopicPublisher for InMemoryTopicPublisher {
    async fn publish(&self, message: String) -> RelayResult<PublishReceipt> {
        if let Some(reason) = &self.failure {
            return Err(RelayError::notify(reason.clone()));
        }

        let mut published = self.published.lock().unwrap();
        published.push(message);
        Ok(PublishReceipt {
            message_id: Some(format!("mem-topic-{}", published.len())),
        })
    }

    fn topic_arn(&self) -> &str {
        &self.topic_arn
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn records_published_messages() {
        let topic = InMemoryTopicPublisher::new();
        let receipt = topic.publish("hello".to_string()).await.unwrap();
        assert_eq!(receipt.message_id.as_deref(), Some("mem-topic-1"));
        assert_eq!(topic.published(), vec!["hello".to_string()]);
    }

    #[tokio::test]
    async fn failing_topic_records_nothing() {
        let topic = InMemoryTopicPublisher::failing("AuthorizationError");
        assert_eq!(
            topic.publish("hello".to_string()).await,
            Err(RelayError::notify("AuthorizationError"))
        );
        assert!(topic.published().is_empty());
    }
}
