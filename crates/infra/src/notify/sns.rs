//! SNS-backed topic publisher.

use async_trait::async_trait;
use aws_sdk_sns::error::DisplayErrorContext;
use tracing::instrument;

use stockrelay_core::{RelayError, RelayResult};

use super::{PublishReceipt, TopicPublisher};

/// SNS topic addressed by ARN.
#[derive(Debug, Clone)]
pub struct SnsTopicPublisher {
    client: aws_sdk_sns::Client,
    topic_arn: String,
}

impl SnsTopicPublisher {
    pub fn new(client: aws_sdk_sns::Client, topic_arn: impl Into<String>) -> Self {
        Self {
            client,
            topic_arn: topic_arn.into(),
        }
    }

    pub fn from_sdk_config(config: &aws_config::SdkConfig, topic_arn: impl Into<String>) -> Self {
        Self::new(aws_sdk_sns::Client::new(config), topic_arn)
    }
}

#[async_trait]
impl TopicPublisher for SnsTopicPublisher {
    #[instrument(skip(self, message), fields(topic_arn = %self.topic_arn), err)]
    async fn publish(&self, message: String) -> RelayResult<PublishReceipt> {
        let output = self
            .client
            .publish()
            .topic_arn(&self.topic_arn)
            .message(message)
            .send()
            .await
            .map_err(|e| RelayError::notify(DisplayErrorContext(&e).to_string()))?;

        Ok(PublishReceipt {
            message_id: output.message_id().map(str::to_string),
        })
    }

    fn topic_arn(&self) -> &str {
        &self.topic_arn
    }
}
