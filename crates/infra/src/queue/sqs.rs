//! SQS-backed message queue.

use async_trait::async_trait;
use aws_sdk_sqs::error::DisplayErrorContext;
use tracing::{debug, instrument};

use stockrelay_core::{RelayError, RelayResult};

use super::{MessageQueue, SendReceipt};

/// Messages are visible to consumers immediately.
const DELAY_SECONDS: i32 = 0;

/// SQS queue addressed by URL.
#[derive(Debug, Clone)]
pub struct SqsMessageQueue {
    client: aws_sdk_sqs::Client,
    queue_url: String,
}

impl SqsMessageQueue {
    pub fn new(client: aws_sdk_sqs::Client, queue_url: impl Into<String>) -> Self {
        Self {
            client,
            queue_url: queue_url.into(),
        }
    }

    pub fn from_sdk_config(config: &aws_config::SdkConfig, queue_url: impl Into<String>) -> Self {
        Self::new(aws_sdk_sqs::Client::new(config), queue_url)
    }
}

#[async_trait]
impl MessageQueue for SqsMessageQueue {
    #[instrument(skip(self, body), fields(queue_url = %self.queue_url, bytes = body.len()), err)]
    async fn send(&self, body: String) -> RelayResult<SendReceipt> {
        let output = self
            .client
            .send_message()
            .queue_url(&self.queue_url)
            .delay_seconds(DELAY_SECONDS)
            .message_body(body)
            .send()
            .await
            .map_err(|e| RelayError::dispatch(DisplayErrorContext(&e).to_string()))?;

        let receipt = SendReceipt {
            message_id: output.message_id().map(str::to_string),
        };
        debug!(message_id = ?receipt.message_id, "queue accepted message");
        Ok(receipt)
    }

    fn queue_url(&self) -> &str {
        &self.queue_url
    }
}
