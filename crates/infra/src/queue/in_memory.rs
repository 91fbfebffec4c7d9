//! In-memory message queue for tests/dev.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;

use stockrelay_core::{RelayError, RelayResult};

use super::{MessageQueue, SendReceipt};

type YieldPlan = Box<dyn Fn(&str) -> usize + Send + Sync>;

/// Records delivered bodies in settlement order.
///
/// - `rejecting(marker)`: any body containing `marker` fails to send
/// - `with_yields(plan)`: a send yields to the scheduler `plan(body)` times
///   before settling, so completions can arrive out of submission order
pub struct InMemoryMessageQueue {
    queue_url: String,
    delivered: Mutex<Vec<String>>,
    attempts: AtomicUsize,
    reject_marker: Option<String>,
    yields: Option<YieldPlan>,
}

impl core::fmt::Debug for InMemoryMessageQueue {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("InMemoryMessageQueue")
            .field("queue_url", &self.queue_url)
            .field("attempts", &self.attempts())
            .field("reject_marker", &self.reject_marker)
            .finish()
    }
}

impl Default for InMemoryMessageQueue {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryMessageQueue {
    pub fn new() -> Self {
        Self {
            queue_url: "memory://inventory-queue".to_string(),
            delivered: Mutex::new(Vec::new()),
            attempts: AtomicUsize::new(0),
            reject_marker: None,
            yields: None,
        }
    }

    pub fn rejecting(mut self, marker: impl Into<String>) -> Self {
        self.reject_marker = Some(marker.into());
        self
    }

    pub fn with_yields<F>(mut self, plan: F) -> Self
    where
        F: Fn(&str) -> usize + Send + Sync + 'static,
    {
        self.yields = Some(Box::new(plan));
        self
    }

    /// Bodies accepted so far, in the order their sends settled.
    pub fn delivered(&self) -> Vec<String> {
        self.delivered.lock().unwrap().clone()
    }

    /// Every send call, accepted or rejected.
    pub fn attempts(&self) -> usize {
        self.attempts.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl MessageQueue for InMemoryMessageQueue {
    async fn send(&self, body: String) -> RelayResult<SendReceipt> {
        let attempt = self.attempts.fetch_add(1, Ordering::SeqCst);

        let pauses = self.yields.as_ref().map(|plan| plan(&body)).unwrap_or(0);
        for _ in 0..pauses {
            tokio::task::yield_now().await;
        }

        if let Some(marker) = &self.reject_marker {
            if body.contains(marker.as_str()) {
                return Err(RelayError::dispatch(format!("queue rejected message {}", attempt)));
            }
        }

        self.delivered.lock().unwrap().push(body);
        Ok(SendReceipt {
            message_id: Some(format!("mem-{}", attempt)),
        })
    }

    fn queue_url(&self) -> &str {
        &self.queue_url
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn accepts_and_records_bodies() {
        let queue = InMemoryMessageQueue::new();
        let receipt = queue.send("{\"a\":1}".to_string()).await.unwrap();
        assert_eq!(receipt.message_id.as_deref(), Some("mem-0"));
        assert_eq!(queue.delivered(), vec!["{\"a\":1}".to_string()]);
        assert_eq!(queue.attempts(), 1);
    }

    #[tokio::test]
    async fn rejected_bodies_count_as_attempts_only() {
        let queue = InMemoryMessageQueue::new().rejecting("BAD");
        assert!(queue.send("BAD-1".to_string()).await.is_err());
        assert!(queue.send("GOOD-1".to_string()).await.is_ok());
        assert_eq!(queue.attempts(), 2);
        assert_eq!(queue.delivered(), vec!["GOOD-1".to_string()]);
    }
}
