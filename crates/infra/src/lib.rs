//! Infrastructure layer: configuration, inventory database, queue, topic.
//!
//! Every external collaborator sits behind an async trait with a production
//! adapter and an in-memory fake, so the relay can be wired explicitly in
//! `main` and substituted in tests.

pub mod aws;
pub mod config;
pub mod db;
pub mod notify;
pub mod queue;

pub use config::{DatabaseConfig, RelayConfig};
pub use db::{InMemoryInventorySource, InventorySource, PostgresInventorySource, INVENTORY_QUERY};
pub use notify::{InMemoryTopicPublisher, PublishReceipt, SnsTopicPublisher, TopicPublisher};
pub use queue::{InMemoryMessageQueue, MessageQueue, SendReceipt, SqsMessageQueue};
