//! `stockrelay-core`: data model for the inventory relay.
//!
//! This crate contains **pure** types (no I/O): the record shape produced by the
//! inventory query, the batch that owns them for one invocation, the completion
//! summary text, and the error taxonomy shared by every layer.

pub mod error;
pub mod id;
pub mod record;
pub mod summary;
pub mod value_object;

pub use error::{RelayError, RelayResult};
pub use id::InvocationId;
pub use record::{Batch, InventoryRecord};
pub use summary::BatchSummary;
pub use value_object::ValueObject;
