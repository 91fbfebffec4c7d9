//! `stockrelay`: relays inventory records from the inventory database to a
//! queue, then publishes one summary notification.
//!
//! ```text
//! handler ─▶ InventorySource::fetch_batch
//!         ─▶ RecordDispatcher::dispatch   (N sends in flight, joined)
//!         ─▶ CompletionNotifier::notify   (exactly once)
//!         ─▶ InvocationContext::{succeed | fail}
//! ```

pub mod context;
pub mod dispatcher;
pub mod handler;
pub mod notifier;

pub use context::{InvocationContext, Outcome, ProcessContext, RecordingContext};
pub use dispatcher::{DispatchFailure, DispatchReport, RecordDispatcher};
pub use handler::{InvocationState, RelayHandler};
pub use notifier::CompletionNotifier;
