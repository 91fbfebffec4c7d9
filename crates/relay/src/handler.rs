//! Entry point: query, dispatch, notify, report.

use tracing::{debug, error, info, info_span, Instrument};

use stockrelay_core::{InvocationId, RelayResult};
use stockrelay_infra::{InventorySource, MessageQueue, PublishReceipt, TopicPublisher};

use crate::context::InvocationContext;
use crate::dispatcher::RecordDispatcher;
use crate::notifier::CompletionNotifier;

/// Per-invocation lifecycle.
///
/// ```text
/// Idle ─▶ Querying ─▶ Dispatching ─▶ Notifying ─▶ Succeeded
///            │                           │
///            └──────────▶ Failed ◀───────┘
/// ```
///
/// Dispatching never fails: send errors are absorbed per record.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum InvocationState {
    Idle,
    Querying,
    Dispatching,
    Notifying,
    Succeeded,
    Failed,
}

impl InvocationState {
    pub fn can_transition_to(self, next: InvocationState) -> bool {
        use InvocationState::*;
        matches!(
            (self, next),
            (Idle, Querying)
                | (Querying, Dispatching)
                | (Querying, Failed)
                | (Dispatching, Notifying)
                | (Notifying, Succeeded)
                | (Notifying, Failed)
        )
    }

    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Succeeded | Self::Failed)
    }
}

/// Tracks the state of one invocation and logs each transition.
#[derive(Debug)]
struct Lifecycle {
    state: InvocationState,
}

impl Lifecycle {
    fn new() -> Self {
        Self {
            state: InvocationState::Idle,
        }
    }

    fn advance(&mut self, next: InvocationState) {
        debug_assert!(
            self.state.can_transition_to(next),
            "illegal transition {:?} -> {:?}",
            self.state,
            next
        );
        debug!(from = ?self.state, to = ?next, "invocation state");
        self.state = next;
    }
}

/// Relay handler wired from explicit dependencies.
#[derive(Debug)]
pub struct RelayHandler<S, Q, P> {
    source: S,
    dispatcher: RecordDispatcher<Q>,
    notifier: CompletionNotifier<P>,
}

impl<S, Q, P> RelayHandler<S, Q, P>
where
    S: InventorySource,
    Q: MessageQueue,
    P: TopicPublisher,
{
    pub fn new(source: S, queue: Q, publisher: P) -> Self {
        Self::from_parts(source, RecordDispatcher::new(queue), CompletionNotifier::new(publisher))
    }

    pub fn from_parts(
        source: S,
        dispatcher: RecordDispatcher<Q>,
        notifier: CompletionNotifier<P>,
    ) -> Self {
        Self {
            source,
            dispatcher,
            notifier,
        }
    }

    /// Run one invocation and report its outcome to `ctx` exactly once.
    ///
    /// `event` is the host's trigger payload; the relay does not read it.
    pub async fn handle<C>(&self, event: serde_json::Value, ctx: &mut C) -> InvocationState
    where
        C: InvocationContext + ?Sized,
    {
        let mut lifecycle = Lifecycle::new();
        match self.execute(&event, &mut lifecycle).await {
            Ok(receipt) => ctx.succeed(receipt),
            Err(err) => ctx.fail(err),
        }
        lifecycle.state
    }

    /// Run one invocation and return its outcome.
    pub async fn run(&self, event: serde_json::Value) -> RelayResult<PublishReceipt> {
        self.execute(&event, &mut Lifecycle::new()).await
    }

    async fn execute(
        &self,
        event: &serde_json::Value,
        lifecycle: &mut Lifecycle,
    ) -> RelayResult<PublishReceipt> {
        let invocation_id = InvocationId::new();
        let span = info_span!("invocation", invocation_id = %invocation_id);

        async move {
            debug!(event = %event, "invocation started");

            lifecycle.advance(InvocationState::Querying);
            let batch = match self.source.fetch_batch().await {
                Ok(batch) => batch,
                Err(err) => {
                    error!(error = %err, "inventory query failed");
                    lifecycle.advance(InvocationState::Failed);
                    return Err(err);
                }
            };

            lifecycle.advance(InvocationState::Dispatching);
            info!(
                records = batch.len(),
                queue_url = %self.dispatcher.queue().queue_url(),
                "dispatching inventory records"
            );
            let report = self.dispatcher.dispatch(&batch).await;

            lifecycle.advance(InvocationState::Notifying);
            match self.notifier.notify(report).await {
                Ok(receipt) => {
                    lifecycle.advance(InvocationState::Succeeded);
                    Ok(receipt)
                }
                Err(err) => {
                    lifecycle.advance(InvocationState::Failed);
                    Err(err)
                }
            }
        }
        .instrument(span)
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use InvocationState::*;

    const ALL: [InvocationState; 6] = [Idle, Querying, Dispatching, Notifying, Succeeded, Failed];

    #[test]
    fn failed_is_reachable_only_from_querying_and_notifying() {
        let sources: Vec<InvocationState> = ALL
            .into_iter()
            .filter(|s| s.can_transition_to(Failed))
            .collect();
        assert_eq!(sources, vec![Querying, Notifying]);
    }

    #[test]
    fn terminal_states_have_no_exits() {
        for terminal in [Succeeded, Failed] {
            assert!(terminal.is_terminal());
            assert!(ALL.into_iter().all(|next| !terminal.can_transition_to(next)));
        }
    }

    #[test]
    fn happy_path_is_a_chain() {
        let path = [Idle, Querying, Dispatching, Notifying, Succeeded];
        assert!(path.windows(2).all(|w| w[0].can_transition_to(w[1])));
        assert!(!Idle.can_transition_to(Dispatching));
        assert!(!Dispatching.can_transition_to(Succeeded));
    }
}
