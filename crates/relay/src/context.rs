//! Invocation context: how a run reports its single outcome to its host.

use std::process::ExitCode;

use tracing::{error, info};

use stockrelay_core::RelayError;
use stockrelay_infra::PublishReceipt;

/// Completion-reporting handle supplied by the host.
///
/// The handler calls exactly one of these, exactly once, per invocation.
pub trait InvocationContext {
    fn succeed(&mut self, result: PublishReceipt);
    fn fail(&mut self, error: RelayError);
}

/// Terminal outcome of an invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Succeeded(PublishReceipt),
    Failed(RelayError),
}

impl Outcome {
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Succeeded(_))
    }
}

/// Context that records every report it receives.
#[derive(Debug, Clone, Default)]
pub struct RecordingContext {
    reports: Vec<Outcome>,
}

impl RecordingContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// First outcome reported, if any.
    pub fn outcome(&self) -> Option<&Outcome> {
        self.reports.first()
    }

    pub fn report_count(&self) -> usize {
        self.reports.len()
    }
}

impl InvocationContext for RecordingContext {
    fn succeed(&mut self, result: PublishReceipt) {
        self.reports.push(Outcome::Succeeded(result));
    }

    fn fail(&mut self, error: RelayError) {
        self.reports.push(Outcome::Failed(error));
    }
}

/// Context for a standalone process: logs the outcome and maps it to an exit code.
///
/// Only the first report counts.
#[derive(Debug, Default)]
pub struct ProcessContext {
    outcome: Option<Outcome>,
}

impl ProcessContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn outcome(&self) -> Option<&Outcome> {
        self.outcome.as_ref()
    }

    /// `SUCCESS` only when the invocation reported success.
    pub fn exit_code(&self) -> ExitCode {
        match &self.outcome {
            Some(Outcome::Succeeded(_)) => ExitCode::SUCCESS,
            _ => ExitCode::FAILURE,
        }
    }

    fn settle(&mut self, outcome: Outcome) {
        if self.outcome.is_some() {
            error!(ignored = ?outcome, "invocation already reported; ignoring second report");
            return;
        }
        self.outcome = Some(outcome);
    }
}

impl InvocationContext for ProcessContext {
    fn succeed(&mut self, result: PublishReceipt) {
        info!(message_id = ?result.message_id, "invocation succeeded");
        self.settle(Outcome::Succeeded(result));
    }

    fn fail(&mut self, error: RelayError) {
        error!(error = %error, "invocation failed");
        self.settle(Outcome::Failed(error));
    }
}
