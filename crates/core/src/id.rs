//! Strongly-typed identifiers.

use core::str::FromStr;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::RelayError;

/// Identifier of one relay invocation, used to correlate log lines.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct InvocationId(Uuid);

impl InvocationId {
    /// Create a new identifier.
    ///
    /// Uses UUIDv7 (time-ordered), so invocations sort by start time in logs.
    pub fn new() -> Self {
        Self(Uuid::now_v7())
    }

    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for InvocationId {
    fn default() -> Self {
        Self::new()
    }
}

impl core::fmt::Display for InvocationId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        core::fmt::Display::fmt(&self.0, f)
    }
}

impl From<Uuid> for InvocationId {
    fn from(value: Uuid) -> Self {
        Self(value)
    }
}

impl From<InvocationId> for Uuid {
    fn from(value: InvocationId) -> Self {
        value.0
    }
}

impl FromStr for InvocationId {
    type Err = RelayError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let uuid = Uuid::from_str(s)
            .map_err(|e| RelayError::config(format!("InvocationId: {}", e)))?;
        Ok(Self(uuid))
    }
}
