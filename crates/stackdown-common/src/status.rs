//! Stack status classification
//!
//! Statuses are opaque strings reported by the provider. A status is terminal
//! once it is no longer `*_IN_PROGRESS`, and a terminal status is successful
//! only when it ends in `_COMPLETE`. Everything else terminal
//! (`DELETE_FAILED`, `ROLLBACK_FAILED`, ...) is a failure.

use std::fmt;

/// Suffix of statuses still transitioning
pub const IN_PROGRESS_SUFFIX: &str = "_IN_PROGRESS";

/// Suffix of successful terminal statuses
pub const COMPLETE_SUFFIX: &str = "_COMPLETE";

/// Status of a stack whose deletion finished
pub const DELETE_COMPLETE: &str = "DELETE_COMPLETE";

/// Status reported for a stack
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct StackStatus(String);

impl StackStatus {
    pub fn new(status: impl Into<String>) -> Self {
        Self(status.into())
    }

    /// Raw status code as reported
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Check if the status represents a terminal state
    pub fn is_terminal(&self) -> bool {
        !self.0.ends_with(IN_PROGRESS_SUFFIX)
    }

    /// Check if the status is a successful terminal state
    pub fn is_successful(&self) -> bool {
        self.0.ends_with(COMPLETE_SUFFIX)
    }

    /// Deleted stacks may linger in provider listings for a while
    pub fn is_deleted(&self) -> bool {
        self.0 == DELETE_COMPLETE
    }
}

impl fmt::Display for StackStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for StackStatus {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for StackStatus {
    fn from(s: String) -> Self {
        Self(s)
    }
}
