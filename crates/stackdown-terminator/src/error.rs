//! Termination errors
//!
//! Each variant is produced by exactly one kind of step failure. The pipeline
//! returns the first one unchanged.

use stackdown_common::{StackKind, StackStatus};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum TerminateError {
    /// Listing stacks failed
    #[error("Failed to list {kind} stacks")]
    List {
        kind: StackKind,
        #[source]
        source: anyhow::Error,
    },

    /// A delete request was rejected
    #[error("Failed to delete stack '{stack}'")]
    Delete {
        stack: String,
        #[source]
        source: anyhow::Error,
    },

    /// Waiting for a final status failed
    #[error("Failed waiting for stack '{stack}' to settle")]
    Wait {
        stack: String,
        #[source]
        source: anyhow::Error,
    },

    /// The stack settled in a non-successful terminal status
    #[error("Stack '{stack}' ended in failed status {status} {reason}")]
    FailedStatus {
        stack: String,
        status: StackStatus,
        reason: String,
    },

    /// The roleset manager failed
    #[error("Failed to delete roleset for {scope}")]
    Roleset {
        scope: String,
        #[source]
        source: anyhow::Error,
    },

    /// An environment or service name was rejected before any call was made
    #[error("Invalid {what} name '{name}': use letters, digits and '-'")]
    InvalidName { what: &'static str, name: String },
}

impl TerminateError {
    /// Check if this error came from a stack's final status
    pub fn is_failed_status(&self) -> bool {
        matches!(self, TerminateError::FailedStatus { .. })
    }

    /// Name of the stack involved, if any
    pub fn stack(&self) -> Option<&str> {
        match self {
            TerminateError::Delete { stack, .. }
            | TerminateError::Wait { stack, .. }
            | TerminateError::FailedStatus { stack, .. } => Some(stack),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_failed_status_message_is_verbatim() {
        let err = TerminateError::FailedStatus {
            stack: "ns-cluster-dev".into(),
            status: StackStatus::from("DELETE_FAILED"),
            reason: "dependent resource in use".into(),
        };
        let msg = err.to_string();
        assert!(msg.contains("DELETE_FAILED"));
        assert!(msg.contains("dependent resource in use"));
        assert!(err.is_failed_status());
        assert_eq!(err.stack(), Some("ns-cluster-dev"));
    }

    #[test]
    fn test_source_chain_kept() {
        let err = TerminateError::Delete {
            stack: "ns-vpc-dev".into(),
            source: anyhow::anyhow!("AccessDenied"),
        };
        let source = std::error::Error::source(&err).map(|s| s.to_string());
        assert_eq!(source.as_deref(), Some("AccessDenied"));
        assert!(!err.is_failed_status());
    }
}
