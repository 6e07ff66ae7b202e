//! Progress reporting for termination runs
//!
//! The pipeline never logs directly. It reports to a `TerminationObserver`,
//! which defaults to [`TracingObserver`]. Tests substitute [`NoopObserver`]
//! or a recording observer.

use crate::error::TerminateError;
use crate::steps::TerminationStep;
use tracing::{debug, info, warn};

/// Receives progress events from a termination run.
///
/// Every method has a no-op default so observers only implement what they
/// care about.
pub trait TerminationObserver: Send + Sync {
    /// A step is about to execute
    fn step_started(&self, _step: &TerminationStep) {}

    /// A step finished, successfully or not
    fn step_finished(&self, _step: &TerminationStep, _result: &Result<(), TerminateError>) {}

    /// A delete request is about to be issued
    fn delete_issued(&self, _stack: &str) {}

    /// Waiting for a stack to settle
    fn awaiting(&self, _stack: &str) {}

    /// The stack was already gone, nothing to delete
    fn already_deleted(&self, _stack: &str) {}

    /// A best-effort delete failed and the failure was discarded
    fn suppressed(&self, _stack: &str, _error: &anyhow::Error) {}

    /// A failure that does not abort its step (batch waits, per-service
    /// roleset cleanup during environment teardown)
    fn ignored(&self, _stack: &str, _error: &anyhow::Error) {}
}

/// Observer that drops every event
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopObserver;

impl TerminationObserver for NoopObserver {}

/// Observer that emits `tracing` events
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingObserver;

impl TerminationObserver for TracingObserver {
    fn step_started(&self, step: &TerminationStep) {
        info!(step = %step, "Starting");
    }

    fn step_finished(&self, step: &TerminationStep, result: &Result<(), TerminateError>) {
        match result {
            Ok(()) => debug!(step = %step, "Finished"),
            Err(e) => warn!(step = %step, error = %e, "Failed"),
        }
    }

    fn delete_issued(&self, stack: &str) {
        info!(stack = %stack, "Deleting stack");
    }

    fn awaiting(&self, stack: &str) {
        info!(stack = %stack, "Waiting for stack to finish");
    }

    fn already_deleted(&self, stack: &str) {
        info!(stack = %stack, "Stack is already deleted");
    }

    fn suppressed(&self, stack: &str, error: &anyhow::Error) {
        debug!(stack = %stack, error = ?error, "Unable to delete stack, ignoring error");
    }

    fn ignored(&self, stack: &str, error: &anyhow::Error) {
        warn!(stack = %stack, error = ?error, "Ignoring failure");
    }
}

pub(crate) static TRACING_OBSERVER: TracingObserver = TracingObserver;
