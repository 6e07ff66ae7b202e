//! Teardown of a single, deterministically named stack

use crate::collaborators::{StackDeleter, StackWaiter};
use crate::error::TerminateError;
use crate::observer::TerminationObserver;
use stackdown_common::Stack;

/// Delete `name`, wait for it, and fail unless it settles successfully.
pub(crate) async fn terminate_named<D, W>(
    deleter: &D,
    waiter: &W,
    observer: &dyn TerminationObserver,
    name: &str,
) -> Result<(), TerminateError>
where
    D: StackDeleter,
    W: StackWaiter,
{
    observer.delete_issued(name);
    deleter
        .delete_stack(name)
        .await
        .map_err(|source| TerminateError::Delete {
            stack: name.to_string(),
            source,
        })?;

    await_success(waiter, observer, name).await
}

/// Wait for `name` and validate its final status.
pub(crate) async fn await_success<W>(
    waiter: &W,
    observer: &dyn TerminationObserver,
    name: &str,
) -> Result<(), TerminateError>
where
    W: StackWaiter,
{
    observer.awaiting(name);
    let stack = waiter
        .await_final_status(name)
        .await
        .map_err(|source| TerminateError::Wait {
            stack: name.to_string(),
            source,
        })?;

    check_final_status(name, stack.as_ref())
}

/// Classify a waiter result.
///
/// An absent stack is success. A present stack must have a status ending in
/// `_COMPLETE`; otherwise the raw status and reason are carried in the error.
pub fn check_final_status(name: &str, stack: Option<&Stack>) -> Result<(), TerminateError> {
    match stack {
        Some(stack) if !stack.status.is_successful() => Err(TerminateError::FailedStatus {
            stack: name.to_string(),
            status: stack.status.clone(),
            reason: stack.reason().to_string(),
        }),
        _ => Ok(()),
    }
}
