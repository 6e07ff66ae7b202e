//! Best-effort network teardown
//!
//! The network stack may be shared with other environments or still have
//! dependents created outside this tool, so a rejected delete is logged and
//! discarded. The target stack is always attempted afterwards, with the same
//! best-effort delete. Both stacks still have their final status validated.

use super::scoped::await_success;
use crate::collaborators::{StackDeleter, StackWaiter};
use crate::error::TerminateError;
use crate::observer::TerminationObserver;
use stackdown_common::{StackKind, create_stack_name};

/// Outcome of a best-effort delete request
#[derive(Debug)]
pub enum PhaseOutcome {
    /// The delete request was accepted
    Completed,
    /// The delete request failed and the failure was discarded
    Suppressed(anyhow::Error),
}

impl PhaseOutcome {
    pub fn is_suppressed(&self) -> bool {
        matches!(self, PhaseOutcome::Suppressed(_))
    }
}

/// Issue a delete whose failure never propagates.
pub async fn delete_best_effort<D: StackDeleter>(
    deleter: &D,
    observer: &dyn TerminationObserver,
    name: &str,
) -> PhaseOutcome {
    observer.delete_issued(name);
    match deleter.delete_stack(name).await {
        Ok(()) => PhaseOutcome::Completed,
        Err(e) => {
            observer.suppressed(name, &e);
            PhaseOutcome::Suppressed(e)
        }
    }
}

/// Tear down the environment's network stack, then its target stack.
///
/// A failed network validation does not stop the target teardown; it is
/// returned once the target has been handled.
pub(crate) async fn terminate_network<D, W>(
    deleter: &D,
    waiter: &W,
    observer: &dyn TerminationObserver,
    namespace: &str,
    environment: &str,
) -> Result<(), TerminateError>
where
    D: StackDeleter,
    W: StackWaiter,
{
    let network = create_stack_name(namespace, StackKind::Network, &[environment]);
    delete_best_effort(deleter, observer, &network).await;
    let network_result = await_success(waiter, observer, &network).await;

    let target = create_stack_name(namespace, StackKind::Target, &[environment]);
    delete_best_effort(deleter, observer, &target).await;
    let target_result = await_success(waiter, observer, &target).await;

    network_result?;
    target_result
}
