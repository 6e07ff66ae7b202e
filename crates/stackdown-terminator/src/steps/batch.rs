//! Batch teardown of every stack of a kind in an environment
//!
//! Deletes are all issued first, then each stack is awaited. The provider
//! retires the stacks concurrently, so the step costs the slowest wait rather
//! than the sum of them.
//!
//! Post-wait statuses are not classified here: only list and
//! delete failures abort the step.

use crate::collaborators::{RolesetManager, StackDeleter, StackLister, StackWaiter};
use crate::error::TerminateError;
use crate::observer::TerminationObserver;
use stackdown_common::{Stack, StackKind};

/// Side effect run right after a stack's delete request was accepted.
pub(crate) trait AfterDelete {
    async fn after_delete(&self, stack: &Stack);
}

impl AfterDelete for () {
    async fn after_delete(&self, _stack: &Stack) {}
}

/// Fire-and-forget removal of a deleted service's roleset
pub(crate) struct ServiceRolesetCleanup<'a, R> {
    pub rolesets: &'a R,
    pub environment: &'a str,
    pub observer: &'a dyn TerminationObserver,
}

impl<R: RolesetManager> AfterDelete for ServiceRolesetCleanup<'_, R> {
    async fn after_delete(&self, stack: &Stack) {
        if let Err(e) = self
            .rolesets
            .delete_service_roleset(self.environment, stack.service())
            .await
        {
            self.observer.ignored(&stack.name, &e);
        }
    }
}

/// Tear down every `kind` stack tagged with `environment`.
///
/// Returns the number of stacks that had a delete issued.
pub(crate) async fn terminate_tagged<L, D, W, H>(
    lister: &L,
    deleter: &D,
    waiter: &W,
    observer: &dyn TerminationObserver,
    kind: StackKind,
    environment: &str,
    after_delete: &H,
) -> Result<usize, TerminateError>
where
    L: StackLister,
    D: StackDeleter,
    W: StackWaiter,
    H: AfterDelete,
{
    let targets: Vec<Stack> = lister
        .list_stacks(kind)
        .await
        .map_err(|source| TerminateError::List { kind, source })?
        .into_iter()
        .filter(|stack| stack.in_environment(environment))
        .collect();

    for stack in &targets {
        observer.delete_issued(&stack.name);
        deleter
            .delete_stack(&stack.name)
            .await
            .map_err(|source| TerminateError::Delete {
                stack: stack.name.clone(),
                source,
            })?;
        after_delete.after_delete(stack).await;
    }

    for stack in &targets {
        observer.awaiting(&stack.name);
        if let Err(e) = waiter.await_final_status(&stack.name).await {
            observer.ignored(&stack.name, &e);
        }
    }

    Ok(targets.len())
}
