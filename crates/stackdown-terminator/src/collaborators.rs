//! Collaborator traits consumed by the termination pipeline
//!
//! These traits abstract the stack provider and the roleset manager so the
//! pipeline can be exercised without hitting real AWS.

use anyhow::Result;
use stackdown_common::{Stack, StackKind};

/// Lists the stacks of a given kind.
#[allow(async_fn_in_trait)] // Internal use only, Send+Sync bounds on trait are sufficient
#[cfg_attr(test, mockall::automock)]
pub trait StackLister: Send + Sync {
    /// List every live stack of `kind`, across all environments
    async fn list_stacks(&self, kind: StackKind) -> Result<Vec<Stack>>;
}

/// Issues stack deletions.
#[allow(async_fn_in_trait)]
#[cfg_attr(test, mockall::automock)]
pub trait StackDeleter: Send + Sync {
    /// Request deletion of a stack. Deleting a stack that does not exist
    /// is not an error.
    async fn delete_stack(&self, name: &str) -> Result<()>;
}

/// Waits for stacks to settle.
#[allow(async_fn_in_trait)]
#[cfg_attr(test, mockall::automock)]
pub trait StackWaiter: Send + Sync {
    /// Block until the stack reaches a terminal status or disappears.
    ///
    /// Returns `Ok(None)` when the stack does not exist. A terminal but
    /// failed status is returned as `Ok(Some(stack))`; classifying it is the
    /// caller's job. `Err` means the wait itself failed (transport, timeout).
    async fn await_final_status(&self, name: &str) -> Result<Option<Stack>>;
}

/// Deletes access-control rolesets.
#[allow(async_fn_in_trait)]
#[cfg_attr(test, mockall::automock)]
pub trait RolesetManager: Send + Sync {
    /// Delete the roleset shared by an environment
    async fn delete_environment_roleset(&self, environment: &str) -> Result<()>;

    /// Delete the roleset of one service in an environment
    async fn delete_service_roleset(&self, environment: &str, service: &str) -> Result<()>;
}

/// A stack provider that can list, delete and wait.
pub trait StackManager: StackLister + StackDeleter + StackWaiter {}

impl<T: StackLister + StackDeleter + StackWaiter> StackManager for T {}
