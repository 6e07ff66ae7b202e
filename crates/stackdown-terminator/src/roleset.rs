//! Rolesets backed by IAM stacks
//!
//! An environment's roleset lives in `<ns>-iam-environment-<env>` and a
//! service's in `<ns>-iam-service-<svc>-<env>`. Deleting a roleset deletes
//! that stack and waits for it; a stack that is already gone counts as done.

use crate::collaborators::{RolesetManager, StackDeleter, StackWaiter};
use crate::steps::scoped::check_final_status;
use anyhow::Result;
use stackdown_common::{StackKind, create_stack_name};
use tracing::{debug, info};

/// Roleset manager that deletes IAM stacks through a stack provider
#[derive(Debug, Clone)]
pub struct StackRolesetManager<S> {
    namespace: String,
    stacks: S,
}

impl<S> StackRolesetManager<S> {
    pub fn new(namespace: impl Into<String>, stacks: S) -> Self {
        Self {
            namespace: namespace.into(),
            stacks,
        }
    }

    /// Stack holding the roleset shared by an environment
    pub fn environment_stack_name(&self, environment: &str) -> String {
        create_stack_name(
            &self.namespace,
            StackKind::Roleset,
            &["environment", environment],
        )
    }

    /// Stack holding the roleset of one service
    pub fn service_stack_name(&self, environment: &str, service: &str) -> String {
        create_stack_name(
            &self.namespace,
            StackKind::Roleset,
            &["service", service, environment],
        )
    }
}

impl<S: StackDeleter + StackWaiter> StackRolesetManager<S> {
    async fn delete_roleset_stack(&self, name: &str) -> Result<()> {
        info!(stack = %name, "Deleting roleset");
        self.stacks.delete_stack(name).await?;

        let stack = self.stacks.await_final_status(name).await?;
        check_final_status(name, stack.as_ref())?;

        debug!(stack = %name, "Roleset deleted");
        Ok(())
    }
}

impl<S: StackDeleter + StackWaiter> RolesetManager for StackRolesetManager<S> {
    async fn delete_environment_roleset(&self, environment: &str) -> Result<()> {
        self.delete_roleset_stack(&self.environment_stack_name(environment))
            .await
    }

    async fn delete_service_roleset(&self, environment: &str, service: &str) -> Result<()> {
        self.delete_roleset_stack(&self.service_stack_name(environment, service))
            .await
    }
}
