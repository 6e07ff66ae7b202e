//! Termination workflows
//!
//! Assemble the fixed step order for the two supported operations:
//!
//! - Environment termination, in reverse provisioning order:
//!   services, databases, container platform, service discovery,
//!   environment roleset, load balancer, network.
//! - Single-service undeploy: validate the service name, remove its stack,
//!   then (by default) its roleset.

use crate::collaborators::{RolesetManager, StackManager};
use crate::error::TerminateError;
use crate::pipeline::{Pipeline, TerminationContext};
use crate::steps::TerminationStep;

/// Options for [`undeploy_service`]
#[derive(Debug, Clone)]
pub struct UndeployOptions {
    /// Also delete the service's roleset once its stack is gone
    pub remove_roleset: bool,
}

impl Default for UndeployOptions {
    fn default() -> Self {
        Self {
            remove_roleset: true,
        }
    }
}

/// Build the pipeline that tears down a whole environment
pub fn environment_terminator<'a, S, R>(
    ctx: TerminationContext<'a, S, R>,
    environment: &str,
) -> Pipeline<'a, S, R>
where
    S: StackManager,
    R: RolesetManager,
{
    Pipeline::new(ctx)
        .step(TerminationStep::services(environment))
        .step(TerminationStep::databases(environment))
        .step(TerminationStep::container_platform(environment))
        .step(TerminationStep::service_discovery(environment))
        .step(TerminationStep::environment_roleset(environment))
        .step(TerminationStep::load_balancer(environment))
        .step(TerminationStep::network(environment))
}

/// Build the pipeline that removes one service from an environment
pub fn service_undeployer<'a, S, R>(
    ctx: TerminationContext<'a, S, R>,
    service: &str,
    environment: &str,
    options: &UndeployOptions,
) -> Pipeline<'a, S, R>
where
    S: StackManager,
    R: RolesetManager,
{
    let pipeline = Pipeline::new(ctx)
        .step(TerminationStep::service_input(service))
        .step(TerminationStep::service(service, environment));

    if options.remove_roleset {
        pipeline.step(TerminationStep::service_roleset(service, environment))
    } else {
        pipeline
    }
}

/// Tear down every stack of `environment`
pub async fn terminate_environment<S, R>(
    ctx: TerminationContext<'_, S, R>,
    environment: &str,
) -> Result<(), TerminateError>
where
    S: StackManager,
    R: RolesetManager,
{
    environment_terminator(ctx, environment).run().await
}

/// Remove `service` from `environment`, leaving the environment running
pub async fn undeploy_service<S, R>(
    ctx: TerminationContext<'_, S, R>,
    service: &str,
    environment: &str,
    options: &UndeployOptions,
) -> Result<(), TerminateError>
where
    S: StackManager,
    R: RolesetManager,
{
    service_undeployer(ctx, service, environment, options)
        .run()
        .await
}
