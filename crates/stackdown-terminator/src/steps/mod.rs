//! Termination steps
//!
//! Each step is a value carrying its own configuration (environment and
//! service names). The pipeline supplies the namespace and collaborators at
//! execution time.
//!
//! Two execution patterns are used:
//! - [`batch`]: every stack of a kind tagged with the environment; all
//!   deletes are issued before any wait so the provider retires them
//!   concurrently.
//! - [`scoped`]: one deterministically named stack, deleted then validated.
//!
//! [`network`] is the best-effort variant of the scoped pattern.

pub mod batch;
pub mod network;
pub mod roleset;
pub mod scoped;
pub mod service;

use crate::collaborators::{RolesetManager, StackManager};
use crate::error::TerminateError;
use crate::pipeline::TerminationContext;
use stackdown_common::{StackKind, create_stack_name};
use std::fmt;

/// A single unit of teardown work
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TerminationStep {
    /// Every service stack tagged with the environment (batch)
    Services { environment: String },
    /// Every database stack tagged with the environment (batch)
    Databases { environment: String },
    /// One environment-scoped stack: container platform, service
    /// discovery or load balancer
    Scoped { kind: StackKind, environment: String },
    /// The environment roleset
    EnvironmentRoleset { environment: String },
    /// The network and its target, best-effort on deletes
    Network { environment: String },
    /// Validate the service name before touching anything
    ServiceInput { service: String },
    /// One service stack, skipped when already gone
    Service { service: String, environment: String },
    /// The roleset of one service
    ServiceRoleset { service: String, environment: String },
}

impl TerminationStep {
    pub fn services(environment: impl Into<String>) -> Self {
        Self::Services {
            environment: environment.into(),
        }
    }

    pub fn databases(environment: impl Into<String>) -> Self {
        Self::Databases {
            environment: environment.into(),
        }
    }

    pub fn container_platform(environment: impl Into<String>) -> Self {
        Self::Scoped {
            kind: StackKind::ContainerPlatform,
            environment: environment.into(),
        }
    }

    pub fn service_discovery(environment: impl Into<String>) -> Self {
        Self::Scoped {
            kind: StackKind::ServiceDiscovery,
            environment: environment.into(),
        }
    }

    pub fn load_balancer(environment: impl Into<String>) -> Self {
        Self::Scoped {
            kind: StackKind::LoadBalancer,
            environment: environment.into(),
        }
    }

    pub fn environment_roleset(environment: impl Into<String>) -> Self {
        Self::EnvironmentRoleset {
            environment: environment.into(),
        }
    }

    pub fn network(environment: impl Into<String>) -> Self {
        Self::Network {
            environment: environment.into(),
        }
    }

    pub fn service_input(service: impl Into<String>) -> Self {
        Self::ServiceInput {
            service: service.into(),
        }
    }

    pub fn service(service: impl Into<String>, environment: impl Into<String>) -> Self {
        Self::Service {
            service: service.into(),
            environment: environment.into(),
        }
    }

    pub fn service_roleset(service: impl Into<String>, environment: impl Into<String>) -> Self {
        Self::ServiceRoleset {
            service: service.into(),
            environment: environment.into(),
        }
    }

    /// Run this step against the context's collaborators
    pub async fn execute<S, R>(&self, ctx: &TerminationContext<'_, S, R>) -> Result<(), TerminateError>
    where
        S: StackManager,
        R: RolesetManager,
    {
        let stacks = ctx.stacks();
        let observer = ctx.observer();

        match self {
            TerminationStep::Services { environment } => {
                let cleanup = batch::ServiceRolesetCleanup {
                    rolesets: ctx.rolesets(),
                    environment: environment.as_str(),
                    observer,
                };
                batch::terminate_tagged(
                    stacks,
                    stacks,
                    stacks,
                    observer,
                    StackKind::Service,
                    environment,
                    &cleanup,
                )
                .await?;
                Ok(())
            }
            TerminationStep::Databases { environment } => {
                batch::terminate_tagged(
                    stacks,
                    stacks,
                    stacks,
                    observer,
                    StackKind::Database,
                    environment,
                    &(),
                )
                .await?;
                Ok(())
            }
            TerminationStep::Scoped { kind, environment } => {
                let name = create_stack_name(ctx.namespace(), *kind, &[environment.as_str()]);
                scoped::terminate_named(stacks, stacks, observer, &name).await
            }
            TerminationStep::EnvironmentRoleset { environment } => {
                roleset::delete_environment_roleset(ctx.rolesets(), environment).await
            }
            TerminationStep::Network { environment } => {
                network::terminate_network(stacks, stacks, observer, ctx.namespace(), environment)
                    .await
            }
            TerminationStep::ServiceInput { service } => service::validate_service(service),
            TerminationStep::Service {
                service,
                environment,
            } => {
                service::undeploy_service_stack(
                    stacks,
                    stacks,
                    observer,
                    ctx.namespace(),
                    service,
                    environment,
                )
                .await
            }
            TerminationStep::ServiceRoleset {
                service,
                environment,
            } => roleset::delete_service_roleset(ctx.rolesets(), environment, service).await,
        }
    }
}

impl fmt::Display for TerminationStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TerminationStep::Services { environment } => {
                write!(f, "terminate services in '{}'", environment)
            }
            TerminationStep::Databases { environment } => {
                write!(f, "terminate databases in '{}'", environment)
            }
            TerminationStep::Scoped { kind, environment } => {
                write!(f, "terminate {} of '{}'", kind, environment)
            }
            TerminationStep::EnvironmentRoleset { environment } => {
                write!(f, "delete roleset of '{}'", environment)
            }
            TerminationStep::Network { environment } => {
                write!(f, "terminate network of '{}'", environment)
            }
            TerminationStep::ServiceInput { service } => {
                write!(f, "validate service '{}'", service)
            }
            TerminationStep::Service {
                service,
                environment,
            } => write!(f, "undeploy service '{}' from '{}'", service, environment),
            TerminationStep::ServiceRoleset {
                service,
                environment,
            } => write!(f, "delete roleset of service '{}' in '{}'", service, environment),
        }
    }
}
