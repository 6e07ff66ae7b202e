//! stackdown-terminator - Dependency-ordered environment teardown
//!
//! Tears down an environment's stacks in reverse provisioning order:
//! services and databases first, then the container platform, service
//! discovery, the environment roleset, the load balancer and finally the
//! network. Also removes a single service from a live environment.
//!
//! The pipeline only talks to the outside world through the collaborator
//! traits in [`collaborators`]; [`aws`] provides CloudFormation-backed
//! implementations.

pub mod aws;
pub mod collaborators;
pub mod config;
pub mod error;
pub mod observer;
pub mod pipeline;
pub mod roleset;
pub mod steps;
pub mod wait;
pub mod workflows;

pub use collaborators::{RolesetManager, StackDeleter, StackLister, StackManager, StackWaiter};
pub use error::TerminateError;
pub use observer::{NoopObserver, TerminationObserver, TracingObserver};
pub use pipeline::{Pipeline, TerminationContext};
pub use steps::TerminationStep;
pub use workflows::{
    UndeployOptions, environment_terminator, service_undeployer, terminate_environment,
    undeploy_service,
};
