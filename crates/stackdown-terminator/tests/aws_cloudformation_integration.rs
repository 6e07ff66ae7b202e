//! CloudFormation integration tests - actually call AWS APIs
//!
//! These tests are marked `#[ignore]` and only run with:
//! ```text
//! AWS_PROFILE=your_profile cargo test --test aws_cloudformation_integration -- --ignored
//! ```
//!
//! They only touch stacks of a freshly generated environment name, which
//! never exist, so they are safe to run against a real account.

use stackdown_common::StackKind;
use stackdown_terminator::aws::{AwsContext, CloudFormationStacks};
use stackdown_terminator::roleset::StackRolesetManager;
use stackdown_terminator::wait::WaitConfig;
use stackdown_terminator::{
    StackDeleter, StackLister, StackWaiter, TerminationContext, terminate_environment,
};
use stackdown_test_utils::{get_test_region, test_env_name};
use std::time::Duration;

const NAMESPACE: &str = "stackdown-it";

async fn stacks() -> CloudFormationStacks {
    let aws = AwsContext::new(&get_test_region()).await;
    CloudFormationStacks::from_context(&aws, NAMESPACE).with_wait_config(WaitConfig {
        initial_delay: Duration::from_secs(1),
        max_delay: Duration::from_secs(5),
        timeout: Duration::from_secs(120),
    })
}

/// A stack that was never created is reported as absent, and deleting it
/// is not an error
#[tokio::test]
#[ignore]
async fn test_missing_stack_is_absent() {
    let stacks = stacks().await;
    let name = format!("{}-vpc-{}", NAMESPACE, test_env_name());

    stacks
        .delete_stack(&name)
        .await
        .expect("Deleting a missing stack should succeed");

    let status = stacks
        .await_final_status(&name)
        .await
        .expect("Describe should succeed - check AWS credentials");
    assert!(status.is_none(), "Missing stack should be absent");
}

#[tokio::test]
#[ignore]
async fn test_list_is_scoped_to_kind() {
    let stacks = stacks().await;

    let listed = stacks
        .list_stacks(StackKind::LoadBalancer)
        .await
        .expect("DescribeStacks should succeed - check AWS credentials");

    assert!(listed.iter().all(|s| s.kind == StackKind::LoadBalancer));
}

/// Terminating an environment that was never provisioned succeeds
#[tokio::test]
#[ignore]
async fn test_terminate_unknown_environment() {
    let stacks = stacks().await;
    let rolesets = StackRolesetManager::new(NAMESPACE, stacks.clone());
    let ctx = TerminationContext::new(NAMESPACE, &stacks, &rolesets);

    terminate_environment(ctx, &test_env_name())
        .await
        .expect("Nothing to delete, teardown should succeed");
}
