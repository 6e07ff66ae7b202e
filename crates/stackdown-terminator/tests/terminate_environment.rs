//! End-to-end environment teardown against the in-memory cloud

use stackdown_common::tags::{TAG_ENVIRONMENT, TAG_SERVICE};
use stackdown_common::{Stack, StackKind};
use stackdown_terminator::{TerminateError, TerminationContext, terminate_environment};
use stackdown_test_utils::{Event, FakeCloud, RecordingObserver};

fn tagged(name: &str, kind: StackKind, environment: &str, service: &str) -> Stack {
    Stack::new(name, kind, "CREATE_COMPLETE")
        .with_tag(TAG_ENVIRONMENT, environment)
        .with_tag(TAG_SERVICE, service)
}

fn named(name: &str, kind: StackKind) -> Stack {
    Stack::new(name, kind, "CREATE_COMPLETE")
}

/// A `dev` environment with two services and a database, next to a `prod`
/// service that must survive
fn dev_environment() -> FakeCloud {
    FakeCloud::new()
        .with_stack(tagged("acme-service-web-dev", StackKind::Service, "dev", "web"))
        .with_stack(tagged("acme-service-api-dev", StackKind::Service, "dev", "api"))
        .with_stack(tagged("acme-service-web-prod", StackKind::Service, "prod", "web"))
        .with_stack(tagged("orders-db", StackKind::Database, "dev", "api"))
        .with_stack(named("acme-cluster-dev", StackKind::ContainerPlatform))
        .with_stack(named("acme-discovery-dev", StackKind::ServiceDiscovery))
        .with_stack(named("acme-loadbalancer-dev", StackKind::LoadBalancer))
        .with_stack(named("acme-vpc-dev", StackKind::Network))
        .with_stack(named("acme-target-dev", StackKind::Target))
        .with_environment_roleset("dev")
        .with_service_roleset("dev", "web")
        .with_service_roleset("dev", "api")
        .with_service_roleset("prod", "web")
}

async fn terminate(cloud: &FakeCloud, observer: &RecordingObserver) -> Result<(), TerminateError> {
    let ctx = TerminationContext::new("acme", cloud, cloud).with_observer(observer);
    terminate_environment(ctx, "dev").await
}

#[tokio::test]
async fn test_full_teardown_in_dependency_order() {
    let cloud = dev_environment();
    let observer = RecordingObserver::new();

    terminate(&cloud, &observer).await.unwrap();

    assert_eq!(
        cloud.deletes(),
        vec![
            "acme-service-web-dev",
            "acme-service-api-dev",
            "orders-db",
            "acme-cluster-dev",
            "acme-discovery-dev",
            "acme-loadbalancer-dev",
            "acme-vpc-dev",
            "acme-target-dev",
        ]
    );
    assert_eq!(cloud.live_stacks(), vec!["acme-service-web-prod"]);

    assert!(!cloud.has_environment_roleset("dev"));
    assert!(!cloud.has_service_roleset("dev", "web"));
    assert!(!cloud.has_service_roleset("dev", "api"));
    assert!(cloud.has_service_roleset("prod", "web"));

    assert_eq!(
        observer.started_steps(),
        vec![
            "terminate services in 'dev'",
            "terminate databases in 'dev'",
            "terminate cluster of 'dev'",
            "terminate discovery of 'dev'",
            "delete roleset of 'dev'",
            "terminate loadbalancer of 'dev'",
            "terminate network of 'dev'",
        ]
    );
}

#[tokio::test]
async fn test_environment_roleset_removed_between_discovery_and_load_balancer() {
    use stackdown_test_utils::Call;

    let cloud = dev_environment();
    terminate(&cloud, &RecordingObserver::new()).await.unwrap();

    let calls = cloud.calls();
    let roleset = calls
        .iter()
        .position(|c| *c == Call::DeleteEnvironmentRoleset("dev".to_string()))
        .unwrap();

    assert!(cloud.delete_position("acme-discovery-dev").unwrap() < roleset);
    assert!(roleset < cloud.delete_position("acme-loadbalancer-dev").unwrap());
}

#[tokio::test]
async fn test_failed_platform_stops_later_steps() {
    let cloud = dev_environment().with_final_status(
        "acme-cluster-dev",
        "DELETE_FAILED",
        Some("dependent resource in use"),
    );
    let observer = RecordingObserver::new();

    let err = terminate(&cloud, &observer).await.unwrap_err();

    match &err {
        TerminateError::FailedStatus {
            stack,
            status,
            reason,
        } => {
            assert_eq!(stack, "acme-cluster-dev");
            assert_eq!(status.as_str(), "DELETE_FAILED");
            assert_eq!(reason, "dependent resource in use");
        }
        other => panic!("Expected FailedStatus, got {other:?}"),
    }
    assert!(err.is_failed_status());

    // Consumers are gone, nothing after the platform was touched
    assert!(!cloud.is_live("acme-service-web-dev"));
    assert!(!cloud.is_live("orders-db"));
    assert_eq!(cloud.delete_position("acme-discovery-dev"), None);
    assert_eq!(cloud.delete_position("acme-vpc-dev"), None);
    assert!(cloud.has_environment_roleset("dev"));

    assert_eq!(
        observer.events().last(),
        Some(&Event::StepFinished {
            step: "terminate cluster of 'dev'".to_string(),
            ok: false,
        })
    );
}

#[tokio::test]
async fn test_rerun_after_failure_resumes() {
    let cloud = dev_environment().with_final_status("acme-cluster-dev", "DELETE_FAILED", None);
    terminate(&cloud, &RecordingObserver::new())
        .await
        .unwrap_err();

    cloud.clear_final_status("acme-cluster-dev");
    terminate(&cloud, &RecordingObserver::new()).await.unwrap();

    // Services were only deleted by the first run
    let web_deletes = cloud
        .deletes()
        .iter()
        .filter(|name| *name == "acme-service-web-dev")
        .count();
    assert_eq!(web_deletes, 1);
    assert_eq!(cloud.live_stacks(), vec!["acme-service-web-prod"]);
    assert!(!cloud.has_environment_roleset("dev"));
}

#[tokio::test]
async fn test_second_run_is_a_no_op() {
    let cloud = dev_environment();
    terminate(&cloud, &RecordingObserver::new()).await.unwrap();
    let first_run_deletes = cloud.deletes().len();

    terminate(&cloud, &RecordingObserver::new()).await.unwrap();

    // Only the named stacks are re-requested; listings are empty now
    let second_run: Vec<String> = cloud.deletes().split_off(first_run_deletes);
    assert_eq!(
        second_run,
        vec![
            "acme-cluster-dev",
            "acme-discovery-dev",
            "acme-loadbalancer-dev",
            "acme-vpc-dev",
            "acme-target-dev",
        ]
    );
    assert_eq!(cloud.live_stacks(), vec!["acme-service-web-prod"]);
}

#[tokio::test]
async fn test_empty_environment_succeeds() {
    let cloud = FakeCloud::new();
    terminate(&cloud, &RecordingObserver::new()).await.unwrap();

    assert!(cloud.live_stacks().is_empty());
}

#[tokio::test]
async fn test_shared_network_delete_rejected() {
    let cloud = dev_environment().with_failing_delete("acme-vpc-dev", "vpc is in use");
    let observer = RecordingObserver::new();

    terminate(&cloud, &observer).await.unwrap();

    assert!(cloud.is_live("acme-vpc-dev"));
    assert!(!cloud.is_live("acme-target-dev"));
    assert!(
        observer
            .events()
            .contains(&Event::Suppressed("acme-vpc-dev".to_string()))
    );
}

#[tokio::test]
async fn test_failed_network_status_still_removes_target() {
    let cloud = dev_environment().with_final_status("acme-vpc-dev", "DELETE_FAILED", None);

    let err = terminate(&cloud, &RecordingObserver::new())
        .await
        .unwrap_err();

    assert_eq!(err.stack(), Some("acme-vpc-dev"));
    assert!(!cloud.is_live("acme-target-dev"));
}

#[tokio::test]
async fn test_failed_service_status_does_not_stop_teardown() {
    let cloud = dev_environment().with_final_status("acme-service-api-dev", "DELETE_FAILED", None);
    let observer = RecordingObserver::new();

    terminate(&cloud, &observer).await.unwrap();

    assert!(cloud.is_live("acme-service-api-dev"));
    assert!(!cloud.is_live("acme-target-dev"));
}

#[tokio::test]
async fn test_service_roleset_failure_ignored() {
    let cloud = dev_environment().with_failing_service_roleset("dev", "web");
    let observer = RecordingObserver::new();

    terminate(&cloud, &observer).await.unwrap();

    assert!(cloud.has_service_roleset("dev", "web"));
    assert!(!cloud.has_service_roleset("dev", "api"));
    assert!(
        observer
            .events()
            .contains(&Event::Ignored("acme-service-web-dev".to_string()))
    );
}

#[tokio::test]
async fn test_environment_roleset_failure_stops_teardown() {
    let cloud = dev_environment().with_failing_environment_roleset("dev");

    let err = terminate(&cloud, &RecordingObserver::new())
        .await
        .unwrap_err();

    assert!(matches!(err, TerminateError::Roleset { .. }));
    assert!(cloud.is_live("acme-loadbalancer-dev"));
    assert!(cloud.is_live("acme-vpc-dev"));
}

#[tokio::test]
async fn test_list_failure_stops_teardown() {
    let cloud = dev_environment().with_failing_list(StackKind::Database);

    let err = terminate(&cloud, &RecordingObserver::new())
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        TerminateError::List {
            kind: StackKind::Database,
            ..
        }
    ));
    assert!(cloud.is_live("orders-db"));
    assert!(cloud.is_live("acme-cluster-dev"));
}

#[tokio::test]
async fn test_service_delete_failure_stops_teardown() {
    let cloud = dev_environment().with_failing_delete("acme-service-web-dev", "AccessDenied");

    let err = terminate(&cloud, &RecordingObserver::new())
        .await
        .unwrap_err();

    assert_eq!(err.stack(), Some("acme-service-web-dev"));
    // The batch aborts before the next delete
    assert_eq!(cloud.delete_position("acme-service-api-dev"), None);
    assert!(cloud.is_live("orders-db"));
}
