//! Single-service undeploy

use super::scoped::await_success;
use crate::collaborators::{StackDeleter, StackWaiter};
use crate::error::TerminateError;
use crate::observer::TerminationObserver;
use stackdown_common::naming::is_valid_name;
use stackdown_common::{StackKind, create_stack_name};

/// Reject service names that cannot form a stack name.
pub(crate) fn validate_service(service: &str) -> Result<(), TerminateError> {
    if is_valid_name(service) {
        Ok(())
    } else {
        Err(TerminateError::InvalidName {
            what: "service",
            name: service.to_string(),
        })
    }
}

/// Remove one service's stack from an environment.
///
/// The stack is awaited first so that an in-flight operation settles before
/// the delete. A stack that is already gone needs no delete at all.
pub(crate) async fn undeploy_service_stack<D, W>(
    deleter: &D,
    waiter: &W,
    observer: &dyn TerminationObserver,
    namespace: &str,
    service: &str,
    environment: &str,
) -> Result<(), TerminateError>
where
    D: StackDeleter,
    W: StackWaiter,
{
    let name = create_stack_name(namespace, StackKind::Service, &[service, environment]);

    observer.awaiting(&name);
    let existing = waiter
        .await_final_status(&name)
        .await
        .map_err(|source| TerminateError::Wait {
            stack: name.clone(),
            source,
        })?;

    if existing.is_none() {
        observer.already_deleted(&name);
        return Ok(());
    }

    observer.delete_issued(&name);
    deleter
        .delete_stack(&name)
        .await
        .map_err(|source| TerminateError::Delete {
            stack: name.clone(),
            source,
        })?;

    await_success(waiter, observer, &name).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collaborators::{MockStackDeleter, MockStackWaiter};
    use crate::observer::NoopObserver;
    use stackdown_common::Stack;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    #[test]
    fn test_validate_service() {
        assert!(validate_service("web-api").is_ok());
        assert!(matches!(
            validate_service(""),
            Err(TerminateError::InvalidName { what: "service", .. })
        ));
        assert!(validate_service("web api").is_err());
    }

    #[tokio::test]
    async fn test_absent_service_skips_delete() {
        let mut deleter = MockStackDeleter::new();
        deleter.expect_delete_stack().never();
        let mut waiter = MockStackWaiter::new();
        waiter.expect_await_final_status().times(1).returning(|name| {
            assert_eq!(name, "ns-service-web-dev");
            Ok(None)
        });

        undeploy_service_stack(&deleter, &waiter, &NoopObserver, "ns", "web", "dev")
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_present_service_deleted_and_validated() {
        let waits = Arc::new(AtomicUsize::new(0));
        let mut deleter = MockStackDeleter::new();
        deleter.expect_delete_stack().times(1).returning(|_| Ok(()));
        let mut waiter = MockStackWaiter::new();
        let counter = waits.clone();
        waiter.expect_await_final_status().times(2).returning(move |name| {
            if counter.fetch_add(1, Ordering::SeqCst) == 0 {
                Ok(Some(Stack::new(name, StackKind::Service, "UPDATE_COMPLETE")))
            } else {
                Ok(Some(
                    Stack::new(name, StackKind::Service, "DELETE_FAILED")
                        .with_reason("target group in use"),
                ))
            }
        });

        let err = undeploy_service_stack(&deleter, &waiter, &NoopObserver, "ns", "web", "dev")
            .await
            .unwrap_err();

        assert!(err.to_string().contains("DELETE_FAILED"));
        assert!(err.to_string().contains("target group in use"));
    }
}
