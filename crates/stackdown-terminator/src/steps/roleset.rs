//! Roleset steps: pure delegation to the roleset manager

use crate::collaborators::RolesetManager;
use crate::error::TerminateError;

pub(crate) async fn delete_environment_roleset<R: RolesetManager>(
    rolesets: &R,
    environment: &str,
) -> Result<(), TerminateError> {
    rolesets
        .delete_environment_roleset(environment)
        .await
        .map_err(|source| TerminateError::Roleset {
            scope: format!("environment '{}'", environment),
            source,
        })
}

pub(crate) async fn delete_service_roleset<R: RolesetManager>(
    rolesets: &R,
    environment: &str,
    service: &str,
) -> Result<(), TerminateError> {
    rolesets
        .delete_service_roleset(environment, service)
        .await
        .map_err(|source| TerminateError::Roleset {
            scope: format!("service '{}' in '{}'", service, environment),
            source,
        })
}
