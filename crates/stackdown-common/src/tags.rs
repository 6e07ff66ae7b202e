//! Stack tag keys
//!
//! Provisioned stacks carry these tags; environment membership is decided by
//! the `environment` tag alone, never by the stack's name.
//!
//! ## Tag Schema
//!
//! | Tag Key | Description |
//! |---------|-------------|
//! | `type` | Stack kind tag (see [`StackKind::tag`](crate::StackKind::tag)) |
//! | `environment` | Environment the stack belongs to |
//! | `service` | Owning service (service and database stacks) |
//!
//! Cloud adapters store these keys under a `<namespace>:` prefix and strip it
//! when reporting a [`Stack`](crate::Stack).

use std::collections::HashMap;

/// Tag key for the stack kind
pub const TAG_TYPE: &str = "type";

/// Tag key for environment membership
pub const TAG_ENVIRONMENT: &str = "environment";

/// Tag key for the owning service
pub const TAG_SERVICE: &str = "service";

/// Prefix used for stack tags in the cloud provider
pub fn tag_prefix(namespace: &str) -> String {
    format!("{}:", namespace)
}

/// Strip `<namespace>:` from a provider tag key, returning `None` for
/// tags that do not belong to the namespace
pub fn strip_namespace<'a>(namespace: &str, key: &'a str) -> Option<&'a str> {
    key.strip_prefix(namespace)?.strip_prefix(':')
}

/// Check whether a tag map places a stack in `environment`
pub fn in_environment(tags: &HashMap<String, String>, environment: &str) -> bool {
    tags.get(TAG_ENVIRONMENT).map(String::as_str) == Some(environment)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_namespace() {
        assert_eq!(strip_namespace("acme", "acme:environment"), Some("environment"));
        assert_eq!(strip_namespace("acme", "other:environment"), None);
        assert_eq!(strip_namespace("acme", "acmeenvironment"), None);
        assert_eq!(tag_prefix("acme"), "acme:");
    }

    #[test]
    fn test_in_environment() {
        let mut tags = HashMap::new();
        assert!(!in_environment(&tags, "dev"));

        tags.insert(TAG_ENVIRONMENT.to_string(), "prod".to_string());
        assert!(!in_environment(&tags, "dev"));

        tags.insert(TAG_ENVIRONMENT.to_string(), "dev".to_string());
        assert!(in_environment(&tags, "dev"));
    }
}
