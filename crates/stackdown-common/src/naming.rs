//! Deterministic stack names
//!
//! Every stack name is `<namespace>-<kind tag>-<part>[-<part>...]`, so the
//! same logical resource always resolves to the same name.

use crate::StackKind;

/// Build the stack name for a resource of `kind` identified by `parts`.
///
/// # Example
/// ```
/// use stackdown_common::{create_stack_name, StackKind};
///
/// assert_eq!(create_stack_name("acme", StackKind::Network, &["dev"]), "acme-vpc-dev");
/// assert_eq!(
///     create_stack_name("acme", StackKind::Service, &["web", "dev"]),
///     "acme-service-web-dev"
/// );
/// ```
pub fn create_stack_name(namespace: &str, kind: StackKind, parts: &[&str]) -> String {
    let mut name = format!("{}-{}", namespace, kind.tag());
    for part in parts {
        name.push('-');
        name.push_str(part);
    }
    name
}

/// Check that a name can be embedded in a stack name: non-empty ASCII
/// letters, digits and '-', not starting or ending with '-'.
pub fn is_valid_name(name: &str) -> bool {
    !name.is_empty()
        && !name.starts_with('-')
        && !name.ends_with('-')
        && name.chars().all(|c| c.is_ascii_alphanumeric() || c == '-')
}

/// Recover the stack kind from a name built by [`create_stack_name`]
pub fn kind_from_name(namespace: &str, name: &str) -> Option<StackKind> {
    let rest = name.strip_prefix(namespace)?.strip_prefix('-')?;
    let tag = rest.split('-').next()?;
    tag.parse().ok()
}
