//! Stack records reported by the lister and waiter

use crate::status::StackStatus;
use crate::tags::{self, TAG_SERVICE};
use crate::StackKind;
use std::collections::HashMap;

/// A named, externally managed infrastructure unit
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Stack {
    pub name: String,
    pub kind: StackKind,
    /// Tags with the namespace prefix already stripped
    pub tags: HashMap<String, String>,
    pub status: StackStatus,
    /// Diagnostic text, present on failure/rollback statuses
    pub status_reason: Option<String>,
}

impl Stack {
    /// Create a stack with no tags
    pub fn new(name: impl Into<String>, kind: StackKind, status: impl Into<StackStatus>) -> Self {
        Self {
            name: name.into(),
            kind,
            tags: HashMap::new(),
            status: status.into(),
            status_reason: None,
        }
    }

    /// Add a tag
    pub fn with_tag(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.tags.insert(key.into(), value.into());
        self
    }

    /// Set the status reason
    pub fn with_reason(mut self, reason: impl Into<String>) -> Self {
        self.status_reason = Some(reason.into());
        self
    }

    pub fn in_environment(&self, environment: &str) -> bool {
        tags::in_environment(&self.tags, environment)
    }

    /// Owning service, empty when untagged
    pub fn service(&self) -> &str {
        self.tags.get(TAG_SERVICE).map(String::as_str).unwrap_or_default()
    }

    /// Status reason, empty when absent
    pub fn reason(&self) -> &str {
        self.status_reason.as_deref().unwrap_or_default()
    }
}
