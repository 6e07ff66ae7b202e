//! stackdown-common - Shared stack types and utilities
//!
//! This crate provides the stack model used by the terminator and its test
//! utilities, without any AWS SDK dependencies to keep it lightweight.
//!
//! ## Modules
//!
//! - [`defaults`]: Default configuration values
//! - [`naming`]: Deterministic stack names
//! - [`stack`]: The `Stack` record reported by collaborators
//! - [`stack_kind`]: Stack kinds and teardown ordering
//! - [`status`]: Terminal/successful status classification
//! - [`tags`]: Stack tag keys used for environment membership

pub mod defaults;
pub mod naming;
pub mod stack;
pub mod stack_kind;
pub mod status;
pub mod tags;

// Re-export commonly used types
pub use naming::{create_stack_name, is_valid_name};
pub use stack::Stack;
pub use stack_kind::StackKind;
pub use status::StackStatus;
