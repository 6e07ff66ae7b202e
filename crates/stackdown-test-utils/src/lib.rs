//! Shared test utilities for stackdown
//!
//! This crate provides in-memory collaborators so termination workflows can
//! be exercised end to end without AWS.
//!
//! ## Modules
//!
//! - [`aws`]: AWS region detection and unique environment names
//! - [`fake`]: `FakeCloud`, an in-memory stack provider and roleset manager
//! - [`observer`]: `RecordingObserver`, which keeps every progress event

pub mod aws;
pub mod fake;
pub mod observer;

// Re-export commonly used items
pub use aws::{get_test_region, test_env_name};
pub use fake::{Call, FakeCloud};
pub use observer::{Event, RecordingObserver};
