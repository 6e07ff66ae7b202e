//! AWS test utilities
//!
//! Provides region detection and unique environment names for AWS
//! integration tests.

use chrono::Utc;

/// Get the AWS region for tests.
///
/// Checks environment variables in order:
/// 1. AWS_REGION
/// 2. AWS_DEFAULT_REGION
/// 3. Falls back to us-east-1
pub fn get_test_region() -> String {
    std::env::var("AWS_REGION")
        .or_else(|_| std::env::var("AWS_DEFAULT_REGION"))
        .unwrap_or_else(|_| "us-east-1".to_string())
}

/// Generate a unique environment name for test stacks.
///
/// Format: `test-{timestamp_ms}-{counter}`, which is also a valid stack
/// name component.
///
/// # Example
///
/// ```
/// use stackdown_test_utils::aws::test_env_name;
///
/// let env = test_env_name();
/// assert!(env.starts_with("test-"));
/// assert!(stackdown_common::is_valid_name(&env));
/// ```
pub fn test_env_name() -> String {
    use std::sync::atomic::{AtomicU32, Ordering};
    static COUNTER: AtomicU32 = AtomicU32::new(0);

    let ts = Utc::now().timestamp_millis();
    let counter = COUNTER.fetch_add(1, Ordering::Relaxed);
    format!("test-{}-{}", ts, counter)
}
