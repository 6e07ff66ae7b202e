//! Default configuration values shared between the CLI and library callers

/// Default namespace prefixed to every stack name
pub const DEFAULT_NAMESPACE: &str = "stackdown";

/// Default AWS region
pub const DEFAULT_REGION: &str = "us-east-1";

/// Default time to wait for a single stack to reach a final status (1 hour)
pub const DEFAULT_WAIT_TIMEOUT_SECS: u64 = 3600;
