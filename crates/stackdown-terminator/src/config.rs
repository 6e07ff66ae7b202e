//! Configuration types for the terminator

use crate::wait::WaitConfig;
use std::time::Duration;

/// AWS connection configuration
#[derive(Debug, Clone)]
pub struct AwsConfig {
    /// AWS region
    pub region: String,
    /// AWS profile name (overrides default credential resolution)
    pub aws_profile: Option<String>,
}

/// Configuration for a termination run
#[derive(Debug, Clone)]
pub struct RunConfig {
    pub aws: AwsConfig,
    /// Prefix of every stack name and tag key
    pub namespace: String,
    /// Polling behaviour while waiting for stacks to settle
    pub wait: WaitConfig,
}

impl RunConfig {
    pub fn region(&self) -> &str {
        &self.aws.region
    }

    pub fn aws_profile(&self) -> Option<&str> {
        self.aws.aws_profile.as_deref()
    }

    /// Set the per-stack wait timeout, keeping the polling cadence
    pub fn with_wait_timeout(mut self, timeout: Duration) -> Self {
        self.wait.timeout = timeout;
        self
    }
}
