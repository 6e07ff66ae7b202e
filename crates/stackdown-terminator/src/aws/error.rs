//! AWS error classification
//!
//! Classifies SDK errors by their `.code()` rather than by matching on the
//! Debug output. CloudFormation reports a missing stack as a generic
//! `ValidationError`, so that case is recognised by its message.

use aws_sdk_cloudformation::error::ProvideErrorMetadata;
use thiserror::Error;

/// AWS error categories relevant to stack teardown
#[derive(Debug, Error)]
pub enum AwsError {
    /// Stack does not exist (already deleted or never created)
    #[error("Stack not found: {message}")]
    NotFound { message: String },

    /// Rate limit exceeded (retryable with backoff)
    #[error("Rate limit exceeded")]
    Throttled,

    /// Any other SDK error
    #[error("AWS error: {message}")]
    Sdk {
        code: Option<String>,
        message: String,
    },
}

impl AwsError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, AwsError::NotFound { .. })
    }

    pub fn is_retryable(&self) -> bool {
        matches!(self, AwsError::Throttled)
    }
}

/// Known AWS error codes for throttling/rate limiting
const THROTTLING_CODES: &[&str] = &["Throttling", "ThrottlingException", "RequestLimitExceeded"];

/// Classify an AWS error from its code and message.
pub fn classify_aws_error(code: Option<&str>, message: Option<&str>) -> AwsError {
    let message = message.unwrap_or("Unknown error").to_string();

    match code {
        Some("ValidationError") if message.contains("does not exist") => {
            AwsError::NotFound { message }
        }
        Some(c) if THROTTLING_CODES.contains(&c) => AwsError::Throttled,
        _ => AwsError::Sdk {
            code: code.map(str::to_string),
            message,
        },
    }
}

/// Classify any SDK error that exposes error metadata.
pub fn classify_sdk_error<E: ProvideErrorMetadata>(error: &E) -> AwsError {
    classify_aws_error(error.code(), error.message())
}
