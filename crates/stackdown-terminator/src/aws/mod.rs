//! AWS-backed collaborators
//!
//! - [`cloudformation`]: stack listing, deletion and waiting via CloudFormation
//! - [`context`]: shared SDK configuration
//! - [`error`]: error classification

pub mod cloudformation;
pub mod context;
pub mod error;

pub use cloudformation::CloudFormationStacks;
pub use context::AwsContext;
pub use error::{AwsError, classify_aws_error, classify_sdk_error};
