//! CloudFormation-backed stack collaborator
//!
//! Stacks are discovered through `DescribeStacks` and classified by their
//! `<namespace>:type` tag, falling back to the kind embedded in the stack
//! name. Waiting polls `DescribeStacks` for a single stack until its status
//! is terminal or the stack is gone.

use super::context::AwsContext;
use super::error::classify_sdk_error;
use crate::collaborators::{StackDeleter, StackLister, StackWaiter};
use crate::wait::{WaitConfig, wait_for_resource};
use anyhow::{Context, Result};
use aws_sdk_cloudformation::Client;
use aws_sdk_cloudformation::types::Stack as CfnStack;
use stackdown_common::naming::kind_from_name;
use stackdown_common::tags::{TAG_TYPE, strip_namespace};
use stackdown_common::{Stack, StackKind};
use std::collections::HashMap;
use tokio_util::sync::CancellationToken;
use tracing::debug;

/// Lists, deletes and waits on the stacks of one namespace
#[derive(Clone)]
pub struct CloudFormationStacks {
    client: Client,
    namespace: String,
    wait: WaitConfig,
    cancel: Option<CancellationToken>,
}

impl CloudFormationStacks {
    pub fn new(client: Client, namespace: impl Into<String>) -> Self {
        Self {
            client,
            namespace: namespace.into(),
            wait: WaitConfig::default(),
            cancel: None,
        }
    }

    pub fn from_context(ctx: &AwsContext, namespace: impl Into<String>) -> Self {
        Self::new(ctx.cloudformation_client(), namespace)
    }

    /// Override polling and timeout behaviour for waits
    pub fn with_wait_config(mut self, wait: WaitConfig) -> Self {
        self.wait = wait;
        self
    }

    /// Abort in-flight waits when `token` is cancelled
    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancel = Some(token);
        self
    }

    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    fn convert(&self, stack: &CfnStack) -> Option<Stack> {
        let name = present::<str>(stack.stack_name())?;
        let status = stack
            .stack_status()
            .map(|s| s.as_str())
            .unwrap_or("UNKNOWN");
        let tags = stack
            .tags()
            .iter()
            .filter_map(|t| Some((present::<str>(t.key())?, present::<str>(t.value())?)));

        stack_from_parts(
            &self.namespace,
            name,
            status,
            stack.stack_status_reason(),
            tags,
        )
    }

    /// Describe a single stack, `None` if it does not exist
    async fn describe(&self, name: &str) -> Result<Option<Stack>> {
        let resp = match self.client.describe_stacks().stack_name(name).send().await {
            Ok(resp) => resp,
            Err(e) if classify_sdk_error(&e).is_not_found() => return Ok(None),
            Err(e) => {
                return Err(e).with_context(|| format!("Failed to describe stack {}", name));
            }
        };

        let Some(found) = resp.stacks().first() else {
            return Ok(None);
        };
        let stack = self.convert(found).with_context(|| {
            format!(
                "Stack {} is not managed under namespace '{}'",
                name, self.namespace
            )
        })?;

        Ok((!stack.status.is_deleted()).then_some(stack))
    }
}

/// Accept SDK accessors whether they model a member as required or optional
fn present<'a, T: ?Sized>(value: impl Into<Option<&'a T>>) -> Option<&'a T> {
    value.into()
}

/// Build a [`Stack`] from raw provider fields.
///
/// Only tags under `<namespace>:` are kept, with the prefix stripped. The
/// kind comes from the `type` tag or, failing that, from the stack name.
/// Returns `None` for stacks that belong to no known kind.
fn stack_from_parts<'a>(
    namespace: &str,
    name: &str,
    status: &str,
    reason: Option<&str>,
    tags: impl IntoIterator<Item = (&'a str, &'a str)>,
) -> Option<Stack> {
    let tags: HashMap<String, String> = tags
        .into_iter()
        .filter_map(|(k, v)| Some((strip_namespace(namespace, k)?.to_string(), v.to_string())))
        .collect();

    let kind = tags
        .get(TAG_TYPE)
        .and_then(|t| t.parse::<StackKind>().ok())
        .or_else(|| kind_from_name(namespace, name))?;

    let mut stack = Stack::new(name, kind, status);
    stack.tags = tags;
    stack.status_reason = reason.filter(|r| !r.is_empty()).map(str::to_string);
    Some(stack)
}

impl StackLister for CloudFormationStacks {
    async fn list_stacks(&self, kind: StackKind) -> Result<Vec<Stack>> {
        let mut stacks = Vec::new();
        let mut next_token: Option<String> = None;

        loop {
            let resp = self
                .client
                .describe_stacks()
                .set_next_token(next_token.take())
                .send()
                .await
                .context("Failed to describe stacks")?;

            stacks.extend(
                resp.stacks()
                    .iter()
                    .filter_map(|s| self.convert(s))
                    .filter(|s| s.kind == kind && !s.status.is_deleted()),
            );

            match resp.next_token() {
                Some(token) => next_token = Some(token.to_string()),
                None => break,
            }
        }

        debug!(kind = %kind, count = stacks.len(), "Listed stacks");
        Ok(stacks)
    }
}

impl StackDeleter for CloudFormationStacks {
    async fn delete_stack(&self, name: &str) -> Result<()> {
        match self.client.delete_stack().stack_name(name).send().await {
            Ok(_) => Ok(()),
            Err(e) if classify_sdk_error(&e).is_not_found() => {
                debug!(stack = %name, "Stack already gone");
                Ok(())
            }
            Err(e) => Err(e).with_context(|| format!("Failed to delete stack {}", name)),
        }
    }
}

impl StackWaiter for CloudFormationStacks {
    async fn await_final_status(&self, name: &str) -> Result<Option<Stack>> {
        wait_for_resource(
            &self.wait,
            self.cancel.as_ref(),
            move || async move {
                Ok(match self.describe(name).await? {
                    None => Some(None),
                    Some(stack) if stack.status.is_terminal() => Some(Some(stack)),
                    Some(_) => None,
                })
            },
            name,
        )
        .await
    }
}
