//! In-memory stack provider and roleset manager
//!
//! `FakeCloud` behaves like a small, well-mannered CloudFormation:
//!
//! - listing returns every live stack of a kind, across environments
//! - deleting a live stack removes it, unless a final status was pinned with
//!   [`FakeCloud::with_final_status`], in which case it stays live with that
//!   status (a stuck `DELETE_FAILED`, say)
//! - deleting an absent stack succeeds
//! - waiting returns the stack's current state, or `None` once it is gone
//!
//! Every call is appended to an ordered log for assertions.

use anyhow::{Result, bail};
use stackdown_common::{Stack, StackKind, StackStatus};
use stackdown_terminator::{RolesetManager, StackDeleter, StackLister, StackWaiter};
use std::collections::{HashMap, HashSet};
use std::sync::{Mutex, MutexGuard};

/// A collaborator call, in the order it was made
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    List(StackKind),
    Delete(String),
    Wait(String),
    DeleteEnvironmentRoleset(String),
    DeleteServiceRoleset { environment: String, service: String },
}

#[derive(Default)]
struct State {
    stacks: Vec<Stack>,
    final_status: HashMap<String, (String, Option<String>)>,
    failing_deletes: HashMap<String, String>,
    failing_lists: HashSet<StackKind>,
    failing_waits: HashSet<String>,
    failing_rolesets: HashSet<String>,
    rolesets: HashSet<String>,
    calls: Vec<Call>,
}

/// In-memory cloud for workflow tests
#[derive(Default)]
pub struct FakeCloud {
    state: Mutex<State>,
}

fn environment_roleset_key(environment: &str) -> String {
    format!("environment/{}", environment)
}

fn service_roleset_key(environment: &str, service: &str) -> String {
    format!("service/{}/{}", service, environment)
}

impl FakeCloud {
    pub fn new() -> Self {
        Self::default()
    }

    fn state(&self) -> MutexGuard<'_, State> {
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Add a live stack
    pub fn with_stack(self, stack: Stack) -> Self {
        self.state().stacks.push(stack);
        self
    }

    /// Pin the status a stack reports after a delete request
    pub fn with_final_status(self, name: &str, status: &str, reason: Option<&str>) -> Self {
        self.state().final_status.insert(
            name.to_string(),
            (status.to_string(), reason.map(str::to_string)),
        );
        self
    }

    /// Make deleting `name` fail with `message`
    pub fn with_failing_delete(self, name: &str, message: &str) -> Self {
        self.state()
            .failing_deletes
            .insert(name.to_string(), message.to_string());
        self
    }

    /// Make listing `kind` fail
    pub fn with_failing_list(self, kind: StackKind) -> Self {
        self.state().failing_lists.insert(kind);
        self
    }

    /// Make waiting on `name` fail
    pub fn with_failing_wait(self, name: &str) -> Self {
        self.state().failing_waits.insert(name.to_string());
        self
    }

    /// Add an environment roleset
    pub fn with_environment_roleset(self, environment: &str) -> Self {
        self.state()
            .rolesets
            .insert(environment_roleset_key(environment));
        self
    }

    /// Add a service roleset
    pub fn with_service_roleset(self, environment: &str, service: &str) -> Self {
        self.state()
            .rolesets
            .insert(service_roleset_key(environment, service));
        self
    }

    /// Make deleting the environment roleset fail
    pub fn with_failing_environment_roleset(self, environment: &str) -> Self {
        self.state()
            .failing_rolesets
            .insert(environment_roleset_key(environment));
        self
    }

    /// Make deleting a service roleset fail
    pub fn with_failing_service_roleset(self, environment: &str, service: &str) -> Self {
        self.state()
            .failing_rolesets
            .insert(service_roleset_key(environment, service));
        self
    }

    /// Forget a pinned final status so the next delete succeeds
    pub fn clear_final_status(&self, name: &str) {
        self.state().final_status.remove(name);
    }

    /// Every call made so far, oldest first
    pub fn calls(&self) -> Vec<Call> {
        self.state().calls.clone()
    }

    /// Names passed to `delete_stack`, oldest first
    pub fn deletes(&self) -> Vec<String> {
        self.state()
            .calls
            .iter()
            .filter_map(|c| match c {
                Call::Delete(name) => Some(name.clone()),
                _ => None,
            })
            .collect()
    }

    /// Position of the first delete of `name` in the call log
    pub fn delete_position(&self, name: &str) -> Option<usize> {
        self.state()
            .calls
            .iter()
            .position(|c| matches!(c, Call::Delete(n) if n == name))
    }

    pub fn is_live(&self, name: &str) -> bool {
        self.state().stacks.iter().any(|s| s.name == name)
    }

    pub fn live_stacks(&self) -> Vec<String> {
        self.state().stacks.iter().map(|s| s.name.clone()).collect()
    }

    pub fn has_environment_roleset(&self, environment: &str) -> bool {
        self.state()
            .rolesets
            .contains(&environment_roleset_key(environment))
    }

    pub fn has_service_roleset(&self, environment: &str, service: &str) -> bool {
        self.state()
            .rolesets
            .contains(&service_roleset_key(environment, service))
    }

    fn delete_roleset(&self, key: String, call: Call) -> Result<()> {
        let mut state = self.state();
        state.calls.push(call);
        if state.failing_rolesets.contains(&key) {
            bail!("roleset {} is still attached", key);
        }
        state.rolesets.remove(&key);
        Ok(())
    }
}

impl StackLister for FakeCloud {
    async fn list_stacks(&self, kind: StackKind) -> Result<Vec<Stack>> {
        let mut state = self.state();
        state.calls.push(Call::List(kind));
        if state.failing_lists.contains(&kind) {
            bail!("listing {} stacks failed", kind);
        }
        Ok(state
            .stacks
            .iter()
            .filter(|s| s.kind == kind)
            .cloned()
            .collect())
    }
}

impl StackDeleter for FakeCloud {
    async fn delete_stack(&self, name: &str) -> Result<()> {
        let mut state = self.state();
        state.calls.push(Call::Delete(name.to_string()));
        if let Some(message) = state.failing_deletes.get(name) {
            bail!("{}", message);
        }

        match state.final_status.get(name).cloned() {
            Some((status, reason)) => {
                if let Some(stack) = state.stacks.iter_mut().find(|s| s.name == name) {
                    stack.status = StackStatus::new(status);
                    stack.status_reason = reason;
                }
            }
            None => state.stacks.retain(|s| s.name != name),
        }
        Ok(())
    }
}

impl StackWaiter for FakeCloud {
    async fn await_final_status(&self, name: &str) -> Result<Option<Stack>> {
        let mut state = self.state();
        state.calls.push(Call::Wait(name.to_string()));
        if state.failing_waits.contains(name) {
            bail!("timed out waiting for {}", name);
        }
        Ok(state.stacks.iter().find(|s| s.name == name).cloned())
    }
}

impl RolesetManager for FakeCloud {
    async fn delete_environment_roleset(&self, environment: &str) -> Result<()> {
        self.delete_roleset(
            environment_roleset_key(environment),
            Call::DeleteEnvironmentRoleset(environment.to_string()),
        )
    }

    async fn delete_service_roleset(&self, environment: &str, service: &str) -> Result<()> {
        self.delete_roleset(
            service_roleset_key(environment, service),
            Call::DeleteServiceRoleset {
                environment: environment.to_string(),
                service: service.to_string(),
            },
        )
    }
}
