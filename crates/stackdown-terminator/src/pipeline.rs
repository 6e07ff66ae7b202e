//! Sequential step executor
//!
//! Steps run one at a time in the order given. The first failure stops the
//! pipeline and is returned exactly as the step produced it. Nothing already
//! deleted is restored: teardown only moves forward, and re-running a
//! pipeline after a partial failure is safe because deleted stacks no longer
//! show up in listings and resolve to "absent" when awaited.

use crate::collaborators::{RolesetManager, StackManager};
use crate::error::TerminateError;
use crate::observer::{TRACING_OBSERVER, TerminationObserver};
use crate::steps::TerminationStep;

/// Read-only configuration and collaborators shared by every step of a run
pub struct TerminationContext<'a, S, R> {
    namespace: String,
    stacks: &'a S,
    rolesets: &'a R,
    observer: &'a dyn TerminationObserver,
}

impl<'a, S, R> TerminationContext<'a, S, R> {
    /// Create a context reporting through `tracing`
    pub fn new(namespace: impl Into<String>, stacks: &'a S, rolesets: &'a R) -> Self {
        Self {
            namespace: namespace.into(),
            stacks,
            rolesets,
            observer: &TRACING_OBSERVER,
        }
    }

    /// Replace the observer
    pub fn with_observer(mut self, observer: &'a dyn TerminationObserver) -> Self {
        self.observer = observer;
        self
    }

    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    pub fn stacks(&self) -> &'a S {
        self.stacks
    }

    pub fn rolesets(&self) -> &'a R {
        self.rolesets
    }

    pub fn observer(&self) -> &'a dyn TerminationObserver {
        self.observer
    }
}

/// An ordered list of steps bound to a context
pub struct Pipeline<'a, S, R> {
    ctx: TerminationContext<'a, S, R>,
    steps: Vec<TerminationStep>,
}

impl<'a, S, R> Pipeline<'a, S, R>
where
    S: StackManager,
    R: RolesetManager,
{
    pub fn new(ctx: TerminationContext<'a, S, R>) -> Self {
        Self {
            ctx,
            steps: Vec::new(),
        }
    }

    /// Append a step
    pub fn step(mut self, step: TerminationStep) -> Self {
        self.steps.push(step);
        self
    }

    pub fn steps(&self) -> &[TerminationStep] {
        &self.steps
    }

    /// Run every step in order, stopping at the first failure
    pub async fn run(&self) -> Result<(), TerminateError> {
        let observer = self.ctx.observer();

        for step in &self.steps {
            observer.step_started(step);
            let result = step.execute(&self.ctx).await;
            observer.step_finished(step, &result);
            result?;
        }

        Ok(())
    }
}
