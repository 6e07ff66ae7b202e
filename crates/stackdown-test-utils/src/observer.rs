//! Observer that keeps every event for later assertions

use stackdown_terminator::{TerminateError, TerminationObserver, TerminationStep};
use std::sync::Mutex;

/// A progress event, with steps rendered through `Display`
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    StepStarted(String),
    StepFinished { step: String, ok: bool },
    DeleteIssued(String),
    Awaiting(String),
    AlreadyDeleted(String),
    Suppressed(String),
    Ignored(String),
}

#[derive(Debug, Default)]
pub struct RecordingObserver {
    events: Mutex<Vec<Event>>,
}

impl RecordingObserver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<Event> {
        self.events.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }

    /// Steps that started, in order
    pub fn started_steps(&self) -> Vec<String> {
        self.events()
            .into_iter()
            .filter_map(|e| match e {
                Event::StepStarted(step) => Some(step),
                _ => None,
            })
            .collect()
    }

    fn push(&self, event: Event) {
        self.events
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(event);
    }
}

impl TerminationObserver for RecordingObserver {
    fn step_started(&self, step: &TerminationStep) {
        self.push(Event::StepStarted(step.to_string()));
    }

    fn step_finished(&self, step: &TerminationStep, result: &Result<(), TerminateError>) {
        self.push(Event::StepFinished {
            step: step.to_string(),
            ok: result.is_ok(),
        });
    }

    fn delete_issued(&self, stack: &str) {
        self.push(Event::DeleteIssued(stack.to_string()));
    }

    fn awaiting(&self, stack: &str) {
        self.push(Event::Awaiting(stack.to_string()));
    }

    fn already_deleted(&self, stack: &str) {
        self.push(Event::AlreadyDeleted(stack.to_string()));
    }

    fn suppressed(&self, stack: &str, _error: &anyhow::Error) {
        self.push(Event::Suppressed(stack.to_string()));
    }

    fn ignored(&self, stack: &str, _error: &anyhow::Error) {
        self.push(Event::Ignored(stack.to_string()));
    }
}
