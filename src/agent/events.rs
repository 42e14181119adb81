//! Event recording facility handed to agents through the run context.
//!
//! [`TracingRecorder`] is the process default: every event becomes a
//! structured `tracing` record tagged with the component and run identity.
//! [`MemoryRecorder`] keeps events in memory for inspection.

use std::sync::Mutex;

use chrono::{DateTime, Utc};
use uuid::Uuid;

/// Severity of a recorded event, mirroring Kubernetes event types.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EventType {
    Normal,
    Warning,
}

/// A single recorded event.
#[derive(Clone, Debug)]
pub struct Event {
    pub event_type: EventType,
    /// Short CamelCase machine-readable reason, e.g. `AddonStarted`.
    pub reason: String,
    pub message: String,
    pub timestamp: DateTime<Utc>,
}

pub trait EventRecorder: Send + Sync {
    fn record(&self, event: Event);

    fn normal(&self, reason: &str, message: &str) {
        self.record(Event {
            event_type: EventType::Normal,
            reason: reason.to_string(),
            message: message.to_string(),
            timestamp: Utc::now(),
        });
    }

    fn warning(&self, reason: &str, message: &str) {
        self.record(Event {
            event_type: EventType::Warning,
            reason: reason.to_string(),
            message: message.to_string(),
            timestamp: Utc::now(),
        });
    }
}

/// Writes events to the `tracing` subscriber.
pub struct TracingRecorder {
    component: String,
    run_id: String,
}

impl TracingRecorder {
    /// Create a recorder for `component` with a fresh run identity.
    pub fn new(component: impl Into<String>) -> Self {
        Self {
            component: component.into(),
            run_id: Uuid::new_v4().to_string(),
        }
    }

    pub fn run_id(&self) -> &str {
        &self.run_id
    }
}

impl EventRecorder for TracingRecorder {
    fn record(&self, event: Event) {
        let timestamp = event.timestamp.to_rfc3339();
        match event.event_type {
            EventType::Normal => tracing::info!(
                component = %self.component,
                run_id = %self.run_id,
                reason = %event.reason,
                %timestamp,
                "{}",
                event.message
            ),
            EventType::Warning => tracing::warn!(
                component = %self.component,
                run_id = %self.run_id,
                reason = %event.reason,
                %timestamp,
                "{}",
                event.message
            ),
        }
    }
}

/// Keeps every recorded event in order.
#[derive(Default)]
pub struct MemoryRecorder {
    events: Mutex<Vec<Event>>,
}

impl MemoryRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of all events recorded so far.
    pub fn events(&self) -> Vec<Event> {
        self.events
            .lock()
            .map(|events| events.clone())
            .unwrap_or_default()
    }

    /// Reasons of all recorded events, in recording order.
    pub fn reasons(&self) -> Vec<String> {
        self.events().into_iter().map(|e| e.reason).collect()
    }
}

impl EventRecorder for MemoryRecorder {
    fn record(&self, event: Event) {
        if let Ok(mut events) = self.events.lock() {
            events.push(event);
        }
    }
}
