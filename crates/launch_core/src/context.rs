//! Mutable state shared by all actions of one launch session

use crate::event::{Event, EventHandler};
use indexmap::IndexMap;
use serde::Serialize;
use std::collections::VecDeque;
use std::sync::Arc;

/// Runtime state threaded through every action execution
///
/// All mutation goes through the accessors below; the maps themselves are
/// never handed out mutably.
#[derive(Debug, Default)]
pub struct LaunchContext {
    /// Environment visible to launched processes and `$(env ...)`
    environment: IndexMap<String, String>,
    /// Launch configurations in insertion order
    launch_configurations: IndexMap<String, String>,
    /// Saved configurations for scoped groups
    launch_configurations_stack: Vec<IndexMap<String, String>>,
    /// Event being handled, bound only while its handlers run
    current_event: Option<Event>,
    /// Emitted events waiting to be dispatched
    pending_events: VecDeque<Event>,
    /// Handlers in registration order
    event_handlers: Vec<Arc<EventHandler>>,
    /// Set once the first shutdown event is dispatched
    shutdown_reason: Option<String>,
}

/// Serializable view of a context, used for reporting
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ContextSnapshot {
    pub launch_configurations: IndexMap<String, String>,
    pub environment: IndexMap<String, String>,
}

impl LaunchContext {
    /// Create a context with an empty environment
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a context seeded with the environment of this process
    pub fn from_process_env() -> Self {
        Self {
            environment: std::env::vars().collect(),
            ..Self::default()
        }
    }

    pub fn environment(&self) -> &IndexMap<String, String> {
        &self.environment
    }

    pub fn get_environment(&self, name: &str) -> Option<&str> {
        self.environment.get(name).map(String::as_str)
    }

    /// Set an environment variable, overwriting any previous value
    pub fn set_environment(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.environment.insert(name.into(), value.into());
    }

    /// Remove an environment variable, returning its previous value
    pub fn unset_environment(&mut self, name: &str) -> Option<String> {
        self.environment.shift_remove(name)
    }

    pub fn launch_configurations(&self) -> &IndexMap<String, String> {
        &self.launch_configurations
    }

    pub fn get_launch_configuration(&self, name: &str) -> Option<&str> {
        self.launch_configurations.get(name).map(String::as_str)
    }

    pub fn set_launch_configuration(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.launch_configurations.insert(name.into(), value.into());
    }

    /// Replace all launch configurations with exactly `keep`
    pub fn reset_launch_configurations(&mut self, keep: IndexMap<String, String>) {
        self.launch_configurations = keep;
    }

    /// Save the current launch configurations so a scope can modify them
    pub fn push_launch_configurations(&mut self) {
        self.launch_configurations_stack
            .push(self.launch_configurations.clone());
    }

    /// Restore the configurations saved by the matching push
    ///
    /// Returns false if there was nothing to restore.
    pub fn pop_launch_configurations(&mut self) -> bool {
        match self.launch_configurations_stack.pop() {
            Some(saved) => {
                self.launch_configurations = saved;
                true
            }
            None => false,
        }
    }

    /// Number of saved launch configuration scopes
    pub fn launch_configurations_depth(&self) -> usize {
        self.launch_configurations_stack.len()
    }

    /// Queue an event for dispatch
    ///
    /// Dispatch never happens inside this call; the launch service drains the
    /// queue in FIFO order once the current action or handler returns.
    pub fn emit_event(&mut self, event: Event) {
        log::debug!("emitting event: {}", event);
        self.pending_events.push_back(event);
    }

    pub fn pending_events(&self) -> impl Iterator<Item = &Event> {
        self.pending_events.iter()
    }

    pub fn take_pending_event(&mut self) -> Option<Event> {
        self.pending_events.pop_front()
    }

    pub fn current_event(&self) -> Option<&Event> {
        self.current_event.as_ref()
    }

    /// Run `f` with `event` bound as the current event
    ///
    /// The binding is cleared when `f` returns, whatever it returns, and the
    /// previous binding (if any) is restored.
    pub fn with_current_event<R>(&mut self, event: Event, f: impl FnOnce(&mut Self) -> R) -> R {
        let previous = self.current_event.replace(event);
        let result = f(self);
        self.current_event = previous;
        result
    }

    pub fn register_event_handler(&mut self, handler: Arc<EventHandler>) {
        self.event_handlers.push(handler);
    }

    /// Remove a previously registered handler; returns false if unknown
    pub fn unregister_event_handler(&mut self, handler: &Arc<EventHandler>) -> bool {
        let before = self.event_handlers.len();
        self.event_handlers.retain(|h| !Arc::ptr_eq(h, handler));
        self.event_handlers.len() < before
    }

    pub fn event_handlers(&self) -> &[Arc<EventHandler>] {
        &self.event_handlers
    }

    /// Handlers interested in `event`, in registration order
    pub fn handlers_for(&self, event: &Event) -> Vec<Arc<EventHandler>> {
        self.event_handlers
            .iter()
            .filter(|h| h.matches(event))
            .cloned()
            .collect()
    }

    pub fn is_shutdown(&self) -> bool {
        self.shutdown_reason.is_some()
    }

    pub fn shutdown_reason(&self) -> Option<&str> {
        self.shutdown_reason.as_deref()
    }

    pub(crate) fn mark_shutdown(&mut self, reason: impl Into<String>) {
        self.shutdown_reason = Some(reason.into());
    }

    pub fn snapshot(&self) -> ContextSnapshot {
        ContextSnapshot {
            launch_configurations: self.launch_configurations.clone(),
            environment: self.environment.clone(),
        }
    }
}
