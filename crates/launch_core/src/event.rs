//! Events and event handlers
//!
//! Events are immutable facts queued on the [`LaunchContext`](crate::LaunchContext).
//! The launch service pops them in FIFO order and runs the actions of every
//! registered [`EventHandler`] whose filter matches.

use crate::action::ActionRef;
use crate::introspection::{is_a_subclass, Class, HasClass, IntrospectionError, Object};
use std::fmt;

pub static EVENT: Class = Class::root("Event");
pub static PROCESS_EVENT: Class = Class::derived("ProcessEvent", &EVENT);
pub static PROCESS_STARTED: Class = Class::derived("ProcessStarted", &PROCESS_EVENT);
pub static PROCESS_EXITED: Class = Class::derived("ProcessExited", &PROCESS_EVENT);
pub static SHUTDOWN: Class = Class::derived("Shutdown", &EVENT);

/// Event raised by the launch system or delivered by a process supervisor
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// A managed process was started
    ProcessStarted { process_name: String, pid: u32 },
    /// A managed process exited
    ProcessExited {
        process_name: String,
        pid: Option<u32>,
        returncode: Option<i32>,
    },
    /// Shutdown of the launched system was requested
    Shutdown { reason: String, due_to_sigint: bool },
}

impl Event {
    /// Shorthand for a shutdown request not caused by a signal
    pub fn shutdown(reason: impl Into<String>) -> Self {
        Event::Shutdown {
            reason: reason.into(),
            due_to_sigint: false,
        }
    }

    /// Name of the process this event is about, if any
    pub fn process_name(&self) -> Option<&str> {
        match self {
            Event::ProcessStarted { process_name, .. }
            | Event::ProcessExited { process_name, .. } => Some(process_name.as_str()),
            Event::Shutdown { .. } => None,
        }
    }
}

impl HasClass for Event {
    fn class(&self) -> &'static Class {
        match self {
            Event::ProcessStarted { .. } => &PROCESS_STARTED,
            Event::ProcessExited { .. } => &PROCESS_EXITED,
            Event::Shutdown { .. } => &SHUTDOWN,
        }
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Event::ProcessStarted { process_name, pid } => {
                write!(f, "process[{}] started with pid {}", process_name, pid)
            }
            Event::ProcessExited {
                process_name,
                returncode,
                ..
            } => write!(f, "process[{}] exited with code {:?}", process_name, returncode),
            Event::Shutdown { reason, .. } => write!(f, "shutdown requested: {}", reason),
        }
    }
}

/// Reacts to a family of events by running a list of actions
#[derive(Debug)]
pub struct EventHandler {
    event_class: &'static Class,
    target_process: Option<String>,
    entities: Vec<ActionRef>,
}

impl EventHandler {
    /// Create a handler for every event of `event_class` (or a subclass)
    pub fn new(
        event_class: &'static Class,
        entities: Vec<ActionRef>,
    ) -> Result<Self, IntrospectionError> {
        if !is_a_subclass(Object::Class(event_class), Object::Class(&EVENT))? {
            return Err(IntrospectionError::NotAnEventClass(event_class.to_string()));
        }
        Ok(Self {
            event_class,
            target_process: None,
            entities,
        })
    }

    /// Run `entities` when a process exits (any process, or only `target`)
    pub fn on_process_exit(target: Option<String>, entities: Vec<ActionRef>) -> Self {
        Self {
            event_class: &PROCESS_EXITED,
            target_process: target,
            entities,
        }
    }

    /// Run `entities` when a process starts (any process, or only `target`)
    pub fn on_process_start(target: Option<String>, entities: Vec<ActionRef>) -> Self {
        Self {
            event_class: &PROCESS_STARTED,
            target_process: target,
            entities,
        }
    }

    /// Run `entities` when shutdown is requested
    pub fn on_shutdown(entities: Vec<ActionRef>) -> Self {
        Self {
            event_class: &SHUTDOWN,
            target_process: None,
            entities,
        }
    }

    /// Restrict the handler to events about one process
    pub fn with_target_process(mut self, process_name: impl Into<String>) -> Self {
        self.target_process = Some(process_name.into());
        self
    }

    pub fn event_class(&self) -> &'static Class {
        self.event_class
    }

    pub fn target_process(&self) -> Option<&str> {
        self.target_process.as_deref()
    }

    pub fn entities(&self) -> &[ActionRef] {
        &self.entities
    }

    /// Check whether this handler should react to `event`
    pub fn matches(&self, event: &Event) -> bool {
        if !event.class().is_subclass_of(self.event_class) {
            return false;
        }
        match (&self.target_process, event.process_name()) {
            (None, _) => true,
            (Some(target), Some(name)) => target == name,
            (Some(_), None) => false,
        }
    }
}
