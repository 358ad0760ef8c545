//! Queue an event on the launch context

use crate::action::{impl_action_class, Action, ActionParams, ExecuteResult, ACTION};
use crate::condition::Condition;
use crate::context::LaunchContext;
use crate::event::Event;
use crate::introspection::{Class, HasClass};
use std::any::Any;

pub static EMIT_EVENT_ACTION: Class = Class::derived("EmitEvent", &ACTION);

/// Emits a fixed event when executed
///
/// The event is queued; handlers run after this action returns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmitEvent {
    base: ActionParams,
    event: Event,
}

impl EmitEvent {
    pub fn new(event: Event) -> Self {
        Self {
            base: ActionParams::default(),
            event,
        }
    }

    pub fn with_condition(mut self, condition: Condition) -> Self {
        self.base.condition = Some(condition);
        self
    }

    pub fn event(&self) -> &Event {
        &self.event
    }
}

impl_action_class!(EmitEvent, EMIT_EVENT_ACTION);

impl Action for EmitEvent {
    fn condition(&self) -> Option<&Condition> {
        self.base.condition.as_ref()
    }

    fn execute(&self, context: &mut LaunchContext) -> ExecuteResult {
        context.emit_event(self.event.clone());
        Ok(None)
    }

    fn describe(&self) -> String {
        format!("emit {}", self.event.class())
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}
