//! Register and unregister event handlers from within a launch description

use crate::action::{impl_action_class, Action, ActionParams, ExecuteResult, ACTION};
use crate::condition::Condition;
use crate::context::LaunchContext;
use crate::event::EventHandler;
use crate::introspection::Class;
use std::any::Any;
use std::sync::Arc;

pub static REGISTER_EVENT_HANDLER_ACTION: Class = Class::derived("RegisterEventHandler", &ACTION);
pub static UNREGISTER_EVENT_HANDLER_ACTION: Class =
    Class::derived("UnregisterEventHandler", &ACTION);

/// Adds a handler to the context when executed
#[derive(Debug, Clone)]
pub struct RegisterEventHandler {
    base: ActionParams,
    handler: Arc<EventHandler>,
}

impl RegisterEventHandler {
    pub fn new(handler: impl Into<Arc<EventHandler>>) -> Self {
        Self {
            base: ActionParams::default(),
            handler: handler.into(),
        }
    }

    pub fn with_condition(mut self, condition: Condition) -> Self {
        self.base.condition = Some(condition);
        self
    }

    /// Handle to the registered handler, usable with [`UnregisterEventHandler`]
    pub fn handler(&self) -> &Arc<EventHandler> {
        &self.handler
    }
}

impl_action_class!(RegisterEventHandler, REGISTER_EVENT_HANDLER_ACTION);

impl Action for RegisterEventHandler {
    fn condition(&self) -> Option<&Condition> {
        self.base.condition.as_ref()
    }

    fn execute(&self, context: &mut LaunchContext) -> ExecuteResult {
        context.register_event_handler(Arc::clone(&self.handler));
        Ok(None)
    }

    fn describe(&self) -> String {
        format!("on {} register handler", self.handler.event_class())
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// Removes a previously registered handler
///
/// Unregistering a handler that is not registered is a no-op.
#[derive(Debug, Clone)]
pub struct UnregisterEventHandler {
    base: ActionParams,
    handler: Arc<EventHandler>,
}

impl UnregisterEventHandler {
    pub fn new(handler: Arc<EventHandler>) -> Self {
        Self {
            base: ActionParams::default(),
            handler,
        }
    }

    pub fn with_condition(mut self, condition: Condition) -> Self {
        self.base.condition = Some(condition);
        self
    }
}

impl_action_class!(UnregisterEventHandler, UNREGISTER_EVENT_HANDLER_ACTION);

impl Action for UnregisterEventHandler {
    fn condition(&self) -> Option<&Condition> {
        self.base.condition.as_ref()
    }

    fn execute(&self, context: &mut LaunchContext) -> ExecuteResult {
        if !context.unregister_event_handler(&self.handler) {
            log::debug!(
                "handler for {} was not registered",
                self.handler.event_class()
            );
        }
        Ok(None)
    }

    fn describe(&self) -> String {
        format!("on {} unregister handler", self.handler.event_class())
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::actions::Shutdown;

    #[test]
    fn test_register_then_unregister() {
        let mut ctx = LaunchContext::new();
        let register = RegisterEventHandler::new(EventHandler::on_process_exit(
            None,
            vec![Arc::new(Shutdown::new())],
        ));
        register.execute(&mut ctx).unwrap();
        assert_eq!(ctx.event_handlers().len(), 1);

        let unregister = UnregisterEventHandler::new(Arc::clone(register.handler()));
        unregister.execute(&mut ctx).unwrap();
        assert!(ctx.event_handlers().is_empty());

        // second removal is a no-op
        unregister.execute(&mut ctx).unwrap();
    }
}
