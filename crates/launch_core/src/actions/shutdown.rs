//! `shutdown`: request shutdown of the launched system

use super::emit_event::{EmitEvent, EMIT_EVENT_ACTION};
use crate::action::{impl_action_class, Action, ActionParams, ExecuteResult, ParseAction};
use crate::condition::Condition;
use crate::context::LaunchContext;
use crate::event::Event;
use crate::frontend::{Entity, ParseError, Parser};
use crate::introspection::Class;
use crate::substitution::{
    describe_substitutions, normalize_to_list_of_substitutions, perform_substitutions,
    SomeSubstitutions, Substitution,
};
use std::any::Any;

pub static SHUTDOWN_ACTION: Class = Class::derived("Shutdown", &EMIT_EVENT_ACTION);

const DEFAULT_REASON: &str = "reason not given";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShutdownParams {
    pub base: ActionParams,
    pub reason: Vec<Substitution>,
}

/// Emits a [`Event::Shutdown`] carrying the resolved reason
///
/// When run by a handler reacting to a process exit, the exit is logged as
/// the cause first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Shutdown {
    base: ActionParams,
    reason: Vec<Substitution>,
}

impl Shutdown {
    pub fn new() -> Self {
        Self::with_reason(DEFAULT_REASON)
    }

    pub fn with_reason(reason: impl SomeSubstitutions) -> Self {
        Self {
            base: ActionParams::default(),
            reason: normalize_to_list_of_substitutions(reason),
        }
    }

    pub fn with_condition(mut self, condition: Condition) -> Self {
        self.base.condition = Some(condition);
        self
    }

    pub fn reason(&self) -> &[Substitution] {
        &self.reason
    }
}

impl Default for Shutdown {
    fn default() -> Self {
        Self::new()
    }
}

impl_action_class!(Shutdown, SHUTDOWN_ACTION);

impl Action for Shutdown {
    fn condition(&self) -> Option<&Condition> {
        self.base.condition.as_ref()
    }

    fn execute(&self, context: &mut LaunchContext) -> ExecuteResult {
        let reason = perform_substitutions(context, &self.reason)?;
        if let Some(Event::ProcessExited { process_name, .. }) = context.current_event() {
            log::info!(
                "process[{}] was required: shutting down launched system",
                process_name
            );
        }
        EmitEvent::new(Event::shutdown(reason)).execute(context)
    }

    fn describe(&self) -> String {
        format!("shutdown \"{}\"", describe_substitutions(&self.reason))
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

impl ParseAction for Shutdown {
    type Params = ShutdownParams;

    fn action_class() -> &'static Class {
        &SHUTDOWN_ACTION
    }

    fn parse(entity: &dyn Entity, parser: &Parser) -> Result<Self::Params, ParseError> {
        let base = ActionParams::parse(entity, parser)?;
        let reason = match entity.get_optional_text("reason")? {
            Some(text) => parser.parse_substitution(&text)?,
            None => vec![Substitution::text(DEFAULT_REASON)],
        };
        Ok(ShutdownParams { base, reason })
    }

    fn from_params(params: Self::Params) -> Self {
        Self {
            base: params.base,
            reason: params.reason,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::action::ACTION;
    use crate::introspection::{is_a, is_a_subclass, Object};

    #[test]
    fn test_default_reason() {
        let mut ctx = LaunchContext::new();
        Shutdown::new().execute(&mut ctx).unwrap();

        let pending: Vec<&Event> = ctx.pending_events().collect();
        assert_eq!(pending, vec![&Event::shutdown("reason not given")]);
    }

    #[test]
    fn test_reason_is_resolved() {
        let mut ctx = LaunchContext::new();
        ctx.set_launch_configuration("why", "done");
        Shutdown::with_reason(vec![
            Substitution::text("work "),
            Substitution::launch_configuration("why"),
        ])
        .execute(&mut ctx)
        .unwrap();

        assert_eq!(ctx.take_pending_event(), Some(Event::shutdown("work done")));
    }

    #[test]
    fn test_is_an_emit_event_action() {
        let action = Shutdown::new();
        assert!(is_a_subclass(Object::of(&action), Object::Class(&EMIT_EVENT_ACTION)).unwrap());
        assert!(is_a_subclass(Object::Class(&SHUTDOWN_ACTION), Object::Class(&ACTION)).unwrap());
        assert!(is_a(Object::of(&action), Object::Class(&ACTION)).unwrap());
    }
}
