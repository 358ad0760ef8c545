//! `log`: write a message to the launch log

use crate::action::{impl_action_class, Action, ActionParams, ExecuteResult, ParseAction, ACTION};
use crate::condition::Condition;
use crate::context::LaunchContext;
use crate::frontend::{Entity, ParseError, Parser};
use crate::introspection::Class;
use crate::substitution::{
    describe_substitutions, normalize_to_list_of_substitutions, perform_substitutions,
    SomeSubstitutions, Substitution,
};
use std::any::Any;

pub static LOG_INFO_ACTION: Class = Class::derived("LogInfo", &ACTION);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogInfoParams {
    pub base: ActionParams,
    pub message: Vec<Substitution>,
}

/// Logs a message at info level when executed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogInfo {
    base: ActionParams,
    message: Vec<Substitution>,
}

impl LogInfo {
    pub fn new(message: impl SomeSubstitutions) -> Self {
        Self {
            base: ActionParams::default(),
            message: normalize_to_list_of_substitutions(message),
        }
    }

    pub fn with_condition(mut self, condition: Condition) -> Self {
        self.base.condition = Some(condition);
        self
    }

    pub fn message(&self) -> &[Substitution] {
        &self.message
    }
}

impl_action_class!(LogInfo, LOG_INFO_ACTION);

impl Action for LogInfo {
    fn condition(&self) -> Option<&Condition> {
        self.base.condition.as_ref()
    }

    fn execute(&self, context: &mut LaunchContext) -> ExecuteResult {
        let message = perform_substitutions(context, &self.message)?;
        log::info!(target: "launch.user", "{}", message);
        Ok(None)
    }

    fn describe(&self) -> String {
        format!("log \"{}\"", describe_substitutions(&self.message))
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

impl ParseAction for LogInfo {
    type Params = LogInfoParams;

    fn action_class() -> &'static Class {
        &LOG_INFO_ACTION
    }

    fn parse(entity: &dyn Entity, parser: &Parser) -> Result<Self::Params, ParseError> {
        let base = ActionParams::parse(entity, parser)?;
        Ok(LogInfoParams {
            base,
            message: parser.parse_substitution(&entity.get_text("message")?)?,
        })
    }

    fn from_params(params: Self::Params) -> Self {
        Self {
            base: params.base,
            message: params.message,
        }
    }
}
