//! Action framework: the parse → construct → execute lifecycle

use crate::condition::Condition;
use crate::context::LaunchContext;
use crate::frontend::{Entity, ParseError, Parser};
use crate::introspection::{Class, HasClass, IntrospectionError};
use crate::substitution::ResolutionError;
use std::any::Any;
use std::fmt;
use std::sync::Arc;

/// Root of the action class hierarchy
pub static ACTION: Class = Class::root("Action");

/// Shared handle to an action
pub type ActionRef = Arc<dyn Action>;

/// Outcome of executing an action: optionally more actions to visit next
pub type ExecuteResult = Result<Option<Vec<ActionRef>>, ActionError>;

/// An executable unit of a launch description
///
/// Fields are stored unresolved; textual resolution happens only inside
/// [`Action::execute`], and implementations resolve every field before they
/// touch the context.
pub trait Action: HasClass + fmt::Debug + Send + Sync {
    /// Condition deciding whether [`Action::visit`] executes the action
    fn condition(&self) -> Option<&Condition> {
        None
    }

    /// Perform the side effect of this action
    fn execute(&self, context: &mut LaunchContext) -> ExecuteResult;

    /// Evaluate the condition and execute the action if it holds
    fn visit(&self, context: &mut LaunchContext) -> ExecuteResult {
        if let Some(condition) = self.condition() {
            if !condition.evaluate(context)? {
                log::debug!("skipping {}: condition not met", self.class());
                return Ok(None);
            }
        }
        self.execute(context)
    }

    /// Short human-readable form, used by dry runs
    fn describe(&self) -> String {
        self.class().name().to_string()
    }

    /// Access the concrete action type
    fn as_any(&self) -> &dyn Any;
}

/// Parameters every action accepts, extended by each action kind
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ActionParams {
    pub condition: Option<Condition>,
}

impl ActionParams {
    /// Read the attributes shared by all actions (`if` / `unless`)
    pub fn parse(entity: &dyn Entity, parser: &Parser) -> Result<Self, ParseError> {
        let if_attr = entity.get_optional_text("if")?;
        let unless_attr = entity.get_optional_text("unless")?;
        let condition = match (if_attr, unless_attr) {
            (Some(_), Some(_)) => {
                return Err(ParseError::InvalidValue {
                    entity: entity.type_name().to_string(),
                    attribute: "if".to_string(),
                    reason: "'if' and 'unless' are mutually exclusive".to_string(),
                });
            }
            (Some(expr), None) => Some(Condition::If(parser.parse_substitution(&expr)?)),
            (None, Some(expr)) => Some(Condition::Unless(parser.parse_substitution(&expr)?)),
            (None, None) => None,
        };
        Ok(Self { condition })
    }
}

/// An action kind that can be built from a frontend entity
pub trait ParseAction: Action + Sized + 'static {
    /// Parameters produced by [`ParseAction::parse`]
    type Params;

    /// Class of this action kind, without an instance at hand
    fn action_class() -> &'static Class;

    /// Extract the parameters of this action from `entity`
    fn parse(entity: &dyn Entity, parser: &Parser) -> Result<Self::Params, ParseError>;

    /// Construct the action from parsed parameters
    fn from_params(params: Self::Params) -> Self;
}

/// Errors raised while executing an action
#[derive(Debug, thiserror::Error)]
pub enum ActionError {
    #[error("Substitution failed: {0}")]
    Resolution(#[from] ResolutionError),

    #[error("Required launch argument '{0}' was not provided")]
    MissingArgument(String),

    #[error("No launch configuration scope to restore")]
    UnbalancedScope,

    #[error("Introspection error: {0}")]
    Introspection(#[from] IntrospectionError),
}

/// Implement [`HasClass`] for an action type
macro_rules! impl_action_class {
    ($ty:ty, $class:expr) => {
        impl $crate::introspection::HasClass for $ty {
            fn class(&self) -> &'static $crate::introspection::Class {
                &$class
            }
        }
    };
}

pub(crate) use impl_action_class;
