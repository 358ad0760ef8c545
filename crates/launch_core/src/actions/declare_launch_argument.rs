//! `arg`: declare a launch argument with an optional default

use crate::action::{
    impl_action_class, Action, ActionError, ActionParams, ExecuteResult, ParseAction, ACTION,
};
use crate::condition::Condition;
use crate::context::LaunchContext;
use crate::frontend::{Entity, ParseError, Parser};
use crate::introspection::Class;
use crate::substitution::{
    describe_substitutions, normalize_to_list_of_substitutions, perform_substitutions,
    SomeSubstitutions, Substitution,
};
use std::any::Any;

pub static DECLARE_LAUNCH_ARGUMENT_ACTION: Class =
    Class::derived("DeclareLaunchArgument", &ACTION);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeclareLaunchArgumentParams {
    pub base: ActionParams,
    pub name: Vec<Substitution>,
    pub default_value: Option<Vec<Substitution>>,
    pub description: Option<Vec<Substitution>>,
}

/// Declares a launch argument
///
/// A value provided from outside (e.g. `-a name:=value`) wins; otherwise the
/// default is resolved and stored. Without either, execution fails.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeclareLaunchArgument {
    base: ActionParams,
    name: Vec<Substitution>,
    default_value: Option<Vec<Substitution>>,
    description: Option<Vec<Substitution>>,
}

impl DeclareLaunchArgument {
    pub fn new(name: impl SomeSubstitutions) -> Self {
        Self {
            base: ActionParams::default(),
            name: normalize_to_list_of_substitutions(name),
            default_value: None,
            description: None,
        }
    }

    pub fn with_default(mut self, default_value: impl SomeSubstitutions) -> Self {
        self.default_value = Some(normalize_to_list_of_substitutions(default_value));
        self
    }

    pub fn with_description(mut self, description: impl SomeSubstitutions) -> Self {
        self.description = Some(normalize_to_list_of_substitutions(description));
        self
    }

    pub fn name(&self) -> &[Substitution] {
        &self.name
    }

    pub fn default_value(&self) -> Option<&[Substitution]> {
        self.default_value.as_deref()
    }

    pub fn description(&self) -> Option<&[Substitution]> {
        self.description.as_deref()
    }
}

impl_action_class!(DeclareLaunchArgument, DECLARE_LAUNCH_ARGUMENT_ACTION);

impl Action for DeclareLaunchArgument {
    fn condition(&self) -> Option<&Condition> {
        self.base.condition.as_ref()
    }

    fn execute(&self, context: &mut LaunchContext) -> ExecuteResult {
        let name = perform_substitutions(context, &self.name)?;
        if context.get_launch_configuration(&name).is_some() {
            return Ok(None);
        }
        match &self.default_value {
            Some(default_value) => {
                let value = perform_substitutions(context, default_value)?;
                context.set_launch_configuration(name, value);
                Ok(None)
            }
            None => Err(ActionError::MissingArgument(name)),
        }
    }

    fn describe(&self) -> String {
        let name = describe_substitutions(&self.name);
        match &self.default_value {
            Some(default_value) => format!(
                "arg {} (default: {})",
                name,
                describe_substitutions(default_value)
            ),
            None => format!("arg {}", name),
        }
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

impl ParseAction for DeclareLaunchArgument {
    type Params = DeclareLaunchArgumentParams;

    fn action_class() -> &'static Class {
        &DECLARE_LAUNCH_ARGUMENT_ACTION
    }

    fn parse(entity: &dyn Entity, parser: &Parser) -> Result<Self::Params, ParseError> {
        let base = ActionParams::parse(entity, parser)?;
        let name = parser.parse_substitution(&entity.get_text("name")?)?;
        let default_value = match entity.get_optional_text("default")? {
            Some(text) => Some(parser.parse_substitution(&text)?),
            None => None,
        };
        let description = match entity.get_optional_text("description")? {
            Some(text) => Some(parser.parse_substitution(&text)?),
            None => None,
        };
        Ok(DeclareLaunchArgumentParams {
            base,
            name,
            default_value,
            description,
        })
    }

    fn from_params(params: Self::Params) -> Self {
        Self {
            base: params.base,
            name: params.name,
            default_value: params.default_value,
            description: params.description,
        }
    }
}
