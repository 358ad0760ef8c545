//! `set_env`: set an environment variable in the launch context

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

pub static SET_ENVIRONMENT_VARIABLE_ACTION: Class =
    Class::derived("SetEnvironmentVariable", &ACTION);

/// Parameters of [`SetEnvironmentVariable`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SetEnvironmentVariableParams {
    pub base: ActionParams,
    pub name: Vec<Substitution>,
    pub value: Vec<Substitution>,
}

/// Sets an environment variable, overwriting any previous value
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SetEnvironmentVariable {
    base: ActionParams,
    name: Vec<Substitution>,
    value: Vec<Substitution>,
}

impl SetEnvironmentVariable {
    pub fn new(name: impl SomeSubstitutions, value: impl SomeSubstitutions) -> Self {
        Self {
            base: ActionParams::default(),
            name: normalize_to_list_of_substitutions(name),
            value: normalize_to_list_of_substitutions(value),
        }
    }

    pub fn with_condition(mut self, condition: Condition) -> Self {
        self.base.condition = Some(condition);
        self
    }

    pub fn name(&self) -> &[Substitution] {
        &self.name
    }

    pub fn value(&self) -> &[Substitution] {
        &self.value
    }
}

impl_action_class!(SetEnvironmentVariable, SET_ENVIRONMENT_VARIABLE_ACTION);

impl Action for SetEnvironmentVariable {
    fn condition(&self) -> Option<&Condition> {
        self.base.condition.as_ref()
    }

    fn execute(&self, context: &mut LaunchContext) -> ExecuteResult {
        let name = perform_substitutions(context, &self.name)?;
        let value = perform_substitutions(context, &self.value)?;
        log::debug!("setting environment variable {}={}", name, value);
        context.set_environment(name, value);
        Ok(None)
    }

    fn describe(&self) -> String {
        format!(
            "set_env {}={}",
            describe_substitutions(&self.name),
            describe_substitutions(&self.value)
        )
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

impl ParseAction for SetEnvironmentVariable {
    type Params = SetEnvironmentVariableParams;

    fn action_class() -> &'static Class {
        &SET_ENVIRONMENT_VARIABLE_ACTION
    }

    fn parse(entity: &dyn Entity, parser: &Parser) -> Result<Self::Params, ParseError> {
        let base = ActionParams::parse(entity, parser)?;
        Ok(SetEnvironmentVariableParams {
            base,
            name: parser.parse_substitution(&entity.get_text("name")?)?,
            value: parser.parse_substitution(&entity.get_text("value")?)?,
        })
    }

    fn from_params(params: Self::Params) -> Self {
        Self {
            base: params.base,
            name: params.name,
            value: params.value,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::substitution::ResolutionError;
    use crate::ActionError;

    #[test]
    fn test_sets_resolved_value() {
        let mut ctx = LaunchContext::new();
        ctx.set_launch_configuration("suffix", "bar");
        let action = SetEnvironmentVariable::new(
            vec![Substitution::text("FOO_"), Substitution::launch_configuration("suffix")],
            "value",
        );

        action.execute(&mut ctx).unwrap();
        assert_eq!(ctx.get_environment("FOO_bar"), Some("value"));
    }

    #[test]
    fn test_overwrites_previous_value() {
        let mut ctx = LaunchContext::new();
        ctx.set_environment("FOO", "old");

        SetEnvironmentVariable::new("FOO", "new").execute(&mut ctx).unwrap();
        assert_eq!(ctx.get_environment("FOO"), Some("new"));
    }

    #[test]
    fn test_resolution_error_leaves_context_untouched() {
        let mut ctx = LaunchContext::new();
        let action =
            SetEnvironmentVariable::new("FOO", Substitution::launch_configuration("missing"));

        let err = action.execute(&mut ctx).unwrap_err();
        assert!(matches!(
            err,
            ActionError::Resolution(ResolutionError::UndefinedLaunchConfiguration(ref key)) if key == "missing"
        ));
        assert!(ctx.environment().is_empty());
    }

    #[test]
    fn test_condition_skips_execution() {
        let mut ctx = LaunchContext::new();
        let action = SetEnvironmentVariable::new("FOO", "bar")
            .with_condition(Condition::if_true("false"));

        assert!(action.visit(&mut ctx).unwrap().is_none());
        assert!(ctx.get_environment("FOO").is_none());
    }
}
