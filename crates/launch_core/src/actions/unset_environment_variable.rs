//! `unset_env`: remove an environment variable if it is set

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

pub static UNSET_ENVIRONMENT_VARIABLE_ACTION: Class =
    Class::derived("UnsetEnvironmentVariable", &ACTION);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnsetEnvironmentVariableParams {
    pub base: ActionParams,
    pub name: Vec<Substitution>,
}

/// Unsets an environment variable; an absent variable is left alone
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnsetEnvironmentVariable {
    base: ActionParams,
    name: Vec<Substitution>,
}

impl UnsetEnvironmentVariable {
    pub fn new(name: impl SomeSubstitutions) -> Self {
        Self {
            base: ActionParams::default(),
            name: normalize_to_list_of_substitutions(name),
        }
    }

    pub fn with_condition(mut self, condition: Condition) -> Self {
        self.base.condition = Some(condition);
        self
    }

    pub fn name(&self) -> &[Substitution] {
        &self.name
    }
}

impl_action_class!(UnsetEnvironmentVariable, UNSET_ENVIRONMENT_VARIABLE_ACTION);

impl Action for UnsetEnvironmentVariable {
    fn condition(&self) -> Option<&Condition> {
        self.base.condition.as_ref()
    }

    fn execute(&self, context: &mut LaunchContext) -> ExecuteResult {
        let name = perform_substitutions(context, &self.name)?;
        if context.get_environment(&name).is_some() {
            log::debug!("unsetting environment variable {}", name);
            context.unset_environment(&name);
        }
        Ok(None)
    }

    fn describe(&self) -> String {
        format!("unset_env {}", describe_substitutions(&self.name))
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

impl ParseAction for UnsetEnvironmentVariable {
    type Params = UnsetEnvironmentVariableParams;

    fn action_class() -> &'static Class {
        &UNSET_ENVIRONMENT_VARIABLE_ACTION
    }

    fn parse(entity: &dyn Entity, parser: &Parser) -> Result<Self::Params, ParseError> {
        let base = ActionParams::parse(entity, parser)?;
        Ok(UnsetEnvironmentVariableParams {
            base,
            name: parser.parse_substitution(&entity.get_text("name")?)?,
        })
    }

    fn from_params(params: Self::Params) -> Self {
        Self {
            base: params.base,
            name: params.name,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unsets_present_variable() {
        let mut ctx = LaunchContext::new();
        ctx.set_environment("FOO", "bar");
        ctx.set_environment("KEEP", "me");

        UnsetEnvironmentVariable::new("FOO").execute(&mut ctx).unwrap();
        assert_eq!(ctx.get_environment("FOO"), None);
        assert_eq!(ctx.get_environment("KEEP"), Some("me"));
    }

    #[test]
    fn test_is_idempotent() {
        for initially_set in [true, false] {
            let mut once = LaunchContext::new();
            let mut twice = LaunchContext::new();
            for ctx in [&mut once, &mut twice] {
                ctx.set_environment("OTHER", "x");
                if initially_set {
                    ctx.set_environment("FOO", "bar");
                }
            }

            let action = UnsetEnvironmentVariable::new("FOO");
            action.execute(&mut once).unwrap();
            action.execute(&mut twice).unwrap();
            action.execute(&mut twice).unwrap();

            assert_eq!(once.snapshot(), twice.snapshot());
            assert_eq!(once.get_environment("FOO"), None);
        }
    }
}
