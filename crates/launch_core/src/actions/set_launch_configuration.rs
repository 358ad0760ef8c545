//! `let`: set a launch configuration

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

pub static SET_LAUNCH_CONFIGURATION_ACTION: Class =
    Class::derived("SetLaunchConfiguration", &ACTION);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SetLaunchConfigurationParams {
    pub base: ActionParams,
    pub name: Vec<Substitution>,
    pub value: Vec<Substitution>,
}

/// Sets a launch configuration, overwriting any previous value
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SetLaunchConfiguration {
    base: ActionParams,
    name: Vec<Substitution>,
    value: Vec<Substitution>,
}

impl SetLaunchConfiguration {
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

impl_action_class!(SetLaunchConfiguration, SET_LAUNCH_CONFIGURATION_ACTION);

impl Action for SetLaunchConfiguration {
    fn condition(&self) -> Option<&Condition> {
        self.base.condition.as_ref()
    }

    fn execute(&self, context: &mut LaunchContext) -> ExecuteResult {
        let name = perform_substitutions(context, &self.name)?;
        let value = perform_substitutions(context, &self.value)?;
        context.set_launch_configuration(name, value);
        Ok(None)
    }

    fn describe(&self) -> String {
        format!(
            "let {}={}",
            describe_substitutions(&self.name),
            describe_substitutions(&self.value)
        )
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

impl ParseAction for SetLaunchConfiguration {
    type Params = SetLaunchConfigurationParams;

    fn action_class() -> &'static Class {
        &SET_LAUNCH_CONFIGURATION_ACTION
    }

    fn parse(entity: &dyn Entity, parser: &Parser) -> Result<Self::Params, ParseError> {
        let base = ActionParams::parse(entity, parser)?;
        Ok(SetLaunchConfigurationParams {
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

    #[test]
    fn test_value_may_reference_other_configuration() {
        let mut ctx = LaunchContext::new();
        ctx.set_launch_configuration("base", "/opt");

        let action = SetLaunchConfiguration::new(
            "path",
            vec![Substitution::launch_configuration("base"), Substitution::text("/bin")],
        );
        action.execute(&mut ctx).unwrap();
        assert_eq!(ctx.get_launch_configuration("path"), Some("/opt/bin"));
    }
}
