//! `group`: a list of actions, optionally scoping launch configurations

use crate::action::{
    impl_action_class, Action, ActionError, ActionParams, ActionRef, ExecuteResult, ParseAction,
    ACTION,
};
use crate::condition::Condition;
use crate::context::LaunchContext;
use crate::frontend::{Entity, ParseError, Parser};
use crate::introspection::Class;
use std::any::Any;
use std::sync::Arc;

pub static GROUP_ACTION: Class = Class::derived("GroupAction", &ACTION);
pub static PUSH_LAUNCH_CONFIGURATIONS_ACTION: Class =
    Class::derived("PushLaunchConfigurations", &ACTION);
pub static POP_LAUNCH_CONFIGURATIONS_ACTION: Class =
    Class::derived("PopLaunchConfigurations", &ACTION);

#[derive(Debug, Clone)]
pub struct GroupActionParams {
    pub base: ActionParams,
    pub scoped: bool,
    pub actions: Vec<ActionRef>,
}

/// Yields its actions for execution
///
/// When scoped (the default), launch configurations changed inside the group
/// are restored once the group's actions have run. If one of them fails, the
/// launch service pops the scope before reporting the error.
#[derive(Debug, Clone)]
pub struct GroupAction {
    base: ActionParams,
    scoped: bool,
    actions: Vec<ActionRef>,
}

impl GroupAction {
    pub fn new(actions: Vec<ActionRef>) -> Self {
        Self {
            base: ActionParams::default(),
            scoped: true,
            actions,
        }
    }

    pub fn scoped(mut self, scoped: bool) -> Self {
        self.scoped = scoped;
        self
    }

    pub fn with_condition(mut self, condition: Condition) -> Self {
        self.base.condition = Some(condition);
        self
    }

    pub fn is_scoped(&self) -> bool {
        self.scoped
    }

    pub fn actions(&self) -> &[ActionRef] {
        &self.actions
    }
}

impl_action_class!(GroupAction, GROUP_ACTION);

impl Action for GroupAction {
    fn condition(&self) -> Option<&Condition> {
        self.base.condition.as_ref()
    }

    fn execute(&self, _context: &mut LaunchContext) -> ExecuteResult {
        if !self.scoped {
            return Ok(Some(self.actions.clone()));
        }
        let mut actions: Vec<ActionRef> = Vec::with_capacity(self.actions.len() + 2);
        actions.push(Arc::new(PushLaunchConfigurations));
        actions.extend(self.actions.iter().cloned());
        actions.push(Arc::new(PopLaunchConfigurations));
        Ok(Some(actions))
    }

    fn describe(&self) -> String {
        let inner: Vec<String> = self.actions.iter().map(|a| a.describe()).collect();
        format!(
            "group{} [{}]",
            if self.scoped { " (scoped)" } else { "" },
            inner.join("; ")
        )
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

impl ParseAction for GroupAction {
    type Params = GroupActionParams;

    fn action_class() -> &'static Class {
        &GROUP_ACTION
    }

    fn parse(entity: &dyn Entity, parser: &Parser) -> Result<Self::Params, ParseError> {
        let base = ActionParams::parse(entity, parser)?;
        let scoped = entity.get_optional_bool("scoped")?.unwrap_or(true);
        let children = entity.children()?;
        Ok(GroupActionParams {
            base,
            scoped,
            actions: parser.parse_actions(&children)?,
        })
    }

    fn from_params(params: Self::Params) -> Self {
        Self {
            base: params.base,
            scoped: params.scoped,
            actions: params.actions,
        }
    }
}

/// Saves the launch configurations on the context's scope stack
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PushLaunchConfigurations;

impl_action_class!(PushLaunchConfigurations, PUSH_LAUNCH_CONFIGURATIONS_ACTION);

impl Action for PushLaunchConfigurations {
    fn execute(&self, context: &mut LaunchContext) -> ExecuteResult {
        context.push_launch_configurations();
        Ok(None)
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// Restores the launch configurations saved by the matching push
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PopLaunchConfigurations;

impl_action_class!(PopLaunchConfigurations, POP_LAUNCH_CONFIGURATIONS_ACTION);

impl Action for PopLaunchConfigurations {
    fn execute(&self, context: &mut LaunchContext) -> ExecuteResult {
        if !context.pop_launch_configurations() {
            return Err(ActionError::UnbalancedScope);
        }
        Ok(None)
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}
