//! Tag name → action kind registry

use super::entity::Entity;
use super::error::{ParseError, RegistrationError};
use super::parser::Parser;
use crate::action::{ActionRef, ParseAction, ACTION};
use crate::actions::{
    DeclareLaunchArgument, GroupAction, LogInfo, ResetLaunchConfigurations,
    SetEnvironmentVariable, SetLaunchConfiguration, Shutdown, UnsetEnvironmentVariable,
};
use crate::introspection::{is_a_subclass, Class, Object};
use indexmap::IndexMap;
use std::fmt;
use std::sync::Arc;

/// Builds an action from an entity
pub type ActionFactory = fn(&dyn Entity, &Parser) -> Result<ActionRef, ParseError>;

struct RegisteredAction {
    class: &'static Class,
    factory: ActionFactory,
}

/// Maps entity tags to the action kinds that parse them
///
/// Built once at startup with explicit [`ActionRegistry::register`] calls;
/// registering a tag twice is an error.
#[derive(Default)]
pub struct ActionRegistry {
    actions: IndexMap<String, RegisteredAction>,
}

fn build_action<A: ParseAction>(entity: &dyn Entity, parser: &Parser) -> Result<ActionRef, ParseError> {
    let params = A::parse(entity, parser)?;
    Ok(Arc::new(A::from_params(params)))
}

impl ActionRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a registry with every built-in action tag
    pub fn with_builtin_actions() -> Result<Self, RegistrationError> {
        let mut registry = Self::new();
        registry.register::<SetEnvironmentVariable>("set_env")?;
        registry.register::<UnsetEnvironmentVariable>("unset_env")?;
        registry.register::<SetLaunchConfiguration>("let")?;
        registry.register::<DeclareLaunchArgument>("arg")?;
        registry.register::<ResetLaunchConfigurations>("reset")?;
        registry.register::<LogInfo>("log")?;
        registry.register::<GroupAction>("group")?;
        registry.register::<Shutdown>("shutdown")?;
        Ok(registry)
    }

    /// Register action kind `A` under `tag`
    pub fn register<A: ParseAction>(&mut self, tag: &str) -> Result<(), RegistrationError> {
        self.register_factory(tag, A::action_class(), build_action::<A>)
    }

    /// Register a custom factory under `tag`
    ///
    /// `class` must derive from the action root class.
    pub fn register_factory(
        &mut self,
        tag: &str,
        class: &'static Class,
        factory: ActionFactory,
    ) -> Result<(), RegistrationError> {
        if !is_a_subclass(Object::Class(class), Object::Class(&ACTION))? {
            return Err(RegistrationError::NotAnAction(class.name()));
        }
        if let Some(existing) = self.actions.get(tag) {
            return Err(RegistrationError::DuplicateTag {
                tag: tag.to_string(),
                existing: existing.class.name(),
            });
        }
        log::debug!("registered action tag '{}' -> {}", tag, class);
        self.actions
            .insert(tag.to_string(), RegisteredAction { class, factory });
        Ok(())
    }

    pub fn contains(&self, tag: &str) -> bool {
        self.actions.contains_key(tag)
    }

    /// Class registered for `tag`
    pub fn class_of(&self, tag: &str) -> Option<&'static Class> {
        self.actions.get(tag).map(|a| a.class)
    }

    /// Registered tags in registration order
    pub fn tags(&self) -> impl Iterator<Item = &str> {
        self.actions.keys().map(String::as_str)
    }

    pub(crate) fn build(&self, entity: &dyn Entity, parser: &Parser) -> Result<ActionRef, ParseError> {
        let tag = entity.type_name();
        let registered = self
            .actions
            .get(tag)
            .ok_or_else(|| ParseError::UnknownTag(tag.to_string()))?;
        (registered.factory)(entity, parser)
    }
}

impl fmt::Debug for ActionRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map()
            .entries(self.actions.iter().map(|(tag, a)| (tag, a.class)))
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::introspection::Class;

    #[test]
    fn test_builtin_tags() {
        let registry = ActionRegistry::with_builtin_actions().unwrap();
        let tags: Vec<_> = registry.tags().collect();
        assert_eq!(
            tags,
            vec!["set_env", "unset_env", "let", "arg", "reset", "log", "group", "shutdown"]
        );
        assert_eq!(registry.class_of("shutdown").map(Class::name), Some("Shutdown"));
    }

    #[test]
    fn test_duplicate_tag_rejected_at_registration() {
        let mut registry = ActionRegistry::with_builtin_actions().unwrap();
        let result = registry.register::<LogInfo>("set_env");
        assert!(matches!(
            result,
            Err(RegistrationError::DuplicateTag { ref tag, existing: "SetEnvironmentVariable" }) if tag == "set_env"
        ));
    }

    #[test]
    fn test_non_action_class_rejected() {
        static NOT_AN_ACTION: Class = Class::root("NotAnAction");
        let mut registry = ActionRegistry::new();
        let result = registry.register_factory("bogus", &NOT_AN_ACTION, build_action::<LogInfo>);
        assert!(matches!(result, Err(RegistrationError::NotAnAction("NotAnAction"))));
        assert!(!registry.contains("bogus"));
    }
}
