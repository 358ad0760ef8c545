//! Turns entities into actions and attribute text into substitutions

use super::entity::Entity;
use super::error::{ParseError, RegistrationError};
use super::registry::ActionRegistry;
use crate::action::ActionRef;
use crate::description::LaunchDescription;
use crate::substitution::{parse_substitution_text, Substitution};

/// Parser shared by every frontend
#[derive(Debug)]
pub struct Parser {
    registry: ActionRegistry,
}

impl Parser {
    pub fn new(registry: ActionRegistry) -> Self {
        Self { registry }
    }

    /// Create a parser that knows every built-in action tag
    pub fn with_builtin_actions() -> Result<Self, RegistrationError> {
        Ok(Self::new(ActionRegistry::with_builtin_actions()?))
    }

    pub fn registry(&self) -> &ActionRegistry {
        &self.registry
    }

    /// Tokenize attribute text into a substitution sequence
    pub fn parse_substitution(&self, raw: &str) -> Result<Vec<Substitution>, ParseError> {
        parse_substitution_text(raw).map_err(|source| ParseError::Substitution {
            input: raw.to_string(),
            source,
        })
    }

    /// Build the action registered for the entity's tag
    pub fn parse_action(&self, entity: &dyn Entity) -> Result<ActionRef, ParseError> {
        self.registry.build(entity, self)
    }

    /// Build one action per entity, preserving order
    pub fn parse_actions(&self, entities: &[Box<dyn Entity + '_>]) -> Result<Vec<ActionRef>, ParseError> {
        entities
            .iter()
            .map(|entity| self.parse_action(entity.as_ref()))
            .collect()
    }

    /// Parse a whole description from its `launch` root entity
    ///
    /// Parsing finishes before anything executes, so a malformed description
    /// never runs partially.
    pub fn parse_description(&self, root: &dyn Entity) -> Result<LaunchDescription, ParseError> {
        if root.type_name() != "launch" {
            return Err(ParseError::UnexpectedRoot(root.type_name().to_string()));
        }
        let children = root.children()?;
        let entities = self.parse_actions(&children)?;
        log::debug!("parsed launch description with {} entities", entities.len());
        Ok(LaunchDescription::new(entities))
    }
}
