//! Ordered collection of top-level actions

use crate::action::ActionRef;
use std::fmt;

/// A parsed (or programmatically built) launch description
#[derive(Debug, Clone, Default)]
pub struct LaunchDescription {
    entities: Vec<ActionRef>,
}

impl LaunchDescription {
    pub fn new(entities: Vec<ActionRef>) -> Self {
        Self { entities }
    }

    pub fn entities(&self) -> &[ActionRef] {
        &self.entities
    }

    pub fn add_action(&mut self, action: ActionRef) {
        self.entities.push(action);
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }
}

/// One line per top-level entity, for dry runs
impl fmt::Display for LaunchDescription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Launch Description")?;
        writeln!(f, "==================")?;
        for (i, entity) in self.entities.iter().enumerate() {
            writeln!(f, "  {}. {}", i + 1, entity.describe())?;
        }
        Ok(())
    }
}
