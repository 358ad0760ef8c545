//! `reset`: drop all launch configurations except an explicit keep list

use crate::action::{impl_action_class, Action, ActionParams, ExecuteResult, ParseAction, ACTION};
use crate::condition::Condition;
use crate::context::LaunchContext;
use crate::frontend::{Entity, ParseError, Parser};
use crate::introspection::Class;
use crate::substitution::{
    describe_substitutions, normalize_to_list_of_substitutions, perform_substitutions,
    SomeSubstitutions, Substitution,
};
use indexmap::IndexMap;
use std::any::Any;

pub static RESET_LAUNCH_CONFIGURATIONS_ACTION: Class =
    Class::derived("ResetLaunchConfigurations", &ACTION);

/// A `(name, value)` pair to keep across the reset
pub type KeepEntry = (Vec<Substitution>, Vec<Substitution>);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResetLaunchConfigurationsParams {
    pub base: ActionParams,
    pub keep: Option<Vec<KeepEntry>>,
}

/// Replaces the launch configurations with exactly the `keep` entries
///
/// Keep values are resolved against the configurations as they are *before*
/// the reset, so `$(var b)` carries the current value of `b` across.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResetLaunchConfigurations {
    base: ActionParams,
    keep: Option<Vec<KeepEntry>>,
}

impl ResetLaunchConfigurations {
    /// Reset everything, keeping nothing
    pub fn new() -> Self {
        Self {
            base: ActionParams::default(),
            keep: None,
        }
    }

    /// Reset everything but the given entries
    pub fn keep<N, V>(entries: impl IntoIterator<Item = (N, V)>) -> Self
    where
        N: SomeSubstitutions,
        V: SomeSubstitutions,
    {
        let keep = entries
            .into_iter()
            .map(|(name, value)| {
                (
                    normalize_to_list_of_substitutions(name),
                    normalize_to_list_of_substitutions(value),
                )
            })
            .collect();
        Self {
            base: ActionParams::default(),
            keep: Some(keep),
        }
    }

    pub fn with_condition(mut self, condition: Condition) -> Self {
        self.base.condition = Some(condition);
        self
    }

    pub fn keep_entries(&self) -> Option<&[KeepEntry]> {
        self.keep.as_deref()
    }
}

impl Default for ResetLaunchConfigurations {
    fn default() -> Self {
        Self::new()
    }
}

impl_action_class!(ResetLaunchConfigurations, RESET_LAUNCH_CONFIGURATIONS_ACTION);

impl Action for ResetLaunchConfigurations {
    fn condition(&self) -> Option<&Condition> {
        self.base.condition.as_ref()
    }

    fn execute(&self, context: &mut LaunchContext) -> ExecuteResult {
        let mut keep = IndexMap::new();
        for (name, value) in self.keep.iter().flatten() {
            let name = perform_substitutions(context, name)?;
            let value = perform_substitutions(context, value)?;
            keep.insert(name, value);
        }
        log::debug!(
            "resetting launch configurations, keeping {} entries",
            keep.len()
        );
        context.reset_launch_configurations(keep);
        Ok(None)
    }

    fn describe(&self) -> String {
        let entries: Vec<String> = self
            .keep
            .iter()
            .flatten()
            .map(|(name, value)| {
                format!(
                    "{}={}",
                    describe_substitutions(name),
                    describe_substitutions(value)
                )
            })
            .collect();
        format!("reset keep [{}]", entries.join(", "))
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

impl ParseAction for ResetLaunchConfigurations {
    type Params = ResetLaunchConfigurationsParams;

    fn action_class() -> &'static Class {
        &RESET_LAUNCH_CONFIGURATIONS_ACTION
    }

    fn parse(entity: &dyn Entity, parser: &Parser) -> Result<Self::Params, ParseError> {
        let base = ActionParams::parse(entity, parser)?;
        let keep = match entity.get_optional_entities("keep")? {
            Some(entries) => {
                let mut keep = Vec::with_capacity(entries.len());
                for entry in &entries {
                    let name = parser.parse_substitution(&entry.get_text("name")?)?;
                    let value = parser.parse_substitution(&entry.get_text("value")?)?;
                    keep.push((name, value));
                }
                Some(keep)
            }
            None => None,
        };
        Ok(ResetLaunchConfigurationsParams { base, keep })
    }

    fn from_params(params: Self::Params) -> Self {
        Self {
            base: params.base,
            keep: params.keep,
        }
    }
}
