//! `if` / `unless` conditions attached to actions

use crate::context::LaunchContext;
use crate::substitution::{perform_substitutions, ResolutionError, SomeSubstitutions, Substitution};

/// Decides whether an action runs when visited
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Condition {
    /// Run when the expression is truthy
    If(Vec<Substitution>),
    /// Run when the expression is not truthy
    Unless(Vec<Substitution>),
}

impl Condition {
    pub fn if_true(expression: impl SomeSubstitutions) -> Self {
        Condition::If(expression.into_substitutions())
    }

    pub fn unless(expression: impl SomeSubstitutions) -> Self {
        Condition::Unless(expression.into_substitutions())
    }

    /// Resolve the expression and decide
    pub fn evaluate(&self, context: &LaunchContext) -> Result<bool, ResolutionError> {
        match self {
            Condition::If(expression) => Ok(is_truthy(&perform_substitutions(context, expression)?)),
            Condition::Unless(expression) => {
                Ok(!is_truthy(&perform_substitutions(context, expression)?))
            }
        }
    }
}

/// Truthy values: "true", "1" and "yes" (case-insensitive)
pub fn is_truthy(value: &str) -> bool {
    let value = value.trim();
    value.eq_ignore_ascii_case("true") || value == "1" || value.eq_ignore_ascii_case("yes")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truthy_values() {
        assert!(is_truthy("true"));
        assert!(is_truthy("TRUE"));
        assert!(is_truthy("1"));
        assert!(is_truthy("yes"));
        assert!(!is_truthy("false"));
        assert!(!is_truthy("0"));
        assert!(!is_truthy(""));
    }

    #[test]
    fn test_condition_uses_context() {
        let mut ctx = LaunchContext::new();
        ctx.set_launch_configuration("enable", "true");

        let cond = Condition::if_true(Substitution::launch_configuration("enable"));
        assert!(cond.evaluate(&ctx).unwrap());

        let cond = Condition::unless(Substitution::launch_configuration("enable"));
        assert!(!cond.evaluate(&ctx).unwrap());
    }

    #[test]
    fn test_condition_resolution_error() {
        let ctx = LaunchContext::new();
        let cond = Condition::if_true(Substitution::launch_configuration("missing"));
        assert!(cond.evaluate(&ctx).is_err());
    }
}
