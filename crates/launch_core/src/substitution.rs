//! Substitution engine for $(var), $(env), $(optenv) patterns
//!
//! Every user-facing text field of an action is stored as a sequence of
//! [`Substitution`]s and only resolved when the action executes, against the
//! state of the [`LaunchContext`] at that moment.

use crate::context::LaunchContext;
use regex::Regex;
use std::fmt;
use std::sync::LazyLock;

/// Regex for matching substitution patterns: $(type value...) or $(type)
static SUBSTITUTION_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\$\((\w+)\s+([^)]+)\)|\$\((\w+)\)").expect("substitution pattern is valid")
});

/// A unit of deferred text
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Substitution {
    /// Literal text
    Text(String),
    /// Value of a launch configuration, `$(var name)`
    LaunchConfiguration {
        name: Vec<Substitution>,
        default: Option<Vec<Substitution>>,
    },
    /// Value of an environment variable of the context, `$(env NAME [default])`
    EnvironmentVariable {
        name: Vec<Substitution>,
        default: Option<Vec<Substitution>>,
    },
}

impl Substitution {
    pub fn text(text: impl Into<String>) -> Self {
        Substitution::Text(text.into())
    }

    /// `$(var name)` without a default
    pub fn launch_configuration(name: impl SomeSubstitutions) -> Self {
        Substitution::LaunchConfiguration {
            name: name.into_substitutions(),
            default: None,
        }
    }

    /// `$(env name)` without a default
    pub fn environment_variable(name: impl SomeSubstitutions) -> Self {
        Substitution::EnvironmentVariable {
            name: name.into_substitutions(),
            default: None,
        }
    }

    /// Resolve this substitution against the current context state
    pub fn perform(&self, context: &LaunchContext) -> Result<String, ResolutionError> {
        match self {
            Substitution::Text(text) => Ok(text.clone()),
            Substitution::LaunchConfiguration { name, default } => {
                let name = perform_substitutions(context, name)?;
                match context.get_launch_configuration(&name) {
                    Some(value) => Ok(value.to_string()),
                    None => match default {
                        Some(default) => perform_substitutions(context, default),
                        None => Err(ResolutionError::UndefinedLaunchConfiguration(name)),
                    },
                }
            }
            Substitution::EnvironmentVariable { name, default } => {
                let name = perform_substitutions(context, name)?;
                match context.get_environment(&name) {
                    Some(value) => Ok(value.to_string()),
                    None => match default {
                        Some(default) => perform_substitutions(context, default),
                        None => Err(ResolutionError::UndefinedEnvironmentVariable(name)),
                    },
                }
            }
        }
    }
}

fn write_sequence(f: &mut fmt::Formatter<'_>, substitutions: &[Substitution]) -> fmt::Result {
    for substitution in substitutions {
        write!(f, "{}", substitution)?;
    }
    Ok(())
}

impl fmt::Display for Substitution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (kind, name, default) = match self {
            Substitution::Text(text) => return f.write_str(text),
            Substitution::LaunchConfiguration { name, default } => ("var", name, default.as_ref()),
            Substitution::EnvironmentVariable { name, default } => match default {
                Some(default) if default.is_empty() => ("optenv", name, None),
                _ => ("env", name, default.as_ref()),
            },
        };
        write!(f, "$({} ", kind)?;
        write_sequence(f, name)?;
        if let Some(default) = default {
            f.write_str(" ")?;
            write_sequence(f, default)?;
        }
        f.write_str(")")
    }
}

/// Anything that can be turned into a substitution sequence
pub trait SomeSubstitutions {
    fn into_substitutions(self) -> Vec<Substitution>;
}

impl SomeSubstitutions for &str {
    fn into_substitutions(self) -> Vec<Substitution> {
        vec![Substitution::text(self)]
    }
}

impl SomeSubstitutions for String {
    fn into_substitutions(self) -> Vec<Substitution> {
        vec![Substitution::Text(self)]
    }
}

impl SomeSubstitutions for Substitution {
    fn into_substitutions(self) -> Vec<Substitution> {
        vec![self]
    }
}

impl SomeSubstitutions for Vec<Substitution> {
    fn into_substitutions(self) -> Vec<Substitution> {
        self
    }
}

impl SomeSubstitutions for &[Substitution] {
    fn into_substitutions(self) -> Vec<Substitution> {
        self.to_vec()
    }
}

/// Normalize a literal or an already tokenized value into a sequence
pub fn normalize_to_list_of_substitutions(value: impl SomeSubstitutions) -> Vec<Substitution> {
    value.into_substitutions()
}

/// Resolve a sequence and concatenate the results
pub fn perform_substitutions(
    context: &LaunchContext,
    substitutions: &[Substitution],
) -> Result<String, ResolutionError> {
    let mut result = String::new();
    for substitution in substitutions {
        result.push_str(&substitution.perform(context)?);
    }
    Ok(result)
}

/// Render a sequence back to its expression form
pub fn describe_substitutions(substitutions: &[Substitution]) -> String {
    substitutions.iter().map(|s| s.to_string()).collect()
}

/// Tokenize text containing `$(...)` patterns into a substitution sequence
///
/// Supported: `$(var NAME)`, `$(env NAME)`, `$(env NAME DEFAULT)` and
/// `$(optenv NAME [DEFAULT])` (an empty default when omitted).
pub fn parse_substitution_text(input: &str) -> Result<Vec<Substitution>, SubstitutionSyntaxError> {
    let mut substitutions = Vec::new();
    let mut last_end = 0;

    for caps in SUBSTITUTION_PATTERN.captures_iter(input) {
        let Some(whole) = caps.get(0) else {
            continue;
        };
        if whole.start() > last_end {
            substitutions.push(Substitution::text(&input[last_end..whole.start()]));
        }
        last_end = whole.end();

        let (kind, args) = match (caps.get(1), caps.get(2), caps.get(3)) {
            (Some(kind), Some(args), _) => (kind.as_str(), args.as_str()),
            (_, _, Some(kind)) => (kind.as_str(), ""),
            _ => return Err(SubstitutionSyntaxError::InvalidPattern(whole.as_str().to_string())),
        };
        let args: Vec<&str> = args.split_whitespace().collect();
        substitutions.push(build_typed(kind, &args, whole.as_str())?);
    }

    if last_end < input.len() {
        substitutions.push(Substitution::text(&input[last_end..]));
    }

    Ok(substitutions)
}

fn build_typed(
    kind: &str,
    args: &[&str],
    pattern: &str,
) -> Result<Substitution, SubstitutionSyntaxError> {
    let arity_error = |expected: &str| SubstitutionSyntaxError::Arity {
        pattern: pattern.to_string(),
        expected: expected.to_string(),
    };
    match (kind, args) {
        ("var", [name]) => Ok(Substitution::launch_configuration(*name)),
        ("var", _) => Err(arity_error("1")),
        ("env", [name]) => Ok(Substitution::environment_variable(*name)),
        ("env", [name, default]) => Ok(Substitution::EnvironmentVariable {
            name: (*name).into_substitutions(),
            default: Some((*default).into_substitutions()),
        }),
        ("env", _) => Err(arity_error("1 or 2")),
        ("optenv", [name]) => Ok(Substitution::EnvironmentVariable {
            name: (*name).into_substitutions(),
            default: Some(Vec::new()),
        }),
        ("optenv", [name, default]) => Ok(Substitution::EnvironmentVariable {
            name: (*name).into_substitutions(),
            default: Some((*default).into_substitutions()),
        }),
        ("optenv", _) => Err(arity_error("1 or 2")),
        _ => Err(SubstitutionSyntaxError::UnknownType(kind.to_string())),
    }
}

/// Errors that can occur while resolving a substitution
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ResolutionError {
    #[error("launch configuration '{0}' does not exist")]
    UndefinedLaunchConfiguration(String),

    #[error("environment variable '{0}' does not exist")]
    UndefinedEnvironmentVariable(String),
}

impl ResolutionError {
    /// The key that could not be found
    pub fn missing_key(&self) -> &str {
        match self {
            ResolutionError::UndefinedLaunchConfiguration(key)
            | ResolutionError::UndefinedEnvironmentVariable(key) => key,
        }
    }
}

/// Errors in the text form of a substitution
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SubstitutionSyntaxError {
    #[error("Unknown substitution type: {0}")]
    UnknownType(String),

    #[error("Invalid substitution pattern: {0}")]
    InvalidPattern(String),

    #[error("Substitution '{pattern}' expects {expected} argument(s)")]
    Arity { pattern: String, expected: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_var_substitution() {
        let mut ctx = LaunchContext::new();
        ctx.set_launch_configuration("config", "my_config.yaml");

        let subs = parse_substitution_text("$(var config)").unwrap();
        assert_eq!(perform_substitutions(&ctx, &subs).unwrap(), "my_config.yaml");
    }

    #[test]
    fn test_env_substitution_reads_context() {
        let mut ctx = LaunchContext::new();
        ctx.set_environment("MY_VAR", "my_value");

        let subs = parse_substitution_text("$(env MY_VAR)").unwrap();
        assert_eq!(perform_substitutions(&ctx, &subs).unwrap(), "my_value");
    }

    #[test]
    fn test_env_default_and_optenv() {
        let ctx = LaunchContext::new();

        let subs = parse_substitution_text("$(env MISSING fallback)").unwrap();
        assert_eq!(perform_substitutions(&ctx, &subs).unwrap(), "fallback");

        let subs = parse_substitution_text("[$(optenv MISSING)]").unwrap();
        assert_eq!(perform_substitutions(&ctx, &subs).unwrap(), "[]");
    }

    #[test]
    fn test_mixed_text_and_patterns() {
        let mut ctx = LaunchContext::new();
        ctx.set_launch_configuration("prefix", "data");
        ctx.set_launch_configuration("suffix", "log");

        let subs = parse_substitution_text("$(var prefix)_run_$(var suffix).txt").unwrap();
        assert_eq!(subs.len(), 4);
        assert_eq!(perform_substitutions(&ctx, &subs).unwrap(), "data_run_log.txt");
    }

    #[test]
    fn test_undefined_var_error_names_key() {
        let ctx = LaunchContext::new();
        let subs = parse_substitution_text("$(var undefined)").unwrap();

        let err = perform_substitutions(&ctx, &subs).unwrap_err();
        assert_eq!(
            err,
            ResolutionError::UndefinedLaunchConfiguration("undefined".to_string())
        );
        assert_eq!(err.missing_key(), "undefined");
    }

    #[test]
    fn test_resolution_sees_current_state() {
        let mut ctx = LaunchContext::new();
        let subs = vec![Substitution::launch_configuration("x")];

        ctx.set_launch_configuration("x", "1");
        assert_eq!(perform_substitutions(&ctx, &subs).unwrap(), "1");
        ctx.set_launch_configuration("x", "2");
        assert_eq!(perform_substitutions(&ctx, &subs).unwrap(), "2");
    }

    #[test]
    fn test_no_substitution_needed() {
        let subs = parse_substitution_text("plain string").unwrap();
        assert_eq!(subs, vec![Substitution::text("plain string")]);
    }

    #[test]
    fn test_syntax_errors() {
        assert!(matches!(
            parse_substitution_text("$(bogus x)"),
            Err(SubstitutionSyntaxError::UnknownType(_))
        ));
        assert!(matches!(
            parse_substitution_text("$(var a b)"),
            Err(SubstitutionSyntaxError::Arity { .. })
        ));
    }

    #[test]
    fn test_normalize_and_describe() {
        let subs = normalize_to_list_of_substitutions("literal");
        assert_eq!(subs, vec![Substitution::text("literal")]);

        let subs = parse_substitution_text("a$(var b)$(env C d)").unwrap();
        assert_eq!(describe_substitutions(&subs), "a$(var b)$(env C d)");
    }
}
