//! Errors raised while turning entities into actions

use crate::introspection::IntrospectionError;
use crate::substitution::SubstitutionSyntaxError;

/// Errors that can occur while parsing a launch description
#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    #[error("Entity '{entity}': missing required attribute '{attribute}'")]
    MissingAttribute { entity: String, attribute: String },

    #[error("Entity '{entity}': attribute '{attribute}' should be {expected}")]
    AttributeType {
        entity: String,
        attribute: String,
        expected: &'static str,
    },

    #[error("Entity '{entity}': invalid value for '{attribute}': {reason}")]
    InvalidValue {
        entity: String,
        attribute: String,
        reason: String,
    },

    #[error("Failed to parse substitution '{input}': {source}")]
    Substitution {
        input: String,
        #[source]
        source: SubstitutionSyntaxError,
    },

    #[error("Unknown action tag: {0}")]
    UnknownTag(String),

    #[error("Expected a 'launch' root entity, found '{0}'")]
    UnexpectedRoot(String),

    #[error("Malformed entity: {0}")]
    Malformed(String),
}

/// Errors that can occur while registering action kinds
#[derive(Debug, thiserror::Error)]
pub enum RegistrationError {
    #[error("Action tag '{tag}' is already registered to '{existing}'")]
    DuplicateTag { tag: String, existing: &'static str },

    #[error("Class '{0}' is not an action class")]
    NotAnAction(&'static str),

    #[error("Introspection error: {0}")]
    Introspection(#[from] IntrospectionError),
}
