//! Syntax-agnostic view over one node of a parsed description

use super::error::ParseError;
use std::fmt;

/// Value of an entity attribute
#[derive(Debug)]
pub enum Attribute<'a> {
    /// Raw text, to be tokenized by the parser
    Text(String),
    /// Nested entities (e.g. the `keep` entries of a `reset`)
    Entities(Vec<Box<dyn Entity + 'a>>),
}

/// A node of a launch description, independent of the surface syntax
///
/// Frontends implement [`Entity::type_name`], [`Entity::children`] and
/// [`Entity::attr`]; the typed getters are shared.
pub trait Entity: fmt::Debug {
    /// Tag of this entity (`set_env`, `let`, ...)
    fn type_name(&self) -> &str;

    /// Child entities, in document order
    fn children(&self) -> Result<Vec<Box<dyn Entity + '_>>, ParseError>;

    /// Look up an attribute; `Ok(None)` when absent
    fn attr(&self, name: &str) -> Result<Option<Attribute<'_>>, ParseError>;

    /// Look up a required attribute
    fn get_attr(&self, name: &str) -> Result<Attribute<'_>, ParseError> {
        self.attr(name)?.ok_or_else(|| ParseError::MissingAttribute {
            entity: self.type_name().to_string(),
            attribute: name.to_string(),
        })
    }

    /// Look up an optional attribute
    fn get_optional_attr(&self, name: &str) -> Result<Option<Attribute<'_>>, ParseError> {
        self.attr(name)
    }

    fn get_text(&self, name: &str) -> Result<String, ParseError> {
        match self.get_attr(name)? {
            Attribute::Text(text) => Ok(text),
            Attribute::Entities(_) => Err(self.type_error(name, "text")),
        }
    }

    fn get_optional_text(&self, name: &str) -> Result<Option<String>, ParseError> {
        match self.attr(name)? {
            None => Ok(None),
            Some(Attribute::Text(text)) => Ok(Some(text)),
            Some(Attribute::Entities(_)) => Err(self.type_error(name, "text")),
        }
    }

    fn get_entities(&self, name: &str) -> Result<Vec<Box<dyn Entity + '_>>, ParseError> {
        match self.get_attr(name)? {
            Attribute::Entities(entities) => Ok(entities),
            Attribute::Text(_) => Err(self.type_error(name, "a list of entities")),
        }
    }

    fn get_optional_entities(
        &self,
        name: &str,
    ) -> Result<Option<Vec<Box<dyn Entity + '_>>>, ParseError> {
        match self.attr(name)? {
            None => Ok(None),
            Some(Attribute::Entities(entities)) => Ok(Some(entities)),
            Some(Attribute::Text(_)) => Err(self.type_error(name, "a list of entities")),
        }
    }

    /// Optional boolean attribute, accepting `true` / `false`
    fn get_optional_bool(&self, name: &str) -> Result<Option<bool>, ParseError> {
        let Some(text) = self.get_optional_text(name)? else {
            return Ok(None);
        };
        match text.trim().to_ascii_lowercase().as_str() {
            "true" => Ok(Some(true)),
            "false" => Ok(Some(false)),
            _ => Err(ParseError::InvalidValue {
                entity: self.type_name().to_string(),
                attribute: name.to_string(),
                reason: format!("expected 'true' or 'false', got '{}'", text),
            }),
        }
    }

    #[doc(hidden)]
    fn type_error(&self, name: &str, expected: &'static str) -> ParseError {
        ParseError::AttributeType {
            entity: self.type_name().to_string(),
            attribute: name.to_string(),
            expected,
        }
    }
}
