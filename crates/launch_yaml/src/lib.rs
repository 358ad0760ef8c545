//! YAML frontend for launch descriptions
//!
//! A description is a `launch` key holding a list of single-key mappings,
//! one per entity:
//!
//! ```yaml
//! launch:
//!   - let:
//!       name: foo
//!       value: FOO
//!   - reset:
//!       keep:
//!         - name: foo
//!           value: "$(var foo)"
//!   - group:
//!       scoped: false
//!       children:
//!         - log:
//!             message: "foo is $(var foo)"
//! ```
//!
//! Scalar attributes are stringified; a list of mappings is a nested entity
//! list; `children` holds the child entities of an entity. An entity whose
//! value is a list (`- group: [...]`) has no attributes and uses the list as
//! its children.

use launch_core::{Attribute, Entity, LaunchDescription, ParseError, Parser};
use serde_yaml::Value;

const CHILDREN_KEY: &str = "children";

/// A YAML node viewed as a launch entity
#[derive(Debug, Clone, Copy)]
pub struct YamlEntity<'a> {
    type_name: &'a str,
    value: &'a Value,
}

impl<'a> YamlEntity<'a> {
    pub fn new(type_name: &'a str, value: &'a Value) -> Self {
        Self { type_name, value }
    }

    /// Build the entity for a single-key mapping `{tag: attributes}`
    pub fn from_tagged(item: &'a Value) -> Result<Self, ParseError> {
        let Value::Mapping(mapping) = item else {
            return Err(ParseError::Malformed(format!(
                "expected a mapping with a single tag, found {}",
                kind(item)
            )));
        };
        let mut entries = mapping.iter();
        match (entries.next(), entries.next()) {
            (Some((Value::String(tag), value)), None) => Ok(Self::new(tag, value)),
            (Some((key, _)), None) => Err(ParseError::Malformed(format!(
                "entity tag must be a string, found {}",
                kind(key)
            ))),
            _ => Err(ParseError::Malformed(format!(
                "expected exactly one tag per entity, found {}",
                mapping.len()
            ))),
        }
    }

    /// Entities of a list whose items are `{tag: attributes}` mappings
    fn tagged_list(items: &'a [Value]) -> Result<Vec<Box<dyn Entity + 'a>>, ParseError> {
        items
            .iter()
            .map(|item| Ok(Box::new(Self::from_tagged(item)?) as Box<dyn Entity + 'a>))
            .collect()
    }

    fn type_error(&self, name: &str, expected: &'static str) -> ParseError {
        ParseError::AttributeType {
            entity: self.type_name.to_string(),
            attribute: name.to_string(),
            expected,
        }
    }
}

impl Entity for YamlEntity<'_> {
    fn type_name(&self) -> &str {
        self.type_name
    }

    fn children(&self) -> Result<Vec<Box<dyn Entity + '_>>, ParseError> {
        match self.value {
            Value::Sequence(items) => Self::tagged_list(items),
            Value::Mapping(mapping) => match mapping.get(CHILDREN_KEY) {
                Some(Value::Sequence(items)) => Self::tagged_list(items),
                Some(Value::Null) | None => Ok(Vec::new()),
                Some(_) => Err(self.type_error(CHILDREN_KEY, "a list of entities")),
            },
            _ => Ok(Vec::new()),
        }
    }

    fn attr(&self, name: &str) -> Result<Option<Attribute<'_>>, ParseError> {
        let (key, value) = match self.value {
            Value::Mapping(mapping) => {
                match mapping.iter().find(|(k, _)| k.as_str() == Some(name)) {
                    Some((Value::String(key), value)) => (key.as_str(), value),
                    _ => return Ok(None),
                }
            }
            // list form `- group: [...]` carries children only
            Value::Null | Value::Sequence(_) => return Ok(None),
            other => {
                return Err(ParseError::Malformed(format!(
                    "attributes of '{}' should be a mapping, found {}",
                    self.type_name,
                    kind(other)
                )))
            }
        };
        let attribute = match value {
            Value::Null => None,
            Value::String(text) => Some(Attribute::Text(text.clone())),
            Value::Bool(flag) => Some(Attribute::Text(flag.to_string())),
            Value::Number(number) => Some(Attribute::Text(number.to_string())),
            Value::Sequence(items) => {
                let mut entities: Vec<Box<dyn Entity + '_>> = Vec::with_capacity(items.len());
                for item in items {
                    if !item.is_mapping() {
                        return Err(self.type_error(name, "a list of mappings"));
                    }
                    // untagged items are named after the attribute holding them
                    entities.push(Box::new(YamlEntity::new(key, item)));
                }
                Some(Attribute::Entities(entities))
            }
            _ => return Err(self.type_error(name, "text or a list of mappings")),
        };
        Ok(attribute)
    }
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Sequence(_) => "a list",
        Value::Mapping(_) => "a mapping",
        Value::Tagged(_) => "a tagged value",
    }
}

/// Parse a launch description from YAML source
pub fn parse_description(
    source: &str,
    parser: &Parser,
) -> Result<LaunchDescription, YamlFrontendError> {
    let document: Value = serde_yaml::from_str(source)?;
    let root = YamlEntity::from_tagged(&document)?;
    log::debug!("parsing YAML launch description rooted at '{}'", root.type_name());
    Ok(parser.parse_description(&root)?)
}

/// Load and parse a launch description from a YAML file
pub fn from_file(path: &str, parser: &Parser) -> Result<LaunchDescription, YamlFrontendError> {
    let source = std::fs::read_to_string(path).map_err(|e| YamlFrontendError::Io {
        path: path.to_string(),
        source: e,
    })?;
    parse_description(&source, parser)
}

/// Errors that can occur when loading a YAML launch description
#[derive(Debug, thiserror::Error)]
pub enum YamlFrontendError {
    #[error("Failed to read launch file '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Invalid launch description: {0}")]
    Parse(#[from] ParseError),
}
