//! XML frontend for launch descriptions
//!
//! Each element is an entity named by its tag. Attributes are XML attributes;
//! nested entity lists (such as the `keep` entries of `reset`) are child
//! elements carrying the attribute's name.
//!
//! ```xml
//! <launch>
//!   <let name="foo" value="FOO"/>
//!   <reset>
//!     <keep name="foo" value="$(var foo)"/>
//!   </reset>
//! </launch>
//! ```

use launch_core::{Attribute, Entity, LaunchDescription, ParseError, Parser};

/// An XML element viewed as a launch entity
#[derive(Debug, Clone, Copy)]
pub struct XmlEntity<'a, 'input> {
    node: roxmltree::Node<'a, 'input>,
}

impl<'a, 'input> XmlEntity<'a, 'input> {
    pub fn new(node: roxmltree::Node<'a, 'input>) -> Self {
        Self { node }
    }

    fn child_elements(&self) -> impl Iterator<Item = roxmltree::Node<'a, 'input>> {
        self.node.children().filter(|n| n.is_element())
    }
}

impl Entity for XmlEntity<'_, '_> {
    fn type_name(&self) -> &str {
        self.node.tag_name().name()
    }

    fn children(&self) -> Result<Vec<Box<dyn Entity + '_>>, ParseError> {
        Ok(self
            .child_elements()
            .map(|node| Box::new(XmlEntity::new(node)) as Box<dyn Entity + '_>)
            .collect())
    }

    fn attr(&self, name: &str) -> Result<Option<Attribute<'_>>, ParseError> {
        if let Some(value) = self.node.attribute(name) {
            return Ok(Some(Attribute::Text(value.to_string())));
        }
        let entities: Vec<Box<dyn Entity + '_>> = self
            .child_elements()
            .filter(|node| node.tag_name().name() == name)
            .map(|node| Box::new(XmlEntity::new(node)) as Box<dyn Entity + '_>)
            .collect();
        if entities.is_empty() {
            Ok(None)
        } else {
            Ok(Some(Attribute::Entities(entities)))
        }
    }
}

/// Parse a launch description from XML source
pub fn parse_description(source: &str, parser: &Parser) -> Result<LaunchDescription, XmlFrontendError> {
    let document = roxmltree::Document::parse(source)?;
    let root = XmlEntity::new(document.root_element());
    log::debug!("parsing XML launch description rooted at <{}>", root.type_name());
    Ok(parser.parse_description(&root)?)
}

/// Load and parse a launch description from an XML file
pub fn from_file(path: &str, parser: &Parser) -> Result<LaunchDescription, XmlFrontendError> {
    let source = std::fs::read_to_string(path).map_err(|e| XmlFrontendError::Io {
        path: path.to_string(),
        source: e,
    })?;
    parse_description(&source, parser)
}

/// Errors that can occur when loading an XML launch description
#[derive(Debug, thiserror::Error)]
pub enum XmlFrontendError {
    #[error("Failed to read launch file '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse XML: {0}")]
    Xml(#[from] roxmltree::Error),

    #[error("Invalid launch description: {0}")]
    Parse(#[from] ParseError),
}

#[cfg(test)]
mod tests {
    use super::*;
    use launch_core::actions::{GroupAction, ResetLaunchConfigurations};
    use launch_core::{LaunchService, ServiceConfig};

    fn parser() -> Parser {
        Parser::with_builtin_actions().unwrap()
    }

    fn run(source: &str) -> LaunchService {
        let description = parse_description(source, &parser()).unwrap();
        let mut service = LaunchService::new(ServiceConfig {
            inherit_environment: false,
            ..ServiceConfig::default()
        });
        service.run(&description).unwrap();
        service
    }

    #[test]
    fn test_reset_keep() {
        let xml = r#"
            <launch>
                <let name="foo" value="FOO"/>
                <let name="bar" value="BAR"/>
                <reset>
                    <keep name="bar" value="$(var bar)"/>
                    <keep name="baz" value="BAZ"/>
                </reset>
            </launch>
        "#;
        let description = parse_description(xml, &parser()).unwrap();
        assert_eq!(description.len(), 3);
        let reset = description.entities()[2]
            .as_any()
            .downcast_ref::<ResetLaunchConfigurations>()
            .unwrap();
        assert_eq!(reset.keep_entries().map(<[_]>::len), Some(2));

        let service = run(xml);
        let configs = service.context().launch_configurations();
        assert_eq!(configs.len(), 2);
        assert_eq!(configs.get("bar").map(String::as_str), Some("BAR"));
        assert_eq!(configs.get("baz").map(String::as_str), Some("BAZ"));
    }

    #[test]
    fn test_group_children_and_scope() {
        let xml = r#"
            <launch>
                <let name="a" value="outer"/>
                <group scoped="false">
                    <set_env name="A" value="$(var a)"/>
                    <let name="a" value="inner"/>
                </group>
            </launch>
        "#;
        let description = parse_description(xml, &parser()).unwrap();
        let group = description.entities()[1]
            .as_any()
            .downcast_ref::<GroupAction>()
            .unwrap();
        assert!(!group.is_scoped());
        assert_eq!(group.actions().len(), 2);

        let service = run(xml);
        assert_eq!(service.context().get_environment("A"), Some("outer"));
        assert_eq!(service.context().get_launch_configuration("a"), Some("inner"));
    }

    #[test]
    fn test_arg_name_with_substitution() {
        let xml = r#"
            <launch>
                <let name="prefix" value="robot"/>
                <arg name="$(var prefix)_rate" default="10" description="rate of $(var prefix)"/>
            </launch>
        "#;
        let service = run(xml);
        assert_eq!(service.context().get_launch_configuration("robot_rate"), Some("10"));
        assert_eq!(service.context().get_launch_configuration("$(var prefix)_rate"), None);
    }

    #[test]
    fn test_conditions() {
        let xml = r#"
            <launch>
                <let name="sim" value="true"/>
                <let name="mode" value="sim" if="$(var sim)"/>
                <let name="hw" value="yes" unless="$(var sim)"/>
            </launch>
        "#;
        let service = run(xml);
        assert_eq!(service.context().get_launch_configuration("mode"), Some("sim"));
        assert_eq!(service.context().get_launch_configuration("hw"), None);
    }

    #[test]
    fn test_unknown_tag() {
        let result = parse_description("<launch><spawn name=\"x\"/></launch>", &parser());
        assert!(matches!(
            result,
            Err(XmlFrontendError::Parse(ParseError::UnknownTag(tag))) if tag == "spawn"
        ));
    }

    #[test]
    fn test_missing_attribute() {
        let result = parse_description("<launch><set_env name=\"A\"/></launch>", &parser());
        assert!(matches!(
            result,
            Err(XmlFrontendError::Parse(ParseError::MissingAttribute { ref attribute, .. }))
                if attribute == "value"
        ));
    }

    #[test]
    fn test_wrong_root() {
        let result = parse_description("<robot/>", &parser());
        assert!(matches!(
            result,
            Err(XmlFrontendError::Parse(ParseError::UnexpectedRoot(_)))
        ));
    }

    #[test]
    fn test_malformed_xml() {
        let result = parse_description("<launch>", &parser());
        assert!(matches!(result, Err(XmlFrontendError::Xml(_))));
    }
}
