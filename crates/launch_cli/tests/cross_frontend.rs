//! XML and YAML descriptions of the same launch behave identically

use launch_cli::load_description;
use launch_core::{ContextSnapshot, LaunchService, Parser, ServiceConfig};
use std::io::Write;
use tempfile::NamedTempFile;

const XML: &str = r#"<launch>
  <set_env name="ROBOT" value="turtle"/>
  <let name="foo" value="FOO"/>
  <let name="bar" value="$(env ROBOT)-BAR"/>
  <group>
    <let name="foo" value="scoped"/>
    <unset_env name="ROBOT"/>
  </group>
  <reset>
    <keep name="bar" value="$(var bar)"/>
    <keep name="baz" value="BAZ"/>
  </reset>
</launch>
"#;

const YAML: &str = r#"launch:
  - set_env: {name: ROBOT, value: turtle}
  - let: {name: foo, value: FOO}
  - let: {name: bar, value: "$(env ROBOT)-BAR"}
  - group:
      children:
        - let: {name: foo, value: scoped}
        - unset_env: {name: ROBOT}
  - reset:
      keep:
        - {name: bar, value: "$(var bar)"}
        - {name: baz, value: BAZ}
"#;

fn write_launch_file(suffix: &str, content: &str) -> NamedTempFile {
    let mut file = tempfile::Builder::new()
        .suffix(suffix)
        .tempfile()
        .unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file
}

fn run(path: &str) -> ContextSnapshot {
    let parser = Parser::with_builtin_actions().unwrap();
    let description = load_description(path, &parser).unwrap();
    let mut service = LaunchService::new(ServiceConfig {
        inherit_environment: false,
        ..ServiceConfig::default()
    });
    service.run(&description).unwrap().context
}

#[test]
fn test_xml_and_yaml_are_equivalent() {
    let xml = write_launch_file(".launch.xml", XML);
    let yaml = write_launch_file(".launch.yaml", YAML);

    let from_xml = run(xml.path().to_str().unwrap());
    let from_yaml = run(yaml.path().to_str().unwrap());

    assert_eq!(from_xml, from_yaml);
    assert_eq!(
        from_xml.launch_configurations.get("bar").map(String::as_str),
        Some("turtle-BAR")
    );
    assert_eq!(from_xml.launch_configurations.len(), 2);
    assert!(from_xml.environment.is_empty());
}

#[test]
fn test_unknown_extension_is_rejected() {
    let file = write_launch_file(".launch.py", "");
    let parser = Parser::with_builtin_actions().unwrap();
    let err = load_description(file.path().to_str().unwrap(), &parser).unwrap_err();
    assert!(err.to_string().contains(".xml, .yaml or .yml"));
}

#[test]
fn test_missing_file_is_reported() {
    let parser = Parser::with_builtin_actions().unwrap();
    let err = load_description("/nonexistent/demo.launch.xml", &parser).unwrap_err();
    assert!(err.to_string().contains("/nonexistent/demo.launch.xml"));
}
