//! Command-line interface for the launch runner

use argh::FromArgs;
use indexmap::IndexMap;
use launch_core::ServiceConfig;

/// Run an XML or YAML launch description
#[derive(FromArgs, Debug)]
pub struct LaunchArgs {
    /// path to the launch file (.xml, .yaml or .yml)
    #[argh(positional, default = "String::from(\"launch/default.launch.xml\")")]
    pub launch_file: String,

    /// set launch arguments (format: key:=value)
    #[argh(option, short = 'a', from_str_fn(parse_arg_override))]
    pub arg: Vec<(String, String)>,

    /// print the parsed actions without executing them
    #[argh(switch)]
    pub dry_run: bool,

    /// validate launch file and exit
    #[argh(switch)]
    pub validate: bool,

    /// start from an empty environment instead of this process's
    #[argh(switch)]
    pub no_inherit_env: bool,

    /// report format (text, yaml, json)
    #[argh(option, default = "OutputFormat::Text", from_str_fn(parse_format))]
    pub format: OutputFormat,

    /// log level (error, warn, info, debug, trace)
    #[argh(option, short = 'l', default = "String::from(\"info\")")]
    pub log_level: String,
}

/// Format of the report printed after a run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Yaml,
    Json,
}

/// Parse argument override in format "key:=value"
fn parse_arg_override(s: &str) -> Result<(String, String), String> {
    match s.split_once(":=") {
        Some((key, value)) if !key.is_empty() => Ok((key.to_string(), value.to_string())),
        _ => Err(format!(
            "Invalid argument format '{}'. Expected 'key:=value'",
            s
        )),
    }
}

fn parse_format(s: &str) -> Result<OutputFormat, String> {
    match s.to_lowercase().as_str() {
        "text" => Ok(OutputFormat::Text),
        "yaml" => Ok(OutputFormat::Yaml),
        "json" => Ok(OutputFormat::Json),
        other => Err(format!(
            "Unknown format '{}'. Expected text, yaml or json",
            other
        )),
    }
}

impl LaunchArgs {
    /// Convert argument overrides to an ordered map; later values win
    pub fn arg_overrides(&self) -> IndexMap<String, String> {
        self.arg.iter().cloned().collect()
    }

    /// Launch service configuration for these arguments
    pub fn service_config(&self) -> ServiceConfig {
        ServiceConfig {
            launch_arguments: self.arg_overrides(),
            inherit_environment: !self.no_inherit_env,
            ..ServiceConfig::default()
        }
    }

    /// Log filter, falling back to `info` for unknown levels
    pub fn log_filter(&self) -> &'static str {
        match self.log_level.to_lowercase().as_str() {
            "error" => "error",
            "warn" => "warn",
            "info" => "info",
            "debug" => "debug",
            "trace" => "trace",
            _ => "info",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_arg_override() {
        let result = parse_arg_override("robot:=turtle");
        assert_eq!(result, Ok(("robot".to_string(), "turtle".to_string())));
    }

    #[test]
    fn test_parse_arg_override_with_separator_in_value() {
        let result = parse_arg_override("url:=http://localhost:8080?a:=b");
        assert_eq!(
            result,
            Ok(("url".to_string(), "http://localhost:8080?a:=b".to_string()))
        );
    }

    #[test]
    fn test_parse_arg_override_invalid() {
        assert!(parse_arg_override("invalid").is_err());
        assert!(parse_arg_override(":=value").is_err());
    }

    #[test]
    fn test_parse_format() {
        assert_eq!(parse_format("JSON"), Ok(OutputFormat::Json));
        assert!(parse_format("toml").is_err());
    }

    #[test]
    fn test_service_config_from_args() {
        let args = LaunchArgs::from_args(
            &["launch"],
            &["demo.xml", "-a", "rate:=10", "-a", "rate:=20", "--no-inherit-env"],
        )
        .unwrap();

        let config = args.service_config();
        assert!(!config.inherit_environment);
        assert_eq!(config.launch_arguments.get("rate").map(String::as_str), Some("20"));
        assert_eq!(args.format, OutputFormat::Text);
        assert_eq!(args.log_filter(), "info");
    }
}
