//! Launch runner
//!
//! Loads a launch description with the frontend matching the file extension,
//! runs it through a [`LaunchService`](launch_core::LaunchService) and reports
//! the resulting launch configurations and environment changes.

pub mod cli;

pub use cli::{LaunchArgs, OutputFormat};

use anyhow::{bail, Context};
use indexmap::IndexMap;
use launch_core::{LaunchDescription, LaunchOutcome, Parser};
use serde::Serialize;
use std::fmt::Write as _;
use std::path::Path;

/// Frontend able to read a launch file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Frontend {
    Xml,
    Yaml,
}

impl Frontend {
    /// Pick the frontend from the file extension
    pub fn for_path(path: &str) -> anyhow::Result<Self> {
        let extension = Path::new(path)
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase);
        match extension.as_deref() {
            Some("xml") => Ok(Frontend::Xml),
            Some("yaml") | Some("yml") => Ok(Frontend::Yaml),
            _ => bail!(
                "Cannot tell the format of '{}': expected a .xml, .yaml or .yml file",
                path
            ),
        }
    }
}

/// Load and parse the launch file at `path`
pub fn load_description(path: &str, parser: &Parser) -> anyhow::Result<LaunchDescription> {
    let description = match Frontend::for_path(path)? {
        Frontend::Xml => launch_xml::from_file(path, parser)?,
        Frontend::Yaml => launch_yaml::from_file(path, parser)?,
    };
    log::debug!("Loaded {} entities from {}", description.len(), path);
    Ok(description)
}

/// Environment variables added, changed or removed by a run
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct EnvironmentChanges {
    pub set: IndexMap<String, String>,
    pub unset: Vec<String>,
}

impl EnvironmentChanges {
    /// Difference between the environment before and after a run
    pub fn between(before: &IndexMap<String, String>, after: &IndexMap<String, String>) -> Self {
        let set = after
            .iter()
            .filter(|(name, value)| before.get(*name) != Some(*value))
            .map(|(name, value)| (name.clone(), value.clone()))
            .collect();
        let unset = before
            .keys()
            .filter(|name| !after.contains_key(*name))
            .cloned()
            .collect();
        Self { set, unset }
    }
}

/// What the runner prints after executing a description
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Report {
    pub launch_configurations: IndexMap<String, String>,
    pub environment_changes: EnvironmentChanges,
    pub shutdown_reason: Option<String>,
    pub actions_executed: usize,
}

impl Report {
    pub fn new(outcome: &LaunchOutcome, initial_environment: &IndexMap<String, String>) -> Self {
        Self {
            launch_configurations: outcome.context.launch_configurations.clone(),
            environment_changes: EnvironmentChanges::between(
                initial_environment,
                &outcome.context.environment,
            ),
            shutdown_reason: outcome.shutdown_reason.clone(),
            actions_executed: outcome.actions_executed,
        }
    }

    /// Render the report in `format`
    pub fn render(&self, format: OutputFormat) -> anyhow::Result<String> {
        match format {
            OutputFormat::Json => {
                serde_json::to_string_pretty(self).context("Failed to render JSON report")
            }
            OutputFormat::Yaml => {
                serde_yaml::to_string(self).context("Failed to render YAML report")
            }
            OutputFormat::Text => Ok(self.render_text()),
        }
    }

    fn render_text(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "Actions executed: {}", self.actions_executed);
        let _ = writeln!(out, "Launch configurations:");
        for (name, value) in &self.launch_configurations {
            let _ = writeln!(out, "  {} = {}", name, value);
        }
        let _ = writeln!(out, "Environment changes:");
        for (name, value) in &self.environment_changes.set {
            let _ = writeln!(out, "  {}={}", name, value);
        }
        for name in &self.environment_changes.unset {
            let _ = writeln!(out, "  unset {}", name);
        }
        if let Some(reason) = &self.shutdown_reason {
            let _ = writeln!(out, "Shutdown: {}", reason);
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn map(pairs: &[(&str, &str)]) -> IndexMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_frontend_for_path() {
        assert_eq!(Frontend::for_path("a/b.launch.xml").unwrap(), Frontend::Xml);
        assert_eq!(Frontend::for_path("b.YAML").unwrap(), Frontend::Yaml);
        assert_eq!(Frontend::for_path("b.yml").unwrap(), Frontend::Yaml);
        assert!(Frontend::for_path("b.py").is_err());
        assert!(Frontend::for_path("launch").is_err());
    }

    #[test]
    fn test_environment_changes() {
        let before = map(&[("HOME", "/root"), ("OLD", "1"), ("KEEP", "x")]);
        let after = map(&[("HOME", "/home/robot"), ("KEEP", "x"), ("NEW", "2")]);

        let changes = EnvironmentChanges::between(&before, &after);
        assert_eq!(changes.set, map(&[("HOME", "/home/robot"), ("NEW", "2")]));
        assert_eq!(changes.unset, vec!["OLD".to_string()]);
    }

    #[test]
    fn test_render_json() {
        let report = Report {
            launch_configurations: map(&[("robot", "turtle")]),
            environment_changes: EnvironmentChanges::default(),
            shutdown_reason: Some("done".to_string()),
            actions_executed: 3,
        };
        let json: serde_json::Value =
            serde_json::from_str(&report.render(OutputFormat::Json).unwrap()).unwrap();
        assert_eq!(json["launch_configurations"]["robot"], "turtle");
        assert_eq!(json["shutdown_reason"], "done");
        assert_eq!(json["actions_executed"], 3);
    }

    #[test]
    fn test_render_text() {
        let report = Report {
            launch_configurations: map(&[("robot", "turtle")]),
            environment_changes: EnvironmentChanges {
                set: map(&[("A", "1")]),
                unset: vec!["B".to_string()],
            },
            shutdown_reason: None,
            actions_executed: 2,
        };
        let text = report.render(OutputFormat::Text).unwrap();
        assert!(text.contains("  robot = turtle"));
        assert!(text.contains("  A=1"));
        assert!(text.contains("  unset B"));
        assert!(!text.contains("Shutdown"));
    }
}
