//! Output configuration for metadata export.
//!
//! Loaded from a YAML file passed with `--config`; command-line flags
//! override individual values. Missing keys fall back to the defaults.
//!
//! # Example YAML
//!
//! ```yaml
//! format: yaml
//! pretty: true
//! include_hidden: false
//! include_initial_values: true
//! ```

use std::io::{BufReader, BufWriter};
use std::path::Path;

use command_info_core::{CommandInfo, PropertyMetadata};
use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Serialization format for exported metadata.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// JSON (the default).
    #[default]
    Json,
    /// YAML.
    Yaml,
}

/// Settings controlling how metadata is rendered.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DumpConfig {
    /// Output format.
    pub format: OutputFormat,
    /// Pretty-print JSON output.
    pub pretty: bool,
    /// Keep arguments marked hidden.
    pub include_hidden: bool,
    /// Keep simulated initial values.
    pub include_initial_values: bool,
}

impl Default for DumpConfig {
    fn default() -> Self {
        Self {
            format: OutputFormat::Json,
            pretty: true,
            include_hidden: true,
            include_initial_values: true,
        }
    }
}

impl DumpConfig {
    /// Loads configuration from a YAML file.
    ///
    /// # Errors
    ///
    /// Returns [`IoError`](crate::error::CliError::IoError) if the file cannot
    /// be read, or [`YamlError`](crate::error::CliError::YamlError) if
    /// parsing fails.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let file = std::fs::File::open(path)?;
        let reader = BufReader::new(file);
        let config = serde_yaml::from_reader(reader)?;
        Ok(config)
    }

    /// Saves the configuration as YAML.
    ///
    /// # Errors
    ///
    /// Returns [`IoError`](crate::error::CliError::IoError) if the file cannot
    /// be written, or [`YamlError`](crate::error::CliError::YamlError) if
    /// serialization fails.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let file = std::fs::File::create(path)?;
        let writer = BufWriter::new(file);
        serde_yaml::to_writer(writer, self)?;
        Ok(())
    }

    /// Drops the parts of a command tree this configuration excludes.
    pub fn filter_tree(&self, info: &mut CommandInfo) {
        self.filter_arguments(&mut info.arguments);
        for sub in &mut info.subcommands {
            self.filter_tree(sub);
        }
    }

    /// Drops the parts of an argument list this configuration excludes.
    pub fn filter_arguments(&self, arguments: &mut Vec<PropertyMetadata>) {
        if !self.include_hidden {
            arguments.retain(|a| !a.is_hidden);
        }
        if !self.include_initial_values {
            for argument in arguments.iter_mut() {
                argument.initial_value = None;
            }
        }
    }

    /// Serializes `value` in the configured format.
    ///
    /// # Errors
    ///
    /// Returns a JSON or YAML error if serialization fails.
    pub fn render<T: Serialize>(&self, value: &T) -> Result<String> {
        let rendered = match (self.format, self.pretty) {
            (OutputFormat::Json, true) => serde_json::to_string_pretty(value)?,
            (OutputFormat::Json, false) => serde_json::to_string(value)?,
            (OutputFormat::Yaml, _) => serde_yaml::to_string(value)?,
        };
        Ok(rendered)
    }
}
