//! Configuration schema definitions.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::PathBuf;

use crate::error::ConfigError;

/// Root configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub output: OutputConfig,

    #[serde(default)]
    pub dump: DumpConfig,

    #[serde(default)]
    pub report: ReportConfig,

    #[serde(default)]
    pub providers: BTreeMap<String, ProviderConfig>,
}

impl Config {
    /// Look up a provider by name.
    pub fn provider(&self, name: &str) -> Result<&ProviderConfig, ConfigError> {
        self.providers
            .get(name)
            .ok_or_else(|| ConfigError::InvalidValue {
                field: "providers".to_string(),
                message: format!("unknown provider '{}'", name),
            })
    }
}

/// Defaults for timestamped Markdown output.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutputConfig {
    #[serde(default = "default_output_directory")]
    pub directory: PathBuf,

    #[serde(default = "default_prefix")]
    pub prefix: String,

    #[serde(default = "default_header_level")]
    pub header_level: u8,

    #[serde(default = "default_true")]
    pub include_time_in_filename: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            directory: default_output_directory(),
            prefix: default_prefix(),
            header_level: default_header_level(),
            include_time_in_filename: true,
        }
    }
}

fn default_output_directory() -> PathBuf {
    PathBuf::from(".")
}

fn default_prefix() -> String {
    "output".to_string()
}

fn default_header_level() -> u8 {
    1
}

fn default_true() -> bool {
    true
}

/// Debug dump configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DumpConfig {
    #[serde(default = "default_rez_directory")]
    pub directory: PathBuf,

    #[serde(default = "default_label")]
    pub label: String,
}

impl Default for DumpConfig {
    fn default() -> Self {
        Self {
            directory: default_rez_directory(),
            label: default_label(),
        }
    }
}

fn default_rez_directory() -> PathBuf {
    PathBuf::from("rez")
}

fn default_label() -> String {
    "output".to_string()
}

/// Report configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportConfig {
    #[serde(default = "default_rez_directory")]
    pub directory: PathBuf,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            directory: default_rez_directory(),
        }
    }
}

/// LLM provider settings, passed explicitly instead of read from ambient env.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProviderConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
}

impl ProviderConfig {
    /// `Model` and `Endpoint` pairs recorded next to a saved answer.
    ///
    /// The API key is never included.
    pub fn metadata(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        if let Some(ref model) = self.model {
            pairs.push(("Model", model.clone()));
        }
        if let Some(ref base_url) = self.base_url {
            pairs.push(("Endpoint", base_url.clone()));
        }
        pairs
    }
}

#[cfg(test)]
#[path = "schema_tests.rs"]
mod tests;
