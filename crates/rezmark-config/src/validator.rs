//! Configuration validation.

use std::path::Path;

use crate::error::ConfigError;
use crate::schema::Config;

/// Validation result.
#[derive(Debug, Default)]
pub struct ValidationResult {
    pub errors: Vec<ValidationError>,
    pub warnings: Vec<ValidationWarning>,
}

impl ValidationResult {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn add_error(&mut self, error: ValidationError) {
        self.errors.push(error);
    }

    pub fn add_warning(&mut self, warning: ValidationWarning) {
        self.warnings.push(warning);
    }
}

/// A validation error.
#[derive(Debug)]
pub struct ValidationError {
    pub path: String,
    pub message: String,
}

impl ValidationError {
    pub fn new(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
        }
    }
}

/// A validation warning.
#[derive(Debug)]
pub struct ValidationWarning {
    pub path: String,
    pub message: String,
}

impl ValidationWarning {
    pub fn new(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
        }
    }
}

/// Configuration validator.
pub struct ConfigValidator;

impl ConfigValidator {
    /// Validate the configuration.
    pub fn validate(config: &Config) -> Result<ValidationResult, ConfigError> {
        let mut result = ValidationResult::default();

        Self::validate_output(config, &mut result);
        Self::validate_dump(config, &mut result);
        Self::validate_report(config, &mut result);
        Self::validate_providers(config, &mut result);

        Ok(result)
    }

    fn validate_output(config: &Config, result: &mut ValidationResult) {
        let output = &config.output;

        if output.prefix.is_empty() {
            result.add_error(ValidationError::new(
                "output.prefix",
                "Prefix cannot be empty",
            ));
        } else if output.prefix.contains(['/', '\\']) {
            result.add_error(ValidationError::new(
                "output.prefix",
                "Prefix cannot contain path separators, use output.directory instead",
            ));
        }

        // Accepted as-is at write time, but not valid Markdown.
        if !(1..=6).contains(&output.header_level) {
            result.add_warning(ValidationWarning::new(
                "output.header_level",
                format!(
                    "header_level {} is outside 1-6, opaque content headers will be malformed",
                    output.header_level
                ),
            ));
        }

        Self::warn_if_not_directory(&output.directory, "output.directory", result);
    }

    fn validate_dump(config: &Config, result: &mut ValidationResult) {
        if config.dump.directory.as_os_str().is_empty() {
            result.add_error(ValidationError::new(
                "dump.directory",
                "Dump directory cannot be empty",
            ));
        }

        if config.dump.label.is_empty() {
            result.add_error(ValidationError::new("dump.label", "Label cannot be empty"));
        }

        Self::warn_if_not_directory(&config.dump.directory, "dump.directory", result);
    }

    fn validate_report(config: &Config, result: &mut ValidationResult) {
        Self::warn_if_not_directory(&config.report.directory, "report.directory", result);
    }

    fn validate_providers(config: &Config, result: &mut ValidationResult) {
        for (name, provider) in &config.providers {
            if provider.api_key.is_none() {
                result.add_warning(ValidationWarning::new(
                    format!("providers.{}.api_key", name),
                    "API key is not set, may need to be set via environment variable",
                ));
            }

            if let Some(ref url) = provider.base_url {
                if !url.starts_with("http://") && !url.starts_with("https://") {
                    result.add_error(ValidationError::new(
                        format!("providers.{}.base_url", name),
                        "base_url must start with http:// or https://",
                    ));
                }
            }
        }
    }

    /// Missing directories are created on first write; an existing file is not.
    fn warn_if_not_directory(dir: &Path, path: &str, result: &mut ValidationResult) {
        if dir.exists() && !dir.is_dir() {
            result.add_warning(ValidationWarning::new(
                path,
                format!("{:?} exists but is not a directory, writes will fail", dir),
            ));
        }
    }
}

#[cfg(test)]
#[path = "validator_tests.rs"]
mod tests;
