//! Configuration loader.

use regex::Regex;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;
use tracing::debug;

use crate::error::ConfigError;
use crate::schema::Config;

static ENV_VAR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\$\{([^}]+)\}").expect("valid env var regex"));

/// Configuration loader with environment variable substitution.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Config, ConfigError> {
        if !path.exists() {
            return Err(ConfigError::NotFound(path.display().to_string()));
        }
        let content = fs::read_to_string(path)?;
        Self::load_str(&content)
    }

    /// Load configuration from a file, falling back to defaults when it is absent.
    pub fn load_or_default(path: &Path) -> Result<Config, ConfigError> {
        match Self::load(path) {
            Err(ConfigError::NotFound(_)) => {
                debug!("No config file at {:?}, using defaults", path);
                Ok(Config::default())
            }
            other => other,
        }
    }

    /// Load configuration from a string.
    pub fn load_str(content: &str) -> Result<Config, ConfigError> {
        let expanded = Self::expand_env_vars(content)?;
        let mut config: Config = toml::from_str(&expanded)?;
        Self::expand_directories(&mut config);
        Ok(config)
    }

    /// Render configuration back to TOML.
    pub fn to_toml(config: &Config) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(config)?)
    }

    /// Expand environment variables in the format `${VAR}`.
    ///
    /// Comments are copied through untouched.
    fn expand_env_vars(content: &str) -> Result<String, ConfigError> {
        let mut result = String::with_capacity(content.len());

        for line in content.split_inclusive('\n') {
            let (code, comment) = line.split_at(Self::comment_start(line).unwrap_or(line.len()));

            let mut last = 0;
            for cap in ENV_VAR.captures_iter(code) {
                let Some(whole) = cap.get(0) else { continue };
                let var_name = &cap[1];
                let var_value = std::env::var(var_name)
                    .map_err(|_| ConfigError::EnvVarNotSet(var_name.to_string()))?;
                result.push_str(&code[last..whole.start()]);
                result.push_str(&var_value);
                last = whole.end();
            }
            result.push_str(&code[last..]);
            result.push_str(comment);
        }

        Ok(result)
    }

    /// Byte offset of the `#` opening a comment, ignoring `#` inside strings.
    fn comment_start(line: &str) -> Option<usize> {
        let mut quote: Option<char> = None;
        let mut escaped = false;

        for (i, c) in line.char_indices() {
            match quote {
                Some('"') if escaped => escaped = false,
                Some('"') if c == '\\' => escaped = true,
                Some(q) if c == q => quote = None,
                Some(_) => {}
                None if c == '"' || c == '\'' => quote = Some(c),
                None if c == '#' => return Some(i),
                None => {}
            }
        }
        None
    }

    fn expand_directories(config: &mut Config) {
        for dir in [
            &mut config.output.directory,
            &mut config.dump.directory,
            &mut config.report.directory,
        ] {
            let expanded = match dir.to_str() {
                Some(raw) => Self::expand_path(raw),
                None => continue,
            };
            *dir = PathBuf::from(expanded);
        }
    }

    /// Expand shell-style paths (e.g., `~/rez`).
    pub fn expand_path(path: &str) -> String {
        shellexpand::tilde(path).to_string()
    }
}
