//! Config subcommand handlers for rezmark.

use tracing::warn;

use rezmark_config::{Config, ConfigLoader, ConfigValidator};

use crate::cli::ConfigAction;

/// Handle config subcommands.
pub(crate) fn handle_config_command(
    action: ConfigAction,
    config: &Config,
) -> Result<(), Box<dyn std::error::Error>> {
    match action {
        ConfigAction::Show => config_show(config),
        ConfigAction::Validate => config_validate(config),
    }
}

/// Print the effective configuration with API keys masked.
fn config_show(config: &Config) -> Result<(), Box<dyn std::error::Error>> {
    let mut masked = config.clone();
    for provider in masked.providers.values_mut() {
        if provider.api_key.is_some() {
            provider.api_key = Some("********".to_string());
        }
    }
    print!("{}", ConfigLoader::to_toml(&masked)?);
    Ok(())
}

fn config_validate(config: &Config) -> Result<(), Box<dyn std::error::Error>> {
    let result = ConfigValidator::validate(config)?;

    for warning in &result.warnings {
        warn!("{}: {}", warning.path, warning.message);
        println!("warning: {}: {}", warning.path, warning.message);
    }
    for error in &result.errors {
        println!("error: {}: {}", error.path, error.message);
    }

    if result.is_valid() {
        println!("Configuration is valid");
        Ok(())
    } else {
        Err(format!("{} configuration error(s)", result.errors.len()).into())
    }
}
