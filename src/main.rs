//! rezmark - save LLM and agent results as timestamped Markdown
//!
//! Main entry point for the rezmark CLI.

use std::path::Path;

use clap::Parser;
use tracing::{debug, info};
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use rezmark_config::ConfigLoader;

mod cli;
mod cmd_config;
mod cmd_output;

use cli::{Cli, Commands};
use cmd_config::handle_config_command;
use cmd_output::{
    handle_dump, handle_report, handle_save, handle_strip_ansi, ReportArgs, SaveArgs,
};

/// Initialize tracing.
///
/// Console output goes to stderr so stdout carries only command results.
/// With `log_dir`, logs are also written there with daily rotation.
fn init_tracing(log_dir: Option<&Path>) -> Result<(), Box<dyn std::error::Error>> {
    let file_layer = match log_dir {
        Some(dir) => {
            std::fs::create_dir_all(dir)?;
            let file_appender = RollingFileAppender::builder()
                .rotation(Rotation::DAILY)
                .filename_prefix("rezmark")
                .filename_suffix("log")
                .max_log_files(30)
                .build(dir)?;

            let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

            // Keep the worker alive for the program duration
            static GUARD: std::sync::OnceLock<tracing_appender::non_blocking::WorkerGuard> =
                std::sync::OnceLock::new();
            let _ = GUARD.set(guard);

            Some(fmt::layer().with_writer(non_blocking).with_ansi(false))
        }
        None => None,
    };

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(true)
                .with_ansi(true),
        )
        .with(file_layer)
        .init();

    Ok(())
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    init_tracing(cli.log_dir.as_deref())?;

    if let Some(ref env_file) = cli.env_file {
        dotenvy::from_path(env_file)?;
        debug!("Loaded environment from {}", env_file.display());
    }

    let config = ConfigLoader::load_or_default(&cli.config)?;
    info!("rezmark v{}", env!("CARGO_PKG_VERSION"));

    match cli.command {
        Commands::Save {
            input,
            format,
            prefix,
            dir,
            header_level,
            no_time,
            meta,
            provider,
        } => {
            let args = SaveArgs {
                input,
                format,
                prefix,
                dir,
                header_level,
                no_time,
                meta,
                provider,
            };
            handle_save(&config, args).await?;
        }
        Commands::Dump { input, label, dir } => {
            handle_dump(&config, input, label, dir)?;
        }
        Commands::Report {
            input,
            model,
            query,
            name,
            sources,
            provider,
            dir,
        } => {
            let args = ReportArgs {
                input,
                model,
                query,
                name,
                sources,
                provider,
                dir,
            };
            handle_report(&config, args)?;
        }
        Commands::StripAnsi { input } => handle_strip_ansi(input)?,
        Commands::Config { action } => handle_config_command(action, &config)?,
    }

    Ok(())
}
