//! CLI definitions for rezmark.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

use rezmark_markdown::Source;

/// rezmark CLI.
#[derive(Parser)]
#[command(name = "rezmark")]
#[command(about = "Save LLM and agent results as timestamped Markdown")]
#[command(version)]
pub(crate) struct Cli {
    /// Configuration file path
    #[arg(short, long, default_value = "config/default.toml", global = true)]
    pub config: PathBuf,

    /// Dotenv file loaded before the configuration is read
    #[arg(long, global = true)]
    pub env_file: Option<PathBuf>,

    /// Also write logs to daily-rotated files in this directory
    #[arg(long, global = true)]
    pub log_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub(crate) enum Commands {
    /// Save content as a timestamped Markdown file
    Save {
        /// Input file, stdin when absent or "-"
        input: Option<PathBuf>,

        /// How to interpret the input
        #[arg(long, value_enum, default_value_t = InputFormat::Text)]
        format: InputFormat,

        /// Filename prefix
        #[arg(long)]
        prefix: Option<String>,

        /// Output directory
        #[arg(long)]
        dir: Option<PathBuf>,

        /// Header level for opaque content
        #[arg(long)]
        header_level: Option<u8>,

        /// Leave the time out of the filename
        #[arg(long)]
        no_time: bool,

        /// Metadata entry, repeatable
        #[arg(long = "meta", value_name = "KEY=VALUE", value_parser = parse_key_value)]
        meta: Vec<(String, String)>,

        /// Record this configured provider's model and endpoint
        #[arg(long)]
        provider: Option<String>,
    },

    /// Dump input text into a fenced block
    Dump {
        /// Input file, stdin when absent or "-"
        input: Option<PathBuf>,

        /// Title and filename stem
        #[arg(long)]
        label: Option<String>,

        /// Output directory
        #[arg(long)]
        dir: Option<PathBuf>,
    },

    /// Write a model answer report with sources
    Report {
        /// Input file, stdin when absent or "-"
        input: Option<PathBuf>,

        /// Model name, defaults to the provider's model
        #[arg(long)]
        model: Option<String>,

        /// Question asked, used as the title
        #[arg(long)]
        query: Option<String>,

        /// Filename stem
        #[arg(long)]
        name: Option<String>,

        /// Source as URL or URL|TITLE, repeatable
        #[arg(long = "source", value_name = "URL[|TITLE]")]
        sources: Vec<Source>,

        /// Configured provider to take the model from
        #[arg(long)]
        provider: Option<String>,

        /// Output directory
        #[arg(long)]
        dir: Option<PathBuf>,
    },

    /// Print input with ANSI escape sequences removed
    StripAnsi {
        /// Input file, stdin when absent or "-"
        input: Option<PathBuf>,
    },

    /// Configuration commands
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
pub(crate) enum ConfigAction {
    /// Print the effective configuration
    Show,

    /// Check the configuration for errors
    Validate,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub(crate) enum InputFormat {
    /// Verbatim text
    Text,
    /// One bullet per non-empty line
    List,
    /// JSON: strings, arrays and objects map to text, lists and mappings
    Json,
    /// Raw text under a "Content" header
    Opaque,
}

fn parse_key_value(s: &str) -> Result<(String, String), String> {
    match s.split_once('=') {
        Some((key, value)) if !key.trim().is_empty() => {
            Ok((key.trim().to_string(), value.trim().to_string()))
        }
        _ => Err(format!("expected KEY=VALUE, got '{}'", s)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_key_value() {
        assert_eq!(
            parse_key_value("Model = phi-4").unwrap(),
            ("Model".to_string(), "phi-4".to_string())
        );
        assert_eq!(
            parse_key_value("Question=a=b").unwrap(),
            ("Question".to_string(), "a=b".to_string())
        );
        assert!(parse_key_value("novalue").is_err());
        assert!(parse_key_value("=x").is_err());
    }

    #[test]
    fn test_parse_save() {
        let cli = Cli::try_parse_from([
            "rezmark",
            "save",
            "answer.txt",
            "--prefix",
            "phi-4",
            "--header-level",
            "2",
            "--no-time",
            "--meta",
            "Model=phi-4",
            "--meta",
            "Endpoint=https://models.github.ai",
        ])
        .unwrap();

        match cli.command {
            Commands::Save {
                input,
                format,
                prefix,
                header_level,
                no_time,
                meta,
                ..
            } => {
                assert_eq!(input, Some(PathBuf::from("answer.txt")));
                assert_eq!(format, InputFormat::Text);
                assert_eq!(prefix.as_deref(), Some("phi-4"));
                assert_eq!(header_level, Some(2));
                assert!(no_time);
                assert_eq!(meta.len(), 2);
                assert_eq!(meta[1].0, "Endpoint");
            }
            _ => panic!("expected save"),
        }
    }

    #[test]
    fn test_parse_report_sources() {
        let cli = Cli::try_parse_from([
            "rezmark",
            "report",
            "--model",
            "sonar",
            "--source",
            "https://a.example|A",
            "--source",
            "https://b.example",
        ])
        .unwrap();

        match cli.command {
            Commands::Report { sources, model, .. } => {
                assert_eq!(model.as_deref(), Some("sonar"));
                assert_eq!(sources[0].title.as_deref(), Some("A"));
                assert_eq!(sources[1].title, None);
            }
            _ => panic!("expected report"),
        }
    }

    #[test]
    fn test_global_config_flag() {
        let cli =
            Cli::try_parse_from(["rezmark", "config", "show", "--config", "rez.toml"]).unwrap();
        assert_eq!(cli.config, PathBuf::from("rez.toml"));
        assert!(matches!(
            cli.command,
            Commands::Config {
                action: ConfigAction::Show
            }
        ));
    }
}
