//! Output subcommand handlers: save, dump, report and strip-ansi.

use std::io::{Read, Write};
use std::path::{Path, PathBuf};

use tracing::info;

use rezmark_config::Config;
use rezmark_markdown::{
    strip_ansi, Content, DebugDump, MarkdownPersister, Metadata, PersistOptions, Report,
    ReportWriter, Source,
};

use crate::cli::InputFormat;

/// Arguments of `rezmark save`.
pub(crate) struct SaveArgs {
    pub input: Option<PathBuf>,
    pub format: InputFormat,
    pub prefix: Option<String>,
    pub dir: Option<PathBuf>,
    pub header_level: Option<u8>,
    pub no_time: bool,
    pub meta: Vec<(String, String)>,
    pub provider: Option<String>,
}

/// Arguments of `rezmark report`.
pub(crate) struct ReportArgs {
    pub input: Option<PathBuf>,
    pub model: Option<String>,
    pub query: Option<String>,
    pub name: Option<String>,
    pub sources: Vec<Source>,
    pub provider: Option<String>,
    pub dir: Option<PathBuf>,
}

/// Read a file, or stdin when `input` is absent or `-`.
pub(crate) fn read_input(input: Option<&Path>) -> std::io::Result<String> {
    match input {
        Some(path) if path != Path::new("-") => std::fs::read_to_string(path),
        _ => {
            let mut text = String::new();
            std::io::stdin().read_to_string(&mut text)?;
            Ok(text)
        }
    }
}

/// Interpret raw input as content.
pub(crate) fn parse_content(
    text: String,
    format: InputFormat,
) -> Result<Content, Box<dyn std::error::Error>> {
    Ok(match format {
        InputFormat::Text => Content::Text(text),
        InputFormat::List => Content::sequence(
            text.lines()
                .map(str::trim)
                .filter(|line| !line.is_empty())
                .map(str::to_string)
                .collect::<Vec<_>>(),
        ),
        InputFormat::Json => Content::from(serde_json::from_str::<serde_json::Value>(&text)?),
        InputFormat::Opaque => Content::Opaque(text),
    })
}

/// Merge configured output defaults with command-line overrides.
pub(crate) fn persist_options(config: &Config, args: &SaveArgs) -> PersistOptions {
    let output = &config.output;
    PersistOptions::new()
        .with_prefix(args.prefix.clone().unwrap_or_else(|| output.prefix.clone()))
        .with_directory(args.dir.clone().unwrap_or_else(|| output.directory.clone()))
        .with_header_level(args.header_level.unwrap_or(output.header_level))
        .with_time_in_filename(output.include_time_in_filename && !args.no_time)
}

/// Provider metadata first, then explicit `--meta` pairs.
pub(crate) fn build_metadata(
    config: &Config,
    provider: Option<&str>,
    meta: &[(String, String)],
) -> Result<Metadata, Box<dyn std::error::Error>> {
    let mut metadata = Metadata::new();
    if let Some(name) = provider {
        metadata.extend(config.provider(name)?.metadata());
    }
    metadata.extend(meta.iter().cloned());
    Ok(metadata)
}

/// Persist the input and print the written path. Returns that path.
pub(crate) async fn handle_save(
    config: &Config,
    args: SaveArgs,
) -> Result<PathBuf, Box<dyn std::error::Error>> {
    let text = read_input(args.input.as_deref())?;
    let content = parse_content(text, args.format)?;
    let metadata = build_metadata(config, args.provider.as_deref(), &args.meta)?;

    let persister = MarkdownPersister::new(persist_options(config, &args));
    let path = persister
        .persist_async(content, (!metadata.is_empty()).then_some(metadata))
        .await?;

    info!("Saved to {}", path.display());
    println!("{}", path.display());
    Ok(path)
}

pub(crate) fn handle_dump(
    config: &Config,
    input: Option<PathBuf>,
    label: Option<String>,
    dir: Option<PathBuf>,
) -> Result<PathBuf, Box<dyn std::error::Error>> {
    let text = read_input(input.as_deref())?;
    let dump = DebugDump::new(dir.unwrap_or_else(|| config.dump.directory.clone()));
    let label = label.unwrap_or_else(|| config.dump.label.clone());

    let path = dump.save_text(&label, strip_ansi(&text).trim_end())?;

    info!("Saved to {}", path.display());
    println!("{}", path.display());
    Ok(path)
}

pub(crate) fn handle_report(
    config: &Config,
    args: ReportArgs,
) -> Result<PathBuf, Box<dyn std::error::Error>> {
    let provider_model = match args.provider.as_deref() {
        Some(name) => config.provider(name)?.model.clone(),
        None => None,
    };
    let model = args
        .model
        .or(provider_model)
        .ok_or("a model is required: pass --model or a --provider with a model")?;

    let text = read_input(args.input.as_deref())?;
    let mut report = Report::new(text.trim_end(), model);
    report.query = args.query;
    report.function_name = args.name;
    report.sources = args.sources;

    let writer = ReportWriter::new(args.dir.unwrap_or_else(|| config.report.directory.clone()));
    let path = writer.write(&report)?;

    info!("Saved to {}", path.display());
    println!("{}", path.display());
    Ok(path)
}

pub(crate) fn handle_strip_ansi(input: Option<PathBuf>) -> Result<(), Box<dyn std::error::Error>> {
    let text = read_input(input.as_deref())?;
    let mut stdout = std::io::stdout().lock();
    stdout.write_all(strip_ansi(&text).as_bytes())?;
    stdout.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rezmark_config::ProviderConfig;

    fn save_args() -> SaveArgs {
        SaveArgs {
            input: None,
            format: InputFormat::Text,
            prefix: None,
            dir: None,
            header_level: None,
            no_time: false,
            meta: Vec::new(),
            provider: None,
        }
    }

    #[test]
    fn test_parse_content_list_skips_blank_lines() {
        let content = parse_content("one\n\n  two  \n".to_string(), InputFormat::List).unwrap();
        assert_eq!(content.to_markdown(1), "- one\n- two");
    }

    #[test]
    fn test_parse_content_json_object() {
        let content =
            parse_content(r#"{"score": 9, "verdict": "pass"}"#.to_string(), InputFormat::Json)
                .unwrap();
        assert_eq!(content.to_markdown(1), "- **score**: 9\n- **verdict**: pass");
    }

    #[test]
    fn test_parse_content_bad_json() {
        assert!(parse_content("{".to_string(), InputFormat::Json).is_err());
    }

    #[test]
    fn test_parse_content_opaque() {
        let content = parse_content("AgentHistory".to_string(), InputFormat::Opaque).unwrap();
        assert_eq!(content.to_markdown(2), "## Content\n\nAgentHistory");
    }

    #[test]
    fn test_persist_options_from_config() {
        let mut config = Config::default();
        config.output.prefix = "groq".to_string();
        config.output.header_level = 3;

        let options = persist_options(&config, &save_args());
        assert_eq!(options.prefix, "groq");
        assert_eq!(options.header_level, 3);
        assert!(options.include_time_in_filename);
    }

    #[test]
    fn test_persist_options_overrides() {
        let config = Config::default();
        let mut args = save_args();
        args.prefix = Some("cli".to_string());
        args.dir = Some(PathBuf::from("out"));
        args.header_level = Some(4);
        args.no_time = true;

        let options = persist_options(&config, &args);
        assert_eq!(options.prefix, "cli");
        assert_eq!(options.directory, PathBuf::from("out"));
        assert_eq!(options.header_level, 4);
        assert!(!options.include_time_in_filename);
    }

    #[test]
    fn test_build_metadata_provider_then_explicit() {
        let mut config = Config::default();
        config.providers.insert(
            "github".to_string(),
            ProviderConfig {
                api_key: Some("ghp_secret".to_string()),
                base_url: Some("https://models.github.ai/inference".to_string()),
                model: Some("microsoft/Phi-4-reasoning".to_string()),
            },
        );

        let meta = vec![("Question".to_string(), "why?".to_string())];
        let metadata = build_metadata(&config, Some("github"), &meta).unwrap();

        let keys: Vec<_> = metadata.iter().map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["Model", "Endpoint", "Question"]);
        assert!(metadata.iter().all(|(_, v)| v != "ghp_secret"));
    }

    #[test]
    fn test_build_metadata_unknown_provider() {
        let config = Config::default();
        assert!(build_metadata(&config, Some("nope"), &[]).is_err());
    }

    fn write_input(dir: &Path, text: &str) -> PathBuf {
        let path = dir.join("input.txt");
        std::fs::write(&path, text).unwrap();
        path
    }

    #[tokio::test]
    async fn test_handle_save_writes_into_dir_override() {
        let temp_dir = tempfile::tempdir().unwrap();
        let out_dir = temp_dir.path().join("rez");
        let mut args = save_args();
        args.input = Some(write_input(temp_dir.path(), "alpha\nbeta\n"));
        args.format = InputFormat::List;
        args.dir = Some(out_dir.clone());
        args.prefix = Some("groq".to_string());
        args.no_time = true;
        args.meta = vec![("Model".to_string(), "llama".to_string())];

        let path = handle_save(&Config::default(), args).await.unwrap();

        assert_eq!(path.parent(), Some(out_dir.as_path()));
        let name = path.file_name().unwrap().to_str().unwrap();
        assert!(name.starts_with("groq_"));
        assert_eq!(name.len(), "groq_YYYY-MM-DD.md".len());

        let body = std::fs::read_to_string(&path).unwrap();
        assert!(body.starts_with("# Generated on "));
        assert!(body.contains("- **Model**: llama\n\n"));
        assert!(body.ends_with("- alpha\n- beta"));
    }

    #[tokio::test]
    async fn test_handle_save_with_shipped_config() {
        let config = rezmark_config::ConfigLoader::load(Path::new(concat!(
            env!("CARGO_MANIFEST_DIR"),
            "/config/default.toml"
        )))
        .unwrap();
        let temp_dir = tempfile::tempdir().unwrap();
        let mut args = save_args();
        args.input = Some(write_input(temp_dir.path(), "AgentHistory(done=True)"));
        args.format = InputFormat::Opaque;
        args.dir = Some(temp_dir.path().join("rez"));

        let path = handle_save(&config, args).await.unwrap();

        let name = path.file_name().unwrap().to_str().unwrap();
        assert!(name.starts_with("output_"));
        let body = std::fs::read_to_string(&path).unwrap();
        assert!(body.ends_with("## Content\n\nAgentHistory(done=True)"));
    }

    #[test]
    fn test_handle_dump_strips_ansi() {
        let temp_dir = tempfile::tempdir().unwrap();
        let input = write_input(temp_dir.path(), "\x1b[32mok\x1b[0m\n");
        let out_dir = temp_dir.path().join("dumps");

        let path = handle_dump(
            &Config::default(),
            Some(input),
            Some("agent_history".to_string()),
            Some(out_dir.clone()),
        )
        .unwrap();

        assert_eq!(path.parent(), Some(out_dir.as_path()));
        let name = path.file_name().unwrap().to_str().unwrap();
        assert!(name.starts_with("agent_history_"));
        let body = std::fs::read_to_string(&path).unwrap();
        assert!(body.starts_with("# agent_history\n\n**Timestamp:** "));
        assert!(body.contains("```\nok\n```"));
        assert!(!body.contains('\x1b'));
    }

    #[test]
    fn test_handle_report_uses_provider_model() {
        let mut config = Config::default();
        config.providers.insert(
            "groq".to_string(),
            ProviderConfig {
                api_key: None,
                base_url: None,
                model: Some("llama-3.3-70b-versatile".to_string()),
            },
        );
        let temp_dir = tempfile::tempdir().unwrap();
        let args = ReportArgs {
            input: Some(write_input(temp_dir.path(), "Rust is fast.\n")),
            model: None,
            query: Some("Why Rust?".to_string()),
            name: Some("why_rust".to_string()),
            sources: vec!["https://www.rust-lang.org|Rust".parse().unwrap()],
            provider: Some("groq".to_string()),
            dir: Some(temp_dir.path().join("reports")),
        };

        let path = handle_report(&config, args).unwrap();

        let name = path.file_name().unwrap().to_str().unwrap();
        assert!(name.starts_with("why_rust_"));
        let body = std::fs::read_to_string(&path).unwrap();
        assert!(body.starts_with("# Why Rust?\n"));
        assert!(body.contains("**Model**: llama-3.3-70b-versatile"));
        assert!(body.contains("## Content\nRust is fast.\n"));
        assert!(body.contains("- [Rust](https://www.rust-lang.org)"));
    }

    #[test]
    fn test_handle_report_requires_model() {
        let temp_dir = tempfile::tempdir().unwrap();
        let args = ReportArgs {
            input: Some(write_input(temp_dir.path(), "answer")),
            model: None,
            query: None,
            name: None,
            sources: Vec::new(),
            provider: None,
            dir: Some(temp_dir.path().to_path_buf()),
        };
        assert!(handle_report(&Config::default(), args).is_err());
    }

    #[test]
    fn test_read_input_from_file() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("answer.txt");
        std::fs::write(&path, "saved answer").unwrap();

        assert_eq!(read_input(Some(path.as_path())).unwrap(), "saved answer");
    }
}
