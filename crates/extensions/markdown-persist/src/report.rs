//! Model answer reports with source links.

use chrono::{DateTime, Local, Utc};
use std::convert::Infallible;
use std::path::PathBuf;
use std::str::FromStr;

use crate::error::PersistError;
use crate::persister::{write_document, Document};

/// A cited source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Source {
    pub url: String,
    pub title: Option<String>,
}

impl Source {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            title: None,
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }
}

/// Parses `URL` or `URL|TITLE`.
impl FromStr for Source {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s.split_once('|') {
            Some((url, title)) if !title.trim().is_empty() => {
                Source::new(url.trim()).with_title(title.trim())
            }
            Some((url, _)) => Source::new(url.trim()),
            None => Source::new(s.trim()),
        })
    }
}

/// A model answer with the context it was produced in.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Report {
    pub content: String,
    pub model: String,
    /// Used as the document title.
    pub query: Option<String>,
    /// Used as the filename stem.
    pub function_name: Option<String>,
    pub sources: Vec<Source>,
}

impl Report {
    pub fn new(content: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            model: model.into(),
            ..Default::default()
        }
    }

    pub fn with_query(mut self, query: impl Into<String>) -> Self {
        self.query = Some(query.into());
        self
    }

    pub fn with_function_name(mut self, name: impl Into<String>) -> Self {
        self.function_name = Some(name.into());
        self
    }

    pub fn with_source(mut self, source: Source) -> Self {
        self.sources.push(source);
        self
    }

    fn sources_markdown(&self) -> String {
        if self.sources.is_empty() {
            return "No sources available".to_string();
        }
        self.sources
            .iter()
            .map(|s| format!("- [{}]({})", s.title.as_deref().unwrap_or("Source"), s.url))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// Writes [`Report`]s into a directory.
#[derive(Debug, Clone)]
pub struct ReportWriter {
    directory: PathBuf,
}

impl ReportWriter {
    pub fn new(directory: impl Into<PathBuf>) -> Self {
        Self {
            directory: directory.into(),
        }
    }

    pub fn write(&self, report: &Report) -> Result<PathBuf, PersistError> {
        self.write_at(report, Local::now())
    }

    pub fn write_at(&self, report: &Report, at: DateTime<Local>) -> Result<PathBuf, PersistError> {
        let document = self.render(report, at);
        write_document(&self.directory, &document)?;
        Ok(document.path)
    }

    fn render(&self, report: &Report, at: DateTime<Local>) -> Document {
        let body = format!(
            "# {title}\n\n**Generated**: {generated}  \n**Model**: {model}\n\n## Content\n{content}\n\n## Sources\n{sources}\n",
            title = report.query.as_deref().unwrap_or("Analysis"),
            generated = at.format("%Y-%m-%d %H:%M:%S"),
            model = report.model,
            content = report.content,
            sources = report.sources_markdown(),
        );

        let stamp = at
            .with_timezone(&Utc)
            .format("%Y-%m-%dT%H:%M:%S%.3fZ")
            .to_string()
            .replace([':', '.'], "-");
        let stem = report.function_name.as_deref().unwrap_or("output");

        Document {
            path: self.directory.join(format!("{stem}_{stamp}.md")),
            generated_at: at.naive_local(),
            header_level: 1,
            body,
        }
    }
}
