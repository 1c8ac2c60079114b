//! Timestamped Markdown persister.

use chrono::{Local, NaiveDateTime};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use crate::content::Content;
use crate::error::PersistError;
use crate::metadata::Metadata;

const DATE_FORMAT: &str = "%Y-%m-%d";
const TIME_FORMAT: &str = "%H:%M:%S";
const FILENAME_TIME_FORMAT: &str = "%H-%M-%S";

/// Where and how documents are written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistOptions {
    /// Filename stem before the date.
    pub prefix: String,
    /// Output directory, created on demand.
    pub directory: PathBuf,
    /// `#` count for the header above opaque content.
    pub header_level: u8,
    /// Append `_HH-MM-SS` to the filename.
    pub include_time_in_filename: bool,
}

impl Default for PersistOptions {
    fn default() -> Self {
        Self {
            prefix: "output".to_string(),
            directory: PathBuf::from("."),
            header_level: 1,
            include_time_in_filename: true,
        }
    }
}

impl PersistOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = prefix.into();
        self
    }

    pub fn with_directory(mut self, directory: impl Into<PathBuf>) -> Self {
        self.directory = directory.into();
        self
    }

    pub fn with_header_level(mut self, header_level: u8) -> Self {
        self.header_level = header_level;
        self
    }

    pub fn with_time_in_filename(mut self, include: bool) -> Self {
        self.include_time_in_filename = include;
        self
    }

    /// Filename for a document generated at `at`.
    pub fn filename(&self, at: NaiveDateTime) -> String {
        if self.include_time_in_filename {
            format!(
                "{}_{}_{}.md",
                self.prefix,
                at.format(DATE_FORMAT),
                at.format(FILENAME_TIME_FORMAT)
            )
        } else {
            format!("{}_{}.md", self.prefix, at.format(DATE_FORMAT))
        }
    }
}

/// A rendered document and the path it belongs at.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    pub path: PathBuf,
    pub generated_at: NaiveDateTime,
    pub header_level: u8,
    /// Full file text, timestamp header included.
    pub body: String,
}

/// Writes content as timestamped Markdown files.
///
/// Two calls in the same second with the same prefix and directory map to the
/// same file and the later one wins. Callers that need uniqueness under
/// concurrency must put their own discriminator in the prefix.
#[derive(Debug, Clone, Default)]
pub struct MarkdownPersister {
    options: PersistOptions,
}

impl MarkdownPersister {
    pub fn new(options: PersistOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &PersistOptions {
        &self.options
    }

    /// Render without touching the filesystem.
    pub fn render(
        &self,
        content: &Content,
        metadata: Option<&Metadata>,
        at: NaiveDateTime,
    ) -> Document {
        let mut body = format!(
            "# Generated on {} {}\n\n",
            at.format(DATE_FORMAT),
            at.format(TIME_FORMAT)
        );

        if let Some(metadata) = metadata.filter(|m| !m.is_empty()) {
            body.push_str(&metadata.to_markdown());
            body.push_str("\n\n");
        }

        body.push_str(&content.to_markdown(self.options.header_level));

        Document {
            path: self.options.directory.join(self.options.filename(at)),
            generated_at: at,
            header_level: self.options.header_level,
            body,
        }
    }

    /// Persist `content` stamped with the current local time.
    pub fn persist(
        &self,
        content: impl Into<Content>,
        metadata: Option<&Metadata>,
    ) -> Result<PathBuf, PersistError> {
        self.persist_at(content, metadata, Local::now().naive_local())
    }

    /// Persist `content` stamped with `at`.
    pub fn persist_at(
        &self,
        content: impl Into<Content>,
        metadata: Option<&Metadata>,
        at: NaiveDateTime,
    ) -> Result<PathBuf, PersistError> {
        let document = self.render(&content.into(), metadata, at);
        write_document(&self.options.directory, &document)?;
        Ok(document.path)
    }

    /// [`MarkdownPersister::persist`] on tokio's blocking pool.
    pub async fn persist_async(
        &self,
        content: impl Into<Content>,
        metadata: Option<Metadata>,
    ) -> Result<PathBuf, PersistError> {
        let persister = self.clone();
        let content = content.into();
        tokio::task::spawn_blocking(move || persister.persist(content, metadata.as_ref()))
            .await
            .map_err(|e| PersistError::Join(e.to_string()))?
    }
}

/// One-shot persist with explicit options.
pub fn persist(
    content: impl Into<Content>,
    options: &PersistOptions,
    metadata: Option<&Metadata>,
) -> Result<PathBuf, PersistError> {
    MarkdownPersister::new(options.clone()).persist(content, metadata)
}

/// Create `directory` if needed and write the document into it.
pub(crate) fn write_document(directory: &Path, document: &Document) -> Result<(), PersistError> {
    ensure_dir(directory)?;
    fs::write(&document.path, &document.body).map_err(|source| PersistError::Write {
        path: document.path.clone(),
        source,
    })?;
    debug!("Saved markdown to {:?}", document.path);
    Ok(())
}

pub(crate) fn ensure_dir(directory: &Path) -> Result<(), PersistError> {
    if !directory.exists() {
        fs::create_dir_all(directory).map_err(|source| PersistError::CreateDir {
            path: directory.to_path_buf(),
            source,
        })?;
        info!("Created output directory: {:?}", directory);
    }
    Ok(())
}

#[cfg(test)]
#[path = "persister_tests.rs"]
mod tests;
