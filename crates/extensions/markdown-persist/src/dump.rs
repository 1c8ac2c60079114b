//! Debug dumps: pretty-printed values in fenced Markdown blocks.

use chrono::{Local, NaiveDateTime};
use std::fmt;
use std::path::PathBuf;

use crate::error::PersistError;
use crate::persister::{write_document, Document};

const DUMP_TIMESTAMP_FORMAT: &str = "%Y-%m-%d_%H-%M-%S_%6f";

/// Writes `{label}_{timestamp}.md` files holding a value's `{:#?}` output.
///
/// Timestamps carry microseconds, so repeated dumps of the same label do
/// not overwrite each other in practice.
#[derive(Debug, Clone)]
pub struct DebugDump {
    directory: PathBuf,
}

impl Default for DebugDump {
    fn default() -> Self {
        Self::new("rez")
    }
}

impl DebugDump {
    pub fn new(directory: impl Into<PathBuf>) -> Self {
        Self {
            directory: directory.into(),
        }
    }

    pub fn directory(&self) -> &PathBuf {
        &self.directory
    }

    /// Dump a value's pretty `Debug` form.
    pub fn save<T: fmt::Debug + ?Sized>(
        &self,
        label: &str,
        value: &T,
    ) -> Result<PathBuf, PersistError> {
        self.save_text(label, &format!("{:#?}", value))
    }

    /// Dump pre-rendered text.
    pub fn save_text(&self, label: &str, text: &str) -> Result<PathBuf, PersistError> {
        self.save_text_at(label, text, Local::now().naive_local())
    }

    pub(crate) fn save_text_at(
        &self,
        label: &str,
        text: &str,
        at: NaiveDateTime,
    ) -> Result<PathBuf, PersistError> {
        let document = self.render(label, text, at);
        write_document(&self.directory, &document)?;
        Ok(document.path)
    }

    fn render(&self, label: &str, text: &str, at: NaiveDateTime) -> Document {
        let timestamp = at.format(DUMP_TIMESTAMP_FORMAT).to_string();
        let body = format!(
            "# {label}\n\n**Timestamp:** {timestamp}\n\n```\n{text}\n```\n"
        );

        Document {
            path: self.directory.join(format!("{label}_{timestamp}.md")),
            generated_at: at,
            header_level: 1,
            body,
        }
    }
}
