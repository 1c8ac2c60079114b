//! Timestamped Markdown persistence for rezmark.
//!
//! Records whatever an experiment produced (a chat answer, a list of links,
//! a key/value summary or some opaque object) as a Markdown file whose name
//! and header carry the moment it was generated.
//!
//! ## Output Format
//!
//! ```markdown
//! # Generated on 2025-02-07 10:30:00
//!
//! - **Model**: microsoft/Phi-4-reasoning
//! - **Question**: What is a smellpanty algorithm?
//!
//! The actual content goes here...
//! ```
//!
//! Files are named `{prefix}_{YYYY-MM-DD}_{HH-MM-SS}.md`, or
//! `{prefix}_{YYYY-MM-DD}.md` when the time is left out.

mod ansi;
mod content;
mod dump;
mod error;
mod metadata;
mod persister;
mod report;

pub use ansi::strip_ansi;
pub use content::Content;
pub use dump::DebugDump;
pub use error::PersistError;
pub use metadata::Metadata;
pub use persister::{persist, Document, MarkdownPersister, PersistOptions};
pub use report::{Report, ReportWriter, Source};
