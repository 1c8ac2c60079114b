//! # rezmark Config
//!
//! Explicit configuration for rezmark entry points: output defaults,
//! dump/report directories and the LLM provider settings recorded as
//! metadata next to saved answers.

mod error;
mod loader;
mod schema;
mod validator;

pub use error::ConfigError;
pub use loader::ConfigLoader;
pub use schema::*;
pub use validator::{ConfigValidator, ValidationError, ValidationResult, ValidationWarning};
