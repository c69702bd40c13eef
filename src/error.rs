//! Construction-time error definitions.
//!
//! The pipeline distinguishes two error tiers: configuration errors surface
//! here and abort assembly before any request is served; per-request policy
//! rejections are ordinary values ([`crate::pipeline::Rejection`]), never
//! `Err`.

use thiserror::Error;

use crate::config::validation::ValidationError;

/// Errors that can occur while assembling a pipeline.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Reading a configuration file failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The configuration file was not valid TOML.
    #[error("parse error: {0}")]
    Parse(#[from] toml::de::Error),

    /// Semantic validation failed; carries every violation found.
    #[error("validation failed: {}", join_errors(.0))]
    Validation(Vec<ValidationError>),

    /// A configured value cannot be encoded as an HTTP header.
    #[error("malformed policy value: {0}")]
    Malformed(String),
}

fn join_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(|e| e.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Result type for pipeline construction.
pub type ConfigResult<T> = Result<T, ConfigError>;
