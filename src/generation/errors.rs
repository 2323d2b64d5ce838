//! Error types for the generation domain

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while generating a CorDapp client
#[derive(Error, Debug)]
pub enum GenerationError {
    /// The OpenAPI document could not be read or parsed
    #[error("OpenAPI loading error: {0}")]
    SpecLoad(String),

    /// An operation path does not follow `/{prefix}/{grouping}/...`
    #[error("Path convention error for '{path}': {reason}")]
    PathConvention { path: String, reason: String },

    #[error("Render error: {0}")]
    TemplateRender(String),

    #[error("Formatting error for {}: {message}", path.display())]
    Format { path: PathBuf, message: String },

    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl GenerationError {
    pub fn spec_load<S: Into<String>>(msg: S) -> Self {
        Self::SpecLoad(msg.into())
    }

    pub fn path_convention<P: Into<String>, R: Into<String>>(path: P, reason: R) -> Self {
        Self::PathConvention {
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Configuration-time errors abort before anything is written
    pub fn is_configuration_error(&self) -> bool {
        matches!(
            self,
            Self::SpecLoad(_) | Self::PathConvention { .. } | Self::InvalidConfiguration(_)
        )
    }
}

impl From<tera::Error> for GenerationError {
    fn from(err: tera::Error) -> Self {
        use std::error::Error as _;

        // tera hides the interesting part of the message in the source chain
        let mut message = err.to_string();
        let mut source = err.source();
        while let Some(cause) = source {
            message.push_str(": ");
            message.push_str(&cause.to_string());
            source = cause.source();
        }
        Self::TemplateRender(message)
    }
}
