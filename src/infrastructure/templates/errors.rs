//! Error types for the template infrastructure layer

use thiserror::Error;

use crate::generation::GenerationError;

/// Errors that can occur in template operations
#[derive(Error, Debug)]
pub enum TemplateError {
    /// Template directory or file not found
    #[error("Template not found: {0}")]
    TemplateNotFound(String),

    /// A template required by the codegen engine is absent from the bundle
    #[error("Missing template '{0}'")]
    MissingTemplate(String),

    #[error("Template '{name}' is not valid UTF-8")]
    InvalidEncoding { name: String },

    /// IO error during template operations
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

impl TemplateError {
    pub fn not_found<S: Into<String>>(path: S) -> Self {
        Self::TemplateNotFound(path.into())
    }
}

impl From<TemplateError> for GenerationError {
    fn from(err: TemplateError) -> Self {
        match err {
            TemplateError::IoError(e) => GenerationError::Io(e),
            TemplateError::TemplateNotFound(_) | TemplateError::MissingTemplate(_) => {
                GenerationError::InvalidConfiguration(err.to_string())
            }
            TemplateError::InvalidEncoding { .. } => GenerationError::TemplateRender(err.to_string()),
        }
    }
}
