//! Application layer error types

use thiserror::Error;

use crate::generation::GenerationError;

/// Application layer errors
#[derive(Error, Debug)]
pub enum ApplicationError {
    #[error("Generation error: {0}")]
    GenerationError(#[from] GenerationError),

    #[error("Validation error: {0}")]
    ValidationError(#[from] ValidationError),
}

impl From<crate::infrastructure::templates::TemplateError> for ApplicationError {
    fn from(err: crate::infrastructure::templates::TemplateError) -> Self {
        Self::GenerationError(err.into())
    }
}

/// Validation errors for requests
#[derive(Error, Debug)]
pub enum ValidationError {
    #[error("Schema source cannot be empty")]
    EmptySchemaSource,

    #[error("Invalid package name: {0}")]
    InvalidPackageName(String),

    #[error("Missing required field: {0}")]
    MissingField(String),
}
