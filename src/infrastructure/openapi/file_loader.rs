//! File-based OpenAPI spec loader
//!
//! This loader handles only file I/O. The actual parsing is done by the OpenApiParser.

use async_trait::async_trait;
use tokio::fs;

use super::parser::{DocumentFormat, OpenApiParser};
use crate::generation::{ApiSpecification, GenerationError, OpenApiLoader};

/// Loads OpenAPI specifications from local files
pub struct FileOpenApiLoader;

impl FileOpenApiLoader {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl OpenApiLoader for FileOpenApiLoader {
    async fn load(&self, source: &str) -> Result<ApiSpecification, GenerationError> {
        let path = source.strip_prefix("file://").unwrap_or(source);

        let content = fs::read_to_string(path)
            .await
            .map_err(|e| GenerationError::spec_load(format!("Failed to read {path}: {e}")))?;

        OpenApiParser::from_text(&content, DocumentFormat::from_source(path))?.parse()
    }
}

impl Default for FileOpenApiLoader {
    fn default() -> Self {
        Self::new()
    }
}
