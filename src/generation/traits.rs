//! Port interfaces for the generation domain

use async_trait::async_trait;
use std::path::{Path, PathBuf};

use crate::generation::{
    ApiSpecification, Artifact, ClassInfo, GenerationError, GenerationProperties,
    GenerationTarget, TypeMappingTable,
};

/// Loads OpenAPI specifications
#[async_trait]
pub trait OpenApiLoader: Send + Sync {
    /// Load an OpenAPI spec from a filesystem path or URL
    async fn load(&self, source: &str) -> Result<ApiSpecification, GenerationError>;
}

/// Supplies the classes visible to the generation process
#[async_trait]
pub trait ClassInventory: Send + Sync {
    async fn classes(&self) -> Result<Vec<ClassInfo>, GenerationError>;
}

/// Everything the codegen engine needs for one run
#[derive(Debug, Clone, Copy)]
pub struct CodegenInput<'a> {
    pub spec: &'a ApiSpecification,
    pub properties: &'a GenerationProperties,
    pub type_mapping: &'a TypeMappingTable,
    pub target: &'a GenerationTarget,
    /// Path prefix under which operation paths carry their grouping
    pub resource_prefix: &'a str,
}

/// Template-driven generator producing models, API clients and tests.
///
/// Implementations must use the type mapping verbatim for every name it
/// contains instead of inferring a type of their own.
#[async_trait]
pub trait CodegenEngine: Send + Sync {
    async fn render(&self, input: CodegenInput<'_>) -> Result<Vec<Artifact>, GenerationError>;
}

/// Rewrites a generated file in canonical style, in place
#[async_trait]
pub trait SourceFormatter: Send + Sync {
    async fn format(&self, path: &Path) -> Result<(), GenerationError>;
}

/// Writes generated artifacts below an output directory
#[async_trait]
pub trait OutputService: Send + Sync {
    /// Write all artifacts and return the written paths in order
    async fn write_artifacts(
        &self,
        output_dir: &Path,
        artifacts: &[Artifact],
    ) -> Result<Vec<PathBuf>, GenerationError>;

    /// Ensure a directory exists
    async fn ensure_directory(&self, path: &Path) -> Result<(), GenerationError>;
}
