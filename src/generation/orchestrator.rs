//! Generation orchestration - drives the codegen engine for one CorDapp client

use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::generation::{
    ApiSpecification, CodegenEngine, CodegenInput, FormatFailure, GenerationError,
    GenerationProperties, GenerationResult, GenerationTarget, ModelSelection, OutputService,
    SourceFormatter, TypeMappingTable, rules,
};

/// Runs the codegen engine over a filtered specification and a completed type
/// mapping table, writes the output and formats every emitted file.
pub struct GenerationOrchestrator {
    engine: Arc<dyn CodegenEngine>,
    output: Arc<dyn OutputService>,
    formatter: Arc<dyn SourceFormatter>,
    resource_prefix: String,
    excluded_model_prefixes: Vec<String>,
}

impl GenerationOrchestrator {
    pub fn new(
        engine: Arc<dyn CodegenEngine>,
        output: Arc<dyn OutputService>,
        formatter: Arc<dyn SourceFormatter>,
        resource_prefix: impl Into<String>,
        excluded_model_prefixes: Vec<String>,
    ) -> Self {
        Self {
            engine,
            output,
            formatter,
            resource_prefix: resource_prefix.into(),
            excluded_model_prefixes,
        }
    }

    /// Models, APIs and test flag for the engine.
    ///
    /// Fails with a path convention error when an operation path carries no
    /// grouping name.
    pub fn properties(
        &self,
        spec: &ApiSpecification,
        type_mapping: &TypeMappingTable,
        target: &GenerationTarget,
    ) -> Result<GenerationProperties, GenerationError> {
        let selection = ModelSelection::new(type_mapping, &self.excluded_model_prefixes);
        let models = selection.select(spec.schemas.keys());
        let apis = rules::grouping_names(spec, &self.resource_prefix)?;

        debug!(
            schemas = spec.schemas.len(),
            models = models.len(),
            apis = ?apis,
            "Computed generation properties"
        );

        Ok(GenerationProperties {
            models,
            apis,
            generate_tests: target.generate_tests,
        })
    }

    /// Execute the generation workflow.
    ///
    /// Nothing is written unless every artifact rendered. A failed run leaves
    /// the output directory undefined; regenerate from scratch.
    pub async fn generate(
        &self,
        spec: &ApiSpecification,
        type_mapping: &TypeMappingTable,
        target: &GenerationTarget,
    ) -> Result<GenerationResult, GenerationError> {
        // 1. Validate target and derive properties
        target.validate()?;
        let properties = self.properties(spec, type_mapping, target)?;

        // 2. Render everything before touching the filesystem
        let artifacts = self
            .engine
            .render(CodegenInput {
                spec,
                properties: &properties,
                type_mapping,
                target,
                resource_prefix: &self.resource_prefix,
            })
            .await?;
        info!(count = artifacts.len(), "Rendered artifacts");

        // 3. Write
        self.output.ensure_directory(&target.output_dir).await?;
        let files = self
            .output
            .write_artifacts(&target.output_dir, &artifacts)
            .await?;

        // 4. Format each file independently
        let mut format_failures = Vec::new();
        for file in &files {
            if let Err(e) = self.formatter.format(file).await {
                warn!(path = %file.display(), error = %e, "Failed to format generated file");
                format_failures.push(FormatFailure {
                    path: file.clone(),
                    message: e.to_string(),
                });
            }
        }

        info!(
            files = files.len(),
            format_failures = format_failures.len(),
            output_dir = %target.output_dir.display(),
            "Generated CorDapp client"
        );

        Ok(GenerationResult {
            files,
            format_failures,
            conflicts: type_mapping.conflicts().to_vec(),
        })
    }
}
