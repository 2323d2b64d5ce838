//! Use case for generating a CorDapp client

use std::sync::Arc;
use tracing::{error, info};

use crate::application::{ApplicationError, GenerateClientRequest, GenerateClientResponse};
use crate::generation::{
    ClassInventory, GenerationOrchestrator, OpenApiLoader, PathFilter, TypeMappingResolver,
};

/// Load, filter, reconcile types, then drive generation
pub struct GenerateClientUseCase {
    loader: Arc<dyn OpenApiLoader>,
    inventory: Arc<dyn ClassInventory>,
    filter: PathFilter,
    resolver: TypeMappingResolver,
    orchestrator: Arc<GenerationOrchestrator>,
}

impl GenerateClientUseCase {
    pub fn new(
        loader: Arc<dyn OpenApiLoader>,
        inventory: Arc<dyn ClassInventory>,
        filter: PathFilter,
        resolver: TypeMappingResolver,
        orchestrator: Arc<GenerationOrchestrator>,
    ) -> Self {
        Self {
            loader,
            inventory,
            filter,
            resolver,
            orchestrator,
        }
    }

    pub async fn execute(
        &self,
        request: GenerateClientRequest,
    ) -> Result<GenerateClientResponse, ApplicationError> {
        // 1. Validate request
        request.validate()?;
        let target = request.target();

        // 2. Load and filter the node's document
        let spec = self.loader.load(&request.schema).await.inspect_err(|e| {
            error!(schema = %request.schema, error = %e, "Failed to load OpenAPI document");
        })?;
        let filtered = self.filter.apply(&spec);
        info!(
            schema = %request.schema,
            paths = filtered.paths.len(),
            schemas = filtered.schemas.len(),
            "Loaded OpenAPI document"
        );

        // 3. Reconcile against the available classes
        let classes = self.inventory.classes().await?;
        let type_mapping = self.resolver.resolve(&classes);
        info!(
            classes = classes.len(),
            mappings = type_mapping.len(),
            conflicts = type_mapping.conflicts().len(),
            "Resolved type mappings"
        );

        // 4. Generate
        let result = self
            .orchestrator
            .generate(&filtered, &type_mapping, &target)
            .await
            .inspect_err(|e| error!(error = %e, "Client generation failed"))?;

        Ok(GenerateClientResponse {
            output_path: request.output_dir,
            paths: filtered.paths.len(),
            files: result.files,
            format_failures: result.format_failures.into_iter().map(Into::into).collect(),
            conflicts: result.conflicts.into_iter().map(Into::into).collect(),
        })
    }
}
