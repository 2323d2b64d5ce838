//! Wiring of the use cases from a `GeneratorConfig`

use std::sync::Arc;

use crate::application::{ApplicationError, GenerateClientUseCase, ResolveTypeMappingsUseCase};
use crate::config::GeneratorConfig;
use crate::generation::{ClassInventory, GenerationOrchestrator, SourceFormatter};
use crate::infrastructure::generation::{CommandFormatter, NoopFormatter, TeraCodegenEngine};
use crate::infrastructure::inventory::{
    CompositeClassInventory, SourceTreeInventory, StaticClassInventory,
};
use crate::infrastructure::openapi::CompositeOpenApiLoader;
use crate::infrastructure::output::FileSystemOutputService;
use crate::infrastructure::shell::ShellCommandExecutor;
use crate::infrastructure::templates::load_templates;

/// Configured known classes followed by the scanned source directories
pub fn class_inventory(config: &GeneratorConfig) -> Arc<dyn ClassInventory> {
    let mut inventories: Vec<Arc<dyn ClassInventory>> = vec![Arc::new(
        StaticClassInventory::from_qualified_names(&config.known_classes),
    )];
    if !config.class_source_dirs.is_empty() {
        inventories.push(Arc::new(SourceTreeInventory::new(
            config.class_source_dirs.clone(),
        )));
    }
    Arc::new(CompositeClassInventory::new(inventories))
}

pub fn formatter(config: &GeneratorConfig) -> Arc<dyn SourceFormatter> {
    if config.formatter.enabled {
        Arc::new(CommandFormatter::new(
            Arc::new(ShellCommandExecutor),
            config.formatter.command.clone(),
        ))
    } else {
        Arc::new(NoopFormatter)
    }
}

pub async fn generate_client_use_case(
    config: &GeneratorConfig,
) -> Result<GenerateClientUseCase, ApplicationError> {
    config.validate()?;

    let templates = load_templates(config.template_dir.as_deref()).await?;
    let orchestrator = GenerationOrchestrator::new(
        Arc::new(TeraCodegenEngine::new(&templates)?),
        Arc::new(FileSystemOutputService::new()),
        formatter(config),
        config.resource_prefix.clone(),
        config.excluded_model_prefixes.clone(),
    );

    Ok(GenerateClientUseCase::new(
        Arc::new(CompositeOpenApiLoader::new()?),
        class_inventory(config),
        config.path_filter(),
        config.type_mapping_resolver(),
        Arc::new(orchestrator),
    ))
}

pub fn type_mappings_use_case(config: &GeneratorConfig) -> ResolveTypeMappingsUseCase {
    ResolveTypeMappingsUseCase::new(class_inventory(config), config.type_mapping_resolver())
}
