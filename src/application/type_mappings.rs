//! Use case for inspecting the resolved type mapping table

use std::sync::Arc;

use crate::application::ApplicationError;
use crate::generation::{ClassInventory, TypeMappingResolver, TypeMappingTable};

/// Resolves the type mapping table without generating anything
pub struct ResolveTypeMappingsUseCase {
    inventory: Arc<dyn ClassInventory>,
    resolver: TypeMappingResolver,
}

impl ResolveTypeMappingsUseCase {
    pub fn new(inventory: Arc<dyn ClassInventory>, resolver: TypeMappingResolver) -> Self {
        Self {
            inventory,
            resolver,
        }
    }

    pub async fn execute(&self) -> Result<TypeMappingTable, ApplicationError> {
        let classes = self.inventory.classes().await?;
        Ok(self.resolver.resolve(&classes))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::inventory::StaticClassInventory;

    #[tokio::test]
    async fn test_resolves_inventory_and_explicit_types() {
        let inventory = StaticClassInventory::from_qualified_names([
            "org.web3j.braid.services.SimpleNodeInfo",
        ]);
        let use_case =
            ResolveTypeMappingsUseCase::new(Arc::new(inventory), TypeMappingResolver::default());

        let table = use_case.execute().await.unwrap();

        assert_eq!(table.len(), 5);
        assert_eq!(
            table.get("io.bluebank.braid.corda.services.SimpleNodeInfo"),
            Some("org.web3j.braid.services.SimpleNodeInfo")
        );
    }
}
