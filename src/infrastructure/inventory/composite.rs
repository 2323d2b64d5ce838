//! Inventory merging several sources

use async_trait::async_trait;
use std::collections::HashSet;
use std::sync::Arc;

use crate::generation::{ClassInfo, ClassInventory, GenerationError};

/// Concatenates inventories in order, dropping duplicate classes
pub struct CompositeClassInventory {
    inventories: Vec<Arc<dyn ClassInventory>>,
}

impl CompositeClassInventory {
    pub fn new(inventories: Vec<Arc<dyn ClassInventory>>) -> Self {
        Self { inventories }
    }
}

#[async_trait]
impl ClassInventory for CompositeClassInventory {
    async fn classes(&self) -> Result<Vec<ClassInfo>, GenerationError> {
        let mut seen = HashSet::new();
        let mut classes = Vec::new();
        for inventory in &self.inventories {
            for class in inventory.classes().await? {
                if seen.insert(class.qualified_name()) {
                    classes.push(class);
                }
            }
        }
        Ok(classes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::inventory::StaticClassInventory;

    #[tokio::test]
    async fn test_composite_deduplicates() {
        let first = StaticClassInventory::from_qualified_names(["a.One", "a.Two"]);
        let second = StaticClassInventory::from_qualified_names(["a.Two", "b.Three"]);
        let composite = CompositeClassInventory::new(vec![Arc::new(first), Arc::new(second)]);

        let names: Vec<String> = composite
            .classes()
            .await
            .unwrap()
            .iter()
            .map(ClassInfo::qualified_name)
            .collect();
        assert_eq!(names, vec!["a.One", "a.Two", "b.Three"]);
    }
}
