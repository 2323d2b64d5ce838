//! Inventory backed by a fixed list of classes

use async_trait::async_trait;
use tracing::warn;

use crate::generation::{ClassInfo, ClassInventory, GenerationError};

/// A fixed, caller-supplied set of classes
#[derive(Debug, Clone, Default)]
pub struct StaticClassInventory {
    classes: Vec<ClassInfo>,
}

impl StaticClassInventory {
    pub fn new(classes: Vec<ClassInfo>) -> Self {
        Self { classes }
    }

    /// Build from fully qualified names; names without a package are skipped
    pub fn from_qualified_names<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let classes = names
            .into_iter()
            .filter_map(|name| {
                let name = name.as_ref();
                let class = ClassInfo::from_qualified_name(name);
                if class.is_none() {
                    warn!(class = %name, "Ignoring known class without a package");
                }
                class
            })
            .collect();
        Self { classes }
    }
}

#[async_trait]
impl ClassInventory for StaticClassInventory {
    async fn classes(&self) -> Result<Vec<ClassInfo>, GenerationError> {
        Ok(self.classes.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_from_qualified_names() {
        let inventory = StaticClassInventory::from_qualified_names([
            "org.web3j.corda.model.core.identity.Party",
            "Unpackaged",
            "org.web3j.braid.services.SimpleNodeInfo",
        ]);

        let classes = inventory.classes().await.unwrap();
        assert_eq!(classes.len(), 2);
        assert_eq!(classes[0].simple_name, "Party");
        assert_eq!(classes[1].package, "org.web3j.braid.services");
    }
}
