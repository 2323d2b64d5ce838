//! Inventory discovered by scanning Kotlin and Java sources

use async_trait::async_trait;
use once_cell::sync::Lazy;
use regex::Regex;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};
use walkdir::WalkDir;

use crate::generation::{ClassInfo, ClassInventory, GenerationError};

static PACKAGE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?m)^\s*package\s+([A-Za-z_][\w.]*)\s*;?").expect("Invalid package regex")
});

// Unindented declarations only, so nested classes are not reported
static DECLARATION_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?m)^(?:(?:public|internal|private|protected|open|abstract|sealed|final|data|enum|annotation|value|static)\s+)*(?:class|interface|object|record|enum)\s+([A-Za-z_]\w*)",
    )
    .expect("Invalid declaration regex")
});

/// Classes declared in `.kt` and `.java` files below a set of roots
#[derive(Debug, Clone)]
pub struct SourceTreeInventory {
    roots: Vec<PathBuf>,
}

impl SourceTreeInventory {
    pub fn new(roots: Vec<PathBuf>) -> Self {
        Self { roots }
    }

    fn scan(roots: &[PathBuf]) -> Result<Vec<ClassInfo>, GenerationError> {
        let mut classes = Vec::new();

        for root in roots {
            if !root.is_dir() {
                return Err(GenerationError::InvalidConfiguration(format!(
                    "Class source directory does not exist: {}",
                    root.display()
                )));
            }

            // Unreadable entries are skipped; the scan reports what it could read
            for entry in WalkDir::new(root).sort_by_file_name() {
                let entry = match entry {
                    Ok(entry) => entry,
                    Err(e) => {
                        warn!(root = %root.display(), error = %e, "Skipping unreadable source entry");
                        continue;
                    }
                };
                let path = entry.path();
                if entry.file_type().is_file() && is_jvm_source(path) {
                    let content = match std::fs::read_to_string(path) {
                        Ok(content) => content,
                        Err(e) => {
                            warn!(path = %path.display(), error = %e, "Skipping unreadable source entry");
                            continue;
                        }
                    };
                    let found = declared_classes(&content);
                    if found.is_empty() {
                        debug!(path = %path.display(), "No packaged declarations found");
                    }
                    classes.extend(found);
                }
            }
        }

        Ok(classes)
    }
}

fn is_jvm_source(path: &Path) -> bool {
    path.extension()
        .is_some_and(|ext| ext == "kt" || ext == "java")
}

/// Top-level classes declared in one source file
pub fn declared_classes(content: &str) -> Vec<ClassInfo> {
    let Some(package) = PACKAGE_RE.captures(content).and_then(|c| c.get(1)) else {
        return Vec::new();
    };

    DECLARATION_RE
        .captures_iter(content)
        .filter_map(|c| c.get(1))
        .map(|name| ClassInfo::new(package.as_str(), name.as_str()))
        .collect()
}

#[async_trait]
impl ClassInventory for SourceTreeInventory {
    async fn classes(&self) -> Result<Vec<ClassInfo>, GenerationError> {
        let roots = self.roots.clone();
        let classes = tokio::task::spawn_blocking(move || Self::scan(&roots))
            .await
            .map_err(|e| {
                warn!(error = %e, "Source scan task failed");
                GenerationError::Io(std::io::Error::other(e))
            })??;

        debug!(count = classes.len(), "Scanned class sources");
        Ok(classes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;
    use tracing_test::traced_test;

    #[test]
    fn test_declared_classes_kotlin() {
        let source = r#"
package org.web3j.corda.model.core.contracts

import java.math.BigDecimal

data class Issued(val issuer: Issued_issuer, val product: String) {
    class Nested
    companion object
}

enum class Status { OK }
sealed interface Marker
object Defaults
"#;
        let names: Vec<String> = declared_classes(source)
            .iter()
            .map(ClassInfo::qualified_name)
            .collect();

        assert_eq!(
            names,
            vec![
                "org.web3j.corda.model.core.contracts.Issued",
                "org.web3j.corda.model.core.contracts.Status",
                "org.web3j.corda.model.core.contracts.Marker",
                "org.web3j.corda.model.core.contracts.Defaults",
            ]
        );
    }

    #[test]
    fn test_declared_classes_java() {
        let source = "package org.web3j.braid.services;\n\npublic final class SimpleNodeInfo {}\npublic enum Kind { A }\n";
        let names: Vec<String> = declared_classes(source)
            .iter()
            .map(ClassInfo::qualified_name)
            .collect();

        assert_eq!(
            names,
            vec![
                "org.web3j.braid.services.SimpleNodeInfo",
                "org.web3j.braid.services.Kind",
            ]
        );
    }

    #[test]
    fn test_declared_classes_requires_package() {
        assert!(declared_classes("class Orphan").is_empty());
    }

    #[tokio::test]
    async fn test_scan_source_tree() {
        let temp_dir = TempDir::new().unwrap();
        let model_dir = temp_dir.path().join("org/web3j/corda/model");
        fs::create_dir_all(&model_dir).unwrap();
        fs::write(
            model_dir.join("Error.kt"),
            "package org.web3j.corda.model\n\ndata class Error(val message: String)\n",
        )
        .unwrap();
        fs::write(model_dir.join("README.md"), "class NotSource").unwrap();

        let inventory = SourceTreeInventory::new(vec![temp_dir.path().to_path_buf()]);
        let classes = inventory.classes().await.unwrap();

        assert_eq!(classes, vec![ClassInfo::new("org.web3j.corda.model", "Error")]);
    }

    #[test]
    #[traced_test]
    fn test_undecodable_file_is_skipped() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(
            temp_dir.path().join("Amount.kt"),
            "package org.web3j.corda.model\n\nclass Amount\n",
        )
        .unwrap();
        fs::write(temp_dir.path().join("Latin1.kt"), b"package caf\xe9\nclass Broken\n").unwrap();

        let classes = SourceTreeInventory::scan(&[temp_dir.path().to_path_buf()]).unwrap();

        assert_eq!(classes, vec![ClassInfo::new("org.web3j.corda.model", "Amount")]);
        assert!(logs_contain("Skipping unreadable source entry"));
        assert!(logs_contain("Latin1.kt"));
    }

    #[tokio::test]
    async fn test_missing_root_is_configuration_error() {
        let inventory = SourceTreeInventory::new(vec![PathBuf::from("/nonexistent/sources")]);
        let err = inventory.classes().await.unwrap_err();
        assert!(matches!(err, GenerationError::InvalidConfiguration(_)));
    }
}
