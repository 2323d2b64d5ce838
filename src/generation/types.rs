//! Core types for the generation domain

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::path::PathBuf;

use crate::generation::{GenerationError, TypeMappingConflict};

// Re-export OpenAPI types from infrastructure module
pub use crate::infrastructure::openapi::{
    ApiInfo, ApiSpecification, HttpMethod, Operation, Parameter, ParameterLocation, PathItem,
    Server,
};

/// A class visible to the generation process, as reported by a class inventory
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ClassInfo {
    pub package: String,
    pub simple_name: String,
}

impl ClassInfo {
    pub fn new<P: Into<String>, N: Into<String>>(package: P, simple_name: N) -> Self {
        Self {
            package: package.into(),
            simple_name: simple_name.into(),
        }
    }

    /// Split a fully-qualified name at its last dot.
    ///
    /// Returns `None` for names without a package, which cannot take part in
    /// namespace reconciliation.
    pub fn from_qualified_name(name: &str) -> Option<Self> {
        let (package, simple_name) = name.trim().rsplit_once('.')?;
        if package.is_empty() || simple_name.is_empty() {
            return None;
        }
        Some(Self::new(package, simple_name))
    }

    pub fn qualified_name(&self) -> String {
        format!("{}.{}", self.package, self.simple_name)
    }
}

impl fmt::Display for ClassInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.package, self.simple_name)
    }
}

/// What the caller wants generated and where
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationTarget {
    pub package_name: String,
    pub output_dir: PathBuf,
    pub generate_tests: bool,
}

impl GenerationTarget {
    pub fn new<S: Into<String>, P: Into<PathBuf>>(
        package_name: S,
        output_dir: P,
        generate_tests: bool,
    ) -> Self {
        Self {
            package_name: package_name.into(),
            output_dir: output_dir.into(),
            generate_tests,
        }
    }

    pub fn validate(&self) -> Result<(), GenerationError> {
        if self.package_name.is_empty() {
            return Err(GenerationError::Validation(
                "Package name cannot be empty".to_string(),
            ));
        }

        let valid_segment = |segment: &str| {
            let mut chars = segment.chars();
            matches!(chars.next(), Some(c) if c.is_ascii_alphabetic() || c == '_')
                && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
        };
        if !self.package_name.split('.').all(valid_segment) {
            return Err(GenerationError::Validation(format!(
                "Invalid package name: {}",
                self.package_name
            )));
        }

        Ok(())
    }

    /// Package name as a relative directory, e.g. `com.example.client` -> `com/example/client`
    pub fn package_path(&self) -> PathBuf {
        self.package_name.split('.').collect()
    }
}

/// The flags handed to the codegen engine
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GenerationProperties {
    /// Schema names that must be emitted as model classes
    pub models: BTreeSet<String>,
    /// Grouping names that become API client interfaces
    pub apis: BTreeSet<String>,
    pub generate_tests: bool,
}

/// Kind of file produced by the codegen engine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ArtifactKind {
    Model,
    Api,
    ApiTest,
}

impl ArtifactKind {
    /// Name of the template rendering this kind of artifact
    pub fn template_name(&self) -> &'static str {
        match self {
            ArtifactKind::Model => "model.kt",
            ArtifactKind::Api => "api.kt",
            ArtifactKind::ApiTest => "api_test.kt",
        }
    }
}

impl fmt::Display for ArtifactKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArtifactKind::Model => write!(f, "model"),
            ArtifactKind::Api => write!(f, "api"),
            ArtifactKind::ApiTest => write!(f, "api_test"),
        }
    }
}

/// Generated artifact; `path` is relative to the output directory
#[derive(Debug, Clone)]
pub struct Artifact {
    pub path: PathBuf,
    pub content: String,
    pub kind: ArtifactKind,
}

/// A file the formatter could not process; the file stays unformatted
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormatFailure {
    pub path: PathBuf,
    pub message: String,
}

/// Result of generation
#[derive(Debug, Clone, Default)]
pub struct GenerationResult {
    /// Every file written, in emission order
    pub files: Vec<PathBuf>,
    pub format_failures: Vec<FormatFailure>,
    pub conflicts: Vec<TypeMappingConflict>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_class_info_from_qualified_name() {
        let class = ClassInfo::from_qualified_name("org.web3j.corda.model.core.contracts.Issued")
            .unwrap();
        assert_eq!(class.package, "org.web3j.corda.model.core.contracts");
        assert_eq!(class.simple_name, "Issued");
        assert_eq!(
            class.qualified_name(),
            "org.web3j.corda.model.core.contracts.Issued"
        );
        assert_eq!(class.to_string(), class.qualified_name());

        assert!(ClassInfo::from_qualified_name("AmountCurrency").is_none());
        assert!(ClassInfo::from_qualified_name("trailing.").is_none());
        assert!(ClassInfo::from_qualified_name(".Leading").is_none());
    }

    #[test]
    fn test_target_validation() {
        assert!(
            GenerationTarget::new("com.example.client", "/out", false)
                .validate()
                .is_ok()
        );
        assert!(
            GenerationTarget::new("org.web3j.corda_obligation", "/out", true)
                .validate()
                .is_ok()
        );

        assert!(GenerationTarget::new("", "/out", false).validate().is_err());
        assert!(
            GenerationTarget::new("com..example", "/out", false)
                .validate()
                .is_err()
        );
        assert!(
            GenerationTarget::new("com.1example", "/out", false)
                .validate()
                .is_err()
        );
        assert!(
            GenerationTarget::new("com.ex-ample", "/out", false)
                .validate()
                .is_err()
        );
    }

    #[test]
    fn test_package_path() {
        let target = GenerationTarget::new("com.example.client", "/out", false);
        assert_eq!(target.package_path(), PathBuf::from("com/example/client"));
    }

    #[test]
    fn test_artifact_kind_template_names() {
        assert_eq!(ArtifactKind::Model.template_name(), "model.kt");
        assert_eq!(ArtifactKind::Api.template_name(), "api.kt");
        assert_eq!(ArtifactKind::ApiTest.template_name(), "api_test.kt");
        assert_eq!(ArtifactKind::ApiTest.to_string(), "api_test");
    }
}
