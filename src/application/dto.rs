//! Data Transfer Objects for application layer

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::application::ValidationError;
use crate::generation::{FormatFailure, GenerationTarget, TypeMappingConflict};

/// Request to generate a CorDapp client
#[derive(Debug, Clone, Deserialize)]
pub struct GenerateClientRequest {
    /// Filesystem path or `http(s)` URL of the node's OpenAPI document
    pub schema: String,
    pub package_name: String,
    pub output_dir: PathBuf,
    #[serde(default)]
    pub generate_tests: bool,
}

impl GenerateClientRequest {
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.schema.trim().is_empty() {
            return Err(ValidationError::EmptySchemaSource);
        }
        if self.output_dir.as_os_str().is_empty() {
            return Err(ValidationError::MissingField("output_dir".to_string()));
        }
        self.target()
            .validate()
            .map_err(|e| ValidationError::InvalidPackageName(e.to_string()))
    }

    pub fn target(&self) -> GenerationTarget {
        GenerationTarget::new(
            self.package_name.clone(),
            self.output_dir.clone(),
            self.generate_tests,
        )
    }
}

/// Response from client generation
#[derive(Debug, Clone, Serialize)]
pub struct GenerateClientResponse {
    pub output_path: PathBuf,
    /// Paths kept after filtering
    pub paths: usize,
    pub files: Vec<PathBuf>,
    pub format_failures: Vec<FormatFailureSummary>,
    pub conflicts: Vec<ConflictSummary>,
}

#[derive(Debug, Clone, Serialize)]
pub struct FormatFailureSummary {
    pub path: PathBuf,
    pub message: String,
}

impl From<FormatFailure> for FormatFailureSummary {
    fn from(failure: FormatFailure) -> Self {
        Self {
            path: failure.path,
            message: failure.message,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ConflictSummary {
    pub key: String,
    pub previous: String,
    pub replacement: String,
}

impl From<TypeMappingConflict> for ConflictSummary {
    fn from(conflict: TypeMappingConflict) -> Self {
        Self {
            key: conflict.key,
            previous: conflict.previous,
            replacement: conflict.replacement,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request() -> GenerateClientRequest {
        GenerateClientRequest {
            schema: "http://localhost:8080/swagger.json".to_string(),
            package_name: "com.example.client".to_string(),
            output_dir: PathBuf::from("/output"),
            generate_tests: false,
        }
    }

    #[test]
    fn test_generate_client_request_validation() {
        assert!(request().validate().is_ok());

        let mut invalid = request();
        invalid.schema = "  ".to_string();
        assert!(matches!(
            invalid.validate().unwrap_err(),
            ValidationError::EmptySchemaSource
        ));

        let mut invalid = request();
        invalid.package_name = "com.example.1client".to_string();
        assert!(matches!(
            invalid.validate().unwrap_err(),
            ValidationError::InvalidPackageName(_)
        ));

        let mut invalid = request();
        invalid.output_dir = PathBuf::new();
        assert!(matches!(
            invalid.validate().unwrap_err(),
            ValidationError::MissingField(_)
        ));
    }

    #[test]
    fn test_request_from_json() {
        let request: GenerateClientRequest = serde_json::from_str(
            r#"{"schema": "node.json", "package_name": "a.b", "output_dir": "out"}"#,
        )
        .unwrap();
        assert!(!request.generate_tests);
        assert_eq!(request.target().package_path(), PathBuf::from("a/b"));
    }
}
