//! Filesystem-based output service implementation

use async_trait::async_trait;
use std::path::{Component, Path, PathBuf};
use tokio::fs;
use tokio::io::AsyncWriteExt;

use crate::generation::{Artifact, GenerationError, OutputService};

/// Output service that writes artifacts to the filesystem, overwriting
/// existing files
pub struct FileSystemOutputService;

impl FileSystemOutputService {
    pub fn new() -> Self {
        Self
    }
}

fn io_error(action: &str, path: &Path, e: std::io::Error) -> GenerationError {
    GenerationError::Io(std::io::Error::new(
        e.kind(),
        format!("Failed to {action} {}: {e}", path.display()),
    ))
}

/// Artifact paths must stay below the output directory
fn resolve(output_dir: &Path, relative: &Path) -> Result<PathBuf, GenerationError> {
    if relative
        .components()
        .any(|c| !matches!(c, Component::Normal(_) | Component::CurDir))
    {
        return Err(GenerationError::Validation(format!(
            "Artifact path escapes the output directory: {}",
            relative.display()
        )));
    }
    Ok(output_dir.join(relative))
}

#[async_trait]
impl OutputService for FileSystemOutputService {
    async fn write_artifacts(
        &self,
        output_dir: &Path,
        artifacts: &[Artifact],
    ) -> Result<Vec<PathBuf>, GenerationError> {
        // Validate every path before writing the first file
        let targets = artifacts
            .iter()
            .map(|artifact| resolve(output_dir, &artifact.path))
            .collect::<Result<Vec<_>, _>>()?;

        for (artifact, path) in artifacts.iter().zip(&targets) {
            if let Some(parent) = path.parent() {
                fs::create_dir_all(parent)
                    .await
                    .map_err(|e| io_error("create directory", parent, e))?;
            }

            let mut file = fs::File::create(path)
                .await
                .map_err(|e| io_error("create file", path, e))?;
            file.write_all(artifact.content.as_bytes())
                .await
                .map_err(|e| io_error("write file", path, e))?;
            file.flush()
                .await
                .map_err(|e| io_error("flush file", path, e))?;

            tracing::debug!(path = %path.display(), kind = %artifact.kind, "Wrote artifact");
        }

        Ok(targets)
    }

    async fn ensure_directory(&self, path: &Path) -> Result<(), GenerationError> {
        fs::create_dir_all(path)
            .await
            .map_err(|e| io_error("create directory", path, e))
    }
}

impl Default for FileSystemOutputService {
    fn default() -> Self {
        Self::new()
    }
}
