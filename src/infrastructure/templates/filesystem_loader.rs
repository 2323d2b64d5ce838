//! Filesystem-based template loader
//!
//! Loads `*.tera` files from a single directory, typically the configured
//! `template_dir`. The result is usually layered over the embedded bundle so
//! a directory only needs the templates it changes.

use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tokio::fs;

use super::{
    TemplateBundle, TemplateError, TemplateFile, TemplateLoader, TemplateSource, template_name,
};

/// Template loader for a directory on disk
pub struct FileSystemTemplateLoader {
    dir: PathBuf,
}

impl FileSystemTemplateLoader {
    pub fn new<P: AsRef<Path>>(dir: P) -> Self {
        Self {
            dir: dir.as_ref().to_path_buf(),
        }
    }
}

#[async_trait]
impl TemplateLoader for FileSystemTemplateLoader {
    async fn load(&self) -> Result<TemplateBundle, TemplateError> {
        if !self.dir.is_dir() {
            return Err(TemplateError::not_found(self.dir.to_string_lossy()));
        }

        let mut bundle = TemplateBundle::new();
        let mut entries = fs::read_dir(&self.dir).await?;
        while let Some(entry) = entries.next_entry().await? {
            let path = entry.path();
            if !entry.file_type().await?.is_file() {
                continue;
            }
            let Some(name) = path
                .file_name()
                .and_then(|n| n.to_str())
                .and_then(template_name)
            else {
                continue;
            };

            let content = fs::read_to_string(&path).await?;
            tracing::debug!(template = %name, path = %path.display(), "Loaded template");
            bundle.insert(TemplateFile {
                name: name.to_string(),
                content,
                source: TemplateSource::FileSystem(path.clone()),
            });
        }

        Ok(bundle)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_load_templates_from_directory() {
        let temp_dir = TempDir::new().unwrap();
        std::fs::write(temp_dir.path().join("api.kt.tera"), "interface {{ class_name }}").unwrap();
        std::fs::write(temp_dir.path().join("notes.txt"), "ignored").unwrap();

        let bundle = FileSystemTemplateLoader::new(temp_dir.path())
            .load()
            .await
            .unwrap();

        assert_eq!(bundle.len(), 1);
        let api = bundle.get("api.kt").unwrap();
        assert_eq!(api.content, "interface {{ class_name }}");
        assert_eq!(
            api.source,
            TemplateSource::FileSystem(temp_dir.path().join("api.kt.tera"))
        );
    }

    #[tokio::test]
    async fn test_missing_directory() {
        let err = FileSystemTemplateLoader::new("/nonexistent/templates")
            .load()
            .await
            .unwrap_err();
        assert!(matches!(err, TemplateError::TemplateNotFound(_)));
    }
}
