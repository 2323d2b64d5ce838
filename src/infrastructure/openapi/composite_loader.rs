//! Composite OpenAPI loader that dispatches on the source kind

use async_trait::async_trait;
use url::Url;

use super::{FileOpenApiLoader, HttpOpenApiLoader};
use crate::generation::{ApiSpecification, GenerationError, OpenApiLoader};

/// Where a specification comes from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SpecSource {
    Http(Url),
    File(String),
}

impl SpecSource {
    /// `http`/`https` URLs are fetched; anything else, `file://` URLs
    /// included, is read from disk
    pub fn detect(source: &str) -> Self {
        match Url::parse(source) {
            Ok(url) if matches!(url.scheme(), "http" | "https") => SpecSource::Http(url),
            Ok(url) if url.scheme() == "file" => match url.to_file_path() {
                Ok(path) => SpecSource::File(path.to_string_lossy().into_owned()),
                Err(()) => SpecSource::File(source.to_string()),
            },
            _ => SpecSource::File(source.to_string()),
        }
    }
}

/// Loader that picks the HTTP or file strategy per source
pub struct CompositeOpenApiLoader {
    http: HttpOpenApiLoader,
    file: FileOpenApiLoader,
}

impl CompositeOpenApiLoader {
    pub fn new() -> Result<Self, GenerationError> {
        Ok(Self {
            http: HttpOpenApiLoader::new()?,
            file: FileOpenApiLoader::new(),
        })
    }
}

#[async_trait]
impl OpenApiLoader for CompositeOpenApiLoader {
    async fn load(&self, source: &str) -> Result<ApiSpecification, GenerationError> {
        match SpecSource::detect(source) {
            SpecSource::Http(url) => {
                tracing::debug!(%url, "Loading OpenAPI spec over HTTP");
                self.http.load(url.as_str()).await
            }
            SpecSource::File(path) => {
                tracing::debug!(path = %path, "Loading OpenAPI spec from file");
                self.file.load(&path).await
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detect_source() {
        assert!(matches!(
            SpecSource::detect("http://localhost:8080/swagger.json"),
            SpecSource::Http(_)
        ));
        assert!(matches!(
            SpecSource::detect("HTTPS://node.example.com/api"),
            SpecSource::Http(_)
        ));
        assert_eq!(
            SpecSource::detect("specs/node.yaml"),
            SpecSource::File("specs/node.yaml".to_string())
        );
        assert_eq!(
            SpecSource::detect("file:///tmp/node.json"),
            SpecSource::File("/tmp/node.json".to_string())
        );
        // Windows-style drive letters parse as a URL scheme
        assert_eq!(
            SpecSource::detect("C:\\specs\\node.json"),
            SpecSource::File("C:\\specs\\node.json".to_string())
        );
    }
}
