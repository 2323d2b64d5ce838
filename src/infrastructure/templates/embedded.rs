//! Templates compiled into the binary

use async_trait::async_trait;
use rust_embed::RustEmbed;
use tracing::debug;

use super::{
    TemplateBundle, TemplateError, TemplateFile, TemplateLoader, TemplateSource, template_name,
};

/// Container for all templates embedded at compile time
#[derive(RustEmbed)]
#[folder = "templates/"]
struct EmbeddedTemplates;

/// Directory inside the embedded folder holding the Kotlin client templates
const KOTLIN_DIR: &str = "kotlin/";

/// Loads the stock Kotlin client templates
#[derive(Debug, Clone, Copy, Default)]
pub struct EmbeddedTemplateLoader;

impl EmbeddedTemplateLoader {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl TemplateLoader for EmbeddedTemplateLoader {
    async fn load(&self) -> Result<TemplateBundle, TemplateError> {
        let mut bundle = TemplateBundle::new();

        for path in EmbeddedTemplates::iter() {
            let Some(file_name) = path.strip_prefix(KOTLIN_DIR) else {
                continue;
            };
            let Some(name) = template_name(file_name) else {
                continue;
            };
            let Some(embedded) = EmbeddedTemplates::get(&path) else {
                continue;
            };

            let content = String::from_utf8(embedded.data.to_vec()).map_err(|_| {
                TemplateError::InvalidEncoding {
                    name: path.to_string(),
                }
            })?;
            bundle.insert(TemplateFile {
                name: name.to_string(),
                content,
                source: TemplateSource::Embedded,
            });
        }

        debug!(count = bundle.len(), "Loaded embedded templates");
        Ok(bundle)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_embedded_templates_are_complete() {
        let bundle = EmbeddedTemplateLoader::new().load().await.unwrap();

        bundle.validate().unwrap();
        assert!(bundle.get("model.kt").unwrap().content.contains("data class"));
        assert!(bundle.get("api.kt").unwrap().content.contains("interface"));
    }
}
