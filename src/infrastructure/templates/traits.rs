//! Template loading traits

use async_trait::async_trait;

use crate::infrastructure::templates::{TemplateBundle, TemplateError};

/// Loads a bundle of templates from some source
#[async_trait]
pub trait TemplateLoader: Send + Sync {
    async fn load(&self) -> Result<TemplateBundle, TemplateError>;
}
