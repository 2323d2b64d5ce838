//! Template management: embedded Kotlin client templates plus an optional
//! override directory

pub mod embedded;
pub mod errors;
pub mod filesystem_loader;
pub mod traits;
pub mod types;

pub use embedded::EmbeddedTemplateLoader;
pub use errors::TemplateError;
pub use filesystem_loader::FileSystemTemplateLoader;
pub use traits::TemplateLoader;
pub use types::*;

use std::path::Path;

/// Embedded templates, overridden by `*.tera` files in `template_dir` if given
pub async fn load_templates(template_dir: Option<&Path>) -> Result<TemplateBundle, TemplateError> {
    let mut bundle = EmbeddedTemplateLoader::new().load().await?;
    if let Some(dir) = template_dir {
        bundle = bundle.overlay(FileSystemTemplateLoader::new(dir).load().await?);
    }
    bundle.validate()?;
    Ok(bundle)
}
