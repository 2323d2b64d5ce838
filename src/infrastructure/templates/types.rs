//! Template bundle types

use std::collections::BTreeMap;
use std::path::PathBuf;

use super::TemplateError;
use crate::generation::ArtifactKind;

/// File extension of template sources
pub const TEMPLATE_EXTENSION: &str = ".tera";

/// Where a template came from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TemplateSource {
    Embedded,
    FileSystem(PathBuf),
}

/// One template, keyed by its artifact template name (`model.kt`, ...)
#[derive(Debug, Clone)]
pub struct TemplateFile {
    pub name: String,
    pub content: String,
    pub source: TemplateSource,
}

/// The set of templates the codegen engine renders from
#[derive(Debug, Clone, Default)]
pub struct TemplateBundle {
    files: BTreeMap<String, TemplateFile>,
}

impl TemplateBundle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, file: TemplateFile) {
        self.files.insert(file.name.clone(), file);
    }

    pub fn get(&self, name: &str) -> Option<&TemplateFile> {
        self.files.get(name)
    }

    pub fn files(&self) -> impl Iterator<Item = &TemplateFile> {
        self.files.values()
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    /// Templates in `other` replace same-named ones in `self`
    pub fn overlay(mut self, other: TemplateBundle) -> Self {
        for (name, file) in other.files {
            tracing::debug!(template = %name, source = ?file.source, "Overriding template");
            self.files.insert(name, file);
        }
        self
    }

    /// Every artifact kind has a template
    pub fn validate(&self) -> Result<(), TemplateError> {
        for kind in [ArtifactKind::Model, ArtifactKind::Api, ArtifactKind::ApiTest] {
            if !self.files.contains_key(kind.template_name()) {
                return Err(TemplateError::MissingTemplate(kind.template_name().to_string()));
            }
        }
        Ok(())
    }
}

/// Template name for a file name, `None` when it is not a template
pub fn template_name(file_name: &str) -> Option<&str> {
    file_name
        .strip_suffix(TEMPLATE_EXTENSION)
        .filter(|name| !name.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn file(name: &str, content: &str, source: TemplateSource) -> TemplateFile {
        TemplateFile {
            name: name.to_string(),
            content: content.to_string(),
            source,
        }
    }

    #[test]
    fn test_overlay_replaces_by_name() {
        let mut base = TemplateBundle::new();
        base.insert(file("model.kt", "base model", TemplateSource::Embedded));
        base.insert(file("api.kt", "base api", TemplateSource::Embedded));

        let mut custom = TemplateBundle::new();
        custom.insert(file(
            "api.kt",
            "custom api",
            TemplateSource::FileSystem(PathBuf::from("/t")),
        ));

        let merged = base.overlay(custom);
        assert_eq!(merged.len(), 2);
        assert_eq!(merged.get("api.kt").unwrap().content, "custom api");
        assert_eq!(merged.get("model.kt").unwrap().source, TemplateSource::Embedded);
    }

    #[test]
    fn test_validate_reports_missing_template() {
        let mut bundle = TemplateBundle::new();
        bundle.insert(file("model.kt", "", TemplateSource::Embedded));
        bundle.insert(file("api.kt", "", TemplateSource::Embedded));

        match bundle.validate().unwrap_err() {
            TemplateError::MissingTemplate(name) => assert_eq!(name, "api_test.kt"),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_template_name() {
        assert_eq!(template_name("model.kt.tera"), Some("model.kt"));
        assert_eq!(template_name(".tera"), None);
        assert_eq!(template_name("README.md"), None);
    }
}
