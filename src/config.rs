//! Generator configuration
//!
//! Every field has a default, so a missing file yields the stock CorDapp
//! client configuration. Relative directories in a configuration file are
//! resolved against the directory containing that file.
//!
//! ```toml
//! resource_prefix = "/cordapps"
//! excluded_suffixes = ["/flows"]
//! known_classes = ["org.web3j.corda.model.core.identity.Party"]
//! class_source_dirs = ["model/src/main/kotlin"]
//!
//! # Merged over AmountCurrency, Issued, Issued_issuer and Error
//! [explicit_types]
//! Money = "com.example.model.Money"
//!
//! [[namespaces]]
//! kind = "prefix_substitution"
//! repackaged = "org.web3j.corda.model"
//! upstream = "net.corda"
//!
//! [formatter]
//! enabled = true
//! command = "ktlint --format {file}"
//! ```

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use crate::generation::{
    GenerationError, NamespaceResolver, PathFilter, TypeMappingResolver, default_explicit_types,
    default_namespace_resolvers,
};

pub const DEFAULT_RESOURCE_PREFIX: &str = "/cordapps";
pub const DEFAULT_FORMATTER_COMMAND: &str = "ktlint --format {file}";

/// External formatter run over every generated file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FormatterConfig {
    pub enabled: bool,
    /// Shell command; `{file}` is replaced with the quoted file path
    pub command: String,
}

impl Default for FormatterConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            command: DEFAULT_FORMATTER_COMMAND.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GeneratorConfig {
    pub resource_prefix: String,
    pub excluded_suffixes: Vec<String>,
    /// Added to the built-in no-package types; a name given here replaces
    /// the built-in target
    pub explicit_types: BTreeMap<String, String>,
    pub namespaces: Vec<NamespaceResolver>,
    pub excluded_model_prefixes: Vec<String>,
    /// Fully qualified names of classes available to the client
    pub known_classes: Vec<String>,
    /// Kotlin/Java source roots scanned for available classes
    pub class_source_dirs: Vec<PathBuf>,
    pub template_dir: Option<PathBuf>,
    pub formatter: FormatterConfig,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            resource_prefix: DEFAULT_RESOURCE_PREFIX.to_string(),
            excluded_suffixes: vec!["/flows".to_string()],
            explicit_types: BTreeMap::new(),
            namespaces: default_namespace_resolvers(),
            excluded_model_prefixes: vec!["net.corda.core.utilities.NonEmptySet".to_string()],
            known_classes: Vec::new(),
            class_source_dirs: Vec::new(),
            template_dir: None,
            formatter: FormatterConfig::default(),
        }
    }
}

impl GeneratorConfig {
    pub fn from_toml_str(content: &str) -> Result<Self, GenerationError> {
        let config: Self = toml::from_str(content)
            .map_err(|e| GenerationError::InvalidConfiguration(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Load from a TOML file
    pub async fn load(path: &Path) -> Result<Self, GenerationError> {
        let content = tokio::fs::read_to_string(path).await.map_err(|e| {
            GenerationError::InvalidConfiguration(format!(
                "Failed to read config {}: {e}",
                path.display()
            ))
        })?;

        let mut config = Self::from_toml_str(&content)?;
        if let Some(base) = path.parent() {
            config.resolve_relative_to(base);
        }

        tracing::debug!(path = %path.display(), "Loaded generator configuration");
        Ok(config)
    }

    /// Load from `path` if given, else the defaults
    pub async fn load_or_default(path: Option<&Path>) -> Result<Self, GenerationError> {
        match path {
            Some(path) => Self::load(path).await,
            None => Ok(Self::default()),
        }
    }

    pub fn validate(&self) -> Result<(), GenerationError> {
        if !self.resource_prefix.starts_with('/') || self.resource_prefix.ends_with('/') {
            return Err(GenerationError::InvalidConfiguration(format!(
                "resource_prefix must start with '/' and not end with one: '{}'",
                self.resource_prefix
            )));
        }
        if self.formatter.enabled && self.formatter.command.trim().is_empty() {
            return Err(GenerationError::InvalidConfiguration(
                "formatter.command cannot be empty when the formatter is enabled".to_string(),
            ));
        }
        Ok(())
    }

    fn resolve_relative_to(&mut self, base: &Path) {
        for dir in &mut self.class_source_dirs {
            if dir.is_relative() {
                *dir = base.join(&*dir);
            }
        }
        if let Some(dir) = &mut self.template_dir {
            if dir.is_relative() {
                *dir = base.join(&*dir);
            }
        }
    }

    pub fn path_filter(&self) -> PathFilter {
        PathFilter::new(self.resource_prefix.clone(), self.excluded_suffixes.clone())
    }

    /// Built-in no-package types overlaid with the configured ones
    pub fn effective_explicit_types(&self) -> BTreeMap<String, String> {
        let mut types = default_explicit_types();
        types.extend(
            self.explicit_types
                .iter()
                .map(|(name, target)| (name.clone(), target.clone())),
        );
        types
    }

    pub fn type_mapping_resolver(&self) -> TypeMappingResolver {
        TypeMappingResolver::new(self.effective_explicit_types(), self.namespaces.clone())
    }
}
