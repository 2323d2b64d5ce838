//! Business rules for the generation domain

use std::collections::BTreeSet;

use crate::generation::{ApiSpecification, GenerationError, TypeMappingTable};

/// Decides which operation paths of a node's document belong to the CorDapp client
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathFilter {
    prefix: String,
    excluded_suffixes: Vec<String>,
}

impl PathFilter {
    pub fn new<S: Into<String>>(prefix: S, excluded_suffixes: Vec<String>) -> Self {
        Self {
            prefix: prefix.into(),
            excluded_suffixes,
        }
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// A path is kept when it lives under the prefix, is not the bare
    /// collection endpoint and is not an excluded sub-resource (flows are
    /// generated through their own pipeline).
    pub fn retains(&self, path: &str) -> bool {
        path.starts_with(&self.prefix)
            && path != self.prefix
            && !self
                .excluded_suffixes
                .iter()
                .any(|suffix| path.ends_with(suffix.as_str()))
    }

    /// Filtered copy of `spec`; the input is left untouched
    pub fn apply(&self, spec: &ApiSpecification) -> ApiSpecification {
        let mut filtered = spec.clone();
        filtered.paths.retain(|path, _| self.retains(path));

        tracing::debug!(
            before = spec.paths.len(),
            after = filtered.paths.len(),
            prefix = %self.prefix,
            "Filtered OpenAPI paths"
        );
        filtered
    }
}

impl Default for PathFilter {
    fn default() -> Self {
        Self::new("/cordapps", vec!["/flows".to_string()])
    }
}

/// The single authority on whether a schema is emitted as a model class.
///
/// A schema is skipped when an existing class already implements it (it has a
/// type mapping entry) or when it follows an internal framework convention
/// that is never user-facing.
#[derive(Debug, Clone)]
pub struct ModelSelection<'a> {
    type_mapping: &'a TypeMappingTable,
    excluded_prefixes: &'a [String],
}

impl<'a> ModelSelection<'a> {
    pub fn new(type_mapping: &'a TypeMappingTable, excluded_prefixes: &'a [String]) -> Self {
        Self {
            type_mapping,
            excluded_prefixes,
        }
    }

    pub fn should_generate(&self, schema_name: &str) -> bool {
        !self.type_mapping.contains(schema_name)
            && !self
                .excluded_prefixes
                .iter()
                .any(|prefix| schema_name.starts_with(prefix.as_str()))
    }

    pub fn select<'s, I>(&self, schema_names: I) -> BTreeSet<String>
    where
        I: IntoIterator<Item = &'s String>,
    {
        schema_names
            .into_iter()
            .filter(|name| self.should_generate(name))
            .cloned()
            .collect()
    }
}

/// Grouping name of an operation path following `/{prefix}/{grouping}/...`
///
/// The grouping becomes the generated client's class and file name, so a path
/// that does not carry one is a modelling defect and aborts the run.
pub fn grouping_name(path: &str, prefix: &str) -> Result<String, GenerationError> {
    let rest = path
        .strip_prefix(prefix)
        .ok_or_else(|| GenerationError::path_convention(path, format!("not under '{prefix}'")))?;

    let rest = rest.strip_prefix('/').ok_or_else(|| {
        GenerationError::path_convention(path, "missing grouping segment after prefix")
    })?;

    let grouping = rest.split('/').next().unwrap_or_default();
    if grouping.is_empty() {
        return Err(GenerationError::path_convention(
            path,
            "empty grouping segment",
        ));
    }
    if grouping.starts_with('{') {
        return Err(GenerationError::path_convention(
            path,
            "grouping segment is a path parameter",
        ));
    }

    Ok(grouping.to_string())
}

/// Distinct grouping names of every path in `spec`
pub fn grouping_names(
    spec: &ApiSpecification,
    prefix: &str,
) -> Result<BTreeSet<String>, GenerationError> {
    spec.paths
        .keys()
        .map(|path| grouping_name(path, prefix))
        .collect()
}
