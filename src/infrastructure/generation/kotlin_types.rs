//! Kotlin type rendering for OpenAPI schemas
//!
//! Names present in the type mapping table are emitted verbatim. Generated
//! models resolve to their class name in the target package; any other
//! referenced schema is inlined.

use serde_json::Value as JsonValue;
use std::collections::{BTreeMap, BTreeSet, HashMap};

use crate::generation::TypeMappingTable;
use crate::generation::utils::{model_class_name, to_snake_case, to_type_name};

const SCHEMA_REF_PREFIX: &str = "#/components/schemas/";

/// Referenced schemas nest at most this deep when inlined
const MAX_INLINE_DEPTH: usize = 8;

const ANY: &str = "Any";

/// Maps schemas to Kotlin type expressions
pub struct KotlinTypeMapper<'a> {
    type_mapping: &'a TypeMappingTable,
    schemas: &'a BTreeMap<String, JsonValue>,
    model_names: BTreeMap<String, String>,
}

impl<'a> KotlinTypeMapper<'a> {
    /// `reserved` holds class names already taken in the target package,
    /// such as the API clients and their tests
    pub fn new(
        type_mapping: &'a TypeMappingTable,
        schemas: &'a BTreeMap<String, JsonValue>,
        models: &BTreeSet<String>,
        reserved: &BTreeSet<String>,
    ) -> Self {
        Self {
            type_mapping,
            schemas,
            model_names: model_class_names(models, reserved),
        }
    }

    /// Class name a generated model is emitted under
    pub fn model_name(&self, schema_name: &str) -> Option<&str> {
        self.model_names.get(schema_name).map(String::as_str)
    }

    /// Kotlin type for a named schema reference
    pub fn named_type(&self, schema_name: &str) -> String {
        self.named_type_at(schema_name, 0)
    }

    /// Kotlin type for an inline schema
    pub fn type_of(&self, schema: &JsonValue) -> String {
        self.type_at(schema, 0)
    }

    fn named_type_at(&self, schema_name: &str, depth: usize) -> String {
        if let Some(mapped) = self.type_mapping.get(schema_name) {
            return mapped.to_string();
        }
        if let Some(model) = self.model_names.get(schema_name) {
            return model.clone();
        }
        match self.schemas.get(schema_name) {
            Some(schema) if depth < MAX_INLINE_DEPTH => self.type_at(schema, depth + 1),
            _ => ANY.to_string(),
        }
    }

    fn type_at(&self, schema: &JsonValue, depth: usize) -> String {
        if let Some(reference) = schema.get("$ref").and_then(JsonValue::as_str) {
            return match reference.strip_prefix(SCHEMA_REF_PREFIX) {
                Some(name) => self.named_type_at(name, depth),
                None => ANY.to_string(),
            };
        }

        // A single-element composition is the wrapped type
        for keyword in ["allOf", "oneOf", "anyOf"] {
            if let Some([only]) = schema
                .get(keyword)
                .and_then(JsonValue::as_array)
                .map(Vec::as_slice)
            {
                return self.type_at(only, depth);
            }
        }

        let format = schema.get("format").and_then(JsonValue::as_str);
        match schema.get("type").and_then(JsonValue::as_str) {
            Some("string") => match format {
                Some("uuid") => "java.util.UUID",
                Some("date-time") => "java.time.OffsetDateTime",
                Some("date") => "java.time.LocalDate",
                Some("byte") | Some("binary") => "ByteArray",
                _ => "String",
            }
            .to_string(),
            Some("integer") => match format {
                Some("int64") => "Long",
                _ => "Int",
            }
            .to_string(),
            Some("number") => match format {
                Some("float") => "Float",
                Some("double") => "Double",
                _ => "java.math.BigDecimal",
            }
            .to_string(),
            Some("boolean") => "Boolean".to_string(),
            Some("array") => {
                let item = schema
                    .get("items")
                    .map(|items| self.type_at(items, depth))
                    .unwrap_or_else(|| ANY.to_string());
                format!("List<{item}>")
            }
            _ => match schema.get("additionalProperties") {
                Some(value @ JsonValue::Object(_)) => {
                    format!("Map<String, {}>", self.type_at(value, depth))
                }
                Some(JsonValue::Bool(true)) => format!("Map<String, {ANY}>"),
                _ => ANY.to_string(),
            },
        }
    }
}

/// Class names for generated models, unique within the package.
///
/// A simple name shared by several models or taken by a reserved class falls
/// back to the full schema name; a numeric suffix settles what is left.
fn model_class_names(
    models: &BTreeSet<String>,
    reserved: &BTreeSet<String>,
) -> BTreeMap<String, String> {
    let mut counts: HashMap<String, usize> = HashMap::new();
    for model in models {
        *counts.entry(model_class_name(model)).or_default() += 1;
    }

    let mut taken = reserved.clone();
    let mut names = BTreeMap::new();
    for model in models {
        let simple = model_class_name(model);
        let preferred = if counts.get(&simple).copied().unwrap_or_default() > 1
            || reserved.contains(&simple)
        {
            to_type_name(model)
        } else {
            simple
        };

        let mut name = preferred.clone();
        let mut suffix = 2;
        while taken.contains(&name) {
            name = format!("{preferred}{suffix}");
            suffix += 1;
        }
        if name != model_class_name(model) {
            tracing::debug!(schema = %model, class = %name, "Renamed clashing model class");
        }
        taken.insert(name.clone());
        names.insert(model.clone(), name);
    }
    names
}

/// Enum constant identifier for a raw enum value
pub fn enum_constant(value: &str) -> String {
    let constant: String = to_snake_case(value)
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() {
                c.to_ascii_uppercase()
            } else {
                '_'
            }
        })
        .collect();

    if constant.is_empty() || constant.starts_with(|c: char| c.is_ascii_digit()) {
        format!("_{constant}")
    } else {
        constant
    }
}
