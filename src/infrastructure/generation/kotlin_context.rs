//! Kotlin-specific context building for the client templates

use serde::Serialize;
use serde_json::Value as JsonValue;
use std::collections::{BTreeMap, BTreeSet, HashSet};

use super::kotlin_types::{KotlinTypeMapper, enum_constant};
use crate::generation::{
    CodegenInput, GenerationError, Operation, ParameterLocation, grouping_name,
    utils::{sanitize_kotlin_identifier, to_camel_case, to_type_name},
};

/// Nested `allOf` members are flattened at most this deep
const MAX_ALL_OF_DEPTH: usize = 4;

#[derive(Debug, Clone, Serialize)]
pub struct KotlinProperty {
    pub name: String,
    pub json_name: String,
    pub kotlin_type: String,
    pub required: bool,
    pub description: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct KotlinEnumValue {
    pub constant: String,
    pub value: String,
}

/// A model class to emit
#[derive(Debug, Clone, Serialize)]
pub struct KotlinModel {
    pub schema_name: String,
    pub class_name: String,
    pub description: Option<String>,
    pub is_enum: bool,
    pub enum_values: Vec<KotlinEnumValue>,
    pub properties: Vec<KotlinProperty>,
}

#[derive(Debug, Clone, Serialize)]
pub struct KotlinParameter {
    pub name: String,
    pub ident: String,
    /// JAX-RS parameter annotation
    pub annotation: &'static str,
    pub kotlin_type: String,
    pub required: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct KotlinBody {
    pub kotlin_type: String,
    pub required: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct KotlinOperation {
    pub name: String,
    pub http_method: &'static str,
    /// Path relative to the resource, empty for the resource itself
    pub path: String,
    pub summary: Option<String>,
    pub description: Option<String>,
    pub deprecated: bool,
    pub parameters: Vec<KotlinParameter>,
    pub body: Option<KotlinBody>,
    pub return_type: String,
}

/// One API client interface
#[derive(Debug, Clone, Serialize)]
pub struct KotlinApi {
    pub grouping: String,
    pub class_name: String,
    pub resource_path: String,
    pub operations: Vec<KotlinOperation>,
}

/// Builds template views for models and API clients of one codegen run
pub struct KotlinContextBuilder<'a> {
    input: CodegenInput<'a>,
    types: KotlinTypeMapper<'a>,
    /// Grouping to client interface name
    api_names: BTreeMap<String, String>,
}

impl<'a> KotlinContextBuilder<'a> {
    /// Fails when two groupings need the same client or test class.
    /// Models step aside for client names instead.
    pub fn new(input: CodegenInput<'a>) -> Result<Self, GenerationError> {
        let api_names = api_class_names(&input.properties.apis)?;

        let mut reserved: BTreeSet<String> = api_names.values().cloned().collect();
        if input.properties.generate_tests {
            reserved.extend(api_names.values().map(|name| test_class_name(name)));
        }

        Ok(Self {
            types: KotlinTypeMapper::new(
                input.type_mapping,
                &input.spec.schemas,
                &input.properties.models,
                &reserved,
            ),
            api_names,
            input,
        })
    }

    pub fn model(&self, schema_name: &str) -> Result<KotlinModel, GenerationError> {
        let schema = self.input.spec.schemas.get(schema_name).ok_or_else(|| {
            GenerationError::Validation(format!("Model '{schema_name}' has no schema"))
        })?;
        let class_name = self
            .types
            .model_name(schema_name)
            .map(String::from)
            .unwrap_or_else(|| to_type_name(schema_name));

        let enum_values: Vec<KotlinEnumValue> = schema
            .get("enum")
            .and_then(JsonValue::as_array)
            .map(|values| {
                values
                    .iter()
                    .filter_map(JsonValue::as_str)
                    .map(|value| KotlinEnumValue {
                        constant: enum_constant(value),
                        value: value.to_string(),
                    })
                    .collect()
            })
            .unwrap_or_default();

        let mut properties = Vec::new();
        let mut seen = HashSet::new();
        self.collect_properties(schema, 0, &mut seen, &mut properties);

        Ok(KotlinModel {
            schema_name: schema_name.to_string(),
            class_name,
            description: text(schema, "description"),
            is_enum: !enum_values.is_empty(),
            enum_values,
            properties,
        })
    }

    fn collect_properties(
        &self,
        schema: &JsonValue,
        depth: usize,
        seen: &mut HashSet<String>,
        properties: &mut Vec<KotlinProperty>,
    ) {
        if depth > MAX_ALL_OF_DEPTH {
            return;
        }

        if let Some(members) = schema.get("allOf").and_then(JsonValue::as_array) {
            for member in members {
                let member = member
                    .get("$ref")
                    .and_then(JsonValue::as_str)
                    .and_then(|r| r.rsplit('/').next())
                    .and_then(|name| self.input.spec.schemas.get(name))
                    .unwrap_or(member);
                self.collect_properties(member, depth + 1, seen, properties);
            }
        }

        let required: HashSet<&str> = schema
            .get("required")
            .and_then(JsonValue::as_array)
            .map(|names| names.iter().filter_map(JsonValue::as_str).collect())
            .unwrap_or_default();

        let Some(declared) = schema.get("properties").and_then(JsonValue::as_object) else {
            return;
        };
        for (json_name, property) in declared {
            if !seen.insert(json_name.clone()) {
                continue;
            }
            properties.push(KotlinProperty {
                name: kotlin_identifier(json_name, "value"),
                json_name: json_name.clone(),
                kotlin_type: self.types.type_of(property),
                required: required.contains(json_name.as_str()),
                description: text(property, "description"),
            });
        }
    }

    /// Interface for one grouping: every operation whose path carries it
    pub fn api(&self, grouping: &str) -> Result<KotlinApi, GenerationError> {
        let prefix = self.input.resource_prefix;
        let resource_path = format!("{prefix}/{grouping}");

        let mut used_names = HashSet::new();
        let mut operations = Vec::new();
        for (path, operation) in self.input.spec.operations() {
            if grouping_name(path, prefix)? != grouping {
                continue;
            }
            let relative = path
                .strip_prefix(&resource_path)
                .unwrap_or_default()
                .trim_start_matches('/');
            let name = unique_name(operation_name(operation, relative), &mut used_names);
            operations.push(self.operation(operation, relative, name));
        }

        tracing::debug!(
            grouping = %grouping,
            operations = operations.len(),
            "Built API client context"
        );

        Ok(KotlinApi {
            grouping: grouping.to_string(),
            class_name: self
                .api_names
                .get(grouping)
                .cloned()
                .unwrap_or_else(|| to_type_name(grouping)),
            resource_path,
            operations,
        })
    }

    fn operation(&self, operation: &Operation, relative: &str, name: String) -> KotlinOperation {
        let parameters = operation
            .parameters
            .iter()
            .map(|parameter| KotlinParameter {
                name: parameter.name.clone(),
                ident: kotlin_identifier(&parameter.name, "param"),
                annotation: match parameter.location {
                    ParameterLocation::Path => "PathParam",
                    ParameterLocation::Query => "QueryParam",
                    ParameterLocation::Header => "HeaderParam",
                    ParameterLocation::Cookie => "CookieParam",
                },
                kotlin_type: parameter
                    .schema
                    .as_ref()
                    .map(|schema| self.types.type_of(schema))
                    .unwrap_or_else(|| "String".to_string()),
                required: parameter.required,
            })
            .collect();

        KotlinOperation {
            name,
            http_method: operation.method.annotation(),
            path: relative.to_string(),
            summary: operation.summary.as_deref().map(kdoc_text),
            description: operation.description.as_deref().map(kdoc_text),
            deprecated: operation.deprecated,
            parameters,
            body: operation.request_body.as_ref().map(|schema| KotlinBody {
                kotlin_type: self.types.type_of(schema),
                required: operation.request_body_required,
            }),
            return_type: operation
                .response
                .as_ref()
                .map(|schema| self.types.type_of(schema))
                .unwrap_or_else(|| "Unit".to_string()),
        }
    }
}

/// Class name of the generated test for a client interface
pub fn test_class_name(api_class: &str) -> String {
    format!("{api_class}Test")
}

/// Client interface names per grouping; a client or its test may not share a
/// class name with another grouping's
fn api_class_names(apis: &BTreeSet<String>) -> Result<BTreeMap<String, String>, GenerationError> {
    let names: BTreeMap<String, String> = apis
        .iter()
        .map(|grouping| (grouping.clone(), to_type_name(grouping)))
        .collect();

    let mut owners: BTreeMap<String, &str> = BTreeMap::new();
    for (grouping, class_name) in &names {
        for candidate in [class_name.clone(), test_class_name(class_name)] {
            if let Some(other) = owners.insert(candidate.clone(), grouping.as_str()) {
                return Err(GenerationError::InvalidConfiguration(format!(
                    "Groupings '{other}' and '{grouping}' both need the class '{candidate}'"
                )));
            }
        }
    }
    Ok(names)
}

fn text(schema: &JsonValue, key: &str) -> Option<String> {
    schema.get(key).and_then(JsonValue::as_str).map(kdoc_text)
}

/// Text safe inside a KDoc block; Kotlin block comments nest, so both
/// delimiters are neutralised
pub fn kdoc_text(raw: &str) -> String {
    raw.replace("*/", "*&#47;").replace("/*", "&#47;*")
}

fn kotlin_identifier(raw: &str, fallback: &str) -> String {
    let name = to_camel_case(raw);
    let name = if name.is_empty() {
        fallback.to_string()
    } else if name.starts_with(|c: char| c.is_ascii_digit()) {
        format!("_{name}")
    } else {
        name
    };
    sanitize_kotlin_identifier(&name)
}

/// `operationId` if present, else the method followed by the relative path
/// segments (`GET balance/{id}` becomes `getBalanceById`)
fn operation_name(operation: &Operation, relative: &str) -> String {
    if let Some(id) = operation.operation_id.as_deref() {
        let name = to_camel_case(id);
        if !name.is_empty() {
            return sanitize_kotlin_identifier(&name);
        }
    }

    let mut words = vec![operation.method.as_str().to_string()];
    for segment in relative.split('/').filter(|s| !s.is_empty()) {
        match segment
            .strip_prefix('{')
            .and_then(|s| s.strip_suffix('}'))
        {
            Some(param) => words.push(format!("by_{param}")),
            None => words.push(segment.to_string()),
        }
    }
    to_camel_case(&words.join("_"))
}

fn unique_name(name: String, used: &mut HashSet<String>) -> String {
    if used.insert(name.clone()) {
        return name;
    }
    let mut index = 2;
    loop {
        let candidate = format!("{name}{index}");
        if used.insert(candidate.clone()) {
            return candidate;
        }
        index += 1;
    }
}
