//! OpenAPI document parser
//!
//! Validates the raw document against the OpenAPI v3 model and extracts what
//! the client generator consumes:
//! - Paths with their operations, merging path-level parameters
//! - Parameter, request body and response `$ref` resolution
//! - Component schemas, kept raw so schema `$ref`s stay visible to type mapping

use serde_json::{Map as JsonMap, Value as JsonValue};
use std::collections::BTreeMap;

use crate::generation::{
    ApiInfo, ApiSpecification, GenerationError, HttpMethod, Operation, Parameter,
    ParameterLocation, PathItem, Server,
};

/// Media types tried, in order, when picking a body or response schema
const PREFERRED_MEDIA_TYPES: &[&str] = &["application/json", "application/json;charset=UTF-8"];

/// Serialization format of a raw document
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentFormat {
    Json,
    Yaml,
    Unknown,
}

impl DocumentFormat {
    /// Guess from a file name or URL path
    pub fn from_source(source: &str) -> Self {
        let lower = source.to_ascii_lowercase();
        if lower.ends_with(".json") {
            DocumentFormat::Json
        } else if lower.ends_with(".yaml") || lower.ends_with(".yml") {
            DocumentFormat::Yaml
        } else {
            DocumentFormat::Unknown
        }
    }

    /// Guess from an HTTP content type, falling back to the source name
    pub fn from_content_type(content_type: &str, source: &str) -> Self {
        if content_type.contains("json") {
            DocumentFormat::Json
        } else if content_type.contains("yaml") {
            DocumentFormat::Yaml
        } else {
            Self::from_source(source)
        }
    }
}

/// OpenAPI specification parser
#[derive(Debug, Clone)]
pub struct OpenApiParser {
    /// The raw JSON value of the OpenAPI spec
    pub json: JsonValue,
}

impl OpenApiParser {
    /// Create a new parser from JSON content
    pub fn new(json: JsonValue) -> Self {
        Self { json }
    }

    /// Decode raw document text; the hint picks the format, JSON then YAML otherwise
    pub fn from_text(content: &str, hint: DocumentFormat) -> Result<Self, GenerationError> {
        let json = match hint {
            DocumentFormat::Json => serde_json::from_str(content)
                .map_err(|e| GenerationError::spec_load(format!("Failed to parse JSON: {e}")))?,
            DocumentFormat::Yaml => serde_yaml::from_str(content)
                .map_err(|e| GenerationError::spec_load(format!("Failed to parse YAML: {e}")))?,
            DocumentFormat::Unknown => serde_json::from_str(content)
                .or_else(|_| serde_yaml::from_str(content))
                .map_err(|e| {
                    GenerationError::spec_load(format!("Failed to parse OpenAPI spec: {e}"))
                })?,
        };
        Ok(Self::new(json))
    }

    /// Parse the complete document into an `ApiSpecification`
    pub fn parse(&self) -> Result<ApiSpecification, GenerationError> {
        let version = self
            .json
            .get("openapi")
            .and_then(JsonValue::as_str)
            .ok_or_else(|| GenerationError::spec_load("Missing 'openapi' version field"))?
            .to_string();
        if !version.starts_with("3.") {
            return Err(GenerationError::spec_load(format!(
                "Unsupported OpenAPI version {version}, expected 3.x"
            )));
        }

        serde_json::from_value::<openapiv3::OpenAPI>(self.json.clone())
            .map_err(|e| GenerationError::spec_load(format!("Invalid OpenAPI document: {e}")))?;

        let info = ApiInfo {
            title: self.str_at("/info/title").unwrap_or_default().to_string(),
            version: self.str_at("/info/version").unwrap_or_default().to_string(),
            description: self.str_at("/info/description").map(String::from),
        };

        let servers = self
            .json
            .get("servers")
            .and_then(JsonValue::as_array)
            .map(|arr| {
                arr.iter()
                    .filter_map(|s| {
                        Some(Server {
                            url: s.get("url").and_then(JsonValue::as_str)?.to_string(),
                            description: s
                                .get("description")
                                .and_then(JsonValue::as_str)
                                .map(String::from),
                        })
                    })
                    .collect()
            })
            .unwrap_or_default();

        let paths = self.parse_paths()?;
        let schemas: BTreeMap<String, JsonValue> = self
            .json
            .pointer("/components/schemas")
            .and_then(JsonValue::as_object)
            .map(|obj| obj.iter().map(|(k, v)| (k.clone(), v.clone())).collect())
            .unwrap_or_default();

        tracing::debug!(
            paths = paths.len(),
            schemas = schemas.len(),
            "Parsed OpenAPI document"
        );

        Ok(ApiSpecification {
            version,
            info,
            servers,
            paths,
            schemas,
        })
    }

    fn str_at(&self, pointer: &str) -> Option<&str> {
        self.json.pointer(pointer)?.as_str()
    }

    fn parse_paths(&self) -> Result<BTreeMap<String, PathItem>, GenerationError> {
        let paths = self
            .json
            .get("paths")
            .and_then(JsonValue::as_object)
            .ok_or_else(|| GenerationError::spec_load("Missing 'paths' object"))?;

        paths
            .iter()
            .map(|(path, path_item)| {
                let path_item = self.follow_ref(path_item)?;
                let operations = HttpMethod::all()
                    .iter()
                    .filter_map(|method| {
                        path_item
                            .get(method.as_str())
                            .and_then(JsonValue::as_object)
                            .map(|method_item| (*method, method_item))
                    })
                    .map(|(method, method_item)| {
                        self.build_operation(path, method, &path_item, method_item)
                    })
                    .collect::<Result<Vec<_>, _>>()?;
                Ok((path.clone(), PathItem { operations }))
            })
            .collect()
    }

    fn build_operation(
        &self,
        path: &str,
        method: HttpMethod,
        path_item: &JsonValue,
        method_item: &JsonMap<String, JsonValue>,
    ) -> Result<Operation, GenerationError> {
        let text = |key: &str| {
            method_item
                .get(key)
                .and_then(JsonValue::as_str)
                .map(String::from)
        };

        // Method-level parameters override path-level ones with the same name and location
        let mut parameters = self.extract_parameters(path_item)?;
        for parameter in self.extract_parameters(&JsonValue::Object(method_item.clone()))? {
            parameters
                .retain(|p| !(p.name == parameter.name && p.location == parameter.location));
            parameters.push(parameter);
        }

        let (request_body, request_body_required) = match method_item.get("requestBody") {
            Some(body) => {
                let body = self.follow_ref(body)?;
                let required = body
                    .get("required")
                    .and_then(JsonValue::as_bool)
                    .unwrap_or(false);
                (self.content_schema(&body), required)
            }
            None => (None, false),
        };

        let response = self.success_response_schema(path, method_item)?;

        let tags = method_item
            .get("tags")
            .and_then(JsonValue::as_array)
            .map(|arr| {
                arr.iter()
                    .filter_map(JsonValue::as_str)
                    .map(String::from)
                    .collect()
            })
            .unwrap_or_default();

        Ok(Operation {
            method,
            operation_id: text("operationId"),
            summary: text("summary"),
            description: text("description"),
            tags,
            parameters,
            request_body,
            request_body_required,
            response,
            deprecated: method_item
                .get("deprecated")
                .and_then(JsonValue::as_bool)
                .unwrap_or(false),
        })
    }

    /// Extracts parameters, resolving any $ref references
    fn extract_parameters(&self, item: &JsonValue) -> Result<Vec<Parameter>, GenerationError> {
        item.get("parameters")
            .and_then(JsonValue::as_array)
            .map(|arr| {
                arr.iter()
                    .map(|param| self.parse_parameter(&self.follow_ref(param)?))
                    .collect()
            })
            .unwrap_or_else(|| Ok(Vec::new()))
    }

    fn parse_parameter(&self, param: &JsonValue) -> Result<Parameter, GenerationError> {
        let name = param
            .get("name")
            .and_then(JsonValue::as_str)
            .ok_or_else(|| GenerationError::spec_load("Parameter missing name"))?
            .to_string();

        let location = match param.get("in").and_then(JsonValue::as_str) {
            Some("path") => ParameterLocation::Path,
            Some("query") => ParameterLocation::Query,
            Some("header") => ParameterLocation::Header,
            Some("cookie") => ParameterLocation::Cookie,
            other => {
                return Err(GenerationError::spec_load(format!(
                    "Invalid location {other:?} for parameter '{name}'"
                )));
            }
        };

        Ok(Parameter {
            required: location == ParameterLocation::Path
                || param
                    .get("required")
                    .and_then(JsonValue::as_bool)
                    .unwrap_or(false),
            schema: param.get("schema").cloned(),
            description: param
                .get("description")
                .and_then(JsonValue::as_str)
                .map(String::from),
            name,
            location,
        })
    }

    /// Schema of the first 2xx response that declares content
    fn success_response_schema(
        &self,
        path: &str,
        method_item: &JsonMap<String, JsonValue>,
    ) -> Result<Option<JsonValue>, GenerationError> {
        let Some(responses) = method_item.get("responses").and_then(JsonValue::as_object) else {
            tracing::debug!(path = %path, "Operation declares no responses");
            return Ok(None);
        };

        let mut codes: Vec<&String> = responses.keys().filter(|k| k.starts_with('2')).collect();
        codes.sort();
        for code in codes {
            let response = self.follow_ref(&responses[code.as_str()])?;
            if let Some(schema) = self.content_schema(&response) {
                return Ok(Some(schema));
            }
        }
        Ok(None)
    }

    /// Schema under `content`, preferring JSON media types
    fn content_schema(&self, item: &JsonValue) -> Option<JsonValue> {
        let content = item.get("content")?.as_object()?;
        PREFERRED_MEDIA_TYPES
            .iter()
            .find_map(|media| content.get(*media))
            .or_else(|| content.values().next())
            .and_then(|media| media.get("schema"))
            .cloned()
    }

    /// Resolve a `$ref` object to its local target; other values are returned as is
    fn follow_ref(&self, value: &JsonValue) -> Result<JsonValue, GenerationError> {
        match value.get("$ref").and_then(JsonValue::as_str) {
            Some(reference) => self.resolve_ref(reference).cloned(),
            None => Ok(value.clone()),
        }
    }

    fn resolve_ref(&self, reference: &str) -> Result<&JsonValue, GenerationError> {
        let pointer = reference.strip_prefix('#').ok_or_else(|| {
            GenerationError::spec_load(format!("Only local references are supported: {reference}"))
        })?;
        self.json
            .pointer(pointer)
            .ok_or_else(|| GenerationError::spec_load(format!("Unresolved reference: {reference}")))
    }
}
