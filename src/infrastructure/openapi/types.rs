//! Parsed OpenAPI document model

use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use std::collections::BTreeMap;
use std::fmt;

/// HTTP methods supported by OpenAPI
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HttpMethod {
    Get,
    Put,
    Post,
    Delete,
    Options,
    Head,
    Patch,
}

impl HttpMethod {
    /// All methods in the order an OpenAPI path item lists them
    pub fn all() -> &'static [HttpMethod] {
        &[
            HttpMethod::Get,
            HttpMethod::Put,
            HttpMethod::Post,
            HttpMethod::Delete,
            HttpMethod::Options,
            HttpMethod::Head,
            HttpMethod::Patch,
        ]
    }

    /// Lowercase key used in the document
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "get",
            HttpMethod::Put => "put",
            HttpMethod::Post => "post",
            HttpMethod::Delete => "delete",
            HttpMethod::Options => "options",
            HttpMethod::Head => "head",
            HttpMethod::Patch => "patch",
        }
    }

    /// JAX-RS annotation name
    pub fn annotation(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Put => "PUT",
            HttpMethod::Post => "POST",
            HttpMethod::Delete => "DELETE",
            HttpMethod::Options => "OPTIONS",
            HttpMethod::Head => "HEAD",
            HttpMethod::Patch => "PATCH",
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// API information
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiInfo {
    pub title: String,
    pub version: String,
    pub description: Option<String>,
}

/// Server definition
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Server {
    pub url: String,
    pub description: Option<String>,
}

/// Parameter location
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParameterLocation {
    Path,
    Query,
    Header,
    Cookie,
}

/// Operation parameter
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Parameter {
    pub name: String,
    pub location: ParameterLocation,
    pub required: bool,
    pub schema: Option<JsonValue>,
    pub description: Option<String>,
}

/// OpenAPI operation representation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Operation {
    pub method: HttpMethod,
    pub operation_id: Option<String>,
    pub summary: Option<String>,
    pub description: Option<String>,
    pub tags: Vec<String>,
    pub parameters: Vec<Parameter>,
    /// Schema of the request body, if any
    pub request_body: Option<JsonValue>,
    pub request_body_required: bool,
    /// Schema of the first successful response, if it has content
    pub response: Option<JsonValue>,
    pub deprecated: bool,
}

/// Operations defined under one URL path
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PathItem {
    pub operations: Vec<Operation>,
}

/// A parsed OpenAPI v3 document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiSpecification {
    pub version: String,
    pub info: ApiInfo,
    pub servers: Vec<Server>,
    /// URL path -> operations
    pub paths: BTreeMap<String, PathItem>,
    /// Schema name -> raw schema definition
    pub schemas: BTreeMap<String, JsonValue>,
}

impl ApiSpecification {
    /// A document with no paths and no schemas
    pub fn empty(version: &str, title: &str, api_version: &str) -> Self {
        Self {
            version: version.to_string(),
            info: ApiInfo {
                title: title.to_string(),
                version: api_version.to_string(),
                description: None,
            },
            servers: Vec::new(),
            paths: BTreeMap::new(),
            schemas: BTreeMap::new(),
        }
    }

    /// Every operation together with its path
    pub fn operations(&self) -> impl Iterator<Item = (&str, &Operation)> {
        self.paths.iter().flat_map(|(path, item)| {
            item.operations
                .iter()
                .map(move |operation| (path.as_str(), operation))
        })
    }
}
