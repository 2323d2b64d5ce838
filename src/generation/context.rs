//! Render context handed to the template engine

use serde_json::{Map as JsonMap, Value as JsonValue};
use std::collections::HashMap;

/// Template variable carrying the package of the file being written
pub const PACKAGE: &str = "package";
/// Template variable used by model imports
pub const MODEL_PACKAGE: &str = "model_package";
/// Template variable used for the client's root package
pub const ROOT_PACKAGE: &str = "root_package";

/// Render context used for template rendering
#[derive(Debug, Clone)]
pub struct RenderContext {
    pub data: JsonValue,
    pub variables: HashMap<String, JsonValue>,
}

impl RenderContext {
    /// Create a new render context
    pub fn new() -> Self {
        Self {
            data: JsonValue::Object(JsonMap::new()),
            variables: HashMap::new(),
        }
    }

    /// Context for a single output file.
    ///
    /// The effective package goes into `package`, `model_package` and
    /// `root_package` alike; generated imports resolve against these.
    pub fn for_file(package: &str) -> Self {
        let mut context = Self::new();
        context.set_package(package);
        context
    }

    /// Add a variable to the render context
    pub fn add_variable(&mut self, key: &str, value: JsonValue) {
        self.variables.insert(key.to_string(), value.clone());

        if let Some(obj) = self.data.as_object_mut() {
            obj.insert(key.to_string(), value);
        }
    }

    /// Check if a variable exists
    pub fn has_variable(&self, key: &str) -> bool {
        self.variables.contains_key(key)
    }

    pub fn get(&self, key: &str) -> Option<&JsonValue> {
        self.variables.get(key)
    }

    pub fn set_package(&mut self, package: &str) {
        for key in [PACKAGE, MODEL_PACKAGE, ROOT_PACKAGE] {
            self.add_variable(key, JsonValue::String(package.to_string()));
        }
    }

    pub fn to_tera_context(&self) -> tera::Context {
        let mut context = tera::Context::new();
        for (key, value) in &self.variables {
            context.insert(key.as_str(), value);
        }
        context
    }
}

impl Default for RenderContext {
    fn default() -> Self {
        Self::new()
    }
}
