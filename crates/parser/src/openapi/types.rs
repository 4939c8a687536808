//! OpenAPI 3.0 type definitions
//!
//! Simplified representation focusing on resource probing. Maps are ordered
//! so that every walk over paths, properties, and content types is
//! deterministic.

use rest_provider_generator_common::HttpMethod;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// OpenAPI document root
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OpenApiSpec {
    /// OpenAPI version (e.g., "3.0.0")
    pub openapi: String,

    /// API metadata
    pub info: Info,

    /// API paths (endpoints), sorted by path template
    #[serde(default)]
    pub paths: BTreeMap<String, PathItem>,
}

/// API information
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Info {
    /// API title
    pub title: String,

    /// API version
    pub version: String,

    /// API description
    #[serde(default)]
    pub description: Option<String>,
}

/// Path item (operations for a path)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PathItem {
    #[serde(default)]
    pub get: Option<Operation>,

    #[serde(default)]
    pub put: Option<Operation>,

    #[serde(default)]
    pub post: Option<Operation>,

    #[serde(default)]
    pub delete: Option<Operation>,

    #[serde(default)]
    pub options: Option<Operation>,

    #[serde(default)]
    pub head: Option<Operation>,

    #[serde(default)]
    pub patch: Option<Operation>,

    #[serde(default)]
    pub trace: Option<Operation>,

    /// Parameters shared by every operation on this path
    #[serde(default)]
    pub parameters: Vec<Parameter>,
}

/// HTTP operation
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Operation {
    /// Operation ID (unique identifier)
    #[serde(rename = "operationId")]
    #[serde(default)]
    pub operation_id: Option<String>,

    #[serde(default)]
    pub parameters: Vec<Parameter>,

    #[serde(rename = "requestBody")]
    #[serde(default)]
    pub request_body: Option<RequestBody>,

    /// Responses keyed by status code ("200", "default", ...)
    #[serde(default)]
    pub responses: BTreeMap<String, Response>,
}

/// Parameter definition
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Parameter {
    pub name: String,

    /// Location: query, header, path, cookie
    #[serde(rename = "in")]
    pub location: String,

    #[serde(default)]
    pub description: Option<String>,

    #[serde(default)]
    pub required: bool,

    #[serde(default)]
    pub schema: Option<Schema>,
}

/// Request body
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RequestBody {
    #[serde(default)]
    pub description: Option<String>,

    /// Content keyed by media type
    #[serde(default)]
    pub content: BTreeMap<String, MediaType>,

    #[serde(default)]
    pub required: bool,
}

/// Response
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Response {
    #[serde(default)]
    pub description: String,

    /// Content keyed by media type
    #[serde(default)]
    pub content: BTreeMap<String, MediaType>,
}

/// Media type
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MediaType {
    #[serde(default)]
    pub schema: Option<Schema>,
}

/// Schema definition
///
/// `$ref` indirection is expected to be resolved before the document reaches
/// the analyzer; a leftover reference is kept in `ref_path` only so it can be
/// reported.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Schema {
    /// Type: string, number, integer, boolean, array, object
    #[serde(rename = "type")]
    #[serde(default)]
    pub schema_type: Option<String>,

    /// Format (e.g., int32, int64, date-time, byte, password)
    #[serde(default)]
    pub format: Option<String>,

    #[serde(default)]
    pub description: Option<String>,

    /// Properties (for object type)
    #[serde(default)]
    pub properties: BTreeMap<String, Schema>,

    /// Required property names
    #[serde(default)]
    pub required: Vec<String>,

    /// Items schema (for array type)
    #[serde(default)]
    pub items: Option<Box<Schema>>,

    #[serde(rename = "readOnly")]
    #[serde(default)]
    pub read_only: bool,

    /// Unresolved reference
    #[serde(rename = "$ref")]
    #[serde(default)]
    pub ref_path: Option<String>,
}

impl OpenApiSpec {
    /// Path templates in lexicographic order
    pub fn path_templates(&self) -> Vec<&str> {
        self.paths.keys().map(String::as_str).collect()
    }

    /// Look up an operation by exact path template and method
    pub fn operation(&self, path: &str, method: HttpMethod) -> Option<&Operation> {
        self.paths.get(path).and_then(|item| item.operation(method))
    }
}

impl PathItem {
    /// Operation defined for a method, if any
    pub fn operation(&self, method: HttpMethod) -> Option<&Operation> {
        match method {
            HttpMethod::Get => self.get.as_ref(),
            HttpMethod::Put => self.put.as_ref(),
            HttpMethod::Post => self.post.as_ref(),
            HttpMethod::Delete => self.delete.as_ref(),
            HttpMethod::Options => self.options.as_ref(),
            HttpMethod::Head => self.head.as_ref(),
            HttpMethod::Patch => self.patch.as_ref(),
            HttpMethod::Trace => self.trace.as_ref(),
        }
    }

    /// Methods that have an operation on this path
    pub fn methods(&self) -> Vec<HttpMethod> {
        [
            HttpMethod::Get,
            HttpMethod::Put,
            HttpMethod::Post,
            HttpMethod::Delete,
            HttpMethod::Options,
            HttpMethod::Head,
            HttpMethod::Patch,
            HttpMethod::Trace,
        ]
        .into_iter()
        .filter(|m| self.operation(*m).is_some())
        .collect()
    }

    /// Effective `in: path` parameters of an operation on this path
    ///
    /// Operation-level parameters override path-level ones with the same name.
    pub fn path_parameters<'a>(&'a self, operation: &'a Operation) -> Vec<&'a Parameter> {
        let mut result: Vec<&Parameter> = self
            .parameters
            .iter()
            .filter(|p| p.is_path())
            .filter(|p| {
                !operation
                    .parameters
                    .iter()
                    .any(|o| o.is_path() && o.name == p.name)
            })
            .collect();
        result.extend(operation.parameters.iter().filter(|p| p.is_path()));
        result
    }
}

impl Operation {
    /// Response for a numeric status code
    pub fn response(&self, status: u16) -> Option<&Response> {
        self.responses
            .iter()
            .find(|(code, _)| code.trim().parse::<u16>().ok() == Some(status))
            .map(|(_, response)| response)
    }
}

impl Parameter {
    pub fn is_path(&self) -> bool {
        self.location == "path"
    }
}

impl Schema {
    /// Declared `type`, or one inferred from the schema's shape when absent
    pub fn inferred_type(&self) -> &str {
        match self.schema_type.as_deref() {
            Some(declared) => declared,
            None if !self.properties.is_empty() => "object",
            None if self.items.is_some() => "array",
            None => "string",
        }
    }

    /// Whether the property name is listed in `required`
    pub fn requires(&self, property: &str) -> bool {
        self.required.iter().any(|r| r == property)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn path_param(name: &str, schema_type: &str) -> Parameter {
        Parameter {
            name: name.to_string(),
            location: "path".to_string(),
            description: None,
            required: true,
            schema: Some(Schema {
                schema_type: Some(schema_type.to_string()),
                ..Default::default()
            }),
        }
    }

    #[test]
    fn test_operation_lookup_by_method() {
        let item = PathItem {
            get: Some(Operation::default()),
            patch: Some(Operation::default()),
            ..Default::default()
        };

        assert!(item.operation(HttpMethod::Get).is_some());
        assert!(item.operation(HttpMethod::Put).is_none());
        assert_eq!(item.methods(), vec![HttpMethod::Get, HttpMethod::Patch]);
    }

    #[test]
    fn test_operation_parameters_override_path_level() {
        let operation = Operation {
            parameters: vec![path_param("id", "integer")],
            ..Default::default()
        };
        let item = PathItem {
            get: Some(operation.clone()),
            parameters: vec![path_param("id", "string"), path_param("org", "string")],
            ..Default::default()
        };

        let params = item.path_parameters(&operation);
        assert_eq!(params.len(), 2);
        assert_eq!(params[0].name, "org");
        assert_eq!(params[1].name, "id");
        assert_eq!(
            params[1].schema.as_ref().unwrap().schema_type.as_deref(),
            Some("integer")
        );
    }

    #[test]
    fn test_response_by_status() {
        let mut operation = Operation::default();
        operation
            .responses
            .insert("201".to_string(), Response::default());
        operation
            .responses
            .insert("default".to_string(), Response::default());

        assert!(operation.response(201).is_some());
        assert!(operation.response(200).is_none());
    }

    #[test]
    fn test_inferred_type() {
        let mut schema = Schema::default();
        assert_eq!(schema.inferred_type(), "string");

        schema.items = Some(Box::default());
        assert_eq!(schema.inferred_type(), "array");

        schema.properties.insert("id".to_string(), Schema::default());
        assert_eq!(schema.inferred_type(), "object");

        schema.schema_type = Some("integer".to_string());
        assert_eq!(schema.inferred_type(), "integer");
    }
}
