//! OpenAPI spec file parser

use super::types::OpenApiSpec;
use rest_provider_generator_common::{GeneratorError, Result};
use std::fs;
use std::path::Path;

/// Serialization format of an OpenAPI document
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentFormat {
    Json,
    Yaml,
}

impl DocumentFormat {
    /// Guess the format from the file extension, then from the content
    pub fn detect(path: &Path, content: &str) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some("json") => DocumentFormat::Json,
            Some("yaml") | Some("yml") => DocumentFormat::Yaml,
            _ if content.trim_start().starts_with('{') => DocumentFormat::Json,
            _ => DocumentFormat::Yaml,
        }
    }
}

/// OpenAPI specification parser
///
/// Reads OpenAPI 3.x documents from JSON or YAML. `$ref` indirection must
/// already be resolved; the parser does not follow references.
pub struct OpenApiParser {
    spec: OpenApiSpec,
}

impl OpenApiParser {
    /// Load OpenAPI spec from file path
    ///
    /// # Example
    /// ```rust,ignore
    /// let parser = OpenApiParser::from_file("openapi.yaml")?;
    /// let spec = parser.spec();
    /// ```
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| {
            GeneratorError::SpecLoad(format!(
                "Failed to read OpenAPI file {}: {}",
                path.display(),
                e
            ))
        })?;

        match DocumentFormat::detect(path, &content) {
            DocumentFormat::Json => Self::from_json(&content),
            DocumentFormat::Yaml => Self::from_yaml(&content),
        }
    }

    /// Parse OpenAPI spec from JSON string
    pub fn from_json(json: &str) -> Result<Self> {
        let spec: OpenApiSpec = serde_json::from_str(json)
            .map_err(|e| GeneratorError::SpecLoad(format!("Failed to parse OpenAPI JSON: {}", e)))?;
        Self::from_spec(spec)
    }

    /// Parse OpenAPI spec from YAML string
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        let spec: OpenApiSpec = serde_yaml::from_str(yaml)
            .map_err(|e| GeneratorError::SpecLoad(format!("Failed to parse OpenAPI YAML: {}", e)))?;
        Self::from_spec(spec)
    }

    /// Wrap an already deserialized document
    pub fn from_spec(spec: OpenApiSpec) -> Result<Self> {
        if !spec.openapi.starts_with("3.") {
            return Err(GeneratorError::SpecLoad(format!(
                "Unsupported OpenAPI version \"{}\": only 3.x documents are supported",
                spec.openapi
            )));
        }
        Ok(Self { spec })
    }

    /// Get reference to the underlying OpenAPI spec
    pub fn spec(&self) -> &OpenApiSpec {
        &self.spec
    }

    pub fn into_spec(self) -> OpenApiSpec {
        self.spec
    }
}
