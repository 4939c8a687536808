//! Core resource analysis orchestration

use crate::{
    binding::bind_resources,
    composer::compose_attributes,
    grouper::{probe_resources, ProbeResult},
    media_type::resolve_media_type,
    naming::to_snake_case,
    output::classify,
    Result,
};
use rest_provider_generator_common::{
    ActionBinding, Attribute, BindingInfo, Config, Diagnostic, GeneratorError, OutputResource,
    Pseudonym, Resource, TfType,
};
use rest_provider_generator_parser::{OpenApiParser, OpenApiSpec};
use serde::Serialize;
use std::collections::BTreeMap;
use std::path::Path;
use tracing::debug;

/// Resource analyzer - main entry point
pub struct RestAnalyzer {
    spec: OpenApiSpec,
}

/// Configuration proposed from heuristic probing
#[derive(Debug, Clone)]
pub struct InitResult {
    pub config: Config,
    /// Warnings that need manual review
    pub diagnostics: Vec<Diagnostic>,
}

/// A configured resource ready for code generation
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResolvedResource {
    pub name: String,
    pub tf_type_name: String,
    pub tf_type: TfType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub media_type: Option<String>,
    pub bindings: BTreeMap<Pseudonym, ActionBinding>,
    pub attributes: Vec<Attribute>,
}

/// Every configured resource, resolved against the document
#[derive(Debug, Clone)]
pub struct Resolution {
    pub resources: Vec<ResolvedResource>,
    pub diagnostics: Vec<Diagnostic>,
}

impl RestAnalyzer {
    pub fn new(spec: OpenApiSpec) -> Self {
        Self { spec }
    }

    /// Load the OpenAPI document at `path`
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let parser = OpenApiParser::from_file(path)?;
        Ok(Self::new(parser.into_spec()))
    }

    pub fn spec(&self) -> &OpenApiSpec {
        &self.spec
    }

    /// Group every path of the document into resources
    pub fn probe(&self) -> ProbeResult {
        debug!("Probing {} paths", self.spec.paths.len());
        probe_resources(&self.spec)
    }

    /// Build resources from explicit bindings
    pub fn bind(&self, config: &Config) -> Result<BTreeMap<String, Resource>> {
        let bindings = config.as_bindings()?;
        Ok(bind_resources(&self.spec, &bindings)?)
    }

    /// Resolve a resource's media type, recording why when it cannot be found
    pub fn media_type(&self, resource: &Resource, diagnostics: &mut Vec<Diagnostic>) -> Option<String> {
        resolve_media_type(&self.spec, resource, diagnostics)
    }

    /// Resolve a resource's media type, failing when it cannot be found
    pub fn require_media_type(
        &self,
        resource: &Resource,
        diagnostics: &mut Vec<Diagnostic>,
    ) -> Result<String> {
        let mut found = Vec::new();
        let media_type = self.media_type(resource, &mut found);
        // The unresolved case surfaces as the error itself.
        diagnostics.extend(
            found
                .into_iter()
                .filter(|d| !matches!(d, Diagnostic::MediaTypeUnresolved { .. })),
        );

        media_type.ok_or_else(|| {
            GeneratorError::MediaTypeUnresolved {
                resource: resource.name.clone(),
            }
            .into()
        })
    }

    /// Composite attributes of a resource
    pub fn compose(
        &self,
        resource: &Resource,
        media_type: Option<&str>,
        diagnostics: &mut Vec<Diagnostic>,
    ) -> Vec<Attribute> {
        compose_attributes(&self.spec, resource, media_type, diagnostics)
    }

    /// Propose a configuration for every usable probed resource
    ///
    /// Resources without a resolvable media type, or without enough actions
    /// to become a resource or data source, are left out.
    pub fn init_config(&self, spec_file: impl Into<String>) -> InitResult {
        let ProbeResult {
            resources,
            mut diagnostics,
        } = self.probe();

        let mut config = Config {
            spec_file: spec_file.into(),
            ..Default::default()
        };

        for (key, resource) in &resources {
            let media_type = match self.require_media_type(resource, &mut diagnostics) {
                Ok(media_type) => media_type,
                Err(e) => {
                    debug!("Skipping {}: {}", key, e);
                    diagnostics.push(Diagnostic::MediaTypeUnresolved {
                        resource: key.clone(),
                    });
                    continue;
                }
            };

            let Some(tf_type) = classify(resource) else {
                debug!("Skipping {}: neither CRUD-capable nor readable", key);
                continue;
            };

            config.output.insert(
                key.clone(),
                OutputResource {
                    tf_type_name: to_snake_case(key),
                    tf_type,
                    media_type,
                    binding: binding_info(resource, tf_type),
                },
            );
        }

        InitResult {
            config,
            diagnostics,
        }
    }

    /// Bind and compose every configured resource
    ///
    /// Any invalid or unresolvable binding aborts the whole resolution.
    pub fn resolve(&self, config: &Config) -> Result<Resolution> {
        let bound = self.bind(config)?;
        let mut diagnostics = Vec::new();
        let mut resolved = Vec::with_capacity(bound.len());

        for (key, resource) in &bound {
            let Some(output) = config.output.get(key) else {
                continue;
            };

            let media_type = if output.media_type.is_empty() {
                self.media_type(resource, &mut diagnostics)
            } else {
                Some(output.media_type.clone())
            };

            debug!("Composing attributes of {} ({:?})", key, media_type);
            let attributes = self.compose(resource, media_type.as_deref(), &mut diagnostics);

            resolved.push(ResolvedResource {
                name: key.clone(),
                tf_type_name: output.tf_type_name.clone(),
                tf_type: output.tf_type,
                media_type,
                bindings: resource
                    .actions
                    .iter()
                    .map(|(&pseudonym, action)| (pseudonym, ActionBinding::from(action)))
                    .collect(),
                attributes,
            });
        }

        Ok(Resolution {
            resources: resolved,
            diagnostics,
        })
    }
}

fn binding_info(resource: &Resource, tf_type: TfType) -> BindingInfo {
    let pseudonyms: &[Pseudonym] = match tf_type {
        TfType::Resource => &[
            Pseudonym::Create,
            Pseudonym::Show,
            Pseudonym::Update,
            Pseudonym::Delete,
            Pseudonym::Index,
        ],
        TfType::DataSource if resource.can_read_identity() => &[Pseudonym::Show],
        TfType::DataSource => &[Pseudonym::Index],
    };

    let mut info = BindingInfo::default();
    for &pseudonym in pseudonyms {
        if let Some(action) = resource.action(pseudonym) {
            info.set(pseudonym, ActionBinding::from(action));
        }
    }
    info
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::AnalyzerError;
    use rest_provider_generator_common::{Action, HttpMethod};
    use rest_provider_generator_parser::OpenApiParser;

    const WIDGETS: &str = r#"
openapi: 3.0.0
info: { title: Widgets, version: "1" }
paths:
  /widgets:
    get:
      responses:
        "200":
          description: OK
          content:
            application/json:
              schema: { type: array, items: { type: object } }
    post:
      requestBody:
        content:
          application/json:
            schema:
              properties:
                label: { type: string }
      responses:
        "201":
          description: Created
          content:
            application/json: { schema: { type: object } }
  /widgets/{widgetId}:
    parameters:
      - { name: widgetId, in: path, required: true, schema: { type: string } }
    get:
      responses:
        "200":
          description: OK
          content:
            application/json:
              schema:
                properties:
                  label: { type: string }
    put:
      responses:
        "200": { description: OK }
    delete:
      responses:
        "204": { description: Deleted }
  /health:
    head:
      responses:
        "200": { description: OK }
"#;

    fn analyzer() -> RestAnalyzer {
        RestAnalyzer::new(OpenApiParser::from_yaml(WIDGETS).unwrap().into_spec())
    }

    #[test]
    fn test_require_media_type_error() {
        let analyzer = analyzer();
        let mut diagnostics = Vec::new();
        let health = Resource::new("Health");

        match analyzer.require_media_type(&health, &mut diagnostics) {
            Err(AnalyzerError::Generator(GeneratorError::MediaTypeUnresolved { resource })) => {
                assert_eq!(resource, "Health")
            }
            other => panic!("expected MediaTypeUnresolved, got {:?}", other),
        }
        assert!(diagnostics.is_empty());
    }

    #[test]
    fn test_init_config_skips_unusable_resources() {
        let result = analyzer().init_config("widgets.yaml");

        assert_eq!(result.config.spec_file, "widgets.yaml");
        assert_eq!(result.config.output.len(), 1);

        let widgets = &result.config.output["Widgets"];
        assert_eq!(widgets.tf_type, TfType::Resource);
        assert_eq!(widgets.tf_type_name, "widgets");
        assert_eq!(widgets.media_type, "application/json");
        assert_eq!(
            widgets.binding.read,
            Some(ActionBinding::new("/widgets/{widgetId}", "GET"))
        );
        assert_eq!(
            widgets.binding.index,
            Some(ActionBinding::new("/widgets", "GET"))
        );

        assert_eq!(
            result.diagnostics,
            vec![Diagnostic::MediaTypeUnresolved {
                resource: "Health".to_string()
            }]
        );
    }

    #[test]
    fn test_data_source_prefers_show_binding() {
        let mut resource = Resource::new("Boards");
        for (pseudonym, path) in [(Pseudonym::Index, "/boards"), (Pseudonym::Show, "/boards/{id}")] {
            resource.actions.insert(
                pseudonym,
                Action {
                    pseudonym,
                    method: HttpMethod::Get,
                    path: path.to_string(),
                    operation_id: None,
                },
            );
        }

        let info = binding_info(&resource, TfType::DataSource);
        assert!(info.read.is_some());
        assert!(info.index.is_none());
    }

    #[test]
    fn test_resolve_uses_configured_bindings() {
        let analyzer = analyzer();
        let config = analyzer.init_config("widgets.yaml").config;

        let resolution = analyzer.resolve(&config).unwrap();
        assert_eq!(resolution.resources.len(), 1);

        let widgets = &resolution.resources[0];
        assert_eq!(widgets.bindings.len(), 5);
        assert_eq!(widgets.bindings[&Pseudonym::Create].method, "POST");
        assert_eq!(widgets.attributes[0].name, "widgetId");
        assert_eq!(widgets.attributes.len(), 2);
        assert!(!widgets.attributes.iter().any(|a| a.read_only));
    }
}
