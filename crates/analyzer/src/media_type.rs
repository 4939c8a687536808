//! Content media type resolution

use rest_provider_generator_common::{Diagnostic, Pseudonym, Resource};
use rest_provider_generator_parser::openapi::{OpenApiSpec, Operation};
use tracing::debug;

/// Media types preferred over any other content type in a response
pub const WELL_KNOWN_MEDIA_TYPES: &[&str] = &["application/json"];

/// Actions consulted when resolving a resource's media type, in priority order
pub const RESOLUTION_ORDER: [Pseudonym; 4] = [
    Pseudonym::Show,
    Pseudonym::Update,
    Pseudonym::Create,
    Pseudonym::Index,
];

/// Media type of an operation's first successful response that declares content
pub fn probe_media_type(operation: &Operation, success_codes: &[u16]) -> Option<String> {
    for &code in success_codes {
        let Some(response) = operation.response(code) else {
            continue;
        };
        if response.content.is_empty() {
            continue;
        }

        if let Some(known) = response
            .content
            .keys()
            .find(|k| WELL_KNOWN_MEDIA_TYPES.contains(&k.as_str()))
        {
            return Some(known.clone());
        }
        return response.content.keys().next().cloned();
    }
    None
}

/// Pick the single content media type used by a resource
///
/// The first action in [`RESOLUTION_ORDER`] that yields a media type decides.
/// Later actions that disagree are reported but do not change the result.
/// Returns `None` (and records a diagnostic) when no action declares content.
pub fn resolve_media_type(
    spec: &OpenApiSpec,
    resource: &Resource,
    diagnostics: &mut Vec<Diagnostic>,
) -> Option<String> {
    let mut chosen: Option<String> = None;

    for pseudonym in RESOLUTION_ORDER {
        let Some(action) = resource.action(pseudonym) else {
            continue;
        };
        let Some(operation) = spec.operation(&action.path, action.method) else {
            debug!(
                "{}: {} {} is not defined in the document",
                resource.name, action.method, action.path
            );
            continue;
        };
        let Some(found) = probe_media_type(operation, pseudonym.success_codes()) else {
            debug!(
                "{}: {} action declares no response content",
                resource.name, pseudonym
            );
            continue;
        };

        match &chosen {
            None => chosen = Some(found),
            Some(existing) if *existing != found => {
                diagnostics.push(Diagnostic::MediaTypeDisagreement {
                    resource: resource.name.clone(),
                    pseudonym,
                    chosen: existing.clone(),
                    found,
                });
            }
            Some(_) => {}
        }
    }

    if chosen.is_none() {
        diagnostics.push(Diagnostic::MediaTypeUnresolved {
            resource: resource.name.clone(),
        });
    }
    chosen
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grouper::probe_resources;
    use rest_provider_generator_parser::OpenApiParser;

    fn resolve(yaml: &str, key: &str) -> (Option<String>, Vec<Diagnostic>) {
        let spec = OpenApiParser::from_yaml(yaml).unwrap().into_spec();
        let probed = probe_resources(&spec);
        let mut diagnostics = Vec::new();
        let media_type = resolve_media_type(&spec, &probed.resources[key], &mut diagnostics);
        (media_type, diagnostics)
    }

    #[test]
    fn test_prefers_well_known_type() {
        let (media_type, diagnostics) = resolve(
            r#"
openapi: 3.0.0
info: { title: Boards, version: "1" }
paths:
  /boards/{id}:
    get:
      responses:
        "200":
          description: OK
          content:
            application/hal+json: { schema: { type: object } }
            application/json: { schema: { type: object } }
"#,
            "Boards",
        );

        assert_eq!(media_type.as_deref(), Some("application/json"));
        assert!(diagnostics.is_empty());
    }

    #[test]
    fn test_falls_back_to_first_content_type() {
        let (media_type, _) = resolve(
            r#"
openapi: 3.0.0
info: { title: Boards, version: "1" }
paths:
  /boards/{id}:
    get:
      responses:
        "200":
          description: OK
          content:
            application/vnd.api+json: { schema: { type: object } }
            application/xml: { schema: { type: object } }
"#,
            "Boards",
        );

        assert_eq!(media_type.as_deref(), Some("application/vnd.api+json"));
    }

    #[test]
    fn test_skips_success_codes_without_content() {
        let (media_type, _) = resolve(
            r#"
openapi: 3.0.0
info: { title: Boards, version: "1" }
paths:
  /boards:
    post:
      responses:
        "201": { description: Created }
        "200":
          description: OK
          content:
            application/json: { schema: { type: object } }
"#,
            "Boards",
        );

        assert_eq!(media_type.as_deref(), Some("application/json"));
    }

    #[test]
    fn test_disagreement_keeps_first_type() {
        let (media_type, diagnostics) = resolve(
            r#"
openapi: 3.0.0
info: { title: Boards, version: "1" }
paths:
  /boards:
    get:
      responses:
        "200":
          description: OK
          content:
            text/csv: { schema: { type: string } }
  /boards/{id}:
    get:
      responses:
        "200":
          description: OK
          content:
            application/json: { schema: { type: object } }
"#,
            "Boards",
        );

        assert_eq!(media_type.as_deref(), Some("application/json"));
        assert_eq!(
            diagnostics,
            vec![Diagnostic::MediaTypeDisagreement {
                resource: "Boards".to_string(),
                pseudonym: Pseudonym::Index,
                chosen: "application/json".to_string(),
                found: "text/csv".to_string(),
            }]
        );
    }

    #[test]
    fn test_unresolved_without_content() {
        let (media_type, diagnostics) = resolve(
            r#"
openapi: 3.0.0
info: { title: Boards, version: "1" }
paths:
  /boards/{id}:
    delete:
      responses:
        "204": { description: Deleted }
"#,
            "Boards",
        );

        assert!(media_type.is_none());
        assert_eq!(
            diagnostics,
            vec![Diagnostic::MediaTypeUnresolved {
                resource: "Boards".to_string()
            }]
        );
    }
}
