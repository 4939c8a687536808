//! Composite attribute extraction
//!
//! A resource's attributes are the union of its show response, create
//! request, and update request schemas, plus the path parameters of those
//! operations. The show action is merged first because it carries the full
//! state of a resource; request bodies merged afterwards can only turn
//! attributes writable, never back to read-only.

use rest_provider_generator_common::{Attribute, AttributeType, Diagnostic, Pseudonym, Resource};
use rest_provider_generator_parser::openapi::{OpenApiSpec, Operation, PathItem, Schema};
use std::collections::BTreeMap;
use tracing::debug;

static EMPTY_SCHEMA: Schema = Schema {
    schema_type: None,
    format: None,
    description: None,
    properties: BTreeMap::new(),
    required: Vec::new(),
    items: None,
    read_only: false,
    ref_path: None,
};

/// Merge the schema fragments of a resource into one attribute tree
///
/// Without a media type only path parameters contribute attributes.
/// Attributes are returned in first-seen order.
pub fn compose_attributes(
    spec: &OpenApiSpec,
    resource: &Resource,
    media_type: Option<&str>,
    diagnostics: &mut Vec<Diagnostic>,
) -> Vec<Attribute> {
    let mut composer = Composer {
        resource: &resource.name,
        attributes: Vec::new(),
        diagnostics,
    };

    for pseudonym in [Pseudonym::Show, Pseudonym::Create, Pseudonym::Update] {
        let Some(action) = resource.action(pseudonym) else {
            continue;
        };
        let Some((item, operation)) = spec
            .paths
            .get(&action.path)
            .and_then(|item| item.operation(action.method).map(|op| (item, op)))
        else {
            debug!(
                "{}: no {} operation at {} {}",
                resource.name, pseudonym, action.method, action.path
            );
            continue;
        };

        debug!("Extracting parameter attributes from {} action", pseudonym);
        composer.extract_parameters(item, operation);

        let Some(media_type) = media_type else {
            continue;
        };
        if pseudonym == Pseudonym::Show {
            debug!("Extracting response body attributes from show action");
            composer.extract_response(operation, media_type);
        } else {
            debug!("Extracting request body attributes from {} action", pseudonym);
            composer.extract_request(pseudonym, operation, media_type);
        }
    }

    composer.attributes
}

struct Composer<'a> {
    resource: &'a str,
    attributes: Vec<Attribute>,
    diagnostics: &'a mut Vec<Diagnostic>,
}

impl Composer<'_> {
    fn extract_parameters(&mut self, item: &PathItem, operation: &Operation) {
        for parameter in item.path_parameters(operation) {
            let schema = parameter.schema.as_ref().map_or(&EMPTY_SCHEMA, resolved);
            let mut attribute = build_attribute(&parameter.name, schema, false, true);
            if attribute.description.is_none() {
                attribute.description = parameter.description.clone();
            }
            // Path parameters are required whatever an earlier body said.
            self.merge(attribute).required = true;
        }
    }

    fn extract_response(&mut self, operation: &Operation, media_type: &str) {
        for &code in Pseudonym::Show.success_codes() {
            let Some(response) = operation.response(code) else {
                debug!("show action has no {} response", code);
                continue;
            };
            let Some(schema) = response
                .content
                .get(media_type)
                .and_then(|content| content.schema.as_ref())
            else {
                debug!("show action, code {} has no {} body", code, media_type);
                continue;
            };

            for attribute in extract_properties(resolved(schema), true) {
                self.merge(attribute);
            }
            break;
        }
    }

    fn extract_request(&mut self, pseudonym: Pseudonym, operation: &Operation, media_type: &str) {
        let Some(schema) = operation
            .request_body
            .as_ref()
            .and_then(|body| body.content.get(media_type))
            .and_then(|content| content.schema.as_ref())
        else {
            debug!("{} action has no request body of type {}", pseudonym, media_type);
            return;
        };

        for attribute in extract_properties(resolved(schema), false) {
            self.merge(attribute);
        }
    }

    /// Merge one occurrence into the top-level attributes
    fn merge(&mut self, occurrence: Attribute) -> &mut Attribute {
        let Some(index) = self
            .attributes
            .iter()
            .position(|a| a.name == occurrence.name)
        else {
            debug!("Found attribute {} for {}", occurrence, self.resource);
            let index = self.attributes.len();
            self.attributes.push(occurrence);
            return &mut self.attributes[index];
        };
        let existing = &mut self.attributes[index];

        // The first writable occurrence of a response-only attribute also
        // decides whether it is required.
        if !occurrence.read_only && existing.read_only {
            debug!("Attribute {} of {} is not read-only", existing, self.resource);
            existing.mark_writable();
            existing.required = occurrence.required;
        }

        if existing.attr_type != occurrence.attr_type {
            self.diagnostics.push(Diagnostic::TypeMismatch {
                resource: self.resource.to_string(),
                attribute: occurrence.name,
                expected: existing.attr_type,
                found: occurrence.attr_type,
            });
        }

        existing
    }
}

/// Treat a leftover `$ref` as an empty schema
fn resolved(schema: &Schema) -> &Schema {
    match &schema.ref_path {
        Some(reference) => {
            debug!("Unresolved schema reference {}; treating it as empty", reference);
            &EMPTY_SCHEMA
        }
        None => schema,
    }
}

fn attribute_type(schema: &Schema) -> AttributeType {
    AttributeType::from_openapi(schema.inferred_type()).unwrap_or(AttributeType::String)
}

/// Attributes for every property of an object schema, in property name order
fn extract_properties(schema: &Schema, read_only: bool) -> Vec<Attribute> {
    schema
        .properties
        .iter()
        .map(|(name, property)| {
            // Response properties are never required; request properties are
            // required when the enclosing schema lists them.
            let required = !read_only && schema.requires(name);
            build_attribute(name, resolved(property), read_only, required)
        })
        .collect()
}

fn build_attribute(name: &str, schema: &Schema, read_only: bool, required: bool) -> Attribute {
    let attr_type = attribute_type(schema);
    let mut elem_type = None;
    let mut children = Vec::new();

    match attr_type {
        AttributeType::Object => {
            children = extract_properties(schema, read_only);
        }
        AttributeType::Array => {
            let items = schema.items.as_deref().map_or(&EMPTY_SCHEMA, resolved);
            let item_type = attribute_type(items);
            if item_type == AttributeType::Object {
                debug!("Extracting sub-attributes for object array {}", name);
                children = extract_properties(items, read_only);
            }
            elem_type = Some(item_type);
        }
        _ => {}
    }

    Attribute {
        name: name.to_string(),
        attr_type,
        elem_type,
        format: schema.format.clone(),
        description: schema.description.clone(),
        required,
        read_only,
        children,
    }
}
