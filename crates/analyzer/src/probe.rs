//! Action classification
//!
//! Decides whether a path and its operations supply a REST pseudonym.
//! Singleton paths (ending in a path parameter) can supply show, update, and
//! delete; collection paths can supply index and create.

use rest_provider_generator_common::{Action, Pseudonym, Resource};
use rest_provider_generator_parser::openapi::PathItem;

/// Outcome of probing one path for one pseudonym
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProbeOutcome {
    /// The path supplies the pseudonym
    Matched(Action),
    /// The path qualifies, but the resource already has this pseudonym from another path
    Conflict { existing_path: String },
    /// The path does not supply the pseudonym
    NoMatch,
}

/// Whether a path segment is a `{parameter}` placeholder
pub fn is_parameter_segment(segment: &str) -> bool {
    segment.len() > 2 && segment.starts_with('{') && segment.ends_with('}')
}

/// Whether the last segment of a path template is a path parameter
pub fn is_singleton_path(path: &str) -> bool {
    path.trim_end_matches('/')
        .rsplit('/')
        .next()
        .is_some_and(is_parameter_segment)
}

/// Classifies paths into REST actions
pub struct ActionProbe;

impl ActionProbe {
    /// Probe a path for a pseudonym on behalf of a resource
    ///
    /// Methods are tried in the pseudonym's priority order; the first one that
    /// is defined wins, provided the path shape matches the pseudonym.
    ///
    /// # Examples
    /// ```
    /// use rest_provider_generator_analyzer::{ActionProbe, ProbeOutcome};
    /// use rest_provider_generator_common::{Pseudonym, Resource};
    /// use rest_provider_generator_parser::openapi::{Operation, PathItem};
    ///
    /// let item = PathItem {
    ///     get: Some(Operation::default()),
    ///     ..Default::default()
    /// };
    /// let resource = Resource::new("Boards");
    ///
    /// assert!(matches!(
    ///     ActionProbe::probe(&resource, Pseudonym::Show, "/boards/{id}", &item),
    ///     ProbeOutcome::Matched(_)
    /// ));
    /// assert_eq!(
    ///     ActionProbe::probe(&resource, Pseudonym::Index, "/boards/{id}", &item),
    ///     ProbeOutcome::NoMatch
    /// );
    /// ```
    pub fn probe(
        resource: &Resource,
        pseudonym: Pseudonym,
        path: &str,
        item: &PathItem,
    ) -> ProbeOutcome {
        if is_singleton_path(path) != pseudonym.requires_singleton() {
            return ProbeOutcome::NoMatch;
        }

        for &method in pseudonym.methods() {
            let Some(operation) = item.operation(method) else {
                continue;
            };

            if let Some(existing) = resource.action(pseudonym) {
                if existing.path != path {
                    return ProbeOutcome::Conflict {
                        existing_path: existing.path.clone(),
                    };
                }
                return ProbeOutcome::NoMatch;
            }

            return ProbeOutcome::Matched(Action {
                pseudonym,
                method,
                path: path.to_string(),
                operation_id: operation.operation_id.clone(),
            });
        }

        ProbeOutcome::NoMatch
    }
}
