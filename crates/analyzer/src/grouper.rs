//! Heuristic grouping of paths into resources

use crate::naming::{derive_resource_key, find_prefix};
use crate::probe::{ActionProbe, ProbeOutcome};
use rest_provider_generator_common::{Diagnostic, Pseudonym, Resource};
use rest_provider_generator_parser::OpenApiSpec;
use std::collections::BTreeMap;
use tracing::debug;

/// Resources found by probing, with the warnings raised along the way
#[derive(Debug, Clone, Default)]
pub struct ProbeResult {
    pub resources: BTreeMap<String, Resource>,
    pub diagnostics: Vec<Diagnostic>,
}

/// Groups the paths of a document into conceptual resources
///
/// Paths are visited in lexicographic order, so when two paths qualify for
/// the same pseudonym on one resource, the lexicographically smaller path
/// keeps it.
pub fn probe_resources(spec: &OpenApiSpec) -> ProbeResult {
    let paths = spec.path_templates();
    let prefix = find_prefix(&paths);
    debug!("Shared path prefix: {:?}", prefix);

    let mut result = ProbeResult::default();

    for (path, item) in &spec.paths {
        let key = derive_resource_key(path, &prefix);
        let resource = result
            .resources
            .entry(key.clone())
            .or_insert_with(|| Resource::new(key));

        let mut matched = false;
        for pseudonym in Pseudonym::PROBE_ORDER {
            match ActionProbe::probe(resource, pseudonym, path, item) {
                ProbeOutcome::Matched(action) => {
                    debug!(
                        "{} {} {} -> {}",
                        resource.name, action.method, path, pseudonym
                    );
                    resource.actions.insert(pseudonym, action);
                    matched = true;
                }
                ProbeOutcome::Conflict { existing_path } => {
                    result.diagnostics.push(Diagnostic::ProbeConflict {
                        resource: resource.name.clone(),
                        pseudonym,
                        existing_path,
                        discarded_path: path.clone(),
                    });
                }
                ProbeOutcome::NoMatch => {}
            }
        }

        if matched {
            resource.paths.insert(path.clone());
        }
    }

    result
}
