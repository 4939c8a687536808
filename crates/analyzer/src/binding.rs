//! Explicit binding resolution
//!
//! Builds resources straight from user-declared `{path, method}` pairs,
//! bypassing heuristic probing. Any binding that does not match the document
//! exactly aborts the whole resolution.

use rest_provider_generator_common::{
    Action, ActionBinding, Binding, BindingFailure, GeneratorError, HttpMethod, Pseudonym,
    Resource, Result,
};
use rest_provider_generator_parser::OpenApiSpec;
use std::collections::BTreeMap;

/// Resolve every binding against the document
pub fn bind_resources(spec: &OpenApiSpec, bindings: &[Binding]) -> Result<BTreeMap<String, Resource>> {
    let mut result = BTreeMap::new();

    for binding in bindings {
        let mut resource = Resource::new(binding.resource_name.clone());

        for (&pseudonym, action_binding) in &binding.actions {
            let action = bind_action(spec, &binding.resource_name, pseudonym, action_binding)?;
            resource.paths.insert(action.path.clone());
            resource.actions.insert(pseudonym, action);
        }

        result.insert(binding.resource_name.clone(), resource);
    }

    Ok(result)
}

fn bind_action(
    spec: &OpenApiSpec,
    resource: &str,
    pseudonym: Pseudonym,
    binding: &ActionBinding,
) -> Result<Action> {
    let not_found = |reason| GeneratorError::BindingNotFound {
        resource: resource.to_string(),
        pseudonym,
        path: binding.path.clone(),
        method: binding.method.clone(),
        reason,
    };

    let item = spec
        .paths
        .get(&binding.path)
        .ok_or_else(|| not_found(BindingFailure::PathNotFound))?;

    let method: HttpMethod = binding
        .method
        .parse()
        .map_err(|_| not_found(BindingFailure::OperationNotFound))?;

    let operation = item
        .operation(method)
        .ok_or_else(|| not_found(BindingFailure::OperationNotFound))?;

    Ok(Action {
        pseudonym,
        method,
        path: binding.path.clone(),
        operation_id: operation.operation_id.clone(),
    })
}
