//! Common types and utilities for the REST Provider Generator
//!
//! This crate contains the resource model shared by the parser, the
//! analyzer, and the CLI: pseudonyms, actions, resources, composite
//! attributes, explicit bindings, the persisted YAML configuration, and the
//! error and diagnostic types surfaced across crate boundaries.

pub mod config;
mod diagnostics;
mod model;

pub use config::{BindingInfo, Config, OutputResource, ProviderConfig, TfType};
pub use diagnostics::Diagnostic;
pub use model::{
    Action, ActionBinding, Attribute, AttributeType, Binding, HttpMethod, Pseudonym,
    PseudonymProfile, Resource,
};

use std::fmt;
use thiserror::Error;

/// Errors that can occur while probing or binding an API description
#[derive(Error, Debug)]
pub enum GeneratorError {
    /// The OpenAPI document could not be read or parsed
    #[error("Spec load error: {0}")]
    SpecLoad(String),

    /// An explicit binding names a path or method the document does not define
    #[error("cannot bind {pseudonym} of resource {resource} to {method} {path}: {reason}")]
    BindingNotFound {
        resource: String,
        pseudonym: Pseudonym,
        path: String,
        method: String,
        reason: BindingFailure,
    },

    /// No content media type could be determined for a resource
    #[error("media type for resource {resource} could not be determined")]
    MediaTypeUnresolved { resource: String },

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

/// Why an explicit binding could not be resolved
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BindingFailure {
    PathNotFound,
    OperationNotFound,
}

impl fmt::Display for BindingFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BindingFailure::PathNotFound => write!(f, "path not found"),
            BindingFailure::OperationNotFound => write!(f, "operation not found"),
        }
    }
}

/// Result type for generator operations
pub type Result<T> = std::result::Result<T, GeneratorError>;
