//! OpenAPI document loading for REST provider generation
//!
//! This crate reads OpenAPI 3 documents into the model consumed by the
//! analyzer. Paths, properties, and content types are kept in ordered maps
//! so that probing is deterministic.

pub mod openapi;

pub use openapi::{DocumentFormat, OpenApiParser, OpenApiSpec};
