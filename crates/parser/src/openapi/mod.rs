//! OpenAPI 3.0 document model and loader
//!
//! Parses OpenAPI 3.x documents (JSON or YAML) into an ordered, in-memory
//! model that the analyzer probes for resources.
//!
//! ## Usage
//! ```rust,ignore
//! use rest_provider_generator_parser::openapi::OpenApiParser;
//!
//! let parser = OpenApiParser::from_file("openapi.yaml")?;
//! for path in parser.spec().path_templates() {
//!     println!("{}", path);
//! }
//! ```

mod parser;
mod types;

pub use parser::{DocumentFormat, OpenApiParser};
pub use types::*;
