//! Resource inference and attribute composition for REST Provider Generator
//!
//! Groups the paths of an OpenAPI 3 document into conceptual REST resources,
//! resolves the media type each resource speaks, and merges request and
//! response schemas into one attribute tree per resource.
//!
//! # Examples
//!
//! ```no_run
//! use rest_provider_generator_analyzer::{render_examine_report, RestAnalyzer};
//!
//! let analyzer = RestAnalyzer::from_file("openapi.yaml").expect("Failed to load document");
//! let probed = analyzer.probe();
//!
//! for diagnostic in &probed.diagnostics {
//!     eprintln!("warning: {diagnostic}");
//! }
//! print!("{}", render_examine_report(&probed.resources).expect("Report failed"));
//! ```

mod analyzer;
mod binding;
mod composer;
mod grouper;
mod media_type;
pub mod naming;
mod output;
mod probe;

pub use analyzer::{InitResult, Resolution, ResolvedResource, RestAnalyzer};
pub use binding::bind_resources;
pub use composer::compose_attributes;
pub use grouper::{probe_resources, ProbeResult};
pub use media_type::{probe_media_type, resolve_media_type, WELL_KNOWN_MEDIA_TYPES};
pub use naming::{find_prefix, resource_key_from_path};
pub use output::{classify, render_config, render_examine_report, write_config};
pub use probe::{is_singleton_path, ActionProbe, ProbeOutcome};

use rest_provider_generator_common::GeneratorError;
use thiserror::Error;

/// Errors that can occur during resource analysis
#[derive(Debug, Error)]
pub enum AnalyzerError {
    #[error(transparent)]
    Generator(#[from] GeneratorError),

    #[error("Failed to write output: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to format output: {0}")]
    FormatError(#[from] std::fmt::Error),
}

pub type Result<T> = std::result::Result<T, AnalyzerError>;
