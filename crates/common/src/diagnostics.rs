//! Non-fatal findings reported alongside probing results

use crate::{AttributeType, Pseudonym};
use std::fmt;

/// A recoverable condition found while probing or composing a resource
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Diagnostic {
    /// Two paths qualify for the same pseudonym; the first one is kept
    ProbeConflict {
        resource: String,
        pseudonym: Pseudonym,
        existing_path: String,
        discarded_path: String,
    },
    /// An action's response media type differs from the one already chosen
    MediaTypeDisagreement {
        resource: String,
        pseudonym: Pseudonym,
        chosen: String,
        found: String,
    },
    /// No content media type could be determined
    MediaTypeUnresolved { resource: String },
    /// The same attribute was declared with different types; the first wins
    TypeMismatch {
        resource: String,
        attribute: String,
        expected: AttributeType,
        found: AttributeType,
    },
}

impl Diagnostic {
    /// Resource the finding refers to
    pub fn resource(&self) -> &str {
        match self {
            Diagnostic::ProbeConflict { resource, .. }
            | Diagnostic::MediaTypeDisagreement { resource, .. }
            | Diagnostic::MediaTypeUnresolved { resource }
            | Diagnostic::TypeMismatch { resource, .. } => resource,
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Diagnostic::ProbeConflict {
                resource,
                pseudonym,
                existing_path,
                discarded_path,
            } => write!(
                f,
                "{} already has a {} operation defined at {}; ignoring {}",
                resource, pseudonym, existing_path, discarded_path
            ),
            Diagnostic::MediaTypeDisagreement {
                resource,
                pseudonym,
                chosen,
                found,
            } => write!(
                f,
                "{} {} operation response media type {} does not agree with other operation(s), which are {}",
                resource, pseudonym, found, chosen
            ),
            Diagnostic::MediaTypeUnresolved { resource } => {
                write!(f, "media type for \"{}\" could not be determined", resource)
            }
            Diagnostic::TypeMismatch {
                resource,
                attribute,
                expected,
                found,
            } => write!(
                f,
                "{}: expected property {} type {} to be {}",
                resource, attribute, found, expected
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_probe_conflict_names_both_paths() {
        let diagnostic = Diagnostic::ProbeConflict {
            resource: "Quota".to_string(),
            pseudonym: Pseudonym::Show,
            existing_path: "/quota/{a}".to_string(),
            discarded_path: "/quota/{b}".to_string(),
        };

        let message = diagnostic.to_string();
        assert!(message.contains("/quota/{a}"));
        assert!(message.contains("/quota/{b}"));
        assert_eq!(diagnostic.resource(), "Quota");
    }
}
