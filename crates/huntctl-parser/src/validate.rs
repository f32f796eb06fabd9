//! On-demand schema validation for parsed hunt documents.
//!
//! Errors are accumulated plain strings rather than a structured type:
//! the presentation layer prints them verbatim, and a user gets every
//! problem in one pass instead of stop-on-first.

use huntctl_core::{validate_record_id, RecordKind};

use crate::document::{HuntDocument, LockPhase};

/// Frontmatter fields every hunt must carry, in check order.
const REQUIRED_FIELDS: [&str; 4] = ["hunt_id", "title", "status", "date"];

/// The outcome of validating one hunt document.
///
/// Check order is fixed: required frontmatter fields, then the `hunt_id`
/// grammar, then LOCK section completeness. A document is valid iff the
/// error list is empty; there is no warning/error severity split.
#[derive(Debug, Clone, Default)]
pub struct ValidationReport {
    /// Every problem found, in check order.
    pub errors: Vec<String>,
}

impl ValidationReport {
    /// Whether the document passed every check.
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }
}

impl HuntDocument {
    /// Validate this document against the hunt schema.
    ///
    /// Runs only when called — parsing never validates. All problems are
    /// accumulated; nothing short-circuits.
    pub fn validate(&self) -> ValidationReport {
        let mut errors = Vec::new();

        for field in REQUIRED_FIELDS {
            if !self.frontmatter.contains_key(field) {
                errors.push(format!("Missing required frontmatter field: {field}"));
            }
        }

        if let Some(value) = self.frontmatter.get("hunt_id") {
            // A present-but-non-string value (e.g. a bare number) is as
            // invalid as a malformed string; its rendering never matches
            // the grammar.
            let id = value
                .as_str()
                .map(str::to_owned)
                .unwrap_or_else(|| value.to_string());
            if !validate_record_id(RecordKind::Hunt, &id) {
                errors.push(format!("Invalid hunt_id format: \"{id}\" (expected e.g. H-0001)"));
            }
        }

        for phase in LockPhase::ALL {
            if !self.lock_sections.contains_key(&phase) {
                errors.push(format!(
                    "Missing LOCK section: {phase} (expected \"## {}\" heading)",
                    phase.marker()
                ));
            }
        }

        ValidationReport { errors }
    }
}
