//! # Record Identifier Newtypes
//!
//! Domain-primitive newtypes for the short codes that name workspace
//! records: hunts (`H-0001`), investigations (`I-0001`), and research
//! notes (`R-0001`). Each identifier is a distinct type — you cannot pass
//! a [`ResearchId`] where a [`HuntId`] is expected.
//!
//! ## Validation
//!
//! Record identifiers double as filenames, so validation is two-stage:
//!
//! 1. Grammar: the string must match `^[A-Z]+-\d{4}$` exactly.
//! 2. Denylist: `..`, `/`, and `\` are rejected even where the grammar
//!    would already exclude them, so the traversal defense never depends
//!    on the regex engine's handling of unusual encodings.
//!
//! The two stages are kept as independent checks so each can be verified
//! on its own.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// Grammar shared by all record identifiers: uppercase letters, a single
/// hyphen, exactly four decimal digits.
static RECORD_ID_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Z]+-\d{4}$").expect("record ID grammar is a valid regex"));

/// The class of workspace record an identifier names.
///
/// All three kinds currently share one grammar; the kind selects the
/// conventional prefix letter used when formatting new identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecordKind {
    /// A threat hunt (`H-` prefix).
    Hunt,
    /// An investigation spawned from hunt findings (`I-` prefix).
    Investigation,
    /// A research note (`R-` prefix).
    Research,
}

impl RecordKind {
    /// The conventional prefix for new identifiers of this kind,
    /// including the trailing hyphen.
    pub fn prefix(self) -> &'static str {
        match self {
            RecordKind::Hunt => "H-",
            RecordKind::Investigation => "I-",
            RecordKind::Research => "R-",
        }
    }
}

/// Validate a record identifier string for the given kind.
///
/// Returns `false` — never an error — for anything unacceptable: empty
/// input, wrong grammar, lowercase letters, wrong digit count, or the
/// presence of a traversal substring (`..`, `/`, `\`). Embedded NUL bytes
/// fail the grammar and are rejected with everything else.
///
/// All kinds currently share one grammar, so `kind` does not change the
/// result today; it exists so the grammars can diverge without touching
/// call sites.
pub fn validate_record_id(kind: RecordKind, value: &str) -> bool {
    let _ = kind;
    if value.is_empty() {
        return false;
    }
    // Stage 1: grammar.
    if !RECORD_ID_RE.is_match(value) {
        return false;
    }
    // Stage 2: traversal denylist, checked independently of the grammar.
    if value.contains("..") || value.contains('/') || value.contains('\\') {
        return false;
    }
    true
}

macro_rules! record_id_newtype {
    ($(#[$doc:meta])* $name:ident, $kind:expr, $err:ident) => {
        $(#[$doc])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        pub struct $name(String);

        impl $name {
            /// Create an identifier from a string, validating grammar and
            /// traversal safety.
            ///
            /// # Errors
            ///
            /// Returns a [`ValidationError`] carrying the rejected input
            /// when the string does not match the record identifier grammar.
            pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
                let s = value.into();
                if !validate_record_id($kind, &s) {
                    return Err(ValidationError::$err(s));
                }
                Ok(Self(s))
            }

            /// Access the identifier string.
            pub fn as_str(&self) -> &str {
                &self.0
            }

            /// The filename this record is stored under, with the given
            /// extension (e.g. `".md"`).
            pub fn filename(&self, extension: &str) -> String {
                format!("{}{}", self.0, extension)
            }

            /// The record kind this identifier type names.
            pub fn kind() -> RecordKind {
                $kind
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl std::str::FromStr for $name {
            type Err = ValidationError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Self::new(s)
            }
        }
    };
}

record_id_newtype!(
    /// Identifier for a threat hunt record, e.g. `H-0001`.
    HuntId,
    RecordKind::Hunt,
    InvalidHuntId
);

record_id_newtype!(
    /// Identifier for an investigation record, e.g. `I-0001`.
    InvestigationId,
    RecordKind::Investigation,
    InvalidInvestigationId
);

record_id_newtype!(
    /// Identifier for a research record, e.g. `R-0001`.
    ResearchId,
    RecordKind::Research,
    InvalidResearchId
);

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    // -- validate_record_id --

    #[test]
    fn accepts_canonical_ids() {
        assert!(validate_record_id(RecordKind::Hunt, "H-0001"));
        assert!(validate_record_id(RecordKind::Hunt, "H-9999"));
        assert!(validate_record_id(RecordKind::Hunt, "A-0001"));
        assert!(validate_record_id(RecordKind::Investigation, "I-0001"));
        assert!(validate_record_id(RecordKind::Research, "R-0001"));
        // Multi-letter prefixes are within the grammar.
        assert!(validate_record_id(RecordKind::Hunt, "HX-0001"));
    }

    #[test]
    fn rejects_wrong_grammar() {
        assert!(!validate_record_id(RecordKind::Hunt, ""));
        assert!(!validate_record_id(RecordKind::Hunt, "H-1"));
        assert!(!validate_record_id(RecordKind::Hunt, "H-00001"));
        assert!(!validate_record_id(RecordKind::Hunt, "H0001"));
        assert!(!validate_record_id(RecordKind::Hunt, "h-0001"));
        assert!(!validate_record_id(RecordKind::Hunt, "H-"));
        assert!(!validate_record_id(RecordKind::Hunt, "H-000a"));
        assert!(!validate_record_id(RecordKind::Hunt, " H-0001"));
        assert!(!validate_record_id(RecordKind::Hunt, "H-0001 "));
    }

    #[test]
    fn rejects_traversal_attempts() {
        assert!(!validate_record_id(RecordKind::Hunt, "../../etc/passwd"));
        assert!(!validate_record_id(RecordKind::Hunt, "H-0001/../../secrets.txt"));
        assert!(!validate_record_id(RecordKind::Hunt, "../H-0001"));
        assert!(!validate_record_id(RecordKind::Hunt, "H-0001\\..\\..\\secrets"));
        assert!(!validate_record_id(RecordKind::Hunt, "H-0001/.env"));
        assert!(!validate_record_id(RecordKind::Investigation, "I-0001/../../../etc/passwd"));
        assert!(!validate_record_id(RecordKind::Research, "R-0001/../../secrets"));
    }

    #[test]
    fn rejects_embedded_nul() {
        assert!(!validate_record_id(RecordKind::Hunt, "H-0001\0"));
        assert!(!validate_record_id(RecordKind::Hunt, "H\0-0001"));
    }

    // -- newtypes --

    #[test]
    fn hunt_id_construction_and_accessors() {
        let id = HuntId::new("H-0042").unwrap();
        assert_eq!(id.as_str(), "H-0042");
        assert_eq!(id.to_string(), "H-0042");
        assert_eq!(id.filename(".md"), "H-0042.md");
        assert_eq!(HuntId::kind(), RecordKind::Hunt);
    }

    #[test]
    fn hunt_id_rejects_invalid() {
        assert!(HuntId::new("INVALID").is_err());
        assert!(HuntId::new("h-0001").is_err());
        assert!(HuntId::new("../H-0001").is_err());
    }

    #[test]
    fn hunt_id_from_str() {
        let id: HuntId = "H-0007".parse().unwrap();
        assert_eq!(id.as_str(), "H-0007");
        assert!("nope".parse::<HuntId>().is_err());
    }

    #[test]
    fn investigation_and_research_ids() {
        assert!(InvestigationId::new("I-0001").is_ok());
        assert!(ResearchId::new("R-0001").is_ok());
        assert!(InvestigationId::new("I-1").is_err());
        assert!(ResearchId::new("R-0001/../x").is_err());
    }

    #[test]
    fn record_kind_prefixes() {
        assert_eq!(RecordKind::Hunt.prefix(), "H-");
        assert_eq!(RecordKind::Investigation.prefix(), "I-");
        assert_eq!(RecordKind::Research.prefix(), "R-");
    }

    #[test]
    fn ids_order_lexically() {
        let a = HuntId::new("H-0001").unwrap();
        let b = HuntId::new("H-0002").unwrap();
        assert!(a < b);
    }

    // -- properties --

    proptest! {
        /// Every string of the form `[A-Z]{1,5}-[0-9]{4}` is accepted.
        #[test]
        fn grammar_acceptance(prefix in "[A-Z]{1,5}", digits in "[0-9]{4}") {
            let id = format!("{prefix}-{digits}");
            prop_assert!(validate_record_id(RecordKind::Hunt, &id));
        }

        /// Any string containing a traversal substring is rejected, no
        /// matter what surrounds it.
        #[test]
        fn traversal_rejection(head in "[A-Z]{0,4}", sep in prop::sample::select(vec!["..", "/", "\\"]), tail in "[A-Z0-9-]{0,8}") {
            let id = format!("{head}{sep}{tail}");
            prop_assert!(!validate_record_id(RecordKind::Hunt, &id));
        }

        /// Digit counts other than four are rejected.
        #[test]
        fn wrong_digit_count_rejected(count in 0usize..8, digit in 0u8..10) {
            prop_assume!(count != 4);
            let id = format!("H-{}", digit.to_string().repeat(count));
            prop_assert!(!validate_record_id(RecordKind::Hunt, &id));
        }
    }
}
