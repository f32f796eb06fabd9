#![deny(missing_docs)]

//! # huntctl-parser — Hunt Document Parser & Validator
//!
//! Parses hunt Markdown files into structured [`HuntDocument`] values and
//! validates them against the hunt schema.
//!
//! ## Three phases
//!
//! 1. **Frontmatter extraction** — an optional leading `---` fenced YAML
//!    block becomes the metadata mapping. Missing or malformed fences
//!    degrade to an empty mapping; they are never a parse error.
//! 2. **Section extraction** — a line scanner collects the four LOCK
//!    narrative sections (`LEARN`, `OBSERVE`, `CHECK`, `KEEP`) from the
//!    body. Absent markers are simply absent from the result.
//! 3. **Validation** — on demand only. [`HuntDocument::validate`] checks
//!    required frontmatter fields, the `hunt_id` grammar, and LOCK section
//!    completeness, accumulating every problem into one ordered report so
//!    a document can be fixed in a single pass.
//!
//! Parsing is a pure function of the input text: no writes, no network,
//! no shared state. Independent callers may parse concurrently without
//! coordination.

pub mod document;
pub mod validate;

pub use document::{HuntDocument, LockPhase};
pub use validate::ValidationReport;
