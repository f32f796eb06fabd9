#![deny(missing_docs)]

//! # huntctl-core — Foundational Types for huntctl
//!
//! This crate defines the types that every other crate in the workspace
//! depends on. It has no internal crate dependencies — only `serde`,
//! `thiserror`, `regex`, and `once_cell` from the external ecosystem.
//!
//! ## Design Principles
//!
//! 1. **Newtype wrappers for record identifiers.** A [`HuntId`] is a distinct
//!    type from an [`InvestigationId`]; both are validated at construction
//!    and immutable afterwards.
//!
//! 2. **Two-layer path safety.** Identifier grammar checking alone cannot
//!    stop a symlink planted at a valid-looking filename, so every
//!    identifier-derived path goes through [`safe_join`], which validates
//!    the identifier *and* the resolved location of the final file.
//!
//! 3. **[`HuntctlError`] hierarchy.** Structured errors with `thiserror` —
//!    no `Box<dyn Error>`, no `.unwrap()` outside tests.

pub mod error;
pub mod id;
pub mod paths;

// Re-export primary types at crate root for ergonomic imports.
pub use error::{HuntctlError, ValidationError};
pub use id::{validate_record_id, HuntId, InvestigationId, RecordKind, ResearchId};
pub use paths::{is_within_base, safe_join};
