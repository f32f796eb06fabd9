#![deny(missing_docs)]

//! # huntctl-workspace — Hunt Workspace Management
//!
//! Everything between the parser core and the CLI: scaffolding the
//! workspace directory tree, loading and writing the workspace config,
//! creating hunt files from the LOCK template with sequential ID
//! allocation, and the catalog operations (list, filter, search, stats,
//! coverage, batch validation, context export).
//!
//! All hunt file paths derived from identifiers are built through
//! `huntctl_core::safe_join`; nothing in this crate concatenates an
//! externally supplied identifier into a path by hand.

pub mod catalog;
pub mod config;
pub mod context;
pub mod layout;
pub mod template;

pub use catalog::{Catalog, CatalogStats, HuntFilter, HuntSummary, ValidationSummary};
pub use config::WorkspaceConfig;
pub use context::{ContextBundle, ContextFilter, ContextFormat};
pub use layout::Workspace;
pub use template::{create_hunt, next_hunt_id, HuntSpec};
