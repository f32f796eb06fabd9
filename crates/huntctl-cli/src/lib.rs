//! # huntctl-cli — CLI tool for threat hunt workspaces
//!
//! Provides the `huntctl` command-line interface over the workspace,
//! parser, and SIEM crates.
//!
//! ## Subcommands
//!
//! - `huntctl init` — Scaffold a new hunt workspace.
//! - `huntctl hunt new` — Create a hunt file from the LOCK template.
//! - `huntctl hunt list` — List hunts, with status/technique/tactic/platform filters.
//! - `huntctl hunt validate` — Validate one hunt file or the whole catalog.
//! - `huntctl hunt search` — Full-text search across hunts.
//! - `huntctl hunt stats` — Catalog statistics.
//! - `huntctl hunt coverage` — ATT&CK technique coverage map.
//! - `huntctl context` — Export a filtered context bundle.
//! - `huntctl siem` — Splunk connectivity, index listing, and search.
//!
//! ## Exit codes
//!
//! 0 on success, 1 on validation failure, 2 on operational error
//! (unreadable file, missing workspace, broken config). Subcommand
//! handlers return the code; a handler `Err` is an operational error and
//! maps to 2 via [`exit_code`], keeping 1 reserved for schema-invalid
//! documents.

pub mod context;
pub mod hunt;
pub mod init;
pub mod siem;

use std::path::{Path, PathBuf};

use anyhow::{bail, Result};
use huntctl_workspace::Workspace;

/// Resolve the workspace for catalog-facing subcommands.
///
/// An explicit `--workspace` path wins; otherwise the workspace is
/// discovered by walking up from the current directory.
pub fn require_workspace(explicit: Option<&Path>, cwd: &Path) -> Result<Workspace> {
    if let Some(root) = explicit {
        return Ok(Workspace::new(root));
    }
    match Workspace::discover(cwd) {
        Some(ws) => Ok(ws),
        None => bail!(
            "no hunt workspace found at or above {} (run `huntctl init` first)",
            cwd.display()
        ),
    }
}

/// Map a subcommand outcome to a process exit code.
///
/// Handlers return their own codes (0 success, 1 validation failure, 2
/// for operational errors they detect themselves); an `Err` that bubbles
/// up is also an operational error, so it maps to 2 rather than
/// colliding with the validation-failure code.
pub fn exit_code(result: Result<u8>) -> u8 {
    match result {
        Ok(code) => code,
        Err(e) => {
            tracing::error!("{e:#}");
            2
        }
    }
}

/// Resolve a path that may be relative to the workspace root.
///
/// Absolute paths pass through. A relative path is tried against the
/// workspace root first, then against the current directory.
pub fn resolve_path(path: &Path, root: &Path) -> PathBuf {
    if path.is_absolute() {
        return path.to_path_buf();
    }
    let workspace_relative = root.join(path);
    if workspace_relative.exists() {
        workspace_relative
    } else {
        path.to_path_buf()
    }
}
