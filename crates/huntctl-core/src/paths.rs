//! # Path-Traversal-Safe Path Construction
//!
//! Every filesystem path derived from an externally supplied record
//! identifier goes through [`safe_join`]. Grammar validation alone is not
//! enough: a symlink planted at a valid-looking filename can redirect
//! outside the workspace, so the final path is resolved (following
//! symlinks) and checked for containment in the base directory.

use std::io;
use std::path::{Path, PathBuf};

use crate::id::{validate_record_id, RecordKind};

/// Check that `candidate` resolves to a location inside `base_dir`.
///
/// Both sides are canonicalized, so a symlink at `candidate` pointing
/// outside the base directory fails the check even though its *name* sits
/// inside. When the candidate does not exist yet, its parent directory is
/// canonicalized instead and the final component re-appended; the caller
/// is responsible for ensuring that component carries no separators.
///
/// Returns `false` for routine resolution problems (nonexistent base,
/// candidate without a parent). Only unexpected OS failures — e.g.
/// permission denied while resolving — propagate.
pub fn is_within_base(candidate: &Path, base_dir: &Path) -> io::Result<bool> {
    let resolved_base = match canonicalize_lenient(base_dir)? {
        Some(p) => p,
        None => return Ok(false),
    };

    let resolved_candidate = if candidate.exists() {
        match canonicalize_lenient(candidate)? {
            Some(p) => p,
            None => return Ok(false),
        }
    } else {
        // Not on disk yet: resolve the parent and re-attach the name.
        let (parent, name) = match (candidate.parent(), candidate.file_name()) {
            (Some(parent), Some(name)) => (parent, name),
            _ => return Ok(false),
        };
        let parent = if parent.as_os_str().is_empty() {
            Path::new(".")
        } else {
            parent
        };
        match canonicalize_lenient(parent)? {
            Some(p) => p.join(name),
            None => return Ok(false),
        }
    };

    Ok(resolved_candidate.starts_with(&resolved_base))
}

/// Canonicalize a path, mapping not-found to `None` and passing other
/// OS errors through.
fn canonicalize_lenient(path: &Path) -> io::Result<Option<PathBuf>> {
    match path.canonicalize() {
        Ok(p) => Ok(Some(p)),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
        Err(e) => Err(e),
    }
}

/// Safely join a base directory with a record identifier to form a file
/// path.
///
/// The identifier is validated against the grammar for its prefix class
/// (`H-` hunt, `I-` investigation, `R-` research, anything else the
/// generic record grammar), the filename `{id}{extension}` is joined onto
/// `base_dir`, and the result is only returned if it resolves to a
/// descendant of the resolved base directory.
///
/// Returns `None` for any routine rejection — bad grammar, traversal
/// substrings, or a resolved path escaping the base. Unexpected OS-level
/// resolution failures propagate as errors.
pub fn safe_join(base_dir: &Path, id_value: &str, extension: &str) -> io::Result<Option<PathBuf>> {
    let kind = if id_value.starts_with("H-") {
        RecordKind::Hunt
    } else if id_value.starts_with("I-") {
        RecordKind::Investigation
    } else if id_value.starts_with("R-") {
        RecordKind::Research
    } else {
        // Unknown prefix letters still get the shared grammar and
        // denylist; the kind only matters if the grammars ever diverge.
        RecordKind::Hunt
    };

    if !validate_record_id(kind, id_value) {
        return Ok(None);
    }

    let candidate = base_dir.join(format!("{id_value}{extension}"));

    if !is_within_base(&candidate, base_dir)? {
        return Ok(None);
    }

    Ok(Some(candidate))
}
