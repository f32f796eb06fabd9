//! The hunt catalog: enumeration, filtering, search, statistics,
//! coverage, and batch validation over the `hunts/` directory.
//!
//! The catalog holds no cache — every operation re-reads and re-parses
//! the hunt files it touches, so concurrent writers never see stale
//! results through this layer.

use std::collections::{BTreeMap, BTreeSet};
use std::path::PathBuf;

use serde::Serialize;

use huntctl_core::HuntctlError;
use huntctl_parser::HuntDocument;

use crate::layout::Workspace;

/// One hunt's catalog entry: the frontmatter fields the listing and
/// filtering operations work over, plus the source path.
#[derive(Debug, Clone, Serialize)]
pub struct HuntSummary {
    /// Frontmatter `hunt_id`, or the filename stem when absent.
    pub hunt_id: String,
    /// Hunt title, empty string when absent.
    pub title: String,
    /// Lifecycle status (`planning`, `active`, `completed`, ...).
    pub status: String,
    /// Hunt date as written in frontmatter.
    pub date: String,
    /// Analyst name.
    pub hunter: String,
    /// ATT&CK technique IDs.
    pub techniques: Vec<String>,
    /// ATT&CK tactic names.
    pub tactics: Vec<String>,
    /// Target platforms.
    pub platforms: Vec<String>,
    /// Telemetry sources.
    pub data_sources: Vec<String>,
    /// Free-form tags.
    pub tags: Vec<String>,
    /// Path of the source file.
    pub path: PathBuf,
}

impl HuntSummary {
    fn from_document(doc: &HuntDocument, path: PathBuf) -> Self {
        let stem_id = path
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or_default()
            .to_string();
        Self {
            hunt_id: doc.hunt_id.clone().unwrap_or(stem_id),
            title: doc.field_str("title").unwrap_or_default().to_string(),
            status: doc.field_str("status").unwrap_or_default().to_string(),
            date: doc.field_str("date").unwrap_or_default().to_string(),
            hunter: doc.field_str("hunter").unwrap_or_default().to_string(),
            techniques: doc.field_list("techniques"),
            tactics: doc.field_list("tactics"),
            platforms: doc.field_list("platform"),
            data_sources: doc.field_list("data_sources"),
            tags: doc.field_list("tags"),
            path,
        }
    }
}

/// Filter predicate for catalog listings. Empty filter matches all.
#[derive(Debug, Clone, Default)]
pub struct HuntFilter {
    /// Exact status match (case-insensitive).
    pub status: Option<String>,
    /// Technique membership (exact ID).
    pub technique: Option<String>,
    /// Tactic membership (case-insensitive).
    pub tactic: Option<String>,
    /// Platform membership (case-insensitive).
    pub platform: Option<String>,
}

impl HuntFilter {
    fn matches(&self, hunt: &HuntSummary) -> bool {
        if let Some(ref status) = self.status {
            if !hunt.status.eq_ignore_ascii_case(status) {
                return false;
            }
        }
        if let Some(ref technique) = self.technique {
            if !hunt.techniques.iter().any(|t| t == technique) {
                return false;
            }
        }
        if let Some(ref tactic) = self.tactic {
            if !hunt.tactics.iter().any(|t| t.eq_ignore_ascii_case(tactic)) {
                return false;
            }
        }
        if let Some(ref platform) = self.platform {
            if !hunt.platforms.iter().any(|p| p.eq_ignore_ascii_case(platform)) {
                return false;
            }
        }
        true
    }
}

/// Aggregate statistics over the catalog.
#[derive(Debug, Clone, Serialize)]
pub struct CatalogStats {
    /// Number of hunt files.
    pub total: usize,
    /// Hunt count per status value.
    pub by_status: BTreeMap<String, usize>,
    /// Distinct techniques across all hunts.
    pub techniques: BTreeSet<String>,
    /// Distinct tactics across all hunts.
    pub tactics: BTreeSet<String>,
}

/// Batch validation outcome across the catalog.
#[derive(Debug, Clone, Default)]
pub struct ValidationSummary {
    /// Number of files checked.
    pub total: usize,
    /// Number of files with an empty error list.
    pub passed: usize,
    /// Per-file failures: source path and the complete error list.
    pub failures: Vec<(PathBuf, Vec<String>)>,
}

impl ValidationSummary {
    /// Whether every checked file validated clean.
    pub fn all_passed(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Catalog operations over a workspace's `hunts/` directory.
#[derive(Debug)]
pub struct Catalog<'a> {
    workspace: &'a Workspace,
}

impl<'a> Catalog<'a> {
    /// Build a catalog view over the given workspace.
    pub fn new(workspace: &'a Workspace) -> Self {
        Self { workspace }
    }

    /// Parse every hunt file, returning documents with their paths,
    /// sorted by filename. Unreadable files are skipped with a warning
    /// rather than failing the whole listing.
    fn load_documents(&self) -> Result<Vec<(PathBuf, HuntDocument)>, HuntctlError> {
        let hunts_dir = self.workspace.hunts_dir();
        if !hunts_dir.is_dir() {
            return Ok(Vec::new());
        }

        let mut paths: Vec<PathBuf> = std::fs::read_dir(&hunts_dir)?
            .filter_map(|entry| entry.ok())
            .map(|entry| entry.path())
            .filter(|p| p.extension().is_some_and(|ext| ext == "md"))
            .collect();
        paths.sort();

        let mut documents = Vec::with_capacity(paths.len());
        for path in paths {
            match HuntDocument::parse_file(&path) {
                Ok(doc) => documents.push((path, doc)),
                Err(e) => {
                    tracing::warn!(path = %path.display(), error = %e, "skipping unreadable hunt file");
                }
            }
        }
        Ok(documents)
    }

    /// List hunts matching a filter, sorted by filename.
    pub fn list(&self, filter: &HuntFilter) -> Result<Vec<HuntSummary>, HuntctlError> {
        Ok(self
            .load_documents()?
            .into_iter()
            .map(|(path, doc)| HuntSummary::from_document(&doc, path))
            .filter(|hunt| filter.matches(hunt))
            .collect())
    }

    /// Case-insensitive substring search over title, tags, techniques,
    /// and body text.
    pub fn search(&self, term: &str) -> Result<Vec<HuntSummary>, HuntctlError> {
        let needle = term.to_lowercase();
        Ok(self
            .load_documents()?
            .into_iter()
            .filter(|(_, doc)| {
                let title_hit = doc
                    .field_str("title")
                    .is_some_and(|t| t.to_lowercase().contains(&needle));
                let tag_hit = doc
                    .field_list("tags")
                    .iter()
                    .chain(doc.field_list("techniques").iter())
                    .any(|t| t.to_lowercase().contains(&needle));
                title_hit || tag_hit || doc.body.to_lowercase().contains(&needle)
            })
            .map(|(path, doc)| HuntSummary::from_document(&doc, path))
            .collect())
    }

    /// Compute aggregate statistics over all hunts.
    pub fn stats(&self) -> Result<CatalogStats, HuntctlError> {
        let hunts = self.list(&HuntFilter::default())?;
        let mut by_status = BTreeMap::new();
        let mut techniques = BTreeSet::new();
        let mut tactics = BTreeSet::new();

        for hunt in &hunts {
            let status = if hunt.status.is_empty() {
                "unknown".to_string()
            } else {
                hunt.status.clone()
            };
            *by_status.entry(status).or_insert(0) += 1;
            techniques.extend(hunt.techniques.iter().cloned());
            tactics.extend(hunt.tactics.iter().cloned());
        }

        Ok(CatalogStats {
            total: hunts.len(),
            by_status,
            techniques,
            tactics,
        })
    }

    /// ATT&CK coverage: map each technique to the hunts exercising it.
    pub fn coverage(&self) -> Result<BTreeMap<String, Vec<String>>, HuntctlError> {
        let hunts = self.list(&HuntFilter::default())?;
        let mut map: BTreeMap<String, Vec<String>> = BTreeMap::new();
        for hunt in hunts {
            for technique in hunt.techniques {
                map.entry(technique).or_default().push(hunt.hunt_id.clone());
            }
        }
        Ok(map)
    }

    /// Validate every hunt file, accumulating every file's complete
    /// error list.
    pub fn validate_all(&self) -> Result<ValidationSummary, HuntctlError> {
        let documents = self.load_documents()?;
        let mut summary = ValidationSummary {
            total: documents.len(),
            ..Default::default()
        };

        for (path, doc) in documents {
            let report = doc.validate();
            if report.is_valid() {
                summary.passed += 1;
            } else {
                summary.failures.push((path, report.errors));
            }
        }
        Ok(summary)
    }
}
