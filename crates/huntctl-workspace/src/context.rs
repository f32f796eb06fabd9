//! Context export: a filtered bundle of hunts plus environment notes,
//! serialized for consumption by external tooling.

use std::fmt::Write as _;

use chrono::Utc;
use serde::Serialize;

use huntctl_core::HuntctlError;
use huntctl_parser::HuntDocument;

use crate::catalog::{Catalog, HuntFilter, HuntSummary};
use crate::layout::Workspace;

/// Output serialization for a context bundle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContextFormat {
    /// Pretty-printed JSON.
    Json,
    /// YAML.
    Yaml,
    /// Human-readable Markdown.
    Markdown,
}

/// Which hunts a context export covers.
///
/// `full` exports everything and cannot be combined with other filters;
/// otherwise at least one filter must be set. Combination rules are
/// enforced by [`ContextFilter::check`] so every caller reports the same
/// diagnostics.
#[derive(Debug, Clone, Default)]
pub struct ContextFilter {
    /// Select a single hunt by identifier.
    pub hunt: Option<String>,
    /// Select hunts by tactic.
    pub tactic: Option<String>,
    /// Select hunts by platform.
    pub platform: Option<String>,
    /// Export the entire catalog.
    pub full: bool,
}

impl ContextFilter {
    /// Validate the filter combination.
    ///
    /// # Errors
    ///
    /// Rejects `full` combined with any other filter, and the empty
    /// filter.
    pub fn check(&self) -> Result<(), HuntctlError> {
        let has_selector = self.hunt.is_some() || self.tactic.is_some() || self.platform.is_some();
        if self.full && has_selector {
            return Err(HuntctlError::Config(
                "--full cannot be combined with other filters".to_string(),
            ));
        }
        if !self.full && !has_selector {
            return Err(HuntctlError::Config(
                "Must specify at least one of --hunt, --tactic, --platform, or --full".to_string(),
            ));
        }
        Ok(())
    }
}

/// Filter description embedded in the export metadata.
#[derive(Debug, Clone, Serialize)]
struct FilterMetadata {
    hunt: Option<String>,
    tactic: Option<String>,
    platform: Option<String>,
    full: bool,
}

/// Export metadata: when and with which filters the bundle was built.
#[derive(Debug, Clone, Serialize)]
struct BundleMetadata {
    generated_at: String,
    filters: FilterMetadata,
}

/// A full hunt document in the export.
#[derive(Debug, Clone, Serialize)]
struct BundleHunt {
    hunt_id: String,
    frontmatter: serde_json::Map<String, serde_json::Value>,
    lock_sections: std::collections::BTreeMap<huntctl_parser::LockPhase, String>,
}

/// The exported context bundle.
#[derive(Debug, Clone, Serialize)]
pub struct ContextBundle {
    metadata: BundleMetadata,
    environment: Option<String>,
    hunt_index: Vec<HuntSummary>,
    hunts: Vec<BundleHunt>,
}

impl ContextBundle {
    /// Build a bundle from the workspace for the given filter.
    ///
    /// A filter matching nothing yields an empty `hunts` list, not an
    /// error. Empty is a legitimate answer for machine consumers.
    pub fn build(workspace: &Workspace, filter: &ContextFilter) -> Result<Self, HuntctlError> {
        filter.check()?;

        let catalog = Catalog::new(workspace);
        let index = catalog.list(&HuntFilter {
            tactic: filter.tactic.clone(),
            platform: filter.platform.clone(),
            ..Default::default()
        })?;

        let selected: Vec<HuntSummary> = index
            .into_iter()
            .filter(|hunt| match filter.hunt {
                Some(ref id) => &hunt.hunt_id == id,
                None => true,
            })
            .collect();

        let mut hunts = Vec::with_capacity(selected.len());
        for summary in &selected {
            let doc = HuntDocument::parse_file(&summary.path)?;
            hunts.push(BundleHunt {
                hunt_id: summary.hunt_id.clone(),
                frontmatter: doc.frontmatter,
                lock_sections: doc.lock_sections,
            });
        }

        let environment = match std::fs::read_to_string(workspace.environment_path()) {
            Ok(text) => Some(text),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => None,
            Err(e) => return Err(e.into()),
        };

        Ok(Self {
            metadata: BundleMetadata {
                generated_at: Utc::now().to_rfc3339(),
                filters: FilterMetadata {
                    hunt: filter.hunt.clone(),
                    tactic: filter.tactic.clone(),
                    platform: filter.platform.clone(),
                    full: filter.full,
                },
            },
            environment,
            hunt_index: selected,
            hunts,
        })
    }

    /// Serialize the bundle in the requested format.
    pub fn render(&self, format: ContextFormat) -> Result<String, HuntctlError> {
        match format {
            ContextFormat::Json => Ok(serde_json::to_string_pretty(self)?),
            ContextFormat::Yaml => Ok(serde_yaml::to_string(self)?),
            ContextFormat::Markdown => Ok(self.to_markdown()),
        }
    }

    fn to_markdown(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "# Hunt Context Export");
        let _ = writeln!(out);
        let _ = writeln!(out, "Generated: {}", self.metadata.generated_at);
        let _ = writeln!(
            out,
            "Filters: hunt={:?} tactic={:?} platform={:?} full={}",
            self.metadata.filters.hunt,
            self.metadata.filters.tactic,
            self.metadata.filters.platform,
            self.metadata.filters.full,
        );

        if let Some(ref environment) = self.environment {
            let _ = writeln!(out, "\n## Environment\n\n{environment}");
        }

        if !self.hunt_index.is_empty() {
            let _ = writeln!(out, "\n## Hunt Index\n");
            for hunt in &self.hunt_index {
                let _ = writeln!(out, "- {}: {} ({})", hunt.hunt_id, hunt.title, hunt.status);
            }
        }

        for hunt in &self.hunts {
            let _ = writeln!(out, "\n## {}\n", hunt.hunt_id);
            for (phase, content) in &hunt.lock_sections {
                let _ = writeln!(out, "### {phase}\n\n{content}");
            }
        }

        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn workspace_with_hunts() -> (TempDir, Workspace) {
        let dir = TempDir::new().unwrap();
        let ws = Workspace::new(dir.path());
        ws.init().unwrap();

        for (id, tactic, platform) in [
            ("H-0001", "persistence", "Linux"),
            ("H-0002", "credential-access", "Windows"),
        ] {
            let content = format!(
                "---\nhunt_id: {id}\ntitle: Hunt {id}\nstatus: planning\ndate: 2025-12-02\n\
tactics: [{tactic}]\nplatform: [{platform}]\n---\n\n\
## LEARN: a\nl\n## OBSERVE: b\no\n## CHECK: c\nc\n## KEEP: d\nk\n"
            );
            std::fs::write(ws.hunts_dir().join(format!("{id}.md")), content).unwrap();
        }
        (dir, ws)
    }

    #[test]
    fn filter_rules_enforced() {
        assert!(ContextFilter::default().check().is_err());
        assert!(ContextFilter { full: true, ..Default::default() }.check().is_ok());
        assert!(ContextFilter {
            full: true,
            tactic: Some("persistence".to_string()),
            ..Default::default()
        }
        .check()
        .is_err());
        assert!(ContextFilter { hunt: Some("H-0001".to_string()), ..Default::default() }
            .check()
            .is_ok());
    }

    #[test]
    fn combined_filters_intersect() {
        let (_dir, ws) = workspace_with_hunts();
        let bundle = ContextBundle::build(
            &ws,
            &ContextFilter {
                tactic: Some("persistence".to_string()),
                platform: Some("linux".to_string()),
                ..Default::default()
            },
        )
        .unwrap();

        assert_eq!(bundle.hunts.len(), 1);
        assert_eq!(bundle.hunts[0].hunt_id, "H-0001");
    }

    #[test]
    fn single_hunt_selection() {
        let (_dir, ws) = workspace_with_hunts();
        let bundle = ContextBundle::build(
            &ws,
            &ContextFilter { hunt: Some("H-0002".to_string()), ..Default::default() },
        )
        .unwrap();

        assert_eq!(bundle.hunt_index.len(), 1);
        assert_eq!(bundle.hunts[0].hunt_id, "H-0002");
        assert!(bundle.environment.is_some());
    }

    #[test]
    fn nonexistent_hunt_yields_empty_bundle() {
        let (_dir, ws) = workspace_with_hunts();
        let bundle = ContextBundle::build(
            &ws,
            &ContextFilter { hunt: Some("H-9999".to_string()), ..Default::default() },
        )
        .unwrap();
        assert!(bundle.hunts.is_empty());
    }

    #[test]
    fn json_render_has_expected_shape() {
        let (_dir, ws) = workspace_with_hunts();
        let bundle = ContextBundle::build(
            &ws,
            &ContextFilter { full: true, ..Default::default() },
        )
        .unwrap();

        let json = bundle.render(ContextFormat::Json).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["metadata"]["filters"]["full"], true);
        assert_eq!(value["hunts"].as_array().unwrap().len(), 2);
        assert!(value["hunt_index"].is_array());
        assert!(value["environment"].is_string());
    }

    #[test]
    fn yaml_and_markdown_render() {
        let (_dir, ws) = workspace_with_hunts();
        let bundle = ContextBundle::build(
            &ws,
            &ContextFilter { hunt: Some("H-0001".to_string()), ..Default::default() },
        )
        .unwrap();

        let yaml = bundle.render(ContextFormat::Yaml).unwrap();
        assert!(yaml.contains("H-0001"));

        let md = bundle.render(ContextFormat::Markdown).unwrap();
        assert!(md.starts_with("# Hunt Context Export"));
        assert!(md.contains("Filters:"));
        assert!(md.contains("H-0001"));
    }
}
