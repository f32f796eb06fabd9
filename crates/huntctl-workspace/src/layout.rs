//! Workspace directory layout and scaffolding.

use std::path::{Path, PathBuf};

use huntctl_core::HuntctlError;

use crate::config::WorkspaceConfig;
use crate::template::HUNT_LOCK_TEMPLATE;

/// Subdirectories every workspace carries.
const WORKSPACE_DIRS: [&str; 9] = [
    "hunts",
    "queries",
    "runs",
    "templates",
    "knowledge",
    "prompts",
    "integrations",
    "docs",
    "config",
];

/// Skeleton environment document written at init. Describes the local
/// telemetry landscape so hunt planning has something to start from.
const ENVIRONMENT_TEMPLATE: &str = "\
# Environment

## Technology Stack

- [Operating systems, cloud providers, identity platform]

## Data Sources

- [SIEM indexes, EDR telemetry, log pipelines available for hunting]

## Crown Jewels

- [Systems and data an adversary would target first]
";

/// A hunt workspace rooted at a directory.
#[derive(Debug, Clone)]
pub struct Workspace {
    root: PathBuf,
}

impl Workspace {
    /// Wrap an existing (or about-to-be-initialized) root directory.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Walk up from `start` to find an initialized workspace, identified
    /// by the presence of both `hunts/` and `templates/`.
    pub fn discover(start: &Path) -> Option<Self> {
        let mut dir = start;
        loop {
            if dir.join("hunts").is_dir() && dir.join("templates").is_dir() {
                return Some(Self::new(dir));
            }
            dir = dir.parent()?;
        }
    }

    /// The workspace root directory.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// The directory holding hunt Markdown files.
    pub fn hunts_dir(&self) -> PathBuf {
        self.root.join("hunts")
    }

    /// The directory holding file templates.
    pub fn templates_dir(&self) -> PathBuf {
        self.root.join("templates")
    }

    /// The knowledge directory (environment notes, reference material).
    pub fn knowledge_dir(&self) -> PathBuf {
        self.root.join("knowledge")
    }

    /// Path of the environment description document.
    pub fn environment_path(&self) -> PathBuf {
        self.knowledge_dir().join("environment.md")
    }

    /// Load this workspace's configuration.
    pub fn config(&self) -> Result<WorkspaceConfig, HuntctlError> {
        WorkspaceConfig::load(&self.root)
    }

    /// Scaffold the workspace: directory tree, default config, hunt
    /// template, and environment skeleton.
    ///
    /// Idempotent — existing files and directories are left untouched, so
    /// re-running init on a live workspace is safe.
    pub fn init(&self) -> Result<(), HuntctlError> {
        for dir in WORKSPACE_DIRS {
            let path = self.root.join(dir);
            if !path.exists() {
                std::fs::create_dir_all(&path)?;
                tracing::debug!(dir = %path.display(), "created workspace directory");
            }
        }

        let config_path = WorkspaceConfig::path_under(&self.root);
        if !config_path.exists() {
            WorkspaceConfig::default().save(&self.root)?;
            tracing::info!(path = %config_path.display(), "wrote default config");
        }

        let template_path = self.templates_dir().join("HUNT_LOCK.md");
        if !template_path.exists() {
            std::fs::write(&template_path, HUNT_LOCK_TEMPLATE)?;
        }

        let environment_path = self.environment_path();
        if !environment_path.exists() {
            std::fs::write(&environment_path, ENVIRONMENT_TEMPLATE)?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn init_creates_directory_tree() {
        let dir = TempDir::new().unwrap();
        let ws = Workspace::new(dir.path());
        ws.init().unwrap();

        for sub in WORKSPACE_DIRS {
            assert!(dir.path().join(sub).is_dir(), "missing {sub}");
        }
    }

    #[test]
    fn init_writes_config_template_and_environment() {
        let dir = TempDir::new().unwrap();
        let ws = Workspace::new(dir.path());
        ws.init().unwrap();

        assert!(WorkspaceConfig::path_under(dir.path()).exists());

        let template = std::fs::read_to_string(ws.templates_dir().join("HUNT_LOCK.md")).unwrap();
        assert!(template.contains("## LEARN"));
        assert!(template.contains("## OBSERVE"));
        assert!(template.contains("## CHECK"));
        assert!(template.contains("## KEEP"));

        let environment = std::fs::read_to_string(ws.environment_path()).unwrap();
        assert!(environment.contains("Data Sources"));
        assert!(environment.contains("Technology Stack"));
    }

    #[test]
    fn init_is_idempotent() {
        let dir = TempDir::new().unwrap();
        let ws = Workspace::new(dir.path());
        ws.init().unwrap();

        // Customize the config, re-init, and confirm nothing is clobbered.
        let mut config = ws.config().unwrap();
        config.hunt_prefix = "TH-".to_string();
        config.save(dir.path()).unwrap();

        ws.init().unwrap();
        assert_eq!(ws.config().unwrap().hunt_prefix, "TH-");
    }

    #[test]
    fn discover_walks_up() {
        let dir = TempDir::new().unwrap();
        let ws = Workspace::new(dir.path());
        ws.init().unwrap();

        let nested = dir.path().join("hunts");
        let found = Workspace::discover(&nested).unwrap();
        assert_eq!(found.root(), dir.path());
    }

    #[test]
    fn discover_fails_outside_workspace() {
        let dir = TempDir::new().unwrap();
        assert!(Workspace::discover(dir.path()).is_none());
    }
}
