//! Workspace configuration (`config/.huntctl.yaml`).
//!
//! Loading degrades to defaults when the file is absent so that read-only
//! catalog operations work in a bare directory of hunt files; a broken
//! YAML file is still an error, since silently ignoring an existing
//! config would mask operator mistakes.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use huntctl_core::HuntctlError;

/// Location of the config file relative to the workspace root.
pub const CONFIG_RELATIVE_PATH: &str = "config/.huntctl.yaml";

/// Workspace-level configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WorkspaceConfig {
    /// Prefix for newly allocated hunt identifiers, including the hyphen.
    pub hunt_prefix: String,
    /// Default `hunter` frontmatter value for new hunts.
    pub default_hunter: Option<String>,
    /// SIEM connection settings.
    pub siem: SiemSettings,
    /// EDR platform settings.
    pub edr: EdrSettings,
}

impl Default for WorkspaceConfig {
    fn default() -> Self {
        Self {
            hunt_prefix: "H-".to_string(),
            default_hunter: None,
            siem: SiemSettings::default(),
            edr: EdrSettings::default(),
        }
    }
}

/// SIEM block of the workspace config.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SiemSettings {
    /// SIEM product name (e.g. `splunk`).
    pub provider: Option<String>,
    /// SIEM API host.
    pub host: Option<String>,
    /// Default search index.
    pub index: Option<String>,
}

/// EDR block of the workspace config.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct EdrSettings {
    /// EDR product name.
    pub provider: Option<String>,
}

impl WorkspaceConfig {
    /// Path of the config file under the given workspace root.
    pub fn path_under(root: &Path) -> PathBuf {
        root.join(CONFIG_RELATIVE_PATH)
    }

    /// Load the config from a workspace root.
    ///
    /// # Errors
    ///
    /// A missing file yields defaults, but an existing file that fails to
    /// read or decode is an error.
    pub fn load(root: &Path) -> Result<Self, HuntctlError> {
        let path = Self::path_under(root);
        if !path.exists() {
            tracing::debug!(path = %path.display(), "no config file; using defaults");
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(&path)?;
        let config = serde_yaml::from_str(&content)?;
        Ok(config)
    }

    /// Write the config under the given workspace root, creating the
    /// `config/` directory if needed.
    pub fn save(&self, root: &Path) -> Result<(), HuntctlError> {
        let path = Self::path_under(root);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let rendered = serde_yaml::to_string(self)?;
        std::fs::write(&path, rendered)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn defaults_when_file_absent() {
        let dir = TempDir::new().unwrap();
        let config = WorkspaceConfig::load(dir.path()).unwrap();
        assert_eq!(config.hunt_prefix, "H-");
        assert!(config.siem.provider.is_none());
    }

    #[test]
    fn save_then_load_roundtrip() {
        let dir = TempDir::new().unwrap();
        let mut config = WorkspaceConfig::default();
        config.default_hunter = Some("Analyst".to_string());
        config.siem.provider = Some("splunk".to_string());
        config.save(dir.path()).unwrap();

        let loaded = WorkspaceConfig::load(dir.path()).unwrap();
        assert_eq!(loaded.default_hunter.as_deref(), Some("Analyst"));
        assert_eq!(loaded.siem.provider.as_deref(), Some("splunk"));
        assert_eq!(loaded.hunt_prefix, "H-");
    }

    #[test]
    fn broken_config_is_an_error() {
        let dir = TempDir::new().unwrap();
        let path = WorkspaceConfig::path_under(dir.path());
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(&path, ": : definitely not yaml [").unwrap();

        assert!(WorkspaceConfig::load(dir.path()).is_err());
    }

    #[test]
    fn partial_config_fills_defaults() {
        let dir = TempDir::new().unwrap();
        let path = WorkspaceConfig::path_under(dir.path());
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(&path, "hunt_prefix: \"TH-\"\n").unwrap();

        let config = WorkspaceConfig::load(dir.path()).unwrap();
        assert_eq!(config.hunt_prefix, "TH-");
        assert!(config.edr.provider.is_none());
    }
}
