//! Hunt file creation: sequential ID allocation and LOCK template
//! rendering.

use std::path::PathBuf;

use chrono::NaiveDate;
use serde::Serialize;

use huntctl_core::{safe_join, HuntId, HuntctlError};

use crate::layout::Workspace;

/// The blank hunt template written to `templates/HUNT_LOCK.md` at init.
pub const HUNT_LOCK_TEMPLATE: &str = "\
---
hunt_id: H-0000
title: \"[Hunt title]\"
status: planning
date: 1970-01-01
hunter: \"[Your name]\"
techniques: []
tactics: []
platform: []
data_sources: []
tags: []
---

# H-0000: [Hunt title]

## LEARN: Prepare the Hunt

### Hypothesis

[What behavior are you looking for? What would confirm or deny it?]

### Threat Context

[What threat actor/malware/TTP motivates this hunt?]

### ABLE Framework

- **Actor**: [Threat actor or malware family]
- **Behavior**: [Specific observable behavior]
- **Location**: [Where in the environment to look]
- **Evidence**: [Data sources and events that would show it]

## OBSERVE: Expected Behaviors

[What does this behavior look like in your telemetry?]

## CHECK: Execute & Analyze

[Queries run, scope, time range, and analysis of results.]

## KEEP: Findings & Response

[Findings, escalations, detections created, lessons learned.]
";

/// Input for creating a new hunt file. All list fields may be empty;
/// narrative fields fall back to template placeholders.
#[derive(Debug, Clone, Default)]
pub struct HuntSpec {
    /// Hunt title (required by the schema).
    pub title: String,
    /// Analyst name for the `hunter` frontmatter field.
    pub hunter: Option<String>,
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
    /// Hunt hypothesis for the LEARN section.
    pub hypothesis: Option<String>,
    /// Motivating threat context for the LEARN section.
    pub threat_context: Option<String>,
    /// ABLE: the actor of interest.
    pub actor: Option<String>,
    /// ABLE: the observable behavior.
    pub behavior: Option<String>,
    /// ABLE: where in the environment to look.
    pub location: Option<String>,
    /// ABLE: the evidence that would show the behavior.
    pub evidence: Option<String>,
}

/// Frontmatter written into new hunt files. Field order here is the
/// order in the rendered YAML.
#[derive(Debug, Serialize)]
struct HuntFrontmatter<'a> {
    hunt_id: &'a str,
    title: &'a str,
    status: &'a str,
    date: String,
    hunter: &'a str,
    techniques: &'a [String],
    tactics: &'a [String],
    platform: &'a [String],
    data_sources: &'a [String],
    tags: &'a [String],
}

/// Allocate the next hunt identifier by scanning existing hunt files.
///
/// The highest `{prefix}NNNN` found is incremented; an empty directory
/// yields `{prefix}0001`. Files whose names do not parse as hunt
/// identifiers are ignored.
///
/// # Errors
///
/// Fails if the directory cannot be read or the 4-digit identifier space
/// is exhausted.
pub fn next_hunt_id(workspace: &Workspace, prefix: &str) -> Result<HuntId, HuntctlError> {
    let hunts_dir = workspace.hunts_dir();
    let mut highest: u32 = 0;

    if hunts_dir.is_dir() {
        for entry in std::fs::read_dir(&hunts_dir)? {
            let entry = entry?;
            let name = entry.file_name();
            let Some(stem) = name.to_str().and_then(|n| n.strip_suffix(".md")) else {
                continue;
            };
            let Some(digits) = stem.strip_prefix(prefix) else {
                continue;
            };
            if HuntId::new(stem).is_ok() {
                if let Ok(n) = digits.parse::<u32>() {
                    highest = highest.max(n);
                }
            }
        }
    }

    let next = highest + 1;
    if next > 9999 {
        return Err(HuntctlError::Config(format!(
            "hunt identifier space exhausted for prefix \"{prefix}\""
        )));
    }

    Ok(HuntId::new(format!("{prefix}{next:04}"))?)
}

/// Render a complete hunt document for the given identifier and spec.
pub fn render_hunt(hunt_id: &HuntId, spec: &HuntSpec, date: NaiveDate) -> Result<String, HuntctlError> {
    let frontmatter = HuntFrontmatter {
        hunt_id: hunt_id.as_str(),
        title: &spec.title,
        status: "planning",
        date: date.format("%Y-%m-%d").to_string(),
        hunter: spec.hunter.as_deref().unwrap_or("unassigned"),
        techniques: &spec.techniques,
        tactics: &spec.tactics,
        platform: &spec.platforms,
        data_sources: &spec.data_sources,
        tags: &spec.tags,
    };
    let yaml = serde_yaml::to_string(&frontmatter)?;

    let placeholder = |value: &Option<String>, fallback: &str| -> String {
        value.clone().unwrap_or_else(|| fallback.to_string())
    };

    let body = format!(
        "# {id}: {title}\n\n\
## LEARN: Prepare the Hunt\n\n\
### Hypothesis\n\n{hypothesis}\n\n\
### Threat Context\n\n{threat_context}\n\n\
### ABLE Framework\n\n\
- **Actor**: {actor}\n\
- **Behavior**: {behavior}\n\
- **Location**: {location}\n\
- **Evidence**: {evidence}\n\n\
## OBSERVE: Expected Behaviors\n\n\
[What does this behavior look like in your telemetry?]\n\n\
## CHECK: Execute & Analyze\n\n\
[Queries run, scope, time range, and analysis of results.]\n\n\
## KEEP: Findings & Response\n\n\
[Findings, escalations, detections created, lessons learned.]\n",
        id = hunt_id,
        title = spec.title,
        hypothesis = placeholder(
            &spec.hypothesis,
            "[What behavior are you looking for? What would confirm or deny it?]"
        ),
        threat_context = placeholder(
            &spec.threat_context,
            "[What threat actor/malware/TTP motivates this hunt?]"
        ),
        actor = placeholder(&spec.actor, "[Threat actor or malware family]"),
        behavior = placeholder(&spec.behavior, "[Specific observable behavior]"),
        location = placeholder(&spec.location, "[Where in the environment to look]"),
        evidence = placeholder(&spec.evidence, "[Data sources and events that would show it]"),
    );

    Ok(format!("---\n{yaml}---\n\n{body}"))
}

/// Create a new hunt file in the workspace.
///
/// Allocates the next identifier, renders the LOCK template, and writes
/// the file at a path constructed through `safe_join`.
///
/// # Errors
///
/// Fails on I/O problems, identifier exhaustion, or when the derived
/// path fails containment checks.
pub fn create_hunt(
    workspace: &Workspace,
    spec: &HuntSpec,
    date: NaiveDate,
) -> Result<(HuntId, PathBuf), HuntctlError> {
    let config = workspace.config()?;
    let hunt_id = next_hunt_id(workspace, &config.hunt_prefix)?;

    let hunts_dir = workspace.hunts_dir();
    std::fs::create_dir_all(&hunts_dir)?;

    let path = safe_join(&hunts_dir, hunt_id.as_str(), ".md")?
        .ok_or_else(|| HuntctlError::UnsafePath(hunt_id.as_str().to_string()))?;

    let content = render_hunt(&hunt_id, spec, date)?;
    std::fs::write(&path, content)?;
    tracing::info!(hunt_id = %hunt_id, path = %path.display(), "created hunt");

    Ok((hunt_id, path))
}
