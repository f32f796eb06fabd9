//! # Context Subcommand
//!
//! Exports a filtered bundle of hunts, the hunt index, and environment
//! notes for consumption by external tooling.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Args, ValueEnum};

use huntctl_workspace::{ContextBundle, ContextFilter, ContextFormat};

use crate::require_workspace;

/// Output format flag values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum FormatArg {
    /// Pretty-printed JSON.
    Json,
    /// YAML.
    Yaml,
    /// Human-readable Markdown.
    Markdown,
}

impl From<FormatArg> for ContextFormat {
    fn from(value: FormatArg) -> Self {
        match value {
            FormatArg::Json => ContextFormat::Json,
            FormatArg::Yaml => ContextFormat::Yaml,
            FormatArg::Markdown => ContextFormat::Markdown,
        }
    }
}

/// Arguments for the `huntctl context` subcommand.
#[derive(Args, Debug)]
pub struct ContextArgs {
    /// Export a single hunt by identifier.
    #[arg(long, value_name = "ID")]
    pub hunt: Option<String>,

    /// Export hunts matching a tactic.
    #[arg(long, value_name = "NAME")]
    pub tactic: Option<String>,

    /// Export hunts matching a platform.
    #[arg(long, value_name = "NAME")]
    pub platform: Option<String>,

    /// Export the entire catalog. Cannot be combined with other filters.
    #[arg(long)]
    pub full: bool,

    /// Output format.
    #[arg(long, value_enum, default_value_t = FormatArg::Json)]
    pub format: FormatArg,

    /// Write to a file instead of stdout.
    #[arg(long, value_name = "PATH")]
    pub output: Option<PathBuf>,
}

/// Execute the context subcommand.
pub fn run_context(args: &ContextArgs, workspace: Option<&Path>, cwd: &Path) -> Result<u8> {
    let ws = require_workspace(workspace, cwd)?;

    let filter = ContextFilter {
        hunt: args.hunt.clone(),
        tactic: args.tactic.clone(),
        platform: args.platform.clone(),
        full: args.full,
    };

    let bundle = ContextBundle::build(&ws, &filter)?;
    let rendered = bundle.render(args.format.into())?;

    match args.output {
        Some(ref path) => {
            std::fs::write(path, &rendered)
                .with_context(|| format!("failed to write {}", path.display()))?;
            println!("Wrote context export to {}", path.display());
        }
        None => print!("{rendered}"),
    }
    Ok(0)
}
