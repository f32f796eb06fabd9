//! # Init Subcommand
//!
//! Scaffolds the workspace directory tree, default config, hunt template,
//! and environment skeleton. Safe to re-run on an existing workspace.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Args;

use huntctl_workspace::Workspace;

/// Arguments for the `huntctl init` subcommand.
#[derive(Args, Debug)]
pub struct InitArgs {
    /// Directory to initialize. Defaults to the current directory.
    #[arg(value_name = "PATH")]
    pub path: Option<PathBuf>,
}

/// Execute the init subcommand.
pub fn run_init(args: &InitArgs, cwd: &Path) -> Result<u8> {
    let root = match args.path {
        Some(ref path) if path.is_absolute() => path.clone(),
        Some(ref path) => cwd.join(path),
        None => cwd.to_path_buf(),
    };

    let workspace = Workspace::new(&root);
    workspace
        .init()
        .with_context(|| format!("failed to initialize workspace at {}", root.display()))?;

    println!("Initialized hunt workspace at {}", root.display());
    println!("  hunts/       hunt files (H-NNNN.md)");
    println!("  templates/   HUNT_LOCK.md template");
    println!("  knowledge/   environment notes");
    println!("  config/      .huntctl.yaml");
    Ok(0)
}
