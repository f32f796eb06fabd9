//! # huntctl CLI entry point
//!
//! Parses command-line arguments and dispatches to subcommand handlers.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use huntctl_cli::context::{run_context, ContextArgs};
use huntctl_cli::hunt::{run_hunt, HuntArgs};
use huntctl_cli::init::{run_init, InitArgs};
use huntctl_cli::siem::{run_siem, SiemArgs};

/// huntctl — threat hunt workspace manager
///
/// Scaffolds hunt workspaces, creates and validates LOCK-structured hunt
/// files, queries the catalog, exports context bundles, and runs searches
/// against a Splunk backend.
#[derive(Parser, Debug)]
#[command(name = "huntctl", version, about, long_about = None)]
struct Cli {
    /// Enable verbose output. Repeat for more verbosity (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Workspace root. Defaults to discovery from the current directory.
    #[arg(long, global = true)]
    workspace: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Scaffold a new hunt workspace.
    Init(InitArgs),

    /// Hunt file operations (new, list, validate, search, stats, coverage).
    Hunt(HuntArgs),

    /// Export a filtered context bundle as JSON, YAML, or Markdown.
    Context(ContextArgs),

    /// SIEM operations (connectivity test, index listing, search).
    Siem(SiemArgs),
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    // Initialize tracing based on verbosity level.
    let filter = match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();

    let cwd = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
    let workspace = cli.workspace.as_deref();

    let result = match cli.command {
        Commands::Init(args) => run_init(&args, &cwd),
        Commands::Hunt(args) => run_hunt(&args, workspace, &cwd),
        Commands::Context(args) => run_context(&args, workspace, &cwd),
        Commands::Siem(args) => run_siem(&args),
    };

    ExitCode::from(huntctl_cli::exit_code(result))
}
