//! # Hunt Subcommand
//!
//! Hunt file lifecycle: creation from the LOCK template, catalog listing
//! and search, statistics, ATT&CK coverage, and validation.
//!
//! Validation exit codes: 0 when everything passes, 1 on validation
//! failures, 2 when a named file cannot be read at all.

use std::path::{Path, PathBuf};

use anyhow::Result;
use clap::{Args, Subcommand};

use huntctl_parser::HuntDocument;
use huntctl_workspace::{create_hunt, Catalog, HuntFilter, HuntSpec};

use crate::require_workspace;

/// Arguments for the `huntctl hunt` subcommand.
#[derive(Args, Debug)]
pub struct HuntArgs {
    #[command(subcommand)]
    command: HuntCommand,
}

#[derive(Subcommand, Debug)]
enum HuntCommand {
    /// Create a new hunt file with the next free identifier.
    New(NewArgs),

    /// List hunts in the catalog.
    List(ListArgs),

    /// Validate one hunt file, or every hunt in the catalog.
    Validate(ValidateArgs),

    /// Case-insensitive search over titles, tags, techniques, and body text.
    Search(SearchArgs),

    /// Catalog statistics.
    Stats,

    /// Map ATT&CK techniques to the hunts that exercise them.
    Coverage,
}

/// Arguments for `huntctl hunt new`.
#[derive(Args, Debug)]
pub struct NewArgs {
    /// Hunt title.
    #[arg(long)]
    pub title: String,

    /// Analyst name. Falls back to `default_hunter` from the config.
    #[arg(long)]
    pub hunter: Option<String>,

    /// ATT&CK technique ID. Repeatable.
    #[arg(long = "technique", value_name = "ID")]
    pub techniques: Vec<String>,

    /// ATT&CK tactic. Repeatable.
    #[arg(long = "tactic", value_name = "NAME")]
    pub tactics: Vec<String>,

    /// Target platform. Repeatable.
    #[arg(long = "platform", value_name = "NAME")]
    pub platforms: Vec<String>,

    /// Telemetry source. Repeatable.
    #[arg(long = "data-source", value_name = "NAME")]
    pub data_sources: Vec<String>,

    /// Free-form tag. Repeatable.
    #[arg(long = "tag", value_name = "NAME")]
    pub tags: Vec<String>,

    /// Hunt hypothesis for the LEARN section.
    #[arg(long)]
    pub hypothesis: Option<String>,

    /// Motivating threat context for the LEARN section.
    #[arg(long = "threat-context")]
    pub threat_context: Option<String>,

    /// ABLE: the actor of interest.
    #[arg(long)]
    pub actor: Option<String>,

    /// ABLE: the observable behavior.
    #[arg(long)]
    pub behavior: Option<String>,

    /// ABLE: where in the environment to look.
    #[arg(long)]
    pub location: Option<String>,

    /// ABLE: the evidence that would show the behavior.
    #[arg(long)]
    pub evidence: Option<String>,
}

/// Output format for `hunt list`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum ListFormat {
    /// Aligned text table.
    #[default]
    Table,
    /// JSON array of hunt summaries.
    Json,
}

/// Arguments for `huntctl hunt list`.
#[derive(Args, Debug, Default)]
pub struct ListArgs {
    /// Filter by status (case-insensitive).
    #[arg(long)]
    pub status: Option<String>,

    /// Filter by ATT&CK technique ID.
    #[arg(long)]
    pub technique: Option<String>,

    /// Filter by tactic (case-insensitive).
    #[arg(long)]
    pub tactic: Option<String>,

    /// Filter by platform (case-insensitive).
    #[arg(long)]
    pub platform: Option<String>,

    /// Output format.
    #[arg(long, value_enum, default_value_t = ListFormat::Table)]
    pub output: ListFormat,
}

/// Arguments for `huntctl hunt validate`.
#[derive(Args, Debug)]
pub struct ValidateArgs {
    /// Hunt identifier (e.g. `H-0001`) or file path. Omit to validate the
    /// whole catalog.
    #[arg(value_name = "ID_OR_PATH")]
    pub target: Option<String>,
}

/// Arguments for `huntctl hunt search`.
#[derive(Args, Debug)]
pub struct SearchArgs {
    /// Search term.
    #[arg(value_name = "TERM")]
    pub term: String,
}

/// Execute the hunt subcommand.
pub fn run_hunt(args: &HuntArgs, workspace: Option<&Path>, cwd: &Path) -> Result<u8> {
    let ws = require_workspace(workspace, cwd)?;
    match args.command {
        HuntCommand::New(ref new_args) => run_new(new_args, &ws),
        HuntCommand::List(ref list_args) => run_list(list_args, &ws),
        HuntCommand::Validate(ref validate_args) => run_validate(validate_args, &ws),
        HuntCommand::Search(ref search_args) => run_search(search_args, &ws),
        HuntCommand::Stats => run_stats(&ws),
        HuntCommand::Coverage => run_coverage(&ws),
    }
}

fn run_new(args: &NewArgs, ws: &huntctl_workspace::Workspace) -> Result<u8> {
    let config = ws.config()?;
    let spec = HuntSpec {
        title: args.title.clone(),
        hunter: args.hunter.clone().or(config.default_hunter),
        techniques: args.techniques.clone(),
        tactics: args.tactics.clone(),
        platforms: args.platforms.clone(),
        data_sources: args.data_sources.clone(),
        tags: args.tags.clone(),
        hypothesis: args.hypothesis.clone(),
        threat_context: args.threat_context.clone(),
        actor: args.actor.clone(),
        behavior: args.behavior.clone(),
        location: args.location.clone(),
        evidence: args.evidence.clone(),
    };

    let date = chrono::Local::now().date_naive();
    let (hunt_id, path) = create_hunt(ws, &spec, date)?;

    println!("Created {}: {}", hunt_id, path.display());
    Ok(0)
}

fn run_list(args: &ListArgs, ws: &huntctl_workspace::Workspace) -> Result<u8> {
    let filter = HuntFilter {
        status: args.status.clone(),
        technique: args.technique.clone(),
        tactic: args.tactic.clone(),
        platform: args.platform.clone(),
    };
    let hunts = Catalog::new(ws).list(&filter)?;

    if args.output == ListFormat::Json {
        println!("{}", serde_json::to_string_pretty(&hunts)?);
        return Ok(0);
    }

    if hunts.is_empty() {
        println!("No hunts found.");
        return Ok(0);
    }

    println!("{:<8} {:<12} {:<12} TITLE", "ID", "STATUS", "DATE");
    for hunt in &hunts {
        println!(
            "{:<8} {:<12} {:<12} {}",
            hunt.hunt_id, hunt.status, hunt.date, hunt.title
        );
    }
    println!("\n{} hunt(s)", hunts.len());
    Ok(0)
}

fn run_validate(args: &ValidateArgs, ws: &huntctl_workspace::Workspace) -> Result<u8> {
    if let Some(ref target) = args.target {
        let resolved = match resolve_validate_target(target, ws)? {
            Some(path) => path,
            None => {
                eprintln!("ERROR: unsafe hunt identifier: {target}");
                return Ok(2);
            }
        };
        let doc = match HuntDocument::parse_file(&resolved) {
            Ok(doc) => doc,
            Err(e) => {
                eprintln!("ERROR: cannot read {}: {e}", resolved.display());
                return Ok(2);
            }
        };

        let report = doc.validate();
        if report.is_valid() {
            println!("OK: {}", resolved.display());
            return Ok(0);
        }
        println!("FAIL: {}", resolved.display());
        for error in &report.errors {
            println!("  - {error}");
        }
        return Ok(1);
    }

    let summary = Catalog::new(ws).validate_all()?;
    println!("Hunts: {}/{} passed", summary.passed, summary.total);
    for (path, errors) in &summary.failures {
        let rel = path.strip_prefix(ws.root()).unwrap_or(path);
        println!("  FAIL: {}", rel.display());
        for error in errors {
            println!("    - {error}");
        }
    }

    if summary.all_passed() {
        Ok(0)
    } else {
        Ok(1)
    }
}

/// Resolve a validate target to a file path.
///
/// A bare hunt identifier is turned into a path under `hunts/` through
/// `safe_join`, so a crafted identifier never escapes the workspace.
/// Anything else is treated as a file path. Returns `None` when an
/// identifier-shaped target fails containment.
fn resolve_validate_target(
    target: &str,
    ws: &huntctl_workspace::Workspace,
) -> Result<Option<PathBuf>> {
    if huntctl_core::validate_record_id(huntctl_core::RecordKind::Hunt, target) {
        return Ok(huntctl_core::safe_join(&ws.hunts_dir(), target, ".md")?);
    }
    Ok(Some(crate::resolve_path(Path::new(target), ws.root())))
}

fn run_search(args: &SearchArgs, ws: &huntctl_workspace::Workspace) -> Result<u8> {
    let hits = Catalog::new(ws).search(&args.term)?;
    if hits.is_empty() {
        println!("No hunts match \"{}\".", args.term);
        return Ok(0);
    }
    for hunt in &hits {
        println!("{:<8} {}", hunt.hunt_id, hunt.title);
    }
    Ok(0)
}

fn run_stats(ws: &huntctl_workspace::Workspace) -> Result<u8> {
    let stats = Catalog::new(ws).stats()?;
    println!("Total hunts: {}", stats.total);

    if !stats.by_status.is_empty() {
        println!("\nBy status:");
        for (status, count) in &stats.by_status {
            println!("  {status:<12} {count}");
        }
    }

    println!("\nDistinct techniques: {}", stats.techniques.len());
    println!("Distinct tactics:    {}", stats.tactics.len());
    Ok(0)
}

fn run_coverage(ws: &huntctl_workspace::Workspace) -> Result<u8> {
    let coverage = Catalog::new(ws).coverage()?;
    if coverage.is_empty() {
        println!("No technique coverage recorded.");
        return Ok(0);
    }
    for (technique, hunts) in &coverage {
        println!("{:<12} {}", technique, hunts.join(", "));
    }
    Ok(0)
}
