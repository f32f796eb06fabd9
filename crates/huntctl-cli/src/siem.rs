//! # Siem Subcommand
//!
//! Splunk connectivity check, index listing, and oneshot search.
//! Connection settings come from `SPLUNK_HOST` / `SPLUNK_TOKEN` (plus the
//! optional variables documented on [`SplunkConfig::from_env`]), so
//! credentials never live in the workspace tree.

use anyhow::{Context, Result};
use clap::{Args, Subcommand};

use huntctl_siem::{SearchRequest, SplunkClient, SplunkConfig};

/// Arguments for the `huntctl siem` subcommand.
#[derive(Args, Debug)]
pub struct SiemArgs {
    #[command(subcommand)]
    command: SiemCommand,
}

#[derive(Subcommand, Debug)]
enum SiemCommand {
    /// Verify connectivity and print server identity.
    Test,

    /// List indexes visible to the configured token.
    Indexes,

    /// Run a oneshot SPL search and print results as JSON lines.
    Search(SiemSearchArgs),
}

/// Arguments for `huntctl siem search`.
#[derive(Args, Debug)]
pub struct SiemSearchArgs {
    /// SPL query. Bare queries get `search ` prepended.
    #[arg(value_name = "QUERY")]
    pub query: String,

    /// Earliest event time.
    #[arg(long, default_value = "-24h")]
    pub earliest: String,

    /// Latest event time.
    #[arg(long, default_value = "now")]
    pub latest: String,

    /// Maximum number of results.
    #[arg(long, default_value_t = 100)]
    pub max_count: u32,
}

/// Execute the siem subcommand.
pub fn run_siem(args: &SiemArgs) -> Result<u8> {
    let config = SplunkConfig::from_env().context("SIEM configuration incomplete")?;
    let client = SplunkClient::new(config)?;

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("failed to start async runtime")?;

    match args.command {
        SiemCommand::Test => runtime.block_on(run_test(&client)),
        SiemCommand::Indexes => runtime.block_on(run_indexes(&client)),
        SiemCommand::Search(ref search) => runtime.block_on(run_search(&client, search)),
    }
}

async fn run_test(client: &SplunkClient) -> Result<u8> {
    let info = client.server_info().await?;
    println!(
        "Connected to {} (Splunk {} build {})",
        info.server_name, info.version, info.build
    );
    Ok(0)
}

async fn run_indexes(client: &SplunkClient) -> Result<u8> {
    let indexes = client.list_indexes().await?;
    if indexes.is_empty() {
        println!("No indexes visible to this token.");
        return Ok(0);
    }
    for index in &indexes {
        println!("{index}");
    }
    Ok(0)
}

async fn run_search(client: &SplunkClient, args: &SiemSearchArgs) -> Result<u8> {
    let request = SearchRequest {
        query: args.query.clone(),
        earliest: args.earliest.clone(),
        latest: args.latest.clone(),
        max_count: args.max_count,
    };

    let results = client.search(&request).await?;
    for row in &results.results {
        println!("{}", serde_json::Value::Object(row.clone()));
    }
    eprintln!("{} result(s)", results.results.len());
    Ok(0)
}
