//! Acctree CLI
//!
//! Loads one page of an account-summaries listing, builds the hierarchy
//! index, and answers lookups against it:
//! - `stats` / `tree` for the whole index
//! - `account`, `property`, `profile` by bare id (ancestors resolved)
//! - `lineage` for the full account → property → profile path of a profile

use std::io;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use acctree_index::{AccountSummaries, HierarchyIndex};
use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use tracing::info;
use tracing_subscriber::EnvFilter;

mod render;

use render::OutputFormat;

#[derive(Parser)]
#[command(name = "acctree")]
#[command(
    author,
    version,
    about = "Index account → property → profile listings and resolve entities by id"
)]
struct Cli {
    /// Account summaries JSON (`-` reads stdin)
    #[arg(short, long, env = "ACCTREE_INPUT", global = true, default_value = "-")]
    input: PathBuf,

    /// Output format
    #[arg(long, value_enum, env = "ACCTREE_FORMAT", global = true, default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Entity counts and listing metadata.
    Stats,
    /// Print the whole hierarchy.
    Tree,
    /// Look up an account by id.
    Account { id: String },
    /// Look up a property by id, with its owning account.
    Property { id: String },
    /// Look up a profile (view) by id, with its property and account.
    Profile { id: String },
    /// Print the account → property → profile path of a profile.
    Lineage { profile_id: String },
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("acctree=info,acctree_index=info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn load(input: &Path) -> Result<AccountSummaries> {
    if input.as_os_str() == "-" {
        return AccountSummaries::from_reader(io::stdin().lock())
            .context("failed to decode account summaries from stdin");
    }
    AccountSummaries::from_path(input)
        .with_context(|| format!("failed to load account summaries from {}", input.display()))
}

fn not_found(kind: &str, id: &str) -> ExitCode {
    eprintln!("{} {kind} `{id}`", "not found:".red().bold());
    ExitCode::FAILURE
}

fn main() -> Result<ExitCode> {
    init_tracing();
    let cli = Cli::parse();

    let page = load(&cli.input)?;
    let index = HierarchyIndex::build(&page);
    info!(input = %cli.input.display(), "index ready");

    let resolver = index.resolver();
    let format = cli.format;

    let output = match &cli.command {
        Commands::Stats => render::stats(&index, format)?,
        Commands::Tree => render::tree(&index, format)?,
        Commands::Account { id } => match resolver.account(id) {
            Some(account) => render::account(account, format)?,
            None => return Ok(not_found("account", id)),
        },
        Commands::Property { id } => match resolver.property(id) {
            Some(property) => render::property(&resolver, property, format)?,
            None => return Ok(not_found("property", id)),
        },
        Commands::Profile { id } => match resolver.profile(id) {
            Some(profile) => render::profile(&resolver, profile, format)?,
            None => return Ok(not_found("profile", id)),
        },
        Commands::Lineage { profile_id } => match resolver.lineage(profile_id) {
            Some(lineage) => render::lineage(&lineage, format)?,
            None => return Ok(not_found("profile", profile_id)),
        },
    };

    print!("{output}");
    if format == OutputFormat::Json {
        println!();
    }
    Ok(ExitCode::SUCCESS)
}
