use anyhow::{Context, Result};
use clap::Parser;
use leasectl::config::{resolve_settings, Overrides, Settings};
use leasectl::report::{render_blocks, render_stats};
use leases_core::{parse_blocks, parse_file, ParseResult};
use tracing::info;

mod check_cmd;
mod cli;
mod hosts_cmd;
mod logging;

use cli::{Cli, Command, OutputFormat, SourceArgs};

fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    match cli.command {
        Command::Hosts(args) => hosts_cmd::run_hosts(args),
        Command::Stats(args) => run_stats(args),
        Command::Blocks(args) => run_blocks(args),
        Command::Check(args) => check_cmd::run_check(args),
    }
}

pub(crate) fn settings_for(args: &SourceArgs) -> Result<Settings> {
    let overrides = Overrides {
        leases_file: args.file.clone(),
        utc_offset: args.utc_offset.clone(),
    };
    let settings = resolve_settings(args.config.as_deref(), &overrides)
        .context("failed to resolve settings")?;
    info!(
        file = %settings.leases_file.display(),
        offset = %settings.parse_options.utc_offset,
        source = %settings.source,
        "using settings"
    );
    Ok(settings)
}

pub(crate) fn load(args: &SourceArgs) -> Result<ParseResult> {
    let settings = settings_for(args)?;
    parse_file(&settings.leases_file, &settings.parse_options)
        .with_context(|| format!("failed to parse {}", settings.leases_file.display()))
}

fn run_stats(args: SourceArgs) -> Result<()> {
    let result = load(&args)?;
    match args.format {
        OutputFormat::Text => println!("{}", render_stats(&result)),
        OutputFormat::Json => println!(
            "{}",
            serde_json::to_string_pretty(&StatsReport::from(&result))?
        ),
    }
    Ok(())
}

fn run_blocks(args: SourceArgs) -> Result<()> {
    let settings = settings_for(&args)?;
    let bytes = std::fs::read(&settings.leases_file)
        .with_context(|| format!("failed to read {}", settings.leases_file.display()))?;
    let blocks = parse_blocks(&String::from_utf8_lossy(&bytes), &settings.parse_options);

    match args.format {
        OutputFormat::Text => println!("{}", render_blocks(&blocks)),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&blocks)?),
    }
    Ok(())
}

#[derive(Debug, serde::Serialize)]
struct StatsReport<'a> {
    total_blocks: usize,
    parsed_blocks: usize,
    unique_hosts: usize,
    all_addresses: &'a std::collections::BTreeSet<String>,
    duplicate_addresses: &'a std::collections::BTreeSet<String>,
}

impl<'a> From<&'a ParseResult> for StatsReport<'a> {
    fn from(result: &'a ParseResult) -> Self {
        Self {
            total_blocks: result.total_blocks,
            parsed_blocks: result.parsed_blocks,
            unique_hosts: result.hosts.len(),
            all_addresses: &result.all_addresses,
            duplicate_addresses: &result.duplicate_addresses,
        }
    }
}
