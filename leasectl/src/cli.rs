use std::path::PathBuf;

use clap::{Args, Parser, ValueEnum};

#[derive(Parser, Debug)]
#[command(name = "leasectl")]
#[command(about = "Inspect active leases in ISC dhcpd.leases files")]
pub struct Cli {
    /// Log parser decisions to stderr (RUST_LOG overrides).
    #[arg(short, long, global = true)]
    pub verbose: bool,
    #[command(subcommand)]
    pub command: Command,
}

#[derive(clap::Subcommand, Debug)]
pub enum Command {
    /// List active hosts, one per address, latest lease wins.
    Hosts(HostsArgs),
    /// Show entry counts and duplicate addresses.
    Stats(SourceArgs),
    /// Dump every lease block the grammar accepted, active or not.
    Blocks(SourceArgs),
    /// Fail when the lease file contains duplicate entries.
    Check(CheckArgs),
}

/// Where to read leases from and how to render them.
#[derive(Args, Debug)]
pub struct SourceArgs {
    /// Lease file. Defaults to the configured path (/var/lib/dhcp/dhcpd.leases).
    pub file: Option<PathBuf>,
    /// Optional settings TOML file (leases_file, utc_offset).
    #[arg(long)]
    pub config: Option<PathBuf>,
    /// Fixed offset applied to lease timestamps, e.g. -05:00 or +01:00.
    #[arg(long, allow_hyphen_values = true)]
    pub utc_offset: Option<String>,
    /// Output format.
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
}

#[derive(Args, Debug)]
pub struct HostsArgs {
    #[command(flatten)]
    pub source: SourceArgs,
    /// Show only the host holding this address.
    #[arg(long)]
    pub ip: Option<String>,
}

#[derive(Args, Debug)]
pub struct CheckArgs {
    #[command(flatten)]
    pub source: SourceArgs,
    /// Also fail when some entries did not yield an active lease.
    #[arg(long)]
    pub strict: bool,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}
