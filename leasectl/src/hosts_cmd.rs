use anyhow::{Context, Result};
use leasectl::report::{render_host_detail, render_hosts};

use crate::cli::{HostsArgs, OutputFormat};

pub fn run_hosts(args: HostsArgs) -> Result<()> {
    let result = crate::load(&args.source)?;

    if let Some(ip) = &args.ip {
        let host = result
            .host_by_ip(ip)
            .with_context(|| format!("no active lease for {ip}"))?;
        match args.source.format {
            OutputFormat::Text => println!("{}", render_host_detail(host)),
            OutputFormat::Json => println!("{}", serde_json::to_string_pretty(host)?),
        }
        return Ok(());
    }

    match args.source.format {
        OutputFormat::Text => println!("{}", render_hosts(&result)),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&result.hosts)?),
    }
    Ok(())
}
