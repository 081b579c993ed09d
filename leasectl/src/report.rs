use colored::Colorize;
use leases_core::{format_summary, format_text, HostRecord, LeaseEnd, ParseResult, RawBlock};

/// Render active hosts for terminal output.
pub fn render_hosts(result: &ParseResult) -> String {
    if result.hosts.is_empty() {
        return "no active leases".dimmed().to_string();
    }
    let raw = format_text(result);
    raw.lines()
        .map(|line| match line.split_once(' ') {
            Some((ip, rest)) => format!("{} {rest}", ip.green()),
            None => line.to_string(),
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Render one host as an indented field list.
pub fn render_host_detail(host: &HostRecord) -> String {
    let field = |value: &str| {
        if value.is_empty() {
            "-".to_string()
        } else {
            value.to_string()
        }
    };
    let stamp = |(date, time): &(String, String)| field(format!("{date} {time}").trim());

    let mut out = Vec::new();
    out.push(host.ip_addr.green().bold().to_string());
    out.push(format!("  mac:      {}", field(&host.mac_addr)));
    out.push(format!("  hostname: {}", field(&host.client_hostname)));
    out.push(format!("  starts:   {}", stamp(&host.starts)));
    out.push(format!("  ends:     {}", stamp(&host.ends)));
    out.push(format!("  cltt:     {}", stamp(&host.cltt)));
    out.join("\n")
}

/// Render the counters the lease file produced.
pub fn render_stats(result: &ParseResult) -> String {
    let mut out = Vec::new();
    out.push(format!("Found {} lease entries in file", result.total_blocks));
    out.push(format!("Parsed {} active leases", result.parsed_blocks));
    out.push(format!("Found {} unique leases", result.hosts.len()));
    out.push(format!("Found {} distinct addresses", result.all_addresses.len()));
    out.push("duplicates".to_string());
    if result.duplicate_addresses.is_empty() {
        out.push("- none".to_string());
    } else {
        for addr in &result.duplicate_addresses {
            out.push(format!("- {}", addr.yellow()));
        }
    }
    out.push(String::new());
    out.push(format_summary(result).cyan().to_string());
    out.join("\n")
}

/// Render raw parsed blocks, one header line plus one line per directive.
pub fn render_blocks(blocks: &[RawBlock]) -> String {
    let mut out = Vec::new();
    for block in blocks {
        let state = block
            .binding_state
            .map(|s| s.as_str())
            .unwrap_or("none");
        let header = format!("lease {} [{state}]", block.address);
        out.push(if block.is_active() {
            header.green().to_string()
        } else {
            header.dimmed().to_string()
        });

        let mut push = |name: &str, value: String| out.push(format!("  {name} {value}"));
        if let Some(v) = &block.starts {
            push("starts", v.to_string());
        }
        if let Some(v) = &block.ends {
            push(
                "ends",
                match v {
                    LeaseEnd::At(at) => at.to_string(),
                    LeaseEnd::Never => "never".to_string(),
                },
            );
        }
        for (name, value) in [
            ("tstp", &block.tstp),
            ("tsfp", &block.tsfp),
            ("atsfp", &block.atsfp),
            ("cltt", &block.cltt),
        ] {
            if let Some(v) = value {
                push(name, v.to_string());
            }
        }
        if let Some(hw) = &block.hardware {
            push("hardware", format!("{} {}", hw.hw_type, hw.mac));
        }
        if let Some(uid) = &block.uid {
            push("uid", format!("\"{uid}\""));
        }
        if let Some(next) = block.next_binding_state {
            push("next binding state", next.to_string());
        }
        if let Some(name) = &block.client_hostname {
            push("client-hostname", format!("\"{name}\""));
        }
    }
    out.join("\n")
}
