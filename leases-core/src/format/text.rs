use crate::reconcile::result::{HostRecord, ParseResult, Stamp};

/// Format active hosts as plain text, one line per host.
pub fn format_text(result: &ParseResult) -> String {
    let mut lines = Vec::with_capacity(result.hosts.len());
    for host in &result.hosts {
        lines.push(format_host(host));
    }
    lines.join("\n")
}

/// Format the parse counters and duplicate addresses.
pub fn format_summary(result: &ParseResult) -> String {
    let duplicates: Vec<&str> = result
        .duplicate_addresses
        .iter()
        .map(String::as_str)
        .collect();
    format!(
        "entries={} parsed={} hosts={} duplicates={}",
        result.total_blocks,
        result.parsed_blocks,
        result.hosts.len(),
        if duplicates.is_empty() {
            "none".to_string()
        } else {
            duplicates.join(",")
        }
    )
}

fn format_host(host: &HostRecord) -> String {
    format!(
        "{} mac={} hostname={} starts={} ends={} cltt={}",
        host.ip_addr,
        or_dash(&host.mac_addr),
        or_dash(&host.client_hostname),
        format_stamp(&host.starts),
        format_stamp(&host.ends),
        format_stamp(&host.cltt),
    )
}

fn format_stamp((date, time): &Stamp) -> String {
    match (date.is_empty(), time.is_empty()) {
        (true, true) => "-".to_string(),
        (false, true) => date.clone(),
        _ => format!("{date}T{time}"),
    }
}

fn or_dash(value: &str) -> &str {
    if value.is_empty() {
        "-"
    } else {
        value
    }
}
