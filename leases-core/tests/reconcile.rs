use std::path::PathBuf;

use chrono::FixedOffset;
use leases_core::{
    format_json, format_summary, parse, parse_file, parse_with_options, HostRecord, ParseOptions,
};
use pretty_assertions::assert_eq;

fn fixture(path: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("..")
        .join(path)
}

fn pair(date: &str, time: &str) -> (String, String) {
    (date.to_string(), time.to_string())
}

#[test]
fn reconciles_real_world_file() {
    let result =
        parse_file(&fixture("fixtures/dhcpd.leases"), &ParseOptions::default()).expect("parse");

    let ips: Vec<&str> = result.hosts.iter().map(|h| h.ip_addr.as_str()).collect();
    assert_eq!(ips, vec!["192.168.10.20", "192.168.10.22", "192.168.10.23"]);
    assert_eq!(result.total_blocks, 7);
    assert_eq!(result.parsed_blocks, 4);
    assert_eq!(result.all_addresses.len(), 5);
    assert_eq!(
        result.duplicate_addresses.iter().collect::<Vec<_>>(),
        vec!["192.168.10.20", "192.168.10.21"]
    );
    assert!(result.parsed_blocks <= result.total_blocks);
}

#[test]
fn superseding_block_replaces_without_merging() {
    let result =
        parse_file(&fixture("fixtures/dhcpd.leases"), &ParseOptions::default()).expect("parse");

    assert_eq!(
        result.host_by_ip("192.168.10.20"),
        Some(&HostRecord {
            ip_addr: "192.168.10.20".to_string(),
            mac_addr: "00:1a:2b:3c:4d:5e".to_string(),
            client_hostname: String::new(),
            starts: pair("2015/01/08", "09:12:45"),
            ends: pair("2015/01/08", "21:12:45"),
            cltt: pair("2015/01/08", "09:12:45"),
        })
    );
}

#[test]
fn misspelled_hardware_leaves_mac_empty() {
    let result =
        parse_file(&fixture("fixtures/dhcpd.leases"), &ParseOptions::default()).expect("parse");
    let host = result.host_by_ip("192.168.10.23").expect("host");
    assert_eq!(host.mac_addr, "");
    assert_eq!(host.client_hostname, "printer");
}

#[test]
fn inactive_and_unclosed_blocks_do_not_produce_hosts() {
    let result =
        parse_file(&fixture("fixtures/dhcpd.leases"), &ParseOptions::default()).expect("parse");
    assert!(result.host_by_ip("192.168.10.21").is_none());
    assert!(result.host_by_ip("192.168.10.24").is_none());
}

#[test]
fn last_write_wins_for_hostname() {
    let doc = "\
lease 10.0.0.5 {
  binding state active;
  client-hostname \"alice\";
}
lease 10.0.0.5 {
  binding state active;
  client-hostname \"bob\";
}
";
    let result = parse(doc);
    assert_eq!(result.hosts.len(), 1);
    assert_eq!(result.hosts[0].client_hostname, "bob");
    assert_eq!(result.parsed_blocks, 2);
    assert!(result.duplicate_addresses.contains("10.0.0.5"));
}

#[test]
fn local_time_crosses_midnight() {
    let opts = ParseOptions {
        utc_offset: FixedOffset::west_opt(5 * 3600).expect("offset"),
    };
    let doc = "lease 10.0.0.1 {\n  binding state active;\n  cltt 3 2015/01/07 03:00:00;\n}\n";
    let result = parse_with_options(doc, &opts);
    assert_eq!(result.hosts[0].cltt, pair("2015/01/06", "22:00:00"));
}

#[test]
fn identical_input_gives_identical_result() {
    let text = std::fs::read_to_string(fixture("fixtures/dhcpd.leases")).expect("read fixture");
    let first = parse(&text);
    let second = parse(&text);
    assert_eq!(first, second);
    assert_eq!(format_summary(&first), format_summary(&second));
}

#[test]
fn json_output_uses_string_pairs() {
    let result =
        parse_file(&fixture("fixtures/clean.leases"), &ParseOptions::default()).expect("parse");
    let json: serde_json::Value = serde_json::from_str(&format_json(&result)).expect("json");

    assert_eq!(json["total_blocks"], 2);
    assert_eq!(json["hosts"][1]["ends"], serde_json::json!(["never", ""]));
    assert_eq!(json["hosts"][0]["client_hostname"], "alpha");
    assert_eq!(json["hosts"][1]["client_hostname"], "");
}
