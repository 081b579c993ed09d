use std::path::PathBuf;

use chrono::FixedOffset;
use leases_core::{parse_blocks, parse_file, BindingState, LeaseEnd, ParseOptions, ReadError};

fn fixture(path: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("..")
        .join(path)
}

fn eastern() -> ParseOptions {
    ParseOptions {
        utc_offset: FixedOffset::west_opt(5 * 3600).expect("offset"),
    }
}

#[test]
fn extracts_closed_blocks_from_real_world_file() {
    let text = std::fs::read_to_string(fixture("fixtures/dhcpd.leases")).expect("read fixture");
    let blocks = parse_blocks(&text, &ParseOptions::default());

    let addresses: Vec<&str> = blocks.iter().map(|b| b.address.as_str()).collect();
    assert_eq!(
        addresses,
        vec![
            "192.168.10.20",
            "192.168.10.21",
            "192.168.10.22",
            "192.168.10.20",
            "192.168.10.23",
            "192.168.10.24",
        ]
    );
    assert_eq!(blocks[1].binding_state, Some(BindingState::Free));
    assert_eq!(blocks[5].binding_state, Some(BindingState::Abandoned));
    assert!(blocks[1].tstp.is_some());
    assert!(blocks[4].hardware.is_none());
}

#[test]
fn converts_timestamps_with_configured_offset() {
    let text = std::fs::read_to_string(fixture("fixtures/dhcpd.leases")).expect("read fixture");
    let blocks = parse_blocks(&text, &eastern());

    let starts = blocks[2].starts.as_ref().expect("starts");
    assert_eq!(starts.local_pair(), ("2015/01/07".into(), "21:30:00".into()));
    assert_eq!(starts.weekday(), 4);
    match blocks[2].ends.as_ref().expect("ends") {
        LeaseEnd::At(value) => assert_eq!(value.local_time(), "09:30:00"),
        LeaseEnd::Never => panic!("expected a timestamp"),
    }
}

#[test]
fn parse_file_reports_missing_input() {
    let err = parse_file(&fixture("fixtures/does-not-exist.leases"), &ParseOptions::default())
        .expect_err("missing file should fail");
    assert!(matches!(err, ReadError::Io(_)));
}

#[test]
fn parse_file_tolerates_invalid_utf8() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("latin1.leases");
    let mut bytes = b"lease 10.2.0.1 {\n  binding state active;\n  client-hostname \"caf".to_vec();
    bytes.extend_from_slice(&[0xe9]);
    bytes.extend_from_slice(b"\";\n}\n");
    std::fs::write(&path, bytes).expect("write");

    let result = parse_file(&path, &ParseOptions::default()).expect("parse");
    assert_eq!(result.hosts.len(), 1);
    assert_eq!(result.hosts[0].client_hostname, "caf\u{fffd}");
}
