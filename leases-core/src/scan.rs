use std::collections::BTreeSet;
use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

static LEASE_LINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"lease\s+(\d{1,3}\.\d{1,3}\.\d{1,3}\.\d{1,3})\s")
        .expect("lease line pattern is valid")
});

/// Counts from a line-oriented pass over the raw text.
///
/// The pass does not use the grammar, so malformed and inactive leases
/// are counted too.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct LineScan {
    /// Lines that mention `lease <ipv4>`.
    pub total_blocks: usize,
    pub all_addresses: BTreeSet<String>,
    /// Addresses mentioned on more than one line.
    pub duplicate_addresses: BTreeSet<String>,
}

/// Scan every line not starting with `#` for a `lease <ipv4>` header.
pub fn scan_lines(document: &str) -> LineScan {
    let mut scan = LineScan::default();

    for line in document.split_inclusive('\n') {
        if line.starts_with('#') {
            continue;
        }
        let Some(caps) = LEASE_LINE.captures(line) else {
            continue;
        };
        let address = &caps[1];
        scan.total_blocks += 1;
        if !scan.all_addresses.insert(address.to_string()) {
            scan.duplicate_addresses.insert(address.to_string());
        }
    }

    scan
}

#[cfg(test)]
mod tests {
    use super::scan_lines;

    #[test]
    fn counts_every_header_line() {
        let doc = "lease 10.0.0.1 {\n}\nlease 10.0.0.2 {\n}\nlease 10.0.0.1 {\n}\n";
        let scan = scan_lines(doc);
        assert_eq!(scan.total_blocks, 3);
        assert_eq!(scan.all_addresses.len(), 2);
        assert!(scan.duplicate_addresses.contains("10.0.0.1"));
        assert!(!scan.duplicate_addresses.contains("10.0.0.2"));
    }

    #[test]
    fn skips_comment_lines() {
        let doc = "# lease 10.0.0.1 {\nlease 10.0.0.1 {\n}\n";
        let scan = scan_lines(doc);
        assert_eq!(scan.total_blocks, 1);
        assert!(scan.duplicate_addresses.is_empty());
    }

    #[test]
    fn counts_malformed_headers() {
        let doc = "lease 10.0.0.9 missing brace\nlease 10.0.0.9 {\n";
        let scan = scan_lines(doc);
        assert_eq!(scan.total_blocks, 2);
        assert!(scan.duplicate_addresses.contains("10.0.0.9"));
    }

    #[test]
    fn requires_whitespace_after_address() {
        assert_eq!(scan_lines("lease 10.0.0.1").total_blocks, 0);
        assert_eq!(scan_lines("lease 10.0.0.1\n").total_blocks, 1);
    }
}
