use std::collections::HashMap;
use std::fs;
use std::path::Path;

use thiserror::Error;
use tracing::{debug, trace};

use crate::block::RawBlock;
use crate::parser::{parse_blocks, ParseOptions};
use crate::reconcile::result::{HostRecord, ParseResult};
use crate::scan::scan_lines;

/// Errors that can occur while acquiring a lease document.
#[derive(Debug, Error)]
pub enum ReadError {
    /// Failed to read the lease file.
    #[error("failed to read lease file: {0}")]
    Io(#[from] std::io::Error),
}

/// Parse a lease document with default options (UTC timestamps).
pub fn parse(document: &str) -> ParseResult {
    parse_with_options(document, &ParseOptions::default())
}

/// Parse a lease document with custom options.
pub fn parse_with_options(document: &str, opts: &ParseOptions) -> ParseResult {
    let scan = scan_lines(document);
    let blocks = parse_blocks(document, opts);

    let mut hosts = HostTable::default();
    for block in &blocks {
        hosts.fold(block);
    }

    debug!(
        total_blocks = scan.total_blocks,
        grammar_blocks = blocks.len(),
        parsed_blocks = hosts.parsed,
        hosts = hosts.records.len(),
        duplicates = scan.duplicate_addresses.len(),
        "parsed lease document"
    );

    ParseResult {
        hosts: hosts.records,
        total_blocks: scan.total_blocks,
        parsed_blocks: hosts.parsed,
        all_addresses: scan.all_addresses,
        duplicate_addresses: scan.duplicate_addresses,
    }
}

/// Read `path` and parse it. Invalid UTF-8 is replaced rather than rejected.
pub fn parse_file(path: &Path, opts: &ParseOptions) -> Result<ParseResult, ReadError> {
    let bytes = fs::read(path)?;
    Ok(parse_with_options(&String::from_utf8_lossy(&bytes), opts))
}

/// Ordered host records plus an address index into them.
#[derive(Debug, Default)]
struct HostTable {
    records: Vec<HostRecord>,
    index: HashMap<String, usize>,
    parsed: usize,
}

impl HostTable {
    /// Apply one block. Only active blocks count; a later one replaces the
    /// whole record for its address and keeps the record's position.
    fn fold(&mut self, block: &RawBlock) {
        if block.address.is_empty() || !block.is_active() {
            trace!(
                address = %block.address,
                state = ?block.binding_state,
                "ignoring inactive lease"
            );
            return;
        }

        let record = HostRecord::from_block(block);
        match self.index.get(&block.address) {
            Some(&slot) => {
                trace!(address = %block.address, "later lease supersedes earlier one");
                self.records[slot] = record;
            }
            None => {
                self.index.insert(block.address.clone(), self.records.len());
                self.records.push(record);
            }
        }
        self.parsed += 1;
    }
}
