//! Parsing and reconciliation primitives for ISC `dhcpd.leases` databases.

pub mod block;
pub mod datetime;
pub mod format;
pub mod lexer;
pub mod parser;
pub mod reconcile;
pub mod scan;

pub use block::{BindingState, Hardware, LeaseEnd, LeaseStatement, RawBlock};
pub use datetime::DateTimeValue;
pub use format::{format_json, format_summary, format_text};
pub use lexer::{tokenize, Token, TokenKind};
pub use parser::{parse_blocks, ParseOptions};
pub use reconcile::{
    parse, parse_file, parse_with_options, HostRecord, ParseResult, ReadError, Stamp,
};
pub use scan::{scan_lines, LineScan};
