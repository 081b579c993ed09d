//! Folding raw lease blocks into one host record per address.

pub mod engine;
pub mod result;

pub use engine::{parse, parse_file, parse_with_options, ReadError};
pub use result::{HostRecord, ParseResult, Stamp};
