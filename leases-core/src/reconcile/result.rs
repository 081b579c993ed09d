use std::collections::BTreeSet;

use serde::Serialize;

use crate::block::{LeaseEnd, RawBlock};
use crate::datetime::DateTimeValue;

/// `(local_date, local_time)`; both empty when the directive was absent.
pub type Stamp = (String, String);

/// The current lease for one address.
///
/// String fields use `""` for "absent", never `None`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct HostRecord {
    pub ip_addr: String,
    pub mac_addr: String,
    pub client_hostname: String,
    pub starts: Stamp,
    pub ends: Stamp,
    pub cltt: Stamp,
}

impl HostRecord {
    /// Build a record from the block that currently governs its address.
    pub fn from_block(block: &RawBlock) -> Self {
        Self {
            ip_addr: block.address.clone(),
            mac_addr: block
                .hardware
                .as_ref()
                .map(|hw| hw.mac.clone())
                .unwrap_or_default(),
            client_hostname: block.client_hostname.clone().unwrap_or_default(),
            starts: stamp(block.starts.as_ref()),
            ends: match &block.ends {
                Some(LeaseEnd::At(value)) => value.local_pair(),
                Some(LeaseEnd::Never) => ("never".to_string(), String::new()),
                None => Stamp::default(),
            },
            cltt: stamp(block.cltt.as_ref()),
        }
    }
}

fn stamp(value: Option<&DateTimeValue>) -> Stamp {
    value.map(DateTimeValue::local_pair).unwrap_or_default()
}

/// Outcome of one parse pass.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ParseResult {
    /// Active hosts in order of first appearance.
    pub hosts: Vec<HostRecord>,
    /// `lease <ipv4>` header lines found by the line scan.
    pub total_blocks: usize,
    /// Active blocks folded into `hosts`, counting supersessions.
    pub parsed_blocks: usize,
    pub all_addresses: BTreeSet<String>,
    pub duplicate_addresses: BTreeSet<String>,
}

impl ParseResult {
    /// Return the host record for `ip`, if an active lease exists.
    pub fn host_by_ip(&self, ip: &str) -> Option<&HostRecord> {
        self.hosts.iter().find(|host| host.ip_addr == ip)
    }
}
