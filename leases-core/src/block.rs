use std::fmt::{self, Display, Formatter};
use std::str::FromStr;

use serde::Serialize;

use crate::datetime::DateTimeValue;

/// Lease binding state as written by dhcpd.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum BindingState {
    Active,
    Free,
    Backup,
    Expired,
    Abandoned,
}

impl BindingState {
    pub fn as_str(self) -> &'static str {
        match self {
            BindingState::Active => "active",
            BindingState::Free => "free",
            BindingState::Backup => "backup",
            BindingState::Expired => "expired",
            BindingState::Abandoned => "abandoned",
        }
    }
}

impl FromStr for BindingState {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "active" => Ok(BindingState::Active),
            "free" => Ok(BindingState::Free),
            "backup" => Ok(BindingState::Backup),
            "expired" => Ok(BindingState::Expired),
            "abandoned" => Ok(BindingState::Abandoned),
            _ => Err(()),
        }
    }
}

impl Display for BindingState {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Argument of an `ends` statement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LeaseEnd {
    At(DateTimeValue),
    Never,
}

/// `hardware <type> <mac>`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Hardware {
    pub hw_type: String,
    pub mac: String,
}

/// One recognized statement inside a lease block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LeaseStatement {
    Starts(DateTimeValue),
    Ends(LeaseEnd),
    /// Time sent to partner.
    Tstp(DateTimeValue),
    /// Time sent from partner.
    Tsfp(DateTimeValue),
    /// Actual time sent from the failover partner.
    Atsfp(DateTimeValue),
    /// Client last transaction time.
    Cltt(DateTimeValue),
    Hardware(Hardware),
    Uid(String),
    BindingState(BindingState),
    NextBindingState(BindingState),
    ClientHostname(String),
}

/// A `lease <addr> { ... }` group with every statement that parsed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RawBlock {
    pub address: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub starts: Option<DateTimeValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ends: Option<LeaseEnd>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tstp: Option<DateTimeValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tsfp: Option<DateTimeValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub atsfp: Option<DateTimeValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cltt: Option<DateTimeValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hardware: Option<Hardware>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub uid: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub binding_state: Option<BindingState>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_binding_state: Option<BindingState>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub client_hostname: Option<String>,
}

impl RawBlock {
    /// Create a block for `address` with no statements.
    pub fn new(address: impl Into<String>) -> Self {
        Self {
            address: address.into(),
            starts: None,
            ends: None,
            tstp: None,
            tsfp: None,
            atsfp: None,
            cltt: None,
            hardware: None,
            uid: None,
            binding_state: None,
            next_binding_state: None,
            client_hostname: None,
        }
    }

    /// Record a statement. A repeated directive replaces the earlier value.
    pub fn apply(&mut self, statement: LeaseStatement) {
        match statement {
            LeaseStatement::Starts(v) => self.starts = Some(v),
            LeaseStatement::Ends(v) => self.ends = Some(v),
            LeaseStatement::Tstp(v) => self.tstp = Some(v),
            LeaseStatement::Tsfp(v) => self.tsfp = Some(v),
            LeaseStatement::Atsfp(v) => self.atsfp = Some(v),
            LeaseStatement::Cltt(v) => self.cltt = Some(v),
            LeaseStatement::Hardware(v) => self.hardware = Some(v),
            LeaseStatement::Uid(v) => self.uid = Some(v),
            LeaseStatement::BindingState(v) => self.binding_state = Some(v),
            LeaseStatement::NextBindingState(v) => self.next_binding_state = Some(v),
            LeaseStatement::ClientHostname(v) => self.client_hostname = Some(v),
        }
    }

    /// True when the block carries `binding state active`.
    pub fn is_active(&self) -> bool {
        self.binding_state == Some(BindingState::Active)
    }
}
