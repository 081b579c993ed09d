//! Command-line inspection of ISC `dhcpd.leases` files.
//!
//! The lease grammar and reconciliation live in `leases-core`; this crate adds
//! the pieces a command-line driver needs around them:
//!
//! - [`config`] — TOML settings file, embedded defaults, offset parsing
//! - [`report`] — terminal rendering of hosts, counters, and raw blocks
//! - [`check`] — duplicate/skip gate used by `leasectl check`
//!
//! # Examples
//!
//! ```ignore
//! use leasectl::config::{resolve_settings, Overrides};
//! use leases_core::parse_file;
//!
//! let settings = resolve_settings(None, &Overrides::default())?;
//! let result = parse_file(&settings.leases_file, &settings.parse_options)?;
//! println!("{} active hosts", result.hosts.len());
//! ```

pub mod check;
pub mod config;
pub mod report;
