use std::fs;
use std::path::{Path, PathBuf};

use chrono::{FixedOffset, Offset, Utc};
use leases_core::ParseOptions;
use serde::Deserialize;
use thiserror::Error;

/// Settings as written in a TOML file. Every key is optional.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    pub leases_file: Option<PathBuf>,
    pub utc_offset: Option<String>,
}

/// Values given on the command line; they win over any file.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub leases_file: Option<PathBuf>,
    pub utc_offset: Option<String>,
}

/// Fully resolved settings for one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub leases_file: PathBuf,
    pub parse_options: ParseOptions,
    /// Where the settings came from, for `--verbose` output.
    pub source: String,
}

/// Errors returned when loading or resolving settings.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },
    #[error("failed to parse config file {path}: {source}")]
    Parse {
        path: String,
        source: toml::de::Error,
    },
    #[error("invalid UTC offset '{0}' (expected +HH:MM, -HH:MM, or UTC)")]
    Offset(String),
}

/// Load a settings file from disk.
pub fn load_config(path: &Path) -> Result<ConfigFile, ConfigError> {
    let raw = fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.display().to_string(),
        source,
    })?;
    parse_config(&raw, path.display().to_string())
}

/// Built-in defaults shipped with the binary.
pub fn default_config() -> ConfigFile {
    let embedded = include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/config/default.toml"));
    parse_config(embedded, "embedded defaults".to_string()).unwrap_or_else(|_| fallback_config())
}

fn parse_config(raw: &str, path: String) -> Result<ConfigFile, ConfigError> {
    toml::from_str(raw).map_err(|source| ConfigError::Parse { path, source })
}

fn fallback_config() -> ConfigFile {
    ConfigFile {
        leases_file: Some(PathBuf::from("/var/lib/dhcp/dhcpd.leases")),
        utc_offset: Some("+00:00".to_string()),
    }
}

/// Merge embedded defaults, an optional settings file, and command-line overrides.
pub fn resolve_settings(
    config_path: Option<&Path>,
    overrides: &Overrides,
) -> Result<Settings, ConfigError> {
    let defaults = default_config();
    let (file, source) = match config_path {
        Some(path) => (load_config(path)?, format!("file:{}", path.display())),
        None => (ConfigFile::default(), "embedded".to_string()),
    };

    let leases_file = overrides
        .leases_file
        .clone()
        .or(file.leases_file)
        .or(defaults.leases_file)
        .unwrap_or_else(|| PathBuf::from("/var/lib/dhcp/dhcpd.leases"));

    let utc_offset = match overrides
        .utc_offset
        .as_deref()
        .or(file.utc_offset.as_deref())
        .or(defaults.utc_offset.as_deref())
    {
        Some(raw) => parse_offset(raw)?,
        None => Utc.fix(),
    };

    Ok(Settings {
        leases_file,
        parse_options: ParseOptions { utc_offset },
        source,
    })
}

/// Parse `+HH:MM`, `-HH:MM`, `UTC`, or `Z` into a fixed offset.
pub fn parse_offset(raw: &str) -> Result<FixedOffset, ConfigError> {
    let trimmed = raw.trim();
    if trimmed.eq_ignore_ascii_case("utc") || trimmed == "Z" {
        return Ok(Utc.fix());
    }
    signed_offset(trimmed).ok_or_else(|| ConfigError::Offset(raw.to_string()))
}

fn signed_offset(s: &str) -> Option<FixedOffset> {
    let (sign, rest) = match s.as_bytes().first()? {
        b'+' => (1, &s[1..]),
        b'-' => (-1, &s[1..]),
        _ => return None,
    };
    let (hours, minutes) = rest.split_once(':').unwrap_or((rest, "00"));
    let two_digits = |part: &str| part.len() == 2 && part.bytes().all(|b| b.is_ascii_digit());
    if !two_digits(hours) || !two_digits(minutes) {
        return None;
    }
    let hours: i32 = hours.parse().ok()?;
    let minutes: i32 = minutes.parse().ok()?;
    if minutes >= 60 {
        return None;
    }
    FixedOffset::east_opt(sign * (hours * 3600 + minutes * 60))
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use chrono::FixedOffset;

    use super::{default_config, parse_offset, resolve_settings, ConfigError, Overrides};

    #[test]
    fn embedded_defaults_parse() {
        let config = default_config();
        assert_eq!(
            config.leases_file,
            Some(PathBuf::from("/var/lib/dhcp/dhcpd.leases"))
        );
        assert_eq!(config.utc_offset.as_deref(), Some("+00:00"));
    }

    #[test]
    fn parses_signed_offsets() {
        assert_eq!(
            parse_offset("-05:00").expect("offset"),
            FixedOffset::west_opt(5 * 3600).expect("offset")
        );
        assert_eq!(
            parse_offset("+05:30").expect("offset"),
            FixedOffset::east_opt(5 * 3600 + 1800).expect("offset")
        );
        assert_eq!(
            parse_offset("utc").expect("offset"),
            FixedOffset::east_opt(0).expect("offset")
        );
        assert!(matches!(parse_offset("EST"), Err(ConfigError::Offset(_))));
    }

    #[test]
    fn overrides_win_over_file_and_defaults() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("leasectl.toml");
        std::fs::write(
            &path,
            "leases_file = \"/srv/dhcpd.leases\"\nutc_offset = \"+01:00\"\n",
        )
        .expect("write config");

        let from_file =
            resolve_settings(Some(path.as_path()), &Overrides::default()).expect("settings");
        assert_eq!(from_file.leases_file, PathBuf::from("/srv/dhcpd.leases"));
        assert_eq!(from_file.parse_options.utc_offset.local_minus_utc(), 3600);
        assert!(from_file.source.starts_with("file:"));

        let overrides = Overrides {
            leases_file: Some(PathBuf::from("/tmp/other.leases")),
            utc_offset: Some("-02:00".to_string()),
        };
        let merged = resolve_settings(Some(path.as_path()), &overrides).expect("settings");
        assert_eq!(merged.leases_file, PathBuf::from("/tmp/other.leases"));
        assert_eq!(merged.parse_options.utc_offset.local_minus_utc(), -7200);
    }

    #[test]
    fn rejects_unknown_keys() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("bad.toml");
        std::fs::write(&path, "timezone = \"EST\"\n").expect("write config");

        let err = resolve_settings(Some(path.as_path()), &Overrides::default())
            .expect_err("should fail");
        assert!(matches!(err, ConfigError::Parse { .. }));
    }
}
