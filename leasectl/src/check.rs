//! Go/no-go gate over a parsed lease file.
//!
//! Repeated `lease <addr>` entries can point at a client that keeps
//! re-requesting its address, so each duplicate address is reported as an
//! error. Entries that never became an active host (malformed, unclosed, or
//! not `active`) are a single warning.

use serde::Serialize;

use leases_core::ParseResult;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum CheckSeverity {
    Error,
    Warning,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CheckIssue {
    pub severity: CheckSeverity,
    pub code: String,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CheckReport {
    pub total_blocks: usize,
    pub parsed_blocks: usize,
    pub hosts: usize,
    pub errors: usize,
    pub warnings: usize,
    pub issues: Vec<CheckIssue>,
}

impl CheckReport {
    /// True when the gate should fail the run.
    pub fn failed(&self, strict: bool) -> bool {
        self.errors > 0 || (strict && self.warnings > 0)
    }
}

pub fn build_check_report(result: &ParseResult) -> CheckReport {
    let mut issues: Vec<CheckIssue> = result
        .duplicate_addresses
        .iter()
        .map(|addr| {
            err(
                "duplicate_lease",
                &format!("address {addr} has more than one lease entry"),
            )
        })
        .collect();

    let skipped = result.total_blocks.saturating_sub(result.parsed_blocks);
    if skipped > 0 {
        issues.push(warn(
            "skipped_entries",
            &format!(
                "{skipped} of {} lease entries were not active or did not parse",
                result.total_blocks
            ),
        ));
    }

    let errors = issues
        .iter()
        .filter(|i| i.severity == CheckSeverity::Error)
        .count();
    let warnings = issues
        .iter()
        .filter(|i| i.severity == CheckSeverity::Warning)
        .count();

    CheckReport {
        total_blocks: result.total_blocks,
        parsed_blocks: result.parsed_blocks,
        hosts: result.hosts.len(),
        errors,
        warnings,
        issues,
    }
}

pub fn render_check_text(report: &CheckReport) -> String {
    let mut out = Vec::new();
    out.push(format!(
        "check entries={} parsed={} hosts={}",
        report.total_blocks, report.parsed_blocks, report.hosts
    ));
    out.push(format!(
        "result errors={} warnings={}",
        report.errors, report.warnings
    ));
    out.push("issues".to_string());
    if report.issues.is_empty() {
        out.push("- none".to_string());
        return out.join("\n");
    }
    for issue in &report.issues {
        let sev = match issue.severity {
            CheckSeverity::Error => "error",
            CheckSeverity::Warning => "warning",
        };
        out.push(format!("- [{sev}] {}: {}", issue.code, issue.message));
    }
    out.join("\n")
}

fn err(code: &str, message: &str) -> CheckIssue {
    CheckIssue {
        severity: CheckSeverity::Error,
        code: code.to_string(),
        message: message.to_string(),
    }
}

fn warn(code: &str, message: &str) -> CheckIssue {
    CheckIssue {
        severity: CheckSeverity::Warning,
        code: code.to_string(),
        message: message.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use leases_core::parse;

    use super::{build_check_report, render_check_text, CheckSeverity};

    #[test]
    fn duplicates_are_errors() {
        let doc = "lease 10.0.0.1 {\n  binding state active;\n}\nlease 10.0.0.1 {\n  binding state active;\n}\n";
        let report = build_check_report(&parse(doc));
        assert_eq!(report.errors, 1);
        assert_eq!(report.warnings, 0);
        assert_eq!(report.issues[0].code, "duplicate_lease");
        assert!(report.failed(false));
    }

    #[test]
    fn skipped_entries_only_fail_in_strict_mode() {
        let doc = "lease 10.0.0.1 {\n  binding state free;\n}\nlease 10.0.0.2 {\n  binding state active;\n}\n";
        let report = build_check_report(&parse(doc));
        assert_eq!(report.errors, 0);
        assert_eq!(report.warnings, 1);
        assert_eq!(report.issues[0].severity, CheckSeverity::Warning);
        assert!(!report.failed(false));
        assert!(report.failed(true));
    }

    #[test]
    fn clean_file_renders_no_issues() {
        let doc = "lease 10.0.0.2 {\n  binding state active;\n}\n";
        let report = build_check_report(&parse(doc));
        let text = render_check_text(&report);
        assert!(text.contains("result errors=0 warnings=0"));
        assert!(text.ends_with("- none"));
    }
}
