use crate::reconcile::result::ParseResult;

/// Format a parse result as pretty JSON.
pub fn format_json(result: &ParseResult) -> String {
    serde_json::to_string_pretty(result).unwrap_or_else(|_| "{}".to_string())
}
