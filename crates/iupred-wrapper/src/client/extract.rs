//! Result identifier extraction from submission responses.
//!
//! The `/plot` page does not return the prediction itself. It embeds a link
//! to `/raw_json<id>` somewhere in its markup, and the id is all we need.

use regex::Regex;
use std::sync::OnceLock;

/// Substring that marks the line carrying the result link.
pub const RESULT_MARKER: &str = "raw_json";

fn result_id_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r#"raw_json(%[A-Z0-9]+)""#).expect("result id regex is valid"))
}

/// Pull the result identifier (with its leading `%`) out of an HTML body.
///
/// Only the first line containing the marker is considered. Returns `None`
/// when no line carries the marker or that line does not match.
pub fn extract_result_id(html: &str) -> Option<String> {
    let line = html.lines().find(|l| l.contains(RESULT_MARKER))?.trim();
    result_id_re()
        .captures(line)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extracts_id_from_link_line() {
        let html = "<html>\n<body>\n  <a href=\"/raw_json%AB12CD\">Download</a>\n</body>";
        assert_eq!(extract_result_id(html), Some("%AB12CD".to_string()));
    }

    #[test]
    fn test_no_marker_line() {
        let html = "<html><body>Session expired</body></html>";
        assert_eq!(extract_result_id(html), None);
    }

    #[test]
    fn test_marker_without_identifier() {
        let html = "<p>raw_json is unavailable</p>";
        assert_eq!(extract_result_id(html), None);
    }

    #[test]
    fn test_only_first_marker_line_is_used() {
        let html = "<p>raw_json broken</p>\n<a href=\"/raw_json%FFFF\">ok</a>";
        assert_eq!(extract_result_id(html), None);
    }

    #[test]
    fn test_lowercase_identifier_not_matched() {
        let html = "<a href=\"/raw_json%ab12\">x</a>";
        assert_eq!(extract_result_id(html), None);
    }
}
