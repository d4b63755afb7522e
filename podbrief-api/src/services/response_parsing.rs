//! Helpers for turning free-form model text into usable values
//!
//! Every pipeline that asks the model for JSON goes through
//! [`parse_json_object`]: a direct parse first, then recovery of the first
//! balanced `{...}` span (models like to wrap JSON in prose or code fences).

use serde_json::{Map, Value};

/// Parse `text` as a JSON object, recovering an embedded object if needed
pub fn parse_json_object(text: &str) -> Option<Map<String, Value>> {
    if let Ok(Value::Object(map)) = serde_json::from_str::<Value>(text.trim()) {
        return Some(map);
    }

    let mut search_from = 0;
    while let Some(span) = find_balanced_object(&text[search_from..]) {
        if let Ok(Value::Object(map)) = serde_json::from_str::<Value>(span.text) {
            return Some(map);
        }
        search_from += span.start + 1;
    }

    None
}

/// A balanced `{...}` slice and its byte offset within the searched text
#[derive(Debug, PartialEq)]
pub struct BraceSpan<'a> {
    pub start: usize,
    pub text: &'a str,
}

/// Find the first balanced `{...}` span, ignoring braces inside JSON strings
///
/// An opening brace that is never closed is skipped and the scan resumes at
/// the next one.
pub fn find_balanced_object(text: &str) -> Option<BraceSpan<'_>> {
    let bytes = text.as_bytes();
    let mut start = 0;

    while let Some(offset) = text[start..].find('{') {
        let open = start + offset;
        let mut depth = 0usize;
        let mut in_string = false;
        let mut escaped = false;

        for (i, &b) in bytes.iter().enumerate().skip(open) {
            if in_string {
                match b {
                    _ if escaped => escaped = false,
                    b'\\' => escaped = true,
                    b'"' => in_string = false,
                    _ => {}
                }
                continue;
            }

            match b {
                b'"' => in_string = true,
                b'{' => depth += 1,
                b'}' => {
                    depth -= 1;
                    if depth == 0 {
                        return Some(BraceSpan {
                            start: open,
                            text: &text[open..=i],
                        });
                    }
                }
                _ => {}
            }
        }

        start = open + 1;
    }

    None
}

/// Non-empty trimmed string value of `key`
pub fn string_field(map: &Map<String, Value>, key: &str) -> Option<String> {
    map.get(key)
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

/// Trim and remove one layer of matching wrapping quotes
pub fn strip_wrapping_quotes(text: &str) -> String {
    let trimmed = text.trim();
    for (open, close) in [('"', '"'), ('\'', '\''), ('“', '”')] {
        if trimmed.len() >= open.len_utf8() + close.len_utf8()
            && trimmed.starts_with(open)
            && trimmed.ends_with(close)
        {
            let inner = &trimmed[open.len_utf8()..trimmed.len() - close.len_utf8()];
            return inner.trim().to_string();
        }
    }
    trimmed.to_string()
}

/// Longest prefix of `text` holding at most `max_chars` characters
pub fn truncate_chars(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((byte_index, _)) => &text[..byte_index],
        None => text,
    }
}

/// Collapse runs of whitespace to single spaces and trim
pub fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_direct_json() {
        let map = parse_json_object(r#" {"name": "Ada"} "#).unwrap();
        assert_eq!(map["name"], "Ada");
    }

    #[test]
    fn test_json_inside_prose_and_fences() {
        let text = "Sure! Here is the data:\n```json\n{\"name\": \"Ada\", \"topics\": [\"math\"]}\n```\nLet me know.";
        let map = parse_json_object(text).unwrap();
        assert_eq!(map["topics"][0], "math");
    }

    #[test]
    fn test_first_balanced_span_wins() {
        let text = r#"{"a": 1} and later {"b": 2}"#;
        let span = find_balanced_object(text).unwrap();
        assert_eq!(span.text, r#"{"a": 1}"#);
        assert_eq!(span.start, 0);
    }

    #[test]
    fn test_braces_inside_strings_ignored() {
        let text = r#"note: {"quote": "use {curly} braces \" carefully"} end"#;
        let map = parse_json_object(text).unwrap();
        assert_eq!(map["quote"], "use {curly} braces \" carefully");
    }

    #[test]
    fn test_unclosed_brace_skipped() {
        let text = r#"broken { here, but {"ok": true}"#;
        let map = parse_json_object(text).unwrap();
        assert_eq!(map["ok"], true);
    }

    #[test]
    fn test_invalid_span_moves_on() {
        let text = r#"{not json} {"ok": 1}"#;
        let map = parse_json_object(text).unwrap();
        assert_eq!(map["ok"], 1);
    }

    #[test]
    fn test_no_object() {
        assert!(parse_json_object("no json here").is_none());
        assert!(parse_json_object("[1, 2, 3]").is_none());
        assert!(parse_json_object("").is_none());
    }

    #[test]
    fn test_strip_wrapping_quotes() {
        assert_eq!(strip_wrapping_quotes("  \"What drives you?\" "), "What drives you?");
        assert_eq!(strip_wrapping_quotes("“Why now?”"), "Why now?");
        assert_eq!(strip_wrapping_quotes("'Single'"), "Single");
        assert_eq!(strip_wrapping_quotes("He said \"hi\" twice"), "He said \"hi\" twice");
        assert_eq!(strip_wrapping_quotes("\""), "\"");
    }

    #[test]
    fn test_truncate_chars_respects_boundaries() {
        assert_eq!(truncate_chars("héllo", 2), "hé");
        assert_eq!(truncate_chars("short", 100), "short");
        assert_eq!(truncate_chars("", 3), "");
    }

    #[test]
    fn test_collapse_whitespace() {
        assert_eq!(collapse_whitespace("  a \n\n b\t c  "), "a b c");
    }

    #[test]
    fn test_string_field() {
        let map = parse_json_object(r#"{"a": "  x ", "b": "", "c": 3}"#).unwrap();
        assert_eq!(string_field(&map, "a").as_deref(), Some("x"));
        assert_eq!(string_field(&map, "b"), None);
        assert_eq!(string_field(&map, "c"), None);
        assert_eq!(string_field(&map, "missing"), None);
    }
}
