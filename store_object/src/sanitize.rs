//! Record sanitization
//!
//! String fields are trimmed and stripped of `<script>` blocks before a
//! record is validated and written.

use crate::remote::Record;
use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;

static SCRIPT_BLOCK: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?is)<script\b.*?</script\s*>").expect("script pattern is valid"));

/// Trim a string and remove every script block from it
pub fn sanitize_str(value: &str) -> String {
    SCRIPT_BLOCK.replace_all(value.trim(), "").into_owned()
}

/// Return a copy of `record` with all string fields sanitized
pub fn sanitize(record: &Record) -> Record {
    record
        .iter()
        .map(|(key, value)| {
            let value = match value {
                Value::String(s) => Value::String(sanitize_str(s)),
                other => other.clone(),
            };
            (key.clone(), value)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_trims_whitespace() {
        assert_eq!(sanitize_str("  Kante \n"), "Kante");
    }

    #[test]
    fn test_strips_script_blocks() {
        assert_eq!(sanitize_str("Kante<script>alert(1)</script>"), "Kante");
        assert_eq!(
            sanitize_str("a<SCRIPT type=\"text/javascript\">x</ScRiPt>b"),
            "ab"
        );
        assert_eq!(sanitize_str("<script>\nlet a = '<b>';\n</script>ok"), "ok");
    }

    #[test]
    fn test_script_match_is_not_greedy() {
        assert_eq!(
            sanitize_str("<script>1</script>keep<script>2</script>"),
            "keep"
        );
    }

    #[test]
    fn test_leaves_other_markup() {
        assert_eq!(sanitize_str("<b>fett</b>"), "<b>fett</b>");
        assert_eq!(sanitize_str("<scripted>"), "<scripted>");
    }

    #[test]
    fn test_non_string_fields_pass_through() {
        let input = json!({
            "name": "  Kante<script>x</script>",
            "value": 12.5,
            "active": true,
            "tags": [" a "],
            "note": null
        });
        let record = input.as_object().cloned().unwrap();
        let sanitized = sanitize(&record);

        assert_eq!(
            Value::Object(sanitized),
            json!({"name": "Kante", "value": 12.5, "active": true, "tags": [" a "], "note": null})
        );
        // input untouched
        assert_eq!(Value::Object(record), input);
    }
}
