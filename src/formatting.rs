//! Message format selection and rendering.
//!
//! Both functions here are pure: the dispatcher snapshots its call counter
//! once per send and passes the same sequence number for every target, so
//! rendering never reads shared state.

use chrono::Utc;
use serde_json::json;

/// Picks the effective format for one delivery: a non-empty per-call override
/// wins over the target's configured default.
pub fn select_format<'a>(cli_format: &'a str, target_format: &'a str) -> &'a str {
    if cli_format.is_empty() {
        target_format
    } else {
        cli_format
    }
}

/// Renders `message` according to `format`, embedding `sequence` so repeated
/// sends of the same message are distinguishable by recipients.
///
/// Three shapes are recognized:
/// * a template (anything containing `{{`), with `{{data}}`, `{{seq}}` and
///   `{{timestamp}}` placeholders
/// * the named modes `"json"` and `"html"`
/// * everything else, including the empty string, is plain-text passthrough
pub fn format_message(message: &str, format: &str, sequence: u64) -> String {
    if format.contains("{{") {
        return format
            .replace("{{data}}", message)
            .replace("{{seq}}", &sequence.to_string())
            .replace("{{timestamp}}", &Utc::now().to_rfc3339());
    }

    match format {
        "json" => json!({
            "data": message,
            "sequence": sequence,
            "timestamp": Utc::now().to_rfc3339(),
        })
        .to_string(),
        "html" => format!("<pre>{}</pre>\n<!-- notification #{} -->", message, sequence),
        _ => message.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_override_wins_when_non_empty() {
        assert_eq!(select_format("json", "html"), "json");
    }

    #[test]
    fn test_target_default_used_when_override_empty() {
        assert_eq!(select_format("", "html"), "html");
    }

    #[test]
    fn test_plain_text_passthrough() {
        assert_eq!(format_message("hello", "", 3), "hello");
        assert_eq!(format_message("hello", "text", 3), "hello");
    }

    #[test]
    fn test_unrecognized_format_falls_back_to_passthrough() {
        assert_eq!(format_message("hello", "carrier-pigeon", 7), "hello");
    }

    #[test]
    fn test_template_substitutes_data_and_sequence() {
        let rendered = format_message("alert fired", "[#{{seq}}] {{data}}", 12);
        assert_eq!(rendered, "[#12] alert fired");
    }

    #[test]
    fn test_template_is_pure_for_same_inputs() {
        let a = format_message("x", "{{data}}-{{seq}}", 5);
        let b = format_message("x", "{{data}}-{{seq}}", 5);
        assert_eq!(a, b);
    }

    #[test]
    fn test_json_mode_embeds_sequence() {
        let rendered = format_message("hello", "json", 4);
        let value: serde_json::Value = serde_json::from_str(&rendered).unwrap();
        assert_eq!(value["data"], "hello");
        assert_eq!(value["sequence"], 4);
        assert!(value["timestamp"].is_string());
    }

    #[test]
    fn test_html_mode_embeds_sequence() {
        let rendered = format_message("hello", "html", 2);
        assert!(rendered.contains("<pre>hello</pre>"));
        assert!(rendered.contains("#2"));
    }
}
