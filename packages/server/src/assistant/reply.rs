//! Parsing of the model's JSON-in-text replies.
//!
//! The contract asks the model for `{"response": string, "action"?: object}`
//! but real output arrives fenced, wrapped in prose, or half broken. The
//! ladder here goes: strip code fences, cut out the first balanced JSON
//! object, parse it, and as a last resort pull the response string with a
//! regex. Nothing in this module errors; the floor is a stock reply.

use lazy_static::lazy_static;
use regex::Regex;
use serde_json::Value;

/// Stock reply when the model gave no usable response text.
pub const DEFAULT_REPLY: &str = "Listo.";

lazy_static! {
    static ref FENCE_OPEN: Regex = Regex::new(r"(?m)^```[a-zA-Z]*\s*").unwrap();
    static ref FENCE_CLOSE: Regex = Regex::new(r"(?m)```\s*$").unwrap();
    static ref RESPONSE_FIELD: Regex = Regex::new(r#""response"\s*:\s*"([^"]*)""#).unwrap();
}

/// Result of the parsing ladder. The action is whatever raw JSON value
/// sat under "action", still unvalidated.
#[derive(Debug, Default, PartialEq)]
pub struct ParsedReply {
    pub response: String,
    pub action: Option<Value>,
}

/// Parse the model's raw text into a reply and an optional action.
pub fn parse_reply(raw: &str) -> ParsedReply {
    let mut obj = match parse_json_safely(raw) {
        Some(Value::Object(map)) => map,
        _ => {
            return ParsedReply {
                response: response_fallback(raw),
                action: None,
            }
        }
    };

    let response = match obj.get("response") {
        Some(Value::String(s)) if !s.is_empty() => s.clone(),
        _ => response_fallback(raw),
    };
    let action = obj.remove("action");

    ParsedReply { response, action }
}

fn response_fallback(raw: &str) -> String {
    RESPONSE_FIELD
        .captures(raw)
        .map(|c| c[1].to_string())
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| DEFAULT_REPLY.to_string())
}

fn parse_json_safely(raw: &str) -> Option<Value> {
    let cleaned = clean_code_fences(raw);
    let candidate = extract_first_json_object(&cleaned).unwrap_or(cleaned);
    serde_json::from_str(&candidate).ok()
}

/// Remove one opening and one closing fence marker, wherever the model
/// put them.
fn clean_code_fences(raw: &str) -> String {
    let cleaned = FENCE_OPEN.replace(raw, "");
    let cleaned = FENCE_CLOSE.replace(&cleaned, "");
    cleaned.trim().to_string()
}

/// First balanced brace-delimited object, tolerating prose on either
/// side. Braces inside string literals do not count toward the depth.
fn extract_first_json_object(text: &str) -> Option<String> {
    let start = text.find('{')?;
    let mut depth = 0usize;
    let mut in_string = false;
    let mut escaped = false;

    for (i, &b) in text.as_bytes().iter().enumerate().skip(start) {
        if in_string {
            if escaped {
                escaped = false;
            } else if b == b'\\' {
                escaped = true;
            } else if b == b'"' {
                in_string = false;
            }
            continue;
        }
        match b {
            b'"' => in_string = true,
            b'{' => depth += 1,
            b'}' => {
                depth -= 1;
                if depth == 0 {
                    return Some(text[start..=i].to_string());
                }
            }
            _ => {}
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_plain_json_reply() {
        let parsed = parse_reply(r#"{"response":"Tenemos 3 anillos.","action":{"type":"apply_filters"}}"#);
        assert_eq!(parsed.response, "Tenemos 3 anillos.");
        assert_eq!(parsed.action, Some(json!({"type":"apply_filters"})));
    }

    #[test]
    fn test_fenced_json_reply() {
        let raw = "```json\n{\"response\":\"Hola\"}\n```";
        let parsed = parse_reply(raw);
        assert_eq!(parsed.response, "Hola");
        assert_eq!(parsed.action, None);
    }

    #[test]
    fn test_json_with_trailing_prose() {
        let raw = r#"{"response":"Listo el filtro"} espero que te sirva"#;
        let parsed = parse_reply(raw);
        assert_eq!(parsed.response, "Listo el filtro");
    }

    #[test]
    fn test_braces_inside_string_values() {
        let raw = r#"{"response":"usa {filtros} para afinar","action":null}"#;
        let parsed = parse_reply(raw);
        assert_eq!(parsed.response, "usa {filtros} para afinar");
        assert_eq!(parsed.action, Some(Value::Null));
    }

    #[test]
    fn test_regex_fallback_on_broken_json() {
        let raw = r#"claro! {"response": "Hay collares de plata", "action": {"#;
        let parsed = parse_reply(raw);
        assert_eq!(parsed.response, "Hay collares de plata");
        assert_eq!(parsed.action, None);
    }

    #[test]
    fn test_garbage_degrades_to_default_reply() {
        let parsed = parse_reply("no soy json");
        assert_eq!(parsed.response, DEFAULT_REPLY);
        assert_eq!(parsed.action, None);
    }

    #[test]
    fn test_empty_response_string_uses_default() {
        let parsed = parse_reply(r#"{"response":""}"#);
        assert_eq!(parsed.response, DEFAULT_REPLY);
    }

    #[test]
    fn test_empty_input_uses_default() {
        let parsed = parse_reply("");
        assert_eq!(parsed.response, DEFAULT_REPLY);
    }

    #[test]
    fn test_non_string_response_keeps_action() {
        let parsed = parse_reply(r#"{"response":42,"action":{"type":"open_product","id":"p1"}}"#);
        assert_eq!(parsed.response, DEFAULT_REPLY);
        assert_eq!(
            parsed.action,
            Some(json!({"type":"open_product","id":"p1"}))
        );
    }

    #[test]
    fn test_scalar_json_is_not_a_reply() {
        let parsed = parse_reply("42");
        assert_eq!(parsed.response, DEFAULT_REPLY);
    }

    #[test]
    fn test_extract_first_object_ignores_leading_prose() {
        let s = r#"seguro: {"a": {"b": 1}} y algo más"#;
        assert_eq!(
            extract_first_json_object(s).as_deref(),
            Some(r#"{"a": {"b": 1}}"#)
        );
    }

    #[test]
    fn test_extract_first_object_none_without_braces() {
        assert_eq!(extract_first_json_object("sin objeto"), None);
    }

    #[test]
    fn test_extract_handles_escaped_quotes() {
        let s = r#"{"response":"dijo \"hola\" y {ya}"}"#;
        let parsed = parse_reply(s);
        assert_eq!(parsed.response, r#"dijo "hola" y {ya}"#);
    }
}
