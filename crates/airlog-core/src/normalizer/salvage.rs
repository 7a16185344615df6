//! Partial Salvager — field-by-field recovery from text that will not parse.
//!
//! Truncation cuts the tail of a reply, so the aircraft identity, summary and
//! multi-entry flag near the top usually survive even when the last entry is
//! cut mid-object. Top-level scalars and entry objects are therefore
//! recovered independently, with targeted patterns instead of a parser.
//!
//! Every helper here is a pure lookup returning an `Option`; the caller
//! decides what to log.

use crate::types::ENTRY_STRING_FIELDS;
use regex::Regex;
use serde_json::{Map, Value};
use std::collections::HashMap;
use std::sync::LazyLock;

const TOP_LEVEL_STRING_FIELDS: [&str; 3] = ["aircraft_registration", "aircraft_make_model", "summary"];

static ENTRY_FRAGMENT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"\{[^{}]*"description_of_work_performed"[^{}]*\}"#)
        .expect("entry fragment pattern is valid")
});

static PART_LIST: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#""part_number_replaced"\s*:\s*\[([^\]]*)\]"#).expect("part list pattern is valid")
});

static QUOTED_ITEM: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#""((?:[^"\\]|\\.)*)""#).expect("quoted item pattern is valid"));

/// `"field": "value"` patterns for every field salvage looks up, compiled once.
static QUOTED_VALUE: LazyLock<HashMap<&'static str, Regex>> = LazyLock::new(|| {
    TOP_LEVEL_STRING_FIELDS
        .into_iter()
        .chain(ENTRY_STRING_FIELDS)
        .chain(["part_number_replaced"])
        .map(|field| (field, quoted_value_pattern(field).expect("quoted value pattern is valid")))
        .collect()
});

fn quoted_value_pattern(field: &str) -> Result<Regex, regex::Error> {
    Regex::new(&format!(r#""{}"\s*:\s*"((?:[^"\\]|\\.)*)""#, regex::escape(field)))
}

/// Recover a current-shape raw object (`log_entries` always present) from
/// text that failed strict decoding.
///
/// Returns `None` unless at least one entry fragment is recovered; scalar
/// fields alone are not a useful record.
pub fn salvage(text: &str) -> Option<Map<String, Value>> {
    if !text.contains('{') {
        return None;
    }

    let entries: Vec<Value> = entry_fragments(text).map(salvage_entry).map(Value::Object).collect();
    if entries.is_empty() {
        return None;
    }

    let mut raw = Map::new();
    for field in TOP_LEVEL_STRING_FIELDS {
        if let Some(value) = quoted_field(text, field) {
            raw.insert(field.to_string(), Value::String(value));
        }
    }
    if let Some(flag) = bool_field(text, "is_mult") {
        raw.insert("is_mult".to_string(), Value::Bool(flag));
    }
    raw.insert("log_entries".to_string(), Value::Array(entries));
    Some(raw)
}

/// Brace-delimited fragments with no nested braces that mention the work
/// description, in document order.
pub fn entry_fragments(text: &str) -> impl Iterator<Item = &str> {
    ENTRY_FRAGMENT.find_iter(text).map(|m| m.as_str())
}

fn salvage_entry(fragment: &str) -> Map<String, Value> {
    if let Ok(Value::Object(entry)) = serde_json::from_str::<Value>(fragment) {
        return entry;
    }

    let mut entry = Map::new();
    for field in ENTRY_STRING_FIELDS {
        if let Some(value) = quoted_field(fragment, field) {
            entry.insert(field.to_string(), Value::String(value));
        }
    }
    entry.insert(
        "part_number_replaced".to_string(),
        Value::Array(part_numbers(fragment).into_iter().map(Value::String).collect()),
    );
    entry.insert(
        "is_airworthy".to_string(),
        Value::Bool(bool_field(fragment, "is_airworthy").unwrap_or(true)),
    );
    entry
}

fn part_numbers(fragment: &str) -> Vec<String> {
    if let Some(list) = PART_LIST.captures(fragment).and_then(|caps| caps.get(1)) {
        return QUOTED_ITEM
            .captures_iter(list.as_str())
            .filter_map(|caps| caps.get(1))
            .map(|m| unescape(m.as_str()))
            .collect();
    }
    quoted_field(fragment, "part_number_replaced").into_iter().collect()
}

// ---------------------------------------------------------------------------
// Scalar lookups
// ---------------------------------------------------------------------------

/// First `"field": "value"` in `text`, unescaped.
///
/// Falls back to a manual boundary scan (name, colon, next quote, the quote
/// after that) when the pattern does not match.
pub fn quoted_field(text: &str, field: &str) -> Option<String> {
    let matched = match QUOTED_VALUE.get(field) {
        Some(re) => captured_value(re, text),
        None => quoted_value_pattern(field).ok().and_then(|re| captured_value(&re, text)),
    };

    matched.or_else(|| scan_quoted_field(text, field))
}

fn captured_value(re: &Regex, text: &str) -> Option<String> {
    re.captures(text)
        .and_then(|caps| caps.get(1))
        .map(|m| unescape(m.as_str()))
}

fn scan_quoted_field(text: &str, field: &str) -> Option<String> {
    let after_colon = value_start(text, field)?;
    let open = after_colon.find('"')?;
    if after_colon[..open].contains(|c| matches!(c, ',' | '{' | '}' | '[' | ']')) {
        return None;
    }
    let value = &after_colon[open + 1..];
    let close = value.find('"')?;
    Some(value[..close].to_string())
}

/// First unquoted `true`/`false` after `"field":`, case-insensitive and
/// tolerating a stray quote before the literal.
pub fn bool_field(text: &str, field: &str) -> Option<bool> {
    let rest = value_start(text, field)?;
    let rest = rest.trim_start();
    let rest = rest.strip_prefix('"').unwrap_or(rest);
    let head: String = rest.chars().take(5).collect::<String>().to_ascii_lowercase();
    if head.starts_with("true") {
        Some(true)
    } else if head.starts_with("false") {
        Some(false)
    } else {
        None
    }
}

/// The text just past the colon that follows the first `"field"`.
fn value_start<'a>(text: &'a str, field: &str) -> Option<&'a str> {
    let key = format!("\"{field}\"");
    let after_key = &text[text.find(&key)? + key.len()..];
    let colon = after_key.find(':')?;
    if !after_key[..colon].trim().is_empty() {
        return None;
    }
    Some(&after_key[colon + 1..])
}

fn unescape(raw: &str) -> String {
    serde_json::from_str::<String>(&format!("\"{raw}\"")).unwrap_or_else(|_| raw.to_string())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
