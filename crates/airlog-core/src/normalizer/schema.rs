//! Schema Normalizer — maps any decoded reply object onto [`MaintenanceRecord`].
//!
//! The model has answered in two shapes over time. The current shape carries
//! a `log_entries` array next to the aircraft identity; the legacy shape is a
//! single flat object describing one maintenance action. The shape is decided
//! once, by [`RawShape::detect`], and never re-checked afterwards.

use crate::types::{LogEntry, MaintenanceRecord, ENTRY_STRING_FIELDS};
use serde_json::{Map, Value};

/// Values the model uses to mean "I could not read this". Compared after
/// trimming and lowercasing.
static PLACEHOLDERS: phf::Set<&'static str> = phf::phf_set! {
    "unknown",
    "n/a",
    "none",
    "",
};

/// String values accepted as `true` for boolean fields, after lowercasing.
static TRUTHY: phf::Set<&'static str> = phf::phf_set! {
    "true",
    "yes",
    "airworthy",
    "1",
};

/// Which of the two reply shapes a raw object uses.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RawShape<'a> {
    /// One flat object that is itself the single entry.
    Legacy(&'a Map<String, Value>),
    /// Top-level fields plus a `log_entries` array.
    Current {
        top: &'a Map<String, Value>,
        entries: &'a [Value],
    },
}

impl<'a> RawShape<'a> {
    /// A sequence-valued `log_entries` marks the current shape; anything else
    /// is legacy.
    pub fn detect(raw: &'a Map<String, Value>) -> Self {
        match raw.get("log_entries") {
            Some(Value::Array(entries)) => RawShape::Current { top: raw, entries },
            _ => RawShape::Legacy(raw),
        }
    }
}

/// Produce the canonical record for a decoded (or salvaged) reply object.
pub fn normalize(raw: &Map<String, Value>) -> MaintenanceRecord {
    match RawShape::detect(raw) {
        RawShape::Legacy(obj) => MaintenanceRecord {
            aircraft_registration: clean_string(obj.get("aircraft_registration")),
            aircraft_make_model: clean_string(obj.get("aircraft_make_model")),
            summary: clean_string(obj.get("summary")),
            is_multi_entry: false,
            entries: vec![clean_entry(obj)],
        },
        RawShape::Current { top, entries } => {
            let entries: Vec<LogEntry> = entries
                .iter()
                .filter_map(Value::as_object)
                .map(clean_entry)
                .collect();
            MaintenanceRecord {
                aircraft_registration: clean_string(top.get("aircraft_registration")),
                aircraft_make_model: clean_string(top.get("aircraft_make_model")),
                summary: clean_string(top.get("summary")),
                is_multi_entry: !entries.is_empty() && clean_flag(top.get("is_mult"), false),
                entries,
            }
        }
    }
}

fn clean_entry(obj: &Map<String, Value>) -> LogEntry {
    let mut entry = LogEntry {
        part_number_replaced: clean_part_numbers(obj.get("part_number_replaced")),
        is_airworthy: clean_flag(obj.get("is_airworthy"), true),
        ..LogEntry::default()
    };
    for field in ENTRY_STRING_FIELDS {
        if let Some(slot) = entry.string_field_mut(field) {
            *slot = clean_string(obj.get(field));
        }
    }
    entry
}

// ---------------------------------------------------------------------------
// Field cleaning
// ---------------------------------------------------------------------------

/// Trimmed string, or `None` for null, missing, and placeholder values.
///
/// Numbers and booleans are stringified; nested arrays and objects are kept
/// as their compact JSON text.
pub fn clean_string(value: Option<&Value>) -> Option<String> {
    match value? {
        Value::Null => None,
        Value::String(s) => {
            let trimmed = s.trim();
            if PLACEHOLDERS.contains(trimmed.to_lowercase().as_str()) {
                None
            } else {
                Some(trimmed.to_string())
            }
        }
        other => Some(other.to_string()),
    }
}

/// Native booleans pass through and strings are matched, case-insensitively
/// but untrimmed, against the truthy set; every other value, including a
/// missing one, yields `default`.
pub fn clean_flag(value: Option<&Value>, default: bool) -> bool {
    match value {
        Some(Value::Bool(b)) => *b,
        Some(Value::String(s)) => TRUTHY.contains(s.to_lowercase().as_str()),
        _ => default,
    }
}

/// Always a sequence: trimmed, non-empty, first occurrence kept.
pub fn clean_part_numbers(value: Option<&Value>) -> Vec<String> {
    let items: Vec<String> = match value {
        Some(Value::String(s)) => vec![s.trim().to_string()],
        Some(Value::Array(items)) => items
            .iter()
            .filter_map(|item| match item {
                Value::Null => None,
                Value::String(s) => Some(s.trim().to_string()),
                other => Some(other.to_string()),
            })
            .collect(),
        _ => Vec::new(),
    };

    let mut parts: Vec<String> = Vec::with_capacity(items.len());
    for item in items {
        if !item.is_empty() && !parts.contains(&item) {
            parts.push(item);
        }
    }
    parts
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
