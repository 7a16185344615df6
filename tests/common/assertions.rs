//! Domain-specific assertion macros for airlog harnesses.
//!
//! These wrap `pretty_assertions` and add context-rich failure messages that
//! make it clear *which* record invariant was violated.

use airlog::MaintenanceRecord;

// ---------------------------------------------------------------------------
// Record assertions
// ---------------------------------------------------------------------------

/// Assert the registration of a normalized record.
///
/// ```rust
/// assert_registration!(record, Some("N123AB"));
/// ```
#[macro_export]
macro_rules! assert_registration {
    ($record:expr, $expected:expr) => {{
        let record: &airlog::MaintenanceRecord = &$record;
        let expected: Option<&str> = $expected;
        if record.aircraft_registration.as_deref() != expected {
            panic!(
                "assert_registration! failed:\n  expected: {:?}\n  actual:   {:?}",
                expected, record.aircraft_registration
            );
        }
    }};
}

/// Assert the work descriptions of every entry, in order.
///
/// ```rust
/// assert_descriptions!(record, ["Tire change", "Brake check"]);
/// ```
#[macro_export]
macro_rules! assert_descriptions {
    ($record:expr, [$($desc:expr),* $(,)?]) => {{
        let record: &airlog::MaintenanceRecord = &$record;
        let expected: Vec<Option<&str>> = vec![$(Some($desc)),*];
        let actual: Vec<Option<&str>> = record
            .entries
            .iter()
            .map(|e| e.description_of_work_performed.as_deref())
            .collect();
        pretty_assertions::assert_eq!(actual, expected, "entry descriptions differ");
    }};
}

/// Assert that a normalizer result failed at the given stage.
///
/// ```rust
/// assert_fails_at!(normalize_reply(text), Stage::Salvage);
/// ```
#[macro_export]
macro_rules! assert_fails_at {
    ($result:expr, $stage:expr) => {{
        match $result {
            Ok(normalized) => panic!(
                "assert_fails_at! failed: expected {:?} failure, got {:?} record:\n{:#?}",
                $stage, normalized.provenance, normalized.record
            ),
            Err(err) => {
                if err.stage() != $stage {
                    panic!(
                        "assert_fails_at! failed:\n  expected stage: {:?}\n  actual stage:   {:?}\n  error: {}",
                        $stage,
                        err.stage(),
                        err
                    );
                }
            }
        }
    }};
}

// ---------------------------------------------------------------------------
// Invariant helpers
// ---------------------------------------------------------------------------

const PLACEHOLDERS: [&str; 4] = ["unknown", "n/a", "none", ""];

fn check_string(path: &str, value: Option<&str>) {
    if let Some(value) = value {
        assert_eq!(value, value.trim(), "{path} is not trimmed");
        assert!(
            !PLACEHOLDERS.contains(&value.to_lowercase().as_str()),
            "{path} holds placeholder {value:?}"
        );
    }
}

/// Assert every record-level invariant: no placeholders, trimmed strings,
/// non-empty part numbers, and `is_multi_entry` only with entries.
pub fn assert_record_invariants(record: &MaintenanceRecord) {
    check_string("aircraft_registration", record.aircraft_registration.as_deref());
    check_string("aircraft_make_model", record.aircraft_make_model.as_deref());
    check_string("summary", record.summary.as_deref());
    assert!(
        !record.is_multi_entry || !record.entries.is_empty(),
        "is_multi_entry set on a record with no entries"
    );

    for (i, entry) in record.entries.iter().enumerate() {
        for field in airlog::types::ENTRY_STRING_FIELDS {
            check_string(&format!("entries[{i}].{field}"), entry.string_field(field));
        }
        for part in &entry.part_number_replaced {
            assert!(!part.is_empty(), "entries[{i}] has an empty part number");
            assert_eq!(part, part.trim(), "entries[{i}] part {part:?} is not trimmed");
        }
    }
}
