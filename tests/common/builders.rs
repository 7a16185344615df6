//! Test builders — ergonomic constructors for records, entries, and stores.
//!
//! These builders are designed for readability in test assertions, not for
//! production use. They panic on invalid input rather than returning `Result`.

use airlog::types::{LogEntry, MaintenanceRecord, NewLog};
use airlog::LogStore;

// ---------------------------------------------------------------------------
// EntryBuilder
// ---------------------------------------------------------------------------

/// Fluent builder for [`LogEntry`] test fixtures.
///
/// # Example
///
/// ```rust
/// let entry = EntryBuilder::new("Replaced left magneto")
///     .parts(&["MAG-4370"])
///     .risk("Medium")
///     .build();
/// ```
pub struct EntryBuilder {
    entry: LogEntry,
}

impl EntryBuilder {
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            entry: LogEntry {
                description_of_work_performed: Some(description.into()),
                ..LogEntry::default()
            },
        }
    }

    pub fn parts(mut self, parts: &[&str]) -> Self {
        self.entry.part_number_replaced = parts.iter().map(|p| p.to_string()).collect();
        self
    }

    pub fn risk(mut self, risk: impl Into<String>) -> Self {
        self.entry.risk_level = Some(risk.into());
        self
    }

    pub fn ad(mut self, ad: impl Into<String>) -> Self {
        self.entry.ad_compliance = Some(ad.into());
        self
    }

    pub fn performed_by(mut self, name: impl Into<String>) -> Self {
        self.entry.performed_by = Some(name.into());
        self
    }

    pub fn grounded(mut self) -> Self {
        self.entry.is_airworthy = false;
        self
    }

    pub fn build(self) -> LogEntry {
        self.entry
    }
}

// ---------------------------------------------------------------------------
// RecordBuilder
// ---------------------------------------------------------------------------

/// Fluent builder for [`MaintenanceRecord`] fixtures. `is_multi_entry` is
/// derived from the entry count unless set explicitly.
pub struct RecordBuilder {
    record: MaintenanceRecord,
    multi: Option<bool>,
}

impl RecordBuilder {
    pub fn new(registration: impl Into<String>) -> Self {
        Self {
            record: MaintenanceRecord {
                aircraft_registration: Some(registration.into()),
                aircraft_make_model: None,
                summary: None,
                is_multi_entry: false,
                entries: Vec::new(),
            },
            multi: None,
        }
    }

    pub fn make_model(mut self, make_model: impl Into<String>) -> Self {
        self.record.aircraft_make_model = Some(make_model.into());
        self
    }

    pub fn summary(mut self, summary: impl Into<String>) -> Self {
        self.record.summary = Some(summary.into());
        self
    }

    pub fn multi(mut self, multi: bool) -> Self {
        self.multi = Some(multi);
        self
    }

    pub fn entry(mut self, entry: LogEntry) -> Self {
        self.record.entries.push(entry);
        self
    }

    pub fn build(mut self) -> MaintenanceRecord {
        self.record.is_multi_entry = self.multi.unwrap_or(self.record.entries.len() > 1);
        self.record
    }
}

// ---------------------------------------------------------------------------
// Convenience constructors
// ---------------------------------------------------------------------------

/// A single-entry record for `registration`.
pub fn simple_record(registration: &str, description: &str) -> MaintenanceRecord {
    RecordBuilder::new(registration)
        .entry(EntryBuilder::new(description).build())
        .build()
}

/// A store holding one record per registration, inserted in the given order.
pub async fn store_with(registrations: &[&str]) -> LogStore {
    let store = LogStore::new();
    for (i, reg) in registrations.iter().enumerate() {
        let record = simple_record(reg, &format!("work item {i}"));
        store
            .insert(NewLog::anonymous(format!("log_{i}.jpg"), record))
            .await;
    }
    store
}
