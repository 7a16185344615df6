//! Core types for airlog-core.
//!
//! This module defines the canonical [`MaintenanceRecord`] every model reply
//! is normalized into, its [`LogEntry`] rows, and the stored document
//! ([`MaintenanceLog`]) that wraps a record with identity and upload metadata.
//!
//! Wire names follow the format the vision model is prompted to emit
//! (`is_mult`, `log_entries`), so a stored document serializes back into the
//! same shape the frontend and the model both speak.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

// ---------------------------------------------------------------------------
// Canonical record
// ---------------------------------------------------------------------------

/// The canonical output of the reply normalizer.
///
/// Every string field is either a trimmed, non-placeholder value or `None`.
/// `is_multi_entry` is only ever `true` when `entries` is non-empty.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MaintenanceRecord {
    #[serde(default)]
    pub aircraft_registration: Option<String>,
    #[serde(default)]
    pub aircraft_make_model: Option<String>,
    #[serde(default)]
    pub summary: Option<String>,
    #[serde(rename = "is_mult", default)]
    pub is_multi_entry: bool,
    /// In the order the entries appeared in the reply.
    #[serde(rename = "log_entries", default)]
    pub entries: Vec<LogEntry>,
}

/// One maintenance action recorded in a log.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogEntry {
    #[serde(default)]
    pub description_of_work_performed: Option<String>,
    /// Never null; empty when no parts were listed.
    #[serde(default)]
    pub part_number_replaced: Vec<String>,
    #[serde(default)]
    pub tach_time: Option<String>,
    #[serde(default)]
    pub hobbs_time: Option<String>,
    #[serde(default)]
    pub manual_reference: Option<String>,
    #[serde(default)]
    pub reason_for_maintenance: Option<String>,
    #[serde(default)]
    pub ad_compliance: Option<String>,
    #[serde(default)]
    pub next_due_compliance: Option<String>,
    #[serde(default)]
    pub service_bulletin_reference: Option<String>,
    #[serde(default)]
    pub certification_statement: Option<String>,
    #[serde(default)]
    pub performed_by: Option<String>,
    #[serde(default)]
    pub license_number: Option<String>,
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default)]
    pub risk_level: Option<String>,
    #[serde(default)]
    pub urgency: Option<String>,
    /// Defaults to `true` when the reply does not say otherwise.
    #[serde(default = "default_airworthy")]
    pub is_airworthy: bool,
}

fn default_airworthy() -> bool {
    true
}

impl Default for LogEntry {
    fn default() -> Self {
        Self {
            description_of_work_performed: None,
            part_number_replaced: Vec::new(),
            tach_time: None,
            hobbs_time: None,
            manual_reference: None,
            reason_for_maintenance: None,
            ad_compliance: None,
            next_due_compliance: None,
            service_bulletin_reference: None,
            certification_statement: None,
            performed_by: None,
            license_number: None,
            date: None,
            risk_level: None,
            urgency: None,
            is_airworthy: default_airworthy(),
        }
    }
}

/// Names of the optional string fields on [`LogEntry`], in display order.
///
/// Shared by the schema normalizer and the partial salvager so both recover
/// exactly the same set of fields.
pub const ENTRY_STRING_FIELDS: [&str; 14] = [
    "description_of_work_performed",
    "tach_time",
    "hobbs_time",
    "manual_reference",
    "reason_for_maintenance",
    "ad_compliance",
    "next_due_compliance",
    "service_bulletin_reference",
    "certification_statement",
    "performed_by",
    "license_number",
    "date",
    "risk_level",
    "urgency",
];

impl LogEntry {
    /// Mutable access to a string field by its wire name.
    pub fn string_field_mut(&mut self, name: &str) -> Option<&mut Option<String>> {
        let slot = match name {
            "description_of_work_performed" => &mut self.description_of_work_performed,
            "tach_time" => &mut self.tach_time,
            "hobbs_time" => &mut self.hobbs_time,
            "manual_reference" => &mut self.manual_reference,
            "reason_for_maintenance" => &mut self.reason_for_maintenance,
            "ad_compliance" => &mut self.ad_compliance,
            "next_due_compliance" => &mut self.next_due_compliance,
            "service_bulletin_reference" => &mut self.service_bulletin_reference,
            "certification_statement" => &mut self.certification_statement,
            "performed_by" => &mut self.performed_by,
            "license_number" => &mut self.license_number,
            "date" => &mut self.date,
            "risk_level" => &mut self.risk_level,
            "urgency" => &mut self.urgency,
            _ => return None,
        };
        Some(slot)
    }

    /// Read a string field by its wire name.
    pub fn string_field(&self, name: &str) -> Option<&str> {
        let value = match name {
            "description_of_work_performed" => &self.description_of_work_performed,
            "tach_time" => &self.tach_time,
            "hobbs_time" => &self.hobbs_time,
            "manual_reference" => &self.manual_reference,
            "reason_for_maintenance" => &self.reason_for_maintenance,
            "ad_compliance" => &self.ad_compliance,
            "next_due_compliance" => &self.next_due_compliance,
            "service_bulletin_reference" => &self.service_bulletin_reference,
            "certification_statement" => &self.certification_statement,
            "performed_by" => &self.performed_by,
            "license_number" => &self.license_number,
            "date" => &self.date,
            "risk_level" => &self.risk_level,
            "urgency" => &self.urgency,
            _ => return None,
        };
        value.as_deref()
    }
}

// ---------------------------------------------------------------------------
// Stored documents
// ---------------------------------------------------------------------------

/// Opaque identifier assigned to a stored [`MaintenanceLog`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LogId(Uuid);

impl LogId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for LogId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for LogId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// A string that is not a well-formed log identifier.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Invalid log ID format")]
pub struct InvalidLogId;

impl FromStr for LogId {
    type Err = InvalidLogId;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s.trim()).map(Self).map_err(|_| InvalidLogId)
    }
}

/// A normalized record together with its storage metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MaintenanceLog {
    #[serde(rename = "_id")]
    pub id: LogId,
    pub uploaded_by: String,
    pub timestamp: DateTime<Utc>,
    pub image_filename: String,
    pub structured_data: MaintenanceRecord,
    #[serde(default)]
    pub original_image_url: Option<String>,
}

/// Everything the store needs to create a [`MaintenanceLog`]; identity and
/// timestamp are assigned on insert.
#[derive(Debug, Clone, PartialEq)]
pub struct NewLog {
    pub uploaded_by: String,
    pub image_filename: String,
    pub structured_data: MaintenanceRecord,
    pub original_image_url: Option<String>,
}

impl NewLog {
    pub fn anonymous(image_filename: impl Into<String>, structured_data: MaintenanceRecord) -> Self {
        Self {
            uploaded_by: "anonymous".to_string(),
            image_filename: image_filename.into(),
            structured_data,
            original_image_url: None,
        }
    }
}

// ---------------------------------------------------------------------------
// History listing
// ---------------------------------------------------------------------------

const SUMMARY_DESCRIPTION_MAX: usize = 100;

/// Condensed view of a stored log for the history listing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogSummary {
    #[serde(rename = "_id")]
    pub id: LogId,
    pub aircraft_registration: Option<String>,
    pub timestamp: DateTime<Utc>,
    pub description: String,
    pub risk_level: Option<String>,
}

impl From<&MaintenanceLog> for LogSummary {
    fn from(log: &MaintenanceLog) -> Self {
        let record = &log.structured_data;
        let first = record.entries.first();

        let mut description = first
            .and_then(|e| e.description_of_work_performed.clone())
            .unwrap_or_default();
        if record.is_multi_entry && record.summary.is_some() {
            description = record.summary.clone().unwrap_or_default();
        } else if record.entries.len() > 1 {
            description.push_str(&format!(" (+{} more entries)", record.entries.len() - 1));
        }

        if description.chars().count() > SUMMARY_DESCRIPTION_MAX {
            description = description.chars().take(SUMMARY_DESCRIPTION_MAX).collect();
            description.push_str("...");
        } else if description.is_empty() {
            description = "No description".to_string();
        }

        Self {
            id: log.id,
            aircraft_registration: record.aircraft_registration.clone(),
            timestamp: log.timestamp,
            description,
            risk_level: first.and_then(|e| e.risk_level.clone()),
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
