//! Export — projects a stored log into a downloadable document.

use crate::assess::{assess_risk_level, determine_urgency};
use crate::types::{LogEntry, MaintenanceLog, ENTRY_STRING_FIELDS};
use chrono::{DateTime, Utc};
use std::fmt::Write as _;
use std::str::FromStr;

const NOT_SPECIFIED: &str = "Not specified";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    /// The stored document, pretty-printed.
    Json,
    /// A plain-text maintenance report.
    Text,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ExportError {
    #[error("Unsupported export format {0:?}. Use 'json' or 'text'")]
    UnsupportedFormat(String),
    #[error("failed to serialize log: {0}")]
    Serialize(String),
}

impl FromStr for ExportFormat {
    type Err = ExportError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "json" => Ok(ExportFormat::Json),
            "text" | "txt" => Ok(ExportFormat::Text),
            _ => Err(ExportError::UnsupportedFormat(s.trim().to_string())),
        }
    }
}

impl ExportFormat {
    pub fn content_type(self) -> &'static str {
        match self {
            ExportFormat::Json => "application/json",
            ExportFormat::Text => "text/plain; charset=utf-8",
        }
    }

    pub fn extension(self) -> &'static str {
        match self {
            ExportFormat::Json => "json",
            ExportFormat::Text => "txt",
        }
    }
}

/// A rendered export, ready to be sent as an attachment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Export {
    pub content_type: &'static str,
    pub filename: String,
    pub body: String,
}

pub fn export(log: &MaintenanceLog, format: ExportFormat, generated_at: DateTime<Utc>) -> Result<Export, ExportError> {
    let body = match format {
        ExportFormat::Json => {
            serde_json::to_string_pretty(log).map_err(|e| ExportError::Serialize(e.to_string()))?
        }
        ExportFormat::Text => text_report(log, generated_at),
    };

    Ok(Export {
        content_type: format.content_type(),
        filename: format!("maintenance_log_{}.{}", log.id, format.extension()),
        body,
    })
}

// ---------------------------------------------------------------------------
// Text report
// ---------------------------------------------------------------------------

fn text_report(log: &MaintenanceLog, generated_at: DateTime<Utc>) -> String {
    let record = &log.structured_data;
    let mut out = String::new();

    // Writing into a String cannot fail.
    let _ = writeln!(out, "AIRCRAFT MAINTENANCE LOG REPORT");
    let _ = writeln!(out, "===============================");
    let _ = writeln!(out);
    let _ = writeln!(out, "Aircraft Information");
    let _ = writeln!(out, "  Registration: {}", or_unspecified(record.aircraft_registration.as_deref()));
    let _ = writeln!(out, "  Make/Model:   {}", or_unspecified(record.aircraft_make_model.as_deref()));
    let _ = writeln!(out, "  Uploaded:     {}", log.timestamp.format("%Y-%m-%d %H:%M:%S UTC"));
    let _ = writeln!(out, "  Image:        {}", log.image_filename);

    if let Some(summary) = record.summary.as_deref() {
        let _ = writeln!(out);
        let _ = writeln!(out, "Summary");
        let _ = writeln!(out, "  {summary}");
    }

    for (i, entry) in record.entries.iter().enumerate() {
        let _ = writeln!(out);
        let _ = writeln!(out, "Entry {} of {}", i + 1, record.entries.len());
        let _ = writeln!(out, "-----------");
        write_entry(&mut out, entry);
    }

    let _ = writeln!(out);
    let _ = writeln!(out, "Generated on {}", generated_at.format("%Y-%m-%d %H:%M:%S UTC"));
    out
}

fn write_entry(out: &mut String, entry: &LogEntry) {
    for field in ENTRY_STRING_FIELDS {
        let _ = writeln!(out, "  {}: {}", label(field), or_unspecified(entry.string_field(field)));
    }
    let parts = if entry.part_number_replaced.is_empty() {
        NOT_SPECIFIED.to_string()
    } else {
        entry.part_number_replaced.join(", ")
    };
    let _ = writeln!(out, "  Parts Replaced: {parts}");
    let _ = writeln!(out, "  Airworthy: {}", if entry.is_airworthy { "Yes" } else { "No" });
    let _ = writeln!(out, "  Assessed Risk: {}", assess_risk_level(entry));
    let _ = writeln!(out, "  Assessed Urgency: {}", determine_urgency(entry));
}

fn label(field: &str) -> &'static str {
    match field {
        "description_of_work_performed" => "Work Performed",
        "tach_time" => "Tach Time",
        "hobbs_time" => "Hobbs Time",
        "manual_reference" => "Manual Reference",
        "reason_for_maintenance" => "Reason",
        "ad_compliance" => "AD Compliance",
        "next_due_compliance" => "Next Due",
        "service_bulletin_reference" => "Service Bulletin",
        "certification_statement" => "Certification",
        "performed_by" => "Performed By",
        "license_number" => "License Number",
        "date" => "Date",
        "risk_level" => "Risk Level",
        "urgency" => "Urgency",
        _ => "Other",
    }
}

fn or_unspecified(value: Option<&str>) -> &str {
    value.unwrap_or(NOT_SPECIFIED)
}
