//! airlog — aircraft maintenance log analyzer.
//!
//! Uploaded logbook images are described by a vision model, the model's
//! free-form reply is normalized into a canonical [`MaintenanceRecord`], and
//! the result is stored and served over HTTP. This crate re-exports the
//! member crates so integration tests and benches can import them from one
//! place.
//!
//! # Architecture
//!
//! ```text
//! HTTP upload ──► VisionModel ──► Normalizer ──► Store ──► Export
//!  (server)        (vision)         (core)        (core)    (core)
//! ```

pub use airlog_core::{
    assess, config, export, normalizer, normalize_reply, store, types, LogEntry, LogId,
    LogStore, LogSummary, MaintenanceLog, MaintenanceRecord, NewLog, NormalizeError, Normalized,
    Provenance,
};
pub use airlog_server as server;
pub use airlog_vision as vision;
