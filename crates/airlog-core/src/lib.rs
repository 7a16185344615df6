//! airlog-core — aircraft maintenance log core library.
//!
//! This crate owns everything that does not talk to the network: the
//! canonical record types, the reply normalizer, the document store, export
//! projections, and configuration.
//!
//! # Architecture
//!
//! ```text
//! model reply ──► Normalizer ──► Store ──► Export
//!                  │
//!                  └─ extract → repair → salvage → schema
//! ```
//!
//! The normalizer is synchronous and pure; the store is the only shared,
//! mutable state and is guarded by a `tokio` lock.

pub mod assess;
pub mod config;
pub mod export;
pub mod normalizer;
pub mod store;
pub mod types;

pub use normalizer::{normalize_reply, NormalizeError, Normalized, Provenance};
pub use store::LogStore;
pub use types::{LogEntry, LogId, LogSummary, MaintenanceLog, MaintenanceRecord, NewLog};
