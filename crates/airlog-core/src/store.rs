//! Store — in-memory collection of [`MaintenanceLog`] documents.
//!
//! Documents are kept in insertion order under a monotonically increasing
//! sequence number, with a secondary index from [`LogId`] to sequence. Listing
//! and search walk the sequence map backwards, so "newest first" never
//! depends on timestamp resolution.
//!
//! Records are never edited in place: [`LogStore::replace_record`] swaps the
//! whole `structured_data` value.

use crate::types::{LogId, MaintenanceLog, MaintenanceRecord, NewLog};
use chrono::Utc;
use std::collections::{BTreeMap, HashMap};
use tokio::sync::RwLock;

#[derive(Default)]
struct Inner {
    next_seq: u64,
    by_seq: BTreeMap<u64, MaintenanceLog>,
    seq_of: HashMap<LogId, u64>,
}

/// Shared document store. Wrap in an `Arc` to hand out to request handlers.
#[derive(Default)]
pub struct LogStore {
    inner: RwLock<Inner>,
}

impl LogStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a new document, assigning its id and creation timestamp.
    pub async fn insert(&self, new: NewLog) -> MaintenanceLog {
        let log = MaintenanceLog {
            id: LogId::new(),
            uploaded_by: new.uploaded_by,
            timestamp: Utc::now(),
            image_filename: new.image_filename,
            structured_data: new.structured_data,
            original_image_url: new.original_image_url,
        };

        let mut inner = self.inner.write().await;
        let seq = inner.next_seq;
        inner.next_seq += 1;
        inner.seq_of.insert(log.id, seq);
        inner.by_seq.insert(seq, log.clone());
        log
    }

    pub async fn get(&self, id: LogId) -> Option<MaintenanceLog> {
        let inner = self.inner.read().await;
        let seq = inner.seq_of.get(&id)?;
        inner.by_seq.get(seq).cloned()
    }

    /// Up to `limit` documents, newest first.
    pub async fn list_recent(&self, limit: usize) -> Vec<MaintenanceLog> {
        let inner = self.inner.read().await;
        inner.by_seq.values().rev().take(limit).cloned().collect()
    }

    /// Replace a document's record wholesale. Returns the updated document,
    /// or `None` if the id is unknown.
    pub async fn replace_record(&self, id: LogId, record: MaintenanceRecord) -> Option<MaintenanceLog> {
        let mut inner = self.inner.write().await;
        let seq = *inner.seq_of.get(&id)?;
        let log = inner.by_seq.get_mut(&seq)?;
        log.structured_data = record;
        Some(log.clone())
    }

    /// Remove a document. Returns whether it existed.
    pub async fn delete(&self, id: LogId) -> bool {
        let mut inner = self.inner.write().await;
        match inner.seq_of.remove(&id) {
            Some(seq) => inner.by_seq.remove(&seq).is_some(),
            None => false,
        }
    }

    /// Documents whose registration contains `term`, ignoring case, newest
    /// first. A blank term matches nothing.
    pub async fn search_registration(&self, term: &str) -> Vec<MaintenanceLog> {
        let needle = term.trim().to_lowercase();
        if needle.is_empty() {
            return Vec::new();
        }

        let inner = self.inner.read().await;
        inner
            .by_seq
            .values()
            .rev()
            .filter(|log| {
                log.structured_data
                    .aircraft_registration
                    .as_deref()
                    .is_some_and(|reg| reg.to_lowercase().contains(&needle))
            })
            .cloned()
            .collect()
    }

    pub async fn len(&self) -> usize {
        self.inner.read().await.by_seq.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}
