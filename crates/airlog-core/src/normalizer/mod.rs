//! Normalizer — turns a raw vision-model reply into a [`MaintenanceRecord`].
//!
//! The reply is delimited by the [`extract`] stage, strictly decoded, and on
//! failure handed to [`repair`](repair::repair) and then
//! [`salvage`](salvage::salvage) before the decoded object is mapped onto the
//! canonical schema by [`schema::normalize`].
//!
//! ```text
//! Extracted ──decode──► Decoded
//!     │                    ▲
//!     ▼                    │
//! Repairing ──decode───────┤
//!     │                    │
//!     ▼                    │
//! Salvaging ──entries──────┘
//!     │
//!     ▼
//!   Failed
//! ```
//!
//! Stages are pure functions. All tracing happens here, in the driver, so a
//! stage never logs on its own behalf.

pub mod extract;
pub mod repair;
pub mod salvage;
pub mod schema;

use crate::types::MaintenanceRecord;
use extract::Candidate;
use serde_json::{Map, Value};
use std::fmt;
use tracing::{debug, warn};

pub use extract::{extract, Delimiter};
pub use schema::normalize as normalize_object;

/// Longest excerpt of unparseable text carried by a [`NormalizeError`].
pub const EXCERPT_CHARS: usize = 200;

/// How much work it took to decode a reply.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Provenance {
    /// The candidate decoded as-is.
    Direct,
    /// The candidate decoded after structural repair.
    Repaired,
    /// Strict decoding never succeeded; fields were recovered one by one.
    Salvaged,
}

impl fmt::Display for Provenance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Provenance::Direct => write!(f, "direct"),
            Provenance::Repaired => write!(f, "repaired"),
            Provenance::Salvaged => write!(f, "salvaged"),
        }
    }
}

/// A canonical record and the path that produced it.
///
/// Callers present every provenance the same way; it exists for logs.
#[derive(Debug, Clone, PartialEq)]
pub struct Normalized {
    pub record: MaintenanceRecord,
    pub provenance: Provenance,
}

/// The pipeline stage that gave up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Extract,
    Salvage,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Stage::Extract => write!(f, "extract"),
            Stage::Salvage => write!(f, "salvage"),
        }
    }
}

/// Terminal failure of [`normalize_reply`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum NormalizeError {
    /// The reply contains nothing object-like.
    #[error("no JSON object found in model reply")]
    ExtractionFailed { excerpt: String },

    /// Repair left the candidate undecodable and salvage found no entries.
    #[error("model reply could not be repaired or salvaged")]
    StructuralRepairExhausted { excerpt: String },
}

impl NormalizeError {
    pub fn stage(&self) -> Stage {
        match self {
            NormalizeError::ExtractionFailed { .. } => Stage::Extract,
            NormalizeError::StructuralRepairExhausted { .. } => Stage::Salvage,
        }
    }

    /// At most [`EXCERPT_CHARS`] characters of the offending text.
    pub fn excerpt(&self) -> &str {
        match self {
            NormalizeError::ExtractionFailed { excerpt }
            | NormalizeError::StructuralRepairExhausted { excerpt } => excerpt,
        }
    }
}

enum State<'a> {
    Extracted(Candidate<'a>),
    Repairing(Candidate<'a>),
    Salvaging(Candidate<'a>),
    Decoded(Map<String, Value>, Provenance),
    Failed(NormalizeError),
}

/// Run the full pipeline over one model reply.
pub fn normalize_reply(reply: &str) -> Result<Normalized, NormalizeError> {
    let mut state = match extract(reply) {
        Some(candidate) => State::Extracted(candidate),
        None => State::Failed(NormalizeError::ExtractionFailed {
            excerpt: excerpt(reply),
        }),
    };

    loop {
        state = match state {
            State::Extracted(candidate) => {
                debug!(
                    delimiter = ?candidate.delimiter,
                    candidate_len = candidate.text.len(),
                    "candidate extracted"
                );
                match decode_object(candidate.text) {
                    Some(raw) => State::Decoded(raw, Provenance::Direct),
                    None => State::Repairing(candidate),
                }
            }
            State::Repairing(candidate) => {
                let repaired = repair::repair(candidate.text);
                debug!(
                    candidate_len = candidate.text.len(),
                    repaired_len = repaired.len(),
                    "strict decode failed, repairing"
                );
                match decode_object(&repaired) {
                    Some(raw) => State::Decoded(raw, Provenance::Repaired),
                    None => State::Salvaging(candidate),
                }
            }
            State::Salvaging(candidate) => {
                debug!(candidate_len = candidate.text.len(), "repair failed, salvaging");
                match salvage::salvage(candidate.text) {
                    Some(raw) => State::Decoded(raw, Provenance::Salvaged),
                    None => State::Failed(NormalizeError::StructuralRepairExhausted {
                        excerpt: excerpt(candidate.text),
                    }),
                }
            }
            State::Decoded(raw, provenance) => {
                let record = schema::normalize(&raw);
                debug!(
                    %provenance,
                    entries = record.entries.len(),
                    is_mult = record.is_multi_entry,
                    "reply normalized"
                );
                return Ok(Normalized { record, provenance });
            }
            State::Failed(err) => {
                warn!(stage = %err.stage(), excerpt = %err.excerpt(), "could not normalize reply");
                return Err(err);
            }
        };
    }
}

fn decode_object(text: &str) -> Option<Map<String, Value>> {
    match serde_json::from_str::<Value>(text) {
        Ok(Value::Object(raw)) => Some(raw),
        _ => None,
    }
}

fn excerpt(text: &str) -> String {
    text.trim().chars().take(EXCERPT_CHARS).collect()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
