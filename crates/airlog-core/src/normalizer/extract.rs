//! Extractor — locates the JSON-like part of a model reply.
//!
//! Purely textual: nothing here parses JSON. The narrow match (a fenced
//! ```` ```json ```` block) is preferred, but the wide match (first `{` to
//! last `}` of the whole reply) wins whenever the fenced block is missing a
//! top-level key the wide match has.

use regex::Regex;
use std::sync::LazyLock;

static FENCED_JSON: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)```json\s*(.*?)\s*```").expect("fenced block pattern is valid")
});

/// Top-level keys whose absence from the fenced block suggests it was cut.
const EXPECTED_KEYS: [&str; 2] = ["\"summary\"", "\"is_mult\""];

/// How a [`Candidate`] was delimited inside the reply.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Delimiter {
    /// Contents of a fenced ```` ```json ```` block.
    Fenced,
    /// First `{` through last `}` of the reply.
    Braces,
    /// First `{` through the end of the reply, when no `}` follows it.
    OpenEnded,
}

/// Substring of a reply believed to hold a JSON object. May be invalid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate<'a> {
    pub text: &'a str,
    pub delimiter: Delimiter,
}

/// Delimit the candidate JSON text inside `reply`.
///
/// Returns `None` only when the reply contains no `{` at all, meaning it
/// carries nothing object-like to work with.
pub fn extract(reply: &str) -> Option<Candidate<'_>> {
    let wide = wide_match(reply);

    let candidate = match fenced_match(reply) {
        Some(fenced) if fenced.contains('{') => match wide {
            Some(wide) if prefers_wide(fenced, wide) => Candidate {
                text: wide,
                delimiter: Delimiter::Braces,
            },
            _ => Candidate {
                text: fenced,
                delimiter: Delimiter::Fenced,
            },
        },
        _ => match wide {
            Some(wide) => Candidate {
                text: wide,
                delimiter: Delimiter::Braces,
            },
            None => Candidate {
                text: open_ended_match(reply)?,
                delimiter: Delimiter::OpenEnded,
            },
        },
    };

    Some(candidate)
}

fn fenced_match(reply: &str) -> Option<&str> {
    FENCED_JSON
        .captures(reply)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}

fn wide_match(reply: &str) -> Option<&str> {
    let start = reply.find('{')?;
    let end = reply.rfind('}')?;
    (end > start).then(|| &reply[start..=end])
}

fn open_ended_match(reply: &str) -> Option<&str> {
    reply.find('{').map(|start| reply[start..].trim_end())
}

fn prefers_wide(fenced: &str, wide: &str) -> bool {
    EXPECTED_KEYS
        .iter()
        .any(|key| !fenced.contains(key) && wide.contains(key))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
