//! Keyword heuristics over normalized entries.
//!
//! These never replace what the model reported; they are shown next to it
//! in exports and used to flag suspicious uploads in the logs.

use crate::types::LogEntry;
use regex::Regex;
use serde::Serialize;
use std::fmt;
use std::sync::LazyLock;

static FOREIGN_REGISTRATION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Z]{2,3}[A-Z0-9]{1,4}$").expect("registration pattern is valid")
});

const CRITICAL_SYSTEMS: [&str; 5] = ["engine", "propeller", "landing gear", "flight control", "fuel system"];
const AD_FLAGS: [&str; 2] = ["non-compliant", "overdue"];
const TIME_KEYWORDS: [&str; 4] = ["overdue", "expired", "due", "required"];
const SAFETY_KEYWORDS: [&str; 4] = ["safety", "critical", "emergency", "grounded"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RiskLevel::Low => write!(f, "Low"),
            RiskLevel::Medium => write!(f, "Medium"),
            RiskLevel::High => write!(f, "High"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub enum Urgency {
    Normal,
    Medium,
    High,
}

impl fmt::Display for Urgency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Urgency::Normal => write!(f, "Normal"),
            Urgency::Medium => write!(f, "Medium"),
            Urgency::High => write!(f, "High"),
        }
    }
}

/// US `N` numbers up to six characters, or the common two/three-letter
/// prefix form used elsewhere. Case and surrounding whitespace are ignored.
pub fn registration_is_plausible(registration: &str) -> bool {
    let reg = registration.trim().to_uppercase();
    if reg.is_empty() {
        return false;
    }
    (reg.starts_with('N') && reg.chars().count() <= 6) || FOREIGN_REGISTRATION.is_match(&reg)
}

pub fn assess_risk_level(entry: &LogEntry) -> RiskLevel {
    let work = lowercase(entry.description_of_work_performed.as_deref());
    let ad = lowercase(entry.ad_compliance.as_deref());

    let mut factors = count_present(&work, &CRITICAL_SYSTEMS);
    if AD_FLAGS.iter().any(|flag| ad.contains(flag)) {
        factors += 1;
    }

    match factors {
        0 => RiskLevel::Low,
        1 => RiskLevel::Medium,
        _ => RiskLevel::High,
    }
}

pub fn determine_urgency(entry: &LogEntry) -> Urgency {
    let work = lowercase(entry.description_of_work_performed.as_deref());
    let factors = count_present(&work, &TIME_KEYWORDS) + count_present(&work, &SAFETY_KEYWORDS);

    match factors {
        0 => Urgency::Normal,
        1 => Urgency::Medium,
        _ => Urgency::High,
    }
}

fn lowercase(text: Option<&str>) -> String {
    text.unwrap_or_default().to_lowercase()
}

fn count_present(haystack: &str, keywords: &[&str]) -> usize {
    keywords.iter().filter(|kw| haystack.contains(*kw)).count()
}
