//! Tag canonicalization.
//!
//! # Responsibility
//! - Turn free-text tag input into the one canonical set stored on notes.
//!
//! # Invariants
//! - Output tags are lowercase, hyphenated, deduplicated and sorted.
//! - Normalization is idempotent and independent of input order.

use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::BTreeSet;

static WHITESPACE_RUN_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").expect("valid ws regex"));

/// Normalizes one raw tag value.
///
/// Returns `None` when the value is blank after trimming.
pub fn normalize_tag(tag: &str) -> Option<String> {
    let trimmed = tag.trim();
    if trimmed.is_empty() {
        return None;
    }
    Some(WHITESPACE_RUN_RE.replace_all(trimmed, "-").to_lowercase())
}

/// Normalizes, deduplicates and sorts a raw tag list.
///
/// Pure: normalizing the same multiset of inputs in any order yields the
/// identical output, and normalizing an already-normalized set is a no-op.
pub fn normalize_tags(tags: &[String]) -> Vec<String> {
    let mut unique = BTreeSet::new();
    for tag in tags {
        if let Some(value) = normalize_tag(tag) {
            unique.insert(value);
        }
    }
    unique.into_iter().collect()
}
