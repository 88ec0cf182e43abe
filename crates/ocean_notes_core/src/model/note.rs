//! Note domain model.
//!
//! # Responsibility
//! - Define the fundamental user-authored record and its partial-update shape.
//!
//! # Invariants
//! - `id` is assigned at creation and never changes.
//! - `created_at` is fixed at creation; `updated_at` moves only on content
//!   mutation, never on selection change.

use crate::ids::{new_id, now_ms};
use serde::{Deserialize, Serialize};

/// Stable opaque identifier for a note.
///
/// Kept as a type alias to make semantic intent explicit in signatures.
pub type NoteId = String;

/// A single user-authored record with title, body, tags and timestamps.
///
/// Serialized field names match the durable envelope format (`createdAt`,
/// `updatedAt`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Note {
    /// Opaque unique id, assigned at creation.
    pub id: NoteId,
    /// Free text, may be empty.
    pub title: String,
    /// Free text; may contain the supported markdown subset.
    pub body: String,
    /// Normalized tag set: lowercase, hyphenated, deduplicated, sorted.
    pub tags: Vec<String>,
    /// Creation time in epoch milliseconds, fixed for the note's lifetime.
    pub created_at: i64,
    /// Last content-mutation time in epoch milliseconds.
    pub updated_at: i64,
}

impl Note {
    /// Creates an empty note with a fresh id and the default title.
    pub fn untitled() -> Self {
        let stamp = now_ms();
        Self {
            id: new_id(),
            title: "Untitled note".to_string(),
            body: String::new(),
            tags: Vec::new(),
            created_at: stamp,
            updated_at: stamp,
        }
    }
}

/// Partial update for a note's content fields.
///
/// `None` fields retain their current value. A supplied tag list is raw user
/// input and passes through the tag normalizer before storage.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NotePatch {
    pub title: Option<String>,
    pub body: Option<String>,
    pub tags: Option<Vec<String>>,
}
