//! Domain model for the local-first note collection.
//!
//! # Responsibility
//! - Define the canonical note shape shared by the store and the codec.
//!
//! # Invariants
//! - Every note is identified by a stable, opaque `NoteId`.
//! - `tags` is always normalizer output, never raw user input.
//! - `updated_at >= created_at` for every note.

pub mod note;
