//! Core domain logic for Ocean Notes.
//! This crate is the single source of truth for note-store invariants.

pub mod db;
pub mod ids;
pub mod logging;
pub mod markdown;
pub mod model;
pub mod store;
pub mod tags;

pub use logging::{default_log_level, init_logging, logging_status};
pub use markdown::render_markdown;
pub use model::note::{Note, NoteId, NotePatch};
pub use store::backend::{
    MemoryStateStore, NullStateStore, SqliteStateStore, StateStore, StateStoreError, STORAGE_KEY,
};
pub use store::codec::{Envelope, ENVELOPE_VERSION};
pub use store::NoteStore;
pub use tags::{normalize_tag, normalize_tags};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::core_version;

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
