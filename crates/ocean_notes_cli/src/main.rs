//! CLI smoke entry point.
//!
//! # Responsibility
//! - Provide a minimal executable to verify `ocean_notes_core` linkage.
//! - Stay side-effect free: the store runs over the no-op backend.

use ocean_notes_core::{NoteStore, NullStateStore};

fn main() {
    let mut store = NoteStore::new(NullStateStore);
    store.initialize();

    println!("ocean_notes_core version={}", ocean_notes_core::core_version());
    println!("seeded_notes={}", store.notes().len());
    if let Some(note) = store.selected_note() {
        println!("selected_title={}", note.title);
    }
}
