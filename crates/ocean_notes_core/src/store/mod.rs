//! Local-first note store.
//!
//! # Responsibility
//! - Own the in-memory note collection and selection cursor.
//! - Reconcile in-memory state with the durable slot (hydrate/persist/seed).
//! - Expose CRUD operations and derived read views.
//!
//! # Invariants
//! - Storage order is creation order, newest first; recency is a derived view.
//! - `selected_id` after hydration refers to an existing note or is empty.
//! - Every mutation persists explicitly before returning; persistence is
//!   best-effort and never fails the operation.
//! - Operations on unknown ids are silent no-ops.

use crate::ids::now_ms;
use crate::model::note::{Note, NoteId, NotePatch};
use crate::tags::normalize_tags;
use log::{info, warn};
use std::collections::BTreeSet;

pub mod backend;
pub mod codec;

use backend::StateStore;

const MINUTE_MS: i64 = 60 * 1000;

/// Single-writer note store over a pluggable durable slot.
///
/// Explicitly constructed and owned by the hosting application; all
/// operations are synchronous and run to completion. The caller serializes
/// access if it ever spans execution contexts.
pub struct NoteStore<S: StateStore> {
    storage: S,
    notes: Vec<Note>,
    selected_id: Option<NoteId>,
    hydrated: bool,
}

impl<S: StateStore> NoteStore<S> {
    /// Creates an empty, unhydrated store over the given backend.
    pub fn new(storage: S) -> Self {
        Self {
            storage,
            notes: Vec::new(),
            selected_id: None,
            hydrated: false,
        }
    }

    /// Loads persisted state, or seeds example notes when none is valid.
    ///
    /// Idempotent: once hydrated, further calls are no-ops. A malformed or
    /// wrong-version payload counts as absent and triggers seeding.
    pub fn initialize(&mut self) {
        if self.hydrated {
            return;
        }

        let decoded = match self.storage.read() {
            Ok(Some(raw)) => codec::decode(&raw),
            Ok(None) => None,
            Err(err) => {
                warn!("event=store_hydrate module=store status=read_failed error={err}");
                None
            }
        };

        match decoded {
            Some(envelope) => {
                self.notes = envelope.notes;
                // A stored selection pointing at no note would dangle; fall
                // back to the first note, same as a null selection.
                self.selected_id = envelope
                    .selected_id
                    .filter(|id| self.notes.iter().any(|note| &note.id == id))
                    .or_else(|| self.notes.first().map(|note| note.id.clone()));
                info!(
                    "event=store_hydrate module=store status=ok source=storage count={}",
                    self.notes.len()
                );
            }
            None => {
                self.notes = seed_notes(now_ms());
                self.selected_id = self.notes.first().map(|note| note.id.clone());
                self.persist();
                info!(
                    "event=store_hydrate module=store status=ok source=seed count={}",
                    self.notes.len()
                );
            }
        }

        self.hydrated = true;
    }

    /// Creates an empty "Untitled note", inserts it first, selects it.
    pub fn create_note(&mut self) -> Note {
        let note = Note::untitled();
        self.notes.insert(0, note.clone());
        self.selected_id = Some(note.id.clone());
        self.persist();
        note
    }

    /// Removes the note with the given id; unknown ids are a silent no-op.
    ///
    /// When the deleted note was selected, selection moves to the new first
    /// note, or to none if the collection is now empty.
    pub fn delete_note(&mut self, id: &str) {
        let before = self.notes.len();
        self.notes.retain(|note| note.id != id);
        if self.notes.len() == before {
            return;
        }

        if self.selected_id.as_deref() == Some(id) {
            self.selected_id = self.notes.first().map(|note| note.id.clone());
        }
        self.persist();
    }

    /// Applies a partial content update; unknown ids are a silent no-op.
    ///
    /// Unspecified fields keep their value; a supplied tag list passes
    /// through the normalizer. `updated_at` is refreshed whenever the patch
    /// was applied, even when it supplies no fields.
    pub fn update_note(&mut self, id: &str, patch: NotePatch) {
        let Some(note) = self.notes.iter_mut().find(|note| note.id == id) else {
            return;
        };

        if let Some(title) = patch.title {
            note.title = title;
        }
        if let Some(body) = patch.body {
            note.body = body;
        }
        if let Some(tags) = patch.tags {
            note.tags = normalize_tags(&tags);
        }
        // The host clock may step backwards; never regress below created_at.
        note.updated_at = now_ms().max(note.created_at);
        self.persist();
    }

    /// Moves selection to the given id and persists it.
    ///
    /// Existence is not validated; callers are expected to pass a known id.
    /// Content timestamps are untouched.
    pub fn select_note(&mut self, id: &str) {
        self.selected_id = Some(id.to_string());
        self.persist();
    }

    /// Notes in storage order (creation order, newest first).
    pub fn notes(&self) -> &[Note] {
        &self.notes
    }

    /// Notes ordered by `updated_at` descending; ties keep storage order.
    pub fn notes_by_updated_desc(&self) -> Vec<&Note> {
        let mut ordered: Vec<&Note> = self.notes.iter().collect();
        ordered.sort_by(|a, b| b.updated_at.cmp(&a.updated_at));
        ordered
    }

    /// The currently selected note, if any.
    pub fn selected_note(&self) -> Option<&Note> {
        let selected = self.selected_id.as_deref()?;
        self.notes.iter().find(|note| note.id == selected)
    }

    /// Current selection cursor.
    pub fn selected_id(&self) -> Option<&str> {
        self.selected_id.as_deref()
    }

    /// All distinct tags across all notes, sorted.
    pub fn all_tags(&self) -> Vec<String> {
        let mut unique = BTreeSet::new();
        for note in &self.notes {
            for tag in &note.tags {
                unique.insert(tag.clone());
            }
        }
        unique.into_iter().collect()
    }

    /// Whether the first load-or-seed has completed.
    pub fn is_hydrated(&self) -> bool {
        self.hydrated
    }

    /// The durable backend this store persists through.
    pub fn storage(&self) -> &S {
        &self.storage
    }

    fn persist(&mut self) {
        let payload = codec::encode(&self.notes, self.selected_id.as_ref());
        if let Err(err) = self.storage.write(&payload) {
            // Best effort: the in-memory state stays authoritative.
            warn!("event=store_persist module=store status=error error={err}");
        }
    }
}

/// Fixed example notes written on first run, timestamped into the past
/// relative to `reference_ms` so the recency view has a deterministic order.
fn seed_notes(reference_ms: i64) -> Vec<Note> {
    let minutes_ago = |minutes: i64| reference_ms - minutes * MINUTE_MS;
    vec![
        Note {
            id: crate::ids::new_id(),
            title: "Welcome to Ocean Notes".to_string(),
            body: "This is a local-first notes app.\n\n\
                   - Create notes with **tags**\n\
                   - Search + filter\n\
                   - Autosave while typing\n\n\
                   Try adding a tag like: `productivity` or `ideas`."
                .to_string(),
            tags: vec!["getting-started".to_string(), "welcome".to_string()],
            created_at: minutes_ago(30),
            updated_at: minutes_ago(5),
        },
        Note {
            id: crate::ids::new_id(),
            title: "Ocean Professional style checklist".to_string(),
            body: "- Primary: #2563EB (blue)\n\
                   - Secondary: #F59E0B (amber)\n\
                   - Rounded corners + subtle shadows\n\
                   - Minimal UI, smooth transitions\n\
                   - Responsive split layout"
                .to_string(),
            tags: vec!["design".to_string(), "ocean".to_string()],
            created_at: minutes_ago(90),
            updated_at: minutes_ago(45),
        },
        Note {
            id: crate::ids::new_id(),
            title: "Markdown quick tips".to_string(),
            body: "# Title\n\n\
                   - Use **bold** and *italic*\n\
                   - Links: [Nuxt](https://nuxt.com)\n\n\
                   > Optional: switch to Preview to render markdown."
                .to_string(),
            tags: vec!["markdown".to_string(), "tips".to_string()],
            created_at: minutes_ago(240),
            updated_at: minutes_ago(240),
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::backend::MemoryStateStore;
    use super::{seed_notes, NoteStore};

    #[test]
    fn seed_contains_three_notes_with_past_timestamps() {
        let reference = 10_000_000;
        let seeded = seed_notes(reference);
        assert_eq!(seeded.len(), 3);
        for note in &seeded {
            assert!(note.created_at < reference);
            assert!(note.updated_at >= note.created_at);
            assert_eq!(note.tags, crate::tags::normalize_tags(&note.tags));
        }
    }

    #[test]
    fn initialize_is_idempotent() {
        let mut store = NoteStore::new(MemoryStateStore::new());
        store.initialize();
        let first_ids: Vec<String> = store.notes().iter().map(|note| note.id.clone()).collect();

        store.initialize();
        let second_ids: Vec<String> = store.notes().iter().map(|note| note.id.clone()).collect();
        assert_eq!(first_ids, second_ids);
        assert!(store.is_hydrated());
    }

    #[test]
    fn hydration_drops_dangling_selection_to_first_note() {
        let seeded = seed_notes(5_000_000);
        let raw = super::codec::encode(&seeded, Some(&"no-such-note".to_string()));
        let mut store = NoteStore::new(MemoryStateStore::with_slot(raw));
        store.initialize();
        assert_eq!(store.selected_id(), Some(seeded[0].id.as_str()));
    }
}
