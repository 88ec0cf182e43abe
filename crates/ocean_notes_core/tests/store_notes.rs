use ocean_notes_core::{MemoryStateStore, NotePatch, NoteStore};
use std::thread::sleep;
use std::time::Duration;

fn hydrated_store() -> NoteStore<MemoryStateStore> {
    let mut store = NoteStore::new(MemoryStateStore::new());
    store.initialize();
    store
}

// Millisecond timestamps need a real gap to observe ordering changes.
fn tick() {
    sleep(Duration::from_millis(5));
}

#[test]
fn first_run_seeds_three_notes_and_selects_the_first() {
    let store = hydrated_store();

    assert_eq!(store.notes().len(), 3);
    assert_eq!(store.notes()[0].title, "Welcome to Ocean Notes");
    assert_eq!(store.selected_id(), Some(store.notes()[0].id.as_str()));
    for note in store.notes() {
        assert!(note.updated_at >= note.created_at);
    }
}

#[test]
fn create_note_front_inserts_defaults_and_selects() {
    let mut store = hydrated_store();
    let created = store.create_note();

    assert_eq!(created.title, "Untitled note");
    assert!(created.body.is_empty());
    assert!(created.tags.is_empty());
    assert_eq!(created.created_at, created.updated_at);
    assert_eq!(store.notes()[0].id, created.id);
    assert_eq!(store.selected_id(), Some(created.id.as_str()));
}

#[test]
fn create_then_delete_restores_previous_collection() {
    let mut store = hydrated_store();
    let before: Vec<String> = store.notes().iter().map(|note| note.id.clone()).collect();

    let created = store.create_note();
    assert_eq!(store.notes().len(), before.len() + 1);

    store.delete_note(&created.id);
    let after: Vec<String> = store.notes().iter().map(|note| note.id.clone()).collect();
    assert_eq!(after, before);
}

#[test]
fn deleting_the_selected_note_moves_selection_to_new_first() {
    let mut store = hydrated_store();
    let first_id = store.notes()[0].id.clone();
    let second_id = store.notes()[1].id.clone();
    store.select_note(&first_id);

    store.delete_note(&first_id);
    assert_eq!(store.selected_id(), Some(second_id.as_str()));
}

#[test]
fn deleting_every_note_clears_selection() {
    let mut store = hydrated_store();
    let ids: Vec<String> = store.notes().iter().map(|note| note.id.clone()).collect();
    for id in &ids {
        store.delete_note(id);
    }

    assert!(store.notes().is_empty());
    assert_eq!(store.selected_id(), None);
    assert!(store.selected_note().is_none());
}

#[test]
fn deleting_an_unknown_id_changes_nothing() {
    let mut store = hydrated_store();
    let before: Vec<String> = store.notes().iter().map(|note| note.id.clone()).collect();
    let selected_before = store.selected_id().map(str::to_string);

    store.delete_note("no-such-id");

    let after: Vec<String> = store.notes().iter().map(|note| note.id.clone()).collect();
    assert_eq!(after, before);
    assert_eq!(store.selected_id(), selected_before.as_deref());
}

#[test]
fn update_with_only_tags_preserves_title_and_body() {
    let mut store = hydrated_store();
    let target = store.notes()[1].clone();
    tick();

    store.update_note(
        &target.id,
        NotePatch {
            tags: Some(vec!["Work".to_string(), "work ".to_string(), "IDEAS".to_string()]),
            ..NotePatch::default()
        },
    );

    let updated = store
        .notes()
        .iter()
        .find(|note| note.id == target.id)
        .expect("updated note should still exist");
    assert_eq!(updated.title, target.title);
    assert_eq!(updated.body, target.body);
    assert_eq!(updated.tags, vec!["ideas".to_string(), "work".to_string()]);
    assert!(updated.updated_at > target.updated_at);
    assert_eq!(updated.created_at, target.created_at);
}

#[test]
fn empty_patch_still_refreshes_updated_at() {
    let mut store = hydrated_store();
    let target = store.notes()[2].clone();
    tick();

    store.update_note(&target.id, NotePatch::default());

    let updated = store
        .notes()
        .iter()
        .find(|note| note.id == target.id)
        .expect("note should still exist");
    assert!(updated.updated_at > target.updated_at);
    assert_eq!(updated.title, target.title);
}

#[test]
fn update_on_unknown_id_is_a_silent_no_op() {
    let mut store = hydrated_store();
    let before: Vec<_> = store.notes().to_vec();

    store.update_note(
        "no-such-id",
        NotePatch {
            title: Some("ghost".to_string()),
            ..NotePatch::default()
        },
    );

    assert_eq!(store.notes(), before.as_slice());
}

#[test]
fn selection_change_does_not_touch_timestamps() {
    let mut store = hydrated_store();
    let target = store.notes()[2].clone();
    tick();

    store.select_note(&target.id);

    let after = store.selected_note().expect("selection should resolve");
    assert_eq!(after.id, target.id);
    assert_eq!(after.updated_at, target.updated_at);
}

#[test]
fn recency_view_reorders_after_update() {
    let mut store = hydrated_store();
    // Seed recency order: welcome (-5m), checklist (-45m), tips (-240m).
    let titles: Vec<&str> = store
        .notes_by_updated_desc()
        .iter()
        .map(|note| note.title.as_str())
        .collect();
    assert_eq!(
        titles,
        vec![
            "Welcome to Ocean Notes",
            "Ocean Professional style checklist",
            "Markdown quick tips",
        ]
    );

    let oldest_id = store.notes()[2].id.clone();
    tick();
    store.update_note(
        &oldest_id,
        NotePatch {
            body: Some("touched".to_string()),
            ..NotePatch::default()
        },
    );

    let reordered = store.notes_by_updated_desc();
    assert_eq!(reordered[0].id, oldest_id);
    // Storage order is untouched by the derived view.
    assert_eq!(store.notes()[2].id, oldest_id);
}

#[test]
fn all_tags_merges_and_sorts_across_notes() {
    let mut store = hydrated_store();
    let first_id = store.notes()[0].id.clone();
    store.update_note(
        &first_id,
        NotePatch {
            tags: Some(vec!["Zeta".to_string(), "design".to_string()]),
            ..NotePatch::default()
        },
    );

    let tags = store.all_tags();
    assert!(tags.contains(&"design".to_string()));
    assert!(tags.contains(&"zeta".to_string()));
    let mut sorted = tags.clone();
    sorted.sort();
    sorted.dedup();
    assert_eq!(tags, sorted);
}
