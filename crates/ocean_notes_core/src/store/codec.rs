//! Durable envelope codec.
//!
//! # Responsibility
//! - Serialize whole-store snapshots into the versioned JSON envelope.
//! - Parse stored envelopes back, treating anything malformed as absent.
//!
//! # Invariants
//! - `decode` never returns an error to the caller: missing, malformed and
//!   wrong-version payloads are all the same "absent" result.
//! - The codec neither retains nor mutates notes; it only copies snapshots.

use crate::model::note::{Note, NoteId};
use log::warn;
use serde::{Deserialize, Serialize};

/// Schema version written by this binary.
pub const ENVELOPE_VERSION: u32 = 1;

/// Versioned wrapper around the full store state, as stored durably.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Envelope {
    pub version: u32,
    pub notes: Vec<Note>,
    #[serde(default)]
    pub selected_id: Option<NoteId>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct EnvelopeRef<'a> {
    version: u32,
    notes: &'a [Note],
    selected_id: Option<&'a NoteId>,
}

/// Encodes a store snapshot into the version-1 JSON envelope.
pub fn encode(notes: &[Note], selected_id: Option<&NoteId>) -> String {
    let envelope = EnvelopeRef {
        version: ENVELOPE_VERSION,
        notes,
        selected_id,
    };
    // Serialization of this shape cannot fail; fall back to an empty blob
    // (which decodes as absent) rather than propagate an error.
    serde_json::to_string(&envelope).unwrap_or_default()
}

/// Decodes a stored envelope.
///
/// Returns `None` when the payload is not valid JSON, does not match the
/// envelope shape, or carries an unrecognized `version`.
pub fn decode(raw: &str) -> Option<Envelope> {
    let envelope = match serde_json::from_str::<Envelope>(raw) {
        Ok(envelope) => envelope,
        Err(err) => {
            warn!("event=envelope_decode module=codec status=absent reason=malformed error={err}");
            return None;
        }
    };

    if envelope.version != ENVELOPE_VERSION {
        warn!(
            "event=envelope_decode module=codec status=absent reason=version version={}",
            envelope.version
        );
        return None;
    }

    Some(envelope)
}

#[cfg(test)]
mod tests {
    use super::{decode, encode, ENVELOPE_VERSION};
    use crate::model::note::Note;

    fn sample_note() -> Note {
        Note {
            id: "k2x-a1b2c3d4".to_string(),
            title: "Sample".to_string(),
            body: "body".to_string(),
            tags: vec!["work".to_string()],
            created_at: 1_000,
            updated_at: 2_000,
        }
    }

    #[test]
    fn round_trip_preserves_notes_and_selection() {
        let note = sample_note();
        let raw = encode(std::slice::from_ref(&note), Some(&note.id));

        let envelope = decode(&raw).expect("round trip should decode");
        assert_eq!(envelope.version, ENVELOPE_VERSION);
        assert_eq!(envelope.notes, vec![note.clone()]);
        assert_eq!(envelope.selected_id.as_deref(), Some(note.id.as_str()));
    }

    #[test]
    fn encode_uses_camel_case_wire_keys() {
        let note = sample_note();
        let raw = encode(std::slice::from_ref(&note), None);
        assert!(raw.contains("\"selectedId\""));
        assert!(raw.contains("\"createdAt\""));
        assert!(raw.contains("\"updatedAt\""));
    }

    #[test]
    fn malformed_payloads_decode_as_absent() {
        assert!(decode("").is_none());
        assert!(decode("not json").is_none());
        assert!(decode("{\"version\":1}").is_none());
        assert!(decode("{\"version\":1,\"notes\":\"nope\",\"selectedId\":null}").is_none());
    }

    #[test]
    fn unrecognized_version_decodes_as_absent() {
        assert!(decode("{\"version\":2,\"notes\":[],\"selectedId\":null}").is_none());
    }

    #[test]
    fn missing_selected_id_decodes_as_none() {
        let envelope = decode("{\"version\":1,\"notes\":[]}").expect("shape should decode");
        assert_eq!(envelope.selected_id, None);
    }
}
