//! Identifier and wall-clock helpers.
//!
//! # Responsibility
//! - Mint unique-enough note identifiers for a single device.
//! - Provide the epoch-millisecond timestamps the store stamps onto notes.
//!
//! # Invariants
//! - `new_id()` never returns the empty string.
//! - Identifiers are opaque: callers must not parse structure out of them.

use std::time::{SystemTime, UNIX_EPOCH};
use uuid::Uuid;

const ID_RANDOM_LEN: usize = 8;

/// Returns the current wall-clock time in milliseconds since the Unix epoch.
///
/// No monotonicity guarantee beyond what the host clock provides.
pub fn now_ms() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_millis() as i64)
        .unwrap_or(0)
}

/// Mints a fresh note identifier.
///
/// The id joins a base36-encoded timestamp with a short random component, so
/// collisions within one device's lifetime are overwhelmingly improbable.
/// Not cryptographically secure and not defended beyond that improbability.
pub fn new_id() -> String {
    let random = Uuid::new_v4().simple().to_string();
    format!("{}-{}", to_base36(now_ms().max(0) as u64), &random[..ID_RANDOM_LEN])
}

fn to_base36(mut value: u64) -> String {
    const DIGITS: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";
    if value == 0 {
        return "0".to_string();
    }
    let mut out = Vec::new();
    while value > 0 {
        out.push(DIGITS[(value % 36) as usize]);
        value /= 36;
    }
    out.reverse();
    String::from_utf8(out).unwrap_or_default()
}
