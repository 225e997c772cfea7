//! Unique identifier generation

use uuid::Uuid;

/// Generate a new unique record id.
///
/// Repositories leave id assignment to the caller; this is the one id
/// source they should use. Timestamp-derived ids collide under rapid
/// successive creates; random UUIDs do not.
#[must_use]
pub fn new_id() -> String {
    Uuid::new_v4().to_string()
}
