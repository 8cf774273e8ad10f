//! Loose identifier handling
//!
//! Identification inputs arrive from heterogeneous, untrusted callers: ids
//! may be malformed strings and names may carry incidental whitespace. A
//! malformed id is treated the same as an absent one, so it can never mask
//! a usable name.

use uuid::Uuid;

/// Parse an optional caller-supplied id, treating malformed input as absent.
pub(crate) fn parse_loose_id(raw: Option<&str>) -> Option<Uuid> {
    Uuid::parse_str(raw?.trim()).ok()
}

/// Trimmed, non-empty view of an optional caller-supplied name.
pub(crate) fn non_empty_trimmed(raw: Option<&str>) -> Option<&str> {
    let trimmed = raw?.trim();
    (!trimmed.is_empty()).then_some(trimmed)
}
