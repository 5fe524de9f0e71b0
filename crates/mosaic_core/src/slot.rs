//! Slot identifiers.

use serde::{Deserialize, Serialize};

/// Per-slot request sequence number. The first request in a slot is 1.
pub type Sequence = u64;

/// A logical generation target, such as the current chat turn or the image
/// preview.
///
/// At most one request is in flight and one result is current per slot.
#[derive(
    Debug,
    Clone,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    derive_more::Display,
    derive_more::From,
)]
#[serde(transparent)]
pub struct SlotId(String);

impl SlotId {
    /// Create a slot id.
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// Borrow the slot name.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for SlotId {
    fn from(name: &str) -> Self {
        Self(name.to_string())
    }
}
