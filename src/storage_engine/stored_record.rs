use serde::Serialize;

/// A live record together with the slot it occupies.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StoredRecord {
    pub slot: u32,
    pub key: i32,
    pub payload: String,
}

/// Result of [`crate::traits::SlotStoreWriter::insert`].
///
/// `DuplicateKey` and `Full` are ordinary outcomes the caller decides how to
/// handle; the file is left untouched in both cases.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InsertOutcome {
    /// Record written into slot `slot`.
    Inserted { slot: u32 },
    /// An occupied slot already holds the key.
    DuplicateKey,
    /// Every slot is occupied by another key.
    Full,
}

impl InsertOutcome {
    /// Slot written by the insert, if it succeeded.
    #[inline]
    pub fn slot(&self) -> Option<u32> {
        match self {
            InsertOutcome::Inserted { slot } => Some(*slot),
            _ => None,
        }
    }
}
