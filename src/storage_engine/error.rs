use hashslot_format::HeaderDefect;
use hashslot_format::constants::PAYLOAD_CAPACITY;
use std::path::PathBuf;
use thiserror::Error;

/// Fatal failures of the storage engine.
///
/// Duplicate keys, a full table and missing keys are *not* errors; they are
/// reported through [`crate::InsertOutcome`] and `Option` return values.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("{path:?} is not a hashslot file: {defect}")]
    InvalidFormat { path: PathBuf, defect: HeaderDefect },

    #[error("{path:?} is truncated: expected {expected} bytes, found {actual}")]
    Truncated {
        path: PathBuf,
        expected: u64,
        actual: u64,
    },

    #[error("slot count must be between 1 and {max}, got {requested}", max = i32::MAX)]
    InvalidSlotCount { requested: u64 },

    #[error("payload is {len} bytes, slot capacity is {max}", max = PAYLOAD_CAPACITY)]
    PayloadTooLarge { len: usize },

    #[error("slot {slot} has unknown status byte {status:#04x}")]
    CorruptSlot { slot: u32, status: u8 },
}

pub type Result<T> = std::result::Result<T, StoreError>;
