use crate::constants::*;
use crate::file_header::read_array;
use crate::slot_status::{SlotStatus, UnknownStatus};

/// One decoded 256-byte slot.
///
/// ## Slot Layout
///
/// - **Offset `0`**: **Status** (`u8`, see [`SlotStatus`])
/// - **Offset `1` → `5`**: **Key** (`i32`, little-endian)
/// - **Offset `5` → `255`**: **Payload** (UTF-8, left-justified, zero-padded)
/// - **Offset `255`**: reserved, always written as `0`
///
/// The key is only meaningful when the status is not `Empty`. A tombstoned
/// slot still carries the key and payload it held before deletion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlotRecord {
    pub status: SlotStatus,
    pub key: i32,
    pub payload: String,
}

impl SlotRecord {
    pub fn occupied(key: i32, payload: impl Into<String>) -> Self {
        Self {
            status: SlotStatus::Occupied,
            key,
            payload: payload.into(),
        }
    }

    /// Serializes the slot into its fixed-width form.
    ///
    /// Payloads longer than [`PAYLOAD_CAPACITY`] bytes are cut at the last
    /// UTF-8 character boundary that fits. Callers that must not lose data
    /// check [`payload_fits`] first.
    pub fn serialize(&self) -> [u8; SLOT_SIZE] {
        let mut buf = [0u8; SLOT_SIZE];

        buf[STATUS_OFFSET] = self.status.as_byte();
        buf[KEY_RANGE].copy_from_slice(&self.key.to_le_bytes());

        let payload = truncate_to_capacity(&self.payload);
        buf[PAYLOAD_RANGE.start..PAYLOAD_RANGE.start + payload.len()]
            .copy_from_slice(payload.as_bytes());

        buf
    }

    /// Decodes a slot from the first [`SLOT_SIZE`] bytes of `data`.
    ///
    /// Trailing zero bytes are stripped from the payload. Invalid UTF-8 is
    /// replaced rather than rejected, so slots written by other tools that
    /// split a multi-byte character still read back.
    ///
    /// # Panics
    /// - If `data` is shorter than [`SLOT_SIZE`].
    pub fn deserialize(data: &[u8]) -> Result<Self, UnknownStatus> {
        let status = SlotStatus::try_from(data[STATUS_OFFSET])?;
        let key = i32::from_le_bytes(read_array(&data[KEY_RANGE]));

        let field = &data[PAYLOAD_RANGE];
        let used = field.iter().rposition(|&b| b != 0).map_or(0, |i| i + 1);
        let payload = String::from_utf8_lossy(&field[..used]).into_owned();

        Ok(Self {
            status,
            key,
            payload,
        })
    }

    #[inline]
    pub fn is_occupied(&self) -> bool {
        self.status == SlotStatus::Occupied
    }
}

/// Returns `true` if `payload` is stored without truncation.
#[inline]
pub fn payload_fits(payload: &str) -> bool {
    payload.len() <= PAYLOAD_CAPACITY
}

/// Longest prefix of `payload` that fits the payload field without splitting
/// a character.
pub fn truncate_to_capacity(payload: &str) -> &str {
    if payload.len() <= PAYLOAD_CAPACITY {
        return payload;
    }
    let mut end = PAYLOAD_CAPACITY;
    while !payload.is_char_boundary(end) {
        end -= 1;
    }
    &payload[..end]
}
