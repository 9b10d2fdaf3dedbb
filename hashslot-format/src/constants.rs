use std::ops::Range;

/// Identifies a hashslot file. Stored little-endian, so the first four bytes
/// on disk read `DARF`.
pub const MAGIC: u32 = 0x4652_4144;

// Header: [magic: u32 | total_slots: i32]
pub const HEADER_SIZE: usize = 8;
pub const MAGIC_RANGE: Range<usize> = 0..4;
pub const TOTAL_SLOTS_RANGE: Range<usize> = 4..8;

// Slot: [status: u8 | key: i32 | payload: 250 bytes | reserved: u8]
pub const SLOT_SIZE: usize = 256;
pub const STATUS_OFFSET: usize = 0;
pub const KEY_RANGE: Range<usize> = 1..5;
pub const PAYLOAD_RANGE: Range<usize> = 5..255;
pub const RESERVED_OFFSET: usize = 255;

// Define payload capacity explicitly since `PAYLOAD_RANGE.len()` isn't `const`
pub const PAYLOAD_CAPACITY: usize = PAYLOAD_RANGE.end - PAYLOAD_RANGE.start;

/// Slot count used when the caller does not pick one.
pub const DEFAULT_SLOT_COUNT: u32 = 101;

/// Prime table sizes offered to users creating a new file. Prime sizes keep
/// `key mod n` from mapping regular key patterns onto the same few slots.
pub const SUGGESTED_SLOT_COUNTS: [u32; 5] = [101, 251, 503, 1009, 2003];

/// Absolute file offset of slot `index`.
#[inline]
pub const fn slot_offset(index: u32) -> u64 {
    HEADER_SIZE as u64 + index as u64 * SLOT_SIZE as u64
}

/// Exact length of a well-formed file holding `total_slots` slots.
#[inline]
pub const fn file_len_for(total_slots: u32) -> u64 {
    slot_offset(total_slots)
}
