use crate::constants::*;
use std::fmt;

/// The 8-byte header at offset 0 of every hashslot file.
///
/// ## Layout
///
/// - **Offset `0` → `4`**: **Magic** (`u32`, little-endian, [`MAGIC`])
/// - **Offset `4` → `8`**: **Total Slots** (`i32`, little-endian, must be `> 0`)
///
/// The slot count is fixed when the file is created. The table never grows,
/// so every slot offset can be computed from the header alone.
///
/// Fields are private: a `FileHeader` only comes from [`FileHeader::new`] or
/// [`FileHeader::deserialize`], so `total_slots` always fits the signed
/// on-disk field.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FileHeader {
    magic: u32,
    total_slots: u32,
}

/// Reason a byte buffer was rejected as a header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeaderDefect {
    /// Fewer than [`HEADER_SIZE`] bytes were available.
    TooShort(usize),
    BadMagic(u32),
    /// The stored slot count was zero or negative.
    NonPositiveSlotCount(i32),
}

impl fmt::Display for HeaderDefect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HeaderDefect::TooShort(len) => {
                write!(f, "header too short: {len} of {HEADER_SIZE} bytes")
            }
            HeaderDefect::BadMagic(magic) => {
                write!(f, "bad magic {magic:#010x} (expected {MAGIC:#010x})")
            }
            HeaderDefect::NonPositiveSlotCount(n) => {
                write!(f, "slot count must be positive, found {n}")
            }
        }
    }
}

impl std::error::Error for HeaderDefect {}

impl FileHeader {
    /// Builds a header for a table of `total_slots` slots.
    ///
    /// Returns `None` if `total_slots` is zero or does not fit the signed
    /// 32-bit on-disk field.
    pub fn new(total_slots: u32) -> Option<Self> {
        if total_slots == 0 || total_slots > i32::MAX as u32 {
            return None;
        }
        Some(Self {
            magic: MAGIC,
            total_slots,
        })
    }

    #[inline]
    pub fn magic(&self) -> u32 {
        self.magic
    }

    /// Number of slots in the table, always in `1..=i32::MAX`.
    #[inline]
    pub fn total_slots(&self) -> u32 {
        self.total_slots
    }

    /// Serializes the header into its fixed 8-byte form.
    #[inline]
    pub fn serialize(&self) -> [u8; HEADER_SIZE] {
        let mut buf = [0u8; HEADER_SIZE];

        buf[MAGIC_RANGE].copy_from_slice(&self.magic.to_le_bytes());
        buf[TOTAL_SLOTS_RANGE].copy_from_slice(&(self.total_slots as i32).to_le_bytes());

        buf
    }

    /// Parses and validates a header from the start of `data`.
    ///
    /// Bytes past [`HEADER_SIZE`] are ignored, so the whole file prefix may be
    /// passed in.
    ///
    /// # Errors
    /// - [`HeaderDefect::TooShort`] if `data` is shorter than the header.
    /// - [`HeaderDefect::BadMagic`] if the magic does not match.
    /// - [`HeaderDefect::NonPositiveSlotCount`] if the slot count is `<= 0`.
    pub fn deserialize(data: &[u8]) -> Result<Self, HeaderDefect> {
        if data.len() < HEADER_SIZE {
            return Err(HeaderDefect::TooShort(data.len()));
        }

        let magic = u32::from_le_bytes(read_array(&data[MAGIC_RANGE]));
        if magic != MAGIC {
            return Err(HeaderDefect::BadMagic(magic));
        }

        let total_slots = i32::from_le_bytes(read_array(&data[TOTAL_SLOTS_RANGE]));
        if total_slots <= 0 {
            return Err(HeaderDefect::NonPositiveSlotCount(total_slots));
        }

        Ok(Self {
            magic,
            total_slots: total_slots as u32,
        })
    }

    /// Length in bytes of a complete file described by this header.
    #[inline]
    pub fn expected_file_len(&self) -> u64 {
        file_len_for(self.total_slots)
    }
}

#[inline]
pub(crate) fn read_array<const N: usize>(bytes: &[u8]) -> [u8; N] {
    let mut out = [0u8; N];
    out.copy_from_slice(bytes);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serialized_header_starts_with_darf() {
        let header = FileHeader::new(7).unwrap();
        let bytes = header.serialize();

        assert_eq!(&bytes[0..4], b"DARF");
        assert_eq!(&bytes[4..8], &7i32.to_le_bytes());
        assert_eq!(FileHeader::deserialize(&bytes), Ok(header));
    }

    #[test]
    fn zero_or_oversized_slot_counts_are_refused() {
        assert!(FileHeader::new(0).is_none());
        assert!(FileHeader::new(i32::MAX as u32 + 1).is_none());
        assert!(FileHeader::new(i32::MAX as u32).is_some());
    }

    #[test]
    fn short_buffer_is_rejected() {
        assert_eq!(
            FileHeader::deserialize(&[0x44, 0x41, 0x52]),
            Err(HeaderDefect::TooShort(3))
        );
    }

    #[test]
    fn wrong_magic_is_rejected() {
        let mut bytes = FileHeader::new(11).unwrap().serialize();
        bytes[0] = b'X';

        assert!(matches!(
            FileHeader::deserialize(&bytes),
            Err(HeaderDefect::BadMagic(_))
        ));
    }

    #[test]
    fn non_positive_slot_count_is_rejected() {
        let mut bytes = FileHeader::new(11).unwrap().serialize();

        bytes[TOTAL_SLOTS_RANGE].copy_from_slice(&0i32.to_le_bytes());
        assert_eq!(
            FileHeader::deserialize(&bytes),
            Err(HeaderDefect::NonPositiveSlotCount(0))
        );

        bytes[TOTAL_SLOTS_RANGE].copy_from_slice(&(-5i32).to_le_bytes());
        assert_eq!(
            FileHeader::deserialize(&bytes),
            Err(HeaderDefect::NonPositiveSlotCount(-5))
        );
    }

    #[test]
    fn expected_file_len_covers_every_slot() {
        let header = FileHeader::new(3).unwrap();
        assert_eq!(header.expected_file_len(), 8 + 3 * 256);
    }

    #[test]
    fn largest_slot_count_stays_positive_on_disk() {
        let header = FileHeader::new(i32::MAX as u32).unwrap();
        let bytes = header.serialize();

        assert_eq!(&bytes[TOTAL_SLOTS_RANGE], &i32::MAX.to_le_bytes());

        let decoded = FileHeader::deserialize(&bytes).unwrap();
        assert_eq!(decoded.magic(), MAGIC);
        assert_eq!(decoded.total_slots(), i32::MAX as u32);
    }
}
