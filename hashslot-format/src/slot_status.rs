use std::fmt;

/// Lifecycle tag stored in the first byte of every slot.
///
/// A freshly created file is all zeroes, so every slot starts out `Empty`.
/// `Deleted` marks a tombstone: the key and payload bytes stay on disk but
/// the slot is treated as absent, and probe scans keep walking past it.
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SlotStatus {
    Empty = 0,
    Occupied = 1,
    Deleted = 2,
}

impl SlotStatus {
    #[inline]
    pub fn as_byte(self) -> u8 {
        self as u8
    }
}

/// Status byte that is not one of the three known tags.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UnknownStatus(pub u8);

impl fmt::Display for UnknownStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown slot status byte {:#04x}", self.0)
    }
}

impl std::error::Error for UnknownStatus {}

impl TryFrom<u8> for SlotStatus {
    type Error = UnknownStatus;

    fn try_from(byte: u8) -> Result<Self, Self::Error> {
        match byte {
            0 => Ok(SlotStatus::Empty),
            1 => Ok(SlotStatus::Occupied),
            2 => Ok(SlotStatus::Deleted),
            other => Err(UnknownStatus(other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_bytes_map_to_statuses() {
        assert_eq!(SlotStatus::try_from(0), Ok(SlotStatus::Empty));
        assert_eq!(SlotStatus::try_from(1), Ok(SlotStatus::Occupied));
        assert_eq!(SlotStatus::try_from(2), Ok(SlotStatus::Deleted));
        assert_eq!(SlotStatus::Deleted.as_byte(), 2);
    }

    #[test]
    fn unknown_byte_is_rejected() {
        assert_eq!(SlotStatus::try_from(7), Err(UnknownStatus(7)));
        assert_eq!(
            UnknownStatus(0xff).to_string(),
            "unknown slot status byte 0xff"
        );
    }
}
