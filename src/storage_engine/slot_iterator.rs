use crate::storage_engine::constants::*;
use crate::storage_engine::{Result, StoreError};
use hashslot_format::SlotRecord;
use memmap2::Mmap;

/// Iterator over every slot of a hashslot file in physical order.
///
/// The iterator owns a read-only memory map taken when it was created. It
/// ignores the hash function entirely: slot `0` comes first, slot
/// `total_slots - 1` last, whatever their status.
///
/// ## Behavior:
/// - Yields `(slot_index, SlotRecord)` for empty, occupied and deleted slots.
/// - Yields [`StoreError::CorruptSlot`] for a slot with an unknown status
///   byte, then carries on with the next slot.
pub struct SlotIterator {
    mmap: Mmap,
    total_slots: u32,
    cursor: u32,
}

impl SlotIterator {
    /// Wraps `mmap`, which must already have been checked to hold
    /// `total_slots` full slots.
    pub(crate) fn new(mmap: Mmap, total_slots: u32) -> Self {
        debug_assert!(mmap.len() as u64 >= file_len_for(total_slots));
        Self {
            mmap,
            total_slots,
            cursor: 0,
        }
    }
}

impl Iterator for SlotIterator {
    type Item = Result<(u32, SlotRecord)>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.cursor >= self.total_slots {
            return None;
        }

        let slot = self.cursor;
        self.cursor += 1;

        let start = slot_offset(slot) as usize;
        let bytes = &self.mmap[start..start + SLOT_SIZE];

        Some(
            SlotRecord::deserialize(bytes)
                .map(|record| (slot, record))
                .map_err(|unknown| StoreError::CorruptSlot {
                    slot,
                    status: unknown.0,
                }),
        )
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = (self.total_slots - self.cursor) as usize;
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for SlotIterator {}
