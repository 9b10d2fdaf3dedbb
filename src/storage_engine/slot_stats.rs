use hashslot_format::SlotStatus;
use serde::Serialize;

/// Occupancy counters produced by a full status scan.
///
/// `occupied + deleted + empty` always equals the table's slot count.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SlotStats {
    pub occupied: u32,
    pub deleted: u32,
    pub empty: u32,
}

impl SlotStats {
    #[inline]
    pub fn record(&mut self, status: SlotStatus) {
        match status {
            SlotStatus::Occupied => self.occupied += 1,
            SlotStatus::Deleted => self.deleted += 1,
            SlotStatus::Empty => self.empty += 1,
        }
    }

    #[inline]
    pub fn total(&self) -> u32 {
        self.occupied + self.deleted + self.empty
    }

    /// Ratio of occupied slots to all slots. Tombstones do not count.
    pub fn load_factor(&self) -> f64 {
        match self.total() {
            0 => 0.0,
            total => self.occupied as f64 / total as f64,
        }
    }
}
