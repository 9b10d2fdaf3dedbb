use std::iter::FusedIterator;

/// Home slot of `key` in a table of `total_slots` slots: `|key rem total_slots|`.
///
/// The remainder is truncated (Rust's `%`), so `-8` in a 7-slot table hashes
/// to `1`, not `6`. Since `total_slots > 0` the remainder's magnitude is
/// always below `total_slots`, which keeps `i32::MIN` well-defined.
///
/// # Panics
/// - If `total_slots` is `0`.
#[inline]
pub fn home_slot(key: i32, total_slots: u32) -> u32 {
    assert!(total_slots > 0, "slot count must be positive");
    (i64::from(key) % i64::from(total_slots)).unsigned_abs() as u32
}

/// Linear probe order for one key.
///
/// Yields `total_slots` indices starting at [`home_slot`] and stepping by one
/// with wraparound, so every slot is visited exactly once and the walk always
/// terminates. Two sequences built from the same key and table size yield
/// the same order.
#[derive(Debug, Clone)]
pub struct ProbeSequence {
    start: u32,
    total_slots: u32,
    step: u32,
}

impl ProbeSequence {
    pub fn new(key: i32, total_slots: u32) -> Self {
        Self {
            start: home_slot(key, total_slots),
            total_slots,
            step: 0,
        }
    }

    /// Slot the walk starts from.
    #[inline]
    pub fn start(&self) -> u32 {
        self.start
    }
}

impl Iterator for ProbeSequence {
    type Item = u32;

    fn next(&mut self) -> Option<Self::Item> {
        if self.step == self.total_slots {
            return None;
        }
        let slot = ((self.start as u64 + self.step as u64) % self.total_slots as u64) as u32;
        self.step += 1;
        Some(slot)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = (self.total_slots - self.step) as usize;
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for ProbeSequence {}

impl FusedIterator for ProbeSequence {}
