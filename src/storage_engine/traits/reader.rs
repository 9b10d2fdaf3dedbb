use crate::storage_engine::{Result, SlotIterator, SlotStats, StoredRecord};

pub trait SlotStoreReader {
    /// Looks up the live record stored under `key`.
    ///
    /// Walks the probe sequence from the key's home slot. Occupied slots
    /// holding other keys and deleted slots are stepped over; the walk ends
    /// at the first empty slot or after visiting every slot.
    ///
    /// # Parameters
    /// - `key`: The record key.
    ///
    /// # Returns
    /// - `Ok(Some(StoredRecord))`: The record and the slot holding it.
    /// - `Ok(None)`: No occupied slot holds `key`.
    /// - `Err(StoreError)`: On I/O failure or a corrupt slot on the probe path.
    fn search(&self, key: i32) -> Result<Option<StoredRecord>>;

    /// Checks whether `key` is currently stored.
    ///
    /// Equivalent to `search(key)?.is_some()`.
    fn exists(&self, key: i32) -> Result<bool>;

    /// Collects every occupied slot, sorted by key.
    ///
    /// This is a **full scan** in physical slot order; the hash function is
    /// not consulted. Sorting makes the result independent of where
    /// collisions happened to place each record.
    fn read_all(&self) -> Result<Vec<StoredRecord>>;

    /// Counts occupied, deleted and empty slots.
    ///
    /// Only the status byte of each slot is read.
    fn stats(&self) -> Result<SlotStats>;

    /// Returns an iterator over all slots in physical order, including empty
    /// and deleted ones.
    ///
    /// # Errors
    /// - [`crate::StoreError::Truncated`] if the file has shrunk since it was
    ///   opened.
    fn iter_slots(&self) -> Result<SlotIterator>;
}
