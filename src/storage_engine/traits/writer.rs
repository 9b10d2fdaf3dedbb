use crate::storage_engine::{InsertOutcome, Result};

/// Mutating operations.
///
/// Every method takes `&mut self`: the engine keeps no lock of its own, so
/// exclusive access to the handle is what serializes writers within a
/// process. Sharing one file between threads requires wrapping the handle in
/// a `Mutex`. Nothing guards against another process writing the same file.
pub trait SlotStoreWriter {
    /// Stores a new record.
    ///
    /// Walks the probe sequence from the key's home slot, remembering the
    /// first deleted slot seen. The record lands in that tombstone if there
    /// was one, otherwise in the first empty slot, which keeps clusters from
    /// growing past reusable space.
    ///
    /// # Parameters
    /// - `key`: The record key.
    /// - `payload`: UTF-8 text of at most 250 bytes.
    ///
    /// # Returns
    /// - `Ok(InsertOutcome::Inserted { slot })`: The slot written.
    /// - `Ok(InsertOutcome::DuplicateKey)`: `key` is already stored; nothing
    ///   was written.
    /// - `Ok(InsertOutcome::Full)`: No empty or deleted slot remains.
    /// - `Err(StoreError::PayloadTooLarge)`: The payload does not fit a slot.
    /// - `Err(StoreError)`: On I/O failure.
    fn insert(&mut self, key: i32, payload: &str) -> Result<InsertOutcome>;

    /// Replaces the payload of an existing record in place.
    ///
    /// The key and slot do not change.
    ///
    /// # Returns
    /// - `Ok(Some(slot))`: The slot that was rewritten.
    /// - `Ok(None)`: `key` is not stored.
    /// - `Err(StoreError::PayloadTooLarge)`: The payload does not fit a slot.
    fn update(&mut self, key: i32, payload: &str) -> Result<Option<u32>>;

    /// Marks the record for `key` as deleted.
    ///
    /// Only the status byte is rewritten. The key and payload bytes remain on
    /// disk until an insert reuses the slot.
    ///
    /// # Returns
    /// - `Ok(Some(slot))`: The slot that became a tombstone.
    /// - `Ok(None)`: `key` is not stored.
    fn delete(&mut self, key: i32) -> Result<Option<u32>>;
}
