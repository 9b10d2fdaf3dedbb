//! Record-level view of a hash file for presentation code.
//!
//! The storage engine reports duplicates, full tables and missing keys as
//! plain values. A catalog is keyed by positive item ids and folds those
//! outcomes into [`CatalogError`], which is what form-style callers want to
//! show a user.

use crate::storage_engine::traits::{SlotStoreReader, SlotStoreWriter};
use crate::storage_engine::{HashFile, InsertOutcome, StoreError, StoredRecord};
use hashslot_format::constants::SLOT_SIZE;
use serde::Serialize;
use std::path::Path;
use thiserror::Error;
use tracing::{info, warn};

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error("item id must be positive, got {0}")]
    InvalidId(i32),
    #[error("item {0} already exists")]
    DuplicateId(i32),
    #[error("catalog is full")]
    Full,
    #[error("item {0} not found")]
    NotFound(i32),
}

pub type Result<T> = std::result::Result<T, CatalogError>;

/// One catalog row as handed to presentation code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CatalogRecord {
    pub id: i32,
    pub content: String,
    /// Slot the record currently occupies in the hash file.
    pub slot: u32,
}

impl From<StoredRecord> for CatalogRecord {
    fn from(record: StoredRecord) -> Self {
        Self {
            id: record.key,
            content: record.payload,
            slot: record.slot,
        }
    }
}

/// Counts from a bulk load.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ImportSummary {
    pub inserted: usize,
    /// Rows skipped for a non-positive id, a duplicate id, an oversized
    /// payload or a full table.
    pub rejected: usize,
}

/// What [`Catalog::save`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveOutcome {
    Inserted { slot: u32 },
    Updated { slot: u32 },
}

/// File and table properties for a details view.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CatalogProperties {
    pub file_size: u64,
    pub total_slots: u32,
    pub slot_size: usize,
    pub occupied: u32,
    pub deleted: u32,
    pub empty: u32,
    pub load_factor: f64,
    pub hash_function: &'static str,
    pub collision_policy: &'static str,
}

pub struct Catalog {
    store: HashFile,
}

impl Catalog {
    /// Creates a catalog file with `total_slots` slots and loads `rows` into
    /// it in id order.
    ///
    /// Rows that cannot be stored are counted in
    /// [`ImportSummary::rejected`] instead of aborting the load.
    pub fn create<I>(path: &Path, total_slots: u32, rows: I) -> Result<(Self, ImportSummary)>
    where
        I: IntoIterator<Item = (i32, String)>,
    {
        let mut catalog = Self {
            store: HashFile::create(path, total_slots)?,
        };

        let mut rows: Vec<(i32, String)> = rows.into_iter().collect();
        rows.sort_by_key(|(id, _)| *id);

        let mut summary = ImportSummary::default();
        for (id, content) in rows {
            match catalog.add(id, &content) {
                Ok(_) => summary.inserted += 1,
                Err(CatalogError::Store(StoreError::PayloadTooLarge { len })) => {
                    warn!(id, len, "skipped row with oversized content");
                    summary.rejected += 1;
                }
                Err(CatalogError::Store(err)) => return Err(err.into()),
                Err(err) => {
                    warn!(id, %err, "skipped row");
                    summary.rejected += 1;
                }
            }
        }

        info!(
            inserted = summary.inserted,
            rejected = summary.rejected,
            "loaded initial catalog rows"
        );
        Ok((catalog, summary))
    }

    pub fn open(path: &Path) -> Result<Self> {
        Ok(Self {
            store: HashFile::open(path)?,
        })
    }

    /// Underlying storage engine handle.
    pub fn store(&self) -> &HashFile {
        &self.store
    }

    /// All records, sorted by id.
    pub fn records(&self) -> Result<Vec<CatalogRecord>> {
        Ok(self
            .store
            .read_all()?
            .into_iter()
            .map(CatalogRecord::from)
            .collect())
    }

    pub fn get(&self, id: i32) -> Result<CatalogRecord> {
        check_id(id)?;
        self.store
            .search(id)?
            .map(CatalogRecord::from)
            .ok_or(CatalogError::NotFound(id))
    }

    /// Adds a new item and returns its slot.
    pub fn add(&mut self, id: i32, content: &str) -> Result<u32> {
        check_id(id)?;
        match self.store.insert(id, content)? {
            InsertOutcome::Inserted { slot } => Ok(slot),
            InsertOutcome::DuplicateKey => Err(CatalogError::DuplicateId(id)),
            InsertOutcome::Full => Err(CatalogError::Full),
        }
    }

    /// Replaces the content of an existing item and returns its slot.
    pub fn edit(&mut self, id: i32, content: &str) -> Result<u32> {
        check_id(id)?;
        self.store
            .update(id, content)?
            .ok_or(CatalogError::NotFound(id))
    }

    /// Stores `content` under `id`, updating the item if it already exists.
    pub fn save(&mut self, id: i32, content: &str) -> Result<SaveOutcome> {
        check_id(id)?;
        if let Some(slot) = self.store.update(id, content)? {
            return Ok(SaveOutcome::Updated { slot });
        }
        match self.store.insert(id, content)? {
            InsertOutcome::Inserted { slot } => Ok(SaveOutcome::Inserted { slot }),
            InsertOutcome::Full => Err(CatalogError::Full),
            // `update` just missed the key, so only a concurrent writer can
            // have inserted it.
            InsertOutcome::DuplicateKey => Err(CatalogError::DuplicateId(id)),
        }
    }

    /// Deletes an item and returns the slot it occupied.
    pub fn remove(&mut self, id: i32) -> Result<u32> {
        check_id(id)?;
        self.store.delete(id)?.ok_or(CatalogError::NotFound(id))
    }

    pub fn properties(&self) -> Result<CatalogProperties> {
        let stats = self.store.stats()?;

        Ok(CatalogProperties {
            file_size: self.store.file_size()?,
            total_slots: self.store.total_slots(),
            slot_size: SLOT_SIZE,
            occupied: stats.occupied,
            deleted: stats.deleted,
            empty: stats.empty,
            load_factor: stats.load_factor(),
            hash_function: "|id rem total_slots|",
            collision_policy: "linear probing with tombstone reuse",
        })
    }
}

fn check_id(id: i32) -> Result<()> {
    if id > 0 {
        Ok(())
    } else {
        Err(CatalogError::InvalidId(id))
    }
}
