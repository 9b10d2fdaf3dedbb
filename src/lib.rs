//! # hashslot
//!
//! Direct-access storage for fixed-size records in a single binary file.
//!
//! A hashslot file is a hash table laid out on disk: an 8-byte header
//! followed by a fixed number of 256-byte slots. A record's key picks its home
//! slot (`|key rem total_slots|`); collisions are resolved by linear probing
//! with wraparound. Lookups, updates and deletes seek straight to the probe
//! path instead of scanning the file.
//!
//! ## File Layout
//!
//! ```text
//! Offset 0   : 4 bytes  magic ("DARF")
//! Offset 4   : 4 bytes  total_slots (i32, > 0)
//! Offset 8+  : total_slots × 256-byte slots
//!              byte 0      : status (0 = empty, 1 = occupied, 2 = deleted)
//!              bytes 1..5  : key (i32)
//!              bytes 5..255: UTF-8 payload, zero-padded
//!              byte 255    : reserved
//! ```
//!
//! All integers are little-endian.
//!
//! ## Deletion
//!
//! Deleting a record rewrites a single byte, turning the slot into a
//! *tombstone*. Tombstones never end a lookup, so records that probed past the
//! deleted slot remain reachable. A later insert whose probe path crosses a
//! tombstone reuses it.
//!
//! ## Usage
//!
//! ```
//! use hashslot::{HashFile, InsertOutcome, traits::{SlotStoreReader, SlotStoreWriter}};
//! use tempfile::tempdir;
//!
//! let dir = tempdir().unwrap();
//! let path = dir.path().join("catalog.dat");
//!
//! let mut store = HashFile::create(&path, 7).unwrap();
//! assert_eq!(store.insert(1, "a").unwrap(), InsertOutcome::Inserted { slot: 1 });
//! assert_eq!(store.insert(8, "b").unwrap(), InsertOutcome::Inserted { slot: 2 });
//!
//! store.delete(1).unwrap();
//! assert_eq!(store.search(8).unwrap().unwrap().payload, "b");
//!
//! let stats = store.stats().unwrap();
//! assert_eq!((stats.occupied, stats.deleted, stats.empty), (1, 1, 5));
//! ```
//!
//! ## Concurrency
//!
//! The engine holds no file handle or cache between calls and takes no locks.
//! Writers need `&mut HashFile`; to share one file across threads, put the
//! handle behind a single `Mutex`. Probe paths can span the whole table, so
//! finer-grained locking would not be sound. Multi-process access is not
//! supported.

pub mod catalog;
pub use catalog::{
    Catalog, CatalogError, CatalogProperties, CatalogRecord, ImportSummary, SaveOutcome,
};

pub mod cli;

pub mod storage_engine;
pub use storage_engine::*;

pub mod utils;

pub use hashslot_format::{FileHeader, HeaderDefect, SlotRecord, SlotStatus, constants};
