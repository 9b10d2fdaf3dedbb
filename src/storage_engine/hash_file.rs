use crate::storage_engine::constants::*;
use crate::storage_engine::traits::{SlotStoreReader, SlotStoreWriter};
use crate::storage_engine::{
    InsertOutcome, ProbeSequence, Result, SlotIterator, SlotStats, StoreError, StoredRecord,
};
use crate::utils::verify_file_existence;
use hashslot_format::{FileHeader, SlotRecord, SlotStatus, payload_fits};
use memmap2::Mmap;
use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Read, Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Direct-access storage engine over a single hashed file.
///
/// The file holds an 8-byte header followed by a fixed number of 256-byte
/// slots. A record with key `k` lives on the linear probe path that starts at
/// `|k rem total_slots|`.
///
/// A `HashFile` is only a validated path plus the slot count read from the
/// header. Every operation opens the file, seeks to the slots it needs and
/// closes it again before returning; no state is cached between calls, so
/// the file on disk is always the single source of truth.
#[derive(Debug)]
pub struct HashFile {
    path: PathBuf,
    total_slots: u32,
}

/// Where a probe walk stopped.
#[derive(Debug, Default)]
struct ProbeOutcome {
    /// Occupied slot holding the key.
    found: Option<(u32, SlotRecord)>,
    /// First empty slot reached; the walk stops there.
    first_empty: Option<u32>,
    /// First tombstone passed before stopping.
    first_deleted: Option<u32>,
}

impl HashFile {
    /// Creates (or truncates) a file at `path` holding `total_slots` empty
    /// slots and returns a handle to it.
    ///
    /// A prime slot count spreads keys best, but any positive count is
    /// accepted.
    ///
    /// # Errors
    /// - [`StoreError::InvalidSlotCount`] if `total_slots` is `0` or does not
    ///   fit the signed 32-bit header field. No file is touched.
    /// - [`StoreError::Io`] if the file cannot be written.
    pub fn create(path: &Path, total_slots: u32) -> Result<Self> {
        let header = FileHeader::new(total_slots).ok_or(StoreError::InvalidSlotCount {
            requested: total_slots as u64,
        })?;

        let file = OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .open(path)?;

        let mut writer = BufWriter::with_capacity(CREATE_WRITE_BUFFER_SIZE, file);
        writer.write_all(&header.serialize())?;

        let empty_slot = [0u8; SLOT_SIZE];
        for _ in 0..total_slots {
            writer.write_all(&empty_slot)?;
        }
        writer.flush()?;

        info!(
            path = %path.display(),
            total_slots,
            bytes = header.expected_file_len(),
            "created hash file"
        );

        Ok(Self {
            path: path.to_path_buf(),
            total_slots,
        })
    }

    /// Opens an existing file after validating its header and length.
    ///
    /// # Errors
    /// - [`StoreError::Io`] if the file is missing or unreadable.
    /// - [`StoreError::InvalidFormat`] if the header is short, carries the
    ///   wrong magic, or declares a non-positive slot count.
    /// - [`StoreError::Truncated`] if the file is shorter than the header
    ///   says it should be.
    pub fn open(path: &Path) -> Result<Self> {
        verify_file_existence(path)?;

        let mut file = File::open(path)?;
        let header = Self::read_header_from(&mut file).map_err(|err| match err {
            HeaderRead::Io(err) => StoreError::Io(err),
            HeaderRead::Defect(defect) => {
                warn!(path = %path.display(), %defect, "rejected hash file header");
                StoreError::InvalidFormat {
                    path: path.to_path_buf(),
                    defect,
                }
            }
        })?;

        let handle = Self {
            path: path.to_path_buf(),
            total_slots: header.total_slots(),
        };
        handle.check_length(&file)?;

        info!(
            path = %path.display(),
            total_slots = header.total_slots(),
            "opened hash file"
        );

        Ok(handle)
    }

    /// Probes `path` for a valid header without building a handle.
    ///
    /// This never fails: a missing file, a file shorter than the header, a
    /// magic mismatch or a non-positive slot count all yield `None`.
    ///
    /// # Returns
    /// - `Some(header)` if the header is valid.
    /// - `None` otherwise.
    pub fn read_header(path: &Path) -> Option<FileHeader> {
        let mut file = File::open(path).ok()?;
        match Self::read_header_from(&mut file) {
            Ok(header) => Some(header),
            Err(HeaderRead::Io(err)) => {
                debug!(path = %path.display(), %err, "header unreadable");
                None
            }
            Err(HeaderRead::Defect(defect)) => {
                debug!(path = %path.display(), %defect, "header invalid");
                None
            }
        }
    }

    /// Returns the storage file path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Number of slots fixed at creation time.
    pub fn total_slots(&self) -> u32 {
        self.total_slots
    }

    /// Current size of the file in bytes.
    pub fn file_size(&self) -> Result<u64> {
        Ok(std::fs::metadata(&self.path)?.len())
    }

    fn read_header_from(file: &mut File) -> std::result::Result<FileHeader, HeaderRead> {
        let mut buf = [0u8; HEADER_SIZE];
        let mut filled = 0;
        while filled < HEADER_SIZE {
            match file.read(&mut buf[filled..]) {
                Ok(0) => break,
                Ok(n) => filled += n,
                Err(err) if err.kind() == std::io::ErrorKind::Interrupted => continue,
                Err(err) => return Err(HeaderRead::Io(err)),
            }
        }
        FileHeader::deserialize(&buf[..filled]).map_err(HeaderRead::Defect)
    }

    fn check_length(&self, file: &File) -> Result<()> {
        let expected = file_len_for(self.total_slots);
        let actual = file.metadata()?.len();
        if actual < expected {
            return Err(StoreError::Truncated {
                path: self.path.clone(),
                expected,
                actual,
            });
        }
        Ok(())
    }

    fn open_read(&self) -> Result<File> {
        Ok(File::open(&self.path)?)
    }

    fn open_read_write(&self) -> Result<File> {
        Ok(OpenOptions::new().read(true).write(true).open(&self.path)?)
    }

    /// Maps the whole file read-only for a physical-order scan.
    ///
    /// # Safety
    /// - The mapping is only valid while no one truncates the file. The
    ///   length is re-checked here so a shrunken file is reported instead of
    ///   being read out of bounds.
    fn map_file(&self) -> Result<Mmap> {
        let file = self.open_read()?;
        self.check_length(&file)?;
        let mmap = unsafe { memmap2::MmapOptions::new().map(&file)? };
        Ok(mmap)
    }

    fn read_slot(file: &mut File, slot: u32) -> Result<SlotRecord> {
        let mut buf = [0u8; SLOT_SIZE];
        file.seek(SeekFrom::Start(slot_offset(slot)))?;
        file.read_exact(&mut buf)?;

        SlotRecord::deserialize(&buf).map_err(|unknown| StoreError::CorruptSlot {
            slot,
            status: unknown.0,
        })
    }

    fn write_slot(file: &mut File, slot: u32, record: &SlotRecord) -> Result<()> {
        file.seek(SeekFrom::Start(slot_offset(slot)))?;
        file.write_all(&record.serialize())?;
        Ok(())
    }

    /// Walks the probe path of `key` until it finds the key, reaches an empty
    /// slot, or has visited every slot.
    ///
    /// Deleted slots never stop the walk: a key inserted past a slot that was
    /// later tombstoned must stay reachable.
    fn probe(&self, file: &mut File, key: i32) -> Result<ProbeOutcome> {
        let mut outcome = ProbeOutcome::default();

        for slot in ProbeSequence::new(key, self.total_slots) {
            let record = Self::read_slot(file, slot)?;

            match record.status {
                SlotStatus::Occupied if record.key == key => {
                    outcome.found = Some((slot, record));
                    break;
                }
                SlotStatus::Occupied => {}
                SlotStatus::Deleted => {
                    outcome.first_deleted.get_or_insert(slot);
                }
                SlotStatus::Empty => {
                    outcome.first_empty = Some(slot);
                    break;
                }
            }
        }

        Ok(outcome)
    }

    fn check_payload(payload: &str) -> Result<()> {
        if payload_fits(payload) {
            Ok(())
        } else {
            Err(StoreError::PayloadTooLarge { len: payload.len() })
        }
    }
}

/// Failure while reading the header: either the read itself failed or the
/// bytes did not form a valid header.
enum HeaderRead {
    Io(std::io::Error),
    Defect(hashslot_format::HeaderDefect),
}

impl SlotStoreReader for HashFile {
    fn search(&self, key: i32) -> Result<Option<StoredRecord>> {
        let mut file = self.open_read()?;
        let outcome = self.probe(&mut file, key)?;

        Ok(outcome.found.map(|(slot, record)| StoredRecord {
            slot,
            key: record.key,
            payload: record.payload,
        }))
    }

    fn exists(&self, key: i32) -> Result<bool> {
        Ok(self.search(key)?.is_some())
    }

    fn read_all(&self) -> Result<Vec<StoredRecord>> {
        let mut records = Vec::new();

        for item in self.iter_slots()? {
            let (slot, record) = item?;
            if record.is_occupied() {
                records.push(StoredRecord {
                    slot,
                    key: record.key,
                    payload: record.payload,
                });
            }
        }

        records.sort_by_key(|record| record.key);
        Ok(records)
    }

    fn stats(&self) -> Result<SlotStats> {
        let mmap = self.map_file()?;
        let mut stats = SlotStats::default();

        for slot in 0..self.total_slots {
            let byte = mmap[slot_offset(slot) as usize + STATUS_OFFSET];
            let status = SlotStatus::try_from(byte)
                .map_err(|unknown| StoreError::CorruptSlot {
                    slot,
                    status: unknown.0,
                })?;
            stats.record(status);
        }

        Ok(stats)
    }

    fn iter_slots(&self) -> Result<SlotIterator> {
        Ok(SlotIterator::new(self.map_file()?, self.total_slots))
    }
}

impl SlotStoreWriter for HashFile {
    fn insert(&mut self, key: i32, payload: &str) -> Result<InsertOutcome> {
        Self::check_payload(payload)?;

        let mut file = self.open_read_write()?;
        let outcome = self.probe(&mut file, key)?;

        if outcome.found.is_some() {
            debug!(key, "insert rejected: duplicate key");
            return Ok(InsertOutcome::DuplicateKey);
        }

        // Prefer a tombstone closer to the home slot over the empty slot
        // that ended the walk.
        let Some(slot) = outcome.first_deleted.or(outcome.first_empty) else {
            warn!(key, total_slots = self.total_slots, "insert rejected: table full");
            return Ok(InsertOutcome::Full);
        };

        Self::write_slot(&mut file, slot, &SlotRecord::occupied(key, payload))?;
        debug!(
            key,
            slot,
            reused_tombstone = outcome.first_deleted.is_some(),
            "inserted record"
        );

        Ok(InsertOutcome::Inserted { slot })
    }

    fn update(&mut self, key: i32, payload: &str) -> Result<Option<u32>> {
        Self::check_payload(payload)?;

        let mut file = self.open_read_write()?;
        let Some((slot, _)) = self.probe(&mut file, key)?.found else {
            debug!(key, "update skipped: key not found");
            return Ok(None);
        };

        Self::write_slot(&mut file, slot, &SlotRecord::occupied(key, payload))?;
        debug!(key, slot, "updated record");

        Ok(Some(slot))
    }

    fn delete(&mut self, key: i32) -> Result<Option<u32>> {
        let mut file = self.open_read_write()?;
        let Some((slot, _)) = self.probe(&mut file, key)?.found else {
            debug!(key, "delete skipped: key not found");
            return Ok(None);
        };

        file.seek(SeekFrom::Start(slot_offset(slot) + STATUS_OFFSET as u64))?;
        file.write_all(&[SlotStatus::Deleted.as_byte()])?;
        debug!(key, slot, "marked slot deleted");

        Ok(Some(slot))
    }
}
