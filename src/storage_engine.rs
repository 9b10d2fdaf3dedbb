mod constants;

mod error;
pub use error::{Result, StoreError};

mod hash_file;
pub use hash_file::HashFile;

mod probe_sequence;
pub use probe_sequence::{ProbeSequence, home_slot};

mod slot_iterator;
pub use slot_iterator::SlotIterator;

mod slot_stats;
pub use slot_stats::SlotStats;

mod stored_record;
pub use stored_record::{InsertOutcome, StoredRecord};

pub mod traits;
