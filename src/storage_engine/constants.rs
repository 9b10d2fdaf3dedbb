pub use hashslot_format::constants::*;

/// Buffer size used when zero-filling a freshly created table.
pub const CREATE_WRITE_BUFFER_SIZE: usize = 64 * 1024; // 64 KB
