pub mod constants;

pub mod file_header;
pub use file_header::*;

pub mod slot_record;
pub use slot_record::*;

pub mod slot_status;
pub use slot_status::*;
