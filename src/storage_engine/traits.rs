mod reader;
pub use reader::SlotStoreReader;

mod writer;
pub use writer::SlotStoreWriter;
