pub mod writer;

pub use writer::write_normalized_to_xlsx;
pub use writer::write_raw_events_to_xlsx;
