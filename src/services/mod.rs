pub mod export;
pub mod threshold_tracker;

pub use export::{records_to_csv, ExportError, RecordFilter};
pub use threshold_tracker::{merge_history, ThresholdEntry, ThresholdTracker, TrackedBin};
