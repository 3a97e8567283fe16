pub mod structs;
pub mod summary;

// Re-export the core types to provide a clean public API.
pub use structs::{
    CorrelationRecord, EventRecord, MetricsSnapshot, PriceRecord, PriceRow, SeriesPoint,
};
pub use summary::ChangePointSummary;
