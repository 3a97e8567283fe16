use analytics::ReturnsVolatilityEngine;
use core_types::{EventRecord, SeriesPoint};
use loader::{DataLoader, LoadError};

/// Everything one query derives from the source datasets.
///
/// Built fresh for every request and dropped with it; nothing in here is
/// shared with, or survives into, another request.
#[derive(Debug, Clone, Default)]
pub struct AnalysisContext {
    pub series: Vec<SeriesPoint>,
    pub events: Vec<EventRecord>,
    /// Why the tables are empty, when a source could not be read.
    pub failure: Option<LoadError>,
}

impl AnalysisContext {
    /// Loads both datasets and derives returns and volatility from the prices.
    pub fn build(loader: &DataLoader, engine: &ReturnsVolatilityEngine) -> Self {
        let data = loader.load();
        let series = engine.derive(&data.prices);
        tracing::debug!(points = series.len(), events = data.events.len(), "Analysis context built.");

        Self {
            series,
            events: data.events,
            failure: data.failure,
        }
    }
}
