use analytics::{AnalyticsError, EventCorrelationEngine, RegimeSplit, ReturnsVolatilityEngine, metrics, regime};
use configuration::Config;
use core_types::{ChangePointSummary, CorrelationRecord, EventRecord, MetricsSnapshot, PriceRecord, PriceRow};
use loader::{DataLoader, LoadError, SummaryReader};

use crate::context::AnalysisContext;

/// Read-only facade over the analytics pipeline, one method per published dataset.
///
/// Every call rebuilds an [`AnalysisContext`] from the files on disk, so repeated
/// calls agree as long as the files do not change and a file update is visible
/// on the very next call. Missing data degrades to empty results, never to an error.
#[derive(Debug, Clone)]
pub struct QueryService {
    loader: DataLoader,
    summary: SummaryReader,
    returns: ReturnsVolatilityEngine,
    correlation: EventCorrelationEngine,
}

impl QueryService {
    pub fn new(
        loader: DataLoader,
        summary: SummaryReader,
        returns: ReturnsVolatilityEngine,
        correlation: EventCorrelationEngine,
    ) -> Self {
        Self {
            loader,
            summary,
            returns,
            correlation,
        }
    }

    pub fn from_config(config: &Config) -> Result<Self, AnalyticsError> {
        let data = &config.data;
        let params = &config.analytics;
        Ok(Self::new(
            DataLoader::new(&data.prices_path, &data.events_path),
            SummaryReader::new(&data.change_point_summary_path),
            ReturnsVolatilityEngine::new(params.volatility_window, params.trading_days_per_year)?,
            EventCorrelationEngine::new(params.event_window_days)?,
        ))
    }

    fn context(&self) -> AnalysisContext {
        AnalysisContext::build(&self.loader, &self.returns)
    }

    /// `list prices`: the series with undefined returns/volatility published as zero.
    pub fn prices(&self) -> Vec<PriceRow> {
        self.context().series.iter().map(PriceRow::from).collect()
    }

    /// `list events`: the catalog in source order.
    pub fn events(&self) -> Vec<EventRecord> {
        self.context().events
    }

    /// `get change-point summary`: the model's document, or a sentinel state.
    pub fn change_points(&self) -> ChangePointSummary {
        self.summary.read()
    }

    /// `list event correlations`: empty when either dataset is empty.
    pub fn correlations(&self) -> Vec<CorrelationRecord> {
        let ctx = self.context();
        self.correlation.correlate(&ctx.series, &ctx.events)
    }

    /// Why the datasets currently load as empty tables, if they do.
    pub fn load_failure(&self) -> Option<LoadError> {
        self.context().failure
    }

    /// `get metrics snapshot`: `None` when there is no price data.
    pub fn metrics(&self) -> Option<MetricsSnapshot> {
        let ctx = self.context();
        if ctx.series.is_empty() {
            return None;
        }
        metrics::snapshot(&ctx.series, self.summary.read())
    }

    /// Each cataloged event with the highest volatility seen in its after-window.
    pub fn event_peaks(&self) -> Vec<(EventRecord, Option<f64>)> {
        let ctx = self.context();
        ctx.events
            .into_iter()
            .map(|event| {
                let peak = self.correlation.peak_volatility_after(&ctx.series, event.date);
                (event, peak)
            })
            .collect()
    }

    /// Log-return distribution before and after the modeled change point.
    pub fn regime(&self) -> Result<RegimeSplit, AnalyticsError> {
        let prices: Vec<PriceRecord> = self
            .context()
            .series
            .iter()
            .map(|p| PriceRecord::new(p.date, p.price))
            .collect();
        regime::split_at_change_point(&prices, &self.summary.read())
    }
}
