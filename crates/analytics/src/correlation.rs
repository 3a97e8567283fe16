use chrono::{Days, NaiveDate};
use core_types::{CorrelationRecord, EventRecord, SeriesPoint};

use crate::error::AnalyticsError;
use crate::stats::{self, round2};

/// Calendar width of each side of an event window.
pub const DEFAULT_EVENT_WINDOW_DAYS: u64 = 30;

/// Measures the average price and volatility on each side of cataloged events.
///
/// For an event on day `d` the windows are `[d - N, d)` ("before") and
/// `[d, d + N]` ("after"). The event day itself always belongs to "after".
#[derive(Debug, Clone, Copy)]
pub struct EventCorrelationEngine {
    window: Days,
}

impl Default for EventCorrelationEngine {
    fn default() -> Self {
        Self {
            window: Days::new(DEFAULT_EVENT_WINDOW_DAYS),
        }
    }
}

impl EventCorrelationEngine {
    pub fn new(window_days: u64) -> Result<Self, AnalyticsError> {
        if window_days == 0 {
            return Err(AnalyticsError::InvalidParameter(
                "event_window_days",
                "must be positive".to_string(),
            ));
        }
        Ok(Self {
            window: Days::new(window_days),
        })
    }

    /// Produces one record per event whose both windows hold at least one priced day,
    /// in the order of `events`. Events without coverage on either side are skipped.
    ///
    /// `series` must be sorted ascending by date, as produced by the loader.
    pub fn correlate(&self, series: &[SeriesPoint], events: &[EventRecord]) -> Vec<CorrelationRecord> {
        if series.is_empty() || events.is_empty() {
            return Vec::new();
        }

        let correlations: Vec<CorrelationRecord> = events
            .iter()
            .filter_map(|event| self.measure(series, event))
            .collect();

        tracing::debug!(
            events = events.len(),
            correlated = correlations.len(),
            "Event correlations computed."
        );
        correlations
    }

    fn measure(&self, series: &[SeriesPoint], event: &EventRecord) -> Option<CorrelationRecord> {
        let (before, after) = self.windows(series, event.date)?;
        if before.is_empty() || after.is_empty() {
            return None;
        }

        let avg_price_before = stats::mean(before.iter().map(|p| p.price))?;
        let avg_price_after = stats::mean(after.iter().map(|p| p.price))?;

        let vol_change_pct = match (mean_volatility(before), mean_volatility(after)) {
            (Some(vol_before), Some(vol_after)) => stats::pct_change(vol_before, vol_after),
            // No defined volatility on a side leaves nothing to compare.
            _ => 0.0,
        };

        Some(CorrelationRecord {
            title: event.title.clone(),
            date: event.date,
            kind: event.kind.clone(),
            avg_price_before: round2(avg_price_before),
            avg_price_after: round2(avg_price_after),
            price_change_pct: round2(stats::pct_change(avg_price_before, avg_price_after)),
            vol_change_pct: round2(vol_change_pct),
        })
    }

    /// Splits the sorted series into the before and after windows of `date`.
    ///
    /// Returns `None` only when the window bounds fall outside the calendar.
    pub fn windows<'a>(
        &self,
        series: &'a [SeriesPoint],
        date: NaiveDate,
    ) -> Option<(&'a [SeriesPoint], &'a [SeriesPoint])> {
        let start = date.checked_sub_days(self.window)?;
        let end = date.checked_add_days(self.window)?;

        let first_before = series.partition_point(|p| p.date < start);
        let first_after = series.partition_point(|p| p.date < date);
        let past_after = series.partition_point(|p| p.date <= end);

        Some((&series[first_before..first_after], &series[first_after..past_after]))
    }

    /// The highest defined volatility in the after-window of `date`.
    pub fn peak_volatility_after(&self, series: &[SeriesPoint], date: NaiveDate) -> Option<f64> {
        let (_, after) = self.windows(series, date)?;
        after
            .iter()
            .filter_map(|p| p.volatility)
            .fold(None, |peak: Option<f64>, v| Some(peak.map_or(v, |m| m.max(v))))
    }
}

/// Mean of the defined volatility values, ignoring undefined ones.
fn mean_volatility(points: &[SeriesPoint]) -> Option<f64> {
    stats::mean(points.iter().filter_map(|p| p.volatility))
}
