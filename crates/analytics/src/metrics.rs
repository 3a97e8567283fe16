use core_types::{ChangePointSummary, MetricsSnapshot, SeriesPoint};

use crate::stats;

/// Builds the dashboard's headline figures, or `None` when there are no prices.
///
/// `current_volatility` is the latest point's volatility, zero while it is undefined.
pub fn snapshot(series: &[SeriesPoint], cp_summary: ChangePointSummary) -> Option<MetricsSnapshot> {
    let latest = series.last()?;
    let avg_price = stats::mean(series.iter().map(|p| p.price))?;
    let (min_price, max_price) = series
        .iter()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), p| {
            (lo.min(p.price), hi.max(p.price))
        });

    Some(MetricsSnapshot {
        latest_price: latest.price,
        avg_price,
        max_price,
        min_price,
        current_volatility: latest.volatility.unwrap_or(0.0),
        cp_summary,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn point(day: u32, price: f64, volatility: Option<f64>) -> SeriesPoint {
        SeriesPoint {
            date: NaiveDate::from_ymd_opt(2020, 1, day).unwrap(),
            price,
            returns: None,
            volatility,
        }
    }

    #[test]
    fn latest_price_is_the_chronologically_last_point() {
        let series = [point(1, 80.0, None), point(2, 120.0, Some(0.35)), point(3, 100.0, Some(0.25))];
        let snap = snapshot(&series, ChangePointSummary::Unavailable).unwrap();

        assert_eq!(snap.latest_price, 100.0);
        assert_eq!(snap.avg_price, 100.0);
        assert_eq!(snap.max_price, 120.0);
        assert_eq!(snap.min_price, 80.0);
        assert_eq!(snap.current_volatility, 0.25);
        assert_eq!(snap.cp_summary, ChangePointSummary::Unavailable);
    }

    #[test]
    fn undefined_current_volatility_is_published_as_zero() {
        let snap = snapshot(&[point(1, 50.0, None)], ChangePointSummary::Unavailable).unwrap();
        assert_eq!(snap.current_volatility, 0.0);
    }

    #[test]
    fn no_prices_no_snapshot() {
        assert!(snapshot(&[], ChangePointSummary::Unavailable).is_none());
    }
}
