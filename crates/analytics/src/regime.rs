//! Log-return view of the price series and its split around the change point.
//!
//! This is a separate, labeled derivation for reporting. The query-facing
//! pipeline always uses simple returns (see [`crate::returns`]).

use chrono::NaiveDate;
use core_types::{ChangePointSummary, PriceRecord};
use serde::Serialize;

use crate::error::AnalyticsError;
use crate::stats;

/// Summary key holding the posterior median date of the change point.
pub const CHANGE_POINT_DATE_KEY: &str = "cp_median_date";
/// Summary keys holding the model's mean return before and after the break.
pub const MU_BEFORE_KEY: &str = "mu1_mean";
pub const MU_AFTER_KEY: &str = "mu2_mean";

/// Distribution statistics of log returns on one side of the break.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RegimeStats {
    pub count: usize,
    pub mean: Option<f64>,
    pub std_dev: Option<f64>,
}

impl RegimeStats {
    fn from_returns(returns: &[f64]) -> Self {
        Self {
            count: returns.len(),
            mean: stats::mean(returns.iter().copied()),
            std_dev: stats::sample_std(returns),
        }
    }
}

/// Log-return distribution before and after the detected structural break.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RegimeSplit {
    pub change_point: NaiveDate,
    pub before: RegimeStats,
    pub after: RegimeStats,
    /// The model's estimate when the summary carries one, otherwise the observed mean.
    pub mu_before: Option<f64>,
    pub mu_after: Option<f64>,
}

/// Log returns, `ln(p[i]) - ln(p[i-1])`. Position 0 and non-finite values are undefined.
pub fn log_returns(prices: &[PriceRecord]) -> Vec<Option<f64>> {
    std::iter::once(None)
        .chain(prices.windows(2).map(|w| {
            let ret = w[1].price.ln() - w[0].price.ln();
            ret.is_finite().then_some(ret)
        }))
        .take(prices.len())
        .collect()
}

/// Splits defined log returns at the summary's change-point date.
///
/// Returns dated strictly before the change point fall in `before`; the
/// change-point day itself opens `after`.
pub fn split_at_change_point(
    prices: &[PriceRecord],
    summary: &ChangePointSummary,
) -> Result<RegimeSplit, AnalyticsError> {
    let change_point = change_point_date(summary)?;

    let (mut before, mut after) = (Vec::new(), Vec::new());
    for (p, ret) in prices.iter().zip(log_returns(prices)) {
        let Some(ret) = ret else { continue };
        if p.date < change_point {
            before.push(ret);
        } else {
            after.push(ret);
        }
    }

    let before = RegimeStats::from_returns(&before);
    let after = RegimeStats::from_returns(&after);
    let estimate = |key: &str| summary.get(key).and_then(|v| v.as_f64());

    Ok(RegimeSplit {
        change_point,
        mu_before: estimate(MU_BEFORE_KEY).or(before.mean),
        mu_after: estimate(MU_AFTER_KEY).or(after.mean),
        before,
        after,
    })
}

/// Reads `cp_median_date`, accepting a bare date or a timestamp starting with one.
pub fn change_point_date(summary: &ChangePointSummary) -> Result<NaiveDate, AnalyticsError> {
    match summary {
        ChangePointSummary::Unavailable => {
            return Err(AnalyticsError::MissingChangePoint("no model results yet".to_string()));
        }
        ChangePointSummary::Malformed(cause) => {
            return Err(AnalyticsError::MissingChangePoint(cause.clone()));
        }
        ChangePointSummary::Available(_) => {}
    }

    let raw = summary
        .get(CHANGE_POINT_DATE_KEY)
        .and_then(|v| v.as_str())
        .ok_or_else(|| {
            AnalyticsError::MissingChangePoint(format!("summary has no string '{CHANGE_POINT_DATE_KEY}'"))
        })?;

    raw.get(..10)
        .and_then(|day| NaiveDate::parse_from_str(day, "%Y-%m-%d").ok())
        .ok_or_else(|| AnalyticsError::MissingChangePoint(format!("unrecognized date '{raw}'")))
}
