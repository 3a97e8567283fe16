use core_types::{PriceRecord, SeriesPoint};

use crate::error::AnalyticsError;
use crate::stats;

/// Trailing window of the rolling volatility, in samples.
pub const DEFAULT_VOLATILITY_WINDOW: usize = 30;
/// Assumed trading days per year, used to annualize volatility.
pub const DEFAULT_TRADING_DAYS: u32 = 252;

/// Derives period returns and annualized rolling volatility from a price series.
#[derive(Debug, Clone, Copy)]
pub struct ReturnsVolatilityEngine {
    window: usize,
    annualization: f64,
}

impl Default for ReturnsVolatilityEngine {
    fn default() -> Self {
        Self {
            window: DEFAULT_VOLATILITY_WINDOW,
            annualization: f64::from(DEFAULT_TRADING_DAYS).sqrt(),
        }
    }
}

impl ReturnsVolatilityEngine {
    pub fn new(window: usize, trading_days_per_year: u32) -> Result<Self, AnalyticsError> {
        if window < 2 {
            return Err(AnalyticsError::InvalidParameter(
                "volatility_window",
                format!("a sample standard deviation needs at least 2 returns, got {window}"),
            ));
        }
        if trading_days_per_year == 0 {
            return Err(AnalyticsError::InvalidParameter(
                "trading_days_per_year",
                "must be positive".to_string(),
            ));
        }
        Ok(Self {
            window,
            annualization: f64::from(trading_days_per_year).sqrt(),
        })
    }

    /// Derives the full series in one pass over a date-sorted price slice.
    ///
    /// The output has exactly one point per price, at the same position.
    pub fn derive(&self, prices: &[PriceRecord]) -> Vec<SeriesPoint> {
        let returns = simple_returns(prices);
        let volatility = self.rolling_volatility(&returns);

        prices
            .iter()
            .zip(returns)
            .zip(volatility)
            .map(|((p, returns), volatility)| SeriesPoint {
                date: p.date,
                price: p.price,
                returns,
                volatility,
            })
            .collect()
    }

    /// Rolling sample standard deviation of returns, annualized.
    ///
    /// A position is defined only when the whole trailing window holds defined
    /// returns. Since the first return is always undefined, the first defined
    /// volatility sits at position `window`.
    pub fn rolling_volatility(&self, returns: &[Option<f64>]) -> Vec<Option<f64>> {
        let mut volatility = Vec::with_capacity(returns.len());
        let mut window_returns = Vec::with_capacity(self.window);

        for i in 0..returns.len() {
            if i + 1 < self.window {
                volatility.push(None);
                continue;
            }

            window_returns.clear();
            window_returns.extend(returns[i + 1 - self.window..=i].iter().flatten().copied());
            let value = if window_returns.len() == self.window {
                stats::sample_std(&window_returns).map(|sd| sd * self.annualization)
            } else {
                None
            };
            volatility.push(value);
        }

        volatility
    }
}

/// Simple percent-change returns, `(p[i] - p[i-1]) / p[i-1]`.
///
/// Position 0 is undefined, as is any return that is not finite (a zero previous price).
pub fn simple_returns(prices: &[PriceRecord]) -> Vec<Option<f64>> {
    let mut returns = Vec::with_capacity(prices.len());

    for i in 0..prices.len() {
        if i == 0 {
            returns.push(None);
            continue;
        }
        let previous = prices[i - 1].price;
        let ret = (prices[i].price - previous) / previous;
        returns.push(ret.is_finite().then_some(ret));
    }

    returns
}
