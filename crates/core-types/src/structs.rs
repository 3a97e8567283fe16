use chrono::NaiveDate;
use serde::Serialize;

use crate::summary::ChangePointSummary;

/// A single daily observation from the price dataset.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PriceRecord {
    pub date: NaiveDate,
    pub price: f64,
}

impl PriceRecord {
    pub fn new(date: NaiveDate, price: f64) -> Self {
        Self { date, price }
    }
}

/// A cataloged market event. Kept in source order, never deduplicated.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EventRecord {
    pub date: NaiveDate,
    pub title: String,
    #[serde(rename = "type")]
    pub kind: String,
}

/// A price together with the series derived from it at the same position.
///
/// `returns` is `None` for the first point and `volatility` is `None` until
/// the rolling window is full. Undefined values stay `None` through every
/// derivation; only the published [`PriceRow`] substitutes zero.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SeriesPoint {
    pub date: NaiveDate,
    pub price: f64,
    pub returns: Option<f64>,
    pub volatility: Option<f64>,
}

/// The presentation shape of a [`SeriesPoint`] as served by `list prices`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PriceRow {
    #[serde(rename = "Date")]
    pub date: NaiveDate,
    #[serde(rename = "Price")]
    pub price: f64,
    #[serde(rename = "Returns")]
    pub returns: f64,
    #[serde(rename = "Volatility")]
    pub volatility: f64,
}

impl From<&SeriesPoint> for PriceRow {
    fn from(point: &SeriesPoint) -> Self {
        Self {
            date: point.date,
            price: point.price,
            returns: point.returns.unwrap_or(0.0),
            volatility: point.volatility.unwrap_or(0.0),
        }
    }
}

/// The measured impact of one event on the surrounding price and volatility.
///
/// All figures are rounded to two decimal places.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CorrelationRecord {
    pub title: String,
    pub date: NaiveDate,
    #[serde(rename = "type")]
    pub kind: String,
    pub avg_price_before: f64,
    pub avg_price_after: f64,
    pub price_change_pct: f64,
    pub vol_change_pct: f64,
}

/// Headline figures for the dashboard, computed at request time.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MetricsSnapshot {
    pub latest_price: f64,
    pub avg_price: f64,
    pub max_price: f64,
    pub min_price: f64,
    pub current_volatility: f64,
    pub cp_summary: ChangePointSummary,
}
