//! # Price Analytics
//!
//! Pure calculators over a normalized daily price series.
//!
//! ## Architectural Principles
//!
//! - **Pure logic:** no file or network access. Inputs are slices produced by the
//!   `loader` crate, outputs are the records defined in `core-types`.
//! - **Stateless calculation:** every engine is a small `Copy` value holding its
//!   parameters. Results are recomputed on each call, never cached.
//! - **Explicit gaps:** undefined values are `None` all the way through. Only the
//!   published records substitute zero.
//!
//! ## Public API
//!
//! - `ReturnsVolatilityEngine`: simple returns and annualized rolling volatility.
//! - `EventCorrelationEngine`: before/after impact of each cataloged event.
//! - `metrics::snapshot`: headline figures for the dashboard.
//! - `regime`: log-return view and the split around the detected change point.

pub mod correlation;
pub mod error;
pub mod metrics;
pub mod regime;
pub mod returns;
pub mod stats;

pub use correlation::EventCorrelationEngine;
pub use error::AnalyticsError;
pub use regime::{RegimeSplit, RegimeStats};
pub use returns::ReturnsVolatilityEngine;
