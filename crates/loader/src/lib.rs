//! # Dataset Loader
//!
//! Reads the three inputs of the analytics pipeline from disk:
//!
//! - the daily price dataset (`Date`, `Price`; day-first dates), sorted ascending on load,
//! - the event catalog (`date`, `title`, `type`; ISO dates), kept in source order,
//! - the change-point summary document produced by the offline model.
//!
//! Nothing here raises past its boundary. A failed dataset load yields empty
//! tables together with the `LoadError` that caused it, and the summary reader
//! always answers with a `ChangePointSummary` state.

pub mod dates;
pub mod error;
pub mod events;
pub mod prices;
pub mod summary;

pub use error::{LoadError, SummaryError};
pub use summary::SummaryReader;

use std::fs::File;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use core_types::{EventRecord, PriceRecord};

/// The outcome of one load: the normalized tables, plus the cause when they are empty
/// because a source could not be read.
#[derive(Debug, Clone, Default)]
pub struct LoadedData {
    pub prices: Vec<PriceRecord>,
    pub events: Vec<EventRecord>,
    pub failure: Option<LoadError>,
}

/// Loads the price and event datasets from fixed locations.
#[derive(Debug, Clone)]
pub struct DataLoader {
    prices_path: PathBuf,
    events_path: PathBuf,
}

impl DataLoader {
    pub fn new(prices_path: impl Into<PathBuf>, events_path: impl Into<PathBuf>) -> Self {
        Self {
            prices_path: prices_path.into(),
            events_path: events_path.into(),
        }
    }

    /// Loads both datasets, degrading to empty tables on failure.
    ///
    /// Either source failing empties both tables, so downstream consumers never
    /// see a price series paired with an event catalog from a broken load.
    pub fn load(&self) -> LoadedData {
        match self.try_load() {
            Ok((prices, events)) => {
                tracing::debug!(prices = prices.len(), events = events.len(), "Datasets loaded.");
                LoadedData {
                    prices,
                    events,
                    failure: None,
                }
            }
            Err(err) => {
                if err.is_malformed() {
                    tracing::error!(error = %err, "Source dataset is corrupted.");
                } else {
                    tracing::warn!(error = %err, "Source dataset is unavailable.");
                }
                LoadedData {
                    failure: Some(err),
                    ..LoadedData::default()
                }
            }
        }
    }

    /// Loads both datasets, returning the first failure encountered.
    pub fn try_load(&self) -> Result<(Vec<PriceRecord>, Vec<EventRecord>), LoadError> {
        let prices = prices::load_prices(&self.prices_path)?;
        let events = events::load_events(&self.events_path)?;
        Ok((prices, events))
    }
}

/// Opens a source file, classifying failures as unavailability.
pub(crate) fn open_source(path: &Path) -> Result<File, LoadError> {
    File::open(path).map_err(|e| LoadError::DataUnavailable {
        path: path.to_path_buf(),
        reason: match e.kind() {
            ErrorKind::NotFound => "file not found".to_string(),
            _ => e.to_string(),
        },
    })
}
