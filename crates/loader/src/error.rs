use std::path::PathBuf;

use thiserror::Error;

/// Why a source dataset could not be turned into a table.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum LoadError {
    #[error("Data unavailable at '{}': {reason}", .path.display())]
    DataUnavailable { path: PathBuf, reason: String },

    #[error("Data malformed in '{}': {reason}", .path.display())]
    DataMalformed { path: PathBuf, reason: String },
}

impl LoadError {
    /// A malformed file means a corrupted upstream artifact, unlike a merely missing one.
    pub fn is_malformed(&self) -> bool {
        matches!(self, LoadError::DataMalformed { .. })
    }
}

/// Why the change-point summary could not be read.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SummaryError {
    #[error("No change-point summary at '{}'", .path.display())]
    SummaryUnavailable { path: PathBuf },

    #[error("Change-point summary at '{}' is malformed: {reason}", .path.display())]
    SummaryMalformed { path: PathBuf, reason: String },
}
