use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;

use core_types::ChangePointSummary;
use serde_json::{Map, Value};

use crate::error::SummaryError;

/// Reads the change-point summary written by the offline segmentation model.
///
/// The document is passed through without schema checks: keys such as
/// `cp_median_date` or `mu1_mean` belong to the model, not to this crate.
#[derive(Debug, Clone)]
pub struct SummaryReader {
    path: PathBuf,
}

impl SummaryReader {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Reads the summary, folding absence and corruption into explicit states.
    pub fn read(&self) -> ChangePointSummary {
        match self.try_read() {
            Ok(map) => ChangePointSummary::Available(map),
            Err(SummaryError::SummaryUnavailable { .. }) => {
                tracing::warn!(path = %self.path.display(), "No change-point summary has been produced yet.");
                ChangePointSummary::Unavailable
            }
            Err(err) => {
                tracing::error!(error = %err, "Change-point summary is corrupted.");
                ChangePointSummary::Malformed(err.to_string())
            }
        }
    }

    pub fn try_read(&self) -> Result<Map<String, Value>, SummaryError> {
        let content = fs::read_to_string(&self.path).map_err(|e| match e.kind() {
            ErrorKind::NotFound => SummaryError::SummaryUnavailable {
                path: self.path.clone(),
            },
            _ => self.malformed(e.to_string()),
        })?;

        match serde_json::from_str::<Value>(&content) {
            Ok(Value::Object(map)) => Ok(map),
            Ok(other) => Err(self.malformed(format!(
                "expected a JSON object, found {}",
                json_kind(&other)
            ))),
            Err(e) => Err(self.malformed(e.to_string())),
        }
    }

    fn malformed(&self, reason: String) -> SummaryError {
        SummaryError::SummaryMalformed {
            path: self.path.clone(),
            reason,
        }
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
