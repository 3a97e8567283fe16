use std::io::Read;
use std::path::Path;

use core_types::EventRecord;
use serde::Deserialize;

use crate::dates;
use crate::error::LoadError;
use crate::open_source;

/// One raw row of the event catalog. Extra columns are ignored.
#[derive(Debug, Deserialize)]
struct EventRow {
    date: String,
    title: String,
    #[serde(rename = "type")]
    kind: String,
}

/// Loads the event catalog in source order.
pub fn load_events(path: &Path) -> Result<Vec<EventRecord>, LoadError> {
    let file = open_source(path)?;
    parse_events(file).map_err(|reason| LoadError::DataMalformed {
        path: path.to_path_buf(),
        reason,
    })
}

/// Parses event CSV content. The order of the input is preserved and nothing is deduplicated.
pub fn parse_events<R: Read>(input: R) -> Result<Vec<EventRecord>, String> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(input);

    let headers = reader
        .headers()
        .map_err(|e| format!("failed to read header row: {e}"))?;
    if headers.is_empty() {
        return Err("empty input, no header row".to_string());
    }

    reader
        .deserialize::<EventRow>()
        .enumerate()
        .map(|(idx, result)| {
            let line = idx + 2;
            let row = result.map_err(|e| format!("line {line}: {e}"))?;
            let date = dates::parse_iso(&row.date)
                .ok_or_else(|| format!("line {line}: expected YYYY-MM-DD, found '{}'", row.date))?;
            Ok(EventRecord {
                date,
                title: row.title,
                kind: row.kind,
            })
        })
        .collect()
}
