use std::io::Read;
use std::path::Path;

use core_types::PriceRecord;
use serde::Deserialize;

use crate::dates;
use crate::error::LoadError;
use crate::open_source;

/// One raw row of the price dataset. Extra columns are ignored.
#[derive(Debug, Deserialize)]
struct PriceRow {
    #[serde(rename = "Date")]
    date: String,
    #[serde(rename = "Price")]
    price: f64,
}

/// Loads the price dataset and sorts it ascending by date.
pub fn load_prices(path: &Path) -> Result<Vec<PriceRecord>, LoadError> {
    let file = open_source(path)?;
    parse_prices(file).map_err(|reason| LoadError::DataMalformed {
        path: path.to_path_buf(),
        reason,
    })
}

/// Parses price CSV content into records sorted ascending by date.
///
/// Duplicate dates are kept and positivity is not checked; the source is
/// assumed clean. Any unparsable row rejects the whole dataset.
pub fn parse_prices<R: Read>(input: R) -> Result<Vec<PriceRecord>, String> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(input);

    let headers = reader
        .headers()
        .map_err(|e| format!("failed to read header row: {e}"))?;
    if headers.is_empty() {
        return Err("empty input, no header row".to_string());
    }

    let mut prices = Vec::new();
    for (idx, result) in reader.deserialize::<PriceRow>().enumerate() {
        // 1-based, counting the header as line 1
        let line = idx + 2;
        let row = result.map_err(|e| format!("line {line}: {e}"))?;
        let date = dates::parse_day_first(&row.date)
            .ok_or_else(|| format!("line {line}: unrecognized date '{}'", row.date))?;
        prices.push(PriceRecord::new(date, row.price));
    }

    // Stable sort: rows sharing a date keep their source order.
    prices.sort_by_key(|p| p.date);
    Ok(prices)
}
