//! Calendar date conventions of the two source datasets.
//!
//! The price dataset writes dates day-first (`20-May-87`, `01/02/2020` is the 1st of
//! February) while the event catalog uses unambiguous `YYYY-MM-DD`. The two parsers
//! are deliberately separate so one convention can never leak into the other dataset.

use chrono::NaiveDate;

/// Day-first layouts seen in the price dataset, most common first.
///
/// `%Y` reads `20` as the year 20, so every `%y` layout comes before its
/// `%Y` twin; a four-digit year leaves trailing input and fails `%y`. ISO dates are accepted too since they are unambiguous.
const DAY_FIRST_FORMATS: &[&str] = &[
    "%d-%b-%y",
    "%d-%b-%Y",
    "%d/%m/%y",
    "%d/%m/%Y",
    "%d-%m-%y",
    "%d-%m-%Y",
    "%d.%m.%y",
    "%d.%m.%Y",
    "%d %b %Y",
    // Month-first, but the spelled-out month makes it unambiguous.
    "%b %d, %Y",
    "%Y-%m-%d",
];

/// Parses a price-dataset date, resolving ambiguous numeric dates day-first.
pub fn parse_day_first(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    DAY_FIRST_FORMATS
        .iter()
        .find_map(|format| NaiveDate::parse_from_str(raw, format).ok())
}

/// Parses an event-catalog date (`YYYY-MM-DD`).
pub fn parse_iso(raw: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d").ok()
}
