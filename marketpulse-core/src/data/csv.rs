//! CSV ingestion: bars from a file into a validated `Series`.
//!
//! Expected header: `timestamp,open,high,low,close,volume`, with RFC 3339
//! timestamps. Rows must already be in ascending time order — this is the
//! provider contract the engine relies on, so it is checked here at the
//! boundary and nowhere else.

use super::provider::DataError;
use crate::domain::{Bar, Series};
use chrono::{DateTime, Utc};
use serde::Deserialize;
use std::path::Path;

#[derive(Debug, Deserialize)]
struct CsvRow {
    timestamp: DateTime<Utc>,
    open: f64,
    high: f64,
    low: f64,
    close: f64,
    volume: u64,
}

/// Read a bar series from a CSV file.
pub fn read_series(path: &Path) -> Result<Series, DataError> {
    let mut reader = csv::Reader::from_path(path)
        .map_err(|e| DataError::Malformed(format!("{}: {e}", path.display())))?;

    let mut bars: Vec<Bar> = Vec::new();
    for row in reader.deserialize() {
        let row: CsvRow = row.map_err(|e| DataError::Malformed(e.to_string()))?;
        let bar = Bar {
            timestamp: row.timestamp,
            open: row.open,
            high: row.high,
            low: row.low,
            close: row.close,
            volume: row.volume,
        };

        if let Some(prev) = bars.last() {
            if bar.timestamp <= prev.timestamp {
                return Err(DataError::Malformed(format!(
                    "bars out of order: {} follows {}",
                    bar.timestamp, prev.timestamp
                )));
            }
        }
        bars.push(bar);
    }

    if bars.is_empty() {
        return Err(DataError::NoData {
            symbol: path.display().to_string(),
        });
    }

    Ok(Series::new(bars))
}
