//! CSV parsing module for reading daily bars from CSV files.
//!
//! # Column Detection
//!
//! Columns are matched by header name (case-insensitive, surrounding spaces
//! ignored) and may appear in any order:
//!
//! - `date` (also `datetime`, `timestamp`) → bar date, required
//! - `open`, `high`, `low`, `close` → prices, required
//! - `adj close`, `adjusted_close`, `adj_close`, `adjusted close` → optional,
//!   defaults to `close`
//! - `volume`, `vol` → optional, defaults to 0
//!
//! Dates are `YYYY-MM-DD`. A longer value such as `2024-01-02 00:00:00-05:00`
//! is accepted as long as it starts with the date.

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use chrono::NaiveDate;
use csv::{ReaderBuilder, StringRecord};
use stock_ta::data::Bar;
use tracing::debug;

use crate::error::{CliError, Result};

/// Positions of the recognised columns in the header row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnMap {
    /// Date column.
    pub date: usize,
    /// Open price column.
    pub open: usize,
    /// High price column.
    pub high: usize,
    /// Low price column.
    pub low: usize,
    /// Close price column.
    pub close: usize,
    /// Adjusted close column, if present.
    pub adjusted_close: Option<usize>,
    /// Volume column, if present.
    pub volume: Option<usize>,
}

/// Normalize a column header name for matching.
fn normalize_header(header: &str) -> String {
    header.trim().to_lowercase()
}

impl ColumnMap {
    /// Locates the columns in a header row.
    ///
    /// # Errors
    ///
    /// Returns `CliError::CsvParse` naming the first required column that is missing.
    pub fn from_headers(headers: &StringRecord) -> Result<Self> {
        let names: Vec<String> = headers.iter().map(normalize_header).collect();
        let find = |candidates: &[&str]| names.iter().position(|n| candidates.contains(&n.as_str()));
        let require = |candidates: &[&str]| {
            find(candidates).ok_or_else(|| CliError::CsvParse {
                message: format!("no '{}' column found in header", candidates[0]),
                line: Some(1),
            })
        };

        Ok(Self {
            date: require(&["date", "datetime", "timestamp"])?,
            open: require(&["open"])?,
            high: require(&["high"])?,
            low: require(&["low"])?,
            close: require(&["close"])?,
            adjusted_close: find(&["adj close", "adjusted_close", "adj_close", "adjusted close"]),
            volume: find(&["volume", "vol"]),
        })
    }
}

fn field<'r>(record: &'r StringRecord, idx: usize, name: &str, line: u64) -> Result<&'r str> {
    match record.get(idx).map(str::trim) {
        Some(value) if !value.is_empty() => Ok(value),
        _ => Err(CliError::CsvParse {
            message: format!("missing value in column '{name}'"),
            line: Some(line),
        }),
    }
}

fn parse_number(record: &StringRecord, idx: usize, name: &str, line: u64) -> Result<f64> {
    let value = field(record, idx, name, line)?;
    value.parse::<f64>().map_err(|_| CliError::CsvParse {
        message: format!("cannot parse '{value}' as number in column '{name}'"),
        line: Some(line),
    })
}

fn parse_date(record: &StringRecord, idx: usize, line: u64) -> Result<NaiveDate> {
    let value = field(record, idx, "date", line)?;
    value
        .get(..10)
        .and_then(|prefix| NaiveDate::parse_from_str(prefix, "%Y-%m-%d").ok())
        .ok_or_else(|| CliError::CsvParse {
            message: format!("cannot parse '{value}' as a YYYY-MM-DD date"),
            line: Some(line),
        })
}

/// Converts one data row into a bar.
fn parse_record(record: &StringRecord, columns: &ColumnMap, line: u64) -> Result<Bar> {
    let date = parse_date(record, columns.date, line)?;
    let open = parse_number(record, columns.open, "open", line)?;
    let high = parse_number(record, columns.high, "high", line)?;
    let low = parse_number(record, columns.low, "low", line)?;
    let close = parse_number(record, columns.close, "close", line)?;
    let volume = columns
        .volume
        .map(|idx| parse_number(record, idx, "volume", line))
        .transpose()?
        .unwrap_or(0.0);

    let bar = Bar::new(date, open, high, low, close, volume);
    match columns.adjusted_close {
        Some(idx) => Ok(bar.with_adjusted_close(parse_number(record, idx, "adj close", line)?)),
        None => Ok(bar),
    }
}

/// Parse bars from a CSV file.
///
/// Rows are returned in file order; sorting and validation are left to the
/// engine's normalizer.
///
/// # Errors
///
/// Returns `CliError::Io` if the file cannot be opened, or
/// `CliError::CsvParse` if the CSV is malformed.
pub fn parse_bars<P: AsRef<Path>>(path: P) -> Result<Vec<Bar>> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|e| CliError::Io {
        path: path.display().to_string(),
        source: e,
    })?;
    let bars = parse_bars_from_reader(BufReader::new(file))?;
    debug!(path = %path.display(), bars = bars.len(), "parsed price CSV");
    Ok(bars)
}

/// Parse bars from any reader.
///
/// This is useful for testing or parsing from non-file sources.
///
/// # Errors
///
/// Returns `CliError::CsvParse` if the header lacks a required column or a
/// row cannot be parsed.
pub fn parse_bars_from_reader<R: Read>(reader: R) -> Result<Vec<Bar>> {
    let mut csv_reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let columns = ColumnMap::from_headers(csv_reader.headers()?)?;

    let mut bars = Vec::new();
    for result in csv_reader.records() {
        let record = result?;
        let line = record.position().map_or(0, csv::Position::line);
        bars.push(parse_record(&record, &columns, line)?);
    }

    Ok(bars)
}
