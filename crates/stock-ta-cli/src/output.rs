//! Output module for writing analysis reports.
//!
//! Two encodings are supported:
//!
//! - **JSON**: the serialized [`AnalysisReport`]. Undefined values are
//!   `null`, so every series array stays aligned with `dates`.
//! - **CSV**: a `date` column followed by one column per series, in
//!   indicator order then series-key order. Undefined values are empty
//!   cells; every date gets a row, warm-up rows included.

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;

use stock_ta::analysis::AnalysisReport;
use stock_ta::engine::IndicatorKind;
use stock_ta::series::Series;
use tracing::warn;

use crate::args::OutputFormat;
use crate::error::{CliError, Result};

/// Output destination: either stdout or a file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutputDest {
    /// Write to stdout.
    Stdout,
    /// Write to a file at the given path.
    File(PathBuf),
}

impl From<Option<PathBuf>> for OutputDest {
    fn from(path: Option<PathBuf>) -> Self {
        path.map_or(Self::Stdout, Self::File)
    }
}

impl OutputDest {
    /// Create a writer for this output destination.
    ///
    /// # Errors
    ///
    /// Returns `CliError::Io` if the file cannot be created.
    pub fn writer(&self) -> Result<Box<dyn Write>> {
        match self {
            Self::Stdout => Ok(Box::new(io::stdout().lock())),
            Self::File(path) => {
                let file = File::create(path).map_err(|e| CliError::Io {
                    path: path.display().to_string(),
                    source: e,
                })?;
                Ok(Box::new(BufWriter::new(file)))
            }
        }
    }
}

/// Writes `report` to `dest` in the requested format.
///
/// # Errors
///
/// Returns an I/O or serialization error if writing fails.
pub fn write_report(
    report: &AnalysisReport,
    format: OutputFormat,
    pretty: bool,
    dest: &OutputDest,
) -> Result<()> {
    let mut writer = dest.writer()?;
    match format {
        OutputFormat::Json => write_json(report, pretty, &mut writer)?,
        OutputFormat::Csv => write_csv(report, &mut writer)?,
    }
    writer.flush()?;
    Ok(())
}

/// Writes the report as JSON followed by a newline.
///
/// # Errors
///
/// Returns an error if serialization or writing fails.
pub fn write_json<W: Write>(report: &AnalysisReport, pretty: bool, writer: &mut W) -> Result<()> {
    if pretty {
        serde_json::to_writer_pretty(&mut *writer, report)?;
    } else {
        serde_json::to_writer(&mut *writer, report)?;
    }
    writeln!(writer)?;
    Ok(())
}

/// Series of the report in column order: canonical indicator order, then
/// the indicator's own key order.
fn columns(report: &AnalysisReport) -> Vec<(String, &Series)> {
    IndicatorKind::ALL
        .iter()
        .filter_map(|&kind| report.result.get(kind).map(|named| (kind, named)))
        .flat_map(|(kind, named)| {
            kind.series_keys()
                .into_iter()
                .filter_map(move |key| named.get(&key).map(|series| (key, series)))
        })
        .collect()
}

/// Writes the report as CSV.
///
/// Failed indicators have no columns; they are logged instead.
///
/// # Errors
///
/// Returns an error if writing fails.
pub fn write_csv<W: Write>(report: &AnalysisReport, writer: &mut W) -> Result<()> {
    for (indicator, message) in &report.result.failures {
        warn!(indicator, message, "indicator omitted from CSV output");
    }

    let columns = columns(report);
    let mut csv_writer = csv::Writer::from_writer(writer);

    let mut header = vec!["date".to_string()];
    header.extend(columns.iter().map(|(key, _)| key.clone()));
    csv_writer.write_record(&header)?;

    for (i, date) in report.result.dates.iter().enumerate() {
        let mut row = Vec::with_capacity(columns.len() + 1);
        row.push(date.to_string());
        row.extend(
            columns
                .iter()
                .map(|(_, series)| series.get(i).map(|v| v.to_string()).unwrap_or_default()),
        );
        csv_writer.write_record(&row)?;
    }

    csv_writer.flush()?;
    Ok(())
}
