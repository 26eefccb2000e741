//! Loading and cleaning of per-panel measurement tables.
//!
//! Each table is one CSV written by the accuracy harness: one relative-error
//! sample per row, tagged with the series that produced it. Rows without a
//! usable magnitude are dropped here, before any statistics run, and the
//! drop counts stay visible in [`DropStats`]. Structural problems with a
//! table are fatal; value-level problems never are.

use std::fmt;
use std::path::{Path, PathBuf};

use csv::ReaderBuilder;
use serde::Deserialize;

use crate::error::{FigureError, Result};
use crate::labels::{Operation, Precision};

/// One raw row as it appears in a measurement table.
///
/// The error column is read as text: the harness occasionally emits
/// placeholders that do not parse as numbers, and those must count as
/// drops rather than abort the run.
#[derive(Debug, Clone, Deserialize)]
struct RawRow {
    /// Series identifier, e.g. `native` or `HEAR0`
    #[serde(rename = "type")]
    series: String,

    /// Relative error magnitude of one measurement
    error: String,
}

/// One cleaned measurement. The error is finite and strictly positive.
#[derive(Debug, Clone, PartialEq)]
pub struct Measurement {
    pub series: String,
    pub error: f64,
}

/// Counts of rows removed while cleaning a table, by reason.
///
/// Zero and missing errors both mean "no measurable deviation"; they are
/// counted apart so a table full of placeholders stays distinguishable
/// from one full of exact results.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DropStats {
    /// Empty or whitespace-only error field
    pub missing: usize,
    /// Error field that does not parse as a number
    pub non_numeric: usize,
    /// NaN or infinite error
    pub non_finite: usize,
    /// Exactly zero error
    pub zero: usize,
    /// Negative error
    pub negative: usize,
}

impl DropStats {
    pub fn total(&self) -> usize {
        self.missing + self.non_numeric + self.non_finite + self.zero + self.negative
    }

    pub fn any(&self) -> bool {
        self.total() > 0
    }
}

impl fmt::Display for DropStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let reasons = [
            (self.missing, "missing"),
            (self.non_numeric, "non-numeric"),
            (self.non_finite, "non-finite"),
            (self.zero, "zero"),
            (self.negative, "negative"),
        ];
        let parts: Vec<String> = reasons
            .iter()
            .filter(|(count, _)| *count > 0)
            .map(|(count, reason)| format!("{} {}", count, reason))
            .collect();
        if parts.is_empty() {
            write!(f, "none")
        } else {
            write!(f, "{}", parts.join(", "))
        }
    }
}

/// Cleaned contents of one measurement table, keyed to its panel.
#[derive(Debug, Clone)]
pub struct Dataset {
    pub operation: Operation,
    pub precision: Precision,
    /// Retained measurements, in file order
    pub rows: Vec<Measurement>,
    /// Rows removed while cleaning
    pub drops: DropStats,
}

impl Dataset {
    /// Loads and cleans the table for one (operation, precision) panel.
    ///
    /// A missing file, unreadable header or malformed record aborts with
    /// [`FigureError::DataSource`]; rows whose error value is merely unusable
    /// are dropped and counted instead.
    pub fn load(path: &Path, operation: Operation, precision: Precision) -> Result<Self> {
        let mut reader = ReaderBuilder::new()
            .has_headers(true)
            .from_path(path)
            .map_err(|e| FigureError::DataSource {
                path: path.to_path_buf(),
                source: e,
            })?;
        let (rows, drops) = clean(&mut reader).map_err(|e| FigureError::DataSource {
            path: path.to_path_buf(),
            source: e,
        })?;
        Ok(Dataset {
            operation,
            precision,
            rows,
            drops,
        })
    }

    /// Parses table bytes without touching the filesystem.
    pub fn from_csv(operation: Operation, precision: Precision, csv_data: &[u8]) -> Result<Self> {
        let mut reader = ReaderBuilder::new().has_headers(true).from_reader(csv_data);
        let (rows, drops) = clean(&mut reader).map_err(|e| FigureError::DataSource {
            path: PathBuf::from("<in-memory table>"),
            source: e,
        })?;
        Ok(Dataset {
            operation,
            precision,
            rows,
            drops,
        })
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Errors of one series, in file order.
    pub fn series_errors(&self, series: &str) -> Vec<f64> {
        self.rows
            .iter()
            .filter(|m| m.series == series)
            .map(|m| m.error)
            .collect()
    }

    /// Whether any retained row belongs to the given series.
    pub fn has_series(&self, series: &str) -> bool {
        self.rows.iter().any(|m| m.series == series)
    }

    /// Series present in the table but absent from the operation's known
    /// drawing order. These rows stay loaded but are never drawn.
    pub fn unknown_series(&self) -> Vec<&str> {
        let known = self.operation.series_order();
        let mut unknown: Vec<&str> = Vec::new();
        for m in &self.rows {
            let series = m.series.as_str();
            if !known.contains(&series) && !unknown.contains(&series) {
                unknown.push(series);
            }
        }
        unknown
    }

    /// Smallest and largest retained error, if any rows survived cleaning.
    pub fn error_bounds(&self) -> Option<(f64, f64)> {
        if self.rows.is_empty() {
            return None;
        }
        let mut lo = f64::INFINITY;
        let mut hi = f64::NEG_INFINITY;
        for m in &self.rows {
            lo = lo.min(m.error);
            hi = hi.max(m.error);
        }
        Some((lo, hi))
    }

    /// Summary statistics for log output
    pub fn summary(&self) -> DatasetSummary {
        DatasetSummary {
            rows: self.rows.len(),
            bounds: self.error_bounds(),
        }
    }
}

/// Deserializes and filters every record of one table.
///
/// Drop classification, in order: missing, non-numeric, non-finite,
/// zero, negative. `-0.0` counts as zero.
fn clean<R: std::io::Read>(
    reader: &mut csv::Reader<R>,
) -> std::result::Result<(Vec<Measurement>, DropStats), csv::Error> {
    let mut rows = Vec::new();
    let mut drops = DropStats::default();
    for result in reader.deserialize() {
        let raw: RawRow = result?;
        let text = raw.error.trim();
        if text.is_empty() {
            drops.missing += 1;
            continue;
        }
        let value: f64 = match text.parse() {
            Ok(v) => v,
            Err(_) => {
                drops.non_numeric += 1;
                continue;
            }
        };
        if !value.is_finite() {
            drops.non_finite += 1;
            continue;
        }
        if value == 0.0 {
            drops.zero += 1;
            continue;
        }
        if value < 0.0 {
            drops.negative += 1;
            continue;
        }
        rows.push(Measurement {
            series: raw.series,
            error: value,
        });
    }
    Ok((rows, drops))
}

/// Summary statistics for one cleaned table
#[derive(Debug, Clone)]
pub struct DatasetSummary {
    pub rows: usize,
    pub bounds: Option<(f64, f64)>,
}

impl fmt::Display for DatasetSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.bounds {
            Some((lo, hi)) => write!(
                f,
                "rows: {}, error: [{:.1e}, {:.1e}]",
                self.rows, lo, hi
            ),
            None => write!(f, "rows: 0 (no usable measurements)"),
        }
    }
}
