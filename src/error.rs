use std::path::PathBuf;

use plotters::drawing::DrawingAreaErrorKind;
use thiserror::Error;

/// Errors that can abort figure generation.
///
/// Row-level data quality problems are not errors: the loader drops those
/// rows and reports them in [`crate::dataset::DropStats`]. Everything here
/// is fatal and must leave no output artifact behind.
#[derive(Debug, Error)]
pub enum FigureError {
    /// A measurement table is missing or structurally unreadable
    #[error("measurement table {path}: {source}")]
    DataSource {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    /// A precision code outside the known floating-point formats
    #[error("unknown precision code {0} (expected one of 11, 24, 53)")]
    UnknownPrecision(u32),

    /// Chart construction or drawing failed
    #[error("render error: {0}")]
    Render(#[from] DrawingAreaErrorKind<std::io::Error>),

    /// Filesystem error while writing the output artifact
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Type alias for Results using FigureError
pub type Result<T> = std::result::Result<T, FigureError>;
