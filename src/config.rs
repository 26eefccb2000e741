//! Figure configuration.
//!
//! The pipeline takes no command-line flags and reads no environment
//! variables: every knob lives in [`FigureConfig`], with `Default` as the
//! single source of truth. Paths are resolved relative to the working
//! directory the binary runs from.

use std::path::PathBuf;

use crate::labels::{Operation, Precision};
use crate::palette::DEFAULT_PALETTE;

#[derive(Debug, Clone)]
pub struct FigureConfig {
    /// Directory holding the per-precision measurement tables
    pub data_dir: PathBuf,

    /// Output artifact; parent directories are created as needed
    pub output_path: PathBuf,

    /// Overall figure size in pixels, legend strip included
    pub width: u32,
    pub height: u32,

    /// Height of the legend strip across the top of the panel grid
    pub legend_height: u32,

    /// Width of the rotated title strips along the left and right edges
    pub side_title_width: u32,

    /// Base font size; tick labels render slightly smaller
    pub base_font: f64,

    /// Palette name, resolved against the embedded registry
    pub palette: String,

    /// Legend entries per row
    pub legend_columns: usize,
}

impl Default for FigureConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("tests/accuracy/results"),
            output_path: PathBuf::from("figures/accuracy.svg"),
            width: 960,
            height: 660,
            legend_height: 36,
            side_title_width: 28,
            base_font: 14.0,
            palette: DEFAULT_PALETTE.to_string(),
            legend_columns: 4,
        }
    }
}

impl FigureConfig {
    /// Path of the measurement table for one panel.
    ///
    /// Tables follow the harness naming scheme
    /// `{significand bits}_float_{operation stem}.csv`, e.g.
    /// `24_float_addition_combined.csv` for FP32 addition.
    pub fn table_path(&self, operation: Operation, precision: Precision) -> PathBuf {
        self.data_dir.join(format!(
            "{}_float_{}.csv",
            precision.code(),
            operation.table_stem()
        ))
    }
}
