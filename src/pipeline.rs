//! Figure generation pipeline.
//!
//! The pipeline:
//! 1. Loads and cleans the measurement table of every panel
//! 2. Composes the panel grid
//! 3. Renders the figure into an in-memory SVG document
//! 4. Writes the output artifact
//!
//! Any error stops the run before step 4 touches the filesystem, so a
//! failed run never leaves a fresh artifact behind.

use std::path::PathBuf;

use crate::config::FigureConfig;
use crate::dataset::Dataset;
use crate::error::Result;
use crate::labels::{Operation, Precision};
use crate::output;
use crate::panel::PanelGrid;
use crate::render::Figure;

/// What a completed run produced, for the caller's final report.
#[derive(Debug, Clone)]
pub struct RunSummary {
    /// Panels in the rendered grid
    pub panels: usize,
    /// Retained measurements across all panels
    pub rows: usize,
    /// Dropped rows across all panels
    pub dropped: usize,
    /// Where the artifact landed
    pub output_path: PathBuf,
    /// Size of the rendered document
    pub bytes: usize,
}

/// Runs the full pipeline with the given configuration.
pub fn run(config: &FigureConfig) -> Result<RunSummary> {
    println!(
        "\n[1/4] Loading measurement tables from {}",
        config.data_dir.display()
    );
    let mut datasets = Vec::new();
    for operation in Operation::ALL {
        for precision in Precision::ALL {
            let path = config.table_path(operation, precision);
            let dataset = Dataset::load(&path, operation, precision)?;
            println!("  ✓ {} · {}: {}", operation, precision, dataset.summary());
            if dataset.drops.any() {
                println!("    ⚠ dropped rows: {}", dataset.drops);
            }
            for series in dataset.unknown_series() {
                println!("    ⚠ unknown series '{}' will not be drawn", series);
            }
            for series in operation.series_order() {
                if !dataset.has_series(series) {
                    println!("    ⚠ no usable rows for series '{}'", series);
                }
            }
            datasets.push(dataset);
        }
    }

    println!("\n[2/4] Composing panel grid...");
    let grid = PanelGrid::from_datasets(datasets);
    println!(
        "  Panels: {} rows × {} columns = {}",
        grid.n_rows(),
        grid.n_cols(),
        grid.len()
    );

    println!(
        "\n[3/4] Rendering figure ({}×{} px, palette '{}')...",
        config.width, config.height, config.palette
    );
    let document = Figure::new(&grid, config).render_to_string()?;
    println!("  ✓ Rendered {} bytes", document.len());

    println!("\n[4/4] Writing {}", config.output_path.display());
    output::write_figure(&config.output_path, &document)?;

    Ok(RunSummary {
        panels: grid.len(),
        rows: grid.total_rows(),
        dropped: grid.total_dropped(),
        output_path: config.output_path.clone(),
        bytes: document.len(),
    })
}
