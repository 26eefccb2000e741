//! Accuracy figure generator - main entry point
//!
//! Reads the accuracy harness's measurement tables, renders the faceted
//! box-plot comparison figure and writes it out as a single SVG artifact.
//! There are no flags and no environment variables: a run is fully
//! described by `FigureConfig::default()`.

use accuracy_figure::config::FigureConfig;
use accuracy_figure::pipeline;

fn main() {
    println!("Accuracy Figure Generator v{}", env!("CARGO_PKG_VERSION"));

    let config = FigureConfig::default();
    match pipeline::run(&config) {
        Ok(summary) => {
            println!(
                "\n✓ Figure written to {} ({} bytes)",
                summary.output_path.display(),
                summary.bytes
            );
            println!(
                "  {} panels, {} measurements kept, {} dropped",
                summary.panels, summary.rows, summary.dropped
            );
        }
        Err(e) => {
            eprintln!("\n✗ Figure generation failed: {}", e);
            std::process::exit(1);
        }
    }
}
