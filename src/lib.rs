//! Accuracy Figure Library
//!
//! Turns the per-precision error tables written by the accuracy harness
//! into one publication figure: a grid of box plots with operations as
//! rows, floating-point formats as columns and a single shared legend.
//!
//! Module organization:
//! - `config`: fixed run configuration (no flags, no environment)
//! - `dataset`: measurement table loading and cleaning
//! - `labels`: identifier-to-figure-text mapping
//! - `stats`: box-plot statistics
//! - `panel`: panel grid composition
//! - `palette`: series color registry
//! - `render`: in-memory SVG rendering
//! - `output`: artifact writing
//! - `pipeline`: end-to-end run

pub mod config;
pub mod dataset;
pub mod error;
pub mod labels;
pub mod output;
pub mod palette;
pub mod panel;
pub mod pipeline;
pub mod render;
pub mod stats;
