//! Panel grid composition.
//!
//! Arranges the cleaned datasets into the grid the figure draws: operations
//! as rows, precisions as columns. Cell positions and the per-panel display
//! flags (bottom-row tick labels, single shared legend) are decided here so
//! the renderer only draws what it is handed.

use crate::dataset::Dataset;
use crate::labels::{Operation, Precision};

/// One cell of the figure grid.
#[derive(Debug, Clone)]
pub struct Panel {
    /// 0-based grid row (operation)
    pub row: usize,
    /// 0-based grid column (precision)
    pub col: usize,
    pub dataset: Dataset,
    /// Only the bottom row shows the precision label under the panel
    pub show_x_labels: bool,
    /// Exactly one panel owns the shared legend
    pub owns_legend: bool,
}

impl Panel {
    pub fn operation(&self) -> Operation {
        self.dataset.operation
    }

    pub fn precision(&self) -> Precision {
        self.dataset.precision
    }
}

/// The full figure grid: one panel per (operation, precision) pair.
#[derive(Debug, Clone)]
pub struct PanelGrid {
    /// Panels in row-major order
    panels: Vec<Panel>,
}

impl PanelGrid {
    /// Arranges cleaned datasets into grid order.
    ///
    /// Input order does not matter; each dataset's own operation and
    /// precision decide its cell. Callers pass exactly one dataset per
    /// (operation, precision) pair.
    pub fn from_datasets(datasets: Vec<Dataset>) -> Self {
        let bottom_row = Operation::ALL.len() - 1;
        let mut panels: Vec<Panel> = datasets
            .into_iter()
            .map(|dataset| {
                let row = dataset.operation.row_index();
                let col = dataset.precision.col_index();
                Panel {
                    row,
                    col,
                    dataset,
                    show_x_labels: row == bottom_row,
                    owns_legend: false,
                }
            })
            .collect();
        panels.sort_by_key(|p| (p.row, p.col));
        debug_assert_eq!(panels.len(), Operation::ALL.len() * Precision::ALL.len());

        // The top-left panel carries the legend for the whole figure.
        if let Some(first) = panels.first_mut() {
            first.owns_legend = true;
        }
        PanelGrid { panels }
    }

    pub fn n_rows(&self) -> usize {
        Operation::ALL.len()
    }

    pub fn n_cols(&self) -> usize {
        Precision::ALL.len()
    }

    pub fn len(&self) -> usize {
        self.panels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.panels.is_empty()
    }

    /// Get a panel by grid position
    pub fn get(&self, row: usize, col: usize) -> Option<&Panel> {
        self.panels.iter().find(|p| p.row == row && p.col == col)
    }

    /// All panels in row-major order
    pub fn panels(&self) -> &[Panel] {
        &self.panels
    }

    /// Panel that draws the shared legend
    pub fn legend_panel(&self) -> Option<&Panel> {
        self.panels.iter().find(|p| p.owns_legend)
    }

    /// Title of each grid row, top to bottom
    pub fn row_titles(&self) -> Vec<&'static str> {
        Operation::ALL.iter().map(|op| op.title()).collect()
    }

    /// Retained measurements across all panels
    pub fn total_rows(&self) -> usize {
        self.panels.iter().map(|p| p.dataset.len()).sum()
    }

    /// Dropped rows across all panels
    pub fn total_dropped(&self) -> usize {
        self.panels.iter().map(|p| p.dataset.drops.total()).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::{DropStats, Measurement};

    fn dataset(operation: Operation, precision: Precision, n_rows: usize) -> Dataset {
        let rows = (0..n_rows)
            .map(|i| Measurement {
                series: "native".to_string(),
                error: 1e-6 * (i + 1) as f64,
            })
            .collect();
        Dataset {
            operation,
            precision,
            rows,
            drops: DropStats::default(),
        }
    }

    fn full_set() -> Vec<Dataset> {
        let mut datasets = Vec::new();
        for operation in Operation::ALL {
            for precision in Precision::ALL {
                datasets.push(dataset(operation, precision, 3));
            }
        }
        datasets
    }

    #[test]
    fn test_grid_is_row_major_regardless_of_input_order() {
        let mut datasets = full_set();
        datasets.reverse();
        let grid = PanelGrid::from_datasets(datasets);

        assert_eq!(grid.len(), 6);
        let positions: Vec<(usize, usize)> =
            grid.panels().iter().map(|p| (p.row, p.col)).collect();
        assert_eq!(
            positions,
            vec![(0, 0), (0, 1), (0, 2), (1, 0), (1, 1), (1, 2)]
        );

        let bottom_right = grid.get(1, 2).unwrap();
        assert_eq!(bottom_right.operation(), Operation::Multiplication);
        assert_eq!(bottom_right.precision(), Precision::Double);
    }

    #[test]
    fn test_only_bottom_row_shows_x_labels() {
        let grid = PanelGrid::from_datasets(full_set());
        for panel in grid.panels() {
            assert_eq!(panel.show_x_labels, panel.row == grid.n_rows() - 1);
        }
    }

    #[test]
    fn test_exactly_one_panel_owns_the_legend() {
        let grid = PanelGrid::from_datasets(full_set());
        let owners: Vec<&Panel> = grid.panels().iter().filter(|p| p.owns_legend).collect();
        assert_eq!(owners.len(), 1);
        assert_eq!((owners[0].row, owners[0].col), (0, 0));
        assert_eq!(owners[0].operation(), Operation::Addition);
    }

    #[test]
    fn test_row_titles_follow_operation_order() {
        let grid = PanelGrid::from_datasets(full_set());
        assert_eq!(grid.row_titles(), vec!["Addition", "Multiplication"]);
    }

    #[test]
    fn test_grid_totals() {
        let grid = PanelGrid::from_datasets(full_set());
        assert_eq!(grid.total_rows(), 18);
        assert_eq!(grid.total_dropped(), 0);
    }
}
