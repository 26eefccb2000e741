//! Figure rendering.
//!
//! Draws the panel grid into an SVG document held in memory. Nothing here
//! touches the filesystem: [`Figure::render_to_string`] either returns the
//! complete document or an error, and the caller decides what to write.
//!
//! Layout, top to bottom: a legend strip across the full width, then the
//! panel body. The body carries a rotated value-axis title on its left
//! edge, the panel grid in the middle and rotated row titles on its right
//! edge. Within a panel, gridlines render before the box glyphs so the
//! data always sits on top.

use plotters::coord::types::RangedCoordf64;
use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};

use crate::config::FigureConfig;
use crate::error::Result;
use crate::labels::display_series;
use crate::palette::{series_palette, PaletteDefinition};
use crate::panel::{Panel, PanelGrid};
use crate::stats::BoxSummary;

/// Shared value-axis title on the left edge of the figure
const VALUE_AXIS_TITLE: &str = "Relative error";

/// Vertical pixel band reserved for tick labels under bottom-row panels
const X_LABEL_AREA: i32 = 26;
/// Horizontal pixel band reserved for tick labels left of every panel
const Y_LABEL_AREA: i32 = 56;
/// Fallback value-axis range for a panel with nothing to draw
const EMPTY_PANEL_RANGE: (f64, f64) = (1e-9, 1.0);

/// One fully composed figure, ready to render.
pub struct Figure<'a> {
    grid: &'a PanelGrid,
    config: &'a FigureConfig,
    palette: &'static PaletteDefinition,
}

impl<'a> Figure<'a> {
    pub fn new(grid: &'a PanelGrid, config: &'a FigureConfig) -> Self {
        Figure {
            grid,
            config,
            palette: series_palette(&config.palette),
        }
    }

    /// Renders the complete SVG document into a string.
    ///
    /// The document only exists on success; a failed render leaves nothing
    /// behind for a caller to write out by accident.
    pub fn render_to_string(&self) -> Result<String> {
        let mut buffer = String::new();
        {
            let root = SVGBackend::with_string(&mut buffer, (self.config.width, self.config.height))
                .into_drawing_area();
            self.render_into(&root)?;
            root.present()?;
        }
        Ok(buffer)
    }

    fn render_into(&self, root: &DrawingArea<SVGBackend, Shift>) -> Result<()> {
        root.fill(&WHITE)?;

        let (legend_area, body) = root.split_vertically(self.config.legend_height as i32);
        let side = self.config.side_title_width as i32;
        let (left_strip, rest) = body.split_horizontally(side);
        let (rest_w, _) = rest.dim_in_pixel();
        let (grid_area, right_strip) = rest.split_horizontally(rest_w as i32 - side);

        self.draw_value_axis_title(&left_strip)?;
        self.draw_row_titles(&right_strip)?;

        let cells = grid_area.split_evenly((self.grid.n_rows(), self.grid.n_cols()));
        for panel in self.grid.panels() {
            let cell = &cells[panel.row * self.grid.n_cols() + panel.col];
            self.draw_panel(cell, panel)?;
        }

        if let Some(panel) = self.grid.legend_panel() {
            self.draw_legend(&legend_area, panel)?;
        }
        Ok(())
    }

    /// Rotated "Relative error" centered on the left strip.
    fn draw_value_axis_title(&self, strip: &DrawingArea<SVGBackend, Shift>) -> Result<()> {
        let (w, h) = strip.dim_in_pixel();
        let style = ("sans-serif", self.config.base_font + 1.0)
            .into_font()
            .transform(FontTransform::Rotate270)
            .color(&BLACK)
            .pos(Pos::new(HPos::Center, VPos::Center));
        strip.draw(&Text::new(
            VALUE_AXIS_TITLE,
            (w as i32 / 2, h as i32 / 2),
            style,
        ))?;
        Ok(())
    }

    /// Rotated operation titles, one centered per grid row, on the right strip.
    fn draw_row_titles(&self, strip: &DrawingArea<SVGBackend, Shift>) -> Result<()> {
        let (w, h) = strip.dim_in_pixel();
        let n_rows = self.grid.n_rows() as i32;
        let style = ("sans-serif", self.config.base_font + 1.0)
            .into_font()
            .transform(FontTransform::Rotate270)
            .color(&BLACK)
            .pos(Pos::new(HPos::Center, VPos::Center));
        for (row, title) in self.grid.row_titles().into_iter().enumerate() {
            let y = (2 * row as i32 + 1) * h as i32 / (2 * n_rows);
            strip.draw(&Text::new(title, (w as i32 / 2, y), style.clone()))?;
        }
        Ok(())
    }

    /// One box-plot panel: log-scale value axis, one box per known series.
    fn draw_panel(&self, cell: &DrawingArea<SVGBackend, Shift>, panel: &Panel) -> Result<()> {
        let series_order = panel.operation().series_order();
        let summaries: Vec<(usize, BoxSummary)> = series_order
            .iter()
            .enumerate()
            .filter_map(|(i, series)| {
                BoxSummary::from_samples(&panel.dataset.series_errors(series)).map(|s| (i, s))
            })
            .collect();

        let (y_lo, y_hi) = panel_value_range(&summaries);
        let x_label_area = if panel.show_x_labels { X_LABEL_AREA } else { 8 };

        let mut chart = ChartBuilder::on(cell)
            .margin(6)
            .x_label_area_size(x_label_area)
            .y_label_area_size(Y_LABEL_AREA)
            .build_cartesian_2d(0.0f64..1.0f64, (y_lo..y_hi).log_scale())?;

        // Mesh first: gridlines must stay behind the glyphs.
        chart
            .configure_mesh()
            .disable_x_mesh()
            .disable_x_axis()
            .y_labels(6)
            .y_label_formatter(&|v: &f64| log_tick_label(*v))
            .label_style(("sans-serif", self.config.base_font - 3.0))
            .axis_style(BLACK.mix(0.8))
            .bold_line_style(BLACK.mix(0.2))
            .light_line_style(BLACK.mix(0.07))
            .draw()?;

        let slot = 1.0 / series_order.len() as f64;
        let half = slot * 0.32;
        for (index, summary) in &summaries {
            let color = self.palette.color(*index);
            let center = slot * (*index as f64 + 0.5);
            draw_box_glyph(&mut chart, center, half, summary, color)?;
        }

        if panel.show_x_labels {
            let (w, h) = cell.dim_in_pixel();
            let style = ("sans-serif", self.config.base_font - 1.0)
                .into_font()
                .color(&BLACK)
                .pos(Pos::new(HPos::Center, VPos::Top));
            // Centered under the plot area, inside the tick label band.
            let x = (w as i32 + Y_LABEL_AREA) / 2;
            let y = h as i32 - X_LABEL_AREA + 4;
            cell.draw(&Text::new(panel.precision().label(), (x, y), style))?;
        }
        Ok(())
    }

    /// Shared legend strip: one swatch and label per series of the owning
    /// panel's operation, in drawing order. Drawn exactly once per figure.
    fn draw_legend(&self, strip: &DrawingArea<SVGBackend, Shift>, panel: &Panel) -> Result<()> {
        let series_order = panel.operation().series_order();
        let (w, h) = strip.dim_in_pixel();
        let columns = self.config.legend_columns.max(1);
        let left = self.config.side_title_width as i32 + Y_LABEL_AREA;
        let col_w = ((w as i32 - left) / columns as i32).max(1);
        let swatch = 12;

        let label_style = ("sans-serif", self.config.base_font)
            .into_font()
            .color(&BLACK)
            .pos(Pos::new(HPos::Left, VPos::Center));

        for (index, series) in series_order.iter().enumerate() {
            let row = (index / columns) as i32;
            let col = (index % columns) as i32;
            let x = left + col * col_w;
            let y_mid = h as i32 / 2 + row * (swatch + 6);
            let color = self.palette.color(index);

            let swatch_box = [
                (x, y_mid - swatch / 2),
                (x + swatch + 4, y_mid + swatch / 2),
            ];
            strip.draw(&Rectangle::new(swatch_box, color.filled()))?;
            strip.draw(&Rectangle::new(swatch_box, BLACK.stroke_width(1)))?;
            strip.draw(&Text::new(
                display_series(series),
                (x + swatch + 12, y_mid),
                label_style.clone(),
            ))?;
        }
        Ok(())
    }
}

/// Draws one Tukey box glyph at `center` with horizontal half-width `half`.
///
/// Draw order: whisker stems and caps, filled box, box border, median,
/// fliers. All coordinates are data coordinates, so the glyph survives any
/// panel size.
fn draw_box_glyph(
    chart: &mut ChartContext<'_, SVGBackend<'_>, Cartesian2d<RangedCoordf64, LogCoord<f64>>>,
    center: f64,
    half: f64,
    summary: &BoxSummary,
    color: RGBColor,
) -> Result<()> {
    let stem = BLACK.stroke_width(1);
    let cap_half = half * 0.5;

    chart.draw_series(std::iter::once(PathElement::new(
        vec![(center, summary.whisker_low), (center, summary.q1)],
        stem,
    )))?;
    chart.draw_series(std::iter::once(PathElement::new(
        vec![(center, summary.q3), (center, summary.whisker_high)],
        stem,
    )))?;
    chart.draw_series(std::iter::once(PathElement::new(
        vec![
            (center - cap_half, summary.whisker_low),
            (center + cap_half, summary.whisker_low),
        ],
        stem,
    )))?;
    chart.draw_series(std::iter::once(PathElement::new(
        vec![
            (center - cap_half, summary.whisker_high),
            (center + cap_half, summary.whisker_high),
        ],
        stem,
    )))?;

    let box_corners = [
        (center - half, summary.q1),
        (center + half, summary.q3),
    ];
    chart.draw_series(std::iter::once(Rectangle::new(box_corners, color.filled())))?;
    chart.draw_series(std::iter::once(Rectangle::new(
        box_corners,
        BLACK.stroke_width(1),
    )))?;

    chart.draw_series(std::iter::once(PathElement::new(
        vec![
            (center - half, summary.median),
            (center + half, summary.median),
        ],
        BLACK.stroke_width(2),
    )))?;

    chart.draw_series(
        summary
            .fliers
            .iter()
            .map(|&v| Circle::new((center, v), 2, BLACK.mix(0.45).filled())),
    )?;
    Ok(())
}

/// Value-axis range covering every glyph, padded outward to whole decades.
fn panel_value_range(summaries: &[(usize, BoxSummary)]) -> (f64, f64) {
    let mut lo = f64::INFINITY;
    let mut hi = f64::NEG_INFINITY;
    for (_, summary) in summaries {
        let (s_lo, s_hi) = summary.extent();
        lo = lo.min(s_lo);
        hi = hi.max(s_hi);
    }
    if !lo.is_finite() || !hi.is_finite() || lo <= 0.0 {
        return EMPTY_PANEL_RANGE;
    }
    decade_range(lo, hi)
}

/// Pads `[lo, hi]` (both strictly positive) outward to powers of ten.
fn decade_range(lo: f64, hi: f64) -> (f64, f64) {
    let lower = 10f64.powf(lo.log10().floor());
    let upper = 10f64.powf(hi.log10().ceil());
    if lower == upper {
        (lower / 10.0, upper * 10.0)
    } else {
        (lower, upper)
    }
}

/// Tick label for a log-scale key point; decades print as `1e<exp>`.
fn log_tick_label(value: f64) -> String {
    let exp = value.log10();
    let rounded = exp.round();
    if (exp - rounded).abs() < 1e-6 {
        format!("1e{}", rounded as i32)
    } else {
        format!("{:.0e}", value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::{Dataset, DropStats, Measurement};
    use crate::labels::{Operation, Precision};

    fn dataset_with_series(
        operation: Operation,
        precision: Precision,
        magnitudes: &[f64],
    ) -> Dataset {
        let mut rows = Vec::new();
        for (i, series) in operation.series_order().iter().enumerate() {
            for &m in magnitudes {
                rows.push(Measurement {
                    series: series.to_string(),
                    error: m * (i + 1) as f64,
                });
            }
        }
        Dataset {
            operation,
            precision,
            rows,
            drops: DropStats::default(),
        }
    }

    fn full_grid() -> PanelGrid {
        let magnitudes = [1e-8, 3e-8, 1e-7, 4e-7, 2e-6, 1e-5];
        let mut datasets = Vec::new();
        for operation in Operation::ALL {
            for precision in Precision::ALL {
                datasets.push(dataset_with_series(operation, precision, &magnitudes));
            }
        }
        PanelGrid::from_datasets(datasets)
    }

    #[test]
    fn test_renders_a_complete_svg_document() {
        let grid = full_grid();
        let config = FigureConfig::default();
        let svg = Figure::new(&grid, &config).render_to_string().unwrap();
        assert!(svg.starts_with("<svg"));
        assert!(svg.trim_end().ends_with("</svg>"));
    }

    #[test]
    fn test_legend_labels_appear_exactly_once() {
        let grid = full_grid();
        let config = FigureConfig::default();
        let svg = Figure::new(&grid, &config).render_to_string().unwrap();
        for label in ["Native", "HEAR γ=2", "HEAR γ=1", "HEAR γ=0"] {
            assert_eq!(svg.matches(label).count(), 1, "label {label} not unique");
        }
        // Raw series identifiers never reach the figure.
        assert_eq!(svg.matches("native").count(), 0);
        assert_eq!(svg.matches("HEAR0").count(), 0);
    }

    #[test]
    fn test_x_labels_only_on_bottom_row() {
        let grid = full_grid();
        let config = FigureConfig::default();
        let svg = Figure::new(&grid, &config).render_to_string().unwrap();
        for label in ["FP16", "FP32", "FP64"] {
            assert_eq!(svg.matches(label).count(), 1, "label {label} not unique");
        }
    }

    #[test]
    fn test_outer_titles_are_present() {
        let grid = full_grid();
        let config = FigureConfig::default();
        let svg = Figure::new(&grid, &config).render_to_string().unwrap();
        assert_eq!(svg.matches("Relative error").count(), 1);
        assert_eq!(svg.matches("Addition").count(), 1);
        assert_eq!(svg.matches("Multiplication").count(), 1);
    }

    #[test]
    fn test_empty_dataset_still_renders() {
        let mut datasets = Vec::new();
        for operation in Operation::ALL {
            for precision in Precision::ALL {
                datasets.push(Dataset {
                    operation,
                    precision,
                    rows: Vec::new(),
                    drops: DropStats::default(),
                });
            }
        }
        let grid = PanelGrid::from_datasets(datasets);
        let config = FigureConfig::default();
        let svg = Figure::new(&grid, &config).render_to_string().unwrap();
        assert!(svg.starts_with("<svg"));
    }

    #[test]
    fn test_rendering_is_deterministic() {
        let grid = full_grid();
        let config = FigureConfig::default();
        let first = Figure::new(&grid, &config).render_to_string().unwrap();
        let second = Figure::new(&grid, &config).render_to_string().unwrap();
        assert_eq!(first, second);
    }

    fn assert_decade(value: f64, expected_exp: f64) {
        assert!(
            (value.log10() - expected_exp).abs() < 1e-9,
            "expected 1e{expected_exp}, got {value}"
        );
    }

    #[test]
    fn test_decade_range_pads_outward() {
        let (lo, hi) = decade_range(2e-7, 3e-3);
        assert_decade(lo, -7.0);
        assert_decade(hi, -2.0);
    }

    #[test]
    fn test_decade_range_of_a_single_magnitude_still_spans() {
        let (lo, hi) = decade_range(5e-4, 5e-4);
        assert_decade(lo, -4.0);
        assert_decade(hi, -3.0);
        assert!(lo < hi);
    }

    #[test]
    fn test_log_tick_label_formats_decades() {
        assert_eq!(log_tick_label(1e-8), "1e-8");
        assert_eq!(log_tick_label(1.0), "1e0");
        assert_eq!(log_tick_label(100.0), "1e2");
    }

    #[test]
    fn test_panel_value_range_falls_back_when_empty() {
        assert_eq!(panel_value_range(&[]), EMPTY_PANEL_RANGE);
    }
}
