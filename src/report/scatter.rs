//! Scatter plot of two columns, as a character grid or an SVG figure.

use super::figure::{svg_root, PlotError};
use crate::core::{Dataset, DatasetError};
use faer::Col;
use plotters::prelude::*;
use std::fmt;
use std::path::Path;

const DENSITY: [char; 5] = ['.', ':', 'o', 'O', '@'];
const FIGURE_SIZE: (u32, u32) = (800, 600);

/// Scatter plot binned onto a `width × height` character grid.
///
/// Each cell shows a glyph scaled by how many points fall in it relative to
/// the densest cell, so large samples still reveal the shape of the cloud.
#[derive(Debug, Clone)]
pub struct ScatterPlot {
    x_label: String,
    y_label: String,
    width: usize,
    height: usize,
    counts: Vec<usize>,
    points: Vec<(f64, f64)>,
    x_range: (f64, f64),
    y_range: (f64, f64),
    n_points: usize,
    correlation: f64,
}

impl ScatterPlot {
    /// Bin paired observations; pairs with a non-finite coordinate are skipped.
    pub fn new(x: &Col<f64>, y: &Col<f64>, width: usize, height: usize) -> Self {
        let width = width.max(2);
        let height = height.max(2);

        let points: Vec<(f64, f64)> = x
            .iter()
            .zip(y.iter())
            .map(|(&a, &b)| (a, b))
            .filter(|(a, b)| a.is_finite() && b.is_finite())
            .collect();

        let x_range = padded_range(points.iter().map(|p| p.0));
        let y_range = padded_range(points.iter().map(|p| p.1));

        let mut counts = vec![0; width * height];
        for &(px, py) in &points {
            let col = bin(px, x_range, width);
            let row = height - 1 - bin(py, y_range, height);
            counts[row * width + col] += 1;
        }

        Self {
            x_label: "x".to_string(),
            y_label: "y".to_string(),
            width,
            height,
            counts,
            x_range,
            y_range,
            n_points: points.len(),
            correlation: pearson(&points),
            points,
        }
    }

    /// Plot two named dataset columns, labelled by their names.
    pub fn from_dataset(
        data: &Dataset,
        x: &str,
        y: &str,
        width: usize,
        height: usize,
    ) -> Result<Self, DatasetError> {
        let plot = Self::new(&data.column(x)?, &data.column(y)?, width, height);
        Ok(plot.with_labels(x, y))
    }

    pub fn with_labels(mut self, x: impl Into<String>, y: impl Into<String>) -> Self {
        self.x_label = x.into();
        self.y_label = y.into();
        self
    }

    pub fn n_points(&self) -> usize {
        self.n_points
    }

    /// Pearson correlation of the plotted points.
    pub fn correlation(&self) -> f64 {
        self.correlation
    }

    /// Number of points in the cell at `row` (0 = top) and `col` (0 = left).
    pub fn count_at(&self, row: usize, col: usize) -> usize {
        if row < self.height && col < self.width {
            self.counts[row * self.width + col]
        } else {
            0
        }
    }

    fn title(&self) -> String {
        format!(
            "{} vs {} (n = {}, r = {:.2})",
            self.y_label, self.x_label, self.n_points, self.correlation
        )
    }

    /// Draw every point as a translucent dot so dense regions read darker.
    pub fn draw(&self, path: &Path) -> Result<(), PlotError> {
        let root = svg_root(path, FIGURE_SIZE).into_drawing_area();
        root.fill(&WHITE).map_err(|e| PlotError::draw(path, e))?;

        let mut chart = ChartBuilder::on(&root)
            .caption(self.title(), ("sans-serif", 22))
            .margin(14)
            .x_label_area_size(40)
            .y_label_area_size(60)
            .build_cartesian_2d(self.x_range.0..self.x_range.1, self.y_range.0..self.y_range.1)
            .map_err(|e| PlotError::draw(path, e))?;

        chart
            .configure_mesh()
            .x_desc(self.x_label.as_str())
            .y_desc(self.y_label.as_str())
            .draw()
            .map_err(|e| PlotError::draw(path, e))?;

        chart
            .draw_series(
                self.points
                    .iter()
                    .map(|&(x, y)| Circle::new((x, y), 2, BLUE.mix(0.3).filled())),
            )
            .map_err(|e| PlotError::draw(path, e))?;

        root.present().map_err(|e| PlotError::draw(path, e))
    }

    fn glyph(&self, count: usize, max: usize) -> char {
        if count == 0 || max == 0 {
            return ' ';
        }
        let level = (count as f64 / max as f64 * DENSITY.len() as f64).ceil() as usize;
        DENSITY[level.clamp(1, DENSITY.len()) - 1]
    }
}

/// Min and max of the values, widened when degenerate.
fn padded_range(values: impl Iterator<Item = f64>) -> (f64, f64) {
    let (lo, hi) = values.fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
        (lo.min(v), hi.max(v))
    });
    if !lo.is_finite() || !hi.is_finite() {
        (0.0, 1.0)
    } else if hi - lo <= f64::EPSILON * lo.abs().max(1.0) {
        (lo - 0.5, hi + 0.5)
    } else {
        (lo, hi)
    }
}

fn bin(value: f64, (lo, hi): (f64, f64), cells: usize) -> usize {
    let position = (value - lo) / (hi - lo) * (cells - 1) as f64;
    (position.round() as usize).min(cells - 1)
}

fn pearson(points: &[(f64, f64)]) -> f64 {
    let n = points.len() as f64;
    if points.len() < 2 {
        return f64::NAN;
    }
    let mx = points.iter().map(|p| p.0).sum::<f64>() / n;
    let my = points.iter().map(|p| p.1).sum::<f64>() / n;
    let (mut sxy, mut sxx, mut syy) = (0.0, 0.0, 0.0);
    for &(x, y) in points {
        sxy += (x - mx) * (y - my);
        sxx += (x - mx).powi(2);
        syy += (y - my).powi(2);
    }
    let denom = (sxx * syy).sqrt();
    if denom > 0.0 {
        sxy / denom
    } else {
        f64::NAN
    }
}

impl fmt::Display for ScatterPlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.title())?;

        let top = format!("{:.2}", self.y_range.1);
        let bottom = format!("{:.2}", self.y_range.0);
        let margin = top.len().max(bottom.len());
        let max = self.counts.iter().copied().max().unwrap_or(0);

        for row in 0..self.height {
            let label = if row == 0 {
                top.as_str()
            } else if row == self.height - 1 {
                bottom.as_str()
            } else {
                ""
            };
            let cells: String = (0..self.width)
                .map(|col| self.glyph(self.count_at(row, col), max))
                .collect();
            writeln!(f, "{label:>margin$} |{}", cells.trim_end())?;
        }

        writeln!(f, "{:>margin$} +{}", "", "-".repeat(self.width))?;

        let left = format!("{:.2}", self.x_range.0);
        let right = format!("{:.2}", self.x_range.1);
        let gap = (self.width + 1).saturating_sub(left.len() + right.len()).max(1);
        writeln!(f, "{:>margin$}  {left}{}{right}", "", " ".repeat(gap))?;
        writeln!(f, "{:>margin$}  {}", "", self.x_label)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use faer::Mat;

    #[test]
    fn test_diagonal_points_fill_diagonal_cells() {
        let x = Col::from_fn(5, |i| i as f64);
        let plot = ScatterPlot::new(&x, &x, 5, 5);

        assert_eq!(plot.n_points(), 5);
        for k in 0..5 {
            assert_eq!(plot.count_at(4 - k, k), 1);
        }
        assert!((plot.correlation() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_non_finite_points_are_skipped() {
        let x = Col::from_fn(4, |i| if i == 2 { f64::NAN } else { i as f64 });
        let y = Col::from_fn(4, |i| i as f64);
        let plot = ScatterPlot::new(&x, &y, 10, 4);
        assert_eq!(plot.n_points(), 3);
    }

    #[test]
    fn test_constant_column_does_not_panic() {
        let x = Col::from_fn(10, |_| 3.0);
        let y = Col::from_fn(10, |i| i as f64);
        let plot = ScatterPlot::new(&x, &y, 8, 4);
        assert_eq!(plot.n_points(), 10);
        assert!(plot.correlation().is_nan());
        let _ = plot.to_string();
    }

    #[test]
    fn test_render_from_dataset() {
        let m = Mat::from_fn(50, 2, |i, j| {
            let t = i as f64 / 10.0;
            if j == 0 {
                t
            } else {
                -t
            }
        });
        let data = Dataset::new(vec!["var1".into(), "var2".into()], m).unwrap();
        let plot = ScatterPlot::from_dataset(&data, "var1", "var2", 20, 6).unwrap();
        let text = plot.to_string();

        assert!(text.starts_with("var2 vs var1 (n = 50, r = -1.00)"));
        // title, grid rows, axis, tick labels, axis name
        assert_eq!(text.lines().count(), 1 + 6 + 3);
        assert!(ScatterPlot::from_dataset(&data, "var1", "nope", 20, 6).is_err());
    }

    #[test]
    fn test_draw_svg() {
        let x = Col::from_fn(40, |i| (i as f64 * 0.3).sin());
        let y = Col::from_fn(40, |i| (i as f64 * 0.3).sin() + 0.1 * (i % 3) as f64);
        let plot = ScatterPlot::new(&x, &y, 20, 6).with_labels("var1", "var2");
        let path = std::env::temp_dir().join(format!("ovb-scatter-{}.svg", std::process::id()));

        plot.draw(&path).unwrap();
        let svg = std::fs::read_to_string(&path).unwrap();
        let _ = std::fs::remove_file(&path);

        assert!(svg.contains("<svg"));
        assert!(svg.contains("var2 vs var1 (n = 40"));
        let circles = svg.matches("<circle").count();
        assert!(circles > 0 && circles <= plot.n_points(), "{circles} circles");
    }
}
