//! Correlation heatmap, as a text table or an SVG figure.

use super::figure::{correlation_colour, svg_root, PlotError};
use super::table::TextTable;
use crate::simulation::CorrelationMatrix;
use plotters::prelude::*;
use std::fmt;
use std::path::Path;

const FIGURE_SIZE: (u32, u32) = (640, 600);

/// Shade glyph for a correlation coefficient, by absolute value.
pub fn shade(r: f64) -> char {
    let a = r.abs();
    if a.is_nan() || a < 0.2 {
        ' '
    } else if a < 0.4 {
        '░'
    } else if a < 0.6 {
        '▒'
    } else if a < 0.8 {
        '▓'
    } else {
        '█'
    }
}

/// Renders every cell as its signed value followed by a shade glyph.
#[derive(Debug, Clone)]
pub struct CorrelationHeatmap<'a> {
    matrix: &'a CorrelationMatrix,
    title: Option<String>,
}

impl<'a> CorrelationHeatmap<'a> {
    pub fn new(matrix: &'a CorrelationMatrix) -> Self {
        Self {
            matrix,
            title: None,
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Draw the matrix as coloured cells annotated with their values.
    ///
    /// The first variable is the top row and the leftmost column.
    pub fn draw(&self, path: &Path) -> Result<(), PlotError> {
        let names = self.matrix.names();
        let k = names.len() as i32;
        let label = |v: &i32| {
            usize::try_from(*v)
                .ok()
                .and_then(|i| names.get(i))
                .cloned()
                .unwrap_or_default()
        };

        let root = svg_root(path, FIGURE_SIZE).into_drawing_area();
        root.fill(&WHITE).map_err(|e| PlotError::draw(path, e))?;

        let mut chart = ChartBuilder::on(&root)
            .caption(
                self.title.as_deref().unwrap_or("Correlation"),
                ("sans-serif", 22),
            )
            .margin(14)
            .x_label_area_size(40)
            .y_label_area_size(70)
            .build_cartesian_2d(0i32..k, 0i32..k)
            .map_err(|e| PlotError::draw(path, e))?;

        chart
            .configure_mesh()
            .disable_mesh()
            .x_labels(names.len())
            .y_labels(names.len())
            .x_label_formatter(&label)
            .y_label_formatter(&|y| label(&(k - 1 - *y)))
            .draw()
            .map_err(|e| PlotError::draw(path, e))?;

        let cells: Vec<(i32, i32, f64)> = (0..k)
            .flat_map(|i| (0..k).map(move |j| (i, j)))
            .map(|(i, j)| (i, j, self.matrix.get(i as usize, j as usize)))
            .collect();

        chart
            .draw_series(cells.iter().map(|&(i, j, r)| {
                let top = k - i;
                Rectangle::new([(j, top - 1), (j + 1, top)], correlation_colour(r).filled())
            }))
            .map_err(|e| PlotError::draw(path, e))?;

        chart
            .draw_series(cells.iter().map(|&(i, j, r)| {
                let ink = if r.abs() >= 0.6 { WHITE } else { BLACK };
                let text = if r.is_nan() {
                    "NA".to_string()
                } else {
                    format!("{r:.2}")
                };
                EmptyElement::at((j, k - i))
                    + Text::new(text, (12, 12), ("sans-serif", 18).into_font().color(&ink))
            }))
            .map_err(|e| PlotError::draw(path, e))?;

        root.present().map_err(|e| PlotError::draw(path, e))
    }

    fn cell(r: f64) -> String {
        if r.is_nan() {
            "NA  ".to_string()
        } else {
            format!("{r:.2} {}", shade(r))
        }
    }
}

impl fmt::Display for CorrelationHeatmap<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(title) = &self.title {
            writeln!(f, "{title}")?;
        }

        let names = self.matrix.names();
        let mut table = TextTable::new();

        let mut header = vec![String::new()];
        header.extend(names.iter().map(|n| format!("{n}  ")));
        table.push_row(header);

        for (i, name) in names.iter().enumerate() {
            let mut row = vec![name.clone()];
            row.extend((0..names.len()).map(|j| Self::cell(self.matrix.get(i, j))));
            table.push_row(row);
        }

        write!(f, "{table}")?;
        writeln!(f, "|r|: ' ' <0.2  '░' <0.4  '▒' <0.6  '▓' <0.8  '█' >=0.8")
    }
}
