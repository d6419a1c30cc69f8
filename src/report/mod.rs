//! Rendering of fitted models and regressor structure.
//!
//! Everything here is presentational: the renderers borrow finished
//! [`RegressionResult`](crate::core::RegressionResult)s and correlation
//! matrices and implement [`std::fmt::Display`]. The heatmap and scatter
//! plot can also be drawn to SVG files with `plotters`.

mod comparison;
mod figure;
mod heatmap;
mod scatter;
mod summary;
mod table;

pub use comparison::ModelComparison;
pub use figure::{correlation_colour, PlotError};
pub use heatmap::{shade, CorrelationHeatmap};
pub use scatter::ScatterPlot;
pub use summary::RegressionSummary;
pub use table::TextTable;

/// Format an estimate with four decimals, switching to scientific notation
/// for very large or very small magnitudes.
pub fn format_estimate(value: f64) -> String {
    if value.is_nan() {
        "NA".to_string()
    } else if value != 0.0 && (value.abs() >= 1e6 || value.abs() < 1e-4) {
        format!("{value:.3e}")
    } else {
        format!("{value:.4}")
    }
}

/// Format a test statistic with three decimals.
pub fn format_statistic(value: f64) -> String {
    if value.is_nan() {
        "NA".to_string()
    } else if value.is_infinite() {
        "Inf".to_string()
    } else if value.abs() >= 1e6 {
        format!("{value:.3e}")
    } else {
        format!("{value:.3}")
    }
}

/// Format a p-value the way R prints it, flooring at machine precision.
pub fn format_p_value(p: f64) -> String {
    if p.is_nan() {
        "NA".to_string()
    } else if p < 2.2e-16 {
        "<2e-16".to_string()
    } else if p < 1e-4 {
        format!("{p:.2e}")
    } else {
        format!("{p:.4}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_p_value() {
        assert_eq!(format_p_value(0.0), "<2e-16");
        assert_eq!(format_p_value(0.5), "0.5000");
        assert_eq!(format_p_value(3.2e-7), "3.20e-7");
        assert_eq!(format_p_value(f64::NAN), "NA");
    }

    #[test]
    fn test_format_estimate() {
        assert_eq!(format_estimate(2.0), "2.0000");
        assert_eq!(format_estimate(0.0), "0.0000");
        assert_eq!(format_estimate(-1.23456), "-1.2346");
        assert_eq!(format_estimate(1.5e-6), "1.500e-6");
        assert_eq!(format_estimate(f64::NAN), "NA");
    }

    #[test]
    fn test_format_statistic() {
        assert_eq!(format_statistic(119.5218), "119.522");
        assert_eq!(format_statistic(f64::INFINITY), "Inf");
    }
}
