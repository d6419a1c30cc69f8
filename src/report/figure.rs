//! Shared plumbing for the SVG figures.

use log::info;
use plotters::prelude::*;
use std::fmt;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors raised while writing figures.
#[derive(Debug, Error)]
pub enum PlotError {
    #[error("cannot create figure directory {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to draw {path}: {message}")]
    Draw { path: PathBuf, message: String },
}

impl PlotError {
    pub(crate) fn draw(path: &Path, err: impl fmt::Display) -> Self {
        PlotError::Draw {
            path: path.to_path_buf(),
            message: err.to_string(),
        }
    }
}

pub(crate) fn svg_root(path: &Path, size: (u32, u32)) -> SVGBackend<'_> {
    info!("writing figure {}", path.display());
    SVGBackend::new(path, size)
}

/// Diverging fill for a correlation: red for positive, blue for negative,
/// fading to white at zero. Non-finite values are grey.
pub fn correlation_colour(r: f64) -> RGBColor {
    if !r.is_finite() {
        return RGBColor(200, 200, 200);
    }
    let weight = r.abs().min(1.0);
    let fade = |channel: u8| (255.0 - (255.0 - f64::from(channel)) * weight).round() as u8;
    if r >= 0.0 {
        RGBColor(fade(178), fade(24), fade(43))
    } else {
        RGBColor(fade(33), fade(102), fade(172))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_correlation_colour_endpoints() {
        assert_eq!(correlation_colour(0.0), RGBColor(255, 255, 255));
        assert_eq!(correlation_colour(1.0), RGBColor(178, 24, 43));
        assert_eq!(correlation_colour(-1.0), RGBColor(33, 102, 172));
        assert_eq!(correlation_colour(f64::NAN), RGBColor(200, 200, 200));

        let weak = correlation_colour(0.2);
        let strong = correlation_colour(0.8);
        assert!(weak.1 > strong.1, "stronger correlations are more saturated");
    }
}
