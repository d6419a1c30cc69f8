//! Statistical inference (standard errors, p-values, confidence intervals).

mod coefficient;

pub use coefficient::{significance_stars, CoefficientInference};
