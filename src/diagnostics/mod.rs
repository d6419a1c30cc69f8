//! Regressor diagnostics: sample correlations and variance inflation.
//!
//! # Example
//!
//! ```rust,ignore
//! use ovb_sim::diagnostics::{empirical_correlation, dataset_vif};
//!
//! let corr = empirical_correlation(&dataset, &["var1", "var2", "var3"])?;
//! let vif = dataset_vif(&dataset, &["var1", "var2", "var3"])?;
//! ```

mod correlation;
mod vif;

pub use correlation::{correlation_matrix, empirical_correlation};
pub use vif::{dataset_vif, high_vif_predictors, variance_inflation_factor};
