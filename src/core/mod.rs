//! Core types for the simulation and regression fits.

mod dataset;
mod model_spec;
mod options;
mod result;

pub(crate) use dataset::validate_names;
pub use dataset::{Dataset, DatasetError};
pub use model_spec::ModelSpec;
pub use options::{OptionsError, RegressionOptions, RegressionOptionsBuilder};
pub use result::RegressionResult;
