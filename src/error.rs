//! Crate-level error type.

use crate::config::ConfigError;
use crate::core::DatasetError;
use crate::report::PlotError;
use crate::simulation::{CorrelationError, SimulationError};
use crate::solvers::RegressionError;
use thiserror::Error;

/// Any failure while configuring or running a scenario.
#[derive(Debug, Error)]
pub enum OvbError {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("correlation error: {0}")]
    Correlation(#[from] CorrelationError),

    #[error("simulation error: {0}")]
    Simulation(#[from] SimulationError),

    #[error("regression error: {0}")]
    Regression(#[from] RegressionError),

    #[error("data error: {0}")]
    Data(#[from] DatasetError),

    #[error("plot error: {0}")]
    Plot(#[from] PlotError),
}
