//! Simulation of omitted-variable bias in ordinary least squares.
//!
//! Correlated regressors are drawn from a multivariate normal distribution,
//! an outcome is generated from known coefficients, and OLS models that leave
//! out some of the regressors are fitted and compared against both the truth
//! and the bias that theory predicts for them.
//!
//! # Example
//!
//! ```rust,ignore
//! use ovb_sim::prelude::*;
//!
//! let report = Scenario::correlated()?.run()?;
//!
//! let short = report.fit("X1 only").unwrap();
//! println!("β1 = {:?} (expected {:?})", short.estimate("var1"), short.expected_coefficient("var1"));
//!
//! // Full text report: correlations, scatter, summaries, comparison table
//! println!("{report}");
//! ```

pub mod config;
pub mod core;
pub mod diagnostics;
pub mod error;
pub mod inference;
pub mod report;
pub mod scenario;
pub mod simulation;
pub mod solvers;
pub mod utils;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::config::{ConfigError, ScenarioConfig, SimulationConfig};
    pub use crate::core::{
        Dataset, DatasetError, ModelSpec, RegressionOptions, RegressionOptionsBuilder,
        RegressionResult,
    };
    pub use crate::diagnostics::{dataset_vif, empirical_correlation, variance_inflation_factor};
    pub use crate::error::OvbError;
    pub use crate::report::{
        CorrelationHeatmap, ModelComparison, PlotError, RegressionSummary, ScatterPlot,
    };
    pub use crate::scenario::{ModelFit, Scenario, ScenarioReport};
    pub use crate::simulation::{
        expected_coefficients, omitted_variable_bias, CorrelationError, CorrelationMatrix,
        MultivariateNormalSampler, OutcomeModel, SimulationError,
    };
    pub use crate::solvers::{
        FittedOls, FittedRegressor, OlsRegressor, RegressionError, Regressor,
    };
}

pub use crate::error::OvbError;
pub use crate::scenario::{Scenario, ScenarioReport};
