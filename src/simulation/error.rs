//! Errors raised while building correlation structures and simulating data.

use crate::core::DatasetError;
use thiserror::Error;

/// Problems with a correlation matrix specification or its factorisation.
#[derive(Debug, Error)]
pub enum CorrelationError {
    #[error("a correlation matrix needs at least one variable")]
    Empty,

    #[error("a {dim}x{dim} lower triangle needs {expected} values, got {got}")]
    LengthMismatch {
        dim: usize,
        expected: usize,
        got: usize,
    },

    #[error("diagonal entry {index} must be 1, got {value}")]
    NonUnitDiagonal { index: usize, value: f64 },

    #[error("correlation at ({row}, {col}) must lie in [-1, 1], got {value}")]
    OutOfRange { row: usize, col: usize, value: f64 },

    #[error("matrix is not positive semi-definite (smallest eigenvalue {min_eigenvalue:.3e})")]
    NotPositiveSemiDefinite { min_eigenvalue: f64 },

    #[error("decomposition failed: {0}")]
    Decomposition(String),

    #[error(transparent)]
    Names(#[from] DatasetError),
}

/// Problems generating regressors or the outcome.
#[derive(Debug, Error)]
pub enum SimulationError {
    #[error("sample size must be at least 1")]
    EmptySample,

    #[error("noise vector has {got} values but the sample has {expected} rows")]
    NoiseLengthMismatch { expected: usize, got: usize },

    #[error("unknown variable '{0}'")]
    UnknownVariable(String),

    #[error("noise standard deviation must be finite and non-negative, got {0}")]
    InvalidNoiseScale(f64),

    #[error("correlation sub-matrix over {0:?} is singular")]
    SingularSubset(Vec<String>),

    #[error(transparent)]
    Correlation(#[from] CorrelationError),

    #[error(transparent)]
    Data(#[from] DatasetError),
}
