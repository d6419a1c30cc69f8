//! Data-generating side of the demonstration: correlation structures,
//! correlated regressors, outcomes from known coefficients, and the bias
//! that omitting regressors should produce.

mod bias;
mod correlation;
mod error;
mod outcome;
mod sampler;

pub use bias::{expected_coefficients, omitted_variable_bias};
pub use correlation::CorrelationMatrix;
pub use error::{CorrelationError, SimulationError};
pub use outcome::OutcomeModel;
pub use sampler::MultivariateNormalSampler;
