//! Correlated standard-normal regressors.

use super::correlation::CorrelationMatrix;
use super::error::SimulationError;
use crate::core::Dataset;
use faer::Mat;
use log::debug;
use rand::Rng;
use rand_distr::StandardNormal;

/// Draws rows `x = L·z`, `z ~ N(0, I)`, so that `Cov(x) = L·Lᵀ = Σ`.
///
/// The sampler owns no random state: each call takes the generator it
/// should draw from, so two calls with identically seeded generators return
/// identical datasets.
#[derive(Debug, Clone)]
pub struct MultivariateNormalSampler {
    names: Vec<String>,
    factor: Mat<f64>,
}

impl MultivariateNormalSampler {
    /// Factor the correlation matrix once; fails if it is not positive semi-definite.
    pub fn new(correlation: &CorrelationMatrix) -> Result<Self, SimulationError> {
        let factor = correlation.factor()?;
        Ok(Self {
            names: correlation.names().to_vec(),
            factor,
        })
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    /// Draw `n_samples` rows with zero mean, unit variance and the target correlation.
    pub fn sample<R: Rng + ?Sized>(
        &self,
        n_samples: usize,
        rng: &mut R,
    ) -> Result<Dataset, SimulationError> {
        if n_samples == 0 {
            return Err(SimulationError::EmptySample);
        }

        let k = self.names.len();
        let mut z = vec![0.0; k];
        let mut data = Mat::zeros(n_samples, k);

        for i in 0..n_samples {
            for zj in z.iter_mut() {
                *zj = rng.sample(StandardNormal);
            }
            for row in 0..k {
                let mut value = 0.0;
                for (col, &zj) in z.iter().enumerate() {
                    value += self.factor[(row, col)] * zj;
                }
                data[(i, row)] = value;
            }
        }

        debug!("drew {n_samples} x {k} multivariate normal sample");
        Ok(Dataset::new(self.names.clone(), data)?)
    }
}
