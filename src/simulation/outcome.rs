//! Outcome generation from known ("true") coefficients.

use super::error::SimulationError;
use crate::core::Dataset;
use faer::Col;
use rand::Rng;
use rand_distr::StandardNormal;

/// The data-generating process `Y = α + Σ βᵢ·Xᵢ + σ·ε`, `ε ~ N(0, 1)`.
#[derive(Debug, Clone, PartialEq)]
pub struct OutcomeModel {
    coefficients: Vec<(String, f64)>,
    intercept: f64,
    noise_sd: f64,
}

impl OutcomeModel {
    /// Coefficients keyed by regressor name; intercept 0 and unit noise.
    pub fn new<I, S>(coefficients: I) -> Self
    where
        I: IntoIterator<Item = (S, f64)>,
        S: Into<String>,
    {
        Self {
            coefficients: coefficients
                .into_iter()
                .map(|(name, beta)| (name.into(), beta))
                .collect(),
            intercept: 0.0,
            noise_sd: 1.0,
        }
    }

    pub fn with_intercept(mut self, intercept: f64) -> Self {
        self.intercept = intercept;
        self
    }

    pub fn with_noise_sd(mut self, noise_sd: f64) -> Self {
        self.noise_sd = noise_sd;
        self
    }

    pub fn coefficients(&self) -> &[(String, f64)] {
        &self.coefficients
    }

    pub fn intercept(&self) -> f64 {
        self.intercept
    }

    pub fn noise_sd(&self) -> f64 {
        self.noise_sd
    }

    /// True coefficient of a regressor; regressors outside the model have 0.
    pub fn true_coefficient(&self, name: &str) -> f64 {
        self.coefficients
            .iter()
            .find(|(n, _)| n == name)
            .map_or(0.0, |&(_, beta)| beta)
    }

    /// `α + Σ βᵢ·Xᵢ` for every row of the dataset.
    pub fn linear_predictor(&self, data: &Dataset) -> Result<Col<f64>, SimulationError> {
        let mut eta = Col::from_fn(data.n_rows(), |_| self.intercept);
        for (name, beta) in &self.coefficients {
            let j = data
                .column_index(name)
                .ok_or_else(|| SimulationError::UnknownVariable(name.clone()))?;
            for i in 0..data.n_rows() {
                eta[i] += beta * data.matrix()[(i, j)];
            }
        }
        Ok(eta)
    }

    /// Draw one standard-normal noise term per row and build the outcome.
    pub fn generate<R: Rng + ?Sized>(
        &self,
        data: &Dataset,
        rng: &mut R,
    ) -> Result<Col<f64>, SimulationError> {
        let mut noise = Col::zeros(data.n_rows());
        for i in 0..data.n_rows() {
            noise[i] = rng.sample(StandardNormal);
        }
        self.generate_with_noise(data, &noise)
    }

    /// Build the outcome from caller-supplied standard-normal noise.
    ///
    /// The noise must have exactly one entry per row; shorter or longer
    /// vectors are rejected rather than truncated or recycled.
    pub fn generate_with_noise(
        &self,
        data: &Dataset,
        noise: &Col<f64>,
    ) -> Result<Col<f64>, SimulationError> {
        if !(self.noise_sd.is_finite() && self.noise_sd >= 0.0) {
            return Err(SimulationError::InvalidNoiseScale(self.noise_sd));
        }
        if noise.nrows() != data.n_rows() {
            return Err(SimulationError::NoiseLengthMismatch {
                expected: data.n_rows(),
                got: noise.nrows(),
            });
        }

        let eta = self.linear_predictor(data)?;
        Ok(Col::from_fn(eta.nrows(), |i| eta[i] + self.noise_sd * noise[i]))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use faer::Mat;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn data() -> Dataset {
        let x = Mat::from_fn(4, 2, |i, j| (i + j) as f64);
        Dataset::new(vec!["var1".into(), "var2".into()], x).unwrap()
    }

    #[test]
    fn test_noiseless_outcome_is_linear_combination() {
        let model = OutcomeModel::new([("var1", 2.0), ("var2", 4.0)]).with_intercept(1.0);
        let y = model
            .generate_with_noise(&data(), &Col::zeros(4))
            .unwrap();

        // row 2: x1 = 2, x2 = 3
        assert_eq!(y[2], 1.0 + 2.0 * 2.0 + 4.0 * 3.0);
    }

    #[test]
    fn test_noise_length_must_match_sample_size() {
        let model = OutcomeModel::new([("var1", 2.0)]);
        let err = model
            .generate_with_noise(&data(), &Col::zeros(1000))
            .unwrap_err();

        assert!(matches!(
            err,
            SimulationError::NoiseLengthMismatch {
                expected: 4,
                got: 1000
            }
        ));
    }

    #[test]
    fn test_unknown_regressor() {
        let model = OutcomeModel::new([("var9", 1.0)]);
        assert!(matches!(
            model.generate(&data(), &mut StdRng::seed_from_u64(3)),
            Err(SimulationError::UnknownVariable(name)) if name == "var9"
        ));
    }

    #[test]
    fn test_invalid_noise_scale() {
        let model = OutcomeModel::new([("var1", 1.0)]).with_noise_sd(-1.0);
        assert!(matches!(
            model.generate(&data(), &mut StdRng::seed_from_u64(3)),
            Err(SimulationError::InvalidNoiseScale(_))
        ));
    }

    #[test]
    fn test_true_coefficient_defaults_to_zero() {
        let model = OutcomeModel::new([("var1", 2.0)]);
        assert_eq!(model.true_coefficient("var1"), 2.0);
        assert_eq!(model.true_coefficient("var3"), 0.0);
    }
}
