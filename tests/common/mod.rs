//! Common test utilities and data generators.
#![allow(dead_code)]

use faer::{Col, Mat};
use ovb_sim::simulation::{CorrelationMatrix, OutcomeModel};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rand_distr::StandardNormal;

/// Lower triangle of the correlated demonstration scenario.
pub const CORRELATED_LOWER: [f64; 10] = [1.0, 0.8, 1.0, 0.5, 0.2, 1.0, 0.5, 0.4, 0.8, 1.0];

/// True coefficients of the demonstration outcome, for var1..var4.
pub const TRUE_BETA: [f64; 4] = [2.0, 4.0, 10.0, 1.5];

pub fn variable_names() -> Vec<String> {
    (1..=4).map(|i| format!("var{i}")).collect()
}

pub fn correlated_matrix() -> CorrelationMatrix {
    CorrelationMatrix::from_lower_triangle(variable_names(), &CORRELATED_LOWER)
        .expect("demonstration correlation is valid")
}

pub fn true_model() -> OutcomeModel {
    OutcomeModel::new(variable_names().into_iter().zip(TRUE_BETA))
}

/// Generate linear data: y = intercept + x · (1, 2, ..., k) + noise_std · ε.
///
/// Returns the design, the response and the true coefficients.
pub fn generate_linear_data(
    n_samples: usize,
    n_features: usize,
    intercept: f64,
    noise_std: f64,
    seed: u64,
) -> (Mat<f64>, Col<f64>, Col<f64>) {
    let mut rng = StdRng::seed_from_u64(seed);

    let true_coefficients = Col::from_fn(n_features, |j| (j + 1) as f64);
    let mut x = Mat::zeros(n_samples, n_features);
    let mut y = Col::zeros(n_samples);

    for i in 0..n_samples {
        let mut yi = intercept;
        for j in 0..n_features {
            x[(i, j)] = rng.sample::<f64, _>(StandardNormal);
            yi += x[(i, j)] * true_coefficients[j];
        }
        yi += noise_std * rng.sample::<f64, _>(StandardNormal);
        y[i] = yi;
    }

    (x, y, true_coefficients)
}

/// Column 1 is exactly twice column 0; y depends on columns 0 and 2.
pub fn generate_collinear_data(n_samples: usize) -> (Mat<f64>, Col<f64>) {
    let x = Mat::from_fn(n_samples, 3, |i, j| match j {
        0 => i as f64,
        1 => 2.0 * i as f64,
        _ => (i * i) as f64,
    });
    let y = Col::from_fn(n_samples, |i| 1.0 + 2.0 * x[(i, 0)] + 3.0 * x[(i, 2)]);
    (x, y)
}

/// Column 1 is constant; y depends on columns 0 and 2.
pub fn generate_constant_column_data(n_samples: usize) -> (Mat<f64>, Col<f64>) {
    let x = Mat::from_fn(n_samples, 3, |i, j| match j {
        0 => i as f64,
        1 => 5.0,
        _ => ((i * 7) % 11) as f64,
    });
    let y = Col::from_fn(n_samples, |i| 1.0 + 2.0 * x[(i, 0)] + 3.0 * x[(i, 2)]);
    (x, y)
}

/// Column means and (population) variances of a matrix.
pub fn column_moments(x: &Mat<f64>) -> Vec<(f64, f64)> {
    let n = x.nrows() as f64;
    (0..x.ncols())
        .map(|j| {
            let mean = (0..x.nrows()).map(|i| x[(i, j)]).sum::<f64>() / n;
            let var = (0..x.nrows())
                .map(|i| (x[(i, j)] - mean).powi(2))
                .sum::<f64>()
                / n;
            (mean, var)
        })
        .collect()
}
