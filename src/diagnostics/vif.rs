//! Variance Inflation Factor (VIF) for multicollinearity detection.

use crate::core::{Dataset, DatasetError};
use crate::solvers::{FittedRegressor, OlsRegressor, Regressor};
use faer::{Col, Mat};

/// Compute Variance Inflation Factor for each predictor.
///
/// VIF measures how much the variance of a coefficient estimate is inflated
/// due to multicollinearity. For predictor j:
///
/// VIF_j = 1 / (1 - R²_j)
///
/// where R²_j is the R² from regressing x_j on all other predictors.
///
/// # Interpretation
/// - VIF = 1: No correlation with other predictors
/// - VIF > 5: Moderate multicollinearity (some sources say > 10)
/// - VIF > 10: High multicollinearity
///
/// For standardized regressors with population correlation Σ, VIF_j
/// converges to (Σ⁻¹)_jj.
pub fn variance_inflation_factor(x: &Mat<f64>) -> Col<f64> {
    let n = x.nrows();
    let p = x.ncols();

    if n < 3 || p < 2 {
        return Col::from_fn(p, |_| 1.0);
    }

    let model = OlsRegressor::builder()
        .with_intercept(true)
        .compute_inference(false)
        .build();

    Col::from_fn(p, |j| {
        let x_other = Mat::from_fn(n, p - 1, |i, k| x[(i, if k < j { k } else { k + 1 })]);
        let y_j = Col::from_fn(n, |i| x[(i, j)]);

        match model.fit(&x_other, &y_j) {
            Ok(fitted) => {
                let r_squared = fitted.r_squared();
                let vif_j = if r_squared < 1.0 - 1e-14 {
                    1.0 / (1.0 - r_squared)
                } else {
                    f64::INFINITY
                };
                vif_j.max(1.0)
            }
            // Regression failure leaves the predictor unflagged.
            Err(_) => 1.0,
        }
    })
}

/// VIF for named dataset columns, paired with their names.
pub fn dataset_vif<S: AsRef<str>>(
    data: &Dataset,
    columns: &[S],
) -> Result<Vec<(String, f64)>, DatasetError> {
    let x = data.select(columns)?;
    let vif = variance_inflation_factor(&x);
    Ok(columns
        .iter()
        .enumerate()
        .map(|(j, name)| (name.as_ref().to_string(), vif[j]))
        .collect())
}

/// Identify predictors with high multicollinearity.
///
/// Returns the named VIFs above `threshold`, in input order.
/// Common threshold: 5 or 10.
pub fn high_vif_predictors(vif: &[(String, f64)], threshold: f64) -> Vec<(&str, f64)> {
    vif.iter()
        .filter(|(_, v)| *v > threshold)
        .map(|(name, v)| (name.as_str(), *v))
        .collect()
}
