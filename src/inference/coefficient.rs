//! Coefficient inference calculations.

use crate::utils::{invert_via_qr, select_columns};
use faer::{Col, Mat};
use statrs::distribution::{ContinuousCDF, StudentsT};

/// Computes inference statistics for regression coefficients.
pub struct CoefficientInference;

impl CoefficientInference {
    /// Compute standard errors for OLS coefficients without an intercept.
    ///
    /// SE(β_j) = sqrt(σ² * (X'X)^(-1)_{jj})
    pub fn standard_errors(
        x: &Mat<f64>,
        mse: f64,
        aliased: &[bool],
    ) -> Result<Col<f64>, &'static str> {
        let active: Vec<bool> = aliased.iter().map(|&a| !a).collect();
        let x_active = select_columns(x, &active);
        if x_active.ncols() == 0 {
            return Err("All features are aliased");
        }

        let xtx = x_active.transpose() * &x_active;
        let xtx_inv = invert_via_qr(&xtx).ok_or("Matrix is singular")?;

        Ok(Self::expand_diagonal(&xtx_inv, 0, mse, aliased))
    }

    /// Compute standard errors for both intercept and coefficients using the
    /// augmented design matrix `[1 | X_active]`, matching R's `lm()`.
    ///
    /// Returns (coefficient_SE, intercept_SE).
    pub fn standard_errors_with_intercept(
        x: &Mat<f64>,
        mse: f64,
        aliased: &[bool],
    ) -> Result<(Col<f64>, f64), &'static str> {
        let active: Vec<bool> = aliased.iter().map(|&a| !a).collect();
        let x_active = select_columns(x, &active);
        let n_active = x_active.ncols();

        let x_aug = Mat::from_fn(x.nrows(), n_active + 1, |i, j| {
            if j == 0 {
                1.0
            } else {
                x_active[(i, j - 1)]
            }
        });

        let xtx_aug = x_aug.transpose() * &x_aug;
        let xtx_aug_inv = invert_via_qr(&xtx_aug).ok_or("Augmented matrix is singular")?;

        let se_intercept = (mse * xtx_aug_inv[(0, 0)]).sqrt();
        let se_coef = Self::expand_diagonal(&xtx_aug_inv, 1, mse, aliased);

        Ok((se_coef, se_intercept))
    }

    /// Scatter sqrt(mse * diag) of the active-column inverse back to full width,
    /// leaving NaN at aliased positions.
    fn expand_diagonal(inv: &Mat<f64>, offset: usize, mse: f64, aliased: &[bool]) -> Col<f64> {
        let mut se = Col::zeros(aliased.len());
        let mut k = offset;
        for (j, &is_aliased) in aliased.iter().enumerate() {
            if is_aliased {
                se[j] = f64::NAN;
            } else {
                let var = mse * inv[(k, k)];
                se[j] = if var >= 0.0 { var.sqrt() } else { f64::NAN };
                k += 1;
            }
        }
        se
    }

    /// Compute t-statistics for coefficients.
    ///
    /// t_j = β_j / SE(β_j)
    pub fn t_statistics(coefficients: &Col<f64>, std_errors: &Col<f64>) -> Col<f64> {
        Col::from_fn(coefficients.nrows(), |j| {
            if std_errors[j].is_nan() || std_errors[j] == 0.0 {
                f64::NAN
            } else {
                coefficients[j] / std_errors[j]
            }
        })
    }

    /// Two-sided p-value for a single t-statistic with `df` degrees of freedom.
    pub fn p_value(t: f64, df: f64) -> f64 {
        if df <= 0.0 || t.is_nan() {
            return f64::NAN;
        }
        StudentsT::new(0.0, 1.0, df).map_or(f64::NAN, |d| 2.0 * (1.0 - d.cdf(t.abs())))
    }

    /// Compute p-values from t-statistics.
    ///
    /// p_j = 2 * P(|T| > |t_j|) where T ~ t(df)
    pub fn p_values(t_statistics: &Col<f64>, df: f64) -> Col<f64> {
        Col::from_fn(t_statistics.nrows(), |j| Self::p_value(t_statistics[j], df))
    }

    /// Critical value t_{1-α/2, df} for a two-sided interval.
    pub fn t_critical(df: f64, confidence_level: f64) -> f64 {
        if df <= 0.0 {
            return f64::NAN;
        }
        StudentsT::new(0.0, 1.0, df).map_or(f64::NAN, |d| {
            d.inverse_cdf(1.0 - (1.0 - confidence_level) / 2.0)
        })
    }

    /// Compute confidence intervals for coefficients.
    ///
    /// CI_j = β_j ± t_{α/2, df} * SE(β_j)
    pub fn confidence_intervals(
        coefficients: &Col<f64>,
        std_errors: &Col<f64>,
        df: f64,
        confidence_level: f64,
    ) -> (Col<f64>, Col<f64>) {
        let t_crit = Self::t_critical(df, confidence_level);
        let margin = |j: usize| t_crit * std_errors[j];

        let lower = Col::from_fn(coefficients.nrows(), |j| coefficients[j] - margin(j));
        let upper = Col::from_fn(coefficients.nrows(), |j| coefficients[j] + margin(j));

        (lower, upper)
    }
}

/// Significance stars in the convention of regression tables:
/// `***` for p < 0.01, `**` for p < 0.05, `*` for p < 0.1.
pub fn significance_stars(p_value: f64) -> &'static str {
    if p_value.is_nan() {
        ""
    } else if p_value < 0.01 {
        "***"
    } else if p_value < 0.05 {
        "**"
    } else if p_value < 0.1 {
        "*"
    } else {
        ""
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_t_statistics() {
        let coefficients = Col::from_fn(3, |i| (i + 1) as f64);
        let std_errors = Col::from_fn(3, |_| 0.5);

        let t_stats = CoefficientInference::t_statistics(&coefficients, &std_errors);

        assert!((t_stats[0] - 2.0).abs() < 1e-10);
        assert!((t_stats[1] - 4.0).abs() < 1e-10);
        assert!((t_stats[2] - 6.0).abs() < 1e-10);
    }

    #[test]
    fn test_p_values_bounds() {
        let t_stats = Col::from_fn(3, |i| (i + 1) as f64);
        let p_vals = CoefficientInference::p_values(&t_stats, 10.0);

        for p in p_vals.iter() {
            assert!(*p >= 0.0 && *p <= 1.0);
        }
        assert!(CoefficientInference::p_value(1.0, 0.0).is_nan());
    }

    #[test]
    fn test_t_critical_large_df_approaches_normal() {
        let t = CoefficientInference::t_critical(1e6, 0.95);
        assert!((t - 1.959964).abs() < 1e-3);
    }

    #[test]
    fn test_aliased_columns_get_nan_se() {
        let x = Mat::from_fn(6, 2, |i, j| if j == 0 { i as f64 } else { 2.0 * i as f64 });
        let (se, se_int) =
            CoefficientInference::standard_errors_with_intercept(&x, 1.0, &[false, true])
                .expect("active design is full rank");

        assert!(se[0].is_finite());
        assert!(se[1].is_nan());
        assert!(se_int.is_finite());
    }

    #[test]
    fn test_significance_stars() {
        assert_eq!(significance_stars(0.001), "***");
        assert_eq!(significance_stars(0.03), "**");
        assert_eq!(significance_stars(0.07), "*");
        assert_eq!(significance_stars(0.5), "");
        assert_eq!(significance_stars(f64::NAN), "");
    }
}
