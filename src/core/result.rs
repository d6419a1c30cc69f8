//! Regression result structures.

use faer::Col;

/// Complete result from an OLS fit.
///
/// Contains named coefficients, fit statistics, and optionally inference
/// statistics (standard errors, t-statistics, p-values, confidence intervals).
#[derive(Debug, Clone)]
pub struct RegressionResult {
    // ========== Core Results ==========
    /// Regressor names, one per entry of `coefficients`.
    pub terms: Vec<String>,

    /// Estimated coefficients (excluding intercept).
    /// Aliased (collinear) coefficients are set to NaN.
    pub coefficients: Col<f64>,

    /// Intercept term (if model was fit with intercept).
    pub intercept: Option<f64>,

    /// Residuals (y - fitted_values).
    pub residuals: Col<f64>,

    /// Fitted values (predictions on training data).
    pub fitted_values: Col<f64>,

    // ========== Rank Information ==========
    /// Numerical rank of the design matrix.
    pub rank: usize,

    /// Number of parameters (including intercept if present).
    pub n_parameters: usize,

    /// Number of observations.
    pub n_observations: usize,

    /// Indicates which coefficients are aliased (perfectly collinear).
    pub aliased: Vec<bool>,

    // ========== Fit Statistics ==========
    /// Coefficient of determination (R²).
    pub r_squared: f64,

    /// Adjusted R².
    pub adj_r_squared: f64,

    /// Mean squared error, RSS / residual df.
    pub mse: f64,

    /// Residual standard error, sqrt(mse).
    pub rmse: f64,

    /// F-statistic for overall model significance.
    pub f_statistic: f64,

    /// P-value for F-statistic.
    pub f_pvalue: f64,

    // ========== Information Criteria ==========
    pub aic: f64,
    pub bic: f64,
    pub log_likelihood: f64,

    // ========== Inference Statistics (Optional) ==========
    pub std_errors: Option<Col<f64>>,
    pub intercept_std_error: Option<f64>,
    pub t_statistics: Option<Col<f64>>,
    pub intercept_t_statistic: Option<f64>,
    pub p_values: Option<Col<f64>>,
    pub intercept_p_value: Option<f64>,
    pub conf_interval_lower: Option<Col<f64>>,
    pub conf_interval_upper: Option<Col<f64>>,
    pub intercept_conf_interval: Option<(f64, f64)>,

    /// Confidence level used for intervals.
    pub confidence_level: f64,
}

impl RegressionResult {
    /// Create a new empty result (used internally by solvers).
    pub(crate) fn empty(terms: Vec<String>, n_observations: usize) -> Self {
        let n_features = terms.len();
        Self {
            terms,
            coefficients: Col::zeros(n_features),
            intercept: None,
            residuals: Col::zeros(n_observations),
            fitted_values: Col::zeros(n_observations),
            rank: 0,
            n_parameters: 0,
            n_observations,
            aliased: vec![false; n_features],
            r_squared: 0.0,
            adj_r_squared: 0.0,
            mse: 0.0,
            rmse: 0.0,
            f_statistic: 0.0,
            f_pvalue: 1.0,
            aic: 0.0,
            bic: 0.0,
            log_likelihood: 0.0,
            std_errors: None,
            intercept_std_error: None,
            t_statistics: None,
            intercept_t_statistic: None,
            p_values: None,
            intercept_p_value: None,
            conf_interval_lower: None,
            conf_interval_upper: None,
            intercept_conf_interval: None,
            confidence_level: 0.95,
        }
    }

    /// Residual degrees of freedom (n - p).
    pub fn residual_df(&self) -> usize {
        self.n_observations.saturating_sub(self.n_parameters)
    }

    /// Model degrees of freedom (p - 1 if intercept, else p).
    pub fn model_df(&self) -> usize {
        if self.intercept.is_some() {
            self.n_parameters.saturating_sub(1)
        } else {
            self.n_parameters
        }
    }

    /// Check if any coefficients are aliased.
    pub fn has_aliased(&self) -> bool {
        self.aliased.iter().any(|&a| a)
    }

    /// Index of a regressor by name.
    pub fn term_index(&self, name: &str) -> Option<usize> {
        self.terms.iter().position(|t| t == name)
    }

    /// Coefficient for a named regressor; `None` if absent or aliased.
    pub fn coefficient(&self, name: &str) -> Option<f64> {
        self.term_index(name)
            .filter(|&j| !self.aliased[j])
            .map(|j| self.coefficients[j])
    }

    /// Standard error for a named regressor, if inference was computed.
    pub fn std_error(&self, name: &str) -> Option<f64> {
        let j = self.term_index(name)?;
        self.std_errors.as_ref().map(|se| se[j])
    }

    /// Two-sided p-value for a named regressor, if inference was computed.
    pub fn p_value(&self, name: &str) -> Option<f64> {
        let j = self.term_index(name)?;
        self.p_values.as_ref().map(|p| p[j])
    }

    /// t-statistic for a named regressor, if inference was computed.
    pub fn t_statistic(&self, name: &str) -> Option<f64> {
        let j = self.term_index(name)?;
        self.t_statistics.as_ref().map(|t| t[j])
    }

    /// Residual sum of squares (RSS).
    pub fn rss(&self) -> f64 {
        self.residuals.iter().map(|&r| r.powi(2)).sum()
    }

    /// Total sum of squares (TSS), reconstructed from fitted values and residuals.
    pub fn tss(&self) -> f64 {
        let n = self.n_observations as f64;
        let y_mean = self
            .fitted_values
            .iter()
            .zip(self.residuals.iter())
            .map(|(&f, &r)| f + r)
            .sum::<f64>()
            / n;

        self.fitted_values
            .iter()
            .zip(self.residuals.iter())
            .map(|(&f, &r)| (f + r - y_mean).powi(2))
            .sum()
    }
}
