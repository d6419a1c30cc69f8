//! Ordinary Least Squares regression solver.

use crate::core::{Dataset, ModelSpec, RegressionOptions, RegressionOptionsBuilder, RegressionResult};
use crate::inference::CoefficientInference;
use crate::solvers::traits::{FittedRegressor, RegressionError, Regressor};
use crate::utils::{
    center_columns, center_vector, detect_aliased_columns, detect_constant_columns,
    select_columns,
};
use faer::{Col, Mat};
use log::{debug, warn};
use statrs::distribution::{ContinuousCDF, FisherSnedecor};

/// Ordinary Least Squares regression estimator.
///
/// Columns that are linearly dependent on earlier columns are detected in
/// design order (the same order R's `lm()` uses) and reported as aliased with
/// NaN coefficients; the remaining columns are solved through a QR
/// decomposition.
///
/// # Example
///
/// ```rust,ignore
/// use ovb_sim::solvers::{OlsRegressor, FittedRegressor};
///
/// let fitted = OlsRegressor::builder()
///     .with_intercept(true)
///     .build()
///     .fit_columns(&dataset, "Y", &["var1", "var2"])?;
///
/// println!("R² = {}", fitted.r_squared());
/// println!("β(var1) = {:?}", fitted.result().coefficient("var1"));
/// ```
#[derive(Debug, Clone)]
pub struct OlsRegressor {
    options: RegressionOptions,
}

impl OlsRegressor {
    /// Create a new OLS regressor with the given options.
    pub fn new(options: RegressionOptions) -> Self {
        Self { options }
    }

    /// Create a builder for configuring the regressor.
    pub fn builder() -> OlsRegressorBuilder {
        OlsRegressorBuilder::default()
    }

    pub fn options(&self) -> &RegressionOptions {
        &self.options
    }

    /// Fit `outcome ~ regressors` using columns of a dataset.
    pub fn fit_columns<S: AsRef<str>>(
        &self,
        data: &Dataset,
        outcome: &str,
        regressors: &[S],
    ) -> Result<FittedOls, RegressionError> {
        let x = data.select(regressors)?;
        let y = data.column(outcome)?;
        let terms = regressors.iter().map(|r| r.as_ref().to_string()).collect();
        self.fit_named(&x, &y, terms)
    }

    /// Fit the regressors listed in a [`ModelSpec`].
    pub fn fit_spec(
        &self,
        data: &Dataset,
        outcome: &str,
        spec: &ModelSpec,
    ) -> Result<FittedOls, RegressionError> {
        debug!("fitting {}", spec.formula(outcome));
        self.fit_columns(data, outcome, &spec.regressors)
    }

    /// Fit a design matrix whose columns are labelled by `terms`.
    pub fn fit_named(
        &self,
        x: &Mat<f64>,
        y: &Col<f64>,
        terms: Vec<String>,
    ) -> Result<FittedOls, RegressionError> {
        self.options.validate()?;

        let n_samples = x.nrows();
        let n_features = x.ncols();

        if terms.len() != n_features {
            return Err(RegressionError::TermCountMismatch {
                terms: terms.len(),
                columns: n_features,
            });
        }

        if x.nrows() != y.nrows() {
            return Err(RegressionError::DimensionMismatch {
                x_rows: x.nrows(),
                y_len: y.nrows(),
            });
        }

        if n_samples < 2 {
            return Err(RegressionError::InsufficientObservations {
                needed: 2,
                got: n_samples,
            });
        }

        let with_intercept = self.options.with_intercept;
        let n_params_max = n_features + usize::from(with_intercept);
        if n_samples < n_params_max {
            return Err(RegressionError::InsufficientObservations {
                needed: n_params_max,
                got: n_samples,
            });
        }

        // With an intercept the problem is solved on centered data and the
        // intercept recovered from the means afterwards.
        let (x_work, x_means, y_work, y_mean) = if with_intercept {
            let (xc, means) = center_columns(x);
            let (yc, mean) = center_vector(y);
            (xc, Some(means), yc, mean)
        } else {
            (x.clone(), None, y.clone(), 0.0)
        };

        let aliased = self.detect_aliased(x, &x_work);
        let rank = aliased.iter().filter(|&&a| !a).count();
        if rank < n_features {
            let dropped: Vec<&str> = terms
                .iter()
                .zip(&aliased)
                .filter(|(_, &a)| a)
                .map(|(t, _)| t.as_str())
                .collect();
            warn!("aliased (collinear) terms reported as NaN: {dropped:?}");
        }

        let coefficients = Self::solve_active(&x_work, &y_work, &aliased);

        let intercept = x_means.map(|means| {
            let mut intercept = y_mean;
            for j in 0..n_features {
                if !aliased[j] {
                    intercept -= means[j] * coefficients[j];
                }
            }
            intercept
        });

        let mut fitted_values = Col::zeros(n_samples);
        let mut residuals = Col::zeros(n_samples);
        for i in 0..n_samples {
            let mut pred = intercept.unwrap_or(0.0);
            for j in 0..n_features {
                if !aliased[j] {
                    pred += x[(i, j)] * coefficients[j];
                }
            }
            fitted_values[i] = pred;
            residuals[i] = y[i] - pred;
        }

        let mut result = RegressionResult::empty(terms, n_samples);
        result.coefficients = coefficients;
        result.intercept = intercept;
        result.residuals = residuals;
        result.fitted_values = fitted_values;
        result.rank = rank;
        result.n_parameters = rank + usize::from(with_intercept);
        result.aliased = aliased;
        result.confidence_level = self.options.confidence_level;

        self.compute_statistics(y, &mut result);

        if self.options.compute_inference {
            self.compute_inference(x, &mut result);
        }

        Ok(FittedOls {
            options: self.options.clone(),
            result,
        })
    }

    /// Constant columns are aliased with the intercept; everything else is
    /// checked for linear dependence on the columns before it.
    fn detect_aliased(&self, x: &Mat<f64>, x_work: &Mat<f64>) -> Vec<bool> {
        if !self.options.with_intercept {
            return detect_aliased_columns(x_work, self.options.rank_tolerance);
        }

        let constant = detect_constant_columns(x, 1e-12);
        let masked = Mat::from_fn(x_work.nrows(), x_work.ncols(), |i, j| {
            if constant[j] {
                0.0
            } else {
                x_work[(i, j)]
            }
        });
        detect_aliased_columns(&masked, self.options.rank_tolerance)
    }

    /// Least squares on the non-aliased columns.
    ///
    /// Uses the R factor of `X_active = Q·R` and solves `RᵀR·β = X_activeᵀy`
    /// with one forward and one back substitution, so the thin Q never has to
    /// be materialised for long designs.
    fn solve_active(x: &Mat<f64>, y: &Col<f64>, aliased: &[bool]) -> Col<f64> {
        let active: Vec<bool> = aliased.iter().map(|&a| !a).collect();
        let x_active = select_columns(x, &active);
        let k = x_active.ncols();

        let mut coefficients = Col::from_fn(aliased.len(), |_| f64::NAN);
        if k == 0 {
            return coefficients;
        }

        let qr = x_active.qr();
        let r = qr.R();
        let xty = x_active.transpose() * y;

        // Rᵀ z = Xᵀy
        let mut z = Col::zeros(k);
        for i in 0..k {
            let mut sum = xty[i];
            for j in 0..i {
                sum -= r[(j, i)] * z[j];
            }
            z[i] = sum / r[(i, i)];
        }

        // R β = z
        let mut beta = Col::zeros(k);
        for i in (0..k).rev() {
            let mut sum = z[i];
            for j in (i + 1)..k {
                sum -= r[(i, j)] * beta[j];
            }
            beta[i] = sum / r[(i, i)];
        }

        let mut next = 0;
        for (j, &is_aliased) in aliased.iter().enumerate() {
            if !is_aliased {
                coefficients[j] = beta[next];
                next += 1;
            }
        }
        coefficients
    }

    /// Fill in R², F and information criteria from the residuals.
    fn compute_statistics(&self, y: &Col<f64>, result: &mut RegressionResult) {
        let n = result.n_observations as f64;
        let with_intercept = result.intercept.is_some();

        // R's summary.lm uses the uncentered total sum of squares without an intercept.
        let tss: f64 = if with_intercept {
            let y_mean = y.iter().sum::<f64>() / n;
            y.iter().map(|&yi| (yi - y_mean).powi(2)).sum()
        } else {
            y.iter().map(|&yi| yi.powi(2)).sum()
        };
        let rss = result.rss();

        let r_squared = if tss > 0.0 {
            (1.0 - rss / tss).clamp(0.0, 1.0)
        } else if rss < 1e-10 {
            1.0
        } else {
            0.0
        };

        let df_resid = result.residual_df() as f64;
        let df_model = result.model_df() as f64;
        let df_total = if with_intercept { n - 1.0 } else { n };

        let adj_r_squared = if df_resid > 0.0 {
            1.0 - (1.0 - r_squared) * df_total / df_resid
        } else {
            f64::NAN
        };

        let mse = if df_resid > 0.0 { rss / df_resid } else { f64::NAN };

        let f_statistic = if df_model > 0.0 && df_resid > 0.0 && mse > 0.0 {
            ((tss - rss) / df_model) / mse
        } else {
            f64::NAN
        };

        let f_pvalue = if f_statistic.is_finite() {
            FisherSnedecor::new(df_model, df_resid).map_or(f64::NAN, |d| 1.0 - d.cdf(f_statistic))
        } else {
            f64::NAN
        };

        // Gaussian log-likelihood at the ML variance RSS/n, counting σ as a parameter (R's logLik.lm).
        let log_likelihood = if rss > 0.0 {
            -0.5 * n * ((2.0 * std::f64::consts::PI).ln() + (rss / n).ln() + 1.0)
        } else {
            f64::NAN
        };
        let k = result.n_parameters as f64 + 1.0;

        result.r_squared = r_squared;
        result.adj_r_squared = adj_r_squared;
        result.mse = mse;
        result.rmse = mse.sqrt();
        result.f_statistic = f_statistic;
        result.f_pvalue = f_pvalue;
        result.log_likelihood = log_likelihood;
        result.aic = 2.0 * k - 2.0 * log_likelihood;
        result.bic = k * n.ln() - 2.0 * log_likelihood;
    }

    /// Compute inference statistics (standard errors, t-stats, p-values, CIs).
    fn compute_inference(&self, x: &Mat<f64>, result: &mut RegressionResult) {
        let df = result.residual_df() as f64;

        if df <= 0.0 || !result.mse.is_finite() {
            return;
        }

        let level = self.options.confidence_level;

        let se = match result.intercept {
            Some(intercept) => {
                match CoefficientInference::standard_errors_with_intercept(
                    x,
                    result.mse,
                    &result.aliased,
                ) {
                    Ok((se, se_int)) => {
                        let t_int = if se_int > 0.0 {
                            intercept / se_int
                        } else {
                            f64::NAN
                        };
                        let t_crit = CoefficientInference::t_critical(df, level);

                        result.intercept_std_error = Some(se_int);
                        result.intercept_t_statistic = Some(t_int);
                        result.intercept_p_value = Some(CoefficientInference::p_value(t_int, df));
                        result.intercept_conf_interval =
                            Some((intercept - t_crit * se_int, intercept + t_crit * se_int));
                        Some(se)
                    }
                    Err(reason) => {
                        warn!("standard errors unavailable: {reason}");
                        None
                    }
                }
            }
            None => match CoefficientInference::standard_errors(x, result.mse, &result.aliased) {
                Ok(se) => Some(se),
                Err(reason) => {
                    warn!("standard errors unavailable: {reason}");
                    None
                }
            },
        };

        if let Some(se) = se {
            let t_stats = CoefficientInference::t_statistics(&result.coefficients, &se);
            let p_vals = CoefficientInference::p_values(&t_stats, df);
            let (ci_lower, ci_upper) =
                CoefficientInference::confidence_intervals(&result.coefficients, &se, df, level);

            result.std_errors = Some(se);
            result.t_statistics = Some(t_stats);
            result.p_values = Some(p_vals);
            result.conf_interval_lower = Some(ci_lower);
            result.conf_interval_upper = Some(ci_upper);
        }
    }
}

impl Regressor for OlsRegressor {
    type Fitted = FittedOls;

    /// Fit with positional term names `x1..xk`.
    fn fit(&self, x: &Mat<f64>, y: &Col<f64>) -> Result<Self::Fitted, RegressionError> {
        let terms = (1..=x.ncols()).map(|j| format!("x{j}")).collect();
        self.fit_named(x, y, terms)
    }
}

/// A fitted OLS regression model.
#[derive(Debug, Clone)]
pub struct FittedOls {
    options: RegressionOptions,
    result: RegressionResult,
}

impl FittedOls {
    /// Get the options used to fit this model.
    pub fn options(&self) -> &RegressionOptions {
        &self.options
    }

    /// Regressor names in design order.
    pub fn terms(&self) -> &[String] {
        &self.result.terms
    }
}

impl FittedRegressor for FittedOls {
    fn result(&self) -> &RegressionResult {
        &self.result
    }
}

/// Builder for `OlsRegressor`.
#[derive(Debug, Clone, Default)]
pub struct OlsRegressorBuilder {
    builder: RegressionOptionsBuilder,
}

impl OlsRegressorBuilder {
    /// Create a new builder with default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set whether to include an intercept term.
    pub fn with_intercept(mut self, include: bool) -> Self {
        self.builder = self.builder.with_intercept(include);
        self
    }

    /// Set whether to compute inference statistics.
    pub fn compute_inference(mut self, compute: bool) -> Self {
        self.builder = self.builder.compute_inference(compute);
        self
    }

    /// Set the confidence level for confidence intervals.
    pub fn confidence_level(mut self, level: f64) -> Self {
        self.builder = self.builder.confidence_level(level);
        self
    }

    /// Set the relative rank tolerance used for alias detection.
    pub fn rank_tolerance(mut self, tol: f64) -> Self {
        self.builder = self.builder.rank_tolerance(tol);
        self
    }

    /// Build the OLS regressor. Options are validated when fitting.
    pub fn build(self) -> OlsRegressor {
        OlsRegressor::new(self.builder.build_unchecked())
    }
}
