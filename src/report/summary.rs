//! Per-model regression summary in the layout of R's `summary.lm`.

use super::table::TextTable;
use super::{format_estimate, format_p_value, format_statistic};
use crate::core::RegressionResult;
use crate::inference::significance_stars;
use std::fmt;

/// Display adapter for a single fitted model.
///
/// ```rust,ignore
/// println!("{}", RegressionSummary::new(fitted.result(), "Y").with_label("Full"));
/// ```
#[derive(Debug, Clone)]
pub struct RegressionSummary<'a> {
    result: &'a RegressionResult,
    outcome: String,
    label: Option<String>,
    omitted: Vec<String>,
}

impl<'a> RegressionSummary<'a> {
    pub fn new(result: &'a RegressionResult, outcome: impl Into<String>) -> Self {
        Self {
            result,
            outcome: outcome.into(),
            label: None,
            omitted: Vec::new(),
        }
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// List the regressors of the data-generating model this fit leaves out.
    pub fn with_omitted<I, S>(mut self, omitted: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.omitted = omitted.into_iter().map(Into::into).collect();
        self
    }

    fn formula(&self) -> String {
        if self.result.terms.is_empty() {
            format!("{} ~ 1", self.outcome)
        } else {
            format!("{} ~ {}", self.outcome, self.result.terms.join(" + "))
        }
    }

    fn coefficient_table(&self) -> TextTable {
        let r = self.result;
        let mut table = TextTable::new();
        table.push_row(["", "Estimate", "Std. Error", "t value", "Pr(>|t|)", ""]);

        if let Some(intercept) = r.intercept {
            table.push_row(inference_row(
                "(Intercept)",
                intercept,
                r.intercept_std_error,
                r.intercept_t_statistic,
                r.intercept_p_value,
            ));
        }

        for (j, term) in r.terms.iter().enumerate() {
            if r.aliased[j] {
                table.push_row([term.as_str(), "NA", "NA", "NA", "NA", ""]);
                continue;
            }
            table.push_row(inference_row(
                term,
                r.coefficients[j],
                r.std_errors.as_ref().map(|se| se[j]),
                r.t_statistics.as_ref().map(|t| t[j]),
                r.p_values.as_ref().map(|p| p[j]),
            ));
        }
        table
    }
}

fn inference_row(
    name: &str,
    estimate: f64,
    std_error: Option<f64>,
    t_value: Option<f64>,
    p_value: Option<f64>,
) -> Vec<String> {
    let dash = || "-".to_string();
    vec![
        name.to_string(),
        format_estimate(estimate),
        std_error.map(format_estimate).unwrap_or_else(dash),
        t_value.map(format_statistic).unwrap_or_else(dash),
        p_value.map(format_p_value).unwrap_or_else(dash),
        p_value.map(significance_stars).unwrap_or("").to_string(),
    ]
}

impl fmt::Display for RegressionSummary<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let r = self.result;

        if let Some(label) = &self.label {
            writeln!(f, "Model: {label}")?;
        }
        if !self.omitted.is_empty() {
            writeln!(f, "Omitted: {}", self.omitted.join(", "))?;
        }
        writeln!(f, "Call:")?;
        writeln!(f, "lm(formula = {})", self.formula())?;
        writeln!(f)?;

        writeln!(f, "Coefficients:")?;
        write!(f, "{}", self.coefficient_table())?;
        if r.has_aliased() {
            let n_aliased = r.aliased.iter().filter(|&&a| a).count();
            writeln!(f, "({n_aliased} not defined because of singularities)")?;
        }
        writeln!(f, "---")?;
        writeln!(f, "Signif. codes:  0 '***' 0.01 '**' 0.05 '*' 0.1 ' ' 1")?;
        writeln!(f)?;

        let df = r.residual_df();
        writeln!(
            f,
            "Residual standard error: {} on {} degrees of freedom",
            format_estimate(r.rmse),
            df
        )?;
        writeln!(
            f,
            "Multiple R-squared:  {:.4},\tAdjusted R-squared:  {:.4}",
            r.r_squared, r.adj_r_squared
        )?;
        if r.model_df() > 0 && df > 0 {
            writeln!(
                f,
                "F-statistic: {} on {} and {} DF,  p-value: {}",
                format_statistic(r.f_statistic),
                r.model_df(),
                df,
                format_p_value(r.f_pvalue)
            )?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::solvers::{FittedRegressor, OlsRegressor};
    use faer::{Col, Mat};

    fn fitted() -> RegressionResult {
        let x = Mat::from_fn(30, 2, |i, j| {
            let t = i as f64;
            if j == 0 {
                t
            } else {
                (t * 0.37).sin()
            }
        });
        let y = Col::from_fn(30, |i| {
            1.0 + 2.0 * x[(i, 0)] + 0.5 * x[(i, 1)] + ((i * 7) % 5) as f64 * 0.1
        });
        let model = OlsRegressor::new(Default::default());
        model
            .fit_named(&x, &y, vec!["var1".to_string(), "var2".to_string()])
            .unwrap()
            .result()
            .clone()
    }

    #[test]
    fn test_summary_sections() {
        let result = fitted();
        let text = RegressionSummary::new(&result, "Y")
            .with_label("Full")
            .to_string();

        assert!(text.starts_with("Model: Full"));
        assert!(text.contains("lm(formula = Y ~ var1 + var2)"));
        assert!(text.contains("(Intercept)"));
        assert!(text.contains("Residual standard error:"));
        assert!(text.contains("on 27 degrees of freedom"));
        assert!(text.contains("F-statistic:"));
        assert!(text.contains("on 2 and 27 DF"));
        assert!(!text.contains("Omitted:"));
    }

    #[test]
    fn test_omitted_regressors_line() {
        let result = fitted();
        let text = RegressionSummary::new(&result, "Y")
            .with_label("Short")
            .with_omitted(["var3", "var4"])
            .to_string();

        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "Model: Short");
        assert_eq!(lines[1], "Omitted: var3, var4");
    }

    #[test]
    fn test_aliased_term_shows_na() {
        let x = Mat::from_fn(20, 2, |i, _| i as f64);
        let y = Col::from_fn(20, |i| 3.0 * i as f64 + ((i % 3) as f64));
        let result = OlsRegressor::new(Default::default())
            .fit_named(&x, &y, vec!["a".to_string(), "b".to_string()])
            .unwrap()
            .result()
            .clone();

        let text = RegressionSummary::new(&result, "Y").to_string();
        let b_line = text.lines().find(|l| l.starts_with('b')).unwrap();
        assert!(b_line.contains("NA"));
        assert!(text.contains("1 not defined because of singularities"));
    }
}
