//! Side-by-side comparison of several fitted models.

use super::table::TextTable;
use super::{format_estimate, format_statistic};
use crate::core::RegressionResult;
use crate::inference::significance_stars;
use std::fmt;

#[derive(Debug, Clone)]
struct ComparisonColumn<'a> {
    label: String,
    result: &'a RegressionResult,
    expected: Option<f64>,
}

#[derive(Debug, Clone)]
struct Focus {
    term: String,
    true_value: f64,
}

/// Regression table with one column per model.
///
/// Each coefficient cell carries significance stars and the standard error
/// below it in parentheses. When a focus term is set, two extra rows show its
/// true value and the coefficient expected under the omitted-variable bias of
/// each model.
#[derive(Debug, Clone)]
pub struct ModelComparison<'a> {
    outcome: String,
    columns: Vec<ComparisonColumn<'a>>,
    focus: Option<Focus>,
}

impl<'a> ModelComparison<'a> {
    pub fn new(outcome: impl Into<String>) -> Self {
        Self {
            outcome: outcome.into(),
            columns: Vec::new(),
            focus: None,
        }
    }

    /// Highlight one regressor, comparing estimates against `true_value`.
    pub fn with_focus(mut self, term: impl Into<String>, true_value: f64) -> Self {
        self.focus = Some(Focus {
            term: term.into(),
            true_value,
        });
        self
    }

    pub fn push(&mut self, label: impl Into<String>, result: &'a RegressionResult) -> &mut Self {
        self.columns.push(ComparisonColumn {
            label: label.into(),
            result,
            expected: None,
        });
        self
    }

    /// Add a model together with the theoretical value of the focus term.
    pub fn push_with_expected(
        &mut self,
        label: impl Into<String>,
        result: &'a RegressionResult,
        expected: f64,
    ) -> &mut Self {
        self.columns.push(ComparisonColumn {
            label: label.into(),
            result,
            expected: Some(expected),
        });
        self
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// Union of regressor names across models, in order of first appearance.
    pub fn terms(&self) -> Vec<&str> {
        let mut terms: Vec<&str> = Vec::new();
        for column in &self.columns {
            for term in &column.result.terms {
                if !terms.contains(&term.as_str()) {
                    terms.push(term);
                }
            }
        }
        terms
    }

    /// Estimate cell for `term` in one model: value with stars, or empty when
    /// the model does not include the term.
    pub fn estimate_cell(&self, model: usize, term: &str) -> String {
        let Some(column) = self.columns.get(model) else {
            return String::new();
        };
        let r = column.result;
        match r.term_index(term) {
            None => String::new(),
            Some(j) if r.aliased[j] => "NA".to_string(),
            Some(j) => {
                let stars = r
                    .p_values
                    .as_ref()
                    .map(|p| significance_stars(p[j]))
                    .unwrap_or("");
                format!("{:.3}{}", r.coefficients[j], stars)
            }
        }
    }

    fn std_error_cell(result: &RegressionResult, term: &str) -> String {
        match result.term_index(term) {
            Some(j) if !result.aliased[j] => result
                .std_errors
                .as_ref()
                .map(|se| format!("({:.3})", se[j]))
                .unwrap_or_default(),
            _ => String::new(),
        }
    }

    fn to_table(&self) -> TextTable {
        let mut table = TextTable::new();

        let mut header = vec![String::new()];
        header.extend(
            self.columns
                .iter()
                .enumerate()
                .map(|(i, c)| format!("({}) {}", i + 1, c.label)),
        );
        table.push_row(header);
        table.push_rule('-');

        for term in self.terms() {
            let mut estimates = vec![term.to_string()];
            let mut errors = vec![String::new()];
            for (i, column) in self.columns.iter().enumerate() {
                estimates.push(self.estimate_cell(i, term));
                errors.push(Self::std_error_cell(column.result, term));
            }
            table.push_row(estimates);
            table.push_row(errors);
        }

        if self.columns.iter().any(|c| c.result.intercept.is_some()) {
            let mut estimates = vec!["Constant".to_string()];
            let mut errors = vec![String::new()];
            for column in &self.columns {
                let r = column.result;
                match r.intercept {
                    Some(value) => {
                        let stars = r.intercept_p_value.map(significance_stars).unwrap_or("");
                        estimates.push(format!("{value:.3}{stars}"));
                        errors.push(
                            r.intercept_std_error
                                .map(|se| format!("({se:.3})"))
                                .unwrap_or_default(),
                        );
                    }
                    None => {
                        estimates.push(String::new());
                        errors.push(String::new());
                    }
                }
            }
            table.push_row(estimates);
            table.push_row(errors);
        }
        table.push_rule('-');

        if let Some(focus) = &self.focus {
            let mut truth = vec![format!("True {}", focus.term)];
            let mut expected = vec![format!("Expected {}", focus.term)];
            for column in &self.columns {
                let included = column.result.term_index(&focus.term).is_some();
                truth.push(if included {
                    format!("{:.3}", focus.true_value)
                } else {
                    String::new()
                });
                expected.push(match column.expected {
                    Some(value) if included => format!("{value:.3}"),
                    _ => String::new(),
                });
            }
            table.push_row(truth);
            table.push_row(expected);
        }

        self.push_statistic(&mut table, "Observations", |r| {
            r.n_observations.to_string()
        });
        self.push_statistic(&mut table, "R²", |r| format!("{:.3}", r.r_squared));
        self.push_statistic(&mut table, "Adjusted R²", |r| {
            format!("{:.3}", r.adj_r_squared)
        });
        self.push_statistic(&mut table, "Residual Std. Error", |r| {
            format!("{} (df = {})", format_estimate(r.rmse), r.residual_df())
        });
        self.push_statistic(&mut table, "F Statistic", |r| {
            if r.model_df() == 0 || r.residual_df() == 0 {
                String::new()
            } else {
                format!(
                    "{}{} (df = {}; {})",
                    format_statistic(r.f_statistic),
                    significance_stars(r.f_pvalue),
                    r.model_df(),
                    r.residual_df()
                )
            }
        });
        table
    }

    fn push_statistic<F>(&self, table: &mut TextTable, name: &str, cell: F)
    where
        F: Fn(&RegressionResult) -> String,
    {
        let mut row = vec![name.to_string()];
        row.extend(self.columns.iter().map(|c| cell(c.result)));
        table.push_row(row);
    }
}

impl fmt::Display for ModelComparison<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let table = self.to_table().to_string();
        let width = table.lines().map(|l| l.chars().count()).max().unwrap_or(0);

        writeln!(f, "{}", "=".repeat(width))?;
        writeln!(f, "Dependent variable: {}", self.outcome)?;
        write!(f, "{table}")?;
        writeln!(f, "{}", "=".repeat(width))?;
        writeln!(f, "Note: *p<0.1; **p<0.05; ***p<0.01")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::solvers::{FittedRegressor, OlsRegressor};
    use faer::{Col, Mat};

    fn fit(x: &Mat<f64>, y: &Col<f64>, terms: &[&str]) -> RegressionResult {
        OlsRegressor::new(Default::default())
            .fit_named(x, y, terms.iter().map(|t| t.to_string()).collect())
            .unwrap()
            .result()
            .clone()
    }

    fn results() -> (RegressionResult, RegressionResult) {
        let n = 60;
        let full = Mat::from_fn(n, 2, |i, j| {
            let t = i as f64 * 0.1;
            if j == 0 {
                t
            } else {
                (t * 3.1).cos()
            }
        });
        let y = Col::from_fn(n, |i| {
            2.0 * full[(i, 0)] + 4.0 * full[(i, 1)] + ((i * 13) % 7) as f64 * 0.05
        });
        let short = Mat::from_fn(n, 1, |i, _| full[(i, 0)]);
        (fit(&full, &y, &["var1", "var2"]), fit(&short, &y, &["var1"]))
    }

    #[test]
    fn test_terms_union_in_order() {
        let (full, short) = results();
        let mut table = ModelComparison::new("Y");
        table.push("X1 only", &short).push("Full", &full);

        assert_eq!(table.len(), 2);
        assert_eq!(table.terms(), vec!["var1", "var2"]);
        assert_eq!(table.estimate_cell(0, "var2"), "");
        assert!(table.estimate_cell(1, "var2").ends_with("***"));
    }

    #[test]
    fn test_rendered_rows() {
        let (full, short) = results();
        let mut table = ModelComparison::new("Y").with_focus("var1", 2.0);
        table
            .push_with_expected("Full", &full, 2.0)
            .push_with_expected("X1 only", &short, 2.5);

        let text = table.to_string();
        assert!(text.contains("Dependent variable: Y"));
        assert!(text.contains("(1) Full"));
        assert!(text.contains("(2) X1 only"));
        assert!(text.contains("Constant"));
        assert!(text.contains("Expected var1"));
        assert!(text.contains("2.500"));
        assert!(text.contains("Observations"));
        assert!(text.contains("Note: *p<0.1; **p<0.05; ***p<0.01"));

        let obs = text.lines().find(|l| l.starts_with("Observations")).unwrap();
        assert_eq!(obs.matches("60").count(), 2);
    }
}
