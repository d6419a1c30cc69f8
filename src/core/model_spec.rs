//! Named regressor subsets used in place of symbolic model formulas.

use serde::{Deserialize, Serialize};

/// A labelled, ordered list of regressor columns to fit against an outcome.
///
/// `ModelSpec::new("X1 + X2", ["var1", "var2"])` plays the role of the
/// formula `Y ~ var1 + var2`; the intercept is controlled by the regressor's
/// options rather than by the spec.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelSpec {
    pub label: String,
    pub regressors: Vec<String>,
}

impl ModelSpec {
    pub fn new<L, I, S>(label: L, regressors: I) -> Self
    where
        L: Into<String>,
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            label: label.into(),
            regressors: regressors.into_iter().map(Into::into).collect(),
        }
    }

    /// Whether `name` is one of this model's regressors.
    pub fn includes(&self, name: &str) -> bool {
        self.regressors.iter().any(|r| r == name)
    }

    /// Regressors from `universe` that this model leaves out, in universe order.
    pub fn omitted<'a>(&self, universe: &'a [String]) -> Vec<&'a str> {
        universe
            .iter()
            .filter(|name| !self.includes(name))
            .map(String::as_str)
            .collect()
    }

    /// Render as an R-style formula, e.g. `Y ~ var1 + var2`.
    pub fn formula(&self, outcome: &str) -> String {
        if self.regressors.is_empty() {
            format!("{outcome} ~ 1")
        } else {
            format!("{outcome} ~ {}", self.regressors.join(" + "))
        }
    }
}
