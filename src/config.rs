//! TOML configuration for the demonstration scenarios.
//!
//! Every field is optional. A missing field takes the value of the built-in
//! correlated scenario, and an absent `[[scenarios]]` list yields both
//! built-in scenarios.
//!
//! ```toml
//! [[scenarios]]
//! name = "weak"
//! lower_triangle = [1.0, 0.3, 1.0, 0.1, 0.1, 1.0, 0.1, 0.1, 0.3, 1.0]
//! n_samples = 2000
//! ```

use crate::core::ModelSpec;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse TOML config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("scenario '{scenario}': {reason}")]
    Invalid { scenario: String, reason: String },
}

/// All scenarios to run, in order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    pub scenarios: Vec<ScenarioConfig>,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            scenarios: vec![ScenarioConfig::correlated(), ScenarioConfig::independent()],
        }
    }
}

impl SimulationConfig {
    pub fn from_toml_str(raw: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let raw = fs::read_to_string(path.as_ref())?;
        Self::from_toml_str(&raw)
    }

    pub fn scenario(&self, name: &str) -> Option<&ScenarioConfig> {
        self.scenarios.iter().find(|s| s.name == name)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        for (i, scenario) in self.scenarios.iter().enumerate() {
            scenario.validate()?;
            if self.scenarios[..i].iter().any(|s| s.name == scenario.name) {
                return Err(scenario.invalid("duplicate scenario name"));
            }
        }
        Ok(())
    }
}

/// One simulate-fit-compare run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScenarioConfig {
    pub name: String,
    pub variables: Vec<String>,
    /// Row-major lower triangle including the diagonal; `None` means the
    /// regressors are independent.
    pub lower_triangle: Option<Vec<f64>>,
    pub n_samples: usize,
    pub sampler_seed: u64,
    pub noise_seed: u64,
    pub outcome: String,
    /// True coefficients, one per entry of `variables`.
    pub true_coefficients: Vec<f64>,
    pub intercept: f64,
    pub noise_sd: f64,
    /// Regressor whose estimate the comparison tracks.
    pub focus: String,
    pub models: Vec<ModelSpec>,
    pub confidence_level: f64,
    /// Regressor pair drawn in the scatter plot, as `[x, y]`.
    pub scatter: [String; 2],
}

impl Default for ScenarioConfig {
    fn default() -> Self {
        Self::correlated()
    }
}

fn demo_variables() -> Vec<String> {
    (1..=4).map(|i| format!("var{i}")).collect()
}

fn demo_models() -> Vec<ModelSpec> {
    vec![
        ModelSpec::new("Full", ["var1", "var2", "var3", "var4"]),
        ModelSpec::new("X1 only", ["var1"]),
        ModelSpec::new("X1 + X2", ["var1", "var2"]),
        ModelSpec::new("X1 + X3 + X4", ["var1", "var3", "var4"]),
    ]
}

impl ScenarioConfig {
    /// Four regressors with strong pairwise correlation.
    pub fn correlated() -> Self {
        Self {
            name: "correlated".to_string(),
            variables: demo_variables(),
            lower_triangle: Some(vec![1.0, 0.8, 1.0, 0.5, 0.2, 1.0, 0.5, 0.4, 0.8, 1.0]),
            n_samples: 10_000,
            sampler_seed: 1234,
            noise_seed: 5678,
            outcome: "Y".to_string(),
            true_coefficients: vec![2.0, 4.0, 10.0, 1.5],
            intercept: 0.0,
            noise_sd: 1.0,
            focus: "var1".to_string(),
            models: demo_models(),
            confidence_level: 0.95,
            scatter: ["var1".to_string(), "var2".to_string()],
        }
    }

    /// The same data-generating process with independent regressors.
    pub fn independent() -> Self {
        Self {
            name: "independent".to_string(),
            lower_triangle: None,
            n_samples: 1_000,
            sampler_seed: 4321,
            noise_seed: 8765,
            ..Self::correlated()
        }
    }

    fn invalid(&self, reason: impl Into<String>) -> ConfigError {
        ConfigError::Invalid {
            scenario: self.name.clone(),
            reason: reason.into(),
        }
    }

    fn require_variable(&self, name: &str, role: &str) -> Result<(), ConfigError> {
        if self.variables.iter().any(|v| v == name) {
            Ok(())
        } else {
            Err(self.invalid(format!("{role} '{name}' is not a declared variable")))
        }
    }

    /// Cross-field checks. Correlation values are checked when the scenario is built.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.name.trim().is_empty() {
            return Err(self.invalid("name must not be empty"));
        }
        if self.variables.is_empty() {
            return Err(self.invalid("at least one variable is required"));
        }
        if self.n_samples == 0 {
            return Err(self.invalid("n_samples must be positive"));
        }
        if self.true_coefficients.len() != self.variables.len() {
            return Err(self.invalid(format!(
                "{} true coefficients given for {} variables",
                self.true_coefficients.len(),
                self.variables.len()
            )));
        }
        if self.variables.iter().any(|v| v == &self.outcome) {
            return Err(self.invalid(format!(
                "outcome '{}' collides with a regressor name",
                self.outcome
            )));
        }
        if !(self.noise_sd.is_finite() && self.noise_sd >= 0.0) {
            return Err(self.invalid("noise_sd must be finite and non-negative"));
        }
        if !(self.confidence_level > 0.0 && self.confidence_level < 1.0) {
            return Err(self.invalid("confidence_level must lie in (0, 1)"));
        }
        if self.models.is_empty() {
            return Err(self.invalid("at least one model is required"));
        }

        self.require_variable(&self.focus, "focus")?;
        for name in &self.scatter {
            self.require_variable(name, "scatter variable")?;
        }
        for model in &self.models {
            for regressor in &model.regressors {
                self.require_variable(regressor, &format!("model '{}' regressor", model.label))?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_the_two_demonstration_scenarios() {
        let config = SimulationConfig::default();
        assert_eq!(config.scenarios.len(), 2);

        let correlated = config.scenario("correlated").unwrap();
        assert_eq!(correlated.n_samples, 10_000);
        assert_eq!(correlated.models.len(), 4);

        let independent = config.scenario("independent").unwrap();
        assert!(independent.lower_triangle.is_none());
        assert_eq!(independent.n_samples, 1_000);
        assert_eq!(independent.true_coefficients, vec![2.0, 4.0, 10.0, 1.5]);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_empty_document_gives_defaults() {
        let config = SimulationConfig::from_toml_str("").unwrap();
        assert_eq!(config, SimulationConfig::default());
    }

    #[test]
    fn test_partial_scenario_fills_from_defaults() {
        let raw = r#"
            [[scenarios]]
            name = "small"
            n_samples = 250
            sampler_seed = 7

            [[scenarios.models]]
            label = "X1 + X3"
            regressors = ["var1", "var3"]
        "#;
        let config = SimulationConfig::from_toml_str(raw).unwrap();
        assert_eq!(config.scenarios.len(), 1);

        let small = &config.scenarios[0];
        assert_eq!(small.name, "small");
        assert_eq!(small.n_samples, 250);
        assert_eq!(small.sampler_seed, 7);
        assert_eq!(small.noise_seed, 5678);
        assert_eq!(small.models, vec![ModelSpec::new("X1 + X3", ["var1", "var3"])]);
        assert_eq!(small.scatter, ["var1".to_string(), "var2".to_string()]);
    }

    #[test]
    fn test_invalid_configs_are_rejected() {
        let unknown = r#"
            [[scenarios]]
            focus = "var9"
        "#;
        assert!(matches!(
            SimulationConfig::from_toml_str(unknown),
            Err(ConfigError::Invalid { .. })
        ));

        let short = r#"
            [[scenarios]]
            true_coefficients = [1.0, 2.0]
        "#;
        assert!(SimulationConfig::from_toml_str(short).is_err());

        let duplicate = r#"
            [[scenarios]]
            name = "a"
            [[scenarios]]
            name = "a"
        "#;
        assert!(SimulationConfig::from_toml_str(duplicate).is_err());

        assert!(matches!(
            SimulationConfig::from_toml_str("scenarios = 3"),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn test_missing_file() {
        assert!(matches!(
            SimulationConfig::from_path("/definitely/not/here.toml"),
            Err(ConfigError::Io(_))
        ));
    }
}
