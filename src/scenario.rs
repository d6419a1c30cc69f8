//! End-to-end scenario runs: simulate, fit every model, compare.

use crate::config::ScenarioConfig;
use crate::core::{Dataset, ModelSpec};
use crate::diagnostics::{dataset_vif, empirical_correlation, high_vif_predictors};
use crate::error::OvbError;
use crate::report::{
    CorrelationHeatmap, ModelComparison, PlotError, RegressionSummary, ScatterPlot,
};
use crate::simulation::{
    expected_coefficients, CorrelationMatrix, MultivariateNormalSampler, OutcomeModel,
};
use crate::solvers::{FittedOls, FittedRegressor, OlsRegressor};
use log::{debug, info, warn};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

const SCATTER_WIDTH: usize = 60;
const SCATTER_HEIGHT: usize = 20;
const HIGH_VIF: f64 = 10.0;

/// A fully validated scenario, ready to run.
#[derive(Debug, Clone)]
pub struct Scenario {
    name: String,
    correlation: CorrelationMatrix,
    n_samples: usize,
    sampler_seed: u64,
    noise_seed: u64,
    outcome: String,
    truth: OutcomeModel,
    focus: String,
    models: Vec<ModelSpec>,
    regressor: OlsRegressor,
    scatter: [String; 2],
}

impl Scenario {
    pub fn from_config(config: &ScenarioConfig) -> Result<Self, OvbError> {
        config.validate()?;

        let correlation = match &config.lower_triangle {
            Some(lower) => CorrelationMatrix::from_lower_triangle(config.variables.clone(), lower)?,
            None => CorrelationMatrix::identity(config.variables.clone())?,
        };

        let truth = OutcomeModel::new(
            config
                .variables
                .iter()
                .cloned()
                .zip(config.true_coefficients.iter().copied()),
        )
        .with_intercept(config.intercept)
        .with_noise_sd(config.noise_sd);

        let regressor = OlsRegressor::builder()
            .with_intercept(true)
            .confidence_level(config.confidence_level)
            .build();

        Ok(Self {
            name: config.name.clone(),
            correlation,
            n_samples: config.n_samples,
            sampler_seed: config.sampler_seed,
            noise_seed: config.noise_seed,
            outcome: config.outcome.clone(),
            truth,
            focus: config.focus.clone(),
            models: config.models.clone(),
            regressor,
            scatter: config.scatter.clone(),
        })
    }

    /// Strongly correlated regressors, N = 10000.
    pub fn correlated() -> Result<Self, OvbError> {
        Self::from_config(&ScenarioConfig::correlated())
    }

    /// Independent regressors, N = 1000.
    pub fn independent() -> Result<Self, OvbError> {
        Self::from_config(&ScenarioConfig::independent())
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn correlation(&self) -> &CorrelationMatrix {
        &self.correlation
    }

    pub fn truth(&self) -> &OutcomeModel {
        &self.truth
    }

    pub fn models(&self) -> &[ModelSpec] {
        &self.models
    }

    pub fn n_samples(&self) -> usize {
        self.n_samples
    }

    /// Draw the regressors and append the outcome column.
    ///
    /// Regressors and noise come from separately seeded generators, so the
    /// same seeds always reproduce the same dataset.
    pub fn simulate(&self) -> Result<Dataset, OvbError> {
        let sampler = MultivariateNormalSampler::new(&self.correlation)?;
        let mut sampler_rng = StdRng::seed_from_u64(self.sampler_seed);
        let regressors = sampler.sample(self.n_samples, &mut sampler_rng)?;

        let mut noise_rng = StdRng::seed_from_u64(self.noise_seed);
        let y = self.truth.generate(&regressors, &mut noise_rng)?;
        Ok(regressors.with_column(&self.outcome, &y)?)
    }

    pub fn run(&self) -> Result<ScenarioReport, OvbError> {
        info!(
            "scenario '{}': drawing {} samples of {} regressors",
            self.name,
            self.n_samples,
            self.correlation.dim()
        );
        let dataset = self.simulate()?;

        let mut fits = Vec::with_capacity(self.models.len());
        for spec in &self.models {
            let fitted = self.regressor.fit_spec(&dataset, &self.outcome, spec)?;
            let expected = expected_coefficients(&self.correlation, &self.truth, &spec.regressors)?;
            debug!(
                "{}: R² = {:.4}, {} = {:?}",
                spec.label,
                fitted.r_squared(),
                self.focus,
                fitted.result().coefficient(&self.focus)
            );
            fits.push(ModelFit {
                spec: spec.clone(),
                fitted,
                expected,
            });
        }

        let names = self.correlation.names();
        let empirical = empirical_correlation(&dataset, names)?;
        let vif = dataset_vif(&dataset, names)?;
        for (name, value) in high_vif_predictors(&vif, HIGH_VIF) {
            warn!("{name} has VIF {value:.2}; its coefficient is poorly identified");
        }

        info!("scenario '{}': fitted {} models", self.name, fits.len());
        Ok(ScenarioReport {
            name: self.name.clone(),
            outcome: self.outcome.clone(),
            focus: self.focus.clone(),
            truth: self.truth.clone(),
            population: self.correlation.clone(),
            empirical,
            vif,
            dataset,
            fits,
            scatter: self.scatter.clone(),
        })
    }
}

/// One fitted model with the coefficients omitted-variable bias predicts for it.
#[derive(Debug, Clone)]
pub struct ModelFit {
    pub spec: ModelSpec,
    pub fitted: FittedOls,
    /// Probability limits of the coefficients, in `spec.regressors` order.
    pub expected: Vec<f64>,
}

impl ModelFit {
    pub fn label(&self) -> &str {
        &self.spec.label
    }

    pub fn estimate(&self, name: &str) -> Option<f64> {
        self.fitted.result().coefficient(name)
    }

    pub fn expected_coefficient(&self, name: &str) -> Option<f64> {
        self.spec
            .regressors
            .iter()
            .position(|r| r == name)
            .map(|j| self.expected[j])
    }
}

/// Everything produced by a scenario run.
#[derive(Debug, Clone)]
pub struct ScenarioReport {
    name: String,
    outcome: String,
    focus: String,
    truth: OutcomeModel,
    population: CorrelationMatrix,
    empirical: CorrelationMatrix,
    vif: Vec<(String, f64)>,
    dataset: Dataset,
    fits: Vec<ModelFit>,
    scatter: [String; 2],
}

impl ScenarioReport {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    pub fn fits(&self) -> &[ModelFit] {
        &self.fits
    }

    pub fn fit(&self, label: &str) -> Option<&ModelFit> {
        self.fits.iter().find(|f| f.spec.label == label)
    }

    pub fn population_correlation(&self) -> &CorrelationMatrix {
        &self.population
    }

    pub fn empirical_correlation(&self) -> &CorrelationMatrix {
        &self.empirical
    }

    pub fn vif(&self) -> &[(String, f64)] {
        &self.vif
    }

    /// Comparison table of every model, tracking the focus regressor.
    pub fn comparison(&self) -> ModelComparison<'_> {
        let mut table = ModelComparison::new(&self.outcome)
            .with_focus(&self.focus, self.truth.true_coefficient(&self.focus));
        for fit in &self.fits {
            match fit.expected_coefficient(&self.focus) {
                Some(expected) => {
                    table.push_with_expected(fit.label(), fit.fitted.result(), expected)
                }
                None => table.push(fit.label(), fit.fitted.result()),
            };
        }
        table
    }

    pub fn scatter_plot(&self) -> Result<ScatterPlot, OvbError> {
        let [x, y] = &self.scatter;
        Ok(ScatterPlot::from_dataset(
            &self.dataset,
            x,
            y,
            SCATTER_WIDTH,
            SCATTER_HEIGHT,
        )?)
    }

    /// Write the correlation heatmaps and the scatter plot as SVG files into
    /// `dir`, creating it if needed. Returns the written paths.
    pub fn write_figures(&self, dir: &Path) -> Result<Vec<PathBuf>, OvbError> {
        fs::create_dir_all(dir).map_err(|source| PlotError::Io {
            path: dir.to_path_buf(),
            source,
        })?;

        let stem: String = self
            .name
            .chars()
            .map(|c| if c.is_ascii_alphanumeric() || c == '-' { c } else { '_' })
            .collect();
        let population = dir.join(format!("{stem}_population_correlation.svg"));
        let sample = dir.join(format!("{stem}_sample_correlation.svg"));
        let scatter = dir.join(format!("{stem}_scatter.svg"));

        CorrelationHeatmap::new(&self.population)
            .with_title(format!("Population correlation ({})", self.name))
            .draw(&population)?;
        CorrelationHeatmap::new(&self.empirical)
            .with_title(format!("Sample correlation ({})", self.name))
            .draw(&sample)?;
        self.scatter_plot()?.draw(&scatter)?;

        Ok(vec![population, sample, scatter])
    }

    fn true_model(&self) -> String {
        let mut terms: Vec<String> = Vec::new();
        if self.truth.intercept() != 0.0 {
            terms.push(format!("{}", self.truth.intercept()));
        }
        terms.extend(
            self.truth
                .coefficients()
                .iter()
                .map(|(name, beta)| format!("{beta}·{name}")),
        );
        if self.truth.noise_sd() > 0.0 {
            terms.push(if self.truth.noise_sd() == 1.0 {
                "ε".to_string()
            } else {
                format!("{}·ε", self.truth.noise_sd())
            });
        }
        format!("{} = {}", self.outcome, terms.join(" + "))
    }
}

impl fmt::Display for ScenarioReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let banner = format!("Scenario: {} (N = {})", self.name, self.dataset.n_rows());
        writeln!(f, "{}", "#".repeat(banner.chars().count()))?;
        writeln!(f, "{banner}")?;
        writeln!(f, "{}", "#".repeat(banner.chars().count()))?;
        writeln!(f)?;
        writeln!(f, "True model: {}", self.true_model())?;
        writeln!(f)?;

        write!(
            f,
            "{}",
            CorrelationHeatmap::new(&self.population).with_title("Population correlation")
        )?;
        writeln!(f)?;
        write!(
            f,
            "{}",
            CorrelationHeatmap::new(&self.empirical).with_title("Sample correlation")
        )?;
        writeln!(f)?;

        let vif: Vec<String> = self
            .vif
            .iter()
            .map(|(name, v)| format!("{name} = {v:.2}"))
            .collect();
        writeln!(f, "Variance inflation factors: {}", vif.join(", "))?;
        writeln!(f)?;

        // Only fails for unknown columns, which validation rules out.
        if let Ok(plot) = self.scatter_plot() {
            write!(f, "{plot}")?;
            writeln!(f)?;
        }

        for fit in &self.fits {
            let summary = RegressionSummary::new(fit.fitted.result(), &self.outcome)
                .with_label(fit.label())
                .with_omitted(fit.spec.omitted(self.population.names()));
            write!(f, "{summary}")?;
            writeln!(f)?;
        }

        write!(f, "{}", self.comparison())
    }
}
