//! # Omitted-Variable Bias, Step by Step
//!
//! Builds the correlated scenario by hand instead of through `Scenario`, so
//! each stage of the pipeline is visible:
//!
//! 1. expand a lower-triangular correlation list into a full matrix
//! 2. draw correlated regressors
//! 3. generate the outcome from known coefficients
//! 4. fit the full and a short regression
//! 5. compare the short-regression estimate against its probability limit
//!
//! Run with: `cargo run --example ovb_walkthrough`

use ovb_sim::prelude::*;
use rand::rngs::StdRng;
use rand::SeedableRng;

fn main() -> Result<(), OvbError> {
    let names: Vec<String> = (1..=4).map(|i| format!("var{i}")).collect();

    // --- 1. Correlation structure ---
    let correlation = CorrelationMatrix::from_lower_triangle(
        names.clone(),
        &[1.0, 0.8, 1.0, 0.5, 0.2, 1.0, 0.5, 0.4, 0.8, 1.0],
    )?;
    println!("{}", CorrelationHeatmap::new(&correlation).with_title("Target correlation"));

    // --- 2. Regressors ---
    let sampler = MultivariateNormalSampler::new(&correlation)?;
    let regressors = sampler.sample(5_000, &mut StdRng::seed_from_u64(1))?;

    // --- 3. Outcome ---
    let truth = OutcomeModel::new([("var1", 2.0), ("var2", 4.0), ("var3", 10.0), ("var4", 1.5)]);
    let y = truth.generate(&regressors, &mut StdRng::seed_from_u64(2))?;
    let data = regressors.with_column("Y", &y)?;

    // --- 4. Fits ---
    let model = OlsRegressor::builder().with_intercept(true).build();
    let full = model.fit_spec(&data, "Y", &ModelSpec::new("Full", names.clone()))?;
    let short = model.fit_spec(&data, "Y", &ModelSpec::new("X1 only", ["var1"]))?;

    println!("{}", RegressionSummary::new(short.result(), "Y").with_label("X1 only"));

    // --- 5. Bias ---
    let plim = expected_coefficients(&correlation, &truth, &["var1"])?;
    let bias = omitted_variable_bias(&correlation, &truth, &["var1"], "var1")?;

    println!("True β1:                 {:.3}", truth.true_coefficient("var1"));
    println!(
        "Full-model estimate:     {:.3}",
        full.result().coefficient("var1").unwrap_or(f64::NAN)
    );
    println!(
        "Short-model estimate:    {:.3}",
        short.result().coefficient("var1").unwrap_or(f64::NAN)
    );
    println!("Short-model plim:        {:.3} (bias {:+.3})", plim[0], bias);

    let mut table = ModelComparison::new("Y").with_focus("var1", 2.0);
    table
        .push_with_expected("Full", full.result(), 2.0)
        .push_with_expected("X1 only", short.result(), plim[0]);
    println!("\n{table}");

    Ok(())
}
