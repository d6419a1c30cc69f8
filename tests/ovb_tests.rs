//! Omitted-variable bias end to end: simulate, fit, compare with theory.

mod common;

use ovb_sim::config::ScenarioConfig;
use ovb_sim::scenario::Scenario;
use ovb_sim::simulation::{expected_coefficients, omitted_variable_bias, CorrelationMatrix};
use ovb_sim::solvers::FittedRegressor;

#[test]
fn test_full_model_recovers_true_coefficients() {
    let report = Scenario::correlated().unwrap().run().unwrap();
    let full = report.fit("Full").unwrap();

    for (name, beta) in common::variable_names().iter().zip(common::TRUE_BETA) {
        let estimate = full.estimate(name).unwrap();
        assert!(
            (estimate - beta).abs() < 0.1,
            "{name}: estimate {estimate}, truth {beta}"
        );
    }
    assert!(full.fitted.r_squared() > 0.99);
}

#[test]
fn test_correlated_short_regression_is_biased() {
    let report = Scenario::correlated().unwrap().run().unwrap();
    let short = report.fit("X1 only").unwrap();

    let beta1 = short.estimate("var1").unwrap();
    let se = short.fitted.result().std_error("var1").unwrap();

    assert!((beta1 - 2.0).abs() > se, "β1 = {beta1} should be biased away from 2");
    assert!((beta1 - 10.95).abs() < 0.5, "β1 = {beta1}, theory 10.95");
}

#[test]
fn test_every_misspecified_model_tracks_its_probability_limit() {
    let report = Scenario::correlated().unwrap().run().unwrap();

    for fit in report.fits() {
        for (name, expected) in fit.spec.regressors.iter().zip(&fit.expected) {
            let estimate = fit.estimate(name).unwrap();
            let se = fit.fitted.result().std_error(name).unwrap();
            assert!(
                (estimate - expected).abs() < 5.0 * se + 0.05,
                "{}: {name} = {estimate}, plim {expected}, se {se}",
                fit.label()
            );
        }
    }
}

#[test]
fn test_full_model_has_highest_r_squared_when_correlated() {
    let report = Scenario::correlated().unwrap().run().unwrap();
    let full = report.fit("Full").unwrap().fitted.r_squared();

    for fit in report.fits().iter().filter(|f| f.label() != "Full") {
        assert!(
            full > fit.fitted.r_squared(),
            "{} R² {} >= full {}",
            fit.label(),
            fit.fitted.r_squared(),
            full
        );
    }
}

#[test]
fn test_independent_regressors_give_unbiased_short_regression() {
    let report = Scenario::independent().unwrap().run().unwrap();

    let full = report.fit("Full").unwrap();
    let short = report.fit("X1 only").unwrap();

    let beta_full = full.estimate("var1").unwrap();
    let beta_short = short.estimate("var1").unwrap();
    let se_short = short.fitted.result().std_error("var1").unwrap();

    assert!(
        (beta_short - beta_full).abs() < 4.0 * se_short,
        "short {beta_short} vs full {beta_full}, se {se_short}"
    );
    assert!(
        (beta_short - 2.0).abs() < se_short,
        "short {beta_short} should be within one se ({se_short}) of the true 2"
    );
    assert_eq!(short.expected_coefficient("var1"), Some(2.0));
}

#[test]
fn test_runs_are_reproducible() {
    let a = Scenario::correlated().unwrap().run().unwrap();
    let b = Scenario::correlated().unwrap().run().unwrap();

    for (fa, fb) in a.fits().iter().zip(b.fits()) {
        let ca = &fa.fitted.result().coefficients;
        let cb = &fb.fitted.result().coefficients;
        for j in 0..ca.nrows() {
            assert_eq!(ca[j].to_bits(), cb[j].to_bits());
        }
    }
}

#[test]
fn test_changing_the_noise_seed_changes_only_the_outcome() {
    let base = ScenarioConfig {
        n_samples: 300,
        ..ScenarioConfig::correlated()
    };
    let other = ScenarioConfig {
        noise_seed: base.noise_seed + 1,
        ..base.clone()
    };

    let a = Scenario::from_config(&base).unwrap().simulate().unwrap();
    let b = Scenario::from_config(&other).unwrap().simulate().unwrap();

    let y = a.column_index("Y").unwrap();
    let mut outcome_differs = false;
    for i in 0..300 {
        for j in 0..4 {
            assert_eq!(a.matrix()[(i, j)], b.matrix()[(i, j)]);
        }
        outcome_differs |= a.matrix()[(i, y)] != b.matrix()[(i, y)];
    }
    assert!(outcome_differs);
}

#[test]
fn test_theoretical_bias_values() {
    let corr = common::correlated_matrix();
    let truth = common::true_model();

    let short = omitted_variable_bias(&corr, &truth, &["var1"], "var1").unwrap();
    assert!((short - 8.95).abs() < 1e-12);

    let three = expected_coefficients(&corr, &truth, &["var1", "var3", "var4"]).unwrap();
    assert!((three[0] - 5.508).abs() < 1e-3, "{three:?}");
    assert!((three[1] - 7.692).abs() < 1e-3, "{three:?}");
    assert!((three[2] - 3.192).abs() < 1e-3, "{three:?}");

    let identity = CorrelationMatrix::identity(common::variable_names()).unwrap();
    let none = expected_coefficients(&identity, &truth, &["var1", "var2"]).unwrap();
    assert_eq!(none, vec![2.0, 4.0]);
}
