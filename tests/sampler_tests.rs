//! Multivariate normal sampler and correlation builder tests.

mod common;

use faer::Mat;
use ovb_sim::diagnostics::empirical_correlation;
use ovb_sim::simulation::{
    CorrelationError, CorrelationMatrix, MultivariateNormalSampler, SimulationError,
};
use rand::rngs::StdRng;
use rand::SeedableRng;

#[test]
fn test_empirical_correlation_converges_to_target() {
    let target = common::correlated_matrix();
    let sampler = MultivariateNormalSampler::new(&target).unwrap();
    let mut rng = StdRng::seed_from_u64(2024);

    let data = sampler.sample(20_000, &mut rng).unwrap();
    let names = common::variable_names();
    let sample = empirical_correlation(&data, &names).unwrap();

    for i in 0..4 {
        for j in 0..4 {
            let diff = (sample.get(i, j) - target.get(i, j)).abs();
            assert!(
                diff < 0.03,
                "corr({}, {}) = {:.4}, target {:.4}",
                names[i],
                names[j],
                sample.get(i, j),
                target.get(i, j)
            );
        }
    }
}

#[test]
fn test_marginals_are_standard_normal() {
    let sampler = MultivariateNormalSampler::new(&common::correlated_matrix()).unwrap();
    let mut rng = StdRng::seed_from_u64(77);

    let data = sampler.sample(20_000, &mut rng).unwrap();
    for (j, (mean, var)) in common::column_moments(data.matrix()).into_iter().enumerate() {
        assert!(mean.abs() < 0.05, "mean of column {j} = {mean}");
        assert!((var - 1.0).abs() < 0.05, "variance of column {j} = {var}");
    }
}

#[test]
fn test_identical_seeds_give_identical_samples() {
    let sampler = MultivariateNormalSampler::new(&common::correlated_matrix()).unwrap();

    let a = sampler.sample(500, &mut StdRng::seed_from_u64(1234)).unwrap();
    let b = sampler.sample(500, &mut StdRng::seed_from_u64(1234)).unwrap();
    let c = sampler.sample(500, &mut StdRng::seed_from_u64(1235)).unwrap();

    let mut differs = false;
    for i in 0..500 {
        for j in 0..4 {
            assert_eq!(a.matrix()[(i, j)].to_bits(), b.matrix()[(i, j)].to_bits());
            differs |= a.matrix()[(i, j)] != c.matrix()[(i, j)];
        }
    }
    assert!(differs);
}

#[test]
fn test_semidefinite_matrix_is_sampled() {
    // var2 is a copy of var1: singular but positive semi-definite
    let names = vec!["var1".to_string(), "var2".to_string(), "var3".to_string()];
    let corr =
        CorrelationMatrix::from_lower_triangle(names, &[1.0, 1.0, 1.0, 0.3, 0.3, 1.0]).unwrap();
    assert!(corr.is_positive_semidefinite());

    let sampler = MultivariateNormalSampler::new(&corr).unwrap();
    let data = sampler.sample(200, &mut StdRng::seed_from_u64(5)).unwrap();

    for i in 0..200 {
        let m = data.matrix();
        assert!((m[(i, 0)] - m[(i, 1)]).abs() < 1e-6);
    }
}

#[test]
fn test_indefinite_matrix_is_rejected() {
    let names = vec!["a".to_string(), "b".to_string(), "c".to_string()];
    let corr =
        CorrelationMatrix::from_lower_triangle(names, &[1.0, 0.9, 1.0, 0.9, -0.9, 1.0]).unwrap();

    assert!(!corr.is_positive_semidefinite());
    assert!(matches!(
        MultivariateNormalSampler::new(&corr),
        Err(SimulationError::Correlation(
            CorrelationError::NotPositiveSemiDefinite { .. }
        ))
    ));
}

#[test]
fn test_builder_rejects_bad_input() {
    let names = common::variable_names();

    assert!(matches!(
        CorrelationMatrix::from_lower_triangle(names.clone(), &[1.0, 0.8, 1.0]),
        Err(CorrelationError::LengthMismatch {
            dim: 4,
            expected: 10,
            got: 3
        })
    ));

    let mut lower = common::CORRELATED_LOWER;
    lower[2] = 0.9;
    assert!(matches!(
        CorrelationMatrix::from_lower_triangle(names.clone(), &lower),
        Err(CorrelationError::NonUnitDiagonal { index: 1, .. })
    ));

    let mut lower = common::CORRELATED_LOWER;
    lower[1] = 1.2;
    assert!(matches!(
        CorrelationMatrix::from_lower_triangle(names, &lower),
        Err(CorrelationError::OutOfRange { row: 1, col: 0, .. })
    ));

    let duplicate = vec!["x".to_string(), "x".to_string()];
    assert!(CorrelationMatrix::from_lower_triangle(duplicate, &[1.0, 0.0, 1.0]).is_err());
}

#[test]
fn test_expanded_matrix_is_symmetric() {
    let corr = common::correlated_matrix();
    let m: &Mat<f64> = corr.as_mat();

    for i in 0..4 {
        assert_eq!(m[(i, i)], 1.0);
        for j in 0..4 {
            assert_eq!(m[(i, j)], m[(j, i)]);
        }
    }
    assert_eq!(corr.between("var3", "var4"), Some(0.8));
    assert_eq!(corr.between("var2", "var3"), Some(0.2));
}

#[test]
fn test_zero_samples_is_an_error() {
    let sampler = MultivariateNormalSampler::new(&common::correlated_matrix()).unwrap();
    assert!(matches!(
        sampler.sample(0, &mut StdRng::seed_from_u64(1)),
        Err(SimulationError::EmptySample)
    ));
}
