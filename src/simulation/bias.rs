//! Omitted-variable bias predicted from the population correlation structure.
//!
//! With standardized regressors, regressing Y on a subset S while the set O
//! is left out converges to
//!
//! ```text
//! plim β̂_S = β_S + Σ_SS⁻¹ · Σ_SO · β_O
//! ```
//!
//! The second term is the bias. It vanishes when the omitted regressors are
//! uncorrelated with the included ones (Σ_SO = 0) or have no effect (β_O = 0).

use super::correlation::CorrelationMatrix;
use super::error::SimulationError;
use super::outcome::OutcomeModel;
use crate::utils::invert_via_qr;
use faer::{Col, Mat};

/// Probability limit of the OLS coefficients for `included`, in the given order.
pub fn expected_coefficients<S: AsRef<str>>(
    correlation: &CorrelationMatrix,
    truth: &OutcomeModel,
    included: &[S],
) -> Result<Vec<f64>, SimulationError> {
    for (name, _) in truth.coefficients() {
        if correlation.index_of(name).is_none() {
            return Err(SimulationError::UnknownVariable(name.clone()));
        }
    }

    let s_idx = included
        .iter()
        .map(|name| {
            let name = name.as_ref();
            correlation
                .index_of(name)
                .ok_or_else(|| SimulationError::UnknownVariable(name.to_string()))
        })
        .collect::<Result<Vec<_>, _>>()?;

    let o_idx: Vec<usize> = (0..correlation.dim())
        .filter(|j| !s_idx.contains(j))
        .collect();

    let names = correlation.names();
    let beta_s: Vec<f64> = s_idx
        .iter()
        .map(|&j| truth.true_coefficient(&names[j]))
        .collect();

    if s_idx.is_empty() || o_idx.is_empty() {
        return Ok(beta_s);
    }

    let sigma_ss = Mat::from_fn(s_idx.len(), s_idx.len(), |a, b| {
        correlation.get(s_idx[a], s_idx[b])
    });
    let sigma_so = Mat::from_fn(s_idx.len(), o_idx.len(), |a, b| {
        correlation.get(s_idx[a], o_idx[b])
    });
    let beta_o = Col::from_fn(o_idx.len(), |b| truth.true_coefficient(&names[o_idx[b]]));

    let sigma_ss_inv = invert_via_qr(&sigma_ss).ok_or_else(|| {
        SimulationError::SingularSubset(s_idx.iter().map(|&j| names[j].clone()).collect())
    })?;

    let omitted_effect = &sigma_so * &beta_o;
    let bias = &sigma_ss_inv * &omitted_effect;

    Ok(beta_s
        .iter()
        .enumerate()
        .map(|(a, &beta)| beta + bias[a])
        .collect())
}

/// Bias of a single included regressor: expected minus true coefficient.
pub fn omitted_variable_bias<S: AsRef<str>>(
    correlation: &CorrelationMatrix,
    truth: &OutcomeModel,
    included: &[S],
    target: &str,
) -> Result<f64, SimulationError> {
    let position = included
        .iter()
        .position(|name| name.as_ref() == target)
        .ok_or_else(|| SimulationError::UnknownVariable(target.to_string()))?;
    let expected = expected_coefficients(correlation, truth, included)?;
    Ok(expected[position] - truth.true_coefficient(target))
}
