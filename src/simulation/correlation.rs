//! Labelled correlation matrices built from lower-triangular listings.

use super::error::CorrelationError;
use crate::core::validate_names;
use faer::{Mat, Side};
use log::debug;

/// Eigenvalues down to this (negative) value are treated as zero.
const PSD_TOLERANCE: f64 = 1e-10;

/// Diagonal entries must equal 1 within this tolerance.
const DIAGONAL_TOLERANCE: f64 = 1e-12;

/// A symmetric, unit-diagonal matrix of correlations over named variables.
#[derive(Debug, Clone)]
pub struct CorrelationMatrix {
    names: Vec<String>,
    values: Mat<f64>,
}

impl CorrelationMatrix {
    /// Expand a row-major lower triangle (diagonal included) into a full matrix.
    ///
    /// For `k` names the slice must hold `k(k+1)/2` values, e.g. for three
    /// variables `[1, r21, 1, r31, r32, 1]`.
    pub fn from_lower_triangle(
        names: Vec<String>,
        lower: &[f64],
    ) -> Result<Self, CorrelationError> {
        let dim = names.len();
        if dim == 0 {
            return Err(CorrelationError::Empty);
        }
        validate_names(&names)?;

        let expected = dim * (dim + 1) / 2;
        if lower.len() != expected {
            return Err(CorrelationError::LengthMismatch {
                dim,
                expected,
                got: lower.len(),
            });
        }

        let mut values = Mat::zeros(dim, dim);
        let mut k = 0;
        for i in 0..dim {
            for j in 0..=i {
                values[(i, j)] = lower[k];
                values[(j, i)] = lower[k];
                k += 1;
            }
        }

        Self::checked(names, values)
    }

    /// The k×k identity: independent regressors.
    pub fn identity(names: Vec<String>) -> Result<Self, CorrelationError> {
        if names.is_empty() {
            return Err(CorrelationError::Empty);
        }
        validate_names(&names)?;
        let dim = names.len();
        let values = Mat::from_fn(dim, dim, |i, j| if i == j { 1.0 } else { 0.0 });
        Ok(Self { names, values })
    }

    /// Skip validation; used for empirical correlations computed in-crate.
    pub(crate) fn from_parts_unchecked(names: Vec<String>, values: Mat<f64>) -> Self {
        Self { names, values }
    }

    fn checked(names: Vec<String>, values: Mat<f64>) -> Result<Self, CorrelationError> {
        let dim = names.len();
        for i in 0..dim {
            let d = values[(i, i)];
            if !((d - 1.0).abs() <= DIAGONAL_TOLERANCE) {
                return Err(CorrelationError::NonUnitDiagonal { index: i, value: d });
            }
            for j in 0..i {
                let r = values[(i, j)];
                if !(-1.0..=1.0).contains(&r) {
                    return Err(CorrelationError::OutOfRange {
                        row: i,
                        col: j,
                        value: r,
                    });
                }
            }
        }
        Ok(Self { names, values })
    }

    pub fn dim(&self) -> usize {
        self.names.len()
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn as_mat(&self) -> &Mat<f64> {
        &self.values
    }

    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.names.iter().position(|n| n == name)
    }

    /// Entry (i, j).
    pub fn get(&self, i: usize, j: usize) -> f64 {
        self.values[(i, j)]
    }

    /// Correlation between two named variables.
    pub fn between(&self, a: &str, b: &str) -> Option<f64> {
        Some(self.values[(self.index_of(a)?, self.index_of(b)?)])
    }

    /// Smallest eigenvalue of the matrix.
    pub fn min_eigenvalue(&self) -> Result<f64, CorrelationError> {
        let eig = self
            .values
            .as_ref()
            .self_adjoint_eigen(Side::Lower)
            .map_err(|err| CorrelationError::Decomposition(format!("{err:?}")))?;
        let s = eig.S().column_vector();
        Ok((0..self.dim()).map(|i| s[i]).fold(f64::INFINITY, f64::min))
    }

    pub fn is_positive_semidefinite(&self) -> bool {
        self.min_eigenvalue()
            .map(|min| min >= -PSD_TOLERANCE)
            .unwrap_or(false)
    }

    /// A matrix `L` with `L·Lᵀ = Σ`.
    ///
    /// Uses the Cholesky factor when Σ is positive definite and falls back to
    /// `U·diag(√λ)` from the eigendecomposition when Σ is only semi-definite.
    pub fn factor(&self) -> Result<Mat<f64>, CorrelationError> {
        let dim = self.dim();
        match self.values.as_ref().llt(Side::Lower) {
            Ok(llt) => {
                let l = llt.L();
                Ok(Mat::from_fn(dim, dim, |i, j| if i >= j { l[(i, j)] } else { 0.0 }))
            }
            Err(err) => {
                debug!("cholesky failed ({err:?}); trying eigendecomposition");
                self.eigen_factor()
            }
        }
    }

    fn eigen_factor(&self) -> Result<Mat<f64>, CorrelationError> {
        let dim = self.dim();
        let eig = self
            .values
            .as_ref()
            .self_adjoint_eigen(Side::Lower)
            .map_err(|err| CorrelationError::Decomposition(format!("{err:?}")))?;
        let s = eig.S().column_vector();
        let u = eig.U();

        let min_eigenvalue = (0..dim).map(|i| s[i]).fold(f64::INFINITY, f64::min);
        if min_eigenvalue < -PSD_TOLERANCE {
            return Err(CorrelationError::NotPositiveSemiDefinite { min_eigenvalue });
        }

        Ok(Mat::from_fn(dim, dim, |i, j| u[(i, j)] * s[j].max(0.0).sqrt()))
    }
}
