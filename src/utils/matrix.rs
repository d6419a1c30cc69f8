//! Matrix utility functions.

use faer::{Col, Mat};

/// Detect columns that are constant (zero variance).
pub fn detect_constant_columns(x: &Mat<f64>, tolerance: f64) -> Vec<bool> {
    let n_rows = x.nrows();

    if n_rows == 0 {
        return vec![true; x.ncols()];
    }

    (0..x.ncols())
        .map(|j| {
            let first = x[(0, j)];
            (1..n_rows).all(|i| (x[(i, j)] - first).abs() < tolerance)
        })
        .collect()
}

/// Center a matrix by subtracting column means.
pub fn center_columns(x: &Mat<f64>) -> (Mat<f64>, Col<f64>) {
    let n_rows = x.nrows();
    let means = Col::from_fn(x.ncols(), |j| {
        (0..n_rows).map(|i| x[(i, j)]).sum::<f64>() / n_rows as f64
    });
    let centered = Mat::from_fn(n_rows, x.ncols(), |i, j| x[(i, j)] - means[j]);

    (centered, means)
}

/// Center a vector by subtracting the mean.
pub fn center_vector(y: &Col<f64>) -> (Col<f64>, f64) {
    let n = y.nrows();
    let mean: f64 = y.iter().sum::<f64>() / n as f64;

    let centered = Col::from_fn(n, |i| y[i] - mean);

    (centered, mean)
}

/// Flag columns that are linearly dependent on the columns before them.
///
/// Runs modified Gram-Schmidt in column order; column `j` is aliased when the
/// norm of its residual, after projecting out the accepted earlier columns,
/// is at most `tolerance` times its own norm. Zero columns are always aliased.
/// Earlier columns win, so `[x, 2x]` aliases the second column.
pub fn detect_aliased_columns(x: &Mat<f64>, tolerance: f64) -> Vec<bool> {
    let n_rows = x.nrows();
    let mut basis: Vec<Col<f64>> = Vec::with_capacity(x.ncols());
    let mut aliased = vec![false; x.ncols()];

    for j in 0..x.ncols() {
        let mut v = Col::from_fn(n_rows, |i| x[(i, j)]);
        let original_norm = norm_l2(&v);

        for q in &basis {
            let proj: f64 = q.iter().zip(v.iter()).map(|(&a, &b)| a * b).sum();
            for i in 0..n_rows {
                v[i] -= proj * q[i];
            }
        }

        let residual_norm = norm_l2(&v);
        if original_norm == 0.0 || residual_norm <= tolerance * original_norm {
            aliased[j] = true;
        } else {
            basis.push(Col::from_fn(n_rows, |i| v[i] / residual_norm));
        }
    }

    aliased
}

fn norm_l2(v: &Col<f64>) -> f64 {
    v.iter().map(|&a| a * a).sum::<f64>().sqrt()
}

/// Copy the columns flagged `true` in `keep` into a new matrix.
pub fn select_columns(x: &Mat<f64>, keep: &[bool]) -> Mat<f64> {
    let indices: Vec<usize> = keep
        .iter()
        .enumerate()
        .filter(|(_, &k)| k)
        .map(|(j, _)| j)
        .collect();
    Mat::from_fn(x.nrows(), indices.len(), |i, j| x[(i, indices[j])])
}

/// Invert a small square matrix through its QR decomposition.
///
/// Solves `R · A⁻¹ = Qᵀ` column by column with back-substitution. Returns
/// `None` when a diagonal entry of `R` falls below `1e-10` in magnitude.
pub fn invert_via_qr(a: &Mat<f64>) -> Option<Mat<f64>> {
    let size = a.nrows();
    debug_assert_eq!(size, a.ncols());

    let qr = a.qr();
    let q = qr.compute_Q();
    let r = qr.R();

    if (0..size).any(|i| r[(i, i)].abs() < 1e-10) {
        return None;
    }

    let qt = q.transpose();
    let mut inverse = Mat::zeros(size, size);
    for col in 0..size {
        for i in (0..size).rev() {
            let mut sum = qt[(i, col)];
            for j in (i + 1)..size {
                sum -= r[(i, j)] * inverse[(j, col)];
            }
            inverse[(i, col)] = sum / r[(i, i)];
        }
    }

    Some(inverse)
}
