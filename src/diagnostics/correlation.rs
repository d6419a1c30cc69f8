//! Sample (Pearson) correlation of dataset columns.

use crate::core::{Dataset, DatasetError};
use crate::simulation::CorrelationMatrix;
use faer::Mat;

/// Pearson correlation between every pair of columns of `x`.
///
/// Constant columns have undefined correlation and produce NaN off the
/// diagonal; the diagonal is exactly 1.
pub fn correlation_matrix(x: &Mat<f64>) -> Mat<f64> {
    let n = x.nrows();
    let p = x.ncols();

    let means: Vec<f64> = (0..p)
        .map(|j| (0..n).map(|i| x[(i, j)]).sum::<f64>() / n as f64)
        .collect();

    let mut cross = Mat::zeros(p, p);
    for a in 0..p {
        for b in 0..=a {
            let s: f64 = (0..n)
                .map(|i| (x[(i, a)] - means[a]) * (x[(i, b)] - means[b]))
                .sum();
            cross[(a, b)] = s;
            cross[(b, a)] = s;
        }
    }

    Mat::from_fn(p, p, |a, b| {
        if a == b {
            1.0
        } else {
            let denom = (cross[(a, a)] * cross[(b, b)]).sqrt();
            if denom > 0.0 {
                (cross[(a, b)] / denom).clamp(-1.0, 1.0)
            } else {
                f64::NAN
            }
        }
    })
}

/// Empirical correlation of named dataset columns, labelled like the input.
pub fn empirical_correlation<S: AsRef<str>>(
    data: &Dataset,
    columns: &[S],
) -> Result<CorrelationMatrix, DatasetError> {
    let x = data.select(columns)?;
    let names = columns.iter().map(|c| c.as_ref().to_string()).collect();
    Ok(CorrelationMatrix::from_parts_unchecked(
        names,
        correlation_matrix(&x),
    ))
}
