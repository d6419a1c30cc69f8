//! Named-column data table backing the simulation and the model fits.

use faer::{Col, Mat};
use thiserror::Error;

/// Errors raised when building or querying a [`Dataset`].
#[derive(Debug, Error, PartialEq)]
pub enum DatasetError {
    #[error("unknown column '{0}'")]
    UnknownColumn(String),

    #[error("duplicate column name '{0}'")]
    DuplicateColumn(String),

    #[error("column names must not be empty")]
    EmptyColumnName,

    #[error("{names} column names supplied for a matrix with {columns} columns")]
    NameCountMismatch { names: usize, columns: usize },

    #[error("column '{name}' has {got} values but the dataset has {expected} rows")]
    LengthMismatch {
        name: String,
        expected: usize,
        got: usize,
    },
}

/// A table of `n_rows × n_cols` numeric values with one name per column.
///
/// Values are stored column-major in a [`faer::Mat`], so selecting a subset
/// of columns for a design matrix is a straight copy.
#[derive(Debug, Clone)]
pub struct Dataset {
    names: Vec<String>,
    data: Mat<f64>,
}

impl Dataset {
    /// Wrap a matrix, labelling its columns in order.
    pub fn new(names: Vec<String>, data: Mat<f64>) -> Result<Self, DatasetError> {
        if names.len() != data.ncols() {
            return Err(DatasetError::NameCountMismatch {
                names: names.len(),
                columns: data.ncols(),
            });
        }
        validate_names(&names)?;
        Ok(Self { names, data })
    }

    /// Number of observations.
    pub fn n_rows(&self) -> usize {
        self.data.nrows()
    }

    /// Number of named columns.
    pub fn n_cols(&self) -> usize {
        self.data.ncols()
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    /// The underlying column-major matrix.
    pub fn matrix(&self) -> &Mat<f64> {
        &self.data
    }

    /// Position of a column, if present.
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.names.iter().position(|n| n == name)
    }

    /// Copy one column out by name.
    pub fn column(&self, name: &str) -> Result<Col<f64>, DatasetError> {
        let j = self
            .column_index(name)
            .ok_or_else(|| DatasetError::UnknownColumn(name.to_string()))?;
        Ok(Col::from_fn(self.n_rows(), |i| self.data[(i, j)]))
    }

    /// Build a design matrix from the named columns, in the order given.
    pub fn select<S: AsRef<str>>(&self, names: &[S]) -> Result<Mat<f64>, DatasetError> {
        let indices = names
            .iter()
            .map(|name| {
                let name = name.as_ref();
                self.column_index(name)
                    .ok_or_else(|| DatasetError::UnknownColumn(name.to_string()))
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Mat::from_fn(self.n_rows(), indices.len(), |i, j| {
            self.data[(i, indices[j])]
        }))
    }

    /// Return a new dataset with `values` appended as column `name`.
    pub fn with_column(
        &self,
        name: impl Into<String>,
        values: &Col<f64>,
    ) -> Result<Self, DatasetError> {
        let name = name.into();
        if name.is_empty() {
            return Err(DatasetError::EmptyColumnName);
        }
        if self.column_index(&name).is_some() {
            return Err(DatasetError::DuplicateColumn(name));
        }
        if values.nrows() != self.n_rows() {
            return Err(DatasetError::LengthMismatch {
                name,
                expected: self.n_rows(),
                got: values.nrows(),
            });
        }

        let n_cols = self.n_cols();
        let data = Mat::from_fn(self.n_rows(), n_cols + 1, |i, j| {
            if j < n_cols {
                self.data[(i, j)]
            } else {
                values[i]
            }
        });

        let mut names = self.names.clone();
        names.push(name);
        Ok(Self { names, data })
    }
}

/// Reject empty or repeated names.
pub(crate) fn validate_names(names: &[String]) -> Result<(), DatasetError> {
    for (idx, name) in names.iter().enumerate() {
        if name.is_empty() {
            return Err(DatasetError::EmptyColumnName);
        }
        if names[..idx].contains(name) {
            return Err(DatasetError::DuplicateColumn(name.clone()));
        }
    }
    Ok(())
}
