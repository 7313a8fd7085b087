use ndarray::Array1;
use thiserror::Error;

use crate::Scalar;

/// The design matrix, targets and coefficients disagree on their dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum DataShapeError {
    #[error("data shape must be consistent: x has {x_rows} rows but y has {y_len} values")]
    Samples { x_rows: usize, y_len: usize },

    #[error("data shape must be consistent: x has {x_cols} columns but coef has {coef_len} values")]
    Features { x_cols: usize, coef_len: usize },
}

/// Errors that can occur while fitting.
#[derive(Debug, Error)]
pub enum FitError<F: Scalar> {
    #[error(transparent)]
    Shape(#[from] DataShapeError),

    /// Only raised when [`AdamConfig::max_iterations`](crate::AdamConfig) is set.
    #[error("did not converge within {iterations} iterations (last loss {loss})")]
    NotConverged {
        iterations: usize,
        loss: F,
        coef: Array1<F>,
    },
}
