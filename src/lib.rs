use ndarray::{ArrayBase, NdFloat, OwnedRepr};
use num_traits::FromPrimitive;

pub(crate) mod array;
pub mod config;
pub mod cost;
pub mod dataset;
pub mod error;
pub mod optimise;
pub mod regression;

pub use config::AdamConfig;
pub use cost::mse::{gradients, mse};
pub use error::{DataShapeError, FitError};
pub use regression::{
    multilinear_regression, multilinear_regression_with, validate_shapes, Fit, Regression,
};

pub trait Scalar: NdFloat + FromPrimitive {}
impl<S> Scalar for S where S: NdFloat + FromPrimitive {}

pub type Arr<S, D> = ArrayBase<S, D>;
pub type OwnedArr<F, D> = ArrayBase<OwnedRepr<F>, D>;

/// Lifts an `f64` literal into the working precision.
pub(crate) fn lit<F: Scalar>(value: f64) -> F {
    F::from_f64(value).unwrap_or_else(F::nan)
}
