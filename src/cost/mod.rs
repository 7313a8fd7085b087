use ndarray::{Data, Ix1, Ix2};

use crate::{Arr, OwnedArr, Scalar};

pub mod mse;

/// A cost over the coefficients of a linear model `x @ coef ≈ y`.
pub trait Cost {
    fn cost<F: Scalar>(
        &self,
        coef: &Arr<impl Data<Elem = F>, Ix1>,
        x: &Arr<impl Data<Elem = F>, Ix2>,
        y: &Arr<impl Data<Elem = F>, Ix1>,
    ) -> F;

    /// Gradient of [`Cost::cost`] with respect to `coef`.
    fn gradient<F: Scalar>(
        &self,
        coef: &Arr<impl Data<Elem = F>, Ix1>,
        x: &Arr<impl Data<Elem = F>, Ix2>,
        y: &Arr<impl Data<Elem = F>, Ix1>,
    ) -> OwnedArr<F, Ix1>;
}
