use crate::{
    array::{mean_front, residuals},
    validate_shapes, Arr, OwnedArr, Scalar,
};

use super::Cost;
use ndarray::{Data, Ix1, Ix2};

#[derive(Debug, Default, Copy, Clone)]
/// Mean Squared Error cost function, halved so its gradient is the plain
/// sample mean of `x_row * residual`.
pub struct MSE;

impl Cost for MSE {
    fn cost<F: Scalar>(
        &self,
        coef: &Arr<impl Data<Elem = F>, Ix1>,
        x: &Arr<impl Data<Elem = F>, Ix2>,
        y: &Arr<impl Data<Elem = F>, Ix1>,
    ) -> F {
        let two = F::one() + F::one();
        residuals(coef, x, y)
            .mapv(|r| r * r)
            .mean()
            .map_or_else(F::zero, |m| m / two)
    }

    fn gradient<F: Scalar>(
        &self,
        coef: &Arr<impl Data<Elem = F>, Ix1>,
        x: &Arr<impl Data<Elem = F>, Ix2>,
        y: &Arr<impl Data<Elem = F>, Ix1>,
    ) -> OwnedArr<F, Ix1> {
        // d/dc mean((x @ c - y)^2) / 2 = x.T @ (x @ c - y) / n
        let r = residuals(coef, x, y);
        mean_front(x, &r)
    }
}

/// `mean((x @ coef - y)^2) / 2`
///
/// # Panics
///
/// If `x` does not have one row per target and one column per coefficient.
pub fn mse<F: Scalar>(
    coef: &Arr<impl Data<Elem = F>, Ix1>,
    x: &Arr<impl Data<Elem = F>, Ix2>,
    y: &Arr<impl Data<Elem = F>, Ix1>,
) -> F {
    if let Err(err) = validate_shapes(coef, x, y) {
        panic!("{err}");
    }
    MSE.cost(coef, x, y)
}

/// Gradient of [`mse`] with respect to `coef`, shape `(d,)`.
///
/// # Panics
///
/// Under the same shape mismatches as [`mse`].
pub fn gradients<F: Scalar>(
    coef: &Arr<impl Data<Elem = F>, Ix1>,
    x: &Arr<impl Data<Elem = F>, Ix2>,
    y: &Arr<impl Data<Elem = F>, Ix1>,
) -> OwnedArr<F, Ix1> {
    if let Err(err) = validate_shapes(coef, x, y) {
        panic!("{err}");
    }
    MSE.gradient(coef, x, y)
}
