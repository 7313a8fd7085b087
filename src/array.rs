use ndarray::{Data, Ix1, Ix2};

use crate::{Arr, OwnedArr, Scalar};

/// `NxD` dot `D` minus `N` -> `N`
/// The residual of every sample, `x @ coef - y`.
pub fn residuals<F: Scalar>(
    coef: &Arr<impl Data<Elem = F>, Ix1>,
    x: &Arr<impl Data<Elem = F>, Ix2>,
    y: &Arr<impl Data<Elem = F>, Ix1>,
) -> OwnedArr<F, Ix1> {
    let mut r = x.dot(coef);
    r.zip_mut_with(y, |r, &y| *r -= y);
    r
}

/// `NxD` dot `N` -> `D`
/// Performs `lhs.T @ rhs`, then averages over the `N` samples.
/// With no samples the result is all zeros.
pub fn mean_front<F: Scalar>(
    lhs: &Arr<impl Data<Elem = F>, Ix2>,
    rhs: &Arr<impl Data<Elem = F>, Ix1>,
) -> OwnedArr<F, Ix1> {
    let n = lhs.nrows();
    let sum = lhs.t().dot(rhs);
    match F::from_usize(n) {
        Some(n) if n > F::zero() => sum / n,
        _ => sum,
    }
}
