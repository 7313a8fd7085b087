use ndarray::{Data, Ix1};

use crate::{Arr, OwnedArr, Scalar};

pub mod adam;

pub trait Optimiser<F: Scalar> {
    /// Resets all state for a fresh run over `size` coefficients.
    fn init(&mut self, size: usize);

    /// Takes one step from `coef` along `grads`, returning the new coefficients.
    fn optimise(
        &mut self,
        coef: &Arr<impl Data<Elem = F>, Ix1>,
        grads: &Arr<impl Data<Elem = F>, Ix1>,
    ) -> OwnedArr<F, Ix1>;

    /// Number of steps taken since the last [`Optimiser::init`].
    fn steps(&self) -> usize;
}
