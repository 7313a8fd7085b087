//! Synthetic linear datasets for exercising a fit.

use ndarray::{Array1, Array2};
use rand::{distributions::uniform::SampleUniform, thread_rng, Rng};
use rand_distr::{Distribution, Uniform};

use crate::Scalar;

/// A noiseless linear problem together with the coefficients that produced it.
#[derive(Debug, Clone)]
pub struct Synthetic<F> {
    /// `n x 3`, columns are `[1, x1, x2]`.
    pub x: Array2<F>,
    pub y: Array1<F>,
    /// `[1, a1, a2]`, matching the columns of `x`.
    pub coef: Array1<F>,
}

/// Draws slopes `a1, a2` from `U[0, 1)` and for sample `i` sets `x1 = i` and
/// `x2 = floor(i / 2) + U[0, 1) * n`, with `y = a1 * x1 + a2 * x2 + 1`.
pub fn generate<F>(n: usize, rng: &mut (impl Rng + ?Sized)) -> Synthetic<F>
where
    F: Scalar + SampleUniform,
{
    let unit = Uniform::new(F::zero(), F::one());
    let a1 = unit.sample(rng);
    let a2 = unit.sample(rng);
    let len = F::from_usize(n).unwrap_or_else(F::nan);

    let mut x = Array2::zeros((n, 3));
    let mut y = Array1::zeros(n);
    for (i, (mut row, target)) in x.rows_mut().into_iter().zip(&mut y).enumerate() {
        let x1 = F::from_usize(i).unwrap_or_else(F::nan);
        let x2 = F::from_usize(i / 2).unwrap_or_else(F::nan) + unit.sample(rng) * len;
        row[0] = F::one();
        row[1] = x1;
        row[2] = x2;
        *target = a1 * x1 + a2 * x2 + F::one();
    }

    Synthetic {
        x,
        y,
        coef: Array1::from_vec(vec![F::one(), a1, a2]),
    }
}

/// [`generate`] from the thread-local generator.
pub fn generate_dataset<F>(n: usize) -> Synthetic<F>
where
    F: Scalar + SampleUniform,
{
    generate(n, &mut thread_rng())
}
