use crate::{lit, Scalar};

/// Configuration for [`Regression`](crate::Regression).
///
/// `tolerance` and `epsilon` share a default of `1e-8` but are independent:
/// the first bounds the change in loss between iterations that counts as
/// converged, the second keeps the step denominator away from zero.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AdamConfig<F> {
    /// Learning rate.
    pub learning_rate: F,
    /// Decay rate of the first moment.
    pub beta1: F,
    /// Decay rate of the second moment.
    pub beta2: F,
    /// Floor added to `sqrt(v_hat)`.
    pub epsilon: F,
    /// Convergence threshold on `|loss - prev_loss|`.
    pub tolerance: F,
    /// Upper bound on optimizer updates. `None` iterates until converged.
    pub max_iterations: Option<usize>,
}

impl<F: Scalar> AdamConfig<F> {
    pub fn new(learning_rate: F) -> Self {
        Self {
            learning_rate,
            beta1: lit(0.9),
            beta2: lit(0.999),
            epsilon: lit(1e-8),
            tolerance: lit(1e-8),
            max_iterations: None,
        }
    }

    pub fn beta1(mut self, beta1: F) -> Self {
        self.beta1 = beta1;
        self
    }

    pub fn beta2(mut self, beta2: F) -> Self {
        self.beta2 = beta2;
        self
    }

    pub fn epsilon(mut self, epsilon: F) -> Self {
        self.epsilon = epsilon;
        self
    }

    pub fn tolerance(mut self, tolerance: F) -> Self {
        self.tolerance = tolerance;
        self
    }

    pub fn max_iterations(mut self, max_iterations: usize) -> Self {
        self.max_iterations = Some(max_iterations);
        self
    }
}
