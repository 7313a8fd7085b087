use ndarray::{Array1, Data, Ix1, Zip};

use crate::{AdamConfig, Arr, OwnedArr, Scalar};

use super::Optimiser;

#[derive(Debug, Clone)]
pub struct Adam<F> {
    alpha: F,
    beta1: F,
    beta2: F,
    epsilon: F,
    m: Array1<F>,
    v: Array1<F>,
    m_hat: Array1<F>,
    v_hat: Array1<F>,
    t: usize,
}

impl<F> Adam<F> {
    pub fn new(alpha: F, beta1: F, beta2: F, epsilon: F) -> Self {
        Self {
            alpha,
            beta1,
            beta2,
            epsilon,
            m: Array1::from_vec(vec![]),
            v: Array1::from_vec(vec![]),
            m_hat: Array1::from_vec(vec![]),
            v_hat: Array1::from_vec(vec![]),
            t: 0,
        }
    }

    /// Bias-corrected first moment from the last step.
    pub fn m_hat(&self) -> &Array1<F> {
        &self.m_hat
    }

    /// Bias-corrected second moment from the last step.
    pub fn v_hat(&self) -> &Array1<F> {
        &self.v_hat
    }
}

impl<F: Scalar> From<&AdamConfig<F>> for Adam<F> {
    fn from(config: &AdamConfig<F>) -> Self {
        Self::new(
            config.learning_rate,
            config.beta1,
            config.beta2,
            config.epsilon,
        )
    }
}

impl<F: Scalar> Optimiser<F> for Adam<F> {
    fn init(&mut self, size: usize) {
        self.m = Array1::zeros(size);
        self.v = Array1::zeros(size);
        self.m_hat = Array1::zeros(size);
        self.v_hat = Array1::zeros(size);
        self.t = 0;
    }

    fn optimise(
        &mut self,
        coef: &Arr<impl Data<Elem = F>, Ix1>,
        grads: &Arr<impl Data<Elem = F>, Ix1>,
    ) -> OwnedArr<F, Ix1> {
        // Adam from https://arxiv.org/pdf/1412.6980v9.pdf, except the step blends the
        // corrected first moment with a freshly corrected raw gradient.
        debug_assert_eq!(
            self.m.len(),
            grads.len(),
            "optimiser should be initialised with the coefficient count"
        );

        self.t += 1;
        let t = i32::try_from(self.t).unwrap_or(i32::MAX);

        let b1 = self.beta1;
        let b2 = self.beta2;
        let e = self.epsilon;
        let a = self.alpha;

        let one = F::one();
        let c1 = one - b1.powi(t);
        let c2 = one - b2.powi(t);

        // m_t = b1 * m_t-1 + (1 - b1) * g_t
        self.m.zip_mut_with(grads, |m, &g| {
            *m = *m * b1 + g * (one - b1);
        });

        // v_t = b2 * v_t-1 + (1 - b2) * g_t^2
        self.v.zip_mut_with(grads, |v, &g| {
            *v = *v * b2 + g.powi(2) * (one - b2);
        });

        // m_t' = m_t / (1 - b1^t)
        self.m_hat = self.m.mapv(|m| m / c1);

        // v_t' = v_t / (1 - b2^t)
        self.v_hat = self.v.mapv(|v| v / c2);

        // x_t = x_t-1 - a / (sqrt(v_t') + e) * (b1 * m_t' + (1 - b1) * g_t / (1 - b1^t))
        let mut next = coef.to_owned();
        Zip::from(&mut next)
            .and(&self.m_hat)
            .and(&self.v_hat)
            .and(grads)
            .for_each(|x, &m, &v, &g| {
                *x = *x - a / (v.sqrt() + e) * (b1 * m + (one - b1) * g / c1);
            });
        next
    }

    fn steps(&self) -> usize {
        self.t
    }
}
