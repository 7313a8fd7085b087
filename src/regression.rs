use ndarray::{Array1, Data, Ix1, Ix2};
use tracing::{debug, info_span, trace, warn};

use crate::{
    cost::{mse::MSE, Cost},
    optimise::{adam::Adam, Optimiser},
    AdamConfig, Arr, DataShapeError, FitError, Scalar,
};

/// Outcome of a converged fit.
#[derive(Debug, Clone, PartialEq)]
pub struct Fit<F> {
    pub coef: Array1<F>,
    /// Optimizer updates performed.
    pub iterations: usize,
    /// Loss at `coef`.
    pub loss: F,
    /// Loss at the top of every iteration, when recorded.
    pub history: Vec<F>,
}

/// Fits `x @ coef ≈ y` by minimising `cost` with `optimiser` until two
/// successive losses differ by no more than `tolerance`.
pub struct Regression<F: Scalar, O: Optimiser<F> = Adam<F>, C: Cost = MSE> {
    pub optimiser: O,
    pub cost: C,
    pub tolerance: F,
    pub max_iterations: Option<usize>,
    pub history: bool,
}

impl<F: Scalar> Regression<F> {
    pub fn new(config: AdamConfig<F>) -> Self {
        Self {
            optimiser: Adam::from(&config),
            cost: MSE,
            tolerance: config.tolerance,
            max_iterations: config.max_iterations,
            history: false,
        }
    }
}

impl<F: Scalar, O: Optimiser<F>, C: Cost> Regression<F, O, C> {
    /// Record the loss of every iteration in [`Fit::history`].
    pub fn with_history(mut self, history: bool) -> Self {
        self.history = history;
        self
    }

    pub fn fit(
        &mut self,
        coef: Array1<F>,
        x: &Arr<impl Data<Elem = F>, Ix2>,
        y: &Arr<impl Data<Elem = F>, Ix1>,
    ) -> Result<Fit<F>, FitError<F>> {
        validate_shapes(&coef, x, y)?;

        let span = info_span!("fit", samples = x.nrows(), features = x.ncols());
        let _enter = span.enter();
        debug!(
            tolerance = %self.tolerance,
            max_iterations = ?self.max_iterations,
            "starting fit"
        );

        self.optimiser.init(coef.len());

        let mut coef = coef;
        let mut prev_loss = F::zero();
        let mut history = vec![];

        loop {
            let loss = self.cost.cost(&coef, x, y);
            let iterations = self.optimiser.steps();
            trace!(iteration = iterations, loss = %loss);
            if self.history {
                history.push(loss);
            }

            if (loss - prev_loss).abs() <= self.tolerance {
                debug!(iterations, loss = %loss, "converged");
                return Ok(Fit {
                    coef,
                    iterations,
                    loss,
                    history,
                });
            }

            if self.max_iterations.is_some_and(|max| iterations >= max) {
                warn!(iterations, loss = %loss, "iteration limit reached before convergence");
                return Err(FitError::NotConverged {
                    iterations,
                    loss,
                    coef,
                });
            }

            prev_loss = loss;
            let grads = self.cost.gradient(&coef, x, y);
            coef = self.optimiser.optimise(&coef, &grads);
        }
    }
}

/// Checks that `x` has one row per target and one column per coefficient.
pub fn validate_shapes<F>(
    coef: &Arr<impl Data<Elem = F>, Ix1>,
    x: &Arr<impl Data<Elem = F>, Ix2>,
    y: &Arr<impl Data<Elem = F>, Ix1>,
) -> Result<(), DataShapeError> {
    let (x_rows, x_cols) = x.dim();
    if x_rows != y.len() {
        return Err(DataShapeError::Samples {
            x_rows,
            y_len: y.len(),
        });
    }
    if x_cols != coef.len() {
        return Err(DataShapeError::Features {
            x_cols,
            coef_len: coef.len(),
        });
    }
    Ok(())
}

/// Fits with the default Adam hyperparameters (`b1 = 0.9`, `b2 = 0.999`,
/// `epsilon = 1e-8`), iterating until converged.
pub fn multilinear_regression<F: Scalar>(
    coef: Array1<F>,
    x: &Arr<impl Data<Elem = F>, Ix2>,
    y: &Arr<impl Data<Elem = F>, Ix1>,
    lr: F,
) -> Result<Array1<F>, FitError<F>> {
    multilinear_regression_with(coef, x, y, AdamConfig::new(lr))
}

pub fn multilinear_regression_with<F: Scalar>(
    coef: Array1<F>,
    x: &Arr<impl Data<Elem = F>, Ix2>,
    y: &Arr<impl Data<Elem = F>, Ix1>,
    config: AdamConfig<F>,
) -> Result<Array1<F>, FitError<F>> {
    Regression::new(config)
        .fit(coef, x, y)
        .map(|fit| fit.coef)
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;

    use ndarray::{array, Array2};

    use super::*;
    use crate::{mse, OwnedArr};

    /// 5x5 grid over `[0, 1]^2` with an intercept column, `y = 2 * x1 + 3 * x2 + 1`.
    fn plane() -> (Array2<f64>, Array1<f64>) {
        let x = Array2::from_shape_fn((25, 3), |(r, c)| match c {
            0 => 1.0,
            1 => (r / 5) as f64 / 4.0,
            _ => (r % 5) as f64 / 4.0,
        });
        let y = x.dot(&array![1.0, 2.0, 3.0]);
        (x, y)
    }

    #[derive(Default)]
    struct Counting {
        costs: Cell<usize>,
        gradients: Cell<usize>,
    }

    impl Cost for Counting {
        fn cost<F: Scalar>(
            &self,
            coef: &Arr<impl Data<Elem = F>, Ix1>,
            x: &Arr<impl Data<Elem = F>, Ix2>,
            y: &Arr<impl Data<Elem = F>, Ix1>,
        ) -> F {
            self.costs.set(self.costs.get() + 1);
            MSE.cost(coef, x, y)
        }

        fn gradient<F: Scalar>(
            &self,
            coef: &Arr<impl Data<Elem = F>, Ix1>,
            x: &Arr<impl Data<Elem = F>, Ix2>,
            y: &Arr<impl Data<Elem = F>, Ix1>,
        ) -> OwnedArr<F, Ix1> {
            self.gradients.set(self.gradients.get() + 1);
            MSE.gradient(coef, x, y)
        }
    }

    fn counting(config: AdamConfig<f64>) -> Regression<f64, Adam<f64>, Counting> {
        Regression {
            optimiser: Adam::from(&config),
            cost: Counting::default(),
            tolerance: config.tolerance,
            max_iterations: config.max_iterations,
            history: false,
        }
    }

    #[test]
    fn sample_mismatch_fails_before_iterating() {
        let x = Array2::<f64>::zeros((10, 3));
        let y = Array1::<f64>::zeros(9);
        let coef = Array1::<f64>::zeros(3);

        let mut regression = counting(AdamConfig::new(0.1));
        let err = regression.fit(coef, &x, &y).unwrap_err();

        assert!(matches!(
            err,
            FitError::Shape(DataShapeError::Samples {
                x_rows: 10,
                y_len: 9
            })
        ));
        assert_eq!(regression.cost.costs.get(), 0);
        assert_eq!(regression.cost.gradients.get(), 0);
    }

    #[test]
    fn feature_mismatch() {
        let x = Array2::<f64>::zeros((10, 3));
        let y = Array1::<f64>::zeros(10);
        let coef = Array1::<f64>::zeros(2);

        let err = multilinear_regression(coef, &x, &y, 0.1).unwrap_err();
        assert!(matches!(
            err,
            FitError::Shape(DataShapeError::Features {
                x_cols: 3,
                coef_len: 2
            })
        ));
        assert_eq!(
            err.to_string(),
            "data shape must be consistent: x has 3 columns but coef has 2 values"
        );
    }

    #[test]
    fn converges_on_noiseless_plane() {
        let (x, y) = plane();

        let fit = Regression::new(AdamConfig::new(0.1))
            .fit(Array1::zeros(3), &x, &y)
            .unwrap();

        assert!(fit.iterations < 2000, "took {} iterations", fit.iterations);
        for (c, expected) in fit.coef.iter().zip([1.0, 2.0, 3.0]) {
            assert!((c - expected).abs() < 1e-2, "got {}", fit.coef);
        }
        assert!((fit.loss - mse(&fit.coef, &x, &y)).abs() < 1e-15);
    }

    #[test]
    fn loss_decreases_with_small_learning_rate() {
        let (x, y) = plane();

        let fit = Regression::new(AdamConfig::new(0.05))
            .with_history(true)
            .fit(Array1::zeros(3), &x, &y)
            .unwrap();

        assert_eq!(fit.history.len(), fit.iterations + 1);
        assert!(fit
            .history
            .windows(2)
            .skip(5)
            .all(|w| w[1] <= w[0]));
        assert!(fit.history.last() < fit.history.first());
    }

    #[test]
    fn already_minimal_returns_immediately() {
        let (x, y) = plane();
        let coef = array![1.0, 2.0, 3.0];

        let mut regression = counting(AdamConfig::new(0.1));
        let fit = regression.fit(coef.clone(), &x, &y).unwrap();

        assert_eq!(fit.iterations, 0);
        assert_eq!(fit.coef, coef);
        assert_eq!(regression.cost.gradients.get(), 0);
    }

    #[test]
    fn one_step_at_the_minimum_stays_put() {
        let (x, y) = plane();
        let coef = array![1.0, 2.0, 3.0];

        // a negative tolerance never converges, so exactly one step is taken
        let config = AdamConfig::new(0.1).tolerance(-1.0).max_iterations(1);
        let err = Regression::new(config).fit(coef.clone(), &x, &y).unwrap_err();

        match err {
            FitError::NotConverged {
                iterations,
                coef: stepped,
                ..
            } => {
                assert_eq!(iterations, 1);
                for (a, b) in stepped.iter().zip(&coef) {
                    assert!((a - b).abs() < 1e-6);
                }
            }
            err => panic!("expected NotConverged, got {err:?}"),
        }
    }

    #[test]
    fn iteration_limit() {
        let (x, y) = plane();

        let mut regression = counting(AdamConfig::new(0.1).max_iterations(10));
        let err = regression.fit(Array1::zeros(3), &x, &y).unwrap_err();

        match err {
            FitError::NotConverged {
                iterations,
                loss,
                coef,
            } => {
                assert_eq!(iterations, 10);
                assert_eq!(coef.len(), 3);
                assert!(loss > 0.0);
            }
            err => panic!("expected NotConverged, got {err:?}"),
        }
        assert_eq!(regression.cost.gradients.get(), 10);
        assert_eq!(regression.cost.costs.get(), 11);
    }

    #[test]
    fn no_state_carries_between_fits() {
        let (x, y) = plane();
        let mut regression = Regression::new(AdamConfig::new(0.1));

        let first = regression.fit(Array1::zeros(3), &x, &y).unwrap();
        let second = regression.fit(Array1::zeros(3), &x, &y).unwrap();

        assert_eq!(first, second);
    }

    #[test]
    fn fits_in_single_precision() {
        let (x, y) = plane();
        let x = x.mapv(|v| v as f32);
        let y = y.mapv(|v| v as f32);

        let config = AdamConfig::new(0.1f32).tolerance(1e-6).max_iterations(5000);
        // single precision may stall short of the tolerance, either way the
        // coefficients should be close
        let coef = match multilinear_regression_with(Array1::zeros(3), &x.view(), &y.view(), config)
        {
            Ok(coef) => coef,
            Err(FitError::NotConverged { coef, .. }) => coef,
            Err(err) => panic!("unexpected {err}"),
        };
        for (c, expected) in coef.iter().zip([1.0f32, 2.0, 3.0]) {
            assert!((c - expected).abs() < 5e-2, "got {coef}");
        }
    }
}
