use adam_mlr::{dataset::generate_dataset, AdamConfig, Regression};
use ndarray::Array1;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

fn main() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    // Noiseless synthetic problem with an intercept column
    let data = generate_dataset::<f64>(200);
    info!(coef = %data.coef, "generated dataset");

    let mut regression = Regression::new(AdamConfig::new(0.1));
    match regression.fit(Array1::zeros(3), &data.x, &data.y) {
        Ok(fit) => info!(
            coef = %fit.coef,
            iterations = fit.iterations,
            loss = fit.loss,
            "fitted"
        ),
        Err(err) => error!(%err, "fit failed"),
    }
}
