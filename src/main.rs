use std::{env, time::Instant};

use anyhow::Result;
use log::info;
use machine_learning::{
    arch::Perceptron,
    dataset::{generate_synthetic, split},
    metrics, numeric, seed,
    training::Trainer,
};

use crate::config::RunConfig;

mod config;

const SIGMOID_SAMPLES: [f64; 11] = [-10.0, -5.0, -2.0, -1.0, -0.5, 0.0, 0.5, 1.0, 2.0, 5.0, 10.0];

fn main() -> Result<()> {
    env_logger::init();

    let config = match env::args().nth(1) {
        Some(path) => {
            info!("loading run configuration from {path}");
            RunConfig::load(path)?
        }
        None => RunConfig::default(),
    };

    let seed = config.seed.unwrap_or_else(seed::clock_seed);
    info!(seed = seed; "seeding the run");

    log_sigmoid_table();

    let generation = config.generation(seed)?;
    let dataset = generate_synthetic(&generation);
    let (train, test) = split(&dataset, &config.split(seed)?);
    info!(
        train = train.len(),
        test = test.len(),
        features = dataset.num_features();
        "dataset ready"
    );

    let mut model = Perceptron::with_seed(train.num_features(), seed);
    let trainer = Trainer::new(config.training()?);

    let start = Instant::now();
    let report = trainer.train(&mut model, &train)?;
    info!(
        updates = report.updates(),
        early_stop = report.stopped_early(),
        elapsed_secs = start.elapsed().as_secs_f64();
        "training finished"
    );
    if let Some(loss) = report.final_loss() {
        info!("final loss: {loss:.6}");
    }

    let eval = metrics::evaluate(&model, &test, &config.metrics()?)?;
    info!("accuracy: {:.2}%", eval.accuracy);

    if let Some(extended) = eval.extended {
        info!("precision: {:.4}", extended.precision);
        info!("recall: {:.4}", extended.recall);
        info!("f1: {:.4}", extended.f1);
    }

    let [[tn, fp], [fn_, tp]] = eval.confusion.as_array();
    info!("confusion matrix:");
    info!("            pred 0  pred 1");
    info!("  true 0  {tn:>7} {fp:>7}");
    info!("  true 1  {fn_:>7} {tp:>7}");

    Ok(())
}

fn log_sigmoid_table() {
    info!("{:>6} {:>14} {:>14} {:>10}", "z", "sigmoid", "reference", "abs diff");

    for z in SIGMOID_SAMPLES {
        let approx = numeric::sigmoid(z);
        let reference = 1.0 / (1.0 + (-z).exp());
        let diff = (approx - reference).abs();

        info!("{z:>6.1} {approx:>14.10} {reference:>14.10} {diff:>10.2e}");
    }
}
