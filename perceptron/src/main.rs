//! Trains a 2-input linear model to average its inputs, printing one line per sample.
//!
//! # Usage
//!
//! ```bash
//! cargo run -p perceptron -- --samples 100 --epochs 1 --learning-rate 0.1
//! RUST_LOG=debug cargo run -p perceptron -- --seed 42 --epochs 20
//! ```

use clap::Parser;
use log::info;
use perceptron::prelude::*;

/// Train a single linear layer on the averaging task.
#[derive(Parser, Debug)]
#[command(name = "perceptron")]
#[command(about = "Train a single linear layer to average two numbers")]
struct Args {
    /// Random seed. Seeded from the wall clock when omitted.
    #[arg(long)]
    seed: Option<u64>,

    /// Number of training samples
    #[arg(long, default_value_t = 100)]
    samples: usize,

    /// Number of passes over the samples
    #[arg(long, default_value_t = 1)]
    epochs: usize,

    /// Learning rate
    #[arg(long, default_value_t = 0.1)]
    learning_rate: f64,

    /// Also update the bias during the gradient step
    #[arg(long)]
    train_bias: bool,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();

    let mut dev = match args.seed {
        Some(seed) => Cpu::seed_from_u64(seed),
        None => {
            let (dev, seed) = Cpu::seed_from_time();
            info!("seeded from wall clock: --seed {seed}");
            dev
        }
    };

    let data: Vec<Datapoint<f64>> = averaging_dataset(&mut dev, args.samples)?;

    let cfg = TrainConfig {
        learning_rate: args.learning_rate,
        epochs: args.epochs,
        train_bias: args.train_bias,
        ..Default::default()
    };
    let mut trainer = Trainer::try_new(cfg, &mut dev)?;
    info!(
        "training {} weights on {} samples for {} epochs",
        trainer.model().num_trainable_params(),
        data.len(),
        cfg.epochs
    );

    for epoch in 0..cfg.epochs {
        let loss = trainer.try_epoch(&data, |step| println!("{step}"))?;
        info!("epoch {epoch}: mean loss {loss:.6}");
    }

    let model = trainer.model();
    info!(
        "weights {:?}, bias {:?}",
        model.weight(),
        model.bias()
    );
    Ok(())
}
