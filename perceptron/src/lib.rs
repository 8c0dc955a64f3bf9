//! # perceptron
//!
//! Trains a single [Linear](perceptron_core::nn::Linear) layer, one sample at a time,
//! to average two numbers.
//!
//! The model itself lives in [perceptron_core]. This crate adds the pieces that drive it:
//! - [data] synthesizes the averaging dataset.
//! - [train] runs forward, loss, and backward for each sample, and reports each step.
//!
//! ```rust
//! # use perceptron::prelude::*;
//! let mut dev = Cpu::seed_from_u64(0);
//! let data: Vec<Datapoint<f64>> = averaging_dataset(&mut dev, 100).unwrap();
//!
//! let cfg = TrainConfig::<f64> {
//!     epochs: 5,
//!     ..Default::default()
//! };
//! let mut trainer = Trainer::try_new(cfg, &mut dev).unwrap();
//! let losses = trainer.try_fit(&data, |_step| {}).unwrap();
//! assert_eq!(losses.len(), 5);
//! ```

pub use perceptron_core;

pub mod data;
pub mod train;

/// Contains subset of all public exports.
pub mod prelude {
    pub use crate::data::*;
    pub use crate::train::*;
    pub use perceptron_core::prelude::*;
}
