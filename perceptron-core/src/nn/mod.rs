//! Layers built on flat parameter buffers.
//!
//! There is exactly one layer, [Linear]. It is constructed from a [LinearConfig]
//! (or directly with [Linear::try_new()]), randomized through
//! [crate::nn_traits::ResetParams], and then driven by alternating
//! [Linear::try_forward()] and [Linear::try_backward()] calls:
//!
//! ```rust
//! # use perceptron_core::prelude::*;
//! let mut dev = Cpu::seed_from_u64(0);
//! let mut model: Linear<f32> = LinearConfig::new(2, 1).try_build().unwrap();
//! model.try_reset_params(&mut dev, -1.0, 1.0).unwrap();
//!
//! let x: [f32; 2] = [0.25, 0.75];
//! let y = model.try_forward(&x).unwrap()[0];
//! let g = mse_derivative(y, 0.5);
//! model.try_backward(&x, &[g], 0.1).unwrap();
//! ```

mod linear;

pub use linear::{Linear, LinearConfig};
