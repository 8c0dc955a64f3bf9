//! # perceptron-core
//!
//! A single fully connected layer with no activation, trained one sample at a time
//! by gradient descent.
//!
//! The pieces:
//! - [nn::Linear] owns a flat weight buffer, a bias buffer and an output buffer.
//!   [nn::Linear::try_forward()] computes `weight * x + bias` into the output buffer,
//!   [nn::Linear::try_backward()] takes one gradient step on the weights.
//! - [losses] has the per-sample squared error and its derivative.
//! - [tensor::Cpu] owns the random number generator used for initialization.
//!   There is no global generator; seed a device once and pass it around.
//! - Every fallible operation returns [tensor::Error].
//!
//! ```rust
//! # use perceptron_core::prelude::*;
//! let mut dev = Cpu::seed_from_u64(0);
//! let mut model: Linear<f64> = Linear::try_new(2, 1).unwrap();
//! model.try_reset_params(&mut dev, 0.0, 1.0).unwrap();
//!
//! let x: [f64; 2] = [1.0, 2.0];
//! let prediction = model.try_forward(&x).unwrap()[0];
//! let loss = mse(prediction, 1.5);
//! model.try_backward(&x, &[mse_derivative(prediction, 1.5)], 0.1).unwrap();
//! # let _ = loss;
//! ```
//!
//! Inputs of the wrong length are rejected:
//!
//! ```rust
//! # use perceptron_core::prelude::*;
//! let mut model: Linear<f32> = Linear::try_new(2, 1).unwrap();
//! assert!(matches!(
//!     model.try_forward(&[1.0]),
//!     Err(Error::DimensionMismatch { expected: 2, found: 1, .. })
//! ));
//! ```

pub mod dtypes;
pub mod losses;
pub mod nn;
pub mod nn_traits;
pub mod tensor;

/// Contains subset of all public exports.
pub mod prelude {
    pub use crate::dtypes::{Dtype, HasDtype, Unit};
    pub use crate::losses::*;
    pub use crate::nn::*;
    pub use crate::nn_traits::*;
    pub use crate::tensor::*;
}
