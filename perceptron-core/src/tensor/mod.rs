//! The [Cpu] device and the crate's [Error] type.
//!
//! Layers keep their parameters in flat `Vec`s. A [Cpu] device is the one place
//! those buffers get randomized, and [try_alloc_zeros()] is how they get allocated:
//!
//! ```rust
//! # use perceptron_core::prelude::*;
//! let mut dev = Cpu::seed_from_u64(0);
//! let mut w: Vec<f32> = try_alloc_zeros(6).unwrap();
//! dev.try_fill_with_uniform(&mut w, -1.0, 1.0).unwrap();
//! ```

mod cpu;
mod error;

pub use cpu::{try_alloc_zeros, Cpu};
pub use error::Error;

pub(crate) use error::check_len;
