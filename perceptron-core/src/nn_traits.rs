//! Traits implemented by layers.

use crate::{dtypes::Dtype, tensor::Cpu, tensor::Error};

/// Mutable forward of `Input` that produces [Module::Output].
///
/// Layers write their result into a buffer they own, so `Output` borrows from `self`.
pub trait Module<Input> {
    /// The type that this unit produces given `Input`.
    type Output<'a>
    where
        Self: 'a;

    fn try_forward(&mut self, x: Input) -> Result<Self::Output<'_>, Error>;
}

/// Something that can (re)initialize its parameters from a uniform distribution.
pub trait ResetParams<E: Dtype> {
    /// Overwrites every parameter with an independent sample from `[min, max)`.
    fn try_reset_params(&mut self, dev: &mut Cpu, min: E, max: E) -> Result<(), Error>;
}

/// Number of parameters a gradient step can change.
pub trait NumParams {
    fn num_trainable_params(&self) -> usize;
}
