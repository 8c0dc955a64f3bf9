use crate::{dtypes::Dtype, tensor::Error};

use rand::{distributions::Distribution, rngs::StdRng, SeedableRng};
use rand_distr::Uniform;
use std::{
    time::{SystemTime, UNIX_EPOCH},
    vec::Vec,
};

/// A heap backed device. Owns the random number generator every
/// sampling operation draws from, so a single seed reproduces a whole run.
///
/// There is no global generator: pass the device by `&mut` to whatever needs to sample.
///
/// ```rust
/// # use perceptron_core::prelude::*;
/// let mut dev = Cpu::seed_from_u64(0);
/// let x: f64 = dev.rand_double(0.0, 1.0).unwrap();
/// assert!((0.0..1.0).contains(&x));
/// ```
#[derive(Debug)]
pub struct Cpu {
    pub(crate) rng: StdRng,
}

impl Default for Cpu {
    fn default() -> Self {
        Self::seed_from_u64(0)
    }
}

impl Cpu {
    pub fn seed_from_u64(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Seeds from the wall clock. Returns the seed that was used so a run can be repeated.
    pub fn seed_from_time() -> (Self, u64) {
        let seed = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_nanos() as u64)
            .unwrap_or_default();
        (Self::seed_from_u64(seed), seed)
    }

    /// Draws one sample uniformly from `[min, max)`.
    pub fn rand_double<E: Dtype>(&mut self, min: E, max: E) -> Result<E, Error> {
        let distr = uniform(min, max)?;
        Ok(distr.sample(&mut self.rng))
    }

    /// Overwrites every element of `storage` with an independent sample from `[min, max)`.
    pub fn try_fill_with_uniform<E: Dtype>(
        &mut self,
        storage: &mut [E],
        min: E,
        max: E,
    ) -> Result<(), Error> {
        let distr = uniform(min, max)?;
        for v in storage.iter_mut() {
            *v = distr.sample(&mut self.rng);
        }
        Ok(())
    }
}

/// Allocates `numel` zeros, reporting allocation failure instead of aborting.
#[inline]
pub fn try_alloc_zeros<E: Dtype>(numel: usize) -> Result<Vec<E>, Error> {
    let mut data: Vec<E> = Vec::new();
    data.try_reserve_exact(numel)
        .map_err(|_| Error::OutOfMemory)?;
    data.resize(numel, E::ZERO);
    Ok(data)
}

/// `Uniform::new` panics on an empty range, so the bounds are checked first.
fn uniform<E: Dtype>(min: E, max: E) -> Result<Uniform<E>, Error> {
    if !(min.is_finite() && max.is_finite() && min < max) {
        return Err(Error::InvalidRange);
    }
    Ok(Uniform::new(min, max))
}
