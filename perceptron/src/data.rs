//! The averaging task: two inputs in `[0, 1)`, target is their mean.

use perceptron_core::{dtypes::Dtype, tensor::Cpu, tensor::Error};

/// Number of inputs in a [Datapoint].
pub const NUM_INPUTS: usize = 2;

/// One training sample.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Datapoint<E> {
    pub inputs: [E; NUM_INPUTS],
    pub target: E,
}

impl<E: Dtype> Datapoint<E> {
    /// A sample whose target is the mean of `inputs`.
    pub fn averaging(inputs: [E; NUM_INPUTS]) -> Self {
        let n = E::from_usize(NUM_INPUTS).unwrap_or(E::ONE);
        let target = inputs.iter().copied().sum::<E>() / n;
        Self { inputs, target }
    }
}

/// `len` samples with inputs drawn uniformly from `[0, 1)`.
pub fn averaging_dataset<E: Dtype>(dev: &mut Cpu, len: usize) -> Result<Vec<Datapoint<E>>, Error> {
    let mut data = Vec::new();
    data.try_reserve_exact(len).map_err(|_| Error::OutOfMemory)?;
    for _ in 0..len {
        let mut inputs = [E::ZERO; NUM_INPUTS];
        dev.try_fill_with_uniform(&mut inputs, E::ZERO, E::ONE)?;
        data.push(Datapoint::averaging(inputs));
    }
    Ok(data)
}
