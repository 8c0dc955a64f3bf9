//! Standard loss functions such as [mse()], along with their derivatives.
//!
//! All of these act on a single sample: the "activation" is the layer's raw output,
//! there is no nonlinearity in between.

use crate::dtypes::Dtype;

/// [Mean Squared Error](https://en.wikipedia.org/wiki/Mean_squared_error) for one sample.
/// This computes `(activation - expected)^2`.
///
/// ```rust
/// # use perceptron_core::prelude::*;
/// assert_eq!(mse(3.0f32, 1.0), 4.0);
/// ```
pub fn mse<E: Dtype>(activation: E, expected: E) -> E {
    let d = activation - expected;
    d * d
}

/// Derivative of [mse()] with respect to `activation`: `2 * (activation - expected)`.
pub fn mse_derivative<E: Dtype>(activation: E, expected: E) -> E {
    (E::ONE + E::ONE) * (activation - expected)
}

/// Arithmetic mean of `values`, or zero when empty.
pub fn mean<E: Dtype>(values: &[E]) -> E {
    if values.is_empty() {
        return E::ZERO;
    }
    let n = E::from_usize(values.len()).unwrap_or(E::ONE);
    values.iter().copied().sum::<E>() / n
}
