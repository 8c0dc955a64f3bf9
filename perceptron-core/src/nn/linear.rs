use crate::{
    dtypes::{Dtype, HasDtype},
    nn_traits::{Module, NumParams, ResetParams},
    tensor::{check_len, try_alloc_zeros, Cpu, Error},
};

/// Architecture of a [Linear] layer: its dimensions, and whether
/// [Linear::try_backward()] also moves the bias.
///
/// ```rust
/// # use perceptron_core::prelude::*;
/// let model: Linear<f32> = LinearConfig::new(5, 2).try_build().unwrap();
/// assert_eq!(model.weight(), &[0.0; 10]);
/// assert_eq!(model.bias(), &[0.0; 2]);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LinearConfig {
    pub num_in: usize,
    pub num_out: usize,
    /// Defaults to `false`: the gradient step only touches the weights.
    pub train_bias: bool,
}

impl LinearConfig {
    pub fn new(num_in: usize, num_out: usize) -> Self {
        Self {
            num_in,
            num_out,
            train_bias: false,
        }
    }

    pub fn with_bias_training(mut self, train_bias: bool) -> Self {
        self.train_bias = train_bias;
        self
    }

    pub fn try_build<E: Dtype>(&self) -> Result<Linear<E>, Error> {
        let mut m = Linear::try_new(self.num_in, self.num_out)?;
        m.train_bias = self.train_bias;
        Ok(m)
    }
}

/// A linear transformation of the form `weight * x + bias`, where `weight` is a
/// `num_out x num_in` matrix, `x` is a vector and `bias` is a vector.
///
/// Weights are stored flat, one row per output: the weight connecting input `i`
/// to output `o` lives at `o * num_in + i`.
///
/// The result of [Linear::try_forward()] is written into a buffer owned by the layer
/// and handed back as a borrow, so it has to be consumed before the next forward.
///
/// # Examples
/// ```rust
/// # use perceptron_core::prelude::*;
/// let mut model: Linear<f64> = Linear::try_new(2, 1).unwrap();
/// model.weight_mut().copy_from_slice(&[0.5, 0.5]);
/// model.bias_mut().copy_from_slice(&[1.5]);
/// assert_eq!(model.try_forward(&[1.0, 2.0]).unwrap(), &[2.5]);
/// ```
#[derive(Debug, Clone)]
pub struct Linear<E: Dtype> {
    num_in: usize,
    num_out: usize,
    /// Row-major by output, shape (num_out, num_in)
    weight: Vec<E>,
    /// shape (num_out, )
    bias: Vec<E>,
    /// Most recent forward result, shape (num_out, )
    output: Vec<E>,
    train_bias: bool,
}

impl<E: Dtype> HasDtype for Linear<E> {
    type Dtype = E;
}

impl<E: Dtype> Linear<E> {
    /// Allocates all parameters zeroed. Call [ResetParams::try_reset_params()] (or
    /// write the parameters directly) before training.
    pub fn try_new(num_in: usize, num_out: usize) -> Result<Self, Error> {
        if num_in == 0 {
            return Err(Error::ZeroDimension { operand: "num_in" });
        }
        if num_out == 0 {
            return Err(Error::ZeroDimension { operand: "num_out" });
        }
        let numel = num_in.checked_mul(num_out).ok_or(Error::OutOfMemory)?;
        Ok(Self {
            num_in,
            num_out,
            weight: try_alloc_zeros(numel)?,
            bias: try_alloc_zeros(num_out)?,
            output: try_alloc_zeros(num_out)?,
            train_bias: false,
        })
    }

    pub fn num_in(&self) -> usize {
        self.num_in
    }

    pub fn num_out(&self) -> usize {
        self.num_out
    }

    pub fn weight(&self) -> &[E] {
        &self.weight
    }

    pub fn weight_mut(&mut self) -> &mut [E] {
        &mut self.weight
    }

    /// The weight connecting input `i` to output `o`.
    ///
    /// # Panics
    /// If `o >= num_out` or `i >= num_in`.
    pub fn weight_at(&self, o: usize, i: usize) -> E {
        assert!(o < self.num_out && i < self.num_in);
        self.weight[o * self.num_in + i]
    }

    pub fn bias(&self) -> &[E] {
        &self.bias
    }

    pub fn bias_mut(&mut self) -> &mut [E] {
        &mut self.bias
    }

    /// Result of the last [Linear::try_forward()]; zeros before the first one.
    pub fn output(&self) -> &[E] {
        &self.output
    }

    pub fn trains_bias(&self) -> bool {
        self.train_bias
    }

    pub fn set_train_bias(&mut self, train_bias: bool) {
        self.train_bias = train_bias;
    }

    /// `output[o] = bias[o] + sum_i inputs[i] * weight[o * num_in + i]`
    pub fn try_forward(&mut self, inputs: &[E]) -> Result<&[E], Error> {
        check_len("inputs", self.num_in, inputs.len())?;
        for ((out, row), b) in self
            .output
            .iter_mut()
            .zip(self.weight.chunks_exact(self.num_in))
            .zip(self.bias.iter())
        {
            *out = *b + row.iter().zip(inputs).map(|(w, x)| *w * *x).sum::<E>();
        }
        Ok(&self.output)
    }

    /// One stochastic gradient descent step given `d loss / d output` for a single sample:
    /// `weight[o * num_in + i] -= learning_rate * inputs[i] * output_gradients[o]`.
    ///
    /// The bias is left untouched unless bias training was enabled with
    /// [LinearConfig::with_bias_training()] or [Linear::set_train_bias()], in which case
    /// `bias[o] -= learning_rate * output_gradients[o]`.
    ///
    /// Both lengths are checked before anything is written.
    pub fn try_backward(
        &mut self,
        inputs: &[E],
        output_gradients: &[E],
        learning_rate: E,
    ) -> Result<(), Error> {
        check_len("inputs", self.num_in, inputs.len())?;
        check_len("output_gradients", self.num_out, output_gradients.len())?;

        for (row, g) in self
            .weight
            .chunks_exact_mut(self.num_in)
            .zip(output_gradients.iter().copied())
        {
            for (w, x) in row.iter_mut().zip(inputs.iter().copied()) {
                *w -= learning_rate * x * g;
            }
        }

        if self.train_bias {
            for (b, g) in self.bias.iter_mut().zip(output_gradients.iter().copied()) {
                *b -= learning_rate * g;
            }
        }
        Ok(())
    }
}

impl<'i, E: Dtype> Module<&'i [E]> for Linear<E> {
    type Output<'a> = &'a [E] where Self: 'a;

    fn try_forward(&mut self, x: &'i [E]) -> Result<Self::Output<'_>, Error> {
        Linear::try_forward(self, x)
    }
}

impl<E: Dtype> ResetParams<E> for Linear<E> {
    fn try_reset_params(&mut self, dev: &mut Cpu, min: E, max: E) -> Result<(), Error> {
        dev.try_fill_with_uniform(&mut self.weight, min, max)?;
        dev.try_fill_with_uniform(&mut self.bias, min, max)?;
        log::trace!(
            "reset {}x{} linear parameters from [{min}, {max})",
            self.num_out,
            self.num_in
        );
        Ok(())
    }
}

impl<E: Dtype> NumParams for Linear<E> {
    fn num_trainable_params(&self) -> usize {
        let bias = if self.train_bias { self.bias.len() } else { 0 };
        self.weight.len() + bias
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{losses::*, tests::*};

    const W: [[TestDtype; 5]; 2] = [
        [-0.3458893, -0.30371523, -0.3712057, 0.14303583, -0.0268966],
        [0.11733949, 0.14059687, -0.10670426, -0.09373143, 0.18974298],
    ];
    const B: [TestDtype; 2] = [0.3765365, -0.290717];

    fn build_5x2() -> Linear<TestDtype> {
        let mut m = Linear::try_new(5, 2).unwrap();
        m.weight_mut().copy_from_slice(&W.concat());
        m.bias_mut().copy_from_slice(&B);
        m
    }

    #[test]
    fn test_linear_new_shapes() {
        let m: Linear<TestDtype> = Linear::try_new(3, 4).unwrap();
        assert_eq!(m.weight().len(), 12);
        assert_eq!(m.bias().len(), 4);
        assert_eq!(m.output().len(), 4);
        assert!(!m.trains_bias());
    }

    #[test]
    fn test_linear_zero_dimension() {
        assert_eq!(
            Linear::<TestDtype>::try_new(0, 1).unwrap_err(),
            Error::ZeroDimension { operand: "num_in" }
        );
        assert_eq!(
            Linear::<TestDtype>::try_new(2, 0).unwrap_err(),
            Error::ZeroDimension { operand: "num_out" }
        );
    }

    #[test]
    fn test_linear_too_large() {
        assert_eq!(
            Linear::<TestDtype>::try_new(usize::MAX, 2).unwrap_err(),
            Error::OutOfMemory
        );
    }

    #[test]
    fn test_linear_initialize() {
        let mut dev = Cpu::seed_from_u64(0);
        let mut m: Linear<TestDtype> = LinearConfig::new(2000, 3).try_build().unwrap();
        m.try_reset_params(&mut dev, -0.5, 0.25).unwrap();
        for &v in m.weight().iter().chain(m.bias()) {
            assert!((-0.5..0.25).contains(&v), "{v}");
        }
        assert!(m.weight().iter().any(|&v| v != 0.0));
    }

    #[test]
    fn test_linear_initialize_invalid_range() {
        let mut dev = Cpu::default();
        let mut m: Linear<TestDtype> = Linear::try_new(2, 1).unwrap();
        assert_eq!(
            m.try_reset_params(&mut dev, 1.0, -1.0),
            Err(Error::InvalidRange)
        );
    }

    #[test]
    fn test_weight_layout() {
        let m = build_5x2();
        for (o, row) in W.iter().enumerate() {
            for (i, w) in row.iter().enumerate() {
                assert_eq!(m.weight_at(o, i), *w);
                assert_eq!(m.weight()[o * 5 + i], *w);
            }
        }
    }

    #[test]
    fn test_forward_1d() {
        let mut model = build_5x2();
        let x: [TestDtype; 5] = [-0.8808001, 2.4185333, 2.2478335, 0.0565211, 2.031299];
        let y = model.try_forward(&x).unwrap();
        assert_close!([y[0], y[1]], [-0.93430865, 0.08624211], 1e-5);
        assert_close!(
            [model.output()[0], model.output()[1]],
            [-0.93430865, 0.08624211],
            1e-5
        );
    }

    #[test]
    fn test_forward_small_example() {
        let mut m: Linear<TestDtype> = Linear::try_new(2, 1).unwrap();
        m.weight_mut().copy_from_slice(&[0.5, 0.5]);
        m.bias_mut()[0] = 1.5;
        let y = m.try_forward(&[1.0, 2.0]).unwrap();
        assert_close!(y[0], 2.5);
    }

    #[test]
    fn test_forward_is_deterministic() {
        let mut m = build_5x2();
        let x: [TestDtype; 5] = [0.1, -0.2, 0.3, -0.4, 0.5];
        let a = m.try_forward(&x).unwrap().to_vec();
        let b = m.try_forward(&x).unwrap().to_vec();
        assert_eq!(a, b);
    }

    #[test]
    fn test_forward_overwrites_output() {
        let mut m: Linear<TestDtype> = Linear::try_new(1, 1).unwrap();
        m.weight_mut()[0] = 2.0;
        assert_eq!(m.try_forward(&[1.0]).unwrap(), &[2.0]);
        assert_eq!(m.try_forward(&[3.0]).unwrap(), &[6.0]);
        assert_eq!(m.output(), &[6.0]);
    }

    #[test]
    fn test_forward_through_module_trait() {
        let mut m = build_5x2();
        let x: [TestDtype; 5] = [1.0; 5];
        let expected = Linear::try_forward(&mut m, &x).unwrap().to_vec();
        let y = Module::try_forward(&mut m, &x[..]).unwrap();
        assert_eq!(y, expected.as_slice());
    }

    #[test]
    fn test_forward_dimension_mismatch() {
        let mut m = build_5x2();
        assert_eq!(
            m.try_forward(&[1.0; 4]).unwrap_err(),
            Error::DimensionMismatch {
                operand: "inputs",
                expected: 5,
                found: 4
            }
        );
        assert_eq!(m.output(), &[0.0; 2]);
        assert!(m.try_forward(&[1.0; 6]).is_err());
    }

    #[test]
    fn test_backward_updates_weights_only() {
        let mut m: Linear<TestDtype> = Linear::try_new(2, 1).unwrap();
        m.weight_mut().copy_from_slice(&[0.5, 0.5]);
        m.bias_mut()[0] = 1.5;

        m.try_backward(&[1.0, 2.0], &[4.0], 0.1).unwrap();
        assert_close!([m.weight()[0], m.weight()[1]], [0.5 - 0.4, 0.5 - 0.8]);
        assert_eq!(m.bias(), &[1.5]);
    }

    #[test]
    fn test_backward_with_bias_training() {
        let mut m: Linear<TestDtype> = LinearConfig::new(2, 1)
            .with_bias_training(true)
            .try_build()
            .unwrap();
        m.bias_mut()[0] = 1.5;
        m.try_backward(&[1.0, 2.0], &[4.0], 0.1).unwrap();
        assert_close!([m.weight()[0], m.weight()[1]], [-0.4, -0.8]);
        assert_close!(m.bias()[0], 1.1);
    }

    #[test]
    fn test_backward_multiple_outputs() {
        let mut m = build_5x2();
        let x: [TestDtype; 5] = [1.0, 0.0, -1.0, 2.0, 0.5];
        let g: [TestDtype; 2] = [0.5, -2.0];
        let lr = 0.01;
        m.try_backward(&x, &g, lr).unwrap();
        for o in 0..2 {
            for i in 0..5 {
                assert_close!(m.weight_at(o, i), W[o][i] - lr * x[i] * g[o]);
            }
        }
        assert_eq!(m.bias(), &B);
    }

    #[test]
    fn test_backward_dimension_mismatch_leaves_params() {
        let mut m = build_5x2();
        assert_eq!(
            m.try_backward(&[1.0; 5], &[1.0; 3], 0.1).unwrap_err(),
            Error::DimensionMismatch {
                operand: "output_gradients",
                expected: 2,
                found: 3
            }
        );
        assert_eq!(
            m.try_backward(&[1.0; 2], &[1.0; 2], 0.1).unwrap_err(),
            Error::DimensionMismatch {
                operand: "inputs",
                expected: 5,
                found: 2
            }
        );
        assert_eq!(m.weight(), W.concat().as_slice());
        assert_eq!(m.bias(), &B);
    }

    #[test]
    fn test_sgd_step_reduces_loss() {
        let mut m = build_5x2();
        let x: [TestDtype; 5] = [0.3, -0.1, 0.8, 0.2, -0.6];
        let target: [TestDtype; 2] = [1.0, -1.0];

        let loss = |y: &[TestDtype]| mse(y[0], target[0]) + mse(y[1], target[1]);
        let before = loss(m.try_forward(&x).unwrap());
        let grads: Vec<TestDtype> = m
            .output()
            .iter()
            .zip(target)
            .map(|(y, t)| mse_derivative(*y, t))
            .collect();
        m.try_backward(&x, &grads, 0.05).unwrap();
        let after = loss(m.try_forward(&x).unwrap());
        assert!(after < before, "{after} >= {before}");
    }

    #[test]
    fn test_num_params() {
        let m: Linear<TestDtype> = Linear::try_new(3, 2).unwrap();
        assert_eq!(m.num_trainable_params(), 6);
        let m: Linear<TestDtype> = LinearConfig::new(3, 2)
            .with_bias_training(true)
            .try_build()
            .unwrap();
        assert_eq!(m.num_trainable_params(), 8);
    }
}
