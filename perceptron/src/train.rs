//! The training loop: forward, loss, backward, one sample at a time.

use crate::data::{Datapoint, NUM_INPUTS};
use perceptron_core::{
    dtypes::Dtype,
    losses::{mean, mse, mse_derivative},
    nn::{Linear, LinearConfig},
    nn_traits::ResetParams,
    tensor::{Cpu, Error},
};

/// Hyperparameters for a [Trainer].
///
/// ```rust
/// # use perceptron::prelude::*;
/// let cfg = TrainConfig::<f32> {
///     learning_rate: 1e-2,
///     epochs: 10,
///     ..Default::default()
/// };
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrainConfig<E> {
    /// Step size of every gradient step. Defaults to `0.1`.
    pub learning_rate: E,

    /// Full passes over the dataset. Defaults to `1`.
    pub epochs: usize,

    /// Lower bound of the uniform initialization. Defaults to `-1.0`.
    pub init_min: E,

    /// Upper (exclusive) bound of the uniform initialization. Defaults to `1.0`.
    pub init_max: E,

    /// Let the gradient step move the bias as well. Defaults to `false`.
    pub train_bias: bool,
}

macro_rules! default_config {
    ($type:ty) => {
        impl Default for TrainConfig<$type> {
            fn default() -> Self {
                Self {
                    learning_rate: 0.1,
                    epochs: 1,
                    init_min: -1.0,
                    init_max: 1.0,
                    train_bias: false,
                }
            }
        }
    };
}

default_config!(f32);
default_config!(f64);

/// What happened on one sample. The prediction is the one made *before* the
/// weights were updated.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Step<E> {
    pub inputs: [E; NUM_INPUTS],
    pub prediction: E,
    pub target: E,
    pub loss: E,
}

impl<E: Dtype> std::fmt::Display for Step<E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let [a, b] = self.inputs;
        write!(
            f,
            "inputs=[{a:.6}, {b:.6}] prediction={:.6} target={:.6} loss={:.6}",
            self.prediction, self.target, self.loss
        )
    }
}

/// Owns a 2-input, 1-output [Linear] model and trains it with per-sample gradient descent.
#[derive(Debug, Clone)]
pub struct Trainer<E: Dtype> {
    pub cfg: TrainConfig<E>,
    model: Linear<E>,
}

impl<E: Dtype> Trainer<E> {
    /// Builds the model and initializes it from `[cfg.init_min, cfg.init_max)` using `dev`.
    pub fn try_new(cfg: TrainConfig<E>, dev: &mut Cpu) -> Result<Self, Error> {
        let mut model: Linear<E> = LinearConfig::new(NUM_INPUTS, 1)
            .with_bias_training(cfg.train_bias)
            .try_build()?;
        model.try_reset_params(dev, cfg.init_min, cfg.init_max)?;
        Ok(Self { cfg, model })
    }

    /// Wraps an already built model. Its input width must be [NUM_INPUTS] and it must
    /// have a single output.
    pub fn try_from_model(cfg: TrainConfig<E>, mut model: Linear<E>) -> Result<Self, Error> {
        if model.num_in() != NUM_INPUTS {
            return Err(Error::DimensionMismatch {
                operand: "num_in",
                expected: NUM_INPUTS,
                found: model.num_in(),
            });
        }
        if model.num_out() != 1 {
            return Err(Error::DimensionMismatch {
                operand: "num_out",
                expected: 1,
                found: model.num_out(),
            });
        }
        model.set_train_bias(cfg.train_bias);
        Ok(Self { cfg, model })
    }

    pub fn model(&self) -> &Linear<E> {
        &self.model
    }

    pub fn into_model(self) -> Linear<E> {
        self.model
    }

    /// Runs the model on `inputs` without touching its parameters.
    pub fn try_predict(&mut self, inputs: &[E; NUM_INPUTS]) -> Result<E, Error> {
        Ok(self.model.try_forward(inputs)?[0])
    }

    /// forward -> mse -> mse derivative -> backward, for one sample.
    pub fn try_step(&mut self, sample: &Datapoint<E>) -> Result<Step<E>, Error> {
        let prediction = self.model.try_forward(&sample.inputs)?[0];
        let loss = mse(prediction, sample.target);
        let grad = mse_derivative(prediction, sample.target);
        self.model
            .try_backward(&sample.inputs, &[grad], self.cfg.learning_rate)?;
        Ok(Step {
            inputs: sample.inputs,
            prediction,
            target: sample.target,
            loss,
        })
    }

    /// One pass over `data` in order. Returns the mean loss of the pass, zero if `data` is empty.
    pub fn try_epoch<F: FnMut(&Step<E>)>(
        &mut self,
        data: &[Datapoint<E>],
        mut on_step: F,
    ) -> Result<E, Error> {
        let mut losses = Vec::with_capacity(data.len());
        for sample in data {
            let step = self.try_step(sample)?;
            losses.push(step.loss);
            on_step(&step);
        }
        Ok(mean(&losses))
    }

    /// Runs [TrainConfig::epochs] passes over `data`, returning the mean loss of each.
    pub fn try_fit<F: FnMut(&Step<E>)>(
        &mut self,
        data: &[Datapoint<E>],
        mut on_step: F,
    ) -> Result<Vec<E>, Error> {
        let mut losses = Vec::with_capacity(self.cfg.epochs);
        for epoch in 0..self.cfg.epochs {
            let loss = self.try_epoch(data, &mut on_step)?;
            log::debug!("epoch {epoch}: mean loss {loss}");
            losses.push(loss);
        }
        if !losses.is_empty() {
            log::debug!(
                "trained {} epochs over {} samples, mean loss across epochs {}",
                losses.len(),
                data.len(),
                mean(&losses)
            );
        }
        Ok(losses)
    }
}
