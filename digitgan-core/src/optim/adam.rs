use crate::error::DigitGanError;
use crate::nn::parameter::Parameter;
use crate::optim::Optimizer;

/// Represents the state for a single parameter in the Adam optimizer.
#[derive(Default, Clone, Debug)]
pub struct AdamParamState {
    /// First moment vector (exponential moving average of gradients).
    pub m: Option<Vec<f32>>,
    /// Second moment vector (exponential moving average of squared gradients).
    pub v: Option<Vec<f32>>,
    /// Maximum value of v_hat seen so far (for AMSGrad).
    pub v_max: Option<Vec<f32>>,
}

/// Adam optimizer.
///
/// Reference: <https://arxiv.org/abs/1412.6980>
///
/// For every parameter `p` with gradient `g`, at step `t`:
///
/// ```text
/// m = beta1 * m + (1 - beta1) * g
/// v = beta2 * v + (1 - beta2) * g^2
/// p -= lr * (m / (1 - beta1^t)) / (sqrt(v / (1 - beta2^t)) + eps)
/// ```
///
/// With `weight_decay > 0`, `weight_decay * p` is added to `g` first.
#[derive(Debug)]
pub struct AdamOptimizer {
    params: Vec<Parameter>,
    lr: f32,
    beta1: f32,
    beta2: f32,
    eps: f32,
    weight_decay: f32,
    amsgrad: bool,
    iterations: u64,
    state: Vec<AdamParamState>,
}

impl AdamOptimizer {
    #[allow(clippy::too_many_arguments)] // Arguments are standard for Adam
    pub fn new(
        params: Vec<Parameter>,
        lr: f32,
        beta1: f32,
        beta2: f32,
        eps: f32,
        weight_decay: f32,
        amsgrad: bool,
    ) -> Result<Self, DigitGanError> {
        if lr.is_nan() || lr <= 0.0 {
            return Err(DigitGanError::ConfigurationError(
                "Learning rate must be positive".to_string(),
            ));
        }
        if !(0.0..1.0).contains(&beta1) {
            return Err(DigitGanError::ConfigurationError(
                "Beta1 must be in [0, 1)".to_string(),
            ));
        }
        if !(0.0..1.0).contains(&beta2) {
            return Err(DigitGanError::ConfigurationError(
                "Beta2 must be in [0, 1)".to_string(),
            ));
        }
        if eps.is_nan() || eps <= 0.0 {
            return Err(DigitGanError::ConfigurationError(
                "Epsilon must be positive".to_string(),
            ));
        }
        if weight_decay.is_nan() || weight_decay < 0.0 {
            return Err(DigitGanError::ConfigurationError(
                "Weight decay must be non-negative".to_string(),
            ));
        }

        let state = vec![AdamParamState::default(); params.len()];
        Ok(AdamOptimizer {
            params,
            lr,
            beta1,
            beta2,
            eps,
            weight_decay,
            amsgrad,
            iterations: 0,
            state,
        })
    }

    /// Adam with the usual defaults: betas `(0.9, 0.999)`, eps `1e-8`, no
    /// weight decay.
    pub fn with_lr(params: Vec<Parameter>, lr: f32) -> Result<Self, DigitGanError> {
        AdamOptimizer::new(params, lr, 0.9, 0.999, 1e-8, 0.0, false)
    }

    /// Returns handles to the parameters managed by the optimizer.
    pub fn params(&self) -> &[Parameter] {
        &self.params
    }

    pub fn lr(&self) -> f32 {
        self.lr
    }

    /// Number of steps taken so far.
    pub fn iterations(&self) -> u64 {
        self.iterations
    }
}

impl Optimizer for AdamOptimizer {
    fn step(&mut self) -> Result<(), DigitGanError> {
        if self.params.is_empty() {
            return Ok(());
        }
        self.iterations += 1;

        let bias_correction1 = 1.0 - self.beta1.powi(self.iterations as i32);
        let bias_correction2 = 1.0 - self.beta2.powi(self.iterations as i32);
        if bias_correction1.abs() < f32::EPSILON || bias_correction2.abs() < f32::EPSILON {
            return Err(DigitGanError::InternalError(format!(
                "Adam bias correction vanished at step {}",
                self.iterations
            )));
        }

        for (param, state) in self.params.iter().zip(self.state.iter_mut()) {
            let grad = match param.grad() {
                Some(grad) => grad.get_f32_data(),
                None => continue,
            };
            let mut guard = param.write_data();
            if grad.len() != guard.numel() {
                return Err(DigitGanError::ShapeMismatch {
                    expected: guard.shape.clone(),
                    actual: vec![grad.len()],
                    operation: "AdamOptimizer::step".to_string(),
                });
            }

            let n = grad.len();
            let m = state.m.get_or_insert_with(|| vec![0.0; n]);
            let v = state.v.get_or_insert_with(|| vec![0.0; n]);
            let data = guard.data_mut();

            for i in 0..n {
                let g = if self.weight_decay != 0.0 {
                    grad[i] + self.weight_decay * data[i]
                } else {
                    grad[i]
                };
                m[i] = self.beta1 * m[i] + (1.0 - self.beta1) * g;
                v[i] = self.beta2 * v[i] + (1.0 - self.beta2) * g * g;
            }

            let v_hat: Vec<f32> = v.iter().map(|&vi| vi / bias_correction2).collect();
            let v_for_update = if self.amsgrad {
                let v_max = state.v_max.get_or_insert_with(|| v_hat.clone());
                for (vm, &vh) in v_max.iter_mut().zip(&v_hat) {
                    *vm = vm.max(vh);
                }
                v_max.clone()
            } else {
                v_hat
            };

            for i in 0..n {
                let m_hat = m[i] / bias_correction1;
                data[i] -= self.lr * m_hat / (v_for_update[i].sqrt() + self.eps);
            }
        }
        log::trace!(
            "Adam step {} over {} parameters",
            self.iterations,
            self.params.len()
        );
        Ok(())
    }

    fn zero_grad(&mut self) {
        for param in &self.params {
            param.zero_grad();
        }
    }
}

#[cfg(test)]
#[path = "adam_test.rs"]
mod tests;
