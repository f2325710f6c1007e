// digitgan-core/src/ops/loss/binary_cross_entropy.rs

use crate::autograd::BackwardOp;
use crate::error::DigitGanError;
use crate::ops::set_grad_fn;
use crate::tensor::Tensor;
use std::sync::Arc;

/// Lower bound applied to each log term so that probabilities of exactly 0
/// or 1 still give a finite loss.
pub const LOG_CLAMP_MIN: f32 = -100.0;

/// Lower bound on `p * (1 - p)` in the gradient denominator.
const GRAD_EPS: f32 = 1e-12;

// --- BinaryCrossEntropyBackward Definition ---

/// Backward pass for mean-reduced binary cross-entropy.
///
/// dL/dp_i = (p_i - t_i) / max(p_i * (1 - p_i), eps) / N, scaled by the
/// upstream scalar. Targets receive a zero gradient.
#[derive(Debug)]
struct BinaryCrossEntropyBackward {
    input: Tensor,
    target: Tensor,
}

impl BackwardOp for BinaryCrossEntropyBackward {
    fn backward(&self, grad_output: &Tensor) -> Result<Vec<Tensor>, DigitGanError> {
        let upstream = grad_output.item()?;
        let (p, shape, _) = self.input.snapshot();
        let (t, _, _) = self.target.snapshot();
        let n = p.len() as f32;

        let grad_input: Vec<f32> = p
            .iter()
            .zip(t.iter())
            .map(|(&p, &t)| upstream * (p - t) / (p * (1.0 - p)).max(GRAD_EPS) / n)
            .collect();
        let grad_target = vec![0.0f32; t.len()];

        Ok(vec![
            Tensor::new(grad_input, shape.clone())?,
            Tensor::new(grad_target, shape)?,
        ])
    }

    fn inputs(&self) -> Vec<Tensor> {
        vec![self.input.clone(), self.target.clone()]
    }
}

// --- binary_cross_entropy_op Implementation ---

/// Mean binary cross-entropy between probabilities `input` and `target`:
///
/// `-mean(t * ln(p) + (1 - t) * ln(1 - p))`
///
/// Each log term is clamped to be `>= -100`. Only `input` is differentiated.
///
/// # Errors
/// * `ShapeMismatch` if the shapes differ or the tensors are empty.
pub fn binary_cross_entropy_op(input: &Tensor, target: &Tensor) -> Result<Tensor, DigitGanError> {
    let (p, input_shape, requires_grad) = input.snapshot();
    let (t, target_shape, _) = target.snapshot();
    if input_shape != target_shape || p.is_empty() {
        return Err(DigitGanError::ShapeMismatch {
            expected: input_shape,
            actual: target_shape,
            operation: "binary_cross_entropy_op".to_string(),
        });
    }

    let total: f64 = p
        .iter()
        .zip(t.iter())
        .map(|(&p, &t)| {
            let log_p = p.ln().max(LOG_CLAMP_MIN);
            let log_1mp = (1.0 - p).ln().max(LOG_CLAMP_MIN);
            -(t * log_p + (1.0 - t) * log_1mp) as f64
        })
        .sum();
    let output = Tensor::scalar((total / p.len() as f64) as f32);

    if requires_grad {
        set_grad_fn(
            &output,
            Arc::new(BinaryCrossEntropyBackward {
                input: input.clone(),
                target: target.clone(),
            }),
        );
    }
    Ok(output)
}

#[cfg(test)]
#[path = "binary_cross_entropy_test.rs"]
mod tests;
