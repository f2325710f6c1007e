// digitgan-core/src/ops/activation/sigmoid.rs

use crate::autograd::BackwardOp;
use crate::error::DigitGanError;
use crate::tensor::Tensor;
use std::sync::Arc;

/// Backward pass for `y = sigmoid(x)`: dy/dx = y * (1 - y).
#[derive(Debug)]
struct SigmoidBackward {
    input: Tensor,
    output: Arc<Vec<f32>>,
}

impl BackwardOp for SigmoidBackward {
    fn backward(&self, grad_output: &Tensor) -> Result<Vec<Tensor>, DigitGanError> {
        let (grad, shape, _) = grad_output.snapshot();
        let data = grad
            .iter()
            .zip(self.output.iter())
            .map(|(&g, &y)| g * y * (1.0 - y))
            .collect();
        Ok(vec![Tensor::new(data, shape)?])
    }

    fn inputs(&self) -> Vec<Tensor> {
        vec![self.input.clone()]
    }
}

/// Numerically stable logistic function.
fn sigmoid(x: f32) -> f32 {
    if x >= 0.0 {
        1.0 / (1.0 + (-x).exp())
    } else {
        let e = x.exp();
        e / (1.0 + e)
    }
}

/// Logistic sigmoid, element-wise. Output lies in [0, 1].
pub fn sigmoid_op(a: &Tensor) -> Result<Tensor, DigitGanError> {
    crate::ops::apply_unary_op(
        a,
        sigmoid,
        |input, output| Arc::new(SigmoidBackward { input, output }),
        "sigmoid_op",
    )
}
