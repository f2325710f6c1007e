// digitgan-core/src/ops/activation/tanh.rs

use crate::autograd::BackwardOp;
use crate::error::DigitGanError;
use crate::tensor::Tensor;
use std::sync::Arc;

/// Backward pass for `y = tanh(x)`: dy/dx = 1 - y^2, computed from the saved output.
#[derive(Debug)]
struct TanhBackward {
    input: Tensor,
    output: Arc<Vec<f32>>,
}

impl BackwardOp for TanhBackward {
    fn backward(&self, grad_output: &Tensor) -> Result<Vec<Tensor>, DigitGanError> {
        let (grad, shape, _) = grad_output.snapshot();
        let data = grad
            .iter()
            .zip(self.output.iter())
            .map(|(&g, &y)| g * (1.0 - y * y))
            .collect();
        Ok(vec![Tensor::new(data, shape)?])
    }

    fn inputs(&self) -> Vec<Tensor> {
        vec![self.input.clone()]
    }
}

/// Hyperbolic tangent, element-wise. Output lies in [-1, 1].
pub fn tanh_op(a: &Tensor) -> Result<Tensor, DigitGanError> {
    crate::ops::apply_unary_op(
        a,
        f32::tanh,
        |input, output| Arc::new(TanhBackward { input, output }),
        "tanh_op",
    )
}
