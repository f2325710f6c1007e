// digitgan-core/src/ops/reduction/sum.rs

use crate::autograd::BackwardOp;
use crate::error::DigitGanError;
use crate::ops::set_grad_fn;
use crate::tensor::Tensor;
use std::sync::Arc;

/// Backward for a full reduction: the scalar upstream gradient, scaled by
/// `scale`, is broadcast back to every input element.
#[derive(Debug)]
pub(crate) struct FullReduceBackward {
    pub(crate) input: Tensor,
    pub(crate) input_shape: Vec<usize>,
    pub(crate) scale: f32,
}

impl BackwardOp for FullReduceBackward {
    fn backward(&self, grad_output: &Tensor) -> Result<Vec<Tensor>, DigitGanError> {
        let g = grad_output.item()? * self.scale;
        let numel: usize = self.input_shape.iter().product();
        Ok(vec![Tensor::new(vec![g; numel], self.input_shape.clone())?])
    }

    fn inputs(&self) -> Vec<Tensor> {
        vec![self.input.clone()]
    }
}

/// Sums all elements into a scalar (rank 0) tensor.
pub fn sum_op(a: &Tensor) -> Result<Tensor, DigitGanError> {
    let (data, shape, requires_grad) = a.snapshot();
    let total: f32 = data.iter().sum();
    let output = Tensor::scalar(total);
    if requires_grad {
        set_grad_fn(
            &output,
            Arc::new(FullReduceBackward {
                input: a.clone(),
                input_shape: shape,
                scale: 1.0,
            }),
        );
    }
    Ok(output)
}

#[cfg(test)]
#[path = "sum_test.rs"]
mod tests;
