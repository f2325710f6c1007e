// digitgan-core/src/ops/view/reshape.rs

use crate::autograd::BackwardOp;
use crate::error::DigitGanError;
use crate::ops::set_grad_fn;
use crate::tensor::Tensor;
use crate::tensor_data::TensorData;
use std::sync::Arc;

#[derive(Debug)]
struct ReshapeBackward {
    input: Tensor,
    input_shape: Vec<usize>,
}

impl BackwardOp for ReshapeBackward {
    fn backward(&self, grad_output: &Tensor) -> Result<Vec<Tensor>, DigitGanError> {
        let (grad, _, _) = grad_output.snapshot();
        Ok(vec![Tensor::new(grad.to_vec(), self.input_shape.clone())?])
    }

    fn inputs(&self) -> Vec<Tensor> {
        vec![self.input.clone()]
    }
}

/// Returns a tensor with the same elements and a new shape.
///
/// The element buffer is shared with the input, no data is copied.
/// Used to flatten the discriminator's `[batch, 1]` output to `[batch]`.
///
/// # Errors
/// Returns `DigitGanError::ShapeMismatch` if the element counts differ.
pub fn reshape_op(a: &Tensor, new_shape: Vec<usize>) -> Result<Tensor, DigitGanError> {
    let (buffer, shape, requires_grad) = a.snapshot();
    let new_numel: usize = new_shape.iter().product();
    if new_numel != buffer.len() {
        return Err(DigitGanError::ShapeMismatch {
            expected: shape,
            actual: new_shape,
            operation: "reshape_op (element count)".to_string(),
        });
    }
    let output = Tensor::from_tensor_data(TensorData {
        buffer,
        shape: new_shape,
        requires_grad: false,
        grad: None,
        grad_fn: None,
        graph_released: false,
    });
    if requires_grad {
        set_grad_fn(
            &output,
            Arc::new(ReshapeBackward {
                input: a.clone(),
                input_shape: shape,
            }),
        );
    }
    Ok(output)
}
