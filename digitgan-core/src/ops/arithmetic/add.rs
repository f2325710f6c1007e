// digitgan-core/src/ops/arithmetic/add.rs

use crate::autograd::BackwardOp;
use crate::error::DigitGanError;
use crate::tensor::broadcast_utils::reduce_to_shape;
use crate::tensor::Tensor;
use std::sync::Arc;

// --- AddBackward Definition ---

/// Backward pass structure for broadcasting addition.
///
/// The gradient flows unchanged to both inputs, summed over the axes each
/// input was broadcast along.
#[derive(Debug)]
struct AddBackward {
    a: Tensor,
    b: Tensor,
    a_shape: Vec<usize>,
    b_shape: Vec<usize>,
}

impl BackwardOp for AddBackward {
    fn backward(&self, grad_output: &Tensor) -> Result<Vec<Tensor>, DigitGanError> {
        let (grad, grad_shape, _) = grad_output.snapshot();
        let grad_a = reduce_to_shape(&grad, &grad_shape, &self.a_shape);
        let grad_b = reduce_to_shape(&grad, &grad_shape, &self.b_shape);
        Ok(vec![
            Tensor::new(grad_a, self.a_shape.clone())?,
            Tensor::new(grad_b, self.b_shape.clone())?,
        ])
    }

    fn inputs(&self) -> Vec<Tensor> {
        vec![self.a.clone(), self.b.clone()]
    }
}

// --- add_op Implementation ---

/// Element-wise addition with broadcasting: `a + b`.
///
/// Used by `Linear` to add a `[out]` bias to a `[batch, out]` product.
///
/// # Errors
/// Returns `DigitGanError::BroadcastError` if the shapes are incompatible.
pub fn add_op(a: &Tensor, b: &Tensor) -> Result<Tensor, DigitGanError> {
    let a_shape = a.shape();
    let b_shape = b.shape();
    crate::ops::apply_binary_op(
        a,
        b,
        |x, y| x + y,
        move |a, b| {
            Arc::new(AddBackward {
                a,
                b,
                a_shape,
                b_shape,
            })
        },
        "add_op",
    )
}

/// Adds two tensors of identical shape without recording any graph.
///
/// Used for gradient accumulation.
pub(crate) fn add_values(a: &Tensor, b: &Tensor) -> Result<Tensor, DigitGanError> {
    let (a_buffer, a_shape, _) = a.snapshot();
    let (b_buffer, b_shape, _) = b.snapshot();
    if a_shape != b_shape {
        return Err(DigitGanError::ShapeMismatch {
            expected: a_shape,
            actual: b_shape,
            operation: "add_values".to_string(),
        });
    }
    let data = a_buffer
        .iter()
        .zip(b_buffer.iter())
        .map(|(&x, &y)| x + y)
        .collect();
    Tensor::new(data, a_shape)
}

#[cfg(test)]
#[path = "add_test.rs"]
mod tests;
