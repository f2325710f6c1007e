// digitgan-core/src/ops/arithmetic/mul.rs

use crate::autograd::BackwardOp;
use crate::error::DigitGanError;
use crate::tensor::broadcast_utils::{expand_to, reduce_to_shape};
use crate::tensor::Tensor;
use std::sync::Arc;

// --- MulBackward Definition ---

/// Backward pass structure for broadcasting element-wise multiplication.
///
/// dL/da = dL/dz * b and dL/db = dL/dz * a, each reduced to its input shape.
#[derive(Debug)]
struct MulBackward {
    a: Tensor,
    b: Tensor,
}

impl BackwardOp for MulBackward {
    fn backward(&self, grad_output: &Tensor) -> Result<Vec<Tensor>, DigitGanError> {
        let (grad, grad_shape, _) = grad_output.snapshot();
        let (a_data, a_shape, _) = self.a.snapshot();
        let (b_data, b_shape, _) = self.b.snapshot();

        let a_expanded = expand_to(&a_data, &a_shape, &grad_shape);
        let b_expanded = expand_to(&b_data, &b_shape, &grad_shape);

        let grad_a_full: Vec<f32> = grad.iter().zip(&b_expanded).map(|(g, b)| g * b).collect();
        let grad_b_full: Vec<f32> = grad.iter().zip(&a_expanded).map(|(g, a)| g * a).collect();

        Ok(vec![
            Tensor::new(reduce_to_shape(&grad_a_full, &grad_shape, &a_shape), a_shape)?,
            Tensor::new(reduce_to_shape(&grad_b_full, &grad_shape, &b_shape), b_shape)?,
        ])
    }

    fn inputs(&self) -> Vec<Tensor> {
        vec![self.a.clone(), self.b.clone()]
    }
}

/// Element-wise multiplication with broadcasting: `a * b`.
pub fn mul_op(a: &Tensor, b: &Tensor) -> Result<Tensor, DigitGanError> {
    crate::ops::apply_binary_op(
        a,
        b,
        |x, y| x * y,
        |a, b| Arc::new(MulBackward { a, b }),
        "mul_op",
    )
}

// --- Scalar multiplication ---

#[derive(Debug)]
struct MulScalarBackward {
    input: Tensor,
    scalar: f32,
}

impl BackwardOp for MulScalarBackward {
    fn backward(&self, grad_output: &Tensor) -> Result<Vec<Tensor>, DigitGanError> {
        let (grad, shape, _) = grad_output.snapshot();
        let data = grad.iter().map(|g| g * self.scalar).collect();
        Ok(vec![Tensor::new(data, shape)?])
    }

    fn inputs(&self) -> Vec<Tensor> {
        vec![self.input.clone()]
    }
}

/// Multiplies every element by `scalar`.
///
/// The discriminator loss is built as `(loss_real + loss_fake) * 0.5`.
pub fn mul_op_scalar(a: &Tensor, scalar: f32) -> Result<Tensor, DigitGanError> {
    crate::ops::apply_unary_op(
        a,
        |x| x * scalar,
        move |input, _| Arc::new(MulScalarBackward { input, scalar }),
        "mul_op_scalar",
    )
}

#[cfg(test)]
#[path = "mul_test.rs"]
mod tests;
