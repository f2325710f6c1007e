// digitgan-core/src/ops/arithmetic/sub.rs

use crate::autograd::BackwardOp;
use crate::error::DigitGanError;
use crate::tensor::broadcast_utils::reduce_to_shape;
use crate::tensor::Tensor;
use std::sync::Arc;

#[derive(Debug)]
struct SubBackward {
    a: Tensor,
    b: Tensor,
    a_shape: Vec<usize>,
    b_shape: Vec<usize>,
}

impl BackwardOp for SubBackward {
    fn backward(&self, grad_output: &Tensor) -> Result<Vec<Tensor>, DigitGanError> {
        let (grad, grad_shape, _) = grad_output.snapshot();
        let grad_a = reduce_to_shape(&grad, &grad_shape, &self.a_shape);
        let grad_b: Vec<f32> = reduce_to_shape(&grad, &grad_shape, &self.b_shape)
            .into_iter()
            .map(|g| -g)
            .collect();
        Ok(vec![
            Tensor::new(grad_a, self.a_shape.clone())?,
            Tensor::new(grad_b, self.b_shape.clone())?,
        ])
    }

    fn inputs(&self) -> Vec<Tensor> {
        vec![self.a.clone(), self.b.clone()]
    }
}

/// Element-wise subtraction with broadcasting: `a - b`.
pub fn sub_op(a: &Tensor, b: &Tensor) -> Result<Tensor, DigitGanError> {
    let a_shape = a.shape();
    let b_shape = b.shape();
    crate::ops::apply_binary_op(
        a,
        b,
        |x, y| x - y,
        move |a, b| {
            Arc::new(SubBackward {
                a,
                b,
                a_shape,
                b_shape,
            })
        },
        "sub_op",
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::autograd::grad_check::check_grad;
    use crate::utils::testing::{check_tensor_near, create_test_tensor, create_test_tensor_with_grad};

    #[test]
    fn test_sub_broadcast_forward() -> Result<(), DigitGanError> {
        let a = create_test_tensor(vec![5.0, 6.0, 7.0, 8.0], vec![2, 2]);
        let b = create_test_tensor(vec![1.0, 2.0], vec![2]);
        let c = sub_op(&a, &b)?;
        check_tensor_near(&c, &[2, 2], &[4.0, 4.0, 6.0, 6.0], 1e-6);
        assert!(!c.requires_grad());
        Ok(())
    }

    #[test]
    fn test_sub_backward() {
        let a = create_test_tensor_with_grad(vec![0.5, -1.0, 2.0, 0.25, 1.5, -0.75], vec![2, 3]);
        let b = create_test_tensor_with_grad(vec![0.1, 0.2, 0.3], vec![3]);
        let output_grad = create_test_tensor(vec![1.0, -0.5, 0.25, 2.0, 1.0, -1.0], vec![2, 3]);
        let result = check_grad(|t| sub_op(&t[0], &t[1]), &[a, b], &output_grad, 1e-2, 1e-2);
        assert!(result.is_ok(), "{:?}", result.err());
    }
}
