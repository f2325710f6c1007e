// digitgan-core/src/ops/activation/leaky_relu.rs

use crate::autograd::BackwardOp;
use crate::error::DigitGanError;
use crate::tensor::Tensor;
use std::sync::Arc;

// --- LeakyReluBackward Definition ---

/// Backward pass for `LeakyReLU(x) = x if x > 0 else slope * x`.
///
/// The local derivative is 1 for positive inputs and `negative_slope`
/// otherwise (the subgradient at 0 is taken as `negative_slope`).
#[derive(Debug)]
struct LeakyReluBackward {
    input: Tensor,
    negative_slope: f32,
}

impl BackwardOp for LeakyReluBackward {
    fn backward(&self, grad_output: &Tensor) -> Result<Vec<Tensor>, DigitGanError> {
        let (grad, shape, _) = grad_output.snapshot();
        let (x, _, _) = self.input.snapshot();
        let slope = self.negative_slope;
        let data = grad
            .iter()
            .zip(x.iter())
            .map(|(&g, &x)| if x > 0.0 { g } else { g * slope })
            .collect();
        Ok(vec![Tensor::new(data, shape)?])
    }

    fn inputs(&self) -> Vec<Tensor> {
        vec![self.input.clone()]
    }
}

// --- leaky_relu_op Implementation ---

/// Applies the leaky rectified linear unit element-wise.
pub fn leaky_relu_op(a: &Tensor, negative_slope: f32) -> Result<Tensor, DigitGanError> {
    crate::ops::apply_unary_op(
        a,
        |x| if x > 0.0 { x } else { negative_slope * x },
        move |input, _| {
            Arc::new(LeakyReluBackward {
                input,
                negative_slope,
            })
        },
        "leaky_relu_op",
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::autograd::grad_check::check_grad;
    use crate::utils::testing::{check_tensor_near, create_test_tensor, create_test_tensor_with_grad};

    #[test]
    fn test_leaky_relu_forward() -> Result<(), DigitGanError> {
        let a = create_test_tensor(vec![-2.0, -0.5, 0.0, 0.5, 3.0], vec![5]);
        let y = leaky_relu_op(&a, 0.01)?;
        check_tensor_near(&y, &[5], &[-0.02, -0.005, 0.0, 0.5, 3.0], 1e-7);
        Ok(())
    }

    #[test]
    fn test_leaky_relu_backward_values() -> Result<(), DigitGanError> {
        let a = create_test_tensor_with_grad(vec![-1.0, 2.0], vec![2]);
        crate::ops::reduction::sum_op(&leaky_relu_op(&a, 0.1)?)?.backward()?;
        check_tensor_near(&a.grad().expect("grad"), &[2], &[0.1, 1.0], 1e-7);
        Ok(())
    }

    #[test]
    fn test_leaky_relu_grad_check() {
        // Keep inputs away from the kink at 0
        let a = create_test_tensor_with_grad(vec![-1.5, -0.4, 0.3, 2.2], vec![2, 2]);
        let output_grad = create_test_tensor(vec![1.0, -2.0, 0.5, 1.5], vec![2, 2]);
        let result = check_grad(|t| leaky_relu_op(&t[0], 0.01), &[a], &output_grad, 1e-2, 1e-2);
        assert!(result.is_ok(), "{:?}", result.err());
    }
}
