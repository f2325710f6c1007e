// digitgan-core/src/ops/reduction/mean.rs

use super::sum::FullReduceBackward;
use crate::error::DigitGanError;
use crate::ops::set_grad_fn;
use crate::tensor::Tensor;
use std::sync::Arc;

/// Mean of all elements as a scalar (rank 0) tensor.
///
/// # Errors
/// Returns `DigitGanError::ShapeMismatch` for an empty tensor.
pub fn mean_op(a: &Tensor) -> Result<Tensor, DigitGanError> {
    let (data, shape, requires_grad) = a.snapshot();
    if data.is_empty() {
        return Err(DigitGanError::ShapeMismatch {
            expected: vec![1],
            actual: shape,
            operation: "mean_op (empty tensor)".to_string(),
        });
    }
    let n = data.len() as f32;
    let output = Tensor::scalar(data.iter().sum::<f32>() / n);
    if requires_grad {
        set_grad_fn(
            &output,
            Arc::new(FullReduceBackward {
                input: a.clone(),
                input_shape: shape,
                scale: 1.0 / n,
            }),
        );
    }
    Ok(output)
}
