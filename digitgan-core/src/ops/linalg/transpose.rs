// digitgan-core/src/ops/linalg/transpose.rs

use crate::autograd::BackwardOp;
use crate::error::DigitGanError;
use crate::ops::set_grad_fn;
use crate::tensor::Tensor;
use std::sync::Arc;

/// Transposes a row-major `[rows, cols]` buffer.
pub(crate) fn transpose_kernel(data: &[f32], rows: usize, cols: usize) -> Vec<f32> {
    let mut out = vec![0.0f32; rows * cols];
    for r in 0..rows {
        for c in 0..cols {
            out[c * rows + r] = data[r * cols + c];
        }
    }
    out
}

#[derive(Debug)]
struct TransposeBackward {
    input: Tensor,
    rows: usize,
    cols: usize,
}

impl BackwardOp for TransposeBackward {
    fn backward(&self, grad_output: &Tensor) -> Result<Vec<Tensor>, DigitGanError> {
        let (grad, _, _) = grad_output.snapshot();
        // grad_output is [cols, rows]
        let grad_input = transpose_kernel(&grad, self.cols, self.rows);
        Ok(vec![Tensor::new(grad_input, vec![self.rows, self.cols])?])
    }

    fn inputs(&self) -> Vec<Tensor> {
        vec![self.input.clone()]
    }
}

/// Swaps the two dimensions of a 2-D tensor. The result is a new contiguous tensor.
pub fn transpose_op(a: &Tensor) -> Result<Tensor, DigitGanError> {
    let (data, shape, requires_grad) = a.snapshot();
    if shape.len() != 2 {
        return Err(DigitGanError::RankMismatch {
            expected: 2,
            actual: shape.len(),
            operation: "transpose_op".to_string(),
        });
    }
    let (rows, cols) = (shape[0], shape[1]);
    let output = Tensor::new(transpose_kernel(&data, rows, cols), vec![cols, rows])?;
    if requires_grad {
        set_grad_fn(
            &output,
            Arc::new(TransposeBackward {
                input: a.clone(),
                rows,
                cols,
            }),
        );
    }
    Ok(output)
}
