// digitgan-core/src/ops/linalg/matmul.rs

use crate::autograd::BackwardOp;
use crate::error::DigitGanError;
use crate::ops::set_grad_fn;
use crate::tensor::Tensor;
use std::sync::Arc;

use super::transpose::transpose_kernel;

// --- Kernel ---

/// Row-major `[m, k] x [k, n]` product.
pub(crate) fn matmul_kernel(a: &[f32], b: &[f32], m: usize, k: usize, n: usize) -> Vec<f32> {
    let mut out = vec![0.0f32; m * n];
    for i in 0..m {
        let out_row = &mut out[i * n..(i + 1) * n];
        for p in 0..k {
            let a_ip = a[i * k + p];
            let b_row = &b[p * n..(p + 1) * n];
            for (o, &b_pj) in out_row.iter_mut().zip(b_row) {
                *o += a_ip * b_pj;
            }
        }
    }
    out
}

// --- MatmulBackward Definition ---

/// Backward pass structure for 2-D matrix multiplication `C = A @ B`.
///
/// dL/dA = dL/dC @ B^T and dL/dB = A^T @ dL/dC.
#[derive(Debug)]
struct MatmulBackward {
    a: Tensor,
    b: Tensor,
    m: usize,
    k: usize,
    n: usize,
}

impl BackwardOp for MatmulBackward {
    fn backward(&self, grad_output: &Tensor) -> Result<Vec<Tensor>, DigitGanError> {
        let (m, k, n) = (self.m, self.k, self.n);
        let (grad, _, _) = grad_output.snapshot();
        let (a_data, _, _) = self.a.snapshot();
        let (b_data, _, _) = self.b.snapshot();

        let b_t = transpose_kernel(&b_data, k, n);
        let grad_a = matmul_kernel(&grad, &b_t, m, n, k);

        let a_t = transpose_kernel(&a_data, m, k);
        let grad_b = matmul_kernel(&a_t, &grad, k, m, n);

        Ok(vec![
            Tensor::new(grad_a, vec![m, k])?,
            Tensor::new(grad_b, vec![k, n])?,
        ])
    }

    fn inputs(&self) -> Vec<Tensor> {
        vec![self.a.clone(), self.b.clone()]
    }
}

// --- matmul_op Implementation ---

/// Matrix multiplication of two 2-D tensors: `[m, k] @ [k, n] -> [m, n]`.
///
/// # Errors
/// * `RankMismatch` if either input is not 2-D.
/// * `IncompatibleShapes` if the inner dimensions differ.
pub fn matmul_op(a: &Tensor, b: &Tensor) -> Result<Tensor, DigitGanError> {
    let (a_data, a_shape, a_requires_grad) = a.snapshot();
    let (b_data, b_shape, b_requires_grad) = b.snapshot();

    for shape in [&a_shape, &b_shape] {
        if shape.len() != 2 {
            return Err(DigitGanError::RankMismatch {
                expected: 2,
                actual: shape.len(),
                operation: "matmul_op".to_string(),
            });
        }
    }
    let (m, k) = (a_shape[0], a_shape[1]);
    let (k2, n) = (b_shape[0], b_shape[1]);
    if k != k2 {
        return Err(DigitGanError::IncompatibleShapes {
            shape1: a_shape,
            shape2: b_shape,
        });
    }

    let output = Tensor::new(matmul_kernel(&a_data, &b_data, m, k, n), vec![m, n])?;
    if a_requires_grad || b_requires_grad {
        set_grad_fn(
            &output,
            Arc::new(MatmulBackward {
                a: a.clone(),
                b: b.clone(),
                m,
                k,
                n,
            }),
        );
    }
    Ok(output)
}

#[cfg(test)]
#[path = "matmul_test.rs"]
mod tests;
