//! # Tensor Operations Module (`ops`)
//!
//! Differentiable operations, grouped by family. Each operation has a core
//! function named `xxx_op` that computes the forward result and, when any
//! input requires grad, attaches an `XxxBackward` struct implementing
//! [`BackwardOp`] to the output.
//!
//! ## Key Submodules:
//!
//! - [`arithmetic`]: broadcasting element-wise add, sub, mul, scalar mul.
//! - [`linalg`]: 2-D matmul and transpose.
//! - [`activation`]: leaky ReLU, tanh, sigmoid.
//! - [`reduction`]: sum and mean over all elements.
//! - [`view`]: reshape.
//! - [`loss`]: binary cross-entropy.

use crate::autograd::BackwardOp;
use crate::error::DigitGanError;
use crate::tensor::broadcast_utils::{broadcast_shapes, broadcast_strides, source_index};
use crate::tensor::Tensor;
use std::sync::Arc;

pub mod activation;
pub mod arithmetic;
pub mod linalg;
pub mod loss;
pub mod reduction;
pub mod view;

/// Marks `output` as produced by `grad_fn`.
pub(crate) fn set_grad_fn(output: &Tensor, grad_fn: Arc<dyn BackwardOp>) {
    let mut guard = output.write_data();
    guard.grad_fn = Some(grad_fn);
    guard.requires_grad = true;
}

/// Applies a unary element-wise operation to a tensor.
///
/// Handles output tensor creation and autograd setup. The backward builder
/// receives the input handle and the output buffer (activations such as
/// tanh and sigmoid differentiate through their own output).
///
/// # Arguments
/// * `a`: The input tensor.
/// * `op`: Element-wise function.
/// * `backward_builder`: Builds the `BackwardOp`, only called if `a` requires grad.
/// * `op_name`: Name of the operation, for logging.
pub(crate) fn apply_unary_op<F, B>(
    a: &Tensor,
    op: F,
    backward_builder: B,
    op_name: &str,
) -> Result<Tensor, DigitGanError>
where
    F: Fn(f32) -> f32,
    B: FnOnce(Tensor, Arc<Vec<f32>>) -> Arc<dyn BackwardOp>,
{
    let (output_data, output_shape, requires_grad) = {
        let guard = a.read_data();
        let data: Vec<f32> = guard.data().iter().map(|&x| op(x)).collect();
        (data, guard.shape.clone(), guard.requires_grad)
    };
    let output = Tensor::new(output_data, output_shape)?;

    if requires_grad {
        let saved_output = Arc::clone(&output.read_data().buffer);
        let grad_fn = backward_builder(a.clone(), saved_output);
        set_grad_fn(&output, grad_fn);
        log::trace!("{}: recorded backward node", op_name);
    }
    Ok(output)
}

/// Applies a binary element-wise operation with NumPy-style broadcasting.
///
/// # Errors
/// Returns `DigitGanError::BroadcastError` if the shapes cannot be broadcast.
pub(crate) fn apply_binary_op<F, B>(
    a: &Tensor,
    b: &Tensor,
    op: F,
    backward_builder: B,
    op_name: &str,
) -> Result<Tensor, DigitGanError>
where
    F: Fn(f32, f32) -> f32,
    B: FnOnce(Tensor, Tensor) -> Arc<dyn BackwardOp>,
{
    // Locks are taken one at a time so that `a` and `b` may be the same tensor
    let (a_buffer, a_shape, a_requires_grad) = a.snapshot();
    let (b_buffer, b_shape, b_requires_grad) = b.snapshot();
    let output_shape = broadcast_shapes(&a_shape, &b_shape)?;
    let requires_grad = a_requires_grad || b_requires_grad;

    let output_data: Vec<f32> = if a_shape == b_shape {
        a_buffer
            .iter()
            .zip(b_buffer.iter())
            .map(|(&x, &y)| op(x, y))
            .collect()
    } else {
        let a_strides = broadcast_strides(&a_shape, &output_shape);
        let b_strides = broadcast_strides(&b_shape, &output_shape);
        let numel: usize = output_shape.iter().product();
        (0..numel)
            .map(|i| {
                op(
                    a_buffer[source_index(i, &output_shape, &a_strides)],
                    b_buffer[source_index(i, &output_shape, &b_strides)],
                )
            })
            .collect()
    };
    let output = Tensor::new(output_data, output_shape)?;

    if requires_grad {
        let grad_fn = backward_builder(a.clone(), b.clone());
        set_grad_fn(&output, grad_fn);
        log::trace!("{}: recorded backward node", op_name);
    }
    Ok(output)
}
