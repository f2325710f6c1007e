// src/tensor/autograd_methods.rs

use crate::autograd::graph::backward_pass;
use crate::autograd::BackwardOp;
use crate::error::DigitGanError;
use crate::ops::arithmetic::add::add_values;
use crate::tensor::Tensor;
use crate::tensor_data::TensorData;
use std::sync::Arc;

impl Tensor {
    /// Checks if the tensor requires gradient computation.
    pub fn requires_grad(&self) -> bool {
        self.read_data().requires_grad
    }

    /// Sets the `requires_grad` status of this tensor **in-place**.
    /// Only allowed on leaf tensors.
    pub fn requires_grad_(&self, requires_grad: bool) -> Result<(), DigitGanError> {
        let mut guard = self.write_data();
        if !guard.is_leaf() {
            return Err(DigitGanError::RequiresGradOnNonLeaf);
        }
        guard.requires_grad = requires_grad;
        Ok(())
    }

    /// Returns true if the tensor was not produced by a tracked operation.
    pub fn is_leaf(&self) -> bool {
        self.read_data().is_leaf()
    }

    /// Returns the operation node that produced this tensor, if any.
    pub fn grad_fn(&self) -> Option<Arc<dyn BackwardOp>> {
        self.read_data().grad_fn.clone()
    }

    /// Returns the accumulated gradient, if any.
    pub fn grad(&self) -> Option<Tensor> {
        self.read_data().grad.clone()
    }

    /// Adds `grad_to_add` to the accumulated gradient.
    ///
    /// # Errors
    /// Returns `DigitGanError::ShapeMismatch` if the shapes differ.
    pub fn acc_grad(&self, grad_to_add: Tensor) -> Result<(), DigitGanError> {
        let expected = self.shape();
        if grad_to_add.shape() != expected {
            return Err(DigitGanError::ShapeMismatch {
                expected,
                actual: grad_to_add.shape(),
                operation: "acc_grad".to_string(),
            });
        }
        let mut guard = self.write_data();
        let new_grad = match guard.grad.take() {
            Some(existing) => add_values(&existing, &grad_to_add)?,
            None => grad_to_add,
        };
        guard.grad = Some(new_grad);
        Ok(())
    }

    /// Resets the gradient of this tensor to `None`.
    pub fn zero_grad(&self) {
        self.write_data().grad = None;
    }

    /// Creates a new tensor that shares the same buffer but is detached
    /// from the computation graph.
    pub fn detach(&self) -> Tensor {
        let guard = self.read_data();
        Tensor::from_tensor_data(TensorData {
            buffer: Arc::clone(&guard.buffer),
            shape: guard.shape.clone(),
            requires_grad: false,
            grad: None,
            grad_fn: None,
            graph_released: false,
        })
    }

    /// Computes the gradients of this scalar w.r.t. the graph leaves and
    /// frees the graph afterwards.
    ///
    /// Equivalent to `backward_with(false)`.
    pub fn backward(&self) -> Result<(), DigitGanError> {
        self.backward_with(false)
    }

    /// Computes the gradients of this scalar w.r.t. the graph leaves.
    ///
    /// Gradients are *accumulated* into the `grad` of every leaf that
    /// requires grad. With `retain_graph = false` every traversed node is
    /// released and a second backward pass reaching it fails with
    /// `DigitGanError::GraphReleased`. Pass `true` when part of the graph
    /// (for example a generator output) is going to be differentiated again.
    ///
    /// # Errors
    /// * `RequiresGradNotMet` if the tensor does not require grad.
    /// * `BackwardNonScalar` if the tensor has more than one element.
    /// * `GraphReleased` if the graph was already freed.
    pub fn backward_with(&self, retain_graph: bool) -> Result<(), DigitGanError> {
        {
            let guard = self.read_data();
            if !guard.requires_grad {
                return Err(DigitGanError::RequiresGradNotMet);
            }
            if guard.numel() != 1 {
                return Err(DigitGanError::BackwardNonScalar);
            }
        }
        let initial_grad = Tensor::new(vec![1.0], self.shape())?;
        backward_pass(self, initial_grad, retain_graph)
    }
}

#[cfg(test)]
#[path = "autograd_methods_test.rs"]
mod tests;
