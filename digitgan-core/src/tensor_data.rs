// src/tensor_data.rs
use std::fmt::Debug;
use std::sync::Arc;

use crate::autograd::BackwardOp;
use crate::error::DigitGanError;
use crate::tensor::Tensor;

/// Internal storage and metadata for a Tensor.
///
/// Holds the contiguous row-major `f32` buffer, the shape and the autograd
/// bookkeeping. It is wrapped in `Arc<RwLock<TensorData>>` by [`Tensor`] so
/// that graph nodes, parameters and optimizers can share it.
#[derive(Debug)]
pub struct TensorData {
    /// Flattened element buffer. Wrapped in an `Arc` so `detach()` can share it.
    pub(crate) buffer: Arc<Vec<f32>>,
    /// The shape (dimensions) of the tensor. An empty shape is a scalar.
    pub(crate) shape: Vec<usize>,

    // --- Autograd Metadata ---
    /// Flag indicating if the tensor requires gradient computation.
    pub(crate) requires_grad: bool,
    /// Accumulated gradient. Only populated on leaf tensors.
    pub(crate) grad: Option<Tensor>,
    /// The operation that produced this tensor. `None` for leaves.
    pub(crate) grad_fn: Option<Arc<dyn BackwardOp>>,
    /// Set once a backward pass without `retain_graph` freed this node's `grad_fn`.
    pub(crate) graph_released: bool,
}

impl TensorData {
    /// Creates a new `TensorData` from a flat buffer and a shape.
    ///
    /// # Errors
    /// Returns `DigitGanError::TensorCreationError` if the length of `data_vec`
    /// does not match the number of elements described by `shape`.
    pub fn new(data_vec: Vec<f32>, shape: Vec<usize>) -> Result<Self, DigitGanError> {
        let numel: usize = shape.iter().product();
        let data_len = data_vec.len();
        if data_len != numel {
            return Err(DigitGanError::TensorCreationError { data_len, shape });
        }
        Ok(TensorData {
            buffer: Arc::new(data_vec),
            shape,
            requires_grad: false,
            grad: None,
            grad_fn: None,
            graph_released: false,
        })
    }

    /// Number of elements.
    pub fn numel(&self) -> usize {
        self.shape.iter().product()
    }

    /// Read-only view of the element buffer.
    pub fn data(&self) -> &[f32] {
        self.buffer.as_slice()
    }

    /// Mutable view of the element buffer (copy-on-write if the buffer is shared).
    pub(crate) fn data_mut(&mut self) -> &mut [f32] {
        Arc::make_mut(&mut self.buffer).as_mut_slice()
    }

    pub fn is_leaf(&self) -> bool {
        self.grad_fn.is_none() && !self.graph_released
    }
}
