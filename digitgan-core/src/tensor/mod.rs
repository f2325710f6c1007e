// src/tensor/mod.rs

use crate::autograd::graph::NodeId;
use crate::error::DigitGanError;
use crate::tensor_data::TensorData;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

mod autograd_methods;
pub mod broadcast_utils;
pub mod create;
mod debug;

// Re-export creation functions to make them public
pub use create::{full, ones, ones_like, rand_uniform, randn, zeros, zeros_like};

/// Represents a multi-dimensional array of `f32` values living on the CPU.
///
/// `Tensor` uses `Arc<RwLock<TensorData>>` internally to allow for:
/// 1.  **Shared Ownership:** cloning a `Tensor` is cheap and every clone points
///     to the same data, gradient and graph node.
/// 2.  **Interior Mutability:** autograd metadata (`requires_grad`, `grad`)
///     and, for optimizers, the buffer itself can be updated through a shared
///     reference.
pub struct Tensor {
    /// Arc for shared ownership, RwLock for interior mutability of TensorData.
    pub(crate) data: Arc<RwLock<TensorData>>,
}

impl Tensor {
    /// Creates a new Tensor from a flat, row-major buffer and a shape.
    ///
    /// # Errors
    /// Returns `DigitGanError::TensorCreationError` if `data.len()` does not
    /// match the number of elements of `shape`.
    pub fn new(data: Vec<f32>, shape: Vec<usize>) -> Result<Self, DigitGanError> {
        let tensor_data = TensorData::new(data, shape)?;
        Ok(Tensor::from_tensor_data(tensor_data))
    }

    /// Creates a scalar (rank 0) tensor.
    pub fn scalar(value: f32) -> Self {
        Tensor::from_tensor_data(TensorData {
            buffer: Arc::new(vec![value]),
            shape: Vec::new(),
            requires_grad: false,
            grad: None,
            grad_fn: None,
            graph_released: false,
        })
    }

    pub(crate) fn from_tensor_data(tensor_data: TensorData) -> Self {
        Tensor {
            data: Arc::new(RwLock::new(tensor_data)),
        }
    }

    /// Acquires a read lock on the underlying `TensorData`.
    pub fn read_data(&self) -> RwLockReadGuard<'_, TensorData> {
        self.data.read().expect("RwLock poisoned")
    }

    /// Acquires a write lock on the underlying `TensorData`.
    pub fn write_data(&self) -> RwLockWriteGuard<'_, TensorData> {
        self.data.write().expect("RwLock poisoned")
    }

    /// Returns the shape of the tensor.
    pub fn shape(&self) -> Vec<usize> {
        self.read_data().shape.clone()
    }

    /// Returns the number of dimensions.
    pub fn rank(&self) -> usize {
        self.read_data().shape.len()
    }

    /// Returns the total number of elements.
    pub fn numel(&self) -> usize {
        self.read_data().numel()
    }

    /// Returns a copy of the element buffer.
    pub fn get_f32_data(&self) -> Vec<f32> {
        self.read_data().data().to_vec()
    }

    /// Returns the value of a single-element tensor.
    ///
    /// # Errors
    /// Returns `DigitGanError::ShapeMismatch` if the tensor has more than one element.
    pub fn item(&self) -> Result<f32, DigitGanError> {
        let guard = self.read_data();
        if guard.numel() != 1 {
            return Err(DigitGanError::ShapeMismatch {
                expected: vec![],
                actual: guard.shape.clone(),
                operation: "item".to_string(),
            });
        }
        Ok(guard.data()[0])
    }

    /// Shared buffer, shape and `requires_grad`, read under a single short-lived lock.
    pub(crate) fn snapshot(&self) -> (Arc<Vec<f32>>, Vec<usize>, bool) {
        let guard = self.read_data();
        (
            Arc::clone(&guard.buffer),
            guard.shape.clone(),
            guard.requires_grad,
        )
    }

    /// Stable identity of the underlying node, used as key by the autograd graph.
    pub(crate) fn node_id(&self) -> NodeId {
        Arc::as_ptr(&self.data)
    }

    /// Returns true if both handles point to the same storage node.
    pub fn ptr_eq(&self, other: &Tensor) -> bool {
        Arc::ptr_eq(&self.data, &other.data)
    }
}

// Manual implementation of Clone: clones the Arc, not the TensorData
impl Clone for Tensor {
    fn clone(&self) -> Self {
        Tensor {
            data: Arc::clone(&self.data),
        }
    }
}

#[cfg(test)]
#[path = "tensor_test.rs"]
mod tests;
