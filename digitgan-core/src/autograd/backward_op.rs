use crate::error::DigitGanError;
use crate::tensor::Tensor;
use std::fmt::Debug;

/// Defines the interface for the backward pass of a differentiable tensor operation.
///
/// Any operation that creates a non-leaf `Tensor` stores an implementation of
/// this trait in the output's `grad_fn`. It keeps whatever context from the
/// forward pass the chain rule needs (input handles, shapes, saved outputs).
///
/// The `Debug + Send + Sync` bounds let the graph live behind `Arc` inside a
/// `RwLock`-protected `TensorData`.
pub trait BackwardOp: Debug + Send + Sync {
    /// Computes dL/dInput_i for each input given dL/dOutput (`grad_output`).
    ///
    /// The returned gradients must be in the same order as [`inputs`](Self::inputs)
    /// and each must have the shape of its input. Returned tensors are plain
    /// values: they never carry a `grad_fn` of their own.
    fn backward(&self, grad_output: &Tensor) -> Result<Vec<Tensor>, DigitGanError>;

    /// Handles to the input nodes that took part in the forward operation.
    fn inputs(&self) -> Vec<Tensor>;
}
