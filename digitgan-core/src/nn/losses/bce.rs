// digitgan-core/src/nn/losses/bce.rs

use crate::error::DigitGanError;
use crate::ops::loss::binary_cross_entropy_op;
use crate::tensor::Tensor;

/// Binary cross-entropy between predicted probabilities and targets,
/// averaged over all elements.
///
/// `loss = -mean(t * ln(p) + (1 - t) * ln(1 - p))`, with each log term
/// clamped to `>= -100` so saturated predictions give a finite loss.
#[derive(Debug, Clone, Default)]
pub struct BCELoss;

impl BCELoss {
    pub fn new() -> Self {
        BCELoss
    }

    /// Computes the loss. `input` and `target` must have the same shape.
    ///
    /// The returned scalar is differentiable w.r.t. `input` only.
    pub fn calculate(&self, input: &Tensor, target: &Tensor) -> Result<Tensor, DigitGanError> {
        binary_cross_entropy_op(input, target)
    }
}
