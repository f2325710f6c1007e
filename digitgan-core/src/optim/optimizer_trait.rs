use crate::error::DigitGanError;

/// Trait defining the common interface for all optimizers.
///
/// An optimizer owns handles to a fixed set of parameters, chosen at
/// construction, and updates them in place from their accumulated gradients.
pub trait Optimizer {
    /// Performs a single optimization step.
    ///
    /// Parameters without a gradient are left untouched.
    fn step(&mut self) -> Result<(), DigitGanError>;

    /// Clears the gradients of all parameters managed by the optimizer.
    ///
    /// Parameters that belong to other optimizers are not affected.
    fn zero_grad(&mut self);
}
