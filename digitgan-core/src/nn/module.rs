use crate::error::DigitGanError;
use crate::nn::Parameter;
use crate::tensor::Tensor;

/// The base trait for all neural network modules (layers, containers, networks).
pub trait Module: std::fmt::Debug + Send + Sync {
    /// Performs a forward pass of the module.
    fn forward(&self, input: &Tensor) -> Result<Tensor, DigitGanError>;

    /// Returns every learnable parameter of the module, sub-modules included.
    ///
    /// The returned `Parameter`s share storage with the module's own, so
    /// this list can be handed to an optimizer.
    fn parameters(&self) -> Vec<Parameter>;

    /// Same as [`parameters`](Self::parameters) with hierarchical names
    /// such as `"0.weight"` or `"hidden.bias"`.
    fn named_parameters(&self) -> Vec<(String, Parameter)>;

    /// Returns the direct child modules. Leaf layers have none.
    fn children(&self) -> Vec<&dyn Module> {
        Vec::new()
    }

    /// Total number of scalar parameters.
    fn num_parameters(&self) -> usize {
        self.parameters().iter().map(|p| p.numel()).sum()
    }
}
