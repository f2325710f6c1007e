use crate::tensor::Tensor;
use std::fmt;
use std::ops::Deref;

/// A learnable tensor owned by a [`Module`](crate::nn::Module).
///
/// A `Parameter` is always a leaf with `requires_grad = true`. Cloning it is
/// cheap and the clone shares the same storage, which is how a network and
/// its optimizer see the same weights.
#[derive(Clone)]
pub struct Parameter {
    tensor: Tensor,
    name: Option<String>,
}

impl Parameter {
    /// Wraps `tensor` as a parameter.
    ///
    /// The tensor is detached from any graph it belongs to and marked as
    /// requiring gradients.
    pub fn new(tensor: Tensor, name: Option<String>) -> Self {
        let tensor = if tensor.is_leaf() { tensor } else { tensor.detach() };
        tensor.write_data().requires_grad = true;
        Parameter { tensor, name }
    }

    /// Creates a parameter without a name.
    pub fn new_unnamed(tensor: Tensor) -> Self {
        Parameter::new(tensor, None)
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn set_name(&mut self, name: String) {
        self.name = Some(name);
    }

    pub fn tensor(&self) -> &Tensor {
        &self.tensor
    }
}

// Allow accessing the underlying Tensor immutably via Deref.
impl Deref for Parameter {
    type Target = Tensor;

    fn deref(&self) -> &Self::Target {
        &self.tensor
    }
}

impl fmt::Debug for Parameter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Parameter")
            .field("name", &self.name)
            .field("shape", &self.tensor.shape())
            .finish()
    }
}

#[cfg(test)]
#[path = "parameter_test.rs"]
mod tests;
