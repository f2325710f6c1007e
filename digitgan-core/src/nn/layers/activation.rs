//! Parameter-free activation layers.

use crate::error::DigitGanError;
use crate::nn::module::Module;
use crate::nn::parameter::Parameter;
use crate::ops::activation::{leaky_relu_op, sigmoid_op, tanh_op};
use crate::tensor::Tensor;

/// `LeakyReLU(x) = max(0, x) + negative_slope * min(0, x)`.
#[derive(Debug, Clone)]
pub struct LeakyReLU {
    negative_slope: f32,
}

impl LeakyReLU {
    pub fn new(negative_slope: f32) -> Self {
        LeakyReLU { negative_slope }
    }

    pub fn negative_slope(&self) -> f32 {
        self.negative_slope
    }
}

impl Default for LeakyReLU {
    fn default() -> Self {
        LeakyReLU::new(0.01)
    }
}

impl Module for LeakyReLU {
    fn forward(&self, input: &Tensor) -> Result<Tensor, DigitGanError> {
        leaky_relu_op(input, self.negative_slope)
    }

    fn parameters(&self) -> Vec<Parameter> {
        Vec::new()
    }

    fn named_parameters(&self) -> Vec<(String, Parameter)> {
        Vec::new()
    }
}

/// Element-wise hyperbolic tangent.
#[derive(Debug, Clone, Default)]
pub struct Tanh;

impl Module for Tanh {
    fn forward(&self, input: &Tensor) -> Result<Tensor, DigitGanError> {
        tanh_op(input)
    }

    fn parameters(&self) -> Vec<Parameter> {
        Vec::new()
    }

    fn named_parameters(&self) -> Vec<(String, Parameter)> {
        Vec::new()
    }
}

/// Element-wise logistic sigmoid.
#[derive(Debug, Clone, Default)]
pub struct Sigmoid;

impl Module for Sigmoid {
    fn forward(&self, input: &Tensor) -> Result<Tensor, DigitGanError> {
        sigmoid_op(input)
    }

    fn parameters(&self) -> Vec<Parameter> {
        Vec::new()
    }

    fn named_parameters(&self) -> Vec<(String, Parameter)> {
        Vec::new()
    }
}
