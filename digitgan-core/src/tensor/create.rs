// src/tensor/create.rs

use crate::error::DigitGanError;
use crate::tensor::Tensor;
use rand::distributions::{Distribution, Uniform};
use rand::Rng;
use rand_distr::StandardNormal;

/// Creates a tensor of the given shape filled with zeros.
pub fn zeros(shape: Vec<usize>) -> Result<Tensor, DigitGanError> {
    full(shape, 0.0)
}

/// Creates a tensor of the given shape filled with ones.
pub fn ones(shape: Vec<usize>) -> Result<Tensor, DigitGanError> {
    full(shape, 1.0)
}

/// Creates a tensor of the given shape filled with `value`.
pub fn full(shape: Vec<usize>, value: f32) -> Result<Tensor, DigitGanError> {
    let numel: usize = shape.iter().product();
    Tensor::new(vec![value; numel], shape)
}

/// Creates a tensor of zeros with the same shape as `tensor`.
pub fn zeros_like(tensor: &Tensor) -> Result<Tensor, DigitGanError> {
    zeros(tensor.shape())
}

/// Creates a tensor of ones with the same shape as `tensor`.
pub fn ones_like(tensor: &Tensor) -> Result<Tensor, DigitGanError> {
    ones(tensor.shape())
}

/// Creates a tensor with elements drawn i.i.d. from the standard normal distribution.
///
/// The caller supplies the random number generator so that runs seeded from
/// a single `StdRng` are reproducible.
pub fn randn<R: Rng + ?Sized>(shape: Vec<usize>, rng: &mut R) -> Result<Tensor, DigitGanError> {
    let numel: usize = shape.iter().product();
    let data: Vec<f32> = (0..numel).map(|_| StandardNormal.sample(rng)).collect();
    Tensor::new(data, shape)
}

/// Creates a tensor with elements drawn i.i.d. from `U(low, high)`.
///
/// # Errors
/// Returns `DigitGanError::ConfigurationError` if `low >= high`.
pub fn rand_uniform<R: Rng + ?Sized>(
    shape: Vec<usize>,
    low: f32,
    high: f32,
    rng: &mut R,
) -> Result<Tensor, DigitGanError> {
    if low.is_nan() || high.is_nan() || low >= high {
        return Err(DigitGanError::ConfigurationError(format!(
            "rand_uniform requires low < high, got [{}, {})",
            low, high
        )));
    }
    let dist = Uniform::new(low, high);
    let numel: usize = shape.iter().product();
    let data: Vec<f32> = (0..numel).map(|_| dist.sample(rng)).collect();
    Tensor::new(data, shape)
}

#[cfg(test)]
#[path = "create_test.rs"]
mod tests;
