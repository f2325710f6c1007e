//! Parameter initialisation schemes.

use crate::error::DigitGanError;
use crate::tensor::Tensor;
use rand::distributions::{Distribution, Uniform};
use rand::Rng;

/// Returns `(fan_in, fan_out)` for a weight of shape `[out, in]` (or `[n]`).
pub fn calculate_fan_in_and_fan_out(shape: &[usize]) -> Result<(usize, usize), DigitGanError> {
    match shape {
        [n] => Ok((*n, *n)),
        [fan_out, fan_in] => Ok((*fan_in, *fan_out)),
        _ => Err(DigitGanError::RankMismatch {
            expected: 2,
            actual: shape.len(),
            operation: "calculate_fan_in_and_fan_out".to_string(),
        }),
    }
}

/// Fills `tensor` in place with values drawn from `U(low, high)`.
///
/// Allowed on leaf parameters: initialisation is not a tracked operation.
pub fn uniform_<R: Rng + ?Sized>(
    tensor: &Tensor,
    low: f32,
    high: f32,
    rng: &mut R,
) -> Result<(), DigitGanError> {
    if low.is_nan() || high.is_nan() || low >= high {
        return Err(DigitGanError::ConfigurationError(format!(
            "uniform_ requires low < high, got [{}, {})",
            low, high
        )));
    }
    let dist = Uniform::new(low, high);
    let mut guard = tensor.write_data();
    for v in guard.data_mut().iter_mut() {
        *v = dist.sample(rng);
    }
    Ok(())
}

/// Default initialisation of a linear layer's weight and bias:
/// `U(-1/sqrt(fan_in), 1/sqrt(fan_in))`.
pub fn linear_bound(fan_in: usize) -> f32 {
    1.0 / (fan_in.max(1) as f32).sqrt()
}

#[cfg(test)]
#[path = "init_test.rs"]
mod tests;
