use crate::error::DigitGanError;
use crate::ops::arithmetic::mul_op;
use crate::ops::reduction::sum_op;
use crate::tensor::Tensor;
use thiserror::Error;

/// Error type specifically for gradient checking failures.
#[derive(Error, Debug)]
pub enum GradCheckError {
    #[error("Gradient check failed for input tensor at index {input_index}, element index {element_index}: Analytical grad {analytical_grad:?} != Numerical grad {numerical_grad:?}. Difference: {difference:?}")]
    GradientMismatch {
        input_index: usize,
        element_index: usize,
        analytical_grad: f64,
        numerical_grad: f64,
        difference: f64,
    },
    #[error("Forward function execution failed during gradient check: {0}")]
    ForwardPassError(DigitGanError),
    #[error("Backward pass execution failed during gradient check: {0}")]
    BackwardPassError(DigitGanError),
    #[error("Tensor error during intermediate calculation: {0}")]
    TensorError(#[from] DigitGanError),
    #[error("Input tensor {input_index} requires grad but has no gradient after backward pass.")]
    MissingAnalyticalGrad { input_index: usize },
    #[error("Numerical gradient is NaN or infinite for input {input_index}, element {element_index}. Details: Loss+: {loss_plus:?}, Loss-: {loss_minus:?}")]
    NumericalGradNaNOrInfinite {
        input_index: usize,
        element_index: usize,
        loss_plus: f64,
        loss_minus: f64,
    },
    #[error("Gradient check input tensor must be a leaf node (no grad_fn). Input index: {input_index}")]
    InputNotLeaf { input_index: usize },
    #[error("Function did not propagate requires_grad correctly.")]
    RequiresGradPropagationError,
}

/// Checks analytical gradients against numerical gradients using central
/// finite differences.
///
/// The scalar objective is `sum(func(inputs) * output_grad)`, so the
/// analytical gradient of each input is the vector-Jacobian product of
/// `func` with `output_grad`. Every element of every input that requires
/// grad is perturbed by `±epsilon` and the two gradients must agree within
/// `tolerance * (1 + |numerical|)`.
///
/// Buffers are `f32`, so `epsilon` around `1e-2` and a tolerance of the same
/// order are appropriate.
pub fn check_grad<F>(
    func: F,
    inputs: &[Tensor],
    output_grad: &Tensor,
    epsilon: f64,
    tolerance: f64,
) -> Result<(), GradCheckError>
where
    F: Fn(&[Tensor]) -> Result<Tensor, DigitGanError>,
{
    // --- Initial Checks ---
    for (i, input) in inputs.iter().enumerate() {
        if input.requires_grad() && !input.is_leaf() {
            return Err(GradCheckError::InputNotLeaf { input_index: i });
        }
        input.zero_grad();
    }

    // --- 1. Analytical gradients ---
    let output = func(inputs).map_err(GradCheckError::ForwardPassError)?;
    let any_input_requires_grad = inputs.iter().any(|t| t.requires_grad());
    if any_input_requires_grad && !output.requires_grad() {
        return Err(GradCheckError::RequiresGradPropagationError);
    }
    if !output.requires_grad() {
        return Ok(());
    }
    let loss = sum_op(&mul_op(&output, output_grad)?)?;
    loss.backward().map_err(GradCheckError::BackwardPassError)?;

    let output_grad_data: Vec<f64> = output_grad
        .get_f32_data()
        .iter()
        .map(|&x| x as f64)
        .collect();
    let weighted_loss = |inputs: &[Tensor]| -> Result<f64, GradCheckError> {
        let out = func(inputs).map_err(GradCheckError::ForwardPassError)?;
        Ok(out
            .get_f32_data()
            .iter()
            .zip(&output_grad_data)
            .map(|(&o, &g)| o as f64 * g)
            .sum())
    };

    // --- 2. Numerical gradients, element by element ---
    for (i, input) in inputs.iter().enumerate() {
        if !input.requires_grad() {
            continue;
        }
        let analytical: Vec<f64> = match input.grad() {
            Some(grad) => grad.get_f32_data().iter().map(|&x| x as f64).collect(),
            None => return Err(GradCheckError::MissingAnalyticalGrad { input_index: i }),
        };

        for elem_idx in 0..input.numel() {
            let original = input.read_data().data()[elem_idx];

            input.write_data().data_mut()[elem_idx] = (original as f64 + epsilon) as f32;
            let loss_plus = weighted_loss(inputs);
            input.write_data().data_mut()[elem_idx] = (original as f64 - epsilon) as f32;
            let loss_minus = weighted_loss(inputs);
            input.write_data().data_mut()[elem_idx] = original;

            let (loss_plus, loss_minus) = (loss_plus?, loss_minus?);
            let numerical = (loss_plus - loss_minus) / (2.0 * epsilon);
            if !numerical.is_finite() {
                return Err(GradCheckError::NumericalGradNaNOrInfinite {
                    input_index: i,
                    element_index: elem_idx,
                    loss_plus,
                    loss_minus,
                });
            }
            let difference = (analytical[elem_idx] - numerical).abs();
            if difference > tolerance * (1.0 + numerical.abs()) {
                return Err(GradCheckError::GradientMismatch {
                    input_index: i,
                    element_index: elem_idx,
                    analytical_grad: analytical[elem_idx],
                    numerical_grad: numerical,
                    difference,
                });
            }
        }
    }
    Ok(())
}
