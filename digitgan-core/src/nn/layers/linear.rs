use crate::error::DigitGanError;
use crate::nn::init::{calculate_fan_in_and_fan_out, linear_bound, uniform_};
use crate::nn::module::Module;
use crate::nn::parameter::Parameter;
use crate::ops::arithmetic::add_op;
use crate::ops::linalg::{matmul_op, transpose_op};
use crate::tensor::{zeros, Tensor};
use rand::Rng;

/// Applies a linear transformation to the incoming data: `y = x W^T + b`.
///
/// `x` is `[batch, in_features]`, `W` is `[out_features, in_features]` and
/// `b` is `[out_features]`.
#[derive(Debug)]
pub struct Linear {
    weight: Parameter,
    bias: Option<Parameter>,
    in_features: usize,
    out_features: usize,
}

impl Linear {
    /// Creates a new Linear layer.
    ///
    /// Weight and bias are drawn from `U(-1/sqrt(in_features), 1/sqrt(in_features))`
    /// using `rng`.
    ///
    /// # Arguments
    /// * `in_features` - Size of each input sample.
    /// * `out_features` - Size of each output sample.
    /// * `has_bias` - If `true`, the layer will learn an additive bias.
    /// * `rng` - Random source for initialisation.
    pub fn new<R: Rng + ?Sized>(
        in_features: usize,
        out_features: usize,
        has_bias: bool,
        rng: &mut R,
    ) -> Result<Self, DigitGanError> {
        if in_features == 0 || out_features == 0 {
            return Err(DigitGanError::ConfigurationError(format!(
                "Linear layer needs non-zero features, got in={} out={}",
                in_features, out_features
            )));
        }
        let weight_shape = vec![out_features, in_features];
        let (fan_in, _) = calculate_fan_in_and_fan_out(&weight_shape)?;
        let bound = linear_bound(fan_in);

        let weight = Parameter::new(zeros(weight_shape)?, Some("weight".to_string()));
        uniform_(&weight, -bound, bound, rng)?;

        let bias = if has_bias {
            let bias = Parameter::new(zeros(vec![out_features])?, Some("bias".to_string()));
            uniform_(&bias, -bound, bound, rng)?;
            Some(bias)
        } else {
            None
        };

        Ok(Linear {
            weight,
            bias,
            in_features,
            out_features,
        })
    }

    pub fn weight(&self) -> &Parameter {
        &self.weight
    }

    pub fn bias(&self) -> Option<&Parameter> {
        self.bias.as_ref()
    }

    pub fn in_features(&self) -> usize {
        self.in_features
    }

    pub fn out_features(&self) -> usize {
        self.out_features
    }
}

impl Module for Linear {
    fn forward(&self, input: &Tensor) -> Result<Tensor, DigitGanError> {
        let shape = input.shape();
        if shape.len() != 2 || shape[1] != self.in_features {
            return Err(DigitGanError::ShapeMismatch {
                expected: vec![shape.first().copied().unwrap_or(0), self.in_features],
                actual: shape,
                operation: "Linear::forward".to_string(),
            });
        }
        let weight_t = transpose_op(&self.weight)?;
        let output = matmul_op(input, &weight_t)?;
        match &self.bias {
            Some(bias) => add_op(&output, bias),
            None => Ok(output),
        }
    }

    fn parameters(&self) -> Vec<Parameter> {
        let mut params = vec![self.weight.clone()];
        if let Some(bias) = &self.bias {
            params.push(bias.clone());
        }
        params
    }

    fn named_parameters(&self) -> Vec<(String, Parameter)> {
        let mut params = vec![("weight".to_string(), self.weight.clone())];
        if let Some(bias) = &self.bias {
            params.push(("bias".to_string(), bias.clone()));
        }
        params
    }
}

#[cfg(test)]
#[path = "linear_test.rs"]
mod tests;
