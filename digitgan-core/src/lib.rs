//! # digitgan-core
//!
//! Minimal CPU tensor library backing DigitGAN: an `f32` [`Tensor`] with
//! reverse-mode automatic differentiation, the differentiable operations the
//! GAN needs (`ops`), neural network building blocks (`nn`, `model`) and the
//! Adam optimizer (`optim`).

pub mod autograd;
pub mod ops;
pub mod tensor;
pub mod tensor_data;

pub mod model;
pub mod nn;
pub mod optim;
pub mod utils;

pub mod error;

// Re-exports for `digitgan_core::Tensor` style paths
pub use error::{DigitGanError, Result};
pub use tensor::Tensor;
