// digitgan-core/src/optim/mod.rs

//! Optimizers for training neural networks.
//!
//! This module provides the `Optimizer` trait and the Adam algorithm used to
//! train both networks of the GAN.

pub mod adam;
pub mod optimizer_trait;

pub use adam::AdamOptimizer;
pub use optimizer_trait::Optimizer;
