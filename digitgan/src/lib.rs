//! # digitgan
//!
//! A basic generative adversarial network trained on MNIST-style digits:
//! a [`Generator`] maps noise to flattened 28×28 images, a
//! [`Discriminator`] scores images as real or synthetic, and the
//! [`GanTrainer`] alternates their Adam updates batch by batch.

pub mod config;
pub mod models;
pub mod trainer;

pub use config::GanConfig;
pub use models::{Discriminator, Generator};
pub use trainer::{format_epoch_line, EpochRecord, GanTrainer, StepLosses, TrainingHistory};
