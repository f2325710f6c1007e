//! # digitgan-data
//!
//! Data loading for DigitGAN: the [`Dataset`] and [`Sampler`] traits, an
//! in-memory image dataset, the MNIST IDX reader and a restartable
//! [`DataLoader`] that collates samples into `[batch, image_dim]` tensors.

pub mod dataloader;
pub mod datasets;
pub mod samplers;

// Re-export main components
pub use dataloader::DataLoader;
pub use datasets::{Dataset, ImageBatch, ImageDataset, ImageSample};
pub use samplers::{RandomSampler, Sampler, SequentialSampler};
