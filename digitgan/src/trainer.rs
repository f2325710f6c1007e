//! The adversarial training loop.

use crate::config::GanConfig;
use crate::models::{Discriminator, Generator};
use digitgan_core::nn::{BCELoss, Module};
use digitgan_core::ops::arithmetic::{add_op, mul_op_scalar};
use digitgan_core::ops::view::reshape_op;
use digitgan_core::optim::{AdamOptimizer, Optimizer};
use digitgan_core::tensor::{ones, randn, zeros};
use digitgan_core::{DigitGanError, Tensor};
use digitgan_data::{DataLoader, Dataset, ImageBatch, Sampler};
use log::{debug, info, warn};
use rand::rngs::StdRng;
use rand::SeedableRng;

/// Losses of one training step, both taken before their network's update.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StepLosses {
    /// `(BCE(D(real), 1) + BCE(D(fake), 0)) / 2`
    pub loss_d: f32,
    /// `BCE(D'(fake), 1)`, with `D'` the discriminator after its step.
    pub loss_g: f32,
}

/// Summary of one epoch.
#[derive(Debug, Clone, PartialEq)]
pub struct EpochRecord {
    pub epoch: usize,
    /// Losses of the first batch, the ones reported in the log.
    pub first_batch: StepLosses,
    pub mean_loss_d: f32,
    pub mean_loss_g: f32,
    pub batches: usize,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct TrainingHistory {
    pub epochs: Vec<EpochRecord>,
}

/// The per-epoch progress line logged by [`GanTrainer::fit`].
pub fn format_epoch_line(epoch: usize, losses: &StepLosses) -> String {
    format!(
        "Epoch: {} \t Discriminator Loss: {} Generator Loss: {}",
        epoch, losses.loss_d, losses.loss_g
    )
}

/// Owns both networks, their optimizers and the noise source.
#[derive(Debug)]
pub struct GanTrainer {
    config: GanConfig,
    generator: Generator,
    discriminator: Discriminator,
    opt_g: AdamOptimizer,
    opt_d: AdamOptimizer,
    criterion: BCELoss,
    rng: StdRng,
}

impl GanTrainer {
    /// Builds both networks (generator first) from `config.seed` and one
    /// Adam optimizer per network.
    pub fn new(config: GanConfig) -> Result<Self, DigitGanError> {
        config.validate()?;
        let mut rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let generator = Generator::new(&config, &mut rng)?;
        let discriminator = Discriminator::new(&config, &mut rng)?;
        let opt_g = AdamOptimizer::with_lr(generator.parameters(), config.learning_rate)?;
        let opt_d = AdamOptimizer::with_lr(discriminator.parameters(), config.learning_rate)?;
        debug!(
            "GAN built: generator {} parameters, discriminator {} parameters",
            generator.num_parameters(),
            discriminator.num_parameters()
        );
        Ok(GanTrainer {
            config,
            generator,
            discriminator,
            opt_g,
            opt_d,
            criterion: BCELoss::new(),
            rng,
        })
    }

    pub fn config(&self) -> &GanConfig {
        &self.config
    }

    pub fn generator(&self) -> &Generator {
        &self.generator
    }

    pub fn discriminator(&self) -> &Discriminator {
        &self.discriminator
    }

    /// Runs one discriminator update then one generator update on `real`
    /// (`[batch, image_dim]`), drawing a fresh noise batch.
    pub fn train_step(&mut self, real: &Tensor) -> Result<StepLosses, DigitGanError> {
        let batch = self.check_real_batch(real)?;
        let noise = randn(vec![batch, self.config.noise_dim], &mut self.rng)?;
        self.train_step_with_noise(real, &noise)
    }

    /// Same as [`train_step`](Self::train_step) with caller-provided noise
    /// `[batch, noise_dim]`.
    pub fn train_step_with_noise(
        &mut self,
        real: &Tensor,
        noise: &Tensor,
    ) -> Result<StepLosses, DigitGanError> {
        let batch = self.check_real_batch(real)?;
        let expected_noise = vec![batch, self.config.noise_dim];
        if noise.shape() != expected_noise {
            return Err(DigitGanError::ShapeMismatch {
                expected: expected_noise,
                actual: noise.shape(),
                operation: "GanTrainer::train_step_with_noise".to_string(),
            });
        }
        let real_labels = ones(vec![batch])?;
        let fake_labels = zeros(vec![batch])?;

        // --- Discriminator ---
        let fake = self.generator.forward(noise)?;
        let disc_real = reshape_op(&self.discriminator.forward(real)?, vec![batch])?;
        let loss_real = self.criterion.calculate(&disc_real, &real_labels)?;
        let disc_fake = reshape_op(&self.discriminator.forward(&fake)?, vec![batch])?;
        let loss_fake = self.criterion.calculate(&disc_fake, &fake_labels)?;
        let loss_d = mul_op_scalar(&add_op(&loss_real, &loss_fake)?, 0.5)?;

        self.opt_d.zero_grad();
        // `fake` is differentiated again by the generator loss
        loss_d.backward_with(true)?;
        self.opt_d.step()?;

        // --- Generator ---
        let disc_fake = reshape_op(&self.discriminator.forward(&fake)?, vec![batch])?;
        let loss_g = self.criterion.calculate(&disc_fake, &real_labels)?;

        self.opt_g.zero_grad();
        loss_g.backward()?;
        self.opt_g.step()?;

        Ok(StepLosses {
            loss_d: loss_d.item()?,
            loss_g: loss_g.item()?,
        })
    }

    /// Trains for `config.num_epochs` full passes over `loader`.
    ///
    /// The first batch of every epoch is logged at `info` level.
    ///
    /// # Errors
    /// Propagates loader and step errors. An epoch without any batch is a
    /// `DatasetError`.
    pub fn fit<D, S>(
        &mut self,
        loader: &DataLoader<D, S, ImageBatch>,
    ) -> Result<TrainingHistory, DigitGanError>
    where
        D: Dataset,
        S: Sampler,
    {
        let mut history = TrainingHistory::default();
        for epoch in 0..self.config.num_epochs {
            let mut first_batch = None;
            let (mut sum_d, mut sum_g, mut batches) = (0.0f64, 0.0f64, 0usize);

            for (id, batch) in loader.iter().enumerate() {
                let batch = batch?;
                let losses = self.train_step(&batch.images)?;
                if !losses.loss_d.is_finite() || !losses.loss_g.is_finite() {
                    warn!(
                        "Non-finite loss at epoch {} batch {}: D {} G {}",
                        epoch, id, losses.loss_d, losses.loss_g
                    );
                }
                debug!(
                    "epoch {} batch {} ({} samples): D {} G {}",
                    epoch,
                    id,
                    batch.batch_size(),
                    losses.loss_d,
                    losses.loss_g
                );
                if id == 0 {
                    info!("{}", format_epoch_line(epoch, &losses));
                    first_batch = Some(losses);
                }
                sum_d += losses.loss_d as f64;
                sum_g += losses.loss_g as f64;
                batches += 1;
            }

            let first_batch = first_batch.ok_or_else(|| {
                DigitGanError::DatasetError(format!("epoch {} produced no batches", epoch))
            })?;
            history.epochs.push(EpochRecord {
                epoch,
                first_batch,
                mean_loss_d: (sum_d / batches as f64) as f32,
                mean_loss_g: (sum_g / batches as f64) as f32,
                batches,
            });
        }
        Ok(history)
    }

    /// Generates `count` images `[count, image_dim]` from fresh noise,
    /// detached from any graph.
    pub fn sample(&mut self, count: usize) -> Result<Tensor, DigitGanError> {
        if count == 0 {
            return Err(DigitGanError::ConfigurationError(
                "sample count must be at least 1".to_string(),
            ));
        }
        let noise = randn(vec![count, self.config.noise_dim], &mut self.rng)?;
        Ok(self.generator.forward(&noise)?.detach())
    }

    fn check_real_batch(&self, real: &Tensor) -> Result<usize, DigitGanError> {
        let shape = real.shape();
        if shape.len() != 2 || shape[0] == 0 || shape[1] != self.config.image_dim {
            return Err(DigitGanError::ShapeMismatch {
                expected: vec![shape.first().copied().unwrap_or(0), self.config.image_dim],
                actual: shape,
                operation: "GanTrainer::train_step".to_string(),
            });
        }
        Ok(shape[0])
    }
}

#[cfg(test)]
#[path = "trainer_test.rs"]
mod tests;
