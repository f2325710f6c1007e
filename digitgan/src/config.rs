use digitgan_core::DigitGanError;

/// Hyperparameters of a GAN run.
#[derive(Debug, Clone, PartialEq)]
pub struct GanConfig {
    /// Adam learning rate, shared by both networks.
    pub learning_rate: f32,
    /// Width of the latent noise vectors.
    pub noise_dim: usize,
    /// Width of a flattened image (28 * 28 for MNIST).
    pub image_dim: usize,
    pub batch_size: usize,
    pub num_epochs: usize,
    pub generator_hidden: usize,
    pub discriminator_hidden: usize,
    /// Negative slope of the LeakyReLU in both networks.
    pub leaky_slope: f32,
    /// Seed for initialisation and noise. `None` seeds from system entropy.
    pub seed: Option<u64>,
}

impl Default for GanConfig {
    fn default() -> Self {
        GanConfig {
            learning_rate: 3e-4,
            noise_dim: 32,
            image_dim: 28 * 28,
            batch_size: 32,
            num_epochs: 25,
            generator_hidden: 128,
            discriminator_hidden: 64,
            leaky_slope: 0.01,
            seed: None,
        }
    }
}

impl GanConfig {
    /// Checks that every size is non-zero and the learning rate is positive.
    pub fn validate(&self) -> Result<(), DigitGanError> {
        let sizes = [
            ("noise_dim", self.noise_dim),
            ("image_dim", self.image_dim),
            ("batch_size", self.batch_size),
            ("generator_hidden", self.generator_hidden),
            ("discriminator_hidden", self.discriminator_hidden),
        ];
        for (name, value) in sizes {
            if value == 0 {
                return Err(DigitGanError::ConfigurationError(format!(
                    "{} must be at least 1",
                    name
                )));
            }
        }
        if !self.learning_rate.is_finite() || self.learning_rate <= 0.0 {
            return Err(DigitGanError::ConfigurationError(format!(
                "learning_rate must be positive, got {}",
                self.learning_rate
            )));
        }
        if !self.leaky_slope.is_finite() {
            return Err(DigitGanError::ConfigurationError(
                "leaky_slope must be finite".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = GanConfig::default();
        assert_eq!(config.noise_dim, 32);
        assert_eq!(config.image_dim, 784);
        assert_eq!(config.batch_size, 32);
        assert_eq!(config.num_epochs, 25);
        assert_eq!(config.learning_rate, 3e-4);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let zero_batch = GanConfig {
            batch_size: 0,
            ..GanConfig::default()
        };
        assert!(matches!(
            zero_batch.validate(),
            Err(DigitGanError::ConfigurationError(_))
        ));
        let bad_lr = GanConfig {
            learning_rate: 0.0,
            ..GanConfig::default()
        };
        assert!(bad_lr.validate().is_err());
        let nan_lr = GanConfig {
            learning_rate: f32::NAN,
            ..GanConfig::default()
        };
        assert!(nan_lr.validate().is_err());
    }

    #[test]
    fn test_zero_epochs_is_valid() {
        let config = GanConfig {
            num_epochs: 0,
            ..GanConfig::default()
        };
        assert!(config.validate().is_ok());
    }
}
