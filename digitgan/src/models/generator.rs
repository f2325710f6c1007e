use crate::config::GanConfig;
use digitgan_core::model::Sequential;
use digitgan_core::nn::{LeakyReLU, Linear, Module, Parameter, Tanh};
use digitgan_core::{DigitGanError, Tensor};
use rand::Rng;

/// Maps noise `[batch, noise_dim]` to images `[batch, image_dim]` in [-1, 1].
///
/// `Linear(noise_dim, hidden) -> LeakyReLU -> Linear(hidden, image_dim) -> Tanh`
#[derive(Debug)]
pub struct Generator {
    net: Sequential,
    noise_dim: usize,
    image_dim: usize,
}

impl Generator {
    pub fn new<R: Rng + ?Sized>(config: &GanConfig, rng: &mut R) -> Result<Self, DigitGanError> {
        let mut net = Sequential::new();
        net.add_module(
            "linear1",
            Box::new(Linear::new(config.noise_dim, config.generator_hidden, true, rng)?),
        );
        net.add_module("relu", Box::new(LeakyReLU::new(config.leaky_slope)));
        net.add_module(
            "linear2",
            Box::new(Linear::new(config.generator_hidden, config.image_dim, true, rng)?),
        );
        net.add_module("tanh", Box::new(Tanh));
        Ok(Generator {
            net,
            noise_dim: config.noise_dim,
            image_dim: config.image_dim,
        })
    }

    pub fn noise_dim(&self) -> usize {
        self.noise_dim
    }

    pub fn image_dim(&self) -> usize {
        self.image_dim
    }
}

impl Module for Generator {
    fn forward(&self, noise: &Tensor) -> Result<Tensor, DigitGanError> {
        self.net.forward(noise)
    }

    fn parameters(&self) -> Vec<Parameter> {
        self.net.parameters()
    }

    fn named_parameters(&self) -> Vec<(String, Parameter)> {
        self.net.named_parameters()
    }

    fn children(&self) -> Vec<&dyn Module> {
        vec![&self.net as &dyn Module]
    }
}
