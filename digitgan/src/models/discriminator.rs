use crate::config::GanConfig;
use digitgan_core::model::Sequential;
use digitgan_core::nn::{LeakyReLU, Linear, Module, Parameter, Sigmoid};
use digitgan_core::{DigitGanError, Tensor};
use rand::Rng;

/// Scores images `[batch, image_dim]` with the probability `[batch, 1]`
/// that each one is real.
///
/// `Linear(image_dim, hidden) -> LeakyReLU -> Linear(hidden, 1) -> Sigmoid`
#[derive(Debug)]
pub struct Discriminator {
    net: Sequential,
    image_dim: usize,
}

impl Discriminator {
    pub fn new<R: Rng + ?Sized>(config: &GanConfig, rng: &mut R) -> Result<Self, DigitGanError> {
        let mut net = Sequential::new();
        net.add_module(
            "linear1",
            Box::new(Linear::new(config.image_dim, config.discriminator_hidden, true, rng)?),
        );
        net.add_module("relu", Box::new(LeakyReLU::new(config.leaky_slope)));
        net.add_module(
            "linear2",
            Box::new(Linear::new(config.discriminator_hidden, 1, true, rng)?),
        );
        net.add_module("sigmoid", Box::new(Sigmoid));
        Ok(Discriminator {
            net,
            image_dim: config.image_dim,
        })
    }

    pub fn image_dim(&self) -> usize {
        self.image_dim
    }
}

impl Module for Discriminator {
    fn forward(&self, images: &Tensor) -> Result<Tensor, DigitGanError> {
        self.net.forward(images)
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
