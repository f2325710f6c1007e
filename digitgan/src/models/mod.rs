pub mod discriminator;
pub mod generator;

pub use discriminator::Discriminator;
pub use generator::Generator;
