//! Neural network building blocks.

pub mod init;
pub mod layers;
pub mod losses;
pub mod module;
pub mod parameter;

pub use layers::activation::{LeakyReLU, Sigmoid, Tanh};
pub use layers::linear::Linear;
pub use losses::BCELoss;
pub use module::Module;
pub use parameter::Parameter;
