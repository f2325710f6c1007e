pub mod bce;

pub use bce::BCELoss;
