pub mod binary_cross_entropy;

pub use binary_cross_entropy::binary_cross_entropy_op;
