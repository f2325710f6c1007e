pub mod activation;
pub mod linear;
