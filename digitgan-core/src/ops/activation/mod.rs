pub mod leaky_relu;
pub mod sigmoid;
pub mod tanh;

pub use leaky_relu::leaky_relu_op;
pub use sigmoid::sigmoid_op;
pub use tanh::tanh_op;
