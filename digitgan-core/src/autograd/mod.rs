//! Reverse-mode automatic differentiation.
//!
//! Every differentiable operation records a [`BackwardOp`] on its output.
//! `Tensor::backward` walks the resulting graph in reverse topological order
//! (see [`graph`]) and accumulates gradients into the leaves.

pub mod backward_op;
pub mod grad_check;
pub mod graph;

pub use backward_op::BackwardOp;
