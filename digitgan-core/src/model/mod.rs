//! Containers composing `nn` modules into networks.

pub mod sequential;

pub use sequential::Sequential;
