use thiserror::Error;

/// Custom error type for the DigitGAN crates.
///
/// Every fallible operation in `digitgan-core`, `digitgan-data` and the
/// application crate reports one of these variants. Failures are not
/// recovered from: they propagate up to the caller (and ultimately `main`).
#[derive(Error, Debug)]
pub enum DigitGanError {
    #[error("Shape mismatch: expected {expected:?}, got {actual:?} during operation {operation}")]
    ShapeMismatch {
        expected: Vec<usize>,
        actual: Vec<usize>,
        operation: String,
    },

    #[error("Rank mismatch: expected {expected}, got {actual} during operation {operation}")]
    RankMismatch {
        expected: usize,
        actual: usize,
        operation: String,
    },

    #[error("Cannot broadcast shapes: {shape1:?} and {shape2:?}")]
    BroadcastError {
        shape1: Vec<usize>,
        shape2: Vec<usize>,
    },

    #[error("Incompatible shapes for operation: {shape1:?} and {shape2:?}")]
    IncompatibleShapes {
        shape1: Vec<usize>,
        shape2: Vec<usize>,
    },

    #[error("Index out of bounds: index {index:?} for shape {shape:?}")]
    IndexOutOfBounds {
        index: Vec<usize>,
        shape: Vec<usize>,
    },

    #[error("Tensor creation error: data length {data_len} does not match shape {shape:?}")]
    TensorCreationError { data_len: usize, shape: Vec<usize> },

    #[error("Operation requires tensor to require grad, but it doesn't.")]
    RequiresGradNotMet,

    #[error("Cannot set requires_grad on a non-leaf tensor. Use detach() first.")]
    RequiresGradOnNonLeaf,

    #[error("Backward called on non-scalar tensor.")]
    BackwardNonScalar,

    #[error("Trying to backward through a graph that has already been released. Pass retain_graph = true on the first backward call.")]
    GraphReleased,

    #[error("Backward error: {0}")]
    BackwardError(String),

    #[error("Configuration error: {0}")]
    ConfigurationError(String),

    #[error("Invalid dataset: {0}")]
    DatasetError(String),

    #[error("Internal error: {0}")]
    InternalError(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience alias used throughout the workspace.
pub type Result<T> = std::result::Result<T, DigitGanError>;
