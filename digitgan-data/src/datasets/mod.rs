pub mod image_dataset;
pub mod mnist;
pub mod traits;

pub use image_dataset::{ImageBatch, ImageDataset, ImageSample};
pub use mnist::{load_mnist, MnistSplit};
pub use traits::Dataset;
