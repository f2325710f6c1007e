use super::traits::Dataset;
use digitgan_core::{DigitGanError, Tensor};

/// One flattened image and its class label.
#[derive(Debug, Clone, PartialEq)]
pub struct ImageSample {
    pub pixels: Vec<f32>,
    pub label: u8,
}

/// A batch of images stacked into a `[batch, image_dim]` tensor.
///
/// Labels ride along but nothing in the GAN reads them.
#[derive(Debug, Clone)]
pub struct ImageBatch {
    pub images: Tensor,
    pub labels: Vec<u8>,
}

impl ImageBatch {
    /// Stacks `samples` row by row.
    ///
    /// # Errors
    /// * `DatasetError` if `samples` is empty.
    /// * `ShapeMismatch` if the samples do not all have the same width.
    pub fn collate(samples: Vec<ImageSample>) -> Result<ImageBatch, DigitGanError> {
        let width = match samples.first() {
            Some(first) => first.pixels.len(),
            None => {
                return Err(DigitGanError::DatasetError(
                    "cannot collate an empty batch".to_string(),
                ))
            }
        };
        let batch_size = samples.len();
        let mut data = Vec::with_capacity(batch_size * width);
        let mut labels = Vec::with_capacity(batch_size);
        for sample in samples {
            if sample.pixels.len() != width {
                return Err(DigitGanError::ShapeMismatch {
                    expected: vec![width],
                    actual: vec![sample.pixels.len()],
                    operation: "ImageBatch::collate".to_string(),
                });
            }
            data.extend_from_slice(&sample.pixels);
            labels.push(sample.label);
        }
        Ok(ImageBatch {
            images: Tensor::new(data, vec![batch_size, width])?,
            labels,
        })
    }

    pub fn batch_size(&self) -> usize {
        self.labels.len()
    }
}

/// In-memory dataset of equally sized, flattened images.
#[derive(Debug, Clone)]
pub struct ImageDataset {
    images: Vec<f32>,
    labels: Vec<u8>,
    image_dim: usize,
}

impl ImageDataset {
    /// Creates a dataset from a flat row-major pixel buffer.
    ///
    /// # Errors
    /// Returns `DatasetError` if `image_dim` is zero or if `images` does not
    /// hold exactly `labels.len() * image_dim` values.
    pub fn new(images: Vec<f32>, labels: Vec<u8>, image_dim: usize) -> Result<Self, DigitGanError> {
        if image_dim == 0 {
            return Err(DigitGanError::DatasetError(
                "image dimension must be non-zero".to_string(),
            ));
        }
        if images.len() != labels.len() * image_dim {
            return Err(DigitGanError::DatasetError(format!(
                "{} pixel values do not make {} images of {} pixels",
                images.len(),
                labels.len(),
                image_dim
            )));
        }
        Ok(ImageDataset {
            images,
            labels,
            image_dim,
        })
    }

    /// Number of values in one flattened image.
    pub fn image_dim(&self) -> usize {
        self.image_dim
    }
}

impl Dataset for ImageDataset {
    type Item = ImageSample;

    fn get(&self, index: usize) -> Result<Self::Item, DigitGanError> {
        if index >= self.labels.len() {
            return Err(DigitGanError::IndexOutOfBounds {
                index: vec![index],
                shape: vec![self.labels.len()],
            });
        }
        let start = index * self.image_dim;
        Ok(ImageSample {
            pixels: self.images[start..start + self.image_dim].to_vec(),
            label: self.labels[index],
        })
    }

    fn len(&self) -> usize {
        self.labels.len()
    }
}

#[cfg(test)]
#[path = "image_dataset_test.rs"]
mod tests;
