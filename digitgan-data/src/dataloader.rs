// dataloader.rs
//! # DataLoader
//!
//! Batches samples from a [`Dataset`] in the order chosen by a [`Sampler`]
//! and assembles each batch with a collation function.
//!
//! ## Example
//!
//! ```rust
//! use digitgan_data::{DataLoader, ImageBatch, ImageDataset, SequentialSampler};
//!
//! let dataset = ImageDataset::new(vec![0.0; 12], vec![0, 1, 2], 4).unwrap();
//! let loader = DataLoader::new(dataset, 2, SequentialSampler::new(), false, Box::new(ImageBatch::collate)).unwrap();
//! for epoch in 0..2 {
//!     for batch in loader.iter() {
//!         let batch = batch.unwrap();
//!         println!("epoch {} batch {:?}", epoch, batch.images.shape());
//!     }
//! }
//! ```
//!
//! A loader is restartable: every call to [`DataLoader::iter`] asks the
//! sampler for a new order and walks the dataset once.

use crate::datasets::Dataset;
use crate::samplers::Sampler;
use digitgan_core::DigitGanError;

/// Assembles a `Vec` of samples into a batch.
pub type CollateFn<I, B> = Box<dyn Fn(Vec<I>) -> Result<B, DigitGanError> + Send + Sync>;

/// Generic loader for batching and sampling a dataset.
///
/// # Type parameters
/// - `D`: the dataset.
/// - `S`: the sampler producing the index order.
/// - `B`: the batch type produced by the collation function.
pub struct DataLoader<D: Dataset, S: Sampler, B> {
    dataset: D,
    batch_size: usize,
    sampler: S,
    drop_last: bool,
    collate_fn: CollateFn<D::Item, B>,
}

impl<D: Dataset, S: Sampler, B> DataLoader<D, S, B> {
    /// Creates a new DataLoader.
    ///
    /// # Arguments
    /// - `dataset`: the dataset to load from.
    /// - `batch_size`: maximum number of samples per batch.
    /// - `sampler`: generates the index order of each epoch.
    /// - `drop_last`: if true, a final batch smaller than `batch_size` is skipped.
    /// - `collate_fn`: assembles samples into a batch.
    ///
    /// # Errors
    /// Returns `ConfigurationError` if `batch_size` is zero.
    pub fn new(
        dataset: D,
        batch_size: usize,
        sampler: S,
        drop_last: bool,
        collate_fn: CollateFn<D::Item, B>,
    ) -> Result<Self, DigitGanError> {
        if batch_size == 0 {
            return Err(DigitGanError::ConfigurationError(
                "batch_size must be at least 1".to_string(),
            ));
        }
        Ok(Self {
            dataset,
            batch_size,
            sampler,
            drop_last,
            collate_fn,
        })
    }

    /// Starts a new pass over the dataset.
    pub fn iter(&self) -> DataLoaderIter<'_, D, B> {
        DataLoaderIter {
            dataset: &self.dataset,
            batch_size: self.batch_size,
            drop_last: self.drop_last,
            collate_fn: &self.collate_fn,
            indices: self.sampler.iter(self.dataset.len()),
        }
    }

    /// Number of batches one pass yields.
    pub fn num_batches(&self) -> usize {
        let samples = self.sampler.len(self.dataset.len());
        if self.drop_last {
            samples / self.batch_size
        } else {
            samples.div_ceil(self.batch_size)
        }
    }

    pub fn batch_size(&self) -> usize {
        self.batch_size
    }

    pub fn dataset(&self) -> &D {
        &self.dataset
    }
}

impl<D, S> DataLoader<D, S, Vec<D::Item>>
where
    D: Dataset,
    S: Sampler,
{
    /// Creates a DataLoader whose batches are plain `Vec`s of samples.
    pub fn with_default_collate(
        dataset: D,
        batch_size: usize,
        sampler: S,
        drop_last: bool,
    ) -> Result<Self, DigitGanError> {
        let collate_fn: CollateFn<D::Item, Vec<D::Item>> = Box::new(|batch| Ok(batch));
        Self::new(dataset, batch_size, sampler, drop_last, collate_fn)
    }
}

impl<'a, D: Dataset, S: Sampler, B> IntoIterator for &'a DataLoader<D, S, B> {
    type Item = Result<B, DigitGanError>;
    type IntoIter = DataLoaderIter<'a, D, B>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// One pass (epoch) over a [`DataLoader`].
pub struct DataLoaderIter<'a, D: Dataset, B> {
    dataset: &'a D,
    batch_size: usize,
    drop_last: bool,
    collate_fn: &'a CollateFn<D::Item, B>,
    indices: Box<dyn Iterator<Item = usize> + Send + Sync>,
}

impl<'a, D: Dataset, B> Iterator for DataLoaderIter<'a, D, B> {
    type Item = Result<B, DigitGanError>;

    /// Returns the next batch.
    ///
    /// - `Some(Ok(batch))`: a collated batch.
    /// - `Some(Err(e))`: fetching an item or collating failed.
    /// - `None`: the pass is over.
    fn next(&mut self) -> Option<Self::Item> {
        let mut batch = Vec::with_capacity(self.batch_size);
        for idx in self.indices.by_ref().take(self.batch_size) {
            match self.dataset.get(idx) {
                Ok(item) => batch.push(item),
                Err(e) => return Some(Err(e)),
            }
        }
        if batch.is_empty() || (self.drop_last && batch.len() < self.batch_size) {
            return None;
        }
        Some((self.collate_fn)(batch))
    }
}

#[cfg(test)]
#[path = "dataloader_test.rs"]
mod tests;
