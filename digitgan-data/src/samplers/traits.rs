// digitgan-data/src/samplers/traits.rs

use std::fmt::Debug;

/// Defines the order in which a `DataLoader` visits dataset indices.
///
/// `iter` is called once per epoch, so a sampler may return a different
/// order every time it is asked.
pub trait Sampler: Debug + Send + Sync {
    /// Returns an iterator over the indices of a dataset.
    ///
    /// # Arguments
    ///
    /// * `dataset_len` - The total number of items in the dataset.
    fn iter(&self, dataset_len: usize) -> Box<dyn Iterator<Item = usize> + Send + Sync>;

    /// Returns the total number of indices the iterator will yield.
    fn len(&self, dataset_len: usize) -> usize;
}
