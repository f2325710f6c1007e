// digitgan-data/src/datasets/traits.rs

use digitgan_core::DigitGanError;

/// Trait representing a dataset.
///
/// A dataset provides access to individual data samples via an index.
/// `Item` is the type returned by accessing a single sample.
pub trait Dataset {
    /// The type of a single item returned by the dataset.
    type Item;

    /// Returns the data sample at the given index.
    ///
    /// # Errors
    /// Returns `DigitGanError::IndexOutOfBounds` if `index >= self.len()`.
    fn get(&self, index: usize) -> Result<Self::Item, DigitGanError>;

    /// Returns the total number of samples in the dataset.
    fn len(&self) -> usize;

    /// Returns true if the dataset contains no samples.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
