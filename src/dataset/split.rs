//! Fixed-ratio train/test partitioning.

use crate::common_types::Dataset;
use crate::error::{AnalysisError, Result};

pub const DEFAULT_TRAIN_RATIO: f64 = 0.7;

/// Splits `dataset` at `floor(len * train_ratio)`. The leading rows become the
/// training set and the rest the test set; input order is kept, so shuffle
/// upstream if that matters.
///
/// # Errors
/// [`AnalysisError::InvalidHyperparameter`] if `train_ratio` is not in `(0, 1]`.
pub fn train_test_split(dataset: &Dataset, train_ratio: f64) -> Result<(Dataset, Dataset)> {
    if !(train_ratio > 0.0 && train_ratio <= 1.0) {
        return Err(AnalysisError::InvalidHyperparameter {
            param: "train_ratio",
            value: train_ratio.to_string(),
            constraint: "must be in (0, 1]",
        });
    }

    let split_index = ((dataset.len() as f64) * train_ratio).floor() as usize;
    let split_index = split_index.min(dataset.len());

    let train = Dataset::new(
        dataset.features[..split_index].to_vec(),
        dataset.labels[..split_index].to_vec(),
    );
    let test = Dataset::new(
        dataset.features[split_index..].to_vec(),
        dataset.labels[split_index..].to_vec(),
    );
    Ok((train, test))
}
