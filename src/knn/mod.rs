//! Brute-force k-nearest-neighbors classification.

pub mod distance;

pub use distance::euclidean_distance;

use crate::common_types::{majority_label, Dataset, FeatureVector, Label};
use crate::error::{AnalysisError, Result};
use ordered_float::OrderedFloat;
use tracing::debug;

/// The K-Nearest Neighbors Classifier.
///
/// Every prediction scans the whole training set, sorts by distance and takes a
/// majority vote over the closest `k` labels.
#[derive(Debug, Clone)]
pub struct KnnClassifier {
    k: usize,
    training_data: Dataset, // kept whole; brute force scans every row per query
}

impl KnnClassifier {
    pub const DEFAULT_K: usize = 7;

    pub fn new(k: usize) -> Self {
        Self {
            k,
            training_data: Dataset::default(), // empty until fit()
        }
    }

    pub fn k(&self) -> usize {
        self.k
    }

    /// Stores the training data, replacing whatever was fitted before.
    ///
    /// # Errors
    /// [`AnalysisError::EmptyTrainingSet`] for an empty dataset, and
    /// [`AnalysisError::InvalidHyperparameter`] if `k` is 0.
    pub fn fit(&mut self, training_data: Dataset) -> Result<()> {
        if self.k == 0 {
            return Err(AnalysisError::InvalidHyperparameter {
                param: "k",
                value: self.k.to_string(),
                constraint: "must be greater than 0",
            });
        }
        if training_data.is_empty() {
            return Err(AnalysisError::EmptyTrainingSet);
        }
        debug!(rows = training_data.len(), k = self.k, "fitted knn classifier");
        self.training_data = training_data;
        Ok(())
    }

    /// Predicts the label for a single sample.
    ///
    /// Neighbors are ordered by ascending distance with a stable sort, so equally
    /// distant training rows keep their original order; `NaN` distances sort last.
    /// Among the `k` nearest, the most frequent label wins, and on equal counts
    /// the label met first in that neighbor order is returned. That tie rule
    /// depends on row order, not on any property of the labels themselves.
    pub fn predict_single(&self, sample: &[f64]) -> Result<Label> {
        if self.training_data.is_empty() {
            return Err(AnalysisError::EmptyTrainingSet);
        }

        let mut distances_to_train: Vec<(OrderedFloat<f64>, &str)> =
            Vec::with_capacity(self.training_data.len());
        for (features, label) in self.training_data.rows() {
            let distance = euclidean_distance(sample, features)?;
            distances_to_train.push((OrderedFloat(distance), label));
        }

        distances_to_train.sort_by_key(|&(distance, _)| distance); // stable: ties keep training order

        let top_k_labels = distances_to_train.iter().take(self.k).map(|&(_, label)| label);
        majority_label(top_k_labels)
            .map(str::to_string)
            .ok_or(AnalysisError::EmptyTrainingSet)
    }

    /// Predicts labels for a batch of samples, in input order.
    pub fn predict(&self, test_data: &[FeatureVector]) -> Result<Vec<Label>> {
        test_data
            .iter()
            .map(|sample| self.predict_single(sample))
            .collect()
    }
}

impl Default for KnnClassifier {
    fn default() -> Self {
        Self::new(Self::DEFAULT_K)
    }
}
