//! Distance functions used by the KNN classifier.

use crate::error::{AnalysisError, Result};
use num_traits::Float;

/// Calculates the Euclidean distance between two vectors.
///
/// # Errors
/// [`AnalysisError::DimensionMismatch`] if the vectors differ in length.
pub fn euclidean_distance<F: Float>(a: &[F], b: &[F]) -> Result<F> {
    if a.len() != b.len() {
        return Err(AnalysisError::DimensionMismatch {
            expected: a.len(),
            actual: b.len(),
        });
    }
    let sum_sq_diff = a.iter().zip(b.iter()).fold(F::zero(), |acc, (&x, &y)| {
        let diff = x - y;
        acc + diff * diff
    });
    Ok(sum_sq_diff.sqrt())
}
