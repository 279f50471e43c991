//! Scoring of predicted labels.

/// Percentage of positions where the prediction equals the true label.
///
/// Predictions missing at the tail count as wrong. Returns `NaN` when there are
/// no true labels to compare against.
pub fn accuracy<L: PartialEq>(predictions: &[L], true_labels: &[L]) -> f64 {
    if true_labels.is_empty() {
        return f64::NAN;
    }
    let correct = true_labels
        .iter()
        .zip(predictions.iter())
        .filter(|(truth, predicted)| truth == predicted)
        .count();
    (correct as f64 / true_labels.len() as f64) * 100.0
}
