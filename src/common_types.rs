//! This module contains common data structures used across the analysis algorithms.

#[cfg(feature = "serde")]
use serde::Serialize;

/// One instance's numeric features, in column order.
pub type FeatureVector = Vec<f64>;

/// The class token attached to a feature vector.
pub type Label = String;

/// Parsed tabular data: feature rows plus the label of each row.
///
/// `features[i]` and `labels[i]` describe the same instance. Rows produced by the
/// parser are never edited afterwards; splitting produces new datasets.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Dataset {
    pub features: Vec<FeatureVector>,
    pub labels: Vec<Label>,
}

/// Dataset statistics reported alongside every dataset-based result.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct DatasetSummary {
    pub instances: usize,
    pub classes: usize,
    pub attributes: Vec<String>,
}

impl Dataset {
    pub fn new(features: Vec<FeatureVector>, labels: Vec<Label>) -> Self {
        debug_assert_eq!(features.len(), labels.len(), "every feature row needs a label");
        Dataset { features, labels }
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// Number of features per row, taken from the first row (0 when empty).
    pub fn dimensionality(&self) -> usize {
        self.features.first().map_or(0, Vec::len)
    }

    /// Number of distinct labels.
    pub fn class_count(&self) -> usize {
        tally_labels(self.labels.iter().map(String::as_str)).len()
    }

    /// Synthesized column names `Attribute_1..N`.
    pub fn attribute_names(&self) -> Vec<String> {
        (1..=self.dimensionality())
            .map(|i| format!("Attribute_{}", i))
            .collect()
    }

    pub fn summary(&self) -> DatasetSummary {
        DatasetSummary {
            instances: self.len(),
            classes: self.class_count(),
            attributes: self.attribute_names(),
        }
    }

    /// Iterates rows as `(features, label)` pairs.
    pub fn rows(&self) -> impl Iterator<Item = (&[f64], &str)> {
        self.features
            .iter()
            .zip(self.labels.iter())
            .map(|(features, label)| (features.as_slice(), label.as_str()))
    }

    /// Writes the dataset back as comma-delimited text, label last.
    pub fn to_delimited_text(&self) -> String {
        let mut out = String::new();
        for (features, label) in self.rows() {
            for value in features {
                if value.is_infinite() {
                    out.push_str(if *value > 0.0 { "Infinity" } else { "-Infinity" }); // the parser's spelling
                } else {
                    out.push_str(&value.to_string());
                }
                out.push(',');
            }
            out.push_str(label);
            out.push('\n');
        }
        out
    }
}

/// Counts labels, keeping the order in which each label is first seen.
pub fn tally_labels<'a>(labels: impl IntoIterator<Item = &'a str>) -> Vec<(&'a str, usize)> {
    let mut counts: Vec<(&'a str, usize)> = Vec::new();
    for label in labels {
        match counts.iter_mut().find(|(seen, _)| *seen == label) {
            Some((_, count)) => *count += 1,
            None => counts.push((label, 1)),
        }
    }
    counts
}

/// Most frequent label. On equal counts the label seen first wins.
/// Returns `None` for an empty input.
pub fn majority_label<'a>(labels: impl IntoIterator<Item = &'a str>) -> Option<&'a str> {
    let mut best: Option<(&'a str, usize)> = None;
    for (label, count) in tally_labels(labels) {
        if best.map_or(true, |(_, best_count)| count > best_count) {
            best = Some((label, count));
        }
    }
    best.map(|(label, _)| label)
}
