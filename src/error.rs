//! Error types shared by the parser, the classifiers and the pipeline.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, AnalysisError>;

/// Failures surfaced to callers of the analysis core.
///
/// Every variant is a local validation failure raised where it is detected.
/// The genetic optimizer never produces one.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum AnalysisError {
    /// No valid rows were left after parsing.
    #[error("dataset contains no valid rows")]
    EmptyDataset,

    /// A classifier was asked to train (or predict) without training rows.
    #[error("training set is empty")]
    EmptyTrainingSet,

    /// Two feature vectors of different length were compared.
    #[error("dimension mismatch: expected {expected} features, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },

    #[error("invalid hyperparameter {param}={value}: {constraint}")]
    InvalidHyperparameter {
        param: &'static str,
        value: String,
        constraint: &'static str,
    },

    #[error("unknown algorithm '{0}' (expected knn, decisionTree or genetic)")]
    UnknownAlgorithm(String),

    /// A dataset algorithm was requested without any dataset text.
    #[error("algorithm requires dataset text but none was supplied")]
    MissingDataset,
}
