//! Uniform result record handed to whatever displays an analysis run.

use crate::common_types::DatasetSummary;
use crate::config::Algorithm;
use crate::genetic::Individual;
use crate::trees::TreeNode;

#[cfg(feature = "serde")]
use serde::Serialize;

/// Output of one analysis run. Fields that do not apply to the algorithm are `None`.
///
/// Serialized flat in camelCase: `algorithm`, `instances`, `classes`,
/// `attributes`, `accuracy`, `decisionTree`, `x`, `y`, `z`, `fitness`;
/// absent fields are left out.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct ResultRecord {
    pub algorithm: Algorithm,
    #[cfg_attr(feature = "serde", serde(flatten))]
    pub dataset: Option<DatasetSummary>,
    /// Percentage of test rows predicted correctly; `NaN` for an empty test split.
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none"))]
    pub accuracy: Option<f64>,
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none"))]
    pub decision_tree: Option<TreeNode>,
    #[cfg_attr(feature = "serde", serde(flatten))]
    pub best_individual: Option<Individual>,
}

impl ResultRecord {
    pub fn knn(dataset: DatasetSummary, accuracy: f64) -> Self {
        ResultRecord {
            algorithm: Algorithm::Knn,
            dataset: Some(dataset),
            accuracy: Some(accuracy),
            decision_tree: None,
            best_individual: None,
        }
    }

    pub fn decision_tree(dataset: DatasetSummary, tree: TreeNode, accuracy: Option<f64>) -> Self {
        ResultRecord {
            algorithm: Algorithm::DecisionTree,
            dataset: Some(dataset),
            accuracy,
            decision_tree: Some(tree),
            best_individual: None,
        }
    }

    pub fn genetic(best: Individual) -> Self {
        ResultRecord {
            algorithm: Algorithm::GeneticAlgorithm,
            dataset: None,
            accuracy: None,
            decision_tree: None,
            best_individual: Some(best),
        }
    }
}
