//! Algorithm selection and the tunable constants of each pipeline.

use crate::dataset::DEFAULT_TRAIN_RATIO;
use crate::error::{AnalysisError, Result};
use crate::genetic::GeneticConfig;
use crate::knn::KnnClassifier;
use std::fmt;
use std::str::FromStr;

#[cfg(feature = "serde")]
use serde::Serialize;

/// The three analysis routines. `Display` gives the name shown in results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub enum Algorithm {
    #[cfg_attr(feature = "serde", serde(rename = "KNN"))]
    Knn,
    #[cfg_attr(feature = "serde", serde(rename = "Árvore de Decisão"))]
    DecisionTree,
    #[cfg_attr(feature = "serde", serde(rename = "GeneticAlgorithm"))]
    GeneticAlgorithm,
}

impl Algorithm {
    pub fn display_name(&self) -> &'static str {
        match self {
            Algorithm::Knn => "KNN",
            Algorithm::DecisionTree => "Árvore de Decisão",
            Algorithm::GeneticAlgorithm => "GeneticAlgorithm",
        }
    }

    /// Whether the algorithm consumes dataset text.
    pub fn needs_dataset(&self) -> bool {
        !matches!(self, Algorithm::GeneticAlgorithm)
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

impl FromStr for Algorithm {
    type Err = AnalysisError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "knn" => Ok(Algorithm::Knn),
            "decisiontree" | "decision_tree" | "tree" | "árvore de decisão" => Ok(Algorithm::DecisionTree),
            "genetic" | "ga" | "geneticalgorithm" => Ok(Algorithm::GeneticAlgorithm),
            _ => Err(AnalysisError::UnknownAlgorithm(s.to_string())),
        }
    }
}

/// Settings shared by every pipeline run.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnalysisConfig {
    /// Neighbors consulted by the KNN vote.
    pub k: usize,
    /// Fraction of rows (rounded down) used for training.
    pub train_ratio: f64,
    pub genetic: GeneticConfig,
}

impl AnalysisConfig {
    pub fn with_k(mut self, k: usize) -> Self {
        self.k = k;
        self
    }

    pub fn with_generations(mut self, generations: usize) -> Self {
        self.genetic.generations = generations;
        self
    }
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        AnalysisConfig {
            k: KnnClassifier::DEFAULT_K,
            train_ratio: DEFAULT_TRAIN_RATIO,
            genetic: GeneticConfig::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_algorithm() {
        assert_eq!("knn".parse::<Algorithm>().unwrap(), Algorithm::Knn);
        assert_eq!("KNN".parse::<Algorithm>().unwrap(), Algorithm::Knn);
        assert_eq!("decisionTree".parse::<Algorithm>().unwrap(), Algorithm::DecisionTree);
        assert_eq!(" tree ".parse::<Algorithm>().unwrap(), Algorithm::DecisionTree);
        assert_eq!("genetic".parse::<Algorithm>().unwrap(), Algorithm::GeneticAlgorithm);
        assert_eq!(
            "svm".parse::<Algorithm>(),
            Err(AnalysisError::UnknownAlgorithm("svm".to_string()))
        );
    }

    #[test]
    fn test_display_names_parse_back() {
        for algorithm in [Algorithm::Knn, Algorithm::DecisionTree, Algorithm::GeneticAlgorithm] {
            assert_eq!(algorithm.to_string().parse::<Algorithm>().unwrap(), algorithm);
        }
    }

    #[test]
    fn test_defaults() {
        let config = AnalysisConfig::default();
        assert_eq!(config.k, 7);
        assert_eq!(config.train_ratio, 0.7);
        assert_eq!(config.genetic.population_size, 20);
        assert_eq!(config.genetic.num_offspring, 14);
        assert_eq!(config.genetic.mutation_rate, 1);
        assert_eq!(config.with_generations(3).genetic.generations, 3);
    }
}
