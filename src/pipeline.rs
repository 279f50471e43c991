//! End-to-end runs: raw text in, [`ResultRecord`] out.

use crate::config::{AnalysisConfig, Algorithm};
use crate::dataset::{parse_dataset, train_test_split};
use crate::error::{AnalysisError, Result};
use crate::genetic::{GeneticConfig, GeneticOptimizer, RandomSource};
use crate::knn::KnnClassifier;
use crate::metrics::accuracy;
use crate::result::ResultRecord;
use crate::trees::DecisionTreeClassifier;
use tracing::info;

/// What to run, and the input it needs.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AnalysisRequest<'a> {
    Knn { dataset_text: &'a str },
    DecisionTree { dataset_text: &'a str },
    GeneticAlgorithm { generations: usize },
}

impl<'a> AnalysisRequest<'a> {
    /// Pairs a selector with its input. Dataset algorithms require text; the
    /// genetic algorithm ignores it and takes `generations` instead.
    pub fn new(algorithm: Algorithm, dataset_text: Option<&'a str>, generations: usize) -> Result<Self> {
        if !algorithm.needs_dataset() {
            return Ok(AnalysisRequest::GeneticAlgorithm { generations });
        }
        let dataset_text = dataset_text.ok_or(AnalysisError::MissingDataset)?;
        Ok(match algorithm {
            Algorithm::Knn => AnalysisRequest::Knn { dataset_text },
            _ => AnalysisRequest::DecisionTree { dataset_text },
        })
    }

    pub fn algorithm(&self) -> Algorithm {
        match self {
            AnalysisRequest::Knn { .. } => Algorithm::Knn,
            AnalysisRequest::DecisionTree { .. } => Algorithm::DecisionTree,
            AnalysisRequest::GeneticAlgorithm { .. } => Algorithm::GeneticAlgorithm,
        }
    }
}

/// Parses, splits, fits KNN on the training rows and scores it on the test rows.
pub fn run_knn(dataset_text: &str, config: &AnalysisConfig) -> Result<ResultRecord> {
    let dataset = parse_dataset(dataset_text)?;
    let (train, test) = train_test_split(&dataset, config.train_ratio)?;
    info!(train = train.len(), test = test.len(), k = config.k, "running knn");

    let mut classifier = KnnClassifier::new(config.k);
    classifier.fit(train)?;
    let predictions = classifier.predict(&test.features)?;
    let score = accuracy(&predictions, &test.labels);

    info!(accuracy = score, "knn finished");
    Ok(ResultRecord::knn(dataset.summary(), score))
}

/// Parses, splits, induces a tree from the training rows and scores it on the
/// test rows. Test rows reaching an unseen attribute value count as misses.
pub fn run_decision_tree(dataset_text: &str, config: &AnalysisConfig) -> Result<ResultRecord> {
    let dataset = parse_dataset(dataset_text)?;
    let (train, test) = train_test_split(&dataset, config.train_ratio)?;
    info!(train = train.len(), test = test.len(), "running decision tree");

    let mut tree = DecisionTreeClassifier::new();
    tree.fit(&train)?;

    let score = {
        let predictions = tree.predict_batch(&test.features);
        let expected: Vec<Option<&str>> = test.labels.iter().map(|label| Some(label.as_str())).collect();
        accuracy(&predictions, &expected)
    };
    info!(depth = tree.depth(), accuracy = score, "decision tree finished");

    let root = tree.into_root().ok_or(AnalysisError::EmptyTrainingSet)?;
    Ok(ResultRecord::decision_tree(dataset.summary(), root, Some(score)))
}

pub fn run_genetic_algorithm<R: RandomSource + ?Sized>(config: &GeneticConfig, rng: &mut R) -> Result<ResultRecord> {
    let optimizer = GeneticOptimizer::new(*config)?;
    Ok(ResultRecord::genetic(optimizer.run(rng)))
}

/// Dispatches a request. The generation count in the request overrides
/// `config.genetic.generations`.
pub fn run<R: RandomSource + ?Sized>(
    request: AnalysisRequest<'_>,
    config: &AnalysisConfig,
    rng: &mut R,
) -> Result<ResultRecord> {
    match request {
        AnalysisRequest::Knn { dataset_text } => run_knn(dataset_text, config),
        AnalysisRequest::DecisionTree { dataset_text } => run_decision_tree(dataset_text, config),
        AnalysisRequest::GeneticAlgorithm { generations } => {
            run_genetic_algorithm(&config.genetic.with_generations(generations), rng)
        }
    }
}
