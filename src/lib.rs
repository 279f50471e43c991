//! KNN classification, entropy decision trees and a toy genetic optimizer over
//! delimited tabular text, with optional Python bindings (`python` feature).

pub mod common_types;
pub mod config;
pub mod dataset;
pub mod error;
pub mod genetic;
pub mod knn;
pub mod metrics;
pub mod pipeline;
pub mod result;
pub mod trees;

pub use common_types::{Dataset, DatasetSummary, FeatureVector, Label};
pub use config::{Algorithm, AnalysisConfig};
pub use error::{AnalysisError, Result};
pub use genetic::{GeneticConfig, GeneticOptimizer, Individual, RandomSource};
pub use knn::KnnClassifier;
pub use pipeline::{run, run_decision_tree, run_genetic_algorithm, run_knn, AnalysisRequest};
pub use result::ResultRecord;
pub use trees::{DecisionTreeClassifier, TreeNode};

#[cfg(feature = "python")]
mod python {
    use crate::config::{Algorithm, AnalysisConfig};
    use crate::error::AnalysisError;
    use crate::pipeline::{run, AnalysisRequest};
    use pyo3::exceptions::PyValueError;
    use pyo3::prelude::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    impl From<AnalysisError> for PyErr {
        fn from(err: AnalysisError) -> PyErr {
            PyValueError::new_err(err.to_string())
        }
    }

    /// Calculates the Euclidean distance between two vectors of f64.
    #[pyfunction]
    #[pyo3(name = "euclidean_distance")]
    fn euclidean_distance_py(a: Vec<f64>, b: Vec<f64>) -> PyResult<f64> {
        Ok(crate::knn::euclidean_distance(&a, &b)?)
    }

    /// Shannon entropy (bits) of a list of labels.
    #[pyfunction]
    #[pyo3(name = "entropy")]
    fn entropy_py(labels: Vec<String>) -> f64 {
        crate::trees::entropy(labels.iter().map(String::as_str))
    }

    /// Runs one analysis and returns the result record as a JSON string.
    ///
    /// `dataset_text` is required for "knn" and "decisionTree"; "genetic" uses
    /// `generations` and, if given, `seed` for a reproducible run.
    #[pyfunction]
    #[pyo3(signature = (algorithm, dataset_text = None, generations = 10, seed = None))]
    fn analyze(algorithm: &str, dataset_text: Option<&str>, generations: usize, seed: Option<u64>) -> PyResult<String> {
        let algorithm: Algorithm = algorithm.parse()?;
        let request = AnalysisRequest::new(algorithm, dataset_text, generations)?;
        let mut rng = match seed {
            Some(s) => StdRng::seed_from_u64(s),
            None => StdRng::from_entropy(),
        };
        let record = run(request, &AnalysisConfig::default(), &mut rng)?;
        serde_json::to_string(&record).map_err(|e| PyValueError::new_err(e.to_string()))
    }

    /// The name of this function must match the `lib.name` in `Cargo.toml`.
    #[pymodule]
    fn classical_analysis_py(m: &Bound<'_, PyModule>) -> PyResult<()> {
        m.add_function(wrap_pyfunction!(euclidean_distance_py, m)?)?;
        m.add_function(wrap_pyfunction!(entropy_py, m)?)?;
        m.add_function(wrap_pyfunction!(analyze, m)?)?;
        Ok(())
    }
}
