//! Classifiers, model selection and evaluation.
//!
//! - [`classifier`] - feature selection followed by logistic regression
//! - [`logistic`] - multinomial logistic regression with L1 or L2 penalty
//! - [`selection`] - L1-based feature selection
//! - [`model_selection`] - train/test split and stratified cross-validation
//! - [`metrics`] - classification report and confusion matrix

pub mod classifier;
pub mod logistic;
pub mod metrics;
pub mod model_selection;
pub mod selection;

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::features::matrix::FeatureMatrix;
use crate::label::{Label, NUM_CLASSES};
use crate::util::numeric::argmax;

/// Trait for classifiers over assembled feature matrices.
pub trait Classifier: Send + Sync {
    /// Train on the rows of `x` labeled by `y`.
    fn fit(&mut self, x: &FeatureMatrix, y: &[Label]) -> Result<()>;

    /// Class probabilities of every row, in label code order.
    fn predict_proba(&self, x: &FeatureMatrix) -> Result<Vec<[f64; NUM_CLASSES]>>;

    /// Most probable label of every row.
    fn predict(&self, x: &FeatureMatrix) -> Result<Vec<Label>> {
        self.predict_proba(x)?
            .iter()
            .map(|p| Label::from_index(argmax(p)))
            .collect()
    }

    /// Number of input columns the classifier was trained on; `None` before
    /// training.
    fn n_features(&self) -> Option<usize>;

    /// Check if the classifier has been trained.
    fn is_trained(&self) -> bool {
        self.n_features().is_some()
    }

    /// Get the name of this classifier.
    fn name(&self) -> &'static str;
}

/// Summary of one training run.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TrainingStats {
    /// Gradient iterations performed.
    pub iterations: usize,
    /// Objective value after the last accepted step.
    pub final_loss: f64,
    /// Whether the update fell below the tolerance before `max_iter`.
    pub converged: bool,
    /// Training time in milliseconds.
    pub training_time_ms: u64,
}
