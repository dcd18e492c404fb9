//! The hate speech classifier: optional L1 feature selection ahead of an L2
//! logistic regression.

use log::info;
use serde::{Deserialize, Serialize};

use crate::config::TrainingConfig;
use crate::error::{Result, TweetsieveError};
use crate::features::matrix::FeatureMatrix;
use crate::label::{Label, NUM_CLASSES};
use crate::ml::Classifier;
use crate::ml::logistic::{LogisticRegression, LogisticRegressionParams};
use crate::ml::selection::{FeatureSelector, SelectFromModel};

/// Feature selection followed by a logistic regression on the kept columns.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TweetClassifier {
    selection: Option<SelectFromModel>,
    selector: Option<FeatureSelector>,
    model: LogisticRegression,
}

impl TweetClassifier {
    /// Untrained classifier described by the training configuration.
    pub fn new(config: &TrainingConfig) -> Self {
        TweetClassifier {
            selection: config
                .feature_selection
                .then(|| SelectFromModel::from_config(config)),
            selector: None,
            model: LogisticRegression::new(LogisticRegressionParams::l2(config)),
        }
    }

    /// Untrained classifier with explicit parts.
    pub fn with_parts(selection: Option<SelectFromModel>, params: LogisticRegressionParams) -> Self {
        TweetClassifier {
            selection,
            selector: None,
            model: LogisticRegression::new(params),
        }
    }

    /// The fitted column selection.
    pub fn selector(&self) -> Option<&FeatureSelector> {
        self.selector.as_ref()
    }

    /// The final model.
    pub fn model(&self) -> &LogisticRegression {
        &self.model
    }

    /// Check that a restored classifier is internally consistent: the
    /// selector is valid and the model is trained on exactly the kept
    /// columns.
    pub fn check(&self) -> Result<()> {
        self.model.check()?;
        match &self.selector {
            Some(selector) => {
                selector.check()?;
                let trained_on = self.model.n_features().ok_or_else(|| {
                    TweetsieveError::model("classifier has a column selection but no trained model")
                })?;
                if trained_on != selector.n_selected() {
                    return Err(TweetsieveError::width_mismatch(
                        "selected columns vs logistic regression",
                        selector.n_selected(),
                        trained_on,
                    ));
                }
            }
            None if self.model.is_trained() => {
                return Err(TweetsieveError::model(
                    "classifier has a trained model but no column selection",
                ));
            }
            None => {}
        }
        Ok(())
    }
}

impl Classifier for TweetClassifier {
    fn fit(&mut self, x: &FeatureMatrix, y: &[Label]) -> Result<()> {
        let selector = match &self.selection {
            Some(selection) => selection.fit(x, y)?,
            None => FeatureSelector::all(x.n_cols()),
        };
        let reduced = selector.transform(x)?;
        self.model.fit(&reduced, y)?;
        info!(
            "Classifier trained on {} rows, {} of {} columns",
            x.n_rows(),
            selector.n_selected(),
            selector.n_input()
        );
        self.selector = Some(selector);
        Ok(())
    }

    fn predict_proba(&self, x: &FeatureMatrix) -> Result<Vec<[f64; NUM_CLASSES]>> {
        let selector = self
            .selector
            .as_ref()
            .ok_or_else(|| TweetsieveError::model("classifier is not trained"))?;
        self.model.predict_proba(&selector.transform(x)?)
    }

    fn n_features(&self) -> Option<usize> {
        self.selector.as_ref().map(FeatureSelector::n_input)
    }

    fn name(&self) -> &'static str {
        "select_from_model+logistic_regression"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn data() -> (FeatureMatrix, Vec<Label>) {
        let x = FeatureMatrix::from_rows(
            vec![
                vec![4.0, 0.0, 0.0, 1.0],
                vec![3.5, 0.5, 0.0, 2.0],
                vec![0.0, 4.0, 0.5, 1.0],
                vec![0.5, 3.0, 0.0, 2.0],
                vec![0.0, 0.0, 4.0, 1.0],
                vec![0.0, 0.5, 3.5, 2.0],
            ],
            4,
        )
        .unwrap();
        let y = vec![
            Label::HateSpeech,
            Label::HateSpeech,
            Label::Offensive,
            Label::Offensive,
            Label::Neither,
            Label::Neither,
        ];
        (x, y)
    }

    #[test]
    fn test_default_selection_falls_back_on_tiny_data() {
        let (x, y) = data();
        let mut classifier = TweetClassifier::new(&TrainingConfig::default());
        classifier.fit(&x, &y).unwrap();

        // C = 0.01 on six rows zeroes every coefficient.
        assert_eq!(classifier.selector().unwrap().n_selected(), 4);
        assert_eq!(classifier.n_features(), Some(4));
        assert_eq!(classifier.predict(&x).unwrap(), y);
    }

    #[test]
    fn test_without_selection() {
        let (x, y) = data();
        let config = TrainingConfig {
            feature_selection: false,
            ..TrainingConfig::default()
        };
        let mut classifier = TweetClassifier::new(&config);
        assert!(classifier.predict(&x).is_err());

        classifier.fit(&x, &y).unwrap();
        assert_eq!(classifier.predict(&x).unwrap(), y);
        assert!(matches!(
            classifier.predict(&FeatureMatrix::zeros(1, 3)).unwrap_err(),
            TweetsieveError::FeatureWidthMismatch { expected: 4, actual: 3, .. }
        ));
    }

    #[test]
    fn test_check_rejects_inconsistent_selection() {
        let (x, y) = data();
        let mut classifier = TweetClassifier::new(&TrainingConfig::default());
        assert!(classifier.check().is_ok());

        classifier.fit(&x, &y).unwrap();
        assert!(classifier.check().is_ok());

        let mut narrowed = classifier.clone();
        narrowed.selector = Some(FeatureSelector::from_importances(&[1.0, 0.0, 1.0, 1.0], 0.5));
        assert!(matches!(
            narrowed.check().unwrap_err(),
            TweetsieveError::FeatureWidthMismatch { expected: 3, actual: 4, .. }
        ));

        let mut unselected = classifier;
        unselected.selector = None;
        assert!(unselected.check().is_err());
    }
}
