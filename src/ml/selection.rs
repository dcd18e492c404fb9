//! Model-based feature selection.
//!
//! [`SelectFromModel`] trains an L1-penalized logistic regression and keeps
//! the columns whose largest absolute coefficient reaches a threshold. The
//! result is a [`FeatureSelector`], a plain list of kept column indices that
//! is applied identically at training and prediction time.

use log::{info, warn};
use serde::{Deserialize, Serialize};

use crate::config::TrainingConfig;
use crate::error::{Result, TweetsieveError};
use crate::features::matrix::FeatureMatrix;
use crate::label::Label;
use crate::ml::Classifier;
use crate::ml::logistic::{LogisticRegression, LogisticRegressionParams};

/// Kept columns of an input matrix.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeatureSelector {
    n_input: usize,
    selected: Vec<usize>,
}

impl FeatureSelector {
    /// Keep every column.
    pub fn all(n_input: usize) -> Self {
        FeatureSelector {
            n_input,
            selected: (0..n_input).collect(),
        }
    }

    /// Keep the columns whose importance is at least `threshold`. When no
    /// column qualifies every column is kept.
    pub fn from_importances(importances: &[f64], threshold: f64) -> Self {
        let selected: Vec<usize> = importances
            .iter()
            .enumerate()
            .filter(|&(_, &w)| w >= threshold)
            .map(|(j, _)| j)
            .collect();

        if selected.is_empty() {
            warn!(
                "Feature selection kept none of {} columns, keeping all of them",
                importances.len()
            );
            return Self::all(importances.len());
        }

        FeatureSelector {
            n_input: importances.len(),
            selected,
        }
    }

    /// Width of the matrices this selector accepts.
    pub fn n_input(&self) -> usize {
        self.n_input
    }

    /// Number of kept columns.
    pub fn n_selected(&self) -> usize {
        self.selected.len()
    }

    /// Kept column indices, ascending.
    pub fn selected(&self) -> &[usize] {
        &self.selected
    }

    /// Check that the kept indices are ascending, distinct and inside the
    /// input width.
    pub fn check(&self) -> Result<()> {
        if let Some(&j) = self.selected.iter().find(|&&j| j >= self.n_input) {
            return Err(TweetsieveError::model(format!(
                "selected column {j} is outside the {} input columns",
                self.n_input
            )));
        }
        if self.selected.windows(2).any(|pair| pair[0] >= pair[1]) {
            return Err(TweetsieveError::model(
                "selected columns are not strictly ascending",
            ));
        }
        Ok(())
    }

    /// Reduce `x` to the kept columns.
    pub fn transform(&self, x: &FeatureMatrix) -> Result<FeatureMatrix> {
        if x.n_cols() != self.n_input {
            return Err(TweetsieveError::width_mismatch(
                "feature selection input",
                self.n_input,
                x.n_cols(),
            ));
        }
        if self.selected.len() == self.n_input {
            return Ok(x.clone());
        }
        Ok(x.select_columns(&self.selected))
    }
}

/// Selects columns by the coefficients of an L1 logistic regression.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SelectFromModel {
    params: LogisticRegressionParams,
    threshold: f64,
}

impl SelectFromModel {
    pub fn new(params: LogisticRegressionParams, threshold: f64) -> Self {
        SelectFromModel { params, threshold }
    }

    /// Selection model described by the training configuration.
    pub fn from_config(config: &TrainingConfig) -> Self {
        Self::new(
            LogisticRegressionParams::l1_selection(config),
            config.selection_threshold,
        )
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    /// Train the selection model and derive the kept columns.
    pub fn fit(&self, x: &FeatureMatrix, y: &[Label]) -> Result<FeatureSelector> {
        let mut model = LogisticRegression::new(self.params.clone());
        model.fit(x, y)?;
        let selector =
            FeatureSelector::from_importances(&model.feature_importances(), self.threshold);
        info!(
            "Feature selection kept {} of {} columns",
            selector.n_selected(),
            selector.n_input()
        );
        Ok(selector)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ml::logistic::Penalty;

    #[test]
    fn test_from_importances() {
        let selector = FeatureSelector::from_importances(&[0.0, 0.5, 1e-6, 1e-5], 1e-5);
        assert_eq!(selector.selected(), &[1, 3]);
        assert_eq!(selector.n_input(), 4);
    }

    #[test]
    fn test_empty_selection_falls_back_to_all() {
        let selector = FeatureSelector::from_importances(&[0.0, 0.0, 0.0], 1e-5);
        assert_eq!(selector, FeatureSelector::all(3));
    }

    #[test]
    fn test_transform() {
        let x = FeatureMatrix::from_rows(vec![vec![1.0, 2.0, 3.0]], 3).unwrap();
        let selector = FeatureSelector::from_importances(&[1.0, 0.0, 1.0], 0.5);
        assert_eq!(selector.transform(&x).unwrap().row(0), &[1.0, 3.0]);

        let wide = FeatureMatrix::zeros(1, 4);
        assert!(selector.transform(&wide).is_err());
    }

    #[test]
    fn test_check() {
        assert!(FeatureSelector::all(3).check().is_ok());
        assert!(FeatureSelector::from_importances(&[1.0, 0.0, 1.0], 0.5).check().is_ok());

        let outside = FeatureSelector {
            n_input: 3,
            selected: vec![0, 3],
        };
        assert!(outside.check().is_err());

        let unordered = FeatureSelector {
            n_input: 3,
            selected: vec![2, 0],
        };
        assert!(unordered.check().is_err());

        let repeated = FeatureSelector {
            n_input: 3,
            selected: vec![1, 1],
        };
        assert!(repeated.check().is_err());
    }

    #[test]
    fn test_select_informative_column() {
        // Column 0 separates the classes, column 1 is noise.
        let x = FeatureMatrix::from_rows(
            vec![
                vec![3.0, 0.1],
                vec![3.2, 0.2],
                vec![2.9, 0.15],
                vec![0.1, 0.2],
                vec![0.0, 0.1],
                vec![0.2, 0.15],
            ],
            2,
        )
        .unwrap();
        let y = [
            Label::Offensive,
            Label::Offensive,
            Label::Offensive,
            Label::Neither,
            Label::Neither,
            Label::Neither,
        ];
        let params = LogisticRegressionParams {
            penalty: Penalty::L1,
            c: 1.0,
            ..LogisticRegressionParams::default()
        };

        let selector = SelectFromModel::new(params, 1e-5).fit(&x, &y).unwrap();
        assert!(selector.selected().contains(&0));
        assert!(!selector.selected().contains(&1));
    }
}
