//! Multinomial logistic regression.
//!
//! The model minimizes the class-weighted mean cross-entropy plus
//! `R(W) / (C * total_weight)`, where `R` is `|W|_1` or `|W|_2^2 / 2`, so
//! `C` has the usual inverse-regularization meaning. Intercepts are not
//! penalized. Inputs are standardized with statistics of the training
//! matrix; the standardization is folded into the coefficients at scoring
//! time so no scaled copy of the matrix is ever made.
//!
//! Optimization is full-batch proximal gradient descent: a step is accepted
//! only when it decreases the objective, otherwise the step size is halved.
//! Per-row gradient contributions are summed in parallel.
//!
//! # Examples
//!
//! ```
//! use tweetsieve::features::FeatureMatrix;
//! use tweetsieve::label::Label;
//! use tweetsieve::ml::Classifier;
//! use tweetsieve::ml::logistic::{LogisticRegression, LogisticRegressionParams};
//!
//! let x = FeatureMatrix::from_rows(
//!     vec![vec![0.0, 1.0], vec![0.1, 0.9], vec![1.0, 0.0], vec![0.9, 0.2]],
//!     2,
//! ).unwrap();
//! let y = [Label::Neither, Label::Neither, Label::Offensive, Label::Offensive];
//!
//! let mut model = LogisticRegression::new(LogisticRegressionParams::default());
//! model.fit(&x, &y).unwrap();
//! assert_eq!(model.predict(&x).unwrap(), y);
//! ```

use std::time::Instant;

use log::{debug, warn};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::config::TrainingConfig;
use crate::error::{Result, TweetsieveError};
use crate::features::matrix::FeatureMatrix;
use crate::label::{Label, NUM_CLASSES};
use crate::ml::{Classifier, TrainingStats};
use crate::util::numeric::{dot, softmax_in_place};

/// Smallest step size tried before the optimizer gives up.
const MIN_STEP: f64 = 1e-12;

/// Columns with a smaller standard deviation are left unscaled.
const MIN_SCALE: f64 = 1e-12;

/// Coefficient penalty.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Penalty {
    L1,
    L2,
}

/// Hyperparameters of [`LogisticRegression`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogisticRegressionParams {
    pub penalty: Penalty,
    /// Inverse regularization strength.
    pub c: f64,
    pub learning_rate: f64,
    pub max_iter: usize,
    pub tolerance: f64,
    /// Weight every class by `n_samples / (n_classes * class_count)`.
    pub balanced_class_weights: bool,
}

impl Default for LogisticRegressionParams {
    fn default() -> Self {
        Self::l2(&TrainingConfig::default())
    }
}

impl LogisticRegressionParams {
    /// Parameters of the final L2 model.
    pub fn l2(config: &TrainingConfig) -> Self {
        LogisticRegressionParams {
            penalty: Penalty::L2,
            c: config.c,
            learning_rate: config.learning_rate,
            max_iter: config.max_iter,
            tolerance: config.tolerance,
            balanced_class_weights: config.balanced_class_weights,
        }
    }

    /// Parameters of the L1 feature selection model.
    pub fn l1_selection(config: &TrainingConfig) -> Self {
        LogisticRegressionParams {
            penalty: Penalty::L1,
            c: config.selection_c,
            ..Self::l2(config)
        }
    }
}

/// Per-column mean and standard deviation of a training matrix.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Standardizer {
    means: Vec<f64>,
    scales: Vec<f64>,
}

impl Standardizer {
    /// Learn column statistics. Constant columns keep a scale of one.
    pub fn fit(x: &FeatureMatrix) -> Self {
        let n = x.n_rows().max(1) as f64;
        let d = x.n_cols();
        let mut means = vec![0.0; d];
        for row in x.rows() {
            for (m, v) in means.iter_mut().zip(row) {
                *m += v;
            }
        }
        means.iter_mut().for_each(|m| *m /= n);

        let mut variances = vec![0.0; d];
        for row in x.rows() {
            for ((var, v), m) in variances.iter_mut().zip(row).zip(&means) {
                *var += (v - m) * (v - m);
            }
        }
        let scales = variances
            .into_iter()
            .map(|var| {
                let std = (var / n).sqrt();
                if std > MIN_SCALE { std } else { 1.0 }
            })
            .collect();

        Standardizer { means, scales }
    }

    pub fn n_features(&self) -> usize {
        self.means.len()
    }

    pub fn means(&self) -> &[f64] {
        &self.means
    }

    pub fn scales(&self) -> &[f64] {
        &self.scales
    }

    /// Check that means and scales cover the same columns and every scale
    /// is usable as a divisor.
    pub fn check(&self) -> Result<()> {
        if self.scales.len() != self.means.len() {
            return Err(TweetsieveError::width_mismatch(
                "standardizer scales",
                self.means.len(),
                self.scales.len(),
            ));
        }
        if let Some(j) = self.scales.iter().position(|s| !(s.is_finite() && *s > 0.0)) {
            return Err(TweetsieveError::model(format!(
                "standardizer scale of column {j} is {}",
                self.scales[j]
            )));
        }
        Ok(())
    }
}

/// Coefficients over raw inputs, with standardization folded in.
struct RawModel {
    coefficients: Vec<f64>,
    intercepts: [f64; NUM_CLASSES],
}

impl RawModel {
    fn fold(
        standardizer: &Standardizer,
        coefficients: &[f64],
        intercepts: &[f64; NUM_CLASSES],
    ) -> Self {
        let d = standardizer.n_features();
        let mut raw = vec![0.0; NUM_CLASSES * d];
        let mut raw_intercepts = *intercepts;
        for c in 0..NUM_CLASSES {
            for j in 0..d {
                let e = coefficients[c * d + j] / standardizer.scales[j];
                raw[c * d + j] = e;
                raw_intercepts[c] -= e * standardizer.means[j];
            }
        }
        RawModel {
            coefficients: raw,
            intercepts: raw_intercepts,
        }
    }

    fn probabilities(&self, row: &[f64]) -> [f64; NUM_CLASSES] {
        let d = row.len();
        let mut scores = self.intercepts;
        for (c, score) in scores.iter_mut().enumerate() {
            *score += dot(&self.coefficients[c * d..(c + 1) * d], row);
        }
        softmax_in_place(&mut scores);
        scores
    }
}

/// Training problem: the raw matrix, labels and normalized sample weights.
struct Problem<'a> {
    x: &'a FeatureMatrix,
    y: &'a [Label],
    weights: Vec<f64>,
    standardizer: &'a Standardizer,
    penalty: Penalty,
    lambda: f64,
}

impl Problem<'_> {
    fn n_coefficients(&self) -> usize {
        NUM_CLASSES * self.x.n_cols()
    }

    /// Objective value and gradient of its smooth part. Parameters are the
    /// standardized coefficients followed by the intercepts.
    fn evaluate(&self, theta: &[f64]) -> (f64, Vec<f64>) {
        let d = self.x.n_cols();
        let n_coef = self.n_coefficients();
        let intercepts: [f64; NUM_CLASSES] = [theta[n_coef], theta[n_coef + 1], theta[n_coef + 2]];
        let model = RawModel::fold(self.standardizer, &theta[..n_coef], &intercepts);

        // Gradient over raw inputs; the last NUM_CLASSES entries accumulate
        // the per-class residual sums.
        let zero = || (0.0, vec![0.0; n_coef + NUM_CLASSES]);
        let (data_loss, raw_grad) = (0..self.x.n_rows())
            .into_par_iter()
            .fold(zero, |(mut loss, mut grad), i| {
                let row = self.x.row(i);
                let p = model.probabilities(row);
                let target = self.y[i].index();
                let w = self.weights[i];
                loss -= w * p[target].max(f64::MIN_POSITIVE).ln();
                for (c, &pc) in p.iter().enumerate() {
                    let g = w * (pc - if c == target { 1.0 } else { 0.0 });
                    if g != 0.0 {
                        for (gj, xj) in grad[c * d..(c + 1) * d].iter_mut().zip(row) {
                            *gj += g * xj;
                        }
                        grad[n_coef + c] += g;
                    }
                }
                (loss, grad)
            })
            .reduce(zero, |(la, mut ga), (lb, gb)| {
                ga.iter_mut().zip(&gb).for_each(|(a, b)| *a += b);
                (la + lb, ga)
            });

        let mut grad = raw_grad;
        for c in 0..NUM_CLASSES {
            let residual = grad[n_coef + c];
            for j in 0..d {
                let k = c * d + j;
                grad[k] = (grad[k] - self.standardizer.means[j] * residual)
                    / self.standardizer.scales[j];
            }
        }

        let coefficients = &theta[..n_coef];
        let penalty = match self.penalty {
            Penalty::L1 => coefficients.iter().map(|w| w.abs()).sum::<f64>(),
            Penalty::L2 => {
                for (g, w) in grad[..n_coef].iter_mut().zip(coefficients) {
                    *g += self.lambda * w;
                }
                0.5 * coefficients.iter().map(|w| w * w).sum::<f64>()
            }
        };

        (data_loss + self.lambda * penalty, grad)
    }

    /// Gradient step followed by soft-thresholding for the L1 penalty.
    fn step(&self, theta: &[f64], grad: &[f64], step: f64) -> Vec<f64> {
        let n_coef = self.n_coefficients();
        let threshold = step * self.lambda;
        theta
            .iter()
            .zip(grad)
            .enumerate()
            .map(|(k, (w, g))| {
                let moved = w - step * g;
                if self.penalty == Penalty::L1 && k < n_coef {
                    moved.signum() * (moved.abs() - threshold).max(0.0)
                } else {
                    moved
                }
            })
            .collect()
    }
}

/// Multinomial logistic regression over standardized inputs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogisticRegression {
    params: LogisticRegressionParams,
    standardizer: Option<Standardizer>,
    /// Standardized-space coefficients, `NUM_CLASSES x n_features`.
    coefficients: Vec<f64>,
    intercepts: [f64; NUM_CLASSES],
    stats: Option<TrainingStats>,
}

impl LogisticRegression {
    /// Create an untrained model.
    pub fn new(params: LogisticRegressionParams) -> Self {
        LogisticRegression {
            params,
            standardizer: None,
            coefficients: Vec::new(),
            intercepts: [0.0; NUM_CLASSES],
            stats: None,
        }
    }

    pub fn params(&self) -> &LogisticRegressionParams {
        &self.params
    }

    /// Standardized-space coefficients of `label`.
    pub fn coefficients(&self, label: Label) -> &[f64] {
        let d = self.n_features().unwrap_or(0);
        &self.coefficients[label.index() * d..(label.index() + 1) * d]
    }

    pub fn intercepts(&self) -> &[f64; NUM_CLASSES] {
        &self.intercepts
    }

    pub fn training_stats(&self) -> Option<&TrainingStats> {
        self.stats.as_ref()
    }

    /// Largest absolute standardized coefficient of every column.
    pub fn feature_importances(&self) -> Vec<f64> {
        let d = self.n_features().unwrap_or(0);
        (0..d)
            .map(|j| {
                (0..NUM_CLASSES)
                    .map(|c| self.coefficients[c * d + j].abs())
                    .fold(0.0, f64::max)
            })
            .collect()
    }

    /// Check that a restored model is internally consistent: one
    /// coefficient per class and standardized column, and no coefficients
    /// without column statistics.
    pub fn check(&self) -> Result<()> {
        match &self.standardizer {
            Some(standardizer) => {
                standardizer.check()?;
                let expected = NUM_CLASSES * standardizer.n_features();
                if self.coefficients.len() != expected {
                    return Err(TweetsieveError::width_mismatch(
                        "logistic regression coefficients",
                        expected,
                        self.coefficients.len(),
                    ));
                }
            }
            None if !self.coefficients.is_empty() => {
                return Err(TweetsieveError::model(
                    "logistic regression has coefficients but no column statistics",
                ));
            }
            None => {}
        }
        Ok(())
    }

    fn sample_weights(&self, y: &[Label]) -> Vec<f64> {
        if !self.params.balanced_class_weights {
            return vec![1.0; y.len()];
        }
        let mut counts = [0usize; NUM_CLASSES];
        for label in y {
            counts[label.index()] += 1;
        }
        let present = counts.iter().filter(|&&c| c > 0).count() as f64;
        let n = y.len() as f64;
        y.iter()
            .map(|label| n / (present * counts[label.index()] as f64))
            .collect()
    }
}

impl Classifier for LogisticRegression {
    fn fit(&mut self, x: &FeatureMatrix, y: &[Label]) -> Result<()> {
        if x.n_rows() != y.len() {
            return Err(TweetsieveError::model(format!(
                "{} rows but {} labels",
                x.n_rows(),
                y.len()
            )));
        }
        if y.is_empty() {
            return Err(TweetsieveError::model("cannot train on an empty matrix"));
        }

        let start = Instant::now();
        let standardizer = Standardizer::fit(x);
        let weights = self.sample_weights(y);
        let total_weight: f64 = weights.iter().sum();
        let problem = Problem {
            x,
            y,
            weights: weights.iter().map(|w| w / total_weight).collect(),
            standardizer: &standardizer,
            penalty: self.params.penalty,
            lambda: 1.0 / (self.params.c * total_weight),
        };

        let mut theta = vec![0.0; problem.n_coefficients() + NUM_CLASSES];
        let (mut loss, mut grad) = problem.evaluate(&theta);
        let mut step = self.params.learning_rate;
        let mut iterations = 0;
        let mut converged = false;

        while iterations < self.params.max_iter {
            iterations += 1;
            let candidate = problem.step(&theta, &grad, step);
            let (candidate_loss, candidate_grad) = problem.evaluate(&candidate);

            if candidate_loss.is_finite() && candidate_loss <= loss {
                let update = theta
                    .iter()
                    .zip(&candidate)
                    .map(|(a, b)| (a - b).abs())
                    .fold(0.0, f64::max)
                    / step;
                theta = candidate;
                loss = candidate_loss;
                grad = candidate_grad;
                if update < self.params.tolerance {
                    converged = true;
                    break;
                }
            } else {
                step *= 0.5;
                if step < MIN_STEP {
                    converged = true;
                    break;
                }
            }
        }

        if !converged {
            warn!(
                "Logistic regression ({:?}) did not converge in {} iterations",
                self.params.penalty, self.params.max_iter
            );
        }
        debug!(
            "Logistic regression ({:?}, C={}) trained on {}x{}: loss {loss:.6} after {iterations} iterations",
            self.params.penalty,
            self.params.c,
            x.n_rows(),
            x.n_cols()
        );

        let n_coef = problem.n_coefficients();
        self.intercepts = [theta[n_coef], theta[n_coef + 1], theta[n_coef + 2]];
        theta.truncate(n_coef);
        self.coefficients = theta;
        self.standardizer = Some(standardizer);
        self.stats = Some(TrainingStats {
            iterations,
            final_loss: loss,
            converged,
            training_time_ms: start.elapsed().as_millis() as u64,
        });
        Ok(())
    }

    fn predict_proba(&self, x: &FeatureMatrix) -> Result<Vec<[f64; NUM_CLASSES]>> {
        let standardizer = self
            .standardizer
            .as_ref()
            .ok_or_else(|| TweetsieveError::model("logistic regression is not trained"))?;
        if x.n_cols() != standardizer.n_features() {
            return Err(TweetsieveError::width_mismatch(
                "classifier input",
                standardizer.n_features(),
                x.n_cols(),
            ));
        }

        let model = RawModel::fold(standardizer, &self.coefficients, &self.intercepts);
        Ok((0..x.n_rows())
            .into_par_iter()
            .map(|i| model.probabilities(x.row(i)))
            .collect())
    }

    fn n_features(&self) -> Option<usize> {
        self.standardizer.as_ref().map(Standardizer::n_features)
    }

    fn name(&self) -> &'static str {
        "logistic_regression"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn three_class_data() -> (FeatureMatrix, Vec<Label>) {
        let rows = vec![
            vec![5.0, 0.0, 1.0],
            vec![4.5, 0.5, 1.0],
            vec![0.0, 5.0, 1.0],
            vec![0.5, 4.0, 1.0],
            vec![0.0, 0.0, 1.0],
            vec![0.3, 0.2, 1.0],
        ];
        let y = vec![
            Label::HateSpeech,
            Label::HateSpeech,
            Label::Offensive,
            Label::Offensive,
            Label::Neither,
            Label::Neither,
        ];
        (FeatureMatrix::from_rows(rows, 3).unwrap(), y)
    }

    #[test]
    fn test_fit_predict() {
        let (x, y) = three_class_data();
        let mut model = LogisticRegression::new(LogisticRegressionParams::default());
        assert!(!model.is_trained());

        model.fit(&x, &y).unwrap();
        assert_eq!(model.n_features(), Some(3));
        assert_eq!(model.predict(&x).unwrap(), y);

        for p in model.predict_proba(&x).unwrap() {
            assert!((p.iter().sum::<f64>() - 1.0).abs() < 1e-9);
        }
        assert!(model.training_stats().unwrap().iterations > 0);
    }

    #[test]
    fn test_constant_column_has_no_weight() {
        let (x, y) = three_class_data();
        let mut model = LogisticRegression::new(LogisticRegressionParams::default());
        model.fit(&x, &y).unwrap();

        for label in Label::ALL {
            assert_eq!(model.coefficients(label)[2], 0.0);
        }
    }

    #[test]
    fn test_strong_l1_zeroes_coefficients() {
        let (x, y) = three_class_data();
        let params = LogisticRegressionParams {
            penalty: Penalty::L1,
            c: 1e-4,
            ..LogisticRegressionParams::default()
        };
        let mut model = LogisticRegression::new(params);
        model.fit(&x, &y).unwrap();

        assert!(model.feature_importances().iter().all(|&w| w == 0.0));
    }

    #[test]
    fn test_width_mismatch_and_untrained() {
        let (x, y) = three_class_data();
        let mut model = LogisticRegression::new(LogisticRegressionParams::default());
        assert!(model.predict(&x).is_err());

        model.fit(&x, &y).unwrap();
        let narrow = FeatureMatrix::zeros(1, 2);
        assert!(matches!(
            model.predict(&narrow).unwrap_err(),
            TweetsieveError::FeatureWidthMismatch { expected: 3, actual: 2, .. }
        ));
    }

    #[test]
    fn test_balanced_weights() {
        let model = LogisticRegression::new(LogisticRegressionParams::default());
        let weights =
            model.sample_weights(&[Label::Offensive, Label::Offensive, Label::Offensive, Label::Neither]);
        assert_eq!(weights, vec![4.0 / 6.0, 4.0 / 6.0, 4.0 / 6.0, 2.0]);
    }

    #[test]
    fn test_standardizer() {
        let x = FeatureMatrix::from_rows(vec![vec![1.0, 7.0], vec![3.0, 7.0]], 2).unwrap();
        let standardizer = Standardizer::fit(&x);
        assert_eq!(standardizer.means(), &[2.0, 7.0]);
        assert_eq!(standardizer.scales(), &[1.0, 1.0]);

        assert!(standardizer.check().is_ok());
    }

    #[test]
    fn test_check_rejects_inconsistent_parts() {
        let (x, y) = three_class_data();
        let mut model = LogisticRegression::new(LogisticRegressionParams::default());
        assert!(model.check().is_ok());

        model.fit(&x, &y).unwrap();
        assert!(model.check().is_ok());

        let mut truncated = model.clone();
        truncated.coefficients.truncate(4);
        assert!(matches!(
            truncated.check().unwrap_err(),
            TweetsieveError::FeatureWidthMismatch { expected: 9, actual: 4, .. }
        ));

        let mut short_scales = model.clone();
        if let Some(standardizer) = short_scales.standardizer.as_mut() {
            standardizer.scales.pop();
        }
        assert!(short_scales.check().is_err());

        let mut zero_scale = model.clone();
        if let Some(standardizer) = zero_scale.standardizer.as_mut() {
            standardizer.scales[0] = 0.0;
        }
        assert!(zero_scale.check().is_err());

        let mut orphaned = model;
        orphaned.standardizer = None;
        assert!(orphaned.check().is_err());
    }

    #[test]
    fn test_serde_round_trip() {
        let (x, y) = three_class_data();
        let mut model = LogisticRegression::new(LogisticRegressionParams::default());
        model.fit(&x, &y).unwrap();

        let json = serde_json::to_string(&model).unwrap();
        let restored: LogisticRegression = serde_json::from_str(&json).unwrap();
        assert_eq!(restored.predict(&x).unwrap(), y);
    }
}
