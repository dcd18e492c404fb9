//! Configuration for feature extraction and training.
//!
//! [`PipelineConfig::default`] uses these settings: word
//! n-grams 1 to 3 kept when they occur in at least 5 documents and at most
//! 75% of them (10,000 lexical and 5,000 part-of-speech columns at most), a
//! 10% held-out split with seed 42, 5 cross-validation folds and L1 feature
//! selection with `C = 0.01` ahead of an L2 model with `C = 1`.
//!
//! # Examples
//!
//! ```
//! use tweetsieve::config::PipelineConfig;
//!
//! let mut config = PipelineConfig::default();
//! assert_eq!(config.lexical.max_features, Some(10_000));
//! assert_eq!(config.pos.max_features, Some(5_000));
//!
//! config.training.cv_folds = 1;
//! assert!(config.validate().is_err());
//! ```

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Result, TweetsieveError};
use crate::features::vectorizer::VectorizerParams;

/// Settings of the lexical (word n-gram tf-idf) vectorizer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LexicalConfig {
    /// Smallest and largest n-gram length.
    pub ngram_range: (usize, usize),
    /// Minimum number of documents an n-gram must occur in.
    pub min_df: usize,
    /// Maximum fraction of documents an n-gram may occur in.
    pub max_df: f64,
    /// Maximum vocabulary size; `None` keeps every surviving n-gram.
    pub max_features: Option<usize>,
    /// Stop words added to the English and social-media list.
    pub extra_stop_words: Vec<String>,
}

impl Default for LexicalConfig {
    fn default() -> Self {
        Self {
            ngram_range: (1, 3),
            min_df: 5,
            max_df: 0.75,
            max_features: Some(10_000),
            extra_stop_words: Vec::new(),
        }
    }
}

impl LexicalConfig {
    /// Vocabulary parameters of this configuration.
    pub fn vectorizer_params(&self) -> VectorizerParams {
        VectorizerParams {
            ngram_range: self.ngram_range,
            min_df: self.min_df,
            max_df: self.max_df,
            max_features: self.max_features,
        }
    }
}

/// Settings of the part-of-speech n-gram count vectorizer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PosConfig {
    /// Smallest and largest tag n-gram length.
    pub ngram_range: (usize, usize),
    /// Minimum number of documents a tag n-gram must occur in.
    pub min_df: usize,
    /// Maximum fraction of documents a tag n-gram may occur in.
    pub max_df: f64,
    /// Maximum vocabulary size; `None` keeps every surviving n-gram.
    pub max_features: Option<usize>,
}

impl Default for PosConfig {
    fn default() -> Self {
        Self {
            ngram_range: (1, 3),
            min_df: 5,
            max_df: 0.75,
            max_features: Some(5_000),
        }
    }
}

impl PosConfig {
    /// Vocabulary parameters of this configuration.
    pub fn vectorizer_params(&self) -> VectorizerParams {
        VectorizerParams {
            ngram_range: self.ngram_range,
            min_df: self.min_df,
            max_df: self.max_df,
            max_features: self.max_features,
        }
    }
}

/// Settings of model selection and the classifiers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrainingConfig {
    /// Fraction of the dataset held out for evaluation.
    pub test_fraction: f64,
    /// Seed of the train/test shuffle and the fold assignment.
    pub random_seed: u64,
    /// Number of stratified cross-validation folds; 0 skips cross-validation.
    pub cv_folds: usize,
    /// Whether L1 feature selection runs ahead of the final model.
    pub feature_selection: bool,
    /// Inverse regularization strength of the L1 selection model.
    pub selection_c: f64,
    /// Columns whose largest absolute L1 coefficient reaches this are kept.
    pub selection_threshold: f64,
    /// Inverse regularization strength of the final L2 model.
    pub c: f64,
    /// Initial gradient step size; halved whenever a step fails to decrease the objective.
    pub learning_rate: f64,
    /// Maximum number of gradient descent iterations.
    pub max_iter: usize,
    /// Stop when the largest step-normalized parameter update falls below this.
    pub tolerance: f64,
    /// Weight classes inversely to their frequency.
    pub balanced_class_weights: bool,
}

impl Default for TrainingConfig {
    fn default() -> Self {
        Self {
            test_fraction: 0.1,
            random_seed: 42,
            cv_folds: 5,
            feature_selection: true,
            selection_c: 0.01,
            selection_threshold: 1e-5,
            c: 1.0,
            learning_rate: 0.1,
            max_iter: 1000,
            tolerance: 1e-4,
            balanced_class_weights: true,
        }
    }
}

/// Complete configuration of the feature pipeline and training.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    pub lexical: LexicalConfig,
    pub pos: PosConfig,
    pub training: TrainingConfig,
}

impl PipelineConfig {
    /// Load a configuration from a JSON file. Missing fields take their
    /// default values.
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref())?;
        Self::from_json_str(&content)
    }

    /// Parse a configuration from a JSON string and validate it.
    pub fn from_json_str(content: &str) -> Result<Self> {
        let config: PipelineConfig = serde_json::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Check every setting for a usable value.
    pub fn validate(&self) -> Result<()> {
        self.lexical.vectorizer_params().validate("lexical")?;
        self.pos.vectorizer_params().validate("pos")?;

        let training = &self.training;
        if !(training.test_fraction > 0.0 && training.test_fraction < 1.0) {
            return Err(TweetsieveError::invalid_config(format!(
                "test_fraction must be in (0, 1), got {}",
                training.test_fraction
            )));
        }
        if training.cv_folds == 1 {
            return Err(TweetsieveError::invalid_config(
                "cv_folds must be 0 (disabled) or at least 2",
            ));
        }
        for (name, value) in [
            ("selection_c", training.selection_c),
            ("c", training.c),
            ("learning_rate", training.learning_rate),
        ] {
            if !(value > 0.0 && value.is_finite()) {
                return Err(TweetsieveError::invalid_config(format!(
                    "{name} must be positive, got {value}"
                )));
            }
        }
        if training.max_iter == 0 {
            return Err(TweetsieveError::invalid_config("max_iter must be positive"));
        }
        if training.tolerance < 0.0 || training.selection_threshold < 0.0 {
            return Err(TweetsieveError::invalid_config(
                "tolerance and selection_threshold must not be negative",
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let config = PipelineConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.lexical.ngram_range, (1, 3));
        assert_eq!(config.lexical.min_df, 5);
        assert_eq!(config.pos.max_df, 0.75);
        assert_eq!(config.training.random_seed, 42);
        assert_eq!(config.training.selection_c, 0.01);
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config =
            PipelineConfig::from_json_str(r#"{"lexical": {"min_df": 2}, "training": {"cv_folds": 0}}"#)
                .unwrap();
        assert_eq!(config.lexical.min_df, 2);
        assert_eq!(config.lexical.max_features, Some(10_000));
        assert_eq!(config.training.cv_folds, 0);
        assert_eq!(config.pos, PosConfig::default());
    }

    #[test]
    fn test_invalid_values_are_rejected() {
        let mut config = PipelineConfig::default();
        config.lexical.ngram_range = (3, 1);
        assert!(config.validate().is_err());

        let mut config = PipelineConfig::default();
        config.pos.max_df = 1.5;
        assert!(config.validate().is_err());

        let mut config = PipelineConfig::default();
        config.training.test_fraction = 1.0;
        assert!(config.validate().is_err());

        let mut config = PipelineConfig::default();
        config.lexical.max_features = Some(0);
        assert!(config.validate().is_err());

        assert!(PipelineConfig::from_json_str(r#"{"training": {"c": -1.0}}"#).is_err());
    }

    #[test]
    fn test_round_trip_through_json() {
        let config = PipelineConfig::default();
        let json = serde_json::to_string(&config).unwrap();
        let parsed = PipelineConfig::from_json_str(&json).unwrap();
        assert_eq!(parsed, config);
    }
}
