//! Lexical feature block: word n-gram tf-idf weights.
//!
//! Tokens come from the stemmed tweet chain
//! ([`lexical_analyzer`](crate::analysis::analyzer::tweet::lexical_analyzer)).
//! Each column holds `count * idf` with `idf = ln(n_docs / df) + 1`, computed
//! once over the fit corpus. Rows are not normalized.
//!
//! # Examples
//!
//! ```
//! use tweetsieve::config::LexicalConfig;
//! use tweetsieve::features::lexical::LexicalVectorizer;
//!
//! let corpus = ["bad game", "bad call", "nice game", "nice call"];
//! let config = LexicalConfig { min_df: 2, max_df: 1.0, ..LexicalConfig::default() };
//! let vectorizer = LexicalVectorizer::fit(&corpus, &config).unwrap();
//!
//! assert_eq!(vectorizer.feature_names(), ["bad", "call", "game", "nice"]);
//!
//! let matrix = vectorizer.transform(&["bad bad weather"]).unwrap();
//! let idf = (4.0f64 / 2.0).ln() + 1.0;
//! assert_eq!(matrix.row(0), &[2.0 * idf, 0.0, 0.0, 0.0]);
//! ```

use log::{debug, info};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::analysis::analyzer::Analyzer;
use crate::analysis::analyzer::pipeline::PipelineAnalyzer;
use crate::analysis::analyzer::tweet::lexical_analyzer;
use crate::config::LexicalConfig;
use crate::error::{Result, TweetsieveError};
use crate::features::matrix::FeatureMatrix;
use crate::features::vectorizer::{Vocabulary, count_row, fit_vocabulary};

/// Per-column inverse document frequency weights.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WeightTable {
    weights: Vec<f64>,
}

impl WeightTable {
    /// Unsmoothed idf, `ln(n_documents / df) + 1`, for every column.
    pub fn from_document_frequencies(document_frequencies: &[usize], n_documents: usize) -> Self {
        let n = n_documents as f64;
        WeightTable {
            weights: document_frequencies
                .iter()
                .map(|&df| (n / df as f64).ln() + 1.0)
                .collect(),
        }
    }

    /// Weight of column `index`.
    pub fn get(&self, index: usize) -> Option<f64> {
        self.weights.get(index).copied()
    }

    /// Number of columns.
    pub fn len(&self) -> usize {
        self.weights.len()
    }

    /// Check if the table has no columns.
    pub fn is_empty(&self) -> bool {
        self.weights.is_empty()
    }

    /// Weights in column order.
    pub fn as_slice(&self) -> &[f64] {
        &self.weights
    }
}

/// Fitted lexical vectorizer: configuration, vocabulary and idf weights.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LexicalVectorizer {
    config: LexicalConfig,
    vocabulary: Vocabulary,
    weights: WeightTable,
}

impl LexicalVectorizer {
    /// Fit the vocabulary and idf weights over `corpus`.
    pub fn fit<S: AsRef<str> + Sync>(corpus: &[S], config: &LexicalConfig) -> Result<Self> {
        let analyzer = lexical_analyzer(&config.extra_stop_words)?;
        let docs = tokenize_corpus(&analyzer, corpus)?;
        Self::fit_tokenized(&docs, config)
    }

    /// Fit and transform the same corpus, tokenizing it once.
    pub fn fit_transform<S: AsRef<str> + Sync>(
        corpus: &[S],
        config: &LexicalConfig,
    ) -> Result<(Self, FeatureMatrix)> {
        let analyzer = lexical_analyzer(&config.extra_stop_words)?;
        let docs = tokenize_corpus(&analyzer, corpus)?;
        let vectorizer = Self::fit_tokenized(&docs, config)?;
        let matrix = vectorizer.weigh(&docs);
        Ok((vectorizer, matrix))
    }

    fn fit_tokenized(docs: &[Vec<String>], config: &LexicalConfig) -> Result<Self> {
        let fit = fit_vocabulary(docs, &config.vectorizer_params())?;
        let weights =
            WeightTable::from_document_frequencies(&fit.document_frequencies, fit.n_documents);
        info!(
            "Lexical vocabulary fitted: {} columns from {} documents",
            fit.vocabulary.len(),
            fit.n_documents
        );

        Ok(LexicalVectorizer {
            config: config.clone(),
            vocabulary: fit.vocabulary,
            weights,
        })
    }

    /// Tf-idf rows of `texts` over the fitted vocabulary. Unknown n-grams
    /// contribute nothing and the width is always the vocabulary size.
    pub fn transform<S: AsRef<str> + Sync>(&self, texts: &[S]) -> Result<FeatureMatrix> {
        self.check()?;
        let analyzer = lexical_analyzer(&self.config.extra_stop_words)?;
        let docs = tokenize_corpus(&analyzer, texts)?;
        Ok(self.weigh(&docs))
    }

    fn weigh(&self, docs: &[Vec<String>]) -> FeatureMatrix {
        let mut matrix = FeatureMatrix::zeros(docs.len(), self.n_features());
        for (i, tokens) in docs.iter().enumerate() {
            let counts = count_row(tokens, &self.vocabulary, self.config.ngram_range);
            for ((value, count), weight) in matrix
                .row_mut(i)
                .iter_mut()
                .zip(counts)
                .zip(self.weights.as_slice())
            {
                *value = count * weight;
            }
        }
        debug!("Transformed {} documents into lexical features", docs.len());
        matrix
    }

    /// Check that the weight table matches the vocabulary.
    pub fn check(&self) -> Result<()> {
        if self.weights.len() != self.vocabulary.len() {
            return Err(TweetsieveError::width_mismatch(
                "lexical weights",
                self.vocabulary.len(),
                self.weights.len(),
            ));
        }
        Ok(())
    }

    /// Number of lexical columns.
    pub fn n_features(&self) -> usize {
        self.vocabulary.len()
    }

    /// Column names: the vocabulary n-grams.
    pub fn feature_names(&self) -> Vec<String> {
        self.vocabulary.terms().to_vec()
    }

    /// The fitted vocabulary.
    pub fn vocabulary(&self) -> &Vocabulary {
        &self.vocabulary
    }

    /// The fitted idf weights.
    pub fn weights(&self) -> &WeightTable {
        &self.weights
    }

    /// The configuration the vectorizer was fitted with.
    pub fn config(&self) -> &LexicalConfig {
        &self.config
    }
}

fn tokenize_corpus<S: AsRef<str> + Sync>(
    analyzer: &PipelineAnalyzer,
    corpus: &[S],
) -> Result<Vec<Vec<String>>> {
    corpus
        .par_iter()
        .map(|text| analyzer.analyze_terms(text.as_ref()))
        .collect()
}
