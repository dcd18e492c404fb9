//! N-gram vocabulary fitting and counting shared by the lexical and
//! part-of-speech vectorizers.
//!
//! Documents arrive as token sequences. Fitting counts, for every n-gram,
//! the number of documents it occurs in and its total number of occurrences,
//! keeps n-grams whose document frequency lies in `[min_df, max_df * n_docs]`,
//! optionally keeps only the `max_features` most frequent of those, and
//! assigns column indices in ascending lexicographic order.
//!
//! # Examples
//!
//! ```
//! use tweetsieve::features::vectorizer::{VectorizerParams, fit_vocabulary};
//!
//! let docs: Vec<Vec<String>> = vec![
//!     vec!["bad".into(), "day".into()],
//!     vec!["bad".into(), "news".into()],
//!     vec!["good".into(), "day".into()],
//! ];
//! let params = VectorizerParams { ngram_range: (1, 1), min_df: 2, max_df: 1.0, max_features: None };
//! let fit = fit_vocabulary(&docs, &params).unwrap();
//!
//! assert_eq!(fit.vocabulary.terms(), ["bad", "day"]);
//! assert_eq!(fit.document_frequencies, [2, 2]);
//! ```

use ahash::AHashMap;
use log::{debug, warn};
use serde::{Deserialize, Serialize};

use crate::error::{Result, TweetsieveError};
use crate::features::matrix::FeatureMatrix;

/// Vocabulary pruning and n-gram parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VectorizerParams {
    /// Smallest and largest n-gram length, both inclusive.
    pub ngram_range: (usize, usize),
    /// Minimum document frequency (absolute count).
    pub min_df: usize,
    /// Maximum document frequency as a fraction of the corpus size.
    pub max_df: f64,
    /// Keep at most this many n-grams, the most frequent ones.
    pub max_features: Option<usize>,
}

impl Default for VectorizerParams {
    fn default() -> Self {
        Self {
            ngram_range: (1, 3),
            min_df: 5,
            max_df: 0.75,
            max_features: None,
        }
    }
}

impl VectorizerParams {
    /// Check the parameters. `stage` names the vectorizer in the error.
    pub fn validate(&self, stage: &str) -> Result<()> {
        let (min_n, max_n) = self.ngram_range;
        if min_n == 0 || min_n > max_n {
            return Err(TweetsieveError::invalid_config(format!(
                "{stage}: ngram_range must satisfy 1 <= min <= max, got ({min_n}, {max_n})"
            )));
        }
        if !(self.max_df > 0.0 && self.max_df <= 1.0) {
            return Err(TweetsieveError::invalid_config(format!(
                "{stage}: max_df must be in (0, 1], got {}",
                self.max_df
            )));
        }
        if self.max_features == Some(0) {
            return Err(TweetsieveError::invalid_config(format!(
                "{stage}: max_features must be positive"
            )));
        }
        Ok(())
    }
}

/// Mapping from n-gram string to column index.
///
/// Serialized as the list of terms in column order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<String>", into = "Vec<String>")]
pub struct Vocabulary {
    terms: Vec<String>,
    index: AHashMap<String, usize>,
}

impl From<Vec<String>> for Vocabulary {
    fn from(terms: Vec<String>) -> Self {
        let index = terms
            .iter()
            .enumerate()
            .map(|(i, term)| (term.clone(), i))
            .collect();
        Vocabulary { terms, index }
    }
}

impl From<Vocabulary> for Vec<String> {
    fn from(vocabulary: Vocabulary) -> Self {
        vocabulary.terms
    }
}

impl Vocabulary {
    /// Number of columns.
    pub fn len(&self) -> usize {
        self.terms.len()
    }

    /// Check if the vocabulary has no columns.
    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    /// Column index of `term`.
    pub fn get(&self, term: &str) -> Option<usize> {
        self.index.get(term).copied()
    }

    /// Term of column `index`.
    pub fn term(&self, index: usize) -> Option<&str> {
        self.terms.get(index).map(String::as_str)
    }

    /// Terms in column order.
    pub fn terms(&self) -> &[String] {
        &self.terms
    }
}

/// Result of fitting a vocabulary.
#[derive(Debug, Clone)]
pub struct VocabularyFit {
    pub vocabulary: Vocabulary,
    /// Document frequency of every column.
    pub document_frequencies: Vec<usize>,
    /// Number of documents in the fit corpus.
    pub n_documents: usize,
}

/// Contiguous n-grams of `tokens`, joined with single spaces.
///
/// Shorter n-grams come first, each length in token order.
pub fn ngrams(tokens: &[String], ngram_range: (usize, usize)) -> Vec<String> {
    let (min_n, max_n) = ngram_range;
    let mut grams = Vec::new();
    for n in min_n.max(1)..=max_n {
        if n > tokens.len() {
            break;
        }
        grams.extend(tokens.windows(n).map(|window| window.join(" ")));
    }
    grams
}

/// Occurrence count of every n-gram of `tokens`.
pub fn count_ngrams(tokens: &[String], ngram_range: (usize, usize)) -> AHashMap<String, usize> {
    let mut counts = AHashMap::new();
    for gram in ngrams(tokens, ngram_range) {
        *counts.entry(gram).or_insert(0) += 1;
    }
    counts
}

/// Fit a pruned vocabulary over tokenized documents.
///
/// An empty corpus, or one where nothing survives pruning, yields an empty
/// vocabulary.
pub fn fit_vocabulary(docs: &[Vec<String>], params: &VectorizerParams) -> Result<VocabularyFit> {
    params.validate("vectorizer")?;

    let n_documents = docs.len();
    debug!("Fitting vocabulary over {n_documents} documents");

    // n-gram -> (document frequency, total term frequency)
    let mut stats: AHashMap<String, (usize, usize)> = AHashMap::new();
    for tokens in docs {
        for (gram, count) in count_ngrams(tokens, params.ngram_range) {
            let entry = stats.entry(gram).or_insert((0, 0));
            entry.0 += 1;
            entry.1 += count;
        }
    }
    let candidate_count = stats.len();

    let max_doc_count = params.max_df * n_documents as f64;
    let mut kept: Vec<(String, usize, usize)> = stats
        .into_iter()
        .filter(|(_, (df, _))| *df >= params.min_df && (*df as f64) <= max_doc_count)
        .map(|(gram, (df, tf))| (gram, df, tf))
        .collect();
    debug!(
        "Document frequency pruning kept {} of {candidate_count} n-grams (min_df {}, max_df {:.2})",
        kept.len(),
        params.min_df,
        params.max_df
    );

    if let Some(limit) = params.max_features {
        if kept.len() > limit {
            kept.sort_by(|a, b| b.2.cmp(&a.2).then_with(|| a.0.cmp(&b.0)));
            kept.truncate(limit);
            debug!("Vocabulary capped at {limit} most frequent n-grams");
        }
    }

    kept.sort_by(|a, b| a.0.cmp(&b.0));

    if kept.is_empty() {
        warn!("No n-gram survived vocabulary pruning over {n_documents} documents");
    }

    let document_frequencies = kept.iter().map(|(_, df, _)| *df).collect();
    let terms: Vec<String> = kept.into_iter().map(|(gram, _, _)| gram).collect();
    debug!("Vocabulary fitted with {} columns", terms.len());

    Ok(VocabularyFit {
        vocabulary: Vocabulary::from(terms),
        document_frequencies,
        n_documents,
    })
}

/// Raw n-gram counts of one document over a fixed vocabulary.
///
/// N-grams outside the vocabulary are ignored.
pub fn count_row(
    tokens: &[String],
    vocabulary: &Vocabulary,
    ngram_range: (usize, usize),
) -> Vec<f64> {
    let mut row = vec![0.0; vocabulary.len()];
    if vocabulary.is_empty() {
        return row;
    }
    for gram in ngrams(tokens, ngram_range) {
        if let Some(column) = vocabulary.get(&gram) {
            row[column] += 1.0;
        }
    }
    row
}

/// Raw count matrix of tokenized documents over a fixed vocabulary.
pub fn count_matrix(
    docs: &[Vec<String>],
    vocabulary: &Vocabulary,
    ngram_range: (usize, usize),
) -> FeatureMatrix {
    let mut matrix = FeatureMatrix::zeros(docs.len(), vocabulary.len());
    for (i, tokens) in docs.iter().enumerate() {
        matrix
            .row_mut(i)
            .copy_from_slice(&count_row(tokens, vocabulary, ngram_range));
    }
    matrix
}

#[cfg(test)]
mod tests {
    use super::*;

    fn doc(text: &str) -> Vec<String> {
        text.split_whitespace().map(String::from).collect()
    }

    fn params(min_df: usize, max_df: f64, max_features: Option<usize>) -> VectorizerParams {
        VectorizerParams {
            ngram_range: (1, 3),
            min_df,
            max_df,
            max_features,
        }
    }

    #[test]
    fn test_ngrams() {
        let grams = ngrams(&doc("a b c"), (1, 3));
        assert_eq!(grams, vec!["a", "b", "c", "a b", "b c", "a b c"]);

        assert_eq!(ngrams(&doc("a"), (2, 3)), Vec::<String>::new());
        assert_eq!(ngrams(&[], (1, 3)), Vec::<String>::new());
    }

    #[test]
    fn test_count_ngrams() {
        let counts = count_ngrams(&doc("no no no"), (1, 2));
        assert_eq!(counts["no"], 3);
        assert_eq!(counts["no no"], 2);
    }

    #[test]
    fn test_pruning_drops_ubiquitous_and_rare_ngrams() {
        let docs = vec![
            doc("common alpha"),
            doc("common alpha"),
            doc("common beta"),
            doc("common gamma"),
        ];
        let fit = fit_vocabulary(&docs, &params(2, 0.75, None)).unwrap();

        // "common" is in 4/4 documents, above 0.75; "beta" and "gamma" are below min_df.
        assert_eq!(fit.vocabulary.terms(), ["alpha", "common alpha"]);
        assert_eq!(fit.document_frequencies, [2, 2]);
        assert_eq!(fit.n_documents, 4);
    }

    #[test]
    fn test_max_features_keeps_most_frequent() {
        let docs = vec![doc("x x x y z"), doc("x y z"), doc("y z w")];
        let mut p = params(1, 1.0, Some(2));
        p.ngram_range = (1, 1);
        let fit = fit_vocabulary(&docs, &p).unwrap();

        // x: 4 occurrences, y: 3, z: 3 (tie broken lexically), w: 1.
        assert_eq!(fit.vocabulary.terms(), ["x", "y"]);
    }

    #[test]
    fn test_empty_corpus_gives_empty_vocabulary() {
        let fit = fit_vocabulary(&[], &params(5, 0.75, Some(10))).unwrap();
        assert!(fit.vocabulary.is_empty());
        assert_eq!(fit.n_documents, 0);

        let matrix = count_matrix(&[doc("anything")], &fit.vocabulary, (1, 3));
        assert_eq!(matrix.n_rows(), 1);
        assert_eq!(matrix.n_cols(), 0);
    }

    #[test]
    fn test_count_row_ignores_unknown_ngrams() {
        let vocabulary = Vocabulary::from(vec!["a".to_string(), "a b".to_string()]);
        let row = count_row(&doc("a b a c"), &vocabulary, (1, 2));
        assert_eq!(row, vec![2.0, 1.0]);

        let row = count_row(&doc("zzz"), &vocabulary, (1, 2));
        assert_eq!(row, vec![0.0, 0.0]);
    }

    #[test]
    fn test_vocabulary_serializes_as_term_list() {
        let vocabulary = Vocabulary::from(vec!["a".to_string(), "b c".to_string()]);
        let json = serde_json::to_string(&vocabulary).unwrap();
        assert_eq!(json, r#"["a","b c"]"#);

        let parsed: Vocabulary = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.get("b c"), Some(1));
        assert_eq!(parsed.term(0), Some("a"));
    }

    #[test]
    fn test_invalid_params() {
        assert!(params(1, 0.0, None).validate("lexical").is_err());
        let mut p = params(1, 0.5, None);
        p.ngram_range = (0, 2);
        assert!(p.validate("pos").is_err());
    }
}
