//! Auxiliary feature block: 17 readability, sentiment, lexical-diversity and
//! social-media statistics per document. Nothing is fitted.
//!
//! Readability scores treat the whole text as one sentence. Word-level
//! statistics are taken over the normalized text (URLs and mentions deleted),
//! character and term totals over the raw text, and social-media objects are
//! counted through the marker substitution of
//! [`count_social_objects`](crate::normalize::count_social_objects).
//!
//! # Examples
//!
//! ```
//! use tweetsieve::features::auxiliary::{AuxiliaryExtractor, AUXILIARY_FEATURE_NAMES};
//!
//! let extractor = AuxiliaryExtractor::new();
//! let features = extractor.extract("RT @bob: check http://a.co #x #y").unwrap();
//!
//! assert_eq!(features.len(), AUXILIARY_FEATURE_NAMES.len());
//! assert_eq!(features[13], 2.0); // hashtags
//! assert_eq!(features[16], 1.0); // retweet
//! ```

use std::collections::HashSet;
use std::sync::Arc;

use log::warn;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::features::matrix::FeatureMatrix;
use crate::linguistics::sentiment::{LexiconSentimentScorer, SentimentScorer, SentimentScores};
use crate::linguistics::syllable::count_syllables;
use crate::normalize::{SocialObjectCounts, count_social_objects, normalize};
use crate::util::numeric::round_to;

/// Number of auxiliary columns.
pub const AUXILIARY_FEATURE_COUNT: usize = 17;

/// Auxiliary column names, in column order.
pub const AUXILIARY_FEATURE_NAMES: [&str; AUXILIARY_FEATURE_COUNT] = [
    "FKRA",
    "FRE",
    "num_syllables",
    "avg_syl_per_word",
    "num_chars",
    "num_chars_total",
    "num_terms",
    "num_words",
    "num_unique_words",
    "vader neg",
    "vader pos",
    "vader neu",
    "vader compound",
    "num_hashtags",
    "num_mentions",
    "num_urls",
    "is_retweet",
];

/// Auxiliary statistics of one document.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AuxiliaryFeatures {
    /// Modified Flesch-Kincaid grade level.
    pub fkra: f64,
    /// Modified Flesch reading ease.
    pub fre: f64,
    pub syllables: usize,
    pub avg_syllables_per_word: f64,
    /// Characters of the normalized words, spaces excluded.
    pub num_chars: usize,
    /// Characters of the raw text.
    pub num_chars_total: usize,
    /// Whitespace-delimited terms of the raw text.
    pub num_terms: usize,
    /// Whitespace-delimited words of the normalized text.
    pub num_words: usize,
    pub num_unique_words: usize,
    pub sentiment: SentimentScores,
    pub social: SocialObjectCounts,
    pub is_retweet: bool,
}

impl AuxiliaryFeatures {
    /// Values in column order.
    pub fn to_array(&self) -> [f64; AUXILIARY_FEATURE_COUNT] {
        [
            self.fkra,
            self.fre,
            self.syllables as f64,
            self.avg_syllables_per_word,
            self.num_chars as f64,
            self.num_chars_total as f64,
            self.num_terms as f64,
            self.num_words as f64,
            self.num_unique_words as f64,
            self.sentiment.neg,
            self.sentiment.pos,
            self.sentiment.neu,
            self.sentiment.compound,
            self.social.hashtags as f64,
            self.social.mentions as f64,
            self.social.urls as f64,
            if self.is_retweet { 1.0 } else { 0.0 },
        ]
    }
}

/// Computes the auxiliary block with a pluggable sentiment scorer.
#[derive(Clone)]
pub struct AuxiliaryExtractor {
    scorer: Arc<dyn SentimentScorer>,
}

impl std::fmt::Debug for AuxiliaryExtractor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuxiliaryExtractor")
            .field("scorer", &self.scorer.name())
            .finish()
    }
}

impl Default for AuxiliaryExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl AuxiliaryExtractor {
    /// Create an extractor with the built-in lexicon scorer.
    pub fn new() -> Self {
        Self::with_scorer(Arc::new(LexiconSentimentScorer::new()))
    }

    /// Create an extractor with a custom sentiment scorer.
    pub fn with_scorer(scorer: Arc<dyn SentimentScorer>) -> Self {
        AuxiliaryExtractor { scorer }
    }

    /// Compute the statistics of one document. Fails only if the sentiment
    /// scorer fails.
    pub fn compute(&self, text: &str) -> Result<AuxiliaryFeatures> {
        let sentiment = self.scorer.polarity_scores(text)?;

        let normalized = normalize(text);
        let words: Vec<&str> = normalized.split_whitespace().collect();

        let syllables = count_syllables(&normalized);
        let num_words = words.len();
        let num_chars = words.iter().map(|w| w.chars().count()).sum();
        let num_unique_words = words.iter().collect::<HashSet<_>>().len();

        let avg_syllables_per_word =
            round_to((syllables as f64 + 0.001) / (num_words as f64 + 0.001), 4);
        let fkra = round_to(
            0.39 * num_words as f64 + 11.8 * avg_syllables_per_word - 15.59,
            1,
        );
        let fre = round_to(
            206.835 - 1.015 * num_words as f64 - 84.6 * avg_syllables_per_word,
            2,
        );

        let is_retweet = words.iter().any(|w| w.to_lowercase() == "rt");

        Ok(AuxiliaryFeatures {
            fkra,
            fre,
            syllables,
            avg_syllables_per_word,
            num_chars,
            num_chars_total: text.chars().count(),
            num_terms: text.split_whitespace().count(),
            num_words,
            num_unique_words,
            sentiment,
            social: count_social_objects(text),
            is_retweet,
        })
    }

    /// The 17 auxiliary values of one document, in column order.
    pub fn extract(&self, text: &str) -> Result<[f64; AUXILIARY_FEATURE_COUNT]> {
        Ok(self.compute(text)?.to_array())
    }

    /// Auxiliary block of a batch. A document whose extraction fails is
    /// logged and gets a row of zeros.
    pub fn transform<S: AsRef<str> + Sync>(&self, texts: &[S]) -> FeatureMatrix {
        let rows: Vec<[f64; AUXILIARY_FEATURE_COUNT]> = texts
            .par_iter()
            .enumerate()
            .map(|(i, text)| {
                self.extract(text.as_ref()).unwrap_or_else(|e| {
                    warn!("Auxiliary feature extraction failed for document {i}, using zeros: {e}");
                    [0.0; AUXILIARY_FEATURE_COUNT]
                })
            })
            .collect();

        let mut matrix = FeatureMatrix::zeros(rows.len(), AUXILIARY_FEATURE_COUNT);
        for (i, row) in rows.iter().enumerate() {
            matrix.row_mut(i).copy_from_slice(row);
        }
        matrix
    }

    /// Name of the sentiment scorer in use.
    pub fn scorer_name(&self) -> &'static str {
        self.scorer.name()
    }
}
