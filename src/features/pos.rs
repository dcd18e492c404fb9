//! Part-of-speech feature block: raw counts of tag n-grams.
//!
//! Each document is tokenized with the unstemmed tweet chain, tagged, and the
//! space-joined tag string is re-tokenized with `\b\w\w+\b`. Single-character
//! tags such as `.` and `,` therefore never form n-grams, and `PRP$` reads as
//! `PRP`.

use log::{info, warn};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::analysis::analyzer::Analyzer;
use crate::analysis::analyzer::tweet::tagging_analyzer;
use crate::analysis::tokenizer::Tokenizer;
use crate::analysis::tokenizer::regex::RegexTokenizer;
use crate::config::PosConfig;
use crate::error::{Result, TweetsieveError};
use crate::features::matrix::FeatureMatrix;
use crate::features::vectorizer::{Vocabulary, count_matrix, fit_vocabulary};
use crate::linguistics::tagger::{PosTagger, tags_to_string};

/// Tag string of one document, tags separated by single spaces. `analyzer`
/// is normally [`tagging_analyzer`].
pub fn tag_document(
    text: &str,
    analyzer: &dyn Analyzer,
    tagger: &dyn PosTagger,
) -> Result<String> {
    let tokens = analyzer.analyze_terms(text)?;
    let tags = tagger.tag_sequence(&tokens)?;
    if tags.len() != tokens.len() {
        return Err(TweetsieveError::analysis(format!(
            "tagger {} returned {} tags for {} tokens",
            tagger.name(),
            tags.len(),
            tokens.len()
        )));
    }
    Ok(tags_to_string(&tags))
}

/// Tag tokens of every document. A document whose tagging fails is logged
/// and yields no tokens, so its row is all zeros.
fn tag_corpus<S: AsRef<str> + Sync>(
    corpus: &[S],
    tagger: &dyn PosTagger,
) -> Result<Vec<Vec<String>>> {
    let analyzer = tagging_analyzer()?;
    let tag_tokenizer = RegexTokenizer::new()?;
    corpus
        .par_iter()
        .enumerate()
        .map(|(i, text)| {
            let tag_string = match tag_document(text.as_ref(), &analyzer, tagger) {
                Ok(tag_string) => tag_string,
                Err(e) => {
                    warn!("Part-of-speech tagging failed for document {i}, using zeros: {e}");
                    String::new()
                }
            };
            Ok(tag_tokenizer.tokenize(&tag_string)?.map(|t| t.text).collect())
        })
        .collect()
}

/// Fitted part-of-speech vectorizer: configuration and tag n-gram vocabulary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PosVectorizer {
    config: PosConfig,
    vocabulary: Vocabulary,
}

impl PosVectorizer {
    /// Fit the tag n-gram vocabulary over `corpus`.
    pub fn fit<S: AsRef<str> + Sync>(
        corpus: &[S],
        config: &PosConfig,
        tagger: &dyn PosTagger,
    ) -> Result<Self> {
        Ok(Self::fit_transform(corpus, config, tagger)?.0)
    }

    /// Fit and transform the same corpus, tagging it once.
    pub fn fit_transform<S: AsRef<str> + Sync>(
        corpus: &[S],
        config: &PosConfig,
        tagger: &dyn PosTagger,
    ) -> Result<(Self, FeatureMatrix)> {
        let docs = tag_corpus(corpus, tagger)?;
        let fit = fit_vocabulary(&docs, &config.vectorizer_params())?;
        info!(
            "Part-of-speech vocabulary fitted: {} columns from {} documents",
            fit.vocabulary.len(),
            fit.n_documents
        );

        let vectorizer = PosVectorizer {
            config: config.clone(),
            vocabulary: fit.vocabulary,
        };
        let matrix = count_matrix(&docs, &vectorizer.vocabulary, config.ngram_range);
        Ok((vectorizer, matrix))
    }

    /// Tag n-gram counts of `texts` over the fitted vocabulary.
    pub fn transform<S: AsRef<str> + Sync>(
        &self,
        texts: &[S],
        tagger: &dyn PosTagger,
    ) -> Result<FeatureMatrix> {
        let docs = tag_corpus(texts, tagger)?;
        Ok(count_matrix(&docs, &self.vocabulary, self.config.ngram_range))
    }

    /// Number of part-of-speech columns.
    pub fn n_features(&self) -> usize {
        self.vocabulary.len()
    }

    /// Column names: the tag n-grams.
    pub fn feature_names(&self) -> Vec<String> {
        self.vocabulary.terms().to_vec()
    }

    /// The fitted vocabulary.
    pub fn vocabulary(&self) -> &Vocabulary {
        &self.vocabulary
    }

    /// The configuration the vectorizer was fitted with.
    pub fn config(&self) -> &PosConfig {
        &self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::linguistics::tagger::{PennTag, RuleBasedTagger};

    struct FailingTagger;

    impl PosTagger for FailingTagger {
        fn tag_sequence(&self, _tokens: &[String]) -> Result<Vec<PennTag>> {
            Err(TweetsieveError::analysis("tagger unavailable"))
        }

        fn name(&self) -> &'static str {
            "failing"
        }
    }

    struct ShortTagger;

    impl PosTagger for ShortTagger {
        fn tag_sequence(&self, _tokens: &[String]) -> Result<Vec<PennTag>> {
            Ok(vec![PennTag::Noun])
        }

        fn name(&self) -> &'static str {
            "short"
        }
    }

    fn config(min_df: usize, max_df: f64) -> PosConfig {
        PosConfig {
            min_df,
            max_df,
            ..PosConfig::default()
        }
    }

    #[test]
    fn test_tag_document() {
        let analyzer = tagging_analyzer().unwrap();
        let tagger = RuleBasedTagger::new();
        assert_eq!(
            tag_document("@bob you will regret it !!", &analyzer, &tagger).unwrap(),
            "PRP MD VB PRP ."
        );
        assert_eq!(tag_document("", &analyzer, &tagger).unwrap(), "");
    }

    #[test]
    fn test_tag_count_mismatch_is_an_error() {
        let analyzer = tagging_analyzer().unwrap();
        assert!(tag_document("two tokens", &analyzer, &ShortTagger).is_err());
    }

    #[test]
    fn test_fit_counts_tag_ngrams() {
        let tagger = RuleBasedTagger::new();
        let corpus = ["you hate them", "they hate you", "the game"];
        let (vectorizer, matrix) =
            PosVectorizer::fit_transform(&corpus, &config(2, 1.0), &tagger).unwrap();

        // "PRP VBP PRP" twice, "DT NN" once.
        assert_eq!(
            vectorizer.feature_names(),
            ["PRP", "PRP VBP", "PRP VBP PRP", "VBP", "VBP PRP"]
        );
        assert_eq!(matrix.row(0), &[2.0, 1.0, 1.0, 1.0, 1.0]);
        assert!(matrix.row(2).iter().all(|&v| v == 0.0));
    }

    #[test]
    fn test_single_character_tags_are_ignored() {
        let tagger = RuleBasedTagger::new();
        let corpus = ["lol !!", "lol ,", "lol ?"];
        let vectorizer = PosVectorizer::fit(&corpus, &config(1, 1.0), &tagger).unwrap();
        assert_eq!(vectorizer.feature_names(), ["UH"]);
    }

    #[test]
    fn test_failed_tagging_degrades_to_zero_rows() {
        let tagger = RuleBasedTagger::new();
        let corpus = ["you hate them", "they hate you"];
        let vectorizer = PosVectorizer::fit(&corpus, &config(1, 1.0), &tagger).unwrap();

        let matrix = vectorizer.transform(&corpus, &FailingTagger).unwrap();
        assert_eq!(matrix.shape(), (2, vectorizer.n_features()));
        assert!(matrix.as_slice().iter().all(|&v| v == 0.0));
    }
}
