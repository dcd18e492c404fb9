//! Lexicon and rule based sentiment scoring.
//!
//! [`LexiconSentimentScorer`] follows the VADER scoring scheme: word valences
//! from a lexicon, adjusted by preceding booster words, negations,
//! capitalization, a contrastive "but", and `!`/`?` emphasis. The summed
//! valence is squashed into a compound score in `[-1, 1]` and the per-word
//! valences are split into negative, neutral and positive proportions.
//!
//! # Examples
//!
//! ```
//! use tweetsieve::linguistics::sentiment::{LexiconSentimentScorer, SentimentScorer};
//!
//! let scorer = LexiconSentimentScorer::new();
//! let scores = scorer.polarity_scores("I hate this so much").unwrap();
//!
//! assert!(scores.compound < 0.0);
//! assert!(scores.neg > scores.pos);
//! ```

pub mod lexicon;

use ahash::{AHashMap, AHashSet};
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::util::numeric::round_to;

/// Increment added to a valence for an all-caps word in mixed-case text.
const CAPS_INCREMENT: f64 = 0.733;

/// Factor applied to a valence preceded by a negation.
const NEGATION_SCALAR: f64 = -0.74;

/// Squashing constant of the compound score.
const NORMALIZATION_ALPHA: f64 = 15.0;

const EXCLAMATION_INCREMENT: f64 = 0.292;
const MAX_EXCLAMATIONS: usize = 4;
const QUESTION_INCREMENT: f64 = 0.18;
const MAX_QUESTION_EMPHASIS: f64 = 0.96;

/// Sentiment proportions and compound score of one text.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct SentimentScores {
    pub neg: f64,
    pub neu: f64,
    pub pos: f64,
    pub compound: f64,
}

/// Trait for sentiment scorers.
pub trait SentimentScorer: Send + Sync {
    /// Score the text.
    fn polarity_scores(&self, text: &str) -> Result<SentimentScores>;

    /// Get the name of this scorer.
    fn name(&self) -> &'static str;
}

/// VADER-style scorer over a valence lexicon.
#[derive(Debug, Clone)]
pub struct LexiconSentimentScorer {
    valences: AHashMap<String, f64>,
    boosters: AHashMap<String, f64>,
    negations: AHashSet<String>,
}

impl Default for LexiconSentimentScorer {
    fn default() -> Self {
        Self::new()
    }
}

impl LexiconSentimentScorer {
    /// Create a scorer over the built-in lexicon.
    pub fn new() -> Self {
        LexiconSentimentScorer {
            valences: lexicon::VALENCES
                .iter()
                .map(|&(word, valence)| (word.to_string(), valence))
                .collect(),
            boosters: lexicon::BOOSTERS
                .iter()
                .map(|&(word, scalar)| (word.to_string(), scalar))
                .collect(),
            negations: lexicon::NEGATIONS.iter().map(|w| w.to_string()).collect(),
        }
    }

    /// Add or override word valences.
    pub fn with_valences<I, S>(mut self, valences: I) -> Self
    where
        I: IntoIterator<Item = (S, f64)>,
        S: Into<String>,
    {
        self.valences
            .extend(valences.into_iter().map(|(w, v)| (w.into().to_lowercase(), v)));
        self
    }

    /// Split text into scoring words: surrounding punctuation is stripped
    /// unless that leaves two characters or fewer, and one-character words
    /// are dropped.
    fn words(text: &str) -> Vec<&str> {
        text.split_whitespace()
            .map(|token| {
                let stripped = token.trim_matches(|c: char| c.is_ascii_punctuation());
                if stripped.chars().count() <= 2 {
                    token
                } else {
                    stripped
                }
            })
            .filter(|word| word.chars().count() > 1)
            .collect()
    }

    fn is_upper(word: &str) -> bool {
        word.chars().any(char::is_alphabetic) && !word.chars().any(char::is_lowercase)
    }

    fn is_negated(&self, word_lower: &str) -> bool {
        self.negations.contains(word_lower) || word_lower.contains("n't")
    }

    fn scalar_inc_dec(&self, word: &str, word_lower: &str, valence: f64, cap_diff: bool) -> f64 {
        let Some(&base) = self.boosters.get(word_lower) else {
            return 0.0;
        };

        let mut scalar = if valence < 0.0 { -base } else { base };
        if cap_diff && Self::is_upper(word) {
            scalar += if valence > 0.0 { CAPS_INCREMENT } else { -CAPS_INCREMENT };
        }
        scalar
    }

    fn word_valence(&self, words: &[&str], lowered: &[String], i: usize, cap_diff: bool) -> f64 {
        let Some(&base) = self.valences.get(&lowered[i]) else {
            return 0.0;
        };

        let mut valence = base;
        if cap_diff && Self::is_upper(words[i]) {
            valence += if valence > 0.0 { CAPS_INCREMENT } else { -CAPS_INCREMENT };
        }

        for distance in 0..3 {
            if i <= distance {
                break;
            }
            let j = i - distance - 1;
            if self.valences.contains_key(&lowered[j]) {
                continue;
            }

            let mut scalar = self.scalar_inc_dec(words[j], &lowered[j], valence, cap_diff);
            match distance {
                1 => scalar *= 0.95,
                2 => scalar *= 0.9,
                _ => {}
            }
            valence += scalar;

            if self.is_negated(&lowered[j]) {
                valence *= NEGATION_SCALAR;
            }
        }

        // "least" flips the word that follows, except in "at least" / "very least".
        if i > 0
            && lowered[i - 1] == "least"
            && !(i > 1 && matches!(lowered[i - 2].as_str(), "at" | "very"))
        {
            valence *= NEGATION_SCALAR;
        }

        valence
    }

    fn punctuation_emphasis(text: &str) -> f64 {
        let exclamations = text.matches('!').count().min(MAX_EXCLAMATIONS) as f64;
        let questions = text.matches('?').count();
        let question_emphasis = match questions {
            0 | 1 => 0.0,
            2 | 3 => questions as f64 * QUESTION_INCREMENT,
            _ => MAX_QUESTION_EMPHASIS,
        };
        exclamations * EXCLAMATION_INCREMENT + question_emphasis
    }

    fn score_valence(sentiments: &[f64], text: &str) -> SentimentScores {
        if sentiments.is_empty() {
            return SentimentScores::default();
        }

        let emphasis = Self::punctuation_emphasis(text);

        let mut sum: f64 = sentiments.iter().sum();
        if sum > 0.0 {
            sum += emphasis;
        } else if sum < 0.0 {
            sum -= emphasis;
        }
        let compound = (sum / (sum * sum + NORMALIZATION_ALPHA).sqrt()).clamp(-1.0, 1.0);

        let mut pos_sum: f64 = sentiments.iter().filter(|&&s| s > 0.0).map(|s| s + 1.0).sum();
        let mut neg_sum: f64 = sentiments.iter().filter(|&&s| s < 0.0).map(|s| s - 1.0).sum();
        let neu_count = sentiments.iter().filter(|&&s| s == 0.0).count() as f64;

        if pos_sum > neg_sum.abs() {
            pos_sum += emphasis;
        } else if pos_sum < neg_sum.abs() {
            neg_sum -= emphasis;
        }

        let total = pos_sum + neg_sum.abs() + neu_count;
        SentimentScores {
            neg: round_to((neg_sum / total).abs(), 3),
            neu: round_to((neu_count / total).abs(), 3),
            pos: round_to((pos_sum / total).abs(), 3),
            compound: round_to(compound, 4),
        }
    }
}

impl SentimentScorer for LexiconSentimentScorer {
    fn polarity_scores(&self, text: &str) -> Result<SentimentScores> {
        let words = Self::words(text);
        let lowered: Vec<String> = words.iter().map(|w| w.to_lowercase()).collect();

        let upper_count = words.iter().filter(|w| Self::is_upper(w)).count();
        let cap_diff = upper_count > 0 && upper_count < words.len();

        let mut sentiments = Vec::with_capacity(words.len());
        for i in 0..words.len() {
            let is_booster = self.boosters.contains_key(&lowered[i]);
            let is_kind_of =
                lowered[i] == "kind" && lowered.get(i + 1).is_some_and(|next| next == "of");
            if is_booster || is_kind_of {
                sentiments.push(0.0);
                continue;
            }
            sentiments.push(self.word_valence(&words, &lowered, i, cap_diff));
        }

        if let Some(but_index) = lowered.iter().position(|w| w == "but") {
            for (i, sentiment) in sentiments.iter_mut().enumerate() {
                if i < but_index {
                    *sentiment *= 0.5;
                } else if i > but_index {
                    *sentiment *= 1.5;
                }
            }
        }

        Ok(Self::score_valence(&sentiments, text))
    }

    fn name(&self) -> &'static str {
        "lexicon"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scores(text: &str) -> SentimentScores {
        LexiconSentimentScorer::new().polarity_scores(text).unwrap()
    }

    #[test]
    fn test_empty_text() {
        assert_eq!(scores(""), SentimentScores::default());
        assert_eq!(scores("a ! ?"), SentimentScores::default());
    }

    #[test]
    fn test_neutral_text() {
        let s = scores("the table is here");
        assert_eq!(s.neu, 1.0);
        assert_eq!(s.pos, 0.0);
        assert_eq!(s.neg, 0.0);
        assert_eq!(s.compound, 0.0);
    }

    #[test]
    fn test_single_word_scores() {
        // sum 3.2, compound = 3.2 / sqrt(3.2^2 + 15)
        let s = scores("love");
        assert_eq!(s.compound, 0.6369);
        assert_eq!(s.pos, 1.0);

        let s = scores("hate");
        assert_eq!(s.compound, -0.5719);
        assert_eq!(s.neg, 1.0);
    }

    #[test]
    fn test_negation_flips_polarity() {
        assert!(scores("good").compound > 0.0);
        assert!(scores("not good").compound < 0.0);
        assert!(scores("isn't good").compound < 0.0);
    }

    #[test]
    fn test_boosters_and_emphasis() {
        let plain = scores("this is bad").compound;
        let boosted = scores("this is very bad").compound;
        let shouted = scores("this is bad!!!").compound;
        assert!(boosted < plain);
        assert!(shouted < plain);
    }

    #[test]
    fn test_caps_emphasis_needs_mixed_case() {
        let mixed = scores("this is BAD").compound;
        let lower = scores("this is bad").compound;
        assert!(mixed < lower);
        assert_eq!(scores("BAD").compound, scores("bad").compound);
    }

    #[test]
    fn test_but_shifts_weight() {
        let s = scores("the food is good but the service is horrible");
        assert!(s.compound < 0.0);
    }

    #[test]
    fn test_proportions_sum_to_one() {
        let s = scores("I love you but you are a stupid bitch");
        assert!((s.neg + s.neu + s.pos - 1.0).abs() <= 0.002);
    }

    #[test]
    fn test_custom_valences() {
        let scorer = LexiconSentimentScorer::new().with_valences([("Zonk", -3.0)]);
        assert!(scorer.polarity_scores("zonk").unwrap().compound < 0.0);
    }
}
