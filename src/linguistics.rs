//! Linguistic capabilities used by the feature extractors: part-of-speech
//! tagging, lexicon-based sentiment scoring and syllable counting.
//!
//! Tagging and sentiment are behind the [`PosTagger`](tagger::PosTagger) and
//! [`SentimentScorer`](sentiment::SentimentScorer) traits so another
//! implementation can be dropped in without touching the vectorizers.

pub mod sentiment;
pub mod syllable;
pub mod tagger;

pub use sentiment::{LexiconSentimentScorer, SentimentScorer, SentimentScores};
pub use syllable::{count_syllables, count_word_syllables};
pub use tagger::{PennTag, PosTagger, RuleBasedTagger};
