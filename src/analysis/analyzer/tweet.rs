//! Analyzer chains for tweets.
//!
//! Both chains start from [`normalize`](crate::normalize::normalize) and
//! lowercase. The lexical chain keeps letters only and stems; the tagging
//! chain also keeps `.,!?` so sentence punctuation reaches the tagger.

use std::sync::Arc;

use crate::analysis::analyzer::pipeline::PipelineAnalyzer;
use crate::analysis::char_filter::pattern_replace::PatternReplaceCharFilter;
use crate::analysis::char_filter::tweet::TweetNormalizeCharFilter;
use crate::analysis::token_filter::lowercase::LowercaseFilter;
use crate::analysis::token_filter::stem::StemFilter;
use crate::analysis::token_filter::stop::StopFilter;
use crate::analysis::tokenizer::whitespace::WhitespaceTokenizer;
use crate::error::Result;

/// Everything that is not an ASCII letter separates lexical tokens.
pub const LEXICAL_SEPARATOR_PATTERN: &str = r"[^a-zA-Z]+";

/// Separators for the tagging chain: letters and `.,!?` form tokens.
pub const TAGGING_SEPARATOR_PATTERN: &str = r"[^a-zA-Z.,!?]+";

/// Build the stemmed chain used by the lexical vectorizer.
///
/// Stop words are compared against stemmed tokens. `extra_stop_words` extend
/// the default English and social-media list.
pub fn lexical_analyzer(extra_stop_words: &[String]) -> Result<PipelineAnalyzer> {
    let stop_filter = if extra_stop_words.is_empty() {
        StopFilter::new()
    } else {
        StopFilter::extended(extra_stop_words.iter().cloned())
    };

    Ok(PipelineAnalyzer::new(Arc::new(WhitespaceTokenizer::new()))
        .add_char_filter(Arc::new(TweetNormalizeCharFilter::new()))
        .add_char_filter(Arc::new(PatternReplaceCharFilter::new(
            LEXICAL_SEPARATOR_PATTERN,
            " ",
        )?))
        .add_filter(Arc::new(LowercaseFilter::new()))
        .add_filter(Arc::new(StemFilter::new()))
        .add_filter(Arc::new(stop_filter))
        .with_name("tweet_lexical"))
}

/// Build the unstemmed chain whose tokens are handed to the tagger.
pub fn tagging_analyzer() -> Result<PipelineAnalyzer> {
    Ok(PipelineAnalyzer::new(Arc::new(WhitespaceTokenizer::new()))
        .add_char_filter(Arc::new(TweetNormalizeCharFilter::new()))
        .add_char_filter(Arc::new(PatternReplaceCharFilter::new(
            TAGGING_SEPARATOR_PATTERN,
            " ",
        )?))
        .add_filter(Arc::new(LowercaseFilter::new()))
        .with_name("tweet_tagging"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::analyzer::Analyzer;

    #[test]
    fn test_lexical_analyzer() {
        let analyzer = lexical_analyzer(&[]).unwrap();
        let terms = analyzer
            .analyze_terms("RT @user: These hoes RUNNING late!! http://t.co/x #ff")
            .unwrap();

        assert_eq!(terms, vec!["hoe", "run", "late"]);
    }

    #[test]
    fn test_lexical_analyzer_splits_on_non_letters() {
        let analyzer = lexical_analyzer(&[]).unwrap();
        let terms = analyzer.analyze_terms("trash2game&&bird").unwrap();

        assert_eq!(terms, vec!["trash", "game", "bird"]);
    }

    #[test]
    fn test_lexical_analyzer_extra_stop_words() {
        let analyzer = lexical_analyzer(&["lol".to_string()]).unwrap();
        let terms = analyzer.analyze_terms("lol that game").unwrap();

        assert_eq!(terms, vec!["game"]);
    }

    #[test]
    fn test_tagging_analyzer_keeps_punctuation() {
        let analyzer = tagging_analyzer().unwrap();
        let terms = analyzer
            .analyze_terms("@bob You're SO late, again!! #fail")
            .unwrap();

        assert_eq!(terms, vec!["you", "re", "so", "late,", "again!!", "fail"]);
    }

    #[test]
    fn test_empty_text() {
        assert!(lexical_analyzer(&[]).unwrap().analyze_terms("").unwrap().is_empty());
        assert!(tagging_analyzer().unwrap().analyze_terms("   ").unwrap().is_empty());
    }
}
