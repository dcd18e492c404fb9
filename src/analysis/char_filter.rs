//! Char filter implementations for text normalization.
//!
//! Char filters rewrite the raw string before it reaches the tokenizer.
//!
//! # Available Filters
//!
//! - [`tweet::TweetNormalizeCharFilter`] - URL/mention deletion and whitespace collapsing
//! - [`pattern_replace::PatternReplaceCharFilter`] - Regex-based replacement
//!
//! # Examples
//!
//! ```
//! use tweetsieve::analysis::char_filter::CharFilter;
//! use tweetsieve::analysis::char_filter::pattern_replace::PatternReplaceCharFilter;
//!
//! let filter = PatternReplaceCharFilter::new(r"[^a-zA-Z]+", " ").unwrap();
//! assert_eq!(filter.filter("it's 2am!!"), "it s am ");
//! ```

/// Trait for character filters that transform text before tokenization.
pub trait CharFilter: Send + Sync {
    /// Apply this filter to the input text.
    fn filter(&self, input: &str) -> String;

    /// Get the name of this char filter.
    fn name(&self) -> &'static str;
}

pub mod pattern_replace;
pub mod tweet;
