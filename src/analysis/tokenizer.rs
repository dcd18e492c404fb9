//! Tokenizer implementations for text analysis.
//!
//! Tokenizers are the first step after the char filters: they split a string
//! into [`Token`](crate::analysis::token::Token)s.
//!
//! # Available Tokenizers
//!
//! - [`whitespace::WhitespaceTokenizer`] - Splits on Unicode whitespace
//! - [`regex::RegexTokenizer`] - Extracts regex matches (or the gaps between them)
//!
//! # Examples
//!
//! ```
//! use tweetsieve::analysis::tokenizer::Tokenizer;
//! use tweetsieve::analysis::tokenizer::whitespace::WhitespaceTokenizer;
//!
//! let tokenizer = WhitespaceTokenizer::new();
//! let tokens: Vec<_> = tokenizer.tokenize("Hello world").unwrap().collect();
//! assert_eq!(tokens.len(), 2);
//! ```

use crate::analysis::token::TokenStream;
use crate::error::Result;

/// Trait for tokenizers that convert text into tokens.
///
/// The trait requires `Send + Sync` so fitted pipelines can be shared across
/// cross-validation workers.
pub trait Tokenizer: Send + Sync {
    /// Tokenize the given text into a stream of tokens.
    fn tokenize(&self, text: &str) -> Result<TokenStream>;

    /// Get the name of this tokenizer (for debugging and configuration).
    fn name(&self) -> &'static str;
}

pub mod regex;
pub mod whitespace;
