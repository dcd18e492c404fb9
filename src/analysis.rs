//! Text analysis: char filters, tokenizers, token filters and the analyzer
//! chains that combine them.

pub mod analyzer;
pub mod char_filter;
pub mod token;
pub mod token_filter;
pub mod tokenizer;
