//! Feature extraction.
//!
//! Three independent blocks are computed per document and concatenated:
//!
//! - [`lexical`] - tf-idf weights of stemmed word n-grams
//! - [`pos`] - raw counts of part-of-speech tag n-grams
//! - [`auxiliary`] - 17 readability, sentiment and social-media statistics
//!
//! [`assembler`] fixes the column order; [`vectorizer`] holds the n-gram
//! vocabulary fitting shared by the first two blocks.

pub mod assembler;
pub mod auxiliary;
pub mod lexical;
pub mod matrix;
pub mod pos;
pub mod vectorizer;

pub use assembler::{FeatureLayout, assemble};
pub use auxiliary::{AUXILIARY_FEATURE_COUNT, AUXILIARY_FEATURE_NAMES, AuxiliaryExtractor};
pub use lexical::LexicalVectorizer;
pub use matrix::FeatureMatrix;
pub use pos::PosVectorizer;
