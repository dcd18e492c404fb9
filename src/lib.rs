//! # tweetsieve
//!
//! Hate speech and offensive language classification for short social-media
//! posts.
//!
//! Every post becomes one row of a dense feature matrix built from three
//! blocks:
//!
//! - tf-idf weighted word n-grams over stemmed, stop-word filtered tokens
//! - raw counts of n-grams over the Penn Treebank tag sequence
//! - 17 auxiliary features: readability, counts, sentiment and Twitter markers
//!
//! A [`ml::classifier::TweetClassifier`] (L1 feature selection followed by
//! L2 multinomial logistic regression) is trained on that matrix, and the
//! fitted extractors plus the classifier are saved by [`persist`] so that
//! new posts are transformed exactly like the training data.
//!
//! ```
//! use tweetsieve::config::PipelineConfig;
//! use tweetsieve::pipeline::FeaturePipeline;
//!
//! let corpus = ["you are trash", "what a lovely day", "RT @bob go away"];
//! let config = PipelineConfig::default();
//! let (pipeline, matrix) = FeaturePipeline::fit_transform(&corpus, &config).unwrap();
//! assert_eq!(matrix.n_cols(), pipeline.layout().width());
//! ```

pub mod analysis;
pub mod cli;
pub mod config;
pub mod dataset;
pub mod error;
pub mod features;
pub mod label;
pub mod linguistics;
pub mod ml;
pub mod normalize;
pub mod persist;
pub mod pipeline;
pub mod util;

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
