//! Command line argument parsing for the tweetsieve CLI using clap.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use serde::{Deserialize, Serialize};

use crate::dataset::{DEFAULT_LABEL_COLUMN, DEFAULT_TEXT_COLUMN};
use crate::persist::ArtifactFormat;

/// tweetsieve - hate speech and offensive language classification
#[derive(Parser, Debug, Clone)]
#[command(name = "tweetsieve")]
#[command(about = "Hate speech and offensive language classification for short posts")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(long_about = None)]
pub struct TweetsieveArgs {
    /// Verbosity level (0=quiet, 1=normal, 2=verbose, 3=debug)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Quiet mode (overrides verbose)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Output format
    #[arg(short = 'f', long = "format", default_value = "human", global = true)]
    pub output_format: OutputFormat,

    /// Pretty-print JSON output
    #[arg(long, global = true)]
    pub pretty: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Command,
}

impl TweetsieveArgs {
    /// Get the effective verbosity level
    pub fn verbosity(&self) -> u8 {
        if self.quiet {
            0
        } else {
            match self.verbose {
                0 => 1,
                n => n,
            }
        }
    }
}

/// Available CLI commands
#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Fit features and the classifier on a labeled CSV and save the artifacts
    Train(TrainArgs),

    /// Classify texts with saved artifacts
    Predict(PredictArgs),

    /// Score saved artifacts against a labeled CSV
    Evaluate(EvaluateArgs),

    /// Show the feature columns of saved artifacts
    Features(FeaturesArgs),
}

/// CSV layout of a labeled dataset
#[derive(Parser, Debug, Clone)]
pub struct ColumnArgs {
    /// Name of the text column
    #[arg(long, default_value = DEFAULT_TEXT_COLUMN)]
    pub text_column: String,

    /// Name of the integer label column
    #[arg(long, default_value = DEFAULT_LABEL_COLUMN)]
    pub label_column: String,

    /// Field delimiter, a single ASCII character
    #[arg(long, default_value_t = ',')]
    pub delimiter: char,
}

/// Arguments for training
#[derive(Parser, Debug, Clone)]
pub struct TrainArgs {
    /// Labeled CSV dataset
    #[arg(value_name = "DATASET")]
    pub dataset: PathBuf,

    /// Directory the artifacts are written to
    #[arg(short, long, value_name = "MODEL_DIR", env = "TWEETSIEVE_MODEL")]
    pub output: PathBuf,

    /// Pipeline configuration file (JSON)
    #[arg(short, long, value_name = "CONFIG_FILE")]
    pub config: Option<PathBuf>,

    /// Encoding of the written artifacts
    #[arg(long, default_value = "json")]
    pub artifact_format: StoreFormat,

    /// Skip cross-validation
    #[arg(long)]
    pub no_cv: bool,

    #[command(flatten)]
    pub columns: ColumnArgs,
}

/// Arguments for prediction
#[derive(Parser, Debug, Clone)]
pub struct PredictArgs {
    /// Directory holding the artifacts
    #[arg(short, long, value_name = "MODEL_DIR", env = "TWEETSIEVE_MODEL")]
    pub model: PathBuf,

    /// Texts to classify
    #[arg(value_name = "TEXT")]
    pub texts: Vec<String>,

    /// File with one text per line
    #[arg(short, long, value_name = "FILE", conflicts_with = "texts")]
    pub input: Option<PathBuf>,

    /// Include class probabilities
    #[arg(long)]
    pub probabilities: bool,
}

/// Arguments for evaluation
#[derive(Parser, Debug, Clone)]
pub struct EvaluateArgs {
    /// Directory holding the artifacts
    #[arg(short, long, value_name = "MODEL_DIR", env = "TWEETSIEVE_MODEL")]
    pub model: PathBuf,

    /// Labeled CSV dataset
    #[arg(value_name = "DATASET")]
    pub dataset: PathBuf,

    #[command(flatten)]
    pub columns: ColumnArgs,
}

/// Arguments for feature inspection
#[derive(Parser, Debug, Clone)]
pub struct FeaturesArgs {
    /// Directory holding the artifacts
    #[arg(short, long, value_name = "MODEL_DIR", env = "TWEETSIEVE_MODEL")]
    pub model: PathBuf,

    /// Show the non-zero feature values of this text
    #[arg(short, long)]
    pub text: Option<String>,

    /// Maximum number of column names to list
    #[arg(short, long)]
    pub limit: Option<usize>,
}

/// Output formats
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable output
    Human,
    /// JSON output
    Json,
}

/// Artifact encodings selectable on the command line
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreFormat {
    /// Pretty-printed JSON
    Json,
    /// Compact binary
    Bincode,
}

impl From<StoreFormat> for ArtifactFormat {
    fn from(format: StoreFormat) -> Self {
        match format {
            StoreFormat::Json => ArtifactFormat::Json,
            StoreFormat::Bincode => ArtifactFormat::Bincode,
        }
    }
}
