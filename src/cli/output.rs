//! Output formatting for CLI commands.

use serde::{Deserialize, Serialize};

use crate::cli::args::{OutputFormat, TweetsieveArgs};
use crate::error::Result;
use crate::features::assembler::FeatureLayout;
use crate::label::{Label, NUM_CLASSES};
use crate::ml::metrics::ClassificationReport;
use crate::ml::model_selection::CrossValidation;

/// Results that can be printed for people as well as serialized.
pub trait HumanOutput: Serialize {
    /// Print this result in human-readable form.
    fn print_human(&self);
}

/// Result of the train command.
#[derive(Debug, Serialize, Deserialize)]
pub struct TrainingSummary {
    pub artifacts: String,
    pub train_documents: usize,
    pub test_documents: usize,
    pub layout: FeatureLayout,
    pub selected_features: usize,
    pub cross_validation: Option<CrossValidation>,
    pub report: ClassificationReport,
    pub self_check: SelfCheck,
    pub duration_ms: u64,
}

/// Prediction on a fixed text after reloading the saved artifacts.
#[derive(Debug, Serialize, Deserialize)]
pub struct SelfCheck {
    pub text: String,
    pub width: usize,
    pub label: Label,
}

/// Result of the predict command.
#[derive(Debug, Serialize, Deserialize)]
pub struct PredictionResults {
    pub predictions: Vec<Prediction>,
}

/// Prediction for one text.
#[derive(Debug, Serialize, Deserialize)]
pub struct Prediction {
    pub text: String,
    pub label: Label,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub probabilities: Option<[f64; NUM_CLASSES]>,
}

/// Result of the evaluate command.
#[derive(Debug, Serialize, Deserialize)]
pub struct EvaluationResult {
    pub documents: usize,
    pub report: ClassificationReport,
}

/// Result of the features command.
#[derive(Debug, Serialize, Deserialize)]
pub struct FeaturesSummary {
    pub layout: FeatureLayout,
    pub width: usize,
    pub names: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub values: Option<Vec<(String, f64)>>,
}

/// Output a result in the specified format.
pub fn output_result<T: HumanOutput>(
    message: &str,
    result: &T,
    args: &TweetsieveArgs,
) -> Result<()> {
    match args.output_format {
        OutputFormat::Human => {
            if args.verbosity() > 0 {
                println!("{message}");
                println!();
            }
            result.print_human();
            Ok(())
        }
        OutputFormat::Json => output_json(result, args),
    }
}

fn output_json<T: Serialize>(result: &T, args: &TweetsieveArgs) -> Result<()> {
    let json = if args.pretty {
        serde_json::to_string_pretty(result)?
    } else {
        serde_json::to_string(result)?
    };

    println!("{json}");
    Ok(())
}

fn print_layout(layout: &FeatureLayout) {
    println!(
        "Features: {} ({} lexical, {} POS, {} auxiliary)",
        layout.width(),
        layout.lexical,
        layout.pos,
        layout.auxiliary
    );
}

fn print_report(report: &ClassificationReport) {
    println!("{report}");
    println!("Confusion matrix (rows: true class, normalized):");
    print!("{}", report.confusion);
}

impl HumanOutput for TrainingSummary {
    fn print_human(&self) {
        println!("Training Summary:");
        println!("═════════════════");
        println!("Artifacts: {}", self.artifacts);
        println!(
            "Documents: {} train, {} test",
            self.train_documents, self.test_documents
        );
        print_layout(&self.layout);
        println!(
            "Selected features: {} of {}",
            self.selected_features,
            self.layout.width()
        );
        println!("Duration: {}ms", self.duration_ms);

        if let Some(cv) = &self.cross_validation {
            println!();
            println!("Cross-validation:");
            println!("─────────────────");
            for fold in &cv.folds {
                println!(
                    "Fold {}: accuracy {:.4}, macro F1 {:.4} ({} train, {} test)",
                    fold.fold + 1,
                    fold.accuracy,
                    fold.macro_f1,
                    fold.train_size,
                    fold.test_size
                );
            }
            println!(
                "Mean: accuracy {:.4}, macro F1 {:.4}",
                cv.mean_accuracy(),
                cv.mean_macro_f1()
            );
        }

        println!();
        println!("Held-out evaluation:");
        println!("────────────────────");
        print_report(&self.report);

        println!();
        println!(
            "Self-check: {:?} -> {} ({} columns)",
            self.self_check.text, self.self_check.label, self.self_check.width
        );
    }
}

impl HumanOutput for PredictionResults {
    fn print_human(&self) {
        for prediction in &self.predictions {
            match prediction.probabilities {
                Some(p) => println!(
                    "{:<10} [{:.3} {:.3} {:.3}]  {}",
                    prediction.label.name(),
                    p[0],
                    p[1],
                    p[2],
                    prediction.text
                ),
                None => println!("{:<10} {}", prediction.label.name(), prediction.text),
            }
        }
    }
}

impl HumanOutput for EvaluationResult {
    fn print_human(&self) {
        println!("Evaluated {} documents", self.documents);
        println!();
        print_report(&self.report);
    }
}

impl HumanOutput for FeaturesSummary {
    fn print_human(&self) {
        print_layout(&self.layout);
        println!();
        for (i, name) in self.names.iter().enumerate() {
            println!("{i:>6}  {name}");
        }
        if self.names.len() < self.width {
            println!("   ...  {} more", self.width - self.names.len());
        }

        if let Some(values) = &self.values {
            println!();
            println!("Non-zero values:");
            println!("────────────────");
            for (name, value) in values {
                println!("{value:>12.4}  {name}");
            }
        }
    }
}
