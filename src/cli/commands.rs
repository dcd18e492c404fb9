//! Command implementations for the tweetsieve CLI.

use std::fs;
use std::time::Instant;

use log::{info, warn};

use crate::cli::args::*;
use crate::cli::output::*;
use crate::config::PipelineConfig;
use crate::dataset::{CsvDatasetLoader, Dataset};
use crate::error::{Result, TweetsieveError};
use crate::label::Label;
use crate::ml::Classifier;
use crate::ml::classifier::TweetClassifier;
use crate::ml::metrics::ClassificationReport;
use crate::ml::model_selection::{cross_validate, train_test_split};
use crate::persist::ArtifactStore;
use crate::pipeline::{FeaturePipeline, Predictor};
use crate::util::numeric::argmax;

/// Text predicted after the artifacts are reloaded at the end of training.
pub const SELF_CHECK_TEXT: &str = "hello";

/// Execute a CLI command.
pub fn execute_command(args: TweetsieveArgs) -> Result<()> {
    match &args.command {
        Command::Train(train_args) => train(train_args, &args),
        Command::Predict(predict_args) => predict(predict_args, &args),
        Command::Evaluate(evaluate_args) => evaluate(evaluate_args, &args),
        Command::Features(features_args) => features(features_args, &args),
    }
}

fn load_dataset(path: &std::path::Path, columns: &ColumnArgs) -> Result<Dataset> {
    let delimiter = u8::try_from(columns.delimiter)
        .ok()
        .filter(u8::is_ascii)
        .ok_or_else(|| {
            TweetsieveError::invalid_argument(format!(
                "delimiter {:?} is not a single ASCII character",
                columns.delimiter
            ))
        })?;
    CsvDatasetLoader::new()
        .with_text_column(columns.text_column.as_str())
        .with_label_column(columns.label_column.as_str())
        .with_delimiter(delimiter)
        .load_path(path)
}

/// Fit the pipeline and classifier, evaluate on the held-out split and save
/// everything.
fn train(args: &TrainArgs, cli_args: &TweetsieveArgs) -> Result<()> {
    let start = Instant::now();
    let config = match &args.config {
        Some(path) => PipelineConfig::from_json_file(path)?,
        None => PipelineConfig::default(),
    };
    let training = &config.training;

    let dataset = load_dataset(&args.dataset, &args.columns)?;
    let split = train_test_split(dataset.len(), training.test_fraction, training.random_seed)?;
    let train_set = dataset.subset(&split.train);
    let test_set = dataset.subset(&split.test);
    info!(
        "Split {} documents into {} train and {} test",
        dataset.len(),
        train_set.len(),
        test_set.len()
    );

    let (pipeline, x_train) = FeaturePipeline::fit_transform(train_set.texts(), &config)?;

    let cross_validation = if args.no_cv || training.cv_folds == 0 {
        None
    } else {
        let make = || TweetClassifier::new(training);
        match cross_validate(make, &x_train, train_set.labels(), training.cv_folds) {
            Ok(cv) => Some(cv),
            Err(e) => {
                warn!("Skipping cross-validation: {e}");
                None
            }
        }
    };

    let mut classifier = TweetClassifier::new(training);
    classifier.fit(&x_train, train_set.labels())?;

    let x_test = pipeline.transform(test_set.texts())?;
    let predicted = classifier.predict(&x_test)?;
    let report = ClassificationReport::new(test_set.labels(), &predicted)?;

    let store = ArtifactStore::create(&args.output, args.artifact_format.into())?;
    store.save_model(&pipeline, &classifier)?;

    let self_check = self_check(&store)?;

    let summary = TrainingSummary {
        artifacts: store.directory().display().to_string(),
        train_documents: train_set.len(),
        test_documents: test_set.len(),
        layout: pipeline.layout(),
        selected_features: classifier
            .selector()
            .map_or(pipeline.layout().width(), |s| s.n_selected()),
        cross_validation,
        report,
        self_check,
        duration_ms: start.elapsed().as_millis() as u64,
    };
    output_result("Training complete", &summary, cli_args)
}

/// Reload the saved artifacts and classify a fixed text.
fn self_check(store: &ArtifactStore) -> Result<SelfCheck> {
    let (pipeline, classifier) = store.load_model()?;
    let width = pipeline.transform(&[SELF_CHECK_TEXT])?.n_cols();
    if width != pipeline.layout().width() {
        return Err(TweetsieveError::width_mismatch(
            "self-check",
            pipeline.layout().width(),
            width,
        ));
    }

    let predictor = Predictor::new(pipeline, classifier)?;
    let label = predictor
        .predict(&[SELF_CHECK_TEXT])?
        .into_iter()
        .next()
        .ok_or_else(|| TweetsieveError::model("self-check produced no prediction"))?;
    info!("Self-check: {SELF_CHECK_TEXT:?} -> {label} ({width} columns)");

    Ok(SelfCheck {
        text: SELF_CHECK_TEXT.to_string(),
        width,
        label,
    })
}

fn load_predictor(model: &std::path::Path) -> Result<Predictor<TweetClassifier>> {
    let (pipeline, classifier) = ArtifactStore::open(model)?.load_model()?;
    Predictor::new(pipeline, classifier)
}

/// Classify texts from the command line or a file.
fn predict(args: &PredictArgs, cli_args: &TweetsieveArgs) -> Result<()> {
    let texts: Vec<String> = match &args.input {
        Some(path) => fs::read_to_string(path)?
            .lines()
            .map(str::to_string)
            .collect(),
        None => args.texts.clone(),
    };
    if texts.is_empty() {
        return Err(TweetsieveError::invalid_argument(
            "no texts given; pass them as arguments or with --input",
        ));
    }

    let predictor = load_predictor(&args.model)?;
    let probabilities = predictor.predict_proba(&texts)?;

    let predictions = texts
        .into_iter()
        .zip(probabilities)
        .map(|(text, p)| {
            Ok(Prediction {
                text,
                label: Label::from_index(argmax(&p))?,
                probabilities: args.probabilities.then_some(p),
            })
        })
        .collect::<Result<Vec<_>>>()?;

    output_result("Predictions", &PredictionResults { predictions }, cli_args)
}

/// Score saved artifacts against a labeled dataset.
fn evaluate(args: &EvaluateArgs, cli_args: &TweetsieveArgs) -> Result<()> {
    let predictor = load_predictor(&args.model)?;
    let dataset = load_dataset(&args.dataset, &args.columns)?;
    let predicted = predictor.predict(dataset.texts())?;
    let report = ClassificationReport::new(dataset.labels(), &predicted)?;

    output_result(
        "Evaluation complete",
        &EvaluationResult {
            documents: dataset.len(),
            report,
        },
        cli_args,
    )
}

/// List feature columns, optionally with the values of one text.
fn features(args: &FeaturesArgs, cli_args: &TweetsieveArgs) -> Result<()> {
    let pipeline = ArtifactStore::open(&args.model)?.load_pipeline()?;
    let names = pipeline.feature_names()?;

    let values = match &args.text {
        Some(text) => {
            let matrix = pipeline.transform(&[text.as_str()])?;
            Some(
                names
                    .iter()
                    .zip(matrix.row(0))
                    .filter(|&(_, &v)| v != 0.0)
                    .map(|(name, &v)| (name.clone(), v))
                    .collect(),
            )
        }
        None => None,
    };

    let width = names.len();
    let listed = names.into_iter().take(args.limit.unwrap_or(width)).collect();
    output_result(
        "Feature columns",
        &FeaturesSummary {
            layout: pipeline.layout(),
            width,
            names: listed,
            values,
        },
        cli_args,
    )
}
