//! Integration tests for feature extraction, training and artifact round trips.

use tempfile::TempDir;
use tweetsieve::config::{LexicalConfig, PipelineConfig};
use tweetsieve::error::TweetsieveError;
use tweetsieve::features::auxiliary::{AUXILIARY_FEATURE_COUNT, AuxiliaryExtractor};
use tweetsieve::features::lexical::LexicalVectorizer;
use tweetsieve::label::Label;
use tweetsieve::ml::Classifier;
use tweetsieve::ml::classifier::TweetClassifier;
use tweetsieve::persist::{ArtifactFormat, ArtifactStore, CLASSIFIER_ARTIFACT, LEXICAL_ARTIFACT};
use tweetsieve::pipeline::{FeaturePipeline, Predictor};

const CORPUS: [&str; 3] = [
    "these hoes are trash",
    "trash talk all day",
    "lovely day outside",
];
const LABELS: [Label; 3] = [Label::HateSpeech, Label::Offensive, Label::Neither];

fn small_config() -> PipelineConfig {
    let mut config = PipelineConfig::default();
    config.lexical = LexicalConfig {
        min_df: 1,
        max_df: 1.0,
        ..LexicalConfig::default()
    };
    config.pos.min_df = 1;
    config.pos.max_df = 1.0;
    config.training.feature_selection = false;
    config
}

fn trained() -> (FeaturePipeline, TweetClassifier) {
    let config = small_config();
    let (pipeline, matrix) = FeaturePipeline::fit_transform(&CORPUS, &config).unwrap();
    let mut classifier = TweetClassifier::new(&config.training);
    classifier.fit(&matrix, &LABELS).unwrap();
    (pipeline, classifier)
}

#[test]
fn test_training_corpus_is_predicted_back() {
    let (pipeline, classifier) = trained();
    let predictor = Predictor::new(pipeline, classifier).unwrap();

    assert_eq!(predictor.predict(&CORPUS).unwrap(), LABELS);

    for p in predictor.predict_proba(&CORPUS).unwrap() {
        assert!((p.iter().sum::<f64>() - 1.0).abs() < 1e-9);
    }
}

#[test]
fn test_saved_model_predicts_identically() {
    let (pipeline, classifier) = trained();
    let texts = ["hello", "", "trash day @bob http://t.co/x #tag"];
    let before = Predictor::new(pipeline.clone(), classifier.clone())
        .unwrap()
        .predict_proba(&texts)
        .unwrap();

    for format in [ArtifactFormat::Json, ArtifactFormat::Bincode] {
        let dir = TempDir::new().unwrap();
        ArtifactStore::create(dir.path(), format)
            .unwrap()
            .save_model(&pipeline, &classifier)
            .unwrap();

        let store = ArtifactStore::open(dir.path()).unwrap();
        let manifest = store.read_manifest().unwrap().unwrap();
        assert_eq!(manifest.format, format);
        assert_eq!(manifest.layout, pipeline.layout());

        let (restored, restored_classifier) = store.load_model().unwrap();
        let after = Predictor::new(restored, restored_classifier)
            .unwrap()
            .predict_proba(&texts)
            .unwrap();
        assert_eq!(after, before);
    }
}

#[test]
fn test_mismatched_artifacts_are_rejected() {
    let (_, classifier) = trained();
    let other = FeaturePipeline::fit(&CORPUS, &PipelineConfig::default()).unwrap();
    assert_ne!(other.layout().width(), classifier.n_features().unwrap());

    let dir = TempDir::new().unwrap();
    let store = ArtifactStore::create(dir.path(), ArtifactFormat::Json).unwrap();
    assert!(matches!(
        store.save_model(&other, &classifier),
        Err(TweetsieveError::FeatureWidthMismatch { .. })
    ));
}

#[test]
fn test_lexical_artifact_from_another_run_is_rejected() {
    let (pipeline, classifier) = trained();
    let dir = TempDir::new().unwrap();
    let store = ArtifactStore::create(dir.path(), ArtifactFormat::Json).unwrap();
    store.save_model(&pipeline, &classifier).unwrap();

    let other = FeaturePipeline::fit(&CORPUS, &PipelineConfig::default()).unwrap();
    assert_ne!(other.layout().width(), pipeline.layout().width());
    store.save(LEXICAL_ARTIFACT, other.lexical()).unwrap();

    assert!(matches!(
        store.load_model(),
        Err(TweetsieveError::FeatureWidthMismatch { .. })
    ));
    // The vectorizers alone still load.
    assert!(store.load_pipeline().is_ok());
}

#[test]
fn test_truncated_classifier_artifact_is_rejected() {
    let (pipeline, classifier) = trained();
    let dir = TempDir::new().unwrap();
    let store = ArtifactStore::create(dir.path(), ArtifactFormat::Json).unwrap();
    store.save_model(&pipeline, &classifier).unwrap();

    let path = store.path(CLASSIFIER_ARTIFACT);
    let mut value: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
    let coefficients = value["model"]["coefficients"].as_array_mut().unwrap();
    let half = coefficients.len() / 2;
    coefficients.truncate(half);
    std::fs::write(&path, serde_json::to_string(&value).unwrap()).unwrap();

    assert!(matches!(
        store.load_model(),
        Err(TweetsieveError::FeatureWidthMismatch { .. })
    ));
}

#[test]
fn test_document_frequency_pruning() {
    let corpus = ["bad game", "bad call", "nice game", "bad day"];
    let config = LexicalConfig {
        min_df: 2,
        max_df: 0.6,
        ..LexicalConfig::default()
    };
    let vectorizer = LexicalVectorizer::fit(&corpus, &config).unwrap();

    // "bad" is in 3 of 4 documents, above max_df; "call", "nice" and "day" appear once.
    assert_eq!(vectorizer.feature_names(), ["game"]);
}

#[test]
fn test_unseen_words_give_empty_lexical_row() {
    let vectorizer = LexicalVectorizer::fit(
        &CORPUS,
        &LexicalConfig {
            min_df: 1,
            max_df: 1.0,
            ..LexicalConfig::default()
        },
    )
    .unwrap();
    let matrix = vectorizer.transform(&["zebra quokka"]).unwrap();

    assert_eq!(matrix.n_cols(), vectorizer.n_features());
    assert!(matrix.row(0).iter().all(|&v| v == 0.0));
}

#[test]
fn test_auxiliary_features_of_empty_and_retweeted_text() {
    let extractor = AuxiliaryExtractor::new();

    let empty = extractor.extract("").unwrap();
    assert_eq!(empty.len(), AUXILIARY_FEATURE_COUNT);
    assert_eq!(empty[0], -3.8);
    assert_eq!(empty[1], 122.24);
    assert_eq!(empty[16], 0.0);

    let retweet = extractor.extract("RT @bob: look http://a.co #x #y").unwrap();
    assert_eq!(retweet[13], 2.0, "hashtags");
    assert_eq!(retweet[14], 1.0, "mentions");
    assert_eq!(retweet[15], 1.0, "urls");
    assert_eq!(retweet[16], 1.0, "is_retweet");
}

#[test]
fn test_feature_width_is_stable_for_any_input() {
    let (pipeline, _) = trained();
    let width = pipeline.layout().width();

    for text in ["", "   ", "RT", "@a @b @c", "ünïcödé text!!!", "http://x.y/z"] {
        assert_eq!(pipeline.transform(&[text]).unwrap().n_cols(), width);
    }
}
