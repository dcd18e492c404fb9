//! Fitted feature pipeline and prediction.
//!
//! [`FeaturePipeline`] owns the fitted lexical and part-of-speech vectorizers
//! plus the tagger and sentiment scorer they were fitted with. Transforming
//! new documents only looks at that fitted state, so a pipeline restored
//! from disk produces matrices with the training column count and order.
//!
//! [`Predictor`] pairs a pipeline with a trained classifier and refuses to
//! run when their widths disagree.
//!
//! # Examples
//!
//! ```
//! use tweetsieve::config::PipelineConfig;
//! use tweetsieve::pipeline::FeaturePipeline;
//!
//! let corpus = ["you are trash", "what a lovely day", "go away @bob"];
//! let pipeline = FeaturePipeline::fit(&corpus, &PipelineConfig::default()).unwrap();
//!
//! let matrix = pipeline.transform(&["hello"]).unwrap();
//! assert_eq!(matrix.n_cols(), pipeline.layout().width());
//! ```

use std::sync::Arc;

use log::info;

use crate::config::PipelineConfig;
use crate::error::{Result, TweetsieveError};
use crate::features::assembler::FeatureLayout;
use crate::features::auxiliary::AuxiliaryExtractor;
use crate::features::lexical::LexicalVectorizer;
use crate::features::matrix::FeatureMatrix;
use crate::features::pos::PosVectorizer;
use crate::label::{Label, NUM_CLASSES};
use crate::linguistics::sentiment::{LexiconSentimentScorer, SentimentScorer};
use crate::linguistics::tagger::{PosTagger, RuleBasedTagger};
use crate::ml::Classifier;

/// Fitted extractors of all three feature blocks.
#[derive(Clone)]
pub struct FeaturePipeline {
    lexical: LexicalVectorizer,
    pos: PosVectorizer,
    auxiliary: AuxiliaryExtractor,
    tagger: Arc<dyn PosTagger>,
    layout: FeatureLayout,
}

impl std::fmt::Debug for FeaturePipeline {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FeaturePipeline")
            .field("layout", &self.layout)
            .field("tagger", &self.tagger.name())
            .field("scorer", &self.auxiliary.scorer_name())
            .finish()
    }
}

impl FeaturePipeline {
    /// Fit with the built-in tagger and sentiment scorer.
    pub fn fit<S: AsRef<str> + Sync>(corpus: &[S], config: &PipelineConfig) -> Result<Self> {
        Ok(Self::fit_transform(corpus, config)?.0)
    }

    /// Fit with the built-in tagger and sentiment scorer, returning the
    /// training matrix as well.
    pub fn fit_transform<S: AsRef<str> + Sync>(
        corpus: &[S],
        config: &PipelineConfig,
    ) -> Result<(Self, FeatureMatrix)> {
        Self::fit_transform_with(
            corpus,
            config,
            Arc::new(RuleBasedTagger::new()),
            Arc::new(LexiconSentimentScorer::new()),
        )
    }

    /// Fit with a custom tagger and sentiment scorer.
    pub fn fit_transform_with<S: AsRef<str> + Sync>(
        corpus: &[S],
        config: &PipelineConfig,
        tagger: Arc<dyn PosTagger>,
        scorer: Arc<dyn SentimentScorer>,
    ) -> Result<(Self, FeatureMatrix)> {
        info!("Fitting feature pipeline on {} documents", corpus.len());

        let (lexical, lexical_block) = LexicalVectorizer::fit_transform(corpus, &config.lexical)?;
        let (pos, pos_block) = PosVectorizer::fit_transform(corpus, &config.pos, tagger.as_ref())?;
        let auxiliary = AuxiliaryExtractor::with_scorer(scorer);
        let auxiliary_block = auxiliary.transform(corpus);

        let pipeline = Self::from_parts_with(lexical, pos, tagger, auxiliary);
        let matrix = pipeline
            .layout
            .assemble(&lexical_block, &pos_block, &auxiliary_block)?;
        info!(
            "Feature matrix: {} rows x {} columns ({} lexical, {} POS, {} auxiliary)",
            matrix.n_rows(),
            matrix.n_cols(),
            pipeline.layout.lexical,
            pipeline.layout.pos,
            pipeline.layout.auxiliary
        );
        Ok((pipeline, matrix))
    }

    /// Rebuild a pipeline from fitted vectorizers with the built-in tagger
    /// and sentiment scorer.
    pub fn from_parts(lexical: LexicalVectorizer, pos: PosVectorizer) -> Self {
        Self::from_parts_with(
            lexical,
            pos,
            Arc::new(RuleBasedTagger::new()),
            AuxiliaryExtractor::new(),
        )
    }

    /// Rebuild a pipeline from fitted vectorizers and explicit analyzers.
    pub fn from_parts_with(
        lexical: LexicalVectorizer,
        pos: PosVectorizer,
        tagger: Arc<dyn PosTagger>,
        auxiliary: AuxiliaryExtractor,
    ) -> Self {
        let layout = FeatureLayout::new(lexical.n_features(), pos.n_features());
        FeaturePipeline {
            lexical,
            pos,
            auxiliary,
            tagger,
            layout,
        }
    }

    /// Feature matrix of new documents over the fitted state: same columns,
    /// same order, nothing refitted.
    pub fn transform<S: AsRef<str> + Sync>(&self, texts: &[S]) -> Result<FeatureMatrix> {
        let lexical = self.lexical.transform(texts)?;
        let pos = self.pos.transform(texts, self.tagger.as_ref())?;
        let auxiliary = self.auxiliary.transform(texts);
        self.layout.assemble(&lexical, &pos, &auxiliary)
    }

    pub fn layout(&self) -> FeatureLayout {
        self.layout
    }

    /// Name of every column, in matrix order.
    pub fn feature_names(&self) -> Result<Vec<String>> {
        self.layout
            .feature_names(&self.lexical.feature_names(), &self.pos.feature_names())
    }

    pub fn lexical(&self) -> &LexicalVectorizer {
        &self.lexical
    }

    pub fn pos(&self) -> &PosVectorizer {
        &self.pos
    }
}

/// A feature pipeline and a classifier trained on its output.
#[derive(Debug)]
pub struct Predictor<C: Classifier> {
    features: FeaturePipeline,
    classifier: C,
}

impl<C: Classifier> Predictor<C> {
    /// Pair a pipeline with a trained classifier. Fails when the classifier
    /// is untrained or expects another number of columns.
    pub fn new(features: FeaturePipeline, classifier: C) -> Result<Self> {
        check_compatible(&features, &classifier)?;
        Ok(Predictor {
            features,
            classifier,
        })
    }

    /// One label per text.
    pub fn predict<S: AsRef<str> + Sync>(&self, texts: &[S]) -> Result<Vec<Label>> {
        let x = self.features.transform(texts)?;
        self.classifier.predict(&x)
    }

    /// Class probabilities per text, in label code order.
    pub fn predict_proba<S: AsRef<str> + Sync>(
        &self,
        texts: &[S],
    ) -> Result<Vec<[f64; NUM_CLASSES]>> {
        let x = self.features.transform(texts)?;
        self.classifier.predict_proba(&x)
    }

    pub fn features(&self) -> &FeaturePipeline {
        &self.features
    }

    pub fn classifier(&self) -> &C {
        &self.classifier
    }
}

/// Check that `classifier` was trained on matrices of the pipeline's width.
pub fn check_compatible<C: Classifier + ?Sized>(
    features: &FeaturePipeline,
    classifier: &C,
) -> Result<()> {
    let expected = classifier
        .n_features()
        .ok_or_else(|| TweetsieveError::model(format!("{} is not trained", classifier.name())))?;
    let actual = features.layout().width();
    if expected != actual {
        return Err(TweetsieveError::width_mismatch(
            "fitted extractors vs classifier",
            expected,
            actual,
        ));
    }
    Ok(())
}
