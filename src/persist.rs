//! Artifact persistence.
//!
//! An [`ArtifactStore`] is a directory holding one file per artifact: the
//! lexical vectorizer, the part-of-speech vectorizer and the classifier,
//! each written and read on its own as pretty JSON or bincode. A JSON
//! manifest records when and with which version the artifacts were written
//! and the feature layout; it is informational and never required for
//! loading.
//!
//! # Examples
//!
//! ```no_run
//! use tweetsieve::persist::{ArtifactFormat, ArtifactStore};
//!
//! # fn main() -> tweetsieve::error::Result<()> {
//! let store = ArtifactStore::open("models/run-1")?;
//! let (pipeline, classifier) = store.load_model()?;
//! # Ok(())
//! # }
//! ```

use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use log::{debug, info};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::error::{Result, TweetsieveError};
use crate::features::assembler::FeatureLayout;
use crate::features::lexical::LexicalVectorizer;
use crate::features::pos::PosVectorizer;
use crate::ml::Classifier;
use crate::ml::classifier::TweetClassifier;
use crate::pipeline::{FeaturePipeline, check_compatible};

/// Artifact name of the lexical vectorizer.
pub const LEXICAL_ARTIFACT: &str = "lexical";

/// Artifact name of the part-of-speech vectorizer.
pub const POS_ARTIFACT: &str = "pos";

/// Artifact name of the classifier.
pub const CLASSIFIER_ARTIFACT: &str = "classifier";

const MANIFEST_FILE: &str = "manifest.json";

/// On-disk encoding of the artifacts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ArtifactFormat {
    #[default]
    Json,
    Bincode,
}

impl ArtifactFormat {
    /// File extension of this format.
    pub fn extension(self) -> &'static str {
        match self {
            ArtifactFormat::Json => "json",
            ArtifactFormat::Bincode => "bin",
        }
    }
}

/// Informational record written next to the artifacts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Manifest {
    pub created_at: DateTime<Utc>,
    pub version: String,
    pub format: ArtifactFormat,
    pub layout: FeatureLayout,
    pub classifier: String,
}

/// A directory of independently serialized artifacts.
#[derive(Debug, Clone)]
pub struct ArtifactStore {
    directory: PathBuf,
    format: ArtifactFormat,
}

impl ArtifactStore {
    /// Create the directory if needed and write artifacts in `format`.
    pub fn create<P: AsRef<Path>>(directory: P, format: ArtifactFormat) -> Result<Self> {
        let directory = directory.as_ref().to_path_buf();
        fs::create_dir_all(&directory)?;
        if !directory.is_dir() {
            return Err(TweetsieveError::invalid_argument(format!(
                "{} is not a directory",
                directory.display()
            )));
        }
        Ok(ArtifactStore { directory, format })
    }

    /// Open an existing store, detecting the format from the lexical
    /// artifact on disk.
    pub fn open<P: AsRef<Path>>(directory: P) -> Result<Self> {
        let directory = directory.as_ref().to_path_buf();
        for format in [ArtifactFormat::Json, ArtifactFormat::Bincode] {
            let store = ArtifactStore {
                directory: directory.clone(),
                format,
            };
            if store.path(LEXICAL_ARTIFACT).is_file() {
                return Ok(store);
            }
        }
        Err(TweetsieveError::not_found(format!(
            "no artifacts in {}",
            directory.display()
        )))
    }

    pub fn directory(&self) -> &Path {
        &self.directory
    }

    pub fn format(&self) -> ArtifactFormat {
        self.format
    }

    /// Path of the named artifact.
    pub fn path(&self, name: &str) -> PathBuf {
        self.directory.join(format!("{name}.{}", self.format.extension()))
    }

    /// Serialize one artifact.
    pub fn save<T: Serialize>(&self, name: &str, value: &T) -> Result<()> {
        let path = self.path(name);
        let mut writer = BufWriter::new(File::create(&path)?);
        match self.format {
            ArtifactFormat::Json => serde_json::to_writer_pretty(&mut writer, value)?,
            ArtifactFormat::Bincode => bincode::serialize_into(&mut writer, value)?,
        }
        writer.flush()?;
        debug!("Wrote artifact {}", path.display());
        Ok(())
    }

    /// Deserialize one artifact.
    pub fn load<T: DeserializeOwned>(&self, name: &str) -> Result<T> {
        let path = self.path(name);
        let file = File::open(&path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                TweetsieveError::not_found(format!("artifact {}", path.display()))
            } else {
                e.into()
            }
        })?;
        let reader = BufReader::new(file);
        let value = match self.format {
            ArtifactFormat::Json => serde_json::from_reader(reader)?,
            ArtifactFormat::Bincode => bincode::deserialize_from(reader)?,
        };
        Ok(value)
    }

    /// Save both fitted vectorizers.
    pub fn save_pipeline(&self, pipeline: &FeaturePipeline) -> Result<()> {
        self.save(LEXICAL_ARTIFACT, pipeline.lexical())?;
        self.save(POS_ARTIFACT, pipeline.pos())
    }

    /// Load both fitted vectorizers with the built-in tagger and scorer.
    pub fn load_pipeline(&self) -> Result<FeaturePipeline> {
        let lexical: LexicalVectorizer = self.load(LEXICAL_ARTIFACT)?;
        lexical.check()?;
        let pos: PosVectorizer = self.load(POS_ARTIFACT)?;
        Ok(FeaturePipeline::from_parts(lexical, pos))
    }

    /// Save the vectorizers, the classifier and the manifest.
    pub fn save_model(
        &self,
        pipeline: &FeaturePipeline,
        classifier: &TweetClassifier,
    ) -> Result<()> {
        check_compatible(pipeline, classifier)?;
        self.save_pipeline(pipeline)?;
        self.save(CLASSIFIER_ARTIFACT, classifier)?;
        self.write_manifest(&Manifest {
            created_at: Utc::now(),
            version: crate::VERSION.to_string(),
            format: self.format,
            layout: pipeline.layout(),
            classifier: classifier.name().to_string(),
        })?;
        info!("Saved model artifacts to {}", self.directory.display());
        Ok(())
    }

    /// Load the vectorizers and the classifier and check they fit together.
    pub fn load_model(&self) -> Result<(FeaturePipeline, TweetClassifier)> {
        let pipeline = self.load_pipeline()?;
        let classifier: TweetClassifier = self.load(CLASSIFIER_ARTIFACT)?;
        classifier.check()?;
        check_compatible(&pipeline, &classifier)?;
        Ok((pipeline, classifier))
    }

    pub fn write_manifest(&self, manifest: &Manifest) -> Result<()> {
        let mut writer = BufWriter::new(File::create(self.directory.join(MANIFEST_FILE))?);
        serde_json::to_writer_pretty(&mut writer, manifest)?;
        writer.flush()?;
        Ok(())
    }

    /// The manifest, if one was written.
    pub fn read_manifest(&self) -> Result<Option<Manifest>> {
        let path = self.directory.join(MANIFEST_FILE);
        if !path.is_file() {
            return Ok(None);
        }
        let manifest = serde_json::from_reader(BufReader::new(File::open(path)?))?;
        Ok(Some(manifest))
    }
}
