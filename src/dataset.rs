//! Labeled tweet datasets.
//!
//! A dataset is read from CSV whose header names a text column and an integer
//! label column (`tweet` and `class` by default). Other columns are ignored,
//! so the annotator-count columns of the public hate-speech corpus load
//! unchanged:
//!
//! ```csv
//! ,count,hate_speech,offensive_language,neither,class,tweet
//! 0,3,0,0,3,2,"!!! RT @mayasolovely: As a woman you shouldn't complain..."
//! ```
//!
//! Labels must be 0 (hate speech), 1 (offensive) or 2 (neither); any other
//! value rejects the whole file.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use csv::ReaderBuilder;
use log::{debug, info};

use crate::error::{Result, TweetsieveError};
use crate::label::{Label, NUM_CLASSES};

/// Default name of the text column.
pub const DEFAULT_TEXT_COLUMN: &str = "tweet";

/// Default name of the label column.
pub const DEFAULT_LABEL_COLUMN: &str = "class";

/// Texts and their labels, index-aligned.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Dataset {
    texts: Vec<String>,
    labels: Vec<Label>,
}

/// CSV reader settings.
#[derive(Debug, Clone)]
pub struct CsvDatasetLoader {
    text_column: String,
    label_column: String,
    delimiter: u8,
}

impl Default for CsvDatasetLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl CsvDatasetLoader {
    /// Loader for comma-separated files with `tweet` and `class` columns.
    pub fn new() -> Self {
        CsvDatasetLoader {
            text_column: DEFAULT_TEXT_COLUMN.to_string(),
            label_column: DEFAULT_LABEL_COLUMN.to_string(),
            delimiter: b',',
        }
    }

    /// Use another text column.
    pub fn with_text_column<S: Into<String>>(mut self, column: S) -> Self {
        self.text_column = column.into();
        self
    }

    /// Use another label column.
    pub fn with_label_column<S: Into<String>>(mut self, column: S) -> Self {
        self.label_column = column.into();
        self
    }

    /// Set a custom delimiter character.
    pub fn with_delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = delimiter;
        self
    }

    /// Load a dataset from a file.
    pub fn load_path<P: AsRef<Path>>(&self, path: P) -> Result<Dataset> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|e| {
            TweetsieveError::dataset(format!("cannot open {}: {e}", path.display()))
        })?;
        let dataset = self.load_reader(file)?;
        info!(
            "Loaded {} labeled documents from {}",
            dataset.len(),
            path.display()
        );
        Ok(dataset)
    }

    /// Load a dataset from any reader.
    pub fn load_reader<R: Read>(&self, reader: R) -> Result<Dataset> {
        let mut reader = ReaderBuilder::new()
            .delimiter(self.delimiter)
            .from_reader(reader);

        let headers = reader.headers()?.clone();
        let column = |name: &str| {
            headers
                .iter()
                .position(|h| h.trim() == name)
                .ok_or_else(|| TweetsieveError::dataset(format!("missing column '{name}'")))
        };
        let text_index = column(&self.text_column)?;
        let label_index = column(&self.label_column)?;

        let mut dataset = Dataset::default();
        for (row, record) in reader.records().enumerate() {
            let record = record?;
            // Header is line 1.
            let line = row + 2;
            let text = record.get(text_index).ok_or_else(|| {
                TweetsieveError::dataset(format!("line {line}: missing '{}'", self.text_column))
            })?;
            let raw_label = record.get(label_index).ok_or_else(|| {
                TweetsieveError::dataset(format!("line {line}: missing '{}'", self.label_column))
            })?;
            let label = parse_label_code(raw_label)
                .map_err(|e| TweetsieveError::dataset(format!("line {line}: {e}")))?;
            dataset.push(text, label);
        }

        debug!("Class counts: {:?}", dataset.class_counts());
        Ok(dataset)
    }
}

fn parse_label_code(raw: &str) -> std::result::Result<Label, String> {
    let code: i64 = raw
        .trim()
        .parse()
        .map_err(|_| format!("label '{raw}' is not an integer"))?;
    usize::try_from(code)
        .ok()
        .and_then(|c| Label::from_index(c).ok())
        .ok_or_else(|| format!("label {code} is outside 0..={}", NUM_CLASSES - 1))
}

impl Dataset {
    /// Build a dataset from aligned texts and labels.
    pub fn new(texts: Vec<String>, labels: Vec<Label>) -> Result<Self> {
        if texts.len() != labels.len() {
            return Err(TweetsieveError::dataset(format!(
                "{} texts but {} labels",
                texts.len(),
                labels.len()
            )));
        }
        Ok(Dataset { texts, labels })
    }

    /// Load a dataset from a CSV file with the default columns.
    pub fn from_csv_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        CsvDatasetLoader::new().load_path(path)
    }

    /// Append one labeled text.
    pub fn push<S: Into<String>>(&mut self, text: S, label: Label) {
        self.texts.push(text.into());
        self.labels.push(label);
    }

    pub fn texts(&self) -> &[String] {
        &self.texts
    }

    pub fn labels(&self) -> &[Label] {
        &self.labels
    }

    pub fn len(&self) -> usize {
        self.texts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.texts.is_empty()
    }

    /// Documents per class, in label code order.
    pub fn class_counts(&self) -> [usize; NUM_CLASSES] {
        let mut counts = [0; NUM_CLASSES];
        for label in &self.labels {
            counts[label.index()] += 1;
        }
        counts
    }

    /// New dataset holding the given rows, in the given order.
    pub fn subset(&self, indices: &[usize]) -> Self {
        Dataset {
            texts: indices.iter().map(|&i| self.texts[i].clone()).collect(),
            labels: indices.iter().map(|&i| self.labels[i]).collect(),
        }
    }
}
