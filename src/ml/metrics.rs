//! Evaluation metrics.
//!
//! [`ClassificationReport`] holds per-class precision, recall, F1 and support
//! with accuracy and macro and weighted averages; its `Display` renders the
//! familiar fixed-width table. [`ConfusionMatrix`] counts true labels by row
//! and predicted labels by column.
//!
//! Undefined ratios (no predictions or no support for a class) are 0.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{Result, TweetsieveError};
use crate::label::{Label, NUM_CLASSES};

/// Precision, recall, F1 and support of one class, or an average of them.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ClassMetrics {
    pub precision: f64,
    pub recall: f64,
    pub f1: f64,
    pub support: usize,
}

/// Counts of true labels (rows) against predicted labels (columns).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfusionMatrix {
    counts: [[usize; NUM_CLASSES]; NUM_CLASSES],
}

impl ConfusionMatrix {
    pub fn new(y_true: &[Label], y_pred: &[Label]) -> Result<Self> {
        check_lengths(y_true, y_pred)?;
        let mut counts = [[0; NUM_CLASSES]; NUM_CLASSES];
        for (t, p) in y_true.iter().zip(y_pred) {
            counts[t.index()][p.index()] += 1;
        }
        Ok(ConfusionMatrix { counts })
    }

    /// Number of documents of class `actual` predicted as `predicted`.
    pub fn count(&self, actual: Label, predicted: Label) -> usize {
        self.counts[actual.index()][predicted.index()]
    }

    pub fn counts(&self) -> &[[usize; NUM_CLASSES]; NUM_CLASSES] {
        &self.counts
    }

    /// Every row divided by its sum; rows without documents stay zero.
    pub fn row_normalized(&self) -> [[f64; NUM_CLASSES]; NUM_CLASSES] {
        let mut normalized = [[0.0; NUM_CLASSES]; NUM_CLASSES];
        for (row, counts) in normalized.iter_mut().zip(&self.counts) {
            let total: usize = counts.iter().sum();
            if total > 0 {
                for (v, &c) in row.iter_mut().zip(counts) {
                    *v = c as f64 / total as f64;
                }
            }
        }
        normalized
    }

    fn total(&self) -> usize {
        self.counts.iter().flatten().sum()
    }
}

impl fmt::Display for ConfusionMatrix {
    /// Row-normalized matrix with class names on both axes.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:>10}", "")?;
        for label in Label::ALL {
            write!(f, " {:>10}", label.name())?;
        }
        writeln!(f)?;
        for (label, row) in Label::ALL.iter().zip(self.row_normalized()) {
            write!(f, "{:>10}", label.name())?;
            for v in row {
                write!(f, " {v:>10.2}")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

/// Per-class metrics and their averages.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassificationReport {
    pub classes: [ClassMetrics; NUM_CLASSES],
    pub accuracy: f64,
    pub macro_avg: ClassMetrics,
    pub weighted_avg: ClassMetrics,
    pub confusion: ConfusionMatrix,
}

impl ClassificationReport {
    pub fn new(y_true: &[Label], y_pred: &[Label]) -> Result<Self> {
        let confusion = ConfusionMatrix::new(y_true, y_pred)?;
        let counts = confusion.counts();

        let mut classes = [ClassMetrics::default(); NUM_CLASSES];
        for (k, metrics) in classes.iter_mut().enumerate() {
            let true_positives = counts[k][k];
            let support: usize = counts[k].iter().sum();
            let predicted: usize = counts.iter().map(|row| row[k]).sum();

            let precision = ratio(true_positives, predicted);
            let recall = ratio(true_positives, support);
            let f1 = if precision + recall > 0.0 {
                2.0 * precision * recall / (precision + recall)
            } else {
                0.0
            };
            *metrics = ClassMetrics {
                precision,
                recall,
                f1,
                support,
            };
        }

        let total = confusion.total();
        let correct: usize = (0..NUM_CLASSES).map(|k| counts[k][k]).sum();

        Ok(ClassificationReport {
            classes,
            accuracy: ratio(correct, total),
            macro_avg: average(&classes, |_| 1.0 / NUM_CLASSES as f64, total),
            weighted_avg: average(&classes, |m| ratio(m.support, total), total),
            confusion,
        })
    }

    /// Metrics of one class.
    pub fn class(&self, label: Label) -> &ClassMetrics {
        &self.classes[label.index()]
    }

    /// Number of evaluated documents.
    pub fn support(&self) -> usize {
        self.macro_avg.support
    }
}

fn check_lengths(y_true: &[Label], y_pred: &[Label]) -> Result<()> {
    if y_true.len() != y_pred.len() {
        return Err(TweetsieveError::invalid_argument(format!(
            "{} true labels but {} predictions",
            y_true.len(),
            y_pred.len()
        )));
    }
    Ok(())
}

fn ratio(numerator: usize, denominator: usize) -> f64 {
    if denominator == 0 {
        0.0
    } else {
        numerator as f64 / denominator as f64
    }
}

fn average<F>(classes: &[ClassMetrics], weight: F, support: usize) -> ClassMetrics
where
    F: Fn(&ClassMetrics) -> f64,
{
    classes.iter().fold(
        ClassMetrics {
            support,
            ..ClassMetrics::default()
        },
        |mut acc, m| {
            let w = weight(m);
            acc.precision += w * m.precision;
            acc.recall += w * m.recall;
            acc.f1 += w * m.f1;
            acc
        },
    )
}

impl fmt::Display for ClassificationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "{:>12} {:>9} {:>9} {:>9} {:>9}",
            "", "precision", "recall", "f1-score", "support"
        )?;
        writeln!(f)?;
        for label in Label::ALL {
            write_row(f, label.name(), self.class(label))?;
        }
        writeln!(f)?;
        writeln!(
            f,
            "{:>12} {:>9} {:>9} {:>9.2} {:>9}",
            "accuracy",
            "",
            "",
            self.accuracy,
            self.support()
        )?;
        write_row(f, "macro avg", &self.macro_avg)?;
        write_row(f, "weighted avg", &self.weighted_avg)
    }
}

fn write_row(f: &mut fmt::Formatter<'_>, name: &str, m: &ClassMetrics) -> fmt::Result {
    writeln!(
        f,
        "{name:>12} {:>9.2} {:>9.2} {:>9.2} {:>9}",
        m.precision, m.recall, m.f1, m.support
    )
}

/// Fraction of matching labels.
pub fn accuracy(y_true: &[Label], y_pred: &[Label]) -> Result<f64> {
    check_lengths(y_true, y_pred)?;
    let correct = y_true.iter().zip(y_pred).filter(|(t, p)| t == p).count();
    Ok(ratio(correct, y_true.len()))
}
