//! Train/test splitting and stratified cross-validation.

use log::{info, warn};
use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::error::{Result, TweetsieveError};
use crate::features::matrix::FeatureMatrix;
use crate::label::{Label, NUM_CLASSES};
use crate::ml::Classifier;
use crate::ml::metrics::ClassificationReport;

/// Row indices of one split.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Split {
    pub train: Vec<usize>,
    pub test: Vec<usize>,
}

/// Seeded shuffle split of `n_samples` rows. The test side holds
/// `ceil(test_fraction * n_samples)` rows, the train side the rest.
pub fn train_test_split(n_samples: usize, test_fraction: f64, seed: u64) -> Result<Split> {
    if !(test_fraction > 0.0 && test_fraction < 1.0) {
        return Err(TweetsieveError::invalid_argument(format!(
            "test fraction must be in (0, 1), got {test_fraction}"
        )));
    }
    let n_test = (test_fraction * n_samples as f64).ceil() as usize;
    if n_test == 0 || n_test >= n_samples {
        return Err(TweetsieveError::invalid_argument(format!(
            "cannot split {n_samples} rows with test fraction {test_fraction}"
        )));
    }

    let mut indices: Vec<usize> = (0..n_samples).collect();
    let mut rng = StdRng::seed_from_u64(seed);
    indices.shuffle(&mut rng);
    let train = indices.split_off(n_test);

    Ok(Split {
        train,
        test: indices,
    })
}

/// K-fold splitter that keeps class proportions in every fold.
///
/// Rows are not shuffled: within each class, the first rows go to the first
/// fold and so on, with fold sizes differing by at most one per class.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StratifiedKFold {
    n_splits: usize,
}

impl StratifiedKFold {
    pub fn new(n_splits: usize) -> Result<Self> {
        if n_splits < 2 {
            return Err(TweetsieveError::invalid_argument(format!(
                "at least 2 folds are required, got {n_splits}"
            )));
        }
        Ok(StratifiedKFold { n_splits })
    }

    pub fn n_splits(&self) -> usize {
        self.n_splits
    }

    /// Fold index of every row.
    pub fn test_folds(&self, y: &[Label]) -> Result<Vec<usize>> {
        if self.n_splits > y.len() {
            return Err(TweetsieveError::invalid_argument(format!(
                "cannot split {} rows into {} folds",
                y.len(),
                self.n_splits
            )));
        }

        // Classes are numbered by first appearance.
        let mut class_order: Vec<Label> = Vec::with_capacity(NUM_CLASSES);
        for label in y {
            if !class_order.contains(label) {
                class_order.push(*label);
            }
        }
        let encoded: Vec<usize> = y
            .iter()
            .map(|label| class_order.iter().position(|l| l == label).unwrap_or(0))
            .collect();
        let n_classes = class_order.len();

        let mut class_counts = vec![0usize; n_classes];
        for &k in &encoded {
            class_counts[k] += 1;
        }
        if class_counts.iter().all(|&c| c < self.n_splits) {
            return Err(TweetsieveError::invalid_argument(format!(
                "every class has fewer than {} members",
                self.n_splits
            )));
        }
        if class_counts.iter().any(|&c| c < self.n_splits) {
            warn!(
                "The least populated class has only {} members, fewer than {} folds",
                class_counts.iter().min().copied().unwrap_or(0),
                self.n_splits
            );
        }

        // Deal the class-sorted rows round-robin to the folds to decide how
        // many members of each class every fold receives.
        let mut sorted = encoded.clone();
        sorted.sort_unstable();
        let mut allocation = vec![vec![0usize; n_classes]; self.n_splits];
        for (i, &k) in sorted.iter().enumerate() {
            allocation[i % self.n_splits][k] += 1;
        }

        let mut folds = vec![0usize; y.len()];
        for k in 0..n_classes {
            let assignment = (0..self.n_splits)
                .flat_map(|fold| std::iter::repeat_n(fold, allocation[fold][k]));
            let members = encoded.iter().enumerate().filter(|&(_, &c)| c == k);
            for ((row, _), fold) in members.zip(assignment) {
                folds[row] = fold;
            }
        }
        Ok(folds)
    }

    /// Train and test indices of every fold.
    pub fn split(&self, y: &[Label]) -> Result<Vec<Split>> {
        let folds = self.test_folds(y)?;
        Ok((0..self.n_splits)
            .map(|fold| {
                let (test, train): (Vec<usize>, Vec<usize>) =
                    (0..y.len()).partition(|&row| folds[row] == fold);
                Split { train, test }
            })
            .collect())
    }
}

/// Scores of one cross-validation fold.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FoldScore {
    pub fold: usize,
    pub train_size: usize,
    pub test_size: usize,
    pub accuracy: f64,
    pub macro_f1: f64,
}

/// Scores of every fold.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CrossValidation {
    pub folds: Vec<FoldScore>,
}

impl CrossValidation {
    pub fn mean_accuracy(&self) -> f64 {
        mean(self.folds.iter().map(|f| f.accuracy))
    }

    pub fn mean_macro_f1(&self) -> f64 {
        mean(self.folds.iter().map(|f| f.macro_f1))
    }
}

fn mean<I: ExactSizeIterator<Item = f64>>(values: I) -> f64 {
    let n = values.len();
    if n == 0 {
        0.0
    } else {
        values.sum::<f64>() / n as f64
    }
}

/// Stratified k-fold cross-validation. Every fold trains a fresh classifier
/// from `make`; folds run in parallel.
pub fn cross_validate<C, F>(
    make: F,
    x: &FeatureMatrix,
    y: &[Label],
    n_splits: usize,
) -> Result<CrossValidation>
where
    C: Classifier,
    F: Fn() -> C + Sync,
{
    if x.n_rows() != y.len() {
        return Err(TweetsieveError::invalid_argument(format!(
            "{} rows but {} labels",
            x.n_rows(),
            y.len()
        )));
    }

    let splits = StratifiedKFold::new(n_splits)?.split(y)?;
    let folds = splits
        .par_iter()
        .enumerate()
        .map(|(fold, split)| {
            let train_y: Vec<Label> = split.train.iter().map(|&i| y[i]).collect();
            let test_y: Vec<Label> = split.test.iter().map(|&i| y[i]).collect();

            let mut classifier = make();
            classifier.fit(&x.select_rows(&split.train), &train_y)?;
            let predicted = classifier.predict(&x.select_rows(&split.test))?;
            let report = ClassificationReport::new(&test_y, &predicted)?;

            info!(
                "Fold {}/{n_splits}: accuracy {:.4}, macro F1 {:.4}",
                fold + 1,
                report.accuracy,
                report.macro_avg.f1
            );
            Ok(FoldScore {
                fold,
                train_size: split.train.len(),
                test_size: split.test.len(),
                accuracy: report.accuracy,
                macro_f1: report.macro_avg.f1,
            })
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(CrossValidation { folds })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::TrainingConfig;
    use crate::ml::classifier::TweetClassifier;

    use crate::label::Label::{HateSpeech as H, Neither as N, Offensive as O};

    #[test]
    fn test_train_test_split() {
        let split = train_test_split(25, 0.1, 42).unwrap();
        assert_eq!(split.test.len(), 3);
        assert_eq!(split.train.len(), 22);

        let mut all: Vec<usize> = split.train.iter().chain(&split.test).copied().collect();
        all.sort_unstable();
        assert_eq!(all, (0..25).collect::<Vec<_>>());

        assert_eq!(split, train_test_split(25, 0.1, 42).unwrap());
    }

    #[test]
    fn test_train_test_split_rejects_degenerate() {
        assert!(train_test_split(1, 0.1, 42).is_err());
        assert!(train_test_split(10, 0.0, 42).is_err());
        assert!(train_test_split(10, 1.0, 42).is_err());
    }

    #[test]
    fn test_stratified_folds() {
        let y = [O, O, O, O, N, N, H, O, O, N];
        let folds = StratifiedKFold::new(2).unwrap().test_folds(&y).unwrap();
        // Offensive rows 0,1,2,3,7,8 split 3/3, neither rows 4,5,9 split 2/1
        // and the single hate row lands where the round-robin deal put it.
        assert_eq!(folds, vec![0, 0, 0, 1, 0, 0, 1, 1, 1, 1]);
    }

    #[test]
    fn test_split_is_a_partition() {
        let y = [O, O, O, O, O, N, N, N, N, N, H, H, H];
        let splits = StratifiedKFold::new(3).unwrap().split(&y).unwrap();
        assert_eq!(splits.len(), 3);

        let mut tested: Vec<usize> = splits.iter().flat_map(|s| s.test.clone()).collect();
        tested.sort_unstable();
        assert_eq!(tested, (0..y.len()).collect::<Vec<_>>());

        for split in &splits {
            assert_eq!(split.train.len() + split.test.len(), y.len());
            assert!(split.test.iter().any(|&i| y[i] == H));
        }
    }

    #[test]
    fn test_too_many_folds() {
        assert!(StratifiedKFold::new(1).is_err());
        assert!(StratifiedKFold::new(5).unwrap().split(&[O, N]).is_err());
        assert!(StratifiedKFold::new(3).unwrap().split(&[O, O, N, N]).is_err());
    }

    #[test]
    fn test_cross_validate() {
        let mut rows = Vec::new();
        let mut y = Vec::new();
        for i in 0..6 {
            let jitter = i as f64 * 0.1;
            rows.push(vec![3.0 + jitter, 0.0, 0.0]);
            y.push(H);
            rows.push(vec![0.0, 3.0 + jitter, 0.0]);
            y.push(O);
            rows.push(vec![0.0, 0.0, 3.0 + jitter]);
            y.push(N);
        }
        let x = FeatureMatrix::from_rows(rows, 3).unwrap();
        let config = TrainingConfig {
            feature_selection: false,
            ..TrainingConfig::default()
        };

        let cv = cross_validate(|| TweetClassifier::new(&config), &x, &y, 3).unwrap();
        assert_eq!(cv.folds.len(), 3);
        assert_eq!(cv.folds.iter().map(|f| f.test_size).sum::<usize>(), 18);
        assert_eq!(cv.mean_accuracy(), 1.0);
        assert_eq!(cv.mean_macro_f1(), 1.0);
    }
}
