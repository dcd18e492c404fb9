//! Column-wise assembly of the three feature blocks.
//!
//! The final matrix is always `[lexical | POS | auxiliary]`. A
//! [`FeatureLayout`] records the width of each block so the same order can be
//! checked at transform time and every column can be named.

use serde::{Deserialize, Serialize};

use crate::error::{Result, TweetsieveError};
use crate::features::auxiliary::{AUXILIARY_FEATURE_COUNT, AUXILIARY_FEATURE_NAMES};
use crate::features::matrix::FeatureMatrix;

/// Widths of the feature blocks, in assembly order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeatureLayout {
    pub lexical: usize,
    pub pos: usize,
    pub auxiliary: usize,
}

impl FeatureLayout {
    /// Layout of a lexical block and a POS block followed by the fixed
    /// auxiliary block.
    pub fn new(lexical: usize, pos: usize) -> Self {
        FeatureLayout {
            lexical,
            pos,
            auxiliary: AUXILIARY_FEATURE_COUNT,
        }
    }

    /// Total number of columns.
    pub fn width(&self) -> usize {
        self.lexical + self.pos + self.auxiliary
    }

    /// Column range of the POS block.
    pub fn pos_range(&self) -> std::ops::Range<usize> {
        self.lexical..self.lexical + self.pos
    }

    /// Column range of the auxiliary block.
    pub fn auxiliary_range(&self) -> std::ops::Range<usize> {
        self.lexical + self.pos..self.width()
    }

    /// Column names: lexical terms, POS n-grams, then the auxiliary names.
    pub fn feature_names(&self, lexical: &[String], pos: &[String]) -> Result<Vec<String>> {
        check_width("lexical names", self.lexical, lexical.len())?;
        check_width("POS names", self.pos, pos.len())?;

        let mut names = Vec::with_capacity(self.width());
        names.extend_from_slice(lexical);
        names.extend_from_slice(pos);
        names.extend(AUXILIARY_FEATURE_NAMES.iter().map(|s| s.to_string()));
        Ok(names)
    }

    /// Concatenate the three blocks after checking each against this layout.
    pub fn assemble(
        &self,
        lexical: &FeatureMatrix,
        pos: &FeatureMatrix,
        auxiliary: &FeatureMatrix,
    ) -> Result<FeatureMatrix> {
        check_width("lexical block", self.lexical, lexical.n_cols())?;
        check_width("POS block", self.pos, pos.n_cols())?;
        check_width("auxiliary block", self.auxiliary, auxiliary.n_cols())?;
        assemble(lexical, pos, auxiliary)
    }
}

fn check_width(stage: &str, expected: usize, actual: usize) -> Result<()> {
    if expected != actual {
        return Err(TweetsieveError::width_mismatch(stage, expected, actual));
    }
    Ok(())
}

/// Concatenate the lexical, POS and auxiliary blocks row by row.
///
/// Fails if the blocks disagree on the number of rows.
pub fn assemble(
    lexical: &FeatureMatrix,
    pos: &FeatureMatrix,
    auxiliary: &FeatureMatrix,
) -> Result<FeatureMatrix> {
    if lexical.n_rows() != pos.n_rows() || pos.n_rows() != auxiliary.n_rows() {
        return Err(TweetsieveError::invalid_argument(format!(
            "feature blocks have {}, {} and {} rows",
            lexical.n_rows(),
            pos.n_rows(),
            auxiliary.n_rows()
        )));
    }
    FeatureMatrix::hstack(&[lexical, pos, auxiliary])
}
