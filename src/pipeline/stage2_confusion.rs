use std::collections::BTreeSet;

use crate::model::categories::Category;
use crate::pipeline::AgreementError;
use crate::pipeline::stage1_categorize::check_paired;

/// Cross-tabulation of rater A (rows) against rater B (columns) over the
/// categories either rater used, in rank order.
#[derive(Debug, Clone, PartialEq)]
pub struct ConfusionMatrix {
    categories: Vec<Category>,
    counts: Vec<Vec<u32>>,
    n: usize,
}

impl ConfusionMatrix {
    /// `counts` must be square with one row per category.
    pub fn from_counts(
        categories: Vec<Category>,
        counts: Vec<Vec<u32>>,
    ) -> Result<Self, AgreementError> {
        let k = categories.len();
        if counts.len() != k {
            return Err(AgreementError::DimensionMismatch {
                rater_a: counts.len(),
                rater_b: k,
            });
        }
        if let Some(row) = counts.iter().find(|row| row.len() != k) {
            return Err(AgreementError::DimensionMismatch {
                rater_a: row.len(),
                rater_b: k,
            });
        }
        let n = counts.iter().flatten().map(|&c| c as usize).sum();
        Ok(Self {
            categories,
            counts,
            n,
        })
    }

    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    pub fn counts(&self) -> &[Vec<u32>] {
        &self.counts
    }

    pub fn k(&self) -> usize {
        self.categories.len()
    }

    pub fn n(&self) -> usize {
        self.n
    }

    pub fn cell(&self, row: usize, col: usize) -> u32 {
        self.counts[row][col]
    }

    pub fn row_totals(&self) -> Vec<usize> {
        self.counts
            .iter()
            .map(|row| row.iter().map(|&c| c as usize).sum())
            .collect()
    }

    pub fn col_totals(&self) -> Vec<usize> {
        let mut totals = vec![0usize; self.k()];
        for row in &self.counts {
            for (j, &c) in row.iter().enumerate() {
                totals[j] += c as usize;
            }
        }
        totals
    }

    pub fn diagonal_sum(&self) -> usize {
        (0..self.k()).map(|i| self.counts[i][i] as usize).sum()
    }
}

pub fn build_confusion(
    rater_a: &[Category],
    rater_b: &[Category],
) -> Result<ConfusionMatrix, AgreementError> {
    check_paired(rater_a.len(), rater_b.len())?;

    let categories: Vec<Category> = rater_a
        .iter()
        .chain(rater_b.iter())
        .copied()
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect();
    let k = categories.len();
    let mut counts = vec![vec![0u32; k]; k];

    for (a, b) in rater_a.iter().zip(rater_b) {
        // both present by construction of `categories`
        let (Ok(i), Ok(j)) = (categories.binary_search(a), categories.binary_search(b)) else {
            continue;
        };
        counts[i][j] += 1;
    }

    Ok(ConfusionMatrix {
        categories,
        counts,
        n: rater_a.len(),
    })
}

#[cfg(test)]
#[path = "../../tests/src_inline/pipeline/stage2_confusion.rs"]
mod tests;
