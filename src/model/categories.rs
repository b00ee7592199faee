/// Ordinal category; the rank indexes into the owning scheme's labels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Category(pub usize);

impl Category {
    pub fn rank(self) -> usize {
        self.0
    }
}

/// Maps a rating to the half-open interval `[low, high)` that contains it.
/// `boundaries` must be ascending. Ratings below the first boundary (and NaN)
/// land in the bottom category, ratings at or above the last in the top one.
pub fn categorize(rating: f64, boundaries: &[f64]) -> Category {
    Category(boundaries.partition_point(|&b| b <= rating))
}

pub fn categorize_all(ratings: &[f64], boundaries: &[f64]) -> Vec<Category> {
    ratings.iter().map(|&r| categorize(r, boundaries)).collect()
}

#[cfg(test)]
#[path = "../../tests/src_inline/model/categories.rs"]
mod tests;
