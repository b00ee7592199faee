use thiserror::Error;

use crate::model::categories::{Category, categorize};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SchemeError {
    #[error("invalid category scheme: {0}")]
    InvalidScheme(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum SchemeKind {
    ThreeBand,
    FourBand,
    FiveBand,
}

/// Named set of ascending boundaries splitting the rating scale into ordered
/// categories. `N` boundaries produce `N + 1` categories.
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryScheme {
    name: String,
    boundaries: Vec<f64>,
    labels: Vec<String>,
}

impl CategoryScheme {
    pub fn new(
        name: impl Into<String>,
        boundaries: Vec<f64>,
        labels: Vec<String>,
    ) -> Result<Self, SchemeError> {
        validate_boundaries(&boundaries)?;
        if labels.len() != boundaries.len() + 1 {
            return Err(SchemeError::InvalidScheme(format!(
                "{} boundaries need {} labels, got {}",
                boundaries.len(),
                boundaries.len() + 1,
                labels.len()
            )));
        }
        Ok(Self {
            name: name.into(),
            boundaries,
            labels,
        })
    }

    /// Below Average < 5.0 <= Average < 7.0 <= Good.
    pub fn three_band() -> Self {
        Self::from_static("three-band", &[5.0, 7.0], &["Below Average", "Average", "Good"])
    }

    /// Poor < 4.0 <= Fair < 5.5 <= Good < 7.0 <= Excellent.
    pub fn four_band() -> Self {
        Self::from_static(
            "four-band",
            &[4.0, 5.5, 7.0],
            &["Poor", "Fair", "Good", "Excellent"],
        )
    }

    pub fn five_band() -> Self {
        Self::from_static(
            "five-band",
            &[4.0, 5.0, 6.0, 7.0],
            &["Poor", "Below Average", "Average", "Good", "Excellent"],
        )
    }

    pub fn preset(kind: SchemeKind) -> Self {
        match kind {
            SchemeKind::ThreeBand => Self::three_band(),
            SchemeKind::FourBand => Self::four_band(),
            SchemeKind::FiveBand => Self::five_band(),
        }
    }

    /// Scheme over caller-supplied boundaries, labelled by interval bounds.
    pub fn custom(boundaries: Vec<f64>) -> Result<Self, SchemeError> {
        validate_boundaries(&boundaries)?;
        let labels = interval_labels(&boundaries);
        Self::new("custom", boundaries, labels)
    }

    fn from_static(name: &str, boundaries: &[f64], labels: &[&str]) -> Self {
        Self {
            name: name.to_string(),
            boundaries: boundaries.to_vec(),
            labels: labels.iter().map(|s| s.to_string()).collect(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn boundaries(&self) -> &[f64] {
        &self.boundaries
    }

    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    pub fn n_categories(&self) -> usize {
        self.labels.len()
    }

    pub fn categories(&self) -> impl Iterator<Item = Category> + '_ {
        (0..self.labels.len()).map(Category)
    }

    pub fn categorize(&self, rating: f64) -> Category {
        categorize(rating, &self.boundaries)
    }

    pub fn label(&self, category: Category) -> &str {
        self.labels
            .get(category.rank())
            .map(String::as_str)
            .unwrap_or("?")
    }

    /// Human readable range of each category, e.g. `Fair: 4.0 to <5.5`.
    pub fn describe_ranges(&self) -> Vec<String> {
        let last = self.boundaries.len();
        self.categories()
            .map(|cat| {
                let i = cat.rank();
                let range = if i == 0 {
                    format!("< {}", format_bound(self.boundaries[0]))
                } else if i == last {
                    format!(">= {}", format_bound(self.boundaries[last - 1]))
                } else {
                    format!(
                        "{} to <{}",
                        format_bound(self.boundaries[i - 1]),
                        format_bound(self.boundaries[i])
                    )
                };
                format!("{}: {}", self.label(cat), range)
            })
            .collect()
    }
}

fn validate_boundaries(boundaries: &[f64]) -> Result<(), SchemeError> {
    if boundaries.is_empty() {
        return Err(SchemeError::InvalidScheme(
            "at least one boundary is required".to_string(),
        ));
    }
    if let Some(bad) = boundaries.iter().find(|b| !b.is_finite()) {
        return Err(SchemeError::InvalidScheme(format!(
            "boundary {bad} is not finite"
        )));
    }
    for pair in boundaries.windows(2) {
        if pair[0] >= pair[1] {
            return Err(SchemeError::InvalidScheme(format!(
                "boundaries must be strictly ascending ({} >= {})",
                pair[0], pair[1]
            )));
        }
    }
    Ok(())
}

fn interval_labels(boundaries: &[f64]) -> Vec<String> {
    let mut labels = Vec::with_capacity(boundaries.len() + 1);
    labels.push(format!("<{}", format_bound(boundaries[0])));
    for pair in boundaries.windows(2) {
        labels.push(format!(
            "{}-{}",
            format_bound(pair[0]),
            format_bound(pair[1])
        ));
    }
    labels.push(format!(">={}", format_bound(boundaries[boundaries.len() - 1])));
    labels
}

/// Shortest exact form, keeping one decimal for whole numbers (`4.0`, `4.25`).
pub fn format_bound(bound: f64) -> String {
    if bound.fract() == 0.0 {
        format!("{:.1}", bound)
    } else {
        format!("{}", bound)
    }
}

/// What to report when expected agreement is 1 and kappa has no value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DegeneratePolicy {
    /// kappa := 0, matching the historical thesis reports.
    #[default]
    Zero,
    Undefined,
}

#[derive(Debug, Clone)]
pub struct AnalysisConfig {
    pub scheme: CategoryScheme,
    pub confidence_level: f64,
    pub degenerate: DegeneratePolicy,
}

impl AnalysisConfig {
    pub fn default_v1() -> Self {
        Self {
            scheme: CategoryScheme::four_band(),
            confidence_level: 0.95,
            degenerate: DegeneratePolicy::Zero,
        }
    }

    pub fn with_scheme(scheme: CategoryScheme) -> Self {
        let mut base = Self::default_v1();
        base.scheme = scheme;
        base
    }
}

#[cfg(test)]
#[path = "../../tests/src_inline/model/thresholds.rs"]
mod tests;
