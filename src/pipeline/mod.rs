use thiserror::Error;

pub mod stage1_categorize;
pub mod stage2_confusion;
pub mod stage3_kappa;
pub mod stage4_interval;
pub mod stage5_describe;
pub mod stage6_report;

use crate::input::PairedRatings;
use crate::model::criteria::Criterion;
use crate::model::thresholds::AnalysisConfig;
use stage1_categorize::{Stage1Output, run_stage1};
use stage2_confusion::{ConfusionMatrix, build_confusion};
use stage3_kappa::{KappaResult, Weighting, compute_kappa};
use stage4_interval::{ConfidenceInterval, run_stage4};
use stage5_describe::{Descriptives, run_stage5};

#[derive(Debug, Clone, PartialEq, Error)]
pub enum AgreementError {
    #[error("dimension mismatch: rater A has {rater_a} ratings, rater B has {rater_b}")]
    DimensionMismatch { rater_a: usize, rater_b: usize },
    #[error("empty input: at least one paired rating is required")]
    EmptyInput,
    #[error("invalid confidence level {0}: must lie strictly between 0 and 1")]
    InvalidConfidenceLevel(f64),
}

/// Everything computed for one criterion.
#[derive(Debug, Clone)]
pub struct CriterionAnalysis {
    pub criterion: Criterion,
    pub categorized: Stage1Output,
    pub confusion: ConfusionMatrix,
    pub unweighted: KappaResult,
    pub weighted: KappaResult,
    pub interval: Option<ConfidenceInterval>,
    pub weighted_interval: Option<ConfidenceInterval>,
    pub descriptives: Descriptives,
}

pub fn analyze_criterion(
    paired: &PairedRatings,
    config: &AnalysisConfig,
) -> Result<CriterionAnalysis, AgreementError> {
    let categorized = run_stage1(paired, &config.scheme)?;
    let confusion = build_confusion(&categorized.pista, &categorized.w2v)?;
    let unweighted = compute_kappa(&confusion, Weighting::Unweighted, config.degenerate)?;
    let weighted = compute_kappa(&confusion, Weighting::Quadratic, config.degenerate)?;
    let n = confusion.n();
    let interval = run_stage4(&unweighted, n, config.confidence_level)?;
    let weighted_interval = run_stage4(&weighted, n, config.confidence_level)?;
    let descriptives = run_stage5(&categorized);

    tracing::debug!(
        "{}: n={} p0={:.4} pe={:.4} kappa={:?}",
        paired.criterion.title(),
        n,
        unweighted.observed,
        unweighted.expected,
        unweighted.kappa
    );

    Ok(CriterionAnalysis {
        criterion: paired.criterion,
        categorized,
        confusion,
        unweighted,
        weighted,
        interval,
        weighted_interval,
        descriptives,
    })
}

#[cfg(test)]
#[path = "../../tests/src_inline/pipeline/mod.rs"]
mod tests;
