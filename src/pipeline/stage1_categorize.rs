use crate::input::PairedRatings;
use crate::model::categories::{Category, categorize_all};
use crate::model::criteria::Criterion;
use crate::model::thresholds::CategoryScheme;
use crate::pipeline::AgreementError;

#[derive(Debug, Clone, PartialEq)]
pub struct Stage1Output {
    pub criterion: Criterion,
    pub names: Vec<String>,
    pub pista_scores: Vec<f64>,
    pub w2v_scores: Vec<f64>,
    pub pista: Vec<Category>,
    pub w2v: Vec<Category>,
}

impl Stage1Output {
    pub fn n(&self) -> usize {
        self.pista.len()
    }
}

pub fn run_stage1(
    paired: &PairedRatings,
    scheme: &CategoryScheme,
) -> Result<Stage1Output, AgreementError> {
    check_paired(paired.pista.len(), paired.w2v.len())?;
    if paired.names.len() != paired.pista.len() {
        return Err(AgreementError::DimensionMismatch {
            rater_a: paired.pista.len(),
            rater_b: paired.names.len(),
        });
    }

    Ok(Stage1Output {
        criterion: paired.criterion,
        names: paired.names.clone(),
        pista_scores: paired.pista.clone(),
        w2v_scores: paired.w2v.clone(),
        pista: categorize_all(&paired.pista, scheme.boundaries()),
        w2v: categorize_all(&paired.w2v, scheme.boundaries()),
    })
}

pub(crate) fn check_paired(rater_a: usize, rater_b: usize) -> Result<(), AgreementError> {
    if rater_a != rater_b {
        return Err(AgreementError::DimensionMismatch { rater_a, rater_b });
    }
    if rater_a == 0 {
        return Err(AgreementError::EmptyInput);
    }
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/src_inline/pipeline/stage1_categorize.rs"]
mod tests;
