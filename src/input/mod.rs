use std::collections::HashSet;
use std::path::Path;

use thiserror::Error;

pub mod dataset;
pub mod extract;
pub mod scores_csv;

use crate::model::criteria::{Criterion, CriterionRating, PitchRecord, criterion_order};
use scores_csv::read_score_csv;

#[derive(Debug, Error)]
pub enum InputError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
    #[error("duplicate pitch name: {0}")]
    DuplicatePitch(String),
    #[error("No pitch scores found; please check source format.")]
    NoRecordsExtracted,
    #[error("pitch {pitch} has rating {value}; expected a number from 0 to 10")]
    InvalidRating { pitch: String, value: f64 },
    #[error("pitch {pitch} has no {criterion} rating")]
    MissingCriterion { pitch: String, criterion: &'static str },
}

#[derive(Debug, Clone)]
pub struct PitchDataset {
    pub source: String,
    pub pitches: Vec<PitchRecord>,
}

/// Both raters' scores for one criterion, paired by pitch index.
#[derive(Debug, Clone, PartialEq)]
pub struct PairedRatings {
    pub criterion: Criterion,
    pub names: Vec<String>,
    pub pista: Vec<f64>,
    pub w2v: Vec<f64>,
}

impl PitchDataset {
    pub fn new(source: impl Into<String>, pitches: Vec<PitchRecord>) -> Result<Self, InputError> {
        let mut seen = HashSet::new();
        for pitch in &pitches {
            if !seen.insert(pitch.name.as_str()) {
                return Err(InputError::DuplicatePitch(pitch.name.clone()));
            }
        }
        Ok(Self {
            source: source.into(),
            pitches,
        })
    }

    pub fn len(&self) -> usize {
        self.pitches.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pitches.is_empty()
    }

    /// Criteria rated for every pitch, in report order.
    pub fn criteria(&self) -> Vec<Criterion> {
        criterion_order()
            .iter()
            .copied()
            .filter(|&c| {
                !self.pitches.is_empty() && self.pitches.iter().all(|p| p.rating(c).is_some())
            })
            .collect()
    }

    pub fn paired(&self, criterion: Criterion) -> Result<PairedRatings, InputError> {
        let n = self.pitches.len();
        let mut out = PairedRatings {
            criterion,
            names: Vec::with_capacity(n),
            pista: Vec::with_capacity(n),
            w2v: Vec::with_capacity(n),
        };
        for pitch in &self.pitches {
            let rating = pitch
                .rating(criterion)
                .ok_or_else(|| InputError::MissingCriterion {
                    pitch: pitch.name.clone(),
                    criterion: criterion.title(),
                })?;
            out.names.push(pitch.name.clone());
            out.pista.push(rating.pista);
            out.w2v.push(rating.w2v);
        }
        Ok(out)
    }
}

pub fn load_dataset(scores_csv: Option<&Path>) -> Result<PitchDataset, InputError> {
    match scores_csv {
        Some(path) => load_score_csv_dataset(path),
        None => {
            let ds = dataset::builtin_dataset();
            tracing::info!("using {} ({} pitches)", ds.source, ds.len());
            Ok(ds)
        }
    }
}

/// Overall scores only; the extractor CSV carries no per-criterion columns.
pub fn load_score_csv_dataset(path: &Path) -> Result<PitchDataset, InputError> {
    let rows = read_score_csv(path)?;
    let pitches = rows
        .into_iter()
        .map(|row| PitchRecord {
            name: row.pitch,
            ratings: vec![CriterionRating {
                criterion: Criterion::Overall,
                pista: row.pista_overall,
                w2v: row.w2v_investibility,
            }],
        })
        .collect();
    let ds = PitchDataset::new(path.display().to_string(), pitches)?;
    tracing::info!("loaded {} pitches from {}", ds.len(), ds.source);
    Ok(ds)
}

#[cfg(test)]
#[path = "../../tests/src_inline/input/tests.rs"]
mod tests;
