use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::input::InputError;

/// One row of `Pitch,PistaOverall,Winds2VenturesInvestibility`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreRow {
    #[serde(rename = "Pitch")]
    pub pitch: String,
    #[serde(rename = "PistaOverall")]
    pub pista_overall: f64,
    #[serde(rename = "Winds2VenturesInvestibility")]
    pub w2v_investibility: f64,
}

/// Ratings are out of ten.
pub const MAX_RATING: f64 = 10.0;

pub fn is_valid_rating(value: f64) -> bool {
    value.is_finite() && (0.0..=MAX_RATING).contains(&value)
}

pub fn read_score_csv(path: &Path) -> Result<Vec<ScoreRow>, InputError> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_path(path)?;
    let mut rows = Vec::new();
    for record in reader.deserialize() {
        let row: ScoreRow = record?;
        for value in [row.pista_overall, row.w2v_investibility] {
            if !is_valid_rating(value) {
                return Err(InputError::InvalidRating {
                    pitch: row.pitch,
                    value,
                });
            }
        }
        rows.push(row);
    }
    tracing::debug!("read {} score rows from {}", rows.len(), path.display());
    Ok(rows)
}

pub fn write_score_csv(path: &Path, rows: &[ScoreRow]) -> Result<(), InputError> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    let mut writer = csv::Writer::from_path(path)?;
    for row in rows {
        writer.serialize(row)?;
    }
    writer.flush()?;
    Ok(())
}
