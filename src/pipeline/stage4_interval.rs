use statrs::distribution::{ContinuousCDF, Normal};

use crate::pipeline::AgreementError;
use crate::pipeline::stage3_kappa::KappaResult;

/// Below this many items the asymptotic interval is only a rough guide.
pub const SMALL_SAMPLE_N: usize = 30;

const TABULATED_Z: &[(f64, f64)] = &[(0.90, 1.645), (0.95, 1.96), (0.99, 2.576)];

#[derive(Debug, Clone, PartialEq)]
pub struct ConfidenceInterval {
    pub kappa: f64,
    pub n: usize,
    pub level: f64,
    pub z: f64,
    pub standard_error: f64,
    pub lower: f64,
    pub upper: f64,
    pub small_sample: bool,
}

impl ConfidenceInterval {
    pub fn margin(&self) -> f64 {
        self.z * self.standard_error
    }
}

/// Two-tailed critical value for `level`.
pub fn z_score(level: f64) -> Result<f64, AgreementError> {
    if !(level > 0.0 && level < 1.0) {
        return Err(AgreementError::InvalidConfidenceLevel(level));
    }
    if let Some(&(_, z)) = TABULATED_Z
        .iter()
        .find(|(l, _)| (l - level).abs() < 1e-9)
    {
        return Ok(z);
    }
    let normal =
        Normal::new(0.0, 1.0).map_err(|_| AgreementError::InvalidConfidenceLevel(level))?;
    Ok(normal.inverse_cdf((1.0 + level) / 2.0))
}

/// Symmetric interval `kappa +/- z * sqrt((1 - kappa^2) / n)`.
pub fn kappa_confidence_interval(
    kappa: f64,
    n: usize,
    level: f64,
) -> Result<ConfidenceInterval, AgreementError> {
    if n == 0 {
        return Err(AgreementError::EmptyInput);
    }
    let z = z_score(level)?;
    let standard_error = if kappa == 1.0 {
        0.0
    } else {
        ((1.0 - kappa * kappa).max(0.0) / n as f64).sqrt()
    };
    let margin = z * standard_error;
    Ok(ConfidenceInterval {
        kappa,
        n,
        level,
        z,
        standard_error,
        lower: kappa - margin,
        upper: kappa + margin,
        small_sample: n < SMALL_SAMPLE_N,
    })
}

/// No interval for an undefined kappa.
pub fn run_stage4(
    result: &KappaResult,
    n: usize,
    level: f64,
) -> Result<Option<ConfidenceInterval>, AgreementError> {
    match result.kappa.value() {
        Some(kappa) => kappa_confidence_interval(kappa, n, level).map(Some),
        None => {
            z_score(level)?;
            Ok(None)
        }
    }
}

#[cfg(test)]
#[path = "../../tests/src_inline/pipeline/stage4_interval.rs"]
mod tests;
