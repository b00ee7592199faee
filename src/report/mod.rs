pub mod json;
pub mod latex;
pub mod text;

use crate::model::criteria::Criterion;
use crate::model::thresholds::{CategoryScheme, DegeneratePolicy};
use crate::pipeline::CriterionAnalysis;
use crate::pipeline::stage3_kappa::Kappa;

#[derive(Debug, Clone)]
pub struct ReportContext<'a> {
    pub tool_name: String,
    pub tool_version: String,
    pub dataset_source: String,
    pub n_pitches: usize,
    pub scheme: &'a CategoryScheme,
    pub confidence_level: f64,
    pub degenerate: DegeneratePolicy,
    pub analyses: &'a [CriterionAnalysis],
}

impl ReportContext<'_> {
    /// The overall comparison when present, otherwise the first criterion.
    pub fn primary(&self) -> Option<&CriterionAnalysis> {
        self.analyses
            .iter()
            .find(|a| a.criterion == Criterion::Overall)
            .or_else(|| self.analyses.first())
    }
}

pub fn format_f64(v: f64, decimals: usize) -> String {
    format!("{:.*}", decimals, v)
}

pub fn format_kappa(kappa: Kappa, decimals: usize) -> String {
    match kappa {
        Kappa::Value(v) => format_f64(v, decimals),
        Kappa::Undefined => "undefined".to_string(),
    }
}

pub fn format_percent(fraction: f64, decimals: usize) -> String {
    format!("{:.*}%", decimals, fraction * 100.0)
}

/// `0.95` -> `"95"`, `0.975` -> `"97.5"`.
pub fn level_percent(level: f64) -> String {
    let pct = level * 100.0;
    if (pct - pct.round()).abs() < 1e-9 {
        format!("{:.0}", pct)
    } else {
        let s = format!("{:.3}", pct);
        s.trim_end_matches('0').trim_end_matches('.').to_string()
    }
}

#[cfg(test)]
#[path = "../../tests/src_inline/report/mod.rs"]
mod tests;
