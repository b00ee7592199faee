use serde::Serialize;

use crate::model::thresholds::DegeneratePolicy;
use crate::pipeline::CriterionAnalysis;
use crate::pipeline::stage4_interval::ConfidenceInterval;
use crate::report::ReportContext;

#[derive(Debug, Serialize)]
pub struct SummaryJson<'a> {
    pub tool: &'a str,
    pub version: &'a str,
    pub input: InputJson<'a>,
    pub criteria: Vec<CriterionJson>,
}

#[derive(Debug, Serialize)]
pub struct InputJson<'a> {
    pub dataset: &'a str,
    pub n_pitches: usize,
    pub scheme: &'a str,
    pub boundaries: &'a [f64],
    pub labels: &'a [String],
    pub confidence_level: f64,
    pub degenerate_policy: &'static str,
}

#[derive(Debug, Serialize)]
pub struct CriterionJson {
    pub criterion: &'static str,
    pub n: usize,
    pub observed_agreement: f64,
    pub expected_agreement: f64,
    pub kappa: Option<f64>,
    pub kappa_interpretation: &'static str,
    /// Expected agreement was 1; `kappa` comes from the degenerate policy.
    pub kappa_degenerate: bool,
    pub kappa_ci: Option<IntervalJson>,
    pub weighted_kappa: Option<f64>,
    pub weighted_kappa_interpretation: &'static str,
    pub weighted_kappa_degenerate: bool,
    pub weighted_kappa_ci: Option<IntervalJson>,
    pub pearson: Option<f64>,
    pub mean_difference: f64,
    pub exact_agreements: usize,
    pub confusion: ConfusionJson,
}

#[derive(Debug, Serialize)]
pub struct IntervalJson {
    pub lower: f64,
    pub upper: f64,
    pub standard_error: f64,
    pub z: f64,
    pub small_sample: bool,
}

#[derive(Debug, Serialize)]
pub struct ConfusionJson {
    pub categories: Vec<String>,
    pub counts: Vec<Vec<u32>>,
}

pub fn build_summary<'a>(ctx: &'a ReportContext<'a>) -> SummaryJson<'a> {
    SummaryJson {
        tool: &ctx.tool_name,
        version: &ctx.tool_version,
        input: InputJson {
            dataset: &ctx.dataset_source,
            n_pitches: ctx.n_pitches,
            scheme: ctx.scheme.name(),
            boundaries: ctx.scheme.boundaries(),
            labels: ctx.scheme.labels(),
            confidence_level: ctx.confidence_level,
            degenerate_policy: match ctx.degenerate {
                DegeneratePolicy::Zero => "zero",
                DegeneratePolicy::Undefined => "undefined",
            },
        },
        criteria: ctx
            .analyses
            .iter()
            .map(|a| criterion_json(a, ctx))
            .collect(),
    }
}

fn criterion_json(a: &CriterionAnalysis, ctx: &ReportContext<'_>) -> CriterionJson {
    CriterionJson {
        criterion: a.criterion.slug(),
        n: a.confusion.n(),
        observed_agreement: a.unweighted.observed,
        expected_agreement: a.unweighted.expected,
        kappa: a.unweighted.kappa.value(),
        kappa_interpretation: a.unweighted.interpretation.label(),
        kappa_degenerate: a.unweighted.degenerate,
        kappa_ci: a.interval.as_ref().map(interval_json),
        weighted_kappa: a.weighted.kappa.value(),
        weighted_kappa_interpretation: a.weighted.interpretation.label(),
        weighted_kappa_degenerate: a.weighted.degenerate,
        weighted_kappa_ci: a.weighted_interval.as_ref().map(interval_json),
        pearson: a.descriptives.pearson,
        mean_difference: a.descriptives.mean_difference,
        exact_agreements: a.descriptives.agreements,
        confusion: ConfusionJson {
            categories: a
                .confusion
                .categories()
                .iter()
                .map(|&c| ctx.scheme.label(c).to_string())
                .collect(),
            counts: a.confusion.counts().to_vec(),
        },
    }
}

fn interval_json(ci: &ConfidenceInterval) -> IntervalJson {
    IntervalJson {
        lower: ci.lower,
        upper: ci.upper,
        standard_error: ci.standard_error,
        z: ci.z,
        small_sample: ci.small_sample,
    }
}

pub fn render_summary_json(ctx: &ReportContext<'_>) -> serde_json::Result<String> {
    serde_json::to_string_pretty(&build_summary(ctx))
}
