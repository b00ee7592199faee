use super::json::render_summary_json;
use super::latex::{escape_latex, render_kappa_table, render_summary_table};
use super::text::{render_confusion, render_report_text, render_trace};
use super::*;
use crate::input::PairedRatings;
use crate::model::thresholds::AnalysisConfig;
use crate::pipeline::analyze_criterion;

fn analysis(criterion: Criterion, pista: &[f64], w2v: &[f64], config: &AnalysisConfig) -> CriterionAnalysis {
    let paired = PairedRatings {
        criterion,
        names: (0..pista.len()).map(|i| format!("Pitch{}", i + 1)).collect(),
        pista: pista.to_vec(),
        w2v: w2v.to_vec(),
    };
    analyze_criterion(&paired, config).unwrap()
}

fn context<'a>(config: &'a AnalysisConfig, analyses: &'a [CriterionAnalysis]) -> ReportContext<'a> {
    ReportContext {
        tool_name: "pitch-irr".to_string(),
        tool_version: "test".to_string(),
        dataset_source: "unit".to_string(),
        n_pitches: analyses.first().map(|a| a.confusion.n()).unwrap_or(0),
        scheme: &config.scheme,
        confidence_level: config.confidence_level,
        degenerate: config.degenerate,
        analyses,
    }
}

#[test]
fn test_formatting_helpers() {
    assert_eq!(format_f64(0.12345, 3), "0.123");
    assert_eq!(format_kappa(Kappa::Value(-0.5), 2), "-0.50");
    assert_eq!(format_kappa(Kappa::Undefined, 4), "undefined");
    assert_eq!(format_percent(2.0 / 3.0, 1), "66.7%");
    assert_eq!(level_percent(0.95), "95");
    assert_eq!(level_percent(0.975), "97.5");
}

#[test]
fn test_primary_prefers_overall() {
    let config = AnalysisConfig::default_v1();
    let analyses = vec![
        analysis(Criterion::TeamExecution, &[5.0, 6.0], &[5.0, 6.0], &config),
        analysis(Criterion::Overall, &[5.0, 8.0], &[5.0, 6.0], &config),
    ];
    let ctx = context(&config, &analyses);
    assert_eq!(ctx.primary().unwrap().criterion, Criterion::Overall);

    let only_team = &analyses[..1];
    let ctx = context(&config, only_team);
    assert_eq!(ctx.primary().unwrap().criterion, Criterion::TeamExecution);
}

#[test]
fn test_confusion_table_has_totals() {
    let config = AnalysisConfig::default_v1();
    let a = analysis(Criterion::Overall, &[5.3, 4.9, 6.2], &[4.5, 5.4, 4.4], &config);
    let table = render_confusion(&a.confusion, &config.scheme);
    let lines = table.lines().collect::<Vec<_>>();
    assert_eq!(lines.len(), 4);
    assert!(lines[0].starts_with("Pista \\ W2V"));
    assert!(lines[0].ends_with("Total"));
    assert!(lines[1].starts_with("Fair"));
    assert!(lines[3].starts_with("Total"));
    assert!(lines[3].trim_end().ends_with('3'));
}

#[test]
fn test_trace_shows_arithmetic() {
    let config = AnalysisConfig::default_v1();
    let a = analysis(Criterion::Overall, &[5.3, 4.9, 6.2], &[4.5, 5.4, 4.4], &config);
    let trace = render_trace(&a.unweighted, &a.confusion, &config.scheme);
    assert!(trace.contains("p0 = 2/3 = 0.6667"));
    assert!(trace.contains("Fair: (2/3) x (3/3) = 0.6667 x 1.0000 = 0.6667"));
    assert!(trace.contains("pe = 0.6667"));
    assert!(trace.contains("kappa = 0.0000"));
}

#[test]
fn test_trace_for_degenerate_kappa() {
    let mut config = AnalysisConfig::default_v1();
    config.degenerate = crate::model::thresholds::DegeneratePolicy::Undefined;
    let a = analysis(Criterion::Overall, &[6.0, 6.0], &[6.5, 6.1], &config);
    let trace = render_trace(&a.unweighted, &a.confusion, &config.scheme);
    assert!(trace.contains("has no value"));
    assert!(trace.contains("kappa = undefined"));

    let ctx = context(&config, std::slice::from_ref(&a));
    let text = render_report_text(&ctx);
    assert!(text.contains("not available (kappa undefined)"));
    assert!(text.contains("reported as undefined"));
}

#[test]
fn test_report_text_sections() {
    let config = AnalysisConfig::default_v1();
    let a = analysis(Criterion::Overall, &[5.3, 4.9, 6.2], &[4.5, 5.4, 4.4], &config);
    let ctx = context(&config, std::slice::from_ref(&a));
    let text = render_report_text(&ctx);
    for heading in [
        "1. Categorized data (Overall)",
        "2. Confusion matrix",
        "3. Step-by-step calculation",
        "4. Results",
        "5. Category distributions",
        "6. Disagreements",
        "7. Descriptive statistics",
    ] {
        assert!(text.contains(heading), "missing {heading}");
    }
    assert!(!text.contains("8. Dimensional agreement"));
    assert!(text.contains("Disagreements: 1 out of 3"));
    assert!(text.contains("Excellent"));
    assert!(text.contains("Caveat: asymptotic standard error with n = 3"));
}

#[test]
fn test_escape_latex() {
    assert_eq!(escape_latex("Business Model & Market"), "Business Model \\& Market");
    assert_eq!(escape_latex("50% a_b #1 {x} $"), "50\\% a\\_b \\#1 \\{x\\} \\$");
}

#[test]
fn test_kappa_table_layout() {
    let config = AnalysisConfig::default_v1();
    let analyses = vec![
        analysis(Criterion::Overall, &[5.3, 4.9, 6.2], &[4.5, 5.4, 4.4], &config),
        analysis(Criterion::BusinessMarket, &[3.0, 6.0, 8.0], &[3.5, 6.5, 7.5], &config),
    ];
    let tex = render_kappa_table(&context(&config, &analyses));
    assert!(tex.contains("\\begin{tabular}{lccc}"));
    assert!(tex.contains("\\textbf{95\\% CI}"));
    assert!(tex.contains("Business Model \\& Market & 1.000 & [1.000, 1.000] & Almost Perfect \\\\"));
    assert!(tex.contains("\\textbf{Overall Agreement} & \\textbf{0.000}"));
    assert_eq!(tex.matches("\\midrule").count(), 2);
    let dim_at = tex.find("Business Model").unwrap();
    let overall_at = tex.find("Overall Agreement").unwrap();
    assert!(dim_at < overall_at);
    assert!(tex.contains("approximate for $n = 3$"));

    let single = render_kappa_table(&context(&config, &analyses[..1]));
    assert_eq!(single.matches("\\midrule").count(), 1);
}

#[test]
fn test_summary_table_rows() {
    let config = AnalysisConfig::default_v1();
    let a = analysis(Criterion::Overall, &[5.3, 4.9, 6.2], &[4.5, 5.4, 4.4], &config);
    let tex = render_summary_table(&a);
    assert!(tex.contains("\\begin{tabular}{lcc}"));
    assert!(tex.contains("Cohen's Kappa & 0.000 & Slight \\\\"));
    assert!(tex.contains("Weighted Kappa (quadratic) &"));
    assert!(tex.contains("Observed Agreement & 66.7\\% & -- \\\\"));
    assert!(tex.contains("Pearson Correlation &"));
    assert!(tex.contains("Mean Score Difference & 0.70 &"));
}

#[test]
fn test_summary_json_fields() {
    let config = AnalysisConfig::default_v1();
    let a = analysis(Criterion::Overall, &[5.3, 4.9, 6.2], &[4.5, 5.4, 4.4], &config);
    let json = render_summary_json(&context(&config, std::slice::from_ref(&a))).unwrap();
    let v: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(v["input"]["boundaries"], serde_json::json!([4.0, 5.5, 7.0]));
    assert_eq!(v["input"]["confidence_level"], 0.95);
    let c = &v["criteria"][0];
    assert_eq!(c["kappa"], 0.0);
    assert_eq!(c["kappa_interpretation"], "Slight");
    assert_eq!(c["confusion"]["categories"], serde_json::json!(["Fair", "Good"]));
    assert_eq!(c["confusion"]["counts"], serde_json::json!([[2, 0], [1, 0]]));
    assert_eq!(c["exact_agreements"], 2);
    assert_eq!(c["kappa_degenerate"], false);
}

#[test]
fn test_summary_json_flags_forced_zero_kappa() {
    let config = AnalysisConfig::default_v1();
    let a = analysis(Criterion::Overall, &[6.0, 6.0], &[6.5, 6.1], &config);
    let json = render_summary_json(&context(&config, std::slice::from_ref(&a))).unwrap();
    let v: serde_json::Value = serde_json::from_str(&json).unwrap();
    let c = &v["criteria"][0];
    assert_eq!(c["kappa"], 0.0);
    assert_eq!(c["kappa_degenerate"], true);
    assert_eq!(c["weighted_kappa_degenerate"], true);
    assert_eq!(v["input"]["degenerate_policy"], "zero");
}
