use crate::model::thresholds::{CategoryScheme, DegeneratePolicy};
use crate::pipeline::CriterionAnalysis;
use crate::pipeline::stage2_confusion::ConfusionMatrix;
use crate::pipeline::stage3_kappa::KappaResult;
use crate::pipeline::stage4_interval::{ConfidenceInterval, SMALL_SAMPLE_N};
use crate::pipeline::stage5_describe::category_counts;
use crate::report::{ReportContext, format_f64, format_kappa, format_percent, level_percent};

const RULE: usize = 80;

pub fn render_report_text(ctx: &ReportContext<'_>) -> String {
    let mut out = String::new();

    out.push_str(&"=".repeat(RULE));
    out.push('\n');
    out.push_str("COHEN'S KAPPA ANALYSIS: PISTA vs WINDS2VENTURES\n");
    out.push_str(&"=".repeat(RULE));
    out.push_str("\n\n");

    out.push_str(&format!(
        "Dataset: {} ({} pitches)\n",
        ctx.dataset_source, ctx.n_pitches
    ));
    out.push_str(&format!("Category scheme: {}\n", ctx.scheme.name()));
    for range in ctx.scheme.describe_ranges() {
        out.push_str(&format!("  {}\n", range));
    }
    out.push_str(&format!(
        "Confidence level: {}%\n",
        level_percent(ctx.confidence_level)
    ));
    out.push_str(&format!(
        "Degenerate kappa (pe = 1): {}\n\n",
        match ctx.degenerate {
            DegeneratePolicy::Zero => "reported as 0",
            DegeneratePolicy::Undefined => "reported as undefined",
        }
    ));

    let Some(primary) = ctx.primary() else {
        out.push_str("No criteria to analyse.\n");
        return out;
    };
    let title = primary.criterion.title();

    section(&mut out, &format!("1. Categorized data ({title})"));
    out.push_str(&render_data_table(primary, ctx.scheme));
    out.push('\n');

    section(&mut out, "2. Confusion matrix");
    out.push_str(&render_confusion(&primary.confusion, ctx.scheme));
    out.push('\n');

    section(&mut out, "3. Step-by-step calculation");
    out.push_str(&render_trace(&primary.unweighted, &primary.confusion, ctx.scheme));
    out.push('\n');

    section(&mut out, "4. Results");
    out.push_str(&render_results(primary, ctx.confidence_level));
    out.push('\n');

    section(&mut out, "5. Category distributions");
    out.push_str(&render_distributions(primary, ctx.scheme));
    out.push('\n');

    section(&mut out, "6. Disagreements");
    out.push_str(&render_disagreements(primary, ctx.scheme));
    out.push('\n');

    section(&mut out, "7. Descriptive statistics");
    out.push_str(&render_descriptives(primary));

    if ctx.analyses.len() > 1 {
        out.push('\n');
        section(&mut out, "8. Dimensional agreement");
        out.push_str(&render_dimensions(ctx.analyses));
    }

    out
}

fn section(out: &mut String, title: &str) {
    out.push_str(title);
    out.push('\n');
    out.push_str(&"-".repeat(title.chars().count().max(40)));
    out.push('\n');
}

fn label_width(scheme: &CategoryScheme) -> usize {
    scheme
        .labels()
        .iter()
        .map(|l| l.chars().count())
        .max()
        .unwrap_or(0)
}

fn name_width(analysis: &CriterionAnalysis) -> usize {
    analysis
        .categorized
        .names
        .iter()
        .map(|n| n.chars().count())
        .max()
        .unwrap_or(0)
        .max(5)
}

pub fn render_data_table(analysis: &CriterionAnalysis, scheme: &CategoryScheme) -> String {
    let data = &analysis.categorized;
    let nw = name_width(analysis);
    let lw = label_width(scheme).max(8);
    let mut out = String::new();
    out.push_str(&format!(
        "{:<nw$}  {:>6}  {:<lw$}  {:>6}  {:<lw$}\n",
        "Pitch", "Pista", "Category", "W2V", "Category"
    ));
    out.push_str(&"-".repeat(nw + lw * 2 + 22));
    out.push('\n');
    for i in 0..data.n() {
        out.push_str(&format!(
            "{:<nw$}  {:>6.1}  {:<lw$}  {:>6.1}  {:<lw$}\n",
            data.names[i],
            data.pista_scores[i],
            scheme.label(data.pista[i]),
            data.w2v_scores[i],
            scheme.label(data.w2v[i]),
        ));
    }
    out.push_str(&format!("\nTotal samples: {}\n", data.n()));
    out
}

pub fn render_confusion(matrix: &ConfusionMatrix, scheme: &CategoryScheme) -> String {
    let labels = matrix
        .categories()
        .iter()
        .map(|&c| scheme.label(c))
        .collect::<Vec<_>>();
    let head = labels
        .iter()
        .map(|l| l.chars().count())
        .max()
        .unwrap_or(0)
        .max("Pista \\ W2V".len());
    let cell = labels
        .iter()
        .map(|l| l.chars().count())
        .max()
        .unwrap_or(0)
        .max(5)
        + 2;

    let mut out = String::new();
    out.push_str(&format!("{:<head$}", "Pista \\ W2V"));
    for label in &labels {
        out.push_str(&format!("{:>cell$}", label));
    }
    out.push_str(&format!("{:>cell$}\n", "Total"));

    let rows = matrix.row_totals();
    for (i, label) in labels.iter().enumerate() {
        out.push_str(&format!("{:<head$}", label));
        for j in 0..matrix.k() {
            out.push_str(&format!("{:>cell$}", matrix.cell(i, j)));
        }
        out.push_str(&format!("{:>cell$}\n", rows[i]));
    }

    out.push_str(&format!("{:<head$}", "Total"));
    for total in matrix.col_totals() {
        out.push_str(&format!("{:>cell$}", total));
    }
    out.push_str(&format!("{:>cell$}\n", matrix.n()));
    out
}

pub fn render_trace(
    result: &KappaResult,
    matrix: &ConfusionMatrix,
    scheme: &CategoryScheme,
) -> String {
    let n = result.n;
    let mut out = String::new();

    out.push_str("Observed agreement (p0)\n");
    out.push_str(&format!(
        "  Diagonal sum (agreements): {}\n",
        matrix.diagonal_sum()
    ));
    out.push_str(&format!("  Total observations: {}\n", n));
    out.push_str(&format!(
        "  p0 = {}/{} = {}\n",
        matrix.diagonal_sum(),
        n,
        format_f64(result.observed, 4)
    ));

    out.push_str("Expected agreement (pe)\n");
    for term in &result.marginals {
        out.push_str(&format!(
            "  {}: ({}/{}) x ({}/{}) = {} x {} = {}\n",
            scheme.label(term.category),
            term.row_count,
            n,
            term.col_count,
            n,
            format_f64(term.row_share, 4),
            format_f64(term.col_share, 4),
            format_f64(term.product, 4)
        ));
    }
    out.push_str(&format!("  pe = {}\n", format_f64(result.expected, 4)));

    out.push_str("Cohen's kappa\n");
    let p0 = format_f64(result.observed, 4);
    let pe = format_f64(result.expected, 4);
    if result.degenerate {
        out.push_str("  pe = 1, so kappa = (p0 - pe) / (1 - pe) has no value\n");
        out.push_str(&format!("  kappa = {}\n", format_kappa(result.kappa, 4)));
        return out;
    }
    out.push_str("  kappa = (p0 - pe) / (1 - pe)\n");
    out.push_str(&format!("  kappa = ({} - {}) / (1 - {})\n", p0, pe, pe));
    out.push_str(&format!(
        "  kappa = {} / {}\n",
        format_f64(result.observed - result.expected, 4),
        format_f64(1.0 - result.expected, 4)
    ));
    out.push_str(&format!("  kappa = {}\n", format_kappa(result.kappa, 4)));
    out
}

fn render_results(analysis: &CriterionAnalysis, level: f64) -> String {
    let mut out = String::new();
    let u = &analysis.unweighted;
    let w = &analysis.weighted;
    out.push_str(&format!(
        "Observed agreement: {}\n",
        format_percent(u.observed, 1)
    ));
    out.push_str(&format!(
        "Expected agreement: {}\n",
        format_f64(u.expected, 4)
    ));
    out.push_str(&format!(
        "Cohen's kappa (unweighted): {} ({})\n",
        format_kappa(u.kappa, 4),
        u.interpretation.description()
    ));
    out.push_str(&format!(
        "Cohen's kappa (quadratic weighted): {} ({})\n",
        format_kappa(w.kappa, 4),
        w.interpretation.description()
    ));
    out.push_str(&render_interval("unweighted", analysis.interval.as_ref(), level));
    out.push_str(&render_interval(
        "weighted",
        analysis.weighted_interval.as_ref(),
        level,
    ));
    if analysis.confusion.n() < SMALL_SAMPLE_N {
        out.push_str(&format!(
            "Caveat: asymptotic standard error with n = {} (< {}); intervals are approximate.\n",
            analysis.confusion.n(),
            SMALL_SAMPLE_N
        ));
    }
    out
}

fn render_interval(name: &str, ci: Option<&ConfidenceInterval>, level: f64) -> String {
    match ci {
        Some(ci) => format!(
            "{}% CI ({}): ({}, {})  SE = {}\n",
            level_percent(level),
            name,
            format_f64(ci.lower, 4),
            format_f64(ci.upper, 4),
            format_f64(ci.standard_error, 4)
        ),
        None => format!(
            "{}% CI ({}): not available (kappa undefined)\n",
            level_percent(level),
            name
        ),
    }
}

fn render_distributions(analysis: &CriterionAnalysis, scheme: &CategoryScheme) -> String {
    let lw = label_width(scheme).max(8);
    let k = scheme.n_categories();
    let pista = category_counts(&analysis.categorized.pista, k);
    let w2v = category_counts(&analysis.categorized.w2v, k);
    let mut out = String::new();
    out.push_str(&format!("{:<lw$}  {:>5}  {:>5}\n", "Category", "Pista", "W2V"));
    for cat in scheme.categories() {
        out.push_str(&format!(
            "{:<lw$}  {:>5}  {:>5}\n",
            scheme.label(cat),
            pista[cat.rank()],
            w2v[cat.rank()]
        ));
    }
    out
}

fn render_disagreements(analysis: &CriterionAnalysis, scheme: &CategoryScheme) -> String {
    let d = &analysis.descriptives;
    let mut out = String::new();
    out.push_str(&format!(
        "Disagreements: {} out of {}\n",
        d.disagreements.len(),
        d.n
    ));
    if d.disagreements.is_empty() {
        return out;
    }
    let nw = name_width(analysis);
    let cw = label_width(scheme) + 7;
    out.push_str(&format!(
        "{:<nw$}  {:<cw$}  {:<cw$}  {:>5}  {:>5}\n",
        "Pitch", "Pista", "W2V", "Diff", "Steps"
    ));
    for item in &d.disagreements {
        let p = format!("{:.1} ({})", item.pista, scheme.label(item.pista_category));
        let w = format!("{:.1} ({})", item.w2v, scheme.label(item.w2v_category));
        out.push_str(&format!(
            "{:<nw$}  {:<cw$}  {:<cw$}  {:>5.1}  {:>5}\n",
            item.name, p, w, item.abs_diff, item.category_distance
        ));
    }
    out
}

fn render_descriptives(analysis: &CriterionAnalysis) -> String {
    let d = &analysis.descriptives;
    let mut out = String::new();
    out.push_str(&format!(
        "Pista - Mean: {}, SD: {}\n",
        format_f64(d.pista.mean, 2),
        format_f64(d.pista.sd, 2)
    ));
    out.push_str(&format!(
        "W2V   - Mean: {}, SD: {}\n",
        format_f64(d.w2v.mean, 2),
        format_f64(d.w2v.sd, 2)
    ));
    out.push_str(&format!(
        "Mean difference (Pista - W2V): {}\n",
        format_f64(d.mean_difference, 2)
    ));
    out.push_str(&format!(
        "Pearson correlation: {}\n",
        d.pearson
            .map(|r| format_f64(r, 3))
            .unwrap_or_else(|| "n/a (no variance)".to_string())
    ));
    let frac = if d.n > 0 {
        d.agreements as f64 / d.n as f64
    } else {
        0.0
    };
    out.push_str(&format!(
        "Exact agreement: {}/{} ({})\n",
        d.agreements,
        d.n,
        format_percent(frac, 1)
    ));
    out
}

fn render_dimensions(analyses: &[CriterionAnalysis]) -> String {
    let tw = analyses
        .iter()
        .map(|a| a.criterion.title().len())
        .max()
        .unwrap_or(0);
    let mut out = String::new();
    for a in analyses {
        let ci = match &a.interval {
            Some(ci) => format!(
                "[{}, {}]",
                format_f64(ci.lower, 3),
                format_f64(ci.upper, 3)
            ),
            None => "[n/a]".to_string(),
        };
        out.push_str(&format!(
            "{:<tw$}  kappa = {} {} ({})  weighted = {}\n",
            a.criterion.title(),
            format_kappa(a.unweighted.kappa, 3),
            ci,
            a.unweighted.interpretation.label(),
            format_kappa(a.weighted.kappa, 3)
        ));
    }
    out
}
