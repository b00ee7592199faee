use crate::model::criteria::Criterion;
use crate::pipeline::CriterionAnalysis;
use crate::pipeline::stage4_interval::SMALL_SAMPLE_N;
use crate::report::{ReportContext, format_f64, format_kappa, level_percent};

pub fn render_latex(ctx: &ReportContext<'_>) -> String {
    let mut out = render_kappa_table(ctx);
    if let Some(primary) = ctx.primary() {
        out.push('\n');
        out.push_str(&render_summary_table(primary));
    }
    out
}

/// One row per criterion, the overall comparison last and in bold.
pub fn render_kappa_table(ctx: &ReportContext<'_>) -> String {
    let level = level_percent(ctx.confidence_level);
    let mut out = String::new();
    out.push_str("\\begin{table}[ht]\n");
    out.push_str("    \\centering\n");
    out.push_str("    \\caption{Inter-Rater Agreement Analysis Using Cohen's Kappa}\n");
    out.push_str("    \\label{tab:cohens-kappa}\n");
    out.push_str("    \\begin{tabular}{lccc}\n");
    out.push_str("        \\toprule\n");
    out.push_str(&format!(
        "        \\textbf{{Evaluation Criterion}} & \\textbf{{Cohen's Kappa}} & \\textbf{{{}\\% CI}} & \\textbf{{Interpretation}} \\\\\n",
        level
    ));
    out.push_str("        \\midrule\n");

    let dimensions = ctx
        .analyses
        .iter()
        .filter(|a| a.criterion != Criterion::Overall)
        .collect::<Vec<_>>();
    for a in &dimensions {
        let [title, kappa, ci, interp] = row_cells(a);
        out.push_str(&format!(
            "        {} & {} & {} & {} \\\\\n",
            title, kappa, ci, interp
        ));
    }

    if let Some(overall) = ctx
        .analyses
        .iter()
        .find(|a| a.criterion == Criterion::Overall)
    {
        if !dimensions.is_empty() {
            out.push_str("        \\midrule\n");
        }
        let [_, kappa, ci, interp] = row_cells(overall);
        out.push_str(&format!(
            "        \\textbf{{Overall Agreement}} & \\textbf{{{}}} & \\textbf{{{}}} & \\textbf{{{}}} \\\\\n",
            kappa, ci, interp
        ));
    }

    out.push_str("        \\bottomrule\n");
    out.push_str("    \\end{tabular}\n");
    out.push_str(&format!(
        "    \\note{{Interpretation follows Landis and Koch (1977) guidelines. {}}}\n",
        interval_note(ctx.n_pitches)
    ));
    out.push_str("\\end{table}\n");
    out
}

pub fn render_summary_table(analysis: &CriterionAnalysis) -> String {
    let u = &analysis.unweighted;
    let w = &analysis.weighted;
    let d = &analysis.descriptives;
    let mut out = String::new();
    out.push_str("\\begin{table}[ht]\n");
    out.push_str("    \\centering\n");
    out.push_str("    \\caption{Inter-Rater Reliability Analysis Using Cohen's Kappa}\n");
    out.push_str("    \\label{tab:kappa-summary}\n");
    out.push_str("    \\begin{tabular}{lcc}\n");
    out.push_str("        \\toprule\n");
    out.push_str(
        "        \\textbf{Measure} & \\textbf{Value} & \\textbf{Interpretation} \\\\\n",
    );
    out.push_str("        \\midrule\n");
    out.push_str(&format!(
        "        Cohen's Kappa & {} & {} \\\\\n",
        format_kappa(u.kappa, 3),
        u.interpretation.label()
    ));
    out.push_str(&format!(
        "        Weighted Kappa (quadratic) & {} & {} \\\\\n",
        format_kappa(w.kappa, 3),
        w.interpretation.label()
    ));
    out.push_str(&format!(
        "        Observed Agreement & {}\\% & -- \\\\\n",
        format_f64(u.observed * 100.0, 1)
    ));
    out.push_str(&format!(
        "        Pearson Correlation & {} & -- \\\\\n",
        d.pearson
            .map(|r| format_f64(r, 3))
            .unwrap_or_else(|| "--".to_string())
    ));
    out.push_str(&format!(
        "        Mean Score Difference & {} & Pista $-$ W2V \\\\\n",
        format_f64(d.mean_difference, 2)
    ));
    out.push_str("        \\bottomrule\n");
    out.push_str("    \\end{tabular}\n");
    out.push_str("    \\note{Interpretation follows Landis and Koch (1977) guidelines. Scores were categorized into ordinal levels for kappa calculation.}\n");
    out.push_str("\\end{table}\n");
    out
}

fn row_cells(a: &CriterionAnalysis) -> [String; 4] {
    let ci = match &a.interval {
        Some(ci) => format!(
            "[{}, {}]",
            format_f64(ci.lower, 3),
            format_f64(ci.upper, 3)
        ),
        None => "--".to_string(),
    };
    [
        escape_latex(a.criterion.title()),
        format_kappa(a.unweighted.kappa, 3),
        ci,
        escape_latex(a.unweighted.interpretation.label()),
    ]
}

fn interval_note(n: usize) -> String {
    if n < SMALL_SAMPLE_N {
        format!(
            "Confidence intervals use the asymptotic standard error and are approximate for $n = {}$.",
            n
        )
    } else {
        "Confidence intervals use the asymptotic standard error.".to_string()
    }
}

pub fn escape_latex(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' | '%' | '$' | '#' | '_' | '{' | '}' => {
                out.push('\\');
                out.push(c);
            }
            _ => out.push(c),
        }
    }
    out
}
