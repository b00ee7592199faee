use crate::model::categories::Category;
use crate::pipeline::stage1_categorize::Stage1Output;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RaterSummary {
    pub mean: f64,
    /// Sample standard deviation (n - 1).
    pub sd: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Disagreement {
    pub name: String,
    pub pista: f64,
    pub pista_category: Category,
    pub w2v: f64,
    pub w2v_category: Category,
    pub abs_diff: f64,
    pub category_distance: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Descriptives {
    pub n: usize,
    pub pista: RaterSummary,
    pub w2v: RaterSummary,
    /// Mean of `pista - w2v`.
    pub mean_difference: f64,
    pub pearson: Option<f64>,
    pub agreements: usize,
    pub disagreements: Vec<Disagreement>,
}

pub fn run_stage5(input: &Stage1Output) -> Descriptives {
    let differences = input
        .pista_scores
        .iter()
        .zip(&input.w2v_scores)
        .map(|(p, w)| p - w)
        .collect::<Vec<_>>();

    let mut disagreements = Vec::new();
    for i in 0..input.n() {
        let (pc, wc) = (input.pista[i], input.w2v[i]);
        if pc == wc {
            continue;
        }
        disagreements.push(Disagreement {
            name: input.names[i].clone(),
            pista: input.pista_scores[i],
            pista_category: pc,
            w2v: input.w2v_scores[i],
            w2v_category: wc,
            abs_diff: differences[i].abs(),
            category_distance: pc.rank().abs_diff(wc.rank()),
        });
    }

    Descriptives {
        n: input.n(),
        pista: summarize(&input.pista_scores),
        w2v: summarize(&input.w2v_scores),
        mean_difference: mean(&differences),
        pearson: pearson(&input.pista_scores, &input.w2v_scores),
        agreements: input.n() - disagreements.len(),
        disagreements,
    }
}

/// Count per category rank, `n_categories` long.
pub fn category_counts(categories: &[Category], n_categories: usize) -> Vec<usize> {
    let mut counts = vec![0usize; n_categories];
    for c in categories {
        if let Some(slot) = counts.get_mut(c.rank()) {
            *slot += 1;
        }
    }
    counts
}

fn summarize(values: &[f64]) -> RaterSummary {
    RaterSummary {
        mean: mean(values),
        sd: sample_sd(values),
    }
}

pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

pub fn sample_sd(values: &[f64]) -> f64 {
    if values.len() < 2 {
        return 0.0;
    }
    let m = mean(values);
    let ss: f64 = values.iter().map(|v| (v - m) * (v - m)).sum();
    (ss / (values.len() - 1) as f64).sqrt()
}

/// `None` when either series has no variance.
pub fn pearson(a: &[f64], b: &[f64]) -> Option<f64> {
    if a.len() != b.len() || a.len() < 2 {
        return None;
    }
    let (ma, mb) = (mean(a), mean(b));
    let mut cov = 0.0;
    let mut va = 0.0;
    let mut vb = 0.0;
    for (x, y) in a.iter().zip(b) {
        let (dx, dy) = (x - ma, y - mb);
        cov += dx * dy;
        va += dx * dx;
        vb += dy * dy;
    }
    if !(va > 0.0 && vb > 0.0) {
        return None;
    }
    Some(cov / (va.sqrt() * vb.sqrt()))
}

#[cfg(test)]
#[path = "../../tests/src_inline/pipeline/stage5_describe.rs"]
mod tests;
