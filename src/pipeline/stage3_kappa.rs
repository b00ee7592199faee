use crate::model::categories::Category;
use crate::model::interpretation::Interpretation;
use crate::model::thresholds::DegeneratePolicy;
use crate::pipeline::AgreementError;
use crate::pipeline::stage2_confusion::ConfusionMatrix;

const DEGENERATE_EPS: f64 = 1e-12;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Weighting {
    Unweighted,
    /// Penalty `(i - j)^2 / (k - 1)^2` between category ranks.
    Quadratic,
}

impl Weighting {
    pub fn label(self) -> &'static str {
        match self {
            Weighting::Unweighted => "unweighted",
            Weighting::Quadratic => "quadratic",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Kappa {
    Value(f64),
    Undefined,
}

impl Kappa {
    pub fn value(self) -> Option<f64> {
        match self {
            Kappa::Value(v) => Some(v),
            Kappa::Undefined => None,
        }
    }
}

/// Per-category chance agreement term `p_i * q_i`.
#[derive(Debug, Clone, PartialEq)]
pub struct MarginalTerm {
    pub category: Category,
    pub row_count: usize,
    pub col_count: usize,
    pub row_share: f64,
    pub col_share: f64,
    pub product: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct KappaResult {
    pub weighting: Weighting,
    pub n: usize,
    /// p0; `1 - weighted observed disagreement` for the quadratic variant.
    pub observed: f64,
    /// pe; `1 - weighted expected disagreement` for the quadratic variant.
    pub expected: f64,
    pub kappa: Kappa,
    /// Expected agreement was 1, kappa came from the degenerate policy.
    pub degenerate: bool,
    pub interpretation: Interpretation,
    pub marginals: Vec<MarginalTerm>,
}

pub fn compute_kappa(
    matrix: &ConfusionMatrix,
    weighting: Weighting,
    policy: DegeneratePolicy,
) -> Result<KappaResult, AgreementError> {
    if matrix.n() == 0 {
        return Err(AgreementError::EmptyInput);
    }
    let marginals = marginal_terms(matrix);

    let (observed, expected, raw) = match weighting {
        Weighting::Unweighted => {
            let p0 = matrix.diagonal_sum() as f64 / matrix.n() as f64;
            let pe: f64 = marginals.iter().map(|t| t.product).sum();
            let raw = if (1.0 - pe).abs() <= DEGENERATE_EPS {
                None
            } else {
                Some((p0 - pe) / (1.0 - pe))
            };
            (p0, pe, raw)
        }
        Weighting::Quadratic => {
            let (d_obs, d_exp) = quadratic_disagreement(matrix, &marginals);
            let raw = if d_exp.abs() <= DEGENERATE_EPS {
                None
            } else {
                Some(1.0 - d_obs / d_exp)
            };
            (1.0 - d_obs, 1.0 - d_exp, raw)
        }
    };

    let degenerate = raw.is_none();
    let kappa = match (raw, policy) {
        (Some(v), _) => Kappa::Value(v),
        (None, DegeneratePolicy::Zero) => Kappa::Value(0.0),
        (None, DegeneratePolicy::Undefined) => Kappa::Undefined,
    };
    if degenerate {
        tracing::warn!(
            "expected agreement is 1 for {} kappa; reporting {:?}",
            weighting.label(),
            kappa
        );
    }

    Ok(KappaResult {
        weighting,
        n: matrix.n(),
        observed,
        expected,
        kappa,
        degenerate,
        interpretation: Interpretation::from_kappa(kappa.value()),
        marginals,
    })
}

fn marginal_terms(matrix: &ConfusionMatrix) -> Vec<MarginalTerm> {
    let n = matrix.n() as f64;
    let rows = matrix.row_totals();
    let cols = matrix.col_totals();
    matrix
        .categories()
        .iter()
        .enumerate()
        .map(|(i, &category)| {
            let row_share = rows[i] as f64 / n;
            let col_share = cols[i] as f64 / n;
            MarginalTerm {
                category,
                row_count: rows[i],
                col_count: cols[i],
                row_share,
                col_share,
                product: row_share * col_share,
            }
        })
        .collect()
}

/// Returns (observed, expected) weighted disagreement.
fn quadratic_disagreement(matrix: &ConfusionMatrix, marginals: &[MarginalTerm]) -> (f64, f64) {
    let k = matrix.k();
    if k < 2 {
        return (0.0, 0.0);
    }
    let n = matrix.n() as f64;
    let scale = ((k - 1) * (k - 1)) as f64;
    let mut observed = 0.0;
    let mut expected = 0.0;
    for i in 0..k {
        for j in 0..k {
            let d = i.abs_diff(j) as f64;
            let w = d * d / scale;
            observed += w * matrix.cell(i, j) as f64 / n;
            expected += w * marginals[i].row_share * marginals[j].col_share;
        }
    }
    (observed, expected)
}

#[cfg(test)]
#[path = "../../tests/src_inline/pipeline/stage3_kappa.rs"]
mod tests;
