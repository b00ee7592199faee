/// Landis & Koch (1977) bands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Interpretation {
    Poor,
    Slight,
    Fair,
    Moderate,
    Substantial,
    AlmostPerfect,
    Undefined,
}

impl Interpretation {
    pub fn from_kappa(kappa: Option<f64>) -> Self {
        let Some(k) = kappa else {
            return Interpretation::Undefined;
        };
        if k.is_nan() {
            Interpretation::Undefined
        } else if k < 0.0 {
            Interpretation::Poor
        } else if k < 0.20 {
            Interpretation::Slight
        } else if k < 0.40 {
            Interpretation::Fair
        } else if k < 0.60 {
            Interpretation::Moderate
        } else if k < 0.80 {
            Interpretation::Substantial
        } else {
            Interpretation::AlmostPerfect
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Interpretation::Poor => "Poor",
            Interpretation::Slight => "Slight",
            Interpretation::Fair => "Fair",
            Interpretation::Moderate => "Moderate",
            Interpretation::Substantial => "Substantial",
            Interpretation::AlmostPerfect => "Almost Perfect",
            Interpretation::Undefined => "Undefined",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            Interpretation::Poor => "Poor agreement (worse than chance)",
            Interpretation::Slight => "Slight agreement",
            Interpretation::Fair => "Fair agreement",
            Interpretation::Moderate => "Moderate agreement",
            Interpretation::Substantial => "Substantial agreement",
            Interpretation::AlmostPerfect => "Almost perfect agreement",
            Interpretation::Undefined => "Undefined (expected agreement is 1)",
        }
    }
}
