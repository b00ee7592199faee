#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Criterion {
    /// Pista overall score against Winds2Ventures investibility.
    Overall,
    ProblemSolution,
    BusinessMarket,
    TeamExecution,
}

pub fn criterion_order() -> &'static [Criterion] {
    &[
        Criterion::Overall,
        Criterion::ProblemSolution,
        Criterion::BusinessMarket,
        Criterion::TeamExecution,
    ]
}

impl Criterion {
    pub fn title(self) -> &'static str {
        match self {
            Criterion::Overall => "Overall",
            Criterion::ProblemSolution => "Problem-Solution Fit",
            Criterion::BusinessMarket => "Business Model & Market",
            Criterion::TeamExecution => "Team & Execution",
        }
    }

    pub fn slug(self) -> &'static str {
        match self {
            Criterion::Overall => "overall",
            Criterion::ProblemSolution => "problem_solution",
            Criterion::BusinessMarket => "business_market",
            Criterion::TeamExecution => "team_execution",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CriterionRating {
    pub criterion: Criterion,
    pub pista: f64,
    pub w2v: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PitchRecord {
    pub name: String,
    pub ratings: Vec<CriterionRating>,
}

impl PitchRecord {
    pub fn rating(&self, criterion: Criterion) -> Option<&CriterionRating> {
        self.ratings.iter().find(|r| r.criterion == criterion)
    }
}
