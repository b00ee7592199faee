use crate::input::PitchDataset;
use crate::model::criteria::{Criterion, CriterionRating, PitchRecord};

struct BuiltinRow {
    name: &'static str,
    // (pista, winds2ventures) per criterion
    overall: (f64, f64),
    problem_solution: (f64, f64),
    business_market: (f64, f64),
    team_execution: (f64, f64),
}

const fn row(
    name: &'static str,
    overall: (f64, f64),
    problem_solution: (f64, f64),
    business_market: (f64, f64),
    team_execution: (f64, f64),
) -> BuiltinRow {
    BuiltinRow {
        name,
        overall,
        problem_solution,
        business_market,
        team_execution,
    }
}

// Scores from "Pitch Comparisons: New Scores". Winds2Ventures criterion scores
// are the averaged criteria mapped onto Pista's dimensions.
const ROWS: &[BuiltinRow] = &[
    row("Aerovisio", (5.3, 4.5), (6.2, 5.5), (5.2, 4.0), (4.0, 5.0)),
    row("Assistme", (4.9, 5.4), (6.2, 6.5), (5.0, 5.0), (3.0, 5.0)),
    row("Assistme2", (6.2, 4.4), (6.2, 6.5), (6.2, 4.0), (6.0, 6.0)),
    row("CampoRapido", (4.2, 4.5), (6.2, 6.0), (3.0, 4.5), (3.0, 6.0)),
    row("Coontent", (6.0, 5.3), (7.2, 6.5), (5.8, 5.5), (5.0, 5.0)),
    row("Corptech", (6.3, 6.0), (7.4, 7.5), (6.0, 6.5), (5.0, 5.0)),
    row("Finnaid", (5.0, 5.5), (5.4, 6.5), (5.0, 6.5), (4.0, 6.0)),
    row("Fitly", (5.6, 4.7), (6.2, 6.0), (6.0, 6.0), (4.2, 5.0)),
    row("HHCoders", (4.8, 4.5), (6.2, 6.5), (5.0, 4.5), (3.0, 5.0)),
    row("MatchIt", (5.3, 6.4), (6.2, 7.5), (5.4, 7.0), (4.0, 6.0)),
    row("Math4Me", (4.6, 4.5), (6.2, 6.5), (3.8, 4.0), (3.0, 5.0)),
    row("Mediflow", (6.1, 4.5), (7.0, 5.5), (6.0, 5.0), (5.0, 5.0)),
    row("Myok", (6.1, 6.4), (7.2, 7.5), (5.6, 7.0), (5.0, 6.0)),
    row("PolyGlobe", (5.8, 6.4), (7.0, 7.5), (6.2, 7.5), (3.2, 5.0)),
    row("Prosilta", (5.8, 5.4), (7.2, 6.5), (6.0, 6.0), (3.3, 6.0)),
    row("Rideshare", (4.1, 4.5), (5.0, 5.5), (3.8, 4.5), (3.0, 6.0)),
    row("saunaYou&Me", (5.5, 5.5), (6.2, 6.5), (6.0, 6.0), (4.0, 6.0)),
    row("Serenity", (6.0, 6.1), (6.8, 7.5), (6.2, 7.5), (4.2, 7.0)),
    row("Shieldskin", (5.7, 5.0), (6.2, 6.5), (6.0, 5.0), (4.0, 6.0)),
    row("Sundove", (5.0, 5.0), (6.2, 7.5), (4.0, 5.0), (4.2, 5.0)),
    row("UnversitAI", (4.0, 4.3), (5.2, 6.5), (3.2, 4.5), (3.0, 5.0)),
    row("Whopika", (5.7, 5.5), (6.4, 6.5), (5.0, 5.5), (5.0, 6.0)),
];

pub const BUILTIN_SOURCE: &str = "built-in thesis dataset";

pub fn builtin_dataset() -> PitchDataset {
    let pitches = ROWS
        .iter()
        .map(|r| PitchRecord {
            name: r.name.to_string(),
            ratings: vec![
                rating(Criterion::Overall, r.overall),
                rating(Criterion::ProblemSolution, r.problem_solution),
                rating(Criterion::BusinessMarket, r.business_market),
                rating(Criterion::TeamExecution, r.team_execution),
            ],
        })
        .collect();
    PitchDataset {
        source: BUILTIN_SOURCE.to_string(),
        pitches,
    }
}

fn rating(criterion: Criterion, (pista, w2v): (f64, f64)) -> CriterionRating {
    CriterionRating {
        criterion,
        pista,
        w2v,
    }
}
