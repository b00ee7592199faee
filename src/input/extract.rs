use std::fs;
use std::path::Path;
use std::sync::LazyLock;

use regex::Regex;

use crate::input::InputError;
use crate::input::scores_csv::{ScoreRow, is_valid_rating, write_score_csv};

static NAME_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z][A-Za-z0-9& ]+$").expect("name pattern is a valid regex")
});

// Section headings that look like pitch names.
const KNOWN_TITLES: &[&str] = &[
    "Pista Scores",
    "Pista Score",
    "Winds2Ventures\u{2019}s Scores",
    "Winds2Ventures's Scores",
    "Winds2Ventures Scores",
    "WindsVentures Score",
    "WindsVentures Scores",
    "WindsVentures\u{2019}s Score",
    "Pista",
];

const BOILERPLATE: &[&str] = &[
    "Contents",
    "These pitches were taken from a student pitches competition.",
    "Pitch Comparisons between my system(Pista)",
    "1",
    "2",
    "3",
];

const OVERALL_MARKER: &str = "Overall Score:";
const INVESTIBILITY_MARKER: &str = "Investibility:";

#[derive(Debug, Clone, Copy, PartialEq)]
enum LineKind<'a> {
    Skip,
    Name(&'a str),
    Overall(Option<f64>),
    Investibility(Option<f64>),
    Other,
}

fn classify_line(line: &str) -> LineKind<'_> {
    if line.is_empty() || BOILERPLATE.contains(&line) || line.chars().all(|c| c.is_ascii_digit())
    {
        return LineKind::Skip;
    }
    if NAME_PATTERN.is_match(line)
        && !KNOWN_TITLES.contains(&line)
        && !line.contains("Score")
        && !line.contains("Transcript")
    {
        return LineKind::Name(line);
    }
    let body = line.trim_start_matches(['\u{2022}', '*', '-']).trim_start();
    if let Some(rest) = body.strip_prefix(OVERALL_MARKER) {
        return LineKind::Overall(parse_out_of_ten(rest));
    }
    if let Some(rest) = body.strip_prefix(INVESTIBILITY_MARKER) {
        return LineKind::Investibility(parse_out_of_ten(rest));
    }
    LineKind::Other
}

/// `" 5.3/10"` -> `5.3`; `None` for anything off the 0-10 scale.
fn parse_out_of_ten(rest: &str) -> Option<f64> {
    rest.split('/')
        .next()?
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|&v| is_valid_rating(v))
}

/// Single pass over the document. A name line opens a record, the overall
/// score fills the Pista rating and the investibility score closes it.
pub fn parse_scores(text: &str) -> Vec<ScoreRow> {
    let mut current_name: Option<&str> = None;
    let mut pista_score: Option<f64> = None;
    let mut scores = Vec::new();

    for (idx, raw_line) in text.lines().enumerate() {
        let line = raw_line.trim();
        match classify_line(line) {
            LineKind::Skip | LineKind::Other => {}
            LineKind::Name(name) => {
                current_name = Some(name);
                pista_score = None;
            }
            LineKind::Overall(value) => {
                if current_name.is_none() {
                    continue;
                }
                match value {
                    Some(v) => pista_score = Some(v),
                    None => tracing::warn!(
                        "unparseable overall score on line {}; skipping: {line}",
                        idx + 1
                    ),
                }
            }
            LineKind::Investibility(value) => {
                let (Some(name), Some(pista)) = (current_name, pista_score) else {
                    continue;
                };
                let Some(w2v) = value else {
                    tracing::warn!(
                        "unparseable investibility score on line {}; skipping: {line}",
                        idx + 1
                    );
                    continue;
                };
                scores.push(ScoreRow {
                    pitch: name.to_string(),
                    pista_overall: pista,
                    w2v_investibility: w2v,
                });
                current_name = None;
                pista_score = None;
            }
        }
    }

    scores
}

/// Reads `source`, writes the extracted rows to `dest` and returns them.
pub fn extract_file(source: &Path, dest: &Path) -> Result<Vec<ScoreRow>, InputError> {
    let text = fs::read_to_string(source)?;
    let rows = parse_scores(&text);
    if rows.is_empty() {
        return Err(InputError::NoRecordsExtracted);
    }
    tracing::info!(
        "extracted {} pitches from {}",
        rows.len(),
        source.display()
    );
    write_score_csv(dest, &rows)?;
    Ok(rows)
}

#[cfg(test)]
#[path = "../../tests/src_inline/input/extract.rs"]
mod tests;
