use std::fs;
use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};

use super::*;

static DIR_COUNTER: AtomicUsize = AtomicUsize::new(0);

fn make_temp_dir() -> PathBuf {
    let mut dir = std::env::temp_dir();
    let id = DIR_COUNTER.fetch_add(1, Ordering::SeqCst);
    dir.push(format!("pitch_irr_extract_test_{}_{}", std::process::id(), id));
    fs::create_dir_all(&dir).unwrap();
    dir
}

const SAMPLE: &str = "\
Contents
Pitch Comparisons between my system(Pista)
These pitches were taken from a student pitches competition.
1
Aerovisio
Pista Scores
\u{2022} Overall Score: 5.3/10
Winds2Ventures's Scores
\u{2022} Investibility: 4.5/10

12
saunaYou&Me
Transcript
\u{2022} Overall Score: 5.5/10
\u{2022} Investibility: 5.5/10
";

#[test]
fn test_single_record() {
    let text = "Aerovisio\n\u{2022} Overall Score: 5.3/10\n\u{2022} Investibility: 4.5/10\n";
    let rows = parse_scores(text);
    assert_eq!(
        rows,
        vec![ScoreRow {
            pitch: "Aerovisio".to_string(),
            pista_overall: 5.3,
            w2v_investibility: 4.5,
        }]
    );
}

#[test]
fn test_titles_and_boilerplate_are_skipped() {
    let rows = parse_scores(SAMPLE);
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].pitch, "Aerovisio");
    assert_eq!(rows[1].pitch, "saunaYou&Me");
    assert_eq!(rows[1].pista_overall, 5.5);
}

#[test]
fn test_markers_without_bullet() {
    let rows = parse_scores("Myok\nOverall Score: 6.1/10\nInvestibility: 6.4/10\n");
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].w2v_investibility, 6.4);
}

#[test]
fn test_investibility_without_overall_is_ignored() {
    let rows = parse_scores("Fitly\n\u{2022} Investibility: 4.7/10\n");
    assert!(rows.is_empty());
}

#[test]
fn test_new_name_resets_pending_score() {
    let text = "Fitly\n\u{2022} Overall Score: 5.6/10\nMediflow\n\u{2022} Investibility: 4.5/10\n";
    assert!(parse_scores(text).is_empty());
}

#[test]
fn test_malformed_value_is_skipped() {
    let text = "Fitly\n\u{2022} Overall Score: n/a\n\u{2022} Investibility: 4.7/10\n\
                Myok\n\u{2022} Overall Score: 6.1/10\n\u{2022} Investibility: 6.4/10\n";
    let rows = parse_scores(text);
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].pitch, "Myok");
}

#[test]
fn test_non_finite_and_off_scale_values_are_skipped() {
    let text = "Fitly\n\u{2022} Overall Score: NaN/10\n\u{2022} Investibility: inf/10\n\
                Myok\n\u{2022} Overall Score: 6.1/10\n\u{2022} Investibility: 12/10\n\
                Whopika\n\u{2022} Overall Score: 0/10\n\u{2022} Investibility: 10/10\n";
    let rows = parse_scores(text);
    assert_eq!(
        rows,
        vec![ScoreRow {
            pitch: "Whopika".to_string(),
            pista_overall: 0.0,
            w2v_investibility: 10.0,
        }]
    );
    assert_eq!(
        classify_line("Overall Score: -1/10"),
        LineKind::Overall(None)
    );
}

#[test]
fn test_classify_line() {
    assert_eq!(classify_line(""), LineKind::Skip);
    assert_eq!(classify_line("42"), LineKind::Skip);
    assert_eq!(classify_line("Contents"), LineKind::Skip);
    assert_eq!(classify_line("Pista Scores"), LineKind::Other);
    assert_eq!(classify_line("Math4Me"), LineKind::Name("Math4Me"));
    assert_eq!(
        classify_line("\u{2022} Overall Score: 4.6/10"),
        LineKind::Overall(Some(4.6))
    );
    assert_eq!(
        classify_line("\u{2022} Investibility: x/10"),
        LineKind::Investibility(None)
    );
}

#[test]
fn test_extract_file_writes_csv() {
    let dir = make_temp_dir();
    let source = dir.join("comparisons.txt");
    let dest = dir.join("data").join("scores.csv");
    fs::write(&source, SAMPLE).unwrap();

    let rows = extract_file(&source, &dest).unwrap();
    assert_eq!(rows.len(), 2);
    let csv = fs::read_to_string(&dest).unwrap();
    assert_eq!(
        csv,
        "Pitch,PistaOverall,Winds2VenturesInvestibility\nAerovisio,5.3,4.5\nsaunaYou&Me,5.5,5.5\n"
    );
}

#[test]
fn test_extract_file_fails_without_records() {
    let dir = make_temp_dir();
    let source = dir.join("empty.txt");
    let dest = dir.join("scores.csv");
    fs::write(&source, "Contents\n1\n2\n").unwrap();

    let err = extract_file(&source, &dest).unwrap_err();
    assert!(matches!(err, InputError::NoRecordsExtracted));
    assert_eq!(
        err.to_string(),
        "No pitch scores found; please check source format."
    );
    assert!(!dest.exists());
}
