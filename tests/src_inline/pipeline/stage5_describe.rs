use super::*;
use crate::model::criteria::Criterion;

fn stage1(names: &[&str], pista: &[(f64, usize)], w2v: &[(f64, usize)]) -> Stage1Output {
    Stage1Output {
        criterion: Criterion::Overall,
        names: names.iter().map(|s| s.to_string()).collect(),
        pista_scores: pista.iter().map(|p| p.0).collect(),
        w2v_scores: w2v.iter().map(|p| p.0).collect(),
        pista: pista.iter().map(|p| Category(p.1)).collect(),
        w2v: w2v.iter().map(|p| Category(p.1)).collect(),
    }
}

#[test]
fn test_mean_and_sample_sd() {
    let v = [2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0];
    assert_eq!(mean(&v), 5.0);
    assert!((sample_sd(&v) - (32.0f64 / 7.0).sqrt()).abs() < 1e-12);
    assert_eq!(sample_sd(&[3.0]), 0.0);
    assert_eq!(mean(&[]), 0.0);
}

#[test]
fn test_pearson() {
    let r = pearson(&[1.0, 2.0, 3.0], &[2.0, 4.0, 6.0]).unwrap();
    assert!((r - 1.0).abs() < 1e-12);
    let r = pearson(&[1.0, 2.0, 3.0], &[3.0, 2.0, 1.0]).unwrap();
    assert!((r + 1.0).abs() < 1e-12);
    assert_eq!(pearson(&[5.0, 5.0, 5.0], &[1.0, 2.0, 3.0]), None);
    assert_eq!(pearson(&[1.0], &[1.0]), None);
    assert_eq!(pearson(&[1.0, f64::NAN, 3.0], &[1.0, 2.0, 3.0]), None);
}

#[test]
fn test_category_counts_cover_unused_categories() {
    let counts = category_counts(&[Category(1), Category(1), Category(3)], 4);
    assert_eq!(counts, vec![0, 2, 0, 1]);
}

#[test]
fn test_run_stage5_lists_disagreements() {
    let input = stage1(
        &["Aerovisio", "Myok", "Whopika"],
        &[(5.3, 1), (4.9, 1), (7.5, 3)],
        &[(4.5, 1), (5.6, 2), (4.4, 1)],
    );
    let d = run_stage5(&input);
    assert_eq!(d.n, 3);
    assert_eq!(d.agreements, 1);
    assert_eq!(d.disagreements.len(), 2);

    let first = &d.disagreements[0];
    assert_eq!(first.name, "Myok");
    assert!((first.abs_diff - 0.7).abs() < 1e-9);
    assert_eq!(first.category_distance, 1);
    assert_eq!(d.disagreements[1].category_distance, 2);

    let expected_diff = ((5.3 - 4.5) + (4.9 - 5.6) + (7.5 - 4.4)) / 3.0;
    assert!((d.mean_difference - expected_diff).abs() < 1e-12);
    assert!((d.pista.mean - (5.3 + 4.9 + 7.5) / 3.0).abs() < 1e-12);
    assert!(d.pearson.is_some());
}
