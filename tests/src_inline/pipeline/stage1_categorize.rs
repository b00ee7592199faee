use super::*;

fn paired(names: &[&str], pista: &[f64], w2v: &[f64]) -> PairedRatings {
    PairedRatings {
        criterion: Criterion::BusinessMarket,
        names: names.iter().map(|s| s.to_string()).collect(),
        pista: pista.to_vec(),
        w2v: w2v.to_vec(),
    }
}

#[test]
fn test_run_stage1_categorizes_both_raters() {
    let scheme = CategoryScheme::four_band();
    let out = run_stage1(
        &paired(&["a", "b", "c"], &[3.9, 5.5, 7.0], &[4.0, 5.4, 6.9]),
        &scheme,
    )
    .unwrap();
    assert_eq!(out.criterion, Criterion::BusinessMarket);
    assert_eq!(out.n(), 3);
    assert_eq!(out.pista, vec![Category(0), Category(2), Category(3)]);
    assert_eq!(out.w2v, vec![Category(1), Category(1), Category(2)]);
    assert_eq!(out.pista_scores, vec![3.9, 5.5, 7.0]);
    assert_eq!(out.names[2], "c");
}

#[test]
fn test_names_must_match_ratings() {
    let scheme = CategoryScheme::four_band();
    let err = run_stage1(&paired(&["a"], &[5.0, 6.0], &[5.0, 6.0]), &scheme).unwrap_err();
    assert_eq!(
        err,
        AgreementError::DimensionMismatch {
            rater_a: 2,
            rater_b: 1
        }
    );
}

#[test]
fn test_check_paired() {
    assert!(check_paired(3, 3).is_ok());
    assert_eq!(check_paired(0, 0), Err(AgreementError::EmptyInput));
    assert_eq!(
        check_paired(0, 2),
        Err(AgreementError::DimensionMismatch {
            rater_a: 0,
            rater_b: 2
        })
    );
}
