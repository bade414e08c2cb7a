// Unit tests for term scoring.
//
// Tests isolated pure functions: llr::score properties (zero handling,
// vocabulary reconciliation, sign symmetry, degenerate totals) and
// TfIdf weights on small matrices.

use keyterm::corpus::Corpus;
use keyterm::error::{CountSide, KeytermError};
use keyterm::scoring::llr::{self, Significance};
use keyterm::scoring::tfidf::TfIdf;
use keyterm::terms::counter::{DocumentTermMatrix, TermCounts};

fn counts(pairs: &[(&str, u64)]) -> TermCounts {
    pairs.iter().map(|(t, n)| (t.to_string(), *n)).collect()
}

// ============================================================
// llr::score — vocabulary reconciliation
// ============================================================

#[test]
fn llr_defined_for_every_target_term() {
    let target = counts(&[("tax", 10), ("health_care", 5), ("freedom", 1), ("jobs", 3)]);
    let comparison = counts(&[("tax", 100), ("freedom", 50), ("war", 20)]);
    let result = llr::score(&target, &comparison).unwrap();

    assert_eq!(result.len(), target.len());
    for term in target.keys() {
        assert!(result.get(term).is_some(), "{term} should be scored");
    }
    // Comparison-only terms are not scored
    assert_eq!(result.get("war"), None);
}

#[test]
fn llr_reconcile_extends_comparison_only() {
    let target = counts(&[("tax", 1), ("new", 2)]);
    let comparison = counts(&[("tax", 3), ("old", 4)]);
    let extended = llr::reconcile(&target, &comparison);
    assert_eq!(extended.len(), 3);
    assert_eq!(extended["new"], 0);
    assert_eq!(extended["old"], 4);
}

#[test]
fn llr_comparison_total_unchanged_by_extension() {
    let target = counts(&[("tax", 10), ("health_care", 5), ("freedom", 1)]);
    let comparison = counts(&[("tax", 100), ("freedom", 50)]);
    let result = llr::score(&target, &comparison).unwrap();
    assert_eq!(result.target_total, 16);
    assert_eq!(result.comparison_total, 150);
}

// ============================================================
// llr::score — the documented scenario
// ============================================================

#[test]
fn llr_target_only_term_is_strongly_overused() {
    let target = counts(&[("tax", 10), ("health_care", 5), ("freedom", 1)]);
    let comparison = counts(&[("tax", 100), ("freedom", 50)]);
    let result = llr::score(&target, &comparison).unwrap();

    let hc = result.get("health_care").unwrap();
    assert!(hc > 15.13, "health_care should be p<0.0001, got {hc}");

    // tax: 10/16 = 0.625 vs 100/150 = 0.667 -> mildly underused
    let tax = result.get("tax").unwrap();
    assert!(tax < 0.0);
    assert_eq!(Significance::from_score(tax), Significance::NotSignificant);

    // freedom: 1/16 vs 50/150 -> underused
    assert!(result.get("freedom").unwrap() < -3.84);

    let over = result.overused(5);
    assert_eq!(over[0].0, "health_care");
}

// ============================================================
// llr::score — zero counts and signs
// ============================================================

#[test]
fn llr_zero_in_both_is_zero() {
    let target = counts(&[("tax", 7), ("absent", 0)]);
    let comparison = counts(&[("tax", 7), ("absent", 0)]);
    let result = llr::score(&target, &comparison).unwrap();
    assert_eq!(result.get("absent"), Some(0.0));
    // Identical relative frequency scores zero too
    assert!(result.get("tax").unwrap().abs() < 1e-12);
}

#[test]
fn llr_zero_target_count_is_underused() {
    let target = counts(&[("tax", 10), ("war", 0)]);
    let comparison = counts(&[("tax", 10), ("war", 10)]);
    let result = llr::score(&target, &comparison).unwrap();
    assert!(result.get("war").unwrap() < 0.0);
}

#[test]
fn llr_swapping_roles_flips_sign_keeps_magnitude() {
    let t = counts(&[("tax", 40), ("war", 5), ("peace", 12)]);
    let c = counts(&[("tax", 20), ("war", 30), ("peace", 12)]);
    let forward = llr::score(&t, &c).unwrap();
    let backward = llr::score(&c, &t).unwrap();

    for term in ["tax", "war", "peace"] {
        let f = forward.get(term).unwrap();
        let b = backward.get(term).unwrap();
        assert!(
            (f + b).abs() < 1e-9,
            "{term}: forward {f} and backward {b} should be opposite"
        );
    }
    assert!(forward.get("tax").unwrap() > 0.0);
    assert!(forward.get("war").unwrap() < 0.0);
}

#[test]
fn llr_raw_magnitude_matches_formula() {
    // a=20 b=10 c=100 d=200
    let s = llr::signed_g2(20, 10, 100, 200);
    let e1 = 100.0 * 30.0 / 300.0;
    let e2 = 200.0 * 30.0 / 300.0;
    let expected = 2.0 * (20.0 * (20.0f64 / e1).ln() + 10.0 * (10.0f64 / e2).ln());
    assert!((s - expected).abs() < 1e-9);
    assert!(s > 0.0);
}

// ============================================================
// llr::score — degenerate totals
// ============================================================

#[test]
fn llr_empty_target_fails() {
    let err = llr::score(&TermCounts::new(), &counts(&[("tax", 1)])).unwrap_err();
    assert!(matches!(
        err,
        KeytermError::EmptyVocabulary {
            side: CountSide::Target
        }
    ));
}

#[test]
fn llr_all_zero_comparison_fails() {
    let err = llr::score(&counts(&[("tax", 1)]), &counts(&[("war", 0)])).unwrap_err();
    assert!(matches!(
        err,
        KeytermError::EmptyVocabulary {
            side: CountSide::Comparison
        }
    ));
}

#[test]
fn llr_significant_filters_by_level() {
    let target = counts(&[("tax", 10), ("health_care", 5), ("freedom", 1)]);
    let comparison = counts(&[("tax", 100), ("freedom", 50)]);
    let result = llr::score(&target, &comparison).unwrap();
    let strong: Vec<String> = result
        .significant(Significance::P05)
        .into_iter()
        .map(|(t, _)| t)
        .collect();
    assert!(strong.contains(&"health_care".to_string()));
    assert!(strong.contains(&"freedom".to_string()));
    assert!(!strong.contains(&"tax".to_string()));
}

// ============================================================
// TfIdf
// ============================================================

#[test]
fn tfidf_term_in_every_document_is_zero() {
    let dtm = DocumentTermMatrix::from_corpus(&Corpus::from_tokens(&[
        &["united", "states", "united"],
        &["united", "people"],
        &["united", "united", "united", "war"],
    ]));
    let tfidf = TfIdf::default();
    assert_eq!(tfidf.idf(&dtm, "united"), Some(0.0));
    for doc in 0..3 {
        assert_eq!(tfidf.weight(&dtm, doc, "united"), Some(0.0));
    }
    for row in tfidf.score(&dtm) {
        assert_eq!(row["united"], 0.0);
    }
}

#[test]
fn tfidf_unknown_term_is_absent() {
    let dtm = DocumentTermMatrix::from_corpus(&Corpus::from_tokens(&[&["tax"], &["war"]]));
    let tfidf = TfIdf::default();
    assert_eq!(tfidf.idf(&dtm, "peace"), None);
    assert_eq!(tfidf.weight(&dtm, 0, "peace"), None);
}

#[test]
fn tfidf_uses_raw_counts() {
    let dtm = DocumentTermMatrix::from_corpus(&Corpus::from_tokens(&[
        &["tax", "tax", "tax", "war"],
        &["war"],
    ]));
    let weights = TfIdf::default().score_document(&dtm, 0).unwrap();
    // idf(tax) = log2(2/1) = 1, tf = 3
    assert!((weights["tax"] - 3.0).abs() < 1e-12);
    assert_eq!(weights["war"], 0.0);
}

#[test]
fn tfidf_out_of_range_document_is_error() {
    let dtm = DocumentTermMatrix::from_corpus(&Corpus::from_tokens(&[&["tax"]]));
    assert!(matches!(
        TfIdf::default().score_document(&dtm, 1),
        Err(KeytermError::DocumentOutOfRange { index: 1, len: 1 })
    ));
}
