// Signed log-likelihood keyness of a target corpus against a comparison.
//
// For each term with target count a and comparison count b, and corpus
// totals c (target) and d (comparison):
//
//   E1 = c (a + b) / (c + d)        E2 = d (a + b) / (c + d)
//   G² = 2 (a ln(a / E1) + b ln(b / E2))
//
// When a or b is zero, the log argument for that side is taken as 1, so the
// side contributes nothing. This reaches the same value as the limit
// x ln x -> 0, but by substitution rather than by taking the limit.
//
// G² is made negative when the term is relatively rarer in the target
// (a / c < b / d), so one ranking shows both overuse (top) and underuse
// (bottom). |G²| is compared against chi-square with 1 degree of freedom.
//
// Both count vectors must come from identically preprocessed corpora. That
// is not checked here.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use super::rank_weights;
use crate::error::{CountSide, KeytermError, Result};
use crate::terms::counter::TermCounts;

/// Chi-square(1) critical values for the usual significance levels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Significance {
    NotSignificant,
    /// p < 0.05
    P05,
    /// p < 0.01
    P01,
    /// p < 0.001
    P001,
    /// p < 0.0001
    P0001,
}

impl Significance {
    pub fn critical_value(self) -> f64 {
        match self {
            Significance::NotSignificant => 0.0,
            Significance::P05 => 3.84,
            Significance::P01 => 6.63,
            Significance::P001 => 10.83,
            Significance::P0001 => 15.13,
        }
    }

    /// Strongest level whose critical value |score| exceeds.
    pub fn from_score(score: f64) -> Self {
        let magnitude = score.abs();
        [
            Significance::P0001,
            Significance::P001,
            Significance::P01,
            Significance::P05,
        ]
        .into_iter()
        .find(|level| magnitude > level.critical_value())
        .unwrap_or(Significance::NotSignificant)
    }

    /// Conventional star marker: *, **, ***, ****.
    pub fn stars(self) -> &'static str {
        match self {
            Significance::NotSignificant => "",
            Significance::P05 => "*",
            Significance::P01 => "**",
            Significance::P001 => "***",
            Significance::P0001 => "****",
        }
    }
}

/// Counts and signed score for one term.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TermScore {
    pub target_count: u64,
    pub comparison_count: u64,
    pub score: f64,
}

impl TermScore {
    pub fn significance(&self) -> Significance {
        Significance::from_score(self.score)
    }
}

/// Result of one keyness comparison: term → signed G².
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LlrScores {
    terms: HashMap<String, TermScore>,
    pub target_total: u64,
    pub comparison_total: u64,
}

impl LlrScores {
    /// Signed score for a term, or None if the term wasn't in the target.
    pub fn get(&self, term: &str) -> Option<f64> {
        self.terms.get(term).map(|t| t.score)
    }

    pub fn term(&self, term: &str) -> Option<&TermScore> {
        self.terms.get(term)
    }

    pub fn len(&self) -> usize {
        self.terms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    /// Plain term → score map.
    pub fn scores(&self) -> HashMap<String, f64> {
        self.terms
            .iter()
            .map(|(term, s)| (term.clone(), s.score))
            .collect()
    }

    /// Every term, highest score first.
    pub fn ranked(&self) -> Vec<(String, f64)> {
        rank_weights(&self.scores())
    }

    /// Up to `n` terms overused in the target, strongest first.
    pub fn overused(&self, n: usize) -> Vec<(String, f64)> {
        self.ranked()
            .into_iter()
            .filter(|(_, s)| *s > 0.0)
            .take(n)
            .collect()
    }

    /// Up to `n` terms underused in the target, most negative first.
    pub fn underused(&self, n: usize) -> Vec<(String, f64)> {
        let mut ranked: Vec<(String, f64)> = self
            .ranked()
            .into_iter()
            .filter(|(_, s)| *s < 0.0)
            .collect();
        ranked.reverse();
        ranked.truncate(n);
        ranked
    }

    /// Terms whose |score| clears `level`, ranked by score.
    pub fn significant(&self, level: Significance) -> Vec<(String, f64)> {
        self.ranked()
            .into_iter()
            .filter(|(_, s)| s.abs() > level.critical_value())
            .collect()
    }
}

/// Comparison counts extended with every target term it lacks, at count 0.
pub fn reconcile(target: &TermCounts, comparison: &TermCounts) -> TermCounts {
    let mut extended = comparison.clone();
    for term in target.keys() {
        extended.entry(term.clone()).or_insert(0);
    }
    extended
}

/// Score every term of `target` against `comparison`.
pub fn score(target: &TermCounts, comparison: &TermCounts) -> Result<LlrScores> {
    let comparison = reconcile(target, comparison);

    let c: u64 = target.values().sum();
    let d: u64 = comparison.values().sum();
    if c == 0 {
        return Err(KeytermError::EmptyVocabulary {
            side: CountSide::Target,
        });
    }
    if d == 0 {
        return Err(KeytermError::EmptyVocabulary {
            side: CountSide::Comparison,
        });
    }

    let terms = target
        .iter()
        .map(|(term, &a)| {
            let b = comparison.get(term).copied().unwrap_or(0);
            let score = signed_g2(a, b, c, d);
            (
                term.clone(),
                TermScore {
                    target_count: a,
                    comparison_count: b,
                    score,
                },
            )
        })
        .collect();

    Ok(LlrScores {
        terms,
        target_total: c,
        comparison_total: d,
    })
}

/// Signed G² for one term. `c` and `d` must be non-zero.
pub fn signed_g2(a: u64, b: u64, c: u64, d: u64) -> f64 {
    let (a, b, c, d) = (a as f64, b as f64, c as f64, d as f64);
    let e1 = c * (a + b) / (c + d);
    let e2 = d * (a + b) / (c + d);

    let t1 = a * log_ratio(a, e1).ln();
    let t2 = b * log_ratio(b, e2).ln();
    let raw = 2.0 * (t1 + t2);

    if a / c < b / d {
        -raw
    } else {
        raw
    }
}

/// observed / expected, forced to 1 for a zero observation.
fn log_ratio(observed: f64, expected: f64) -> f64 {
    if observed == 0.0 {
        1.0
    } else {
        observed / expected
    }
}
