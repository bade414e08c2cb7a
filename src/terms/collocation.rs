// Collocation detection over adjacent token pairs.
//
// Every ordered pair of neighbouring tokens inside a document is a candidate;
// pairs touching a padding placeholder are skipped, and pairs never span two
// documents. Surviving pairs (count >= min_count) are scored with Dunning's
// log-likelihood ratio (G²) over the 2x2 contingency table
//
//                 term2      ¬term2
//     term1         a          b
//     ¬term1        c          d
//
// where the margins come from left/right positions of all counted pairs, so
// the table always sums to N. The expected joint count is
// (a + b)(a + c) / N. The score is negated when a falls below its
// expectation, so repelled pairs rank at the bottom.

use std::cmp::Ordering;
use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::corpus::{is_padding, Corpus};
use crate::error::{KeytermError, Result};

/// A scored adjacent pair.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CollocationCandidate {
    pub term1: String,
    pub term2: String,
    /// Observed adjacent occurrences of term1 followed by term2
    pub count: u64,
    /// Counted pairs with term1 in the left slot (not its corpus frequency)
    pub term1_count: u64,
    /// Counted pairs with term2 in the right slot
    pub term2_count: u64,
    /// Joint count expected under independence
    pub expected: f64,
    /// Signed G² association score
    pub score: f64,
}

impl CollocationCandidate {
    pub fn pair(&self) -> (&str, &str) {
        (&self.term1, &self.term2)
    }

    /// The compound token this pair becomes, e.g. `health_care`.
    pub fn joined(&self, separator: char) -> String {
        format!("{}{}{}", self.term1, separator, self.term2)
    }
}

/// Finds statistically associated adjacent pairs.
pub struct CollocationDetector {
    /// Pairs seen fewer times than this are never scored
    pub min_count: usize,
}

impl Default for CollocationDetector {
    fn default() -> Self {
        Self { min_count: 25 }
    }
}

impl CollocationDetector {
    pub fn new(min_count: usize) -> Self {
        Self { min_count }
    }

    /// Ranked candidates, best first. Ties on score fall back to the pair's
    /// lexical order.
    pub fn detect(&self, corpus: &Corpus) -> Result<Vec<CollocationCandidate>> {
        if self.min_count == 0 {
            return Err(KeytermError::InvalidThreshold(self.min_count));
        }

        let table = PairTable::from_corpus(corpus);
        let min = self.min_count as u64;

        let mut candidates: Vec<CollocationCandidate> = table
            .pairs
            .iter()
            .filter(|(_, count)| **count >= min)
            .map(|((t1, t2), &count)| table.score(t1, t2, count))
            .collect();

        candidates.sort_by(compare_candidates);

        debug!(
            distinct_pairs = table.pairs.len(),
            total_pairs = table.total,
            candidates = candidates.len(),
            min_count = self.min_count,
            "Scored collocation candidates"
        );

        Ok(candidates)
    }
}

/// Shorthand for `CollocationDetector::new(min_count).detect(corpus)`.
pub fn detect(corpus: &Corpus, min_count: usize) -> Result<Vec<CollocationCandidate>> {
    CollocationDetector::new(min_count).detect(corpus)
}

/// Joint and marginal pair counts for one corpus.
#[derive(Default)]
struct PairTable {
    pairs: HashMap<(String, String), u64>,
    left: HashMap<String, u64>,
    right: HashMap<String, u64>,
    total: u64,
}

impl PairTable {
    fn from_corpus(corpus: &Corpus) -> Self {
        let mut table = Self::default();
        for doc in corpus.documents() {
            for window in doc.windows(2) {
                let (t1, t2) = (&window[0], &window[1]);
                if is_padding(t1) || is_padding(t2) {
                    continue;
                }
                *table.pairs.entry((t1.clone(), t2.clone())).or_insert(0) += 1;
                *table.left.entry(t1.clone()).or_insert(0) += 1;
                *table.right.entry(t2.clone()).or_insert(0) += 1;
                table.total += 1;
            }
        }
        table
    }

    fn score(&self, term1: &str, term2: &str, count: u64) -> CollocationCandidate {
        let term1_count = self.left.get(term1).copied().unwrap_or(0);
        let term2_count = self.right.get(term2).copied().unwrap_or(0);

        let n = self.total as f64;
        let a = count as f64;
        let b = term1_count as f64 - a;
        let c = term2_count as f64 - a;
        let d = (n - a - b - c).max(0.0);

        let exp_a = (a + b) * (a + c) / n;
        let exp_b = (a + b) * (b + d) / n;
        let exp_c = (c + d) * (a + c) / n;
        let exp_d = (c + d) * (b + d) / n;

        let g2 = 2.0
            * (ll_term(a, exp_a) + ll_term(b, exp_b) + ll_term(c, exp_c) + ll_term(d, exp_d));
        let score = if a < exp_a { -g2 } else { g2 };

        CollocationCandidate {
            term1: term1.to_string(),
            term2: term2.to_string(),
            count,
            term1_count,
            term2_count,
            expected: exp_a,
            score,
        }
    }
}

/// observed · ln(observed / expected), zero for an empty cell.
fn ll_term(observed: f64, expected: f64) -> f64 {
    if observed > 0.0 && expected > 0.0 {
        observed * (observed / expected).ln()
    } else {
        0.0
    }
}

/// Descending score, then ascending (term1, term2).
pub fn compare_candidates(a: &CollocationCandidate, b: &CollocationCandidate) -> Ordering {
    b.score
        .total_cmp(&a.score)
        .then_with(|| a.term1.cmp(&b.term1))
        .then_with(|| a.term2.cmp(&b.term2))
}
