// Rewrites a corpus so accepted collocations become single tokens.
//
// Left-to-right scan per document: when the current token and the next one
// form an accepted pair they are replaced by one joined token and both are
// consumed. Overlapping pairs ("new york city" with new+york and york+city
// accepted) resolve to the leftmost match. Padding placeholders are removed
// afterwards so they never reach the vocabulary.

use std::collections::{HashMap, HashSet};

use tracing::debug;

use super::collocation::CollocationCandidate;
use crate::corpus::{Corpus, Document};

pub const DEFAULT_SEPARATOR: char = '_';

pub struct Compounder {
    /// Accepted pairs keyed by left term
    pairs: HashMap<String, HashSet<String>>,
    separator: char,
}

impl Compounder {
    /// Accept every candidate in `candidates`. Callers truncate the ranked
    /// list first (e.g. top 250).
    pub fn new(candidates: &[CollocationCandidate]) -> Self {
        Self::from_pairs(
            candidates
                .iter()
                .map(|c| (c.term1.clone(), c.term2.clone())),
        )
    }

    pub fn from_pairs<I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let mut by_left: HashMap<String, HashSet<String>> = HashMap::new();
        for (left, right) in pairs {
            by_left.entry(left).or_default().insert(right);
        }
        Self {
            pairs: by_left,
            separator: DEFAULT_SEPARATOR,
        }
    }

    pub fn with_separator(mut self, separator: char) -> Self {
        self.separator = separator;
        self
    }

    /// Number of accepted pairs.
    pub fn len(&self) -> usize {
        self.pairs.values().map(HashSet::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    pub fn accepts(&self, left: &str, right: &str) -> bool {
        self.pairs
            .get(left)
            .is_some_and(|rights| rights.contains(right))
    }

    /// A new corpus with accepted pairs merged and padding removed.
    pub fn compound(&self, corpus: &Corpus) -> Corpus {
        let mut merges = 0usize;
        let documents: Vec<Document> = corpus
            .documents()
            .iter()
            .map(|doc| {
                let (merged, n) = self.compound_document(doc);
                merges += n;
                merged
            })
            .collect();

        debug!(
            accepted_pairs = self.len(),
            merges,
            "Compounded multi-word units"
        );

        Corpus::new(documents).without_padding()
    }

    fn compound_document(&self, doc: &[String]) -> (Document, usize) {
        let mut out = Vec::with_capacity(doc.len());
        let mut merges = 0;
        let mut i = 0;
        while i < doc.len() {
            if let Some(next) = doc.get(i + 1) {
                if self.accepts(&doc[i], next) {
                    out.push(format!("{}{}{}", doc[i], self.separator, next));
                    merges += 1;
                    i += 2;
                    continue;
                }
            }
            out.push(doc[i].clone());
            i += 1;
        }
        (out, merges)
    }
}

/// Shorthand for `Compounder::new(candidates).compound(corpus)`.
pub fn compound(corpus: &Corpus, candidates: &[CollocationCandidate]) -> Corpus {
    Compounder::new(candidates).compound(corpus)
}
