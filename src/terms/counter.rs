// Term counting and the sparse document-term matrix.
//
// Padding placeholders are never counted. Counts are plain u64; the matrix
// stores one sparse row per document plus per-term document frequency.

use std::collections::{BTreeMap, HashMap, HashSet};

use crate::corpus::{is_padding, Corpus};
use crate::error::{KeytermError, Result};

/// Term → raw count for one document or a document subset.
pub type TermCounts = HashMap<String, u64>;

/// Counts tokens, optionally restricted to a fixed vocabulary.
#[derive(Debug, Clone, Default)]
pub struct TermCounter {
    vocabulary: Option<HashSet<String>>,
}

impl TermCounter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Only count terms in `vocabulary`; everything else is ignored.
    pub fn with_vocabulary<I, S>(vocabulary: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            vocabulary: Some(vocabulary.into_iter().map(Into::into).collect()),
        }
    }

    fn accepts(&self, token: &str) -> bool {
        if is_padding(token) {
            return false;
        }
        match &self.vocabulary {
            Some(vocab) => vocab.contains(token),
            None => true,
        }
    }

    pub fn count_document(&self, doc: &[String]) -> TermCounts {
        let mut counts = TermCounts::new();
        self.add_document(&mut counts, doc);
        counts
    }

    /// Aggregate counts over the given document indices. Out-of-range
    /// indices are ignored.
    pub fn count_subset(&self, corpus: &Corpus, indices: &[usize]) -> TermCounts {
        let mut counts = TermCounts::new();
        for &i in indices {
            if let Some(doc) = corpus.documents().get(i) {
                self.add_document(&mut counts, doc);
            }
        }
        counts
    }

    /// Aggregate counts over the whole corpus.
    pub fn count_corpus(&self, corpus: &Corpus) -> TermCounts {
        let mut counts = TermCounts::new();
        for doc in corpus.documents() {
            self.add_document(&mut counts, doc);
        }
        counts
    }

    fn add_document(&self, counts: &mut TermCounts, doc: &[String]) {
        for token in doc {
            if self.accepts(token) {
                *counts.entry(token.clone()).or_insert(0) += 1;
            }
        }
    }
}

/// Sparse document × term count matrix.
#[derive(Debug, Clone, Default)]
pub struct DocumentTermMatrix {
    rows: Vec<TermCounts>,
    /// Number of documents each term occurs in (sorted by term)
    doc_freq: BTreeMap<String, usize>,
}

impl DocumentTermMatrix {
    pub fn from_corpus(corpus: &Corpus) -> Self {
        Self::build(corpus, &TermCounter::new())
    }

    pub fn build(corpus: &Corpus, counter: &TermCounter) -> Self {
        let rows: Vec<TermCounts> = corpus
            .documents()
            .iter()
            .map(|doc| counter.count_document(doc))
            .collect();
        Self::from_rows(rows)
    }

    /// Build from precomputed rows. Zero entries are dropped.
    pub fn from_rows(rows: Vec<TermCounts>) -> Self {
        let rows: Vec<TermCounts> = rows
            .into_iter()
            .map(|row| row.into_iter().filter(|(_, n)| *n > 0).collect())
            .collect();
        let mut doc_freq = BTreeMap::new();
        for row in &rows {
            for term in row.keys() {
                *doc_freq.entry(term.clone()).or_insert(0) += 1;
            }
        }
        Self { rows, doc_freq }
    }

    pub fn n_docs(&self) -> usize {
        self.rows.len()
    }

    /// Terms present in at least one document, sorted.
    pub fn vocabulary(&self) -> impl Iterator<Item = &str> {
        self.doc_freq.keys().map(String::as_str)
    }

    pub fn vocabulary_len(&self) -> usize {
        self.doc_freq.len()
    }

    pub fn contains_term(&self, term: &str) -> bool {
        self.doc_freq.contains_key(term)
    }

    pub fn doc_freq(&self, term: &str) -> Option<usize> {
        self.doc_freq.get(term).copied()
    }

    pub fn row(&self, doc: usize) -> Result<&TermCounts> {
        self.rows.get(doc).ok_or(KeytermError::DocumentOutOfRange {
            index: doc,
            len: self.rows.len(),
        })
    }

    pub fn rows(&self) -> &[TermCounts] {
        &self.rows
    }

    /// Count of `term` in `doc`; zero when either is unknown.
    pub fn count(&self, doc: usize, term: &str) -> u64 {
        self.rows
            .get(doc)
            .and_then(|row| row.get(term))
            .copied()
            .unwrap_or(0)
    }

    /// Summed counts over a subset of documents.
    pub fn subset_counts(&self, indices: &[usize]) -> TermCounts {
        let mut counts = TermCounts::new();
        for &i in indices {
            if let Some(row) = self.rows.get(i) {
                merge_into(&mut counts, row);
            }
        }
        counts
    }

    /// Summed counts over every document not in `indices`.
    pub fn complement_counts(&self, indices: &[usize]) -> TermCounts {
        let excluded: HashSet<usize> = indices.iter().copied().collect();
        let mut counts = TermCounts::new();
        for (i, row) in self.rows.iter().enumerate() {
            if !excluded.contains(&i) {
                merge_into(&mut counts, row);
            }
        }
        counts
    }
}

fn merge_into(acc: &mut TermCounts, row: &TermCounts) {
    for (term, n) in row {
        *acc.entry(term.clone()).or_insert(0) += n;
    }
}
