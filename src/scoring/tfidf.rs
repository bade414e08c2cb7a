// TF-IDF weighting over a document-term matrix.
//
//   idf(t)    = log_base(N / df(t))
//   w(d, t)   = count(d, t) * idf(t)
//
// TF is the raw count, with no length normalisation, and weights are not
// renormalised. Rankings within one document are meaningful; magnitudes
// across documents are not directly comparable. A term found in every
// document gets idf = 0.

use std::collections::HashMap;

use crate::error::{KeytermError, Result};
use crate::terms::counter::DocumentTermMatrix;

/// TF-IDF scorer. Base 2 by default.
#[derive(Debug, Clone, Copy)]
pub struct TfIdf {
    base: f64,
}

impl Default for TfIdf {
    fn default() -> Self {
        Self { base: 2.0 }
    }
}

impl TfIdf {
    /// Scorer with a custom logarithm base. The base must be a positive
    /// finite number other than 1.
    pub fn with_base(base: f64) -> Result<Self> {
        if !base.is_finite() || base <= 0.0 || base == 1.0 {
            return Err(KeytermError::InvalidLogBase(base));
        }
        Ok(Self { base })
    }

    pub fn base(&self) -> f64 {
        self.base
    }

    /// Inverse document frequency, or None for a term outside the matrix
    /// vocabulary.
    pub fn idf(&self, dtm: &DocumentTermMatrix, term: &str) -> Option<f64> {
        let df = dtm.doc_freq(term)?;
        Some(self.idf_from(dtm.n_docs(), df))
    }

    fn idf_from(&self, n_docs: usize, df: usize) -> f64 {
        (n_docs as f64 / df as f64).log(self.base)
    }

    /// Weight of one (document, term) cell. None if the term is not in the
    /// vocabulary or the document index is out of range.
    pub fn weight(&self, dtm: &DocumentTermMatrix, doc: usize, term: &str) -> Option<f64> {
        if doc >= dtm.n_docs() {
            return None;
        }
        let idf = self.idf(dtm, term)?;
        Some(dtm.count(doc, term) as f64 * idf)
    }

    /// Sparse weights for every document: one map per row holding the
    /// terms that occur in that document.
    pub fn score(&self, dtm: &DocumentTermMatrix) -> Vec<HashMap<String, f64>> {
        let idf = self.idf_table(dtm);
        dtm.rows()
            .iter()
            .map(|row| weigh_row(row, &idf))
            .collect()
    }

    /// Term → weight for one document.
    pub fn score_document(
        &self,
        dtm: &DocumentTermMatrix,
        doc: usize,
    ) -> Result<HashMap<String, f64>> {
        let row = dtm.row(doc)?;
        let idf: HashMap<&str, f64> = row
            .keys()
            .filter_map(|term| Some((term.as_str(), self.idf(dtm, term)?)))
            .collect();
        Ok(weigh_row(row, &idf))
    }

    fn idf_table<'a>(&self, dtm: &'a DocumentTermMatrix) -> HashMap<&'a str, f64> {
        let n = dtm.n_docs();
        dtm.vocabulary()
            .filter_map(|term| Some((term, self.idf_from(n, dtm.doc_freq(term)?))))
            .collect()
    }
}

fn weigh_row(row: &HashMap<String, u64>, idf: &HashMap<&str, f64>) -> HashMap<String, f64> {
    row.iter()
        .map(|(term, &count)| {
            let w = idf.get(term.as_str()).copied().unwrap_or(0.0);
            (term.clone(), count as f64 * w)
        })
        .collect()
}
