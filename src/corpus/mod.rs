// Corpus model — documents as token sequences, plus the collaborators that
// build them from raw speeches (tokenizer, resource files, CSV metadata).

pub mod metadata;
pub mod resources;
pub mod tokenizer;

use serde::{Deserialize, Serialize};

/// Placeholder left where a stopword was removed.
///
/// Keeps positions intact so removed words don't create false adjacency
/// for collocation detection. Never a real vocabulary entry.
pub const PADDING: &str = "";

/// Returns true for the stopword placeholder token.
pub fn is_padding(token: &str) -> bool {
    token == PADDING
}

/// An ordered sequence of normalized tokens.
pub type Document = Vec<String>;

/// An ordered collection of documents.
///
/// Document order matches the order of the metadata records the corpus was
/// built from; it carries no weight in any statistic. Each pipeline stage
/// produces a new `Corpus` rather than mutating one in place.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Corpus {
    documents: Vec<Document>,
}

impl Corpus {
    pub fn new(documents: Vec<Document>) -> Self {
        Self { documents }
    }

    /// Convenience constructor for tests and small fixtures.
    pub fn from_tokens(documents: &[&[&str]]) -> Self {
        Self {
            documents: documents
                .iter()
                .map(|doc| doc.iter().map(|t| t.to_string()).collect())
                .collect(),
        }
    }

    pub fn documents(&self) -> &[Document] {
        &self.documents
    }

    pub fn len(&self) -> usize {
        self.documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }

    /// Total number of tokens, placeholders included.
    pub fn token_count(&self) -> usize {
        self.documents.iter().map(Vec::len).sum()
    }

    /// A new corpus with every padding placeholder dropped.
    pub fn without_padding(&self) -> Corpus {
        Corpus {
            documents: self
                .documents
                .iter()
                .map(|doc| doc.iter().filter(|t| !is_padding(t)).cloned().collect())
                .collect(),
        }
    }
}
