// Corpus preparation: raw speeches -> tokens -> collocations -> compounds -> DTM.
//
// Every stage produces a new value; the tokenized corpus is kept alongside
// the compounded one so collocation output can be inspected later.

use tracing::info;

use crate::corpus::metadata::SpeechRecord;
use crate::corpus::tokenizer::Tokenizer;
use crate::corpus::Corpus;
use crate::error::Result;
use crate::terms::collocation::{CollocationCandidate, CollocationDetector};
use crate::terms::compound::Compounder;
use crate::terms::counter::DocumentTermMatrix;

/// Knobs for the multi-word unit step.
#[derive(Debug, Clone, Copy)]
pub struct PrepareSettings {
    /// Minimum adjacent count for a pair to be scored
    pub min_collocation_count: usize,
    /// How many top-ranked pairs to compound
    pub max_compounds: usize,
}

impl Default for PrepareSettings {
    fn default() -> Self {
        Self {
            min_collocation_count: 25,
            max_compounds: 250,
        }
    }
}

/// Everything downstream scoring needs, aligned by document index.
pub struct PreparedCorpus {
    pub records: Vec<SpeechRecord>,
    /// Tokenized corpus, padding included
    pub tokens: Corpus,
    /// All scored candidates, best first
    pub collocations: Vec<CollocationCandidate>,
    /// Number of leading candidates that were compounded
    pub accepted: usize,
    /// Corpus after compounding and padding cleanup
    pub compounded: Corpus,
    pub dtm: DocumentTermMatrix,
}

impl PreparedCorpus {
    /// Group label (president) per document.
    pub fn labels(&self) -> Vec<String> {
        self.records.iter().map(|r| r.president.clone()).collect()
    }

    pub fn accepted_collocations(&self) -> &[CollocationCandidate] {
        &self.collocations[..self.accepted]
    }
}

/// Run the full preparation pipeline.
///
/// Only positively associated pairs are compounded, even when fewer than
/// `max_compounds` of them exist.
pub fn prepare(
    records: Vec<SpeechRecord>,
    tokenizer: &Tokenizer,
    settings: &PrepareSettings,
) -> Result<PreparedCorpus> {
    let texts: Vec<&str> = records.iter().map(|r| r.text.as_str()).collect();
    let tokens = tokenizer.tokenize_all(&texts);
    info!(
        documents = tokens.len(),
        tokens = tokens.token_count(),
        "Tokenized corpus"
    );

    let collocations =
        CollocationDetector::new(settings.min_collocation_count).detect(&tokens)?;
    let accepted = collocations
        .iter()
        .take(settings.max_compounds)
        .take_while(|c| c.score > 0.0)
        .count();

    let compounded = Compounder::new(&collocations[..accepted]).compound(&tokens);
    let dtm = DocumentTermMatrix::from_corpus(&compounded);

    info!(
        candidates = collocations.len(),
        accepted,
        vocabulary = dtm.vocabulary_len(),
        "Built document-term matrix"
    );

    Ok(PreparedCorpus {
        records,
        tokens,
        collocations,
        accepted,
        compounded,
        dtm,
    })
}
