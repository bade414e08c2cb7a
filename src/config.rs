use std::env;
use std::path::PathBuf;

use anyhow::{Context, Result};

use crate::pipeline::prepare::PrepareSettings;

/// Central configuration loaded from environment variables.
///
/// The .env file is loaded automatically at startup via dotenvy. Only the
/// corpus path has to point at something real; everything else has a
/// default.
pub struct Config {
    /// CSV with a `president,date,text` header
    pub corpus_path: PathBuf,
    /// Stopword list, one word per line. Unset uses the built-in English list.
    pub stopwords_path: Option<PathBuf>,
    /// Lemma table (`inflected<TAB>lemma`). Unset disables lemmatisation.
    pub lemma_path: Option<PathBuf>,
    /// Where `export` writes one JSON file per president
    pub output_dir: PathBuf,
    /// Minimum adjacent count for collocation candidates (default 25)
    pub min_collocation_count: usize,
    /// How many top collocations get compounded (default 250)
    pub max_compounds: usize,
    /// Terms shown or exported per key (default 30)
    pub top_terms: usize,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn load() -> Result<Self> {
        Ok(Self {
            corpus_path: env::var("KEYTERM_CORPUS_PATH")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("./data/speeches.csv")),
            stopwords_path: env::var("KEYTERM_STOPWORDS_PATH").ok().map(PathBuf::from),
            lemma_path: env::var("KEYTERM_LEMMA_PATH").ok().map(PathBuf::from),
            output_dir: env::var("KEYTERM_OUTPUT_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("./wordclouds")),
            min_collocation_count: parse_count("KEYTERM_MIN_COLLOCATION_COUNT", 25)?,
            max_compounds: parse_count("KEYTERM_MAX_COMPOUNDS", 250)?,
            top_terms: parse_count("KEYTERM_TOP_TERMS", 30)?,
        })
    }

    /// Check that the corpus file exists.
    /// Call this before any command that loads speeches.
    pub fn require_corpus(&self) -> Result<()> {
        if !self.corpus_path.is_file() {
            anyhow::bail!(
                "Corpus file not found at {}\n\
                 Set KEYTERM_CORPUS_PATH in your .env file to a CSV with \
                 president,date,text columns.",
                self.corpus_path.display()
            );
        }
        Ok(())
    }

    /// Collocation settings, with optional CLI overrides.
    pub fn prepare_settings(
        &self,
        min_count: Option<usize>,
        max_compounds: Option<usize>,
    ) -> Result<PrepareSettings> {
        let min_collocation_count = min_count.unwrap_or(self.min_collocation_count);
        if min_collocation_count == 0 {
            anyhow::bail!("Minimum collocation count must be at least 1");
        }
        Ok(PrepareSettings {
            min_collocation_count,
            max_compounds: max_compounds.unwrap_or(self.max_compounds),
        })
    }
}

/// Parse a non-negative integer env var, falling back to `default` when unset.
fn parse_count(name: &str, default: usize) -> Result<usize> {
    match env::var(name) {
        Ok(raw) => raw
            .trim()
            .parse::<usize>()
            .with_context(|| format!("{name} must be a non-negative integer, got {raw:?}")),
        Err(_) => Ok(default),
    }
}
