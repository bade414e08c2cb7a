// Static text resources for tokenization: stopword list and lemma table.
//
// Both are loaded once and handed to the tokenizer inside its config, so
// nothing here is process-global.

use std::collections::{HashMap, HashSet};
use std::fs;
use std::path::Path;

use stop_words::{get, LANGUAGE};
use tracing::debug;

use crate::error::{KeytermError, Result};

/// Stopwords and inflected-form → lemma substitutions.
#[derive(Debug, Clone, Default)]
pub struct TokenizerResources {
    pub stopwords: HashSet<String>,
    pub lemmas: HashMap<String, String>,
}

impl TokenizerResources {
    /// Built-in English stopwords, no lemmatisation.
    pub fn english() -> Self {
        Self {
            stopwords: default_stopwords().into_iter().collect(),
            lemmas: HashMap::new(),
        }
    }

    /// Load from optional files, falling back to the built-in English list
    /// when no stopword file is given.
    pub fn load(stopwords_path: Option<&Path>, lemma_path: Option<&Path>) -> Result<Self> {
        let stopwords = match stopwords_path {
            Some(path) => load_stopwords(path)?,
            None => default_stopwords(),
        };
        let lemmas = match lemma_path {
            Some(path) => load_lemmas(path)?,
            None => HashMap::new(),
        };
        debug!(
            stopwords = stopwords.len(),
            lemmas = lemmas.len(),
            "Loaded tokenizer resources"
        );
        Ok(Self {
            stopwords: stopwords.into_iter().collect(),
            lemmas,
        })
    }
}

/// The `stop-words` crate's English list, lowercased.
pub fn default_stopwords() -> Vec<String> {
    get(LANGUAGE::English)
        .into_iter()
        .map(|w| w.to_lowercase())
        .collect()
}

/// Read a stopword list: one word per line, blank lines and `#` comments
/// skipped. Order of the file is preserved.
pub fn load_stopwords(path: &Path) -> Result<Vec<String>> {
    let text = fs::read_to_string(path)?;
    Ok(parse_stopwords(&text))
}

pub fn parse_stopwords(text: &str) -> Vec<String> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(|line| line.to_lowercase())
        .collect()
}

/// Read a lemma table of `inflected<TAB>lemma` lines.
pub fn load_lemmas(path: &Path) -> Result<HashMap<String, String>> {
    let text = fs::read_to_string(path)?;
    parse_lemmas(&text, &path.display().to_string())
}

pub fn parse_lemmas(text: &str, source: &str) -> Result<HashMap<String, String>> {
    let mut lemmas = HashMap::new();
    for (i, line) in text.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let mut fields = line.split('\t');
        match (fields.next(), fields.next(), fields.next()) {
            (Some(inflected), Some(lemma), None)
                if !inflected.trim().is_empty() && !lemma.trim().is_empty() =>
            {
                lemmas.insert(inflected.trim().to_lowercase(), lemma.trim().to_lowercase());
            }
            _ => {
                return Err(KeytermError::Resource {
                    path: source.to_string(),
                    line: i + 1,
                    message: "expected two tab-separated fields: inflected, lemma".to_string(),
                })
            }
        }
    }
    Ok(lemmas)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_stopwords_skips_comments_and_blanks() {
        let words = parse_stopwords("# list\nThe\n\n  and \n");
        assert_eq!(words, vec!["the", "and"]);
    }

    #[test]
    fn test_parse_lemmas() {
        let lemmas = parse_lemmas("taxes\ttax\nWent\tgo\n", "inline").unwrap();
        assert_eq!(lemmas["taxes"], "tax");
        assert_eq!(lemmas["went"], "go");
    }

    #[test]
    fn test_parse_lemmas_rejects_bad_line() {
        let err = parse_lemmas("taxes\ttax\nbroken\n", "inline").unwrap_err();
        match err {
            KeytermError::Resource { line, .. } => assert_eq!(line, 2),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_english_defaults_include_common_words() {
        let res = TokenizerResources::english();
        assert!(res.stopwords.contains("the"));
        assert!(res.lemmas.is_empty());
    }
}
