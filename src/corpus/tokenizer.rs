// Word tokenizer for speech text.
//
// Segments NFC-normalised text on Unicode word boundaries into words,
// numbers, punctuation and symbols, then applies
// the configured normalisation in a fixed order:
//
//   remove punct/numbers/symbols -> case fold -> lemma substitution -> stopwords
//
// Stopword removal leaves a PADDING placeholder behind (when padding is on)
// so that "state of the union" never yields a false "state union" bigram.

use regex_lite::Regex;
use unicode_normalization::UnicodeNormalization;
use unicode_segmentation::UnicodeSegmentation;

use super::resources::TokenizerResources;
use super::{Corpus, Document, PADDING};
use crate::error::Result;

/// Characters treated as symbols rather than punctuation.
const SYMBOL_CHARS: &str = "$%&+<=>^`|~©®°€£¥§";

/// Tokenizer settings. Resources are owned here and passed explicitly.
#[derive(Debug, Clone)]
pub struct TokenizerConfig {
    pub resources: TokenizerResources,
    pub remove_punct: bool,
    pub remove_numbers: bool,
    pub remove_symbols: bool,
    pub lowercase: bool,
    /// Leave a placeholder where a stopword was removed
    pub padding: bool,
}

impl Default for TokenizerConfig {
    fn default() -> Self {
        Self {
            resources: TokenizerResources::english(),
            remove_punct: true,
            remove_numbers: true,
            remove_symbols: true,
            lowercase: true,
            padding: true,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TokenKind {
    Word,
    Number,
    Punct,
    Symbol,
}

pub struct Tokenizer {
    config: TokenizerConfig,
    number: Regex,
}

impl Tokenizer {
    pub fn new(config: TokenizerConfig) -> Result<Self> {
        // Plain numbers, grouped numbers and ordinals/decades: 1,000 3.5 21st 1990s
        let number = Regex::new(r"^[+-]?\d+([.,]\d+)*(st|nd|rd|th|s)?$")?;
        Ok(Self { config, number })
    }

    /// Tokenize a single text into a document.
    pub fn tokenize(&self, text: &str) -> Document {
        let mut doc = Vec::new();
        for raw in split_raw(text) {
            let kind = self.classify(&raw);
            let dropped = match kind {
                TokenKind::Punct => self.config.remove_punct,
                TokenKind::Symbol => self.config.remove_symbols,
                TokenKind::Number => self.config.remove_numbers,
                TokenKind::Word => false,
            };
            if dropped {
                continue;
            }

            let mut token = if self.config.lowercase {
                raw.to_lowercase().replace('’', "'")
            } else {
                raw
            };
            if let Some(lemma) = self.config.resources.lemmas.get(&token) {
                token = lemma.clone();
            }

            if self.config.resources.stopwords.contains(&token) {
                if self.config.padding {
                    doc.push(PADDING.to_string());
                }
                continue;
            }
            doc.push(token);
        }
        doc
    }

    /// Tokenize every text, preserving order.
    pub fn tokenize_all<S: AsRef<str>>(&self, texts: &[S]) -> Corpus {
        Corpus::new(texts.iter().map(|t| self.tokenize(t.as_ref())).collect())
    }

    fn classify(&self, raw: &str) -> TokenKind {
        if !raw.chars().any(char::is_alphanumeric) {
            if raw.chars().any(|c| SYMBOL_CHARS.contains(c)) {
                TokenKind::Symbol
            } else {
                TokenKind::Punct
            }
        } else if self.number.is_match(raw) {
            TokenKind::Number
        } else {
            TokenKind::Word
        }
    }
}

/// Split NFC-normalised text on Unicode word boundaries (UAX #29),
/// dropping whitespace segments.
///
/// Combining marks stay attached to their base letter, and apostrophes or
/// periods between letters stay inside the word: "don't", "u.s". Hyphens are
/// boundaries, so "well-being" yields "well", "-", "being".
fn split_raw(text: &str) -> Vec<String> {
    let normalized: String = text.nfc().collect();
    normalized
        .split_word_bounds()
        .filter(|segment| !segment.chars().all(char::is_whitespace))
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::{HashMap, HashSet};

    fn tokenizer(stopwords: &[&str], lemmas: &[(&str, &str)]) -> Tokenizer {
        let resources = TokenizerResources {
            stopwords: stopwords.iter().map(|s| s.to_string()).collect::<HashSet<_>>(),
            lemmas: lemmas
                .iter()
                .map(|(a, b)| (a.to_string(), b.to_string()))
                .collect::<HashMap<_, _>>(),
        };
        Tokenizer::new(TokenizerConfig {
            resources,
            ..TokenizerConfig::default()
        })
        .unwrap()
    }

    #[test]
    fn test_split_raw_keeps_connectors_inside_words() {
        let raw = split_raw("Don't stop—well-being, U.S. now!");
        assert_eq!(
            raw,
            vec!["Don't", "stop", "—", "well", "-", "being", ",", "U.S", ".", "now", "!"]
        );
    }

    #[test]
    fn test_stopwords_leave_padding() {
        let tok = tokenizer(&["of", "the"], &[]);
        let doc = tok.tokenize("State of the Union");
        assert_eq!(doc, vec!["state", "", "", "union"]);
    }

    #[test]
    fn test_padding_off_drops_stopwords() {
        let mut config = TokenizerConfig::default();
        config.resources = TokenizerResources::default();
        config.resources.stopwords.insert("of".to_string());
        config.padding = false;
        let tok = Tokenizer::new(config).unwrap();
        assert_eq!(tok.tokenize("state of union"), vec!["state", "union"]);
    }

    #[test]
    fn test_removes_punct_numbers_symbols_without_padding() {
        let tok = tokenizer(&[], &[]);
        let doc = tok.tokenize("In 1990s, taxes rose 5% to $1,000.");
        assert_eq!(doc, vec!["in", "taxes", "rose", "to"]);
    }

    #[test]
    fn test_lemma_applied_before_stopword_check() {
        let tok = tokenizer(&["be"], &[("taxes", "tax"), ("is", "be")]);
        let doc = tok.tokenize("Taxes is high");
        assert_eq!(doc, vec!["tax", "", "high"]);
    }

    #[test]
    fn test_decomposed_accents_stay_in_one_word() {
        let tok = tokenizer(&[], &[]);
        let doc = tok.tokenize("a nai\u{308}ve policy");
        assert_eq!(doc, vec!["a", "na\u{ef}ve", "policy"]);
    }

    #[test]
    fn test_symbol_and_number_segments() {
        let raw = split_raw("cost $1,000 in 1990s");
        assert_eq!(raw, vec!["cost", "$", "1,000", "in", "1990s"]);
    }

    #[test]
    fn test_curly_apostrophe_normalised() {
        let tok = tokenizer(&[], &[]);
        assert_eq!(tok.tokenize("nation’s"), vec!["nation's"]);
    }
}
