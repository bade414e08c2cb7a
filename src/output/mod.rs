// Output — terminal display and per-key term-weight export.
//
// Export writes one JSON file per key (e.g. per president) into an output
// directory. The files carry only term weights; drawing the word cloud is
// left to whatever renderer consumes them.

pub mod terminal;

use std::collections::btree_map::Entry;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::{KeytermError, Result};

/// Truncate a string to at most `max_chars` characters, appending "..." if truncated.
///
/// Respects UTF-8 character boundaries, so long compound terms with accented
/// letters never panic when shortened for a table column.
pub fn truncate_chars(text: &str, max_chars: usize) -> String {
    let char_count = text.chars().count();
    if char_count <= max_chars {
        text.to_string()
    } else {
        let truncated: String = text.chars().take(max_chars).collect();
        format!("{truncated}...")
    }
}

/// One exported term.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeightedTerm {
    pub term: String,
    pub weight: f64,
}

/// The contents of one export file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TermWeights {
    pub key: String,
    pub terms: Vec<WeightedTerm>,
}

impl TermWeights {
    pub fn new(key: &str, ranked: &[(String, f64)]) -> Self {
        Self {
            key: key.to_string(),
            terms: ranked
                .iter()
                .map(|(term, weight)| WeightedTerm {
                    term: term.clone(),
                    weight: *weight,
                })
                .collect(),
        }
    }
}

/// File name for a key: anything other than letters, digits, `-` and `_`
/// becomes `_`. "George W. Bush" -> "George_W__Bush.json".
pub fn file_name_for(key: &str) -> String {
    let stem: String = key
        .chars()
        .map(|c| {
            if c.is_alphanumeric() || c == '-' || c == '_' {
                c
            } else {
                '_'
            }
        })
        .collect();
    format!("{stem}.json")
}

/// Write one key's ranked weights to `dir`, creating the directory if
/// needed. Returns the written path.
pub fn export_weights(dir: &Path, key: &str, ranked: &[(String, f64)]) -> Result<PathBuf> {
    fs::create_dir_all(dir)?;
    let path = dir.join(file_name_for(key));
    let json = serde_json::to_string_pretty(&TermWeights::new(key, ranked))?;
    fs::write(&path, json)?;
    debug!(key, path = %path.display(), terms = ranked.len(), "Exported term weights");
    Ok(path)
}

/// Outcome of exporting a batch of keys.
#[derive(Debug, Default)]
pub struct ExportReport {
    pub written: BTreeMap<String, PathBuf>,
    pub failures: BTreeMap<String, KeytermError>,
}

/// Export every key in order. A key whose file name was already claimed by
/// an earlier key in the batch is reported as a `FileNameCollision` and not
/// written, so no export silently replaces another.
pub fn export_all<'a, I>(dir: &Path, batch: I) -> ExportReport
where
    I: IntoIterator<Item = (&'a str, Vec<(String, f64)>)>,
{
    let mut claimed: BTreeMap<String, String> = BTreeMap::new();
    let mut report = ExportReport::default();

    for (key, ranked) in batch {
        let file = file_name_for(key);
        match claimed.entry(file.clone()) {
            Entry::Occupied(owner) => {
                let err = KeytermError::FileNameCollision {
                    key: key.to_string(),
                    existing: owner.get().clone(),
                    file,
                };
                warn!(key, error = %err, "Export skipped");
                report.failures.insert(key.to_string(), err);
                continue;
            }
            Entry::Vacant(slot) => {
                slot.insert(key.to_string());
            }
        }

        match export_weights(dir, key, &ranked) {
            Ok(path) => {
                report.written.insert(key.to_string(), path);
            }
            Err(e) => {
                warn!(key, error = %e, "Export failed");
                report.failures.insert(key.to_string(), e);
            }
        }
    }
    report
}

/// Read back an exported file.
pub fn load_weights(path: &Path) -> Result<TermWeights> {
    let json = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&json)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_name_for() {
        assert_eq!(file_name_for("George W. Bush"), "George_W__Bush.json");
        assert_eq!(file_name_for("Lincoln"), "Lincoln.json");
    }

    #[test]
    fn test_colliding_keys_are_not_overwritten() {
        let dir = tempfile::tempdir().unwrap();
        let report = export_all(
            dir.path(),
            [
                ("George W  Bush", vec![("terror".to_string(), 12.0)]),
                ("George W. Bush", vec![("freedom".to_string(), 9.0)]),
                ("Lincoln", vec![("union".to_string(), 7.5)]),
            ],
        );

        assert_eq!(report.written.len(), 2);
        match report.failures.get("George W. Bush") {
            Some(KeytermError::FileNameCollision { existing, file, .. }) => {
                assert_eq!(existing, "George W  Bush");
                assert_eq!(file, "George_W__Bush.json");
            }
            other => panic!("expected a collision, got {other:?}"),
        }

        let kept = load_weights(&dir.path().join("George_W__Bush.json")).unwrap();
        assert_eq!(kept.key, "George W  Bush");
        assert_eq!(kept.terms[0].term, "terror");
    }

    #[test]
    fn test_truncate_chars_multibyte() {
        assert_eq!(truncate_chars("café_société", 4), "café...");
        assert_eq!(truncate_chars("tax", 10), "tax");
    }
}
