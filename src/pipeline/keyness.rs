// Per-group keyness: each group's documents against everyone else's.
//
// Groups are independent units of work, so they are scored in parallel with
// rayon. A failing group (no documents, or an empty side) is recorded and
// skipped; it never aborts the rest of the batch.

use std::collections::BTreeMap;

use indicatif::ProgressBar;
use rayon::prelude::*;
use tracing::{info, warn};

use crate::corpus::metadata;
use crate::error::{KeytermError, Result};
use crate::scoring::llr::{self, LlrScores};
use crate::terms::counter::DocumentTermMatrix;

/// Outcome of a batch run, keyed by group.
#[derive(Debug, Default)]
pub struct GroupReport {
    pub scores: BTreeMap<String, LlrScores>,
    pub failures: BTreeMap<String, KeytermError>,
}

/// Score one group's documents against the rest of the matrix.
///
/// `labels[i]` is the group of document `i`.
pub fn score_group(dtm: &DocumentTermMatrix, labels: &[String], group: &str) -> Result<LlrScores> {
    let indices = metadata::indices_for(labels, group);
    if indices.is_empty() {
        return Err(KeytermError::UnknownGroup(group.to_string()));
    }

    let target = dtm.subset_counts(&indices);
    let comparison = dtm.complement_counts(&indices);
    llr::score(&target, &comparison)
}

/// Score every group. Completion order is irrelevant; results come back
/// sorted by group name.
pub fn score_groups(
    dtm: &DocumentTermMatrix,
    labels: &[String],
    groups: &[String],
    progress: Option<&ProgressBar>,
) -> GroupReport {
    let outcomes: Vec<(String, Result<LlrScores>)> = groups
        .par_iter()
        .map(|group| {
            let outcome = score_group(dtm, labels, group);
            if let Some(pb) = progress {
                pb.inc(1);
            }
            (group.clone(), outcome)
        })
        .collect();

    let mut report = GroupReport::default();
    for (group, outcome) in outcomes {
        match outcome {
            Ok(scores) => {
                report.scores.insert(group, scores);
            }
            Err(e) => {
                warn!(group = %group, error = %e, "Skipping group");
                report.failures.insert(group, e);
            }
        }
    }

    info!(
        scored = report.scores.len(),
        failed = report.failures.len(),
        "Keyness batch complete"
    );
    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::corpus::Corpus;

    fn labels(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_group_against_rest() {
        let dtm = DocumentTermMatrix::from_corpus(&Corpus::from_tokens(&[
            &["tax", "tax", "tax", "war"],
            &["war", "war", "peace"],
            &["war", "peace", "peace"],
        ]));
        let labels = labels(&["Reagan", "Lincoln", "Lincoln"]);
        let scores = score_group(&dtm, &labels, "Reagan").unwrap();
        assert!(scores.get("tax").unwrap() > 0.0);
        assert!(scores.get("war").unwrap() < 0.0);
        // Terms only in the comparison are not scored
        assert_eq!(scores.get("peace"), None);
    }

    #[test]
    fn test_failures_are_isolated() {
        let dtm = DocumentTermMatrix::from_corpus(&Corpus::from_tokens(&[
            &["tax"],
            &["war"],
        ]));
        let labels = labels(&["Reagan", "Lincoln"]);
        let groups = labels.iter().cloned().chain(["Nobody".to_string()]).collect::<Vec<_>>();
        let report = score_groups(&dtm, &labels, &groups, None);
        assert_eq!(report.scores.len(), 2);
        assert!(matches!(
            report.failures.get("Nobody"),
            Some(KeytermError::UnknownGroup(_))
        ));
    }

    #[test]
    fn test_single_group_corpus_has_empty_comparison() {
        let dtm = DocumentTermMatrix::from_corpus(&Corpus::from_tokens(&[&["tax"], &["war"]]));
        let labels = labels(&["Reagan", "Reagan"]);
        assert!(matches!(
            score_group(&dtm, &labels, "Reagan"),
            Err(KeytermError::EmptyVocabulary { .. })
        ));
    }
}
