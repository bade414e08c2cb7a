// Term scoring — TF-IDF salience within documents and log-likelihood
// keyness between corpora.

pub mod llr;
pub mod tfidf;

use std::collections::HashMap;

/// Sort a term → weight map by descending weight, ties by term.
pub fn rank_weights(weights: &HashMap<String, f64>) -> Vec<(String, f64)> {
    let mut ranked: Vec<(String, f64)> = weights
        .iter()
        .map(|(term, w)| (term.clone(), *w))
        .collect();
    ranked.sort_by(|a, b| b.1.total_cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    ranked
}

/// The `n` highest-weighted terms.
pub fn top_terms(weights: &HashMap<String, f64>, n: usize) -> Vec<(String, f64)> {
    let mut ranked = rank_weights(weights);
    ranked.truncate(n);
    ranked
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rank_weights_ties_break_by_term() {
        let weights: HashMap<String, f64> = [
            ("b".to_string(), 1.0),
            ("a".to_string(), 1.0),
            ("c".to_string(), 2.0),
        ]
        .into();
        let ranked = rank_weights(&weights);
        let order: Vec<&str> = ranked.iter().map(|(t, _)| t.as_str()).collect();
        assert_eq!(order, vec!["c", "a", "b"]);
        assert_eq!(top_terms(&weights, 1).len(), 1);
    }
}
