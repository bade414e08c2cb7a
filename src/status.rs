// Corpus summary display — documents, presidents, vocabulary, compounds.

use std::collections::BTreeMap;

use colored::Colorize;

use crate::config::Config;
use crate::pipeline::prepare::PreparedCorpus;

/// Display a summary of the prepared corpus to the terminal.
pub fn show(config: &Config, prepared: &PreparedCorpus) {
    println!("Corpus: {}", config.corpus_path.display());
    println!(
        "Documents: {} ({} tokens before compounding)",
        prepared.records.len(),
        prepared.tokens.token_count()
    );

    if let (Some(first), Some(last)) = (
        prepared.records.iter().map(|r| r.date).min(),
        prepared.records.iter().map(|r| r.date).max(),
    ) {
        println!("Date range: {first} to {last}");
    }

    let mut per_president: BTreeMap<&str, usize> = BTreeMap::new();
    for record in &prepared.records {
        *per_president.entry(record.president.as_str()).or_insert(0) += 1;
    }
    println!("Presidents: {}", per_president.len());
    for (president, docs) in &per_president {
        println!("  {:<28} {:>4} documents", president, docs);
    }

    println!("Vocabulary: {} terms", prepared.dtm.vocabulary_len());
    println!(
        "Collocations: {} candidates, {} compounded",
        prepared.collocations.len(),
        prepared.accepted
    );

    if prepared.accepted == 0 {
        println!(
            "{}",
            "  No compounds accepted. Try lowering KEYTERM_MIN_COLLOCATION_COUNT.".dimmed()
        );
    }
}
