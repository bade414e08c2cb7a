use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::info;

use keyterm::config::Config;
use keyterm::corpus::metadata;
use keyterm::corpus::resources::TokenizerResources;
use keyterm::corpus::tokenizer::{Tokenizer, TokenizerConfig};
use keyterm::output::{self, terminal};
use keyterm::pipeline::keyness;
use keyterm::pipeline::prepare::{self, PreparedCorpus};
use keyterm::scoring::tfidf::TfIdf;
use keyterm::scoring::top_terms;

/// Keyterm: statistically significant key terms for speech corpora.
///
/// Finds multi-word units, weights terms by TF-IDF, and contrasts each
/// president's speeches against everyone else's with a signed
/// log-likelihood test.
#[derive(Parser)]
#[command(name = "keyterm", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List ranked collocation candidates (multi-word units)
    Collocations {
        /// Minimum adjacent count (default: KEYTERM_MIN_COLLOCATION_COUNT or 25)
        #[arg(long)]
        min_count: Option<usize>,

        /// Rows to show (default: 50)
        #[arg(long, default_value = "50")]
        limit: usize,
    },

    /// Show the top TF-IDF terms of one document
    Tfidf {
        /// Document index (row number in the corpus CSV, from 0)
        document: usize,

        /// Terms to show (default: KEYTERM_TOP_TERMS or 30)
        #[arg(long)]
        top: Option<usize>,
    },

    /// Compare one president's speeches against all others
    Keyness {
        /// President name as it appears in the corpus CSV
        president: String,

        /// Terms to show per direction (default: KEYTERM_TOP_TERMS or 30)
        #[arg(long)]
        top: Option<usize>,
    },

    /// Export overused-term weights for every president, one JSON file each
    Export {
        /// Output directory (default: KEYTERM_OUTPUT_DIR or ./wordclouds)
        #[arg(long)]
        output_dir: Option<PathBuf>,

        /// Terms per file (default: KEYTERM_TOP_TERMS or 30)
        #[arg(long)]
        top: Option<usize>,
    },

    /// Show corpus statistics (documents, presidents, vocabulary, compounds)
    Summary,
}

fn main() -> Result<()> {
    // Load .env file if present (silently ignore if missing)
    let _ = dotenvy::dotenv();

    // Set up structured logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("keyterm=info")),
        )
        .init();

    let cli = Cli::parse();
    let config = Config::load()?;

    match cli.command {
        Commands::Collocations { min_count, limit } => {
            let prepared = load_prepared(&config, min_count)?;
            terminal::display_collocations(&prepared.collocations, prepared.accepted, limit);
        }

        Commands::Tfidf { document, top } => {
            let prepared = load_prepared(&config, None)?;
            let weights = TfIdf::default()
                .score_document(&prepared.dtm, document)
                .with_context(|| format!("Cannot score document {document}"))?;
            let record = &prepared.records[document];
            let title = format!("TF-IDF: {} ({})", record.president, record.date);
            terminal::display_tfidf(&title, &top_terms(&weights, top.unwrap_or(config.top_terms)));
        }

        Commands::Keyness { president, top } => {
            let prepared = load_prepared(&config, None)?;
            let scores = keyness::score_group(&prepared.dtm, &prepared.labels(), &president)
                .with_context(|| format!("Keyness failed for {president:?}"))?;
            terminal::display_keyness(&president, &scores, top.unwrap_or(config.top_terms));
        }

        Commands::Export { output_dir, top } => {
            let prepared = load_prepared(&config, None)?;
            let output_dir = output_dir.unwrap_or_else(|| config.output_dir.clone());
            let top = top.unwrap_or(config.top_terms);
            run_export(&prepared, &output_dir, top)?;
        }

        Commands::Summary => {
            let prepared = load_prepared(&config, None)?;
            keyterm::status::show(&config, &prepared);
        }
    }

    Ok(())
}

/// Load speeches and resources, then run the preparation pipeline.
fn load_prepared(config: &Config, min_count: Option<usize>) -> Result<PreparedCorpus> {
    config.require_corpus()?;

    let records = metadata::load_speeches(&config.corpus_path)
        .with_context(|| format!("Failed to read {}", config.corpus_path.display()))?;
    if records.is_empty() {
        anyhow::bail!("{} contains no speeches", config.corpus_path.display());
    }
    info!(speeches = records.len(), "Loaded corpus");

    let resources = TokenizerResources::load(
        config.stopwords_path.as_deref(),
        config.lemma_path.as_deref(),
    )
    .context("Failed to load tokenizer resources")?;
    let tokenizer = Tokenizer::new(TokenizerConfig {
        resources,
        ..TokenizerConfig::default()
    })?;

    let settings = config.prepare_settings(min_count, None)?;
    Ok(prepare::prepare(records, &tokenizer, &settings)?)
}

/// Score every president and write one JSON file per president. Failures
/// are reported per key and never stop the batch.
fn run_export(prepared: &PreparedCorpus, output_dir: &std::path::Path, top: usize) -> Result<()> {
    let groups = metadata::presidents(&prepared.records);
    let labels = prepared.labels();

    println!("Scoring {} presidents...", groups.len());
    let pb = ProgressBar::new(groups.len() as u64);
    pb.set_style(ProgressStyle::default_bar().template("  Keyness [{bar:30}] {pos}/{len} ({eta})")?);
    let report = keyness::score_groups(&prepared.dtm, &labels, &groups, Some(&pb));
    pb.finish_and_clear();

    let exported = output::export_all(
        output_dir,
        report
            .scores
            .iter()
            .map(|(group, scores)| (group.as_str(), scores.overused(top))),
    );

    println!(
        "{}",
        format!(
            "Wrote {} files to {}",
            exported.written.len(),
            output_dir.display()
        )
        .bold()
    );
    for (group, err) in report.failures.iter().chain(&exported.failures) {
        println!("  {} {}: {}", "skipped".yellow(), group, err);
    }
    Ok(())
}
