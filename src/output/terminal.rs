// Colored terminal output for collocations, TF-IDF and keyness tables.

use colored::Colorize;

use super::truncate_chars;
use crate::scoring::llr::{LlrScores, Significance};
use crate::terms::collocation::CollocationCandidate;

const TERM_WIDTH: usize = 32;

/// Display ranked collocation candidates, marking the compounded ones.
pub fn display_collocations(candidates: &[CollocationCandidate], accepted: usize, limit: usize) {
    if candidates.is_empty() {
        println!("No collocations reached the minimum count.");
        return;
    }

    println!(
        "\n{}",
        format!(
            "=== Collocations ({} candidates, {} compounded) ===",
            candidates.len(),
            accepted
        )
        .bold()
    );
    println!();
    println!(
        "  {:>4}  {:<34} {:>7}  {:>9}  {:>10}",
        "Rank".dimmed(),
        "Pair".dimmed(),
        "Count".dimmed(),
        "Expected".dimmed(),
        "G2".dimmed(),
    );
    println!("  {}", "-".repeat(72).dimmed());

    for (i, c) in candidates.iter().take(limit).enumerate() {
        let pair = truncate_chars(&format!("{} {}", c.term1, c.term2), TERM_WIDTH);
        let marker = if i < accepted {
            "+".green().to_string()
        } else {
            " ".to_string()
        };
        println!(
            "  {:>4}.{}{:<34} {:>7}  {:>9.1}  {:>10.2}",
            i + 1,
            marker,
            pair,
            c.count,
            c.expected,
            c.score
        );
    }
    println!();
}

/// Display the top TF-IDF terms of one document.
pub fn display_tfidf(title: &str, ranked: &[(String, f64)]) {
    println!("\n{}", format!("=== {title} ===").bold());
    println!();
    if ranked.is_empty() {
        println!("  (no terms)");
        return;
    }
    let max = ranked.first().map(|(_, w)| *w).unwrap_or(0.0);
    for (i, (term, weight)) in ranked.iter().enumerate() {
        println!(
            "  {:>3}. {:<34} {} {:.2}",
            i + 1,
            truncate_chars(term, TERM_WIDTH),
            bar(*weight, max).bright_blue(),
            weight
        );
    }
    println!();
}

/// Display overused and underused terms for one group.
pub fn display_keyness(group: &str, scores: &LlrScores, top: usize) {
    println!(
        "\n{}",
        format!(
            "=== Keyness: {group} ({} vs {} tokens) ===",
            scores.target_total, scores.comparison_total
        )
        .bold()
    );

    println!("\n  {}", "Overused".green().bold());
    print_keyness_rows(scores, &scores.overused(top));

    println!("\n  {}", "Underused".red().bold());
    print_keyness_rows(scores, &scores.underused(top));

    println!(
        "\n  {}",
        "* p<0.05  ** p<0.01  *** p<0.001  **** p<0.0001 (chi-square, 1 df)".dimmed()
    );
}

fn print_keyness_rows(scores: &LlrScores, rows: &[(String, f64)]) {
    if rows.is_empty() {
        println!("    (none)");
        return;
    }
    for (i, (term, score)) in rows.iter().enumerate() {
        let (target, comparison) = scores
            .term(term)
            .map(|t| (t.target_count, t.comparison_count))
            .unwrap_or((0, 0));
        let level = Significance::from_score(*score);
        let stars = match level {
            Significance::P0001 | Significance::P001 => level.stars().bright_red(),
            Significance::P01 | Significance::P05 => level.stars().yellow(),
            Significance::NotSignificant => level.stars().normal(),
        };
        println!(
            "    {:>3}. {:<34} {:>9.2} {:<4} {:>6} / {:<6}",
            i + 1,
            truncate_chars(term, TERM_WIDTH),
            score,
            stars,
            target,
            comparison
        );
    }
}

fn bar(value: f64, max: f64) -> String {
    let width: usize = 20;
    let filled = if max > 0.0 {
        ((value / max) * width as f64).round() as usize
    } else {
        0
    };
    format!("[{}{}]", "=".repeat(filled.min(width)), " ".repeat(width - filled.min(width)))
}
