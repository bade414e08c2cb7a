// Speech records loaded from CSV.
//
// Each row is one document: who gave it, when, and the raw text. Row order
// defines the document index used everywhere downstream.

use std::collections::BTreeSet;
use std::io::Read;
use std::path::Path;

use chrono::{Datelike, NaiveDate};
use csv::ReaderBuilder;
use serde::{Deserialize, Serialize};

use crate::error::Result;

/// One speech, aligned by position with the tokenized corpus.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpeechRecord {
    pub president: String,
    /// ISO date (YYYY-MM-DD)
    pub date: NaiveDate,
    pub text: String,
}

impl SpeechRecord {
    pub fn year(&self) -> i32 {
        self.date.year()
    }
}

/// Read speech records from a CSV file with a `president,date,text` header.
pub fn load_speeches(path: &Path) -> Result<Vec<SpeechRecord>> {
    let reader = ReaderBuilder::new().trim(csv::Trim::Headers).from_path(path)?;
    collect_records(reader)
}

/// Same as `load_speeches`, from any reader.
pub fn read_speeches<R: Read>(input: R) -> Result<Vec<SpeechRecord>> {
    let reader = ReaderBuilder::new().trim(csv::Trim::Headers).from_reader(input);
    collect_records(reader)
}

fn collect_records<R: Read>(mut reader: csv::Reader<R>) -> Result<Vec<SpeechRecord>> {
    let mut records = Vec::new();
    for row in reader.deserialize() {
        let record: SpeechRecord = row?;
        records.push(record);
    }
    Ok(records)
}

/// Distinct presidents in sorted order.
pub fn presidents(records: &[SpeechRecord]) -> Vec<String> {
    records
        .iter()
        .map(|r| r.president.clone())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// Positions of every label equal to `president`.
pub fn indices_for<I, S>(labels: I, president: &str) -> Vec<usize>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    labels
        .into_iter()
        .enumerate()
        .filter(|(_, label)| label.as_ref() == president)
        .map(|(i, _)| i)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const CSV: &str = "president,date,text\n\
        Washington,1790-01-08,\"Fellow citizens of the Senate\"\n\
        Adams,1797-11-22,\"Gentlemen of the Senate\"\n\
        Washington,1791-10-25,\"Fellow citizens, again\"\n";

    #[test]
    fn test_read_speeches() {
        let records = read_speeches(CSV.as_bytes()).unwrap();
        assert_eq!(records.len(), 3);
        assert_eq!(records[0].president, "Washington");
        assert_eq!(records[1].year(), 1797);
        assert_eq!(records[2].text, "Fellow citizens, again");
    }

    #[test]
    fn test_presidents_and_indices() {
        let records = read_speeches(CSV.as_bytes()).unwrap();
        assert_eq!(presidents(&records), vec!["Adams", "Washington"]);
        let labels = records.iter().map(|r| r.president.as_str());
        assert_eq!(indices_for(labels.clone(), "Washington"), vec![0, 2]);
        assert!(indices_for(labels, "Lincoln").is_empty());
    }

    #[test]
    fn test_bad_date_is_error() {
        let bad = "president,date,text\nAdams,someday,\"text\"\n";
        assert!(read_speeches(bad.as_bytes()).is_err());
    }
}
