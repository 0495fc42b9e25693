//! Labeled dataset loading, splitting and summarizing.
//!
//! Two on-disk formats are supported: CSV with a header row and JSON Lines.
//! Both need `title`, `author`, `text` and `label` columns; missing text
//! columns are treated as empty and unrecognized columns are ignored. Labels
//! may be spelled `real`/`fake` (any case) or `1`/`0`.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use rand::prelude::*;
use serde::{Deserialize, Serialize};

use crate::error::{Result, VerifactError};
use crate::pipeline::types::{Article, Label, TrainingSample};

#[derive(Debug, Deserialize)]
struct CsvRecord {
    #[serde(default)]
    title: String,
    #[serde(default)]
    author: String,
    #[serde(default)]
    text: String,
    label: String,
}

#[derive(Debug, Deserialize)]
struct JsonRecord {
    #[serde(default)]
    title: String,
    #[serde(default)]
    author: String,
    #[serde(default)]
    text: String,
    label: serde_json::Value,
}

fn parse_label_value(value: &serde_json::Value) -> Option<Label> {
    match value {
        serde_json::Value::String(text) => text.parse().ok(),
        serde_json::Value::Number(number) => match number.as_i64() {
            Some(1) => Some(Label::Real),
            Some(0) => Some(Label::Fake),
            _ => None,
        },
        _ => None,
    }
}

/// Load a labeled dataset, dispatching on the file extension.
pub fn load(path: &Path) -> Result<Vec<TrainingSample>> {
    let extension = path
        .extension()
        .and_then(|extension| extension.to_str())
        .map(str::to_ascii_lowercase);
    match extension.as_deref() {
        Some("csv") => load_csv(path),
        Some("jsonl") | Some("ndjson") => load_jsonl(path),
        _ => Err(VerifactError::invalid_argument(format!(
            "Unsupported dataset format for {} (expected .csv or .jsonl)",
            path.display()
        ))),
    }
}

/// Load a labeled dataset from a CSV file with a header row.
pub fn load_csv(path: &Path) -> Result<Vec<TrainingSample>> {
    let file = File::open(path)?;
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(BufReader::new(file));

    let mut samples = Vec::new();
    for (row, record) in reader.deserialize::<CsvRecord>().enumerate() {
        // Data rows start on line 2, after the header.
        let line = row + 2;
        let record = record.map_err(|e| VerifactError::dataset(format!("Line {line}: {e}")))?;
        let label: Label = record.label.parse().map_err(|_| {
            VerifactError::dataset(format!("Line {line}: unknown label {:?}", record.label))
        })?;
        samples.push(TrainingSample::new(
            Article::new(record.title, record.author, record.text),
            label,
        ));
    }
    Ok(samples)
}

/// Load a labeled dataset from a JSON Lines file.
///
/// Blank lines are skipped.
pub fn load_jsonl(path: &Path) -> Result<Vec<TrainingSample>> {
    let file = File::open(path)?;
    let reader = BufReader::new(file);

    let mut samples = Vec::new();
    for (index, line) in reader.lines().enumerate() {
        let line = line?;
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }

        let record: JsonRecord = serde_json::from_str(trimmed)
            .map_err(|e| VerifactError::dataset(format!("Line {}: {e}", index + 1)))?;
        let Some(label) = parse_label_value(&record.label) else {
            return Err(VerifactError::dataset(format!(
                "Line {}: unknown label {}",
                index + 1,
                record.label
            )));
        };
        samples.push(TrainingSample::new(
            Article::new(record.title, record.author, record.text),
            label,
        ));
    }
    Ok(samples)
}

/// Load unlabeled articles from a JSON Lines file, for batch prediction.
pub fn load_articles_jsonl(path: &Path) -> Result<Vec<Article>> {
    let file = File::open(path)?;
    let reader = BufReader::new(file);

    let mut articles = Vec::new();
    for (index, line) in reader.lines().enumerate() {
        let line = line?;
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }
        let article: Article = serde_json::from_str(trimmed)
            .map_err(|e| VerifactError::dataset(format!("Line {}: {e}", index + 1)))?;
        articles.push(article);
    }
    Ok(articles)
}

/// Split samples into training and holdout sets.
///
/// The split is seeded, so the same inputs always produce the same
/// partition. `holdout` is the fraction withheld and must be in `[0, 1)`.
pub fn split(
    mut samples: Vec<TrainingSample>,
    holdout: f64,
    seed: u64,
) -> Result<(Vec<TrainingSample>, Vec<TrainingSample>)> {
    if !(0.0..1.0).contains(&holdout) {
        return Err(VerifactError::invalid_argument(format!(
            "Holdout fraction must be in [0, 1), got {holdout}"
        )));
    }
    if holdout == 0.0 || samples.is_empty() {
        return Ok((samples, Vec::new()));
    }

    let mut rng = StdRng::seed_from_u64(seed);
    samples.shuffle(&mut rng);

    // Keep at least one training sample.
    let holdout_len = ((samples.len() as f64) * holdout).round() as usize;
    let holdout_len = holdout_len.min(samples.len() - 1);
    let held = samples.split_off(samples.len() - holdout_len);
    Ok((samples, held))
}

/// Label distribution of a dataset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DatasetSummary {
    /// Total number of samples.
    pub examples: usize,
    /// Samples labeled real.
    pub real: usize,
    /// Samples labeled fake.
    pub fake: usize,
}

/// Count samples per label.
pub fn summarize(samples: &[TrainingSample]) -> DatasetSummary {
    let real = samples
        .iter()
        .filter(|sample| sample.label.is_real())
        .count();
    DatasetSummary {
        examples: samples.len(),
        real,
        fake: samples.len() - real,
    }
}
