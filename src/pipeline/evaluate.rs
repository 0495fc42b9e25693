//! Model evaluation over labeled datasets.

use std::collections::BTreeMap;

use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::error::{Result, VerifactError};
use crate::pipeline::pipeline::ClassificationPipeline;
use crate::pipeline::service::build_query;
use crate::pipeline::types::{Label, TrainingSample, Verdict};

/// Classification quality metrics over a labeled dataset.
///
/// Per-class precision, recall and F1 are reported for both labels;
/// undefined ratios (zero denominators) are reported as zero.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvaluationReport {
    /// Number of evaluated examples.
    pub examples: usize,
    /// Fraction of correct predictions.
    pub accuracy: f64,
    /// Precision for the `real` class.
    pub precision_real: f64,
    /// Recall for the `real` class.
    pub recall_real: f64,
    /// F1 for the `real` class.
    pub f1_real: f64,
    /// Precision for the `fake` class.
    pub precision_fake: f64,
    /// Recall for the `fake` class.
    pub recall_fake: f64,
    /// F1 for the `fake` class.
    pub f1_fake: f64,
    /// Predicted real, actually real.
    pub true_real: usize,
    /// Predicted real, actually fake.
    pub false_real: usize,
    /// Predicted fake, actually fake.
    pub true_fake: usize,
    /// Predicted fake, actually real.
    pub false_fake: usize,
}

fn ratio(numerator: usize, denominator: usize) -> f64 {
    if denominator == 0 {
        0.0
    } else {
        numerator as f64 / denominator as f64
    }
}

fn f1(precision: f64, recall: f64) -> f64 {
    if precision + recall == 0.0 {
        0.0
    } else {
        2.0 * precision * recall / (precision + recall)
    }
}

impl EvaluationReport {
    fn from_confusion(
        true_real: usize,
        false_real: usize,
        true_fake: usize,
        false_fake: usize,
    ) -> Self {
        let examples = true_real + false_real + true_fake + false_fake;
        let precision_real = ratio(true_real, true_real + false_real);
        let recall_real = ratio(true_real, true_real + false_fake);
        let precision_fake = ratio(true_fake, true_fake + false_fake);
        let recall_fake = ratio(true_fake, true_fake + false_real);

        EvaluationReport {
            examples,
            accuracy: ratio(true_real + true_fake, examples),
            precision_real,
            recall_real,
            f1_real: f1(precision_real, recall_real),
            precision_fake,
            recall_fake,
            f1_fake: f1(precision_fake, recall_fake),
            true_real,
            false_real,
            true_fake,
            false_fake,
        }
    }

    /// Metrics as a flat ordered map, for storage in model metadata.
    pub fn metrics(&self) -> BTreeMap<String, f64> {
        BTreeMap::from([
            ("accuracy".to_string(), self.accuracy),
            ("precision_real".to_string(), self.precision_real),
            ("recall_real".to_string(), self.recall_real),
            ("f1_real".to_string(), self.f1_real),
            ("precision_fake".to_string(), self.precision_fake),
            ("recall_fake".to_string(), self.recall_fake),
            ("f1_fake".to_string(), self.f1_fake),
        ])
    }
}

/// Evaluate a fitted pipeline against labeled samples.
pub fn evaluate(
    pipeline: &ClassificationPipeline,
    samples: &[TrainingSample],
) -> Result<EvaluationReport> {
    if samples.is_empty() {
        return Err(VerifactError::dataset("Cannot evaluate on an empty dataset"));
    }

    let verdicts: Vec<Verdict> = samples
        .par_iter()
        .map(|sample| {
            let article = &sample.article;
            pipeline.verdict(&build_query(&article.title, &article.author, &article.text))
        })
        .collect::<Result<Vec<_>>>()?;

    let mut true_real = 0;
    let mut false_real = 0;
    let mut true_fake = 0;
    let mut false_fake = 0;
    for (sample, verdict) in samples.iter().zip(&verdicts) {
        match (verdict.label, sample.label) {
            (Label::Real, Label::Real) => true_real += 1,
            (Label::Real, Label::Fake) => false_real += 1,
            (Label::Fake, Label::Fake) => true_fake += 1,
            (Label::Fake, Label::Real) => false_fake += 1,
        }
    }

    Ok(EvaluationReport::from_confusion(
        true_real, false_real, true_fake, false_fake,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_report_from_confusion() {
        let report = EvaluationReport::from_confusion(8, 2, 7, 3);
        assert_eq!(report.examples, 20);
        assert!((report.accuracy - 0.75).abs() < 1e-12);
        assert!((report.precision_real - 0.8).abs() < 1e-12);
        assert!((report.recall_real - 8.0 / 11.0).abs() < 1e-12);
        assert!((report.precision_fake - 0.7).abs() < 1e-12);
        assert!((report.recall_fake - 7.0 / 9.0).abs() < 1e-12);
    }

    #[test]
    fn test_zero_denominators_report_zero() {
        // Every prediction was "fake", none were actually fake.
        let report = EvaluationReport::from_confusion(0, 0, 0, 5);
        assert_eq!(report.precision_real, 0.0);
        assert_eq!(report.recall_real, 0.0);
        assert_eq!(report.f1_real, 0.0);
        assert_eq!(report.accuracy, 0.0);
    }

    #[test]
    fn test_metrics_map_keys() {
        let report = EvaluationReport::from_confusion(1, 0, 1, 0);
        let metrics = report.metrics();
        assert_eq!(metrics.len(), 7);
        assert_eq!(metrics.get("accuracy"), Some(&1.0));
    }
}
