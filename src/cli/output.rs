//! Output formatting for CLI commands.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::cli::args::{OutputFormat, VerifactArgs};
use crate::error::Result;
use crate::pipeline::{EvaluationReport, Label};

/// Result structure for training.
#[derive(Debug, Serialize, Deserialize)]
pub struct TrainResult {
    pub model_path: String,
    pub training_examples: usize,
    pub real_examples: usize,
    pub fake_examples: usize,
    pub vocabulary_terms: usize,
    pub holdout_examples: usize,
    pub validation_accuracy: Option<f64>,
    pub duration_ms: u64,
}

/// A verdict paired with the headline it was issued for.
#[derive(Debug, Serialize, Deserialize)]
pub struct ArticleVerdict {
    pub title: String,
    pub label: Label,
    pub score: f64,
}

/// Result structure for batch prediction.
#[derive(Debug, Serialize, Deserialize)]
pub struct BatchPredictResult {
    pub predictions: Vec<ArticleVerdict>,
    pub total: usize,
    pub real: usize,
    pub fake: usize,
    pub duration_ms: u64,
}

/// Result structure for evaluation.
#[derive(Debug, Serialize, Deserialize)]
pub struct EvaluateResult {
    pub model_path: String,
    pub dataset_path: String,
    pub report: EvaluationReport,
    pub duration_ms: u64,
}

/// A vocabulary term with its learned weight.
#[derive(Debug, Serialize, Deserialize)]
pub struct WeightedTerm {
    pub term: String,
    pub weight: f64,
}

/// Result structure for artifact inspection.
#[derive(Debug, Serialize, Deserialize)]
pub struct InspectResult {
    pub model_path: String,
    pub model_name: String,
    pub model_version: String,
    pub trained_at: String,
    pub training_examples: usize,
    pub vocabulary_terms: usize,
    pub fallback_label: Label,
    pub file_size_bytes: u64,
    pub hyperparameters: BTreeMap<String, f64>,
    pub validation_metrics: BTreeMap<String, f64>,
    pub top_real_terms: Option<Vec<WeightedTerm>>,
    pub top_fake_terms: Option<Vec<WeightedTerm>>,
}

/// Result structure for the normalize command.
#[derive(Debug, Serialize, Deserialize)]
pub struct NormalizeResult {
    pub input: String,
    pub normalized: String,
    pub tokens: usize,
}

/// Output a result in the specified format.
pub fn output_result<T: Serialize>(message: &str, result: &T, args: &VerifactArgs) -> Result<()> {
    match args.output_format {
        OutputFormat::Human => output_human(message, result, args),
        OutputFormat::Json => output_json(result, args),
    }
}

/// Output in human-readable format.
fn output_human<T: Serialize>(message: &str, result: &T, args: &VerifactArgs) -> Result<()> {
    if args.verbosity() > 0 {
        println!("{message}");
        println!();
    }

    // Convert to JSON value for easier manipulation
    let value = serde_json::to_value(result)?;

    match result {
        _ if std::any::type_name::<T>().contains("BatchPredictResult") => {
            output_batch_predict_human(&value, args)
        }
        _ if std::any::type_name::<T>().contains("EvaluateResult") => {
            output_evaluate_human(&value, args)
        }
        _ if std::any::type_name::<T>().contains("InspectResult") => {
            output_inspect_human(&value, args)
        }
        _ => {
            // Generic output for other types
            output_generic_human(&value, args)
        }
    }
}

/// Output batch predictions in human format.
fn output_batch_predict_human(value: &serde_json::Value, _args: &VerifactArgs) -> Result<()> {
    if let Some(obj) = value.as_object()
        && let Some(predictions) = obj.get("predictions").and_then(|p| p.as_array())
    {
        println!("Predictions:");
        println!("═══════════");

        for prediction in predictions {
            if let Some(prediction) = prediction.as_object() {
                let label = prediction
                    .get("label")
                    .and_then(|l| l.as_str())
                    .unwrap_or("?");
                let score = prediction
                    .get("score")
                    .and_then(|s| s.as_f64())
                    .unwrap_or(0.0);
                let title = prediction
                    .get("title")
                    .and_then(|t| t.as_str())
                    .unwrap_or("");
                println!("{label:<5} {score:+.4}  {title}");
            }
        }

        println!();

        if let (Some(total), Some(real), Some(fake)) = (
            obj.get("total").and_then(|t| t.as_u64()),
            obj.get("real").and_then(|r| r.as_u64()),
            obj.get("fake").and_then(|f| f.as_u64()),
        ) {
            println!("Total articles: {total} ({real} real, {fake} fake)");
        }

        if let Some(duration) = obj.get("duration_ms").and_then(|d| d.as_u64()) {
            println!("Prediction time: {duration}ms");
        }
    }
    Ok(())
}

/// Output an evaluation report in human format.
fn output_evaluate_human(value: &serde_json::Value, _args: &VerifactArgs) -> Result<()> {
    if let Some(obj) = value.as_object()
        && let Some(report) = obj.get("report").and_then(|r| r.as_object())
    {
        println!("Evaluation Report:");
        println!("═════════════════");

        if let Some(examples) = report.get("examples").and_then(|e| e.as_u64()) {
            println!("Examples: {examples}");
        }

        if let Some(accuracy) = report.get("accuracy").and_then(|a| a.as_f64()) {
            println!("Accuracy: {accuracy:.4}");
        }

        println!();
        println!("Per-class metrics:");
        println!("─────────────────");
        for class in ["real", "fake"] {
            let precision = report
                .get(format!("precision_{class}").as_str())
                .and_then(|p| p.as_f64())
                .unwrap_or(0.0);
            let recall = report
                .get(format!("recall_{class}").as_str())
                .and_then(|r| r.as_f64())
                .unwrap_or(0.0);
            let f1 = report
                .get(format!("f1_{class}").as_str())
                .and_then(|f| f.as_f64())
                .unwrap_or(0.0);
            println!("{class:<5} precision {precision:.4}  recall {recall:.4}  f1 {f1:.4}");
        }

        if let (Some(true_real), Some(false_fake), Some(false_real), Some(true_fake)) = (
            report.get("true_real").and_then(|v| v.as_u64()),
            report.get("false_fake").and_then(|v| v.as_u64()),
            report.get("false_real").and_then(|v| v.as_u64()),
            report.get("true_fake").and_then(|v| v.as_u64()),
        ) {
            println!();
            println!("Confusion matrix:");
            println!("────────────────");
            println!("actual real: {true_real} predicted real, {false_fake} predicted fake");
            println!("actual fake: {false_real} predicted real, {true_fake} predicted fake");
        }

        if let Some(duration) = obj.get("duration_ms").and_then(|d| d.as_u64()) {
            println!();
            println!("Evaluation time: {duration}ms");
        }
    }
    Ok(())
}

/// Output artifact details in human format.
fn output_inspect_human(value: &serde_json::Value, _args: &VerifactArgs) -> Result<()> {
    if let Some(obj) = value.as_object() {
        println!("Model Artifact:");
        println!("══════════════");

        if let Some(path) = obj.get("model_path").and_then(|p| p.as_str()) {
            println!("Path: {path}");
        }

        if let (Some(name), Some(version)) = (
            obj.get("model_name").and_then(|n| n.as_str()),
            obj.get("model_version").and_then(|v| v.as_str()),
        ) {
            println!("Model: {name} {version}");
        }

        if let Some(trained_at) = obj.get("trained_at").and_then(|t| t.as_str()) {
            println!("Trained at: {trained_at}");
        }

        if let Some(examples) = obj.get("training_examples").and_then(|e| e.as_u64()) {
            println!("Training examples: {examples}");
        }

        if let Some(terms) = obj.get("vocabulary_terms").and_then(|t| t.as_u64()) {
            println!("Vocabulary terms: {terms}");
        }

        if let Some(fallback) = obj.get("fallback_label").and_then(|f| f.as_str()) {
            println!("Fallback label: {fallback}");
        }

        if let Some(size) = obj.get("file_size_bytes").and_then(|s| s.as_u64()) {
            let formatted_size = format_bytes(size);
            println!("File size: {formatted_size}");
        }

        for (heading, field) in [
            ("Hyperparameters:", "hyperparameters"),
            ("Validation metrics:", "validation_metrics"),
        ] {
            if let Some(entries) = obj.get(field).and_then(|e| e.as_object())
                && !entries.is_empty()
            {
                println!();
                println!("{heading}");
                println!("{}", "─".repeat(heading.len() - 1));
                for (key, val) in entries {
                    let formatted_val = format_value(val);
                    println!("  {key}: {formatted_val}");
                }
            }
        }

        for (heading, field) in [
            ("Top real-leaning terms:", "top_real_terms"),
            ("Top fake-leaning terms:", "top_fake_terms"),
        ] {
            if let Some(terms) = obj.get(field).and_then(|t| t.as_array())
                && !terms.is_empty()
            {
                println!();
                println!("{heading}");
                println!("{}", "─".repeat(heading.len() - 1));
                for term in terms {
                    if let Some(term) = term.as_object()
                        && let Some(text) = term.get("term").and_then(|t| t.as_str())
                        && let Some(weight) = term.get("weight").and_then(|w| w.as_f64())
                    {
                        println!("  {text:<24} {weight:+.4}");
                    }
                }
            }
        }
    }
    Ok(())
}

/// Output generic data in human format.
fn output_generic_human(value: &serde_json::Value, _args: &VerifactArgs) -> Result<()> {
    match value {
        serde_json::Value::Object(obj) => {
            for (key, val) in obj {
                let formatted_val = format_value(val);
                println!("{key}: {formatted_val}");
            }
        }
        _ => {
            let formatted_value = format_value(value);
            println!("{formatted_value}");
        }
    }
    Ok(())
}

/// Output in JSON format.
fn output_json<T: Serialize>(result: &T, args: &VerifactArgs) -> Result<()> {
    let json = if args.pretty {
        serde_json::to_string_pretty(result)?
    } else {
        serde_json::to_string(result)?
    };

    println!("{json}");
    Ok(())
}

/// Format a JSON value for display.
fn format_value(value: &serde_json::Value) -> String {
    match value {
        serde_json::Value::String(s) => s.clone(),
        serde_json::Value::Number(n) => n.to_string(),
        serde_json::Value::Bool(b) => b.to_string(),
        serde_json::Value::Array(arr) => {
            let formatted_values = arr.iter().map(format_value).collect::<Vec<_>>().join(", ");
            format!("[{formatted_values}]")
        }
        serde_json::Value::Object(_) => "[object]".to_string(),
        serde_json::Value::Null => "null".to_string(),
    }
}

/// Format bytes into human-readable format.
fn format_bytes(bytes: u64) -> String {
    const UNITS: &[&str] = &["B", "KB", "MB", "GB", "TB"];
    let mut size = bytes as f64;
    let mut unit_index = 0;

    while size >= 1024.0 && unit_index < UNITS.len() - 1 {
        size /= 1024.0;
        unit_index += 1;
    }

    if unit_index == 0 {
        let unit = UNITS[unit_index];
        format!("{bytes} {unit}")
    } else {
        let unit = UNITS[unit_index];
        format!("{size:.1} {unit}")
    }
}
