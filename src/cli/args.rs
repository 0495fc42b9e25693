//! Command line argument parsing for the verifact CLI using clap.

use clap::{Parser, Subcommand, ValueEnum};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Verifact - a fake news classifier
#[derive(Parser, Debug, Clone)]
#[command(name = "verifact")]
#[command(about = "Train and run a real/fake news article classifier")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(author = "Verifact Contributors")]
#[command(long_about = None)]
pub struct VerifactArgs {
    /// Verbosity level (0=quiet, 1=normal, 2=verbose, 3=debug)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Quiet mode (overrides verbose)
    #[arg(short, long)]
    pub quiet: bool,

    /// Output format
    #[arg(short = 'f', long = "format", default_value = "human")]
    pub output_format: OutputFormat,

    /// Pretty-print JSON output
    #[arg(long)]
    pub pretty: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Command,
}

impl VerifactArgs {
    /// Get the effective verbosity level
    pub fn verbosity(&self) -> u8 {
        if self.quiet {
            0
        } else {
            match self.verbose {
                0 => 1, // Default to normal
                n => n,
            }
        }
    }
}

/// Available CLI commands
#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Train a classifier from a labeled dataset
    Train(TrainArgs),

    /// Classify an article with a trained model
    Predict(PredictArgs),

    /// Evaluate a trained model on a labeled dataset
    Evaluate(EvaluateArgs),

    /// Show what is stored in a model artifact
    Inspect(InspectArgs),

    /// Show how a piece of text is normalized
    Normalize(NormalizeArgs),
}

/// Arguments for training
#[derive(Parser, Debug, Clone)]
pub struct TrainArgs {
    /// Labeled dataset path (CSV or JSONL)
    #[arg(short, long, value_name = "DATASET_FILE")]
    pub dataset: PathBuf,

    /// Where to write the model artifact
    #[arg(short, long, value_name = "MODEL_FILE")]
    pub model: PathBuf,

    /// Number of training epochs
    #[arg(long, default_value = "50")]
    pub epochs: usize,

    /// SGD learning rate
    #[arg(long, default_value = "0.1")]
    pub learning_rate: f64,

    /// L2 regularization strength
    #[arg(long, default_value = "0.00001")]
    pub l2: f64,

    /// Drop terms that appear in fewer than this many documents
    #[arg(long, default_value = "1")]
    pub min_df: usize,

    /// Seed for shuffling and splitting
    #[arg(long, default_value = "42")]
    pub seed: u64,

    /// Number of threads to use (defaults to all cores)
    #[arg(short, long)]
    pub threads: Option<usize>,

    /// Fraction of the dataset withheld for validation
    #[arg(long, default_value = "0.0")]
    pub holdout: f64,

    /// Disable balanced class weighting
    #[arg(long)]
    pub unbalanced: bool,
}

/// Arguments for prediction
#[derive(Parser, Debug, Clone)]
pub struct PredictArgs {
    /// Path to the model artifact
    #[arg(short, long, value_name = "MODEL_FILE")]
    pub model: PathBuf,

    /// Article title
    #[arg(long, default_value = "")]
    pub title: String,

    /// Article author
    #[arg(long, default_value = "")]
    pub author: String,

    /// Article body text
    #[arg(long, default_value = "")]
    pub text: String,

    /// Classify a batch of articles from a JSONL file instead
    #[arg(
        short,
        long,
        value_name = "ARTICLES_FILE",
        conflicts_with_all = ["title", "author", "text"]
    )]
    pub input: Option<PathBuf>,
}

/// Arguments for evaluation
#[derive(Parser, Debug, Clone)]
pub struct EvaluateArgs {
    /// Path to the model artifact
    #[arg(short, long, value_name = "MODEL_FILE")]
    pub model: PathBuf,

    /// Labeled dataset path (CSV or JSONL)
    #[arg(short, long, value_name = "DATASET_FILE")]
    pub dataset: PathBuf,
}

/// Arguments for artifact inspection
#[derive(Parser, Debug, Clone)]
pub struct InspectArgs {
    /// Path to the model artifact
    #[arg(value_name = "MODEL_FILE")]
    pub model: PathBuf,

    /// Include the most heavily weighted vocabulary terms
    #[arg(short, long)]
    pub detailed: bool,
}

/// Arguments for the normalize command
#[derive(Parser, Debug, Clone)]
pub struct NormalizeArgs {
    /// Text to normalize
    #[arg(value_name = "TEXT")]
    pub text: String,
}

/// Output formats for CLI
#[derive(ValueEnum, Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable output
    Human,
    /// JSON output
    Json,
}
