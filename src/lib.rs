//! # Verifact
//!
//! A fake news classifier for Rust: normalize article text, vectorize it
//! with TF-IDF weighted bag-of-words features, and score it with a
//! logistic regression model.
//!
//! ## Features
//!
//! - Pure Rust implementation
//! - Deterministic training and prediction
//! - Stop word removal and noun lemmatization
//! - Single-file model artifacts with checksum verification
//! - Batch classification over all cores

pub mod analysis;
pub mod cli;
pub mod dataset;
pub mod error;
pub mod feature;
pub mod model;
pub mod pipeline;

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
