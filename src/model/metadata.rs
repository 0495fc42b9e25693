//! Training metadata carried alongside model parameters.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Metadata describing how and when a model was trained.
///
/// Maps are ordered so serialized metadata is stable across runs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelMetadata {
    /// Model name.
    pub name: String,
    /// Version of the library that produced the model.
    pub version: String,
    /// Training completion time.
    pub trained_at: DateTime<Utc>,
    /// Number of training examples.
    pub training_examples: usize,
    /// Hyperparameters used for training.
    pub hyperparameters: BTreeMap<String, f64>,
    /// Validation metrics recorded after training.
    pub validation_metrics: BTreeMap<String, f64>,
}

impl ModelMetadata {
    /// Create metadata for a freshly trained model.
    pub fn new(name: impl Into<String>, version: impl Into<String>) -> Self {
        ModelMetadata {
            name: name.into(),
            version: version.into(),
            trained_at: Utc::now(),
            training_examples: 0,
            hyperparameters: BTreeMap::new(),
            validation_metrics: BTreeMap::new(),
        }
    }

    /// Record a hyperparameter value.
    pub fn set_hyperparameter(&mut self, key: impl Into<String>, value: f64) {
        self.hyperparameters.insert(key.into(), value);
    }

    /// Record a validation metric.
    pub fn set_metric(&mut self, key: impl Into<String>, value: f64) {
        self.validation_metrics.insert(key.into(), value);
    }
}
