//! Binary logistic regression trained by stochastic gradient descent.

use rand::prelude::*;

use crate::error::{Result, VerifactError};
use crate::feature::vector::SparseVector;

/// Hyperparameters for fitting a classification pipeline.
#[derive(Debug, Clone, PartialEq)]
pub struct TrainParameters {
    /// SGD step size.
    pub learning_rate: f64,
    /// Number of full passes over the training set.
    pub epochs: usize,
    /// L2 regularization strength. The default is deliberately weak; TF-IDF
    /// vectors are unit length, so heavy shrinkage mostly hurts.
    pub l2: f64,
    /// Reweight classes inversely proportional to their frequency.
    pub balanced_class_weights: bool,
    /// Vocabulary document-frequency floor applied during fitting.
    pub min_df: usize,
    /// Seed for example shuffling, making training runs reproducible.
    pub seed: u64,
}

impl Default for TrainParameters {
    fn default() -> Self {
        TrainParameters {
            learning_rate: 0.1,
            epochs: 50,
            l2: 1e-5,
            balanced_class_weights: true,
            min_df: 1,
            seed: 42,
        }
    }
}

/// A binary logistic regression model over sparse feature vectors.
///
/// The positive class corresponds to `true` labels; the decision function is
/// `w . x + b`, with the decision boundary at zero.
#[derive(Debug, Clone, PartialEq)]
pub struct LogisticRegression {
    weights: Vec<f64>,
    intercept: f64,
}

fn sigmoid(z: f64) -> f64 {
    if z >= 0.0 {
        1.0 / (1.0 + (-z).exp())
    } else {
        let e = z.exp();
        e / (1.0 + e)
    }
}

fn log_loss(probability: f64, target: f64) -> f64 {
    let p = probability.clamp(1e-12, 1.0 - 1e-12);
    -(target * p.ln() + (1.0 - target) * (1.0 - p).ln())
}

impl LogisticRegression {
    /// Rebuild a model from persisted parameters.
    pub fn from_parts(weights: Vec<f64>, intercept: f64) -> Self {
        LogisticRegression { weights, intercept }
    }

    /// Train a model on labeled feature vectors.
    ///
    /// `labels[i]` is the class of `features[i]`, with `true` as the
    /// positive class. Both classes must be present.
    pub fn fit(features: &[SparseVector], labels: &[bool], params: &TrainParameters) -> Result<Self> {
        let Some(first) = features.first() else {
            return Err(VerifactError::model("Cannot train on an empty dataset"));
        };
        if features.len() != labels.len() {
            return Err(VerifactError::model(format!(
                "Feature/label length mismatch: {} features, {} labels",
                features.len(),
                labels.len()
            )));
        }

        let dim = first.dim();
        if features.iter().any(|vector| vector.dim() != dim) {
            return Err(VerifactError::model(
                "All feature vectors must share one dimension",
            ));
        }

        let positives = labels.iter().filter(|&&label| label).count();
        let negatives = labels.len() - positives;
        if positives == 0 || negatives == 0 {
            return Err(VerifactError::model(
                "Training data must contain both classes",
            ));
        }

        let (weight_pos, weight_neg) = if params.balanced_class_weights {
            // n_samples / (n_classes * class_count) per class
            let n = labels.len() as f64;
            (n / (2.0 * positives as f64), n / (2.0 * negatives as f64))
        } else {
            (1.0, 1.0)
        };

        let mut weights = vec![0.0; dim];
        let mut intercept = 0.0;
        let mut order: Vec<usize> = (0..features.len()).collect();
        let mut rng = StdRng::seed_from_u64(params.seed);

        for epoch in 0..params.epochs {
            order.shuffle(&mut rng);
            let mut epoch_loss = 0.0;

            for &i in &order {
                let x = &features[i];
                let (target, class_weight) = if labels[i] {
                    (1.0, weight_pos)
                } else {
                    (0.0, weight_neg)
                };

                let p = sigmoid(x.dot(&weights) + intercept);
                let gradient = class_weight * (p - target);

                for (index, value) in x.iter() {
                    weights[index] -=
                        params.learning_rate * (gradient * value + params.l2 * weights[index]);
                }
                intercept -= params.learning_rate * gradient;
                epoch_loss += class_weight * log_loss(p, target);
            }

            log::debug!(
                "epoch {}/{}: mean loss {:.6}",
                epoch + 1,
                params.epochs,
                epoch_loss / features.len() as f64
            );
        }

        Ok(LogisticRegression { weights, intercept })
    }

    /// Signed distance from the decision boundary.
    pub fn decision(&self, vector: &SparseVector) -> f64 {
        vector.dot(&self.weights) + self.intercept
    }

    /// Probability of the positive class.
    pub fn probability(&self, vector: &SparseVector) -> f64 {
        sigmoid(self.decision(vector))
    }

    /// Predicted class: `true` when the decision value is positive.
    pub fn predict(&self, vector: &SparseVector) -> bool {
        self.decision(vector) > 0.0
    }

    /// Model weights, indexed by vocabulary position.
    pub fn weights(&self) -> &[f64] {
        &self.weights
    }

    /// Model intercept.
    pub fn intercept(&self) -> f64 {
        self.intercept
    }

    /// Dimension of the feature space this model was trained on.
    pub fn dimension(&self) -> usize {
        self.weights.len()
    }
}
