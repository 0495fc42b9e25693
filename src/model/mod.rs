//! Classification models and training metadata.

pub mod logistic;
pub mod metadata;

pub use logistic::{LogisticRegression, TrainParameters};
pub use metadata::ModelMetadata;
