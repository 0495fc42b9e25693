//! Classification pipeline: types, fitting, persistence and serving.

pub mod artifact;
pub mod evaluate;
pub mod pipeline;
pub mod service;
pub mod types;

pub use artifact::{ARTIFACT_MAGIC, FORMAT_VERSION, read_artifact, write_artifact};
pub use evaluate::{EvaluationReport, evaluate};
pub use pipeline::ClassificationPipeline;
pub use service::{InferenceService, build_query};
pub use types::{Article, Label, TrainingSample, Verdict};
