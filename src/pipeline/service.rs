//! Inference service over a loaded model artifact.

use std::path::Path;
use std::sync::Arc;

use crate::error::Result;
use crate::pipeline::artifact::read_artifact;
use crate::pipeline::pipeline::ClassificationPipeline;
use crate::pipeline::types::{Article, Verdict};

/// Build the classification query for an article.
///
/// The three fields are joined in fixed order (title, author, text) with
/// single spaces. Callers pass empty strings for missing fields; the order
/// matters because the model was trained on queries built the same way.
pub fn build_query(title: &str, author: &str, text: &str) -> String {
    [title, author, text].join(" ")
}

/// A shareable handle to a loaded classification pipeline.
///
/// The pipeline is loaded once and wrapped in an [`Arc`]; clones share the
/// same model, and classification never locks.
#[derive(Debug, Clone)]
pub struct InferenceService {
    pipeline: Arc<ClassificationPipeline>,
}

impl InferenceService {
    /// Load a model artifact from disk.
    ///
    /// Fails eagerly on any artifact problem so a service never starts with
    /// a half-usable model.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let pipeline = read_artifact(path)?;
        log::info!(
            "Loaded model from {}: {} vocabulary terms, trained at {}",
            path.display(),
            pipeline.vocabulary_size(),
            pipeline.metadata().trained_at
        );
        Ok(InferenceService {
            pipeline: Arc::new(pipeline),
        })
    }

    /// Wrap an already fitted pipeline.
    pub fn from_pipeline(pipeline: ClassificationPipeline) -> Self {
        InferenceService {
            pipeline: Arc::new(pipeline),
        }
    }

    /// Classify a single article.
    pub fn classify(&self, article: &Article) -> Result<Verdict> {
        self.pipeline
            .verdict(&build_query(&article.title, &article.author, &article.text))
    }

    /// Classify a batch of articles in parallel.
    pub fn classify_batch(&self, articles: &[Article]) -> Result<Vec<Verdict>> {
        let queries: Vec<String> = articles
            .iter()
            .map(|article| build_query(&article.title, &article.author, &article.text))
            .collect();
        self.pipeline.predict_batch(&queries)
    }

    /// The underlying pipeline.
    pub fn pipeline(&self) -> &ClassificationPipeline {
        &self.pipeline
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_query_fixed_order() {
        assert_eq!(
            build_query("Title", "Author", "Body text"),
            "Title Author Body text"
        );
    }

    #[test]
    fn test_build_query_empty_fields() {
        assert_eq!(build_query("", "", ""), "  ");
        assert_eq!(build_query("Title", "", "Body"), "Title  Body");
    }
}
