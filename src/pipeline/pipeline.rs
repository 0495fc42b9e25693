//! The end-to-end classification pipeline.

use rayon::prelude::*;

use crate::analysis::TextNormalizer;
use crate::error::{Result, VerifactError};
use crate::feature::{CountVectorizer, SparseVector, TfidfTransformer};
use crate::model::{LogisticRegression, ModelMetadata, TrainParameters};
use crate::pipeline::service::build_query;
use crate::pipeline::types::{Label, TrainingSample, Verdict};

/// A fitted classification pipeline: normalizer, vectorizer, TF-IDF
/// weighting and logistic classifier.
///
/// Pipelines are immutable once fitted; all prediction methods take `&self`
/// and are safe to call from many threads at once.
#[derive(Debug)]
pub struct ClassificationPipeline {
    normalizer: TextNormalizer,
    vectorizer: CountVectorizer,
    transformer: TfidfTransformer,
    classifier: LogisticRegression,
    /// Label returned for queries with no in-vocabulary terms: the majority
    /// class of the training set.
    fallback: Label,
    metadata: ModelMetadata,
}

impl ClassificationPipeline {
    /// Fit a pipeline on labeled samples.
    pub fn fit(samples: &[TrainingSample], params: &TrainParameters) -> Result<Self> {
        if samples.is_empty() {
            return Err(VerifactError::model("Cannot train on an empty dataset"));
        }

        let normalizer = TextNormalizer::new()?;
        let normalized: Vec<String> = samples
            .par_iter()
            .map(|sample| {
                let article = &sample.article;
                normalizer.normalize(&build_query(&article.title, &article.author, &article.text))
            })
            .collect::<Result<Vec<_>>>()?;

        let mut vectorizer = CountVectorizer::with_min_df(params.min_df)?;
        vectorizer.fit(&normalized)?;
        let counts: Vec<SparseVector> = normalized
            .par_iter()
            .map(|document| vectorizer.transform(document))
            .collect::<Result<Vec<_>>>()?;

        let mut transformer = TfidfTransformer::new();
        transformer.fit(&counts)?;
        let features: Vec<SparseVector> = counts
            .par_iter()
            .map(|vector| transformer.transform(vector))
            .collect::<Result<Vec<_>>>()?;

        let labels: Vec<bool> = samples.iter().map(|sample| sample.label.is_real()).collect();
        let classifier = LogisticRegression::fit(&features, &labels, params)?;

        let real_count = labels.iter().filter(|&&real| real).count();
        let fallback = Label::from_bool(real_count * 2 >= samples.len());

        let mut metadata = ModelMetadata::new("verifact", crate::VERSION);
        metadata.training_examples = samples.len();
        metadata.set_hyperparameter("learning_rate", params.learning_rate);
        metadata.set_hyperparameter("epochs", params.epochs as f64);
        metadata.set_hyperparameter("l2", params.l2);
        metadata.set_hyperparameter("min_df", params.min_df as f64);
        metadata.set_hyperparameter("seed", params.seed as f64);
        metadata.set_hyperparameter(
            "balanced_class_weights",
            if params.balanced_class_weights { 1.0 } else { 0.0 },
        );

        log::info!(
            "Fitted pipeline: {} examples, {} vocabulary terms",
            samples.len(),
            vectorizer.vocabulary_size()
        );

        Ok(ClassificationPipeline {
            normalizer,
            vectorizer,
            transformer,
            classifier,
            fallback,
            metadata,
        })
    }

    /// Assemble a pipeline from separately restored components.
    ///
    /// Validates that vocabulary, IDF weights and classifier weights agree
    /// on the feature dimension.
    pub fn from_components(
        normalizer: TextNormalizer,
        vectorizer: CountVectorizer,
        transformer: TfidfTransformer,
        classifier: LogisticRegression,
        fallback: Label,
        metadata: ModelMetadata,
    ) -> Result<Self> {
        let vocabulary = vectorizer.vocabulary_size();
        if transformer.idf().len() != vocabulary || classifier.dimension() != vocabulary {
            return Err(VerifactError::artifact(format!(
                "Inconsistent component dimensions: vocabulary {}, idf {}, weights {}",
                vocabulary,
                transformer.idf().len(),
                classifier.dimension()
            )));
        }

        Ok(ClassificationPipeline {
            normalizer,
            vectorizer,
            transformer,
            classifier,
            fallback,
            metadata,
        })
    }

    fn features(&self, query: &str) -> Result<Option<SparseVector>> {
        let normalized = self.normalizer.normalize(query)?;
        let counts = self.vectorizer.transform(&normalized)?;
        if counts.is_empty() {
            // Nothing the model knows about; the caller falls back to the
            // majority class.
            return Ok(None);
        }
        Ok(Some(self.transformer.transform(&counts)?))
    }

    /// Classify a raw query string.
    pub fn verdict(&self, query: &str) -> Result<Verdict> {
        match self.features(query)? {
            Some(vector) => {
                let score = self.classifier.decision(&vector);
                Ok(Verdict {
                    label: Label::from_bool(score > 0.0),
                    score,
                })
            }
            None => Ok(Verdict {
                label: self.fallback,
                score: 0.0,
            }),
        }
    }

    /// Predicted label for a query.
    pub fn predict(&self, query: &str) -> Result<Label> {
        Ok(self.verdict(query)?.label)
    }

    /// Decision value for a query; zero when the fallback applies.
    pub fn score(&self, query: &str) -> Result<f64> {
        Ok(self.verdict(query)?.score)
    }

    /// Classify many queries in parallel.
    pub fn predict_batch(&self, queries: &[String]) -> Result<Vec<Verdict>> {
        queries.par_iter().map(|query| self.verdict(query)).collect()
    }

    /// The normalizer shared by training and inference.
    pub fn normalizer(&self) -> &TextNormalizer {
        &self.normalizer
    }

    /// The fitted vectorizer.
    pub fn vectorizer(&self) -> &CountVectorizer {
        &self.vectorizer
    }

    /// The fitted TF-IDF transformer.
    pub fn transformer(&self) -> &TfidfTransformer {
        &self.transformer
    }

    /// The fitted classifier.
    pub fn classifier(&self) -> &LogisticRegression {
        &self.classifier
    }

    /// Label used when a query has no in-vocabulary terms.
    pub fn fallback_label(&self) -> Label {
        self.fallback
    }

    /// Training metadata.
    pub fn metadata(&self) -> &ModelMetadata {
        &self.metadata
    }

    /// Mutable training metadata, for recording post-training metrics.
    pub fn metadata_mut(&mut self) -> &mut ModelMetadata {
        &mut self.metadata
    }

    /// Number of vocabulary terms.
    pub fn vocabulary_size(&self) -> usize {
        self.vectorizer.vocabulary_size()
    }
}
