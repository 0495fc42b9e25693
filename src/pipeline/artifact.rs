//! Model artifact persistence.
//!
//! An artifact is a single file holding everything inference needs: the
//! normalizer configuration, vocabulary, IDF weights, classifier parameters,
//! fallback label and training metadata.
//!
//! Layout: 4 magic bytes, a little-endian `u32` format version, a
//! little-endian `u64` payload length, the bincode-encoded payload, and a
//! trailing CRC32 of the payload. Every field is validated on load and each
//! failure mode reports a distinct error.

use std::fs::{File, OpenOptions};
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::Path;

use byteorder::{LittleEndian, ReadBytesExt, WriteBytesExt};
use serde::{Deserialize, Serialize};

use crate::analysis::normalizer::{NormalizerState, TextNormalizer};
use crate::error::{Result, VerifactError};
use crate::feature::{CountVectorizer, TfidfTransformer};
use crate::model::{LogisticRegression, ModelMetadata};
use crate::pipeline::pipeline::ClassificationPipeline;
use crate::pipeline::types::Label;

/// Magic bytes identifying a Verifact model artifact.
pub const ARTIFACT_MAGIC: &[u8; 4] = b"VFMA";

/// Current artifact format version.
pub const FORMAT_VERSION: u32 = 1;

/// Bytes before the payload: magic, version, payload length.
const HEADER_LEN: u64 = 4 + 4 + 8;

/// Bytes after the payload: CRC32 checksum.
const TRAILER_LEN: u64 = 4;

/// Everything persisted for a fitted pipeline.
#[derive(Debug, Serialize, Deserialize)]
struct ArtifactPayload {
    normalizer: NormalizerState,
    vocabulary: Vec<String>,
    min_df: usize,
    idf: Vec<f64>,
    document_count: usize,
    weights: Vec<f64>,
    intercept: f64,
    fallback: Label,
    metadata: ModelMetadata,
}

impl ArtifactPayload {
    fn from_pipeline(pipeline: &ClassificationPipeline) -> Self {
        ArtifactPayload {
            normalizer: pipeline.normalizer().state(),
            vocabulary: pipeline.vectorizer().terms().to_vec(),
            min_df: pipeline.vectorizer().min_df(),
            idf: pipeline.transformer().idf().to_vec(),
            document_count: pipeline.transformer().document_count(),
            weights: pipeline.classifier().weights().to_vec(),
            intercept: pipeline.classifier().intercept(),
            fallback: pipeline.fallback_label(),
            metadata: pipeline.metadata().clone(),
        }
    }

    fn into_pipeline(self) -> Result<ClassificationPipeline> {
        let normalizer = TextNormalizer::from_state(&self.normalizer)?;
        let vectorizer = CountVectorizer::from_terms(self.vocabulary, self.min_df)?;
        let transformer = TfidfTransformer::from_parts(self.idf, self.document_count);
        let classifier = LogisticRegression::from_parts(self.weights, self.intercept);
        ClassificationPipeline::from_components(
            normalizer,
            vectorizer,
            transformer,
            classifier,
            self.fallback,
            self.metadata,
        )
    }
}

/// Write a fitted pipeline to an artifact file.
///
/// Parent directories are created as needed; an existing file at `path` is
/// replaced.
pub fn write_artifact(path: &Path, pipeline: &ClassificationPipeline) -> Result<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)?;
    }

    let payload = ArtifactPayload::from_pipeline(pipeline);
    let encoded = bincode::serde::encode_to_vec(&payload, bincode::config::standard())
        .map_err(|e| VerifactError::serialization(format!("Failed to encode model artifact: {e}")))?;

    let file = OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .open(path)?;
    let mut writer = BufWriter::new(file);

    writer.write_all(ARTIFACT_MAGIC)?;
    writer.write_u32::<LittleEndian>(FORMAT_VERSION)?;
    writer.write_u64::<LittleEndian>(encoded.len() as u64)?;
    writer.write_all(&encoded)?;
    writer.write_u32::<LittleEndian>(crc32fast::hash(&encoded))?;
    writer.flush()?;

    log::debug!(
        "Wrote model artifact to {} ({} payload bytes)",
        path.display(),
        encoded.len()
    );
    Ok(())
}

/// Read and validate a pipeline from an artifact file.
pub fn read_artifact(path: &Path) -> Result<ClassificationPipeline> {
    let file = File::open(path)?;
    let file_len = file.metadata()?.len();
    let mut reader = BufReader::new(file);

    let mut magic = [0u8; 4];
    reader
        .read_exact(&mut magic)
        .map_err(|_| VerifactError::artifact("File too short to be a model artifact"))?;
    if &magic != ARTIFACT_MAGIC {
        return Err(VerifactError::artifact(
            "Bad magic bytes: not a model artifact",
        ));
    }

    let version = reader
        .read_u32::<LittleEndian>()
        .map_err(|_| VerifactError::artifact("Truncated artifact header"))?;
    if version != FORMAT_VERSION {
        return Err(VerifactError::artifact(format!(
            "Unsupported artifact format version {version} (expected {FORMAT_VERSION})"
        )));
    }

    let payload_len = reader
        .read_u64::<LittleEndian>()
        .map_err(|_| VerifactError::artifact("Truncated artifact header"))?;
    if payload_len != file_len.saturating_sub(HEADER_LEN + TRAILER_LEN) {
        return Err(VerifactError::artifact(format!(
            "Payload length {payload_len} does not match file size {file_len}"
        )));
    }

    let mut payload = vec![0u8; payload_len as usize];
    reader
        .read_exact(&mut payload)
        .map_err(|_| VerifactError::artifact("Truncated artifact payload"))?;

    let stored = reader
        .read_u32::<LittleEndian>()
        .map_err(|_| VerifactError::artifact("Missing artifact checksum"))?;
    let computed = crc32fast::hash(&payload);
    if stored != computed {
        return Err(VerifactError::artifact(format!(
            "Checksum mismatch: stored {stored:08x}, computed {computed:08x}"
        )));
    }

    let (decoded, _): (ArtifactPayload, usize) =
        bincode::serde::decode_from_slice(&payload, bincode::config::standard()).map_err(|e| {
            VerifactError::serialization(format!("Failed to decode model artifact: {e}"))
        })?;

    decoded.into_pipeline()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::TrainParameters;
    use crate::pipeline::types::{Article, TrainingSample};

    fn fitted_pipeline() -> ClassificationPipeline {
        let samples = vec![
            TrainingSample::new(
                Article::new("Council passes budget", "Ann Lee", "The council passed the budget"),
                Label::Real,
            ),
            TrainingSample::new(
                Article::new("Court ruling upheld", "Bob Ray", "The court upheld the ruling"),
                Label::Real,
            ),
            TrainingSample::new(
                Article::new("Miracle cure found", "", "Shocking miracle cure doctors hate"),
                Label::Fake,
            ),
            TrainingSample::new(
                Article::new("Aliens spotted", "", "Exclusive shocking proof of aliens"),
                Label::Fake,
            ),
        ];
        ClassificationPipeline::fit(&samples, &TrainParameters::default()).unwrap()
    }

    #[test]
    fn test_round_trip_preserves_predictions() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("model.vfm");
        let pipeline = fitted_pipeline();
        write_artifact(&path, &pipeline).unwrap();

        let restored = read_artifact(&path).unwrap();
        assert_eq!(restored.vocabulary_size(), pipeline.vocabulary_size());
        assert_eq!(restored.fallback_label(), pipeline.fallback_label());
        assert_eq!(restored.metadata(), pipeline.metadata());

        let queries = [
            "council passed the budget",
            "shocking miracle cure",
            "completely unrelated zyzzyva",
            "",
        ];
        for query in queries {
            assert_eq!(
                pipeline.verdict(query).unwrap(),
                restored.verdict(query).unwrap()
            );
        }
    }

    #[test]
    fn test_write_creates_parent_directories() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested/deeper/model.vfm");
        write_artifact(&path, &fitted_pipeline()).unwrap();
        assert!(path.exists());
    }

    #[test]
    fn test_bad_magic_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("model.vfm");
        write_artifact(&path, &fitted_pipeline()).unwrap();

        let mut bytes = std::fs::read(&path).unwrap();
        bytes[0] = b'X';
        std::fs::write(&path, &bytes).unwrap();

        let err = read_artifact(&path).unwrap_err();
        assert!(matches!(err, VerifactError::Artifact(_)), "got {err}");
        assert!(err.to_string().contains("magic"));
    }

    #[test]
    fn test_unsupported_version_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("model.vfm");
        write_artifact(&path, &fitted_pipeline()).unwrap();

        let mut bytes = std::fs::read(&path).unwrap();
        bytes[4] = 0xFF; // low byte of the little-endian version field
        std::fs::write(&path, &bytes).unwrap();

        let err = read_artifact(&path).unwrap_err();
        assert!(err.to_string().contains("version"));
    }

    #[test]
    fn test_corrupt_payload_fails_checksum() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("model.vfm");
        write_artifact(&path, &fitted_pipeline()).unwrap();

        let mut bytes = std::fs::read(&path).unwrap();
        let payload_start = (HEADER_LEN as usize) + 10;
        bytes[payload_start] ^= 0xFF;
        std::fs::write(&path, &bytes).unwrap();

        let err = read_artifact(&path).unwrap_err();
        assert!(err.to_string().contains("Checksum mismatch"));
    }

    #[test]
    fn test_truncated_file_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("model.vfm");
        write_artifact(&path, &fitted_pipeline()).unwrap();

        let bytes = std::fs::read(&path).unwrap();
        std::fs::write(&path, &bytes[..bytes.len() / 2]).unwrap();

        assert!(read_artifact(&path).is_err());
    }

    #[test]
    fn test_not_an_artifact_at_all() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("model.vfm");
        std::fs::write(&path, b"hi").unwrap();

        let err = read_artifact(&path).unwrap_err();
        assert!(err.to_string().contains("too short"));
    }

    #[test]
    fn test_unknown_lemmatizer_in_payload_rejected() {
        let pipeline = fitted_pipeline();
        let mut payload = ArtifactPayload::from_pipeline(&pipeline);
        payload.normalizer.lemmatizer = "snowball-en/2".to_string();
        assert!(payload.into_pipeline().is_err());
    }

    #[test]
    fn test_inconsistent_dimensions_rejected() {
        let pipeline = fitted_pipeline();
        let mut payload = ArtifactPayload::from_pipeline(&pipeline);
        payload.weights.pop();
        let err = payload.into_pipeline().unwrap_err();
        assert!(err.to_string().contains("dimensions"));
    }
}
