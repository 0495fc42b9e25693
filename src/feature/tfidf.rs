//! TF-IDF weighting over term-count vectors.

use crate::error::{Result, VerifactError};
use crate::feature::vector::SparseVector;

/// Reweights term counts by smoothed inverse document frequency and
/// normalizes each vector to unit Euclidean length.
///
/// The IDF formula is the smoothed variant `ln((1 + n) / (1 + df)) + 1`,
/// which keeps every weight positive and behaves as if one extra document
/// containing every term had been observed.
#[derive(Debug, Clone)]
pub struct TfidfTransformer {
    idf: Vec<f64>,
    document_count: usize,
}

impl TfidfTransformer {
    /// Create an unfitted transformer.
    pub fn new() -> Self {
        TfidfTransformer {
            idf: Vec::new(),
            document_count: 0,
        }
    }

    /// Rebuild a fitted transformer from persisted IDF weights.
    pub fn from_parts(idf: Vec<f64>, document_count: usize) -> Self {
        TfidfTransformer {
            idf,
            document_count,
        }
    }

    /// Learn IDF weights from a set of term-count vectors.
    pub fn fit(&mut self, vectors: &[SparseVector]) -> Result<()> {
        let Some(first) = vectors.first() else {
            return Err(VerifactError::model(
                "Cannot fit IDF weights on an empty document set",
            ));
        };

        let dim = first.dim();
        let mut document_frequency = vec![0usize; dim];
        for vector in vectors {
            if vector.dim() != dim {
                return Err(VerifactError::model(format!(
                    "Dimension mismatch during IDF fit: expected {dim}, got {}",
                    vector.dim()
                )));
            }
            for (index, _) in vector.iter() {
                document_frequency[index] += 1;
            }
        }

        let n = vectors.len() as f64;
        self.idf = document_frequency
            .iter()
            .map(|&df| ((1.0 + n) / (1.0 + df as f64)).ln() + 1.0)
            .collect();
        self.document_count = vectors.len();
        Ok(())
    }

    /// Apply IDF weighting and length normalization to a count vector.
    ///
    /// A vector with no nonzero components passes through unchanged.
    pub fn transform(&self, vector: &SparseVector) -> Result<SparseVector> {
        if !self.is_fitted() {
            return Err(VerifactError::model("Transformer has not been fitted"));
        }
        if vector.dim() != self.idf.len() {
            return Err(VerifactError::model(format!(
                "Dimension mismatch: transformer expects {}, got {}",
                self.idf.len(),
                vector.dim()
            )));
        }

        let pairs: Vec<(usize, f64)> = vector
            .iter()
            .map(|(index, value)| (index, value * self.idf[index]))
            .collect();
        let mut weighted = SparseVector::from_pairs(pairs, vector.dim());
        weighted.l2_normalize();
        Ok(weighted)
    }

    /// Whether IDF weights have been learned.
    pub fn is_fitted(&self) -> bool {
        !self.idf.is_empty()
    }

    /// The learned IDF weights, indexed by vocabulary position.
    pub fn idf(&self) -> &[f64] {
        &self.idf
    }

    /// Number of documents the weights were learned from.
    pub fn document_count(&self) -> usize {
        self.document_count
    }
}

impl Default for TfidfTransformer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn count_vector(pairs: &[(usize, f64)], dim: usize) -> SparseVector {
        SparseVector::from_pairs(pairs.to_vec(), dim)
    }

    #[test]
    fn test_smoothed_idf_values() {
        let mut transformer = TfidfTransformer::new();
        // Term 0 in both documents, term 1 in one document only.
        let vectors = vec![
            count_vector(&[(0, 1.0), (1, 1.0)], 2),
            count_vector(&[(0, 2.0)], 2),
        ];
        transformer.fit(&vectors).unwrap();

        let idf = transformer.idf();
        assert!((idf[0] - 1.0).abs() < 1e-12); // ln(3/3) + 1
        assert!((idf[1] - ((3.0f64 / 2.0).ln() + 1.0)).abs() < 1e-12);
    }

    #[test]
    fn test_unseen_term_gets_highest_idf() {
        let mut transformer = TfidfTransformer::new();
        let vectors = vec![count_vector(&[(0, 1.0)], 2)];
        transformer.fit(&vectors).unwrap();

        // Term 1 appears in no document; smoothing keeps the weight finite.
        let idf = transformer.idf();
        assert!(idf[1] > idf[0]);
        assert!((idf[1] - (2.0f64.ln() + 1.0)).abs() < 1e-12);
    }

    #[test]
    fn test_transform_normalizes_to_unit_length() {
        let mut transformer = TfidfTransformer::new();
        let vectors = vec![
            count_vector(&[(0, 1.0), (1, 1.0)], 2),
            count_vector(&[(0, 1.0)], 2),
        ];
        transformer.fit(&vectors).unwrap();

        let weighted = transformer
            .transform(&count_vector(&[(0, 3.0), (1, 1.0)], 2))
            .unwrap();
        assert!((weighted.norm() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_transform_zero_vector_unchanged() {
        let mut transformer = TfidfTransformer::new();
        transformer
            .fit(&[count_vector(&[(0, 1.0)], 3)])
            .unwrap();

        let weighted = transformer.transform(&SparseVector::new(3)).unwrap();
        assert!(weighted.is_empty());
    }

    #[test]
    fn test_fit_empty_set_is_an_error() {
        let mut transformer = TfidfTransformer::new();
        assert!(transformer.fit(&[]).is_err());
    }

    #[test]
    fn test_dimension_mismatch_is_an_error() {
        let mut transformer = TfidfTransformer::new();
        transformer.fit(&[count_vector(&[(0, 1.0)], 2)]).unwrap();
        assert!(transformer.transform(&SparseVector::new(5)).is_err());
    }
}
