//! Sparse vector representation for bag-of-words features.

/// A sparse vector over a fixed-dimension feature space.
///
/// Stores only the nonzero components, sorted by index. Vocabulary sizes for
/// news corpora commonly run to six figures while individual articles touch
/// a few hundred terms, so the dense representation is never materialized.
#[derive(Debug, Clone, PartialEq)]
pub struct SparseVector {
    indices: Vec<usize>,
    values: Vec<f64>,
    dim: usize,
}

impl SparseVector {
    /// Create an empty vector of the given dimension.
    pub fn new(dim: usize) -> Self {
        SparseVector {
            indices: Vec::new(),
            values: Vec::new(),
            dim,
        }
    }

    /// Build a vector from (index, value) pairs.
    ///
    /// Pairs are sorted by index; zero values are dropped. Indices must be
    /// unique and less than `dim`.
    pub fn from_pairs(mut pairs: Vec<(usize, f64)>, dim: usize) -> Self {
        pairs.sort_unstable_by_key(|&(index, _)| index);
        pairs.retain(|&(_, value)| value != 0.0);

        let mut indices = Vec::with_capacity(pairs.len());
        let mut values = Vec::with_capacity(pairs.len());
        for (index, value) in pairs {
            debug_assert!(index < dim);
            debug_assert!(indices.last().is_none_or(|&last| last < index));
            indices.push(index);
            values.push(value);
        }

        SparseVector {
            indices,
            values,
            dim,
        }
    }

    /// The dimension of the feature space.
    pub fn dim(&self) -> usize {
        self.dim
    }

    /// Number of nonzero components.
    pub fn nnz(&self) -> usize {
        self.indices.len()
    }

    /// Whether the vector has no nonzero components.
    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    /// Iterate over the nonzero (index, value) components in index order.
    pub fn iter(&self) -> impl Iterator<Item = (usize, f64)> + '_ {
        self.indices
            .iter()
            .copied()
            .zip(self.values.iter().copied())
    }

    /// Dot product against a dense weight vector.
    pub fn dot(&self, dense: &[f64]) -> f64 {
        self.iter()
            .map(|(index, value)| value * dense.get(index).copied().unwrap_or(0.0))
            .sum()
    }

    /// Euclidean norm.
    pub fn norm(&self) -> f64 {
        self.values
            .iter()
            .map(|value| value * value)
            .sum::<f64>()
            .sqrt()
    }

    /// Scale all components to unit Euclidean length.
    ///
    /// The zero vector is left unchanged.
    pub fn l2_normalize(&mut self) {
        let norm = self.norm();
        if norm > 0.0 {
            for value in &mut self.values {
                *value /= norm;
            }
        }
    }
}
