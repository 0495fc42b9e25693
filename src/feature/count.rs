//! Vocabulary construction and term counting.

use ahash::{AHashMap, AHashSet};

use crate::analysis::tokenizer::{RegexTokenizer, Tokenizer};
use crate::error::{Result, VerifactError};
use crate::feature::vector::SparseVector;

/// Token pattern for vocabulary terms: two or more word characters.
///
/// Single-character tokens carry almost no signal and would otherwise
/// dominate the low end of the vocabulary.
pub const TOKEN_PATTERN: &str = r"\b\w\w+\b";

/// Builds a vocabulary over normalized documents and maps documents to
/// sparse term-count vectors.
///
/// The vocabulary assigns indices in lexicographic term order, so identical
/// training corpora always produce identical vocabularies. Terms seen at
/// transform time that were not in the training vocabulary are ignored.
#[derive(Debug, Clone)]
pub struct CountVectorizer {
    vocabulary: AHashMap<String, usize>,
    terms: Vec<String>,
    min_df: usize,
    tokenizer: RegexTokenizer,
}

impl CountVectorizer {
    /// Create an unfitted vectorizer keeping every observed term.
    pub fn new() -> Result<Self> {
        Self::with_min_df(1)
    }

    /// Create an unfitted vectorizer that drops terms appearing in fewer
    /// than `min_df` documents.
    pub fn with_min_df(min_df: usize) -> Result<Self> {
        Ok(CountVectorizer {
            vocabulary: AHashMap::new(),
            terms: Vec::new(),
            min_df: min_df.max(1),
            tokenizer: RegexTokenizer::with_pattern(TOKEN_PATTERN)?,
        })
    }

    /// Rebuild a fitted vectorizer from a persisted term list.
    ///
    /// `terms` must be in vocabulary index order.
    pub fn from_terms(terms: Vec<String>, min_df: usize) -> Result<Self> {
        let vocabulary: AHashMap<String, usize> = terms
            .iter()
            .enumerate()
            .map(|(index, term)| (term.clone(), index))
            .collect();
        if vocabulary.len() != terms.len() {
            return Err(VerifactError::model("Vocabulary contains duplicate terms"));
        }

        Ok(CountVectorizer {
            vocabulary,
            terms,
            min_df: min_df.max(1),
            tokenizer: RegexTokenizer::with_pattern(TOKEN_PATTERN)?,
        })
    }

    /// Learn the vocabulary from a set of documents.
    pub fn fit(&mut self, documents: &[String]) -> Result<()> {
        let mut document_frequency: AHashMap<String, usize> = AHashMap::new();

        for document in documents {
            let tokens = self.tokenizer.tokenize(document)?;
            let unique: AHashSet<String> = tokens.map(|token| token.text).collect();
            for term in unique {
                *document_frequency.entry(term).or_insert(0) += 1;
            }
        }

        let mut terms: Vec<String> = document_frequency
            .into_iter()
            .filter(|(_, df)| *df >= self.min_df)
            .map(|(term, _)| term)
            .collect();
        terms.sort_unstable();

        if terms.is_empty() {
            return Err(VerifactError::model(format!(
                "Empty vocabulary: no term appears in at least {} document(s)",
                self.min_df
            )));
        }

        self.vocabulary = terms
            .iter()
            .enumerate()
            .map(|(index, term)| (term.clone(), index))
            .collect();
        self.terms = terms;
        Ok(())
    }

    /// Map a document to its sparse term-count vector.
    pub fn transform(&self, document: &str) -> Result<SparseVector> {
        if !self.is_fitted() {
            return Err(VerifactError::model("Vectorizer has not been fitted"));
        }

        let mut counts: AHashMap<usize, usize> = AHashMap::new();
        let tokens = self.tokenizer.tokenize(document)?;
        for token in tokens {
            if let Some(&index) = self.vocabulary.get(token.text.as_str()) {
                *counts.entry(index).or_insert(0) += 1;
            }
        }

        let pairs: Vec<(usize, f64)> = counts
            .into_iter()
            .map(|(index, count)| (index, count as f64))
            .collect();
        Ok(SparseVector::from_pairs(pairs, self.terms.len()))
    }

    /// Whether the vocabulary has been learned.
    pub fn is_fitted(&self) -> bool {
        !self.terms.is_empty()
    }

    /// Number of terms in the vocabulary.
    pub fn vocabulary_size(&self) -> usize {
        self.terms.len()
    }

    /// Vocabulary terms in index order.
    pub fn terms(&self) -> &[String] {
        &self.terms
    }

    /// The document-frequency floor applied during fitting.
    pub fn min_df(&self) -> usize {
        self.min_df
    }

    /// Look up a term's vocabulary index.
    pub fn term_index(&self, term: &str) -> Option<usize> {
        self.vocabulary.get(term).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn documents(texts: &[&str]) -> Vec<String> {
        texts.iter().map(|text| text.to_string()).collect()
    }

    #[test]
    fn test_fit_sorts_vocabulary() {
        let mut vectorizer = CountVectorizer::new().unwrap();
        vectorizer
            .fit(&documents(&["zebra apple", "apple mango"]))
            .unwrap();

        assert_eq!(vectorizer.terms(), &["apple", "mango", "zebra"]);
        assert_eq!(vectorizer.term_index("apple"), Some(0));
        assert_eq!(vectorizer.term_index("zebra"), Some(2));
    }

    #[test]
    fn test_single_character_tokens_excluded() {
        let mut vectorizer = CountVectorizer::new().unwrap();
        vectorizer.fit(&documents(&["a b word x yz"])).unwrap();
        assert_eq!(vectorizer.terms(), &["word", "yz"]);
    }

    #[test]
    fn test_transform_counts_and_ignores_unknown() {
        let mut vectorizer = CountVectorizer::new().unwrap();
        vectorizer
            .fit(&documents(&["apple banana", "banana cherry"]))
            .unwrap();

        let vector = vectorizer
            .transform("banana banana durian apple")
            .unwrap();
        let components: Vec<(usize, f64)> = vector.iter().collect();
        // apple=0, banana=1, cherry=2; durian is out of vocabulary
        assert_eq!(components, vec![(0, 1.0), (1, 2.0)]);
        assert_eq!(vector.dim(), 3);
    }

    #[test]
    fn test_transform_out_of_vocabulary_only() {
        let mut vectorizer = CountVectorizer::new().unwrap();
        vectorizer.fit(&documents(&["apple banana"])).unwrap();

        let vector = vectorizer.transform("durian elderberry").unwrap();
        assert!(vector.is_empty());
        assert_eq!(vector.dim(), 2);
    }

    #[test]
    fn test_min_df_prunes_rare_terms() {
        let mut vectorizer = CountVectorizer::with_min_df(2).unwrap();
        vectorizer
            .fit(&documents(&["apple banana", "apple cherry", "apple banana date"]))
            .unwrap();
        assert_eq!(vectorizer.terms(), &["apple", "banana"]);
    }

    #[test]
    fn test_empty_vocabulary_is_an_error() {
        let mut vectorizer = CountVectorizer::new().unwrap();
        assert!(vectorizer.fit(&documents(&["a b c", ""])).is_err());
    }

    #[test]
    fn test_transform_before_fit_is_an_error() {
        let vectorizer = CountVectorizer::new().unwrap();
        assert!(vectorizer.transform("anything").is_err());
    }

    #[test]
    fn test_from_terms_round_trip() {
        let mut vectorizer = CountVectorizer::new().unwrap();
        vectorizer
            .fit(&documents(&["apple banana", "banana cherry"]))
            .unwrap();

        let rebuilt =
            CountVectorizer::from_terms(vectorizer.terms().to_vec(), vectorizer.min_df()).unwrap();
        assert_eq!(
            vectorizer.transform("banana apple").unwrap(),
            rebuilt.transform("banana apple").unwrap()
        );
    }
}
