//! Text normalizer for classification queries.
//!
//! [`TextNormalizer`] reduces raw article text to a canonical form: strip
//! punctuation, tokenize on word characters, lowercase, drop stop words,
//! lemmatize, then drop stop words again and rejoin with single spaces. The
//! second stop pass catches words whose lemma lands on the stop list (for
//! example "doings" lemmatizes to "doing").
//!
//! Normalization is idempotent: feeding the output back through the
//! normalizer reproduces it unchanged.
//!
//! # Examples
//!
//! ```
//! use verifact::analysis::TextNormalizer;
//!
//! let normalizer = TextNormalizer::new().unwrap();
//! let normalized = normalizer
//!     .normalize("Scientists confirm: the Earth orbits the Sun!")
//!     .unwrap();
//! assert_eq!(normalized, "scientist confirm earth orbit sun");
//! ```

use std::collections::HashSet;
use std::sync::Arc;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::analysis::token_filter::lemma::resolve_lemmatizer;
use crate::analysis::token_filter::stop::DEFAULT_ENGLISH_STOP_WORDS_SET;
use crate::analysis::token_filter::{
    Filter, LemmaFilter, Lemmatizer, LowercaseFilter, StopFilter, WordnetLemmatizer,
};
use crate::analysis::tokenizer::{RegexTokenizer, Tokenizer};
use crate::error::{Result, VerifactError};

/// Serializable snapshot of a normalizer's configuration.
///
/// Embedded in model artifacts so a loaded model normalizes queries exactly
/// as it did during training.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NormalizerState {
    /// Stop words, sorted for stable serialization.
    pub stop_words: Vec<String>,
    /// Identifier of the lemmatization algorithm.
    pub lemmatizer: String,
}

/// Text normalizer used for both training documents and inference queries.
pub struct TextNormalizer {
    /// Removes everything that is neither a word character nor whitespace.
    cleaner: Arc<Regex>,
    tokenizer: Arc<dyn Tokenizer>,
    filters: Vec<Arc<dyn Filter>>,
    stop_words: Arc<HashSet<String>>,
    lemmatizer_name: &'static str,
}

impl std::fmt::Debug for TextNormalizer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let filter_names: Vec<&str> = self.filters.iter().map(|filter| filter.name()).collect();
        f.debug_struct("TextNormalizer")
            .field("tokenizer", &self.tokenizer.name())
            .field("filters", &filter_names)
            .field("stop_words", &self.stop_words.len())
            .field("lemmatizer", &self.lemmatizer_name)
            .finish()
    }
}

impl TextNormalizer {
    /// Create a normalizer with the default English stop words and the
    /// WordNet-style noun lemmatizer.
    pub fn new() -> Result<Self> {
        Self::with_stop_words(DEFAULT_ENGLISH_STOP_WORDS_SET.clone())
    }

    /// Create a normalizer with a custom stop word set.
    pub fn with_stop_words(stop_words: HashSet<String>) -> Result<Self> {
        Self::from_parts(Arc::new(stop_words), Box::new(WordnetLemmatizer::new()))
    }

    /// Create a normalizer from a shared stop word set and a lemmatizer.
    pub fn from_parts(
        stop_words: Arc<HashSet<String>>,
        lemmatizer: Box<dyn Lemmatizer>,
    ) -> Result<Self> {
        let cleaner = Regex::new(r"[^\w\s]")
            .map_err(|e| VerifactError::analysis(format!("Invalid cleaning pattern: {e}")))?;
        let lemmatizer_name = lemmatizer.name();

        let filters: Vec<Arc<dyn Filter>> = vec![
            Arc::new(LowercaseFilter::new()),
            Arc::new(StopFilter::with_shared_stop_words(Arc::clone(&stop_words))),
            Arc::new(LemmaFilter::with_lemmatizer(lemmatizer)),
            Arc::new(StopFilter::with_shared_stop_words(Arc::clone(&stop_words))),
        ];

        Ok(TextNormalizer {
            cleaner: Arc::new(cleaner),
            tokenizer: Arc::new(RegexTokenizer::new()?),
            filters,
            stop_words,
            lemmatizer_name,
        })
    }

    /// Rebuild a normalizer from a persisted state.
    pub fn from_state(state: &NormalizerState) -> Result<Self> {
        let stop_words: HashSet<String> = state.stop_words.iter().cloned().collect();
        let lemmatizer = resolve_lemmatizer(&state.lemmatizer)?;
        Self::from_parts(Arc::new(stop_words), lemmatizer)
    }

    /// Snapshot this normalizer's configuration for persistence.
    pub fn state(&self) -> NormalizerState {
        let mut stop_words: Vec<String> = self.stop_words.iter().cloned().collect();
        stop_words.sort_unstable();
        NormalizerState {
            stop_words,
            lemmatizer: self.lemmatizer_name.to_string(),
        }
    }

    /// Normalize text to its canonical single-spaced form.
    pub fn normalize(&self, text: &str) -> Result<String> {
        let cleaned = self.cleaner.replace_all(text, "");
        let mut tokens = self.tokenizer.tokenize(&cleaned)?;
        for filter in &self.filters {
            tokens = filter.filter(tokens)?;
        }

        let words: Vec<String> = tokens
            .filter(|token| !token.is_stopped())
            .map(|token| token.text)
            .collect();
        Ok(words.join(" "))
    }

    /// Number of stop words consulted by this normalizer.
    pub fn stop_word_count(&self) -> usize {
        self.stop_words.len()
    }

    /// Identifier of the lemmatization algorithm in use.
    pub fn lemmatizer_name(&self) -> &str {
        self.lemmatizer_name
    }
}
