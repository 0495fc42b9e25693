//! Lemmatization token filter and lemmatizer implementations.

use super::Filter;
use crate::analysis::token::TokenStream;
use crate::error::{Result, VerifactError};

/// Trait for lemmatization algorithms.
pub trait Lemmatizer: Send + Sync {
    /// Reduce a word to its dictionary form.
    ///
    /// Implementations must be idempotent: `lemma(lemma(w)) == lemma(w)`.
    fn lemma(&self, word: &str) -> String;

    /// Get the identifier of this lemmatizer.
    ///
    /// The identifier is recorded in model artifacts; loading an artifact
    /// fails when it names an identifier this build cannot resolve.
    fn name(&self) -> &'static str;
}

// Lemmatizer implementations
pub mod identity;
pub mod wordnet;

// Re-export lemmatizers
pub use identity::IdentityLemmatizer;
pub use wordnet::WordnetLemmatizer;

/// Resolve a lemmatizer by its identifier.
pub fn resolve_lemmatizer(name: &str) -> Result<Box<dyn Lemmatizer>> {
    match name {
        wordnet::WORDNET_LEMMATIZER_NAME => Ok(Box::new(WordnetLemmatizer::new())),
        identity::IDENTITY_LEMMATIZER_NAME => Ok(Box::new(IdentityLemmatizer::new())),
        other => Err(VerifactError::analysis(format!(
            "Unknown lemmatizer: {other}"
        ))),
    }
}

/// Filter that applies lemmatization to tokens.
pub struct LemmaFilter {
    /// The lemmatizer to use.
    lemmatizer: Box<dyn Lemmatizer>,
}

impl std::fmt::Debug for LemmaFilter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LemmaFilter")
            .field("lemmatizer", &self.lemmatizer.name())
            .finish()
    }
}

impl LemmaFilter {
    /// Create a new lemma filter with the WordNet-style noun lemmatizer.
    pub fn new() -> Self {
        LemmaFilter {
            lemmatizer: Box::new(WordnetLemmatizer::new()),
        }
    }

    /// Create a lemma filter with a custom lemmatizer.
    pub fn with_lemmatizer(lemmatizer: Box<dyn Lemmatizer>) -> Self {
        LemmaFilter { lemmatizer }
    }

    /// Get the identifier of the wrapped lemmatizer.
    pub fn lemmatizer_name(&self) -> &'static str {
        self.lemmatizer.name()
    }
}

impl Default for LemmaFilter {
    fn default() -> Self {
        Self::new()
    }
}

impl Filter for LemmaFilter {
    fn filter(&self, tokens: TokenStream) -> Result<TokenStream> {
        let filtered_tokens = tokens
            .map(|token| {
                if token.is_stopped() {
                    token
                } else {
                    let lemma = self.lemmatizer.lemma(&token.text);
                    token.with_text(lemma)
                }
            })
            .collect::<Vec<_>>();

        Ok(Box::new(filtered_tokens.into_iter()))
    }

    fn name(&self) -> &'static str {
        "lemma"
    }
}
