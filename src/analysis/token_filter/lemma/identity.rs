//! Identity lemmatizer that returns words unchanged.

use super::Lemmatizer;

/// Identifier recorded in model artifacts for this algorithm.
pub const IDENTITY_LEMMATIZER_NAME: &str = "identity";

/// A lemmatizer that performs no transformation.
///
/// Useful for pipelines that want surface forms preserved, and as the
/// algorithm recorded by artifacts trained without lemmatization.
#[derive(Clone, Debug, Default)]
pub struct IdentityLemmatizer;

impl IdentityLemmatizer {
    /// Create a new identity lemmatizer.
    pub fn new() -> Self {
        IdentityLemmatizer
    }
}

impl Lemmatizer for IdentityLemmatizer {
    fn lemma(&self, word: &str) -> String {
        word.to_string()
    }

    fn name(&self) -> &'static str {
        IDENTITY_LEMMATIZER_NAME
    }
}
