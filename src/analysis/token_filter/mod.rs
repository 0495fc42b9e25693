//! Filters applied to the token stream between tokenization and feature
//! extraction.
//!
//! The normalizer chains these in a fixed order: lowercase, stop word
//! removal, lemmatization, then stop word removal again for lemmas that
//! collapse onto a stop word.

use crate::analysis::token::TokenStream;
use crate::error::Result;

/// A transformation over a token stream.
///
/// Filters may rewrite, drop, or mark tokens; they never split or merge
/// them.
pub trait Filter: Send + Sync {
    /// Apply this filter to a token stream.
    fn filter(&self, tokens: TokenStream) -> Result<TokenStream>;

    /// Short identifier used in debug output.
    fn name(&self) -> &'static str;
}

pub mod lemma;
pub mod lowercase;
pub mod stop;

pub use lemma::{IdentityLemmatizer, LemmaFilter, Lemmatizer, WordnetLemmatizer};
pub use lowercase::LowercaseFilter;
pub use stop::StopFilter;
