//! Splitting raw article text into tokens.

use crate::analysis::token::TokenStream;
use crate::error::Result;

/// Turns a string into a stream of [`Token`](crate::analysis::token::Token)s.
///
/// Implementations decide what counts as a token boundary; everything
/// downstream of this trait works on tokens only.
pub trait Tokenizer: Send + Sync {
    /// Tokenize the given text into a stream of tokens.
    fn tokenize(&self, text: &str) -> Result<TokenStream>;

    /// Short identifier used in debug output.
    fn name(&self) -> &'static str;
}

pub mod regex;

pub use regex::RegexTokenizer;
