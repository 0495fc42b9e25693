//! The token unit flowing through the normalization pipeline.

use std::fmt;

/// One word of an article, as produced by the tokenizer.
///
/// Filters transform tokens rather than strings so that per-token state
/// survives the whole chain: the stop filter can mark a token `stopped`
/// instead of dropping it, and later filters skip marked tokens.
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    /// The text content of the token.
    pub text: String,

    /// Position in the token stream (0-based).
    pub position: usize,

    /// Whether a filter has marked this token for removal.
    pub stopped: bool,
}

impl Token {
    /// Create a token at the given stream position.
    pub fn new<S: Into<String>>(text: S, position: usize) -> Self {
        Token {
            text: text.into(),
            position,
            stopped: false,
        }
    }

    /// Copy this token with its text replaced, keeping position and state.
    pub fn with_text<S: Into<String>>(&self, text: S) -> Self {
        Token {
            text: text.into(),
            ..self.clone()
        }
    }

    /// Mark this token as stopped.
    pub fn stop(mut self) -> Self {
        self.stopped = true;
        self
    }

    /// Whether a filter has marked this token as stopped.
    pub fn is_stopped(&self) -> bool {
        self.stopped
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.text)
    }
}

/// A stream of tokens moving between pipeline stages.
pub type TokenStream = Box<dyn Iterator<Item = Token>>;
