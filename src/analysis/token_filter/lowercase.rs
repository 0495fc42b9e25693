//! Lowercase token filter.
//!
//! Case carries no signal the classifier wants to learn ("BREAKING" and
//! "breaking" should land in the same vocabulary slot), so this runs first
//! in the filter chain. It also puts tokens in the form the stop word set
//! and the lemmatizer expect, both of which match lowercase entries only.
//!
//! # Examples
//!
//! ```
//! use verifact::analysis::token::Token;
//! use verifact::analysis::token_filter::Filter;
//! use verifact::analysis::token_filter::lowercase::LowercaseFilter;
//!
//! let filter = LowercaseFilter::new();
//! let tokens = vec![Token::new("BREAKING", 0), Token::new("News", 1)];
//! let lowered: Vec<_> = filter.filter(Box::new(tokens.into_iter()))
//!     .unwrap()
//!     .collect();
//!
//! assert_eq!(lowered[0].text, "breaking");
//! assert_eq!(lowered[1].text, "news");
//! ```

use crate::analysis::token::TokenStream;
use crate::analysis::token_filter::Filter;
use crate::error::Result;

/// Filter that rewrites every live token to its Unicode lowercase form.
///
/// Stopped tokens pass through untouched.
#[derive(Clone, Debug, Default)]
pub struct LowercaseFilter;

impl LowercaseFilter {
    /// Create a new lowercase filter.
    pub fn new() -> Self {
        LowercaseFilter
    }
}

impl Filter for LowercaseFilter {
    fn filter(&self, tokens: TokenStream) -> Result<TokenStream> {
        let filtered_tokens = tokens
            .map(|token| {
                if token.is_stopped() {
                    token
                } else {
                    let lowered = token.text.to_lowercase();
                    token.with_text(lowered)
                }
            })
            .collect::<Vec<_>>();

        Ok(Box::new(filtered_tokens.into_iter()))
    }

    fn name(&self) -> &'static str {
        "lowercase"
    }
}
