//! Text analysis module for Verifact.
//!
//! This module provides the text normalization pipeline used for training and
//! inference: tokenization, token filtering, and the composed normalizer.

pub mod normalizer;
pub mod token;
pub mod token_filter;
pub mod tokenizer;

// Re-export commonly used types
pub use normalizer::*;
pub use token::*;
pub use token_filter::*;
pub use tokenizer::*;
