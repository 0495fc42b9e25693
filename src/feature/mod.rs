//! Feature extraction for text classification.
//!
//! Turns normalized text into sparse TF-IDF vectors: [`CountVectorizer`]
//! builds the vocabulary and produces raw term counts, [`TfidfTransformer`]
//! reweights them by inverse document frequency and normalizes to unit
//! length.

pub mod count;
pub mod tfidf;
pub mod vector;

pub use count::CountVectorizer;
pub use tfidf::TfidfTransformer;
pub use vector::SparseVector;
