//! Core data types for article classification.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::VerifactError;

/// Classification label for a news article.
///
/// `Real` corresponds to the numeric class 1, `Fake` to class 0.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Label {
    /// The article is judged authentic.
    Real,
    /// The article is judged fabricated.
    Fake,
}

impl Label {
    /// The label as a lowercase string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Label::Real => "real",
            Label::Fake => "fake",
        }
    }

    /// Whether this is the positive (real) class.
    pub fn is_real(&self) -> bool {
        matches!(self, Label::Real)
    }

    /// Map the positive-class flag back to a label.
    pub fn from_bool(real: bool) -> Label {
        if real { Label::Real } else { Label::Fake }
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Label {
    type Err = VerifactError;

    /// Parse a label from dataset text. Accepts `real`/`fake` in any case
    /// and the numeric forms `1`/`0`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "real" | "1" => Ok(Label::Real),
            "fake" | "0" => Ok(Label::Fake),
            other => Err(VerifactError::dataset(format!("Unknown label {other:?}"))),
        }
    }
}

/// A news article as submitted for classification.
///
/// Any of the fields may be empty; classification treats missing fields as
/// empty text.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Article {
    /// Article headline.
    #[serde(default)]
    pub title: String,
    /// Byline author.
    #[serde(default)]
    pub author: String,
    /// Body text.
    #[serde(default)]
    pub text: String,
}

impl Article {
    /// Create an article from its three fields.
    pub fn new(
        title: impl Into<String>,
        author: impl Into<String>,
        text: impl Into<String>,
    ) -> Self {
        Article {
            title: title.into(),
            author: author.into(),
            text: text.into(),
        }
    }
}

/// A labeled article used for training and evaluation.
#[derive(Debug, Clone, PartialEq)]
pub struct TrainingSample {
    /// The article content.
    pub article: Article,
    /// Ground-truth label.
    pub label: Label,
}

impl TrainingSample {
    /// Create a labeled sample.
    pub fn new(article: Article, label: Label) -> Self {
        TrainingSample { article, label }
    }
}

/// The outcome of classifying one article.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Verdict {
    /// Predicted label.
    pub label: Label,
    /// Signed distance from the decision boundary; positive values favor
    /// `Real`. Zero when the fallback label was used.
    pub score: f64,
}
