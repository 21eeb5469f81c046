//! Text value objects handed to the presentation layer.
//!
//! Text is authored with a `{{WALLET_NAME}}` placeholder and stored
//! verbatim; substitution and localization happen downstream.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Placeholder substituted with the wallet's display name when rendered.
pub const WALLET_NAME_PLACEHOLDER: &str = "{{WALLET_NAME}}";

/// A single human-readable sentence.
///
/// Whitespace runs are collapsed so sentences can be written as indented
/// multi-line literals.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Sentence(String);

impl Sentence {
    /// Build a sentence, collapsing whitespace.
    pub fn new(text: impl AsRef<str>) -> Self {
        Self(text.as_ref().split_whitespace().collect::<Vec<_>>().join(" "))
    }

    /// Raw text, placeholders included.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Substitute the wallet-name placeholder.
    pub fn render(&self, placeholder: &str, wallet_name: &str) -> String {
        self.0.replace(placeholder, wallet_name)
    }
}

impl fmt::Display for Sentence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Sentence {
    fn from(text: &str) -> Self {
        Self::new(text)
    }
}

impl From<String> for Sentence {
    fn from(text: String) -> Self {
        Self::new(text)
    }
}

/// Multi-paragraph markdown text.
///
/// Leading indentation is stripped line by line; blank lines are kept as
/// paragraph separators.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Markdown(String);

impl Markdown {
    pub fn new(text: impl AsRef<str>) -> Self {
        let lines: Vec<&str> = text.as_ref().lines().map(str::trim).collect();
        Self(lines.join("\n").trim().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Substitute the wallet-name placeholder.
    pub fn render(&self, placeholder: &str, wallet_name: &str) -> String {
        self.0.replace(placeholder, wallet_name)
    }
}

impl fmt::Display for Markdown {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
