//! # Vocabulary Error Types Module
//!
//! This module defines the error type returned when a curated vocabulary asset
//! cannot be loaded, parsed, validated, or compiled into matching patterns.
//! The analysis operations themselves are total and never produce these errors.

/// Custom error types for vocabulary loading
#[derive(Debug, Clone, PartialEq)]
pub enum VocabularyError {
    /// The vocabulary file could not be read
    Io(String),
    /// The vocabulary file is not valid JSON for the expected schema
    Parse(String),
    /// The vocabulary content violates a consistency rule
    Invalid(String),
    /// A pattern derived from the vocabulary failed to compile
    Pattern(String),
}

impl std::fmt::Display for VocabularyError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            VocabularyError::Io(msg) => write!(f, "Vocabulary read error: {msg}"),
            VocabularyError::Parse(msg) => write!(f, "Vocabulary parse error: {msg}"),
            VocabularyError::Invalid(msg) => write!(f, "Invalid vocabulary: {msg}"),
            VocabularyError::Pattern(msg) => write!(f, "Vocabulary pattern error: {msg}"),
        }
    }
}

impl std::error::Error for VocabularyError {}

impl From<std::io::Error> for VocabularyError {
    fn from(err: std::io::Error) -> Self {
        VocabularyError::Io(err.to_string())
    }
}

impl From<serde_json::Error> for VocabularyError {
    fn from(err: serde_json::Error) -> Self {
        VocabularyError::Parse(err.to_string())
    }
}

impl From<regex::Error> for VocabularyError {
    fn from(err: regex::Error) -> Self {
        VocabularyError::Pattern(err.to_string())
    }
}
