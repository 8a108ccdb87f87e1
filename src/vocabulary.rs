//! # Vocabulary Module
//!
//! The curated word lists that drive every recognizer in this crate live in a
//! single content asset (`data/vocabulary.json`) rather than in code. The
//! built-in copy is embedded at compile time; an edited copy can be loaded
//! from disk and injected into any component.
//!
//! ## Contents
//!
//! - Unit words stripped by the normalizer and recognized by the scaler
//! - Named fractions ("חצי", "רבע", "שליש")
//! - One profile per diet: badge metadata, non-conforming entries, substitutions
//! - Advanced-technique keywords for the difficulty classifier
//! - Timer words and modifiers for the timer extractor

use crate::diet_matcher::Diet;
use crate::vocabulary_errors::VocabularyError;
use lazy_static::lazy_static;
use log::{debug, info};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

/// Raw JSON of the vocabulary shipped with the crate
pub const BUILTIN_VOCABULARY_JSON: &str = include_str!("../data/vocabulary.json");

lazy_static! {
    static ref BUILTIN_VOCABULARY: Vocabulary = Vocabulary::from_json_str(BUILTIN_VOCABULARY_JSON)
        .expect("Built-in vocabulary should be valid");
}

/// Badge metadata and curated lists for one diet
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DietProfile {
    /// Which diet this profile describes
    pub diet: Diet,
    /// Display label (e.g. "טבעוני")
    pub label: String,
    /// Badge emoji
    pub emoji: String,
    /// Badge color name used by the presentation layer
    pub color: String,
    /// Entries that violate the diet, in match-priority order
    pub non_conforming: Vec<String>,
    /// Known replacement for a non-conforming entry
    #[serde(default)]
    pub substitutions: BTreeMap<String, String>,
}

impl DietProfile {
    /// Look up the replacement suggested for a non-conforming entry
    pub fn substitution_for(&self, entry: &str) -> Option<&str> {
        self.substitutions.get(entry).map(String::as_str)
    }
}

/// Words recognized by the timer extractor
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TimerVocabulary {
    /// Unit words following a number of minutes ("10 דקות")
    #[serde(default)]
    pub minute_units: Vec<String>,
    /// Unit words following a number of hours ("2 שעות")
    #[serde(default)]
    pub hour_units: Vec<String>,
    /// Fixed phrases meaning fifteen minutes
    #[serde(default)]
    pub quarter_hour_phrases: Vec<String>,
    /// Fixed phrases meaning thirty minutes
    #[serde(default)]
    pub half_hour_phrases: Vec<String>,
    /// Standalone words meaning one hour
    #[serde(default)]
    pub bare_hour_words: Vec<String>,
    /// Standalone words meaning one minute
    #[serde(default)]
    pub bare_minute_words: Vec<String>,
    /// Words that, directly before a bare word, make it part of another phrase
    #[serde(default)]
    pub modifiers: Vec<String>,
}

/// The complete curated vocabulary
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Vocabulary {
    /// Unit words (cup, spoon, gram, ... in every recognized form)
    pub units: Vec<String>,
    /// Word fractions and their numeric value
    #[serde(default)]
    pub named_fractions: BTreeMap<String, f64>,
    /// One profile per supported diet
    pub diets: Vec<DietProfile>,
    /// Keywords marking an advanced cooking technique
    #[serde(default)]
    pub advanced_techniques: Vec<String>,
    /// Timer recognition words
    #[serde(default)]
    pub timers: TimerVocabulary,
}

impl Vocabulary {
    /// The vocabulary embedded in the crate
    pub fn builtin() -> &'static Vocabulary {
        &BUILTIN_VOCABULARY
    }

    /// Parse and validate a vocabulary from JSON text
    pub fn from_json_str(json: &str) -> Result<Self, VocabularyError> {
        let vocabulary: Vocabulary = serde_json::from_str(json)?;
        vocabulary.validate()?;
        debug!(
            "Parsed vocabulary: {} units, {} diets, {} technique keywords",
            vocabulary.units.len(),
            vocabulary.diets.len(),
            vocabulary.advanced_techniques.len()
        );
        Ok(vocabulary)
    }

    /// Read, parse and validate a vocabulary file
    ///
    /// # Examples
    ///
    /// ```rust,no_run
    /// use recipe_insights::vocabulary::Vocabulary;
    ///
    /// let vocabulary = Vocabulary::load_from_path("data/vocabulary.json")?;
    /// assert_eq!(vocabulary.diets.len(), 3);
    /// # Ok::<(), recipe_insights::vocabulary_errors::VocabularyError>(())
    /// ```
    pub fn load_from_path<P: AsRef<Path>>(path: P) -> Result<Self, VocabularyError> {
        let path = path.as_ref();
        info!("Loading vocabulary from {}", path.display());
        let content = fs::read_to_string(path)?;
        Self::from_json_str(&content)
    }

    /// Profile for a diet, if present
    pub fn diet_profile(&self, diet: Diet) -> Option<&DietProfile> {
        self.diets.iter().find(|profile| profile.diet == diet)
    }

    /// Check the consistency rules every loaded vocabulary must satisfy
    pub fn validate(&self) -> Result<(), VocabularyError> {
        if self.units.iter().any(|unit| unit.trim().is_empty()) {
            return Err(VocabularyError::Invalid("blank unit word".to_string()));
        }

        for (word, value) in &self.named_fractions {
            if word.trim().is_empty() || !value.is_finite() || *value <= 0.0 {
                return Err(VocabularyError::Invalid(format!(
                    "named fraction '{word}' must be a non-blank word with a positive value"
                )));
            }
        }

        for diet in Diet::ALL {
            let count = self.diets.iter().filter(|p| p.diet == diet).count();
            if count != 1 {
                return Err(VocabularyError::Invalid(format!(
                    "diet '{}' must appear exactly once, found {count}",
                    diet.as_str()
                )));
            }
        }

        for profile in &self.diets {
            if profile.non_conforming.iter().any(|e| e.trim().is_empty()) {
                return Err(VocabularyError::Invalid(format!(
                    "blank non-conforming entry for diet '{}'",
                    profile.diet.as_str()
                )));
            }
            for key in profile.substitutions.keys() {
                if !profile.non_conforming.contains(key) {
                    return Err(VocabularyError::Invalid(format!(
                        "substitution key '{key}' is not a non-conforming entry of diet '{}'",
                        profile.diet.as_str()
                    )));
                }
            }
        }

        if self.advanced_techniques.iter().any(|k| k.trim().is_empty()) {
            return Err(VocabularyError::Invalid(
                "blank advanced-technique keyword".to_string(),
            ));
        }

        let timers = &self.timers;
        let timer_words = timers
            .minute_units
            .iter()
            .chain(&timers.hour_units)
            .chain(&timers.quarter_hour_phrases)
            .chain(&timers.half_hour_phrases)
            .chain(&timers.bare_hour_words)
            .chain(&timers.bare_minute_words)
            .chain(&timers.modifiers);
        for word in timer_words {
            if word.trim().is_empty() {
                return Err(VocabularyError::Invalid("blank timer word".to_string()));
            }
        }

        Ok(())
    }
}

/// Build a regex alternation from a word list, longest word first
///
/// Returns `None` for an empty list so callers never compile a pattern that
/// matches the empty string.
///
/// Each word that ends in a letter or digit must also end on a word
/// boundary, so "כוס" never matches the start of "כוסמין".
pub(crate) fn word_alternation<S: AsRef<str>>(words: &[S]) -> Option<String> {
    build_alternation(words, true)
}

fn build_alternation<S: AsRef<str>>(words: &[S], bounded: bool) -> Option<String> {
    if words.is_empty() {
        return None;
    }
    let mut sorted: Vec<&str> = Vec::with_capacity(words.len());
    for word in words.iter().map(|w| w.as_ref().trim()) {
        if !sorted.contains(&word) {
            sorted.push(word);
        }
    }
    sorted.sort_by(|a, b| b.chars().count().cmp(&a.chars().count()));
    let escaped: Vec<String> = sorted
        .into_iter()
        .map(|word| {
            let ends_in_word_char = word.chars().last().is_some_and(char::is_alphanumeric);
            if bounded && ends_in_word_char {
                format!(r"{}\b", regex::escape(word))
            } else {
                regex::escape(word)
            }
        })
        .collect();
    Some(escaped.join("|"))
}
