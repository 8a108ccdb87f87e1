//! # Ingredient Normalizer
//!
//! Reduces an ingredient display line to the bare, case-folded name used for
//! matching against curated lists: "2 כוסות קמח" becomes "קמח".
//!
//! ## Rules
//!
//! - A leading run of digits, `.`, `,`, `/`, and the glyphs ½ ¼ ¾ is removed
//!   ("1/2", "1 1/2" and "1½" all count as one quantity)
//! - A recognized unit word directly after that run is removed as well
//! - The remainder is lowercased and trimmed
//! - When the line is nothing but quantity and unit ("4 ביצים"), the unit
//!   word itself is the name
//!
//! Stripping is repeated until no prefix matches, which makes
//! `normalize(normalize(s)) == normalize(s)` hold for every input.

use crate::vocabulary::{word_alternation, Vocabulary};
use crate::vocabulary_errors::VocabularyError;
use lazy_static::lazy_static;
use log::{info, trace};
use regex::Regex;

/// Characters that can open a quantity run
const QUANTITY_START: &str = r"[\d.,½¼¾]";
/// Characters allowed in the rest of a quantity run
const QUANTITY_RUN: &str = r"[\d.,½¼¾/⁄]";

lazy_static! {
    static ref DEFAULT_NORMALIZER: IngredientNormalizer =
        IngredientNormalizer::new(Vocabulary::builtin())
            .expect("Built-in unit vocabulary should compile");
}

/// Strips quantity/unit prefixes from ingredient lines
#[derive(Debug, Clone)]
pub struct IngredientNormalizer {
    /// Compiled `quantity-run [unit]` prefix pattern
    prefix: Regex,
}

impl IngredientNormalizer {
    /// Build a normalizer recognizing the unit words of `vocabulary`
    pub fn new(vocabulary: &Vocabulary) -> Result<Self, VocabularyError> {
        let pattern = match word_alternation(&vocabulary.units) {
            Some(units) => format!(
                r"(?i)^\s*{QUANTITY_START}(?:{QUANTITY_RUN}|\s)*(?:(?P<unit>{units}))?"
            ),
            None => format!(r"^\s*{QUANTITY_START}(?:{QUANTITY_RUN}|\s)*"),
        };
        info!(
            "Creating IngredientNormalizer with {} unit words",
            vocabulary.units.len()
        );
        Ok(Self {
            prefix: Regex::new(&pattern)?,
        })
    }

    /// The normalizer built from the built-in vocabulary
    pub fn builtin() -> &'static IngredientNormalizer {
        &DEFAULT_NORMALIZER
    }

    /// Normalize one ingredient line for matching
    ///
    /// # Examples
    ///
    /// ```rust
    /// use recipe_insights::ingredient_normalizer::IngredientNormalizer;
    ///
    /// let normalizer = IngredientNormalizer::builtin();
    /// assert_eq!(normalizer.normalize("2 כוסות קמח"), "קמח");
    /// assert_eq!(normalizer.normalize("½ כפית מלח"), "מלח");
    /// assert_eq!(normalizer.normalize("  Olive Oil "), "olive oil");
    /// ```
    pub fn normalize(&self, raw: &str) -> String {
        let mut current = raw.trim();

        while let Some(captures) = self.prefix.captures(current) {
            let prefix_end = captures.get(0).map_or(0, |m| m.end());
            if prefix_end == 0 {
                break;
            }
            let remainder = current[prefix_end..].trim();
            current = if remainder.is_empty() {
                captures.name("unit").map_or("", |unit| unit.as_str())
            } else {
                remainder
            };
        }

        let normalized = current.to_lowercase().trim().to_string();
        trace!("Normalized ingredient '{}' -> '{}'", raw, normalized);
        normalized
    }
}

/// Normalize with the built-in vocabulary
pub fn normalize(raw: &str) -> String {
    IngredientNormalizer::builtin().normalize(raw)
}
