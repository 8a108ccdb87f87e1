//! # Ingredient Parser
//!
//! This module resolves both ingredient representations into the
//! [`ParsedIngredient`] triple `{amount, unit, name}` used for scaling.
//!
//! ## Features
//!
//! - Legacy lines: a leading quantity token, an optional unit word, the name
//! - Quantity tokens: digits ("2", "1.5", "1,5"), glyphs (½ ¼ ¾), digit+glyph
//!   ("1½"), fractions ("1/2", "1 1/2") and named fractions ("חצי", "רבע", "שליש")
//! - Structured amounts: numbers, numeric strings, or descriptive text kept verbatim
//! - Anything unrecognized degrades to an unscaled passthrough
//!
//! ## Usage
//!
//! ```rust
//! use recipe_insights::ingredient_parser::parse_legacy_ingredient;
//!
//! let parsed = parse_legacy_ingredient("2 כוסות קמח").unwrap();
//! assert_eq!(parsed.amount, Some(2.0));
//! assert_eq!(parsed.unit, "כוסות");
//! assert_eq!(parsed.name, "קמח");
//!
//! assert!(parse_legacy_ingredient("בצל גדול").is_none());
//! ```

use crate::ingredient_model::{Amount, IngredientRef, ParsedIngredient, StructuredIngredient};
use crate::vocabulary::{word_alternation, Vocabulary};
use crate::vocabulary_errors::VocabularyError;
use lazy_static::lazy_static;
use log::{debug, info, trace, warn};
use regex::Regex;
use std::collections::BTreeMap;

/// Fraction glyphs and their values
pub(crate) const FRACTION_GLYPHS: [(char, f64); 3] = [('½', 0.5), ('¼', 0.25), ('¾', 0.75)];

/// Quantity token alternatives shared by every legacy-line pattern, most specific first
const NUMERIC_TOKEN: &str =
    r"[0-9]+\s+[0-9]+\s*[/⁄]\s*[0-9]+|[0-9]+\s*[/⁄]\s*[0-9]+|[0-9]+(?:[.,][0-9]+)?(?:\s*[½¼¾])?|[½¼¾]";

lazy_static! {
    /// Matches "1/2" and "1 1/2"
    static ref FRACTION: Regex =
        Regex::new(r"^(?:(?P<whole>[0-9]+)\s+)?(?P<num>[0-9]+)\s*[/⁄]\s*(?P<den>[0-9]+)$")
            .expect("Fraction pattern should be valid");
    /// Matches "2", "1.5", "1,5", "½", "1½", "1 ½"
    static ref DECIMAL_WITH_GLYPH: Regex =
        Regex::new(r"^(?P<number>[0-9]+(?:[.,][0-9]+)?)?\s*(?P<glyph>[½¼¾])?$")
            .expect("Decimal pattern should be valid");
    static ref DEFAULT_PARSER: IngredientParser = IngredientParser::new(Vocabulary::builtin())
        .expect("Built-in parser vocabulary should compile");
}

/// Parses legacy lines and amount strings using a vocabulary's unit words
/// and named fractions
#[derive(Debug, Clone)]
pub struct IngredientParser {
    /// `quantity [unit] name` line pattern
    legacy_line: Regex,
    /// Named fractions, keyed by lowercase word
    named_fractions: BTreeMap<String, f64>,
}

impl IngredientParser {
    /// Build a parser from a vocabulary
    pub fn new(vocabulary: &Vocabulary) -> Result<Self, VocabularyError> {
        let named: Vec<&String> = vocabulary.named_fractions.keys().collect();
        let quantity = match word_alternation(&named) {
            Some(words) => format!("{NUMERIC_TOKEN}|{words}"),
            None => NUMERIC_TOKEN.to_string(),
        };
        let unit = word_alternation(&vocabulary.units)
            .map(|units| format!(r"(?:(?P<unit>{units})\s*)?"))
            .unwrap_or_default();
        let pattern = format!(r"(?is)^\s*(?P<qty>{quantity})\s*{unit}(?P<name>.*)$");

        info!(
            "Creating IngredientParser with {} unit words and {} named fractions",
            vocabulary.units.len(),
            vocabulary.named_fractions.len()
        );

        Ok(Self {
            legacy_line: Regex::new(&pattern)?,
            named_fractions: vocabulary
                .named_fractions
                .iter()
                .map(|(word, value)| (word.trim().to_lowercase(), *value))
                .collect(),
        })
    }

    /// The parser built from the built-in vocabulary
    pub fn builtin() -> &'static IngredientParser {
        &DEFAULT_PARSER
    }

    /// Resolve an amount string to a number
    ///
    /// Returns `None` for descriptive text ("לפי הטעם"), a zero denominator,
    /// or anything that is not a finite non-negative number.
    pub fn parse_amount(&self, text: &str) -> Option<f64> {
        let text = text.trim();
        if text.is_empty() {
            return None;
        }

        if let Some(value) = self.named_fractions.get(&text.to_lowercase()) {
            return Some(*value);
        }

        let value = if let Some(captures) = FRACTION.captures(text) {
            let whole = match captures.name("whole") {
                Some(m) => m.as_str().parse::<f64>().ok()?,
                None => 0.0,
            };
            let numerator: f64 = captures.name("num")?.as_str().parse().ok()?;
            let denominator: f64 = captures.name("den")?.as_str().parse().ok()?;
            if denominator == 0.0 {
                debug!("Zero denominator in amount '{}'", text);
                return None;
            }
            whole + numerator / denominator
        } else if let Some(captures) = DECIMAL_WITH_GLYPH.captures(text) {
            let number = match captures.name("number") {
                Some(m) => m.as_str().replace(',', ".").parse::<f64>().ok()?,
                None => 0.0,
            };
            let glyph = captures
                .name("glyph")
                .and_then(|m| m.as_str().chars().next())
                .map_or(0.0, glyph_value);
            number + glyph
        } else {
            return None;
        };

        (value.is_finite() && value >= 0.0).then_some(value)
    }

    /// Parse a legacy free-text line
    ///
    /// Returns `None` when the line does not start with a quantity token, in
    /// which case callers render the line unchanged.
    pub fn parse_legacy(&self, line: &str) -> Option<ParsedIngredient> {
        let captures = self.legacy_line.captures(line)?;
        let token = captures.name("qty")?.as_str();
        let amount = self.parse_amount(token)?;

        let mut unit = captures
            .name("unit")
            .map_or("", |m| m.as_str())
            .trim()
            .to_string();
        let mut name = captures
            .name("name")
            .map_or("", |m| m.as_str())
            .trim()
            .to_string();

        // "2-3 שיני שום": ranges are left unscaled
        if name.starts_with(&['-', '–', '—'][..]) {
            debug!("Range quantity in '{}', leaving unscaled", line);
            return None;
        }

        if name.is_empty() {
            if unit.is_empty() {
                trace!("Legacy line '{}' has a quantity but no name", line);
                return None;
            }
            name = std::mem::take(&mut unit);
        }

        trace!(
            "Parsed legacy line '{}' -> amount={}, unit='{}', name='{}'",
            line,
            amount,
            unit,
            name
        );

        Some(ParsedIngredient {
            amount: Some(amount),
            descriptive_amount: None,
            unit,
            name,
        })
    }

    /// Resolve a structured record into the semantic triple
    pub fn parse_structured(&self, ingredient: &StructuredIngredient) -> ParsedIngredient {
        let (amount, descriptive_amount) = match &ingredient.amount {
            None => (None, None),
            Some(Amount::Number(value)) if value.is_finite() && *value >= 0.0 => {
                (Some(*value), None)
            }
            Some(Amount::Number(value)) => {
                warn!(
                    "Ignoring invalid amount {} for ingredient '{}'",
                    value, ingredient.name
                );
                (None, None)
            }
            Some(Amount::Text(text)) if text.trim().is_empty() => (None, None),
            Some(Amount::Text(text)) => match self.parse_amount(text) {
                Some(value) => (Some(value), None),
                None => (None, Some(text.trim().to_string())),
            },
        };

        let mut unit = ingredient.unit.as_deref().unwrap_or("").trim().to_string();
        let mut name = ingredient.name.trim().to_string();
        if name.is_empty() {
            name = std::mem::take(&mut unit);
        }

        ParsedIngredient {
            amount,
            descriptive_amount,
            unit,
            name,
        }
    }

    /// Resolve either representation
    ///
    /// A legacy line without a recognizable quantity becomes a triple with no
    /// amount and the whole line as its name.
    pub fn parse(&self, ingredient: &IngredientRef) -> ParsedIngredient {
        match ingredient {
            IngredientRef::Structured(structured) => self.parse_structured(structured),
            IngredientRef::Legacy(line) => {
                self.parse_legacy(line).unwrap_or_else(|| ParsedIngredient {
                    amount: None,
                    descriptive_amount: None,
                    unit: String::new(),
                    name: line.trim().to_string(),
                })
            }
        }
    }
}

/// Value of a fraction glyph, zero for any other character
pub(crate) fn glyph_value(glyph: char) -> f64 {
    FRACTION_GLYPHS
        .iter()
        .find(|(c, _)| *c == glyph)
        .map_or(0.0, |(_, value)| *value)
}

/// Parse a legacy line with the built-in vocabulary
pub fn parse_legacy_ingredient(line: &str) -> Option<ParsedIngredient> {
    IngredientParser::builtin().parse_legacy(line)
}
