//! # Ingredient and Recipe Data Model
//!
//! This module defines the shapes in which recipe data reaches the analysis
//! engine. Ingredients arrive either as structured records or as legacy
//! free-text lines; both resolve to the same [`ParsedIngredient`] triple.
//!
//! ## Core Concepts
//!
//! - **StructuredIngredient**: discrete `name`, optional `amount`, optional `unit`
//! - **Legacy line**: one free-text string such as "2 כוסות קמח"
//! - **Amount**: a number, or a string that may or may not hold a number
//! - **ParsedIngredient**: `{amount, unit, name}` after resolution
//!
//! ## Usage
//!
//! ```rust
//! use recipe_insights::ingredient_model::{Amount, IngredientRef, StructuredIngredient};
//!
//! let flour = StructuredIngredient::new("קמח")
//!     .with_amount(Amount::Number(2.0))
//!     .with_unit("כוסות");
//!
//! let eggs = IngredientRef::from("4 ביצים");
//! let items = vec![IngredientRef::Structured(flour), eggs];
//! assert_eq!(items.len(), 2);
//! ```

use crate::analysis_config::DEFAULT_SERVINGS;
use crate::ingredient_parser::IngredientParser;
use crate::quantity_scaler::format_number;
use serde::{Deserialize, Serialize};
use std::fmt;

/// The amount field of a structured ingredient
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Amount {
    /// A numeric amount (e.g. `2`, `0.5`)
    Number(f64),
    /// A textual amount, numeric ("1½", "1/2") or descriptive ("לפי הטעם")
    Text(String),
}

/// An ingredient stored as separate fields
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StructuredIngredient {
    /// The ingredient name (e.g. "קמח", "שמן זית")
    pub name: String,
    /// Optional amount
    #[serde(default)]
    pub amount: Option<Amount>,
    /// Optional unit word
    #[serde(default)]
    pub unit: Option<String>,
}

/// An ingredient in either supported representation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum IngredientRef {
    /// Discrete name/amount/unit fields
    Structured(StructuredIngredient),
    /// A single free-text line
    Legacy(String),
}

/// The semantic triple both ingredient representations resolve to
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParsedIngredient {
    /// Numeric amount, if one could be resolved
    pub amount: Option<f64>,
    /// Amount text that is not a number, kept verbatim (e.g. "לפי הטעם")
    pub descriptive_amount: Option<String>,
    /// Unit word, empty when there is none
    pub unit: String,
    /// Ingredient name
    pub name: String,
}

/// A recipe record as supplied by the storage or generation collaborator
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recipe {
    /// Recipe title
    #[serde(default)]
    pub title: String,
    /// Serving count the amounts are written for
    #[serde(default = "default_servings")]
    pub servings: u32,
    /// Ingredient list
    #[serde(default)]
    pub ingredients: Vec<IngredientRef>,
    /// Instruction steps, in order
    #[serde(default)]
    pub instructions: Vec<String>,
}

fn default_servings() -> u32 {
    DEFAULT_SERVINGS
}

impl StructuredIngredient {
    /// Create a structured ingredient with just a name
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            amount: None,
            unit: None,
        }
    }

    /// Set the amount
    pub fn with_amount(mut self, amount: Amount) -> Self {
        self.amount = Some(amount);
        self
    }

    /// Set the unit word
    pub fn with_unit(mut self, unit: &str) -> Self {
        self.unit = Some(unit.to_string());
        self
    }
}

impl IngredientRef {
    /// Resolve into the semantic triple with the built-in vocabulary
    pub fn parse(&self) -> ParsedIngredient {
        IngredientParser::builtin().parse(self)
    }
}

impl From<&str> for IngredientRef {
    fn from(line: &str) -> Self {
        IngredientRef::Legacy(line.to_string())
    }
}

impl From<String> for IngredientRef {
    fn from(line: String) -> Self {
        IngredientRef::Legacy(line)
    }
}

impl From<StructuredIngredient> for IngredientRef {
    fn from(ingredient: StructuredIngredient) -> Self {
        IngredientRef::Structured(ingredient)
    }
}

impl From<f64> for Amount {
    fn from(value: f64) -> Self {
        Amount::Number(value)
    }
}

impl From<&str> for Amount {
    fn from(value: &str) -> Self {
        Amount::Text(value.to_string())
    }
}

impl ParsedIngredient {
    /// Whether a numeric amount is present and can be scaled
    pub fn is_scalable(&self) -> bool {
        self.amount.is_some()
    }
}

impl Recipe {
    /// Number of instruction steps
    pub fn step_count(&self) -> usize {
        self.instructions.len()
    }

    /// Number of ingredients
    pub fn ingredient_count(&self) -> usize {
        self.ingredients.len()
    }
}

impl fmt::Display for ParsedIngredient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let amount = match (self.amount, &self.descriptive_amount) {
            (Some(value), _) => format_number(value),
            (None, Some(text)) => text.clone(),
            (None, None) => String::new(),
        };
        let parts = [amount.as_str(), self.unit.as_str(), self.name.as_str()];
        let rendered: Vec<&str> = parts
            .iter()
            .map(|part| part.trim())
            .filter(|part| !part.is_empty())
            .collect();
        write!(f, "{}", rendered.join(" "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_structured_builder() {
        let ingredient = StructuredIngredient::new("קמח")
            .with_amount(Amount::from(2.0))
            .with_unit("כוסות");

        assert_eq!(ingredient.name, "קמח");
        assert_eq!(ingredient.amount, Some(Amount::Number(2.0)));
        assert_eq!(ingredient.unit.as_deref(), Some("כוסות"));
    }

    #[test]
    fn test_deserialize_mixed_ingredient_list() {
        let json = r#"[
            {"name": "קמח", "amount": 2, "unit": "כוסות"},
            {"name": "מלח", "amount": "לפי הטעם"},
            {"name": "שמן זית", "amount": null},
            "4 ביצים"
        ]"#;
        let items: Vec<IngredientRef> = serde_json::from_str(json).unwrap();

        assert_eq!(items.len(), 4);
        assert!(matches!(
            &items[0],
            IngredientRef::Structured(s) if s.amount == Some(Amount::Number(2.0))
        ));
        assert!(matches!(
            &items[1],
            IngredientRef::Structured(s) if s.amount == Some(Amount::Text("לפי הטעם".to_string()))
        ));
        assert!(matches!(&items[2], IngredientRef::Structured(s) if s.amount.is_none()));
        assert_eq!(items[3], IngredientRef::from("4 ביצים"));
    }

    #[test]
    fn test_parse_without_quantity_keeps_line_as_name() {
        let parsed = IngredientRef::from("בצל גדול").parse();
        assert_eq!(parsed.amount, None);
        assert_eq!(parsed.unit, "");
        assert_eq!(parsed.name, "בצל גדול");
    }

    #[test]
    fn test_recipe_defaults() {
        let recipe: Recipe = serde_json::from_str(r#"{"title": "שקשוקה"}"#).unwrap();
        assert_eq!(recipe.servings, DEFAULT_SERVINGS);
        assert_eq!(recipe.step_count(), 0);
        assert_eq!(recipe.ingredient_count(), 0);
    }

    #[test]
    fn test_parsed_display_omits_empty_parts() {
        let parsed = ParsedIngredient {
            amount: Some(2.0),
            descriptive_amount: None,
            unit: String::new(),
            name: "ביצים".to_string(),
        };
        assert_eq!(parsed.to_string(), "2 ביצים");

        let parsed = ParsedIngredient {
            amount: None,
            descriptive_amount: Some("לפי הטעם".to_string()),
            unit: String::new(),
            name: "מלח".to_string(),
        };
        assert_eq!(parsed.to_string(), "לפי הטעם מלח");
        assert!(!parsed.is_scalable());
    }
}
