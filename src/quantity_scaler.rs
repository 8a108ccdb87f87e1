//! # Quantity Scaler
//!
//! Renders ingredient lines at a user-selected serving count. Every amount is
//! scaled relative to the recipe's original serving count; lines without a
//! numeric amount are rendered unscaled.
//!
//! ## Usage
//!
//! ```rust
//! use recipe_insights::ingredient_model::IngredientRef;
//! use recipe_insights::quantity_scaler::{scale_factor, scale_ingredient};
//!
//! let factor = scale_factor(4, 2);
//! assert_eq!(scale_ingredient(&IngredientRef::from("4 ביצים"), factor), "2 ביצים");
//! assert_eq!(scale_ingredient(&IngredientRef::from("1 כוס חלב"), factor), "½ כוס חלב");
//! ```

use crate::analysis_config::ServingLimits;
use crate::ingredient_model::IngredientRef;
use crate::ingredient_parser::{IngredientParser, FRACTION_GLYPHS};
use crate::vocabulary::Vocabulary;
use crate::vocabulary_errors::VocabularyError;
use lazy_static::lazy_static;
use log::{debug, warn};

lazy_static! {
    static ref DEFAULT_SCALER: QuantityScaler =
        QuantityScaler::new(Vocabulary::builtin(), ServingLimits::default())
            .expect("Built-in scaler vocabulary should compile");
}

/// Scales ingredient amounts by a serving ratio
#[derive(Debug, Clone)]
pub struct QuantityScaler {
    parser: IngredientParser,
    limits: ServingLimits,
}

impl QuantityScaler {
    /// Build a scaler from a vocabulary and serving limits
    pub fn new(vocabulary: &Vocabulary, limits: ServingLimits) -> Result<Self, VocabularyError> {
        Ok(Self {
            parser: IngredientParser::new(vocabulary)?,
            limits,
        })
    }

    /// The scaler built from the built-in vocabulary and default limits
    pub fn builtin() -> &'static QuantityScaler {
        &DEFAULT_SCALER
    }

    /// The parser used to resolve ingredients
    pub fn parser(&self) -> &IngredientParser {
        &self.parser
    }

    /// Ratio of the clamped requested serving count to the original one
    ///
    /// An original serving count of zero cannot anchor a ratio, so the
    /// recipe is shown unscaled.
    pub fn scale_factor(&self, original_servings: u32, requested_servings: u32) -> f64 {
        let requested = self.limits.clamp(requested_servings);
        if original_servings == 0 {
            warn!("Recipe has no original serving count, showing amounts unscaled");
            return 1.0;
        }
        f64::from(requested) / f64::from(original_servings)
    }

    /// Render one ingredient at `scale_factor`
    ///
    /// - Legacy line with a quantity token: amount scaled, unit and name kept
    /// - Legacy line without one: returned unchanged
    /// - Structured, numeric amount: amount scaled
    /// - Structured, descriptive amount: rendered verbatim
    /// - Structured, no amount: unit and name only
    pub fn scale_ingredient(&self, ingredient: &IngredientRef, scale_factor: f64) -> String {
        let factor = sanitize_factor(scale_factor);

        let mut parsed = match ingredient {
            IngredientRef::Legacy(line) => match self.parser.parse_legacy(line) {
                Some(parsed) => parsed,
                None => {
                    debug!("No quantity in '{}', rendering unscaled", line);
                    return line.clone();
                }
            },
            IngredientRef::Structured(structured) => self.parser.parse_structured(structured),
        };

        parsed.amount = parsed.amount.map(|amount| amount * factor);
        parsed.to_string()
    }

    /// Render a whole ingredient list at `scale_factor`
    pub fn scale_all(&self, ingredients: &[IngredientRef], scale_factor: f64) -> Vec<String> {
        ingredients
            .iter()
            .map(|ingredient| self.scale_ingredient(ingredient, scale_factor))
            .collect()
    }
}

fn sanitize_factor(scale_factor: f64) -> f64 {
    if scale_factor.is_finite() && scale_factor > 0.0 {
        scale_factor
    } else {
        warn!("Invalid scale factor {}, using 1", scale_factor);
        1.0
    }
}

/// Format an amount for display
///
/// Whole numbers have no decimal part, exactly ½ ¼ ¾ use their glyph, and
/// everything else is rounded to one decimal with a trailing ".0" dropped.
///
/// # Examples
///
/// ```rust
/// use recipe_insights::quantity_scaler::format_number;
///
/// assert_eq!(format_number(4.0), "4");
/// assert_eq!(format_number(0.5), "½");
/// assert_eq!(format_number(1.5), "1.5");
/// assert_eq!(format_number(0.999), "1");
/// ```
pub fn format_number(value: f64) -> String {
    if !value.is_finite() {
        return value.to_string();
    }
    if value.fract() == 0.0 {
        return format!("{value:.0}");
    }
    if let Some((glyph, _)) = FRACTION_GLYPHS.iter().find(|(_, v)| *v == value) {
        return glyph.to_string();
    }

    let rounded = (value * 10.0).round() / 10.0;
    if rounded.fract() == 0.0 {
        format!("{rounded:.0}")
    } else {
        format!("{rounded:.1}")
    }
}

/// Scale factor with the built-in serving limits
pub fn scale_factor(original_servings: u32, requested_servings: u32) -> f64 {
    QuantityScaler::builtin().scale_factor(original_servings, requested_servings)
}

/// Render one ingredient with the built-in vocabulary
pub fn scale_ingredient(ingredient: &IngredientRef, scale_factor: f64) -> String {
    QuantityScaler::builtin().scale_ingredient(ingredient, scale_factor)
}
