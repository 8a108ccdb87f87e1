//! # Diet Matcher
//!
//! Checks an ingredient list against the curated non-conforming entries of
//! each supported diet and collects known substitutions.
//!
//! ## Policy
//!
//! - Every ingredient line is normalized before matching
//! - The default [`ContainmentMatcher`] matches when the ingredient contains
//!   an entry or an entry contains the ingredient. This over-reports on short
//!   or ambiguous words ("חלב" inside "חלב קוקוס") rather than missing a
//!   violation; [`TokenMatcher`] is the stricter alternative
//! - Containment also flags suggested replacements that spell out the entry
//!   they replace: "חלב שקדים" is reported for vegan with itself as the
//!   substitution, and "קמח ללא גלוטן" likewise for gluten-free
//! - The first entry in list order wins
//! - Ingredients that match nothing are assumed to conform (closed world), so
//!   an empty list is compatible with every diet
//!
//! ## Usage
//!
//! ```rust
//! use recipe_insights::diet_matcher::{analyze_diet, Diet};
//!
//! let result = analyze_diet(&["חלב", "קמח", "מלח"], Diet::Vegan);
//! assert!(!result.is_natively_compatible);
//! assert!(result.is_convertible);
//! assert_eq!(result.problematic_ingredients, vec!["חלב".to_string()]);
//! ```

use crate::ingredient_normalizer::IngredientNormalizer;
use crate::vocabulary::{DietProfile, Vocabulary};
use crate::vocabulary_errors::VocabularyError;
use lazy_static::lazy_static;
use log::{debug, info, trace};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

lazy_static! {
    static ref DEFAULT_ANALYZER: DietAnalyzer = DietAnalyzer::new(Vocabulary::builtin())
        .expect("Built-in diet vocabulary should be valid");
}

/// Supported diets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Diet {
    /// No wheat, barley, rye or derived products
    GlutenFree,
    /// No animal products
    Vegan,
    /// No added sugars or syrups
    LowSugar,
}

impl Diet {
    /// All diets, in the order results are reported
    pub const ALL: [Diet; 3] = [Diet::GlutenFree, Diet::Vegan, Diet::LowSugar];

    /// Stable identifier
    pub fn as_str(&self) -> &'static str {
        match self {
            Diet::GlutenFree => "gluten-free",
            Diet::Vegan => "vegan",
            Diet::LowSugar => "low-sugar",
        }
    }

    fn index(self) -> usize {
        match self {
            Diet::GlutenFree => 0,
            Diet::Vegan => 1,
            Diet::LowSugar => 2,
        }
    }
}

impl fmt::Display for Diet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Diet {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Diet::ALL
            .into_iter()
            .find(|diet| diet.as_str() == s.trim().to_lowercase())
            .ok_or_else(|| format!("Unknown diet: {s}"))
    }
}

/// Finds the curated entry a normalized ingredient corresponds to
pub trait IngredientMatcher: Send + Sync {
    /// The matching entry, as written in the curated list
    fn find_match(&self, normalized: &str) -> Option<&str>;
}

/// Bidirectional substring containment, first entry wins
#[derive(Debug, Clone)]
pub struct ContainmentMatcher {
    /// (entry as written, lowercase entry)
    entries: Vec<(String, String)>,
}

impl ContainmentMatcher {
    pub fn new(entries: &[String]) -> Self {
        Self {
            entries: lowercase_entries(entries),
        }
    }
}

impl IngredientMatcher for ContainmentMatcher {
    fn find_match(&self, normalized: &str) -> Option<&str> {
        if normalized.is_empty() {
            return None;
        }
        self.entries
            .iter()
            .find(|(_, lower)| normalized.contains(lower.as_str()) || lower.contains(normalized))
            .map(|(entry, _)| entry.as_str())
    }
}

/// Whole-word matching: every word of the entry must appear as a word of the
/// ingredient, so "חלב" matches "חלב קוקוס" but not "חלבה"
#[derive(Debug, Clone)]
pub struct TokenMatcher {
    entries: Vec<(String, String)>,
}

impl TokenMatcher {
    pub fn new(entries: &[String]) -> Self {
        Self {
            entries: lowercase_entries(entries),
        }
    }
}

impl IngredientMatcher for TokenMatcher {
    fn find_match(&self, normalized: &str) -> Option<&str> {
        let words: Vec<&str> = normalized.split_whitespace().collect();
        if words.is_empty() {
            return None;
        }
        self.entries
            .iter()
            .find(|(_, lower)| lower.split_whitespace().all(|w| words.contains(&w)))
            .map(|(entry, _)| entry.as_str())
    }
}

fn lowercase_entries(entries: &[String]) -> Vec<(String, String)> {
    entries
        .iter()
        .map(|entry| (entry.clone(), entry.trim().to_lowercase()))
        .collect()
}

/// Diet compatibility verdict for one ingredient list
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DietAnalysisResult {
    pub diet: Diet,
    pub label: String,
    pub emoji: String,
    /// No ingredient violates the diet
    pub is_natively_compatible: bool,
    /// Compatible as is, or every violation has a known substitution
    pub is_convertible: bool,
    /// Ingredient lines that violate the diet, as supplied
    pub problematic_ingredients: Vec<String>,
    /// Problematic ingredient line -> suggested replacement
    pub substitutions: BTreeMap<String, String>,
    pub color: String,
}

struct DietRules {
    profile: DietProfile,
    matcher: Box<dyn IngredientMatcher>,
}

/// Runs diet analysis with one normalizer and one matcher per diet
pub struct DietAnalyzer {
    normalizer: IngredientNormalizer,
    /// Indexed by `Diet::index`
    rules: Vec<DietRules>,
}

impl DietAnalyzer {
    /// Build an analyzer using bidirectional containment matching
    pub fn new(vocabulary: &Vocabulary) -> Result<Self, VocabularyError> {
        Self::with_matcher(vocabulary, |entries| Box::new(ContainmentMatcher::new(entries)))
    }

    /// Build an analyzer with a custom matching strategy
    ///
    /// `build_matcher` receives each diet's non-conforming entries in order.
    pub fn with_matcher<F>(vocabulary: &Vocabulary, build_matcher: F) -> Result<Self, VocabularyError>
    where
        F: Fn(&[String]) -> Box<dyn IngredientMatcher>,
    {
        vocabulary.validate()?;

        let mut rules = Vec::with_capacity(Diet::ALL.len());
        for diet in Diet::ALL {
            let profile = vocabulary.diet_profile(diet).ok_or_else(|| {
                VocabularyError::Invalid(format!("missing diet '{}'", diet.as_str()))
            })?;
            rules.push(DietRules {
                matcher: build_matcher(&profile.non_conforming),
                profile: profile.clone(),
            });
        }

        info!("Creating DietAnalyzer for {} diets", rules.len());

        Ok(Self {
            normalizer: IngredientNormalizer::new(vocabulary)?,
            rules,
        })
    }

    /// The analyzer built from the built-in vocabulary
    pub fn builtin() -> &'static DietAnalyzer {
        &DEFAULT_ANALYZER
    }

    /// Analyze an ingredient list against one diet
    pub fn analyze_diet<S: AsRef<str>>(&self, ingredients: &[S], diet: Diet) -> DietAnalysisResult {
        let rules = &self.rules[diet.index()];
        let mut problematic_ingredients = Vec::new();
        let mut substitutions = BTreeMap::new();
        let mut every_violation_substitutable = true;

        for raw in ingredients {
            let raw = raw.as_ref();
            let normalized = self.normalizer.normalize(raw);
            let Some(entry) = rules.matcher.find_match(&normalized) else {
                trace!("'{}' conforms to {}", raw, diet);
                continue;
            };

            debug!("'{}' violates {} (matched '{}')", raw, diet, entry);
            problematic_ingredients.push(raw.to_string());
            match rules.profile.substitution_for(entry) {
                Some(replacement) => {
                    substitutions.insert(raw.to_string(), replacement.to_string());
                }
                None => every_violation_substitutable = false,
            }
        }

        let is_natively_compatible = problematic_ingredients.is_empty();
        DietAnalysisResult {
            diet,
            label: rules.profile.label.clone(),
            emoji: rules.profile.emoji.clone(),
            is_natively_compatible,
            is_convertible: is_natively_compatible || every_violation_substitutable,
            problematic_ingredients,
            substitutions,
            color: rules.profile.color.clone(),
        }
    }

    /// Analyze an ingredient list against every diet, in [`Diet::ALL`] order
    pub fn analyze_all_diets<S: AsRef<str>>(&self, ingredients: &[S]) -> Vec<DietAnalysisResult> {
        Diet::ALL
            .into_iter()
            .map(|diet| self.analyze_diet(ingredients, diet))
            .collect()
    }
}

/// Analyze one diet with the built-in vocabulary
pub fn analyze_diet<S: AsRef<str>>(ingredients: &[S], diet: Diet) -> DietAnalysisResult {
    DietAnalyzer::builtin().analyze_diet(ingredients, diet)
}

/// Analyze every diet with the built-in vocabulary
pub fn analyze_all_diets<S: AsRef<str>>(ingredients: &[S]) -> Vec<DietAnalysisResult> {
    DietAnalyzer::builtin().analyze_all_diets(ingredients)
}
