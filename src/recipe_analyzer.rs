//! # Recipe Analyzer
//!
//! One entry point over the five analysis components. A `RecipeAnalyzer`
//! owns a validated vocabulary's components and an [`AnalysisConfig`], and
//! produces a [`RecipeReport`] for a recipe at a requested serving count.
//!
//! The components stay independent: each consumes the same recipe record
//! and none reads another's output.
//!
//! ## Usage
//!
//! ```rust
//! use recipe_insights::difficulty::DifficultyLevel;
//! use recipe_insights::ingredient_model::{IngredientRef, Recipe};
//! use recipe_insights::recipe_analyzer::RecipeAnalyzer;
//!
//! let recipe = Recipe {
//!     title: "שקשוקה".to_string(),
//!     servings: 4,
//!     ingredients: vec![IngredientRef::from("4 ביצים"), IngredientRef::from("שמן זית")],
//!     instructions: vec!["מבשלים 10 דקות".to_string()],
//! };
//!
//! let report = RecipeAnalyzer::builtin().analyze(&recipe, 2);
//! assert_eq!(report.difficulty, DifficultyLevel::Easy);
//! assert_eq!(report.ingredients[0], "2 ביצים");
//! assert_eq!(report.steps[0].timers[0].duration_seconds, 600);
//! ```

use crate::analysis_config::AnalysisConfig;
use crate::diet_matcher::{DietAnalysisResult, DietAnalyzer};
use crate::difficulty::{DifficultyClassifier, DifficultyLevel};
use crate::ingredient_model::{IngredientRef, Recipe};
use crate::ingredient_normalizer::IngredientNormalizer;
use crate::quantity_scaler::QuantityScaler;
use crate::timer_extractor::{ParsedTimer, TimerExtractor};
use crate::vocabulary::Vocabulary;
use crate::vocabulary_errors::VocabularyError;
use lazy_static::lazy_static;
use log::info;
use serde::{Deserialize, Serialize};

lazy_static! {
    static ref DEFAULT_ANALYZER: RecipeAnalyzer =
        RecipeAnalyzer::new(Vocabulary::builtin(), AnalysisConfig::default())
            .expect("Built-in vocabulary should build an analyzer");
}

/// Timers found in one instruction step
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StepTimers {
    /// 1-based step number
    pub number: usize,
    pub instruction: String,
    pub timers: Vec<ParsedTimer>,
}

/// Everything the presentation layer shows for one recipe
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecipeReport {
    pub title: String,
    /// Serving count the recipe is written for
    pub original_servings: u32,
    /// Requested serving count after clamping
    pub servings: u32,
    pub scale_factor: f64,
    pub difficulty: DifficultyLevel,
    /// One verdict per diet, in fixed order
    pub diets: Vec<DietAnalysisResult>,
    /// Ingredient lines rendered at `servings`
    pub ingredients: Vec<String>,
    pub steps: Vec<StepTimers>,
}

impl RecipeReport {
    /// Whether diet verdicts carry information
    ///
    /// An empty ingredient list is compatible with every diet, which says
    /// nothing about the recipe.
    pub fn has_diet_badges(&self) -> bool {
        !self.ingredients.is_empty()
    }

    /// Total number of timers across all steps
    pub fn timer_count(&self) -> usize {
        self.steps.iter().map(|step| step.timers.len()).sum()
    }
}

/// Facade over the analysis components for one vocabulary and config
pub struct RecipeAnalyzer {
    config: AnalysisConfig,
    normalizer: IngredientNormalizer,
    diets: DietAnalyzer,
    difficulty: DifficultyClassifier,
    scaler: QuantityScaler,
    timers: TimerExtractor,
}

impl RecipeAnalyzer {
    /// Validate `vocabulary` and build every component from it
    pub fn new(vocabulary: &Vocabulary, config: AnalysisConfig) -> Result<Self, VocabularyError> {
        vocabulary.validate()?;
        info!("Creating RecipeAnalyzer");

        Ok(Self {
            normalizer: IngredientNormalizer::new(vocabulary)?,
            diets: DietAnalyzer::new(vocabulary)?,
            difficulty: DifficultyClassifier::new(vocabulary, config.difficulty.clone()),
            scaler: QuantityScaler::new(vocabulary, config.servings.clone())?,
            timers: TimerExtractor::new(vocabulary, config.timers.clone())?,
            config,
        })
    }

    /// The analyzer built from the built-in vocabulary and default config
    pub fn builtin() -> &'static RecipeAnalyzer {
        &DEFAULT_ANALYZER
    }

    pub fn config(&self) -> &AnalysisConfig {
        &self.config
    }

    pub fn normalizer(&self) -> &IngredientNormalizer {
        &self.normalizer
    }

    pub fn diet_analyzer(&self) -> &DietAnalyzer {
        &self.diets
    }

    pub fn difficulty_classifier(&self) -> &DifficultyClassifier {
        &self.difficulty
    }

    pub fn scaler(&self) -> &QuantityScaler {
        &self.scaler
    }

    pub fn timer_extractor(&self) -> &TimerExtractor {
        &self.timers
    }

    /// Flat display strings for diet matching
    ///
    /// Legacy lines are passed through as written; structured ingredients
    /// are rendered unscaled.
    pub fn ingredient_lines(&self, ingredients: &[IngredientRef]) -> Vec<String> {
        ingredients
            .iter()
            .map(|ingredient| match ingredient {
                IngredientRef::Legacy(line) => line.clone(),
                IngredientRef::Structured(structured) => {
                    self.scaler.parser().parse_structured(structured).to_string()
                }
            })
            .collect()
    }

    /// Analyze `recipe` for display at `requested_servings`
    pub fn analyze(&self, recipe: &Recipe, requested_servings: u32) -> RecipeReport {
        info!(
            "Analyzing '{}' ({} ingredients, {} steps) for {} servings",
            recipe.title,
            recipe.ingredient_count(),
            recipe.step_count(),
            requested_servings
        );

        let lines = self.ingredient_lines(&recipe.ingredients);
        let scale_factor = self.scaler.scale_factor(recipe.servings, requested_servings);

        let steps = recipe
            .instructions
            .iter()
            .enumerate()
            .map(|(index, instruction)| StepTimers {
                number: index + 1,
                instruction: instruction.clone(),
                timers: self.timers.parse_timers_from_text(instruction),
            })
            .collect();

        RecipeReport {
            title: recipe.title.clone(),
            original_servings: recipe.servings,
            servings: self.config.servings.clamp(requested_servings),
            scale_factor,
            difficulty: self.difficulty.calculate_difficulty(
                recipe.step_count(),
                recipe.ingredient_count(),
                &recipe.instructions,
            ),
            diets: self.diets.analyze_all_diets(&lines),
            ingredients: self.scaler.scale_all(&recipe.ingredients, scale_factor),
            steps,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diet_matcher::Diet;
    use crate::ingredient_model::{Amount, StructuredIngredient};

    fn recipe(ingredients: Vec<IngredientRef>, instructions: &[&str]) -> Recipe {
        Recipe {
            title: "בדיקה".to_string(),
            servings: 4,
            ingredients,
            instructions: instructions.iter().map(|step| step.to_string()).collect(),
        }
    }

    #[test]
    fn test_structured_lines_feed_diet_matching() {
        let milk = StructuredIngredient::new("חלב")
            .with_amount(Amount::Number(1.0))
            .with_unit("כוס");
        let recipe = recipe(vec![IngredientRef::from(milk)], &["מערבבים"]);

        let report = RecipeAnalyzer::builtin().analyze(&recipe, 4);
        let vegan = report.diets.iter().find(|d| d.diet == Diet::Vegan).unwrap();
        assert_eq!(vegan.problematic_ingredients, vec!["1 כוס חלב".to_string()]);
        assert!(vegan.is_convertible);
    }

    #[test]
    fn test_servings_are_clamped() {
        let recipe = recipe(vec![IngredientRef::from("2 כוסות קמח")], &[]);
        let report = RecipeAnalyzer::builtin().analyze(&recipe, 100);

        assert_eq!(report.servings, 20);
        assert_eq!(report.scale_factor, 5.0);
        assert_eq!(report.ingredients, vec!["10 כוסות קמח".to_string()]);
    }

    #[test]
    fn test_empty_recipe_has_no_badges() {
        let report = RecipeAnalyzer::builtin().analyze(&recipe(vec![], &[]), 4);

        assert!(!report.has_diet_badges());
        assert_eq!(report.diets.len(), 3);
        assert!(report.diets.iter().all(|diet| diet.is_natively_compatible));
        assert_eq!(report.difficulty, DifficultyLevel::Easy);
        assert_eq!(report.timer_count(), 0);
    }

    #[test]
    fn test_custom_config_changes_thresholds() {
        let mut config = AnalysisConfig::default();
        config.difficulty.hard_step_threshold = 2;
        let analyzer = RecipeAnalyzer::new(Vocabulary::builtin(), config).unwrap();

        let report = analyzer.analyze(&recipe(vec![], &["א", "ב", "ג"]), 4);
        assert_eq!(report.difficulty, DifficultyLevel::Hard);
    }
}
