//! # Difficulty Classifier
//!
//! Assigns one of three difficulty levels from the step count, the
//! ingredient count and the instruction text. Rules apply in order:
//!
//! 1. More than `hard_step_threshold` steps, or any advanced-technique
//!    keyword anywhere in the instructions: **hard**
//! 2. At most `easy_max_steps` steps and at most `easy_max_ingredients`
//!    ingredients: **easy**
//! 3. Otherwise: **medium**

use crate::analysis_config::DifficultyThresholds;
use crate::vocabulary::Vocabulary;
use lazy_static::lazy_static;
use log::debug;
use serde::{Deserialize, Serialize};
use std::fmt;

lazy_static! {
    static ref DEFAULT_CLASSIFIER: DifficultyClassifier =
        DifficultyClassifier::new(Vocabulary::builtin(), DifficultyThresholds::default());
}

/// Three-level recipe difficulty
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DifficultyLevel {
    Easy,
    Medium,
    Hard,
}

impl DifficultyLevel {
    /// Stable identifier
    pub fn as_str(&self) -> &'static str {
        match self {
            DifficultyLevel::Easy => "easy",
            DifficultyLevel::Medium => "medium",
            DifficultyLevel::Hard => "hard",
        }
    }

    /// Localization message id for the level's label
    pub fn message_id(&self) -> &'static str {
        match self {
            DifficultyLevel::Easy => "difficulty-easy",
            DifficultyLevel::Medium => "difficulty-medium",
            DifficultyLevel::Hard => "difficulty-hard",
        }
    }
}

impl fmt::Display for DifficultyLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Decision-table classifier with an injected keyword vocabulary
#[derive(Debug, Clone)]
pub struct DifficultyClassifier {
    thresholds: DifficultyThresholds,
    /// Lowercase advanced-technique keywords
    keywords: Vec<String>,
}

impl DifficultyClassifier {
    pub fn new(vocabulary: &Vocabulary, thresholds: DifficultyThresholds) -> Self {
        Self {
            thresholds,
            keywords: vocabulary
                .advanced_techniques
                .iter()
                .map(|keyword| keyword.trim().to_lowercase())
                .filter(|keyword| !keyword.is_empty())
                .collect(),
        }
    }

    /// The classifier built from the built-in vocabulary and default thresholds
    pub fn builtin() -> &'static DifficultyClassifier {
        &DEFAULT_CLASSIFIER
    }

    /// First advanced-technique keyword found in the instructions, if any
    pub fn advanced_technique<S: AsRef<str>>(&self, instructions: &[S]) -> Option<&str> {
        let text = instructions
            .iter()
            .map(|step| step.as_ref())
            .collect::<Vec<&str>>()
            .join(" ")
            .to_lowercase();

        self.keywords
            .iter()
            .find(|keyword| text.contains(keyword.as_str()))
            .map(String::as_str)
    }

    /// Classify a recipe
    ///
    /// # Examples
    ///
    /// ```rust
    /// use recipe_insights::difficulty::{DifficultyClassifier, DifficultyLevel};
    ///
    /// let classifier = DifficultyClassifier::builtin();
    /// let no_steps: [&str; 0] = [];
    /// assert_eq!(classifier.calculate_difficulty(3, 5, &no_steps), DifficultyLevel::Easy);
    /// assert_eq!(classifier.calculate_difficulty(6, 9, &no_steps), DifficultyLevel::Medium);
    /// assert_eq!(classifier.calculate_difficulty(9, 2, &no_steps), DifficultyLevel::Hard);
    /// ```
    pub fn calculate_difficulty<S: AsRef<str>>(
        &self,
        step_count: usize,
        ingredient_count: usize,
        instructions: &[S],
    ) -> DifficultyLevel {
        let thresholds = &self.thresholds;

        if step_count > thresholds.hard_step_threshold {
            debug!("Hard: {} steps", step_count);
            return DifficultyLevel::Hard;
        }
        if let Some(keyword) = self.advanced_technique(instructions) {
            debug!("Hard: advanced technique '{}'", keyword);
            return DifficultyLevel::Hard;
        }
        if step_count <= thresholds.easy_max_steps
            && ingredient_count <= thresholds.easy_max_ingredients
        {
            return DifficultyLevel::Easy;
        }
        DifficultyLevel::Medium
    }
}

/// Classify with the built-in vocabulary and default thresholds
pub fn calculate_difficulty<S: AsRef<str>>(
    step_count: usize,
    ingredient_count: usize,
    instructions: &[S],
) -> DifficultyLevel {
    DifficultyClassifier::builtin().calculate_difficulty(step_count, ingredient_count, instructions)
}

#[cfg(test)]
mod tests {
    use super::*;

    const NO_STEPS: [&str; 0] = [];

    #[test]
    fn test_decision_table() {
        assert_eq!(calculate_difficulty(5, 7, &NO_STEPS), DifficultyLevel::Easy);
        assert_eq!(calculate_difficulty(6, 9, &NO_STEPS), DifficultyLevel::Medium);
        assert_eq!(calculate_difficulty(5, 8, &NO_STEPS), DifficultyLevel::Medium);
        assert_eq!(calculate_difficulty(8, 3, &NO_STEPS), DifficultyLevel::Medium);
        assert_eq!(calculate_difficulty(9, 1, &NO_STEPS), DifficultyLevel::Hard);
    }

    #[test]
    fn test_keyword_makes_hard() {
        let steps = ["מערבבים את הביצים", "מטגנים בטיגון עמוק עד להזהבה"];
        assert_eq!(calculate_difficulty(2, 3, &steps), DifficultyLevel::Hard);

        let steps = ["Make a ROUX with butter and flour"];
        assert_eq!(calculate_difficulty(1, 2, &steps), DifficultyLevel::Hard);
    }

    #[test]
    fn test_keyword_spanning_steps_is_found() {
        let classifier = DifficultyClassifier::builtin();
        let steps = ["מכינים בצק", "עלים ירוקים לקישוט"];
        assert_eq!(classifier.advanced_technique(&steps), Some("בצק עלים"));
    }

    #[test]
    fn test_custom_vocabulary() {
        let mut vocabulary = Vocabulary::builtin().clone();
        vocabulary.advanced_techniques = vec!["flambé".to_string()];
        let classifier = DifficultyClassifier::new(&vocabulary, DifficultyThresholds::default());

        assert_eq!(
            classifier.calculate_difficulty(2, 2, &["Flambé the bananas"]),
            DifficultyLevel::Hard
        );
        assert_eq!(
            classifier.calculate_difficulty(2, 2, &["מטגנים בשמן עמוק"]),
            DifficultyLevel::Easy
        );
    }

    #[test]
    fn test_levels_are_ordered() {
        assert!(DifficultyLevel::Easy < DifficultyLevel::Medium);
        assert!(DifficultyLevel::Medium < DifficultyLevel::Hard);
    }
}
