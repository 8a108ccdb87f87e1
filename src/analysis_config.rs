//! # Analysis Configuration Module
//!
//! This module defines the numeric thresholds and limits used by the difficulty
//! classifier, the serving-count scaler and the timer extractor.

// Constants for difficulty classification
pub const HARD_STEP_THRESHOLD: usize = 8;
pub const EASY_MAX_STEPS: usize = 5;
pub const EASY_MAX_INGREDIENTS: usize = 7;

// Constants for serving-count scaling
pub const MIN_SERVINGS: u32 = 1;
pub const MAX_SERVINGS: u32 = 20;
pub const DEFAULT_SERVINGS: u32 = 4;

// Constants for timer recognition
pub const MAX_TIMER_MINUTES: u64 = 180;
pub const MAX_TIMER_HOURS: u64 = 5;

/// Thresholds for the three-level difficulty decision table
#[derive(Debug, Clone, PartialEq)]
pub struct DifficultyThresholds {
    /// A step count strictly above this value is always hard
    pub hard_step_threshold: usize,
    /// Maximum step count (inclusive) for an easy recipe
    pub easy_max_steps: usize,
    /// Maximum ingredient count (inclusive) for an easy recipe
    pub easy_max_ingredients: usize,
}

impl Default for DifficultyThresholds {
    fn default() -> Self {
        Self {
            hard_step_threshold: HARD_STEP_THRESHOLD,
            easy_max_steps: EASY_MAX_STEPS,
            easy_max_ingredients: EASY_MAX_INGREDIENTS,
        }
    }
}

/// Bounds applied to a user-requested serving count
#[derive(Debug, Clone, PartialEq)]
pub struct ServingLimits {
    /// Smallest serving count the user can request
    pub min: u32,
    /// Largest serving count the user can request
    pub max: u32,
}

impl Default for ServingLimits {
    fn default() -> Self {
        Self {
            min: MIN_SERVINGS,
            max: MAX_SERVINGS,
        }
    }
}

impl ServingLimits {
    /// Clamp a requested serving count into `[min, max]`
    pub fn clamp(&self, requested: u32) -> u32 {
        requested.clamp(self.min, self.max.max(self.min))
    }
}

/// Accepted ranges for recognized timer expressions
#[derive(Debug, Clone, PartialEq)]
pub struct TimerLimits {
    /// Largest accepted `<N> minutes` value (smallest is 1)
    pub max_minutes: u64,
    /// Largest accepted `<N> hours` value (smallest is 1)
    pub max_hours: u64,
}

impl Default for TimerLimits {
    fn default() -> Self {
        Self {
            max_minutes: MAX_TIMER_MINUTES,
            max_hours: MAX_TIMER_HOURS,
        }
    }
}

/// Configuration structure for recipe analysis
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AnalysisConfig {
    /// Difficulty decision-table thresholds
    pub difficulty: DifficultyThresholds,
    /// Serving-count bounds for scaling
    pub servings: ServingLimits,
    /// Timer recognition ranges
    pub timers: TimerLimits,
}
