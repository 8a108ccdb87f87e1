//! # Recipe Insights
//!
//! Text-and-number analysis for recipe records: ingredient normalization,
//! diet compatibility with substitutions, difficulty classification,
//! serving-count scaling and timer extraction from instruction text.
//!
//! Every analysis operation is pure and synchronous. The curated word lists
//! live in a vocabulary asset (`data/vocabulary.json`) that is compiled in
//! and can be replaced at runtime.

pub mod analysis_config;
pub mod diet_matcher;
pub mod difficulty;
pub mod ingredient_model;
pub mod ingredient_normalizer;
pub mod ingredient_parser;
pub mod localization;
pub mod quantity_scaler;
pub mod recipe_analyzer;
pub mod timer_extractor;
pub mod vocabulary;
pub mod vocabulary_errors;
