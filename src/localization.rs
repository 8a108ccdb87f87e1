//! # Localization
//!
//! Fluent message bundles for the difficulty labels and the report printed
//! by the command-line tool. Hebrew is the default locale; English is also
//! bundled. Message files are compiled into the binary.

use crate::difficulty::DifficultyLevel;
use anyhow::{anyhow, Result};
use fluent_bundle::{FluentArgs, FluentBundle, FluentResource, FluentValue};
use log::{debug, warn};
use std::collections::HashMap;
use unic_langid::LanguageIdentifier;

/// Locale used when none is requested or the requested one is unsupported
pub const DEFAULT_LOCALE: &str = "he";

/// Locales with a bundled message file
pub const SUPPORTED_LOCALES: [&str; 2] = ["he", "en"];

const HE_MESSAGES: &str = include_str!("../locales/he/main.ftl");
const EN_MESSAGES: &str = include_str!("../locales/en/main.ftl");

/// Localization manager holding one bundle per supported locale
pub struct LocalizationManager {
    bundles: HashMap<String, FluentBundle<FluentResource>>,
    locale: String,
}

impl LocalizationManager {
    /// Create a manager that renders messages in `locale`
    ///
    /// An unsupported locale falls back to [`DEFAULT_LOCALE`].
    pub fn new(locale: &str) -> Result<Self> {
        let mut bundles = HashMap::new();
        bundles.insert("he".to_string(), Self::create_bundle("he", HE_MESSAGES)?);
        bundles.insert("en".to_string(), Self::create_bundle("en", EN_MESSAGES)?);

        Ok(Self {
            bundles,
            locale: detect_language(Some(locale)).to_string(),
        })
    }

    /// Create a fluent bundle for a specific locale
    fn create_bundle(locale: &str, source: &str) -> Result<FluentBundle<FluentResource>> {
        let language: LanguageIdentifier = locale.parse()?;
        let mut bundle = FluentBundle::new(vec![language]);
        // Terminal output: no bidi isolation marks around arguments
        bundle.set_use_isolating(false);

        let resource = FluentResource::try_new(source.to_string())
            .map_err(|(_, errors)| anyhow!("Invalid {} message file: {:?}", locale, errors))?;
        bundle
            .add_resource(resource)
            .map_err(|errors| anyhow!("Conflicting {} messages: {:?}", locale, errors))?;

        Ok(bundle)
    }

    /// The active locale
    pub fn locale(&self) -> &str {
        &self.locale
    }

    /// Get a localized message in the active locale
    pub fn get_message(&self, key: &str, args: Option<&HashMap<&str, &str>>) -> String {
        self.get_message_in_language(key, &self.locale, args)
    }

    /// Get a localized message in a specific language
    ///
    /// Keys missing from the requested language are looked up in the
    /// default locale before giving up.
    pub fn get_message_in_language(
        &self,
        key: &str,
        language: &str,
        args: Option<&HashMap<&str, &str>>,
    ) -> String {
        let language = detect_language(Some(language));
        let candidates = [language, DEFAULT_LOCALE];

        for candidate in candidates {
            let Some(bundle) = self.bundles.get(candidate) else {
                continue;
            };
            let Some(pattern) = bundle.get_message(key).and_then(|msg| msg.value()) else {
                continue;
            };

            let fluent_args = args.map(|args| {
                let mut fluent_args = FluentArgs::new();
                for (name, value) in args {
                    fluent_args.set(*name, FluentValue::from(*value));
                }
                fluent_args
            });

            let mut errors = vec![];
            let value = bundle.format_pattern(pattern, fluent_args.as_ref(), &mut errors);
            if !errors.is_empty() {
                debug!("Formatting '{}' in {}: {:?}", key, candidate, errors);
            }
            return value.into_owned();
        }

        format!("Missing translation: {}", key)
    }

    /// Get a localized message with simple string arguments
    pub fn get_message_with_args(&self, key: &str, args: &[(&str, &str)]) -> String {
        let args_map: HashMap<&str, &str> = args.iter().cloned().collect();
        self.get_message(key, Some(&args_map))
    }

    /// Display label for a difficulty level
    pub fn difficulty_label(&self, level: DifficultyLevel) -> String {
        self.get_message(level.message_id(), None)
    }
}

/// Map a requested locale tag to a supported locale
///
/// Region and script suffixes are ignored; anything unsupported resolves to
/// [`DEFAULT_LOCALE`].
pub fn detect_language(requested: Option<&str>) -> &'static str {
    let requested = requested.unwrap_or_default().trim().to_lowercase();
    // "he-IL" and "en_US" resolve to their language
    let language = requested.split(&['-', '_'][..]).next().unwrap_or_default();

    match SUPPORTED_LOCALES.iter().find(|supported| **supported == language) {
        Some(supported) => *supported,
        None => {
            if !requested.is_empty() {
                warn!("Unsupported locale '{}', using '{}'", requested, DEFAULT_LOCALE);
            }
            DEFAULT_LOCALE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_difficulty_labels() {
        let hebrew = LocalizationManager::new("he").unwrap();
        assert_eq!(hebrew.difficulty_label(DifficultyLevel::Easy), "קל");
        assert_eq!(hebrew.difficulty_label(DifficultyLevel::Hard), "קשה");

        let english = LocalizationManager::new("en").unwrap();
        assert_eq!(english.difficulty_label(DifficultyLevel::Medium), "Medium");
    }
}
