//! # Timer Extractor
//!
//! Finds duration expressions in an instruction step and turns them into
//! countdown specifications for cooking mode.
//!
//! ## Recognized expressions
//!
//! - `<N> minutes` with N in 1..=180
//! - `<N> hours` with N in 1..=5
//! - "quarter hour" (900 s) and "half hour" (1800 s)
//! - a standalone "hour" (3600 s) or "minute" (60 s) that is not directly
//!   preceded by a number or by a quarter/half modifier
//!
//! Expressions are collected in that order, minutes first, and a duration
//! already produced by an earlier expression is skipped.

use crate::analysis_config::TimerLimits;
use crate::vocabulary::{word_alternation, TimerVocabulary, Vocabulary};
use crate::vocabulary_errors::VocabularyError;
use lazy_static::lazy_static;
use log::{debug, info, trace};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

const SECONDS_PER_MINUTE: u64 = 60;
const SECONDS_PER_HOUR: u64 = 3600;
const QUARTER_HOUR_SECONDS: u64 = 900;
const HALF_HOUR_SECONDS: u64 = 1800;

lazy_static! {
    static ref DEFAULT_EXTRACTOR: TimerExtractor =
        TimerExtractor::new(Vocabulary::builtin(), TimerLimits::default())
            .expect("Built-in timer vocabulary should compile");
}

/// A countdown found in instruction text
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParsedTimer {
    /// Countdown length, always positive
    pub duration_seconds: u64,
    /// The expression as written (e.g. "10 דקות")
    pub label: String,
}

/// Regex-driven duration recognizer
#[derive(Debug, Clone)]
pub struct TimerExtractor {
    minutes: Option<Regex>,
    hours: Option<Regex>,
    quarter_hour: Option<Regex>,
    half_hour: Option<Regex>,
    bare_hour: Option<Regex>,
    bare_minute: Option<Regex>,
    /// Lowercase quarter/half modifiers
    modifiers: Vec<String>,
    limits: TimerLimits,
}

impl TimerExtractor {
    /// Build an extractor from a vocabulary's timer words
    pub fn new(vocabulary: &Vocabulary, limits: TimerLimits) -> Result<Self, VocabularyError> {
        let words = &vocabulary.timers;
        info!(
            "Creating TimerExtractor (minutes 1-{}, hours 1-{})",
            limits.max_minutes, limits.max_hours
        );
        Ok(Self {
            minutes: numbered_pattern(&words.minute_units)?,
            hours: numbered_pattern(&words.hour_units)?,
            quarter_hour: phrase_pattern(&words.quarter_hour_phrases)?,
            half_hour: phrase_pattern(&words.half_hour_phrases)?,
            bare_hour: phrase_pattern(&words.bare_hour_words)?,
            bare_minute: phrase_pattern(&words.bare_minute_words)?,
            modifiers: lowercase_modifiers(words),
            limits,
        })
    }

    /// The extractor built from the built-in vocabulary and default limits
    pub fn builtin() -> &'static TimerExtractor {
        &DEFAULT_EXTRACTOR
    }

    /// Extract timers from one instruction step
    ///
    /// # Examples
    ///
    /// ```rust
    /// use recipe_insights::timer_extractor::TimerExtractor;
    ///
    /// let timers = TimerExtractor::builtin().parse_timers_from_text("בשלו 10 דקות ואז המשיכו חצי שעה");
    /// assert_eq!(timers.len(), 2);
    /// assert_eq!(timers[0].duration_seconds, 600);
    /// assert_eq!(timers[1].label, "חצי שעה");
    /// ```
    pub fn parse_timers_from_text(&self, text: &str) -> Vec<ParsedTimer> {
        let mut collector = TimerCollector::default();

        if let Some(pattern) = &self.minutes {
            for (value, label) in numbered_matches(pattern, text) {
                if (1..=self.limits.max_minutes).contains(&value) {
                    collector.push(value * SECONDS_PER_MINUTE, label);
                } else {
                    debug!("Ignoring out-of-range minutes '{}'", label);
                }
            }
        }

        if let Some(pattern) = &self.hours {
            for (value, label) in numbered_matches(pattern, text) {
                if (1..=self.limits.max_hours).contains(&value) {
                    collector.push(value * SECONDS_PER_HOUR, label);
                } else {
                    debug!("Ignoring out-of-range hours '{}'", label);
                }
            }
        }

        if let Some(pattern) = &self.quarter_hour {
            for m in pattern.find_iter(text) {
                collector.push(QUARTER_HOUR_SECONDS, clean_label(m.as_str()));
            }
        }

        if let Some(pattern) = &self.half_hour {
            for m in pattern.find_iter(text) {
                collector.push(HALF_HOUR_SECONDS, clean_label(m.as_str()));
            }
        }

        if let Some(pattern) = &self.bare_hour {
            for m in pattern.find_iter(text) {
                if self.is_standalone(&text[..m.start()]) {
                    collector.push(SECONDS_PER_HOUR, clean_label(m.as_str()));
                }
            }
        }

        if let Some(pattern) = &self.bare_minute {
            for m in pattern.find_iter(text) {
                if self.is_standalone(&text[..m.start()]) {
                    collector.push(SECONDS_PER_MINUTE, clean_label(m.as_str()));
                }
            }
        }

        collector.timers
    }

    /// Whether a bare word with `preceding` text before it stands on its own
    fn is_standalone(&self, preceding: &str) -> bool {
        let preceding = preceding.trim_end().to_lowercase();
        if preceding.ends_with(|c: char| c.is_ascii_digit()) {
            return false;
        }
        !self
            .modifiers
            .iter()
            .any(|modifier| preceding.ends_with(modifier.as_str()))
    }
}

/// Keeps timers in insertion order, one per duration
#[derive(Default)]
struct TimerCollector {
    seen: HashSet<u64>,
    timers: Vec<ParsedTimer>,
}

impl TimerCollector {
    fn push(&mut self, duration_seconds: u64, label: String) {
        if self.seen.insert(duration_seconds) {
            trace!("Timer '{}' -> {}s", label, duration_seconds);
            self.timers.push(ParsedTimer {
                duration_seconds,
                label,
            });
        } else {
            trace!("Skipping duplicate duration {}s ('{}')", duration_seconds, label);
        }
    }
}

fn numbered_pattern(units: &[String]) -> Result<Option<Regex>, VocabularyError> {
    match word_alternation(units) {
        Some(units) => Ok(Some(Regex::new(&format!(
            r"(?i)(?P<n>[0-9]+)\s*(?:{units})"
        ))?)),
        None => Ok(None),
    }
}

fn phrase_pattern(phrases: &[String]) -> Result<Option<Regex>, VocabularyError> {
    match word_alternation(phrases) {
        Some(phrases) => Ok(Some(Regex::new(&format!(r"(?i)(?:{phrases})"))?)),
        None => Ok(None),
    }
}

/// Whole-number `<N> unit` matches in text order
///
/// A number that continues a decimal or fraction ("1.5 שעות", "1½ שעות")
/// is not a whole count, so the match is dropped rather than read from its
/// last digits.
fn numbered_matches(pattern: &Regex, text: &str) -> Vec<(u64, String)> {
    pattern
        .captures_iter(text)
        .filter_map(|captures| {
            let whole = captures.get(0)?;
            if continues_quantity(&text[..whole.start()]) {
                debug!("Ignoring fractional duration ending in '{}'", whole.as_str());
                return None;
            }
            let value = captures.name("n")?.as_str().parse::<u64>().ok()?;
            Some((value, clean_label(whole.as_str())))
        })
        .collect()
}

fn continues_quantity(preceding: &str) -> bool {
    preceding
        .chars()
        .next_back()
        .is_some_and(|c| c.is_ascii_digit() || matches!(c, '.' | ',' | '/' | '⁄' | '½' | '¼' | '¾'))
}

fn lowercase_modifiers(words: &TimerVocabulary) -> Vec<String> {
    words
        .modifiers
        .iter()
        .map(|modifier| modifier.trim().to_lowercase())
        .collect()
}

/// Collapse runs of whitespace in a matched expression
fn clean_label(matched: &str) -> String {
    matched.split_whitespace().collect::<Vec<&str>>().join(" ")
}

/// Extract timers with the built-in vocabulary
pub fn parse_timers_from_text(text: &str) -> Vec<ParsedTimer> {
    TimerExtractor::builtin().parse_timers_from_text(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn timer(duration_seconds: u64, label: &str) -> ParsedTimer {
        ParsedTimer {
            duration_seconds,
            label: label.to_string(),
        }
    }

    #[test]
    fn test_minutes_and_half_hour() {
        let timers = parse_timers_from_text("בשלו 10 דקות ואז המשיכו חצי שעה");
        assert_eq!(timers, vec![timer(600, "10 דקות"), timer(1800, "חצי שעה")]);
    }

    #[test]
    fn test_hours_and_quarter_hour() {
        let timers = parse_timers_from_text("מתפיחים 2 שעות, ואופים רבע שעה");
        assert_eq!(timers, vec![timer(7200, "2 שעות"), timer(900, "רבע שעה")]);
    }

    #[test]
    fn test_bare_words() {
        assert_eq!(parse_timers_from_text("מבשלים כשעה"), vec![timer(3600, "שעה")]);
        assert_eq!(parse_timers_from_text("מערבבים דקה"), vec![timer(60, "דקה")]);
    }

    #[test]
    fn test_bare_word_after_number_is_not_standalone() {
        assert_eq!(parse_timers_from_text("אופים 1 שעה"), vec![timer(3600, "1 שעה")]);
        assert_eq!(parse_timers_from_text("מערבבים 1 דקה"), vec![timer(60, "1 דקה")]);
    }

    #[test]
    fn test_out_of_range_values_are_ignored() {
        assert!(parse_timers_from_text("מבשלים 200 דקות").is_empty());
        assert!(parse_timers_from_text("משרים 12 שעות").is_empty());
        assert!(parse_timers_from_text("0 דקות").is_empty());
    }

    #[test]
    fn test_duplicate_durations_keep_first() {
        let timers = parse_timers_from_text("אופים 60 דקות, כלומר שעה");
        assert_eq!(timers, vec![timer(3600, "60 דקות")]);

        let timers = parse_timers_from_text("30 דקות או חצי שעה");
        assert_eq!(timers, vec![timer(1800, "30 דקות")]);
    }

    #[test]
    fn test_minutes_in_text_order() {
        let timers = parse_timers_from_text("מטגנים 5 דקות, הופכים ומטגנים עוד 3 דקות");
        assert_eq!(timers, vec![timer(300, "5 דקות"), timer(180, "3 דקות")]);
    }

    #[test]
    fn test_decimal_durations_are_not_read_from_last_digits() {
        assert!(parse_timers_from_text("מתפיחים 1.5 שעות").is_empty());
        assert!(parse_timers_from_text("מבשלים 2.5 דקות").is_empty());
        assert!(parse_timers_from_text("מבשלים 2,5 דקות").is_empty());

        let timers = parse_timers_from_text("מתפיחים 1.5 שעות ואופים 40 דקות");
        assert_eq!(timers, vec![timer(2400, "40 דקות")]);
    }

    #[test]
    fn test_no_timers() {
        assert!(parse_timers_from_text("מגישים חם").is_empty());
        assert!(parse_timers_from_text("").is_empty());
    }

    #[test]
    fn test_label_whitespace_is_collapsed() {
        let timers = parse_timers_from_text("מבשלים 15   דקות");
        assert_eq!(timers, vec![timer(900, "15 דקות")]);
    }
}
