//! Interest extraction
//!
//! Interest sections are comma/semicolon/bullet lists, one or many lines.
//! Without a section, an inline `Interests:`/`Hobbies:` label anywhere in
//! the document yields the same list at reduced confidence.

use crate::extract::normalizer::{strip_bullet, trim_punctuation};
use crate::extract::strategy::{run_cascade, Scope, Strategy};
use regex::Regex;
use std::collections::HashSet;

const CONFIDENCE_SECTION: f64 = 0.85;
const CONFIDENCE_FALLBACK: f64 = 0.6;

pub struct InterestExtractor {
    label_regex: Regex,
    split_regex: Regex,
}

impl InterestExtractor {
    pub fn new() -> Self {
        let label_regex = Regex::new(
            r"(?i)\b(?:interests?|hobbies)\b\s*(?:[:\-]\s*|include[sd]?\s+)(.+)",
        )
        .expect("Invalid interest label regex");

        let split_regex =
            Regex::new(r"(?i)\s*(?:,|;|•|\band\b)\s*").expect("Invalid interest split regex");

        Self {
            label_regex,
            split_regex,
        }
    }

    pub fn extract(&self, section_text: &str, full_text: &str) -> (Vec<String>, f64) {
        let strategies = [
            Strategy {
                name: "section-list",
                confidence: CONFIDENCE_SECTION,
                scope: Scope::SectionOnly,
                run: Self::section_items,
            },
            Strategy {
                name: "labeled-line",
                confidence: CONFIDENCE_FALLBACK,
                scope: Scope::FullText,
                run: Self::labeled_lines,
            },
        ];

        match run_cascade("interests", &strategies, self, section_text, full_text) {
            Some(outcome) => (dedup(outcome.entries), outcome.confidence),
            None => (Vec::new(), 0.0),
        }
    }

    fn section_items(&self, text: &str) -> Vec<String> {
        text.lines().flat_map(|raw| self.items(raw)).collect()
    }

    fn labeled_lines(&self, text: &str) -> Vec<String> {
        text.lines()
            .filter(|raw| self.label_regex.is_match(raw))
            .flat_map(|raw| self.items(raw))
            .collect()
    }

    /// Split one line into interest items, honoring an inline label when
    /// present so "Hobbies: chess, reading" yields the list, not the label.
    fn items(&self, line: &str) -> Vec<String> {
        let stripped = strip_bullet(line);
        let content = match self.label_regex.captures(stripped) {
            Some(caps) => caps.get(1).map_or(stripped, |m| m.as_str()),
            None => stripped,
        };
        self.split_regex
            .split(content)
            .filter_map(|item| {
                let item = trim_punctuation(item);
                (!item.is_empty()).then(|| item.to_string())
            })
            .collect()
    }
}

impl Default for InterestExtractor {
    fn default() -> Self {
        Self::new()
    }
}

fn dedup(entries: Vec<String>) -> Vec<String> {
    let mut seen = HashSet::new();
    entries
        .into_iter()
        .filter(|value| seen.insert(value.to_lowercase()))
        .collect()
}
