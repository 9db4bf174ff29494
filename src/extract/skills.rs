//! Skill detection against the closed taxonomy
//!
//! One leftmost-longest, case-insensitive automaton built over every
//! taxonomy keyword and alias scans the whole document; hits flanked by
//! alphanumerics are discarded, survivors are alias-collapsed and recorded
//! under their single category in canonical lower-case. An optional fuzzy
//! pass over the skills section catches near-miss spellings.

use crate::config::{ExtractionConfig, SkillTaxonomy};
use crate::error::{Result, ResumeProfilerError};
use crate::profile::SkillsMap;
use aho_corasick::AhoCorasick;
use strsim::jaro_winkler;
use unicode_segmentation::UnicodeSegmentation;

const CONFIDENCE_TEXT: f64 = 0.85;
const CONFIDENCE_SECTION: f64 = 0.95;

pub struct SkillsCategorizer {
    automaton: AhoCorasick,
    terms: Vec<String>,
    taxonomy: SkillTaxonomy,
    fuzzy_matching: bool,
    fuzzy_threshold: f64,
}

impl SkillsCategorizer {
    pub fn new(taxonomy: &SkillTaxonomy, extraction: &ExtractionConfig) -> Result<Self> {
        let terms = taxonomy.match_terms();
        let automaton = AhoCorasick::builder()
            .ascii_case_insensitive(true)
            .match_kind(aho_corasick::MatchKind::LeftmostLongest)
            .build(&terms)
            .map_err(|e| {
                ResumeProfilerError::Configuration(format!("Failed to build skill matcher: {}", e))
            })?;

        Ok(Self {
            automaton,
            terms,
            taxonomy: taxonomy.clone(),
            fuzzy_matching: extraction.fuzzy_matching,
            fuzzy_threshold: extraction.fuzzy_threshold,
        })
    }

    /// Scan the whole document, then rescan the skills section (exact plus
    /// the optional fuzzy pass) to decide whether the section corroborates
    /// the hits. 0.85 for document-level matches, 0.95 when the section
    /// confirms, 0.0 when nothing matched.
    pub fn categorize(&self, full_text: &str, section_text: &str) -> (SkillsMap, f64) {
        let mut skills = SkillsMap::new();
        self.automaton_scan(full_text, &mut skills);

        let mut section_hits = self.automaton_scan(section_text, &mut skills);
        if self.fuzzy_matching {
            section_hits += self.fuzzy_scan(section_text, &mut skills);
        }

        if skills.is_empty() {
            return (skills, 0.0);
        }
        let confidence = if section_hits > 0 {
            CONFIDENCE_SECTION
        } else {
            CONFIDENCE_TEXT
        };
        (skills, confidence)
    }

    /// Canonical form of a single term when the taxonomy knows it.
    pub fn canonical_term(&self, term: &str) -> Option<String> {
        self.taxonomy
            .canonicalize(&term.to_lowercase())
            .map(|(_, canonical)| canonical)
    }

    /// Taxonomy terms found in `text`, category-checked literal matches
    /// only. Returns canonical skill names in hit order, for callers that
    /// mine technology mentions out of free-form descriptions.
    pub fn scan_terms(&self, text: &str) -> Vec<String> {
        let mut found = Vec::new();
        for mat in self.automaton.find_iter(text) {
            if !Self::word_bounded(text, mat.start(), mat.end()) {
                continue;
            }
            let term = &self.terms[mat.pattern().as_usize()];
            if let Some((_, canonical)) = self.taxonomy.canonicalize(term) {
                if !found.contains(&canonical) {
                    found.push(canonical);
                }
            }
        }
        found
    }

    fn automaton_scan(&self, text: &str, skills: &mut SkillsMap) -> usize {
        let mut hits = 0;
        for mat in self.automaton.find_iter(text) {
            if !Self::word_bounded(text, mat.start(), mat.end()) {
                continue;
            }
            let term = &self.terms[mat.pattern().as_usize()];
            if let Some((category, canonical)) = self.taxonomy.canonicalize(term) {
                skills.insert(category, canonical);
                hits += 1;
            }
        }
        hits
    }

    /// Near-miss spellings in the skills section: tokens of length >= 4
    /// within one character of a taxonomy term and above the similarity
    /// threshold. Only ever adds matches.
    fn fuzzy_scan(&self, text: &str, skills: &mut SkillsMap) -> usize {
        let mut hits = 0;
        for token in text.unicode_words() {
            if token.chars().count() < 4 {
                continue;
            }
            let token_lower = token.to_lowercase();
            if self.terms.iter().any(|term| *term == token_lower) {
                continue;
            }

            for term in &self.terms {
                let term_len = term.chars().count();
                if term_len < 4 || token_lower.chars().count().abs_diff(term_len) > 1 {
                    continue;
                }
                if jaro_winkler(&token_lower, term) < self.fuzzy_threshold {
                    continue;
                }
                if let Some((category, canonical)) = self.taxonomy.canonicalize(term) {
                    skills.insert(category, canonical);
                    hits += 1;
                    break;
                }
            }
        }
        hits
    }

    /// A hit directly preceded or followed by an alphanumeric is part of a
    /// larger word and does not count.
    fn word_bounded(text: &str, start: usize, end: usize) -> bool {
        let before = text[..start].chars().next_back();
        let after = text[end..].chars().next();
        before.map_or(true, |c| !c.is_alphanumeric())
            && after.map_or(true, |c| !c.is_alphanumeric())
    }
}
