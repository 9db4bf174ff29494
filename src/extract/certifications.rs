//! Certification extraction
//!
//! A certifications section is authoritative: every line in it is one
//! certificate, kept verbatim after marker cleanup. Without a section,
//! full-text lines naming `certified`/`certification` or a vendor plus
//! credential keyword are collected at reduced confidence.

use crate::extract::normalizer::{strip_bullet, trim_punctuation};
use crate::extract::strategy::{run_cascade, Scope, Strategy};
use regex::Regex;
use std::collections::HashSet;

const CONFIDENCE_SECTION: f64 = 0.85;
const CONFIDENCE_FALLBACK: f64 = 0.6;

pub struct CertificationExtractor {
    numbered_regex: Regex,
    label_regex: Regex,
    certified_word: Regex,
    certificate_word: Regex,
    vendor_combo: Regex,
}

impl CertificationExtractor {
    pub fn new() -> Self {
        let numbered_regex = Regex::new(r"^\d{1,2}[.)]\s+").expect("Invalid numbered list regex");

        let label_regex =
            Regex::new(r"(?i)^certifications?\s*[:\-]\s*").expect("Invalid certification label regex");

        let certified_word = Regex::new(r"(?i)\bcertified\b").expect("Invalid certified regex");

        let certificate_word =
            Regex::new(r"(?i)\bcertificat(?:e|ion)s?\b").expect("Invalid certificate regex");

        // Vendor name followed later in the line by a credential keyword,
        // catching entries like "AWS Solutions Architect Professional" that
        // never spell out "certified".
        let vendor_combo = Regex::new(
            r"(?i)\b(?:aws|microsoft|google|oracle|cisco)\b[\w\s:.-]*\b(?:certified|certification|certificate|associate|professional|fundamentals|specialist|expert)\b",
        )
        .expect("Invalid vendor credential regex");

        Self {
            numbered_regex,
            label_regex,
            certified_word,
            certificate_word,
            vendor_combo,
        }
    }

    pub fn extract(&self, section_text: &str, full_text: &str) -> (Vec<String>, f64) {
        let strategies = [
            Strategy {
                name: "section-lines",
                confidence: CONFIDENCE_SECTION,
                scope: Scope::SectionOnly,
                run: Self::section_lines,
            },
            Strategy {
                name: "credential-keyword",
                confidence: CONFIDENCE_FALLBACK,
                scope: Scope::FullText,
                run: Self::keyword_lines,
            },
        ];

        match run_cascade("certifications", &strategies, self, section_text, full_text) {
            Some(outcome) => (dedup(outcome.entries), outcome.confidence),
            None => (Vec::new(), 0.0),
        }
    }

    fn section_lines(&self, text: &str) -> Vec<String> {
        text.lines()
            .filter_map(|raw| {
                let value = self.tidy(raw);
                (!value.is_empty()).then(|| value.to_string())
            })
            .collect()
    }

    /// Detection runs on the raw line so an inline `Certification:` label
    /// still counts as evidence after tidying removes it.
    fn keyword_lines(&self, text: &str) -> Vec<String> {
        text.lines()
            .filter_map(|raw| {
                if !self.certified_word.is_match(raw)
                    && !self.certificate_word.is_match(raw)
                    && !self.vendor_combo.is_match(raw)
                {
                    return None;
                }
                let value = self.tidy(raw);
                (!value.is_empty()).then(|| value.to_string())
            })
            .collect()
    }

    /// Strip bullet, numbered marker, and inline `Certification:` label.
    fn tidy<'a>(&self, line: &'a str) -> &'a str {
        let mut value = strip_bullet(line);
        if let Some(marker) = self.numbered_regex.find(value) {
            value = &value[marker.end()..];
        }
        if let Some(label) = self.label_regex.find(value) {
            value = &value[label.end()..];
        }
        trim_punctuation(value)
    }
}

impl Default for CertificationExtractor {
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_section_lines_become_certificates() {
        let extractor = CertificationExtractor::new();
        let section = "• AWS Certified Solutions Architect\n• Scrum Master Certification\n\n• First Aid Training";

        let (certificates, confidence) = extractor.extract(section, section);

        assert_eq!(confidence, 0.85);
        assert_eq!(
            certificates,
            [
                "AWS Certified Solutions Architect",
                "Scrum Master Certification",
                "First Aid Training"
            ]
        );
    }

    #[test]
    fn test_numbered_section_lines() {
        let extractor = CertificationExtractor::new();
        let section = "1. Oracle Java SE 8 Programmer\n2. Cisco CCNA";

        let (certificates, _) = extractor.extract(section, section);

        assert_eq!(certificates, ["Oracle Java SE 8 Programmer", "Cisco CCNA"]);
    }

    #[test]
    fn test_fallback_certified_keyword() {
        let extractor = CertificationExtractor::new();
        let full = "Jane Doe\nCertified Kubernetes Administrator (2021)\nLikes dogs";

        let (certificates, confidence) = extractor.extract("", full);

        assert_eq!(confidence, 0.6);
        assert_eq!(certificates, ["Certified Kubernetes Administrator (2021)"]);
    }

    #[test]
    fn test_fallback_vendor_without_certified_word() {
        let extractor = CertificationExtractor::new();
        let full = "AWS Solutions Architect Professional\nWorked with AWS daily";

        let (certificates, confidence) = extractor.extract("", full);

        assert_eq!(confidence, 0.6);
        assert_eq!(certificates, ["AWS Solutions Architect Professional"]);
    }

    #[test]
    fn test_inline_label_is_stripped() {
        let extractor = CertificationExtractor::new();
        let full = "Certification: Google Cloud Associate Engineer";

        let (certificates, _) = extractor.extract("", full);

        assert_eq!(certificates, ["Google Cloud Associate Engineer"]);
    }

    #[test]
    fn test_case_insensitive_dedup() {
        let extractor = CertificationExtractor::new();
        let section = "• AWS Certified Developer\n• aws certified developer";

        let (certificates, _) = extractor.extract(section, section);

        assert_eq!(certificates, ["AWS Certified Developer"]);
    }

    #[test]
    fn test_plain_text_detects_nothing() {
        let extractor = CertificationExtractor::new();
        let (certificates, confidence) =
            extractor.extract("", "Experienced developer who enjoys hiking");
        assert!(certificates.is_empty());
        assert_eq!(confidence, 0.0);
    }

    #[test]
    fn test_empty_input_detects_nothing() {
        let extractor = CertificationExtractor::new();
        let (certificates, confidence) = extractor.extract("", "");
        assert!(certificates.is_empty());
        assert_eq!(confidence, 0.0);
    }
}
