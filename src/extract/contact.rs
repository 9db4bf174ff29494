//! Contact detail and candidate name extraction
//!
//! Every field runs its own ordered pattern list, most specific first:
//! labeled forms (`Email: ...`) outrank bare pattern hits, and the first
//! valid match wins. A field with no match is an empty string with
//! confidence 0.0, never an error.

use crate::config::ExtractionConfig;
use crate::profile::{ContactInfo, NOT_DETECTED};
use regex::Regex;
use std::collections::HashSet;

const CONFIDENCE_LABELED: f64 = 1.0;
const CONFIDENCE_PATTERN: f64 = 0.9;
const CONFIDENCE_HEURISTIC: f64 = 0.8;

/// Domains that indicate template text rather than a real address.
const PLACEHOLDER_DOMAINS: [&str; 4] = ["email.com", "domain.com", "company.com", "yourdomain.com"];
const IMAGE_SUFFIXES: [&str; 5] = [".png", ".jpg", ".jpeg", ".gif", ".svg"];

#[derive(Debug, Clone, Default)]
pub struct ContactExtraction {
    pub name: String,
    pub contact: ContactInfo,
    pub name_confidence: f64,
    pub email_confidence: f64,
    pub phone_confidence: f64,
    pub linkedin_confidence: f64,
    pub github_confidence: f64,
    pub skype_confidence: f64,
}

pub struct ContactExtractor {
    labeled_email: Regex,
    bare_email: Regex,
    labeled_phone: Regex,
    bare_phone: Regex,
    labeled_linkedin: Regex,
    linkedin_url: Regex,
    labeled_github: Regex,
    github_url: Regex,
    labeled_skype: Regex,
    labeled_name: Regex,
    standalone_name: Regex,
    name_disqualifier: Regex,
    name_word: Regex,
    name_blacklist: HashSet<&'static str>,
    name_scan_lines: usize,
}

impl ContactExtractor {
    pub fn new(config: &ExtractionConfig) -> Self {
        let labeled_email =
            Regex::new(r"(?i)\be-?mail\b[\s:]*([A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,})")
                .expect("Invalid labeled email regex");

        let bare_email = Regex::new(r"[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}")
            .expect("Invalid email regex");

        let labeled_phone = Regex::new(
            r"(?i)\b(?:phone|mobile|tel|telephone|contact)(?:\s*(?:no|number))?\b[\s:.]*(\+?[\d\-.\s()]{8,20})",
        )
        .expect("Invalid labeled phone regex");

        let bare_phone = Regex::new(r"(?:\+\d{1,3}[-.\s]?)?(?:\(\d{1,5}\)[-.\s]?)?\d(?:[-.\s]?\d){8,14}")
            .expect("Invalid phone regex");

        let labeled_linkedin = Regex::new(r"(?i)\blinkedin\b[\s:]*(\S+)")
            .expect("Invalid labeled linkedin regex");

        let linkedin_url =
            Regex::new(r"(?i)(?:https?://)?(?:www\.)?linkedin\.com/in/([A-Za-z0-9_-]+)/?")
                .expect("Invalid linkedin url regex");

        let labeled_github =
            Regex::new(r"(?i)\bgithub\b[\s:]*(\S+)").expect("Invalid labeled github regex");

        let github_url = Regex::new(r"(?i)(?:https?://)?(?:www\.)?github\.com/([A-Za-z0-9-]+)/?")
            .expect("Invalid github url regex");

        let labeled_skype = Regex::new(r"(?i)\bskype(?:\s*id)?\b[\s:]*([A-Za-z0-9._-]+)")
            .expect("Invalid skype regex");

        let labeled_name =
            Regex::new(r"(?i)^(?:name|student\s*name|candidate(?:\s*name)?)[\s:]+([A-Za-z][A-Za-z\s.'-]+)$")
                .expect("Invalid labeled name regex");

        // 1 to 4 capitalized words, initials allowed
        let standalone_name =
            Regex::new(r"^([A-Z][a-z]+(?:\s+[A-Z](?:[a-z]+|\.[a-z]*)?){0,3})$")
                .expect("Invalid standalone name regex");

        let name_disqualifier =
            Regex::new(r"(?i)[\d@]|http|www|\.com|\.org|\.net").expect("Invalid name disqualifier regex");

        let name_word =
            Regex::new(r"^[A-Z][a-zA-Z'\-.]*$").expect("Invalid name word regex");

        let name_blacklist: HashSet<&'static str> = [
            "resume",
            "curriculum",
            "vitae",
            "cv",
            "objective",
            "summary",
            "profile",
            "contact",
            "phone",
            "email",
            "address",
            "linkedin",
            "github",
            "skills",
            "experience",
            "education",
            "projects",
            "work",
            "employment",
            "qualification",
            "certification",
            "achievements",
            "awards",
            "languages",
            "interests",
            "references",
        ]
        .into_iter()
        .collect();

        Self {
            labeled_email,
            bare_email,
            labeled_phone,
            bare_phone,
            labeled_linkedin,
            linkedin_url,
            labeled_github,
            github_url,
            labeled_skype,
            labeled_name,
            standalone_name,
            name_disqualifier,
            name_word,
            name_blacklist,
            name_scan_lines: config.name_scan_lines,
        }
    }

    pub fn extract(&self, text: &str) -> ContactExtraction {
        let (email, email_confidence) = self.extract_email(text);
        let (phone, phone_confidence) = self.extract_phone(text);
        let (linkedin, linkedin_confidence) = self.extract_linkedin(text);
        let (github, github_confidence) = self.extract_github(text);
        let (skype, skype_confidence) = self.extract_skype(text);
        let (name, name_confidence) = self.extract_name(text);

        ContactExtraction {
            name,
            contact: ContactInfo {
                email,
                phone,
                linkedin,
                github,
                skype,
            },
            name_confidence,
            email_confidence,
            phone_confidence,
            linkedin_confidence,
            github_confidence,
            skype_confidence,
        }
    }

    fn extract_email(&self, text: &str) -> (String, f64) {
        if let Some(captures) = self.labeled_email.captures(text) {
            let candidate = captures[1].to_string();
            if Self::is_valid_email(&candidate) {
                return (candidate, CONFIDENCE_LABELED);
            }
        }
        for found in self.bare_email.find_iter(text) {
            if Self::is_valid_email(found.as_str()) {
                return (found.as_str().to_string(), CONFIDENCE_PATTERN);
            }
        }
        (String::new(), 0.0)
    }

    fn is_valid_email(candidate: &str) -> bool {
        let lower = candidate.to_lowercase();
        if IMAGE_SUFFIXES.iter().any(|suffix| lower.ends_with(suffix)) {
            return false;
        }
        match lower.split('@').nth(1) {
            Some(domain) => !PLACEHOLDER_DOMAINS.contains(&domain),
            None => false,
        }
    }

    fn extract_phone(&self, text: &str) -> (String, f64) {
        if let Some(captures) = self.labeled_phone.captures(text) {
            if let Some(cleaned) = Self::clean_phone(&captures[1]) {
                return (cleaned, CONFIDENCE_LABELED);
            }
        }
        for found in self.bare_phone.find_iter(text) {
            if let Some(cleaned) = Self::clean_phone(found.as_str()) {
                return (cleaned, CONFIDENCE_PATTERN);
            }
        }
        (String::new(), 0.0)
    }

    /// Strip separators and enforce the 10 to 15 digit rule.
    fn clean_phone(raw: &str) -> Option<String> {
        let mut cleaned = String::new();
        for ch in raw.chars() {
            if ch.is_ascii_digit() {
                cleaned.push(ch);
            } else if ch == '+' && cleaned.is_empty() {
                cleaned.push(ch);
            }
        }
        let digits = cleaned.chars().filter(|c| c.is_ascii_digit()).count();
        if (10..=15).contains(&digits) {
            Some(cleaned)
        } else {
            None
        }
    }

    fn extract_linkedin(&self, text: &str) -> (String, f64) {
        if let Some(captures) = self.labeled_linkedin.captures(text) {
            let token = &captures[1];
            if let Some(url_captures) = self.linkedin_url.captures(token) {
                return (
                    format!("https://linkedin.com/in/{}", &url_captures[1]),
                    CONFIDENCE_LABELED,
                );
            }
            if Self::is_plain_username(token) {
                return (
                    format!("https://linkedin.com/in/{}", token),
                    CONFIDENCE_LABELED,
                );
            }
        }
        if let Some(captures) = self.linkedin_url.captures(text) {
            return (
                format!("https://linkedin.com/in/{}", &captures[1]),
                CONFIDENCE_PATTERN,
            );
        }
        (String::new(), 0.0)
    }

    fn extract_github(&self, text: &str) -> (String, f64) {
        if let Some(captures) = self.labeled_github.captures(text) {
            let token = &captures[1];
            if let Some(url_captures) = self.github_url.captures(token) {
                return (
                    format!("https://github.com/{}", &url_captures[1]),
                    CONFIDENCE_LABELED,
                );
            }
            if Self::is_plain_username(token) {
                return (format!("https://github.com/{}", token), CONFIDENCE_LABELED);
            }
        }
        if let Some(captures) = self.github_url.captures(text) {
            return (
                format!("https://github.com/{}", &captures[1]),
                CONFIDENCE_PATTERN,
            );
        }
        (String::new(), 0.0)
    }

    fn is_plain_username(token: &str) -> bool {
        !token.is_empty()
            && token
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
    }

    fn extract_skype(&self, text: &str) -> (String, f64) {
        // Labeled only; a bare handle is indistinguishable from prose
        if let Some(captures) = self.labeled_skype.captures(text) {
            return (captures[1].to_string(), CONFIDENCE_LABELED);
        }
        (String::new(), 0.0)
    }

    fn extract_name(&self, text: &str) -> (String, f64) {
        let lines: Vec<&str> = text
            .lines()
            .map(|l| l.trim())
            .filter(|l| !l.is_empty())
            .collect();

        for line in lines.iter().take(self.name_scan_lines) {
            if let Some(captures) = self.labeled_name.captures(line) {
                let candidate = captures[1].trim().to_string();
                if self.is_valid_name(&candidate) {
                    return (candidate, CONFIDENCE_LABELED);
                }
            }
        }

        let standalone_window = self.name_scan_lines.min(3);
        for line in lines.iter().take(standalone_window) {
            let stripped = line.trim_start_matches('•').trim();
            if let Some(captures) = self.standalone_name.captures(stripped) {
                let candidate = captures[1].trim().to_string();
                if self.is_valid_name(&candidate) {
                    return (candidate, CONFIDENCE_HEURISTIC);
                }
            }
        }

        (NOT_DETECTED.to_string(), 0.0)
    }

    fn is_valid_name(&self, candidate: &str) -> bool {
        let words: Vec<&str> = candidate.split_whitespace().collect();
        if words.is_empty() || words.len() > 4 {
            return false;
        }
        if candidate.ends_with(':') || self.name_disqualifier.is_match(candidate) {
            return false;
        }

        for word in &words {
            let clean = word.trim_matches(|c| c == '.' || c == ',');
            if clean.is_empty() {
                return false;
            }
            if self.name_blacklist.contains(clean.to_lowercase().as_str()) {
                return false;
            }
            // All-caps tokens longer than initials read as headers
            if clean.len() > 2 && clean.chars().all(|c| c.is_uppercase()) {
                return false;
            }
            if !self.name_word.is_match(clean) {
                return false;
            }
        }
        true
    }
}
