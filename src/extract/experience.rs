//! Work experience extraction
//!
//! Entry headings are recognized by three cascading pattern families:
//! `<title> at <company>` forms (including `worked as` and internship
//! phrasings), a reversed `<company> <title>` segment classifier driven by
//! corporate-suffix and role keyword sets, and a last-resort sweep for
//! lines pairing a role keyword with a year. Lines under a recognized
//! heading accumulate into that entry's description.

use crate::extract::normalizer::{strip_bullet, trim_punctuation};
use crate::extract::strategy::{run_cascade, Scope, Strategy};
use crate::profile::ExperienceEntry;
use regex::Regex;
use std::collections::HashSet;

const CONFIDENCE_TITLED: f64 = 0.9;
const CONFIDENCE_REVERSED: f64 = 0.8;
const CONFIDENCE_FALLBACK: f64 = 0.6;

/// Company capture shared by the heading patterns: lazy up to a comma,
/// pipe, parenthesis, date lead-in, or end of line.
const COMPANY_PATTERN: &str = r"([^,|\n]+?)(?:\s*[,|(]|\s+(?:from|since|between)\b|\s+(?:19|20)\d{2}\b|\s+(?:jan|feb|mar|apr|may|jun|jul|aug|sep|oct|nov|dec)[a-z]*\.?\s*\d{4}|\s*$)";

pub struct ExperienceExtractor {
    titled_regex: Regex,
    worked_as_regex: Regex,
    intern_regex: Regex,
    segment_regex: Regex,
    corporate_suffix: Regex,
    role_keyword: Regex,
    month_range: Regex,
    numeric_range: Regex,
    year_range: Regex,
    years_of_experience: Regex,
    year_token: Regex,
}

impl Default for ExperienceExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl ExperienceExtractor {
    pub fn new() -> Self {
        let titled_regex = Regex::new(&format!(
            r"(?i)^((?:[\w./+#&'-]+\s+){{0,4}}?(?:developer|engineer|programmer|analyst|manager|lead|architect|consultant|designer|scientist|administrator|specialist|intern|trainee|tester))\s+(?:at|@|with)\s+{}",
            COMPANY_PATTERN
        ))
        .expect("Invalid titled experience regex");

        let worked_as_regex = Regex::new(&format!(
            r"(?i)\b(?:work(?:ed|ing)?|employed)\s+as\s+(?:an?\s+)?([^,|\n]+?)\s+(?:at|with|for|in)\s+{}",
            COMPANY_PATTERN
        ))
        .expect("Invalid worked-as regex");

        let intern_regex = Regex::new(&format!(
            r"(?i)^(.{{0,40}}?\bintern(?:ship|ed)?)\s+(?:at|with)\s+{}",
            COMPANY_PATTERN
        ))
        .expect("Invalid internship regex");

        let segment_regex =
            Regex::new(r"\s*[|,]\s*|\s+-\s+").expect("Invalid segment separator regex");

        let corporate_suffix = Regex::new(
            r"(?i)\b(?:technologies|technology|solutions|systems|software|consulting|consultancy|services|labs|infotech|pvt|ltd|limited|inc|llc|llp|corp|corporation|group|enterprises|industries)\b",
        )
        .expect("Invalid corporate suffix regex");

        let role_keyword = Regex::new(
            r"(?i)\b(?:developer|engineer|programmer|analyst|manager|lead|architect|consultant|designer|scientist|administrator|specialist|intern|trainee|coordinator|executive|officer|tester)\b",
        )
        .expect("Invalid role keyword regex");

        let month_range = Regex::new(
            r"(?i)\b((?:jan|feb|mar|apr|may|jun|jul|aug|sep|oct|nov|dec)[a-z]*\.?\s*\d{4})\s*(?:-+|to|until)\s*((?:jan|feb|mar|apr|may|jun|jul|aug|sep|oct|nov|dec)[a-z]*\.?\s*\d{4}|present|current)\b",
        )
        .expect("Invalid month range regex");

        let numeric_range =
            Regex::new(r"(?i)\b(\d{1,2}/\d{4})\s*(?:-+|to|until)\s*(\d{1,2}/\d{4}|present|current)\b")
                .expect("Invalid numeric range regex");

        let year_range =
            Regex::new(r"(?i)\b((?:19|20)\d{2})\s*(?:-+|to|until)\s*((?:19|20)\d{2}|present|current)\b")
                .expect("Invalid year range regex");

        let years_of_experience =
            Regex::new(r"(?i)\b(\d{1,2}\+?)\s*(?:years?|yrs?)(?:\s+of)?\s+(?:experience|exp)\b")
                .expect("Invalid years-of-experience regex");

        let year_token = Regex::new(r"\b(?:19|20)\d{2}\b").expect("Invalid year token regex");

        Self {
            titled_regex,
            worked_as_regex,
            intern_regex,
            segment_regex,
            corporate_suffix,
            role_keyword,
            month_range,
            numeric_range,
            year_range,
            years_of_experience,
            year_token,
        }
    }

    /// Run the cascade over the experience section (falling back to the
    /// full document when no section was found) and return deduplicated
    /// entries with the winning strategy's confidence.
    pub fn extract(&self, section_text: &str, full_text: &str) -> (Vec<ExperienceEntry>, f64) {
        let strategies = [
            Strategy {
                name: "title-at-company",
                confidence: CONFIDENCE_TITLED,
                scope: Scope::Section,
                run: Self::titled,
            },
            Strategy {
                name: "company-title-reversed",
                confidence: CONFIDENCE_REVERSED,
                scope: Scope::Section,
                run: Self::reversed,
            },
            Strategy {
                name: "role-year-line",
                confidence: CONFIDENCE_FALLBACK,
                scope: Scope::FullText,
                run: Self::role_year_lines,
            },
        ];

        match run_cascade("experience", &strategies, self, section_text, full_text) {
            Some(outcome) => (Self::dedup(outcome.entries), outcome.confidence),
            None => (Vec::new(), 0.0),
        }
    }

    /// Heading pattern pass: every recognized heading opens an entry, lines
    /// below it accumulate into that entry's description.
    fn titled(&self, text: &str) -> Vec<ExperienceEntry> {
        let mut entries: Vec<ExperienceEntry> = Vec::new();

        for raw in text.lines() {
            let line = strip_bullet(raw);
            if line.is_empty() {
                continue;
            }
            if let Some(entry) = self.heading_entry(line) {
                entries.push(entry);
            } else if let Some(last) = entries.last_mut() {
                if !last.description.is_empty() {
                    last.description.push(' ');
                }
                last.description.push_str(line);
            }
        }

        entries
    }

    fn heading_entry(&self, line: &str) -> Option<ExperienceEntry> {
        if let Some(caps) = self.worked_as_regex.captures(line) {
            return Some(self.build_entry(&caps[1], &caps[2], line));
        }
        if let Some(caps) = self.intern_regex.captures(line) {
            return Some(self.build_entry(&caps[1], &caps[2], line));
        }
        if let Some(caps) = self.titled_regex.captures(line) {
            return Some(self.build_entry(&caps[1], &caps[2], line));
        }
        None
    }

    fn build_entry(&self, title: &str, company: &str, line: &str) -> ExperienceEntry {
        let mut entry = ExperienceEntry {
            job_title: Self::tidy(title),
            company: Self::tidy(company),
            ..ExperienceEntry::default()
        };
        if let Some(duration) = self.parse_duration(line) {
            entry.duration = duration;
        }
        entry
    }

    /// `<company> <title>` layouts, common in table-style resumes. Segments
    /// split at pipes/commas are classified by keyword set; a segment with a
    /// role keyword is always the title, even when it also carries an
    /// ambiguous corporate noun. A company-only line holds as pending until
    /// a title-only line pairs with it.
    fn reversed(&self, text: &str) -> Vec<ExperienceEntry> {
        let mut entries = Vec::new();
        let mut pending_company: Option<(String, Option<String>)> = None;

        for raw in text.lines() {
            let line = strip_bullet(raw);
            if line.is_empty() {
                continue;
            }
            let duration = self.parse_duration(line);

            let mut company = None;
            let mut title = None;
            for segment in self.segment_regex.split(line) {
                let segment = Self::tidy(segment);
                if segment.is_empty() {
                    continue;
                }
                if title.is_none() && self.role_keyword.is_match(&segment) {
                    title = Some(segment);
                } else if company.is_none() && self.corporate_suffix.is_match(&segment) {
                    company = Some(segment);
                }
            }

            match (company, title) {
                (Some(company), Some(title)) => {
                    entries.push(self.reversed_entry(title, company, duration));
                    pending_company = None;
                }
                (Some(company), None) => {
                    pending_company = Some((company, duration));
                }
                (None, Some(title)) => {
                    if let Some((company, pending_duration)) = pending_company.take() {
                        entries.push(self.reversed_entry(title, company, duration.or(pending_duration)));
                    }
                }
                (None, None) => {}
            }
        }

        entries
    }

    fn reversed_entry(
        &self,
        title: String,
        company: String,
        duration: Option<String>,
    ) -> ExperienceEntry {
        let mut entry = ExperienceEntry {
            job_title: title,
            company,
            ..ExperienceEntry::default()
        };
        if let Some(duration) = duration {
            entry.duration = duration;
        }
        entry
    }

    /// Lines pairing a role keyword with a four-digit year, or standalone
    /// `N years of experience` statements, kept verbatim as the title.
    fn role_year_lines(&self, text: &str) -> Vec<ExperienceEntry> {
        let mut entries = Vec::new();

        for raw in text.lines() {
            let line = strip_bullet(raw);
            if line.is_empty() {
                continue;
            }
            let years_statement = self.years_of_experience.is_match(line);
            let role_with_year =
                self.role_keyword.is_match(line) && self.year_token.is_match(line);
            if !years_statement && !role_with_year {
                continue;
            }

            let mut entry = ExperienceEntry {
                job_title: Self::tidy(line),
                ..ExperienceEntry::default()
            };
            if let Some(duration) = self.parse_duration(line) {
                entry.duration = duration;
            }
            entries.push(entry);
        }

        entries
    }

    /// Month-name ranges, `MM/YYYY` ranges, plain year ranges, and
    /// `N years` statements, normalized to a single ` - ` separator.
    fn parse_duration(&self, line: &str) -> Option<String> {
        if let Some(caps) = self.month_range.captures(line) {
            return Some(format!(
                "{} - {}",
                caps[1].trim(),
                Self::normalize_range_end(&caps[2])
            ));
        }
        if let Some(caps) = self.numeric_range.captures(line) {
            return Some(format!("{} - {}", &caps[1], Self::normalize_range_end(&caps[2])));
        }
        if let Some(caps) = self.year_range.captures(line) {
            return Some(format!("{} - {}", &caps[1], Self::normalize_range_end(&caps[2])));
        }
        self.years_of_experience
            .captures(line)
            .map(|caps| format!("{} years", &caps[1]))
    }

    fn normalize_range_end(end: &str) -> String {
        let end = end.trim();
        if end.eq_ignore_ascii_case("present") || end.eq_ignore_ascii_case("current") {
            "present".to_string()
        } else {
            end.to_string()
        }
    }

    fn tidy(value: &str) -> String {
        trim_punctuation(value).to_string()
    }

    fn dedup(entries: Vec<ExperienceEntry>) -> Vec<ExperienceEntry> {
        let mut seen = HashSet::new();
        let mut unique = Vec::new();
        for entry in entries {
            let key = (entry.job_title.to_lowercase(), entry.company.to_lowercase());
            if seen.insert(key) {
                unique.push(entry);
            }
        }
        unique
    }
}
