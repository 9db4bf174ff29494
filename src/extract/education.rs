//! Education history extraction
//!
//! Three-stage cascade: a structured degree-line parser, an
//! institution-anchored line scan for sections without recognizable degree
//! keywords, and a verbatim keyword-line sweep over the whole document as
//! the last resort.

use crate::extract::normalizer::{strip_bullet, trim_punctuation, BULLET};
use crate::extract::strategy::{run_cascade, Scope, Strategy};
use crate::profile::EducationEntry;
use regex::Regex;
use std::collections::HashSet;

const CONFIDENCE_STRUCTURED: f64 = 0.9;
const CONFIDENCE_ANCHORED: f64 = 0.8;
const CONFIDENCE_FALLBACK: f64 = 0.6;

pub struct EducationExtractor {
    degree_regex: Regex,
    major_regex: Regex,
    institution_regex: Regex,
    institution_keyword: Regex,
    year_range_regex: Regex,
    year_token: Regex,
    gpa_regex: Regex,
}

impl Default for EducationExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl EducationExtractor {
    pub fn new() -> Self {
        // Abbreviated Indian/US degree families plus spelled-out
        // bachelor/master/doctor forms. B.E and M.E require the dot so the
        // plain words "be" and "me" never register as degrees.
        let degree_regex = Regex::new(
            r"(?x)\b(?:
                (?i:b\.?\s?tech|m\.?\s?tech|b\.?\s?sc|m\.?\s?sc|b\.?\s?com|m\.?\s?com|b\.\s?e|m\.\s?e|bca|mca|bba|mba|ph\.?\s?d|diploma)
              | (?i:(?:bachelor|master|doctor)(?:'s)?\s+of\s+[a-z]+(?:\s+(?:administration|applications|engineering|management))?)
            )\b",
        )
        .expect("Invalid degree regex");

        let major_regex =
            Regex::new(r"(?i)^\s*(?:in|of)\s+([^,\n]+?)(?:\s*,|\s+(?:from|at)\s+|\s+\d{4}|\s*$)")
                .expect("Invalid major regex");

        let institution_regex =
            Regex::new(r"(?i)\b(?:from|at)\s+([^,\n]+?)(?:\s*,|\s+\d{4}|\s*$)")
                .expect("Invalid institution regex");

        let institution_keyword =
            Regex::new(r"(?i)\b(?:university|college|institute|institution|school|academy|polytechnic)\b")
                .expect("Invalid institution keyword regex");

        let year_range_regex =
            Regex::new(r"(?i)\b((?:19|20)\d{2})\s*(?:-+|to)\s*((?:19|20)\d{2}|present)\b")
                .expect("Invalid year range regex");

        let year_token = Regex::new(r"\d{4}").expect("Invalid year token regex");

        let gpa_regex =
            Regex::new(r"(?i)\b(?:c?gpa|grade)\s*[:\-]?\s*(\d{1,2}(?:\.\d{1,2})?)(?:\s*/\s*(10|5|4))?")
                .expect("Invalid gpa regex");

        Self {
            degree_regex,
            major_regex,
            institution_regex,
            institution_keyword,
            year_range_regex,
            year_token,
            gpa_regex,
        }
    }

    /// Run the cascade over the education section (falling back to the full
    /// document when no section was found) and return deduplicated entries
    /// with the winning strategy's confidence.
    pub fn extract(&self, section_text: &str, full_text: &str) -> (Vec<EducationEntry>, f64) {
        let strategies = [
            Strategy {
                name: "structured-degree",
                confidence: CONFIDENCE_STRUCTURED,
                scope: Scope::Section,
                run: Self::structured,
            },
            Strategy {
                name: "institution-anchored",
                confidence: CONFIDENCE_ANCHORED,
                scope: Scope::Section,
                run: Self::anchored,
            },
            Strategy {
                name: "keyword-line",
                confidence: CONFIDENCE_FALLBACK,
                scope: Scope::FullText,
                run: Self::keyword_lines,
            },
        ];

        match run_cascade("education", &strategies, self, section_text, full_text) {
            Some(outcome) => (Self::dedup(outcome.entries), outcome.confidence),
            None => (Vec::new(), 0.0),
        }
    }

    /// `<degree> [in|of <major>] [from|at <institution>] [<years>]`, one
    /// entry per line. A bare degree keyword with nothing else around it is
    /// left for the later strategies.
    fn structured(&self, text: &str) -> Vec<EducationEntry> {
        let lines: Vec<&str> = text.lines().collect();
        let mut entries = Vec::new();

        for (index, raw_line) in lines.iter().enumerate() {
            let line = strip_bullet(raw_line);
            if line.is_empty() {
                continue;
            }
            let degree_match = match self.degree_regex.find(line) {
                Some(found) => found,
                None => continue,
            };

            let degree = Self::tidy(degree_match.as_str());
            let rest = &line[degree_match.end()..];

            let (mut major, tail) = match self.major_regex.captures(rest) {
                Some(caps) => {
                    let end = caps.get(0).map_or(0, |m| m.end());
                    (Self::tidy(&caps[1]), &rest[end..])
                }
                None => (String::new(), rest),
            };
            if self.year_token.is_match(&major) {
                major.clear();
            }

            let mut institution = self
                .institution_regex
                .captures(rest)
                .map(|caps| Self::tidy(&caps[1]))
                .unwrap_or_default();
            if self.year_token.is_match(&institution) {
                institution.clear();
            }
            if institution.is_empty() {
                self.fill_from_comma_parts(tail, &mut major, &mut institution);
            }

            let duration = self.year_range(line);
            if major.is_empty() && institution.is_empty() && duration.is_none() {
                continue;
            }

            let mut gpa = self.gpa(line);
            if gpa.is_none() {
                // A standalone GPA line directly below the entry belongs to it
                if let Some(next) = lines.get(index + 1) {
                    if !self.degree_regex.is_match(next) {
                        gpa = self.gpa(next);
                    }
                }
            }

            let mut entry = EducationEntry {
                degree,
                ..EducationEntry::default()
            };
            if !major.is_empty() {
                entry.major = major;
            }
            if !institution.is_empty() {
                entry.institution = institution;
            }
            if let Some(duration) = duration {
                entry.duration = duration;
            }
            if let Some(gpa) = gpa {
                entry.gpa = gpa;
            }
            entries.push(entry);
        }

        entries
    }

    /// Lines naming a university/college/institute, joining one wrapped
    /// continuation line when the follow-up carries no degree, year, bullet,
    /// or institution token of its own.
    fn anchored(&self, text: &str) -> Vec<EducationEntry> {
        let lines: Vec<&str> = text.lines().collect();
        let mut entries = Vec::new();
        let mut index = 0;

        while index < lines.len() {
            let line = strip_bullet(lines[index]);
            index += 1;
            if line.is_empty() || !self.institution_keyword.is_match(line) {
                continue;
            }

            let mut anchor = line.to_string();
            if let Some(next) = lines.get(index) {
                let next = next.trim();
                if self.continues_institution(next) {
                    anchor.push(' ');
                    anchor.push_str(next);
                    index += 1;
                }
            }

            let mut entry = EducationEntry::default();
            if let Some(duration) = self.year_range(&anchor) {
                entry.duration = duration;
            }
            if let Some(gpa) = self.gpa(&anchor) {
                entry.gpa = gpa;
            }

            let without_years = self.year_range_regex.replace_all(&anchor, "");
            let without_gpa = self.gpa_regex.replace_all(&without_years, "");
            entry.institution = Self::tidy(&without_gpa);
            if !entry.institution.is_empty() {
                entries.push(entry);
            }
        }

        entries
    }

    fn continues_institution(&self, next: &str) -> bool {
        !next.is_empty()
            && !next.starts_with(BULLET)
            && !self.degree_regex.is_match(next)
            && !self.year_token.is_match(next)
            && !self.institution_keyword.is_match(next)
    }

    /// Any line mentioning a degree or institution keyword, kept verbatim.
    fn keyword_lines(&self, text: &str) -> Vec<EducationEntry> {
        let mut entries = Vec::new();

        for raw_line in text.lines() {
            let line = strip_bullet(raw_line);
            if line.is_empty() {
                continue;
            }
            let has_degree = self.degree_regex.is_match(line);
            if !has_degree && !self.institution_keyword.is_match(line) {
                continue;
            }

            let mut entry = EducationEntry::default();
            if let Some(duration) = self.year_range(line) {
                entry.duration = duration;
            }
            if let Some(gpa) = self.gpa(line) {
                entry.gpa = gpa;
            }
            if has_degree {
                entry.degree = Self::tidy(line);
            } else {
                entry.institution = Self::tidy(line);
            }
            entries.push(entry);
        }

        entries
    }

    /// Unlabeled comma segments after the degree: institution-keyword parts
    /// become the institution, other capitalized parts fill whichever of
    /// major/institution is still open. Parts carrying years are skipped.
    fn fill_from_comma_parts(&self, tail: &str, major: &mut String, institution: &mut String) {
        for part in tail.split(',') {
            let part = Self::tidy(part);
            if part.is_empty() || self.year_token.is_match(&part) {
                continue;
            }
            if self.institution_keyword.is_match(&part) {
                if institution.is_empty() {
                    *institution = part;
                }
                continue;
            }
            if !part.starts_with(|c: char| c.is_uppercase()) {
                continue;
            }
            if major.is_empty() {
                *major = part;
            } else if institution.is_empty() {
                *institution = part;
            }
        }
    }

    /// `2018-2022`, `2019 to 2021`, `2020 - present`, normalized to a single
    /// hyphen with no spaces.
    fn year_range(&self, text: &str) -> Option<String> {
        self.year_range_regex
            .captures(text)
            .map(|caps| format!("{}-{}", &caps[1], caps[2].to_lowercase()))
    }

    fn gpa(&self, text: &str) -> Option<String> {
        self.gpa_regex.captures(text).map(|caps| match caps.get(2) {
            Some(denominator) => format!("{}/{}", &caps[1], denominator.as_str()),
            None => caps[1].to_string(),
        })
    }

    fn tidy(value: &str) -> String {
        trim_punctuation(value).to_string()
    }

    fn dedup(entries: Vec<EducationEntry>) -> Vec<EducationEntry> {
        let mut seen = HashSet::new();
        let mut unique = Vec::new();
        for entry in entries {
            let key = (entry.degree.to_lowercase(), entry.institution.to_lowercase());
            if seen.insert(key) {
                unique.push(entry);
            }
        }
        unique
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::profile::NOT_SPECIFIED;

    #[test]
    fn test_structured_degree_line_without_section() {
        let extractor = EducationExtractor::new();
        let text = "John Doe\njohn@example.com\nB.Tech in Computer Science from ABC Institute of Technology, 2018-2022";

        let (entries, confidence) = extractor.extract("", text);

        assert_eq!(entries.len(), 1);
        assert_eq!(confidence, 0.9);
        assert_eq!(entries[0].degree, "B.Tech");
        assert_eq!(entries[0].major, "Computer Science");
        assert_eq!(entries[0].institution, "ABC Institute of Technology");
        assert_eq!(entries[0].duration, "2018-2022");
    }

    #[test]
    fn test_section_scoped_extraction_ignores_other_sections() {
        let extractor = EducationExtractor::new();
        let section = "• M.Sc Physics, University of Delhi, 2016 - 2018";
        let full = "Experience\nworked as tutor at Coaching College, 2019-2020";

        let (entries, confidence) = extractor.extract(section, full);

        assert_eq!(confidence, 0.9);
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].degree, "M.Sc");
        assert_eq!(entries[0].major, "Physics");
        assert_eq!(entries[0].institution, "University of Delhi");
        assert_eq!(entries[0].duration, "2016-2018");
    }

    #[test]
    fn test_spelled_out_degree_with_comma_parts() {
        let extractor = EducationExtractor::new();
        let text = "Bachelor of Science in Computer Science, MIT, 2015-2019";

        let (entries, _) = extractor.extract(text, text);

        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].degree, "Bachelor of Science");
        assert_eq!(entries[0].major, "Computer Science");
        assert_eq!(entries[0].institution, "MIT");
        assert_eq!(entries[0].duration, "2015-2019");
    }

    #[test]
    fn test_institution_stops_before_trailing_years() {
        let extractor = EducationExtractor::new();
        let text = "MBA from Harvard Business School 2019 to 2021";

        let (entries, _) = extractor.extract(text, text);

        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].degree, "MBA");
        assert_eq!(entries[0].institution, "Harvard Business School");
        assert_eq!(entries[0].duration, "2019-2021");
        assert_eq!(entries[0].major, NOT_SPECIFIED);
    }

    #[test]
    fn test_present_range_normalizes_lowercase() {
        let extractor = EducationExtractor::new();
        let text = "Ph.D in Machine Learning at Stanford University, 2021 - Present";

        let (entries, _) = extractor.extract(text, text);

        assert_eq!(entries[0].duration, "2021-present");
        assert_eq!(entries[0].institution, "Stanford University");
    }

    #[test]
    fn test_gpa_from_entry_line_and_following_line() {
        let extractor = EducationExtractor::new();
        let same_line = "B.Tech in IT from NIT Surat, 2016-2020, CGPA: 8.5/10";
        let (entries, _) = extractor.extract(same_line, same_line);
        assert_eq!(entries[0].gpa, "8.5/10");

        let next_line = "B.Tech in IT from NIT Surat, 2016-2020\nGPA: 3.7";
        let (entries, _) = extractor.extract(next_line, next_line);
        assert_eq!(entries[0].gpa, "3.7");
    }

    #[test]
    fn test_institution_anchored_when_no_degree_keyword() {
        let extractor = EducationExtractor::new();
        let section = "Stanford University, 2014-2018";

        let (entries, confidence) = extractor.extract(section, section);

        assert_eq!(confidence, 0.8);
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].institution, "Stanford University");
        assert_eq!(entries[0].duration, "2014-2018");
        assert_eq!(entries[0].degree, NOT_SPECIFIED);
    }

    #[test]
    fn test_wrapped_institution_name_joins_continuation() {
        let extractor = EducationExtractor::new();
        let section = "National Institute of\nInformation Processing";

        let (entries, confidence) = extractor.extract(section, section);

        assert_eq!(confidence, 0.8);
        assert_eq!(entries.len(), 1);
        assert_eq!(
            entries[0].institution,
            "National Institute of Information Processing"
        );
    }

    #[test]
    fn test_bare_degree_keyword_falls_back_to_keyword_line() {
        let extractor = EducationExtractor::new();
        let (entries, confidence) = extractor.extract("MBA", "MBA");

        assert_eq!(confidence, 0.6);
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].degree, "MBA");
    }

    #[test]
    fn test_duplicate_entries_collapse_case_insensitively() {
        let extractor = EducationExtractor::new();
        let text = "B.Tech in CS from ABC Institute, 2018-2022\nb.tech in cs from abc institute, 2018-2022";

        let (entries, _) = extractor.extract(text, text);

        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].degree, "B.Tech");
    }

    #[test]
    fn test_plain_words_be_and_me_are_not_degrees() {
        let extractor = EducationExtractor::new();
        let text = "I want to be the best version of me";

        let (entries, confidence) = extractor.extract("", text);

        assert!(entries.is_empty());
        assert_eq!(confidence, 0.0);
    }

    #[test]
    fn test_empty_input_detects_nothing() {
        let extractor = EducationExtractor::new();
        let (entries, confidence) = extractor.extract("", "");
        assert!(entries.is_empty());
        assert_eq!(confidence, 0.0);
    }
}
