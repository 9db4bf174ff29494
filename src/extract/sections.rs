//! Section segmentation of normalized resume text

use std::collections::BTreeMap;
use std::fmt;

/// Canonical resume sections recognized by the segmenter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum SectionKind {
    Summary,
    Education,
    Experience,
    Skills,
    Projects,
    Certifications,
    Interests,
}

impl SectionKind {
    pub fn all() -> [SectionKind; 7] {
        [
            SectionKind::Summary,
            SectionKind::Education,
            SectionKind::Experience,
            SectionKind::Skills,
            SectionKind::Projects,
            SectionKind::Certifications,
            SectionKind::Interests,
        ]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SectionKind::Summary => "summary",
            SectionKind::Education => "education",
            SectionKind::Experience => "experience",
            SectionKind::Skills => "skills",
            SectionKind::Projects => "projects",
            SectionKind::Certifications => "certifications",
            SectionKind::Interests => "interests",
        }
    }
}

impl fmt::Display for SectionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Named spans of the document, one buffer per canonical section. Lines
/// before the first header land in the summary bucket.
#[derive(Debug, Clone, Default)]
pub struct SegmentedResume {
    sections: BTreeMap<SectionKind, String>,
}

impl SegmentedResume {
    /// Section text, empty when no header for this kind ever matched.
    /// Extractors treat an empty section as "fall back to full-text scan".
    pub fn get(&self, kind: SectionKind) -> &str {
        self.sections.get(&kind).map(|s| s.as_str()).unwrap_or("")
    }

    pub fn has(&self, kind: SectionKind) -> bool {
        !self.get(kind).trim().is_empty()
    }

    fn push_line(&mut self, kind: SectionKind, line: &str) {
        let buffer = self.sections.entry(kind).or_default();
        if !buffer.is_empty() {
            buffer.push('\n');
        }
        buffer.push_str(line);
    }
}

/// Line-by-line header scanner. A line is a header when, stripped of a
/// leading bullet and trailing colon, it equals one of the known aliases
/// case-insensitively; anything longer is content, so prose mentioning
/// "education" never opens a section.
pub struct SectionSegmenter {
    aliases: Vec<(SectionKind, &'static [&'static str])>,
}

impl Default for SectionSegmenter {
    fn default() -> Self {
        Self::new()
    }
}

impl SectionSegmenter {
    pub fn new() -> Self {
        let aliases: Vec<(SectionKind, &'static [&'static str])> = vec![
            (
                SectionKind::Summary,
                &[
                    "summary",
                    "professional summary",
                    "career summary",
                    "profile",
                    "about",
                    "about me",
                    "objective",
                    "career objective",
                    "overview",
                ],
            ),
            (
                SectionKind::Education,
                &[
                    "education",
                    "academic",
                    "academics",
                    "academic background",
                    "qualification",
                    "qualifications",
                    "educational qualification",
                    "educational qualifications",
                    "degree",
                    "degrees",
                ],
            ),
            (
                SectionKind::Experience,
                &[
                    "experience",
                    "work experience",
                    "professional experience",
                    "employment",
                    "employment history",
                    "work history",
                    "career",
                    "career history",
                    "internship",
                    "internships",
                ],
            ),
            (
                SectionKind::Skills,
                &[
                    "skills",
                    "skill",
                    "technical skills",
                    "skill set",
                    "core competencies",
                    "competencies",
                    "expertise",
                    "technologies",
                ],
            ),
            (
                SectionKind::Projects,
                &[
                    "projects",
                    "project",
                    "personal projects",
                    "academic projects",
                    "notable projects",
                    "project work",
                    "portfolio",
                ],
            ),
            (
                SectionKind::Certifications,
                &[
                    "certifications",
                    "certification",
                    "certificates",
                    "certificate",
                    "licenses",
                    "license",
                    "awards",
                    "achievements",
                    "credentials",
                    "accomplishments",
                ],
            ),
            (
                SectionKind::Interests,
                &[
                    "interests",
                    "interest",
                    "hobbies",
                    "activities",
                    "hobbies and interests",
                    "interests and hobbies",
                ],
            ),
        ];

        Self { aliases }
    }

    /// Partition text into section buffers. Content before the first header
    /// accumulates into the summary bucket.
    pub fn segment(&self, text: &str) -> SegmentedResume {
        let mut segmented = SegmentedResume::default();
        let mut current: Option<SectionKind> = None;

        for line in text.lines() {
            let trimmed = line.trim();
            if trimmed.is_empty() {
                continue;
            }

            if let Some(kind) = self.header_kind(trimmed) {
                current = Some(kind);
                continue;
            }

            match current {
                Some(kind) => segmented.push_line(kind, trimmed),
                None => segmented.push_line(SectionKind::Summary, trimmed),
            }
        }

        segmented
    }

    /// Classify a line as a section header, first alias match wins over the
    /// fixed canonical order.
    pub fn header_kind(&self, line: &str) -> Option<SectionKind> {
        let candidate = line
            .trim()
            .trim_start_matches('•')
            .trim()
            .trim_end_matches(':')
            .trim()
            .to_lowercase();

        if candidate.is_empty() {
            return None;
        }

        for (kind, aliases) in &self.aliases {
            if aliases.iter().any(|alias| *alias == candidate) {
                return Some(*kind);
            }
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "Jane Doe\njane@doe.dev\nEDUCATION\nB.Tech in CS\nExperience:\nEngineer at Acme\nSkills\nPython, SQL";

    #[test]
    fn test_segments_by_headers() {
        let segmenter = SectionSegmenter::new();
        let segmented = segmenter.segment(SAMPLE);

        assert_eq!(segmented.get(SectionKind::Education), "B.Tech in CS");
        assert_eq!(segmented.get(SectionKind::Experience), "Engineer at Acme");
        assert_eq!(segmented.get(SectionKind::Skills), "Python, SQL");
    }

    #[test]
    fn test_preamble_lands_in_summary() {
        let segmenter = SectionSegmenter::new();
        let segmented = segmenter.segment(SAMPLE);
        assert_eq!(segmented.get(SectionKind::Summary), "Jane Doe\njane@doe.dev");
    }

    #[test]
    fn test_header_match_is_case_insensitive_with_colon() {
        let segmenter = SectionSegmenter::new();
        assert_eq!(
            segmenter.header_kind("WORK EXPERIENCE:"),
            Some(SectionKind::Experience)
        );
        assert_eq!(
            segmenter.header_kind("• Certifications"),
            Some(SectionKind::Certifications)
        );
        assert_eq!(segmenter.header_kind("objective"), Some(SectionKind::Summary));
    }

    #[test]
    fn test_prose_containing_keyword_is_not_a_header() {
        let segmenter = SectionSegmenter::new();
        assert_eq!(
            segmenter.header_kind("I value education and hard work"),
            None
        );
        let segmented =
            segmenter.segment("Passionate about continuing education every day");
        assert_eq!(segmented.get(SectionKind::Education), "");
        assert!(!segmented.get(SectionKind::Summary).is_empty());
    }

    #[test]
    fn test_unmatched_section_is_empty() {
        let segmenter = SectionSegmenter::new();
        let segmented = segmenter.segment(SAMPLE);
        assert_eq!(segmented.get(SectionKind::Projects), "");
        assert!(!segmented.has(SectionKind::Projects));
    }

    #[test]
    fn test_repeated_headers_append_to_same_buffer() {
        let segmenter = SectionSegmenter::new();
        let text = "Projects\nAlpha\nSkills\nPython\nProjects\nBeta";
        let segmented = segmenter.segment(text);
        assert_eq!(segmented.get(SectionKind::Projects), "Alpha\nBeta");
    }

    #[test]
    fn test_empty_input() {
        let segmenter = SectionSegmenter::new();
        let segmented = segmenter.segment("");
        for kind in SectionKind::all() {
            assert_eq!(segmented.get(kind), "");
        }
    }
}
