//! Project extraction
//!
//! The projects section is cut into blocks at bullet markers, numbered-list
//! markers, and short title-like lines; the first line of a block is its
//! title, the rest its description. Technologies come from explicit
//! `using`/`built with`/`tech stack:` phrases merged with literal taxonomy
//! hits. Without a section, full-text lines opening with an action verb
//! serve as a low-confidence fallback.

use crate::config::ExtractionConfig;
use crate::extract::normalizer::{strip_bullet, trim_punctuation, BULLET};
use crate::extract::skills::SkillsCategorizer;
use crate::extract::strategy::{run_cascade, Scope, Strategy};
use crate::profile::ProjectEntry;
use regex::Regex;
use std::collections::HashSet;

const CONFIDENCE_SECTION: f64 = 0.85;
const CONFIDENCE_FALLBACK: f64 = 0.6;

pub struct ProjectExtractor {
    numbered_regex: Regex,
    action_verb: Regex,
    fallback_verb: Regex,
    tech_phrase: Regex,
    tech_split: Regex,
    min_line_len: usize,
}

/// Cascade context: the extractor plus the shared skill matcher used to
/// mine technology mentions.
struct ProjectContext<'a> {
    extractor: &'a ProjectExtractor,
    skills: &'a SkillsCategorizer,
}

impl ProjectExtractor {
    pub fn new(extraction: &ExtractionConfig) -> Self {
        let numbered_regex = Regex::new(r"^\d{1,2}[.)]\s+").expect("Invalid numbered list regex");

        let action_verb = Regex::new(
            r"(?i)^(?:developed|built|created|implemented|designed|worked|used|using|led|managed|collaborated|contributed)\b",
        )
        .expect("Invalid action verb regex");

        let fallback_verb =
            Regex::new(r"(?i)^(?:developed|built|created|implemented|designed)\b")
                .expect("Invalid fallback verb regex");

        let tech_phrase = Regex::new(
            r"(?i)\b(?:technolog(?:y|ies)\s+used:?|tech\s*stack:?|stack:|built\s+with|using|with)\s+([^.;\n]+)",
        )
        .expect("Invalid technology phrase regex");

        let tech_split =
            Regex::new(r"(?i)\s*(?:,|/|&|\band\b)\s*").expect("Invalid technology split regex");

        Self {
            numbered_regex,
            action_verb,
            fallback_verb,
            tech_phrase,
            tech_split,
            min_line_len: extraction.min_fallback_line_len,
        }
    }

    /// Run the cascade over the projects section; without a section the
    /// block parser does not widen to the whole document, only the
    /// action-verb fallback does.
    pub fn extract(
        &self,
        section_text: &str,
        full_text: &str,
        skills: &SkillsCategorizer,
    ) -> (Vec<ProjectEntry>, f64) {
        let strategies = [
            Strategy {
                name: "section-blocks",
                confidence: CONFIDENCE_SECTION,
                scope: Scope::SectionOnly,
                run: Self::section_blocks,
            },
            Strategy {
                name: "action-verb-line",
                confidence: CONFIDENCE_FALLBACK,
                scope: Scope::FullText,
                run: Self::action_lines,
            },
        ];

        let ctx = ProjectContext {
            extractor: self,
            skills,
        };
        match run_cascade("projects", &strategies, &ctx, section_text, full_text) {
            Some(outcome) => (outcome.entries, outcome.confidence),
            None => (Vec::new(), 0.0),
        }
    }

    fn section_blocks(ctx: &ProjectContext, text: &str) -> Vec<ProjectEntry> {
        let extractor = ctx.extractor;
        let mut entries: Vec<ProjectEntry> = Vec::new();

        for raw in text.lines() {
            let trimmed = raw.trim();
            if trimmed.is_empty() {
                continue;
            }
            let bulleted = trimmed.starts_with(BULLET);
            let stripped = strip_bullet(trimmed);
            let (numbered, content) = match extractor.numbered_regex.find(stripped) {
                Some(marker) => (true, stripped[marker.end()..].trim()),
                None => (false, stripped),
            };
            if content.is_empty() {
                continue;
            }

            if bulleted || numbered || extractor.title_line(content, entries.last()) {
                entries.push(ProjectEntry {
                    title: trim_punctuation(content).to_string(),
                    ..ProjectEntry::default()
                });
            } else if let Some(last) = entries.last_mut() {
                if !last.description.is_empty() {
                    last.description.push(' ');
                }
                last.description.push_str(content);
            } else {
                // Section opens with prose before any recognizable title
                entries.push(ProjectEntry {
                    description: content.to_string(),
                    ..ProjectEntry::default()
                });
            }
        }

        for entry in &mut entries {
            let block = format!("{} {}", entry.title, entry.description);
            entry.technologies = extractor.technologies(&block, ctx.skills);
        }
        entries
    }

    /// Full-text fallback: lines opening with a build verb, long enough to
    /// carry content, kept verbatim as the title.
    fn action_lines(ctx: &ProjectContext, text: &str) -> Vec<ProjectEntry> {
        let extractor = ctx.extractor;
        let mut entries = Vec::new();

        for raw in text.lines() {
            let line = strip_bullet(raw);
            if line.chars().count() < extractor.min_line_len
                || !extractor.fallback_verb.is_match(line)
            {
                continue;
            }
            entries.push(ProjectEntry {
                title: trim_punctuation(line).to_string(),
                description: String::new(),
                technologies: extractor.technologies(line, ctx.skills),
            });
        }

        entries
    }

    /// A short, capitalized, verb-free line reads as a project title, but
    /// only when the previous entry already has body text; otherwise it is
    /// that entry's first description line.
    fn title_line(&self, line: &str, last: Option<&ProjectEntry>) -> bool {
        if let Some(entry) = last {
            if entry.description.is_empty() {
                return false;
            }
        }
        line.split_whitespace().count() <= 6
            && line.chars().count() <= 60
            && !line.ends_with('.')
            && !self.action_verb.is_match(line)
            && line.starts_with(|c: char| c.is_uppercase() || c.is_ascii_digit())
    }

    /// Explicit technology phrases merged with literal taxonomy hits,
    /// deduplicated case-insensitively. Taxonomy items are stored in
    /// canonical lower-case; phrase items the taxonomy does not know are
    /// kept verbatim when short, longer ones are prose leaking past the
    /// `using`/`with` anchor and get dropped.
    fn technologies(&self, block: &str, skills: &SkillsCategorizer) -> Vec<String> {
        let mut seen = HashSet::new();
        let mut technologies = Vec::new();

        if let Some(caps) = self.tech_phrase.captures(block) {
            for item in self.tech_split.split(&caps[1]) {
                let item = trim_punctuation(item);
                if item.is_empty() {
                    continue;
                }
                let value = match skills.canonical_term(item) {
                    Some(canonical) => canonical,
                    None if item.split_whitespace().count() <= 2 => item.to_string(),
                    None => continue,
                };
                if seen.insert(value.to_lowercase()) {
                    technologies.push(value);
                }
            }
        }

        for canonical in skills.scan_terms(block) {
            if seen.insert(canonical.to_lowercase()) {
                technologies.push(canonical);
            }
        }

        technologies
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::profile::UNTITLED_PROJECT;

    fn fixtures() -> (ProjectExtractor, SkillsCategorizer) {
        let config = Config::default();
        let extractor = ProjectExtractor::new(&config.extraction);
        let skills = SkillsCategorizer::new(&config.taxonomy, &config.extraction).unwrap();
        (extractor, skills)
    }

    #[test]
    fn test_bulleted_blocks_with_descriptions() {
        let (extractor, skills) = fixtures();
        let section = "• Resume Analyzer\nBuilt a text parser using Python and Flask\n• Chat Application\nRealtime chat built with React";

        let (entries, confidence) = extractor.extract(section, section, &skills);

        assert_eq!(confidence, 0.85);
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].title, "Resume Analyzer");
        assert_eq!(
            entries[0].description,
            "Built a text parser using Python and Flask"
        );
        assert_eq!(entries[0].technologies, ["python", "flask"]);
        assert_eq!(entries[1].title, "Chat Application");
        assert_eq!(entries[1].technologies, ["react"]);
    }

    #[test]
    fn test_numbered_markers_open_entries() {
        let (extractor, skills) = fixtures();
        let section = "1. Inventory Tracker\n2) Weather Dashboard using React";

        let (entries, _) = extractor.extract(section, section, &skills);

        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].title, "Inventory Tracker");
        assert_eq!(entries[1].title, "Weather Dashboard using React");
        assert_eq!(entries[1].technologies, ["react"]);
    }

    #[test]
    fn test_title_lines_alternate_with_descriptions() {
        let (extractor, skills) = fixtures();
        let section = "Resume Analyzer\nBuilt a parser for resumes using Python\nChat Application\nImplemented websockets with Firebase";

        let (entries, _) = extractor.extract(section, section, &skills);

        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].title, "Resume Analyzer");
        assert_eq!(entries[0].technologies, ["python"]);
        assert_eq!(entries[1].title, "Chat Application");
        assert_eq!(
            entries[1].description,
            "Implemented websockets with Firebase"
        );
        assert_eq!(entries[1].technologies, ["firebase"]);
    }

    #[test]
    fn test_leading_prose_gets_untitled_sentinel() {
        let (extractor, skills) = fixtures();
        let section = "worked on internal automation tooling for the QA team";

        let (entries, _) = extractor.extract(section, section, &skills);

        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].title, UNTITLED_PROJECT);
        assert_eq!(
            entries[0].description,
            "worked on internal automation tooling for the QA team"
        );
    }

    #[test]
    fn test_fallback_action_verb_lines() {
        let (extractor, skills) = fixtures();
        let full = "Summary line\nDeveloped a scraper for housing listings using Python\nBuilt x";

        let (entries, confidence) = extractor.extract("", full, &skills);

        assert_eq!(confidence, 0.6);
        assert_eq!(entries.len(), 1);
        assert_eq!(
            entries[0].title,
            "Developed a scraper for housing listings using Python"
        );
        assert_eq!(entries[0].technologies, ["python"]);
    }

    #[test]
    fn test_technologies_merge_phrase_and_scan_without_duplicates() {
        let (extractor, skills) = fixtures();
        let section = "• Site Builder\nBuilt with React and Vue, rendering through nodejs";

        let (entries, _) = extractor.extract(section, section, &skills);

        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].technologies, ["react", "vue", "nodejs"]);
    }

    #[test]
    fn test_unknown_phrase_items_kept_verbatim() {
        let (extractor, skills) = fixtures();
        let section = "• Home Lab\nBuilt with Proxmox and Python";

        let (entries, _) = extractor.extract(section, section, &skills);

        assert_eq!(entries[0].technologies, ["Proxmox", "python"]);
    }

    #[test]
    fn test_empty_input_detects_nothing() {
        let (extractor, skills) = fixtures();
        let (entries, confidence) = extractor.extract("", "", &skills);
        assert!(entries.is_empty());
        assert_eq!(confidence, 0.0);
    }
}
