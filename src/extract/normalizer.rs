//! Text normalization ahead of section detection and extraction

use regex::Regex;

/// Canonical bullet every glyph variant collapses to.
pub const BULLET: char = '•';

/// Deterministic, idempotent cleanup of raw resume text: whitespace
/// collapse, markup artifact removal, bullet/dash/quote unification, and
/// table-row flattening with explicit ` | ` cell separators.
pub struct TextNormalizer {
    markup_regex: Regex,
    table_cell_regex: Regex,
    bullet_regex: Regex,
    divider_regex: Regex,
    space_regex: Regex,
}

impl Default for TextNormalizer {
    fn default() -> Self {
        Self::new()
    }
}

impl TextNormalizer {
    pub fn new() -> Self {
        // Residual converter artifacts: TeX-ish command tags and stray braces
        let markup_regex = Regex::new(r"\\[a-zA-Z]+|[{}]").expect("Invalid markup regex");

        // Tab runs and wide space runs act as table cell boundaries
        let table_cell_regex = Regex::new(r"\t+| {3,}").expect("Invalid table cell regex");

        let bullet_regex = Regex::new(r"^[•*\-]+\s*").expect("Invalid bullet regex");

        let divider_regex = Regex::new(r"^[-=_|•]{3,}$").expect("Invalid divider regex");

        let space_regex = Regex::new(r" {2,}").expect("Invalid space regex");

        Self {
            markup_regex,
            table_cell_regex,
            bullet_regex,
            divider_regex,
            space_regex,
        }
    }

    /// Normalize raw text. Empty input yields an empty string; no failure
    /// modes.
    pub fn normalize(&self, raw: &str) -> String {
        if raw.trim().is_empty() {
            return String::new();
        }

        let mapped = Self::map_chars(raw);
        let stripped = self.markup_regex.replace_all(&mapped, "");

        let mut lines = Vec::new();
        for line in stripped.lines() {
            if self.divider_regex.is_match(line.trim()) {
                continue;
            }

            let line = self.table_cell_regex.replace_all(line, " | ");
            let line = self.bullet_regex.replace(&line, "• ");
            let line = self.space_regex.replace_all(&line, " ");
            let line = line.trim();

            if !line.is_empty() && line != "•" {
                lines.push(line.to_string());
            }
        }

        lines.join("\n")
    }

    /// Single-character substitutions: smart quotes, dash variants, bullet
    /// glyph variants, non-breaking spaces.
    fn map_chars(text: &str) -> String {
        text.chars()
            .map(|c| match c {
                '\u{2018}' | '\u{2019}' => '\'',
                '\u{201C}' | '\u{201D}' => '"',
                '\u{2013}' | '\u{2014}' | '\u{2015}' | '\u{2212}' => '-',
                '\u{2026}' => '.',
                '\u{00A0}' => ' ',
                '\u{25CF}' | '\u{25AA}' | '\u{25AB}' | '\u{25CB}' | '\u{25E6}'
                | '\u{2023}' | '\u{2219}' | '\u{00B7}' | '\u{27A2}' | '\u{25BA}'
                | '\u{25B6}' | '\u{2043}' => BULLET,
                other => other,
            })
            .collect()
    }
}

/// Drop a leading `• ` marker from an already-normalized line.
pub fn strip_bullet(line: &str) -> &str {
    line.trim_start_matches(BULLET).trim()
}

/// Trim surrounding whitespace and stray separator punctuation left behind
/// when a fragment is cut out of a longer line.
pub fn trim_punctuation(value: &str) -> &str {
    value.trim_matches(|c: char| c.is_whitespace() || matches!(c, ',' | ';' | ':' | '.' | '|' | '-'))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_input_yields_empty_output() {
        let normalizer = TextNormalizer::new();
        assert_eq!(normalizer.normalize(""), "");
        assert_eq!(normalizer.normalize("   \n\t  "), "");
    }

    #[test]
    fn test_whitespace_collapse_preserves_lines() {
        let normalizer = TextNormalizer::new();
        let text = "John  Doe\n\n\n\nSoftware   Engineer";
        // Wide space runs read as table cells, doubles collapse to one space
        assert_eq!(normalizer.normalize(text), "John Doe\nSoftware | Engineer");
    }

    #[test]
    fn test_bullet_variants_unify() {
        let normalizer = TextNormalizer::new();
        let text = "● First\n▪ Second\n- Third\n* Fourth\n‣Fifth";
        let normalized = normalizer.normalize(text);
        for line in normalized.lines() {
            assert!(line.starts_with("• "), "line not bulleted: {}", line);
        }
        assert_eq!(normalized.lines().count(), 5);
    }

    #[test]
    fn test_dash_and_quote_variants() {
        let normalizer = TextNormalizer::new();
        let text = "2018\u{2013}2022 \u{201C}lead\u{201D} \u{2019}intern\u{2019}";
        assert_eq!(normalizer.normalize(text), "2018-2022 \"lead\" 'intern'");
    }

    #[test]
    fn test_table_rows_gain_cell_separators() {
        let normalizer = TextNormalizer::new();
        let text = "Python\tExpert\t5 years";
        assert_eq!(normalizer.normalize(text), "Python | Expert | 5 years");

        let wide = "Acme Corp      2019-2021";
        assert_eq!(normalizer.normalize(wide), "Acme Corp | 2019-2021");
    }

    #[test]
    fn test_markup_artifacts_removed() {
        let normalizer = TextNormalizer::new();
        let text = r"{\sc Jane Doe} worked on {project}";
        assert_eq!(normalizer.normalize(text), "Jane Doe worked on project");
    }

    #[test]
    fn test_divider_lines_dropped() {
        let normalizer = TextNormalizer::new();
        let text = "Education\n----------\nB.Tech";
        assert_eq!(normalizer.normalize(text), "Education\nB.Tech");
    }

    #[test]
    fn test_normalization_is_idempotent() {
        let normalizer = TextNormalizer::new();
        let messy = "● Built  stuff\n\n\nSkills:\tPython,  SQL\n{\\sc Header}\n2018\u{2014}2020";
        let once = normalizer.normalize(messy);
        let twice = normalizer.normalize(&once);
        assert_eq!(once, twice);
    }
}
