//! Configuration management for the resume profiler

use crate::error::{Result, ResumeProfilerError};
use crate::profile::SkillCategory;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::PathBuf;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub taxonomy: SkillTaxonomy,
    pub extraction: ExtractionConfig,
    pub output: OutputConfig,
}

/// Closed skill taxonomy: category keyword lists, spelling-variant aliases,
/// and the acronym list used by the display casing policy. Loaded once at
/// startup; read-only afterwards.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SkillTaxonomy {
    pub languages: Vec<String>,
    pub frameworks: Vec<String>,
    pub databases: Vec<String>,
    pub tools: Vec<String>,
    pub soft_skills: Vec<String>,
    pub aliases: BTreeMap<String, String>,
    pub acronyms: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtractionConfig {
    pub fuzzy_matching: bool,
    pub fuzzy_threshold: f64,
    pub name_scan_lines: usize,
    pub min_fallback_line_len: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    pub format: OutputFormat,
    pub color_output: bool,
    pub show_confidence: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OutputFormat {
    Console,
    Json,
    Markdown,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            taxonomy: SkillTaxonomy::default(),
            extraction: ExtractionConfig {
                fuzzy_matching: true,
                fuzzy_threshold: 0.85,
                name_scan_lines: 5,
                min_fallback_line_len: 10,
            },
            output: OutputConfig {
                format: OutputFormat::Console,
                color_output: true,
                show_confidence: true,
            },
        }
    }
}

impl Default for SkillTaxonomy {
    fn default() -> Self {
        let to_strings = |items: &[&str]| -> Vec<String> {
            items.iter().map(|s| s.to_string()).collect()
        };

        let mut aliases = BTreeMap::new();
        for (variant, canonical) in [
            ("js", "javascript"),
            ("ts", "typescript"),
            ("golang", "go"),
            ("cpp", "c++"),
            ("c sharp", "c#"),
            ("reactjs", "react"),
            ("react.js", "react"),
            ("vuejs", "vue"),
            ("vue.js", "vue"),
            ("angularjs", "angular"),
            ("node.js", "nodejs"),
            ("node js", "nodejs"),
            ("next.js", "nextjs"),
            ("expressjs", "express"),
            ("express.js", "express"),
            ("html5", "html"),
            ("css3", "css"),
            ("postgres", "postgresql"),
            ("mongo", "mongodb"),
            ("elastic search", "elasticsearch"),
            ("k8s", "kubernetes"),
            ("amazon web services", "aws"),
            ("google cloud platform", "gcp"),
            ("google cloud", "gcp"),
            ("problem-solving", "problem solving"),
            ("team work", "teamwork"),
        ] {
            aliases.insert(variant.to_string(), canonical.to_string());
        }

        Self {
            languages: to_strings(&[
                "python", "java", "javascript", "typescript", "c++", "c#", "c", "php",
                "ruby", "go", "rust", "kotlin", "swift", "scala", "r", "matlab", "sql",
                "html", "css", "dart",
            ]),
            frameworks: to_strings(&[
                "react", "angular", "vue", "django", "flask", "spring", "express",
                "laravel", "rails", "asp.net", "nodejs", "nextjs", "nuxt", "svelte",
                "jquery", "bootstrap",
            ]),
            databases: to_strings(&[
                "mysql", "postgresql", "mongodb", "redis", "sqlite", "oracle",
                "cassandra", "dynamodb", "elasticsearch", "neo4j", "firebase",
            ]),
            tools: to_strings(&[
                "git", "docker", "kubernetes", "jenkins", "aws", "azure", "gcp",
                "terraform", "ansible", "nginx", "apache", "linux", "windows", "macos",
                "jira", "confluence",
            ]),
            soft_skills: to_strings(&[
                "leadership", "communication", "teamwork", "problem solving",
                "project management", "time management", "analytical thinking",
                "creative", "adaptable", "organized",
            ]),
            aliases,
            acronyms: to_strings(&["aws", "gcp", "sql"]),
        }
    }
}

impl SkillTaxonomy {
    pub fn category_list(&self, category: SkillCategory) -> &[String] {
        match category {
            SkillCategory::Languages => &self.languages,
            SkillCategory::Frameworks => &self.frameworks,
            SkillCategory::Databases => &self.databases,
            SkillCategory::Tools => &self.tools,
            SkillCategory::SoftSkills => &self.soft_skills,
        }
    }

    /// Category of a canonical keyword, first match over the fixed order.
    pub fn category_of(&self, keyword: &str) -> Option<SkillCategory> {
        for category in SkillCategory::all() {
            if self
                .category_list(category)
                .iter()
                .any(|k| k.eq_ignore_ascii_case(keyword))
            {
                return Some(category);
            }
        }
        None
    }

    /// Collapse a spelling variant to its canonical keyword; terms without an
    /// alias entry pass through unchanged.
    pub fn resolve_alias<'a>(&'a self, term: &'a str) -> &'a str {
        self.aliases
            .get(term)
            .map(|s| s.as_str())
            .unwrap_or(term)
    }

    /// Alias-resolve a lower-cased term and place it in the taxonomy.
    pub fn canonicalize(&self, term: &str) -> Option<(SkillCategory, String)> {
        let canonical = self.resolve_alias(term);
        self.category_of(canonical)
            .map(|category| (category, canonical.to_string()))
    }

    /// All terms the skill matcher should search for: every category keyword
    /// plus every alias variant.
    pub fn match_terms(&self) -> Vec<String> {
        let mut terms: Vec<String> = SkillCategory::all()
            .iter()
            .flat_map(|c| self.category_list(*c).iter().cloned())
            .collect();
        terms.extend(self.aliases.keys().cloned());
        terms
    }

    /// Display casing policy: title case per word, acronyms upper-cased.
    /// Canonical storage stays lower-case; this is a rendering concern only.
    pub fn display_casing(&self, skill: &str) -> String {
        if self.acronyms.iter().any(|a| a.eq_ignore_ascii_case(skill)) {
            return skill.to_uppercase();
        }
        let mut out = String::with_capacity(skill.len());
        let mut at_word_start = true;
        for ch in skill.chars() {
            if ch.is_alphabetic() {
                if at_word_start {
                    out.extend(ch.to_uppercase());
                } else {
                    out.extend(ch.to_lowercase());
                }
                at_word_start = false;
            } else {
                out.push(ch);
                at_word_start = true;
            }
        }
        out
    }

    /// Startup coherence checks. A keyword present in two categories or an
    /// alias that cannot reach a known keyword makes the taxonomy unusable.
    pub fn validate(&self) -> Result<()> {
        let mut seen: BTreeMap<String, SkillCategory> = BTreeMap::new();
        for category in SkillCategory::all() {
            for keyword in self.category_list(category) {
                let key = keyword.trim().to_lowercase();
                if key.is_empty() {
                    return Err(ResumeProfilerError::Configuration(format!(
                        "Empty keyword in taxonomy category '{}'",
                        category
                    )));
                }
                if let Some(previous) = seen.insert(key.clone(), category) {
                    return Err(ResumeProfilerError::Configuration(format!(
                        "Skill keyword '{}' appears in both '{}' and '{}'",
                        key, previous, category
                    )));
                }
            }
        }

        for (variant, canonical) in &self.aliases {
            let variant_key = variant.trim().to_lowercase();
            if seen.contains_key(&variant_key) {
                return Err(ResumeProfilerError::Configuration(format!(
                    "Alias '{}' shadows a taxonomy keyword",
                    variant
                )));
            }
            if !seen.contains_key(&canonical.trim().to_lowercase()) {
                return Err(ResumeProfilerError::Configuration(format!(
                    "Alias '{}' points at unknown keyword '{}'",
                    variant, canonical
                )));
            }
        }

        Ok(())
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path();

        let config = if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            toml::from_str(&content).map_err(|e| {
                ResumeProfilerError::Configuration(format!("Failed to parse config: {}", e))
            })?
        } else {
            let config = Self::default();
            config.save()?;
            config
        };

        config.validate()?;
        Ok(config)
    }

    pub fn save(&self) -> Result<()> {
        let config_path = Self::config_path();

        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)
            .map_err(|e| ResumeProfilerError::Configuration(format!("Failed to serialize config: {}", e)))?;

        std::fs::write(&config_path, content)?;
        Ok(())
    }

    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| dirs::home_dir().unwrap_or_else(|| PathBuf::from(".")))
            .join("resume-profiler")
            .join("config.toml")
    }

    pub fn validate(&self) -> Result<()> {
        self.taxonomy.validate()?;

        if !(0.0..=1.0).contains(&self.extraction.fuzzy_threshold) {
            return Err(ResumeProfilerError::Configuration(format!(
                "fuzzy_threshold must be within [0, 1], got {}",
                self.extraction.fuzzy_threshold
            )));
        }
        if self.extraction.name_scan_lines == 0 {
            return Err(ResumeProfilerError::Configuration(
                "name_scan_lines must be at least 1".to_string(),
            ));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_validates() {
        assert!(Config::default().validate().is_ok());
    }

    #[test]
    fn test_keyword_collision_is_fatal() {
        let mut taxonomy = SkillTaxonomy::default();
        taxonomy.tools.push("python".to_string());
        let err = taxonomy.validate().unwrap_err();
        assert!(err.to_string().contains("python"));
    }

    #[test]
    fn test_alias_to_unknown_keyword_is_fatal() {
        let mut taxonomy = SkillTaxonomy::default();
        taxonomy
            .aliases
            .insert("cobol85".to_string(), "cobol".to_string());
        assert!(taxonomy.validate().is_err());
    }

    #[test]
    fn test_alias_shadowing_keyword_is_fatal() {
        let mut taxonomy = SkillTaxonomy::default();
        taxonomy
            .aliases
            .insert("python".to_string(), "java".to_string());
        assert!(taxonomy.validate().is_err());
    }

    #[test]
    fn test_canonicalize_applies_aliases_first() {
        let taxonomy = SkillTaxonomy::default();
        assert_eq!(
            taxonomy.canonicalize("reactjs"),
            Some((SkillCategory::Frameworks, "react".to_string()))
        );
        assert_eq!(
            taxonomy.canonicalize("js"),
            Some((SkillCategory::Languages, "javascript".to_string()))
        );
        assert_eq!(taxonomy.canonicalize("basketweaving"), None);
    }

    #[test]
    fn test_display_casing_policy() {
        let taxonomy = SkillTaxonomy::default();
        assert_eq!(taxonomy.display_casing("aws"), "AWS");
        assert_eq!(taxonomy.display_casing("sql"), "SQL");
        assert_eq!(taxonomy.display_casing("python"), "Python");
        assert_eq!(taxonomy.display_casing("problem solving"), "Problem Solving");
        assert_eq!(taxonomy.display_casing("c++"), "C++");
        assert_eq!(taxonomy.display_casing("asp.net"), "Asp.Net");
    }

    #[test]
    fn test_config_toml_round_trip() {
        let config = Config::default();
        let serialized = toml::to_string_pretty(&config).unwrap();
        let restored: Config = toml::from_str(&serialized).unwrap();
        assert!(restored.validate().is_ok());
        assert_eq!(restored.taxonomy.languages, config.taxonomy.languages);
        assert_eq!(restored.extraction.fuzzy_threshold, 0.85);
    }

    #[test]
    fn test_out_of_range_threshold_rejected() {
        let mut config = Config::default();
        config.extraction.fuzzy_threshold = 1.5;
        assert!(config.validate().is_err());
    }
}
