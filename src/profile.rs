//! Structured candidate profile produced by the extraction pipeline

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Sentinel for single-valued fields with no detected value.
pub const NOT_DETECTED: &str = "Not detected";
/// Sentinel for an absent field inside a detected entry.
pub const NOT_SPECIFIED: &str = "Not specified";
/// Sentinel for a detected experience entry whose duration could not be parsed.
pub const DURATION_NOT_SPECIFIED: &str = "Duration not specified";
/// Sentinel title for a project block without a recognizable heading.
pub const UNTITLED_PROJECT: &str = "Untitled Project";

/// Root aggregate of one extraction run. Built once per input text and never
/// mutated afterwards; re-extraction produces a new profile.
///
/// Every top-level field is always present: absent values are sentinels or
/// empty sequences, never missing keys.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResumeProfile {
    pub name: String,
    pub contact: ContactInfo,
    pub education: Vec<EducationEntry>,
    pub experience: Vec<ExperienceEntry>,
    pub projects: Vec<ProjectEntry>,
    pub certificates: Vec<String>,
    pub interests: Vec<String>,
    pub skills: SkillsMap,
    pub confidence_scores: BTreeMap<String, f64>,
    pub warnings: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContactInfo {
    pub email: String,
    pub phone: String,
    pub linkedin: String,
    pub github: String,
    pub skype: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EducationEntry {
    pub degree: String,
    pub major: String,
    pub institution: String,
    pub duration: String,
    pub gpa: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExperienceEntry {
    pub job_title: String,
    pub company: String,
    pub duration: String,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectEntry {
    pub title: String,
    pub description: String,
    pub technologies: Vec<String>,
}

/// Closed skill taxonomy categories, in fixed check order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SkillCategory {
    Languages,
    Frameworks,
    Databases,
    Tools,
    SoftSkills,
}

impl SkillCategory {
    /// All categories in the fixed first-match-wins order.
    pub fn all() -> [SkillCategory; 5] {
        [
            SkillCategory::Languages,
            SkillCategory::Frameworks,
            SkillCategory::Databases,
            SkillCategory::Tools,
            SkillCategory::SoftSkills,
        ]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SkillCategory::Languages => "languages",
            SkillCategory::Frameworks => "frameworks",
            SkillCategory::Databases => "databases",
            SkillCategory::Tools => "tools",
            SkillCategory::SoftSkills => "soft_skills",
        }
    }

    pub fn from_str_opt(s: &str) -> Option<SkillCategory> {
        match s.to_lowercase().as_str() {
            "languages" => Some(SkillCategory::Languages),
            "frameworks" => Some(SkillCategory::Frameworks),
            "databases" => Some(SkillCategory::Databases),
            "tools" => Some(SkillCategory::Tools),
            "soft_skills" | "soft skills" => Some(SkillCategory::SoftSkills),
            _ => None,
        }
    }
}

impl fmt::Display for SkillCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SkillCategory::Languages => "Languages",
            SkillCategory::Frameworks => "Frameworks",
            SkillCategory::Databases => "Databases",
            SkillCategory::Tools => "Tools",
            SkillCategory::SoftSkills => "Soft Skills",
        };
        write!(f, "{}", name)
    }
}

/// Mapping from category to an insertion-ordered, deduplicated set of
/// canonical lower-case skill names. All five categories are always present.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SkillsMap {
    categories: BTreeMap<SkillCategory, Vec<String>>,
}

impl SkillsMap {
    pub fn new() -> Self {
        let mut categories = BTreeMap::new();
        for category in SkillCategory::all() {
            categories.insert(category, Vec::new());
        }
        Self { categories }
    }

    /// Record a canonical skill under a category, preserving first-hit order.
    pub fn insert(&mut self, category: SkillCategory, skill: String) {
        let entries = self.categories.entry(category).or_default();
        if !entries.contains(&skill) {
            entries.push(skill);
        }
    }

    pub fn get(&self, category: SkillCategory) -> &[String] {
        self.categories
            .get(&category)
            .map(|v| v.as_slice())
            .unwrap_or(&[])
    }

    pub fn contains(&self, skill: &str) -> bool {
        self.categories.values().any(|v| v.iter().any(|s| s == skill))
    }

    /// Total number of skills across all categories.
    pub fn total(&self) -> usize {
        self.categories.values().map(|v| v.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.total() == 0
    }

    /// Flatten to a single ordered list, category-major, for consumers that
    /// want a plain skill list (e.g. the career classifier input).
    pub fn flattened(&self) -> Vec<String> {
        SkillCategory::all()
            .iter()
            .flat_map(|c| self.get(*c).iter().cloned())
            .collect()
    }

    /// Comma-joined flat form, the salary estimator's input shape.
    pub fn joined(&self) -> String {
        self.flattened().join(", ")
    }

    pub fn iter(&self) -> impl Iterator<Item = (SkillCategory, &[String])> + '_ {
        SkillCategory::all()
            .into_iter()
            .map(move |c| (c, self.get(c)))
    }
}

impl Default for SkillsMap {
    fn default() -> Self {
        Self::new()
    }
}

impl Default for ContactInfo {
    fn default() -> Self {
        Self {
            email: String::new(),
            phone: String::new(),
            linkedin: String::new(),
            github: String::new(),
            skype: String::new(),
        }
    }
}

impl Default for EducationEntry {
    fn default() -> Self {
        Self {
            degree: NOT_SPECIFIED.to_string(),
            major: NOT_SPECIFIED.to_string(),
            institution: NOT_SPECIFIED.to_string(),
            duration: String::new(),
            gpa: String::new(),
        }
    }
}

impl Default for ExperienceEntry {
    fn default() -> Self {
        Self {
            job_title: NOT_SPECIFIED.to_string(),
            company: NOT_SPECIFIED.to_string(),
            duration: DURATION_NOT_SPECIFIED.to_string(),
            description: String::new(),
        }
    }
}

impl Default for ProjectEntry {
    fn default() -> Self {
        Self {
            title: UNTITLED_PROJECT.to_string(),
            description: String::new(),
            technologies: Vec::new(),
        }
    }
}

impl ResumeProfile {
    /// Profile with every field at its sentinel/empty value and all
    /// confidence keys present at 0.0.
    pub fn empty() -> Self {
        let mut confidence_scores = BTreeMap::new();
        for field in Self::confidence_fields() {
            confidence_scores.insert(field.to_string(), 0.0);
        }
        Self {
            name: NOT_DETECTED.to_string(),
            contact: ContactInfo::default(),
            education: Vec::new(),
            experience: Vec::new(),
            projects: Vec::new(),
            certificates: Vec::new(),
            interests: Vec::new(),
            skills: SkillsMap::new(),
            confidence_scores,
            warnings: Vec::new(),
        }
    }

    /// The fixed set of confidence map keys.
    pub fn confidence_fields() -> [&'static str; 12] {
        [
            "name",
            "email",
            "phone",
            "linkedin",
            "github",
            "skype",
            "education",
            "experience",
            "projects",
            "certificates",
            "skills",
            "interests",
        ]
    }

    pub fn confidence(&self, field: &str) -> f64 {
        self.confidence_scores.get(field).copied().unwrap_or(0.0)
    }
}
