//! Profile aggregation
//!
//! Collects every extractor's output into one immutable `ResumeProfile`,
//! fills the fixed confidence map, and runs the anomaly scan that feeds
//! `warnings`. Confidence values are advisory metadata; nothing in the
//! pipeline branches on them.

use crate::extract::contact::ContactExtraction;
use crate::profile::{
    EducationEntry, ExperienceEntry, ProjectEntry, ResumeProfile, SkillsMap,
};
use log::warn;
use regex::Regex;
use std::collections::BTreeMap;
use std::collections::BTreeSet;

/// Inputs shorter than this (after trimming) are flagged as unlikely to be
/// a whole resume.
const SHORT_INPUT_CHARS: usize = 80;

pub struct ProfileAggregator {
    placeholder_regex: Regex,
}

impl ProfileAggregator {
    pub fn new() -> Self {
        let placeholder_regex =
            Regex::new(r"\[[^\[\]\n]{1,40}\]").expect("Invalid placeholder regex");
        Self { placeholder_regex }
    }

    #[allow(clippy::too_many_arguments)]
    pub fn aggregate(
        &self,
        text: &str,
        contact: ContactExtraction,
        education: (Vec<EducationEntry>, f64),
        experience: (Vec<ExperienceEntry>, f64),
        projects: (Vec<ProjectEntry>, f64),
        certificates: (Vec<String>, f64),
        skills: (SkillsMap, f64),
        interests: (Vec<String>, f64),
    ) -> ResumeProfile {
        let mut confidence_scores = BTreeMap::new();
        confidence_scores.insert("name".to_string(), contact.name_confidence);
        confidence_scores.insert("email".to_string(), contact.email_confidence);
        confidence_scores.insert("phone".to_string(), contact.phone_confidence);
        confidence_scores.insert("linkedin".to_string(), contact.linkedin_confidence);
        confidence_scores.insert("github".to_string(), contact.github_confidence);
        confidence_scores.insert("skype".to_string(), contact.skype_confidence);
        confidence_scores.insert("education".to_string(), education.1);
        confidence_scores.insert("experience".to_string(), experience.1);
        confidence_scores.insert("projects".to_string(), projects.1);
        confidence_scores.insert("certificates".to_string(), certificates.1);
        confidence_scores.insert("skills".to_string(), skills.1);
        confidence_scores.insert("interests".to_string(), interests.1);

        let warnings = self.scan_warnings(text);
        for warning in &warnings {
            warn!("{}", warning);
        }

        ResumeProfile {
            name: contact.name,
            contact: contact.contact,
            education: education.0,
            experience: experience.0,
            projects: projects.0,
            certificates: certificates.0,
            interests: interests.0,
            skills: skills.0,
            confidence_scores,
            warnings,
        }
    }

    /// Non-fatal anomalies: template placeholders left unfilled and inputs
    /// too short to be a whole resume. The empty string is not warned about;
    /// the sentinel-filled profile already says everything.
    fn scan_warnings(&self, text: &str) -> Vec<String> {
        let mut warnings = Vec::new();

        let mut placeholders = BTreeSet::new();
        for found in self.placeholder_regex.find_iter(text) {
            placeholders.insert(found.as_str().to_string());
        }
        for placeholder in placeholders {
            warnings.push(format!(
                "Unresolved template placeholder {} left in input",
                placeholder
            ));
        }

        let trimmed = text.trim();
        if !trimmed.is_empty() && trimmed.chars().count() < SHORT_INPUT_CHARS {
            warnings.push(format!(
                "Input is only {} characters; extraction coverage is likely incomplete",
                trimmed.chars().count()
            ));
        }

        warnings
    }
}

impl Default for ProfileAggregator {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::profile::{ResumeProfile, NOT_DETECTED};

    fn empty_inputs() -> (
        ContactExtraction,
        (Vec<EducationEntry>, f64),
        (Vec<ExperienceEntry>, f64),
        (Vec<ProjectEntry>, f64),
        (Vec<String>, f64),
        (SkillsMap, f64),
        (Vec<String>, f64),
    ) {
        (
            ContactExtraction {
                name: NOT_DETECTED.to_string(),
                ..ContactExtraction::default()
            },
            (Vec::new(), 0.0),
            (Vec::new(), 0.0),
            (Vec::new(), 0.0),
            (Vec::new(), 0.0),
            (SkillsMap::new(), 0.0),
            (Vec::new(), 0.0),
        )
    }

    #[test]
    fn test_empty_aggregation_matches_empty_profile() {
        let aggregator = ProfileAggregator::new();
        let (contact, education, experience, projects, certificates, skills, interests) =
            empty_inputs();

        let profile = aggregator.aggregate(
            "",
            contact,
            education,
            experience,
            projects,
            certificates,
            skills,
            interests,
        );

        assert_eq!(profile, ResumeProfile::empty());
    }

    #[test]
    fn test_confidence_keys_always_complete() {
        let aggregator = ProfileAggregator::new();
        let (contact, _, experience, projects, certificates, skills, interests) = empty_inputs();
        let education = (
            vec![EducationEntry {
                degree: "B.Tech".to_string(),
                ..EducationEntry::default()
            }],
            0.9,
        );

        let profile = aggregator.aggregate(
            "some resume text that is long enough to avoid the short input warning path entirely",
            contact,
            education,
            experience,
            projects,
            certificates,
            skills,
            interests,
        );

        for field in ResumeProfile::confidence_fields() {
            assert!(
                profile.confidence_scores.contains_key(field),
                "missing confidence key {}",
                field
            );
        }
        assert_eq!(profile.confidence("education"), 0.9);
        assert_eq!(profile.confidence("skills"), 0.0);
        assert_eq!(profile.education.len(), 1);
    }

    #[test]
    fn test_placeholder_warnings_are_distinct_and_sorted() {
        let aggregator = ProfileAggregator::new();
        let (contact, education, experience, projects, certificates, skills, interests) =
            empty_inputs();
        let text = "[Your Name]\nEmail: [Your Email]\nPhone: [Your Email]\npadding padding padding padding padding";

        let profile = aggregator.aggregate(
            text,
            contact,
            education,
            experience,
            projects,
            certificates,
            skills,
            interests,
        );

        assert_eq!(profile.warnings.len(), 2);
        assert!(profile.warnings[0].contains("[Your Email]"));
        assert!(profile.warnings[1].contains("[Your Name]"));
    }

    #[test]
    fn test_short_input_warning() {
        let aggregator = ProfileAggregator::new();
        let (contact, education, experience, projects, certificates, skills, interests) =
            empty_inputs();

        let profile = aggregator.aggregate(
            "Jane Doe",
            contact,
            education,
            experience,
            projects,
            certificates,
            skills,
            interests,
        );

        assert_eq!(profile.warnings.len(), 1);
        assert!(profile.warnings[0].contains("8 characters"));
    }

    #[test]
    fn test_empty_input_has_no_warnings() {
        let aggregator = ProfileAggregator::new();
        let (contact, education, experience, projects, certificates, skills, interests) =
            empty_inputs();

        let profile = aggregator.aggregate(
            "",
            contact,
            education,
            experience,
            projects,
            certificates,
            skills,
            interests,
        );

        assert!(profile.warnings.is_empty());
    }
}
