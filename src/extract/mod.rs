//! Extraction pipeline
//!
//! Normalize, segment, run every field extractor over the segmented text,
//! then aggregate into a `ResumeProfile`. Field extractors are mutually
//! independent and read-only over the segmented text, so they are joined
//! concurrently; ordering between them carries no meaning.

pub mod aggregator;
pub mod certifications;
pub mod contact;
pub mod education;
pub mod experience;
pub mod interests;
pub mod normalizer;
pub mod projects;
pub mod sections;
pub mod skills;
pub mod strategy;

use crate::config::Config;
use crate::error::Result;
use crate::profile::ResumeProfile;
use aggregator::ProfileAggregator;
use certifications::CertificationExtractor;
use contact::ContactExtractor;
use education::EducationExtractor;
use experience::ExperienceExtractor;
use interests::InterestExtractor;
use log::info;
use normalizer::TextNormalizer;
use projects::ProjectExtractor;
use sections::{SectionKind, SectionSegmenter};
use skills::SkillsCategorizer;

/// One-stop extraction engine. Construction compiles every pattern family
/// and the taxonomy automaton; afterwards the extractor is immutable and
/// each `extract` call is an independent, deterministic pass.
pub struct ResumeExtractor {
    normalizer: TextNormalizer,
    segmenter: SectionSegmenter,
    contact: ContactExtractor,
    education: EducationExtractor,
    experience: ExperienceExtractor,
    projects: ProjectExtractor,
    certifications: CertificationExtractor,
    interests: InterestExtractor,
    skills: SkillsCategorizer,
    aggregator: ProfileAggregator,
}

impl ResumeExtractor {
    pub fn new(config: &Config) -> Result<Self> {
        config.validate()?;

        Ok(Self {
            normalizer: TextNormalizer::new(),
            segmenter: SectionSegmenter::new(),
            contact: ContactExtractor::new(&config.extraction),
            education: EducationExtractor::new(),
            experience: ExperienceExtractor::new(),
            projects: ProjectExtractor::new(&config.extraction),
            certifications: CertificationExtractor::new(),
            interests: InterestExtractor::new(),
            skills: SkillsCategorizer::new(&config.taxonomy, &config.extraction)?,
            aggregator: ProfileAggregator::new(),
        })
    }

    /// Run the whole pipeline over raw resume text. Never fails: inputs
    /// where nothing is detected produce a sentinel-filled profile.
    pub async fn extract(&self, raw: &str) -> ResumeProfile {
        info!("Extracting profile from {} characters of input", raw.len());

        let text = self.normalizer.normalize(raw);
        let segmented = self.segmenter.segment(&text);

        let found: Vec<&str> = SectionKind::all()
            .into_iter()
            .filter(|kind| segmented.has(*kind))
            .map(|kind| kind.as_str())
            .collect();
        info!("Sections found: [{}]", found.join(", "));

        let (contact, education, experience, projects, certificates, skills, interests) = tokio::join!(
            async { self.contact.extract(&text) },
            async {
                self.education
                    .extract(segmented.get(SectionKind::Education), &text)
            },
            async {
                self.experience
                    .extract(segmented.get(SectionKind::Experience), &text)
            },
            async {
                self.projects
                    .extract(segmented.get(SectionKind::Projects), &text, &self.skills)
            },
            async {
                self.certifications
                    .extract(segmented.get(SectionKind::Certifications), &text)
            },
            async {
                self.skills
                    .categorize(&text, segmented.get(SectionKind::Skills))
            },
            async {
                self.interests
                    .extract(segmented.get(SectionKind::Interests), &text)
            },
        );

        let profile = self.aggregator.aggregate(
            &text,
            contact,
            education,
            experience,
            projects,
            certificates,
            skills,
            interests,
        );

        info!(
            "Extraction complete: {} education, {} experience, {} projects, {} skills",
            profile.education.len(),
            profile.experience.len(),
            profile.projects.len(),
            profile.skills.total()
        );

        profile
    }
}
