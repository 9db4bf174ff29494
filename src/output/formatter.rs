//! Output formatters with multiple format support
//!
//! The profile stores canonical lower-case skills and explicit sentinels;
//! everything presentation-related (display casing, "Not detected" lines,
//! confidence badges) happens here and only here.

use crate::config::{Config, OutputFormat, SkillTaxonomy};
use crate::error::Result;
use crate::input::STDIN_PATH;
use crate::profile::{ResumeProfile, NOT_DETECTED, NOT_SPECIFIED};
use colored::{Color, Colorize};
use std::path::Path;

/// Trait for rendering a profile into one output format.
pub trait OutputFormatter {
    fn format_profile(&self, profile: &ResumeProfile) -> Result<String>;
    fn supports_format(&self) -> OutputFormat;
}

/// Console formatter with colors and confidence badges.
pub struct ConsoleFormatter {
    use_colors: bool,
    show_confidence: bool,
    taxonomy: SkillTaxonomy,
}

/// JSON formatter for downstream consumers; canonical lower-case skills,
/// no display casing.
pub struct JsonFormatter {
    pretty: bool,
}

/// Markdown formatter for shareable reports.
pub struct MarkdownFormatter {
    include_metadata: bool,
    taxonomy: SkillTaxonomy,
}

/// Coordinates the formatters behind one dispatch point.
pub struct ReportGenerator {
    console_formatter: ConsoleFormatter,
    json_formatter: JsonFormatter,
    markdown_formatter: MarkdownFormatter,
}

impl ConsoleFormatter {
    pub fn new(use_colors: bool, show_confidence: bool, taxonomy: SkillTaxonomy) -> Self {
        Self {
            use_colors,
            show_confidence,
            taxonomy,
        }
    }

    fn colorize(&self, text: &str, color: Color) -> String {
        if self.use_colors {
            text.color(color).to_string()
        } else {
            text.to_string()
        }
    }

    fn format_header(&self, title: &str, level: u8) -> String {
        let prefix = match level {
            1 => "█",
            2 => "▓",
            _ => "▒",
        };

        let color = match level {
            1 => Color::Blue,
            2 => Color::Green,
            _ => Color::Yellow,
        };

        if self.use_colors {
            format!(
                "\n{} {}\n",
                prefix.color(color).bold(),
                title.color(color).bold()
            )
        } else {
            format!("\n{} {}\n", prefix, title)
        }
    }

    /// Badge for a [0, 1] confidence score. Zero confidence gets no badge;
    /// the sentinel value already says everything.
    fn confidence_badge(&self, confidence: f64) -> String {
        if !self.show_confidence {
            return String::new();
        }
        let (label, color) = match (confidence * 100.0).round() as u8 {
            95..=100 => ("CERTAIN", Color::Green),
            85..=94 => ("HIGH", Color::BrightGreen),
            70..=84 => ("MEDIUM", Color::Yellow),
            1..=69 => ("LOW", Color::Red),
            _ => return String::new(),
        };

        if self.use_colors {
            format!(" [{}]", label.color(color).bold())
        } else {
            format!(" [{}]", label)
        }
    }

    fn display_or_sentinel(value: &str) -> &str {
        if value.is_empty() {
            NOT_DETECTED
        } else {
            value
        }
    }

    fn cased_skills(&self, skills: &[String]) -> String {
        skills
            .iter()
            .map(|s| self.taxonomy.display_casing(s))
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl OutputFormatter for ConsoleFormatter {
    fn format_profile(&self, profile: &ResumeProfile) -> Result<String> {
        let mut output = String::new();

        output.push_str(&self.format_header("RESUME PROFILE", 1));
        output.push_str(&format!(
            "Name: {}{}\n",
            self.colorize(&profile.name, Color::Cyan),
            self.confidence_badge(profile.confidence("name"))
        ));

        output.push_str(&self.format_header("Contact", 2));
        let contact = &profile.contact;
        for (label, value, field) in [
            ("Email", &contact.email, "email"),
            ("Phone", &contact.phone, "phone"),
            ("LinkedIn", &contact.linkedin, "linkedin"),
            ("GitHub", &contact.github, "github"),
            ("Skype", &contact.skype, "skype"),
        ] {
            output.push_str(&format!(
                "  {:<9} {}{}\n",
                format!("{}:", label),
                Self::display_or_sentinel(value),
                self.confidence_badge(profile.confidence(field))
            ));
        }

        output.push_str(&self.format_header("Education", 2));
        if profile.education.is_empty() {
            output.push_str(&format!("  {}\n", NOT_DETECTED));
        }
        for (i, entry) in profile.education.iter().enumerate() {
            let mut heading = entry.degree.clone();
            if entry.major != NOT_SPECIFIED {
                heading.push_str(&format!(" in {}", entry.major));
            }
            output.push_str(&format!(
                "  {}. {}{}\n",
                i + 1,
                self.colorize(&heading, Color::White),
                self.confidence_badge(profile.confidence("education"))
            ));
            output.push_str(&format!("     Institution: {}\n", entry.institution));
            if !entry.duration.is_empty() {
                output.push_str(&format!("     Duration: {}\n", entry.duration));
            }
            if !entry.gpa.is_empty() {
                output.push_str(&format!("     GPA: {}\n", entry.gpa));
            }
        }

        output.push_str(&self.format_header("Experience", 2));
        if profile.experience.is_empty() {
            output.push_str(&format!("  {}\n", NOT_DETECTED));
        }
        for (i, entry) in profile.experience.iter().enumerate() {
            let mut heading = entry.job_title.clone();
            if entry.company != NOT_SPECIFIED {
                heading.push_str(&format!(" at {}", entry.company));
            }
            output.push_str(&format!(
                "  {}. {}{}\n",
                i + 1,
                self.colorize(&heading, Color::White),
                self.confidence_badge(profile.confidence("experience"))
            ));
            output.push_str(&format!("     Duration: {}\n", entry.duration));
            if !entry.description.is_empty() {
                output.push_str(&format!("     {}\n", entry.description));
            }
        }

        output.push_str(&self.format_header("Projects", 2));
        if profile.projects.is_empty() {
            output.push_str(&format!("  {}\n", NOT_DETECTED));
        }
        for (i, entry) in profile.projects.iter().enumerate() {
            output.push_str(&format!(
                "  {}. {}{}\n",
                i + 1,
                self.colorize(&entry.title, Color::White),
                self.confidence_badge(profile.confidence("projects"))
            ));
            if !entry.description.is_empty() {
                output.push_str(&format!("     {}\n", entry.description));
            }
            if !entry.technologies.is_empty() {
                output.push_str(&format!(
                    "     Technologies: {}\n",
                    self.cased_skills(&entry.technologies)
                ));
            }
        }

        output.push_str(&self.format_header("Skills", 2));
        if profile.skills.is_empty() {
            output.push_str(&format!("  {}\n", NOT_DETECTED));
        }
        for (category, skills) in profile.skills.iter() {
            if skills.is_empty() {
                continue;
            }
            output.push_str(&format!(
                "  {}: {}{}\n",
                category,
                self.cased_skills(skills),
                self.confidence_badge(profile.confidence("skills"))
            ));
        }

        output.push_str(&self.format_header("Certificates", 2));
        if profile.certificates.is_empty() {
            output.push_str(&format!("  {}\n", NOT_DETECTED));
        }
        for certificate in &profile.certificates {
            output.push_str(&format!("  • {}\n", certificate));
        }

        output.push_str(&self.format_header("Interests", 2));
        if profile.interests.is_empty() {
            output.push_str(&format!("  {}\n", NOT_DETECTED));
        }
        if !profile.interests.is_empty() {
            output.push_str(&format!("  {}\n", profile.interests.join(", ")));
        }

        if !profile.warnings.is_empty() {
            output.push_str(&self.format_header("Warnings", 2));
            for warning in &profile.warnings {
                output.push_str(&format!(
                    "  ! {}\n",
                    self.colorize(warning, Color::Yellow)
                ));
            }
        }

        Ok(output)
    }

    fn supports_format(&self) -> OutputFormat {
        OutputFormat::Console
    }
}

impl JsonFormatter {
    pub fn new(pretty: bool) -> Self {
        Self { pretty }
    }
}

impl OutputFormatter for JsonFormatter {
    fn format_profile(&self, profile: &ResumeProfile) -> Result<String> {
        if self.pretty {
            Ok(serde_json::to_string_pretty(profile)?)
        } else {
            Ok(serde_json::to_string(profile)?)
        }
    }

    fn supports_format(&self) -> OutputFormat {
        OutputFormat::Json
    }
}

impl MarkdownFormatter {
    pub fn new(include_metadata: bool, taxonomy: SkillTaxonomy) -> Self {
        Self {
            include_metadata,
            taxonomy,
        }
    }

    fn cased_skills(&self, skills: &[String]) -> String {
        skills
            .iter()
            .map(|s| self.taxonomy.display_casing(s))
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl OutputFormatter for MarkdownFormatter {
    fn format_profile(&self, profile: &ResumeProfile) -> Result<String> {
        let mut output = String::new();

        output.push_str("# Resume Profile\n\n");
        output.push_str(&format!("**Name:** {}\n\n", profile.name));

        output.push_str("## Contact\n\n");
        output.push_str("| Field | Value |\n");
        output.push_str("|-------|-------|\n");
        let contact = &profile.contact;
        for (label, value) in [
            ("Email", &contact.email),
            ("Phone", &contact.phone),
            ("LinkedIn", &contact.linkedin),
            ("GitHub", &contact.github),
            ("Skype", &contact.skype),
        ] {
            output.push_str(&format!(
                "| {} | {} |\n",
                label,
                ConsoleFormatter::display_or_sentinel(value)
            ));
        }
        output.push('\n');

        output.push_str("## Education\n\n");
        if profile.education.is_empty() {
            output.push_str(&format!("{}\n\n", NOT_DETECTED));
        }
        for (i, entry) in profile.education.iter().enumerate() {
            output.push_str(&format!("{}. **{}**", i + 1, entry.degree));
            if entry.major != NOT_SPECIFIED {
                output.push_str(&format!(" in {}", entry.major));
            }
            output.push('\n');
            output.push_str(&format!("   - Institution: {}\n", entry.institution));
            if !entry.duration.is_empty() {
                output.push_str(&format!("   - Duration: {}\n", entry.duration));
            }
            if !entry.gpa.is_empty() {
                output.push_str(&format!("   - GPA: {}\n", entry.gpa));
            }
        }
        if !profile.education.is_empty() {
            output.push('\n');
        }

        output.push_str("## Experience\n\n");
        if profile.experience.is_empty() {
            output.push_str(&format!("{}\n\n", NOT_DETECTED));
        }
        for (i, entry) in profile.experience.iter().enumerate() {
            output.push_str(&format!("{}. **{}**", i + 1, entry.job_title));
            if entry.company != NOT_SPECIFIED {
                output.push_str(&format!(" at {}", entry.company));
            }
            output.push_str(&format!(" ({})\n", entry.duration));
            if !entry.description.is_empty() {
                output.push_str(&format!("   {}\n", entry.description));
            }
        }
        if !profile.experience.is_empty() {
            output.push('\n');
        }

        output.push_str("## Projects\n\n");
        if profile.projects.is_empty() {
            output.push_str(&format!("{}\n\n", NOT_DETECTED));
        }
        for (i, entry) in profile.projects.iter().enumerate() {
            output.push_str(&format!("{}. **{}**\n", i + 1, entry.title));
            if !entry.description.is_empty() {
                output.push_str(&format!("   {}\n", entry.description));
            }
            if !entry.technologies.is_empty() {
                output.push_str(&format!(
                    "   Technologies: {}\n",
                    self.cased_skills(&entry.technologies)
                ));
            }
        }
        if !profile.projects.is_empty() {
            output.push('\n');
        }

        output.push_str("## Skills\n\n");
        if profile.skills.is_empty() {
            output.push_str(&format!("{}\n", NOT_DETECTED));
        } else {
            output.push_str("| Category | Skills |\n");
            output.push_str("|----------|--------|\n");
            for (category, skills) in profile.skills.iter() {
                if skills.is_empty() {
                    continue;
                }
                output.push_str(&format!("| {} | {} |\n", category, self.cased_skills(skills)));
            }
        }
        output.push('\n');

        output.push_str("## Certificates\n\n");
        if profile.certificates.is_empty() {
            output.push_str(&format!("{}\n", NOT_DETECTED));
        }
        for certificate in &profile.certificates {
            output.push_str(&format!("- {}\n", certificate));
        }
        output.push('\n');

        output.push_str("## Interests\n\n");
        if profile.interests.is_empty() {
            output.push_str(&format!("{}\n", NOT_DETECTED));
        }
        for interest in &profile.interests {
            output.push_str(&format!("- {}\n", interest));
        }
        output.push('\n');

        if !profile.warnings.is_empty() {
            output.push_str("## Warnings\n\n");
            for warning in &profile.warnings {
                output.push_str(&format!("- {}\n", warning));
            }
            output.push('\n');
        }

        if self.include_metadata {
            output.push_str("---\n\n");
            output.push_str(&format!(
                "*Generated by resume-profiler v{} on {}*\n",
                env!("CARGO_PKG_VERSION"),
                chrono::Utc::now().format("%Y-%m-%d %H:%M:%S UTC")
            ));
        }

        Ok(output)
    }

    fn supports_format(&self) -> OutputFormat {
        OutputFormat::Markdown
    }
}

impl ReportGenerator {
    pub fn new(config: &Config) -> Self {
        Self {
            console_formatter: ConsoleFormatter::new(
                config.output.color_output,
                config.output.show_confidence,
                config.taxonomy.clone(),
            ),
            json_formatter: JsonFormatter::new(true),
            markdown_formatter: MarkdownFormatter::new(true, config.taxonomy.clone()),
        }
    }

    pub fn generate(&self, profile: &ResumeProfile, format: OutputFormat) -> Result<String> {
        match format {
            OutputFormat::Console => self.console_formatter.format_profile(profile),
            OutputFormat::Json => self.json_formatter.format_profile(profile),
            OutputFormat::Markdown => self.markdown_formatter.format_profile(profile),
        }
    }
}

/// Write a rendered report, creating parent directories as needed.
pub fn save_report_to_file(content: &str, file_path: &Path) -> Result<()> {
    use std::fs;
    if let Some(parent) = file_path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(file_path, content)?;
    Ok(())
}

/// Timestamped output filename derived from the input file name.
pub fn suggest_filename(format: OutputFormat, source_name: &str, timestamp: bool) -> String {
    let base_name = Path::new(source_name)
        .file_stem()
        .unwrap_or_default()
        .to_string_lossy();
    let base_name = if base_name.is_empty() || base_name == STDIN_PATH {
        "resume"
    } else {
        base_name.as_ref()
    };

    let timestamp_suffix = if timestamp {
        format!("_{}", chrono::Utc::now().format("%Y%m%d_%H%M%S"))
    } else {
        String::new()
    };

    let extension = match format {
        OutputFormat::Console => "txt",
        OutputFormat::Json => "json",
        OutputFormat::Markdown => "md",
    };

    format!("{}_profile{}.{}", base_name, timestamp_suffix, extension)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::profile::{EducationEntry, SkillCategory};

    fn sample_profile() -> ResumeProfile {
        let mut profile = ResumeProfile::empty();
        profile.name = "Jane Doe".to_string();
        profile.contact.email = "jane.doe@example.com".to_string();
        profile.education.push(EducationEntry {
            degree: "B.Tech".to_string(),
            major: "Computer Science".to_string(),
            institution: "ABC Institute of Technology".to_string(),
            duration: "2018-2022".to_string(),
            gpa: "8.5/10".to_string(),
        });
        profile.skills.insert(SkillCategory::Languages, "python".to_string());
        profile.skills.insert(SkillCategory::Tools, "aws".to_string());
        profile
            .confidence_scores
            .insert("email".to_string(), 1.0);
        profile
            .confidence_scores
            .insert("skills".to_string(), 0.95);
        profile
    }

    fn generator() -> ReportGenerator {
        let mut config = Config::default();
        config.output.color_output = false;
        ReportGenerator::new(&config)
    }

    #[test]
    fn test_console_renders_values_and_sentinels() {
        let rendered = generator()
            .generate(&sample_profile(), OutputFormat::Console)
            .unwrap();

        assert!(rendered.contains("Name: Jane Doe"));
        assert!(rendered.contains("Email:    jane.doe@example.com [CERTAIN]"));
        assert!(rendered.contains("Phone:    Not detected"));
        assert!(rendered.contains("B.Tech in Computer Science"));
        assert!(rendered.contains("GPA: 8.5/10"));
    }

    #[test]
    fn test_console_applies_display_casing() {
        let rendered = generator()
            .generate(&sample_profile(), OutputFormat::Console)
            .unwrap();

        assert!(rendered.contains("Languages: Python"));
        assert!(rendered.contains("Tools: AWS"));
        assert!(!rendered.contains("Languages: python"));
    }

    #[test]
    fn test_console_empty_sections_show_sentinel() {
        let rendered = generator()
            .generate(&ResumeProfile::empty(), OutputFormat::Console)
            .unwrap();

        assert!(rendered.contains("▓ Experience\n  Not detected"));
        assert!(rendered.contains("▓ Skills\n  Not detected"));
        assert!(!rendered.contains("Warnings"));
    }

    #[test]
    fn test_json_keeps_canonical_lowercase() {
        let rendered = generator()
            .generate(&sample_profile(), OutputFormat::Json)
            .unwrap();

        let value: serde_json::Value = serde_json::from_str(&rendered).unwrap();
        assert_eq!(value["skills"]["languages"][0], "python");
        assert_eq!(value["name"], "Jane Doe");
        assert!(value.get("confidence_scores").is_some());
    }

    #[test]
    fn test_markdown_tables_and_casing() {
        let rendered = generator()
            .generate(&sample_profile(), OutputFormat::Markdown)
            .unwrap();

        assert!(rendered.contains("| Email | jane.doe@example.com |"));
        assert!(rendered.contains("| Languages | Python |"));
        assert!(rendered.contains("1. **B.Tech** in Computer Science"));
        assert!(rendered.contains("Generated by resume-profiler"));
    }

    #[test]
    fn test_suggest_filename_shapes() {
        let name = suggest_filename(OutputFormat::Json, "jane_resume.txt", false);
        assert_eq!(name, "jane_resume_profile.json");

        let stamped = suggest_filename(OutputFormat::Markdown, "jane_resume.txt", true);
        assert!(stamped.starts_with("jane_resume_profile_"));
        assert!(stamped.ends_with(".md"));

        let stdin = suggest_filename(OutputFormat::Console, "-", false);
        assert_eq!(stdin, "resume_profile.txt");
    }

    #[test]
    fn test_save_report_creates_parent_dirs() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("reports").join("out.json");

        save_report_to_file("{}", &path).unwrap();

        assert_eq!(std::fs::read_to_string(&path).unwrap(), "{}");
    }
}
