//! CLI interface for the resume profiler

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "resume-profiler")]
#[command(about = "Rule-based resume information extraction tool")]
#[command(long_about = "Extract structured profile data (contact, education, experience, projects, skills) from plain-text resumes using deterministic pattern matching")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Extract a structured profile from a resume
    Parse {
        /// Path to resume text file, or "-" to read from stdin
        file: String,

        /// Output format: console, json, markdown
        #[arg(short, long, default_value = "console")]
        format: String,

        /// Save report to file instead of printing
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Disable colored output
        #[arg(long)]
        no_color: bool,
    },

    /// Show the skill taxonomy used for categorization
    Taxonomy {
        /// Show a single category: languages, frameworks, databases, tools, soft_skills
        #[arg(short, long)]
        category: Option<String>,
    },

    /// Show configuration
    Config {
        #[command(subcommand)]
        action: Option<ConfigAction>,
    },
}

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Show current configuration
    Show,

    /// Write a default configuration file
    Init,

    /// Print the configuration file path
    Path,
}

/// Parse and validate output format
pub fn parse_output_format(format: &str) -> Result<crate::config::OutputFormat, String> {
    match format.to_lowercase().as_str() {
        "console" => Ok(crate::config::OutputFormat::Console),
        "json" => Ok(crate::config::OutputFormat::Json),
        "markdown" | "md" => Ok(crate::config::OutputFormat::Markdown),
        _ => Err(format!(
            "Invalid output format: {}. Supported: console, json, markdown",
            format
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::OutputFormat;

    #[test]
    fn test_parse_output_format_accepts_known_formats() {
        assert_eq!(parse_output_format("console"), Ok(OutputFormat::Console));
        assert_eq!(parse_output_format("JSON"), Ok(OutputFormat::Json));
        assert_eq!(parse_output_format("md"), Ok(OutputFormat::Markdown));
    }

    #[test]
    fn test_parse_output_format_rejects_unknown() {
        let err = parse_output_format("yaml").unwrap_err();
        assert!(err.contains("yaml"));
        assert!(err.contains("console, json, markdown"));
    }

    #[test]
    fn test_cli_parses_parse_command() {
        let cli =
            Cli::try_parse_from(["resume-profiler", "parse", "resume.txt", "--format", "json"])
                .unwrap();
        match cli.command {
            Commands::Parse {
                file,
                format,
                output,
                no_color,
            } => {
                assert_eq!(file, "resume.txt");
                assert_eq!(format, "json");
                assert!(output.is_none());
                assert!(!no_color);
            }
            _ => panic!("expected parse command"),
        }
    }

    #[test]
    fn test_cli_parses_stdin_marker() {
        let cli = Cli::try_parse_from(["resume-profiler", "parse", "-"]).unwrap();
        match cli.command {
            Commands::Parse { file, format, .. } => {
                assert_eq!(file, "-");
                assert_eq!(format, "console");
            }
            _ => panic!("expected parse command"),
        }
    }
}
