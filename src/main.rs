//! Resume profiler: rule-based resume information extraction tool

mod cli;
mod config;
mod error;
mod extract;
mod input;
mod output;
mod profile;

use clap::Parser;
use cli::{Cli, Commands, ConfigAction};
use config::Config;
use error::{Result, ResumeProfilerError};
use extract::ResumeExtractor;
use input::InputManager;
use log::{error, info};
use output::{save_report_to_file, suggest_filename, ReportGenerator};
use profile::SkillCategory;
use std::process;

#[tokio::main]
async fn main() {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.verbose {
        "debug"
    } else {
        "info"
    };
    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(log_level)
    ).init();

    // Load configuration
    let config = match Config::load() {
        Ok(config) => config,
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            process::exit(1);
        }
    };

    // Execute command
    if let Err(e) = run_command(cli.command, config).await {
        error!("Command failed: {}", e);
        process::exit(1);
    }
}

async fn run_command(command: Commands, mut config: Config) -> Result<()> {
    match command {
        Commands::Parse {
            file,
            format,
            output,
            no_color,
        } => {
            info!("Starting resume extraction");

            // Parse output format
            let output_format =
                cli::parse_output_format(&format).map_err(ResumeProfilerError::UnsupportedFormat)?;

            if no_color {
                config.output.color_output = false;
            }

            // Status chatter goes to stderr so the report on stdout stays
            // pipeable (parse - --format json | jq).
            if file == input::STDIN_PATH {
                eprintln!("📄 Reading resume from stdin...");
            } else {
                eprintln!("📄 Reading resume: {}", file);
            }

            let input_manager = InputManager::new();
            let text = input_manager.read_text(&file).await?;
            eprintln!("📊 Input length: {} characters", text.len());

            eprintln!("🔍 Extracting profile...");
            let extractor = ResumeExtractor::new(&config)?;
            let resume_profile = extractor.extract(&text).await;

            let generator = ReportGenerator::new(&config);
            let report = generator.generate(&resume_profile, output_format)?;

            match output {
                Some(path) => {
                    let path = if path.is_dir() {
                        path.join(suggest_filename(output_format, &file, true))
                    } else {
                        path
                    };
                    save_report_to_file(&report, &path)?;
                    eprintln!("✅ Report saved to: {}", path.display());
                }
                None => {
                    println!("{}", report);
                }
            }
        }

        Commands::Taxonomy { category } => {
            println!("📚 Skill Taxonomy\n");

            let categories = match category {
                Some(name) => {
                    let category = SkillCategory::from_str_opt(&name).ok_or_else(|| {
                        ResumeProfilerError::InvalidInput(format!(
                            "Unknown category: {}. Supported: languages, frameworks, databases, tools, soft_skills",
                            name
                        ))
                    })?;
                    vec![category]
                }
                None => SkillCategory::all().to_vec(),
            };

            let show_all = categories.len() == SkillCategory::all().len();
            for category in categories {
                let terms = config.taxonomy.category_list(category);
                println!("{} ({} terms):", category, terms.len());
                for term in terms {
                    println!("  • {}", config.taxonomy.display_casing(term));
                }
                println!();
            }

            if show_all && !config.taxonomy.aliases.is_empty() {
                println!("Aliases ({}):", config.taxonomy.aliases.len());
                for (alias, canonical) in &config.taxonomy.aliases {
                    println!("  • {} -> {}", alias, canonical);
                }
            }
        }

        Commands::Config { action } => match action {
            Some(ConfigAction::Show) | None => {
                println!("⚙️  Current Configuration\n");
                println!("Config File: {}", Config::config_path().display());
                println!("\nOutput:");
                println!("  Format: {:?}", config.output.format);
                println!("  Color: {}", config.output.color_output);
                println!("  Confidence Badges: {}", config.output.show_confidence);
                println!("\nExtraction:");
                println!("  Fuzzy Matching: {}", config.extraction.fuzzy_matching);
                println!("  Fuzzy Threshold: {:.2}", config.extraction.fuzzy_threshold);
                println!("  Name Scan Lines: {}", config.extraction.name_scan_lines);
                println!("\nTaxonomy:");
                for category in SkillCategory::all() {
                    println!(
                        "  {}: {} terms",
                        category,
                        config.taxonomy.category_list(category).len()
                    );
                }
                println!("  Aliases: {}", config.taxonomy.aliases.len());
                println!("  Acronyms: {}", config.taxonomy.acronyms.len());
            }

            Some(ConfigAction::Init) => {
                let default_config = Config::default();
                default_config.save()?;
                println!(
                    "✅ Default configuration written to: {}",
                    Config::config_path().display()
                );
            }

            Some(ConfigAction::Path) => {
                println!("{}", Config::config_path().display());
            }
        },
    }

    Ok(())
}
