//! Profile rendering and report output

pub mod formatter;

pub use formatter::{
    save_report_to_file, suggest_filename, ConsoleFormatter, JsonFormatter, MarkdownFormatter,
    OutputFormatter, ReportGenerator,
};
