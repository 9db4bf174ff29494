//! Resume profiler library

pub mod cli;
pub mod config;
pub mod error;
pub mod extract;
pub mod input;
pub mod output;
pub mod profile;

pub use config::Config;
pub use error::{Result, ResumeProfilerError};
pub use extract::ResumeExtractor;
pub use profile::ResumeProfile;
