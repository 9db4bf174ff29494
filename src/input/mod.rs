//! Resume text input
//!
//! The engine accepts UTF-8 plain text only; turning PDFs or other binary
//! formats into text is an upstream concern. Input arrives from a file path
//! or from stdin when the path is `-`.

use crate::error::{Result, ResumeProfilerError};
use log::info;
use std::path::Path;
use tokio::fs;
use tokio::io::AsyncReadExt;

/// Path argument meaning "read stdin".
pub const STDIN_PATH: &str = "-";

pub struct InputManager;

impl InputManager {
    pub fn new() -> Self {
        Self
    }

    /// Read resume text from a path, or from stdin when the path is `-`.
    pub async fn read_text(&self, path: &str) -> Result<String> {
        if path == STDIN_PATH {
            return self.read_stdin().await;
        }
        self.read_file(Path::new(path)).await
    }

    async fn read_file(&self, path: &Path) -> Result<String> {
        if !path.exists() {
            return Err(ResumeProfilerError::InvalidInput(format!(
                "File does not exist: {}",
                path.display()
            )));
        }

        info!("Reading resume text from {}", path.display());
        fs::read_to_string(path).await.map_err(|e| match e.kind() {
            std::io::ErrorKind::InvalidData => ResumeProfilerError::InvalidInput(format!(
                "File is not valid UTF-8 text: {}",
                path.display()
            )),
            _ => ResumeProfilerError::Io(e),
        })
    }

    async fn read_stdin(&self) -> Result<String> {
        info!("Reading resume text from stdin");
        let mut buffer = Vec::new();
        tokio::io::stdin().read_to_end(&mut buffer).await?;
        String::from_utf8(buffer).map_err(|e| {
            ResumeProfilerError::InvalidInput(format!("Stdin is not valid UTF-8 text: {}", e))
        })
    }
}

impl Default for InputManager {
    fn default() -> Self {
        Self::new()
    }
}
