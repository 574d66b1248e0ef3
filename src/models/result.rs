use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use super::Line;

/// State carried from one line to the next while scanning a file
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ProcessingState {
    /// X value of the most recent line that had one
    pub previous_x: Option<f64>,
}

impl ProcessingState {
    pub fn with_previous_x(previous_x: f64) -> Self {
        Self {
            previous_x: Some(previous_x),
        }
    }
}

/// A line that received a `G0` prefix
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModificationRecord {
    pub line_number: usize,
    /// previous X minus |current X|
    pub difference: f64,
    /// Line text after the prefix was inserted (without terminator)
    pub new_line: String,
}

impl std::fmt::Display for ModificationRecord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Line {}: Added G0 prefix (diff: {:.3})",
            self.line_number, self.difference
        )
    }
}

/// Outcome of processing one file
#[derive(Debug, Clone, Serialize)]
pub struct ProcessingResult {
    pub input_path: PathBuf,
    pub output_path: PathBuf,
    /// False for dry runs, where nothing was written
    pub written: bool,
    pub line_count: usize,
    pub modification_count: usize,
    pub modifications: Vec<ModificationRecord>,
    pub final_state: ProcessingState,
    /// Transformed lines in file order
    #[serde(skip)]
    pub lines: Vec<Line>,
}

impl ProcessingResult {
    pub fn summary(&self) -> String {
        let name = self
            .output_path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.output_path.display().to_string());
        if self.written {
            format!(
                "{} modification(s) made, output saved to {}",
                self.modification_count, name
            )
        } else {
            format!(
                "{} modification(s) would be made (dry run, {} not written)",
                self.modification_count, name
            )
        }
    }
}
