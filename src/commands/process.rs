use std::fs;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

use dialoguer::{theme::ColorfulTheme, Confirm};

use crate::core::{load_config, FileProcessingPipeline, PipelineOptions};
use crate::error::NcProcessError;
use crate::models::{BehaviorConfig, ProcessingResult};

/// Options for the process command
#[derive(Debug, Clone, Default)]
pub struct ProcessOptions {
    pub files: Vec<PathBuf>,
    pub config_file: Option<PathBuf>,
    pub threshold: Option<f64>,
    pub suffix: Option<String>,
    /// Skip the extension confirmation prompt
    pub yes: bool,
    pub dry_run: bool,
    /// Print results as JSON instead of the text log
    pub json: bool,
}

/// Outcome of the process command
#[derive(Debug, Default)]
pub struct ProcessSummary {
    pub results: Vec<ProcessingResult>,
    /// Files the user chose not to process
    pub skipped: Vec<PathBuf>,
}

impl ProcessSummary {
    pub fn total_modifications(&self) -> usize {
        self.results.iter().map(|r| r.modification_count).sum()
    }
}

/// Process NC files one after another, stopping at the first failure
pub fn process_files(
    project_root: &Path,
    options: ProcessOptions,
) -> Result<ProcessSummary, NcProcessError> {
    let config = load_config(
        project_root,
        options.config_file.as_deref(),
        options.threshold,
        options.suffix,
        options.yes,
    )?;
    let pipeline = FileProcessingPipeline::new(PipelineOptions::from(&config.processing));

    let mut summary = ProcessSummary::default();

    for file in &options.files {
        if !confirm_extension(file, &config.behavior)? {
            info!("Skipped {}", file.display());
            if !options.json {
                println!("Skipped: {}", file.display());
            }
            summary.skipped.push(file.clone());
            continue;
        }

        if !options.json {
            print_file_loaded(file)?;
        }

        let result = if options.dry_run {
            pipeline.preview(file)?
        } else {
            pipeline.process(file)?
        };

        if !options.json {
            print_result(&result);
        }

        summary.results.push(result);
    }

    if options.json {
        println!("{}", render_json(&summary.results)?);
    } else if summary.results.len() > 1 {
        println!(
            "\n=== {} file(s) processed, {} modification(s) total ===",
            summary.results.len(),
            summary.total_modifications()
        );
    }

    Ok(summary)
}

/// All results as a single JSON array
pub fn render_json(results: &[ProcessingResult]) -> Result<String, NcProcessError> {
    serde_json::to_string_pretty(results).map_err(|e| NcProcessError::Io(e.into()))
}

/// Whether `path` ends in `.{expected}`, ignoring case
pub fn has_expected_extension(path: &Path, expected: &str) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case(expected))
}

fn confirm_extension(path: &Path, behavior: &BehaviorConfig) -> Result<bool, NcProcessError> {
    if !behavior.confirm_extension || has_expected_extension(path, &behavior.expected_extension) {
        return Ok(true);
    }

    let name = display_name(path);
    warn!("{} does not have a .{} extension", name, behavior.expected_extension);

    Confirm::with_theme(&ColorfulTheme::default())
        .with_prompt(format!(
            "'{}' doesn't have a .{} extension. Process it anyway?",
            name, behavior.expected_extension
        ))
        .default(false)
        .interact()
        .map_err(|e| NcProcessError::Prompt(format!("Failed to get user input: {}", e)))
}

fn print_file_loaded(path: &Path) -> Result<(), NcProcessError> {
    let size = fs::metadata(path)
        .map_err(|e| NcProcessError::file_access(path, e))?
        .len();
    let size_mb = size as f64 / (1024.0 * 1024.0);
    println!("File loaded: {} ({:.2} MB)", display_name(path), size_mb);
    Ok(())
}

fn print_result(result: &ProcessingResult) {
    println!("Processing file: {}", display_name(&result.input_path));
    for record in &result.modifications {
        println!("  {}", record);
    }
    if result.written {
        println!("Output saved to: {}", result.output_path.display());
    }
    println!("{}", result.summary());
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_has_expected_extension() {
        assert!(has_expected_extension(Path::new("part.nc"), "nc"));
        assert!(has_expected_extension(Path::new("PART.NC"), "nc"));
        assert!(!has_expected_extension(Path::new("part.tap"), "nc"));
        assert!(!has_expected_extension(Path::new("nc"), "nc"));
    }

    #[test]
    fn test_confirm_skipped_when_disabled() {
        let behavior = BehaviorConfig {
            confirm_extension: false,
            ..BehaviorConfig::default()
        };
        assert!(confirm_extension(Path::new("part.txt"), &behavior).unwrap());
    }

    #[test]
    fn test_confirm_not_needed_for_expected_extension() {
        assert!(confirm_extension(Path::new("part.nc"), &BehaviorConfig::default()).unwrap());
    }

    #[test]
    fn test_process_files_stops_on_missing_file() {
        let temp_dir = TempDir::new().unwrap();
        let good = temp_dir.path().join("a.nc");
        fs::write(&good, "X1\nX-1\n").unwrap();

        let options = ProcessOptions {
            files: vec![temp_dir.path().join("missing.nc"), good.clone()],
            ..ProcessOptions::default()
        };
        let result = process_files(temp_dir.path(), options);
        assert!(matches!(result, Err(NcProcessError::FileAccess { .. })));
        assert!(!temp_dir.path().join("a_processed.nc").exists());
    }

    #[test]
    fn test_render_json_is_one_array() {
        let temp_dir = TempDir::new().unwrap();
        let a = temp_dir.path().join("a.nc");
        let b = temp_dir.path().join("b.nc");
        fs::write(&a, "X1\nX-0.5\n").unwrap();
        fs::write(&b, "X1\n").unwrap();

        let options = ProcessOptions {
            files: vec![a, b],
            json: true,
            ..ProcessOptions::default()
        };
        let summary = process_files(temp_dir.path(), options).unwrap();
        let rendered = render_json(&summary.results).unwrap();

        let parsed: serde_json::Value = serde_json::from_str(&rendered).unwrap();
        let items = parsed.as_array().unwrap();
        assert_eq!(items.len(), 2);
        assert_eq!(items[0]["modification_count"], 1);
        assert_eq!(items[1]["modification_count"], 0);
    }

    #[test]
    fn test_render_json_empty() {
        assert_eq!(render_json(&[]).unwrap(), "[]");
    }

    #[test]
    fn test_process_files_dry_run() {
        let temp_dir = TempDir::new().unwrap();
        let input = temp_dir.path().join("a.nc");
        fs::write(&input, "X1\nX-0.5\n").unwrap();

        let options = ProcessOptions {
            files: vec![input],
            dry_run: true,
            ..ProcessOptions::default()
        };
        let summary = process_files(temp_dir.path(), options).unwrap();
        assert_eq!(summary.total_modifications(), 1);
        assert!(!temp_dir.path().join("a_processed.nc").exists());
    }
}
