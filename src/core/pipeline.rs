use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use tracing::{debug, info, warn};

use super::processor::SequentialLineProcessor;
use crate::error::{NcProcessError, Result};
use crate::models::{
    default_output_suffix, default_threshold, Line, ProcessingConfig, ProcessingResult,
    ProcessingState,
};

/// Options for a pipeline run
#[derive(Debug, Clone, PartialEq)]
pub struct PipelineOptions {
    pub threshold: f64,
    pub output_suffix: String,
}

impl Default for PipelineOptions {
    fn default() -> Self {
        Self {
            threshold: default_threshold(),
            output_suffix: default_output_suffix(),
        }
    }
}

impl From<&ProcessingConfig> for PipelineOptions {
    fn from(config: &ProcessingConfig) -> Self {
        Self {
            threshold: config.threshold,
            output_suffix: config.output_suffix.clone(),
        }
    }
}

/// Reads an NC file, inserts `G0` prefixes and writes `<stem><suffix>.<ext>`
/// next to it.
///
/// Files are read and written as UTF-8. The output is written to a temporary
/// file in the target directory and renamed into place only once complete, so
/// a failed run never leaves a partial output file behind. An existing output
/// file is overwritten without asking.
pub struct FileProcessingPipeline {
    processor: SequentialLineProcessor,
    output_suffix: String,
}

impl FileProcessingPipeline {
    pub fn new(options: PipelineOptions) -> Self {
        Self {
            processor: SequentialLineProcessor::new(options.threshold),
            output_suffix: options.output_suffix,
        }
    }

    /// Process `input` and write the result
    pub fn process(&self, input: &Path) -> Result<ProcessingResult> {
        let mut result = self.transform(input)?;

        if result.output_path.exists() {
            warn!("Overwriting existing file: {}", result.output_path.display());
        }
        write_atomically(&result.output_path, &Line::join_all(&result.lines), input)?;
        result.written = true;

        info!(
            "Processed {}: {} modification(s), output saved to {}",
            input.display(),
            result.modification_count,
            result.output_path.display()
        );
        Ok(result)
    }

    /// Process `input` without writing anything
    pub fn preview(&self, input: &Path) -> Result<ProcessingResult> {
        let result = self.transform(input)?;
        info!(
            "Dry run of {}: {} modification(s)",
            input.display(),
            result.modification_count
        );
        Ok(result)
    }

    fn transform(&self, input: &Path) -> Result<ProcessingResult> {
        let output_path = output_path_for(input, &self.output_suffix)?;
        if output_path == input {
            return Err(NcProcessError::file_access(
                input,
                std::io::Error::new(
                    std::io::ErrorKind::InvalidInput,
                    "output path would overwrite the input file",
                ),
            ));
        }
        let lines = read_lines(input)?;
        debug!("Read {} lines from {}", lines.len(), input.display());

        let processed = self.processor.run(&lines, ProcessingState::default());

        Ok(ProcessingResult {
            input_path: input.to_path_buf(),
            output_path,
            written: false,
            line_count: processed.lines.len(),
            modification_count: processed.modifications.len(),
            modifications: processed.modifications,
            final_state: processed.state,
            lines: processed.lines,
        })
    }
}

/// Process `input` with the default output suffix
pub fn process_file(input: &Path, threshold: f64) -> Result<ProcessingResult> {
    FileProcessingPipeline::new(PipelineOptions {
        threshold,
        ..PipelineOptions::default()
    })
    .process(input)
}

/// Read a file as UTF-8 and split it into lines
pub fn read_lines(path: &Path) -> Result<Vec<Line>> {
    let bytes = fs::read(path).map_err(|e| NcProcessError::file_access(path, e))?;
    let content = String::from_utf8(bytes).map_err(|e| NcProcessError::FileFormat {
        path: path.to_path_buf(),
        source: e,
    })?;
    Ok(Line::split_all(&content))
}

/// `{dir}/{stem}{suffix}{.ext}` for `input`
pub fn output_path_for(input: &Path, suffix: &str) -> Result<PathBuf> {
    let stem = input.file_stem().ok_or_else(|| {
        NcProcessError::file_access(
            input,
            std::io::Error::new(std::io::ErrorKind::InvalidInput, "path has no file name"),
        )
    })?;

    let mut file_name = stem.to_os_string();
    file_name.push(suffix);
    if let Some(ext) = input.extension() {
        file_name.push(".");
        file_name.push(ext);
    }

    Ok(input.with_file_name(file_name))
}

/// Write `content` to `path` through a temporary file in the same directory.
///
/// The result keeps the permissions of the file it replaces, or takes those of
/// `permissions_from` when `path` does not exist yet.
fn write_atomically(path: &Path, content: &str, permissions_from: &Path) -> Result<()> {
    let parent_dir = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };

    let permissions = fs::metadata(path)
        .ok()
        .filter(|m| m.is_file())
        .or_else(|| fs::metadata(permissions_from).ok())
        .map(|m| m.permissions());

    let mut temp_file =
        NamedTempFile::new_in(parent_dir).map_err(|e| NcProcessError::file_access(parent_dir, e))?;
    temp_file
        .write_all(content.as_bytes())
        .and_then(|_| match permissions {
            Some(perms) => temp_file.as_file().set_permissions(perms),
            None => Ok(()),
        })
        .and_then(|_| temp_file.as_file().sync_all())
        .map_err(|e| NcProcessError::file_access(temp_file.path(), e))?;

    temp_file
        .persist(path)
        .map_err(|e| NcProcessError::file_access(path, e.error))?;

    debug!("Wrote {} bytes to {}", content.len(), path.display());
    Ok(())
}
