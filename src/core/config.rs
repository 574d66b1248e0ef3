use std::path::Path;
use tracing::info;

use crate::error::NcProcessError;
use crate::models::Config;

/// Load configuration with CLI overrides.
///
/// An explicit `config_file` must exist; otherwise `ncprocessor.toml` in
/// `project_root` is used if present, falling back to defaults.
pub fn load_config(
    project_root: &Path,
    config_file: Option<&Path>,
    threshold: Option<f64>,
    suffix: Option<String>,
    assume_yes: bool,
) -> Result<Config, NcProcessError> {
    let config = match config_file {
        Some(path) => Config::load_from_file(path)?,
        None => Config::load_from_dir(project_root)?,
    };
    let config = config.with_overrides(threshold, suffix, assume_yes)?;

    info!(
        "Configuration loaded: threshold={}, suffix={}",
        config.processing.threshold, config.processing.output_suffix
    );

    Ok(config)
}
