use std::fs;
use std::path::Path;
use tracing::info;

use crate::error::NcProcessError;
use crate::models::{Config, CONFIG_FILE_NAME};

/// Write a default ncprocessor.toml into `project_root` unless one exists.
///
/// Returns true if the file was created.
pub fn init_config(project_root: &Path) -> Result<bool, NcProcessError> {
    if !project_root.exists() {
        fs::create_dir_all(project_root)?;
        info!("Created directory: {}", project_root.display());
    }

    let config_path = project_root.join(CONFIG_FILE_NAME);
    if config_path.exists() {
        info!("File already exists: {}", config_path.display());
        println!("{} already exists, leaving it unchanged", config_path.display());
        return Ok(false);
    }

    let contents = format!(
        "# ncprocessor configuration\n\n{}",
        Config::default().to_toml_string()?
    );
    fs::write(&config_path, contents)?;
    info!("Created file: {}", config_path.display());

    println!("Created {}", config_path.display());
    println!("\nNext steps:");
    println!("1. Adjust processing.threshold to the X drop that should trigger a G0 move");
    println!("2. Run 'ncprocessor process <file.nc>' to process a file");

    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_init_creates_loadable_config() {
        let temp_dir = TempDir::new().unwrap();
        assert!(init_config(temp_dir.path()).unwrap());

        let config = Config::load_from_dir(temp_dir.path()).unwrap();
        assert_eq!(config.processing.threshold, 0.2);
        assert_eq!(config.behavior.expected_extension, "nc");
    }

    #[test]
    fn test_init_keeps_existing_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join(CONFIG_FILE_NAME);
        fs::write(&path, "[processing]\nthreshold = 1.0\n").unwrap();

        assert!(!init_config(temp_dir.path()).unwrap());
        assert_eq!(
            fs::read_to_string(&path).unwrap(),
            "[processing]\nthreshold = 1.0\n"
        );
    }

    #[test]
    fn test_init_creates_missing_directory() {
        let temp_dir = TempDir::new().unwrap();
        let nested = temp_dir.path().join("cam").join("jobs");
        assert!(init_config(&nested).unwrap());
        assert!(nested.join(CONFIG_FILE_NAME).exists());
    }
}
