use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Name of the configuration file looked up in the working directory
pub const CONFIG_FILE_NAME: &str = "ncprocessor.toml";

/// Configuration loaded from ncprocessor.toml
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub processing: ProcessingConfig,
    #[serde(default)]
    pub behavior: BehaviorConfig,
}

/// Transformation parameters
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProcessingConfig {
    /// Minimum X drop (previous positive X minus |current negative X|) that triggers G0.
    /// Compared exactly, so float rounding decides drops that nominally equal it.
    #[serde(default = "default_threshold")]
    pub threshold: f64,
    /// Suffix inserted before the extension of the output file
    #[serde(default = "default_output_suffix")]
    pub output_suffix: String,
}

impl Default for ProcessingConfig {
    fn default() -> Self {
        Self {
            threshold: default_threshold(),
            output_suffix: default_output_suffix(),
        }
    }
}

pub fn default_threshold() -> f64 {
    0.2
}

pub fn default_output_suffix() -> String {
    "_processed".to_string()
}

/// Behavior configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BehaviorConfig {
    /// Ask before processing files without the expected extension
    #[serde(default = "default_confirm_extension")]
    pub confirm_extension: bool,
    /// Extension (without dot) that is processed without asking
    #[serde(default = "default_expected_extension")]
    pub expected_extension: String,
}

impl Default for BehaviorConfig {
    fn default() -> Self {
        Self {
            confirm_extension: default_confirm_extension(),
            expected_extension: default_expected_extension(),
        }
    }
}

fn default_confirm_extension() -> bool {
    true
}

fn default_expected_extension() -> String {
    "nc".to_string()
}

impl Config {
    /// Load config from a TOML file
    pub fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::ReadError(path.to_path_buf(), e))?;
        let config: Config = toml::from_str(&contents)
            .map_err(|e| ConfigError::ParseError(path.to_path_buf(), e))?;
        config.validate()?;
        Ok(config)
    }

    /// Try to load config from ncprocessor.toml in the given directory
    pub fn load_from_dir(dir: &Path) -> Result<Self, ConfigError> {
        let config_path = dir.join(CONFIG_FILE_NAME);
        if config_path.exists() {
            Self::load_from_file(&config_path)
        } else {
            Ok(Self::default())
        }
    }

    /// Merge CLI overrides into the config
    pub fn with_overrides(
        mut self,
        threshold: Option<f64>,
        suffix: Option<String>,
        assume_yes: bool,
    ) -> Result<Self, ConfigError> {
        if let Some(t) = threshold {
            self.processing.threshold = t;
        }
        if let Some(s) = suffix {
            self.processing.output_suffix = s;
        }
        if assume_yes {
            self.behavior.confirm_extension = false;
        }
        self.validate()?;
        Ok(self)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let threshold = self.processing.threshold;
        if !threshold.is_finite() || threshold < 0.0 {
            return Err(ConfigError::InvalidValue {
                field: "processing.threshold",
                reason: format!("must be a finite, non-negative number (got {})", threshold),
            });
        }

        let suffix = &self.processing.output_suffix;
        if suffix.is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "processing.output_suffix",
                reason: "must not be empty".to_string(),
            });
        }
        if suffix.contains(|c: char| c == '/' || c == '\\') {
            return Err(ConfigError::InvalidValue {
                field: "processing.output_suffix",
                reason: format!("must not contain path separators (got {:?})", suffix),
            });
        }

        Ok(())
    }

    /// Render the config as TOML for `ncprocessor init`
    pub fn to_toml_string(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(ConfigError::SerializeError)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file {0}: {1}")]
    ReadError(PathBuf, std::io::Error),
    #[error("Failed to parse config file {0}: {1}")]
    ParseError(PathBuf, toml::de::Error),
    #[error("Failed to serialize config: {0}")]
    SerializeError(toml::ser::Error),
    #[error("Invalid value for {field}: {reason}")]
    InvalidValue { field: &'static str, reason: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.processing.threshold, 0.2);
        assert_eq!(config.processing.output_suffix, "_processed");
        assert!(config.behavior.confirm_extension);
        assert_eq!(config.behavior.expected_extension, "nc");
    }

    #[test]
    fn test_config_with_overrides() {
        let config = Config::default()
            .with_overrides(Some(0.5), Some("_g0".to_string()), true)
            .unwrap();
        assert_eq!(config.processing.threshold, 0.5);
        assert_eq!(config.processing.output_suffix, "_g0");
        assert!(!config.behavior.confirm_extension);
    }

    #[test]
    fn test_parse_toml() {
        let toml_str = r#"
[processing]
threshold = 0.35

[behavior]
expected_extension = "ngc"
"#;
        let config: Config = toml::from_str(toml_str).unwrap();
        assert_eq!(config.processing.threshold, 0.35);
        assert_eq!(config.processing.output_suffix, "_processed"); // default
        assert_eq!(config.behavior.expected_extension, "ngc");
        assert!(config.behavior.confirm_extension); // default
    }

    #[test]
    fn test_rejects_negative_threshold() {
        let result = Config::default().with_overrides(Some(-0.1), None, false);
        assert!(matches!(
            result,
            Err(ConfigError::InvalidValue { field: "processing.threshold", .. })
        ));
    }

    #[test]
    fn test_rejects_nan_threshold() {
        let result = Config::default().with_overrides(Some(f64::NAN), None, false);
        assert!(result.is_err());
    }

    #[test]
    fn test_rejects_bad_suffix() {
        assert!(Config::default()
            .with_overrides(None, Some(String::new()), false)
            .is_err());
        assert!(Config::default()
            .with_overrides(None, Some("../out".to_string()), false)
            .is_err());
    }

    #[test]
    fn test_toml_round_trip_of_defaults() {
        let rendered = Config::default().to_toml_string().unwrap();
        assert!(rendered.contains("threshold = 0.2"));
        assert!(rendered.contains("output_suffix = \"_processed\""));
        let parsed: Config = toml::from_str(&rendered).unwrap();
        assert_eq!(parsed.processing.threshold, 0.2);
    }
}
