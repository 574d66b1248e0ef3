use std::path::PathBuf;
use std::string::FromUtf8Error;
use thiserror::Error;

use crate::models::ConfigError;

/// Main error type for ncprocessor
#[derive(Error, Debug)]
pub enum NcProcessError {
    #[error("Cannot access file {path}: {source}")]
    FileAccess {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("File {path} is not valid UTF-8 text: {source}")]
    FileFormat {
        path: PathBuf,
        #[source]
        source: FromUtf8Error,
    },

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Prompt failed: {0}")]
    Prompt(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl NcProcessError {
    pub fn file_access(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        NcProcessError::FileAccess {
            path: path.into(),
            source,
        }
    }

    /// Path of the file involved, if the error concerns a specific file
    pub fn path(&self) -> Option<&PathBuf> {
        match self {
            NcProcessError::FileAccess { path, .. } | NcProcessError::FileFormat { path, .. } => {
                Some(path)
            }
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, NcProcessError>;
