//! ncprocessor - G0 rapid-move insertion for NC files
//!
//! ncprocessor scans NC/G-code files line by line and prefixes `G0` onto motion
//! lines whose X coordinate drops from a non-negative value to a negative one by
//! at least a configurable threshold.
//!
//! # Architecture
//!
//! - **commands**: CLI command implementations (process, init)
//! - **core**: Core functionality (X-value tokenizer, line processor, file pipeline, config loading)
//! - **models**: Data structures (config, lines, processing results)
//! - **error**: Error types

pub mod commands;
pub mod core;
pub mod error;
pub mod models;

pub use crate::core::{extract_x_value, process_file, FileProcessingPipeline, SequentialLineProcessor};
pub use error::{NcProcessError, Result};
