//! Error types for smboard-core
//!
//! One error enum covers loading, schema validation, aggregation and config.
//! Nothing here is caught internally: callers abort the render on any error.

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for smboard operations
#[derive(Error, Debug)]
pub enum CoreError {
    // ===================
    // IO Errors
    // ===================
    #[error("File not found: {path}")]
    FileNotFound { path: PathBuf },

    #[error("Failed to read file: {path}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // ===================
    // Parse Errors
    // ===================
    #[error("Malformed CSV at line {line}: {message}")]
    CsvParse {
        line: u64,
        message: String,
        #[source]
        source: csv::Error,
    },

    #[error("Missing required column: {column}")]
    MissingColumn { column: String },

    #[error("Malformed value {value:?} in column '{column}' (row {row})")]
    MalformedValue {
        row: usize,
        column: String,
        value: String,
    },

    // ===================
    // Aggregation Errors
    // ===================
    #[error("Dataset is empty: cannot compute {operation}")]
    EmptyDataset { operation: String },

    // ===================
    // Config Errors
    // ===================
    #[error("Failed to parse config {path}: {message}")]
    ConfigParse {
        path: PathBuf,
        message: String,
        #[source]
        source: toml::de::Error,
    },

    #[error("Invalid configuration: {message}")]
    InvalidConfig { message: String },
}

impl CoreError {
    pub fn empty(operation: impl Into<String>) -> Self {
        Self::EmptyDataset {
            operation: operation.into(),
        }
    }

    /// True for problems with the dataset contents rather than the filesystem
    pub fn is_data_error(&self) -> bool {
        matches!(
            self,
            CoreError::CsvParse { .. }
                | CoreError::MissingColumn { .. }
                | CoreError::MalformedValue { .. }
                | CoreError::EmptyDataset { .. }
        )
    }

    /// Short machine-readable kind, used in API error bodies
    pub fn kind(&self) -> &'static str {
        match self {
            CoreError::FileNotFound { .. } => "file_not_found",
            CoreError::FileRead { .. } => "file_read",
            CoreError::CsvParse { .. } => "csv_parse",
            CoreError::MissingColumn { .. } => "missing_column",
            CoreError::MalformedValue { .. } => "malformed_value",
            CoreError::EmptyDataset { .. } => "empty_dataset",
            CoreError::ConfigParse { .. } => "config_parse",
            CoreError::InvalidConfig { .. } => "invalid_config",
        }
    }

    /// Actionable suggestion for the user, when there is an obvious one
    pub fn suggestion(&self) -> Option<String> {
        match self {
            CoreError::FileNotFound { path } => Some(format!(
                "Check the dataset path or pass --data: ls {}",
                path.display()
            )),
            CoreError::FileRead { path, .. } => {
                Some(format!("Check permissions: chmod +r {}", path.display()))
            }
            CoreError::CsvParse { line, .. } => {
                Some(format!("Inspect the row: sed -n '{}p' <file>", line))
            }
            CoreError::MissingColumn { column } => Some(format!(
                "Add a '{}' column to the header row (names are case-sensitive)",
                column
            )),
            CoreError::MalformedValue { column, .. } => Some(format!(
                "Column '{}' must contain only numbers",
                column
            )),
            CoreError::EmptyDataset { .. } => {
                Some("The dataset has a header but no data rows".to_string())
            }
            CoreError::ConfigParse { path, .. } => Some(format!(
                "Validate TOML syntax in {}",
                path.display()
            )),
            CoreError::InvalidConfig { .. } => None,
        }
    }
}
