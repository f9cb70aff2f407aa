//! Error types for mdpress
//!
//! This module defines all custom error types used throughout the converter.
//! Error types are organized by pipeline stage so callers can decide which
//! failures are fatal and which degrade to unhighlighted output.

use std::path::PathBuf;
use thiserror::Error;

/// Main application error type encompassing all error categories
#[derive(Error, Debug)]
pub enum AppError {
    /// File I/O related errors
    #[error(transparent)]
    FileIO(#[from] FileError),

    /// Configuration errors
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Highlighter construction errors
    #[error(transparent)]
    Highlight(#[from] HighlightError),

    /// PDF rendering errors
    #[error(transparent)]
    Render(#[from] RenderError),
}

/// File I/O related errors
#[derive(Error, Debug)]
pub enum FileError {
    /// File not found at specified path
    #[error("File not found: {0}")]
    NotFound(PathBuf),

    /// Path exists but is not a regular file
    #[error("Path is not a file: {path}")]
    NotAFile { path: PathBuf },

    /// File is too large to convert
    #[error("File too large: {path} ({size} bytes, max {max_size} bytes)")]
    FileTooLarge {
        path: PathBuf,
        size: u64,
        max_size: u64,
    },

    /// Error reading file
    #[error("Could not read file: {path}")]
    ReadError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Error writing file
    #[error("Could not write file: {path}")]
    WriteError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Output directory could not be created
    #[error("Directory error: {path}")]
    DirectoryError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Configuration related errors
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Error reading the configuration file
    #[error("Could not load configuration from {path}")]
    LoadError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Error parsing configuration
    #[error("Invalid configuration format: {0}")]
    ParseError(#[from] serde_json::Error),

    /// Invalid configuration value
    #[error("Invalid value for {key}: {reason}")]
    InvalidValue { key: String, reason: String },

    /// Unknown preset or engine name given on the command line
    #[error("Unknown {kind}: {value}")]
    UnknownName { kind: &'static str, value: String },

    /// Configuration directory error
    #[error("Could not access configuration directory")]
    DirectoryError,
}

/// Highlighter errors.
///
/// None of these abort a document: the code-block extractor logs them and
/// falls back to unhighlighted output for the affected fragment.
#[derive(Error, Debug)]
pub enum HighlightError {
    /// A lexicon pattern failed to compile
    #[error("Invalid highlight pattern: {0}")]
    Pattern(#[from] regex::Error),

    /// Fragment exceeds the configured size cap
    #[error("Code fragment too large to highlight ({size} bytes, max {max} bytes)")]
    FragmentTooLarge { size: usize, max: usize },

    /// Every private-use sentinel character already occurs in the fragment
    #[error("No free placeholder sentinel available for fragment")]
    NoSentinel,
}

/// PDF rendering errors
#[derive(Error, Debug)]
pub enum RenderError {
    /// The external engine binary is not installed or not on PATH
    #[error("PDF engine `{engine}` not found. Install it or pick another with --engine")]
    EngineNotFound { engine: &'static str },

    /// The engine ran but reported failure
    #[error("PDF engine `{engine}` failed ({status}): {stderr}")]
    EngineFailed {
        engine: &'static str,
        status: std::process::ExitStatus,
        stderr: String,
    },

    /// The engine succeeded but produced no bytes
    #[error("PDF engine `{engine}` produced empty output")]
    EmptyOutput { engine: &'static str },

    /// I/O error while talking to the engine
    #[error("I/O error while running PDF engine: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for operations that can fail with AppError
pub type AppResult<T> = Result<T, AppError>;

/// Result type alias for file operations
pub type FileResult<T> = Result<T, FileError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Result type alias for highlighting
pub type HighlightResult<T> = Result<T, HighlightError>;

/// Result type alias for PDF rendering
pub type RenderResult<T> = Result<T, RenderError>;

impl FileError {
    /// Create a user-friendly error message suitable for the terminal
    pub fn user_message(&self) -> String {
        match self {
            FileError::NotFound(_) => {
                "The input file could not be found. Check the path and try again.".to_string()
            }
            FileError::NotAFile { .. } => "The input path is a directory, not a file.".to_string(),
            FileError::FileTooLarge { max_size, .. } => {
                format!(
                    "This file is too large to convert. Maximum file size is {} bytes.",
                    max_size
                )
            }
            FileError::WriteError { .. } => {
                "Could not write the output file. Check disk space and permissions.".to_string()
            }
            _ => self.to_string(),
        }
    }
}
