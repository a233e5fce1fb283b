//! Centralized validation helpers for command-line input.

use std::path::{Path, PathBuf};
use thiserror::Error;

/// Path meaning "read standard input"
pub const STDIN_PATH: &str = "-";

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("file does not exist: {0}")]
    FileNotFound(String),

    #[error("not a regular file: {0}")]
    NotAFile(String),

    #[error("empty path")]
    EmptyPath,
}

/// Check that a path names an existing regular file.
///
/// # Errors
///
/// Returns `ValidationError::FileNotFound` if nothing exists at the path, or
/// `ValidationError::NotAFile` if it is a directory or other non-file.
pub fn validate_existing_file(path: &Path) -> Result<PathBuf, ValidationError> {
    if path.as_os_str().is_empty() {
        return Err(ValidationError::EmptyPath);
    }
    if !path.exists() {
        return Err(ValidationError::FileNotFound(path.display().to_string()));
    }
    if !path.is_file() {
        return Err(ValidationError::NotAFile(path.display().to_string()));
    }
    Ok(path.to_path_buf())
}

/// clap value parser for a required existing file
///
/// # Errors
///
/// See [`validate_existing_file`].
pub fn parse_existing_file(s: &str) -> Result<PathBuf, ValidationError> {
    validate_existing_file(Path::new(s))
}

/// clap value parser for an existing file, or `-` for standard input
///
/// # Errors
///
/// See [`validate_existing_file`].
pub fn parse_input_path(s: &str) -> Result<PathBuf, ValidationError> {
    if s == STDIN_PATH {
        Ok(PathBuf::from(STDIN_PATH))
    } else {
        parse_existing_file(s)
    }
}

/// True if the path means standard input
#[must_use]
pub fn is_stdin(path: &Path) -> bool {
    path.as_os_str() == STDIN_PATH
}
