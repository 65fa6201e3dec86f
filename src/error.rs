use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SrtCleanError {
    #[error("Input file not found: {0}")]
    InputNotFound(PathBuf),

    #[error("Not an SRT file: {0}")]
    NotAnSrtFile(PathBuf),

    #[error("Invalid junk pattern '{pattern}': {source}")]
    InvalidPattern {
        pattern: String,
        source: regex::Error,
    },

    #[error("Failed to load pattern file {path}: {reason}")]
    PatternFile { path: PathBuf, reason: String },

    #[error("Failed to write output to {path}: {source}")]
    OutputWrite {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, SrtCleanError>;
