use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, FrameError>;

/// Central error type for frame and pipeline operations
#[derive(Error, Debug)]
pub enum FrameError {
    #[error("file not found: {}", .0.display())]
    FileNotFound(PathBuf),

    #[error("malformed table: {0}")]
    Format(String),

    #[error("column not found: {0}")]
    ColumnNotFound(String),

    #[error("invalid spec: {0}")]
    InvalidSpec(String),

    #[error("type mismatch: {0}")]
    TypeMismatch(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}
