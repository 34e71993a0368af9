//! Core data models for the audio downloader

use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A single download-and-open job, built from user input

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]

pub struct JobRequest {
    pub id: Uuid,

    pub url: String,

    // 为空时使用当前工作目录
    pub destination: String,
}

impl JobRequest {
    pub fn new(url: impl Into<String>, destination: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            url: url.into(),
            destination: destination.into(),
        }
    }
}

/// Outcome of a job once the collaborator has finished

#[derive(Debug, Clone, Serialize, Deserialize)]

pub struct JobResult {
    pub output_path: PathBuf,

    pub exists: bool,

    pub opened: bool,

    pub finished_at: chrono::DateTime<chrono::Utc>,
}

/// Application error types

#[derive(Debug, thiserror::Error)]

pub enum AppError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Unsupported source: {0}")]
    UnsupportedSource(String),

    #[error("Missing dependency: {0}")]
    MissingDependency(String),

    #[error("Disk error: {0}")]
    Disk(String),

    #[error("Extraction error: {0}")]
    Extraction(String),

    #[error("Open error: {0}")]
    Open(String),

    #[error("Parsing error: {0}")]
    Parse(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Input error: {0}")]
    Input(String),
}

impl AppError {
    /// Map error to a process exit code.
    ///
    /// Codes follow sysexits.h where a category fits.
    pub fn exit_code(&self) -> i32 {
        match self {
            AppError::Network(_) => 69,           // EX_UNAVAILABLE
            AppError::UnsupportedSource(_) => 65, // EX_DATAERR
            AppError::MissingDependency(_) => 127,
            AppError::Disk(_) => 73, // EX_CANTCREAT
            AppError::Io(_) => 74,   // EX_IOERR
            AppError::Extraction(_) => 1,
            AppError::Open(_) => 71, // EX_OSERR
            AppError::Parse(_) => 76,
            AppError::Config(_) => 78, // EX_CONFIG
            AppError::Input(_) => 66,  // EX_NOINPUT
        }
    }
}

/// Result type alias for application operations

pub type AppResult<T> = Result<T, AppError>;
