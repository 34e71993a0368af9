//! audio-grab - core library
//!
//! Downloads the audio track of a single online video through yt-dlp,
//! transcodes it with ffmpeg, and opens the result with the platform's
//! default application.

pub mod cli;
pub mod commands;
pub mod core;
pub mod utils;

// Re-export commonly used types
pub use core::{
    config::AppConfig,
    extractor::{AudioExtractor, ExtractionOptions, ExtractionReport, YtDlpExtractor},
    job::run_job,
    models::{AppError, AppResult, JobRequest, JobResult},
    opener::{platform_opener, FileOpener},
};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");
