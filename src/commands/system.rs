//! External tool checks
//!
//! Reports whether yt-dlp and ffmpeg can be launched, and which versions are
//! installed.

use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

use crate::core::config::AppConfig;
use crate::core::models::{AppError, AppResult};

/// Availability of one external tool
#[derive(Debug, Clone, PartialEq)]
pub enum ToolStatus {
    Present { version: String },
    Missing,
}

impl ToolStatus {
    pub fn is_present(&self) -> bool {
        matches!(self, ToolStatus::Present { .. })
    }
}

/// Run `tool args...` and report whether it exited successfully.
///
/// A tool that cannot be found is reported as unavailable, not as an error.
pub async fn check_tool_availability(tool: &Path, args: &[&str]) -> AppResult<bool> {
    Ok(probe_tool(tool, args).await?.is_present())
}

/// Like [`check_tool_availability`] but keeps the first line of output
pub async fn probe_tool(tool: &Path, args: &[&str]) -> AppResult<ToolStatus> {
    let output = tokio::process::Command::new(tool).args(args).output().await;

    match output {
        Ok(output) if output.status.success() => {
            let stdout = String::from_utf8_lossy(&output.stdout);
            let version = stdout.lines().next().unwrap_or("").trim().to_string();
            Ok(ToolStatus::Present { version })
        }
        Ok(_) => Ok(ToolStatus::Missing),
        Err(e) => match e.kind() {
            std::io::ErrorKind::NotFound | std::io::ErrorKind::PermissionDenied => {
                Ok(ToolStatus::Missing)
            }
            _ => Err(AppError::Io(e)),
        },
    }
}

/// Program to run for ffmpeg, honouring a configured location
pub fn ffmpeg_program(config: &AppConfig) -> PathBuf {
    match config.tools.ffmpeg_location {
        Some(ref location) => {
            let path = Path::new(location);
            if path.is_dir() {
                path.join("ffmpeg")
            } else {
                path.to_path_buf()
            }
        }
        None => PathBuf::from("ffmpeg"),
    }
}

/// Check if FFmpeg is available
pub async fn check_ffmpeg(config: &AppConfig) -> bool {
    match check_tool_availability(&ffmpeg_program(config), &["-version"]).await {
        Ok(available) => {
            if available {
                info!("FFmpeg is available");
            } else {
                warn!("FFmpeg is not available");
            }
            available
        }
        Err(e) => {
            warn!("Failed to check FFmpeg: {}", e);
            false
        }
    }
}

fn print_status<W: Write>(out: &mut W, name: &str, status: &ToolStatus, hint: &str) -> AppResult<()> {
    match status {
        ToolStatus::Present { version } if version.is_empty() => {
            writeln!(out, "  {:<8} ✓ installed", name)?
        }
        ToolStatus::Present { version } => writeln!(out, "  {:<8} ✓ {}", name, version)?,
        ToolStatus::Missing => writeln!(out, "  {:<8} ✗ missing ({})", name, hint)?,
    }
    Ok(())
}

/// Print a dependency report; returns true when everything needed is present
pub async fn check_deps<W: Write>(config: &AppConfig, out: &mut W) -> AppResult<bool> {
    let yt_dlp = probe_tool(Path::new(&config.tools.yt_dlp_path), &["--version"]).await?;
    let ffmpeg = probe_tool(&ffmpeg_program(config), &["-version"]).await?;

    writeln!(out, "Dependencies:")?;
    print_status(out, "yt-dlp", &yt_dlp, "https://github.com/yt-dlp/yt-dlp#installation")?;
    print_status(out, "ffmpeg", &ffmpeg, "https://ffmpeg.org/download.html")?;

    Ok(yt_dlp.is_present() && ffmpeg.is_present())
}
