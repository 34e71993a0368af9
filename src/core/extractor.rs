//! Audio extraction through yt-dlp
//!
//! yt-dlp resolves the source URL, picks the best audio stream, downloads it
//! and hands the file to ffmpeg for transcoding. This module builds the
//! options for that single call, runs the binary, and turns whatever it
//! reports (or complains about) into typed results.

use async_trait::async_trait;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::sync::OnceLock;
use tracing::{debug, info, warn};

use crate::core::config::{AppConfig, ToolsConfig};
use crate::core::models::{AppError, AppResult};

/// Post-processor key understood by yt-dlp for audio extraction
pub const EXTRACT_AUDIO_KEY: &str = "FFmpegExtractAudio";

/// Prefix on the stdout line carrying the post-move path
pub const FINAL_PATH_MARKER: &str = "AUDIO_GRAB_PATH:";

/// Audio codecs yt-dlp can extract to, with the extension of the file it writes
const AUDIO_CODECS: &[(&str, &str)] = &[
    ("mp3", "mp3"),
    ("aac", "m4a"),
    ("m4a", "m4a"),
    ("alac", "m4a"),
    ("opus", "opus"),
    ("vorbis", "ogg"),
    ("flac", "flac"),
    ("wav", "wav"),
];

/// File extension produced for an audio codec, if the codec is known
pub fn audio_extension(codec: &str) -> Option<&'static str> {
    let codec = codec.trim().to_ascii_lowercase();
    AUDIO_CODECS
        .iter()
        .find(|(name, _)| *name == codec)
        .map(|(_, ext)| *ext)
}

/// Post-download transcoding directive
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AudioPostProcessor {
    pub key: String,
    pub preferred_codec: String,
    pub preferred_quality: String,
}

/// Options for one collaborator call
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ExtractionOptions {
    pub quiet: bool,
    pub no_playlist: bool,
    pub format: String,
    pub keep_video: bool,
    /// Absolute or relative output template, e.g. `/music/%(title)s.%(ext)s`
    pub output_template: PathBuf,
    pub post_processor: AudioPostProcessor,
    pub ffmpeg_location: Option<String>,
}

impl ExtractionOptions {
    /// Options for a job writing into `output_dir`
    pub fn for_job(output_dir: &Path, config: &AppConfig) -> Self {
        Self {
            quiet: true,
            no_playlist: true,
            format: config.audio.format.clone(),
            keep_video: config.audio.keep_video,
            output_template: output_dir.join(&config.output.filename_template),
            post_processor: AudioPostProcessor {
                key: EXTRACT_AUDIO_KEY.to_string(),
                preferred_codec: config.audio.codec.clone(),
                preferred_quality: config.audio.quality.clone(),
            },
            ffmpeg_location: config.tools.ffmpeg_location.clone(),
        }
    }

    /// Directory the output template is rooted at
    pub fn output_dir(&self) -> Option<&Path> {
        self.output_template.parent()
    }

    /// Render as yt-dlp command line arguments (without the URL)
    pub fn to_args(&self) -> Vec<String> {
        let mut args = Vec::new();

        if self.quiet {
            args.push("--quiet".to_string());
            args.push("--no-warnings".to_string());
        }
        if self.no_playlist {
            args.push("--no-playlist".to_string());
        }

        args.push("--format".to_string());
        args.push(self.format.clone());

        if self.keep_video {
            args.push("--keep-video".to_string());
        }

        args.push("--output".to_string());
        args.push(self.output_template.to_string_lossy().into_owned());

        if self.post_processor.key == EXTRACT_AUDIO_KEY {
            args.push("--extract-audio".to_string());
            args.push("--audio-format".to_string());
            args.push(self.post_processor.preferred_codec.clone());
            args.push("--audio-quality".to_string());
            args.push(format!("{}K", self.post_processor.preferred_quality));
        }

        if let Some(ref location) = self.ffmpeg_location {
            args.push("--ffmpeg-location".to_string());
            args.push(location.clone());
        }

        args
    }
}

/// What the collaborator reported after a completed call
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ExtractionReport {
    pub title: Option<String>,
    /// Name used for the pre-transcode download
    pub prepared_filename: PathBuf,
    /// Path after post-processing, when the collaborator reported it
    pub final_path: Option<PathBuf>,
}

/// The download/transcode collaborator
#[async_trait]
pub trait AudioExtractor: Send + Sync {
    /// Extract metadata, download, and transcode in one blocking call
    async fn extract(&self, url: &str, options: &ExtractionOptions) -> AppResult<ExtractionReport>;
}

/// Subset of the yt-dlp info JSON we read
#[derive(Debug, Deserialize)]
struct InfoJson {
    title: Option<String>,
    filename: Option<String>,
    #[serde(rename = "_filename")]
    internal_filename: Option<String>,
}

/// yt-dlp binary wrapper
#[derive(Debug, Clone)]
pub struct YtDlpExtractor {
    program: PathBuf,
}

impl YtDlpExtractor {
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
        }
    }

    pub fn from_config(tools: &ToolsConfig) -> Self {
        Self::new(&tools.yt_dlp_path)
    }

    pub fn program(&self) -> &Path {
        &self.program
    }

    /// Flags asking yt-dlp to report the prepared filename and final path
    fn report_args() -> [&'static str; 4] {
        [
            "--dump-json",
            "--no-simulate",
            "--print",
            "after_move:AUDIO_GRAB_PATH:%(filepath)s",
        ]
    }
}

#[async_trait]
impl AudioExtractor for YtDlpExtractor {
    async fn extract(&self, url: &str, options: &ExtractionOptions) -> AppResult<ExtractionReport> {
        let args = options.to_args();
        debug!("Running {} {:?} -- {}", self.program.display(), args, url);

        let output = tokio::process::Command::new(&self.program)
            .args(&args)
            .args(Self::report_args())
            .arg("--")
            .arg(url)
            .output()
            .await
            .map_err(|e| match e.kind() {
                std::io::ErrorKind::NotFound => AppError::MissingDependency(format!(
                    "yt-dlp not found at '{}'",
                    self.program.display()
                )),
                _ => AppError::Extraction(format!("Failed to execute yt-dlp: {}", e)),
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            warn!("yt-dlp exited with {}", output.status);
            return Err(classify_failure(&stderr, output.status.code()));
        }

        let stdout = String::from_utf8_lossy(&output.stdout);
        let report = parse_report(&stdout)?;
        info!(
            "yt-dlp finished: {}",
            report.title.as_deref().unwrap_or("<untitled>")
        );
        Ok(report)
    }
}

/// Parse the stdout of a successful yt-dlp run.
///
/// Info JSON lines carry the title and prepared filename. The post-move path
/// comes on a line prefixed with [`FINAL_PATH_MARKER`]. Anything else is
/// ignored.
pub fn parse_report(stdout: &str) -> AppResult<ExtractionReport> {
    let mut title = None;
    let mut prepared = None;
    let mut final_path = None;

    for line in stdout.lines().map(str::trim).filter(|l| !l.is_empty()) {
        if let Some(path) = line.strip_prefix(FINAL_PATH_MARKER) {
            final_path = Some(PathBuf::from(path));
        } else if line.starts_with('{') {
            let info: InfoJson = serde_json::from_str(line)
                .map_err(|e| AppError::Parse(format!("Failed to parse yt-dlp JSON: {}", e)))?;
            title = info.title.or(title);
            prepared = info.filename.or(info.internal_filename).or(prepared);
        } else {
            debug!("Ignoring yt-dlp output line: {}", line);
        }
    }

    let prepared_filename = match (prepared, &final_path) {
        (Some(name), _) => PathBuf::from(name),
        (None, Some(path)) => path.clone(),
        (None, None) => {
            return Err(AppError::Parse(
                "yt-dlp did not report an output filename".to_string(),
            ))
        }
    };

    Ok(ExtractionReport {
        title,
        prepared_filename,
        final_path,
    })
}

fn error_line_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(?m)^ERROR:\s*(?:\[[^\]]+\]\s*)?(.+)$").expect("valid error line regex")
    })
}

fn contains_any(haystack: &str, needles: &[&str]) -> bool {
    needles.iter().any(|n| haystack.contains(n))
}

/// Map yt-dlp stderr to an error kind
pub fn classify_failure(stderr: &str, exit_code: Option<i32>) -> AppError {
    let messages: Vec<&str> = error_line_regex()
        .captures_iter(stderr)
        .filter_map(|c| c.get(1).map(|m| m.as_str().trim()))
        .collect();

    let message = if messages.is_empty() {
        match stderr.lines().rev().map(str::trim).find(|l| !l.is_empty()) {
            Some(last) => last.to_string(),
            None => format!("yt-dlp exited with code {:?}", exit_code),
        }
    } else {
        messages.join("; ")
    };

    let lower = message.to_lowercase();

    if contains_any(&lower, &["unsupported url", "is not a valid url", "no video formats found"]) {
        AppError::UnsupportedSource(message)
    } else if lower.contains("ffmpeg") && contains_any(&lower, &["not found", "not installed"]) {
        AppError::MissingDependency(message)
    } else if contains_any(&lower, &[
        "no space left",
        "permission denied",
        "unable to open for writing",
        "unable to create directory",
        "read-only file system",
    ]) {
        AppError::Disk(message)
    } else if contains_any(&lower, &[
        "unable to download",
        "http error",
        "urlopen error",
        "timed out",
        "connection",
        "name or service not known",
        "temporary failure in name resolution",
        "network is unreachable",
    ]) {
        AppError::Network(message)
    } else {
        AppError::Extraction(message)
    }
}
