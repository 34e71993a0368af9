//! Download-and-open driver
//!
//! Runs one job from start to finish: resolve the destination, hand the URL
//! to the extractor, work out where the audio file ended up, and open it.
//! Errors from the extractor and the opener are returned as-is. A missing
//! output file is reported on the console and is not an error.

use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

use crate::core::config::AppConfig;
use crate::core::extractor::{audio_extension, AudioExtractor, ExtractionOptions, ExtractionReport};
use crate::core::models::{AppResult, JobRequest, JobResult};
use crate::core::opener::FileOpener;
use crate::utils::file_utils::replace_extension;
use crate::utils::validation::{describe_source, is_http_url};

pub const SUCCESS_MESSAGE: &str = "✅ Download complete:";
pub const MISSING_FILE_HINT: &str =
    "❌ File not found. Please check if ffmpeg is installed properly.";

/// Directory the job writes into; empty input means the current directory
pub fn resolve_output_dir(destination: &str) -> AppResult<PathBuf> {
    if destination.trim().is_empty() {
        Ok(std::env::current_dir()?)
    } else {
        Ok(PathBuf::from(destination))
    }
}

/// Where the transcoded file is expected.
///
/// A post-processing path reported by the extractor wins. Otherwise the
/// prepared filename gets its extension swapped for the codec's one.
pub fn derive_final_path(report: &ExtractionReport, codec: &str) -> PathBuf {
    if let Some(ref path) = report.final_path {
        return path.clone();
    }
    let ext = audio_extension(codec).unwrap_or("mp3");
    replace_extension(&report.prepared_filename, ext)
}

async fn file_exists(path: &Path) -> bool {
    tokio::fs::try_exists(path).await.unwrap_or(false)
}

/// Run one download-and-open job, writing status lines to `out`
#[tracing::instrument(skip_all, fields(job = %request.id))]
pub async fn run_job<W: Write + Send>(
    request: &JobRequest,
    config: &AppConfig,
    extractor: &dyn AudioExtractor,
    opener: &dyn FileOpener,
    out: &mut W,
) -> AppResult<JobResult> {
    if !is_http_url(&request.url) {
        warn!("'{}' is not an http(s) URL, passing it to the extractor as-is", request.url);
    }

    let output_dir = resolve_output_dir(&request.destination)?;
    let options = ExtractionOptions::for_job(&output_dir, config);
    info!(
        "Fetching audio from {} into {}",
        describe_source(&request.url),
        output_dir.display()
    );

    let report = extractor.extract(&request.url, &options).await?;
    debug!("Extractor reported {:?}", report);

    let output_path = derive_final_path(&report, &config.audio.codec);
    let exists = file_exists(&output_path).await;
    let mut opened = false;

    if exists {
        writeln!(out, "{} {}", SUCCESS_MESSAGE, output_path.display())?;
        if config.output.open_after_download {
            opener.open(&output_path).await?;
            opened = true;
        }
    } else {
        warn!("Expected output missing: {}", output_path.display());
        writeln!(out, "{}", MISSING_FILE_HINT)?;
    }

    Ok(JobResult {
        output_path,
        exists,
        opened,
        finished_at: chrono::Utc::now(),
    })
}
