//! The default command: download one video's audio and open it

use std::io::{self, BufRead, Write};
use tracing::{info, warn};

use crate::commands::system::check_ffmpeg;
use crate::core::config::AppConfig;
use crate::core::extractor::YtDlpExtractor;
use crate::core::job::run_job;
use crate::core::models::{AppError, AppResult, JobRequest, JobResult};
use crate::core::opener::platform_opener;
use crate::utils::input::prompt_from;

pub const URL_PROMPT: &str = "Please enter the video URL";
pub const FOLDER_PROMPT: &str =
    "Enter the folder path to save the file (leave empty for current folder)";

/// Inputs for one grab, as given on the command line
#[derive(Debug, Clone, Default)]
pub struct GrabArgs {
    pub url: Option<String>,
    pub dest: Option<String>,
    pub no_open: bool,
}

/// Build the job request, prompting for whatever was not passed in.
///
/// With no URL argument both prompts are shown (URL, then folder). With a
/// URL argument nothing is asked and a missing folder falls back to the
/// configured default or the current directory.
pub fn collect_request<R: BufRead, W: Write>(
    args: &GrabArgs,
    config: &AppConfig,
    reader: &mut R,
    writer: &mut W,
) -> AppResult<JobRequest> {
    let prompt = |reader: &mut R, writer: &mut W, text: &str| {
        prompt_from(reader, writer, text).map_err(|e| AppError::Input(format!("{:#}", e)))
    };

    let (url, dest) = match args.url {
        Some(ref url) => (url.clone(), args.dest.clone().unwrap_or_default()),
        None => {
            let url = prompt(reader, writer, URL_PROMPT)?;
            let dest = match args.dest {
                Some(ref dest) => dest.clone(),
                None => prompt(reader, writer, FOLDER_PROMPT)?,
            };
            (url, dest)
        }
    };

    let dest = if dest.trim().is_empty() {
        config.output.default_directory.clone().unwrap_or_default()
    } else {
        dest
    };

    Ok(JobRequest::new(url, dest))
}

/// Run the grab against the real yt-dlp binary and platform opener
pub async fn execute(args: GrabArgs, config: &AppConfig) -> AppResult<JobResult> {
    let request = {
        let stdin = io::stdin();
        let mut stdout = io::stdout();
        collect_request(&args, config, &mut stdin.lock(), &mut stdout)?
    };
    info!("Job {} for {}", request.id, request.url);

    if !check_ffmpeg(config).await {
        warn!("ffmpeg was not found; transcoding to {} will likely fail", config.audio.codec);
    }

    let mut config = config.clone();
    if args.no_open {
        config.output.open_after_download = false;
    }

    let extractor = YtDlpExtractor::from_config(&config.tools);
    let opener = platform_opener();
    info!("Using {} to open files", opener.name());

    let mut stdout = io::stdout();
    run_job(&request, &config, &extractor, opener.as_ref(), &mut stdout).await
}
