//! Command-line parser.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::commands::grab::GrabArgs;

/// Download the audio track of a video as MP3 and open it.
///
/// Run without a URL to be prompted for the URL and destination folder.
#[derive(Debug, Parser)]
#[command(name = "audio-grab")]
#[command(version, about)]
#[command(args_conflicts_with_subcommands = true)]
pub struct Cli {
    /// Video URL; prompted for when omitted
    pub url: Option<String>,

    /// Folder to save into (defaults to the current folder)
    #[arg(short = 'd', long = "dest")]
    pub dest: Option<String>,

    /// Do not open the file after downloading
    #[arg(long = "no-open")]
    pub no_open: bool,

    /// Use this configuration file instead of the per-user one
    #[arg(long = "config", env = "AUDIO_GRAB_CONFIG", global = true)]
    pub config: Option<PathBuf>,

    /// Enable verbose/debug logging
    #[arg(short = 'v', long = "verbose", global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Check that yt-dlp and ffmpeg are installed
    CheckDeps,
    /// Inspect or reset the configuration
    Config {
        #[command(subcommand)]
        command: ConfigCommand,
    },
}

#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Print the effective configuration
    Show,
    /// Print the configuration file location
    Path,
    /// Restore the default configuration
    Reset,
}

impl Cli {
    pub fn grab_args(&self) -> GrabArgs {
        GrabArgs {
            url: self.url.clone(),
            dest: self.dest.clone(),
            no_open: self.no_open,
        }
    }
}
