//! Application configuration management

use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use super::extractor::audio_extension;

/// Main application configuration structure
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AppConfig {
    pub audio: AudioConfig,
    pub tools: ToolsConfig,
    pub output: OutputConfig,
}

/// Audio extraction settings handed to the collaborator
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AudioConfig {
    pub codec: String,   // "mp3", "m4a", "opus", etc.
    pub quality: String, // kbps, e.g. "192"
    pub format: String,  // yt-dlp format selector
    pub keep_video: bool,
}

/// External tool locations
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ToolsConfig {
    pub yt_dlp_path: String,
    pub ffmpeg_location: Option<String>,
}

/// Output naming and post-download behaviour
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OutputConfig {
    pub default_directory: Option<String>,
    pub filename_template: String,
    pub open_after_download: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            audio: AudioConfig::default(),
            tools: ToolsConfig::default(),
            output: OutputConfig::default(),
        }
    }
}

impl Default for AudioConfig {
    fn default() -> Self {
        Self {
            codec: "mp3".to_string(),
            quality: "192".to_string(),
            format: "bestaudio/best".to_string(),
            keep_video: false,
        }
    }
}

impl Default for ToolsConfig {
    fn default() -> Self {
        Self {
            yt_dlp_path: "yt-dlp".to_string(),
            ffmpeg_location: None,
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            default_directory: None,
            filename_template: "%(title)s.%(ext)s".to_string(),
            open_after_download: true,
        }
    }
}

impl AppConfig {
    /// Load configuration from the default location, creating it if missing
    pub fn load() -> Result<Self> {
        let config_path = Self::get_config_path()?;
        Self::load_from(&config_path)
    }

    /// Load configuration from a specific file, creating default if not exists
    pub fn load_from(config_path: &Path) -> Result<Self> {
        if config_path.exists() {
            let content = std::fs::read_to_string(config_path)
                .with_context(|| format!("Failed to read config file: {:?}", config_path))?;

            let config: AppConfig =
                serde_json::from_str(&content).with_context(|| "Failed to parse config file")?;

            tracing::info!("Loaded configuration from: {:?}", config_path);
            Ok(config)
        } else {
            let config = Self::default();
            config.save_to(config_path)?;
            tracing::info!("Created default configuration at: {:?}", config_path);
            Ok(config)
        }
    }

    /// Load and validate, falling back to defaults on any problem
    pub fn load_or_default(config_path: Option<&Path>) -> Self {
        let loaded = match config_path {
            Some(path) => Self::load_from(path),
            None => Self::load(),
        };

        match loaded {
            Ok(cfg) => match cfg.validate() {
                Ok(()) => cfg,
                Err(err) => {
                    tracing::warn!(
                        "Invalid configuration detected ({}), falling back to defaults",
                        err
                    );
                    Self::default()
                }
            },
            Err(err) => {
                tracing::warn!(
                    "Failed to load configuration from disk: {:#}. Using defaults",
                    err
                );
                Self::default()
            }
        }
    }

    /// Save configuration to the default location
    pub fn save(&self) -> Result<()> {
        let config_path = Self::get_config_path()?;
        self.save_to(&config_path)
    }

    /// Save configuration to a specific file
    pub fn save_to(&self, config_path: &Path) -> Result<()> {
        // Ensure parent directory exists
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create config directory: {:?}", parent))?;
        }

        let content =
            serde_json::to_string_pretty(self).with_context(|| "Failed to serialize config")?;

        std::fs::write(config_path, content)
            .with_context(|| format!("Failed to write config file: {:?}", config_path))?;

        tracing::info!("Saved configuration to: {:?}", config_path);
        Ok(())
    }

    /// Get the path to the configuration file
    pub fn get_config_path() -> Result<PathBuf> {
        let project_dirs = ProjectDirs::from("com", "videodownloader", "audio-grab")
            .with_context(|| "Failed to get project directories")?;

        let config_dir = project_dirs.config_dir();
        Ok(config_dir.join("config.json"))
    }

    /// Reset configuration to defaults
    pub fn reset_at(config_path: &Path) -> Result<Self> {
        let config = Self::default();
        config.save_to(config_path)?;
        tracing::info!("Reset configuration to defaults");
        Ok(config)
    }

    /// Export configuration as JSON string
    pub fn export(&self) -> Result<String> {
        serde_json::to_string_pretty(self).with_context(|| "Failed to export configuration")
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<()> {
        if self.audio.codec.trim().is_empty() {
            anyhow::bail!("Audio codec must not be empty");
        }

        if audio_extension(&self.audio.codec).is_none() {
            anyhow::bail!("Unsupported audio codec '{}'", self.audio.codec);
        }

        match self.audio.quality.trim().parse::<u32>() {
            Ok(q) if q > 0 => {}
            _ => anyhow::bail!(
                "Audio quality must be a positive bitrate in kbps, got '{}'",
                self.audio.quality
            ),
        }

        if self.audio.format.trim().is_empty() {
            anyhow::bail!("Format selector must not be empty");
        }

        if self.tools.yt_dlp_path.trim().is_empty() {
            anyhow::bail!("yt-dlp path must not be empty");
        }

        if !self.output.filename_template.contains("%(ext)s") {
            anyhow::bail!("Filename template must contain %(ext)s");
        }

        let template = Path::new(&self.output.filename_template);
        if template.is_absolute() || template.has_root() {
            anyhow::bail!(
                "Filename template must be relative to the destination, got '{}'",
                self.output.filename_template
            );
        }

        Ok(())
    }
}
