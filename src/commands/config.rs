//! `config` subcommands: inspect or reset the configuration file

use std::io::Write;
use std::path::{Path, PathBuf};

use crate::core::config::AppConfig;
use crate::core::models::{AppError, AppResult};

fn config_error(err: anyhow::Error) -> AppError {
    AppError::Config(format!("{:#}", err))
}

/// Config file in use: the explicit one, or the per-user default
pub fn resolve_path(explicit: Option<&Path>) -> AppResult<PathBuf> {
    match explicit {
        Some(path) => Ok(path.to_path_buf()),
        None => AppConfig::get_config_path().map_err(config_error),
    }
}

/// Print the effective configuration as JSON
pub fn show<W: Write>(config: &AppConfig, out: &mut W) -> AppResult<()> {
    let json = config.export().map_err(config_error)?;
    writeln!(out, "{}", json)?;
    Ok(())
}

/// Print where the configuration file lives
pub fn path<W: Write>(explicit: Option<&Path>, out: &mut W) -> AppResult<()> {
    writeln!(out, "{}", resolve_path(explicit)?.display())?;
    Ok(())
}

/// Overwrite the configuration file with defaults
pub fn reset<W: Write>(explicit: Option<&Path>, out: &mut W) -> AppResult<()> {
    let path = resolve_path(explicit)?;
    AppConfig::reset_at(&path).map_err(config_error)?;
    writeln!(out, "Configuration reset: {}", path.display())?;
    Ok(())
}
