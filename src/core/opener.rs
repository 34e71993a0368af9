//! Opening finished files with the platform's default application
//!
//! One [`FileOpener`] is chosen at startup by [`platform_opener`] and passed
//! down to the job driver.

use async_trait::async_trait;
use std::path::Path;
use tracing::{debug, info};

use crate::core::models::{AppError, AppResult};

/// Opens a file with whatever the OS associates with it
#[async_trait]
pub trait FileOpener: Send + Sync {
    fn name(&self) -> &str;

    async fn open(&self, path: &Path) -> AppResult<()>;
}

/// Opens files through an external command such as `open` or `xdg-open`
#[derive(Debug, Clone)]
pub struct CommandOpener {
    program: String,
}

impl CommandOpener {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }

    /// macOS `open`
    pub fn macos() -> Self {
        Self::new("open")
    }

    /// freedesktop `xdg-open`
    pub fn xdg() -> Self {
        Self::new("xdg-open")
    }
}

#[async_trait]
impl FileOpener for CommandOpener {
    fn name(&self) -> &str {
        &self.program
    }

    async fn open(&self, path: &Path) -> AppResult<()> {
        debug!("{} {}", self.program, path.display());

        let output = tokio::process::Command::new(&self.program)
            .arg(path)
            .output()
            .await
            .map_err(|e| AppError::Open(format!("Failed to run {}: {}", self.program, e)))?;

        if !output.status.success() {
            let error = String::from_utf8_lossy(&output.stderr);
            return Err(AppError::Open(format!(
                "{} command failed ({}): {}",
                self.program,
                output.status,
                error.trim()
            )));
        }

        info!("Opened {}", path.display());
        Ok(())
    }
}

/// Native `ShellExecuteW` "open" verb
#[cfg(windows)]
#[derive(Debug, Clone, Copy, Default)]
pub struct ShellExecuteOpener;

#[cfg(windows)]
#[async_trait]
impl FileOpener for ShellExecuteOpener {
    fn name(&self) -> &str {
        "ShellExecuteW"
    }

    async fn open(&self, path: &Path) -> AppResult<()> {
        use std::ffi::OsStr;
        use std::os::windows::ffi::OsStrExt;
        use std::ptr;
        use winapi::um::shellapi::ShellExecuteW;
        use winapi::um::winuser::SW_SHOWNORMAL;

        fn wide(s: &OsStr) -> Vec<u16> {
            s.encode_wide().chain(std::iter::once(0)).collect()
        }

        let verb = wide(OsStr::new("open"));
        let file = wide(path.as_os_str());

        // SAFETY: both strings are NUL-terminated and outlive the call.
        let result = unsafe {
            ShellExecuteW(
                ptr::null_mut(),
                verb.as_ptr(),
                file.as_ptr(),
                ptr::null(),
                ptr::null(),
                SW_SHOWNORMAL,
            )
        };

        // Values above 32 mean success
        let code = result as isize;
        if code <= 32 {
            return Err(AppError::Open(format!(
                "ShellExecuteW failed for {} (code {})",
                path.display(),
                code
            )));
        }

        info!("Opened {}", path.display());
        Ok(())
    }
}

/// The opener for the platform this binary was built for
#[cfg(windows)]
pub fn platform_opener() -> Box<dyn FileOpener> {
    Box::new(ShellExecuteOpener)
}

/// The opener for the platform this binary was built for
#[cfg(target_os = "macos")]
pub fn platform_opener() -> Box<dyn FileOpener> {
    Box::new(CommandOpener::macos())
}

/// The opener for the platform this binary was built for
#[cfg(not(any(windows, target_os = "macos")))]
pub fn platform_opener() -> Box<dyn FileOpener> {
    Box::new(CommandOpener::xdg())
}
