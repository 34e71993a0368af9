//! In-memory stand-ins for the extractor and opener, used by tests

use async_trait::async_trait;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use super::extractor::{AudioExtractor, ExtractionOptions, ExtractionReport};
use super::models::{AppError, AppResult};
use super::opener::FileOpener;

/// Extractor returning a canned result and recording what it was asked
pub struct FakeExtractor {
    response: Mutex<Option<AppResult<ExtractionReport>>>,
    /// Side effect run before returning, e.g. writing the output file
    on_extract: Option<Box<dyn Fn(&ExtractionOptions) + Send + Sync>>,
    pub calls: Mutex<Vec<(String, ExtractionOptions)>>,
}

impl FakeExtractor {
    pub fn reporting(prepared_filename: impl Into<PathBuf>) -> Self {
        Self::with_response(Ok(ExtractionReport {
            title: Some("Song".to_string()),
            prepared_filename: prepared_filename.into(),
            final_path: None,
        }))
    }

    pub fn failing(error: AppError) -> Self {
        Self::with_response(Err(error))
    }

    pub fn with_response(response: AppResult<ExtractionReport>) -> Self {
        Self {
            response: Mutex::new(Some(response)),
            on_extract: None,
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn on_extract(mut self, f: impl Fn(&ExtractionOptions) + Send + Sync + 'static) -> Self {
        self.on_extract = Some(Box::new(f));
        self
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    pub fn last_options(&self) -> Option<ExtractionOptions> {
        self.calls.lock().unwrap().last().map(|(_, o)| o.clone())
    }
}

#[async_trait]
impl AudioExtractor for FakeExtractor {
    async fn extract(&self, url: &str, options: &ExtractionOptions) -> AppResult<ExtractionReport> {
        self.calls
            .lock()
            .unwrap()
            .push((url.to_string(), options.clone()));
        if let Some(ref f) = self.on_extract {
            f(options);
        }
        self.response
            .lock()
            .unwrap()
            .take()
            .unwrap_or_else(|| Err(AppError::Extraction("fake called twice".to_string())))
    }
}

/// Opener that records every path instead of launching anything
#[derive(Default)]
pub struct RecordingOpener {
    pub opened: Mutex<Vec<PathBuf>>,
    pub fail: bool,
}

impl RecordingOpener {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    pub fn paths(&self) -> Vec<PathBuf> {
        self.opened.lock().unwrap().clone()
    }
}

#[async_trait]
impl FileOpener for RecordingOpener {
    fn name(&self) -> &str {
        "recording"
    }

    async fn open(&self, path: &Path) -> AppResult<()> {
        self.opened.lock().unwrap().push(path.to_path_buf());
        if self.fail {
            return Err(AppError::Open("no handler registered".to_string()));
        }
        Ok(())
    }
}
