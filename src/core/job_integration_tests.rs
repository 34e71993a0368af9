//! Integration tests for the download-and-open driver
//!
//! The extractor and opener are replaced with in-memory fakes so every
//! decision the driver makes can be checked without touching the network.

#[cfg(test)]
mod tests {
    use super::super::config::AppConfig;
    use super::super::fakes::{FakeExtractor, RecordingOpener};
    use super::super::job::*;
    use super::super::models::*;
    use std::path::PathBuf;
    use tempfile::tempdir;

    fn console(buf: Vec<u8>) -> String {
        String::from_utf8(buf).unwrap()
    }

    #[tokio::test]
    async fn test_empty_destination_roots_template_at_cwd() {
        let cwd = std::env::current_dir().unwrap();
        let extractor = FakeExtractor::reporting("/nonexistent/Song.webm");
        let opener = RecordingOpener::new();
        let request = JobRequest::new("https://youtu.be/abc", "");
        let mut out = Vec::new();

        run_job(&request, &AppConfig::default(), &extractor, &opener, &mut out)
            .await
            .unwrap();

        let options = extractor.last_options().unwrap();
        assert_eq!(options.output_dir(), Some(cwd.as_path()));
        assert!(options.output_template.starts_with(&cwd));
    }

    #[tokio::test]
    async fn test_destination_roots_template() {
        let extractor = FakeExtractor::reporting("/nonexistent/Song.webm");
        let opener = RecordingOpener::new();
        let request = JobRequest::new("https://youtu.be/abc", "/tmp/x");
        let mut out = Vec::new();

        run_job(&request, &AppConfig::default(), &extractor, &opener, &mut out)
            .await
            .unwrap();

        let calls = extractor.calls.lock().unwrap();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].0, "https://youtu.be/abc");
        assert_eq!(
            calls[0].1.output_template,
            PathBuf::from("/tmp/x/%(title)s.%(ext)s")
        );
    }

    #[tokio::test]
    async fn test_existing_output_is_reported_and_opened_once() {
        let dir = tempdir().unwrap();
        let prepared = dir.path().join("Song.webm");
        let expected = dir.path().join("Song.mp3");

        let write_target = expected.clone();
        let extractor = FakeExtractor::reporting(&prepared).on_extract(move |_| {
            std::fs::write(&write_target, b"ID3").unwrap();
        });
        let opener = RecordingOpener::new();
        let request = JobRequest::new(
            "https://youtu.be/abc",
            dir.path().to_string_lossy().to_string(),
        );
        let mut out = Vec::new();

        let result = run_job(&request, &AppConfig::default(), &extractor, &opener, &mut out)
            .await
            .unwrap();

        assert!(result.exists);
        assert!(result.opened);
        assert_eq!(result.output_path, expected);
        assert_eq!(opener.paths(), vec![expected.clone()]);

        let printed = console(out);
        assert!(printed.contains(SUCCESS_MESSAGE));
        assert!(printed.contains(&expected.display().to_string()));
        assert!(!printed.contains(MISSING_FILE_HINT));
    }

    #[tokio::test]
    async fn test_missing_output_prints_hint_and_skips_open() {
        let dir = tempdir().unwrap();
        let extractor = FakeExtractor::reporting(dir.path().join("Song.webm"));
        let opener = RecordingOpener::new();
        let request = JobRequest::new(
            "https://youtu.be/abc",
            dir.path().to_string_lossy().to_string(),
        );
        let mut out = Vec::new();

        let result = run_job(&request, &AppConfig::default(), &extractor, &opener, &mut out)
            .await
            .unwrap();

        assert!(!result.exists);
        assert!(!result.opened);
        assert!(opener.paths().is_empty());
        assert_eq!(console(out).trim_end(), MISSING_FILE_HINT);
    }

    #[tokio::test]
    async fn test_extractor_error_propagates_without_open() {
        let extractor =
            FakeExtractor::failing(AppError::UnsupportedSource("Unsupported URL: x".to_string()));
        let opener = RecordingOpener::new();
        let request = JobRequest::new("x", "/tmp/x");
        let mut out = Vec::new();

        let err = run_job(&request, &AppConfig::default(), &extractor, &opener, &mut out)
            .await
            .unwrap_err();

        match err {
            AppError::UnsupportedSource(msg) => assert_eq!(msg, "Unsupported URL: x"),
            other => panic!("error was rewritten: {other:?}"),
        }
        assert_eq!(extractor.call_count(), 1);
        assert!(opener.paths().is_empty());
        assert!(out.is_empty());
    }

    #[tokio::test]
    async fn test_open_failure_propagates() {
        let dir = tempdir().unwrap();
        let expected = dir.path().join("Song.mp3");
        std::fs::write(&expected, b"ID3").unwrap();

        let extractor = FakeExtractor::reporting(dir.path().join("Song.webm"));
        let opener = RecordingOpener::failing();
        let request = JobRequest::new("https://youtu.be/abc", dir.path().to_string_lossy().to_string());
        let mut out = Vec::new();

        let err = run_job(&request, &AppConfig::default(), &extractor, &opener, &mut out)
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::Open(_)));
        assert_eq!(opener.paths(), vec![expected]);
        assert!(console(out).contains(SUCCESS_MESSAGE));
    }

    #[tokio::test]
    async fn test_open_disabled_by_config() {
        let dir = tempdir().unwrap();
        std::fs::write(dir.path().join("Song.mp3"), b"ID3").unwrap();

        let mut config = AppConfig::default();
        config.output.open_after_download = false;

        let extractor = FakeExtractor::reporting(dir.path().join("Song.webm"));
        let opener = RecordingOpener::new();
        let request = JobRequest::new("https://youtu.be/abc", dir.path().to_string_lossy().to_string());
        let mut out = Vec::new();

        let result = run_job(&request, &config, &extractor, &opener, &mut out)
            .await
            .unwrap();

        assert!(result.exists);
        assert!(!result.opened);
        assert!(opener.paths().is_empty());
    }

    #[tokio::test]
    async fn test_reported_final_path_is_trusted() {
        let dir = tempdir().unwrap();
        let actual = dir.path().join("Song (sanitized).mp3");
        std::fs::write(&actual, b"ID3").unwrap();

        let extractor = FakeExtractor::with_response(Ok(super::super::extractor::ExtractionReport {
            title: Some("Song: sanitized".to_string()),
            prepared_filename: dir.path().join("Song.webm"),
            final_path: Some(actual.clone()),
        }));
        let opener = RecordingOpener::new();
        let request = JobRequest::new("https://youtu.be/abc", dir.path().to_string_lossy().to_string());
        let mut out = Vec::new();

        let result = run_job(&request, &AppConfig::default(), &extractor, &opener, &mut out)
            .await
            .unwrap();

        assert_eq!(result.output_path, actual);
        assert_eq!(opener.paths(), vec![actual]);
    }
}
