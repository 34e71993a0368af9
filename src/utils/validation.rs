//! URL inspection helpers
//!
//! Source URLs are handed to the collaborator untouched; nothing here rejects
//! input. These helpers only describe a URL for log output.

use url::Url;

/// Short description of where a URL points, for logging
pub fn describe_source(url: &str) -> String {
    match Url::parse(url) {
        Ok(parsed) => match parsed.host_str() {
            Some(host) => host.trim_start_matches("www.").to_string(),
            None => parsed.scheme().to_string(),
        },
        Err(_) => "unparsed".to_string(),
    }
}

/// Check if URL uses a scheme the collaborator normally handles
pub fn is_http_url(url: &str) -> bool {
    Url::parse(url)
        .map(|parsed| matches!(parsed.scheme(), "http" | "https"))
        .unwrap_or(false)
}
