//! HTTP download of spreadsheet CSV exports.
//!
//! ### Request
//! - Browser-like User-Agent, CSV-first `Accept`
//! - Max redirects: 5 (configurable)
//! - Timeout: 15s (configurable)
//!
//! ### Payload sanity checks
//! - HTML (redirect or login page) is a format mismatch
//! - Bodies under 10 characters are treated as empty
//! - Bodies over `max_bytes` are rejected

pub mod source_id;

use bytes::Bytes;
use reqwest::{Client, header};
use std::time::{Duration, Instant};

pub use source_id::{SourceIdError, export_url, validate};

use sheetcsv_core::{AppConfig, Error, SourceKey};

/// Shortest body accepted as a CSV export.
pub const MIN_PAYLOAD_CHARS: usize = 10;

const HTML_MARKERS: &[&str] = &["<HTML>", "<html>", "<!DOCTYPE"];

/// Configuration for the export client.
#[derive(Debug, Clone)]
pub struct FetchConfig {
    /// Base URL export paths are joined onto
    pub export_base: String,

    /// User agent string
    pub user_agent: String,

    /// Maximum response body size in bytes (default: 10MB)
    pub max_bytes: usize,

    /// Request timeout (default: 15s)
    pub timeout: Duration,

    /// Maximum number of redirects to follow (default: 5)
    pub max_redirects: usize,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self::from(&AppConfig::default())
    }
}

impl From<&AppConfig> for FetchConfig {
    fn from(config: &AppConfig) -> Self {
        Self {
            export_base: config.export_base.clone(),
            user_agent: config.user_agent.clone(),
            max_bytes: config.max_bytes,
            timeout: config.timeout(),
            max_redirects: config.max_redirects,
        }
    }
}

/// Downloads CSV exports and rejects bodies that are not CSV.
pub struct ExportClient {
    http: Client,
    config: FetchConfig,
}

impl ExportClient {
    /// Create a new export client with the given configuration.
    pub fn new(config: FetchConfig) -> Result<Self, Error> {
        let http = Client::builder()
            .user_agent(&config.user_agent)
            .timeout(config.timeout)
            .redirect(reqwest::redirect::Policy::limited(config.max_redirects))
            .use_rustls_tls()
            .gzip(true)
            .brotli(true)
            .deflate(true)
            .build()
            .map_err(|e| Error::HttpError(format!("failed to build HTTP client: {}", e)))?;

        Ok(Self { http, config })
    }

    /// Export URL for one tab under the configured base.
    pub fn export_url(&self, key: &SourceKey) -> Result<reqwest::Url, SourceIdError> {
        export_url(&self.config.export_base, key)
    }

    /// Fetch the export body as text.
    pub async fn fetch_csv(&self, url: &reqwest::Url) -> Result<String, Error> {
        let start = Instant::now();

        let response = self
            .http
            .get(url.as_str())
            .header(header::ACCEPT, "text/csv,application/csv,text/plain,*/*")
            .header(header::ACCEPT_LANGUAGE, "en-US,en;q=0.9,th;q=0.8")
            .send()
            .await
            .map_err(classify)?;

        let status = response.status();
        if !status.is_success() {
            return Err(Error::HttpError(format!("status {}", status.as_u16())));
        }

        if let Some(len) = response.content_length()
            && len as usize > self.config.max_bytes
        {
            return Err(Error::HttpError(format!("{} bytes exceeds {}", len, self.config.max_bytes)));
        }

        let bytes: Bytes = response.bytes().await.map_err(classify)?;
        if bytes.len() > self.config.max_bytes {
            return Err(Error::HttpError(format!("{} bytes exceeds {}", bytes.len(), self.config.max_bytes)));
        }

        let text = String::from_utf8_lossy(&bytes).into_owned();
        check_payload(&text)?;

        tracing::debug!("fetched {} in {}ms ({} bytes)", url, start.elapsed().as_millis(), bytes.len());

        Ok(text)
    }

    /// Get reference to the configuration.
    pub fn config(&self) -> &FetchConfig {
        &self.config
    }
}

fn classify(err: reqwest::Error) -> Error {
    if err.is_timeout() {
        Error::FetchTimeout(err.to_string())
    } else {
        Error::HttpError(format!("network error: {}", err))
    }
}

/// Reject HTML and empty bodies.
pub fn check_payload(body: &str) -> Result<(), Error> {
    if HTML_MARKERS.iter().any(|marker| body.contains(marker)) {
        return Err(Error::FormatMismatch(
            "received HTML instead of CSV data; check that the sheet is publicly accessible".into(),
        ));
    }

    let chars = body.chars().count();
    if chars < MIN_PAYLOAD_CHARS {
        return Err(Error::EmptyPayload(format!("received {chars} characters")));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    use wiremock::matchers::{headers, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    const CSV: &str = "Title,Image\nShirt,img.png\n";

    fn client_for(server: &MockServer, config: FetchConfig) -> ExportClient {
        let config = FetchConfig { export_base: format!("{}/spreadsheets/d/", server.uri()), ..config };
        ExportClient::new(config).unwrap()
    }

    #[test]
    fn test_fetch_config_default() {
        let config = FetchConfig::default();
        assert_eq!(config.export_base, "https://docs.google.com/spreadsheets/d/");
        assert!(config.user_agent.starts_with("Mozilla/5.0"));
        assert_eq!(config.max_bytes, 10 * 1024 * 1024);
        assert_eq!(config.timeout, Duration::from_millis(15_000));
        assert_eq!(config.max_redirects, 5);
    }

    #[test]
    fn test_fetch_config_from_app_config() {
        let app = AppConfig { user_agent: "sheetcsv/0.1".into(), timeout_ms: 2_000, ..Default::default() };
        let config = FetchConfig::from(&app);
        assert_eq!(config.user_agent, "sheetcsv/0.1");
        assert_eq!(config.timeout, Duration::from_millis(2_000));
    }

    #[test]
    fn test_check_payload_accepts_csv() {
        assert!(check_payload("Title,Image\nShirt,img.png\n").is_ok());
    }

    #[test]
    fn test_check_payload_rejects_html() {
        let result = check_payload("<!DOCTYPE html><html><body>Sign in</body></html>");
        assert!(matches!(result, Err(Error::FormatMismatch(_))));

        let result = check_payload("<HTML><HEAD><TITLE>Moved Temporarily</TITLE></HEAD></HTML>");
        assert!(matches!(result, Err(Error::FormatMismatch(_))));
    }

    #[test]
    fn test_check_payload_rejects_short() {
        assert!(matches!(check_payload(""), Err(Error::EmptyPayload(_))));
        assert!(matches!(check_payload("a,b\n1,2"), Err(Error::EmptyPayload(_))));
    }

    #[test]
    fn test_check_payload_boundary() {
        assert!(check_payload("a,b,c\n1,2,").is_ok());
    }

    #[tokio::test]
    async fn test_export_client_new() {
        let client = ExportClient::new(FetchConfig::default());
        assert!(client.is_ok());
    }

    #[tokio::test]
    async fn test_fetch_csv_success() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/spreadsheets/d/doc/export"))
            .and(query_param("format", "csv"))
            .and(query_param("gid", "1"))
            .and(headers("accept-language", vec!["en-US", "en;q=0.9", "th;q=0.8"]))
            .respond_with(ResponseTemplate::new(200).set_body_string(CSV))
            .expect(1)
            .mount(&server)
            .await;

        let client = client_for(&server, FetchConfig::default());
        let url = client.export_url(&SourceKey::new("doc", "1")).unwrap();
        let text = client.fetch_csv(&url).await.unwrap();
        assert_eq!(text, CSV);
    }

    #[tokio::test]
    async fn test_fetch_csv_non_success_status() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(404).set_body_string("not found, not found"))
            .mount(&server)
            .await;

        let client = client_for(&server, FetchConfig::default());
        let url = client.export_url(&SourceKey::new("doc", "1")).unwrap();
        let result = client.fetch_csv(&url).await;
        assert!(matches!(result, Err(Error::HttpError(msg)) if msg.contains("404")));
    }

    #[tokio::test]
    async fn test_fetch_csv_body_too_large() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_string("a,b\n".repeat(100)))
            .mount(&server)
            .await;

        let client = client_for(&server, FetchConfig { max_bytes: 64, ..Default::default() });
        let url = client.export_url(&SourceKey::new("doc", "1")).unwrap();
        let result = client.fetch_csv(&url).await;
        assert!(matches!(result, Err(Error::HttpError(msg)) if msg.contains("exceeds 64")));
    }

    #[tokio::test]
    async fn test_fetch_csv_timeout() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_string(CSV).set_delay(Duration::from_secs(2)))
            .mount(&server)
            .await;

        let client = client_for(&server, FetchConfig { timeout: Duration::from_millis(100), ..Default::default() });
        let url = client.export_url(&SourceKey::new("doc", "1")).unwrap();
        let result = client.fetch_csv(&url).await;
        assert!(matches!(result, Err(Error::FetchTimeout(_))));
    }

    #[tokio::test]
    async fn test_fetch_csv_login_page() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<!DOCTYPE html><html><body>Sign in</body></html>"))
            .mount(&server)
            .await;

        let client = client_for(&server, FetchConfig::default());
        let url = client.export_url(&SourceKey::new("doc", "1")).unwrap();
        let result = client.fetch_csv(&url).await;
        assert!(matches!(result, Err(Error::FormatMismatch(_))));
    }

    #[tokio::test]
    async fn test_fetch_csv_empty_body() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_string("a,b"))
            .mount(&server)
            .await;

        let client = client_for(&server, FetchConfig::default());
        let url = client.export_url(&SourceKey::new("doc", "1")).unwrap();
        let result = client.fetch_csv(&url).await;
        assert!(matches!(result, Err(Error::EmptyPayload(_))));
    }
}
