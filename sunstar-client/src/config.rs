//! Client configuration

use std::time::Duration;

/// Default request timeout in seconds
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Default upload ceiling (5MB)
pub const DEFAULT_MAX_UPLOAD_BYTES: usize = 5 * 1024 * 1024;

/// Default synthetic progress tick
pub const DEFAULT_PROGRESS_TICK_MS: u64 = 200;

/// Client configuration for talking to the storefront backend
///
/// # Environment variables
///
/// | Variable | Default | Description |
/// |----------|---------|-------------|
/// | BACKEND_URL | http://localhost:8001 | Backend root (falls back to REACT_APP_BACKEND_URL) |
/// | REQUEST_TIMEOUT_SECS | 10 | Per-request timeout |
/// | ADMIN_TOKEN | - | Pre-issued bearer token attached to every request |
/// | IMAGE_REQUIRED | false | Whether a product needs an image before submit |
/// | MAX_UPLOAD_MB | 5 | Upload size ceiling |
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Backend root URL (e.g., "http://localhost:8001"); API paths are appended
    pub base_url: String,

    /// Request timeout in seconds
    pub timeout: u64,

    /// Bearer token for administrative endpoints
    pub token: Option<String>,

    /// Require `image_url` before a product draft can be submitted
    pub image_required: bool,

    /// Largest accepted image upload in bytes
    pub max_upload_bytes: usize,

    /// Interval between synthetic progress steps in milliseconds
    pub progress_tick_ms: u64,
}

impl ClientConfig {
    /// Create a new client configuration
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            timeout: DEFAULT_TIMEOUT_SECS,
            token: None,
            image_required: false,
            max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES,
            progress_tick_ms: DEFAULT_PROGRESS_TICK_MS,
        }
    }

    /// Load configuration from environment variables
    ///
    /// Unset or unparsable values fall back to defaults.
    pub fn from_env() -> Self {
        let base_url = std::env::var("BACKEND_URL")
            .or_else(|_| std::env::var("REACT_APP_BACKEND_URL"))
            .unwrap_or_else(|_| "http://localhost:8001".into());

        let mut config = Self::new(base_url);
        config.timeout = std::env::var("REQUEST_TIMEOUT_SECS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(DEFAULT_TIMEOUT_SECS);
        config.token = std::env::var("ADMIN_TOKEN").ok().filter(|t| !t.is_empty());
        config.image_required = std::env::var("IMAGE_REQUIRED")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(false);
        config.max_upload_bytes = std::env::var("MAX_UPLOAD_MB")
            .ok()
            .and_then(|v| upload_bytes_from_mb(&v))
            .unwrap_or(DEFAULT_MAX_UPLOAD_BYTES);
        config
    }

    /// Set the bearer token
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    /// Set the request timeout
    pub fn with_timeout(mut self, seconds: u64) -> Self {
        self.timeout = seconds;
        self
    }

    /// Toggle the image requirement for product drafts
    pub fn with_image_required(mut self, required: bool) -> Self {
        self.image_required = required;
        self
    }

    /// Set the upload size ceiling
    pub fn with_max_upload_bytes(mut self, bytes: usize) -> Self {
        self.max_upload_bytes = bytes;
        self
    }

    /// Set the synthetic progress tick
    pub fn with_progress_tick(mut self, millis: u64) -> Self {
        self.progress_tick_ms = millis;
        self
    }

    pub fn timeout_duration(&self) -> Duration {
        Duration::from_secs(self.timeout)
    }

    pub fn progress_tick(&self) -> Duration {
        Duration::from_millis(self.progress_tick_ms.max(1))
    }

    /// Create an HTTP client from this configuration
    pub fn build_http_client(&self) -> crate::ClientResult<crate::NetworkHttpClient> {
        crate::NetworkHttpClient::new(self)
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new("http://localhost:8001")
    }
}

/// `MAX_UPLOAD_MB` in bytes; `None` when unparsable or too large for `usize`
fn upload_bytes_from_mb(value: &str) -> Option<usize> {
    value.trim().parse::<usize>().ok()?.checked_mul(1024 * 1024)
}
