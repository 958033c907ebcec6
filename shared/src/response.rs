//! API Response types
//!
//! Envelope used by the storefront backend for write endpoints:
//! ```json
//! {
//!     "success": true,
//!     "message": "Thank you for your inquiry!",
//!     "data": { ... }
//! }
//! ```
//! Read endpoints return bare JSON and do not use the envelope.

use serde::{Deserialize, Serialize};

/// Unified API response structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    #[serde(default = "default_success")]
    pub success: bool,
    #[serde(default)]
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    /// Error detail on failure responses
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<T> ApiResponse<T> {
    /// Create a successful response
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            message: "Success".to_string(),
            data: Some(data),
            error: None,
        }
    }

    /// Create a successful response with custom message
    pub fn ok_with_message(data: T, message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
            data: Some(data),
            error: None,
        }
    }

    /// Create an error response
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
            data: None,
            error: None,
        }
    }

    /// Take the payload, or describe why there is none
    pub fn into_data(self) -> Result<T, String> {
        match (self.success, self.data) {
            (true, Some(data)) => Ok(data),
            (true, None) => Err(format!("Response missing data: {}", self.message)),
            (false, _) => Err(self.error.unwrap_or(self.message)),
        }
    }
}

/// Error body shapes the backend may send on non-2xx responses
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ErrorBody {
    /// FastAPI `HTTPException` detail
    #[serde(default)]
    pub detail: Option<serde_json::Value>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}

impl ErrorBody {
    /// Best human-readable message contained in the body
    pub fn message(&self) -> Option<String> {
        if let Some(detail) = &self.detail {
            return Some(match detail {
                serde_json::Value::String(s) => s.clone(),
                other => other.to_string(),
            });
        }
        self.message.clone().or_else(|| self.error.clone())
    }
}

fn default_success() -> bool {
    true
}
