//! Upload Payloads

use serde::{Deserialize, Serialize};

/// A stored image as reported by the upload endpoint
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadedFile {
    /// Path relative to the backend root, e.g. `/uploads/images/abc.jpg`
    pub file_url: String,
    #[serde(default)]
    pub filename: String,
    #[serde(default)]
    pub size: u64,
}

/// Result of a multi-file upload; rejected files are listed in `errors`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BulkUploadResult {
    #[serde(default)]
    pub uploaded_files: Vec<UploadedFile>,
    #[serde(default)]
    pub upload_count: usize,
    #[serde(default)]
    pub errors: Vec<String>,
}
