//! Image Upload Workflow
//!
//! Validates an image locally, sends it as multipart form data and drives a
//! synthetic progress indicator while the request is outstanding. The
//! transport reports no byte-level progress, so the indicator creeps toward
//! [`PROGRESS_CAP`] on a timer and reaches 100 only once the server has
//! confirmed the upload.

use std::path::Path;
use std::time::Duration;

use shared::models::BulkUploadResult;
use tokio::sync::watch;

use crate::api::{MAX_BULK_UPLOAD_FILES, SiteApi};
use crate::client::{FilePart, HttpClient};
use crate::config::ClientConfig;
use crate::{ClientError, ClientResult};

/// Highest value the synthetic indicator reaches before confirmation
pub const PROGRESS_CAP: u8 = 90;

/// Increment per tick
pub const PROGRESS_STEP: u8 = 10;

/// Upload-in-progress metadata shown next to the product form
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct UploadStatus {
    pub uploading: bool,
    /// 0..=100
    pub progress: u8,
}

impl UploadStatus {
    pub fn idle() -> Self {
        Self::default()
    }

    pub fn started() -> Self {
        Self {
            uploading: true,
            progress: 0,
        }
    }

    pub fn completed() -> Self {
        Self {
            uploading: false,
            progress: 100,
        }
    }
}

/// An image selected by the operator
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageFile {
    pub file_name: String,
    /// Declared MIME type, e.g. `image/png`
    pub content_type: String,
    pub bytes: Vec<u8>,
}

impl ImageFile {
    pub fn new(
        file_name: impl Into<String>,
        content_type: impl Into<String>,
        bytes: Vec<u8>,
    ) -> Self {
        Self {
            file_name: file_name.into(),
            content_type: content_type.into(),
            bytes,
        }
    }

    /// Read a file from disk; the type is guessed from its extension
    pub async fn from_path(path: impl AsRef<Path>) -> ClientResult<Self> {
        let path = path.as_ref();
        let bytes = tokio::fs::read(path).await?;
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .ok_or_else(|| ClientError::validation(format!("Not a file: {}", path.display())))?;
        let content_type = mime_guess::from_path(path)
            .first_or_octet_stream()
            .essence_str()
            .to_string();
        Ok(Self::new(file_name, content_type, bytes))
    }

    pub fn size(&self) -> usize {
        self.bytes.len()
    }

    fn to_part(&self, field: &str) -> FilePart {
        FilePart {
            field: field.to_string(),
            file_name: self.file_name.clone(),
            content_type: self.content_type.clone(),
            bytes: self.bytes.clone(),
        }
    }
}

/// Validate image file before any network call
pub fn validate_image(file: &ImageFile, max_bytes: usize) -> ClientResult<()> {
    if !file.content_type.to_ascii_lowercase().starts_with("image/") {
        return Err(ClientError::validation(format!(
            "Please select an image file ('{}' is {})",
            file.file_name, file.content_type
        )));
    }

    if file.size() > max_bytes {
        return Err(ClientError::validation(format!(
            "File too large. Maximum size is {} bytes ({}MB)",
            max_bytes,
            max_bytes / 1024 / 1024
        )));
    }

    Ok(())
}

/// Compose the backend root with a returned file path
///
/// Absolute URLs are returned unchanged.
pub fn resolve_file_url(base_url: &str, file_url: &str) -> String {
    if file_url.starts_with("http://") || file_url.starts_with("https://") {
        return file_url.to_string();
    }
    format!(
        "{}/{}",
        base_url.trim_end_matches('/'),
        file_url.trim_start_matches('/')
    )
}

/// Timer-driven progress approximation, capped below completion
#[derive(Debug, Clone, Copy)]
pub struct SyntheticProgress {
    value: u8,
    step: u8,
    cap: u8,
}

impl SyntheticProgress {
    pub fn new(step: u8, cap: u8) -> Self {
        Self {
            value: 0,
            step: step.max(1),
            cap: cap.min(99),
        }
    }

    /// Advance one tick; never exceeds the cap and never decreases
    pub fn advance(&mut self) -> u8 {
        self.value = self.value.saturating_add(self.step).min(self.cap);
        self.value
    }

    pub fn value(&self) -> u8 {
        self.value
    }
}

impl Default for SyntheticProgress {
    fn default() -> Self {
        Self::new(PROGRESS_STEP, PROGRESS_CAP)
    }
}

/// Runs validated uploads against the upload endpoints
#[derive(Debug, Clone)]
pub struct ImageUploader {
    max_bytes: usize,
    tick: Duration,
}

/// Returns the status to idle if the upload future goes away mid-flight
struct ResetOnDrop<'a>(&'a watch::Sender<UploadStatus>);

impl Drop for ResetOnDrop<'_> {
    fn drop(&mut self) {
        self.0.send_if_modified(|s| {
            if s.uploading {
                *s = UploadStatus::idle();
                true
            } else {
                false
            }
        });
    }
}

impl ImageUploader {
    pub fn new(max_bytes: usize, tick: Duration) -> Self {
        Self { max_bytes, tick }
    }

    pub fn from_config(config: &ClientConfig) -> Self {
        Self::new(config.max_upload_bytes, config.progress_tick())
    }

    pub fn max_bytes(&self) -> usize {
        self.max_bytes
    }

    pub fn validate(&self, file: &ImageFile) -> ClientResult<()> {
        validate_image(file, self.max_bytes)
    }

    /// Upload one image and return its absolute URL
    ///
    /// `status` observes the synthetic progress. On failure it is reset to
    /// idle and the error is returned.
    pub async fn upload<C: HttpClient>(
        &self,
        api: &SiteApi<C>,
        file: &ImageFile,
        status: &watch::Sender<UploadStatus>,
    ) -> ClientResult<String> {
        self.validate(file)?;

        status.send_replace(UploadStatus::started());
        let _reset = ResetOnDrop(status);
        tracing::debug!("Uploading {} ({} bytes)", file.file_name, file.size());

        let mut progress = SyntheticProgress::default();
        let request = api.upload_image(file.to_part("file"));
        tokio::pin!(request);

        let mut ticker = tokio::time::interval(self.tick);
        // first tick fires immediately
        ticker.tick().await;

        let result = loop {
            tokio::select! {
                biased;
                res = &mut request => break res,
                _ = ticker.tick() => {
                    let value = progress.advance();
                    status.send_modify(|s| s.progress = value);
                }
            }
        };

        match result {
            Ok(uploaded) => {
                status.send_replace(UploadStatus::completed());
                let url = resolve_file_url(api.base_url(), &uploaded.file_url);
                tracing::info!("Uploaded {} -> {}", file.file_name, url);
                Ok(url)
            }
            Err(e) => {
                status.send_replace(UploadStatus::idle());
                tracing::error!("Image upload failed for {}: {}", file.file_name, e);
                Err(e)
            }
        }
    }

    /// Bulk upload; every file is validated before the request is sent
    pub async fn upload_many<C: HttpClient>(
        &self,
        api: &SiteApi<C>,
        files: &[ImageFile],
    ) -> ClientResult<BulkUploadResult> {
        if files.len() > MAX_BULK_UPLOAD_FILES {
            return Err(ClientError::validation(format!(
                "Too many files. Maximum is {} per upload",
                MAX_BULK_UPLOAD_FILES
            )));
        }
        for file in files {
            self.validate(file)?;
        }
        let parts = files.iter().map(|f| f.to_part("files")).collect();
        let mut result = api.upload_images(parts).await?;
        for uploaded in &mut result.uploaded_files {
            uploaded.file_url = resolve_file_url(api.base_url(), &uploaded.file_url);
        }
        Ok(result)
    }
}
