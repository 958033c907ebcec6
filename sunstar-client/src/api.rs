//! Typed storefront API
//!
//! One method per backend endpoint. Read endpoints return bare JSON; write
//! endpoints for inquiries, ratings and uploads use the [`ApiResponse`]
//! envelope.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use shared::ApiResponse;
use shared::models::{
    Advantage, BulkUploadResult, Category, CompanyInfo, ContactInquiry, InquiryReceipt, Product,
    ProductDraft, RatingSubmission, SampleProduct, SiteStats, Testimonial, UploadedFile,
};
use validator::Validate;

use crate::client::{FilePart, HttpClient};
use crate::{ClientError, ClientResult};

/// Upper bound on files per bulk upload request
pub const MAX_BULK_UPLOAD_FILES: usize = 10;

#[derive(Serialize)]
struct TestimonialQuery {
    featured_only: bool,
}

/// Body of a 2xx create/update response
///
/// Depending on the backend version this is the full product, an envelope
/// carrying only `product_id`, or nothing useful at all. Any of them means
/// the write was accepted.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum SaveResponse {
    Product(Product),
    Envelope(ApiResponse<Value>),
    Other(Value),
}

impl SaveResponse {
    /// Server-assigned id, when the body names one
    pub fn product_id(&self) -> Option<String> {
        match self {
            Self::Product(product) => Some(product.id.clone()),
            Self::Envelope(resp) => {
                let data = resp.data.as_ref()?;
                match data.get("product_id").or_else(|| data.get("id"))? {
                    Value::String(id) => Some(id.clone()),
                    Value::Number(id) => Some(id.to_string()),
                    _ => None,
                }
            }
            Self::Other(_) => None,
        }
    }

    pub fn into_product(self) -> Option<Product> {
        match self {
            Self::Product(product) => Some(product),
            _ => None,
        }
    }

    /// Reject an envelope that says `success: false` despite the 2xx status
    pub fn accepted(self) -> ClientResult<Self> {
        match &self {
            Self::Envelope(resp) if !resp.success => {
                let message = resp.error.clone().unwrap_or_else(|| resp.message.clone());
                Err(ClientError::http(200, message))
            }
            _ => Ok(self),
        }
    }
}

/// Typed wrapper over an [`HttpClient`]
///
/// Cheap to clone; the transport is shared.
#[derive(Debug)]
pub struct SiteApi<C: HttpClient> {
    http: Arc<C>,
}

impl<C: HttpClient> Clone for SiteApi<C> {
    fn clone(&self) -> Self {
        Self {
            http: Arc::clone(&self.http),
        }
    }
}

impl<C: HttpClient> SiteApi<C> {
    pub fn new(http: C) -> Self {
        Self {
            http: Arc::new(http),
        }
    }

    pub fn http(&self) -> &C {
        &self.http
    }

    pub fn base_url(&self) -> &str {
        self.http.base_url()
    }

    // ========== Public content ==========

    pub async fn company_info(&self) -> ClientResult<CompanyInfo> {
        self.http.get("/api/company-info").await
    }

    pub async fn product_categories(&self) -> ClientResult<Vec<Category>> {
        self.http.get("/api/products/categories").await
    }

    pub async fn sample_products(&self, category_id: &str) -> ClientResult<Vec<SampleProduct>> {
        let path = format!("/api/products/sample/{}", urlencoding::encode(category_id));
        self.http.get(&path).await
    }

    pub async fn products_by_category(&self, category_id: &str) -> ClientResult<Vec<Product>> {
        let path = format!("/api/products/category/{}", urlencoding::encode(category_id));
        self.http.get(&path).await
    }

    pub async fn testimonials(&self, featured_only: bool) -> ClientResult<Vec<Testimonial>> {
        self.http
            .get_query("/api/testimonials", &TestimonialQuery { featured_only })
            .await
    }

    pub async fn advantages(&self) -> ClientResult<Vec<Advantage>> {
        self.http.get("/api/advantages").await
    }

    pub async fn stats(&self) -> ClientResult<SiteStats> {
        self.http.get("/api/stats").await
    }

    /// Backend liveness; returns whatever the root endpoint reports
    pub async fn health(&self) -> ClientResult<serde_json::Value> {
        self.http.get("/api/").await
    }

    // ========== Contact & feedback ==========

    /// Submit the contact form; returns the backend's acknowledgement text
    pub async fn submit_inquiry(
        &self,
        inquiry: &ContactInquiry,
    ) -> ClientResult<ApiResponse<InquiryReceipt>> {
        inquiry.validate()?;
        self.http.post("/api/contact/inquiry", inquiry).await
    }

    pub async fn submit_rating(
        &self,
        rating: &RatingSubmission,
    ) -> ClientResult<ApiResponse<serde_json::Value>> {
        rating.validate()?;
        self.http.post("/api/ratings", rating).await
    }

    // ========== Admin catalog ==========

    pub async fn list_products(&self) -> ClientResult<Vec<Product>> {
        self.http.get("/api/admin/products").await
    }

    pub async fn create_product(&self, draft: &ProductDraft) -> ClientResult<SaveResponse> {
        self.http
            .post::<SaveResponse, _>("/api/admin/products", draft)
            .await?
            .accepted()
    }

    pub async fn update_product(
        &self,
        id: &str,
        draft: &ProductDraft,
    ) -> ClientResult<SaveResponse> {
        let path = format!("/api/admin/products/{}", urlencoding::encode(id));
        self.http.put::<SaveResponse, _>(&path, draft).await?.accepted()
    }

    pub async fn delete_product(&self, id: &str) -> ClientResult<()> {
        let path = format!("/api/admin/products/{}", urlencoding::encode(id));
        let _: serde_json::Value = self.http.delete(&path).await?;
        Ok(())
    }

    // ========== Uploads ==========

    /// Upload one image; the caller is expected to have validated it
    pub async fn upload_image(&self, part: FilePart) -> ClientResult<UploadedFile> {
        let resp: ApiResponse<UploadedFile> = self
            .http
            .upload("/api/upload/image", vec![part])
            .await?;
        resp.into_data().map_err(ClientError::InvalidResponse)
    }

    pub async fn upload_images(&self, parts: Vec<FilePart>) -> ClientResult<BulkUploadResult> {
        if parts.is_empty() {
            return Err(ClientError::validation("No files selected"));
        }
        if parts.len() > MAX_BULK_UPLOAD_FILES {
            return Err(ClientError::validation(format!(
                "Too many files. Maximum is {} per upload",
                MAX_BULK_UPLOAD_FILES
            )));
        }
        let resp: ApiResponse<BulkUploadResult> =
            self.http.upload("/api/upload/images", parts).await?;
        resp.into_data().map_err(ClientError::InvalidResponse)
    }

    pub async fn delete_image(&self, filename: &str) -> ClientResult<()> {
        if filename.is_empty() || filename.contains('/') {
            return Err(ClientError::validation(format!(
                "Invalid image filename: {:?}",
                filename
            )));
        }
        let path = format!("/api/upload/image/{}", urlencoding::encode(filename));
        let _: serde_json::Value = self.http.delete(&path).await?;
        Ok(())
    }
}
